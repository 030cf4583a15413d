/// Column labels of the exported tables, in export order
pub const EXPORT_COLUMNS: [&str; 13] = [
    "Ссылка на товар",
    "Артикул",
    "Название",
    "Цена",
    "Описание",
    "Ссылки на изображения через запятую",
    "Все характеристики с сохранением их структуры",
    "Название селлера",
    "Ссылка на селлера",
    "Размеры товара через запятую",
    "Остатки по товару (число)",
    "Рейтинг",
    "Количество отзывов",
];

/// One product page's extracted fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    /// Absolute URL of the product page
    pub product_url: String,

    /// Marketplace article number
    pub article_id: Option<String>,

    pub title: String,

    /// Displayed price in whole currency units
    pub price: Option<u64>,

    pub description: String,

    /// Absolute image URLs, unique, in first-seen order
    pub image_urls: Vec<String>,

    /// `"name: value"` pairs in source row order
    pub characteristics: Vec<String>,

    pub seller_name: String,
    pub seller_url: String,
    pub sizes: Vec<String>,

    /// Always `None`; product pages carry no stock figure
    pub stock_count: Option<u64>,

    pub rating: Option<f64>,
    pub feedback_count: Option<u64>,

    /// Used for filtering only, stripped from both exports
    pub country_of_origin: Option<String>,
}

impl ProductRecord {
    /// Number of fields in the record shape, the internal country included
    pub const FIELD_COUNT: usize = EXPORT_COLUMNS.len() + 1;

    /// Image URLs as a single comma-separated cell
    pub fn joined_images(&self) -> String {
        self.image_urls.join(", ")
    }

    /// Characteristics as a single semicolon-separated cell
    pub fn joined_characteristics(&self) -> String {
        self.characteristics.join("; ")
    }

    /// Sizes as a single comma-separated cell
    pub fn joined_sizes(&self) -> String {
        self.sizes.join(", ")
    }
}
