//! Fallback selector chains
//!
//! Marketplace markup drifts between layouts, so most fields are located by
//! an ordered list of CSS selectors tried in turn. The first selector that
//! matches anything wins, even if a later selector would match an element
//! earlier in the document.

use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};

/// Compiles a single CSS selector
pub fn compile(css: &str) -> Result<Selector, HarvestError> {
    Selector::parse(css).map_err(|e| HarvestError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Ordered list of alternative selectors, first success wins
#[derive(Debug, Clone)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// Compiles every alternative, in priority order
    pub fn new(alternatives: &[&str]) -> Result<Self, HarvestError> {
        let selectors = alternatives
            .iter()
            .map(|css| compile(css))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    /// First descendant of `scope` matched by the highest-priority selector
    pub fn first_in<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .iter()
            .find_map(|selector| scope.select(selector).next())
    }

    /// Same as [`first_in`](Self::first_in) over the whole document
    pub fn first<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        self.first_in(document.root_element())
    }
}

/// Every selector the harvester relies on, compiled once per run
#[derive(Debug, Clone)]
pub struct PageSelectors {
    // Search results
    pub card: Selector,
    pub card_link: SelectorChain,

    // Product page
    pub title: SelectorChain,
    pub label_value: Selector,
    pub price: SelectorChain,
    pub description: SelectorChain,
    pub gallery_image: Selector,
    pub characteristics_block: SelectorChain,
    pub characteristic_row: Selector,
    pub characteristic_name: SelectorChain,
    pub characteristic_value: SelectorChain,
    pub seller: SelectorChain,
    pub sizes_block: SelectorChain,
    pub size_item: Selector,
    pub rating: SelectorChain,
}

impl PageSelectors {
    /// Compiles the full selector set
    ///
    /// # Returns
    ///
    /// * `Ok(PageSelectors)` - All selectors compiled
    /// * `Err(HarvestError::Selector)` - A selector failed to parse
    pub fn compile() -> Result<Self, HarvestError> {
        Ok(Self {
            // Article- and div-level cards are equivalent; keep document order
            card: compile("article.product-card, div.product-card")?,
            card_link: SelectorChain::new(&[
                "a.product-card__main",
                "a.product-card__link",
                "a.j-open-full-product-card",
            ])?,

            title: SelectorChain::new(&["h1.product-page__title", "h1"])?,
            label_value: compile("span")?,
            price: SelectorChain::new(&[
                ".price-block__final-price",
                ".final-cost",
                ".price-block__price",
            ])?,
            description: SelectorChain::new(&["#description", ".product-description__text"])?,
            gallery_image: compile("div.product-page__gallery img, .photo-zoom__preview img")?,
            characteristics_block: SelectorChain::new(&[
                ".product-params",
                ".product-characteristics",
                "#characteristics",
            ])?,
            characteristic_row: compile("tr, li")?,
            characteristic_name: SelectorChain::new(&["th", ".product-params__cell-name"])?,
            characteristic_value: SelectorChain::new(&["td", ".product-params__cell-value"])?,
            seller: SelectorChain::new(&["a.seller-info__name", "a.seller-link"])?,
            sizes_block: SelectorChain::new(&[".sizes-list", ".sizes-table"])?,
            size_item: compile("button, .sizes-list__item")?,
            rating: SelectorChain::new(&[".product-page__rating", "span.rating"])?,
        })
    }
}
