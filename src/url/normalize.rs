/// Reduces a configured base URL to the origin prefix used for joining
///
/// Trailing slashes are dropped so that joining with a root-relative path
/// never produces `//`.
pub fn site_origin(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Turns a link found in page markup into an absolute URL
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Protocol-relative (`//host/path`) gets an `https:` scheme
/// 3. Root-relative (`/path`) is prefixed with the site origin
/// 4. Anything else is returned unchanged
///
/// # Examples
///
/// ```
/// use wb_harvest::url::absolutize;
///
/// let origin = "https://www.wildberries.ru";
/// assert_eq!(
///     absolutize("/catalog/1/detail.aspx", origin),
///     "https://www.wildberries.ru/catalog/1/detail.aspx"
/// );
/// assert_eq!(
///     absolutize("//images.example.com/a.webp", origin),
///     "https://images.example.com/a.webp"
/// );
/// ```
pub fn absolutize(href: &str, origin: &str) -> String {
    let href = href.trim();

    if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        href.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.wildberries.ru";

    #[test]
    fn test_site_origin_strips_trailing_slash() {
        assert_eq!(site_origin("https://example.com/"), "https://example.com");
        assert_eq!(site_origin("https://example.com"), "https://example.com");
        assert_eq!(site_origin(" http://127.0.0.1:8080// "), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            absolutize("/seller/42", ORIGIN),
            "https://www.wildberries.ru/seller/42"
        );
    }

    #[test]
    fn test_protocol_relative() {
        assert_eq!(
            absolutize("//basket-01.wbbasket.ru/vol1/1.webp", ORIGIN),
            "https://basket-01.wbbasket.ru/vol1/1.webp"
        );
    }

    #[test]
    fn test_absolute_unchanged() {
        assert_eq!(
            absolutize("https://cdn.example.com/x.jpg", ORIGIN),
            "https://cdn.example.com/x.jpg"
        );
        assert_eq!(absolutize("relative/path", ORIGIN), "relative/path");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            absolutize("  /catalog/7/detail.aspx\n", ORIGIN),
            "https://www.wildberries.ru/catalog/7/detail.aspx"
        );
    }
}
