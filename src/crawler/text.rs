//! Text helpers for noisy product markup
//!
//! Element text is assembled from its text nodes with each node trimmed and
//! empty nodes dropped. Numeric fields are recovered from free text by
//! keeping only the characters that can belong to the number.

use scraper::{ElementRef, Html};

/// Trimmed text nodes of `element` joined with `separator`
///
/// With an empty separator, `<b>12</b> <i>990</i>` yields `"12990"`; with
/// `" "` it yields `"12 990"`.
pub fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// A text node located by content, with its enclosing element
#[derive(Debug, Clone, Copy)]
pub struct TextMatch<'a> {
    /// Raw content of the text node
    pub text: &'a str,

    /// Element directly containing the text node
    pub parent: Option<ElementRef<'a>>,
}

/// Finds the first text node, in document order, satisfying `predicate`
pub fn find_text_node<'a, F>(document: &'a Html, predicate: F) -> Option<TextMatch<'a>>
where
    F: Fn(&str) -> bool,
{
    document.tree.root().descendants().find_map(|node| {
        let text: &str = node.value().as_text()?;
        if !predicate(text) {
            return None;
        }
        Some(TextMatch {
            text,
            parent: node.parent().and_then(ElementRef::wrap),
        })
    })
}

/// Finds the first text node containing `needle` (case-sensitive)
pub fn find_text_containing<'a>(document: &'a Html, needle: &str) -> Option<TextMatch<'a>> {
    find_text_node(document, |text| text.contains(needle))
}

/// Finds the first text node whose lowercase form contains `needle`
///
/// `needle` is expected in lowercase already.
pub fn find_text_containing_ignore_case<'a>(
    document: &'a Html,
    needle: &str,
) -> Option<TextMatch<'a>> {
    find_text_node(document, |text| text.to_lowercase().contains(needle))
}

/// Keeps only the ASCII digits of `text`
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Parses every digit in `text` as one integer
///
/// Returns `None` when there are no digits or the value overflows.
///
/// # Examples
///
/// ```
/// use wb_harvest::crawler::parse_integer;
///
/// assert_eq!(parse_integer("12 990 ₽"), Some(12990));
/// assert_eq!(parse_integer("цена по запросу"), None);
/// ```
pub fn parse_integer(text: &str) -> Option<u64> {
    let digits = digits_only(text);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parses a decimal-comma rating such as `"4,8"`
///
/// The comma becomes a decimal point, everything but digits and points is
/// dropped, and whatever remains must parse as a float.
///
/// # Examples
///
/// ```
/// use wb_harvest::crawler::parse_rating;
///
/// assert_eq!(parse_rating("4,8"), Some(4.8));
/// assert_eq!(parse_rating("нет оценок"), None);
/// ```
pub fn parse_rating(text: &str) -> Option<f64> {
    let filtered: String = text
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    filtered.parse().ok()
}
