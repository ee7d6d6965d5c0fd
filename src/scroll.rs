//! Same-page anchor navigation.

/// Element id named by a same-page link, if it names one. `#` alone and links
/// that do not start with `#` name nothing.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll offset that brings the target just below the fixed header.
///
/// `locate` maps an element id to its page-relative top; `None` means the page
/// has no such element, in which case there is nothing to scroll to.
pub fn scroll_target<F>(href: &str, header_height: f64, locate: F) -> Option<f64>
where
    F: FnOnce(&str) -> Option<f64>,
{
    let top = locate(anchor_fragment(href)?)?;
    Some(top - header_height)
}
