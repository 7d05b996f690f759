//! Link classification and an in-memory, browser-style history.

use url::Url;

/// A navigation request produced by clicking a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlRequest {
    /// Same-origin link: path-only navigation, no reload.
    Internal(String),
    /// Other-origin link: full page load. Empty for placeholder links.
    External(String),
}

/// Classify `href` as clicked on a page served from `base`.
///
/// An empty href or `"#"` gives `External("")`, which hosts ignore.
#[must_use]
pub fn classify_link(base: &Url, href: &str) -> UrlRequest {
    let href = href.trim();
    if href.is_empty() || href == "#" {
        return UrlRequest::External(String::new());
    }

    match base.join(href) {
        Ok(target) if target.origin() == base.origin() => {
            let mut path = target.path().to_string();
            if let Some(query) = target.query() {
                path.push('?');
                path.push_str(query);
            }
            UrlRequest::Internal(path)
        }
        _ => UrlRequest::External(href.to_string()),
    }
}

/// Session history of visited paths.
///
/// Full page loads are recorded separately; the session never follows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    current: String,
    back: Vec<String>,
    forward: Vec<String>,
    external_loads: Vec<String>,
}

impl History {
    /// Start a history at `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
            back: Vec::new(),
            forward: Vec::new(),
            external_loads: Vec::new(),
        }
    }

    /// The current path.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Push a new entry, discarding forward entries.
    pub fn push(&mut self, path: impl Into<String>) {
        let previous = std::mem::replace(&mut self.current, path.into());
        self.back.push(previous);
        self.forward.clear();
    }

    /// Step back one entry. Returns the restored path.
    pub fn back(&mut self) -> Option<&str> {
        let previous = self.back.pop()?;
        let current = std::mem::replace(&mut self.current, previous);
        self.forward.push(current);
        Some(&self.current)
    }

    /// Step forward one entry. Returns the restored path.
    pub fn forward(&mut self) -> Option<&str> {
        let next = self.forward.pop()?;
        let current = std::mem::replace(&mut self.current, next);
        self.back.push(current);
        Some(&self.current)
    }

    /// Record a full page load of an external URL.
    pub fn record_load(&mut self, url: impl Into<String>) {
        self.external_loads.push(url.into());
    }

    /// External URLs loaded during the session, oldest first.
    #[must_use]
    pub fn external_loads(&self) -> &[String] {
        &self.external_loads
    }

    /// Number of entries behind the current one.
    #[must_use]
    pub const fn back_len(&self) -> usize {
        self.back.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://shop.example.com/home").unwrap()
    }

    #[test]
    fn test_classify_internal_links() {
        assert_eq!(
            classify_link(&base(), "/products/abc"),
            UrlRequest::Internal("/products/abc".to_string())
        );
        assert_eq!(
            classify_link(&base(), "https://shop.example.com/home?page=2"),
            UrlRequest::Internal("/home?page=2".to_string())
        );
        assert_eq!(
            classify_link(&base(), "products/abc"),
            UrlRequest::Internal("/products/abc".to_string())
        );
    }

    #[test]
    fn test_classify_external_links() {
        assert_eq!(
            classify_link(&base(), "https://instagram.com/shop"),
            UrlRequest::External("https://instagram.com/shop".to_string())
        );
        assert_eq!(
            classify_link(&base(), "mailto:hello@example.com"),
            UrlRequest::External("mailto:hello@example.com".to_string())
        );
    }

    #[test]
    fn test_classify_placeholder_links() {
        assert_eq!(classify_link(&base(), ""), UrlRequest::External(String::new()));
        assert_eq!(classify_link(&base(), "#"), UrlRequest::External(String::new()));
        assert_eq!(classify_link(&base(), "  "), UrlRequest::External(String::new()));
    }

    #[test]
    fn test_history_back_and_forward() {
        let mut history = History::new("/home");
        history.push("/products/a");
        history.push("/products/b");

        assert_eq!(history.back(), Some("/products/a"));
        assert_eq!(history.back(), Some("/home"));
        assert_eq!(history.back(), None);
        assert_eq!(history.current(), "/home");

        assert_eq!(history.forward(), Some("/products/a"));
        assert_eq!(history.current(), "/products/a");
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = History::new("/home");
        history.push("/products/a");
        history.back();
        history.push("/products/b");

        assert_eq!(history.forward(), None);
        assert_eq!(history.back_len(), 1);
        assert_eq!(history.current(), "/products/b");
    }

    #[test]
    fn test_external_loads_do_not_move_history() {
        let mut history = History::new("/home");
        history.record_load("https://instagram.com/shop");

        assert_eq!(history.current(), "/home");
        assert_eq!(history.external_loads(), ["https://instagram.com/shop"]);
    }
}
