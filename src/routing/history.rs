//! Browser-style navigation history.
//!
//! # Responsibilities
//! - Normalise the base prefix every route is served under
//! - Keep the stack of visited locations and the cursor into it
//!
//! # Design Decisions
//! - `push` drops forward entries, `replace` overwrites the current one
//! - `back`/`forward` only move the cursor
//! - Entries are stored without the base prefix

use crate::routing::location::Location;

/// Environment variable carrying the base path, read by the config loader.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// URL prefix prepended to every route path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasePath {
    prefix: String,
}

impl BasePath {
    /// Normalise a raw base: empty means `/`, a leading `/` is ensured and
    /// trailing slashes are dropped, so `/` becomes the empty prefix.
    pub fn new(raw: &str) -> Self {
        let raw = if raw.is_empty() { "/" } else { raw };
        let mut prefix = if raw.starts_with('/') {
            raw.to_string()
        } else {
            format!("/{}", raw)
        };
        while prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }

    /// Normalised prefix; empty for the root base.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Displayed URL for a router path.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    /// Router path for a displayed URL path.
    ///
    /// Paths outside the base are returned unchanged; check `contains` first.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        if self.prefix.is_empty() {
            return path;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Whether a displayed URL path lies under this base.
    pub fn contains(&self, path: &str) -> bool {
        self.prefix.is_empty()
            || path == self.prefix
            || path
                .strip_prefix(self.prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// In-memory web history: visited locations and a cursor.
#[derive(Debug, Clone, Default)]
pub struct WebHistory {
    entries: Vec<Location>,
    position: usize,
}

impl WebHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current location, `None` before the first navigation.
    pub fn location(&self) -> Option<&Location> {
        self.entries.get(self.position)
    }

    pub fn push(&mut self, location: Location) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.position + 1);
        }
        self.entries.push(location);
        self.position = self.entries.len() - 1;
    }

    pub fn replace(&mut self, location: Location) {
        if self.entries.is_empty() {
            self.push(location);
        } else {
            self.entries[self.position] = location;
        }
    }

    pub fn back(&mut self) -> Option<&Location> {
        if self.position == 0 || self.entries.is_empty() {
            return None;
        }
        self.position -= 1;
        self.entries.get(self.position)
    }

    pub fn forward(&mut self) -> Option<&Location> {
        if self.position + 1 >= self.entries.len() {
            return None;
        }
        self.position += 1;
        self.entries.get(self.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_normalisation() {
        assert_eq!(BasePath::new("").prefix(), "");
        assert_eq!(BasePath::new("/").prefix(), "");
        assert_eq!(BasePath::new("/site/").prefix(), "/site");
        assert_eq!(BasePath::new("site").prefix(), "/site");
        assert_eq!(BasePath::new("/a/b").prefix(), "/a/b");
    }

    #[test]
    fn test_base_join_and_strip() {
        let root = BasePath::new("/");
        assert_eq!(root.join("/resume"), "/resume");
        assert_eq!(root.strip("/resume"), "/resume");

        let base = BasePath::new("/site/");
        assert_eq!(base.join("/"), "/site/");
        assert_eq!(base.join("/tools/qrcode"), "/site/tools/qrcode");
        assert_eq!(base.strip("/site/tools/qrcode"), "/tools/qrcode");
        assert_eq!(base.strip("/site"), "/");
        assert_eq!(base.strip("/site/"), "/");
        assert_eq!(base.strip("/sitemap"), "/sitemap");
        assert!(base.contains("/site/resume"));
        assert!(!base.contains("/sitemap"));
    }

    #[test]
    fn test_push_back_forward() {
        let mut history = WebHistory::new();
        assert!(history.location().is_none());
        assert!(history.back().is_none());

        history.push(Location::new("/"));
        history.push(Location::new("/resume"));
        history.push(Location::new("/tools"));
        assert_eq!(history.len(), 3);

        assert_eq!(history.back().unwrap().path, "/resume");
        assert_eq!(history.back().unwrap().path, "/");
        assert!(history.back().is_none());
        assert_eq!(history.forward().unwrap().path, "/resume");

        // pushing from the middle drops forward entries
        history.push(Location::new("/tools/base64"));
        assert_eq!(history.len(), 3);
        assert!(history.forward().is_none());
        assert_eq!(history.location().unwrap().path, "/tools/base64");
    }

    #[test]
    fn test_replace() {
        let mut history = WebHistory::new();
        history.replace(Location::new("/"));
        assert_eq!(history.len(), 1);

        history.push(Location::new("/resume"));
        history.replace(Location::new("/tools"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.location().unwrap().path, "/tools");
        assert_eq!(history.back().unwrap().path, "/");
    }
}
