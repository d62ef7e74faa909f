//! URL parsing into router locations.
//!
//! # Design Decisions
//! - Only the path takes part in matching; query and hash ride along
//! - Dot segments and percent-encoding are normalised the way browsers do
//! - Inputs without a leading '/' must be absolute URLs

use std::fmt;

use url::Url;

use crate::routing::router::RouteError;

const PARSE_BASE: &str = "http://localhost/";

/// Path, query and hash of a URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            hash: None,
        }
    }

    /// Parse a path (`/tools?x=1#top`) or an absolute URL.
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = if input.starts_with("//") {
            return Err(invalid("scheme-relative URLs are not routable"));
        } else if input.starts_with('/') {
            let base = Url::parse(PARSE_BASE).map_err(|e| invalid(&e.to_string()))?;
            base.join(input).map_err(|e| invalid(&e.to_string()))?
        } else {
            Url::parse(input).map_err(|e| invalid(&e.to_string()))?
        };

        if !url.path().starts_with('/') {
            return Err(invalid("URL has no hierarchical path"));
        }

        Ok(Self {
            path: url.path().to_string(),
            query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
            hash: url.fragment().filter(|h| !h.is_empty()).map(str::to_string),
        })
    }

    /// Replace the query with url-encoded pairs. An empty list clears it.
    pub fn set_query_pairs<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(pairs);
        let query = serializer.finish();
        self.query = (!query.is_empty()).then_some(query);
    }

    /// `path?query#hash`
    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(hash);
        }
        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let loc = Location::parse("/tools/base64").unwrap();
        assert_eq!(loc, Location::new("/tools/base64"));
    }

    #[test]
    fn test_parse_keeps_query_and_hash() {
        let loc = Location::parse("/tools/qrcode?text=hi#preview").unwrap();
        assert_eq!(loc.path, "/tools/qrcode");
        assert_eq!(loc.query.as_deref(), Some("text=hi"));
        assert_eq!(loc.hash.as_deref(), Some("preview"));
        assert_eq!(loc.full_path(), "/tools/qrcode?text=hi#preview");
    }

    #[test]
    fn test_parse_absolute_url() {
        let loc = Location::parse("https://example.com/resume?").unwrap();
        assert_eq!(loc.path, "/resume");
        assert_eq!(loc.query, None);
    }

    #[test]
    fn test_parse_normalises_dot_segments() {
        let loc = Location::parse("/tools/../resume").unwrap();
        assert_eq!(loc.path, "/resume");
    }

    #[test]
    fn test_parse_rejects_relative_and_opaque() {
        assert!(matches!(
            Location::parse("resume"),
            Err(RouteError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Location::parse("//evil.example/"),
            Err(RouteError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Location::parse("mailto:me@example.com"),
            Err(RouteError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_set_query_pairs() {
        let mut loc = Location::new("/tools/base64");
        loc.set_query_pairs([("input", "a b"), ("mode", "decode")]);
        assert_eq!(loc.full_path(), "/tools/base64?input=a+b&mode=decode");

        loc.set_query_pairs(std::iter::empty());
        assert_eq!(loc.query, None);
    }
}
