//! Immutable query-string parameters.
//!
//! The URL query string is the single source of truth for filter state. It
//! is parsed into [`QueryParams`], an ordered list of key/value pairs, and
//! every filter action produces a new `QueryParams` rather than editing one.

use url::form_urlencoded;

/// Query parameter names used by the collection filter.
pub mod params {
    pub const MIN_PRICE: &str = "minPrice";
    pub const MAX_PRICE: &str = "maxPrice";
    pub const SIZES: &str = "sizes";
    pub const PRODUCT_TYPES: &str = "productTypes";
    pub const COLORS: &str = "colors";
    pub const MATERIALS: &str = "materials";
    pub const TAGS: &str = "tags";
    pub const SORT: &str = "sort";
}

/// Ordered query-string pairs.
///
/// Behaves like the browser's `URLSearchParams`: `get` returns the first
/// value for a key, `set` replaces the first occurrence in place (dropping
/// duplicates) or appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse a query string, with or without the leading `?`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` is present at all (even with an empty value).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Values of a comma-joined list parameter, empty segments dropped.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|raw| {
                raw.split(',')
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Copy with `key` set to `value`.
    #[must_use]
    pub fn with(&self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut pairs = Vec::with_capacity(self.pairs.len() + 1);
        let mut placed = false;
        for (k, v) in &self.pairs {
            if k == key {
                if !placed {
                    pairs.push((k.clone(), value.clone()));
                    placed = true;
                }
            } else {
                pairs.push((k.clone(), v.clone()));
            }
        }
        if !placed {
            pairs.push((key.to_string(), value));
        }
        Self { pairs }
    }

    /// Copy with every occurrence of `key` removed.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        }
    }

    /// Copy with a list parameter comma-joined, or removed when empty.
    #[must_use]
    pub fn with_list(&self, key: &str, values: &[String]) -> Self {
        if values.is_empty() {
            self.without(key)
        } else {
            self.with(key, values.join(","))
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Form-encoded query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// `path` with this query appended, or just `path` when empty.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.to_query_string())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let q = QueryParams::parse("?sizes=S,M&sort=price-ascending&q=wool+coat");
        assert_eq!(q.get("sizes"), Some("S,M"));
        assert_eq!(q.get("q"), Some("wool coat"));
        assert_eq!(q.get("missing"), None);
    }

    #[test]
    fn test_get_list_drops_empty_segments() {
        let q = QueryParams::parse("colors=,blue,,red,");
        assert_eq!(q.get_list("colors"), vec!["blue", "red"]);
        assert!(q.get_list("sizes").is_empty());
    }

    #[test]
    fn test_with_replaces_in_place() {
        let q = QueryParams::parse("a=1&b=2&a=3");
        let updated = q.with("a", "9");
        assert_eq!(updated.to_query_string(), "a=9&b=2");
        // The original is untouched.
        assert_eq!(q.to_query_string(), "a=1&b=2&a=3");
    }

    #[test]
    fn test_with_appends_new_key() {
        let q = QueryParams::parse("a=1");
        assert_eq!(q.with("b", "x y").to_query_string(), "a=1&b=x+y");
    }

    #[test]
    fn test_with_list_removes_when_empty() {
        let q = QueryParams::parse("tags=new&sort=best-selling");
        assert_eq!(q.with_list("tags", &[]).to_query_string(), "sort=best-selling");
    }

    #[test]
    fn test_href() {
        assert_eq!(QueryParams::new().href("/collections/all"), "/collections/all");
        let q = QueryParams::parse("sort=price-ascending");
        assert_eq!(q.href("/search"), "/search?sort=price-ascending");
    }
}
