//! Structured `key:value` tag parsing.
//!
//! Merchants encode facet data in product tags: `type:Jacket`,
//! `colour: Navy`, `material:cotton`. Matching is a case-insensitive
//! substring search, so `Colour:Navy` and `product-type:Coat` both match.

/// The structured tag dimensions used as facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuredKey {
    Type,
    Color,
    Material,
}

impl StructuredKey {
    /// Lowercase key markers recognized for this dimension.
    #[must_use]
    pub const fn markers(self) -> &'static [&'static str] {
        match self {
            Self::Type => &["type:"],
            Self::Color => &["color:", "colour:"],
            Self::Material => &["material:"],
        }
    }
}

/// Whether a tag is a plain descriptive tag (no `key:value` structure).
#[must_use]
pub fn is_free_tag(tag: &str) -> bool {
    !tag.contains(':')
}

/// Cleaned value of the first tag in `tags` that carries `key`.
///
/// The earliest marker occurrence is removed from the tag and the remainder
/// trimmed. Returns `None` when no tag carries the key, or when the first
/// one that does has nothing left after cleaning.
#[must_use]
pub fn structured_value(tags: &[String], key: StructuredKey) -> Option<String> {
    tags.iter().find_map(|tag| marker_span(tag, key)).and_then(|(tag, start, end)| {
        let mut cleaned = String::with_capacity(tag.len());
        cleaned.push_str(tag.get(..start)?);
        cleaned.push_str(tag.get(end..)?);
        let cleaned = cleaned.trim();
        (!cleaned.is_empty()).then(|| cleaned.to_string())
    })
}

/// Byte span of the earliest marker for `key` inside `tag`.
fn marker_span(tag: &str, key: StructuredKey) -> Option<(&str, usize, usize)> {
    // ASCII lowercasing keeps byte offsets aligned with the original tag.
    let lower = tag.to_ascii_lowercase();
    key.markers()
        .iter()
        .filter_map(|marker| lower.find(marker).map(|pos| (pos, pos + marker.len())))
        .min_by_key(|&(start, _)| start)
        .map(|(start, end)| (tag, start, end))
}
