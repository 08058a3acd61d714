//! Validated, sanitized inline styles for one element
//!
//! Property names go through the style registry; values go through
//! `sanitize_style_value` before storage, so the map never holds a value
//! that could break out of the style attribute.

use std::sync::Arc;

use crate::registry::StyleRegistry;

/// Substrings deleted from style values. Matched case-insensitively and
/// re-scanned to a fixpoint so overlapping fragments cannot reassemble
/// into a marker after one removal pass.
const DANGEROUS_FRAGMENTS: &[&str] = &["javascript:", "vbscript:", "expression("];

#[derive(Debug, Clone)]
pub struct InlineStyleAttributes {
    entries: Vec<(String, String)>,
    registry: Arc<StyleRegistry>,
}

impl InlineStyleAttributes {
    /// Filter `raw` down to whitelisted properties with sanitized values,
    /// preserving input order. Dropped entries are logged, never raised.
    pub fn new<I, K, V>(raw: I, registry: Arc<StyleRegistry>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut styles = Self::empty(registry);
        for (property, value) in raw {
            styles.insert_checked(&property.into(), &value.into());
        }
        styles
    }

    pub fn empty(registry: Arc<StyleRegistry>) -> Self {
        Self {
            entries: Vec::new(),
            registry,
        }
    }

    fn insert_checked(&mut self, property: &str, value: &str) {
        let property = property.trim().to_ascii_lowercase();
        if !self.registry.is_allowed(&property) {
            tracing::warn!("Unknown style property '{}', dropping", property);
            return;
        }
        let Some(clean) = sanitize_style_value(value) else {
            tracing::warn!("Style value for '{}' sanitized to empty, dropping", property);
            return;
        };
        match self.position(&property) {
            Some(i) => self.entries[i].1 = clean,
            None => self.entries.push((property, clean)),
        }
    }

    fn position(&self, property: &str) -> Option<usize> {
        self.entries.iter().position(|(p, _)| p == property)
    }

    /// Sanitized value for a property, or empty string if absent.
    pub fn get_style(&self, property: &str) -> &str {
        let property = property.trim().to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Overwrite an existing property, or insert a new one when
    /// `create_new` is set. The value is sanitized either way.
    pub fn update_style(&mut self, property: &str, value: &str, create_new: bool) {
        let normalized = property.trim().to_ascii_lowercase();
        if self.position(&normalized).is_none() && !create_new {
            return;
        }
        self.insert_checked(&normalized, value);
    }

    pub fn remove_style(&mut self, property: &str) {
        let normalized = property.trim().to_ascii_lowercase();
        self.entries.retain(|(p, _)| *p != normalized);
    }

    pub fn clear_styles(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Render ` style='prop: value; prop2: value2;'` with a leading space
    /// and a trailing semicolon per declaration, or empty string when no
    /// styles remain. Callers must not add separators of their own.
    pub fn to_html_string(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut out = String::from(" style='");
        for (i, (property, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push(';');
        }
        out.push('\'');
        out
    }
}

/// Clean an untrusted style value for embedding in a single-quoted
/// attribute.
///
/// - executable fragments (`javascript:`, `vbscript:`, `expression(`) are
///   deleted until none remain;
/// - angle brackets and quotes are deleted (no breaking out of the
///   attribute);
/// - whitespace runs collapse to single spaces, ends trimmed.
///
/// Returns `None` when nothing safe is left. Idempotent: a value that
/// already passed comes back unchanged.
pub fn sanitize_style_value(value: &str) -> Option<String> {
    let mut cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '\'' | '"'))
        .collect();

    loop {
        let mut changed = false;
        for fragment in DANGEROUS_FRAGMENTS {
            while let Some(idx) = find_ignore_ascii_case(&cleaned, fragment) {
                cleaned.replace_range(idx..idx + fragment.len(), "");
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    // Both sides are ASCII-lowercased byte-for-byte, so indices line up.
    haystack.to_ascii_lowercase().find(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<StyleRegistry> {
        Arc::new(StyleRegistry::new())
    }

    #[test]
    fn test_construction_filters_unknown_properties() {
        let styles = InlineStyleAttributes::new(
            [("color", "red"), ("behavior", "url(x)")],
            registry(),
        );
        assert_eq!(styles.get_style("color"), "red");
        assert_eq!(styles.get_style("behavior"), "");
        assert_eq!(styles.len(), 1);
    }

    #[test]
    fn test_sanitize_strips_executable_scheme() {
        let clean = sanitize_style_value("javascript:alert(1)").unwrap();
        assert!(!clean.contains("javascript:"));
        assert_eq!(clean, "alert(1)");
    }

    #[test]
    fn test_sanitize_strips_reassembled_fragments() {
        // Removing the inner marker once would leave a new "javascript:".
        let clean = sanitize_style_value("jajavascript:vascript:alert(1)").unwrap();
        assert!(!clean.to_ascii_lowercase().contains("javascript:"));
    }

    #[test]
    fn test_sanitize_strips_expression_and_brackets() {
        let clean = sanitize_style_value("expression(alert(1))").unwrap();
        assert!(!clean.contains("expression("));

        let clean = sanitize_style_value("red</style><script>").unwrap();
        assert!(!clean.contains('<'));
        assert!(!clean.contains('>'));
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(
            sanitize_style_value("  1px   solid\tblack ").unwrap(),
            "1px solid black"
        );
    }

    #[test]
    fn test_sanitize_empty_result_is_none() {
        assert_eq!(sanitize_style_value("   "), None);
        assert_eq!(sanitize_style_value("<>"), None);
    }

    #[test]
    fn test_sanitize_idempotent() {
        for raw in [
            "javascript:alert(1)",
            "  red ",
            "1px   solid black",
            "url(http://example.com/x.png)",
            "jajavascript:vascript:alert(1)",
        ] {
            let once = sanitize_style_value(raw).unwrap();
            let twice = sanitize_style_value(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_to_html_string_format() {
        let styles = InlineStyleAttributes::new(
            [("color", "red"), ("margin", "4px")],
            registry(),
        );
        assert_eq!(styles.to_html_string(), " style='color: red; margin: 4px;'");
    }

    #[test]
    fn test_to_html_string_empty() {
        let styles = InlineStyleAttributes::empty(registry());
        assert_eq!(styles.to_html_string(), "");
    }

    #[test]
    fn test_update_style_create_new_gate() {
        let mut styles = InlineStyleAttributes::empty(registry());
        styles.update_style("color", "red", false);
        assert_eq!(styles.get_style("color"), "");

        styles.update_style("color", "red", true);
        assert_eq!(styles.get_style("color"), "red");

        styles.update_style("color", "blue", false);
        assert_eq!(styles.get_style("color"), "blue");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut styles = InlineStyleAttributes::new(
            [("color", "red"), ("width", "10px")],
            registry(),
        );
        styles.remove_style("color");
        assert_eq!(styles.get_style("color"), "");
        // removing a missing property is a no-op
        styles.remove_style("color");
        assert_eq!(styles.len(), 1);

        styles.clear_styles();
        assert!(styles.is_empty());
    }

    #[test]
    fn test_custom_property_accepted() {
        let styles = InlineStyleAttributes::new([("--accent", "#f00")], registry());
        assert_eq!(styles.get_style("--accent"), "#f00");
    }
}
