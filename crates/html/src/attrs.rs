//! Validated attribute map for one element
//!
//! Keys are filtered against the registry at construction and on every
//! insertion; illegal names are dropped with a log line, never an error.
//! Insertion order is preserved because it is the render order.

use std::sync::Arc;

use crate::registry::AttributeRegistry;
use crate::serializer::escape_attr_value;

#[derive(Debug, Clone)]
pub struct Attributes {
    /// Ordered name → value pairs. Small per element, so lookups scan.
    entries: Vec<(String, String)>,
    /// Lowercased tag name, kept for revalidation on mutation.
    tag_name: String,
    map_identifier: String,
    registry: Arc<AttributeRegistry>,
}

impl Attributes {
    /// Filter `raw` down to the names legal for `(tag_name, map_identifier)`.
    ///
    /// Surviving keys keep their input order. Construction never fails for
    /// invalid keys; they are logged and dropped.
    pub fn new<I, K, V>(
        raw: I,
        tag_name: &str,
        map_identifier: &str,
        registry: Arc<AttributeRegistry>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attrs = Self::empty(tag_name, map_identifier, registry);
        for (name, value) in raw {
            attrs.insert_checked(&name.into(), value.into());
        }
        attrs
    }

    pub fn empty(tag_name: &str, map_identifier: &str, registry: Arc<AttributeRegistry>) -> Self {
        Self {
            entries: Vec::new(),
            tag_name: tag_name.trim().to_ascii_lowercase(),
            map_identifier: map_identifier.to_string(),
            registry,
        }
    }

    fn insert_checked(&mut self, name: &str, value: String) {
        let name = name.trim().to_ascii_lowercase();
        if !self.registry.is_allowed(&self.map_identifier, &self.tag_name, &name) {
            tracing::warn!(
                "Unknown attribute '{}' for tag '{}', dropping",
                name,
                self.tag_name
            );
            return;
        }
        match self.position(&name) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite an existing attribute, or insert a new one when
    /// `create_new` is set and the name is legal for this tag. Illegal
    /// names are rejected silently.
    pub fn update_attribute(&mut self, name: &str, value: &str, create_new: bool) {
        let normalized = name.trim().to_ascii_lowercase();
        if let Some(i) = self.position(&normalized) {
            self.entries[i].1 = value.to_string();
        } else if create_new {
            self.insert_checked(&normalized, value.to_string());
        }
    }

    /// Removing a nonexistent key is a no-op.
    pub fn remove_attribute(&mut self, name: &str) {
        let normalized = name.trim().to_ascii_lowercase();
        self.entries.retain(|(n, _)| *n != normalized);
    }

    pub fn remove_all_attributes(&mut self) {
        self.entries.clear();
    }

    /// The reserved `id` attribute, or empty.
    pub fn get_unique_id(&self) -> &str {
        self.get("id").unwrap_or("")
    }

    /// Render `name='escaped-value'` pairs, space-separated, in insertion
    /// order. Empty string when there are no attributes.
    pub fn to_html_string(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str("='");
            escape_attr_value(value, &mut out);
            out.push('\'');
        }
        out
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn map_identifier(&self) -> &str {
        &self.map_identifier
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
