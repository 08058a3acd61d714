//! Recursive tree builder over declarative JSON input
//!
//! Input is externally supplied and untrusted. Policy-level problems
//! (unknown attribute names, unsafe style values, non-string attribute
//! values) are filtered and logged; structural problems (missing tag
//! name, depth overrun, children on a self-closing tag) abort the
//! affected subtree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attrs::Attributes;
use crate::error::{HtmlError, Result};
use crate::node::{Children, HtmlNode};
use crate::registry::{self, AttributeRegistry, StyleRegistry};
use crate::style::InlineStyleAttributes;

/// Recognized fields of a node structure.
const FIELD_TAG_NAME: &str = "tag_name";
const FIELD_ATTRIBUTES: &str = "attributes";
const FIELD_INLINE_STYLES: &str = "inline_styles";
const FIELD_SELF_CLOSED: &str = "is_self_closed_tag";
const FIELD_CHILDREN: &str = "children";
const FIELD_STYLE: &str = "style";

/// Builder configuration.
///
/// `max_depth` is the sole backpressure against adversarial nesting: a
/// chain of `max_depth + 1` elements is the deepest accepted input.
/// `dialect` selects the attribute rule set for the whole subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeBuilderConfig {
    pub max_depth: usize,
    pub dialect: String,
}

impl Default for TreeBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            dialect: "default".to_string(),
        }
    }
}

/// Converts nested declarative data into a validated [`HtmlNode`] tree.
pub struct TreeBuilder {
    config: TreeBuilderConfig,
    attr_registry: Arc<AttributeRegistry>,
    style_registry: Arc<StyleRegistry>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_config(TreeBuilderConfig::default())
    }

    pub fn with_config(config: TreeBuilderConfig) -> Self {
        Self {
            config,
            attr_registry: Arc::new(AttributeRegistry::new()),
            style_registry: Arc::new(StyleRegistry::new()),
        }
    }

    /// Swap in custom registries (alternate dialects without code change).
    pub fn with_registries(
        mut self,
        attr_registry: Arc<AttributeRegistry>,
        style_registry: Arc<StyleRegistry>,
    ) -> Self {
        self.attr_registry = attr_registry;
        self.style_registry = style_registry;
        self
    }

    pub fn config(&self) -> &TreeBuilderConfig {
        &self.config
    }

    /// Build a tree from a node structure. The root sits at depth 0.
    pub fn build(&self, data: &Value) -> Result<HtmlNode> {
        self.build_node(data, 0)
    }

    fn build_node(&self, data: &Value, depth: usize) -> Result<HtmlNode> {
        if depth > self.config.max_depth {
            return Err(HtmlError::MaxDepthExceeded {
                depth,
                max: self.config.max_depth,
            });
        }

        let obj = data.as_object().ok_or_else(|| HtmlError::InvalidField {
            field: "node",
            reason: format!("expected object, got {}", json_kind(data)),
        })?;

        let tag_value = obj
            .get(FIELD_TAG_NAME)
            .ok_or(HtmlError::MissingField { field: FIELD_TAG_NAME })?;
        let tag_name = tag_value.as_str().ok_or_else(|| HtmlError::InvalidField {
            field: FIELD_TAG_NAME,
            reason: format!("expected string, got {}", json_kind(tag_value)),
        })?;
        crate::node::validate_tag_name(tag_name.trim())?;

        let is_self_closed = match obj.get(FIELD_SELF_CLOSED) {
            Some(Value::Bool(flag)) => *flag,
            None | Some(Value::Null) => registry::is_void_tag(tag_name),
            Some(other) => {
                return Err(HtmlError::InvalidField {
                    field: FIELD_SELF_CLOSED,
                    reason: format!("expected boolean, got {}", json_kind(other)),
                })
            }
        };

        let (raw_attrs, mut raw_styles) = self.collect_attributes(obj)?;
        if let Some(styles_value) = obj.get(FIELD_INLINE_STYLES) {
            raw_styles.extend(collect_style_object(styles_value, FIELD_INLINE_STYLES)?);
        }

        let attributes = Attributes::new(
            raw_attrs,
            tag_name,
            &self.config.dialect,
            Arc::clone(&self.attr_registry),
        );
        let inline_styles =
            InlineStyleAttributes::new(raw_styles, Arc::clone(&self.style_registry));

        let children = match obj.get(FIELD_CHILDREN) {
            None | Some(Value::Null) => Children::empty(),
            Some(Value::Array(entries)) => {
                if is_self_closed && !entries.is_empty() {
                    return Err(HtmlError::SelfClosingChildren {
                        tag: tag_name.to_string(),
                    });
                }
                self.build_children(entries, depth)?
            }
            Some(other) => {
                return Err(HtmlError::InvalidField {
                    field: FIELD_CHILDREN,
                    reason: format!("expected array, got {}", json_kind(other)),
                })
            }
        };

        HtmlNode::new(tag_name, attributes, is_self_closed, inline_styles, children)
    }

    /// Build just a child list. Objects recurse one level deeper than
    /// `depth`; strings become text children.
    pub fn build_children(&self, entries: &[Value], depth: usize) -> Result<Children> {
        let mut children = Children::empty();
        for entry in entries {
            match entry {
                Value::Object(_) => {
                    let node = self.build_node(entry, depth + 1)?;
                    children.add_child(node)?;
                }
                Value::String(text) => {
                    children.add_child(text.as_str())?;
                }
                other => {
                    return Err(HtmlError::InvalidChild {
                        kind: json_kind(other),
                    })
                }
            }
        }
        Ok(children)
    }

    /// Split the `attributes` object into plain attribute pairs and the
    /// nested `style` object, if any. Non-string attribute values are a
    /// policy problem: logged and dropped.
    fn collect_attributes(
        &self,
        obj: &serde_json::Map<String, Value>,
    ) -> Result<(Vec<(String, String)>, Vec<(String, String)>)> {
        let mut raw_attrs = Vec::new();
        let mut raw_styles = Vec::new();

        let Some(attrs_value) = obj.get(FIELD_ATTRIBUTES) else {
            return Ok((raw_attrs, raw_styles));
        };
        let attrs_obj = attrs_value
            .as_object()
            .ok_or_else(|| HtmlError::InvalidField {
                field: FIELD_ATTRIBUTES,
                reason: format!("expected object, got {}", json_kind(attrs_value)),
            })?;

        for (name, value) in attrs_obj {
            if name == FIELD_STYLE {
                raw_styles.extend(collect_style_object(value, FIELD_STYLE)?);
                continue;
            }
            match value {
                Value::String(s) => raw_attrs.push((name.clone(), s.clone())),
                other => {
                    tracing::warn!(
                        "Attribute '{}' has non-string value ({}), dropping",
                        name,
                        json_kind(other)
                    );
                }
            }
        }
        Ok((raw_attrs, raw_styles))
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A style field must be an object of string values.
fn collect_style_object(value: &Value, field: &'static str) -> Result<Vec<(String, String)>> {
    let obj = value.as_object().ok_or_else(|| HtmlError::InvalidField {
        field,
        reason: format!("expected object, got {}", json_kind(value)),
    })?;

    let mut styles = Vec::with_capacity(obj.len());
    for (property, v) in obj {
        match v {
            Value::String(s) => styles.push((property.clone(), s.clone())),
            other => {
                tracing::warn!(
                    "Style property '{}' has non-string value ({}), dropping",
                    property,
                    json_kind(other)
                );
            }
        }
    }
    Ok(styles)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
