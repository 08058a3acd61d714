//! Element nodes and their child lists
//!
//! `Child` is a tagged variant so tree-walking code matches on it instead
//! of inspecting runtime types. Element children are boxed to keep the
//! inline child buffer small.

use smallvec::SmallVec;

use crate::attrs::Attributes;
use crate::error::{HtmlError, Result};
use crate::style::InlineStyleAttributes;

/// One entry of a child list: a nested element or literal text.
#[derive(Debug, Clone)]
pub enum Child {
    Element(Box<HtmlNode>),
    Text(String),
}

impl Child {
    pub fn is_element(&self) -> bool {
        matches!(self, Child::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Child::Text(_))
    }

    pub fn as_element(&self) -> Option<&HtmlNode> {
        match self {
            Child::Element(node) => Some(node),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Element(_) => None,
        }
    }
}

impl From<HtmlNode> for Child {
    fn from(node: HtmlNode) -> Self {
        Child::Element(Box::new(node))
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

/// Ordered child list owned by exactly one node.
///
/// When the owner is self-closing the list is sealed: appends are
/// rejected instead of silently mutating a tag that cannot have content.
#[derive(Debug, Clone, Default)]
pub struct Children {
    entries: SmallVec<[Child; 4]>,
    sealed: bool,
    owner_tag: String,
}

impl Children {
    pub fn new<I>(initial: I) -> Self
    where
        I: IntoIterator<Item = Child>,
    {
        Self {
            entries: initial.into_iter().collect(),
            sealed: false,
            owner_tag: String::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach ownership metadata. Called once by `HtmlNode::new`.
    pub(crate) fn bind(&mut self, owner_tag: &str, sealed: bool) {
        self.owner_tag = owner_tag.to_string();
        self.sealed = sealed;
    }

    pub fn add_child(&mut self, child: impl Into<Child>) -> Result<()> {
        if self.sealed {
            return Err(HtmlError::SelfClosingChildren {
                tag: self.owner_tag.clone(),
            });
        }
        self.entries.push(child.into());
        Ok(())
    }

    pub fn add_children<I>(&mut self, children: I) -> Result<()>
    where
        I: IntoIterator<Item = Child>,
    {
        if self.sealed {
            return Err(HtmlError::SelfClosingChildren {
                tag: self.owner_tag.clone(),
            });
        }
        self.entries.extend(children);
        Ok(())
    }

    /// Remove the first element child whose derived id matches. Text
    /// entries have no id and cannot be targeted; clear them with
    /// `remove_children`. A missing id is a no-op.
    pub fn remove_child(&mut self, child_node_id: &str) {
        let found = self.entries.iter().position(|child| {
            child
                .as_element()
                .map(|node| node.node_id() == child_node_id)
                .unwrap_or(false)
        });
        if let Some(i) = found {
            self.entries.remove(i);
        }
    }

    pub fn remove_children(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Child> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Child> {
        self.entries.iter()
    }
}

/// One markup element: tag, validated attributes, sanitized inline
/// styles, ordered children, and a derived identifier.
#[derive(Debug, Clone)]
pub struct HtmlNode {
    tag_name: String,
    attributes: Attributes,
    inline_styles: InlineStyleAttributes,
    children: Children,
    is_self_closed_tag: bool,
    attrs_map_identifier: String,
    /// Derived from tag + attributes + map identifier; refreshed by every
    /// node-level mutator.
    node_id: String,
}

impl HtmlNode {
    /// Build a node. The map identifier is taken from `attributes`, which
    /// already validated against it.
    ///
    /// Fails when the tag name is lexically invalid or when a self-closing
    /// node is handed a non-empty child list.
    pub fn new(
        tag_name: &str,
        attributes: Attributes,
        is_self_closed_tag: bool,
        inline_styles: InlineStyleAttributes,
        mut children: Children,
    ) -> Result<Self> {
        let tag_name = tag_name.trim();
        validate_tag_name(tag_name)?;
        if is_self_closed_tag && !children.is_empty() {
            return Err(HtmlError::SelfClosingChildren {
                tag: tag_name.to_string(),
            });
        }
        children.bind(tag_name, is_self_closed_tag);

        let attrs_map_identifier = attributes.map_identifier().to_string();
        let mut node = Self {
            tag_name: tag_name.to_string(),
            attributes,
            inline_styles,
            children,
            is_self_closed_tag,
            attrs_map_identifier,
            node_id: String::new(),
        };
        node.update_node_id();
        Ok(node)
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn is_self_closed_tag(&self) -> bool {
        self.is_self_closed_tag
    }

    pub fn attrs_map_identifier(&self) -> &str {
        &self.attrs_map_identifier
    }

    /// Current derived identifier.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Recompute the derived identifier from the current tag name,
    /// attribute set, and map identifier. Exposed for callers that mutate
    /// attributes through `attributes_mut`, which bypasses automatic
    /// invalidation.
    pub fn update_node_id(&mut self) {
        self.node_id = derive_node_id(
            &self.tag_name,
            &self.attributes,
            &self.attrs_map_identifier,
        );
    }

    pub fn get_attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Direct mutable access. Call `update_node_id` afterwards.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn inline_styles(&self) -> &InlineStyleAttributes {
        &self.inline_styles
    }

    pub fn inline_styles_mut(&mut self) -> &mut InlineStyleAttributes {
        &mut self.inline_styles
    }

    pub fn get_children(&self) -> &Children {
        &self.children
    }

    pub fn set_attribute(&mut self, name: &str, value: &str, create_new: bool) {
        self.attributes.update_attribute(name, value, create_new);
        self.update_node_id();
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove_attribute(name);
        self.update_node_id();
    }

    pub fn clear_attributes(&mut self) {
        self.attributes.remove_all_attributes();
        self.update_node_id();
    }

    pub fn add_child(&mut self, child: impl Into<Child>) -> Result<()> {
        self.children.add_child(child)
    }

    pub fn add_children<I>(&mut self, children: I) -> Result<()>
    where
        I: IntoIterator<Item = Child>,
    {
        self.children.add_children(children)
    }

    pub fn remove_child(&mut self, child_node_id: &str) {
        self.children.remove_child(child_node_id);
    }

    pub fn remove_children(&mut self) {
        self.children.remove_children();
    }

    pub fn get_unique_id(&self) -> &str {
        self.attributes.get_unique_id()
    }

    /// Serialize this node and its subtree to markup.
    pub fn to_html(&self) -> String {
        crate::serializer::to_html(self)
    }

    /// Build a tree from declarative data with default registries and
    /// limits. See [`crate::builder::TreeBuilder`] for custom dialects or
    /// depth limits.
    pub fn from_structure(data: &serde_json::Value) -> Result<HtmlNode> {
        crate::builder::TreeBuilder::new().build(data)
    }
}

/// Tags are compared case-insensitively but stored as given: ASCII
/// letter first, then letters, digits, or hyphens, at most 64 chars.
pub(crate) fn validate_tag_name(tag: &str) -> Result<()> {
    let mut chars = tag.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    };
    if !valid || tag.len() > 64 {
        return Err(HtmlError::InvalidTagName {
            tag: tag.to_string(),
        });
    }
    Ok(())
}

/// Pure function of the node's identity fields. Fixed hash seeds keep the
/// digest deterministic for equal inputs.
fn derive_node_id(tag_name: &str, attributes: &Attributes, map_identifier: &str) -> String {
    use std::hash::{BuildHasher, Hash, Hasher};

    let state = ahash::RandomState::with_seeds(
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    );
    let mut hasher = state.build_hasher();
    tag_name.to_ascii_lowercase().hash(&mut hasher);
    for (name, value) in attributes.iter() {
        name.hash(&mut hasher);
        value.hash(&mut hasher);
    }
    map_identifier.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{AttributeRegistry, StyleRegistry};
    use std::sync::Arc;

    fn attrs(pairs: &[(&str, &str)], tag: &str) -> Attributes {
        Attributes::new(
            pairs.iter().copied(),
            tag,
            "default",
            Arc::new(AttributeRegistry::new()),
        )
    }

    fn styles() -> InlineStyleAttributes {
        InlineStyleAttributes::empty(Arc::new(StyleRegistry::new()))
    }

    fn div(pairs: &[(&str, &str)]) -> HtmlNode {
        HtmlNode::new(
            "div",
            attrs(pairs, "div"),
            false,
            styles(),
            Children::empty(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_node() {
        let node = div(&[("class", "container"), ("id", "main")]);
        assert_eq!(node.tag_name(), "div");
        assert!(!node.is_self_closed_tag());
        assert!(node.get_children().is_empty());
        assert_eq!(node.get_unique_id(), "main");
    }

    #[test]
    fn test_self_closing_with_children_rejected() {
        let mut children = Children::empty();
        children.add_child("text").unwrap();
        let result = HtmlNode::new("img", attrs(&[], "img"), true, styles(), children);
        assert!(matches!(
            result,
            Err(HtmlError::SelfClosingChildren { tag }) if tag == "img"
        ));
    }

    #[test]
    fn test_add_child_rejected_on_self_closing() {
        let mut node =
            HtmlNode::new("br", attrs(&[], "br"), true, styles(), Children::empty()).unwrap();
        let result = node.add_child("text");
        assert!(matches!(
            result,
            Err(HtmlError::SelfClosingChildren { tag }) if tag == "br"
        ));
        assert!(node.get_children().is_empty());
    }

    #[test]
    fn test_add_children_order() {
        let mut node = div(&[]);
        node.add_child("a").unwrap();
        node.add_child("b").unwrap();
        node.add_children([Child::from("c"), Child::from("d")])
            .unwrap();

        let texts: Vec<&str> = node
            .get_children()
            .iter()
            .filter_map(Child::as_text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_invalid_tag_names() {
        for tag in ["", "1div", "div<script", "-x", "a b"] {
            let result = HtmlNode::new(
                tag,
                attrs(&[], tag),
                false,
                styles(),
                Children::empty(),
            );
            assert!(matches!(result, Err(HtmlError::InvalidTagName { .. })), "{tag:?}");
        }
    }

    #[test]
    fn test_tag_case_preserved() {
        let node = HtmlNode::new(
            "DIV",
            attrs(&[("class", "c")], "DIV"),
            false,
            styles(),
            Children::empty(),
        )
        .unwrap();
        assert_eq!(node.tag_name(), "DIV");
        // validation is case-insensitive: attributes still filtered
        assert_eq!(node.get_attributes().get("class"), Some("c"));
    }

    #[test]
    fn test_node_id_deterministic() {
        let a = div(&[("class", "x"), ("id", "y")]);
        let b = div(&[("class", "x"), ("id", "y")]);
        assert_eq!(a.node_id(), b.node_id());
    }

    #[test]
    fn test_node_id_sensitive_to_attributes() {
        let a = div(&[("class", "x")]);
        let mut b = div(&[("class", "x")]);
        assert_eq!(a.node_id(), b.node_id());

        b.set_attribute("class", "z", false);
        assert_ne!(a.node_id(), b.node_id());

        b.set_attribute("class", "x", false);
        assert_eq!(a.node_id(), b.node_id());
    }

    #[test]
    fn test_node_id_sensitive_to_tag_and_map_identifier() {
        let a = div(&[]);
        let b = HtmlNode::new("span", attrs(&[], "span"), false, styles(), Children::empty())
            .unwrap();
        assert_ne!(a.node_id(), b.node_id());

        // case-insensitive tag identity
        let upper = HtmlNode::new("Div", attrs(&[], "Div"), false, styles(), Children::empty())
            .unwrap();
        assert_eq!(a.node_id(), upper.node_id());
    }

    #[test]
    fn test_update_node_id_after_direct_mutation() {
        let mut node = div(&[("class", "x")]);
        let before = node.node_id().to_string();

        node.attributes_mut().update_attribute("class", "y", false);
        // stale until explicitly refreshed
        assert_eq!(node.node_id(), before);
        node.update_node_id();
        assert_ne!(node.node_id(), before);
    }

    #[test]
    fn test_remove_child_by_id() {
        let first = div(&[("id", "first")]);
        let second = div(&[("id", "second")]);
        let target = second.node_id().to_string();

        let mut parent = div(&[]);
        parent.add_child("keep me").unwrap();
        parent.add_child(first).unwrap();
        parent.add_child(second).unwrap();

        parent.remove_child(&target);
        assert_eq!(parent.get_children().len(), 2);
        assert!(parent
            .get_children()
            .iter()
            .filter_map(Child::as_element)
            .all(|n| n.get_unique_id() == "first"));

        // unknown id is a no-op
        parent.remove_child("does-not-exist");
        assert_eq!(parent.get_children().len(), 2);
    }

    #[test]
    fn test_remove_child_takes_first_match_only() {
        let twin_a = div(&[("class", "twin")]);
        let twin_b = div(&[("class", "twin")]);
        let id = twin_a.node_id().to_string();

        let mut parent = div(&[]);
        parent.add_child(twin_a).unwrap();
        parent.add_child(twin_b).unwrap();

        parent.remove_child(&id);
        assert_eq!(parent.get_children().len(), 1);
    }

    #[test]
    fn test_remove_children_clears_text_too() {
        let mut parent = div(&[]);
        parent.add_child("text").unwrap();
        parent.add_child(div(&[])).unwrap();
        parent.remove_children();
        assert!(parent.get_children().is_empty());
    }
}
