//! Whitelist registries for attribute names and CSS properties
//!
//! Registries are loaded once, shared via `Arc`, and never mutated by
//! nodes. Validation is plain set membership, so lookups stay O(1).
//!
//! Table membership is policy data, not derived from the HTML standard:
//! notably `data-*` names are absent from the default rule set and must
//! come in through a custom dialect.

use ahash::{AHashMap, AHashSet};

/// Attributes legal on every element.
pub const GLOBAL_ATTRIBUTES: &[&str] = &[
    "accesskey",
    "class",
    "contenteditable",
    "dir",
    "draggable",
    "hidden",
    "id",
    "lang",
    "role",
    "spellcheck",
    "style",
    "tabindex",
    "title",
    "translate",
];

/// Event-handler attributes legal on every element.
pub const EVENT_ATTRIBUTES: &[&str] = &[
    "onblur",
    "onchange",
    "onclick",
    "oncontextmenu",
    "ondblclick",
    "ondrag",
    "ondrop",
    "onerror",
    "onfocus",
    "oninput",
    "onkeydown",
    "onkeypress",
    "onkeyup",
    "onload",
    "onmouseout",
    "onmouseover",
    "onreset",
    "onscroll",
    "onselect",
    "onsubmit",
];

/// Tags that render as a single self-closing tag.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Per-tag attribute whitelist for the default rule set.
const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["download", "href", "hreflang", "rel", "target", "type"]),
    ("area", &["alt", "coords", "download", "href", "shape", "target"]),
    ("audio", &["autoplay", "controls", "loop", "muted", "preload", "src"]),
    ("base", &["href", "target"]),
    ("blockquote", &["cite"]),
    ("button", &["disabled", "form", "name", "type", "value"]),
    ("col", &["span"]),
    ("colgroup", &["span"]),
    ("embed", &["height", "src", "type", "width"]),
    ("form", &["action", "enctype", "method", "novalidate", "target"]),
    ("iframe", &["allow", "height", "loading", "name", "sandbox", "src", "width"]),
    ("img", &["alt", "height", "loading", "sizes", "src", "srcset", "width"]),
    (
        "input",
        &[
            "accept",
            "autocomplete",
            "autofocus",
            "checked",
            "disabled",
            "form",
            "max",
            "maxlength",
            "min",
            "minlength",
            "multiple",
            "name",
            "pattern",
            "placeholder",
            "readonly",
            "required",
            "step",
            "type",
            "value",
        ],
    ),
    ("label", &["for", "form"]),
    ("li", &["value"]),
    ("link", &["href", "hreflang", "media", "rel", "sizes", "type"]),
    ("meta", &["charset", "content", "http-equiv", "name"]),
    ("meter", &["high", "low", "max", "min", "optimum", "value"]),
    ("ol", &["reversed", "start", "type"]),
    ("optgroup", &["disabled", "label"]),
    ("option", &["disabled", "label", "selected", "value"]),
    ("progress", &["max", "value"]),
    ("script", &["async", "defer", "src", "type"]),
    ("select", &["disabled", "multiple", "name", "required", "size"]),
    ("source", &["media", "sizes", "src", "srcset", "type"]),
    ("table", &["border"]),
    ("td", &["colspan", "headers", "rowspan"]),
    (
        "textarea",
        &[
            "cols",
            "disabled",
            "maxlength",
            "name",
            "placeholder",
            "readonly",
            "required",
            "rows",
            "wrap",
        ],
    ),
    ("th", &["abbr", "colspan", "headers", "rowspan", "scope"]),
    ("time", &["datetime"]),
    ("track", &["default", "kind", "label", "src", "srclang"]),
    (
        "video",
        &[
            "autoplay", "controls", "height", "loop", "muted", "poster", "preload", "src",
            "width",
        ],
    ),
];

/// CSS properties accepted for inline styles.
pub const STYLE_PROPERTIES: &[&str] = &[
    "align-content",
    "align-items",
    "align-self",
    "background",
    "background-color",
    "background-image",
    "background-position",
    "background-repeat",
    "background-size",
    "border",
    "border-bottom",
    "border-collapse",
    "border-color",
    "border-left",
    "border-radius",
    "border-right",
    "border-spacing",
    "border-style",
    "border-top",
    "border-width",
    "bottom",
    "box-shadow",
    "box-sizing",
    "clear",
    "color",
    "content",
    "cursor",
    "display",
    "flex",
    "flex-basis",
    "flex-direction",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "float",
    "font",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "gap",
    "grid-template-columns",
    "grid-template-rows",
    "height",
    "justify-content",
    "left",
    "letter-spacing",
    "line-height",
    "list-style",
    "list-style-type",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "opacity",
    "outline",
    "overflow",
    "overflow-x",
    "overflow-y",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "position",
    "right",
    "text-align",
    "text-decoration",
    "text-overflow",
    "text-transform",
    "top",
    "transform",
    "transition",
    "vertical-align",
    "visibility",
    "white-space",
    "width",
    "word-break",
    "z-index",
];

/// Check if a tag renders self-closing by convention.
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

/// One dialect's attribute rules: global names, event names, and
/// tag-specific names.
#[derive(Debug, Clone)]
pub struct RuleSet {
    global: AHashSet<String>,
    events: AHashSet<String>,
    per_tag: AHashMap<String, AHashSet<String>>,
}

impl RuleSet {
    /// Build a rule set from borrowed name tables.
    pub fn from_tables(
        global: &[&str],
        events: &[&str],
        per_tag: &[(&str, &[&str])],
    ) -> Self {
        Self {
            global: global.iter().map(|s| s.to_string()).collect(),
            events: events.iter().map(|s| s.to_string()).collect(),
            per_tag: per_tag
                .iter()
                .map(|(tag, attrs)| {
                    (
                        tag.to_string(),
                        attrs.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    fn builtin() -> Self {
        Self::from_tables(GLOBAL_ATTRIBUTES, EVENT_ATTRIBUTES, TAG_ATTRIBUTES)
    }

    /// Membership in global ∪ events ∪ per_tag[tag].
    ///
    /// Unknown tags degrade to global ∪ events instead of failing: an
    /// unrecognized tag gets minimal validation, not a hard error.
    pub fn allows(&self, tag: &str, attr: &str) -> bool {
        if self.global.contains(attr) || self.events.contains(attr) {
            return true;
        }
        self.per_tag
            .get(tag)
            .map(|attrs| attrs.contains(attr))
            .unwrap_or(false)
    }
}

/// Map identifier → rule set. The `"default"` rule set is always present;
/// alternate dialects are registered at construction time and the whole
/// table is immutable afterwards.
#[derive(Debug)]
pub struct AttributeRegistry {
    rule_sets: AHashMap<String, RuleSet>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        let mut rule_sets = AHashMap::new();
        rule_sets.insert("default".to_string(), RuleSet::builtin());
        Self { rule_sets }
    }

    /// Register an alternate dialect under the given map identifier.
    pub fn with_rule_set(mut self, map_identifier: impl Into<String>, rules: RuleSet) -> Self {
        self.rule_sets.insert(map_identifier.into(), rules);
        self
    }

    /// Rule set for a map identifier; unknown identifiers fall back to
    /// the default rules.
    pub fn rule_set(&self, map_identifier: &str) -> &RuleSet {
        self.rule_sets
            .get(map_identifier)
            .unwrap_or_else(|| &self.rule_sets["default"])
    }

    pub fn is_allowed(&self, map_identifier: &str, tag: &str, attr: &str) -> bool {
        self.rule_set(map_identifier).allows(tag, attr)
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// CSS property whitelist. Custom properties (`--name`) are matched by
/// pattern rather than listed.
#[derive(Debug)]
pub struct StyleRegistry {
    properties: AHashSet<String>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self {
            properties: STYLE_PROPERTIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Extend the whitelist with additional property names.
    pub fn with_properties<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn is_allowed(&self, property: &str) -> bool {
        self.properties.contains(property) || is_custom_property(property)
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn is_custom_property(name: &str) -> bool {
    match name.strip_prefix("--") {
        Some(rest) => {
            !rest.is_empty()
                && rest
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => false,
    }
}
