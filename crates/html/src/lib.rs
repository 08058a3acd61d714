//! Validated HTML tree construction and serialization
//!
//! Builds a tree of elements from direct construction or nested
//! declarative data, enforcing per-tag attribute whitelists and
//! sanitizing inline CSS before anything enters the model.
//!
//! ## Core Design
//!
//! ```text
//! JSON structure → TreeBuilder (recursive, depth-guarded)
//!               → HtmlNode tree (validated Attributes + InlineStyleAttributes)
//!               → to_html() → markup string
//! ```
//!
//! Invalid data never enters the model: attribute names and style
//! properties are checked against immutable registries at construction
//! and on every mutation, not at serialization time. Policy failures
//! (an unknown name, an unsafe value) are dropped and logged; structural
//! failures (missing tag name, depth overrun, children on a self-closing
//! tag) surface as [`HtmlError`].

pub mod attrs;
pub mod builder;
pub mod error;
pub mod node;
pub mod registry;
pub mod serializer;
pub mod style;

pub use attrs::Attributes;
pub use builder::{TreeBuilder, TreeBuilderConfig};
pub use error::{HtmlError, Result};
pub use node::{Child, Children, HtmlNode};
pub use registry::{AttributeRegistry, RuleSet, StyleRegistry};
pub use style::InlineStyleAttributes;
