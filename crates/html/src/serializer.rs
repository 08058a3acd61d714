//! Tree → markup rendering
//!
//! Depth-first, pre-order, into a single output buffer. Attribute values
//! use single-quote delimiting throughout the engine; text children are
//! entity-escaped on the way out.

use crate::node::{Child, HtmlNode};

/// Render a node and its subtree to a markup string.
pub fn to_html(node: &HtmlNode) -> String {
    let mut out = String::with_capacity(256);
    render_node(node, &mut out);
    out
}

fn render_node(node: &HtmlNode, out: &mut String) {
    out.push('<');
    out.push_str(node.tag_name());

    let attrs = node.get_attributes().to_html_string();
    if !attrs.is_empty() {
        out.push(' ');
        out.push_str(&attrs);
    }
    // carries its own leading space, empty when no styles remain
    out.push_str(&node.inline_styles().to_html_string());

    if node.is_self_closed_tag() {
        out.push_str(" />");
        return;
    }
    out.push('>');

    for child in node.get_children().iter() {
        match child {
            Child::Element(element) => render_node(element, out),
            Child::Text(text) => escape_text(text, out),
        }
    }

    out.push_str("</");
    out.push_str(node.tag_name());
    out.push('>');
}

/// Escape text content for element bodies.
pub fn escape_text(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape an attribute value for single-quote delimiting.
pub fn escape_attr_value(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
