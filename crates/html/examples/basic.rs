//! Direct construction: build a small fragment by hand and print it.

use std::sync::Arc;

use html::{AttributeRegistry, Attributes, Children, HtmlNode, InlineStyleAttributes, StyleRegistry};

fn main() -> html::Result<()> {
    let attr_reg = Arc::new(AttributeRegistry::new());
    let style_reg = Arc::new(StyleRegistry::new());

    let mut container = HtmlNode::new(
        "div",
        Attributes::new(
            [("class", "container"), ("id", "main")],
            "div",
            "default",
            Arc::clone(&attr_reg),
        ),
        false,
        InlineStyleAttributes::new([("max-width", "40rem")], Arc::clone(&style_reg)),
        Children::empty(),
    )?;

    let mut heading = HtmlNode::new(
        "h1",
        Attributes::new([("class", "title")], "h1", "default", Arc::clone(&attr_reg)),
        false,
        InlineStyleAttributes::empty(Arc::clone(&style_reg)),
        Children::empty(),
    )?;
    heading.add_child("Hello, World!")?;

    let rule = HtmlNode::new(
        "hr",
        Attributes::empty("hr", "default", Arc::clone(&attr_reg)),
        true,
        InlineStyleAttributes::empty(Arc::clone(&style_reg)),
        Children::empty(),
    )?;

    container.add_child(heading)?;
    container.add_child(rule)?;
    container.add_child("A paragraph of plain text.")?;

    println!("{}", container.to_html());
    Ok(())
}
