//! Build a whole page from a declarative JSON structure.
//!
//! Illegal attribute names are dropped with a logged warning.

use html::HtmlNode;
use serde_json::json;

fn main() -> html::Result<()> {
    tracing_subscriber::fmt::init();

    let page = json!({
        "tag_name": "html",
        "attributes": {"lang": "en"},
        "children": [
            {
                "tag_name": "head",
                "children": [
                    {"tag_name": "title", "children": ["My Blog Post"]},
                    {"tag_name": "meta", "attributes": {"charset": "utf-8"}},
                ],
            },
            {
                "tag_name": "body",
                "attributes": {"class": "blog-page"},
                "children": [{
                    "tag_name": "article",
                    "attributes": {
                        "class": "post",
                        // not in the default whitelist: dropped with a warning
                        "data-post-id": "42",
                    },
                    "children": [
                        {
                            "tag_name": "h1",
                            "attributes": {"class": "post-title"},
                            "children": ["Getting Started"],
                        },
                        {
                            "tag_name": "p",
                            "attributes": {"style": {"color": "#555"}},
                            "children": ["Published on January 1, 2024"],
                        },
                        {
                            "tag_name": "img",
                            "attributes": {"src": "cover.png", "alt": "Cover"},
                        },
                    ],
                }],
            },
        ],
    });

    let tree = HtmlNode::from_structure(&page)?;
    println!("{}", tree.to_html());
    Ok(())
}
