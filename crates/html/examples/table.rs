//! Generate a table from row data.

use html::HtmlNode;
use serde_json::{json, Value};

fn main() -> html::Result<()> {
    let employees = [
        ("001", "John Doe", "Engineering"),
        ("002", "Jane Smith", "Marketing"),
        ("003", "Bob Johnson", "Sales"),
    ];

    let header: Vec<Value> = ["ID", "Name", "Department"]
        .iter()
        .map(|text| json!({"tag_name": "th", "attributes": {"scope": "col"}, "children": [text]}))
        .collect();

    let rows: Vec<Value> = employees
        .iter()
        .map(|(id, name, dept)| {
            let cells: Vec<Value> = [id, name, dept]
                .iter()
                .map(|text| json!({"tag_name": "td", "children": [*text]}))
                .collect();
            json!({"tag_name": "tr", "children": cells})
        })
        .collect();

    let table = json!({
        "tag_name": "table",
        "attributes": {
            "class": "styled-table",
            "id": "employee-table",
            "style": {"border-collapse": "collapse", "width": "100%"},
        },
        "children": [
            {"tag_name": "caption", "children": ["Employee Information"]},
            {"tag_name": "thead", "children": [{"tag_name": "tr", "children": header}]},
            {"tag_name": "tbody", "children": rows},
        ],
    });

    println!("{}", HtmlNode::from_structure(&table)?.to_html());
    Ok(())
}
