//! End-to-end behavior of the dynamic renderer on representative payloads.

use coretabs_render::{Cell, RenderNode, Renderer, TextView, render};
use serde_json::{Value, json};

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

fn table(node: &RenderNode) -> (&[String], &[Vec<Cell>]) {
    match node.content() {
        RenderNode::Table { columns, rows } => (columns, rows),
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn case_object_drops_nulls_and_humanizes_keys() {
    let node = render(
        &json!({"CaseNumber": "12345", "Status": null, "Amount": 1500000}),
        "Case",
    );
    assert_eq!(node.title(), Some("Case"));
    let (columns, rows) = table(&node);
    assert_eq!(columns, ["Property", "Value"]);
    assert_eq!(
        rows,
        [
            vec![text("Case Number"), text("12345")],
            vec![text("Amount"), text("1500000")],
        ]
    );
}

#[test]
fn empty_array_is_an_empty_section() {
    assert_eq!(
        render(&json!([]), "Documents"),
        RenderNode::section("Documents", RenderNode::empty("empty array"))
    );
}

#[test]
fn degenerate_inputs_render() {
    assert_eq!(render(&Value::Null, "T"), RenderNode::scalar(Cell::Na));
    assert_eq!(
        render(&json!({}), "T"),
        RenderNode::section("T", RenderNode::empty("empty object"))
    );

    let mut deep = json!(1);
    for _ in 0..100 {
        deep = json!([deep]);
    }
    let node = render(&deep, "Deep");
    assert!(matches!(node.content(), RenderNode::List { items } if items.len() == 1));

    let mut deep_object = json!({"leaf": true});
    for i in 0..100 {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(format!("k{i}"), deep_object);
        deep_object = Value::Object(wrapper);
    }
    let node = render(&deep_object, "Deep");
    let (_, rows) = table(&node);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], Cell::Boolean(true));

    let many: Vec<Value> = (0..500).map(Value::from).collect();
    let node = render(&Value::Array(many), "Many");
    assert!(matches!(node.content(), RenderNode::List { items } if items.len() == 500));
}

#[test]
fn heterogeneous_objects_union_columns() {
    let node = render(&json!([{"a": 1}, {"b": 2}, {"a": 3, "c": 4}]), "Rows");
    let (columns, rows) = table(&node);
    assert_eq!(columns, ["a", "b", "c"]);
    assert_eq!(
        rows,
        [
            vec![text("1"), Cell::Na, Cell::Na],
            vec![Cell::Na, text("2"), Cell::Na],
            vec![text("3"), Cell::Na, text("4")],
        ]
    );
}

#[test]
fn wide_nested_arrays_are_truncated() {
    let node = render(&json!({"items": [1, 2, 3, 4, 5]}), "T");
    let (_, rows) = table(&node);
    assert_eq!(rows[0][1], text("Array (5 items): 1, 2..."));
}

#[test]
fn booleans_keep_their_tag() {
    let node = render(&json!({"active": true, "closed": false}), "T");
    let (_, rows) = table(&node);
    assert_eq!(rows[0][1], Cell::Boolean(true));
    assert_eq!(rows[1][1], Cell::Boolean(false));
}

#[test]
fn wide_nested_objects_are_not_flattened() {
    let node = render(&json!({"meta": {"a": 1, "b": 2, "c": 3, "d": 4}}), "T");
    let (_, rows) = table(&node);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], text("Meta"));
    assert_eq!(
        rows[0][1],
        text("Object with 4 properties: a: 1, b: 2...")
    );
}

#[test]
fn narrow_nested_objects_are_flattened() {
    let node = render(&json!({"taxpayer": {"TIN": "0123", "name": "PT X"}}), "T");
    let (_, rows) = table(&node);
    assert_eq!(
        rows,
        [
            vec![text("Taxpayer → TIN"), text("0123")],
            vec![text("Taxpayer → name"), text("PT X")],
        ]
    );
}

#[test]
fn rendering_is_deterministic() {
    let payload = json!({
        "documents": [{"name": "a.pdf", "uploaded": "2024-02-01T08:00:00"}],
        "raw": "{\"x\": [1, 2]}",
        "notes": "n".repeat(80),
    });
    let renderer = Renderer::new();
    assert_eq!(renderer.render(&payload, "P"), renderer.render(&payload, "P"));
}

#[test]
fn text_view_of_a_rendered_payload() {
    let node = render(
        &json!([{"Name": "Budi", "Active": true}, {"Name": "Ani"}]),
        "Users",
    );
    let out = TextView::default().render(&node);
    assert_eq!(
        out,
        "Users\n\
         =====\n\
         Name | Active\n\
         ---- | ------\n\
         Budi | Yes\n\
         Ani  | N/A\n"
    );
}

#[test]
fn render_tree_serializes_for_other_hosts() {
    let node = render(&json!({"ok": true}), "T");
    let json = serde_json::to_value(&node).expect("serialize");
    assert_eq!(json["kind"], "section");
    assert_eq!(json["body"]["kind"], "table");
    assert_eq!(json["body"]["rows"][0][1], json!({"kind": "boolean", "value": true}));
}
