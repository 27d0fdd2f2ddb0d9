#![no_main]

use arbitrary::Arbitrary;
use coretabs_render::{Cell, RenderNode, TextView, render};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

const MAX_DEPTH: usize = 24;

#[derive(Arbitrary, Debug)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp { year: u16, month: u8, day: u8 },
    EmbeddedJson(String),
    Array(Vec<FuzzValue>),
    Object(Vec<(String, FuzzValue)>),
}

impl FuzzValue {
    fn to_json(&self, depth: usize) -> Value {
        match self {
            FuzzValue::Null => Value::Null,
            FuzzValue::Bool(b) => Value::Bool(*b),
            FuzzValue::Int(n) => Value::from(*n),
            FuzzValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            FuzzValue::Text(s) => Value::String(s.clone()),
            FuzzValue::Timestamp { year, month, day } => Value::String(format!(
                "{:04}-{:02}-{:02}T10:30:00",
                year % 10_000,
                month % 100,
                day % 100
            )),
            FuzzValue::EmbeddedJson(s) => Value::String(format!("{{{s}}}")),
            FuzzValue::Array(items) if depth < MAX_DEPTH => {
                Value::Array(items.iter().map(|v| v.to_json(depth + 1)).collect())
            }
            FuzzValue::Object(fields) if depth < MAX_DEPTH => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json(depth + 1)))
                    .collect::<Map<_, _>>(),
            ),
            FuzzValue::Array(_) | FuzzValue::Object(_) => Value::Null,
        }
    }
}

fn rectangular(node: &RenderNode) -> bool {
    match node {
        RenderNode::Section { body, .. } => rectangular(body),
        RenderNode::Table { columns, rows } => rows.iter().all(|row| row.len() == columns.len()),
        RenderNode::Scalar { value: Cell::Nested(inner) } => rectangular(inner),
        _ => true,
    }
}

fuzz_target!(|input: (String, FuzzValue)| {
    let (title, value) = input;
    let value = value.to_json(0);
    let node = render(&value, &title);
    assert!(rectangular(&node));
    if value.is_null() {
        assert_eq!(node, RenderNode::scalar(Cell::Na));
    } else {
        assert_eq!(node.title(), Some(title.as_str()));
    }
    let _ = TextView::default().render(&node);
});
