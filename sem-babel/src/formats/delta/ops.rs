//! Quill delta data types
//!
//! A delta is a flat list of insert operations. Text inserts carry inline attributes; the
//! `"\n"` that ends a line carries the block attributes of that line.
//!
//! ```json
//! {"ops": [
//!   {"insert": "Hello "},
//!   {"insert": "world", "attributes": {"bold": true}},
//!   {"insert": "\n"},
//!   {"insert": "item"},
//!   {"insert": "\n", "attributes": {"list": "bullet", "indent": 1}}
//! ]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub ops: Vec<Op>,
}

impl Delta {
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    pub insert: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Op {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Value::String(text.into()),
            attributes: None,
        }
    }

    pub fn with_attributes(text: impl Into<String>, attributes: Attributes) -> Self {
        let attributes = (!attributes.is_empty()).then_some(attributes);
        Self {
            insert: Value::String(text.into()),
            attributes,
        }
    }
}

/// Attributes of an op. Keys this crate does not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        *self == Attributes::default()
    }

    pub fn is_bold(&self) -> bool {
        self.bold.as_ref().is_some_and(truthy)
    }

    pub fn is_italic(&self) -> bool {
        self.italic.as_ref().is_some_and(truthy)
    }

    /// The part of the attributes that applies to a line.
    pub fn block(&self) -> Attributes {
        Attributes {
            header: self.header,
            list: self.list.clone(),
            indent: self.indent,
            ..Default::default()
        }
    }

    /// The part of the attributes that applies to text.
    pub fn inline(&self) -> Attributes {
        Attributes {
            bold: self.bold.clone(),
            italic: self.italic.clone(),
            link: self.link.clone(),
            extra: self.extra.clone(),
            ..Default::default()
        }
    }
}

/// Quill writes `true`; other producers write `1` or `"true"`.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "false" && s != "0",
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}
