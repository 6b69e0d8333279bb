//! Generic value model over parsed corpus documents.
//!
//! Corpus documents stay as `serde_json::Value` (with `preserve_order`, so
//! property order is document order). This module adds the classification
//! layer on top: every value has exactly one [`Shape`], and only node-shaped
//! values participate in schema accumulation.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Default discriminator field that marks an object as a tree node.
pub const DEFAULT_KIND_FIELD: &str = "kind";

/// Leaf type tag for non-array, non-node values.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ScalarTag {
    Null,
    Boolean,
    Number,
    String,
    /// Object-like value without a discriminator. Deliberately permissive:
    /// recorded as a leaf, never recursed into, never an error.
    Object,
}

impl ScalarTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarTag::Null => "null",
            ScalarTag::Boolean => "boolean",
            ScalarTag::Number => "number",
            ScalarTag::String => "string",
            ScalarTag::Object => "object",
        }
    }
}

/// One observed type tag: either a scalar leaf or a nested node kind.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum ValueTag {
    Scalar(ScalarTag),
    Kind(String),
}

impl ValueTag {
    pub fn as_str(&self) -> &str {
        match self {
            ValueTag::Scalar(tag) => tag.as_str(),
            ValueTag::Kind(kind) => kind,
        }
    }
}

/// Explicit three-way dispatch: Node | Array | Scalar.
#[derive(Clone, Copy, Debug)]
pub enum Shape<'a> {
    Null,
    Bool,
    Number,
    String,
    Array(&'a Vec<Value>),
    Node(Node<'a>),
    Object,
}

impl Shape<'_> {
    /// Leaf tag, `None` for arrays and nodes.
    pub fn scalar_tag(&self) -> Option<ScalarTag> {
        match self {
            Shape::Null => Some(ScalarTag::Null),
            Shape::Bool => Some(ScalarTag::Boolean),
            Shape::Number => Some(ScalarTag::Number),
            Shape::String => Some(ScalarTag::String),
            Shape::Object => Some(ScalarTag::Object),
            Shape::Array(_) | Shape::Node(_) => None,
        }
    }
}

/// Borrowed view of a discriminated tree node.
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    pub kind: &'a str,
    map: &'a Map<String, Value>,
    kind_field: &'a str,
}

impl<'a> Node<'a> {
    /// Properties in document order, discriminator field excluded.
    pub fn properties(self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        let kind_field = self.kind_field;
        self.map
            .iter()
            .filter(move |(name, _)| name.as_str() != kind_field)
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// Classify a value. An object is a Node iff its discriminator field holds a
/// string; anything else object-like is a generic `object` leaf.
pub fn shape_of<'a>(value: &'a Value, kind_field: &'a str) -> Shape<'a> {
    match value {
        Value::Null => Shape::Null,
        Value::Bool(_) => Shape::Bool,
        Value::Number(_) => Shape::Number,
        Value::String(_) => Shape::String,
        Value::Array(items) => Shape::Array(items),
        Value::Object(map) => match map.get(kind_field).and_then(Value::as_str) {
            Some(kind) => Shape::Node(Node { kind, map, kind_field }),
            None => Shape::Object,
        },
    }
}

/// Parse one corpus document, with JSON-path context in error messages.
pub fn parse_document(origin: &str, src: &str) -> Result<Value> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, Value>(de).map_err(|err| {
        let path = err.path().to_string();
        Error::MalformedDocument {
            origin: origin.to_string(),
            detail: format!("at JSON path {path}: {}", err.into_inner()),
        }
    })
}
