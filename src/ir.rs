// Resolved declarations: the run's output artifact. No accumulator state here.

use serde::Serialize;

/// Declared type expression for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum TypeExpr {
    /// No type evidence at all (e.g. only ever seen as empty arrays).
    Any,
    /// Single tag: a scalar tag or a node kind.
    Name { name: String },
    /// Union of tags, in first-encountered order.
    Union { names: Vec<String> },
    /// Homogeneous array: `T[]` in interface syntax.
    List { element: String },
    /// Array over a union of element tags: `Array<A|B>`.
    UnionList { elements: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub optional: bool,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

/// One abstract interface declaration: kind name plus ordered properties.
/// Concrete syntax (braces, keywords, file framing) belongs to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub properties: Vec<PropertyDecl>,
}
