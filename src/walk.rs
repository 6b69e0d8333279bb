//! Tree walker: depth-first visit of every discriminated node reachable from
//! the corpus roots, accumulating into a mutable [`Schema`] as it goes.

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::{Observation, Schema};
use crate::value::{self, Node, ScalarTag, Shape, ValueTag};

/// Generous bound; trees are assumed finite, this guards against accidental
/// cycles in malformed input.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Clone, Debug)]
pub struct Walker {
    pub max_depth: usize,
    pub kind_field: String,
}

impl Default for Walker {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            kind_field: value::DEFAULT_KIND_FIELD.to_string(),
        }
    }
}

impl Walker {
    /// Visit every node reachable from `root`. Roots that are arrays are
    /// descended; scalar roots contribute nothing.
    pub fn walk(&self, schema: &mut Schema, root: &Value) -> Result<()> {
        self.descend(schema, root, 0)
    }

    fn descend(&self, schema: &mut Schema, value: &Value, depth: usize) -> Result<()> {
        match value::shape_of(value, &self.kind_field) {
            Shape::Node(node) => self.visit_node(schema, node, depth),
            Shape::Array(items) => {
                self.check_depth(depth)?;
                for item in items {
                    self.descend(schema, item, depth + 1)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn visit_node(&self, schema: &mut Schema, node: Node<'_>, depth: usize) -> Result<()> {
        self.check_depth(depth)?;
        schema.record_occurrence(node.kind);

        for (name, value) in node.properties() {
            match value::shape_of(value, &self.kind_field) {
                Shape::Node(child) => {
                    schema.record_property(
                        node.kind,
                        name,
                        Observation::Nested(child.kind.to_string()),
                    );
                    self.visit_node(schema, child, depth + 1)?;
                }
                Shape::Array(items) => {
                    // Tags first, then recursion, so the property registers
                    // against this kind before any element node does.
                    let mut tags = IndexSet::new();
                    for item in items {
                        tags.insert(element_tag(value::shape_of(item, &self.kind_field)));
                    }
                    schema.record_property(node.kind, name, Observation::Elements(tags));
                    for item in items {
                        if let Shape::Node(child) = value::shape_of(item, &self.kind_field) {
                            self.visit_node(schema, child, depth + 1)?;
                        }
                    }
                }
                leaf => {
                    let tag = leaf.scalar_tag().unwrap_or(ScalarTag::Object);
                    schema.record_property(node.kind, name, Observation::Scalar(tag));
                }
            }
        }
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(Error::DepthExceeded { limit: self.max_depth });
        }
        Ok(())
    }
}

/// Tag recorded for one array element. Nested arrays are not descended and
/// keep the generic `object` tag.
fn element_tag(shape: Shape<'_>) -> ValueTag {
    match shape {
        Shape::Node(child) => ValueTag::Kind(child.kind.to_string()),
        Shape::Array(_) => ValueTag::Scalar(ScalarTag::Object),
        leaf => ValueTag::Scalar(leaf.scalar_tag().unwrap_or(ScalarTag::Object)),
    }
}

/// Walk every document in corpus order into one fresh schema.
pub fn infer_schema<'a, I>(walker: &Walker, corpus: I) -> Result<Schema>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut schema = Schema::new();
    for document in corpus {
        walker.walk(&mut schema, document)?;
    }
    Ok(schema)
}
