//! Interface emitter: resolve every kind, in first-encountered order, into an
//! ordered sequence of declarations. Pure structuring, no inference.

use crate::error::Result;
use crate::ir::InterfaceDecl;
use crate::resolve::{ConflictPolicy, resolve_kind};
use crate::schema::Schema;

pub fn emit(schema: &Schema, policy: ConflictPolicy) -> Result<Vec<InterfaceDecl>> {
    schema
        .kinds
        .iter()
        .map(|(name, kind)| resolve_kind(name, kind, policy))
        .collect()
}
