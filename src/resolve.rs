//! Type resolver: one accumulated [`PropertyModel`] plus the kind's total
//! occurrence count → a declared type expression and an optionality flag.

use crate::error::{Error, Result};
use crate::ir::{InterfaceDecl, PropertyDecl, TypeExpr};
use crate::schema::{KindSchema, PropertyModel};

// ------------------------------- Policy ---------------------------------- //

/// What to do when a property was observed both as an array and as a
/// non-array value across occurrences of the same kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Fail the run. The source data model is genuinely ambiguous and the
    /// ambiguity should be surfaced, not guessed away.
    #[default]
    Strict,
    /// Documented widening rule: the array shape wins; non-array sightings
    /// contribute nothing to the element tags.
    ArrayWins,
}

// ------------------------------ Resolution -------------------------------- //

pub fn resolve_kind(name: &str, kind: &KindSchema, policy: ConflictPolicy) -> Result<InterfaceDecl> {
    let mut properties = Vec::with_capacity(kind.properties.len());
    for (prop_name, model) in &kind.properties {
        properties.push(PropertyDecl {
            name: prop_name.clone(),
            optional: model.occurrence_count < kind.total_count,
            ty: resolve_type(name, prop_name, model, policy)?,
        });
    }
    Ok(InterfaceDecl { name: name.to_string(), properties })
}

fn resolve_type(
    kind: &str,
    property: &str,
    model: &PropertyModel,
    policy: ConflictPolicy,
) -> Result<TypeExpr> {
    if model.saw_array && model.saw_non_array && policy == ConflictPolicy::Strict {
        return Err(Error::ShapeConflict {
            kind: kind.to_string(),
            property: property.to_string(),
        });
    }

    if model.saw_array {
        let mut elements: Vec<String> = model
            .element_tags
            .iter()
            .map(|tag| tag.as_str().to_string())
            .collect();
        return Ok(match elements.len() {
            0 => TypeExpr::Any,
            1 => TypeExpr::List { element: elements.remove(0) },
            _ => TypeExpr::UnionList { elements },
        });
    }

    let mut names: Vec<String> = model
        .value_tags
        .iter()
        .map(|tag| tag.as_str().to_string())
        .collect();
    Ok(match names.len() {
        0 => TypeExpr::Any,
        1 => TypeExpr::Name { name: names.remove(0) },
        _ => TypeExpr::Union { names },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::{Walker, infer_schema};
    use serde_json::json;

    fn resolve_one(corpus: &[serde_json::Value], kind: &str, policy: ConflictPolicy) -> Result<InterfaceDecl> {
        let schema = infer_schema(&Walker::default(), corpus).unwrap();
        resolve_kind(kind, &schema.kinds[kind], policy)
    }

    fn prop<'a>(decl: &'a InterfaceDecl, name: &str) -> &'a PropertyDecl {
        decl.properties
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("no property {name}"))
    }

    #[test]
    fn optional_iff_occurrence_below_total() {
        let corpus = [json!({"kind": "X", "a": 1, "b": "hi"}), json!({"kind": "X", "a": 2})];
        let decl = resolve_one(&corpus, "X", ConflictPolicy::Strict).unwrap();
        assert!(!prop(&decl, "a").optional);
        assert!(prop(&decl, "b").optional);
        assert_eq!(prop(&decl, "a").ty, TypeExpr::Name { name: "number".into() });
        assert_eq!(prop(&decl, "b").ty, TypeExpr::Name { name: "string".into() });
    }

    #[test]
    fn union_keeps_first_encounter_order_across_scalar_and_kind_tags() {
        let corpus = [
            json!({"kind": "K", "v": "s"}),
            json!({"kind": "K", "v": {"kind": "Identifier"}}),
            json!({"kind": "K", "v": 1}),
        ];
        let decl = resolve_one(&corpus, "K", ConflictPolicy::Strict).unwrap();
        assert_eq!(
            prop(&decl, "v").ty,
            TypeExpr::Union { names: vec!["string".into(), "Identifier".into(), "number".into()] }
        );
    }

    #[test]
    fn single_element_tag_resolves_to_list() {
        let corpus = [json!({"kind": "K", "xs": ["a", "b"]})];
        let decl = resolve_one(&corpus, "K", ConflictPolicy::Strict).unwrap();
        assert_eq!(prop(&decl, "xs").ty, TypeExpr::List { element: "string".into() });
    }

    #[test]
    fn mixed_element_tags_resolve_to_union_list() {
        let corpus = [
            json!({"kind": "K", "xs": ["a"]}),
            json!({"kind": "K", "xs": [1]}),
        ];
        let decl = resolve_one(&corpus, "K", ConflictPolicy::Strict).unwrap();
        assert_eq!(
            prop(&decl, "xs").ty,
            TypeExpr::UnionList { elements: vec!["string".into(), "number".into()] }
        );
    }

    #[test]
    fn only_empty_arrays_resolve_to_any() {
        let corpus = [json!({"kind": "K", "xs": []}), json!({"kind": "K", "xs": []})];
        let decl = resolve_one(&corpus, "K", ConflictPolicy::Strict).unwrap();
        assert_eq!(prop(&decl, "xs").ty, TypeExpr::Any);
        assert!(!prop(&decl, "xs").optional);
    }

    #[test]
    fn shape_conflict_is_fatal_under_strict() {
        let corpus = [json!({"kind": "K", "v": [1]}), json!({"kind": "K", "v": 1})];
        let err = resolve_one(&corpus, "K", ConflictPolicy::Strict).unwrap_err();
        match err {
            Error::ShapeConflict { kind, property } => {
                assert_eq!(kind, "K");
                assert_eq!(property, "v");
            }
            other => panic!("expected shape conflict, got {other:?}"),
        }
    }

    #[test]
    fn shape_conflict_widens_under_array_wins() {
        let corpus = [json!({"kind": "K", "v": [1]}), json!({"kind": "K", "v": "s"})];
        let decl = resolve_one(&corpus, "K", ConflictPolicy::ArrayWins).unwrap();
        assert_eq!(prop(&decl, "v").ty, TypeExpr::List { element: "number".into() });
    }
}
