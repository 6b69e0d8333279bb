//! Schema accumulator: sufficient statistics per (kind, property) across the
//! whole corpus.
//!
//! All merges are idempotent set unions; inference only widens, never narrows.
//! Every map and set is insertion-ordered (`indexmap`) so output order is
//! strictly first-encountered order during traversal.

use indexmap::{IndexMap, IndexSet};

use crate::value::{ScalarTag, ValueTag};

/// Aggregated occurrence/type statistics for one property of one kind.
#[derive(Clone, Debug, Default)]
pub struct PropertyModel {
    /// Times the property key appeared on a visited node of this kind.
    /// An absent key never increments; a present key with a null value does.
    pub occurrence_count: u64,
    /// Scalar and nested-kind tags observed for non-array values, in
    /// first-encountered order (interleaved, as seen).
    pub value_tags: IndexSet<ValueTag>,
    /// Tags observed among array elements. Populated only when the property
    /// held an array; empty arrays set `saw_array` but contribute no tags.
    pub element_tags: IndexSet<ValueTag>,
    pub saw_array: bool,
    pub saw_non_array: bool,
}

impl PropertyModel {
    pub fn scalar_tags(&self) -> impl Iterator<Item = ScalarTag> + '_ {
        self.value_tags.iter().filter_map(|tag| match tag {
            ValueTag::Scalar(scalar) => Some(*scalar),
            ValueTag::Kind(_) => None,
        })
    }

    pub fn nested_kind_tags(&self) -> impl Iterator<Item = &str> {
        self.value_tags.iter().filter_map(|tag| match tag {
            ValueTag::Kind(kind) => Some(kind.as_str()),
            ValueTag::Scalar(_) => None,
        })
    }

    fn absorb(&mut self, other: PropertyModel) {
        self.occurrence_count += other.occurrence_count;
        self.saw_array |= other.saw_array;
        self.saw_non_array |= other.saw_non_array;
        for tag in other.value_tags {
            self.value_tags.insert(tag);
        }
        for tag in other.element_tags {
            self.element_tags.insert(tag);
        }
    }
}

/// Complete property-model set plus total occurrence count for one node kind.
#[derive(Clone, Debug, Default)]
pub struct KindSchema {
    pub total_count: u64,
    pub properties: IndexMap<String, PropertyModel>,
}

/// One classified property sighting, produced by the walker.
#[derive(Clone, Debug)]
pub enum Observation {
    Scalar(ScalarTag),
    Nested(String),
    Elements(IndexSet<ValueTag>),
}

/// The full kind → KindSchema mapping for one run. Built fresh per run,
/// mutated only during traversal, consumed read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    pub kinds: IndexMap<String, KindSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one visit of a node with the given kind.
    pub fn record_occurrence(&mut self, kind: &str) {
        self.kinds.entry(kind.to_string()).or_default().total_count += 1;
    }

    /// Merge one observation into the named property model, creating it on
    /// first sight.
    pub fn record_property(&mut self, kind: &str, name: &str, observation: Observation) {
        let model = self
            .kinds
            .entry(kind.to_string())
            .or_default()
            .properties
            .entry(name.to_string())
            .or_default();
        model.occurrence_count += 1;
        match observation {
            Observation::Scalar(tag) => {
                model.saw_non_array = true;
                model.value_tags.insert(ValueTag::Scalar(tag));
            }
            Observation::Nested(child_kind) => {
                model.saw_non_array = true;
                model.value_tags.insert(ValueTag::Kind(child_kind));
            }
            Observation::Elements(tags) => {
                model.saw_array = true;
                for tag in tags {
                    model.element_tags.insert(tag);
                }
            }
        }
    }

    /// Widening union of two accumulations: counts add, tag sets union.
    ///
    /// Associative and commutative up to ordering; `self`'s insertion order
    /// wins, new keys append in `other`'s order. Folding per-document schemas
    /// in corpus-index order therefore reproduces the sequential
    /// first-encounter order exactly.
    pub fn merge(&mut self, other: Schema) {
        for (kind, other_kind_schema) in other.kinds {
            let kind_schema = self.kinds.entry(kind).or_default();
            kind_schema.total_count += other_kind_schema.total_count;
            for (name, other_model) in other_kind_schema.properties {
                kind_schema
                    .properties
                    .entry(name)
                    .or_default()
                    .absorb(other_model);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarTag;

    fn tag(s: &str) -> ValueTag {
        ValueTag::Kind(s.to_string())
    }

    #[test]
    fn repeated_identical_observations_do_not_grow_tag_sets() {
        let mut schema = Schema::new();
        schema.record_occurrence("X");
        schema.record_property("X", "a", Observation::Scalar(ScalarTag::Number));
        schema.record_occurrence("X");
        schema.record_property("X", "a", Observation::Scalar(ScalarTag::Number));

        let model = &schema.kinds["X"].properties["a"];
        assert_eq!(model.occurrence_count, 2);
        assert_eq!(model.value_tags.len(), 1);
    }

    #[test]
    fn occurrence_count_never_exceeds_total_count() {
        let mut schema = Schema::new();
        schema.record_occurrence("X");
        schema.record_property("X", "a", Observation::Scalar(ScalarTag::String));
        schema.record_occurrence("X");

        let kind_schema = &schema.kinds["X"];
        for model in kind_schema.properties.values() {
            assert!(model.occurrence_count <= kind_schema.total_count);
        }
    }

    #[test]
    fn merge_adds_counts_and_unions_tags() {
        let mut left = Schema::new();
        left.record_occurrence("X");
        left.record_property("X", "v", Observation::Nested("A".into()));

        let mut right = Schema::new();
        right.record_occurrence("X");
        right.record_property("X", "v", Observation::Nested("B".into()));
        right.record_occurrence("Y");

        left.merge(right);
        assert_eq!(left.kinds["X"].total_count, 2);
        assert_eq!(left.kinds["Y"].total_count, 1);
        let model = &left.kinds["X"].properties["v"];
        assert_eq!(model.occurrence_count, 2);
        let tags: Vec<&ValueTag> = model.value_tags.iter().collect();
        assert_eq!(tags, vec![&tag("A"), &tag("B")]);
    }

    #[test]
    fn merge_is_commutative_up_to_ordering() {
        let mut a = Schema::new();
        a.record_occurrence("X");
        a.record_property("X", "v", Observation::Scalar(ScalarTag::String));

        let mut b = Schema::new();
        b.record_occurrence("X");
        b.record_property("X", "v", Observation::Nested("A".into()));

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);

        let ab_model = &ab.kinds["X"].properties["v"];
        let ba_model = &ba.kinds["X"].properties["v"];
        assert_eq!(ab_model.occurrence_count, ba_model.occurrence_count);
        let ab_tags: std::collections::BTreeSet<&str> =
            ab_model.value_tags.iter().map(ValueTag::as_str).collect();
        let ba_tags: std::collections::BTreeSet<&str> =
            ba_model.value_tags.iter().map(ValueTag::as_str).collect();
        assert_eq!(ab_tags, ba_tags);
    }

    #[test]
    fn empty_array_observation_sets_saw_array_without_tags() {
        let mut schema = Schema::new();
        schema.record_occurrence("Y");
        schema.record_property("Y", "items", Observation::Elements(IndexSet::new()));

        let model = &schema.kinds["Y"].properties["items"];
        assert!(model.saw_array);
        assert!(!model.saw_non_array);
        assert!(model.element_tags.is_empty());
    }
}
