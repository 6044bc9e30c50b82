//! Relation inference
//!
//! A `$ref` only says "points to". The resolver turns reference edges into
//! relations with a cardinality by looking at the other side:
//!
//! | forward is array | back-reference | back is array | cardinality |
//! |---|---|---|---|
//! | no  | none | - | ManyToOne (unidirectional) |
//! | yes | none | - | OneToMany (unidirectional) |
//! | no  | yes  | no  | OneToOne |
//! | no  | yes  | yes | ManyToOne (bidirectional) |
//! | yes | yes  | no  | OneToMany (bidirectional) |
//! | yes | yes  | yes | ManyToMany |
//!
//! Each unordered pair of schemas yields at most one relation: the first
//! edge between them in document order wins and later ones are skipped.
//! When that edge is an array answered by a single reference, the relation
//! is built from the single-reference side, which holds the foreign key, so
//! the result is a bidirectional ManyToOne whichever schema comes first.

use crate::options::ImportOptions;
use crate::references::{BackReference, ReferenceEdge, find_back_reference};
use crate::schema::EntitySchema;
use crate::warnings::{ImportWarning, Warnings};
use relmap_core::Cardinality;
use relmap_ir::naming::{
    generate_fk_column_name, generate_join_column_name, generate_join_table_name,
    sanitize_field_name,
};
use relmap_ir::{Entity, ForeignKey, JoinTable, Relation};
use std::collections::{HashMap, HashSet};

/// Decide the cardinality of a relation.
///
/// `back_is_array` is `None` when the target has no back-reference.
pub fn decide_cardinality(forward_is_array: bool, back_is_array: Option<bool>) -> Cardinality {
    match (forward_is_array, back_is_array) {
        (false, None) => Cardinality::ManyToOne,
        (true, None) => Cardinality::OneToMany,
        (false, Some(false)) => Cardinality::OneToOne,
        (false, Some(true)) => Cardinality::ManyToOne,
        (true, Some(false)) => Cardinality::OneToMany,
        (true, Some(true)) => Cardinality::ManyToMany,
    }
}

// ============================================================================
// RelationResolver
// ============================================================================

/// Resolves reference edges against the classified entity schemas
pub struct RelationResolver<'a> {
    schemas: &'a [EntitySchema],
    entities: &'a [Entity],
    index: HashMap<&'a str, usize>,
    options: &'a ImportOptions,
}

impl<'a> RelationResolver<'a> {
    /// Create a resolver.
    ///
    /// `entities[i]` must be the entity built from `schemas[i]`.
    pub fn new(
        schemas: &'a [EntitySchema],
        entities: &'a [Entity],
        options: &'a ImportOptions,
    ) -> Self {
        let index = schemas
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), i))
            .collect();

        Self {
            schemas,
            entities,
            index,
            options,
        }
    }

    /// Turn edges into relations, in edge order
    pub fn resolve(&self, edges: &[ReferenceEdge]) -> (Vec<Relation>, Warnings) {
        let mut relations = Vec::new();
        let mut warnings = Warnings::new();
        let mut processed: HashSet<(String, String)> = HashSet::new();

        for edge in edges {
            let (Some(&source), Some(&target)) = (
                self.index.get(edge.source.as_str()),
                self.index.get(edge.target.as_str()),
            ) else {
                warnings.push(ImportWarning::UnresolvedReference {
                    target: edge.target.clone(),
                    source: edge.source.clone(),
                    field: edge.field.clone(),
                });
                continue;
            };

            if !processed.insert(pair_key(&edge.source, &edge.target)) {
                tracing::debug!(
                    "Skipping {}.{} -> {}: pair already related",
                    edge.source,
                    edge.field,
                    edge.target
                );
                continue;
            }

            let exclude = (edge.source == edge.target).then_some(edge.field.as_str());
            let back = find_back_reference(&self.schemas[target], &edge.source, exclude);
            let (edge, back, source, target) = match back {
                Some(back) if edge.is_array && !back.is_array => {
                    let owning = self.owning_edge(edge, &back, target);
                    let inverse = BackReference {
                        field: edge.field.clone(),
                        is_array: true,
                    };
                    (owning, Some(inverse), target, source)
                }
                back => (edge.clone(), back, source, target),
            };
            let edge = &edge;
            let cardinality = decide_cardinality(edge.is_array, back.as_ref().map(|b| b.is_array));

            tracing::debug!(
                "{}.{} -> {}: {}{}",
                edge.source,
                edge.field,
                edge.target,
                cardinality,
                back.as_ref()
                    .map(|b| format!(" (back-reference {})", b.field))
                    .unwrap_or_default()
            );

            relations.push(self.build_relation(edge, source, target, cardinality, back));
        }

        (relations, warnings)
    }

    /// The single-valued side of a one-to-many pair holds the foreign key
    fn owning_edge(&self, edge: &ReferenceEdge, back: &BackReference, target: usize) -> ReferenceEdge {
        ReferenceEdge {
            source: edge.target.clone(),
            field: back.field.clone(),
            target: edge.source.clone(),
            is_array: false,
            required: self.schemas[target].is_required(&back.field),
        }
    }

    fn build_relation(
        &self,
        edge: &ReferenceEdge,
        source: usize,
        target: usize,
        cardinality: Cardinality,
        back: Option<BackReference>,
    ) -> Relation {
        let source = &self.entities[source];
        let target = &self.entities[target];
        let field_name = sanitize_field_name(&edge.field);
        let defaults = &self.options.relations;

        let join_table = (cardinality == Cardinality::ManyToMany)
            .then(|| join_table_for(source, target, &field_name));

        let column_name = match &join_table {
            Some(join) => join.join_column.clone(),
            None => generate_fk_column_name(&field_name),
        };

        let foreign_key = ForeignKey::new(column_name)
            .with_nullable(!edge.required)
            .on_delete(defaults.on_delete)
            .on_update(defaults.on_update);

        let mut relation = Relation::new(source.id, target.id, cardinality, field_name, foreign_key)
            .with_id(
                self.options
                    .id_strategy
                    .relation_id(&edge.source, &edge.field, &edge.target),
            )
            .with_fetch_type(defaults.fetch_type)
            .with_cascade(defaults.cascade.clone());

        if let Some(join) = join_table {
            relation = relation.with_join_table(join);
        }

        if let Some(back) = back {
            relation = relation.with_back_reference(sanitize_field_name(&back.field));
        }

        relation
    }
}

/// Join table for a many-to-many relation, source first.
///
/// A self-referential pair would produce two identical columns, so the
/// inverse column is named after the forward field instead.
fn join_table_for(source: &Entity, target: &Entity, field_name: &str) -> JoinTable {
    let join_column = generate_join_column_name(&source.name);
    let mut inverse_join_column = generate_join_column_name(&target.name);
    if inverse_join_column == join_column {
        inverse_join_column = generate_fk_column_name(field_name);
    }

    JoinTable::new(
        generate_join_table_name(&source.name, &target.name),
        join_column,
        inverse_join_column,
    )
}

/// Unordered pair key
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
