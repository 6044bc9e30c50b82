//! The design model produced by an import
//!
//! `DesignModel` is the root container handed back to callers: the entities,
//! the relations between them, and the non-fatal warnings collected while
//! building them. It is produced in one call and not mutated afterwards; the
//! owning project store decides how to merge it into its live state.

use crate::entity::Entity;
use crate::relationship::Relation;
use crate::validation::ModelValidator;
use relmap_core::{EngineResult, Identifiable, Named, Validatable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// DesignModel
// ============================================================================

/// Entities, relations, and warnings produced from one schema document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignModel {
    /// Entities in source schema order
    pub entities: Vec<Entity>,

    /// Relations in discovery order
    pub relations: Vec<Relation>,

    /// Human-readable diagnostics, in the order they were raised
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl DesignModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model carrying only warnings
    pub fn with_warnings(warnings: Vec<String>) -> Self {
        Self {
            warnings,
            ..Self::default()
        }
    }

    // ========================================================================
    // Entity lookups
    // ========================================================================

    /// Get an entity by ID
    pub fn entity(&self, id: Uuid) -> Option<&Entity> {
        self.entities.iter().find(|e| e.matches_id(id))
    }

    /// Get an entity by name (case-insensitive)
    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name_matches(name))
    }

    /// Get the number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ========================================================================
    // Relation lookups
    // ========================================================================

    /// Get all relations touching an entity
    pub fn relations_for_entity(&self, entity_id: Uuid) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|r| r.involves_entity(entity_id))
            .collect()
    }

    /// Get relations where the entity owns the forward reference
    pub fn outgoing_relations(&self, entity_id: Uuid) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|r| r.source_entity_id == entity_id)
            .collect()
    }

    /// Find the relation between two entities in either direction
    pub fn relation_between(&self, a: Uuid, b: Uuid) -> Option<&Relation> {
        self.relations.iter().find(|r| {
            (r.source_entity_id == a && r.target_entity_id == b)
                || (r.source_entity_id == b && r.target_entity_id == a)
        })
    }

    /// Get the number of relations
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Check if any warnings were raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the model has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of fields across all entities
    pub fn field_count(&self) -> usize {
        self.entities.iter().map(|e| e.field_count()).sum()
    }
}

impl Validatable for DesignModel {
    fn validate(&self) -> EngineResult<()> {
        ModelValidator::with_default_checks()
            .validate(self)
            .to_result()
    }
}

// ============================================================================
// Tests
// ============================================================================
