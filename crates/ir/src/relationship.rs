//! Relation definitions between entities
//!
//! This module contains the `Relation` struct and its foreign-key and
//! join-table metadata.

use relmap_core::{
    Cardinality, CascadeType, EngineError, EngineResult, FetchType, Identifiable,
    ReferentialAction, Validatable,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Relation
// ============================================================================

/// Represents an inferred association between two entities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Unique identifier for this relation
    pub id: Uuid,

    /// Cardinality seen from the source entity
    #[serde(rename = "type")]
    pub relation_type: Cardinality,

    /// ID of the entity owning the forward reference
    pub source_entity_id: Uuid,

    /// ID of the referenced entity
    pub target_entity_id: Uuid,

    /// Property on the source entity holding the reference
    pub source_field_name: String,

    /// Property on the target entity pointing back, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_field_name: Option<String>,

    /// Whether both sides reference each other
    pub bidirectional: bool,

    /// Loading strategy for the related side
    pub fetch_type: FetchType,

    /// Operations propagated to the related side
    #[serde(default)]
    pub cascade: Vec<CascadeType>,

    /// Foreign key column metadata
    pub foreign_key: ForeignKey,

    /// Join table, present only for many-to-many relations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_table: Option<JoinTable>,
}

impl Relation {
    /// Create a new unidirectional relation
    pub fn new(
        source_entity_id: Uuid,
        target_entity_id: Uuid,
        relation_type: Cardinality,
        source_field_name: impl Into<String>,
        foreign_key: ForeignKey,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            relation_type,
            source_entity_id,
            target_entity_id,
            source_field_name: source_field_name.into(),
            target_field_name: None,
            bidirectional: false,
            fetch_type: FetchType::default(),
            cascade: Vec::new(),
            foreign_key,
            join_table: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the relation ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Record the back-reference property and mark the relation bidirectional
    pub fn with_back_reference(mut self, target_field_name: impl Into<String>) -> Self {
        self.target_field_name = Some(target_field_name.into());
        self.bidirectional = true;
        self
    }

    /// Set the fetch type
    pub fn with_fetch_type(mut self, fetch_type: FetchType) -> Self {
        self.fetch_type = fetch_type;
        self
    }

    /// Set the cascade operations
    pub fn with_cascade(mut self, cascade: Vec<CascadeType>) -> Self {
        self.cascade = cascade;
        self
    }

    /// Attach a join table
    pub fn with_join_table(mut self, join_table: JoinTable) -> Self {
        self.join_table = Some(join_table);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Check if this is a many-to-many relation
    pub fn is_many_to_many(&self) -> bool {
        self.relation_type.requires_join_table()
    }

    /// Check if a given entity is part of this relation
    pub fn involves_entity(&self, entity_id: Uuid) -> bool {
        self.source_entity_id == entity_id || self.target_entity_id == entity_id
    }

    /// Get the other entity in the relation
    pub fn other_entity(&self, entity_id: Uuid) -> Option<Uuid> {
        if self.source_entity_id == entity_id {
            Some(self.target_entity_id)
        } else if self.target_entity_id == entity_id {
            Some(self.source_entity_id)
        } else {
            None
        }
    }

    /// Check if the relation points from an entity to itself
    pub fn is_self_referential(&self) -> bool {
        self.source_entity_id == self.target_entity_id
    }

    /// Get the arrow symbol for visual representation
    pub fn arrow_symbol(&self) -> &'static str {
        self.relation_type.arrow_symbol()
    }
}

impl Validatable for Relation {
    fn validate(&self) -> EngineResult<()> {
        if self.source_field_name.is_empty() {
            return Err(EngineError::RelationValidation(
                "Source field must be specified".to_string(),
            ));
        }

        if self.foreign_key.column_name.is_empty() {
            return Err(EngineError::RelationValidation(format!(
                "Relation on '{}' has no foreign key column",
                self.source_field_name
            )));
        }

        // Join table must be present exactly for M2M
        match (self.is_many_to_many(), &self.join_table) {
            (true, None) => {
                return Err(EngineError::RelationValidation(format!(
                    "Many-to-many relation on '{}' must define a join table",
                    self.source_field_name
                )));
            }
            (false, Some(_)) => {
                return Err(EngineError::RelationValidation(format!(
                    "{} relation on '{}' must not define a join table",
                    self.relation_type, self.source_field_name
                )));
            }
            _ => {}
        }

        if self.bidirectional && self.target_field_name.is_none() {
            return Err(EngineError::RelationValidation(format!(
                "Bidirectional relation on '{}' has no target field",
                self.source_field_name
            )));
        }

        Ok(())
    }
}

impl Identifiable for Relation {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Relation {}

// ============================================================================
// ForeignKey
// ============================================================================

/// Foreign key column backing a relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// Column holding the referenced id
    pub column_name: String,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Action on delete
    pub on_delete: ReferentialAction,

    /// Action on update
    pub on_update: ReferentialAction,
}

impl ForeignKey {
    /// Create a nullable foreign key with default referential actions
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            nullable: true,
            on_delete: ReferentialAction::default(),
            on_update: ReferentialAction::default(),
        }
    }

    /// Set nullability
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the on delete action
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }

    /// Set the on update action
    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = action;
        self
    }
}

// ============================================================================
// JoinTable
// ============================================================================

/// Auxiliary table materializing a many-to-many relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTable {
    /// Table name
    pub name: String,

    /// Column referencing the source entity
    pub join_column: String,

    /// Column referencing the target entity
    pub inverse_join_column: String,
}

impl JoinTable {
    /// Create a join table description
    pub fn new(
        name: impl Into<String>,
        join_column: impl Into<String>,
        inverse_join_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            join_column: join_column.into(),
            inverse_join_column: inverse_join_column.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn many_to_one(from: Uuid, to: Uuid) -> Relation {
        Relation::new(
            from,
            to,
            Cardinality::ManyToOne,
            "author",
            ForeignKey::new("author_id"),
        )
    }

    #[test]
    fn test_relation_new() {
        let from_id = Uuid::new_v4();
        let to_id = Uuid::new_v4();
        let rel = many_to_one(from_id, to_id);

        assert_eq!(rel.source_entity_id, from_id);
        assert_eq!(rel.target_entity_id, to_id);
        assert!(!rel.bidirectional);
        assert!(rel.target_field_name.is_none());
        assert_eq!(rel.fetch_type, FetchType::Lazy);
        assert!(rel.cascade.is_empty());
    }

    #[test]
    fn test_with_back_reference() {
        let rel = many_to_one(Uuid::new_v4(), Uuid::new_v4()).with_back_reference("posts");
        assert!(rel.bidirectional);
        assert_eq!(rel.target_field_name.as_deref(), Some("posts"));
    }

    #[test]
    fn test_relation_involves_entity() {
        let from_id = Uuid::new_v4();
        let to_id = Uuid::new_v4();
        let rel = many_to_one(from_id, to_id);

        assert!(rel.involves_entity(from_id));
        assert!(rel.involves_entity(to_id));
        assert!(!rel.involves_entity(Uuid::new_v4()));
        assert_eq!(rel.other_entity(from_id), Some(to_id));
        assert_eq!(rel.other_entity(Uuid::new_v4()), None);
    }

    #[test]
    fn test_join_table_invariant() {
        let from_id = Uuid::new_v4();
        let to_id = Uuid::new_v4();

        assert!(many_to_one(from_id, to_id).validate().is_ok());

        let with_join = many_to_one(from_id, to_id).with_join_table(JoinTable::new(
            "post_author",
            "post_id",
            "author_id",
        ));
        assert!(with_join.validate().is_err());

        let m2m = Relation::new(
            from_id,
            to_id,
            Cardinality::ManyToMany,
            "courses",
            ForeignKey::new("student_id"),
        );
        assert!(m2m.validate().is_err());
        let m2m = m2m.with_join_table(JoinTable::new(
            "student_course",
            "student_id",
            "course_id",
        ));
        assert!(m2m.validate().is_ok());
    }

    #[test]
    fn test_relation_serializes_spec_shape() {
        let rel = many_to_one(Uuid::nil(), Uuid::nil());
        let json = serde_json::to_value(&rel).unwrap();

        assert_eq!(json["type"], "ManyToOne");
        assert_eq!(json["sourceFieldName"], "author");
        assert_eq!(json["fetchType"], "LAZY");
        assert_eq!(json["foreignKey"]["columnName"], "author_id");
        assert_eq!(json["foreignKey"]["onDelete"], "NO_ACTION");
        assert!(json.get("joinTable").is_none());
        assert!(json.get("targetFieldName").is_none());
    }

    #[test]
    fn test_foreign_key_builder() {
        let fk = ForeignKey::new("customer_id")
            .with_nullable(false)
            .on_delete(ReferentialAction::Cascade);
        assert!(!fk.nullable);
        assert_eq!(fk.on_delete, ReferentialAction::Cascade);
        assert_eq!(fk.on_update, ReferentialAction::NoAction);
    }
}
