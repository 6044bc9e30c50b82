//! Entity definitions for data models
//!
//! This module contains the `Entity` struct and related types for defining
//! data models (tables) in the relmap design model.

use crate::field::Field;
use crate::naming::{is_valid_identifier, to_snake_case};
use relmap_core::{
    EngineError, EngineResult, Identifiable, Named, Position, Validatable,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

// ============================================================================
// Entity
// ============================================================================

/// Represents a data entity (maps to a database table)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique identifier for this entity
    pub id: Uuid,

    /// Entity name (PascalCase, e.g., "User", "BlogPost")
    pub name: String,

    /// Database table name (snake_case, e.g., "user", "blog_post")
    pub table_name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Position on the canvas
    pub position: Position,

    /// Fields (columns) in this entity
    pub fields: Vec<Field>,

    /// Entity configuration options
    pub config: EntityConfig,
}

impl Entity {
    /// Create a new entity with the given name and no fields
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let table_name = to_snake_case(&name);

        Self {
            id: Uuid::new_v4(),
            name,
            table_name,
            description: None,
            position: Position::zero(),
            fields: Vec::new(),
            config: EntityConfig::default(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the entity ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Set the table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the position using x, y coordinates
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set the configuration
    pub fn with_config(mut self, config: EntityConfig) -> Self {
        self.config = config;
        self
    }

    // ========================================================================
    // Field management
    // ========================================================================

    /// Add a field to the entity
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Add a field using builder pattern
    pub fn with_field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }

    /// Prepend `field` unless an `id` field already exists.
    ///
    /// Returns `true` when the field was inserted.
    pub fn ensure_id_field(&mut self, field: Field) -> bool {
        if self.id_field().is_some() {
            return false;
        }
        self.fields.insert(0, field);
        true
    }

    /// Get a field by name
    pub fn get_field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if entity has a specific field name
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Get the identifier field
    pub fn id_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_id())
    }

    /// Get all NOT NULL fields
    pub fn required_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.is_required()).collect()
    }

    /// Get all fields carrying at least one validation rule
    pub fn validated_fields(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| !f.validations.is_empty())
            .collect()
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl Validatable for Entity {
    fn validate(&self) -> EngineResult<()> {
        // Entity name must not be empty
        if self.name.is_empty() {
            return Err(EngineError::entity_validation(
                &self.name,
                "Entity name cannot be empty",
            ));
        }

        // Entity name must be valid identifier
        if !is_valid_identifier(&self.name) {
            return Err(EngineError::entity_validation(
                &self.name,
                format!("Entity name '{}' is not a valid identifier", self.name),
            ));
        }

        // Table name must not be empty
        if self.table_name.is_empty() {
            return Err(EngineError::entity_validation(
                &self.name,
                "Table name cannot be empty",
            ));
        }

        // Must have at least one field
        if self.fields.is_empty() {
            return Err(EngineError::entity_validation(
                &self.name,
                "Entity must have at least one field",
            ));
        }

        // Validate all fields
        for field in &self.fields {
            field.validate().map_err(|e| {
                EngineError::field_validation(&self.name, &field.name, e.to_string())
            })?;
        }

        // Check for duplicate field names
        let mut field_names = HashSet::new();
        for field in &self.fields {
            if !field_names.insert(&field.name) {
                return Err(EngineError::entity_validation(
                    &self.name,
                    format!("Duplicate field name '{}'", field.name),
                ));
            }
        }

        Ok(())
    }
}

impl Identifiable for Entity {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Named for Entity {
    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl std::hash::Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// EntityConfig
// ============================================================================

/// Scaffolding switches read by downstream code generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityConfig {
    /// Generate a REST controller for this entity
    pub generate_controller: bool,

    /// Generate a service layer for this entity
    pub generate_service: bool,

    /// Enable caching in the generated service
    pub enable_caching: bool,
}

impl EntityConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable caching
    pub fn with_caching(mut self) -> Self {
        self.enable_caching = true;
        self
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            generate_controller: true,
            generate_service: true,
            enable_caching: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
