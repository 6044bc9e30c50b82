//! Invariant checks for design models
//!
//! An imported model must satisfy a handful of structural invariants: entity
//! ids are unique, every entity has at least one field, relations point at
//! entities of the same model, and join tables exist exactly for
//! many-to-many relations. `ModelValidator` runs a set of `ModelCheck`s and
//! collects every violation instead of stopping at the first.

use crate::DesignModel;
use crate::naming::is_valid_identifier;
use relmap_core::{EngineError, EngineResult, Identifiable};
use std::collections::HashSet;
use uuid::Uuid;

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed validation result with an error
    pub fn error(error: ValidationError) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert to EngineResult (fails if any errors)
    pub fn to_result(self) -> EngineResult<()> {
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(EngineError::validation(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "entities.User.fields.email")
    pub path: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    // Entity errors
    DuplicateEntityId,
    EmptyEntityName,
    InvalidEntityName,
    NoFields,

    // Field errors
    InvalidFieldName,
    DuplicateFieldName,

    // Relation errors
    DuplicateRelationId,
    OrphanRelation,
    JoinTableMismatch,
    MissingForeignKeyColumn,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning code
    pub code: ValidationWarningCode,

    /// Human-readable warning message
    pub message: String,

    /// Path to the element
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    NoRelations,
    DuplicateTableName,
}

// ============================================================================
// ModelCheck Trait
// ============================================================================

/// A single invariant check over a design model
pub trait ModelCheck {
    /// Get the check name
    fn name(&self) -> &'static str;

    /// Get the check description
    fn description(&self) -> &'static str;

    /// Check a model and return the result
    fn check(&self, model: &DesignModel) -> ValidationResult;
}

// ============================================================================
// ModelValidator
// ============================================================================

/// Model validator that runs multiple checks
#[derive(Default)]
pub struct ModelValidator {
    checks: Vec<Box<dyn ModelCheck>>,
}

impl ModelValidator {
    /// Create a validator without checks
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a validator with the built-in checks
    pub fn with_default_checks() -> Self {
        let mut validator = Self::new();
        validator.add_check(Box::new(EntityIdentityCheck));
        validator.add_check(Box::new(EntityFieldsCheck));
        validator.add_check(Box::new(RelationEndpointsCheck));
        validator.add_check(Box::new(RelationShapeCheck));
        validator
    }

    /// Add a check
    pub fn add_check(&mut self, check: Box<dyn ModelCheck>) {
        self.checks.push(check);
    }

    /// Run every check against the model
    pub fn validate(&self, model: &DesignModel) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for check in &self.checks {
            let check_result = check.check(model);
            if !check_result.valid {
                tracing::debug!(
                    "Model check '{}' reported {} error(s)",
                    check.name(),
                    check_result.errors.len()
                );
            }
            result.merge(check_result);
        }

        result
    }
}

// ============================================================================
// Built-in Checks
// ============================================================================

/// Check: entity ids and names
pub struct EntityIdentityCheck;

impl ModelCheck for EntityIdentityCheck {
    fn name(&self) -> &'static str {
        "entity_identity"
    }

    fn description(&self) -> &'static str {
        "Validates that entity ids are unique and entity names are identifiers"
    }

    fn check(&self, model: &DesignModel) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for id in duplicate_ids(&model.entities) {
            result.add_error(
                ValidationError::new(
                    ValidationErrorCode::DuplicateEntityId,
                    format!("Entity id {} is used more than once", id),
                )
                .with_path(format!("entities.{}", id)),
            );
        }

        let mut seen_tables: HashSet<&str> = HashSet::new();
        for entity in &model.entities {
            let entity_path = format!("entities.{}", entity.name);

            if entity.name.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::EmptyEntityName,
                        "Entity name cannot be empty",
                    )
                    .with_path(format!("entities.{}", entity.id)),
                );
                continue;
            }

            if !is_valid_identifier(&entity.name) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::InvalidEntityName,
                        format!("Entity name '{}' is not a valid identifier", entity.name),
                    )
                    .with_path(&entity_path),
                );
            }

            if !seen_tables.insert(entity.table_name.as_str()) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::DuplicateTableName,
                        format!("Table name '{}' is used by more than one entity", entity.table_name),
                    )
                    .with_path(&entity_path),
                );
            }
        }

        result
    }
}

/// Check: entity fields
pub struct EntityFieldsCheck;

impl ModelCheck for EntityFieldsCheck {
    fn name(&self) -> &'static str {
        "entity_fields"
    }

    fn description(&self) -> &'static str {
        "Validates that every entity has uniquely named, valid fields"
    }

    fn check(&self, model: &DesignModel) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for entity in &model.entities {
            let entity_path = format!("entities.{}", entity.name);

            if entity.fields.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::NoFields,
                        format!("Entity '{}' has no fields", entity.name),
                    )
                    .with_path(&entity_path),
                );
                continue;
            }

            let mut seen_fields: HashSet<String> = HashSet::new();
            for field in &entity.fields {
                let field_path = format!("{}.fields.{}", entity_path, field.name);

                if !is_valid_identifier(&field.name) {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::InvalidFieldName,
                            format!("Field name '{}' is not a valid identifier", field.name),
                        )
                        .with_path(&field_path),
                    );
                }

                if !seen_fields.insert(field.name.to_lowercase()) {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::DuplicateFieldName,
                            format!("Duplicate field name: '{}'", field.name),
                        )
                        .with_path(&field_path),
                    );
                }
            }
        }

        result
    }
}

/// Check: relations reference entities of the same model
pub struct RelationEndpointsCheck;

impl ModelCheck for RelationEndpointsCheck {
    fn name(&self) -> &'static str {
        "relation_endpoints"
    }

    fn description(&self) -> &'static str {
        "Validates that relations reference existing entities"
    }

    fn check(&self, model: &DesignModel) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let entity_ids: HashSet<Uuid> = model.entities.iter().map(|e| e.id).collect();

        for id in duplicate_ids(&model.relations) {
            result.add_error(
                ValidationError::new(
                    ValidationErrorCode::DuplicateRelationId,
                    format!("Relation id {} is used more than once", id),
                )
                .with_path(format!("relations.{}", id)),
            );
        }

        for relation in &model.relations {
            let rel_path = format!("relations.{}", relation.id);

            if !entity_ids.contains(&relation.source_entity_id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::OrphanRelation,
                        format!(
                            "Relation on '{}' references non-existent source entity",
                            relation.source_field_name
                        ),
                    )
                    .with_path(&rel_path),
                );
            }

            if !entity_ids.contains(&relation.target_entity_id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::OrphanRelation,
                        format!(
                            "Relation on '{}' references non-existent target entity",
                            relation.source_field_name
                        ),
                    )
                    .with_path(&rel_path),
                );
            }
        }

        // Warning: no relations
        if model.relations.is_empty() && model.entities.len() > 1 {
            result.add_warning(ValidationWarning::new(
                ValidationWarningCode::NoRelations,
                "Model has multiple entities but no relations",
            ));
        }

        result
    }
}

/// Check: foreign key and join table shape
pub struct RelationShapeCheck;

impl ModelCheck for RelationShapeCheck {
    fn name(&self) -> &'static str {
        "relation_shape"
    }

    fn description(&self) -> &'static str {
        "Validates that join tables exist exactly for many-to-many relations"
    }

    fn check(&self, model: &DesignModel) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for relation in &model.relations {
            let rel_path = format!("relations.{}", relation.id);

            if relation.is_many_to_many() != relation.join_table.is_some() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::JoinTableMismatch,
                        format!(
                            "{} relation on '{}' {} a join table",
                            relation.relation_type,
                            relation.source_field_name,
                            if relation.is_many_to_many() {
                                "is missing"
                            } else {
                                "must not have"
                            }
                        ),
                    )
                    .with_path(&rel_path),
                );
            }

            if relation.foreign_key.column_name.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::MissingForeignKeyColumn,
                        format!(
                            "Relation on '{}' has an empty foreign key column",
                            relation.source_field_name
                        ),
                    )
                    .with_path(&rel_path),
                );
            }
        }

        result
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Ids that appear more than once, in first-repeat order
fn duplicate_ids<T: Identifiable>(items: &[T]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for item in items {
        let id = item.id();
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}

// ============================================================================
// Tests
// ============================================================================
