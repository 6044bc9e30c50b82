//! Error types for relmap
//!
//! This module provides unified error handling across the workspace:
//! document format errors raised by the importer, model validation errors,
//! model-file IO errors, and configuration errors.

use crate::types::DocumentFormat;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for relmap
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Document Errors
    // ========================================================================
    /// The input text is not a valid document in the given format
    #[error("Invalid {format} document: {message}")]
    Format {
        format: DocumentFormat,
        message: String,
    },

    /// No schema map (`definitions` / `components.schemas`) was found
    #[error("No schemas found: expected 'components.schemas' (OpenAPI 3) or 'definitions' (Swagger 2)")]
    SchemaAbsent,

    /// Schemas were found but none of them describes an entity
    #[error("No entity schemas found: every schema was filtered out as a non-entity")]
    NoEntities,

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity validation failed
    #[error("Entity validation failed for '{entity}': {message}")]
    EntityValidation { entity: String, message: String },

    /// Field validation failed
    #[error("Field validation failed for '{entity}.{field}': {message}")]
    FieldValidation {
        entity: String,
        field: String,
        message: String,
    },

    /// Relation validation failed
    #[error("Relation validation failed: {0}")]
    RelationValidation(String),

    // ========================================================================
    // Model File Errors
    // ========================================================================
    /// Model file not found
    #[error("Model file not found at path: {0}")]
    ModelNotFound(PathBuf),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    /// Model could not be encoded as JSON
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid model file format
    #[error("Invalid model file format: {0}")]
    InvalidModelFile(String),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Create a format error for the given document format
    pub fn format(format: DocumentFormat, msg: impl Into<String>) -> Self {
        EngineError::Format {
            format,
            message: msg.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// Create an entity validation error
    pub fn entity_validation(entity: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::EntityValidation {
            entity: entity.into(),
            message: msg.into(),
        }
    }

    /// Create a field validation error
    pub fn field_validation(
        entity: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        EngineError::FieldValidation {
            entity: entity.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::InvalidConfig(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        EngineError::Internal(msg.into())
    }

    /// Check if this error means the input could not be decoded at all
    pub fn is_format(&self) -> bool {
        matches!(self, EngineError::Format { .. })
    }

    /// Check if this error reports a document without usable schemas
    pub fn is_schema_error(&self) -> bool {
        matches!(self, EngineError::SchemaAbsent | EngineError::NoEntities)
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation(_)
                | EngineError::EntityValidation { .. }
                | EngineError::FieldValidation { .. }
                | EngineError::RelationValidation(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::ModelNotFound(_)
                | EngineError::FileRead { .. }
                | EngineError::FileWrite { .. }
                | EngineError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_json() {
        let err = EngineError::format(DocumentFormat::Json, "expected value at line 1 column 1");
        assert!(err.is_format());
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid JSON document: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_format_error_names_yaml() {
        let err = EngineError::format(DocumentFormat::Yaml, "mapping values are not allowed");
        assert_eq!(
            err.to_string(),
            "Invalid YAML document: mapping values are not allowed"
        );
    }

    #[test]
    fn test_schema_errors() {
        assert!(EngineError::SchemaAbsent.is_schema_error());
        assert!(EngineError::NoEntities.is_schema_error());
        assert!(!EngineError::SchemaAbsent.is_format());
    }

    #[test]
    fn test_entity_validation_error() {
        let err = EngineError::entity_validation("User", "Entity must have at least one field");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Entity validation failed for 'User': Entity must have at least one field"
        );
    }

    #[test]
    fn test_field_validation_error() {
        let err = EngineError::field_validation("User", "email", "Column name cannot be empty");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'User.email': Column name cannot be empty"
        );
    }

    #[test]
    fn test_io_error_classification() {
        let err = EngineError::FileRead {
            path: PathBuf::from("petstore.relmap.json"),
            message: "permission denied".to_string(),
        };
        assert!(err.is_io());
        assert!(EngineError::ModelNotFound(PathBuf::from("x")).is_io());
        assert!(!EngineError::internal("boom").is_io());
    }
}
