//! Strict pre-import validation
//!
//! `validate_document` answers "would this import produce anything?" without
//! building a model. Problems are collected into a `DocumentValidation`
//! instead of being raised, so an import dialog can list all of them.

use crate::document::{OpenApiDocument, SpecVersion, parse_document};
use crate::schema::classify_schema;
use relmap_core::{DocumentFormat, EngineError, EngineResult};
use serde::Serialize;

// ============================================================================
// DocumentValidation
// ============================================================================

/// Outcome of a strict validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentValidation {
    /// Whether the document can be imported
    pub valid: bool,

    /// Problems found, in check order
    pub errors: Vec<DocumentError>,
}

impl DocumentValidation {
    /// A passing validation
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Record a problem
    pub fn add_error(&mut self, error: DocumentError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Check if a problem of the given kind was found
    pub fn has(&self, code: DocumentErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Error messages in check order
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Convert to `EngineResult`, preferring the schema-level errors
    pub fn to_result(&self) -> EngineResult<()> {
        if self.valid {
            Ok(())
        } else if self.has(DocumentErrorCode::SchemaAbsent) {
            Err(EngineError::SchemaAbsent)
        } else if self.has(DocumentErrorCode::NoEntities) {
            Err(EngineError::NoEntities)
        } else {
            Err(EngineError::validation(self.messages().join("; ")))
        }
    }
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentError {
    /// Kind of problem
    #[serde(skip)]
    pub code: DocumentErrorCode,

    /// Human-readable message
    pub message: String,
}

impl DocumentError {
    /// Create an error
    pub fn new(code: DocumentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Kinds of validation problems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentErrorCode {
    Format,
    MissingVersion,
    UnsupportedVersion,
    MissingInfo,
    SchemaAbsent,
    NoEntities,
}

// ============================================================================
// DocumentRule Trait
// ============================================================================

/// A strict check over a decoded document
pub trait DocumentRule {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Check the document and return any problems
    fn check(&self, document: &OpenApiDocument) -> Vec<DocumentError>;
}

/// Rule: a recognized `openapi` / `swagger` version is declared
pub struct VersionRule;

impl DocumentRule for VersionRule {
    fn name(&self) -> &'static str {
        "version"
    }

    fn check(&self, document: &OpenApiDocument) -> Vec<DocumentError> {
        match &document.version {
            None => vec![DocumentError::new(
                DocumentErrorCode::MissingVersion,
                "Missing 'openapi' or 'swagger' version field",
            )],
            Some(SpecVersion::Unknown(raw)) => vec![DocumentError::new(
                DocumentErrorCode::UnsupportedVersion,
                format!("Unsupported specification version '{}'", raw),
            )],
            Some(_) => Vec::new(),
        }
    }
}

/// Rule: an `info` section is present
pub struct InfoRule;

impl DocumentRule for InfoRule {
    fn name(&self) -> &'static str {
        "info"
    }

    fn check(&self, document: &OpenApiDocument) -> Vec<DocumentError> {
        if document.has_info() {
            Vec::new()
        } else {
            vec![DocumentError::new(
                DocumentErrorCode::MissingInfo,
                "Missing 'info' section",
            )]
        }
    }
}

/// Rule: the schema map is present and holds at least one entity
pub struct SchemasRule;

impl DocumentRule for SchemasRule {
    fn name(&self) -> &'static str {
        "schemas"
    }

    fn check(&self, document: &OpenApiDocument) -> Vec<DocumentError> {
        if !document.has_schemas() {
            return vec![DocumentError::new(
                DocumentErrorCode::SchemaAbsent,
                EngineError::SchemaAbsent.to_string(),
            )];
        }

        let any_entity = document
            .schemas
            .iter()
            .any(|(name, schema)| classify_schema(name, schema, &document.schemas).is_ok());

        if any_entity {
            Vec::new()
        } else {
            vec![DocumentError::new(
                DocumentErrorCode::NoEntities,
                EngineError::NoEntities.to_string(),
            )]
        }
    }
}

/// The built-in rules, in reporting order
pub fn default_rules() -> Vec<Box<dyn DocumentRule>> {
    vec![Box::new(VersionRule), Box::new(InfoRule), Box::new(SchemasRule)]
}

// ============================================================================
// Entry Point
// ============================================================================

/// Strictly validate a document without building a model.
///
/// Undecodable text is reported as an error rather than returned as `Err`.
pub fn validate_document(text: &str, format: Option<DocumentFormat>) -> DocumentValidation {
    let mut validation = DocumentValidation::ok();

    let document = match parse_document(text, format) {
        Ok((document, _)) => document,
        Err(e) => {
            validation.add_error(DocumentError::new(DocumentErrorCode::Format, e.to_string()));
            return validation;
        }
    };

    for rule in default_rules() {
        for error in rule.check(&document) {
            tracing::debug!("Validation rule '{}' failed: {}", rule.name(), error);
            validation.add_error(error);
        }
    }

    validation
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_document() {
        let text = r#"
openapi: 3.0.0
info:
  title: Shop
components:
  schemas:
    Order:
      type: object
      properties:
        total: { type: number }
"#;
        let validation = validate_document(text, None);
        assert!(validation.valid);
        assert!(validation.errors.is_empty());
        assert!(validation.to_result().is_ok());
    }

    #[test]
    fn test_missing_everything() {
        let validation = validate_document("{}", None);
        assert!(!validation.valid);
        assert_eq!(
            validation.errors.iter().map(|e| e.code).collect::<Vec<_>>(),
            vec![
                DocumentErrorCode::MissingVersion,
                DocumentErrorCode::MissingInfo,
                DocumentErrorCode::SchemaAbsent,
            ]
        );
        assert!(matches!(validation.to_result(), Err(EngineError::SchemaAbsent)));
    }

    #[test]
    fn test_no_entities() {
        let text = r#"{
            "swagger": "2.0",
            "info": {"title": "x"},
            "definitions": {"OrderResponse": {"type": "object", "properties": {"id": {"type": "integer"}}}}
        }"#;
        let validation = validate_document(text, None);
        assert!(validation.has(DocumentErrorCode::NoEntities));
        assert!(matches!(validation.to_result(), Err(EngineError::NoEntities)));
    }

    #[test]
    fn test_format_error_reported() {
        let validation = validate_document("{\"openapi\": ", None);
        assert!(!validation.valid);
        assert_eq!(validation.errors.len(), 1);
        assert_eq!(validation.errors[0].code, DocumentErrorCode::Format);
        assert!(validation.errors[0].message.contains("JSON"));
    }

    #[test]
    fn test_unsupported_version() {
        let validation = validate_document(
            "openapi: 4.0.0\ninfo: {title: x}\ncomponents: {schemas: {Pet: {properties: {name: {type: string}}}}}",
            None,
        );
        assert_eq!(validation.messages(), vec!["Unsupported specification version '4.0.0'"]);
        assert!(validation.to_result().unwrap_err().is_validation());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(validate_document("{}", None)).unwrap();
        assert_eq!(json["valid"], false);
        assert!(json["errors"][0].get("message").is_some());
        assert!(json["errors"][0].get("code").is_none());
    }
}
