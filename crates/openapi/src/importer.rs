//! # Import Orchestrator
//!
//! `OpenApiImporter` runs the full pipeline over one document:
//!
//! ```text
//! text
//!   │
//!   ▼
//! parse_document()            → OpenApiDocument (+ version / schema warnings)
//!   │
//!   ▼
//! classify_schemas()          → Vec<EntitySchema>
//!   │
//!   ├──► build_entity()        → Vec<Entity>          (per schema)
//!   ├──► extract_references()  → Vec<ReferenceEdge>   (per schema)
//!   │
//!   ▼
//! RelationResolver::resolve() → Vec<Relation>
//!   │
//!   ▼
//! assign_positions()          → DesignModel { entities, relations, warnings }
//! ```
//!
//! The importer holds only its options; each call is independent. The model
//! is assembled in locals and returned only when every stage succeeded.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relmap_openapi::{ImportOptions, OpenApiImporter};
//!
//! let importer = OpenApiImporter::new(ImportOptions::default());
//! let model = importer.import(&std::fs::read_to_string("petstore.yaml")?)?;
//!
//! println!("{} entities, {} relations", model.entity_count(), model.relation_count());
//! for warning in &model.warnings {
//!     println!("warning: {}", warning);
//! }
//! ```

use crate::document::{OpenApiDocument, parse_document};
use crate::fields::build_entity;
use crate::layout::assign_positions;
use crate::options::ImportOptions;
use crate::references::extract_references;
use crate::resolver::RelationResolver;
use crate::schema::classify_schemas;
use crate::validate::{DocumentValidation, validate_document};
use crate::warnings::Warnings;
use relmap_core::{DocumentFormat, EngineError, EngineResult};
use relmap_ir::{DesignModel, Entity, ModelValidator};

// ============================================================================
// OpenApiImporter
// ============================================================================

/// Imports OpenAPI / Swagger documents into design models
#[derive(Debug, Clone, Default)]
pub struct OpenApiImporter {
    options: ImportOptions,
}

impl OpenApiImporter {
    /// Create an importer with the given options
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Create an importer with default options
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Get the options
    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Import a document, detecting its format.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Format` when the text is neither valid JSON nor
    /// valid YAML. Missing schemas and unresolved references are reported
    /// as warnings on the returned model.
    pub fn import(&self, text: &str) -> EngineResult<DesignModel> {
        self.run(text, None)
    }

    /// Import a document in a known format
    pub fn import_with_format(&self, text: &str, format: DocumentFormat) -> EngineResult<DesignModel> {
        self.run(text, Some(format))
    }

    /// Import an already decoded document
    ///
    /// Version and schema map warnings are raised here the same way
    /// `import` raises them.
    pub fn import_document(&self, document: &OpenApiDocument) -> EngineResult<DesignModel> {
        self.build_model(document, document.document_warnings())
    }

    /// Strictly validate a document without building a model
    pub fn validate(&self, text: &str) -> DocumentValidation {
        validate_document(text, None)
    }

    fn run(&self, text: &str, format: Option<DocumentFormat>) -> EngineResult<DesignModel> {
        let (document, warnings) = parse_document(text, format)?;
        tracing::info!(
            "Importing {} document with {} schema(s)",
            document.format,
            document.schemas.len()
        );
        self.build_model(&document, warnings)
    }

    fn build_model(
        &self,
        document: &OpenApiDocument,
        mut warnings: Warnings,
    ) -> EngineResult<DesignModel> {
        // ── 1. Classify ──────────────────────────────────────────────────
        let (schemas, classify_warnings) = classify_schemas(&document.schemas);
        warnings.extend(classify_warnings);

        // ── 2. Entities and reference edges ──────────────────────────────
        let mut entities: Vec<Entity> = Vec::with_capacity(schemas.len());
        let mut edges = Vec::new();
        for schema in &schemas {
            let (entity, entity_warnings) = build_entity(schema, &self.options);
            warnings.extend(entity_warnings);
            entities.push(entity);

            let (schema_edges, edge_warnings) = extract_references(schema);
            warnings.extend(edge_warnings);
            edges.extend(schema_edges);
        }

        // ── 3. Relations ─────────────────────────────────────────────────
        let (relations, relation_warnings) =
            RelationResolver::new(&schemas, &entities, &self.options).resolve(&edges);
        warnings.extend(relation_warnings);

        // ── 4. Layout ────────────────────────────────────────────────────
        assign_positions(&mut entities, &self.options.layout);

        let model = DesignModel {
            entities,
            relations,
            warnings: warnings.into_messages(),
        };

        // ── 5. Invariants ────────────────────────────────────────────────
        let check = ModelValidator::with_default_checks().validate(&model);
        for warning in &check.warnings {
            tracing::debug!("{}", warning);
        }
        check
            .to_result()
            .map_err(|e| EngineError::internal(format!("Imported model is inconsistent: {}", e)))?;

        tracing::info!(
            "Imported {} entities, {} relations, {} warning(s)",
            model.entity_count(),
            model.relation_count(),
            model.warnings.len()
        );

        Ok(model)
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Import a document with default options
pub fn import_openapi(text: &str) -> EngineResult<DesignModel> {
    OpenApiImporter::with_defaults().import(text)
}

/// Strictly validate a document
pub fn validate_openapi(text: &str) -> DocumentValidation {
    validate_document(text, None)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;
    use relmap_core::{Cardinality, Position};

    const BLOG: &str = r##"{
        "openapi": "3.0.1",
        "info": {"title": "Blog"},
        "components": {
            "schemas": {
                "Author": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "posts": {"type": "array", "items": {"$ref": "#/components/schemas/Post"}}
                    }
                },
                "Post": {
                    "type": "object",
                    "required": ["title"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "title": {"type": "string", "minLength": 1},
                        "author": {"$ref": "#/components/schemas/Author"}
                    }
                },
                "PostResponse": {
                    "type": "object",
                    "properties": {"post": {"$ref": "#/components/schemas/Post"}}
                }
            }
        }
    }"##;

    #[test]
    fn test_import_blog() {
        let model = import_openapi(BLOG).unwrap();

        assert_eq!(
            model.entities.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["Author", "Post"]
        );
        assert!(model.warnings.is_empty(), "{:?}", model.warnings);
        assert_eq!(model.relations.len(), 1);

        let rel = &model.relations[0];
        assert_eq!(rel.relation_type, Cardinality::ManyToOne);
        assert_eq!(rel.target_field_name.as_deref(), Some("posts"));
        assert_eq!(rel.source_entity_id, model.entity_by_name("Post").unwrap().id);
    }

    #[test]
    fn test_positions_assigned() {
        let model = import_openapi(BLOG).unwrap();
        assert_eq!(model.entities[0].position, Position::new(100.0, 100.0));
        assert_eq!(model.entities[1].position, Position::new(400.0, 100.0));
    }

    #[test]
    fn test_import_document_directly() {
        let (document, _) = parse_document(BLOG, None).unwrap();
        let model = OpenApiImporter::with_defaults()
            .import_document(&document)
            .unwrap();
        assert_eq!(model.entity_count(), 2);
        assert!(model.warnings.is_empty());
    }

    #[test]
    fn test_import_document_keeps_document_warnings() {
        let (document, parsed) = parse_document("{\"info\": {}}", None).unwrap();
        let model = OpenApiImporter::with_defaults()
            .import_document(&document)
            .unwrap();

        assert_eq!(model.warnings.len(), 2);
        assert_eq!(model.warnings, parsed.into_messages());
    }

    #[test]
    fn test_leading_underscore_digit_names_import() {
        let text = r##"{
            "openapi": "3.0.0",
            "info": {"title": "Auth"},
            "components": {"schemas": {
                "User": {"type": "object", "properties": {
                    "_2fa": {"type": "boolean"},
                    "order": {"$ref": "#/components/schemas/1_2Order"}
                }},
                "1_2Order": {"type": "object", "properties": {"total": {"type": "number"}}}
            }}
        }"##;
        let model = import_openapi(text).unwrap();

        let user = model.entity_by_name("User").unwrap();
        assert!(user.fields.iter().any(|f| f.name == "fa"));
        assert!(model.entity_by_name("Order").is_some());
        assert_eq!(model.relation_count(), 1);
        assert!(ModelValidator::with_default_checks().validate(&model).valid);
    }

    #[test]
    fn test_format_error_propagates() {
        let err = import_openapi("{ not json").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_schemas_is_lenient() {
        let model = import_openapi("openapi: 3.0.0\ninfo: {title: x}").unwrap();
        assert!(model.is_empty());
        assert_eq!(model.warnings.len(), 1);
        assert!(model.warnings[0].starts_with("No schemas found"));
    }

    #[test]
    fn test_import_with_format() {
        let importer = OpenApiImporter::with_defaults();
        let model = importer.import_with_format(BLOG, DocumentFormat::Yaml).unwrap();
        assert_eq!(model.entity_count(), 2);

        let err = importer
            .import_with_format("openapi: 3.0.0", DocumentFormat::Json)
            .unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_validate_entry_point() {
        assert!(validate_openapi(BLOG).valid);
        assert!(!OpenApiImporter::with_defaults().validate("{}").valid);
    }
}
