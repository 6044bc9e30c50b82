//! # relmap OpenAPI
//!
//! Schema import and relationship inference for OpenAPI 3.x and Swagger 2.0
//! documents, supplied as JSON or YAML text.
//!
//! OpenAPI has no notion of a relation: a `$ref` says "points to" but not
//! "how many". This crate infers an entity-relationship design model from
//! the reference graph by inspecting both sides of every reference.
//!
//! ## Features
//!
//! - **Format detection**: JSON or YAML, with source key order preserved
//! - **Schema classification**: keeps entity-shaped schemas, drops DTOs,
//!   wrappers, and enums
//! - **Field building**: canonical types and validation rules from property
//!   constraints
//! - **Relation inference**: cardinality from back-references, foreign key
//!   and join table naming
//! - **Strict validation**: a pre-flight check that reports problems instead
//!   of importing
//!
//! The engine is synchronous and performs no I/O.
//!

// ============================================================================
// Modules
// ============================================================================

pub mod document;
pub mod fields;
pub mod format;
pub mod importer;
pub mod layout;
pub mod options;
pub mod property;
pub mod references;
pub mod resolver;
pub mod schema;
pub mod type_map;
pub mod validate;
pub mod warnings;

// ============================================================================
// Re-exports
// ============================================================================

pub use document::{OpenApiDocument, SpecVersion, parse_document};
pub use format::detect_format;
pub use importer::{OpenApiImporter, import_openapi, validate_openapi};
pub use options::{IdStrategy, ImportOptions, LayoutConfig, RelationDefaults};
pub use property::PropertyShape;
pub use references::ReferenceEdge;
pub use resolver::{RelationResolver, decide_cardinality};
pub use schema::{EntitySchema, is_non_entity_name};
pub use type_map::map_type;
pub use validate::{DocumentError, DocumentErrorCode, DocumentValidation, validate_document};
pub use warnings::{ImportWarning, Warnings};
