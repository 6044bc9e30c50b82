//! # relmap IR (Intermediate Representation)
//!
//! This crate provides the design model produced by a schema import: the
//! entities, their fields, and the relations between them.
//!
//! ## Core Concepts
//!
//! - **Entity**: A persistent record type that maps to a database table
//! - **Field**: A property of an entity that maps to a column
//! - **Relation**: An inferred association between two entities with a
//!   cardinality, a foreign key, and for many-to-many a join table
//! - **DesignModel**: The root container holding entities, relations, and
//!   import warnings
//!

// Module declarations
pub mod entity;
pub mod field;
pub mod model;
pub mod naming;
pub mod relationship;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use entity::{Entity, EntityConfig};
pub use field::{DefaultValue, Field};
pub use model::DesignModel;
pub use relationship::{ForeignKey, JoinTable, Relation};
pub use serialization::{ModelFile, from_json_str, load_model, save_model, to_json_string};
pub use validation::{ModelCheck, ModelValidator, ValidationError, ValidationResult};

// Re-export core types that are commonly used with IR
pub use relmap_core::{
    CanonicalType, Cardinality, CascadeType, EngineError, EngineResult, FetchType, Position,
    ReferentialAction, ValidationRule,
};

/// Current schema version for model files
pub const MODEL_SCHEMA_VERSION: u32 = 1;

/// File extension for model files
pub const MODEL_FILE_EXTENSION: &str = "relmap.json";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        // Re-exported from core
        CanonicalType,
        Cardinality,
        // Model types
        DesignModel,
        EngineError,
        EngineResult,
        Entity,
        EntityConfig,
        Field,
        ForeignKey,
        JoinTable,
        Position,
        Relation,
        ValidationRule,
    };
}
