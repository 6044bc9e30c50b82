//! # relmap Core
//!
//! Core types, traits, and error handling for relmap.
//!
//! This crate provides the shared vocabulary used throughout the workspace:
//!
//! - **Types**: canonical field types, cardinalities, referential actions,
//!   validation rules, canvas positions, document formats
//! - **Traits**: common behaviours like `Validatable`, `Identifiable`, `Named`
//! - **Errors**: unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use traits::{Identifiable, Named, Validatable};
pub use types::{
    CanonicalType, Cardinality, CascadeType, DocumentFormat, FetchType, Position, ReferentialAction,
    ValidationRule, format_number,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
