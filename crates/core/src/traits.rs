//! Core traits for relmap
//!
//! This module defines the small set of behaviours shared by every element
//! of the design model: self-validation, identity, and naming.

use crate::error::EngineResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// A model element that can check its own invariants
///
/// # Example
///
/// ```rust,ignore
/// use relmap_core::{EngineError, EngineResult, Validatable};
///
/// struct Column {
///     name: String,
/// }
///
/// impl Validatable for Column {
///     fn validate(&self) -> EngineResult<()> {
///         if self.name.is_empty() {
///             return Err(EngineError::validation("Column name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Return the first violated invariant as an `EngineError`
    fn validate(&self) -> EngineResult<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Identity Traits
// ============================================================================

/// Trait for items that have a unique identifier
pub trait Identifiable {
    /// Get the unique identifier
    fn id(&self) -> uuid::Uuid;

    /// Check if this item has the given ID
    fn matches_id(&self, id: uuid::Uuid) -> bool {
        self.id() == id
    }
}

/// Trait for items that have a name
pub trait Named {
    /// Get the name
    fn name(&self) -> &str;

    /// Check if the name matches (case-insensitive)
    fn name_matches(&self, other: &str) -> bool {
        self.name().eq_ignore_ascii_case(other)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    struct Column {
        id: uuid::Uuid,
        name: String,
    }

    impl Validatable for Column {
        fn validate(&self) -> EngineResult<()> {
            if self.name.is_empty() {
                return Err(EngineError::validation("Column name cannot be empty"));
            }
            Ok(())
        }
    }

    impl Identifiable for Column {
        fn id(&self) -> uuid::Uuid {
            self.id
        }
    }

    impl Named for Column {
        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_validatable_trait() {
        let valid = Column {
            id: uuid::Uuid::nil(),
            name: "email".to_string(),
        };
        assert!(valid.is_valid());

        let invalid = Column {
            id: uuid::Uuid::nil(),
            name: String::new(),
        };
        assert!(!invalid.is_valid());
        assert!(invalid.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_identity_traits() {
        let column = Column {
            id: uuid::Uuid::nil(),
            name: "Email".to_string(),
        };
        assert!(column.matches_id(uuid::Uuid::nil()));
        assert!(column.name_matches("email"));
        assert!(!column.name_matches("name"));
    }
}
