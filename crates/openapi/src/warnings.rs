//! Non-fatal import diagnostics
//!
//! Every stage returns its output together with a `Warnings` value; the
//! caller appends it to its own list. Nothing is global and nothing is
//! thrown, so an import can run on any thread without coordination.

use std::fmt;

// ============================================================================
// ImportWarning
// ============================================================================

/// A diagnostic raised while importing a schema document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// Neither `components.schemas` nor `definitions` holds any schema
    SchemaAbsent,

    /// Schemas exist but none of them is entity-shaped
    NoEntities { schema_count: usize },

    /// No `openapi` or `swagger` version field
    MissingVersion,

    /// A version field whose value is not a known specification version
    UnrecognizedVersion(String),

    /// A reference whose target is not an entity schema
    UnresolvedReference {
        target: String,
        source: String,
        field: String,
    },

    /// An array property whose items are not references
    PrimitiveArrayOmitted { entity: String, field: String },

    /// A `oneOf` / `anyOf` property
    PolymorphicOmitted { entity: String, field: String },

    /// An `allOf` member pointing at a schema that does not exist
    UnresolvedComposition { schema: String, reference: String },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::SchemaAbsent => write!(
                f,
                "No schemas found: expected 'components.schemas' (OpenAPI 3) or 'definitions' (Swagger 2)"
            ),
            ImportWarning::NoEntities { schema_count } => write!(
                f,
                "No entity schemas found: all {} schema(s) were filtered out as non-entities",
                schema_count
            ),
            ImportWarning::MissingVersion => {
                write!(f, "Missing 'openapi' or 'swagger' version field")
            }
            ImportWarning::UnrecognizedVersion(version) => {
                write!(f, "Unrecognized specification version '{}'", version)
            }
            ImportWarning::UnresolvedReference {
                target,
                source,
                field,
            } => write!(
                f,
                "Unresolved reference to schema '{}' from {}.{}; relation omitted",
                target, source, field
            ),
            ImportWarning::PrimitiveArrayOmitted { entity, field } => write!(
                f,
                "array of primitives omitted for field {} on {}",
                field, entity
            ),
            ImportWarning::PolymorphicOmitted { entity, field } => write!(
                f,
                "polymorphic property (oneOf/anyOf) omitted for field {} on {}",
                field, entity
            ),
            ImportWarning::UnresolvedComposition { schema, reference } => write!(
                f,
                "allOf member '{}' of schema '{}' could not be resolved",
                reference, schema
            ),
        }
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Ordered accumulator of import warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<ImportWarning>);

impl Warnings {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn push(&mut self, warning: ImportWarning) {
        tracing::warn!("{}", warning);
        self.0.push(warning);
    }

    /// Append the warnings of a later stage
    pub fn extend(&mut self, other: Warnings) {
        self.0.extend(other.0);
    }

    /// Number of recorded warnings
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no warning was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the warnings in the order they were raised
    pub fn iter(&self) -> impl Iterator<Item = &ImportWarning> {
        self.0.iter()
    }

    /// Render every warning as a message
    pub fn into_messages(self) -> Vec<String> {
        self.0.iter().map(|w| w.to_string()).collect()
    }
}

impl From<ImportWarning> for Warnings {
    fn from(warning: ImportWarning) -> Self {
        let mut warnings = Warnings::new();
        warnings.push(warning);
        warnings
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_keep_order() {
        let mut first = Warnings::new();
        first.push(ImportWarning::MissingVersion);

        let mut second = Warnings::new();
        second.push(ImportWarning::SchemaAbsent);

        first.extend(second);
        assert_eq!(first.len(), 2);
        assert_eq!(
            first.iter().collect::<Vec<_>>(),
            vec![&ImportWarning::MissingVersion, &ImportWarning::SchemaAbsent]
        );
    }

    #[test]
    fn test_unresolved_reference_message() {
        let warning = ImportWarning::UnresolvedReference {
            target: "NonExistentSchema".to_string(),
            source: "Order".to_string(),
            field: "customer".to_string(),
        };
        let message = warning.to_string();
        assert!(message.contains("NonExistentSchema"));
        assert!(message.contains("Order.customer"));
    }

    #[test]
    fn test_primitive_array_message() {
        let warning = ImportWarning::PrimitiveArrayOmitted {
            entity: "Pet".to_string(),
            field: "tags".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "array of primitives omitted for field tags on Pet"
        );
    }

    #[test]
    fn test_into_messages() {
        let warnings = Warnings::from(ImportWarning::UnrecognizedVersion("4.0".to_string()));
        assert_eq!(
            warnings.into_messages(),
            vec!["Unrecognized specification version '4.0'".to_string()]
        );
    }
}
