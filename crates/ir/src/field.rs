//! Field definitions for entity properties
//!
//! This module contains the `Field` struct and related types for defining
//! the columns of an entity in the relmap design model.

use crate::naming::{is_valid_identifier, to_snake_case};
use relmap_core::{
    CanonicalType, EngineError, EngineResult, Identifiable, Named, Validatable, ValidationRule,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Field
// ============================================================================

/// Represents a field within an entity (maps to a database column)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Unique identifier for this field
    pub id: Uuid,

    /// Field name (camelCase, e.g., "firstName")
    pub name: String,

    /// Database column name (snake_case, e.g., "first_name")
    pub column_name: String,

    /// Canonical type of the field
    #[serde(rename = "type")]
    pub field_type: CanonicalType,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Whether the column carries a uniqueness constraint
    pub unique: bool,

    /// Validation rules, in derivation order
    #[serde(default)]
    pub validations: Vec<ValidationRule>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value for the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl Field {
    /// Create a new nullable field with the given name and type
    pub fn new(name: impl Into<String>, field_type: CanonicalType) -> Self {
        let name = name.into();
        let column_name = to_snake_case(&name);

        Self {
            id: Uuid::new_v4(),
            name,
            column_name,
            field_type,
            nullable: true,
            unique: false,
            validations: Vec::new(),
            description: None,
            default_value: None,
        }
    }

    /// Create the identifier field inserted when a schema declares none
    pub fn synthetic_id() -> Self {
        let mut field = Self::new("id", CanonicalType::Long);
        field.nullable = false;
        field.unique = true;
        field
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the field ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Mark the field as NOT NULL
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Set nullability explicitly
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Mark the field as unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Add a validation rule
    pub fn with_validation(mut self, validation: ValidationRule) -> Self {
        self.validations.push(validation);
        self
    }

    /// Replace all validation rules
    pub fn with_validations(mut self, validations: Vec<ValidationRule>) -> Self {
        self.validations = validations;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a default value
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default_value = Some(default);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Check if this is an identifier field (named `id`, any case)
    pub fn is_id(&self) -> bool {
        self.name.eq_ignore_ascii_case("id")
    }

    /// Check if the field must always carry a value
    pub fn is_required(&self) -> bool {
        !self.nullable
    }

    /// Check if a rule with the given name is attached
    pub fn has_validation(&self, rule_name: &str) -> bool {
        self.validations.iter().any(|v| v.name() == rule_name)
    }
}

impl Validatable for Field {
    fn validate(&self) -> EngineResult<()> {
        // Field name must not be empty
        if self.name.is_empty() {
            return Err(EngineError::validation("Field name cannot be empty"));
        }

        // Field name must be valid identifier
        if !is_valid_identifier(&self.name) {
            return Err(EngineError::validation(format!(
                "Field name '{}' is not a valid identifier",
                self.name
            )));
        }

        // Column name must not be empty
        if self.column_name.is_empty() {
            return Err(EngineError::validation("Column name cannot be empty"));
        }

        for rule in &self.validations {
            if let ValidationRule::Size { min, max } = rule {
                if min > max {
                    return Err(EngineError::validation(format!(
                        "Size rule on '{}' has min {} greater than max {}",
                        self.name, min, max
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Identifiable for Field {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Named for Field {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new("field", CanonicalType::String)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Field {}

impl std::hash::Hash for Field {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// DefaultValue
// ============================================================================

/// Default values for fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DefaultValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// Arrays and objects, kept as compact JSON text
    Json(String),
}

impl DefaultValue {
    /// Convert a schema `default` into a model default value
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => DefaultValue::Null,
            Value::Bool(b) => DefaultValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DefaultValue::Int(i),
                None => DefaultValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => DefaultValue::String(s.clone()),
            other => DefaultValue::Json(other.to_string()),
        }
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Null => write!(f, "NULL"),
            DefaultValue::Bool(v) => write!(f, "{}", v),
            DefaultValue::Int(v) => write!(f, "{}", v),
            DefaultValue::Float(v) => write!(f, "{}", v),
            DefaultValue::String(v) => write!(f, "\"{}\"", v),
            DefaultValue::Json(v) => write!(f, "{}", v),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_new() {
        let field = Field::new("firstName", CanonicalType::String);
        assert_eq!(field.name, "firstName");
        assert_eq!(field.column_name, "first_name");
        assert!(field.nullable);
        assert!(!field.unique);
        assert!(field.validations.is_empty());
    }

    #[test]
    fn test_synthetic_id() {
        let field = Field::synthetic_id();
        assert_eq!(field.name, "id");
        assert_eq!(field.field_type, CanonicalType::Long);
        assert!(!field.nullable);
        assert!(field.unique);
        assert!(field.is_id());
    }

    #[test]
    fn test_field_builder() {
        let field = Field::new("email", CanonicalType::String)
            .not_null()
            .with_validation(ValidationRule::NotNull)
            .with_validation(ValidationRule::Email)
            .with_description("Contact address");

        assert!(field.is_required());
        assert!(field.has_validation("Email"));
        assert!(!field.has_validation("NotBlank"));
        assert_eq!(field.description.as_deref(), Some("Contact address"));
    }

    #[test]
    fn test_field_validation() {
        assert!(Field::new("email", CanonicalType::String).validate().is_ok());

        let invalid = Field::new("", CanonicalType::String);
        assert!(invalid.validate().is_err());

        let bad_size = Field::new("code", CanonicalType::String)
            .with_validation(ValidationRule::Size { min: 10, max: 2 });
        assert!(bad_size.validate().is_err());
    }

    #[test]
    fn test_field_serializes_camel_case() {
        let field = Field::new("createdAt", CanonicalType::LocalDateTime).not_null();
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["columnName"], "created_at");
        assert_eq!(json["type"], "LocalDateTime");
        assert_eq!(json["nullable"], false);
        assert!(json.get("description").is_none());
        assert!(json.get("defaultValue").is_none());
    }

    #[test]
    fn test_default_value_from_json() {
        assert_eq!(DefaultValue::from_json(&json!(true)), DefaultValue::Bool(true));
        assert_eq!(DefaultValue::from_json(&json!(42)), DefaultValue::Int(42));
        assert_eq!(DefaultValue::from_json(&json!(1.5)), DefaultValue::Float(1.5));
        assert_eq!(
            DefaultValue::from_json(&json!("draft")),
            DefaultValue::String("draft".to_string())
        );
        assert_eq!(
            DefaultValue::from_json(&json!(["a", "b"])),
            DefaultValue::Json("[\"a\",\"b\"]".to_string())
        );
        assert_eq!(DefaultValue::from_json(&json!(null)), DefaultValue::Null);
    }
}
