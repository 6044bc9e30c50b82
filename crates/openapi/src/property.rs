//! Property shape classification
//!
//! Every schema property falls into exactly one `PropertyShape`. The field
//! builder and the reference extractor both match on it exhaustively, so a
//! property is either a column, a relation edge, or an explicit omission.

use serde_json::Value;

// ============================================================================
// PropertyShape
// ============================================================================

/// The structural shape of a schema property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyShape {
    /// A primitive value that becomes a field
    Scalar(ScalarType),

    /// A direct `$ref` to another schema
    Reference { target: String },

    /// An array whose items are a `$ref`
    ReferenceArray { target: String },

    /// An array whose items are not references
    PrimitiveArray,

    /// A `oneOf` / `anyOf` / multi-member `allOf` composition
    Composite,
}

/// Declared type of a scalar property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarType {
    /// First non-`null` entry of `type`
    pub ty: Option<String>,

    /// The `format` keyword
    pub format: Option<String>,

    /// `type` lists `"null"` (OpenAPI 3.1)
    pub null_allowed: bool,
}

impl ScalarType {
    /// Check if the declared type is `string`
    pub fn is_string(&self) -> bool {
        self.ty.as_deref() == Some("string")
    }
}

impl PropertyShape {
    /// Classify a property schema
    pub fn classify(property: &Value) -> Self {
        if let Some(target) = reference_of(property) {
            return PropertyShape::Reference { target };
        }

        if is_composite(property) {
            return PropertyShape::Composite;
        }

        let (ty, null_allowed) = declared_type(property);
        let items = property.get("items");

        if ty == Some("array") || (ty.is_none() && items.is_some()) {
            return match items.and_then(reference_of) {
                Some(target) => PropertyShape::ReferenceArray { target },
                None => PropertyShape::PrimitiveArray,
            };
        }

        PropertyShape::Scalar(ScalarType {
            ty: ty.map(str::to_string),
            format: property
                .get("format")
                .and_then(Value::as_str)
                .map(str::to_string),
            null_allowed,
        })
    }

    /// Reference target and array flag, for the two reference shapes
    pub fn reference_target(&self) -> Option<(&str, bool)> {
        match self {
            PropertyShape::Reference { target } => Some((target, false)),
            PropertyShape::ReferenceArray { target } => Some((target, true)),
            _ => None,
        }
    }

    /// Check if the property is a reference or an array of references
    pub fn is_reference(&self) -> bool {
        self.reference_target().is_some()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Target of a `$ref`, or of a single-member `allOf` wrapping one
pub fn reference_of(value: &Value) -> Option<String> {
    if let Some(reference) = value.get("$ref").and_then(Value::as_str) {
        return Some(ref_target(reference));
    }

    match value.get("allOf").and_then(Value::as_array).map(Vec::as_slice) {
        Some([only]) => only
            .get("$ref")
            .and_then(Value::as_str)
            .map(ref_target),
        _ => None,
    }
}

/// Schema name a reference points at.
///
/// Local references (`#/components/schemas/Pet`, `#/definitions/Pet`) yield
/// their last pointer segment. External references are kept verbatim so
/// they never match a local schema.
pub fn ref_target(reference: &str) -> String {
    match reference.strip_prefix("#/") {
        Some(pointer) => pointer
            .rsplit('/')
            .next()
            .unwrap_or(pointer)
            .replace("~1", "/")
            .replace("~0", "~"),
        None => reference.to_string(),
    }
}

/// Declared `type`, accepting the OpenAPI 3.1 array form.
///
/// Returns the first non-`null` type and whether `null` was listed.
pub fn declared_type(value: &Value) -> (Option<&str>, bool) {
    match value.get("type") {
        Some(Value::String(ty)) => (Some(ty.as_str()), false),
        Some(Value::Array(types)) => {
            let names: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
            let first = names.iter().copied().find(|t| *t != "null");
            (first, names.contains(&"null"))
        }
        _ => (None, false),
    }
}

fn is_composite(value: &Value) -> bool {
    value.get("oneOf").is_some()
        || value.get("anyOf").is_some()
        || value
            .get("allOf")
            .and_then(Value::as_array)
            .is_some_and(|members| members.len() > 1)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_reference() {
        let shape = PropertyShape::classify(&json!({"$ref": "#/components/schemas/Author"}));
        assert_eq!(
            shape,
            PropertyShape::Reference {
                target: "Author".to_string()
            }
        );
        assert_eq!(shape.reference_target(), Some(("Author", false)));
    }

    #[test]
    fn test_classify_wrapped_reference() {
        let shape = PropertyShape::classify(&json!({
            "allOf": [{"$ref": "#/definitions/Author"}],
            "nullable": true
        }));
        assert_eq!(shape.reference_target(), Some(("Author", false)));
    }

    #[test]
    fn test_classify_reference_array() {
        let shape = PropertyShape::classify(&json!({
            "type": "array",
            "items": {"$ref": "#/components/schemas/Post"}
        }));
        assert_eq!(shape.reference_target(), Some(("Post", true)));
    }

    #[test]
    fn test_classify_primitive_array() {
        let shape = PropertyShape::classify(&json!({
            "type": "array",
            "items": {"type": "string"}
        }));
        assert_eq!(shape, PropertyShape::PrimitiveArray);
        assert!(!shape.is_reference());
    }

    #[test]
    fn test_classify_composite() {
        let one_of = json!({"oneOf": [{"$ref": "#/components/schemas/Cat"}, {"$ref": "#/components/schemas/Dog"}]});
        assert_eq!(PropertyShape::classify(&one_of), PropertyShape::Composite);

        let all_of = json!({"allOf": [{"$ref": "#/components/schemas/A"}, {"type": "object"}]});
        assert_eq!(PropertyShape::classify(&all_of), PropertyShape::Composite);
    }

    #[test]
    fn test_classify_scalar_with_type_array() {
        let shape = PropertyShape::classify(&json!({
            "type": ["null", "string"],
            "format": "email"
        }));
        assert_eq!(
            shape,
            PropertyShape::Scalar(ScalarType {
                ty: Some("string".to_string()),
                format: Some("email".to_string()),
                null_allowed: true,
            })
        );
    }

    #[test]
    fn test_ref_target() {
        assert_eq!(ref_target("#/components/schemas/Pet"), "Pet");
        assert_eq!(ref_target("#/definitions/Pet"), "Pet");
        assert_eq!(ref_target("#/definitions/a~1b"), "a/b");
        assert_eq!(ref_target("common.yaml#/Pet"), "common.yaml#/Pet");
    }
}
