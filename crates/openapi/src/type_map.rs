//! Primitive type mapping
//!
//! OpenAPI describes a value with a `type` and an optional `format`. The pair
//! is looked up as `"type:format"`, then as `"type:"`, and anything still
//! unknown becomes `String`.

use relmap_core::CanonicalType;

/// `type:format` to canonical type
const TYPE_TABLE: &[(&str, CanonicalType)] = &[
    ("string:", CanonicalType::String),
    ("string:date", CanonicalType::LocalDate),
    ("string:date-time", CanonicalType::LocalDateTime),
    ("string:time", CanonicalType::LocalTime),
    ("string:uuid", CanonicalType::Uuid),
    ("string:byte", CanonicalType::ByteArray),
    ("string:binary", CanonicalType::ByteArray),
    ("string:email", CanonicalType::String),
    ("string:password", CanonicalType::String),
    ("integer:", CanonicalType::Integer),
    ("integer:int32", CanonicalType::Integer),
    ("integer:int64", CanonicalType::Long),
    ("number:", CanonicalType::Double),
    ("number:double", CanonicalType::Double),
    ("number:float", CanonicalType::Float),
    ("boolean:", CanonicalType::Boolean),
];

fn lookup(key: &str) -> Option<CanonicalType> {
    TYPE_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, ty)| *ty)
}

/// Map an OpenAPI `type` / `format` pair to a canonical field type
pub fn map_type(ty: &str, format: Option<&str>) -> CanonicalType {
    format
        .and_then(|f| lookup(&format!("{}:{}", ty, f)))
        .or_else(|| lookup(&format!("{}:", ty)))
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
