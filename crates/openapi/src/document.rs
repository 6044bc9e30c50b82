//! Document decoding and schema map normalization
//!
//! Text is decoded into a `serde_json::Value` tree. JSON goes straight
//! through `serde_json`; YAML is decoded with `serde_yaml` and converted
//! node by node, because OpenAPI YAML routinely carries non-string mapping
//! keys (`200:` response codes) that `serde_json` maps cannot hold.
//!
//! Both decoders keep mapping keys in source order (`serde_json` is built
//! with `preserve_order`, `serde_yaml::Mapping` is insertion ordered), and
//! the schema map is an `IndexMap`, so iteration order always follows the
//! document.

use crate::format::detect_format;
use crate::warnings::{ImportWarning, Warnings};
use indexmap::IndexMap;
use relmap_core::{DocumentFormat, EngineError, EngineResult};
use serde_json::{Map, Number, Value};
use std::fmt;

// ============================================================================
// SpecVersion
// ============================================================================

/// Specification version declared by a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecVersion {
    /// `swagger: "2.0"`
    Swagger2,
    /// `openapi: "3.x.y"`
    OpenApi3 { minor: u32 },
    /// A version field with an unrecognized value
    Unknown(String),
}

impl SpecVersion {
    /// Read the version from the `openapi` / `swagger` field of a document root
    ///
    /// Returns `None` when neither field is present.
    pub fn detect(root: &Value) -> Option<Self> {
        if let Some(raw) = root.get("openapi").and_then(version_string) {
            let mut parts = raw.split('.');
            return Some(match (parts.next(), parts.next()) {
                (Some("3"), minor) => SpecVersion::OpenApi3 {
                    minor: minor.and_then(|m| m.parse().ok()).unwrap_or(0),
                },
                _ => SpecVersion::Unknown(raw),
            });
        }

        if let Some(raw) = root.get("swagger").and_then(version_string) {
            return Some(if raw == "2" || raw.starts_with("2.") {
                SpecVersion::Swagger2
            } else {
                SpecVersion::Unknown(raw)
            });
        }

        None
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::Swagger2 => write!(f, "Swagger 2.0"),
            SpecVersion::OpenApi3 { minor } => write!(f, "OpenAPI 3.{}", minor),
            SpecVersion::Unknown(raw) => write!(f, "unknown ({})", raw),
        }
    }
}

/// YAML writes `openapi: 3.0` as a number
fn version_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// OpenApiDocument
// ============================================================================

/// A decoded schema document
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    /// The full document tree
    pub root: Value,

    /// Format the text was decoded as
    pub format: DocumentFormat,

    /// Declared specification version
    pub version: Option<SpecVersion>,

    /// Schemas keyed by name, in source order
    pub schemas: IndexMap<String, Value>,
}

impl OpenApiDocument {
    /// Build a document from an already decoded tree
    pub fn from_value(root: Value, format: DocumentFormat) -> EngineResult<Self> {
        if !root.is_object() {
            return Err(EngineError::format(
                format,
                "expected a mapping at the document root",
            ));
        }

        let version = SpecVersion::detect(&root);
        let schemas = extract_schemas(&root);

        Ok(Self {
            root,
            format,
            version,
            schemas,
        })
    }

    /// Check if the document has an `info` section
    pub fn has_info(&self) -> bool {
        self.root.get("info").is_some_and(Value::is_object)
    }

    /// Check if the document holds at least one schema
    pub fn has_schemas(&self) -> bool {
        !self.schemas.is_empty()
    }

    /// Get a schema by name
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Warnings about the document shape: a missing or unrecognized version,
    /// and an absent schema map
    pub fn document_warnings(&self) -> Warnings {
        let mut warnings = Warnings::new();
        match &self.version {
            None => warnings.push(ImportWarning::MissingVersion),
            Some(SpecVersion::Unknown(raw)) => {
                warnings.push(ImportWarning::UnrecognizedVersion(raw.clone()))
            }
            Some(version) => tracing::debug!("Detected {}", version),
        }

        if self.schemas.is_empty() {
            warnings.push(ImportWarning::SchemaAbsent);
        } else {
            tracing::debug!("Found {} schema(s)", self.schemas.len());
        }
        warnings
    }
}

/// Decode text and normalize its schema map.
///
/// The format is detected when `format` is `None`. Syntax errors are fatal;
/// a missing version or schema map only produces warnings.
pub fn parse_document(
    text: &str,
    format: Option<DocumentFormat>,
) -> EngineResult<(OpenApiDocument, Warnings)> {
    let format = format.unwrap_or_else(|| detect_format(text));
    tracing::debug!("Decoding document as {}", format);

    let root = decode(text, format)?;
    let document = OpenApiDocument::from_value(root, format)?;

    let warnings = document.document_warnings();
    Ok((document, warnings))
}

/// Decode text in the given format into a JSON tree
pub fn decode(text: &str, format: DocumentFormat) -> EngineResult<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| EngineError::format(format, e.to_string()))
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(text)
                .map_err(|e| EngineError::format(format, e.to_string()))?;
            Ok(yaml_to_json(yaml))
        }
    }
}

/// Collect `components.schemas` (OpenAPI 3) or `definitions` (Swagger 2)
fn extract_schemas(root: &Value) -> IndexMap<String, Value> {
    let map = root
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
        .or_else(|| root.get("definitions").and_then(Value::as_object));

    map.map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

// ============================================================================
// YAML Conversion
// ============================================================================

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_json::to_string(&yaml_to_json(other)).unwrap_or_default(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PETSTORE_YAML: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
paths:
  /pets:
    get:
      responses:
        200:
          description: ok
components:
  schemas:
    Zebra:
      type: object
      properties:
        name: { type: string }
    Apple:
      type: object
      properties:
        name: { type: string }
    Mango:
      type: object
      properties:
        name: { type: string }
"#;

    #[test]
    fn test_yaml_schema_order_preserved() {
        let (doc, warnings) = parse_document(PETSTORE_YAML, None).unwrap();
        assert_eq!(doc.format, DocumentFormat::Yaml);
        assert_eq!(doc.version, Some(SpecVersion::OpenApi3 { minor: 0 }));
        assert!(warnings.is_empty());
        assert_eq!(
            doc.schemas.keys().collect::<Vec<_>>(),
            vec!["Zebra", "Apple", "Mango"]
        );
    }

    #[test]
    fn test_yaml_numeric_keys_become_strings() {
        let (doc, _) = parse_document(PETSTORE_YAML, None).unwrap();
        let ok = &doc.root["paths"]["/pets"]["get"]["responses"]["200"];
        assert_eq!(ok["description"], "ok");
    }

    #[test]
    fn test_json_schema_order_preserved() {
        let text = r#"{
            "swagger": "2.0",
            "info": {"title": "x"},
            "definitions": {
                "Zebra": {"properties": {"a": {"type": "string"}}},
                "Apple": {"properties": {"a": {"type": "string"}}}
            }
        }"#;
        let (doc, warnings) = parse_document(text, None).unwrap();
        assert_eq!(doc.format, DocumentFormat::Json);
        assert_eq!(doc.version, Some(SpecVersion::Swagger2));
        assert!(warnings.is_empty());
        assert_eq!(doc.schemas.keys().collect::<Vec<_>>(), vec!["Zebra", "Apple"]);
    }

    #[test]
    fn test_invalid_json_is_format_error() {
        let err = parse_document("{\"openapi\": ", None).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().starts_with("Invalid JSON document"));
    }

    #[test]
    fn test_invalid_yaml_is_format_error() {
        let err = parse_document("openapi: [unclosed", None).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().starts_with("Invalid YAML document"));
    }

    #[test]
    fn test_scalar_root_is_format_error() {
        let err = parse_document("just some words", None).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_explicit_format_skips_detection() {
        // Valid YAML flow mapping, also valid JSON
        let (doc, _) = parse_document("{\"openapi\": \"3.1.0\"}", Some(DocumentFormat::Yaml)).unwrap();
        assert_eq!(doc.format, DocumentFormat::Yaml);
        assert_eq!(doc.version, Some(SpecVersion::OpenApi3 { minor: 1 }));
    }

    #[test]
    fn test_missing_schemas_and_version_warn() {
        let (doc, warnings) = parse_document("{\"info\": {}}", None).unwrap();
        assert!(!doc.has_schemas());
        assert!(doc.has_info());
        let all: Vec<_> = warnings.iter().cloned().collect();
        assert_eq!(
            all,
            vec![ImportWarning::MissingVersion, ImportWarning::SchemaAbsent]
        );
    }

    #[test]
    fn test_document_warnings_from_value() {
        let root = serde_json::json!({"swagger": "9.9", "definitions": {}});
        let doc = OpenApiDocument::from_value(root, DocumentFormat::Json).unwrap();
        let all: Vec<_> = doc.document_warnings().iter().cloned().collect();
        assert_eq!(
            all,
            vec![
                ImportWarning::UnrecognizedVersion("9.9".to_string()),
                ImportWarning::SchemaAbsent
            ]
        );
    }

    #[test]
    fn test_spec_version_detect() {
        let v = |text: &str| SpecVersion::detect(&decode(text, DocumentFormat::Yaml).unwrap());
        assert_eq!(v("openapi: 3.0"), Some(SpecVersion::OpenApi3 { minor: 0 }));
        assert_eq!(v("openapi: '3.1.0'"), Some(SpecVersion::OpenApi3 { minor: 1 }));
        assert_eq!(v("swagger: '2.0'"), Some(SpecVersion::Swagger2));
        assert_eq!(
            v("openapi: '4.0.0'"),
            Some(SpecVersion::Unknown("4.0.0".to_string()))
        );
        assert_eq!(v("info: {}"), None);
    }
}
