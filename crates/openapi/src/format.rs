//! Document format detection

use relmap_core::DocumentFormat;

/// Markers that only open a YAML document
const YAML_PREFIXES: &[&str] = &["---", "#", "openapi:", "swagger:"];

/// Classify raw text as JSON or YAML.
///
/// Never fails: anything that is not recognizably JSON is treated as YAML.
pub fn detect_format(text: &str) -> DocumentFormat {
    let trimmed = text.trim_start();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return DocumentFormat::Json;
    }

    if YAML_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        return DocumentFormat::Yaml;
    }

    // Bare scalars such as `42` or `"text"` are still valid JSON
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(_) => DocumentFormat::Json,
        Err(_) => DocumentFormat::Yaml,
    }
}

// ============================================================================
// Tests
// ============================================================================
