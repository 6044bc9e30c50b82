//! Reference edge extraction
//!
//! Every `$ref` property of an entity schema becomes a directed edge from the
//! schema to the referenced schema name. Edges are raw material for the
//! relation resolver; nothing here checks whether the target exists.

use crate::property::PropertyShape;
use crate::schema::EntitySchema;
use crate::warnings::{ImportWarning, Warnings};

// ============================================================================
// ReferenceEdge
// ============================================================================

/// A property of one schema pointing at another schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEdge {
    /// Schema owning the property
    pub source: String,

    /// Property key
    pub field: String,

    /// Referenced schema name
    pub target: String,

    /// The property is an array of references
    pub is_array: bool,

    /// The property is listed under `required`
    pub required: bool,
}

/// A property on a target schema pointing back at the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackReference {
    /// Property key on the target schema
    pub field: String,

    /// The property is an array of references
    pub is_array: bool,
}

// ============================================================================
// Extraction
// ============================================================================

/// Extract reference edges from an entity schema, in property order.
///
/// Arrays whose items are not references are reported and dropped.
pub fn extract_references(schema: &EntitySchema) -> (Vec<ReferenceEdge>, Warnings) {
    let mut edges = Vec::new();
    let mut warnings = Warnings::new();

    for (key, property) in &schema.properties {
        match PropertyShape::classify(property) {
            PropertyShape::Reference { target } => edges.push(ReferenceEdge {
                source: schema.name.clone(),
                field: key.clone(),
                target,
                is_array: false,
                required: schema.is_required(key),
            }),
            PropertyShape::ReferenceArray { target } => edges.push(ReferenceEdge {
                source: schema.name.clone(),
                field: key.clone(),
                target,
                is_array: true,
                required: schema.is_required(key),
            }),
            PropertyShape::PrimitiveArray => {
                warnings.push(ImportWarning::PrimitiveArrayOmitted {
                    entity: schema.name.clone(),
                    field: key.clone(),
                });
            }
            PropertyShape::Scalar(_) | PropertyShape::Composite => {}
        }
    }

    (edges, warnings)
}

/// Find the first property of `target` referencing `source`.
///
/// `exclude` names a property to ignore; for a self-reference this is the
/// forward property itself, which would otherwise match.
pub fn find_back_reference(
    target: &EntitySchema,
    source: &str,
    exclude: Option<&str>,
) -> Option<BackReference> {
    target
        .properties
        .iter()
        .filter(|(key, _)| Some(key.as_str()) != exclude)
        .find_map(|(key, property)| {
            let shape = PropertyShape::classify(property);
            let (name, is_array) = shape.reference_target()?;
            (name == source).then(|| BackReference {
                field: key.clone(),
                is_array,
            })
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn schema(name: &str, properties: Value, required: &[&str]) -> EntitySchema {
        EntitySchema {
            name: name.to_string(),
            properties: properties
                .as_object()
                .unwrap()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<IndexMap<_, _>>(),
            required: required.iter().map(|r| r.to_string()).collect(),
            description: None,
        }
    }

    #[test]
    fn test_extract_references() {
        let author = schema(
            "Author",
            json!({
                "name": {"type": "string"},
                "posts": {"type": "array", "items": {"$ref": "#/components/schemas/Post"}},
                "mentor": {"$ref": "#/components/schemas/Author"},
                "aliases": {"type": "array", "items": {"type": "string"}}
            }),
            &["mentor"],
        );

        let (edges, warnings) = extract_references(&author);
        assert_eq!(
            edges,
            vec![
                ReferenceEdge {
                    source: "Author".to_string(),
                    field: "posts".to_string(),
                    target: "Post".to_string(),
                    is_array: true,
                    required: false,
                },
                ReferenceEdge {
                    source: "Author".to_string(),
                    field: "mentor".to_string(),
                    target: "Author".to_string(),
                    is_array: false,
                    required: true,
                },
            ]
        );
        assert_eq!(
            warnings.into_messages(),
            vec!["array of primitives omitted for field aliases on Author".to_string()]
        );
    }

    #[test]
    fn test_find_back_reference() {
        let author = schema(
            "Author",
            json!({"posts": {"type": "array", "items": {"$ref": "#/components/schemas/Post"}}}),
            &[],
        );

        assert_eq!(
            find_back_reference(&author, "Post", None),
            Some(BackReference {
                field: "posts".to_string(),
                is_array: true
            })
        );
        assert_eq!(find_back_reference(&author, "Comment", None), None);
    }

    #[test]
    fn test_back_reference_excludes_forward_property() {
        let employee = schema(
            "Employee",
            json!({"manager": {"$ref": "#/components/schemas/Employee"}}),
            &[],
        );
        assert_eq!(find_back_reference(&employee, "Employee", Some("manager")), None);

        let with_reports = schema(
            "Employee",
            json!({
                "manager": {"$ref": "#/components/schemas/Employee"},
                "reports": {"type": "array", "items": {"$ref": "#/components/schemas/Employee"}}
            }),
            &[],
        );
        assert_eq!(
            find_back_reference(&with_reports, "Employee", Some("manager")),
            Some(BackReference {
                field: "reports".to_string(),
                is_array: true
            })
        );
    }
}
