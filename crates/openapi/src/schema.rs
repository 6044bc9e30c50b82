//! Entity schema classification
//!
//! Decides which named schemas describe persistent entities. A schema is an
//! entity when it is object-typed (or untyped), has at least one property
//! once its `allOf` members are merged in, and its name does not look like a
//! transport type (`OrderResponse`, `PaginatedUsers`, `ApiError`, ...).
//!
//! The name filter is a heuristic with no user override.

use crate::property::{declared_type, ref_target};
use crate::warnings::{ImportWarning, Warnings};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Names that denote requests, responses, wrappers, and other non-entities
static NON_ENTITY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:paginated.*|.*(?:request|response|dto|input|output|payload|error|exception|page|pageable|list|collection|wrapper|envelope|result|apiresponse|link|links|meta|metadata))$",
    )
    .expect("invalid regex")
});

/// Check if a schema name matches the non-entity name patterns
pub fn is_non_entity_name(name: &str) -> bool {
    NON_ENTITY_NAME.is_match(name)
}

// ============================================================================
// EntitySchema
// ============================================================================

/// A schema accepted as an entity, with `allOf` members merged
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    /// Schema name as written in the document
    pub name: String,

    /// Properties in source order
    pub properties: IndexMap<String, Value>,

    /// Names listed under `required`
    pub required: Vec<String>,

    /// Schema-level description
    pub description: Option<String>,
}

impl EntitySchema {
    /// Check if a property is required
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }

    /// Get a property by name
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Why a schema was not accepted as an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// `type` is present and is not `object`
    NotObject(String),
    /// No properties after merging `allOf`
    NoProperties,
    /// The name matches a non-entity pattern
    NonEntityName,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotObject(ty) => write!(f, "type is '{}', not 'object'", ty),
            Rejection::NoProperties => write!(f, "no properties"),
            Rejection::NonEntityName => write!(f, "name matches a non-entity pattern"),
        }
    }
}

/// Classify one schema against the full schema map
///
/// Warnings from `allOf` flattening are only returned for accepted schemas.
pub fn classify_schema(
    name: &str,
    schema: &Value,
    schemas: &IndexMap<String, Value>,
) -> Result<(EntitySchema, Warnings), Rejection> {
    if let (Some(ty), _) = declared_type(schema) {
        if ty != "object" {
            return Err(Rejection::NotObject(ty.to_string()));
        }
    }

    let mut flattened = Flattened::default();
    let mut visited = HashSet::from([name.to_string()]);
    flattened.merge(name, schema, schemas, &mut visited);

    if flattened.properties.is_empty() {
        return Err(Rejection::NoProperties);
    }

    if is_non_entity_name(name) {
        return Err(Rejection::NonEntityName);
    }

    let description = schema
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok((
        EntitySchema {
            name: name.to_string(),
            properties: flattened.properties,
            required: flattened.required,
            description,
        },
        flattened.warnings,
    ))
}

/// Filter a schema map down to its entity schemas, keeping source order
pub fn classify_schemas(schemas: &IndexMap<String, Value>) -> (Vec<EntitySchema>, Warnings) {
    let mut entities = Vec::new();
    let mut warnings = Warnings::new();

    for (name, schema) in schemas {
        match classify_schema(name, schema, schemas) {
            Ok((entity, flatten_warnings)) => {
                warnings.extend(flatten_warnings);
                entities.push(entity);
            }
            Err(reason) => tracing::debug!("Skipping schema '{}': {}", name, reason),
        }
    }

    if entities.is_empty() && !schemas.is_empty() {
        warnings.push(ImportWarning::NoEntities {
            schema_count: schemas.len(),
        });
    }

    tracing::debug!(
        "Classified {} of {} schema(s) as entities: {:?}",
        entities.len(),
        schemas.len(),
        entities.iter().map(|e| e.name.as_str()).collect::<Vec<_>>()
    );

    (entities, warnings)
}

// ============================================================================
// allOf Flattening
// ============================================================================

#[derive(Default)]
struct Flattened {
    properties: IndexMap<String, Value>,
    required: Vec<String>,
    warnings: Warnings,
}

impl Flattened {
    /// Merge `allOf` members first, then the schema's own keywords
    fn merge(
        &mut self,
        owner: &str,
        schema: &Value,
        schemas: &IndexMap<String, Value>,
        visited: &mut HashSet<String>,
    ) {
        if let Some(members) = schema.get("allOf").and_then(Value::as_array) {
            for member in members {
                match member.get("$ref").and_then(Value::as_str) {
                    Some(reference) => {
                        let target = ref_target(reference);
                        if !visited.insert(target.clone()) {
                            continue;
                        }
                        match schemas.get(&target) {
                            Some(resolved) => self.merge(owner, resolved, schemas, visited),
                            None => self.warnings.push(ImportWarning::UnresolvedComposition {
                                schema: owner.to_string(),
                                reference: target,
                            }),
                        }
                    }
                    None => self.merge(owner, member, schemas, visited),
                }
            }
        }

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (key, value) in properties {
                self.properties.insert(key.clone(), value.clone());
            }
        }

        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if !self.required.iter().any(|r| r == name) {
                    self.required.push(name.to_string());
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
