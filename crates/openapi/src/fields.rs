//! Entity and field construction
//!
//! Turns an `EntitySchema` into an `Entity`. Scalar properties become
//! fields with validation rules derived from their constraints; reference
//! properties are left to the reference extractor. Every entity ends up with
//! an `id` field, synthesized when the schema declares none.

use crate::options::ImportOptions;
use crate::property::{PropertyShape, ScalarType};
use crate::schema::EntitySchema;
use crate::type_map::map_type;
use crate::warnings::{ImportWarning, Warnings};
use relmap_core::ValidationRule;
use relmap_ir::naming::{generate_table_name, sanitize_entity_name, sanitize_field_name};
use relmap_ir::{DefaultValue, Entity, Field};
use serde_json::Value;

/// Default upper bound of `Size` when only `minLength` is declared
pub const DEFAULT_MAX_LENGTH: u64 = 255;

// ============================================================================
// Entity Construction
// ============================================================================

/// Build the entity for a classified schema.
///
/// The entity is positioned at the origin; layout happens afterwards.
pub fn build_entity(schema: &EntitySchema, options: &ImportOptions) -> (Entity, Warnings) {
    let mut warnings = Warnings::new();
    let ids = options.id_strategy;

    let name = sanitize_entity_name(&schema.name);
    let table_name = generate_table_name(&name, options.pluralize_table_names);

    let mut entity = Entity::new(name)
        .with_id(ids.entity_id(&schema.name))
        .with_table_name(table_name)
        .with_config(options.entity_config);

    if options.include_descriptions {
        if let Some(description) = &schema.description {
            entity = entity.with_description(description);
        }
    }

    for (key, property) in &schema.properties {
        match PropertyShape::classify(property) {
            PropertyShape::Scalar(scalar) => {
                if is_read_only(property) && !key.eq_ignore_ascii_case("id") {
                    tracing::debug!("Skipping read-only property {}.{}", schema.name, key);
                    continue;
                }

                let field = build_field(schema, key, property, &scalar, options);
                if entity
                    .fields
                    .iter()
                    .any(|f| f.name.eq_ignore_ascii_case(&field.name))
                {
                    tracing::debug!(
                        "Skipping property {}.{}: field '{}' already exists",
                        schema.name,
                        key,
                        field.name
                    );
                    continue;
                }
                entity.add_field(field);
            }
            PropertyShape::Composite => {
                warnings.push(ImportWarning::PolymorphicOmitted {
                    entity: schema.name.clone(),
                    field: key.clone(),
                });
            }
            PropertyShape::Reference { .. }
            | PropertyShape::ReferenceArray { .. }
            | PropertyShape::PrimitiveArray => {}
        }
    }

    let synthetic = Field::synthetic_id().with_id(ids.field_id(&schema.name, "id"));
    if entity.ensure_id_field(synthetic) {
        tracing::debug!("Added synthetic id field to {}", entity.name);
    }

    (entity, warnings)
}

/// Build a field from a scalar property
pub fn build_field(
    schema: &EntitySchema,
    key: &str,
    property: &Value,
    scalar: &ScalarType,
    options: &ImportOptions,
) -> Field {
    let required = schema.is_required(key);
    let nullable = if required {
        false
    } else {
        scalar.null_allowed || property.get("nullable").and_then(Value::as_bool) != Some(false)
    };

    let field_type = map_type(scalar.ty.as_deref().unwrap_or(""), scalar.format.as_deref());

    let mut field = Field::new(sanitize_field_name(key), field_type)
        .with_id(options.id_strategy.field_id(&schema.name, key))
        .with_nullable(nullable)
        .with_validations(derive_validations(property, scalar, required));

    if options.include_descriptions {
        if let Some(description) = property.get("description").and_then(Value::as_str) {
            field = field.with_description(description);
        }
    }

    if options.include_defaults {
        if let Some(default) = property.get("default") {
            field = field.with_default(DefaultValue::from_json(default));
        }
    }

    field
}

// ============================================================================
// Validation Rules
// ============================================================================

/// Derive validation rules from property constraints.
///
/// Rules are emitted in a fixed order: presence, length, email, pattern,
/// numeric bounds, strict positivity.
pub fn derive_validations(
    property: &Value,
    scalar: &ScalarType,
    required: bool,
) -> Vec<ValidationRule> {
    let mut rules = Vec::new();
    let is_string = scalar.is_string();
    let min_length = property.get("minLength").and_then(Value::as_u64);
    let max_length = property.get("maxLength").and_then(Value::as_u64);

    if required {
        if is_string && min_length.is_some_and(|m| m > 0) {
            rules.push(ValidationRule::NotBlank);
        } else {
            rules.push(ValidationRule::NotNull);
        }
    }

    if is_string && (min_length.is_some() || max_length.is_some()) {
        rules.push(ValidationRule::Size {
            min: min_length.unwrap_or(0),
            max: max_length.unwrap_or(DEFAULT_MAX_LENGTH),
        });
    }

    if scalar.format.as_deref() == Some("email") {
        rules.push(ValidationRule::Email);
    }

    if let Some(pattern) = property.get("pattern").and_then(Value::as_str) {
        rules.push(ValidationRule::Pattern {
            regex: pattern.to_string(),
        });
    }

    let minimum = property.get("minimum").and_then(Value::as_f64);
    if let Some(value) = minimum {
        rules.push(ValidationRule::Min { value });
    }
    if let Some(value) = property.get("maximum").and_then(Value::as_f64) {
        rules.push(ValidationRule::Max { value });
    }

    if has_exclusive_zero_minimum(property, minimum) {
        rules.push(ValidationRule::Positive);
    }

    rules
}

/// `exclusiveMinimum: 0` (3.1) or `minimum: 0` with `exclusiveMinimum: true` (3.0)
fn has_exclusive_zero_minimum(property: &Value, minimum: Option<f64>) -> bool {
    match property.get("exclusiveMinimum") {
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Bool(true)) => minimum == Some(0.0),
        _ => false,
    }
}

fn is_read_only(property: &Value) -> bool {
    property.get("readOnly").and_then(Value::as_bool) == Some(true)
}

// ============================================================================
// Tests
// ============================================================================
