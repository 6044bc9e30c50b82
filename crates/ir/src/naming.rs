//! Naming helpers
//!
//! Case conversion and the naming conventions of the design model:
//!
//! - **Entity names** are PascalCase (`blog-post` -> `BlogPost`)
//! - **Field names** are camelCase (`first_name` -> `firstName`)
//! - **Table and column names** are snake_case
//! - **Foreign key columns** are `<snake field>_id` (`author` -> `author_id`)
//! - **Join tables** are `<snake source>_<snake target>` (`student_course`)

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

// ============================================================================
// Case Conversion
// ============================================================================

/// Convert a string to snake_case
///
/// # Examples
///
/// - "BlogPost" -> "blog_post"
/// - "firstName" -> "first_name"
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Convert a string to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.to_pascal_case()
}

/// Convert a string to camelCase
pub fn to_camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Simple English pluralization of a snake_case word
///
/// # Examples
///
/// - "user" -> "users"
/// - "category" -> "categories"
/// - "box" -> "boxes"
pub fn pluralize(s: &str) -> String {
    if s.ends_with('s') || s.ends_with('x') || s.ends_with("ch") || s.ends_with("sh") {
        format!("{}es", s)
    } else if s.ends_with('y') && !s.ends_with("ey") && !s.ends_with("ay") && !s.ends_with("oy")
    {
        format!("{}ies", &s[..s.len() - 1])
    } else {
        format!("{}s", s)
    }
}

// ============================================================================
// Identifier Sanitization
// ============================================================================

/// Reduce an arbitrary schema key to identifier-safe words.
///
/// Non-word characters become `_` and runs of `_` collapse into one. Leading
/// digits and underscores are dropped together, so the result never starts
/// with a digit.
fn sanitize_words(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }

    collapsed
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '_')
        .to_string()
}

/// Derive a camelCase field name from a schema property key
///
/// # Examples
///
/// - "first_name" -> "firstName"
/// - "x-rate-limit" -> "xRateLimit"
/// - "2fa_enabled" -> "faEnabled"
pub fn sanitize_field_name(raw: &str) -> String {
    let name = to_camel_case(&sanitize_words(raw));
    if name.is_empty() {
        "field".to_string()
    } else {
        name
    }
}

/// Derive a PascalCase entity name from a schema name
///
/// # Examples
///
/// - "Pet" -> "Pet"
/// - "order_item" -> "OrderItem"
/// - "pet-store.Order" -> "PetStoreOrder"
pub fn sanitize_entity_name(raw: &str) -> String {
    let name = to_pascal_case(&sanitize_words(raw));
    if name.is_empty() {
        "Entity".to_string()
    } else {
        name
    }
}

/// Check if a string is a valid identifier
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    // First character must be letter or underscore
    if !first.is_alphabetic() && first != '_' {
        return false;
    }

    // Rest must be alphanumeric or underscore
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

// ============================================================================
// Table and Column Names
// ============================================================================

/// Generate a table name from an entity name
///
/// # Examples
///
/// - ("BlogPost", false) -> "blog_post"
/// - ("Category", true) -> "categories"
pub fn generate_table_name(entity_name: &str, plural: bool) -> String {
    let snake = to_snake_case(entity_name);
    if plural { pluralize(&snake) } else { snake }
}

/// Generate a foreign key column name from the referencing field name
///
/// # Examples
///
/// - "author" -> "author_id"
/// - "billingAddress" -> "billing_address_id"
pub fn generate_fk_column_name(field_name: &str) -> String {
    format!("{}_id", to_snake_case(field_name))
}

/// Generate a join column name pointing at an entity
///
/// # Examples
///
/// - "Student" -> "student_id"
pub fn generate_join_column_name(entity_name: &str) -> String {
    format!("{}_id", to_snake_case(entity_name))
}

/// Generate a join table name for a many-to-many relation, source first
///
/// # Examples
///
/// - ("Student", "Course") -> "student_course"
pub fn generate_join_table_name(source_entity: &str, target_entity: &str) -> String {
    format!(
        "{}_{}",
        to_snake_case(source_entity),
        to_snake_case(target_entity)
    )
}

// ============================================================================
// Tests
// ============================================================================
