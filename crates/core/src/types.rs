//! Core types used throughout relmap
//!
//! This module contains the fundamental vocabulary of the design model:
//! canvas geometry, canonical field types, relation cardinalities, referential
//! actions, and field validation rules. They are shared by the IR, the
//! OpenAPI importer, and the CLI.

use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry Types
// ============================================================================

/// Position on the 2D canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Add an offset to this position
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

// ============================================================================
// Document Formats
// ============================================================================

/// Textual encodings an API schema document can arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    #[default]
    Yaml,
}

impl DocumentFormat {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Yaml => "YAML",
        }
    }

    /// Guess the format from a file extension (`json`, `yaml`, `yml`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Canonical Field Types
// ============================================================================

/// Field types of the design model, independent of how the source schema
/// spelled its `type`/`format` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CanonicalType {
    /// Variable-length text
    #[default]
    String,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
    /// Boolean true/false
    Boolean,
    /// Date without time
    LocalDate,
    /// Date and time
    LocalDateTime,
    /// Time without date
    LocalTime,
    /// UUID
    #[serde(rename = "UUID")]
    Uuid,
    /// Raw binary content
    #[serde(rename = "byte[]")]
    ByteArray,
}

impl CanonicalType {
    /// Get the canonical spelling used in model files
    pub fn display_name(&self) -> &'static str {
        match self {
            CanonicalType::String => "String",
            CanonicalType::Integer => "Integer",
            CanonicalType::Long => "Long",
            CanonicalType::Float => "Float",
            CanonicalType::Double => "Double",
            CanonicalType::Boolean => "Boolean",
            CanonicalType::LocalDate => "LocalDate",
            CanonicalType::LocalDateTime => "LocalDateTime",
            CanonicalType::LocalTime => "LocalTime",
            CanonicalType::Uuid => "UUID",
            CanonicalType::ByteArray => "byte[]",
        }
    }

    /// Check if values of this type are numbers
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CanonicalType::Integer
                | CanonicalType::Long
                | CanonicalType::Float
                | CanonicalType::Double
        )
    }

    /// Check if values of this type are dates or times
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            CanonicalType::LocalDate | CanonicalType::LocalDateTime | CanonicalType::LocalTime
        )
    }

    /// Get all canonical types
    pub fn all() -> &'static [CanonicalType] {
        &[
            CanonicalType::String,
            CanonicalType::Integer,
            CanonicalType::Long,
            CanonicalType::Float,
            CanonicalType::Double,
            CanonicalType::Boolean,
            CanonicalType::LocalDate,
            CanonicalType::LocalDateTime,
            CanonicalType::LocalTime,
            CanonicalType::Uuid,
            CanonicalType::ByteArray,
        ]
    }
}

impl std::fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Relation Cardinality
// ============================================================================

/// Multiplicity of a relation between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    /// One record relates to exactly one other record
    OneToOne,
    /// One record relates to many others (e.g., Author has many Posts)
    OneToMany,
    /// Many records relate to one (inverse of OneToMany)
    ManyToOne,
    /// Many-to-many through a join table
    ManyToMany,
}

impl Cardinality {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "One to One",
            Cardinality::OneToMany => "One to Many",
            Cardinality::ManyToOne => "Many to One",
            Cardinality::ManyToMany => "Many to Many",
        }
    }

    /// Get arrow symbol for visual representation
    pub fn arrow_symbol(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "1 ─── 1",
            Cardinality::OneToMany => "1 ───< *",
            Cardinality::ManyToOne => "* >─── 1",
            Cardinality::ManyToMany => "* >──< *",
        }
    }

    /// Check if this cardinality is stored through a join table
    pub fn requires_join_table(&self) -> bool {
        matches!(self, Cardinality::ManyToMany)
    }

    /// Get the cardinality seen from the other side of the relation
    pub fn inverse(&self) -> Self {
        match self {
            Cardinality::OneToOne => Cardinality::OneToOne,
            Cardinality::OneToMany => Cardinality::ManyToOne,
            Cardinality::ManyToOne => Cardinality::OneToMany,
            Cardinality::ManyToMany => Cardinality::ManyToMany,
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Fetch and Cascade
// ============================================================================

/// Loading strategy for the related side of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FetchType {
    #[default]
    Lazy,
    Eager,
}

impl std::fmt::Display for FetchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchType::Lazy => write!(f, "LAZY"),
            FetchType::Eager => write!(f, "EAGER"),
        }
    }
}

/// Persistence operations propagated across a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CascadeType {
    All,
    Persist,
    Merge,
    Remove,
    Refresh,
    Detach,
}

impl std::fmt::Display for CascadeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CascadeType::All => "ALL",
            CascadeType::Persist => "PERSIST",
            CascadeType::Merge => "MERGE",
            CascadeType::Remove => "REMOVE",
            CascadeType::Refresh => "REFRESH",
            CascadeType::Detach => "DETACH",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Referential Actions
// ============================================================================

/// Actions for foreign key constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    /// Delete related records when parent is deleted
    Cascade,
    /// Set foreign key to NULL when parent is deleted
    SetNull,
    /// Prevent deletion if related records exist
    Restrict,
    /// Do nothing (database default)
    #[default]
    NoAction,
    /// Set to default value
    SetDefault,
}

impl ReferentialAction {
    /// Get SQL keyword
    pub fn to_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

// ============================================================================
// Validation Rules
// ============================================================================

/// Field validation rules derived from schema constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ValidationRule {
    /// Field must have a value
    NotNull,
    /// Text must contain at least one non-whitespace character
    NotBlank,
    /// Text length bounds
    Size { min: u64, max: u64 },
    /// Valid email address
    Email,
    /// Regex pattern, kept exactly as written in the source schema
    Pattern { regex: String },
    /// Minimum numeric value
    Min { value: f64 },
    /// Maximum numeric value
    Max { value: f64 },
    /// Number must be zero or greater
    PositiveOrZero,
    /// Number must be strictly greater than zero
    Positive,
}

impl ValidationRule {
    /// Get the rule name
    pub fn name(&self) -> &'static str {
        match self {
            ValidationRule::NotNull => "NotNull",
            ValidationRule::NotBlank => "NotBlank",
            ValidationRule::Size { .. } => "Size",
            ValidationRule::Email => "Email",
            ValidationRule::Pattern { .. } => "Pattern",
            ValidationRule::Min { .. } => "Min",
            ValidationRule::Max { .. } => "Max",
            ValidationRule::PositiveOrZero => "PositiveOrZero",
            ValidationRule::Positive => "Positive",
        }
    }

    /// Get a user-friendly error message
    pub fn error_message(&self) -> String {
        match self {
            ValidationRule::NotNull => "This field is required".to_string(),
            ValidationRule::NotBlank => "This field must not be blank".to_string(),
            ValidationRule::Size { min, max } => {
                format!("Length must be between {} and {} characters", min, max)
            }
            ValidationRule::Email => "Must be a valid email address".to_string(),
            ValidationRule::Pattern { regex } => format!("Must match pattern {}", regex),
            ValidationRule::Min { value } => format!("Minimum value is {}", format_number(*value)),
            ValidationRule::Max { value } => format!("Maximum value is {}", format_number(*value)),
            ValidationRule::PositiveOrZero => "Must be zero or positive".to_string(),
            ValidationRule::Positive => "Must be positive".to_string(),
        }
    }

    /// Render as a Bean Validation annotation for downstream generators
    pub fn to_annotation(&self) -> String {
        match self {
            ValidationRule::NotNull => "@NotNull".to_string(),
            ValidationRule::NotBlank => "@NotBlank".to_string(),
            ValidationRule::Size { min, max } => format!("@Size(min = {}, max = {})", min, max),
            ValidationRule::Email => "@Email".to_string(),
            ValidationRule::Pattern { regex } => {
                let escaped = regex.replace('\\', "\\\\").replace('"', "\\\"");
                format!("@Pattern(regexp = \"{}\")", escaped)
            }
            ValidationRule::Min { value } => bound_annotation("Min", *value),
            ValidationRule::Max { value } => bound_annotation("Max", *value),
            ValidationRule::PositiveOrZero => "@PositiveOrZero".to_string(),
            ValidationRule::Positive => "@Positive".to_string(),
        }
    }
}

impl std::fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationRule::Size { min, max } => write!(f, "Size({}, {})", min, max),
            ValidationRule::Pattern { regex } => write!(f, "Pattern({})", regex),
            ValidationRule::Min { value } => write!(f, "Min({})", format_number(*value)),
            ValidationRule::Max { value } => write!(f, "Max({})", format_number(*value)),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Integral bounds use `@Min`/`@Max`, fractional ones `@DecimalMin`/`@DecimalMax`
fn bound_annotation(kind: &str, value: f64) -> String {
    if is_integral(value) {
        format!("@{}({})", kind, value as i64)
    } else {
        format!("@Decimal{}(\"{}\")", kind, value)
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15
}

/// Format a number without a trailing `.0` when it is integral
pub fn format_number(value: f64) -> String {
    if is_integral(value) {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ============================================================================
// Tests
// ============================================================================
