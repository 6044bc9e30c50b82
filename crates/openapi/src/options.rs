//! Import configuration
//!
//! `ImportOptions` controls everything about an import that is a matter of
//! taste rather than inference: descriptions and defaults, table naming,
//! id generation, canvas layout, and the defaults stamped onto every entity
//! and relation. It can be built in code or read from a TOML file:
//!
//! ```toml
//! include_descriptions = true
//! pluralize_table_names = true
//! id_strategy = "deterministic"
//!
//! [layout]
//! spacing_x = 320.0
//!
//! [relations]
//! fetch_type = "EAGER"
//! cascade = ["PERSIST", "MERGE"]
//! on_delete = "CASCADE"
//! ```

use relmap_core::{CascadeType, EngineError, EngineResult, FetchType, Position, ReferentialAction};
use relmap_ir::EntityConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

// ============================================================================
// ImportOptions
// ============================================================================

/// Options for a schema import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Copy `description` onto entities and fields
    pub include_descriptions: bool,

    /// Copy `default` onto fields
    pub include_defaults: bool,

    /// Use plural table names (`Category` -> `categories`)
    pub pluralize_table_names: bool,

    /// How entity, field, and relation ids are generated
    pub id_strategy: IdStrategy,

    /// Canvas grid parameters
    pub layout: LayoutConfig,

    /// Scaffolding switches applied to every entity
    pub entity_config: EntityConfig,

    /// Defaults applied to every relation
    pub relations: RelationDefaults,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            include_descriptions: true,
            include_defaults: true,
            pluralize_table_names: false,
            id_strategy: IdStrategy::default(),
            layout: LayoutConfig::default(),
            entity_config: EntityConfig::default(),
            relations: RelationDefaults::default(),
        }
    }
}

impl ImportOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML text
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        toml::from_str(text).map_err(|e| EngineError::config(e.to_string()))
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text)
            .map_err(|e| EngineError::config(format!("{}: {}", path.display(), e)))
    }

    /// Skip descriptions
    pub fn without_descriptions(mut self) -> Self {
        self.include_descriptions = false;
        self
    }

    /// Skip default values
    pub fn without_defaults(mut self) -> Self {
        self.include_defaults = false;
        self
    }

    /// Use plural table names
    pub fn with_plural_table_names(mut self) -> Self {
        self.pluralize_table_names = true;
        self
    }

    /// Set the id strategy
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Derive ids from schema names so repeated imports agree
    pub fn with_deterministic_ids(self) -> Self {
        self.with_id_strategy(IdStrategy::Deterministic)
    }

    /// Set the layout
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the entity configuration
    pub fn with_entity_config(mut self, config: EntityConfig) -> Self {
        self.entity_config = config;
        self
    }

    /// Set the relation defaults
    pub fn with_relation_defaults(mut self, relations: RelationDefaults) -> Self {
        self.relations = relations;
        self
    }
}

// ============================================================================
// IdStrategy
// ============================================================================

/// Namespace for deterministic ids
const ID_NAMESPACE: Uuid = Uuid::from_u128(0x5c1d_8e0a_3f4b_4a6e_9d27_1b8c_e6f0_a2d4);

/// How ids are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random v4 UUIDs
    #[default]
    Random,
    /// v5 UUIDs derived from a natural key
    Deterministic,
}

impl IdStrategy {
    /// Generate an id for the element identified by `key`
    pub fn id_for(&self, key: &str) -> Uuid {
        match self {
            IdStrategy::Random => Uuid::new_v4(),
            IdStrategy::Deterministic => Uuid::new_v5(&ID_NAMESPACE, key.as_bytes()),
        }
    }

    /// Id of the entity built from a schema
    pub fn entity_id(&self, schema: &str) -> Uuid {
        self.id_for(&format!("entity:{}", schema))
    }

    /// Id of a field built from a schema property
    pub fn field_id(&self, schema: &str, property: &str) -> Uuid {
        self.id_for(&format!("field:{}.{}", schema, property))
    }

    /// Id of the relation discovered through a reference property
    pub fn relation_id(&self, schema: &str, property: &str, target: &str) -> Uuid {
        self.id_for(&format!("relation:{}.{}->{}", schema, property, target))
    }
}

// ============================================================================
// LayoutConfig
// ============================================================================

/// Grid placement of entities on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Position of the first entity
    pub start: Position,

    /// Horizontal distance between columns
    pub spacing_x: f32,

    /// Vertical distance between rows
    pub spacing_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start: Position::new(100.0, 100.0),
            spacing_x: 300.0,
            spacing_y: 250.0,
        }
    }
}

// ============================================================================
// RelationDefaults
// ============================================================================

/// Values stamped onto every inferred relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationDefaults {
    /// Loading strategy
    pub fetch_type: FetchType,

    /// Cascaded operations
    pub cascade: Vec<CascadeType>,

    /// Foreign key action on delete
    pub on_delete: ReferentialAction,

    /// Foreign key action on update
    pub on_update: ReferentialAction,
}

impl Default for RelationDefaults {
    fn default() -> Self {
        Self {
            fetch_type: FetchType::Lazy,
            cascade: Vec::new(),
            on_delete: ReferentialAction::NoAction,
            on_update: ReferentialAction::NoAction,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ImportOptions::default();
        assert!(options.include_descriptions);
        assert!(options.include_defaults);
        assert!(!options.pluralize_table_names);
        assert_eq!(options.id_strategy, IdStrategy::Random);
        assert_eq!(options.layout.start, Position::new(100.0, 100.0));
        assert_eq!(options.layout.spacing_x, 300.0);
        assert_eq!(options.layout.spacing_y, 250.0);
        assert_eq!(options.relations.fetch_type, FetchType::Lazy);
        assert_eq!(options.relations.on_delete, ReferentialAction::NoAction);
    }

    #[test]
    fn test_from_toml_partial() {
        let options = ImportOptions::from_toml_str(
            r#"
pluralize_table_names = true
id_strategy = "deterministic"

[layout]
spacing_x = 320.0

[entity_config]
enableCaching = true

[relations]
fetch_type = "EAGER"
cascade = ["PERSIST", "MERGE"]
on_delete = "CASCADE"
"#,
        )
        .unwrap();

        assert!(options.pluralize_table_names);
        assert!(options.include_descriptions);
        assert_eq!(options.id_strategy, IdStrategy::Deterministic);
        assert_eq!(options.layout.spacing_x, 320.0);
        assert_eq!(options.layout.spacing_y, 250.0);
        assert!(options.entity_config.enable_caching);
        assert!(options.entity_config.generate_service);
        assert_eq!(options.relations.fetch_type, FetchType::Eager);
        assert_eq!(
            options.relations.cascade,
            vec![CascadeType::Persist, CascadeType::Merge]
        );
        assert_eq!(options.relations.on_delete, ReferentialAction::Cascade);
        assert_eq!(options.relations.on_update, ReferentialAction::NoAction);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = ImportOptions::from_toml_str("id_strategy = \"sequential\"").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "include_defaults = false").unwrap();

        let options = ImportOptions::load(file.path()).unwrap();
        assert!(!options.include_defaults);
    }

    #[test]
    fn test_deterministic_ids_are_stable() {
        let strategy = IdStrategy::Deterministic;
        assert_eq!(strategy.entity_id("Pet"), strategy.entity_id("Pet"));
        assert_ne!(strategy.entity_id("Pet"), strategy.entity_id("Owner"));
        assert_ne!(strategy.entity_id("Pet"), strategy.field_id("Pet", "id"));

        let random = IdStrategy::Random;
        assert_ne!(random.entity_id("Pet"), random.entity_id("Pet"));
    }

    #[test]
    fn test_builder() {
        let options = ImportOptions::new()
            .without_descriptions()
            .with_plural_table_names()
            .with_deterministic_ids();
        assert!(!options.include_descriptions);
        assert!(options.pluralize_table_names);
        assert_eq!(options.id_strategy, IdStrategy::Deterministic);
    }

    #[test]
    fn test_nested_builders() {
        let layout = LayoutConfig {
            start: Position::zero(),
            spacing_x: 200.0,
            spacing_y: 150.0,
        };
        let relations = RelationDefaults {
            fetch_type: FetchType::Eager,
            ..RelationDefaults::default()
        };
        let options = ImportOptions::new()
            .without_defaults()
            .with_layout(layout)
            .with_entity_config(EntityConfig::new().with_caching())
            .with_relation_defaults(relations.clone());

        assert!(!options.include_defaults);
        assert_eq!(options.layout, layout);
        assert!(options.entity_config.enable_caching);
        assert_eq!(options.relations, relations);
    }
}
