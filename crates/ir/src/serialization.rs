//! Serialization and deserialization for design model files
//!
//! An imported model can be persisted as a JSON document wrapping the model
//! with a schema version, a generation timestamp, and the path of the source
//! document it came from.

use crate::{DesignModel, MODEL_FILE_EXTENSION, MODEL_SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use relmap_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Model File Wrapper
// ============================================================================

/// Wrapper for model files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFile {
    /// Schema version for migration purposes
    pub schema_version: u32,

    /// When the model was produced
    pub generated_at: DateTime<Utc>,

    /// Source document the model was imported from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// The model data
    pub model: DesignModel,
}

impl ModelFile {
    /// Wrap a model at the current schema version
    pub fn new(model: DesignModel) -> Self {
        Self {
            schema_version: MODEL_SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: None,
            model,
        }
    }

    /// Record the source document
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Check if migration is needed
    pub fn needs_migration(&self) -> bool {
        self.schema_version < MODEL_SCHEMA_VERSION
    }

    /// Migrate to the latest schema version
    ///
    /// Files written by a newer release are rejected.
    pub fn migrate(&mut self) -> EngineResult<()> {
        if self.schema_version > MODEL_SCHEMA_VERSION {
            return Err(EngineError::SchemaVersionMismatch {
                expected: MODEL_SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        while self.schema_version < MODEL_SCHEMA_VERSION {
            self.migrate_one_version()?;
        }
        Ok(())
    }

    fn migrate_one_version(&mut self) -> EngineResult<()> {
        match self.schema_version {
            // Version 0 files predate the source field; the layout is otherwise identical.
            0 => self.schema_version = 1,
            other => {
                return Err(EngineError::internal(format!(
                    "No migration path from model schema version {}",
                    other
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Serialize a model file to pretty-printed JSON
pub fn to_json_string(file: &ModelFile) -> EngineResult<String> {
    Ok(serde_json::to_string_pretty(file)?)
}

/// Save a model to a file
///
/// # Example
///
/// ```rust,ignore
/// use relmap_ir::{DesignModel, ModelFile, save_model};
///
/// let file = ModelFile::new(DesignModel::new()).with_source("petstore.yaml");
/// save_model(&file, "petstore.relmap.json").unwrap();
/// ```
pub fn save_model(file: &ModelFile, path: impl AsRef<Path>) -> EngineResult<()> {
    let path = path.as_ref();

    let json = serde_json::to_string_pretty(file).map_err(|e| EngineError::FileWrite {
        path: path.to_path_buf(),
        message: format!("Failed to serialize model: {}", e),
    })?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| EngineError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!("Saved model to {}", path.display());
    Ok(())
}

// ============================================================================
// Load Functions
// ============================================================================

/// Parse a model file from JSON, migrating older versions
pub fn from_json_str(json: &str) -> EngineResult<ModelFile> {
    let mut file: ModelFile = serde_json::from_str(json)
        .map_err(|e| EngineError::InvalidModelFile(e.to_string()))?;
    if file.needs_migration() || file.schema_version > MODEL_SCHEMA_VERSION {
        file.migrate()?;
    }
    Ok(file)
}

/// Load a model file from disk
pub fn load_model(path: impl AsRef<Path>) -> EngineResult<ModelFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EngineError::ModelNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    from_json_str(&json)
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Derive the model file path for a source document
///
/// # Examples
///
/// - "specs/petstore.yaml" -> "specs/petstore.relmap.json"
pub fn model_path_for(source: impl AsRef<Path>) -> PathBuf {
    let source = source.as_ref();
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    source.with_file_name(format!("{}.{}", stem, MODEL_FILE_EXTENSION))
}

// ============================================================================
// Tests
// ============================================================================
