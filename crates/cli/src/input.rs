//! Locating and reading input documents

use anyhow::{Context, Result, bail};
use relmap_core::DocumentFormat;
use relmap_ir::MODEL_FILE_EXTENSION;
use relmap_openapi::ImportOptions;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::args::Cli;

/// A document read from disk
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

/// Check whether a path names an OpenAPI document by extension.
///
/// Model files (`*.relmap.json`) are excluded so a directory can be
/// re-imported after models were written beside their sources.
pub fn is_document_path(path: &Path) -> bool {
    if is_model_path(path) {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension)
        .is_some()
}

/// Check whether a path names a model file written by `import`
pub fn is_model_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(&format!(".{}", MODEL_FILE_EXTENSION)))
}

/// Expand the given paths into a sorted, de-duplicated list of documents.
///
/// Files are taken as given whatever their extension; directories are
/// walked recursively for `.json`, `.yaml` and `.yml` files.
pub fn collect_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|p| is_document_path(p))
                .collect();
            found.sort();
            tracing::debug!("Found {} document(s) under {}", found.len(), path.display());
            documents.extend(found);
        } else if path.is_file() {
            documents.push(path.clone());
        } else {
            bail!("No such file or directory: {}", path.display());
        }
    }

    let mut seen = std::collections::HashSet::new();
    documents.retain(|p| seen.insert(p.clone()));

    if documents.is_empty() {
        bail!("No OpenAPI documents found");
    }
    Ok(documents)
}

/// Read a document as UTF-8 text
pub async fn read_document(path: &Path) -> Result<SourceDocument> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(SourceDocument {
        path: path.to_path_buf(),
        text,
    })
}

/// Build import options from the config file and command-line overrides
pub fn load_options(cli: &Cli) -> Result<ImportOptions> {
    let mut options = match &cli.config {
        Some(path) => ImportOptions::load(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => ImportOptions::default(),
    };

    if cli.deterministic_ids {
        options = options.with_deterministic_ids();
    }
    if cli.pluralize {
        options = options.with_plural_table_names();
    }
    if cli.no_descriptions {
        options = options.without_descriptions();
    }
    Ok(options)
}

// ============================================================================
// Tests
// ============================================================================
