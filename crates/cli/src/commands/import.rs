//! `relmap import`

use anyhow::{Context, Result};
use colored::Colorize;
use relmap_core::DocumentFormat;
use relmap_ir::serialization::model_path_for;
use relmap_ir::{DesignModel, ModelFile, save_model, to_json_string};
use relmap_openapi::{ImportOptions, OpenApiImporter, validate_document};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::input::{SourceDocument, collect_documents, read_document};

/// Where a model is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Pick the destination for one of `count` imported documents.
///
/// A single document goes to stdout, or to `output` unless that names an
/// existing directory. Several documents go into `output` as a directory,
/// or beside their sources when no output is given.
pub fn destination_for(source: &Path, count: usize, output: Option<&Path>) -> Destination {
    match output {
        None if count == 1 => Destination::Stdout,
        Some(path) if count == 1 && !path.is_dir() => Destination::File(path.to_path_buf()),
        None => Destination::File(model_path_for(source)),
        Some(dir) => {
            let model = model_path_for(source);
            match model.file_name() {
                Some(name) => Destination::File(dir.join(name)),
                None => Destination::File(dir.join(model)),
            }
        }
    }
}

/// Import one document into a model
pub fn import_document(
    importer: &OpenApiImporter,
    document: &SourceDocument,
    format: Option<DocumentFormat>,
    strict: bool,
) -> Result<DesignModel> {
    let path = document.path.display();

    if strict {
        validate_document(&document.text, format)
            .to_result()
            .with_context(|| format!("{} failed strict validation", path))?;
    }

    let model = match format {
        Some(format) => importer.import_with_format(&document.text, format),
        None => importer.import(&document.text),
    }
    .with_context(|| format!("Failed to import {}", path))?;

    Ok(model)
}

/// Run the command
pub async fn run(
    options: ImportOptions,
    paths: &[PathBuf],
    output: Option<&Path>,
    format: Option<DocumentFormat>,
    strict: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let sources = collect_documents(paths)?;
    let importer = OpenApiImporter::new(options);

    for source in &sources {
        let document = read_document(source).await?;
        let model = import_document(&importer, &document, format, strict)?;

        if !quiet {
            eprintln!(
                "{} {}: {} entities, {} relations{}",
                "✓".green(),
                source.display(),
                model.entity_count(),
                model.relation_count(),
                warning_suffix(model.warnings.len())
            );
        }

        let file = ModelFile::new(model).with_source(source.display().to_string());
        match destination_for(source, sources.len(), output) {
            Destination::Stdout => println!("{}", to_json_string(&file)?),
            Destination::File(path) => {
                save_model(&file, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!("Wrote {}", path.display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn warning_suffix(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => format!(", {}", "1 warning".yellow()),
        n => format!(", {}", format!("{} warnings", n).yellow()),
    }
}

// ============================================================================
// Tests
// ============================================================================
