//! # relmap CLI
//!
//! Command-line front end for the relmap engine.
//!
//! ## Commands
//!
//! - `import` - Import documents (or directories of them) and write design models as JSON
//! - `validate` - Strictly validate a document; exits with status 1 when invalid
//! - `inspect` - Print entities, relations, and warnings for a document or model file
//!
//! File access happens here; the engine crates only see text.

pub mod args;
pub mod commands;
pub mod input;

pub use args::{Cli, Commands, FormatArg};

use anyhow::Result;
use std::process::ExitCode;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a parsed command line
pub async fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Import {
            paths,
            output,
            format,
            strict,
        } => {
            let options = input::load_options(&cli)?;
            commands::import::run(
                options,
                paths,
                output.as_deref(),
                format.map(Into::into),
                *strict,
                cli.quiet,
            )
            .await
        }
        Commands::Validate { path, format, json } => {
            commands::validate::run(path, format.map(Into::into), *json).await
        }
        Commands::Inspect { path, format } => {
            let options = input::load_options(&cli)?;
            commands::inspect::run(path, options, format.map(Into::into)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_run_import_to_file() {
        let dir = TempDir::new().unwrap();
        let spec = dir.path().join("pets.json");
        let out = dir.path().join("models").join("pets.json");
        std::fs::write(
            &spec,
            r#"{"swagger": "2.0", "info": {"title": "Pets"},
               "definitions": {"Pet": {"properties": {"name": {"type": "string"}}}}}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "relmap",
            "--quiet",
            "import",
            spec.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).await.unwrap();

        let file = relmap_ir::load_model(&out).unwrap();
        assert_eq!(file.model.entities[0].name, "Pet");
    }

    #[tokio::test]
    async fn test_run_missing_input() {
        let cli = Cli::try_parse_from(["relmap", "inspect", "no/such/file.yaml"]).unwrap();
        assert!(run(cli).await.is_err());
    }
}
