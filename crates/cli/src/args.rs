//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use relmap_core::DocumentFormat;
use std::path::PathBuf;

/// Infer entity-relationship design models from OpenAPI and Swagger schemas
#[derive(Parser, Debug)]
#[command(name = "relmap")]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Import options file (TOML)
    #[arg(short, long, global = true, env = "RELMAP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Derive ids from schema and property names instead of random UUIDs
    #[arg(long, global = true)]
    pub deterministic_ids: bool,

    /// Use plural table names (Category -> categories)
    #[arg(long, global = true)]
    pub pluralize: bool,

    /// Do not copy schema descriptions into the model
    #[arg(long, global = true)]
    pub no_descriptions: bool,
}

impl Cli {
    /// Default log filter for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import documents and write design models as JSON
    Import {
        /// Documents, or directories searched for .json / .yaml / .yml files
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Output file (one input) or directory (several inputs)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Skip format detection
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Refuse documents that fail strict validation
        #[arg(long)]
        strict: bool,
    },

    /// Strictly validate a document without importing it
    Validate {
        /// Document to validate
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Skip format detection
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a summary of the entities and relations in a document or model file
    Inspect {
        /// Document, or a previously written .relmap.json model
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Skip format detection
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
}

/// Document format selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => DocumentFormat::Json,
            FormatArg::Yaml => DocumentFormat::Yaml,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from([
            "relmap",
            "--deterministic-ids",
            "import",
            "a.yaml",
            "specs",
            "-o",
            "out",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.deterministic_ids);
        match cli.command {
            Commands::Import {
                paths,
                output,
                format,
                strict,
            } => {
                assert_eq!(paths, vec![PathBuf::from("a.yaml"), PathBuf::from("specs")]);
                assert_eq!(output, Some(PathBuf::from("out")));
                assert_eq!(format, Some(FormatArg::Json));
                assert!(!strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_import_requires_a_path() {
        assert!(Cli::try_parse_from(["relmap", "import"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["relmap", "validate", "x.json", "--verbose"]).unwrap();
        assert_eq!(cli.log_level(), "debug");

        let cli = Cli::try_parse_from(["relmap", "-q", "inspect", "x.json"]).unwrap();
        assert_eq!(cli.log_level(), "error");

        assert!(Cli::try_parse_from(["relmap", "-q", "-v", "inspect", "x.json"]).is_err());
    }

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(DocumentFormat::from(FormatArg::Yaml), DocumentFormat::Yaml);
    }
}
