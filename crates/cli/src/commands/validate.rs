//! `relmap validate`

use anyhow::Result;
use colored::Colorize;
use relmap_core::DocumentFormat;
use relmap_openapi::{DocumentValidation, validate_document};
use std::path::Path;
use std::process::ExitCode;

use crate::input::read_document;

/// Render a validation result for the terminal
pub fn render_validation(path: &Path, validation: &DocumentValidation) -> String {
    if validation.valid {
        return format!("{} {} is valid", "✓".green(), path.display());
    }

    let mut out = format!(
        "{} {}: {} problem(s)",
        "✗".red(),
        path.display(),
        validation.errors.len()
    );
    for error in &validation.errors {
        out.push_str(&format!("\n  {} {}", "-".red(), error.message));
    }
    out
}

/// Run the command; invalid documents exit with status 1
pub async fn run(path: &Path, format: Option<DocumentFormat>, json: bool) -> Result<ExitCode> {
    let document = read_document(path).await?;
    let validation = validate_document(&document.text, format);

    if json {
        println!("{}", serde_json::to_string_pretty(&validation)?);
    } else {
        println!("{}", render_validation(path, &validation));
    }

    Ok(if validation.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_valid() {
        let text = render_validation(Path::new("shop.yaml"), &DocumentValidation::ok());
        assert!(text.contains("shop.yaml is valid"));
    }

    #[test]
    fn test_render_problems() {
        let validation = validate_document("{}", None);
        let text = render_validation(Path::new("empty.json"), &validation);

        assert!(text.contains("3 problem(s)"));
        assert!(text.contains("Missing 'info' section"));
        assert!(text.contains("No schemas found"));
        assert_eq!(text.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_run_missing_file() {
        assert!(run(Path::new("does/not/exist.yaml"), None, false).await.is_err());
    }
}
