//! `relmap inspect`
//!
//! Prints a human-readable summary of a model: entities with their fields
//! and validation annotations, relations with foreign keys and join tables,
//! then the import warnings.

use anyhow::{Context, Result};
use colored::Colorize;
use relmap_core::DocumentFormat;
use relmap_ir::{DesignModel, Entity, Field, Relation, load_model};
use relmap_openapi::{ImportOptions, OpenApiImporter};
use std::path::Path;
use std::process::ExitCode;

use super::import::import_document;
use crate::input::{is_model_path, read_document};

/// Load a model from a `.relmap.json` file, or import it from a document
pub async fn load(
    path: &Path,
    options: ImportOptions,
    format: Option<DocumentFormat>,
) -> Result<DesignModel> {
    if is_model_path(path) {
        let file = load_model(path)
            .with_context(|| format!("Failed to load model {}", path.display()))?;
        return Ok(file.model);
    }

    let document = read_document(path).await?;
    import_document(&OpenApiImporter::new(options), &document, format, false)
}

/// Run the command
pub async fn run(
    path: &Path,
    options: ImportOptions,
    format: Option<DocumentFormat>,
) -> Result<ExitCode> {
    let model = load(path, options, format).await?;
    print!("{}", render_summary(&model));
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the whole model summary
pub fn render_summary(model: &DesignModel) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} ({})\n",
        "Entities".bold(),
        model.entity_count()
    ));
    for entity in &model.entities {
        out.push_str(&render_entity(entity));
    }

    out.push_str(&format!(
        "\n{} ({})\n",
        "Relations".bold(),
        model.relation_count()
    ));
    for relation in &model.relations {
        out.push_str(&format!("  {}\n", render_relation(model, relation)));
    }

    if model.has_warnings() {
        out.push_str(&format!(
            "\n{} ({})\n",
            "Warnings".bold().yellow(),
            model.warnings.len()
        ));
        for warning in &model.warnings {
            out.push_str(&format!("  {} {}\n", "!".yellow(), warning));
        }
    }

    out
}

fn render_entity(entity: &Entity) -> String {
    let mut out = format!(
        "  {} {}\n",
        entity.name.cyan().bold(),
        format!("[{}]", entity.table_name).dimmed()
    );
    let width = entity
        .fields
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0);
    for field in &entity.fields {
        out.push_str(&format!(
            "    {:<width$}  {}\n",
            field.name,
            field_details(field),
            width = width
        ));
    }
    out
}

fn field_details(field: &Field) -> String {
    let mut parts = vec![field.field_type.display_name().to_string()];
    if field.is_id() {
        parts.push("primary key".to_string());
    } else if !field.nullable {
        parts.push("not null".to_string());
    }
    if field.unique && !field.is_id() {
        parts.push("unique".to_string());
    }
    for rule in &field.validations {
        parts.push(rule.to_annotation());
    }
    parts.join(" ")
}

/// Render one relation, e.g. `Post.author * >─── 1 Author.posts (author_id)`
pub fn render_relation(model: &DesignModel, relation: &Relation) -> String {
    let name_of = |id| {
        model
            .entity(id)
            .map(|e| e.name.as_str())
            .unwrap_or("?")
    };

    let target = match &relation.target_field_name {
        Some(back) => format!("{}.{}", name_of(relation.target_entity_id), back),
        None => name_of(relation.target_entity_id).to_string(),
    };
    let storage = match &relation.join_table {
        Some(join) => format!(
            "{} ({}, {})",
            join.name, join.join_column, join.inverse_join_column
        ),
        None => relation.foreign_key.column_name.clone(),
    };

    format!(
        "{}.{} {} {} {}",
        name_of(relation.source_entity_id),
        relation.source_field_name,
        relation.arrow_symbol().magenta(),
        target,
        format!("({})", storage).dimmed()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_ir::{ModelFile, save_model};
    use relmap_openapi::import_openapi;
    use tempfile::TempDir;

    const SCHOOL: &str = r##"{
        "openapi": "3.0.0",
        "info": {"title": "School"},
        "components": {"schemas": {
            "Student": {"type": "object", "required": ["name"], "properties": {
                "name": {"type": "string", "maxLength": 80},
                "courses": {"type": "array", "items": {"$ref": "#/components/schemas/Course"}},
                "mentor": {"$ref": "#/components/schemas/Tutor"}
            }},
            "Course": {"type": "object", "properties": {
                "students": {"type": "array", "items": {"$ref": "#/components/schemas/Student"}}
            }},
            "Tutor": {"type": "object", "properties": {"name": {"type": "string"}}}
        }}
    }"##;

    #[test]
    fn test_summary_lists_entities_and_fields() {
        colored::control::set_override(false);
        let model = import_openapi(SCHOOL).unwrap();
        let text = render_summary(&model);

        assert!(text.contains("Entities (3)"));
        assert!(text.contains("Student [student]"));
        assert!(text.contains("@NotNull @Size(min = 0, max = 80)"));
        assert!(text.contains("Relations (2)"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_render_relations() {
        colored::control::set_override(false);
        let model = import_openapi(SCHOOL).unwrap();
        let lines: Vec<String> = model
            .relations
            .iter()
            .map(|r| render_relation(&model, r))
            .collect();

        assert!(lines.iter().any(|l| l.starts_with("Student.courses")
            && l.contains("Course.students")
            && l.contains("student_course")));
        assert!(lines.iter().any(|l| l.starts_with("Student.mentor")
            && l.contains("(mentor_id)")));
    }

    #[test]
    fn test_summary_lists_warnings() {
        colored::control::set_override(false);
        let model = import_openapi("openapi: 3.0.0\ninfo: { title: x }\n").unwrap();
        let text = render_summary(&model);
        assert!(text.contains("Warnings (1)"));
        assert!(text.contains("! No schemas found"));
    }

    #[tokio::test]
    async fn test_load_model_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("school.relmap.json");
        save_model(&ModelFile::new(import_openapi(SCHOOL).unwrap()), &path).unwrap();

        let model = load(&path, ImportOptions::default(), None).await.unwrap();
        assert_eq!(model.entity_count(), 3);
    }

    #[tokio::test]
    async fn test_load_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("school.json");
        std::fs::write(&path, SCHOOL).unwrap();

        let model = load(&path, ImportOptions::default(), None).await.unwrap();
        assert_eq!(model.relation_count(), 2);
    }
}
