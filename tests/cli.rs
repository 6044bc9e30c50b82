//! Binary-level tests for the `relmap` command

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BLOG: &str = r#"
openapi: 3.0.0
info: { title: Blog }
components:
  schemas:
    Author:
      type: object
      properties:
        name: { type: string }
        posts:
          type: array
          items: { $ref: '#/components/schemas/Post' }
    Post:
      type: object
      required: [title]
      properties:
        title: { type: string }
        author: { $ref: '#/components/schemas/Author' }
    PostResponse:
      type: object
      properties:
        post: { $ref: '#/components/schemas/Post' }
"#;

fn relmap() -> Command {
    let mut cmd = Command::cargo_bin("relmap").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("RELMAP_CONFIG");
    cmd
}

fn write_spec(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_import_prints_model_json() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "blog.yaml", BLOG);

    let output = relmap()
        .args(["--quiet", "--deterministic-ids", "import"])
        .arg(&spec)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["schemaVersion"], 1);
    let entities = json["model"]["entities"].as_array().unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0]["name"], "Author");
    assert_eq!(json["model"]["relations"][0]["type"], "ManyToOne");
    assert_eq!(json["model"]["relations"][0]["targetFieldName"], "posts");
}

#[test]
fn test_import_directory_writes_beside_sources() {
    let dir = TempDir::new().unwrap();
    write_spec(&dir, "blog.yaml", BLOG);
    write_spec(&dir, "other.yml", BLOG);

    relmap()
        .args(["-q", "import"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("blog.relmap.json").exists());
    assert!(dir.path().join("other.relmap.json").exists());
}

#[test]
fn test_import_rejects_undecodable_document() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "broken.json", "{\"openapi\": ");

    relmap()
        .arg("import")
        .arg(&spec)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON document"));
}

#[test]
fn test_validate_valid_document() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "blog.yaml", BLOG);

    relmap()
        .arg("validate")
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_validate_invalid_document_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "empty.yaml", "openapi: 3.0.0\ninfo: { title: Empty }\n");

    relmap()
        .args(["validate", "--json"])
        .arg(&spec)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"valid\": false"))
        .stdout(predicate::str::contains("No schemas found"));
}

#[test]
fn test_inspect_summary() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "blog.yaml", BLOG);

    relmap()
        .arg("inspect")
        .arg(&spec)
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entities (2)"))
        .stdout(predicate::str::contains("Post.author"))
        .stdout(predicate::str::contains("(author_id)"));
}

#[test]
fn test_config_file_applies() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "blog.yaml", BLOG);
    let config = write_spec(&dir, "relmap.toml", "pluralize_table_names = true\n");

    let output = relmap()
        .arg("-q")
        .arg("--config")
        .arg(&config)
        .arg("import")
        .arg(&spec)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["model"]["entities"][0]["tableName"], "authors");
}
