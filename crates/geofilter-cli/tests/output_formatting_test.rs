//! Integration tests for command output
//!
//! These tests run the built binary inside a scratch directory so no
//! configuration file or environment override leaks in.

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geofilter"))
        .current_dir(dir)
        .env_remove("GEOFILTER_RELATION")
        .env_remove("GEOFILTER_GEOMETRY_VALIDITY")
        .env_remove("GEOFILTER_DEFAULT_SR")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn parse_stdout(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_build_json_output() {
    let dir = TempDir::new().unwrap();
    let geometry = write(
        &dir,
        "poly.json",
        r#"{"rings": [[[0,0],[0,10],[10,10],[10,0],[0,0]]], "spatialReference": {"wkid": 4326}}"#,
    );

    let output = run(dir.path(), &["build", "within", "-g", &geometry, "--json"]);
    assert!(output.status.success(), "Command should succeed");

    let parsed = parse_stdout(&output);
    assert_eq!(parsed["status"], "success");
    let data = &parsed["data"];
    assert_eq!(data["geometryType"], "esriGeometryPolygon");
    assert_eq!(data["spatialRel"], "esriSpatialRelWithin");
    assert_eq!(data["inSR"]["wkid"], 4326);
}

#[test]
fn test_build_explicit_sr_and_params() {
    let dir = TempDir::new().unwrap();
    let geometry = write(&dir, "pt.json", r#"{"x": 1, "y": 2}"#);

    let output = run(
        dir.path(),
        &["build", "intersects", "-g", &geometry, "--sr", "3857", "--params", "--json"],
    );
    assert!(output.status.success(), "Command should succeed");

    let parsed = parse_stdout(&output);
    let params = parsed["data"].as_array().expect("params should be an array");
    let names: Vec<&str> = params.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, ["geometry", "geometryType", "spatialRel", "inSR"]);
    assert_eq!(params[3]["value"], "3857");
}

#[test]
fn test_build_uses_config_file_relation() {
    let dir = TempDir::new().unwrap();
    write(&dir, "geofilter.toml", "relation = \"touches\"\n");
    let geometry = write(&dir, "pt.json", r#"{"x": 1, "y": 2}"#);

    let output = run(dir.path(), &["build", "-g", &geometry, "--json"]);
    assert!(output.status.success(), "Command should succeed");
    assert_eq!(parse_stdout(&output)["data"]["spatialRel"], "esriSpatialRelTouches");
}

#[test]
fn test_unsupported_geometry_fails() {
    let dir = TempDir::new().unwrap();
    let geometry = write(&dir, "patch.json", r#"{"type": "multipatch", "rings": []}"#);

    let output = run(dir.path(), &["build", "intersects", "-g", &geometry, "--json"]);
    assert!(!output.status.success(), "Command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported geometry type"));
}

#[test]
fn test_unknown_relation_fails() {
    let dir = TempDir::new().unwrap();
    let geometry = write(&dir, "pt.json", r#"{"x": 1, "y": 2}"#);

    let output = run(dir.path(), &["build", "near", "-g", &geometry]);
    assert!(!output.status.success(), "Command should fail");
}

#[test]
fn test_eval_reports_matching_indices() {
    let dir = TempDir::new().unwrap();
    let geometry = write(&dir, "square.json", r#"{"rings": [[[0,0],[0,10],[10,10],[10,0],[0,0]]]}"#);
    let candidates = write(
        &dir,
        "candidates.json",
        r#"[{"x": 5, "y": 5}, {"x": 50, "y": 50}, {"points": [[1,1],[2,2]]}]"#,
    );

    let output =
        run(dir.path(), &["eval", "contains", "-g", &geometry, "-c", &candidates, "--json"]);
    assert!(output.status.success(), "Command should succeed");

    let data = &parse_stdout(&output)["data"];
    assert_eq!(data["total"], 3);
    assert_eq!(data["matches"], serde_json::json!([0, 2]));
}

#[test]
fn test_eval_validates_filter_geometry() {
    let dir = TempDir::new().unwrap();
    let candidates = write(&dir, "candidates.json", r#"[{"x": 5, "y": 5}]"#);

    let inverted = write(&dir, "inverted.json", r#"{"xmin": 10, "ymin": 0, "xmax": 0, "ymax": 5}"#);
    let output = run(dir.path(), &["eval", "intersects", "-g", &inverted, "-c", &candidates]);
    assert!(!output.status.success(), "Inverted envelope should be rejected");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid geometry"));

    write(&dir, "geofilter.toml", "geometry_validity = \"Strict\"\n");
    let unclosed = write(&dir, "unclosed.json", r#"{"rings": [[[0,0],[0,10],[10,10],[10,0]]]}"#);
    let output = run(dir.path(), &["eval", "contains", "-g", &unclosed, "-c", &candidates]);
    assert!(!output.status.success(), "Strict mode should reject an unclosed ring");
}

#[test]
fn test_relations_lists_every_tag() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["relations", "--json"]);
    assert!(output.status.success(), "Command should succeed");

    let rows = parse_stdout(&output)["data"].as_array().cloned().unwrap();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().any(|r| r["tag"] == "esriSpatialRelIndexIntersects"));
}
