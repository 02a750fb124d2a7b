//! Integration tests for the render job (plan-cli).
//!
//! Writes layout fixtures to a temp dir, runs full jobs and inspects the
//! written snapshots.

use std::path::Path;

use clap::Parser;
use plan_cli::{load_floor, run, CliArgs, RenderJob};
use plan_renderer::ExportFormat;
use serde_json::json;

fn building() -> serde_json::Value {
    json!({
        "floors": [
            {
                "level": "Ground Floor",
                "boundingBox": { "width": 40, "height": 30 },
                "rooms": [
                    {
                        "name": "Bedroom", "type": "bedroom",
                        "x": 0, "y": 0, "width": 12, "height": 10,
                        "doors": [{ "x": 4, "y": 10, "width": 3, "height": 0.5, "rotation": 0 }],
                        "windows": [{ "x": 2, "y": 0, "width": 4, "height": 0.5 }]
                    },
                    { "name": "Den", "type": "observatory", "x": 12, "y": 0, "width": 10, "height": 10 }
                ],
                "walls": [
                    { "x1": 0, "y1": 0, "x2": 22, "y2": 0, "thickness": 0.5, "type": "exterior" }
                ],
                "circulation": {
                    "corridors": [{ "x": 0, "y": 10, "width": 22, "height": 4 }],
                    "stairs": { "x": 30, "y": 0, "width": 6, "height": 10 }
                }
            },
            {
                "level": "Attic",
                "boundingBox": { "width": 20, "height": 20 }
            }
        ]
    })
}

fn write_fixture(dir: &Path, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("plan.json");
    std::fs::write(&path, serde_json::to_string(value).expect("json")).expect("write fixture");
    path
}

fn job(input: &Path, output: &Path, extra: &[&str]) -> RenderJob {
    let input = input.to_string_lossy().into_owned();
    let output = output.to_string_lossy().into_owned();
    let mut args = vec!["floorplan-render", input.as_str(), "-o", output.as_str()];
    args.extend_from_slice(extra);
    RenderJob::from(CliArgs::try_parse_from(args).expect("args"))
}

#[test]
fn test_renders_first_floor_to_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), &building());
    let output = dir.path().join("plan.png");

    let summary = run(&job(&input, &output, &[])).expect("render");
    let bytes = std::fs::read(&output).expect("snapshot");

    assert_eq!(&bytes[..4], b"\x89PNG");
    assert_eq!(summary.bytes, bytes.len());
    assert_eq!(summary.level, "Ground Floor");
    assert_eq!(summary.frame.rooms_filled, 2);
    assert_eq!(summary.frame.walls_stroked, 1);
    assert_eq!(summary.frame.doors_drawn, 1);
    assert_eq!(summary.frame.windows_drawn, 1);
    assert_eq!(summary.frame.stair_treads, 9);
}

#[test]
fn test_jpeg_by_extension_with_zoom() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), &building());
    let output = dir.path().join("plan.jpg");

    let job = job(&input, &output, &["--zoom", "-3", "--device-pixel-ratio", "2"]);
    assert_eq!(job.format, ExportFormat::Jpeg);
    let summary = run(&job).expect("render");

    let bytes = std::fs::read(&output).expect("snapshot");
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert!(summary.scale < 10.0);
}

#[test]
fn test_huge_zoom_saturates_at_max_scale() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), &building());
    let output = dir.path().join("plan.png");

    let summary = run(&job(&input, &output, &["--zoom", "2147483647"])).expect("render");
    assert!((summary.scale - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_selects_level_case_insensitively() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), &building());
    let floor = load_floor(&input, Some("attic")).expect("attic");
    assert_eq!(floor.level, "Attic");
    assert!(floor.rooms.is_empty());
}

#[test]
fn test_missing_level_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(dir.path(), &building());
    let err = load_floor(&input, Some("Basement")).expect_err("no basement");
    assert!(err.to_string().contains("Basement"));
}

#[test]
fn test_bare_floor_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let floor = building()["floors"][0].clone();
    let input = write_fixture(dir.path(), &floor);
    let loaded = load_floor(&input, None).expect("bare floor");
    assert_eq!(loaded.rooms.len(), 2);
}

#[test]
fn test_invalid_geometry_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(
        dir.path(),
        &json!({ "level": "Bad", "boundingBox": { "width": 0, "height": 10 } }),
    );
    let err = load_floor(&input, None).expect_err("invalid");
    assert!(format!("{err:#}").contains("bounding box"));
}

#[test]
fn test_malformed_building_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut doc = building();
    doc["floors"][0]["boundingBox"]["width"] = json!("forty");
    let input = write_fixture(dir.path(), &doc);
    let err = load_floor(&input, None).expect_err("malformed");
    assert!(err.to_string().contains("Failed to parse layout file"));

    let input = write_fixture(dir.path(), &json!({}));
    assert!(load_floor(&input, None).is_err());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_floor(&dir.path().join("nope.json"), None).expect_err("missing");
    assert!(err.to_string().contains("Failed to read layout file"));
}
