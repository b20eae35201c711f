//! Validates contract fixtures against frozen JSON schemas.

use jsonschema::JSONSchema;
use serde_json::Value;

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(schema_path: &str) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

#[test]
fn frame_listing_fixture_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/analysis-response-frames.schema.json"
    ));
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/analysis-response-frames.valid.json"
    ));
    assert!(
        validator.is_valid(&fixture),
        "frame listing fixture should validate against schema"
    );
}

#[test]
fn segment_listing_fixture_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/analysis-response-segments.schema.json"
    ));
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/analysis-response-segments.valid.json"
    ));
    assert!(
        validator.is_valid(&fixture),
        "segment listing fixture should validate against schema"
    );
}

#[test]
fn error_fixture_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/error-response.schema.json"
    ));
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/error-response.valid.json"
    ));
    assert!(
        validator.is_valid(&fixture),
        "error fixture should validate against schema"
    );
}

#[test]
fn frame_listing_schema_rejects_missing_required_field() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/analysis-response-frames.schema.json"
    ));
    let fixture: Value =
        serde_json::from_str(r#"{"spliced_video_url":"/videos/spliced.mp4"}"#)
            .expect("inline fixture should parse");
    assert!(
        !validator.is_valid(&fixture),
        "frame listing schema should require frames_with_one_person"
    );
}

#[test]
fn segment_listing_schema_rejects_incomplete_segment() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/analysis-response-segments.schema.json"
    ));
    let fixture: Value = serde_json::from_str(
        r#"{"segments":[{"video_url":"/videos/seg_0.mp4","duration":12.0}]}"#,
    )
    .expect("inline fixture should parse");
    assert!(
        !validator.is_valid(&fixture),
        "segment listing schema should require all segment fields"
    );
}
