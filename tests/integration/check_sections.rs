//! check-sections end to end

use serde_json::json;

use super::helpers::{deep_plan, run_json, PlanningFixture};

fn check_sections(fixture: &PlanningFixture) -> serde_json::Value {
    let (json, code) = run_json(
        deep_plan()
            .arg("check-sections")
            .arg("--planning-dir")
            .arg(fixture.root()),
    );
    assert_eq!(code, Some(0));
    json
}

#[test]
fn test_fresh_planning_dir() {
    let fixture = PlanningFixture::new();
    let json = check_sections(&fixture);

    assert_eq!(json["state"], "fresh");
    assert_eq!(json["index_exists"], false);
    assert_eq!(json["progress"], "0/0");
    assert_eq!(json["index_format"]["exists"], false);
    assert!(json["index_format"]["error"].is_null());
}

#[test]
fn test_partial_progress() {
    let fixture = PlanningFixture::new();
    fixture.write_index(&["section-01-setup", "section-02-api", "section-03-ui"]);
    fixture.write_section("section-02-api");

    let json = check_sections(&fixture);

    assert_eq!(json["state"], "partial");
    assert_eq!(
        json["defined_sections"],
        json!(["section-01-setup", "section-02-api", "section-03-ui"])
    );
    assert_eq!(json["completed_sections"], json!(["section-02-api"]));
    assert_eq!(json["missing_sections"], json!(["section-01-setup", "section-03-ui"]));
    assert_eq!(json["next_section"], "section-01-setup");
    assert_eq!(json["progress"], "1/3");
}

#[test]
fn test_invalid_index_reports_error() {
    let fixture = PlanningFixture::new();
    fixture.write(
        "sections/index.md",
        "<!-- SECTION_MANIFEST\nsection-01-setup\nsection-01-again\nEND_MANIFEST -->\n",
    );

    let json = check_sections(&fixture);

    assert_eq!(json["state"], "invalid_index");
    assert_eq!(json["index_exists"], true);
    assert_eq!(json["index_format"]["manifest_valid"], false);
    assert!(json["index_format"]["error"]
        .as_str()
        .unwrap()
        .contains("Duplicate section number"));
}

#[test]
fn test_gap_warning_surfaces() {
    let fixture = PlanningFixture::new();
    fixture.write_index(&["section-01-setup", "section-03-ui"]);

    let json = check_sections(&fixture);

    assert_eq!(json["state"], "has_index");
    assert_eq!(
        json["index_format"]["warnings"],
        json!(["Section numbering gap: expected section-02, found section-03"])
    );
}

#[test]
fn test_complete() {
    let fixture = PlanningFixture::new();
    fixture.write_index(&["section-01-setup"]);
    fixture.write_section("section-01-setup");

    let json = check_sections(&fixture);
    assert_eq!(json["state"], "complete");
    assert!(json["next_section"].is_null());
    assert_eq!(json["progress"], "1/1");
}
