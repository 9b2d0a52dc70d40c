//! generate-section-todos end to end

use serde_json::{json, Value};

use super::helpers::{deep_plan, run_json, todos_with_status, PlanningFixture};

fn generate(fixture: &PlanningFixture) -> (Value, Option<i32>) {
    run_json(
        deep_plan()
            .arg("generate-section-todos")
            .arg("--planning-dir")
            .arg(fixture.root()),
    )
}

#[test]
fn test_requires_session_config() {
    let fixture = PlanningFixture::new();
    fixture.write_index(&["section-01-setup"]);

    let (json, code) = generate(&fixture);

    assert_eq!(code, Some(1));
    assert_eq!(json["success"], false);
    assert_eq!(json["state"], "error");
    assert_eq!(json["todos"], json!([]));
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Session config not found. Run setup-session first."));
}

#[test]
fn test_no_index_yet() {
    let fixture = PlanningFixture::new();
    fixture.setup();

    let (json, code) = generate(&fixture);

    assert_eq!(code, Some(1));
    assert_eq!(json["state"], "fresh");
    assert_eq!(
        json["error"],
        "No sections/index.md found. Create the section index first (step 18)."
    );
}

#[test]
fn test_invalid_index() {
    let fixture = PlanningFixture::new();
    fixture.setup();
    fixture.write(
        "sections/index.md",
        "<!-- SECTION_MANIFEST\nsection-1-setup\nEND_MANIFEST -->\n",
    );

    let (json, code) = generate(&fixture);

    assert_eq!(code, Some(1));
    assert_eq!(json["state"], "invalid_index");
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid index.md: Invalid section name on line 1"));
}

#[test]
fn test_sections_replace_placeholders() {
    let fixture = PlanningFixture::new();
    fixture.setup();
    fixture.write_index(&["section-01-setup", "section-02-api", "section-03-ui"]);
    fixture.write_section("section-01-setup");

    let (json, code) = generate(&fixture);

    assert_eq!(code, Some(0));
    assert_eq!(json["success"], true);
    assert!(json["error"].is_null());
    assert_eq!(json["state"], "partial");
    assert_eq!(json["total_sections"], 3);
    assert_eq!(json["completed_sections"], 1);
    assert_eq!(json["missing_sections"], json!(["section-02-api", "section-03-ui"]));

    let pending = todos_with_status(&json["todos"], "pending");
    assert!(pending.contains(&"Read section-splitting.md and write section-02-api"));
    assert!(pending.contains(&"Read section-splitting.md and write section-03-ui"));
    assert!(!pending.contains(&"Write section files"));

    let completed = todos_with_status(&json["todos"], "completed");
    assert!(completed.contains(&"Read section-splitting.md and write section-01-setup"));
    assert!(completed.contains(&"Create section index"));
    assert_eq!(
        completed[0],
        format!("plugin_root={}", fixture.plugin_root().display())
    );
}

#[test]
fn test_complete_keeps_write_placeholder() {
    let fixture = PlanningFixture::new();
    fixture.setup();
    fixture.write_index(&["section-01-setup"]);
    fixture.write_section("section-01-setup");

    let (json, code) = generate(&fixture);

    assert_eq!(code, Some(0));
    assert_eq!(json["state"], "complete");
    assert_eq!(json["missing_sections"], json!([]));
    assert_eq!(
        todos_with_status(&json["todos"], "in_progress"),
        vec!["Generate section TODOs"]
    );
    assert!(todos_with_status(&json["todos"], "pending").contains(&"Write section files"));
}
