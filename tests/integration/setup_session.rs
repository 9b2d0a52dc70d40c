//! setup-session end to end

use predicates::prelude::*;
use serde_json::json;
use serial_test::serial;
use std::fs;

use super::helpers::{deep_plan, run_json, todos_with_status, PlanningFixture};
use deep_plan::commands::setup;

#[test]
fn test_new_session_creates_config() {
    let fixture = PlanningFixture::new();
    fixture.write_global_config(&json!({
        "context": {"check_enabled": true},
        "models": {"gemini": "gemini-pro"},
    }));

    let json = fixture.setup();

    assert_eq!(json["success"], true);
    assert_eq!(json["mode"], "new");
    assert_eq!(json["resume_from_step"], 6);
    assert_eq!(json["config_created"], true);
    assert_eq!(json["planning_dir"], fixture.root().to_str().unwrap());
    assert_eq!(json["state_check"]["recommended_action"], "fresh");
    assert_eq!(json["section_progress"]["state"], "fresh");

    let config: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(fixture.root().join("deep_plan_config.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(config["models"]["gemini"], "gemini-pro");
    assert_eq!(config["initial_file"], fixture.spec().to_str().unwrap());

    assert_eq!(todos_with_status(&json["todos"], "in_progress"), vec!["Research decision"]);
    assert_eq!(todos_with_status(&json["todos"], "completed").len(), 9);
    assert_eq!(todos_with_status(&json["todos"], "pending").len(), 16);
}

#[test]
fn test_resume_after_tdd_plan() {
    let fixture = PlanningFixture::new();
    fixture.write("claude-research.md", "# Research");
    fixture.write("claude-plan.md", "# Plan");
    fixture.write("reviews/gemini.md", "# Review");
    fixture.write("claude-integration-notes.md", "# Notes");
    fixture.write("claude-plan-tdd.md", "# TDD");

    let json = fixture.setup();

    assert_eq!(json["mode"], "resume");
    assert_eq!(json["resume_from_step"], 17);
    assert_eq!(
        json["message"],
        "Resuming from step 17 (Context check (pre-split)). Last completed: TDD plan complete"
    );
    assert_eq!(
        json["state_check"]["files_summary"],
        json!([
            "claude-research.md",
            "claude-plan.md",
            "claude-integration-notes.md",
            "claude-plan-tdd.md",
            "reviews/ (1 files)"
        ])
    );
}

#[test]
fn test_resume_mid_sections() {
    let fixture = PlanningFixture::new();
    fixture.write("claude-plan-tdd.md", "# TDD");
    fixture.write_index(&["section-01-setup", "section-02-api", "section-03-ui"]);
    fixture.write_section("section-01-setup");

    let json = fixture.setup();

    assert_eq!(json["resume_from_step"], 19);
    assert_eq!(
        json["message"],
        "Resuming from step 19 (Generate section TODOs). \
         Last completed: sections 1/3, next: section-02-api"
    );
    assert_eq!(json["section_progress"]["state"], "partial");
}

#[test]
fn test_complete_session() {
    let fixture = PlanningFixture::new();
    fixture.write_index(&["section-01-setup", "section-02-api"]);
    fixture.write_section("section-01-setup");
    fixture.write_section("section-02-api");

    let json = fixture.setup();

    assert_eq!(json["mode"], "complete");
    assert!(json["resume_from_step"].is_null());
    assert_eq!(json["message"], "Planning workflow complete - all sections written");
    assert_eq!(
        json["state_check"]["files_summary"],
        json!(["sections/ (2/2 complete)"])
    );
    assert_eq!(todos_with_status(&json["todos"], "in_progress"), vec!["Output summary"]);
}

#[test]
fn test_existing_config_is_reused() {
    let fixture = PlanningFixture::new();
    fixture.setup();

    fixture.write_global_config(&json!({"context": {"check_enabled": false}}));
    let json = fixture.setup();

    assert_eq!(json["config_created"], false);
    let todos = json["todos"].as_array().unwrap();
    assert_eq!(todos[3]["content"], "context_check_enabled=true");
}

#[test]
fn test_missing_spec_file() {
    let fixture = PlanningFixture::new();

    deep_plan()
        .arg("setup-session")
        .arg("--file")
        .arg(fixture.root().join("nope.md"))
        .arg("--plugin-root")
        .arg(fixture.plugin_root())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"mode\": \"error\""))
        .stdout(predicate::str::contains("Spec file not found: "));

    assert!(!fixture.root().join("deep_plan_config.json").exists());
}

#[test]
fn test_empty_spec_file() {
    let fixture = PlanningFixture::new();
    fixture.write("spec.md", "");

    let (json, code) = run_json(
        deep_plan()
            .arg("setup-session")
            .arg("--file")
            .arg(fixture.spec())
            .arg("--plugin-root")
            .arg(fixture.plugin_root()),
    );
    assert_eq!(code, Some(1));
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().starts_with("Spec file is empty: "));
}

#[test]
fn test_directory_as_spec() {
    let fixture = PlanningFixture::new();

    let (json, code) = run_json(
        deep_plan()
            .arg("setup-session")
            .arg("--file")
            .arg(fixture.root())
            .arg("--plugin-root")
            .arg(fixture.plugin_root()),
    );
    assert_eq!(code, Some(1));
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Expected a spec file, got a directory: "));
}

#[test]
fn test_invalid_plugin_config() {
    let fixture = PlanningFixture::new();
    fs::write(fixture.plugin_root().join("config.json"), "{ broken").unwrap();

    let (json, code) = run_json(
        deep_plan()
            .arg("setup-session")
            .arg("--file")
            .arg(fixture.spec())
            .arg("--plugin-root")
            .arg(fixture.plugin_root()),
    );
    assert_eq!(code, Some(1));
    assert_eq!(json["mode"], "error");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Session config error: "));
}

#[test]
fn test_plugin_root_from_env() {
    let fixture = PlanningFixture::new();

    let (json, code) = run_json(
        deep_plan()
            .env("CLAUDE_PLUGIN_ROOT", fixture.plugin_root())
            .arg("setup-session")
            .arg("--file")
            .arg(fixture.spec()),
    );
    assert_eq!(code, Some(0));
    assert_eq!(json["plugin_root"], fixture.plugin_root().to_str().unwrap());
}

#[test]
fn test_plugin_root_required() {
    let fixture = PlanningFixture::new();

    deep_plan()
        .arg("setup-session")
        .arg("--file")
        .arg(fixture.spec())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--plugin-root"));
}

#[test]
fn test_relative_spec_path_via_binary() {
    let fixture = PlanningFixture::new();

    let (json, code) = run_json(
        deep_plan()
            .current_dir(fixture.root())
            .arg("setup-session")
            .arg("--file")
            .arg("spec.md")
            .arg("--plugin-root")
            .arg(fixture.plugin_root()),
    );
    assert_eq!(code, Some(0));
    assert!(json["initial_file"].as_str().unwrap().ends_with("spec.md"));
    assert!(std::path::Path::new(json["initial_file"].as_str().unwrap()).is_absolute());
}

#[test]
#[serial]
fn test_relative_spec_path_resolves_against_cwd() {
    let fixture = PlanningFixture::new();
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(fixture.root()).unwrap();

    let result = setup::execute(std::path::Path::new("spec.md"), fixture.plugin_root());
    std::env::set_current_dir(original).unwrap();

    let output = result.unwrap();
    assert_eq!(output.exit_code(), 0);
    assert_eq!(output.body["mode"], "new");
    assert!(fixture.root().join("deep_plan_config.json").exists());
}
