//! check-context end to end

use serde_json::json;

use super::helpers::{deep_plan, run_json, PlanningFixture};

fn check_context(fixture: &PlanningFixture, operation: &str) -> serde_json::Value {
    let (json, code) = run_json(
        deep_plan()
            .arg("check-context")
            .arg("--planning-dir")
            .arg(fixture.root())
            .arg("--upcoming-operation")
            .arg(operation),
    );
    assert_eq!(code, Some(0));
    json
}

#[test]
fn test_prompts_by_default() {
    let fixture = PlanningFixture::new();
    fixture.setup();

    let json = check_context(&fixture, "External LLM Review");

    assert_eq!(json["action"], "prompt");
    assert_eq!(json["reason"], "Context prompts enabled");
    assert_eq!(json["check_enabled"], true);
    assert_eq!(
        json["prompt"]["message"],
        "Next step is: External LLM Review\n\n\
         If your context is high, now is a good time to /compact."
    );
    assert_eq!(
        json["prompt"]["options"],
        json!([
            {"label": "Continue", "description": "Proceed with the operation"},
            {"label": "Compact first", "description": "Run /compact, then say 'continue' to resume"}
        ])
    );
}

#[test]
fn test_skips_when_disabled() {
    let fixture = PlanningFixture::new();
    fixture.write_global_config(&json!({"context": {"check_enabled": false}}));
    fixture.setup();

    let json = check_context(&fixture, "Section split");

    assert_eq!(json["action"], "skip");
    assert_eq!(json["reason"], "Context prompts disabled in config");
    assert_eq!(json["check_enabled"], false);
    assert!(json.get("prompt").is_none());
}

#[test]
fn test_missing_config_still_prompts() {
    let fixture = PlanningFixture::new();

    let json = check_context(&fixture, "External LLM Review");

    assert_eq!(json["action"], "prompt");
    assert_eq!(json["check_enabled"], true);
    assert!(json["reason"]
        .as_str()
        .unwrap()
        .ends_with("defaulting to prompt"));
}

#[test]
fn test_corrupt_config_still_prompts() {
    let fixture = PlanningFixture::new();
    fixture.write("deep_plan_config.json", "not json at all");

    let json = check_context(&fixture, "External LLM Review");
    assert_eq!(json["action"], "prompt");
    assert!(json["reason"].as_str().unwrap().starts_with("Config error ("));
}
