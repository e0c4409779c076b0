use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const GOOD_REPLY: &str = r#"{"bewertung":{"K":2,"T":3,"L":4,"F":4,"gesamt":13},"feedback":{"positiv":["Sehr klar"],"verbesserungen":[]},"korrekturen":[],"tipps":[]}"#;

fn bewerter() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bewerter").expect("bewerter binary");
    cmd.env_remove("BEWERTER_CONFIG")
        .env_remove("BEWERTER_DEFAULT_BACKEND")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env("RUST_LOG", "warn");
    cmd
}

fn words(n: usize) -> String {
    (0..n).map(|i| format!("wort{}", i)).collect::<Vec<_>>().join(" ")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

/// Config with an offline default backend and a second one that always fails.
fn offline_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("bewerter.yaml");
    fs::write(
        &path,
        format!(
            "version: 1\ndefault_backend: offline\nbackends:\n  - name: offline\n    type: fake\n    response: '{}'\n  - name: broken\n    type: fake\n    fail: true\n",
            GOOD_REPLY
        ),
    )
    .unwrap();
    path
}

#[test]
fn tasks_lists_builtin_variants() {
    let output = bewerter().arg("tasks").output().unwrap();
    assert!(output.status.success());
    let v = stdout_json(&output);
    assert_eq!(v["A"]["title"], "Kind und Beruf");
    assert_eq!(v["A"]["aussagen"].as_array().unwrap().len(), 3);
    assert_eq!(v["B"]["schlagzeilen"].as_array().unwrap().len(), 3);
    assert_eq!(v["B"]["punkte"].as_array().unwrap().len(), 4);
}

#[test]
fn short_text_scores_zero_without_credentials() {
    let output = bewerter()
        .args(["evaluate", "--variante", "B", "--text", "Das ist viel zu kurz."])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let v = stdout_json(&output);
    assert_eq!(v["bewertung"]["gesamt"], 0);
    assert_eq!(v["meta"]["wortanzahl"], 5);
    assert_eq!(v["meta"]["aiService"], "openai");
    assert_eq!(
        v["feedback"]["verbesserungen"][0],
        "Text ist zu kurz (5 Wörter). Mindestens 60 Wörter erforderlich."
    );
}

#[test]
fn unknown_variant_exits_with_input_error() {
    bewerter()
        .args(["evaluate", "--variante", "Z", "--text", "Hallo"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Ungültige Eingabe"));
}

#[test]
fn missing_credentials_surface_as_backend_unavailable() {
    let output = bewerter()
        .args(["evaluate", "--variante", "A", "--text", &words(70)])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let v = stdout_json(&output);
    assert_eq!(
        v["error"],
        "OpenAI Service nicht verfügbar. Versuchen Sie es mit Claude."
    );
    assert_eq!(v["backend"], "openai");
    assert_eq!(v["fallback"], "anthropic");
}

#[test]
fn offline_backend_grades_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = offline_config(dir.path());
    let output = bewerter()
        .arg("--config")
        .arg(&cfg)
        .args(["evaluate", "--variante", "A"])
        .write_stdin(words(80))
        .output()
        .unwrap();
    assert!(output.status.success());
    let v = stdout_json(&output);
    assert_eq!(v["bewertung"]["gesamt"], 13);
    assert_eq!(v["meta"]["aiService"], "offline");
    assert_eq!(v["meta"]["variante"], "A");
}

#[test]
fn failing_backend_suggests_the_other_one() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = offline_config(dir.path());
    let submission = dir.path().join("text.txt");
    fs::write(&submission, words(75)).unwrap();

    let output = bewerter()
        .arg("--config")
        .arg(&cfg)
        .args(["evaluate", "--variante", "B", "--ai-service", "broken", "--file"])
        .arg(&submission)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let v = stdout_json(&output);
    assert_eq!(
        v["error"],
        "broken Service nicht verfügbar. Versuchen Sie es mit offline."
    );
    assert_eq!(v["backend"], "broken");
    assert_eq!(v["fallback"], "offline");
}

#[test]
fn invalid_config_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "version: 9\n").unwrap();
    let output = bewerter()
        .arg("--config")
        .arg(&path)
        .arg("tasks")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_json(&output)["error"],
        "Interner Server Fehler. Bitte versuchen Sie es später erneut."
    );
}

#[test]
fn health_reports_bound_credentials() {
    let output = bewerter()
        .env("OPENAI_API_KEY", "sk-test")
        .arg("health")
        .output()
        .unwrap();
    assert!(output.status.success());
    let v = stdout_json(&output);
    assert_eq!(v["status"], "OK");
    assert_eq!(v["services"]["openai"], true);
    assert_eq!(v["services"]["anthropic"], false);
}
