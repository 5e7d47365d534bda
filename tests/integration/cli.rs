//! The `cfgplate` binary end to end.

use assert_cmd::Command;
use cfgplate::test_utils::write_file;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's settings file and terminal colors.
fn cfgplate(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cfgplate").unwrap();
    cmd.env("CFGPLATE_CONFIG_PATH", temp.path().join("missing-settings.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(temp.path());
    cmd
}

#[test]
fn test_resolve_with_assignments() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "Hello #{name:Guest}, from #{city}", "-D", "city=Oslo"])
        .assert()
        .success()
        .stdout("Hello Guest, from Oslo\n");
}

#[test]
fn test_resolve_with_property_file_and_env() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "app.yaml", "db:\n  host: db.internal\n");

    cfgplate(&temp)
        .args(["resolve", "#{db.host}/#{CFGPLATE_IT_SCHEMA}", "-p", "app.yaml", "--env"])
        .env("CFGPLATE_IT_SCHEMA", "billing")
        .assert()
        .success()
        .stdout("db.internal/billing\n");
}

#[test]
fn test_resolve_unresolvable_fails_with_suggestion() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "#{db.hots}", "-D", "db.host=x"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Could not resolve placeholder 'db.hots'"))
        .stderr(predicate::str::contains("Did you mean 'db.host'?"));
}

#[test]
fn test_resolve_circular_reference_fails() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "#{a}", "-D", "a=#{b}", "-D", "b=#{a}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular placeholder reference 'a'"));
}

#[test]
fn test_resolve_lenient_keeps_placeholder() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "#{missing} #{x}", "-D", "x=1", "--lenient"])
        .assert()
        .success()
        .stdout("#{missing} 1\n");
}

#[test]
fn test_resolve_with_custom_delimiters() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "${user:-nobody}", "--prefix", "${", "--separator", ":-"])
        .assert()
        .success()
        .stdout("nobody\n");
}

#[test]
fn test_settings_file_changes_delimiters() {
    let temp = TempDir::new().unwrap();
    let settings = write_file(temp.path(), "settings.toml", "prefix = \"<%\"\nsuffix = \"%>\"\n");

    cfgplate(&temp)
        .arg("--config")
        .arg(&settings)
        .args(["resolve", "<%a%> #{a}", "-D", "a=1"])
        .assert()
        .success()
        .stdout("1 #{a}\n");
}

#[test]
fn test_invalid_delimiters_fail() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "x", "--prefix", "}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid placeholder syntax"));
}

#[test]
fn test_invalid_assignment_fails() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "x", "-D", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid property assignment 'novalue'"));
}

#[test]
fn test_parse_prints_json() {
    let temp = TempDir::new().unwrap();
    let output = cfgplate(&temp).args(["parse", "a #{b:c}"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["keys"], serde_json::json!(["b"]));
    assert_eq!(report["segments"][1]["fallback"], "c");
}

#[test]
fn test_render_properties_and_json() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "app.toml",
        "name = \"api\"\n[server]\nurl = \"https://#{name}.example.org\"\n",
    );

    cfgplate(&temp)
        .args(["render", "app.toml"])
        .assert()
        .success()
        .stdout("name=api\nserver.url=https://api.example.org\n");

    let output = cfgplate(&temp).args(["render", "app.toml", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let rendered: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["server.url"], "https://api.example.org");
}

#[test]
fn test_render_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["render", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.yaml"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["-v", "resolve", "#{a}", "-D", "a=1"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_env_fallback_is_quiet() {
    let temp = TempDir::new().unwrap();
    cfgplate(&temp)
        .args(["resolve", "#{CFGPLATE_IT_NOPE_PORT:8080}", "--env"])
        .env_remove("CFGPLATE_IT_NOPE_PORT")
        .assert()
        .success()
        .stdout("8080\n")
        .stderr("");
}
