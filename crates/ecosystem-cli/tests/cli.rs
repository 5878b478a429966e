use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ACCOUNTING: &str = r#"{
    "apps": [
        {
            "name": "accounting-app",
            "command": "npm",
            "args": "start",
            "environment": { "NODE_ENV": "development", "PORT": "3000" },
            "environment_by_mode": {
                "production": { "NODE_ENV": "production", "PORT": "8080" }
            }
        }
    ]
}"#;

fn write_descriptor(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn ecosystem(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ecosystem").unwrap();
    cmd.current_dir(dir.path())
        .env("ECOSYSTEM_CONFIG", dir.path().join("no-config.toml"))
        .env_remove("ECOSYSTEM_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn validate_accepts_valid_descriptor() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "apps.json", ACCOUNTING);

    ecosystem(&dir)
        .arg("--file")
        .arg(&file)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid (1 app)"));
}

#[test]
fn validate_reports_duplicate_names() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(
        &dir,
        "apps.yaml",
        "apps:\n  - name: accounting-app\n    command: npm\n  - name: accounting-app\n    command: npm\n",
    );

    ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("apps[1].name"))
        .stderr(predicate::str::contains("DUPLICATE_NAME"));
}

#[test]
fn validate_reports_numeric_port() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(
        &dir,
        "apps.toml",
        "[[apps]]\nname = \"accounting-app\"\ncommand = \"npm\"\n\n[apps.environment]\nPORT = 3000\n",
    );

    ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("apps[0].environment.PORT"))
        .stderr(predicate::str::contains("NON_STRING_ENV_VALUE"));
}

#[test]
fn validate_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "apps.json", ACCOUNTING);

    let output = ecosystem(&dir)
        .args(["-o", "json", "-f"])
        .arg(&file)
        .arg("validate")
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["valid"], true);
    assert_eq!(summary["apps"], 1);
    assert_eq!(summary["errors"], serde_json::json!([]));
}

#[test]
fn default_descriptor_file_is_used() {
    let dir = TempDir::new().unwrap();
    write_descriptor(&dir, "ecosystem.config.json", ACCOUNTING);

    ecosystem(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("accounting-app"))
        .stdout(predicate::str::contains("production"));
}

#[test]
fn env_resolves_mode_overrides() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "apps.json", ACCOUNTING);

    ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .args(["env", "accounting-app", "--env", "production"])
        .assert()
        .success()
        .stdout("NODE_ENV=production\nPORT=8080\n");

    ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .args(["env", "accounting-app"])
        .assert()
        .success()
        .stdout("NODE_ENV=development\nPORT=3000\n");
}

#[test]
fn default_mode_comes_from_config() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "apps.json", ACCOUNTING);
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "default_file = {:?}\ndefault_mode = \"production\"\n",
            file.display().to_string()
        ),
    )
    .unwrap();

    ecosystem(&dir)
        .env("ECOSYSTEM_CONFIG", &config)
        .args(["env", "accounting-app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PORT=8080"));
}

#[test]
fn show_prints_launch_plan_as_json() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "apps.json", ACCOUNTING);

    let output = ecosystem(&dir)
        .args(["-o", "json", "-f"])
        .arg(&file)
        .args(["show", "accounting-app", "-e", "production"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["program"], "npm");
    assert_eq!(plan["args"], serde_json::json!(["start"]));
    assert_eq!(plan["mode"], "production");
    assert_eq!(plan["env"]["PORT"], "8080");
}

#[test]
fn show_unknown_app_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "apps.json", ACCOUNTING);

    ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .args(["show", "billing-app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("App not found: billing-app"));
}

#[test]
fn convert_round_trips_through_yaml() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "apps.json", ACCOUNTING);

    let output = ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .args(["convert", "--to", "yaml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let yaml = write_descriptor(&dir, "apps.yaml", &String::from_utf8(output.stdout).unwrap());
    ecosystem(&dir)
        .arg("-f")
        .arg(&yaml)
        .args(["env", "accounting-app", "-e", "production"])
        .assert()
        .success()
        .stdout("NODE_ENV=production\nPORT=8080\n");
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(&dir, "ecosystem.config.js", "module.exports = {}");

    ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported descriptor format"));
}

#[test]
fn config_prints_effective_settings_as_json() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "default_file = \"apps.yaml\"\ndefault_mode = \"staging\"\n").unwrap();

    let output = ecosystem(&dir)
        .env("ECOSYSTEM_CONFIG", &config)
        .args(["-o", "json", "config"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let effective: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(effective["descriptor"], "apps.yaml");
    assert_eq!(effective["mode"], "staging");
    assert_eq!(effective["config"]["default_mode"], "staging");
}

#[test]
fn validate_prints_each_warning_once() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(
        &dir,
        "apps.json",
        r#"{ "apps": [ { "name": "api", "command": "node", "environment": { "PORT": "http" } } ] }"#,
    );

    let output = ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .arg("validate")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stdout.matches("INVALID_PORT").count(), 1, "stdout: {}", stdout);
    assert!(!stderr.contains("INVALID_PORT"), "stderr: {}", stderr);
}

#[test]
fn duplicate_env_key_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let file = write_descriptor(
        &dir,
        "apps.json",
        r#"{ "apps": [ { "name": "api", "command": "node",
            "environment": { "PORT": "3000", "PORT": "4000" } } ] }"#,
    );

    ecosystem(&dir)
        .arg("-f")
        .arg(&file)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key `PORT`"));
}
