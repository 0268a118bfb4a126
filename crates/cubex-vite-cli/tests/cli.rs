//! End-to-end tests of the `cubex-vite` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cubex_vite(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cubex-vite"));
    cmd.arg("--cwd")
        .arg(dir)
        .arg("--no-color")
        .env_remove("APP_URL")
        .env_remove("ASSET_URL")
        .env_remove("RUST_LOG")
        .env_remove("CUBEX_VITE_INPUT")
        .env_remove("CUBEX_VITE_BUILD_DIRECTORY")
        .env_remove("CUBEX_VITE_HOT_FILE");
    cmd
}

fn project_with_manifest() -> TempDir {
    let dir = TempDir::new().unwrap();
    let vite = dir.path().join("resources/.vite");
    fs::create_dir_all(&vite).unwrap();
    fs::write(
        vite.join("manifest.json"),
        r#"{
            "src/app.ts": {"file": "assets/app-ABC123.js", "src": "src/app.ts", "isEntry": true},
            "src/app.css": {"file": "assets/app-XYZ789.css", "src": "src/app.css", "isEntry": true}
        }"#,
    )
    .unwrap();
    dir
}

#[test]
fn help_lists_commands() {
    Command::new(env!("CARGO_BIN_EXE_cubex-vite"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("dev"));
}

#[test]
fn resolve_prints_built_uris() {
    let dir = project_with_manifest();

    cubex_vite(dir.path())
        .args(["resolve", "src/app.ts", "src/app.css"])
        .assert()
        .success()
        .stdout("/resources/assets/app-XYZ789.css\n/resources/assets/app-ABC123.js\n");
}

#[test]
fn resolve_renders_html_includes() {
    let dir = project_with_manifest();

    cubex_vite(dir.path())
        .args(["resolve", "--html", "--base", "https://cdn.test/build/", "src/app.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<script src="https://cdn.test/build/assets/app-ABC123.js" type="module"></script>"#,
        ));
}

#[test]
fn resolve_uses_dev_server_when_hot() {
    let dir = project_with_manifest();
    fs::write(dir.path().join(".dev"), "http://localhost:5173").unwrap();

    cubex_vite(dir.path())
        .args(["resolve", "--client", "src/app.ts"])
        .assert()
        .success()
        .stdout("http://localhost:5173/@vite/client\nhttp://localhost:5173/src/app.ts\n");
}

#[test]
fn resolve_honours_configured_hot_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cubex-vite.toml"),
        "hotFile = \"storage/hot\"\nbuildDirectory = \"dist\"\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("storage")).unwrap();
    fs::write(dir.path().join("storage/hot"), "http://localhost:5173").unwrap();

    cubex_vite(dir.path())
        .args(["resolve", "src/app.ts"])
        .assert()
        .success()
        .stdout("http://localhost:5173/src/app.ts\n");
}

#[test]
fn resolve_honours_configured_build_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cubex-vite.toml"), "buildDirectory = \"dist\"\n").unwrap();
    let vite = dir.path().join("dist/.vite");
    fs::create_dir_all(&vite).unwrap();
    fs::write(
        vite.join("manifest.json"),
        r#"{"src/app.ts": {"file": "assets/app-ABC123.js", "src": "src/app.ts", "isEntry": true}}"#,
    )
    .unwrap();

    cubex_vite(dir.path())
        .args(["resolve", "src/app.ts"])
        .assert()
        .success()
        .stdout("/dist/assets/app-ABC123.js\n");

    cubex_vite(dir.path())
        .args(["resolve", "--build-directory", "resources", "src/app.ts"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn resolve_external_requires_no_manifest() {
    let dir = TempDir::new().unwrap();

    cubex_vite(dir.path())
        .args(["resolve", "--external", "--prefix", "vendor/", "lib.js"])
        .assert()
        .success()
        .stdout("vendor/lib.js\n");
}

#[test]
fn clean_removes_hot_file() {
    let dir = TempDir::new().unwrap();
    let hot = dir.path().join(".dev");
    fs::write(&hot, "http://localhost:5173").unwrap();

    cubex_vite(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));
    assert!(!hot.exists());

    cubex_vite(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("No hot file"));
}

#[test]
fn clean_honours_configured_hot_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cubex-vite.toml"),
        "input = [\"src/app.ts\"]\nhotFile = \"storage/hot\"\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("storage")).unwrap();
    fs::write(dir.path().join("storage/hot"), "http://localhost:5173").unwrap();

    cubex_vite(dir.path()).arg("clean").assert().success();
    assert!(!dir.path().join("storage/hot").exists());
}

#[test]
fn config_prints_bundler_patch() {
    let dir = TempDir::new().unwrap();

    let output = cubex_vite(dir.path())
        .args(["config", "src/app.ts"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["config"]["base"], "/resources/");
    assert_eq!(value["config"]["build"]["outDir"], "resources");
    assert_eq!(value["config"]["build"]["manifest"], true);
    assert_eq!(value["plugins"], serde_json::json!([]));
}

#[test]
fn config_reads_env_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "ASSET_URL=https://cdn.test\n").unwrap();

    cubex_vite(dir.path())
        .args(["config", "src/app.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://cdn.test/resources/"));
}

#[test]
fn config_from_toml_with_ssr() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cubex-vite.toml"),
        "input = [\"src/app.ts\"]\nssr = \"src/ssr.ts\"\n",
    )
    .unwrap();

    cubex_vite(dir.path())
        .args(["config", "--ssr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bootstrap/ssr"))
        .stdout(predicate::str::contains("src/ssr.ts"));
}

#[test]
fn config_without_options_fails() {
    let dir = TempDir::new().unwrap();

    cubex_vite(dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing configuration"));
}

#[test]
fn invalid_build_directory_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cubex-vite.toml"),
        "input = \"src/app.ts\"\nbuildDirectory = \"/\"\n",
    )
    .unwrap();

    cubex_vite(dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("buildDirectory"));
}
