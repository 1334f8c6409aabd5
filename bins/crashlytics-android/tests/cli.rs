use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ROOT_GRADLE: &str = "\
buildscript {
    repositories repos
    dependencies {
        classpath 'com.android.tools.build:gradle:3.3.0'
    }
}

allprojects {
    repositories repos
}
";

fn project_with(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let gradle = dir.path().join("platforms/android/build.gradle");
    fs::create_dir_all(gradle.parent().unwrap()).unwrap();
    fs::write(&gradle, contents).unwrap();
    (dir, gradle)
}

fn cli(project_root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("crashlytics-android").unwrap();
    cmd.arg("--project-root")
        .arg(project_root)
        .arg("--no-color")
        .env_remove("RUST_LOG")
        .env_remove("CORDOVA_HOOK");
    cmd
}

#[test]
fn modify_then_restore() {
    let (dir, gradle) = project_with(ROOT_GRADLE);

    cli(dir.path())
        .arg("modify")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lines added"));

    let patched = fs::read_to_string(&gradle).unwrap();
    assert!(patched.contains("classpath 'com.google.gms:google-services:4.3.3'"));
    assert!(patched.contains("classpath 'com.google.firebase:firebase-crashlytics-gradle:2.3.0'"));
    assert!(patched.contains("repositories { google() }"));

    cli(dir.path())
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lines removed"));

    assert_eq!(fs::read_to_string(&gradle).unwrap(), ROOT_GRADLE);
}

#[test]
fn modify_twice_is_guarded() {
    let (dir, gradle) = project_with(ROOT_GRADLE);

    cli(dir.path()).arg("modify").assert().success();
    cli(dir.path())
        .arg("modify")
        .assert()
        .success()
        .stdout(predicate::str::contains("already patched"));

    let patched = fs::read_to_string(&gradle).unwrap();
    assert_eq!(patched.matches("cordova-plugin-firebase").count(), 3);
}

#[test]
fn dry_run_prints_without_writing() {
    let (dir, gradle) = project_with(ROOT_GRADLE);

    cli(dir.path())
        .args(["modify", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("firebase-crashlytics-gradle:2.3.0"));

    assert_eq!(fs::read_to_string(&gradle).unwrap(), ROOT_GRADLE);
}

#[test]
fn status_json_reports_patch() {
    let (dir, _gradle) = project_with(ROOT_GRADLE);
    cli(dir.path()).arg("modify").assert().success();

    cli(dir.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"patched\": true"))
        .stdout(predicate::str::contains("\"marker_lines\": 3"));
}

#[test]
fn missing_anchor_fails_without_writing() {
    let original = "allprojects {\n    repositories repos\n}\n";
    let (dir, gradle) = project_with(original);

    cli(dir.path())
        .arg("modify")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("E4001"));

    assert_eq!(fs::read_to_string(&gradle).unwrap(), original);
}

#[test]
fn missing_platform_is_noop() {
    let dir = TempDir::new().unwrap();

    cli(dir.path())
        .arg("modify")
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to patch"));

    cli(dir.path()).arg("restore").assert().success();
}

#[test]
fn configured_versions_are_used() {
    let (dir, gradle) = project_with(ROOT_GRADLE);
    fs::write(
        dir.path().join(".crashlytics-hooks.toml"),
        "[dependencies]\ncrashlytics_gradle_version = \"2.9.9\"\n",
    )
    .unwrap();

    cli(dir.path()).arg("modify").assert().success();
    assert!(fs::read_to_string(&gradle)
        .unwrap()
        .contains("firebase-crashlytics-gradle:2.9.9"));
}

#[test]
fn missing_config_file_is_config_error() {
    let (dir, _gradle) = project_with(ROOT_GRADLE);

    cli(dir.path())
        .args(["--config", "does-not-exist.toml", "status"])
        .assert()
        .code(3);
}
