//! Command line behavior of the player_release binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn player_release(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("player_release").unwrap();
    cmd.arg("--project")
        .arg(project)
        .env_remove("BUILD_VERSION")
        .env_remove("PLAYER_RELEASE_ENGINE");
    cmd
}

fn write_settings(project: &Path, contents: &str) -> std::path::PathBuf {
    let path = project.join("ProjectSettings/player.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn dry_run_webgl_reads_build_version() {
    let dir = tempfile::tempdir().unwrap();

    player_release(dir.path())
        .env("BUILD_VERSION", "2.3.4")
        .args(["build", "webgl", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built webgl 2.3.4"))
        .stdout(predicate::str::contains("dry run"));
}

#[test]
fn dry_run_does_not_write_settings() {
    let dir = tempfile::tempdir().unwrap();

    player_release(dir.path())
        .args(["build", "android-apk", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("development | compress-lz4hc"));

    assert!(!dir.path().join("ProjectSettings/player.toml").exists());
}

#[test]
fn build_without_engine_fails_with_hint() {
    let dir = tempfile::tempdir().unwrap();

    player_release(dir.path())
        .args(["build", "android-aab", "--no-reveal"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--engine"));
}

#[test]
fn verbose_failure_lists_recovery_suggestions() {
    let dir = tempfile::tempdir().unwrap();

    player_release(dir.path())
        .args(["build", "android-aab", "--no-reveal"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Re-running unchanged"))
        .stdout(predicate::str::contains("Recovery suggestions").not());

    player_release(dir.path())
        .args(["build", "android-aab", "--no-reveal", "--verbose"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("PLAYER_RELEASE_ENGINE"));
}

#[test]
fn blank_product_name_exits_with_skip_code() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path(), "product_name = \"\"\n");

    player_release(dir.path())
        .args(["build", "webgl", "--dry-run"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Build skipped"));
}

#[test]
fn copy_server_data_rejected_for_android() {
    let dir = tempfile::tempdir().unwrap();

    player_release(dir.path())
        .args(["build", "android-apk", "--dry-run", "--copy-server-data"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only applies to webgl"));
}

#[test]
fn bump_updates_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(
        dir.path(),
        "# release numbers\nbundle_version = \"1.2.9\"\n\n[android]\nbundle_version_code = 7\n\n[ios]\nbuild_number = \"3\"\n",
    );

    player_release(dir.path())
        .arg("bump")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.9 → 1.2.10"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# release numbers\n"));
    assert!(written.contains("bundle_version = \"1.2.10\""));
    assert!(written.contains("bundle_version_code = 8"));
    assert!(written.contains("build_number = \"4\""));
}

#[test]
fn bump_rejects_malformed_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(dir.path(), "bundle_version = \"1.2.x\"\n");

    player_release(dir.path())
        .arg("bump")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed version '1.2.x'"));

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "bundle_version = \"1.2.x\"\n"
    );
}

#[cfg(unix)]
#[test]
fn engine_command_builds_and_saves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(dir.path(), "bundle_version = \"7.0.0\"\n");

    player_release(dir.path())
        .args([
            "build",
            "webgl",
            "--no-reveal",
            "--engine",
            "sh",
            "--engine-arg",
            "-c",
            "--engine-arg",
            "test -f \"$2\" && mkdir -p Build/WebGL/AR-Magic-Lite && echo ok > Build/WebGL/AR-Magic-Lite/index.html",
            "--engine-arg",
            "engine",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built webgl 0.0.1"));

    assert!(dir.path().join("Build/requests/webgl.json").exists());
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("bundle_version = \"0.0.1\""));
    assert!(written.contains("compression_format = \"disabled\""));
}

#[cfg(unix)]
#[test]
fn engine_failure_reports_stderr() {
    let dir = tempfile::tempdir().unwrap();

    player_release(dir.path())
        .args([
            "build",
            "android-apk",
            "--no-reveal",
            "--engine",
            "sh",
            "--engine-arg",
            "-c",
            "--engine-arg",
            "echo 'missing Android SDK' >&2; exit 3",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing Android SDK"));
}
