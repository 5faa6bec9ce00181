//! Integration tests for the PassKeep CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password is passed through `PASSKEEP_PASSWORD` so no
//! interactive prompt is ever shown.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "correct horse battery";

/// Helper: get a Command pointing at the passkeep binary, run inside `dir`.
fn passkeep(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passkeep").expect("binary should exist");
    cmd.current_dir(dir.path())
        .env("PASSKEEP_PASSWORD", PASSWORD)
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: temp dir with an initialized keychain.
fn initialized() -> TempDir {
    let tmp = TempDir::new().unwrap();
    passkeep(&tmp).arg("init").assert().success();
    tmp
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    passkeep(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Password-protected credential keychain"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    passkeep(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passkeep"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    passkeep(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_creates_keychain_files() {
    let tmp = initialized();
    assert!(tmp.path().join(".passkeep/keychain.json").exists());
    assert!(tmp.path().join(".passkeep/keychain.sha256").exists());
}

#[test]
fn init_twice_fails() {
    let tmp = initialized();
    passkeep(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_password() {
    let tmp = TempDir::new().unwrap();
    passkeep(&tmp)
        .env("PASSKEEP_PASSWORD", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8"));
}

#[test]
fn set_then_get_prints_value() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["set", "mail.com", "secret123"])
        .assert()
        .success();

    passkeep(&tmp)
        .args(["get", "mail.com"])
        .assert()
        .success()
        .stdout("secret123\n");
}

#[test]
fn set_reads_piped_value() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["set", "bank.com"])
        .write_stdin("xyz\n")
        .assert()
        .success();

    passkeep(&tmp)
        .args(["get", "bank.com"])
        .assert()
        .success()
        .stdout("xyz\n");
}

#[test]
fn piped_value_keeps_trailing_spaces() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["set", "bank.com"])
        .write_stdin("pass word  \n")
        .assert()
        .success();

    passkeep(&tmp)
        .args(["get", "bank.com"])
        .assert()
        .success()
        .stdout("pass word  \n");
}

#[test]
fn changed_iteration_setting_names_both_counts() {
    let tmp = initialized();
    std::fs::write(
        tmp.path().join(".passkeep.toml"),
        "pbkdf2_iterations = 150000\n",
    )
    .unwrap();

    passkeep(&tmp)
        .args(["get", "mail.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("100000"))
        .stderr(predicate::str::contains("150000"));
}

#[test]
fn get_missing_domain_fails() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["get", "nowhere.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry for 'nowhere.com'"));
}

#[test]
fn get_on_missing_keychain_fails() {
    let tmp = TempDir::new().unwrap();
    passkeep(&tmp)
        .args(["get", "mail.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn wrong_password_and_tampering_look_the_same() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["set", "mail.com", "secret123"])
        .assert()
        .success();

    let wrong_pw = passkeep(&tmp)
        .env("PASSKEEP_PASSWORD", "not the password")
        .args(["get", "mail.com"])
        .assert()
        .failure();
    let wrong_pw_stderr = String::from_utf8(wrong_pw.get_output().stderr.clone()).unwrap();
    assert!(wrong_pw_stderr.contains("Cannot open keychain"));

    let blob_path = tmp.path().join(".passkeep/keychain.json");
    let blob = std::fs::read_to_string(&blob_path).unwrap();
    std::fs::write(&blob_path, blob.replacen("\"version\":1", "\"version\":2", 1)).unwrap();

    let tampered = passkeep(&tmp).args(["get", "mail.com"]).assert().failure();
    let tampered_stderr = String::from_utf8(tampered.get_output().stderr.clone()).unwrap();

    assert_eq!(wrong_pw_stderr, tampered_stderr);
}

#[test]
fn remove_with_force_deletes_entry() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["set", "mail.com", "secret123"])
        .assert()
        .success();

    passkeep(&tmp)
        .args(["remove", "mail.com", "--force"])
        .assert()
        .success();

    passkeep(&tmp)
        .args(["get", "mail.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry"));

    passkeep(&tmp)
        .args(["remove", "mail.com", "--force"])
        .assert()
        .failure();
}

#[test]
fn dump_prints_blob_and_checksum() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["set", "mail.com", "secret123"])
        .assert()
        .success();

    let out = passkeep(&tmp).arg("dump").assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let stored_sum = std::fs::read_to_string(tmp.path().join(".passkeep/keychain.sha256")).unwrap();
    assert_eq!(value["checksum"].as_str().unwrap(), stored_sum.trim());
    assert!(value.get("raw_view").is_none());
    assert!(!stdout.contains("secret123"));
}

#[test]
fn dump_raw_includes_entry_map() {
    let tmp = initialized();
    passkeep(&tmp)
        .args(["set", "mail.com", "secret123"])
        .assert()
        .success();

    let out = passkeep(&tmp).args(["dump", "--raw"]).assert().success();
    let value: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(value["raw_view"].as_object().unwrap().len(), 1);
}

#[test]
fn verify_detects_modified_blob() {
    let tmp = initialized();
    passkeep(&tmp).arg("verify").assert().success();

    let blob_path = tmp.path().join(".passkeep/keychain.json");
    let blob = std::fs::read_to_string(&blob_path).unwrap();
    std::fs::write(&blob_path, format!("{blob} ")).unwrap();

    passkeep(&tmp)
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn keychain_dir_flag_is_respected() {
    let tmp = TempDir::new().unwrap();
    passkeep(&tmp)
        .args(["init", "--keychain-dir", "custom"])
        .assert()
        .success();
    assert!(tmp.path().join("custom/keychain.json").exists());
}
