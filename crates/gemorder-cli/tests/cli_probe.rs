use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Point HOME at the temp dir so no user config leaks in, and use a
// nonexistent gem binary so any unexpected external call fails loudly.
fn gemorder_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gemorder").unwrap();
    cmd.env("HOME", home.path())
        .env("GEMORDER_GEM_BIN", "gem_program_that_does_not_exist_xyz");
    cmd
}

#[test]
fn test_probe_rejects_path_separator_names() {
    let tmp = TempDir::new().unwrap();

    gemorder_cmd(&tmp)
        .args(["probe", "valid-pkg/with/slash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not a fetchable gem"));
}

#[test]
fn test_probe_uses_cached_artifact() {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("probe-cache");
    fs::create_dir_all(&cache).unwrap();
    fs::write(cache.join("gem-fetch-rails"), "Downloaded rails-7.0.8.gem\n").unwrap();

    gemorder_cmd(&tmp)
        .args(["probe", "rails"])
        .arg("--probe-cache-dir")
        .arg(&cache)
        .assert()
        .success()
        .stdout(predicate::str::contains("rails is a fetchable gem"));
}

#[test]
fn test_probe_cached_error_output_means_missing() {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("probe-cache");
    fs::create_dir_all(&cache).unwrap();
    fs::write(
        cache.join("gem-fetch-nonexistent-zzz"),
        "ERROR:  Could not find a valid gem 'nonexistent-zzz'\n",
    )
    .unwrap();

    gemorder_cmd(&tmp)
        .args(["probe", "nonexistent-zzz"])
        .arg("--probe-cache-dir")
        .arg(&cache)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "nonexistent-zzz is not a fetchable gem",
        ));
}

#[test]
fn test_probe_missing_gem_binary_answers_missing() {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("probe-cache");

    gemorder_cmd(&tmp)
        .args(["probe", "rails"])
        .arg("--probe-cache-dir")
        .arg(&cache)
        .assert()
        .success()
        .stdout(predicate::str::contains("rails is not a fetchable gem"));
}
