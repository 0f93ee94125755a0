mod support;

use predicates::prelude::*;
use std::fs;

use support::{TODAY, assert_timestamp_log_names, new_command_with_temp_home, write_config};

#[test]
fn root_help_lists_subcommands() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: tvmount"))
        .stdout(predicate::str::contains("--diagnostics"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("quote"))
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("doctor"))
        .stdout(predicate::str::contains("--today").not());
}

#[test]
fn catalog_prints_standard_tables_without_config() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("85\""))
        .stdout(predicate::str::contains("$249"))
        .stdout(predicate::str::contains("Full Motion Mount"))
        .stdout(predicate::str::contains("Masonry drilling with concrete anchors"));
}

#[test]
fn mounts_flags_the_recommended_mount() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["mounts", "--size", "55"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tilting Mount (recommended)"))
        .stdout(predicate::str::contains("Full Motion Mount"));
}

#[test]
fn mounts_for_largest_tv_only_lists_fixed() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["mounts", "--size", "85"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed Mount"))
        .stdout(predicate::str::contains("Tilting Mount").not())
        .stdout(predicate::str::contains("(recommended)").not());
}

#[test]
fn mounts_rejects_unknown_size() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["mounts", "--size", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: TV size 50\" is not in the catalog"));
}

#[test]
fn quote_prints_deposit_split() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["quote", "--size", "65", "--mount", "tilting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$258"))
        .stdout(predicate::str::contains("$65"))
        .stdout(predicate::str::contains("$193"));
}

#[test]
fn quote_with_custom_mount_on_brick() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args([
            "quote",
            "--size",
            "32",
            "--custom-mount",
            "--surface",
            "BRICK",
            "--plan",
            "full",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer-provided mount"))
        .stdout(predicate::str::contains("$149"))
        .stdout(predicate::str::contains("Due at installation").not());
}

#[test]
fn quote_rejects_incompatible_mount() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["quote", "--size", "85", "--mount", "articulating"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("articulating mount does not fit a 85\" TV"));
}

#[test]
fn quote_rejects_unknown_mount_kind() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["quote", "--size", "55", "--mount", "swivel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected one of: fixed, tilting, articulating",
        ));
}

#[test]
fn availability_skips_sundays() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["--today", TODAY, "availability"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-03"))
        .stdout(predicate::str::contains("2026-03-16"))
        .stdout(predicate::str::contains("Bookable dates after 2026-03-02"))
        .stdout(predicate::str::contains("2026-03-08").not())
        .stdout(predicate::str::contains("6:00 PM - 8:00 PM"));
}

#[test]
fn availability_honours_configured_horizon() {
    let (mut command, temp_home) = new_command_with_temp_home();
    write_config(temp_home.path(), "version = 1\n[schedule]\nhorizon_days = 3\n");

    command
        .args(["--today", TODAY, "availability"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-05"))
        .stdout(predicate::str::contains("2026-03-06").not());
}

#[test]
fn invalid_config_blocks_commands_with_recovery_hint() {
    let (mut command, temp_home) = new_command_with_temp_home();
    write_config(temp_home.path(), "version = 2\n");

    command
        .arg("catalog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config at"))
        .stderr(predicate::str::contains(".config/tvmount/config.toml"))
        .stderr(predicate::str::contains("remove it to use the standard catalog"));
}

#[test]
fn doctor_runs_without_config() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains(".config/tvmount/config.toml"))
        .stdout(predicate::str::contains("every size has a compatible mount"))
        .stdout(predicate::str::contains("5 passed, 0 failed"));
}

#[test]
fn doctor_reports_invalid_config() {
    let (mut command, temp_home) = new_command_with_temp_home();
    write_config(temp_home.path(), "version = 2\n");

    command
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("version must be 1"))
        .stdout(predicate::str::contains("1 passed, 4 failed"));
}

#[test]
fn doctor_with_diagnostics_creates_log_file() {
    let (mut command, temp_home) = new_command_with_temp_home();
    command
        .args(["--diagnostics", "doctor"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Diagnostics log:"));

    let diagnostics_dir = temp_home.path().join(".config/tvmount/diagnostics");
    let logs: Vec<_> = fs::read_dir(&diagnostics_dir)
        .expect("diagnostics dir")
        .collect::<Result<_, _>>()
        .expect("diagnostics entries");
    assert_timestamp_log_names(&logs);

    let contents = fs::read_to_string(logs[0].path()).expect("read diagnostics log");
    assert!(contents.contains("tvmount diagnostics start"));
    assert!(contents.contains("tvmount starting"), "debug events reach the log: {contents}");
}

#[test]
fn today_override_rejects_bad_dates() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["--today", "tomorrow", "availability"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}
