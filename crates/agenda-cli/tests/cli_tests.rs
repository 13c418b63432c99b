//! Integration tests for the `agenda` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the slots and check
//! subcommands through the actual binary, pinning "today" with --from so the
//! results do not depend on when the tests run. 2026-09-07 is a Monday.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the professional.json fixture.
fn professional_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/professional.json")
}

/// Helper: path to the appointments.json fixture.
fn appointments_path() -> &'static str {
    concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/appointments.json"
    )
}

/// Helper: path to the fixture with one malformed weekday.
fn malformed_path() -> &'static str {
    concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/professional_malformed.json"
    )
}

/// Helper: run `agenda slots` for pro-ana pinned to 2026-09-07 and parse the
/// JSON output.
fn slots_for_ana() -> serde_json::Value {
    let output = Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            professional_path(),
            "--appointments",
            appointments_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
            "--from",
            "2026-09-07",
        ])
        .output()
        .expect("slots should run");
    assert!(output.status.success(), "slots must succeed");
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Slots subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_outputs_date_keyed_mapping() {
    let json = slots_for_ana();
    let map = json.as_object().expect("output is a JSON object");

    // 7-day window from the pinned Monday, every date present.
    assert_eq!(map.len(), 7);
    assert!(map.contains_key("2026-09-07"));
    assert!(map.contains_key("2026-09-13"));
}

#[test]
fn slots_skips_booked_interval_and_resumes_at_its_end() {
    let json = slots_for_ana();

    // Monday 09:00-12:00 and 14:00-18:00 with a 10:00-10:30 booking:
    // 10:00 is consumed, 10:30 resumes exactly at the booking's end.
    assert_eq!(
        json["2026-09-07"],
        serde_json::json!([
            "09:00", "09:30", "10:30", "11:00", "11:30", "14:00", "14:30", "15:00", "15:30",
            "16:00", "16:30", "17:00", "17:30"
        ])
    );
}

#[test]
fn slots_applies_duration_fallback_to_legacy_appointments() {
    let json = slots_for_ana();

    // The Tuesday appointment document has no duration; it falls back to the
    // 30-minute service duration and blocks 09:00 out of the 09:00-10:00 day.
    assert_eq!(json["2026-09-08"], serde_json::json!(["09:30"]));
}

#[test]
fn slots_respects_exception_dates() {
    let json = slots_for_ana();

    // Wednesday 2026-09-09 is an exception despite the 09:00-17:00 schedule.
    assert_eq!(json["2026-09-09"], serde_json::json!([]));
}

#[test]
fn slots_ignores_other_professionals() {
    let json = slots_for_ana();

    // pro-luis has Monday 09:00-10:00 booked; pro-ana's 09:00 stays free.
    assert_eq!(json["2026-09-07"][0], "09:00");
}

#[test]
fn slots_without_appointments_file_has_full_density() {
    let output = Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            professional_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "45",
            "--from",
            "2026-09-07",
        ])
        .output()
        .expect("slots should run");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    // Tuesday 09:00-10:00 at 45 minutes: one slot, remainder discarded.
    assert_eq!(json["2026-09-08"], serde_json::json!(["09:00"]));
}

#[test]
fn slots_warns_about_malformed_weekday_but_still_computes() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            malformed_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
            "--from",
            "2026-09-07",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("tuesday"))
        .stderr(predicate::str::contains("24:30"))
        .stdout(predicate::str::contains("09:00"));
}

#[test]
fn clock_filter_with_pinned_time_drops_elapsed_slots() {
    let output = Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            professional_path(),
            "--appointments",
            appointments_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
            "--from",
            "2026-09-07",
            "--at",
            "10:10",
            "--clock-filter",
        ])
        .output()
        .expect("slots should run");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    // Monday at 10:10: 09:00-10:00 have elapsed and 10:00 is booked anyway;
    // the day resumes at 10:30. Tuesday is untouched by the clock filter.
    assert_eq!(
        json["2026-09-07"],
        serde_json::json!([
            "10:30", "11:00", "11:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30",
            "17:00", "17:30"
        ])
    );
    assert_eq!(json["2026-09-08"], serde_json::json!(["09:30"]));
}

#[test]
fn clock_filter_without_pinned_time_warns() {
    // --from alone pins "now" to 00:00, where the clock filter drops nothing;
    // the run still succeeds but says so.
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            professional_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
            "--from",
            "2026-09-07",
            "--clock-filter",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("--clock-filter has no effect"))
        .stdout(predicate::str::contains("09:00"));
}

#[test]
fn at_flag_requires_from() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            professional_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
            "--at",
            "10:10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from"));
}

#[test]
fn slots_rejects_unknown_timezone() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            professional_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
            "--timezone",
            "Mars/Olympus_Mons",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown IANA timezone"));
}

#[test]
fn slots_writes_output_file() {
    let output_path = "/tmp/agenda-test-slots-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            professional_path(),
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
            "--from",
            "2026-09-07",
            "-o",
            output_path,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(json.as_object().unwrap().contains_key("2026-09-07"));

    let _ = std::fs::remove_file(output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_rejects_occupied_slot() {
    // 10:00 Monday was booked between the availability query and the commit.
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "check",
            "--appointments",
            appointments_path(),
            "--professional-id",
            "pro-ana",
            "--start",
            "2026-09-07T10:00",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("slot no longer available"));
}

#[test]
fn check_accepts_free_slot() {
    // 10:30 starts exactly when the existing booking ends: no conflict.
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "check",
            "--appointments",
            appointments_path(),
            "--professional-id",
            "pro-ana",
            "--start",
            "2026-09-07T10:30",
            "--duration",
            "30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("free"));
}

#[test]
fn check_ignores_other_professionals() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "check",
            "--appointments",
            appointments_path(),
            "--professional-id",
            "pro-ana",
            "--start",
            "2026-09-07T09:00",
            "--duration",
            "30",
        ])
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_professional_file_fails() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "slots",
            "--professional",
            "/nonexistent/prof.json",
            "--professional-id",
            "pro-ana",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn invalid_start_timestamp_fails() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "check",
            "--appointments",
            appointments_path(),
            "--professional-id",
            "pro-ana",
            "--start",
            "next tuesday at ten",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --start timestamp"));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("agenda")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("slots"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("agenda")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
