//! Configuration precedence: defaults, then the `HOLDEM_CONFIG` file, then
//! `HOLDEM_*` environment overrides.

use serde_json::Value;
use serial_test::serial;
use std::io::Write as _;

const VARS: [&str; 7] = [
    "HOLDEM_CONFIG",
    "HOLDEM_SEED",
    "HOLDEM_PLAYERS",
    "HOLDEM_STACK",
    "HOLDEM_BET_LEVEL",
    "HOLDEM_AI_TRIALS",
    "HOLDEM_SOLVER_TRIALS",
];

fn clear_env() {
    for v in VARS {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn cfg_json() -> Value {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(["holdem", "cfg"], &mut out, &mut err);
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    serde_json::from_slice(&out).expect("cfg prints JSON")
}

fn write_config(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(body.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    clear_env();
    let json = cfg_json();
    assert_eq!(json["seed"]["value"], Value::Null);
    assert_eq!(json["players"]["value"].as_u64(), Some(6));
    assert_eq!(json["starting_stack"]["value"].as_u64(), Some(1500));
    assert_eq!(json["ai_trials"]["value"].as_u64(), Some(300));
    assert_eq!(json["solver_trials"]["value"].as_u64(), Some(800));
    for key in ["seed", "players", "starting_stack", "bet_level", "ai_trials", "solver_trials"] {
        assert_eq!(json[key]["source"].as_str(), Some("default"), "{key}");
    }
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let file = write_config("seed = 456\nplayers = 4\nsolver_trials = 200\n");
    unsafe {
        std::env::set_var("HOLDEM_CONFIG", file.path());
    }
    let json = cfg_json();
    assert_eq!(json["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json["seed"]["source"].as_str(), Some("file"));
    assert_eq!(json["players"]["value"].as_u64(), Some(4));
    assert_eq!(json["solver_trials"]["source"].as_str(), Some("file"));
    assert_eq!(json["ai_trials"]["source"].as_str(), Some("default"));

    unsafe {
        std::env::set_var("HOLDEM_SEED", "123");
        std::env::set_var("HOLDEM_PLAYERS", "3");
    }
    let json = cfg_json();
    assert_eq!(json["seed"]["value"].as_u64(), Some(123));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["players"]["value"].as_u64(), Some(3));
    assert_eq!(json["players"]["source"].as_str(), Some("env"));
    assert_eq!(json["solver_trials"]["source"].as_str(), Some("file"));
    clear_env();
}

#[test]
#[serial]
fn configured_seed_drives_equity() {
    clear_env();
    unsafe {
        std::env::set_var("HOLDEM_SEED", "77");
        std::env::set_var("HOLDEM_SOLVER_TRIALS", "150");
    }
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(["holdem", "equity", "--hero", "Kc Kd"], &mut out, &mut err);
    clear_env();
    assert_eq!(code, 0);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Trials: 150 (seed 77)"), "{out}");
}

#[test]
#[serial]
fn invalid_values_fail_with_exit_two() {
    for (key, value) in [
        ("HOLDEM_PLAYERS", "12"),
        ("HOLDEM_STACK", "0"),
        ("HOLDEM_SEED", "not-a-number"),
        ("HOLDEM_AI_TRIALS", "0"),
    ] {
        clear_env();
        unsafe {
            std::env::set_var(key, value);
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = holdem_cli::run(["holdem", "cfg"], &mut out, &mut err);
        assert_eq!(code, 2, "{key}={value}");
        assert!(String::from_utf8(err).unwrap().contains("Error:"), "{key}");
    }
    clear_env();
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    clear_env();
    let file = write_config("seed = 1\nadaptive = true\n");
    unsafe {
        std::env::set_var("HOLDEM_CONFIG", file.path());
    }
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(["holdem", "cfg"], &mut out, &mut err);
    clear_env();
    assert_eq!(code, 2);
    assert!(out.is_empty());
}
