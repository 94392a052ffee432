use std::fs;

use crate::common::{stderr_text, stdout_json, Sandbox};

#[test]
fn add_list_show_remove_round_trip() {
    let sandbox = Sandbox::new();

    let saved = stdout_json(&sandbox.run(&[
        "profiles",
        "add",
        "prod",
        "--address",
        "https://prod",
        "--token",
        "p-tok",
    ]));
    assert_eq!(saved["status"], "saved");
    assert!(sandbox.home().join(".humio/profiles.toml").exists());

    let listed = stdout_json(&sandbox.run(&["profiles", "list"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["name"], "prod");

    let shown = stdout_json(&sandbox.run(&["profiles", "show", "prod"]));
    assert_eq!(shown["address"], "https://prod");
    assert_eq!(shown["token"], "*****");

    let removed = stdout_json(&sandbox.run(&["profiles", "remove", "prod"]));
    assert_eq!(removed["status"], "removed");

    let listed = stdout_json(&sandbox.run(&["profiles", "list"]));
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[test]
fn add_with_existing_name_keeps_last_write() {
    let sandbox = Sandbox::new();
    for address in ["https://old", "https://new"] {
        stdout_json(&sandbox.run(&["profiles", "add", "prod", "-a", address, "-t", "tok"]));
    }

    let listed = stdout_json(&sandbox.run(&["profiles", "list"]));

    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["address"], "https://new");
}

#[test]
fn saved_profile_is_used_for_resolution() {
    let sandbox = Sandbox::new();
    let token_file = sandbox.write_file("tok", "from-file");
    stdout_json(&sandbox.run(&[
        "profiles",
        "add",
        "dev",
        "-a",
        "http://localhost:8080",
        "--token-file",
        token_file.to_str().expect("utf-8 path"),
    ]));

    let report = stdout_json(&sandbox.run(&["config", "-u", "dev"]));

    assert_eq!(report["address"], "http://localhost:8080");
    assert_eq!(report["token"], "*********");
}

#[test]
fn remove_unknown_profile_reports_not_found() {
    let sandbox = Sandbox::new();

    let removed = stdout_json(&sandbox.run(&["profiles", "remove", "ghost"]));

    assert_eq!(removed["status"], "not_found");
}

#[test]
fn add_without_address_is_rejected() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["profiles", "add", "prod", "--token", "tok"]);

    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("--address"), "stderr: {}", stderr_text(&output));
}

#[test]
fn corrupt_store_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.install_profiles("profiles_corrupt.toml");

    let output = sandbox.run(&["profiles", "list"]);

    assert!(!output.status.success());
    assert!(
        stderr_text(&output).contains("is corrupt"),
        "stderr: {}",
        stderr_text(&output)
    );
}

#[test]
fn profiles_do_not_touch_the_config_file() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("address: https://cloud.example.com\n");

    stdout_json(&sandbox.run(&["profiles", "add", "prod", "-a", "https://prod", "-t", "tok"]));

    assert_eq!(
        fs::read_to_string(config).expect("config still readable"),
        "address: https://cloud.example.com\n"
    );
}
