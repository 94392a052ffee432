use crate::common::{fixture, stderr_text, stdout_json, Sandbox};

#[test]
fn config_file_supplies_address_and_token() {
    let sandbox = Sandbox::new();
    sandbox.write_config("address: https://cloud.example.com\ntoken: abc\n");

    let report = stdout_json(&sandbox.run(&["config"]));

    assert_eq!(report["address"], "https://cloud.example.com");
    assert_eq!(report["token"], "***");
    assert_eq!(report["address_source"], "config_file");
    assert_eq!(report["token_source"], "config_file");
    assert_eq!(report["client"], "ready");
}

#[test]
fn config_flag_overrides_default_location() {
    let sandbox = Sandbox::new();
    sandbox.write_config("address: https://default\n");
    let path = fixture("tests/fixtures/config_valid.yaml");

    let report = stdout_json(&sandbox.run(&["config", "--config", path.to_str().expect("utf-8 path")]));

    assert_eq!(report["address"], "https://cloud.example.com");
    assert_eq!(report["config_file"], path.display().to_string());
}

#[test]
fn token_file_wins_over_token_flag() {
    let sandbox = Sandbox::new();
    let token_file = sandbox.write_file("tok", "filetok");

    let report = stdout_json(&sandbox.run(&[
        "config",
        "--address",
        "https://flag",
        "--token",
        "flagtok",
        "--token-file",
        token_file.to_str().expect("utf-8 path"),
    ]));

    assert_eq!(report["token"], "*******");
    assert_eq!(report["token_source"], "token_file");
    assert_eq!(report["address_source"], "flag");
}

#[test]
fn unreadable_token_file_aborts() {
    let sandbox = Sandbox::new();
    let missing = sandbox.home().join("absent-token");

    let output = sandbox.run(&[
        "config",
        "--token",
        "flagtok",
        "--token-file",
        missing.to_str().expect("utf-8 path"),
    ]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "nothing should be printed on stdout");
    assert!(
        stderr_text(&output).contains("Failed to read token file"),
        "stderr: {}",
        stderr_text(&output)
    );
}

#[test]
fn profile_wins_over_config_file() {
    let sandbox = Sandbox::new();
    sandbox.write_config("address: https://default\n");
    sandbox.install_profiles("profiles_valid.toml");

    let report = stdout_json(&sandbox.run(&["config", "--profile", "prod"]));

    assert_eq!(report["address"], "https://prod");
    assert_eq!(report["token"], "*****");
    assert_eq!(report["address_source"], "profile");
    assert_eq!(report["token_source"], "profile");
}

#[test]
fn address_flag_wins_over_profile() {
    let sandbox = Sandbox::new();
    sandbox.install_profiles("profiles_valid.toml");

    let report = stdout_json(&sandbox.run(&["config", "-u", "prod", "-a", "https://flag"]));

    assert_eq!(report["address"], "https://flag");
    assert_eq!(report["token_source"], "profile");
}

#[test]
fn missing_profile_aborts() {
    let sandbox = Sandbox::new();
    sandbox.install_profiles("profiles_valid.toml");

    let output = sandbox.run(&["config", "--profile", "missing"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no report should be produced");
    assert!(
        stderr_text(&output).contains("Profile `missing` was not found"),
        "stderr: {}",
        stderr_text(&output)
    );
}

#[test]
fn environment_wins_over_config_file() {
    let sandbox = Sandbox::new();
    sandbox.write_config("address: https://file\ntoken: file-token\n");

    let output = sandbox
        .command()
        .args(["config"])
        .env("HUMIO_TOKEN", "env-token")
        .env("HUMIO_ADDRESS", "https://env")
        .output()
        .expect("humioctl should start");
    let report = stdout_json(&output);

    assert_eq!(report["address"], "https://env");
    assert_eq!(report["address_source"], "environment");
    assert_eq!(report["token_source"], "environment");
}

#[test]
fn corrupt_config_file_aborts() {
    let sandbox = Sandbox::new();
    let path = fixture("tests/fixtures/config_corrupt.yaml");

    let output = sandbox.run(&["config", "-c", path.to_str().expect("utf-8 path")]);

    assert!(!output.status.success());
    assert!(
        stderr_text(&output).contains("Failed to parse configuration file"),
        "stderr: {}",
        stderr_text(&output)
    );
}

#[test]
fn unresolved_address_is_left_to_the_client_factory() {
    let sandbox = Sandbox::new();

    let report = stdout_json(&sandbox.run(&["config", "--token", "only-token"]));

    assert_eq!(report["address"], "");
    assert_eq!(report["address_source"], "unset");
    assert!(
        report["client"]
            .as_str()
            .is_some_and(|message| message.starts_with("No Humio address configured")),
        "report: {report}"
    );
}

#[test]
fn root_without_configuration_prints_welcome() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&[]);

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Welcome to humioctl"));
}

#[test]
fn root_with_configuration_prints_help() {
    let sandbox = Sandbox::new();
    sandbox.write_config("address: https://cloud.example.com\n");

    let output = sandbox.run(&[]);

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout: {stdout}");
    assert!(!stdout.contains("Welcome to humioctl"));
}

#[cfg(unix)]
#[test]
fn non_utf8_unrelated_variable_does_not_crash() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let sandbox = Sandbox::new();
    sandbox.write_config("address: https://cloud.example.com\n");

    let output = sandbox
        .command()
        .args(["config"])
        .env("JUNK", OsStr::from_bytes(b"\xff"))
        .env("HUMIO_TOKEN", "env-token")
        .output()
        .expect("humioctl should start");
    let report = stdout_json(&output);

    assert_eq!(report["address_source"], "config_file");
    assert_eq!(report["token_source"], "environment");
}

#[test]
fn non_utf8_config_file_aborts() {
    let sandbox = Sandbox::new();
    let path = sandbox.humio_dir().join("config.yaml");
    std::fs::write(&path, b"address: https://x\ntoken: \xff\xfe\n").expect("can write config");

    let output = sandbox.run(&["config"]);

    assert!(!output.status.success());
    assert!(
        stderr_text(&output).contains("Failed to parse configuration file"),
        "stderr: {}",
        stderr_text(&output)
    );
}

#[test]
fn directory_at_config_path_aborts() {
    let sandbox = Sandbox::new();
    std::fs::create_dir(sandbox.humio_dir().join("config.yaml")).expect("can create directory");

    let output = sandbox.run(&["config"]);

    assert!(!output.status.success());
    assert!(
        stderr_text(&output).contains("Failed to read configuration file"),
        "stderr: {}",
        stderr_text(&output)
    );
}

#[test]
fn non_utf8_token_file_aborts() {
    let sandbox = Sandbox::new();
    let token_file = sandbox.home().join("tok");
    std::fs::write(&token_file, b"tok\xff").expect("can write token file");

    let output = sandbox.run(&[
        "config",
        "--address",
        "https://flag",
        "--token-file",
        token_file.to_str().expect("utf-8 path"),
    ]);

    assert!(!output.status.success());
    assert!(
        stderr_text(&output).contains("Failed to read token file"),
        "stderr: {}",
        stderr_text(&output)
    );
}

#[test]
fn short_v_prints_version() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["-v"]);

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
