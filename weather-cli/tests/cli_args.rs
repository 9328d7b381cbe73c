//! Smoke tests running the built binary.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weather-cli"))
        .args(args)
        .output()
        .expect("Failed to execute weather-cli")
}

/// Run the interactive loop with `input` piped to stdin.
fn run_interactive(config: &Path, input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_weather-cli"))
        .args(["--config", config.to_str().expect("utf8 path")])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute weather-cli");

    child.stdin.take().expect("piped stdin").write_all(input).expect("write stdin");
    child.wait_with_output().expect("wait for weather-cli")
}

/// Config with a dummy key and an empty history under `dir`.
fn interactive_config(dir: &Path) -> PathBuf {
    let history = dir.join("history.json").display().to_string();
    let config = dir.join("config.toml");
    let contents = format!("api_key = \"KEY\"\nhistory_file = {history:?}\n");
    std::fs::write(&config, contents).expect("write config");
    config
}

#[test]
fn help_lists_subcommands() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for sub in ["configure", "current", "forecast", "history"] {
        assert!(stdout.contains(sub), "help should mention {sub}");
    }
}

#[test]
fn forecast_rejects_out_of_range_days() {
    let output = run_cli(&["forecast", "Omsk", "--days", "42"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("between 1 and 10"), "{stderr}");
}

#[test]
fn history_reads_configured_file() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let history = dir.path().join("history.json");
    let config = dir.path().join("config.toml");
    std::fs::write(
        &history,
        r#"[{"city":"тверь","timestamp":"01.01.2024 08:00","temperature":-5.0,"feels_like":-9.0,
            "humidity":85,"pressure":1020,"wind_speed":3.0,"description":"Снег","visibility":null}]"#,
    )
    .expect("write history");
    std::fs::write(&config, format!("history_file = {:?}\n", history.display().to_string()))
        .expect("write config");

    let output = run_cli(&["history", "--config", config.to_str().expect("utf8 path")]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. тверь - 01.01.2024 08:00"), "{stdout}");
}

#[test]
fn invalid_utf8_line_does_not_end_the_loop() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = interactive_config(dir.path());

    let output = run_interactive(&config, b"\xff\xfe\nhistory\nexit\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Произошла ошибка"), "{stdout}");
    assert!(stdout.contains("История запросов пуста"), "{stdout}");
    assert!(stdout.contains("До свидания!"), "{stdout}");
}

#[test]
fn end_of_piped_input_exits_quietly() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = interactive_config(dir.path());

    let output = run_interactive(&config, b"history\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("История запросов пуста"), "{stdout}");
    assert!(!stdout.contains("Программа завершена пользователем"), "{stdout}");
}
