use std::{env, fs, process::Command};

fn shadow_gate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shadow-gate"))
}

#[test]
fn default_session_prints_a_toml_report() {
    let output = shadow_gate()
        .args(["--waves", "1", "--fps", "30", "--format", "toml"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch shadow-gate");

    assert!(output.status.success(), "shadow-gate exited with {}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("report is utf-8");
    assert!(stdout.contains("waves_started = 1"), "unexpected report:\n{stdout}");
    assert!(stdout.contains("enemies_spawned = 10"), "unexpected report:\n{stdout}");
}

#[test]
fn scenario_file_drives_the_session() {
    let path = env::temp_dir().join(format!("shadow-gate-scenario-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
waves = 1
starting_lives = 1

[layout]
path = [[0.0, 0.0], [200.0, 0.0]]
slots = []
"#,
    )
    .expect("failed to write scenario");

    let output = shadow_gate()
        .arg("--scenario")
        .arg(&path)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch shadow-gate");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("report is utf-8");
    assert!(stdout.contains("game over at level 1"), "unexpected report:\n{stdout}");
}

#[test]
fn missing_scenario_is_reported() {
    let output = shadow_gate()
        .args(["--scenario", "/definitely/not/here.toml"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch shadow-gate");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read scenario"), "unexpected stderr:\n{stderr}");
}
