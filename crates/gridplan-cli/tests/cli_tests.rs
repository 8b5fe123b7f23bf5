use std::{fs, path::PathBuf, process::Command};

fn gridplan(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_gridplan"))
        .args(args)
        .output()
        .expect("binary runs")
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gridplan-cli-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("temp file written");
    path
}

#[test]
fn standard_world_prints_both_grids() {
    let output = gridplan(&["--gamma", "1", "-l", "error"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Final Utilities:"));
    assert!(stdout.contains("Optimal Policy:"));
    assert!(stdout.contains("#WALL#"));
    assert!(stdout.contains("[GOAL]"));
    assert!(stdout.contains("[TRAP]"));
}

#[test]
fn json_output_is_a_solution_snapshot() {
    let output = gridplan(&["-a", "policy_iteration", "-g", "1", "--format", "json", "-l", "error"]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["stats"]["algorithm"], "policy_iteration");
    assert_eq!(value["utilities"].as_array().map(Vec::len), Some(11));

    let start = value["policy"]
        .as_array()
        .and_then(|entries| entries.iter().find(|e| e["state"] == "r2c0"))
        .expect("start has an action");
    assert_eq!(start["action"], "north");
}

#[test]
fn tabular_model_is_solved_from_yaml() {
    let path = temp_file(
        "model.yaml",
        r#"
states:
  - id: here
    reward: -0.1
    actions:
      - id: go
        outcomes:
          - next: there
            prob: 1.0
  - id: there
    terminal: true
    reward: 1.0
"#,
    );
    let output = gridplan(&["--mdp", path.to_str().expect("utf-8 path"), "-l", "error"]);
    fs::remove_file(&path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let here = stdout
        .lines()
        .find(|line| line.starts_with("here"))
        .expect("state listed");
    assert!(here.contains("go"));
}

#[test]
fn usage_errors_exit_with_two() {
    let output = gridplan(&["--gamma"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: gridplan"));
}

#[test]
fn invalid_config_exits_with_one() {
    let output = gridplan(&["--gamma", "1.5", "-l", "off"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn non_convergence_exits_with_one() {
    let path = temp_file("no-terminals.yaml", "terminals: []\n");
    let output = gridplan(&[
        "--grid",
        path.to_str().expect("utf-8 path"),
        "-g",
        "1",
        "--max-sweeps",
        "50",
    ]);
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("did not converge"));
}

#[test]
fn help_prints_usage() {
    let output = gridplan(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--max-policy-iterations"));
}
