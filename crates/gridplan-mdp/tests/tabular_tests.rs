use std::{fs, path::PathBuf};

use gridplan_core::{Algorithm, FiniteMdp, SolverConfig, solve};
use gridplan_mdp::{
    GridSpec, MdpBuilder, MdpError, MdpSpec, StateKey, compile_yaml, load_grid_yaml, load_yaml,
    save_grid_yaml, save_yaml,
};

const VALID_MDP_YAML: &str = r#"
version: 1
start: s0
states:
  - id: s0
    reward: -0.1
    actions:
      - id: risky
        outcomes:
          - next: win
            prob: 0.7
          - next: s0
            prob: 0.3
      - id: safe
        outcomes:
          - next: lose
            prob: 1.0
  - id: win
    terminal: true
    reward: 1.0
  - id: lose
    terminal: true
    reward: -0.5
"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gridplan-{}-{name}", std::process::id()))
}

#[test]
fn yaml_parse_and_compile_success() {
    let spec: MdpSpec = serde_yaml::from_str(VALID_MDP_YAML).expect("valid yaml");
    let compiled = spec.compile().expect("compile should succeed");
    let start = compiled.start().expect("start declared");

    assert_eq!(compiled.state_count(), 3);
    assert_eq!(start.index(), 0);
    assert_eq!(compiled.state_id(start), Some("s0"));
    assert_eq!(compiled.state_key("lose"), Some(StateKey::from(2)));
    assert!(compiled.is_terminal(&StateKey::from(1)));
    assert_eq!(compiled.reward(&StateKey::from(2)), -0.5);

    let risky = compiled.action_key(start, "risky").expect("action exists");
    assert_eq!(compiled.action_id(start, risky), Some("risky"));
    assert_eq!(compiled.actions(&start).len(), 2);
    assert_eq!(
        compiled.transitions(&start, risky),
        vec![(StateKey::from(1), 0.7), (StateKey::from(0), 0.3)]
    );
}

#[test]
fn compiled_model_solves_to_closed_form() {
    let compiled: MdpSpec = serde_yaml::from_str(VALID_MDP_YAML).expect("valid yaml");
    let compiled = compiled.compile().expect("compiles");
    let config = SolverConfig {
        algorithm: Algorithm::PolicyIteration,
        gamma: 1.0,
        epsilon: 1e-9,
        ..SolverConfig::default()
    };

    let solution = solve(&compiled, &config).expect("converges");
    let start = StateKey::from(0);

    // U = -0.1 + 0.7 + 0.3 U  =>  U = 0.6 / 0.7
    let utility = solution.utilities().get(&start).expect("start value");
    assert!((utility - 0.6 / 0.7).abs() < 1e-6);
    let action = solution.policy().get(&start).expect("start action");
    assert_eq!(compiled.action_id(start, action), Some("risky"));
}

#[test]
fn validation_fails_for_probability_sum() {
    let yaml = r#"
states:
  - id: s0
    reward: 0.0
    actions:
      - id: a0
        outcomes:
          - next: s0
            prob: 0.9
"#;

    let spec: MdpSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(err, MdpError::ProbabilitySum { .. }));
}

#[test]
fn validation_fails_for_unknown_state_reference() {
    let yaml = r#"
states:
  - id: s0
    reward: 0.0
    actions:
      - id: a0
        outcomes:
          - next: missing
            prob: 1.0
"#;

    let spec: MdpSpec = serde_yaml::from_str(yaml).expect("valid syntax");
    let err = spec.compile().expect_err("compile should fail");

    assert!(matches!(err, MdpError::UnknownNextState { .. }));
}

#[test]
fn validation_fails_for_structural_mistakes() {
    let no_actions = r#"
states:
  - id: s0
    reward: 0.0
"#;
    let spec: MdpSpec = serde_yaml::from_str(no_actions).expect("valid syntax");
    assert!(matches!(
        spec.validate().unwrap_err(),
        MdpError::MissingActions { .. }
    ));

    let terminal_with_actions = r#"
states:
  - id: s0
    terminal: true
    reward: 1.0
    actions:
      - id: a0
        outcomes:
          - next: s0
            prob: 1.0
"#;
    let spec: MdpSpec = serde_yaml::from_str(terminal_with_actions).expect("valid syntax");
    assert!(matches!(
        spec.validate().unwrap_err(),
        MdpError::TerminalStateHasActions { .. }
    ));

    let duplicate = r#"
states:
  - id: s0
    terminal: true
    reward: 1.0
  - id: s0
    terminal: true
    reward: 2.0
"#;
    let spec: MdpSpec = serde_yaml::from_str(duplicate).expect("valid syntax");
    assert!(matches!(
        spec.validate().unwrap_err(),
        MdpError::DuplicateStateId { .. }
    ));

    let bad_start = r#"
start: nowhere
states:
  - id: s0
    terminal: true
    reward: 1.0
"#;
    let spec: MdpSpec = serde_yaml::from_str(bad_start).expect("valid syntax");
    assert!(matches!(
        spec.validate().unwrap_err(),
        MdpError::UnknownStartState { .. }
    ));

    let negative = r#"
states:
  - id: s0
    reward: 0.0
    actions:
      - id: a0
        outcomes:
          - next: s0
            prob: 1.5
          - next: s0
            prob: -0.5
"#;
    let spec: MdpSpec = serde_yaml::from_str(negative).expect("valid syntax");
    assert!(matches!(
        spec.validate().unwrap_err(),
        MdpError::InvalidProbability {
            outcome_index: 1,
            ..
        }
    ));
}

#[test]
fn builder_produces_the_same_model_as_yaml() {
    let mut builder = MdpBuilder::new();
    builder
        .set_start("s0")
        .add_state("s0", false, -0.1)
        .add_state("win", true, 1.0)
        .add_state("lose", true, -0.5);
    builder
        .add_action("s0", "risky")
        .expect("state exists")
        .add_outcome("s0", "risky", "win", 0.7)
        .expect("action exists")
        .add_outcome("s0", "risky", "s0", 0.3)
        .expect("action exists")
        .add_action("s0", "safe")
        .expect("state exists")
        .add_outcome("s0", "safe", "lose", 1.0)
        .expect("action exists");

    let built = builder.build_spec().expect("valid spec");
    let parsed: MdpSpec = serde_yaml::from_str(VALID_MDP_YAML).expect("valid yaml");

    assert_eq!(built.start, parsed.start);
    assert_eq!(built.states.len(), parsed.states.len());
    for (b, p) in built.states.iter().zip(&parsed.states) {
        assert_eq!(b.id, p.id);
        assert_eq!(b.reward, p.reward);
        assert_eq!(b.terminal.unwrap_or(false), p.terminal.unwrap_or(false));
        assert_eq!(
            b.actions.clone().unwrap_or_default(),
            p.actions.clone().unwrap_or_default()
        );
    }
}

#[test]
fn builder_rejects_unknown_references() {
    let mut builder = MdpBuilder::new();
    builder.add_state("s0", false, 0.0);

    assert!(matches!(
        builder.add_action("missing", "a0").map(|_| ()).unwrap_err(),
        MdpError::BuilderUnknownState { .. }
    ));
    assert!(matches!(
        builder
            .add_outcome("s0", "missing", "s0", 1.0)
            .map(|_| ())
            .unwrap_err(),
        MdpError::BuilderUnknownAction { .. }
    ));
}

#[test]
fn spec_survives_a_trip_through_disk() {
    let path = temp_path("tabular.yaml");
    let spec: MdpSpec = serde_yaml::from_str(VALID_MDP_YAML).expect("valid yaml");

    save_yaml(&path, &spec).expect("write succeeds");
    let loaded = load_yaml(&path).expect("read succeeds");
    let compiled = compile_yaml(&path).expect("compiles");
    fs::remove_file(&path).ok();

    assert_eq!(loaded, spec);
    assert_eq!(compiled.state_count(), 3);
}

#[test]
fn grid_layout_survives_a_trip_through_disk() {
    let path = temp_path("grid.yaml");
    let spec = GridSpec::standard();

    save_grid_yaml(&path, &spec).expect("write succeeds");
    let loaded = load_grid_yaml(&path).expect("read succeeds");
    fs::remove_file(&path).ok();

    assert_eq!(loaded, spec);
}

#[test]
fn missing_file_reports_io_error() {
    let err = load_yaml(temp_path("does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, MdpError::Io(_)));
}
