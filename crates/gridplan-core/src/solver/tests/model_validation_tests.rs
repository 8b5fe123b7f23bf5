use crate::{FiniteMdp, SolveError, Solver, SolverConfig, SolverConfigError};

use super::{StateDef, TableMdp, corridor, terminal};

fn single_state(reward: f64, outcomes: Vec<(usize, f64)>) -> TableMdp {
    TableMdp {
        states: vec![
            StateDef {
                reward,
                terminal: false,
                actions: vec![("go", outcomes)],
            },
            terminal(1.0),
        ],
    }
}

fn build(mdp: &TableMdp) -> Result<Solver<usize, &'static str>, SolveError> {
    Solver::new(mdp, SolverConfig::default())
}

#[test]
fn probability_sum_must_be_one() {
    let err = build(&single_state(0.0, vec![(1, 0.7), (0, 0.2)])).expect_err("sum is 0.9");
    assert!(matches!(err, SolveError::ProbabilitySum { sum, .. } if (sum - 0.9).abs() < 1e-12));
}

#[test]
fn negative_probability_is_rejected() {
    let err = build(&single_state(0.0, vec![(1, 1.5), (0, -0.5)])).expect_err("negative mass");
    assert!(matches!(err, SolveError::InvalidProbability { value, .. } if value == -0.5));
}

#[test]
fn next_state_must_be_listed() {
    let err = build(&single_state(0.0, vec![(7, 1.0)])).expect_err("state 7 is unknown");
    assert!(matches!(err, SolveError::UnknownNextState { ref next, .. } if next == "7"));
}

#[test]
fn reward_must_be_finite() {
    let err = build(&single_state(f64::NAN, vec![(1, 1.0)])).expect_err("NaN reward");
    assert!(matches!(err, SolveError::InvalidReward { .. }));
}

#[test]
fn terminal_state_cannot_have_actions() {
    let mut mdp = corridor();
    mdp.states[0].actions = vec![("left", vec![(0, 1.0)])];
    let err = build(&mdp).expect_err("terminal with actions");
    assert!(matches!(err, SolveError::TerminalHasActions { ref state } if state == "0"));
}

#[test]
fn non_terminal_state_needs_an_action() {
    let mut mdp = corridor();
    mdp.states[2].actions.clear();
    let err = build(&mdp).expect_err("dead-end state");
    assert!(matches!(err, SolveError::NoActions { ref state } if state == "2"));
}

#[test]
fn empty_and_duplicate_state_sets_are_rejected() {
    struct Listed(Vec<u8>);

    impl FiniteMdp for Listed {
        type State = u8;
        type Action = ();

        fn states(&self) -> Vec<u8> {
            self.0.clone()
        }
        fn actions(&self, _state: &u8) -> Vec<()> {
            Vec::new()
        }
        fn reward(&self, _state: &u8) -> f64 {
            0.0
        }
        fn transitions(&self, _state: &u8, _action: ()) -> Vec<(u8, f64)> {
            Vec::new()
        }
        fn is_terminal(&self, _state: &u8) -> bool {
            true
        }
    }

    let err = Solver::new(&Listed(Vec::new()), SolverConfig::default()).expect_err("no states");
    assert!(matches!(err, SolveError::EmptyModel));

    let err = Solver::new(&Listed(vec![3, 3]), SolverConfig::default()).expect_err("duplicate");
    assert!(matches!(err, SolveError::DuplicateState { ref state } if state == "3"));
}

#[test]
fn invalid_parameters_fail_before_indexing() {
    for (gamma, epsilon) in [(0.0, 1e-4), (1.5, 1e-4), (f64::NAN, 1e-4), (0.9, 0.0), (0.9, -1.0)] {
        let config = SolverConfig {
            gamma,
            epsilon,
            ..SolverConfig::default()
        };
        let err = Solver::new(&corridor(), config).expect_err("invalid parameters");
        assert!(matches!(err, SolveError::Config(SolverConfigError::Invalid(_))));
    }
}

#[test]
fn gamma_of_one_is_accepted() {
    let config = SolverConfig {
        gamma: 1.0,
        ..SolverConfig::default()
    };
    assert!(Solver::new(&corridor(), config).is_ok());
}

#[test]
fn algorithm_selector_rejects_unknown_names() {
    let err = "monte_carlo"
        .parse::<crate::Algorithm>()
        .expect_err("not a supported algorithm");
    assert!(matches!(err, SolverConfigError::UnknownAlgorithm(ref name) if name == "monte_carlo"));
    assert_eq!(
        "policy_iteration".parse::<crate::Algorithm>().ok(),
        Some(crate::Algorithm::PolicyIteration)
    );
}

#[test]
fn default_config_yaml_parses() {
    let config = SolverConfig::from_default_yaml().expect("default yaml should parse");
    assert_eq!(config, SolverConfig::default());
}

#[test]
fn yaml_config_is_validated() {
    let err = SolverConfig::from_yaml_str("gamma: 2.0\n").expect_err("gamma out of range");
    assert!(matches!(err, SolverConfigError::Invalid(_)));

    let err = SolverConfig::from_yaml_str("algorithm: sarsa\n").expect_err("unknown variant");
    assert!(matches!(err, SolverConfigError::Yaml(_)));

    let config = SolverConfig::from_yaml_str("algorithm: policy_iteration\nepsilon: 0.001\n")
        .expect("partial yaml falls back to defaults");
    assert_eq!(config.algorithm, crate::Algorithm::PolicyIteration);
    assert_eq!(config.epsilon, 0.001);
    assert_eq!(config.gamma, SolverConfig::default().gamma);
}
