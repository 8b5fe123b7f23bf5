mod model_validation_tests;

use crate::FiniteMdp;

/// Explicit table-driven model for unit tests. States are their position.
#[derive(Debug, Clone)]
pub(crate) struct TableMdp {
    pub states: Vec<StateDef>,
}

#[derive(Debug, Clone)]
pub(crate) struct StateDef {
    pub reward: f64,
    pub terminal: bool,
    pub actions: Vec<(&'static str, Vec<(usize, f64)>)>,
}

impl FiniteMdp for TableMdp {
    type State = usize;
    type Action = &'static str;

    fn states(&self) -> Vec<usize> {
        (0..self.states.len()).collect()
    }

    fn actions(&self, state: &usize) -> Vec<&'static str> {
        self.states[*state]
            .actions
            .iter()
            .map(|(name, _)| *name)
            .collect()
    }

    fn reward(&self, state: &usize) -> f64 {
        self.states[*state].reward
    }

    fn transitions(&self, state: &usize, action: &'static str) -> Vec<(usize, f64)> {
        self.states[*state]
            .actions
            .iter()
            .find(|(name, _)| *name == action)
            .map(|(_, outcomes)| outcomes.clone())
            .unwrap_or_default()
    }

    fn is_terminal(&self, state: &usize) -> bool {
        self.states[*state].terminal
    }
}

pub(crate) fn terminal(reward: f64) -> StateDef {
    StateDef {
        reward,
        terminal: true,
        actions: Vec::new(),
    }
}

/// Five-state corridor: both ends terminal (-1 left, +1 right), the middle
/// states pay -0.04 and move in the chosen direction with probability 0.8,
/// the opposite way otherwise.
pub(crate) fn corridor() -> TableMdp {
    let mut states = vec![terminal(-1.0)];
    for s in 1..4 {
        states.push(StateDef {
            reward: -0.04,
            terminal: false,
            actions: vec![
                ("left", vec![(s - 1, 0.8), (s + 1, 0.2)]),
                ("right", vec![(s + 1, 0.8), (s - 1, 0.2)]),
            ],
        });
    }
    states.push(terminal(1.0));
    TableMdp { states }
}

/// One decision: pay -1, then either jump to a +10 terminal or stay put.
pub(crate) fn jump_or_stay() -> TableMdp {
    TableMdp {
        states: vec![
            StateDef {
                reward: -1.0,
                terminal: false,
                actions: vec![("stay", vec![(0, 1.0)]), ("jump", vec![(1, 1.0)])],
            },
            terminal(10.0),
        ],
    }
}
