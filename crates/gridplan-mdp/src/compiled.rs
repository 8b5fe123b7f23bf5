use std::{collections::HashMap, fmt};

use gridplan_core::FiniteMdp;

use crate::{MdpError, MdpSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Dense index for states in a compiled MDP.
pub struct StateKey(usize);

impl StateKey {
    /// Return the underlying state index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Position of an action within its state's declared action list.
pub struct ActionKey(usize);

impl ActionKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ActionKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone)]
/// Runtime form of a tabular MDP with resolved state references.
pub struct CompiledMdp {
    start: Option<StateKey>,
    states: Vec<StateRec>,
    state_ids: Vec<String>,
    state_id_to_key: HashMap<String, StateKey>,
}

#[derive(Debug, Clone)]
struct StateRec {
    terminal: bool,
    reward: f64,
    actions: Vec<ActionRec>,
}

#[derive(Debug, Clone)]
struct ActionRec {
    id: String,
    outcomes: Vec<(StateKey, f64)>,
}

impl CompiledMdp {
    /// Validate a spec and resolve its string references into dense keys.
    pub(crate) fn from_spec(spec: &MdpSpec) -> Result<Self, MdpError> {
        spec.validate()?;

        let mut state_id_to_key = HashMap::with_capacity(spec.states.len());
        let mut state_ids = Vec::with_capacity(spec.states.len());

        for (idx, state) in spec.states.iter().enumerate() {
            state_id_to_key.insert(state.id.clone(), StateKey::from(idx));
            state_ids.push(state.id.clone());
        }

        let start = match &spec.start {
            Some(start) => Some(state_id_to_key.get(start).copied().ok_or_else(|| {
                MdpError::UnknownStartState {
                    start: start.clone(),
                }
            })?),
            None => None,
        };

        let mut states = Vec::with_capacity(spec.states.len());
        for state in &spec.states {
            let mut actions = Vec::new();

            for action in state.actions.as_deref().unwrap_or(&[]) {
                let mut outcomes = Vec::with_capacity(action.outcomes.len());
                for outcome in &action.outcomes {
                    let next = state_id_to_key.get(&outcome.next).copied().ok_or_else(|| {
                        MdpError::UnknownNextState {
                            state: state.id.clone(),
                            action: action.id.clone(),
                            next: outcome.next.clone(),
                        }
                    })?;
                    outcomes.push((next, outcome.prob));
                }

                actions.push(ActionRec {
                    id: action.id.clone(),
                    outcomes,
                });
            }

            states.push(StateRec {
                terminal: state.terminal.unwrap_or(false),
                reward: state.reward,
                actions,
            });
        }

        Ok(Self {
            start,
            states,
            state_ids,
            state_id_to_key,
        })
    }

    /// Return the reference start state key, if the spec named one.
    pub fn start(&self) -> Option<StateKey> {
        self.start
    }

    /// Return the number of compiled states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Convert a state key back to its original string id.
    pub fn state_id(&self, key: StateKey) -> Option<&str> {
        self.state_ids.get(key.index()).map(String::as_str)
    }

    /// Convert a string id into a compiled state key.
    pub fn state_key(&self, id: &str) -> Option<StateKey> {
        self.state_id_to_key.get(id).copied()
    }

    /// Return the declared id of an action.
    pub fn action_id(&self, state: StateKey, action: ActionKey) -> Option<&str> {
        self.states
            .get(state.index())?
            .actions
            .get(action.index())
            .map(|a| a.id.as_str())
    }

    /// Look up an action of `state` by its declared id.
    pub fn action_key(&self, state: StateKey, id: &str) -> Option<ActionKey> {
        self.states
            .get(state.index())?
            .actions
            .iter()
            .position(|a| a.id == id)
            .map(ActionKey::from)
    }
}

impl FiniteMdp for CompiledMdp {
    type State = StateKey;
    type Action = ActionKey;

    fn states(&self) -> Vec<StateKey> {
        (0..self.states.len()).map(StateKey::from).collect()
    }

    fn actions(&self, state: &StateKey) -> Vec<ActionKey> {
        let count = self
            .states
            .get(state.index())
            .map_or(0, |s| s.actions.len());
        (0..count).map(ActionKey::from).collect()
    }

    fn reward(&self, state: &StateKey) -> f64 {
        self.states.get(state.index()).map_or(0.0, |s| s.reward)
    }

    fn transitions(&self, state: &StateKey, action: ActionKey) -> Vec<(StateKey, f64)> {
        self.states
            .get(state.index())
            .and_then(|s| s.actions.get(action.index()))
            .map(|a| a.outcomes.clone())
            .unwrap_or_default()
    }

    fn is_terminal(&self, state: &StateKey) -> bool {
        self.states.get(state.index()).is_some_and(|s| s.terminal)
    }
}
