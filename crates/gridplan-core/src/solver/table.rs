use std::{fmt::Debug, hash::Hash};

use tracing::debug;

use crate::solver::{
    error::SolveError,
    index::StateIndex,
    model::{FiniteMdp, PROB_TOLERANCE},
};

/// One legal action of a state with its outcomes resolved to dense positions.
#[derive(Debug, Clone)]
pub(crate) struct ActionRow<A> {
    pub action: A,
    pub outcomes: Vec<(usize, f64)>,
}

/// Validated, index-resolved copy of a [`FiniteMdp`].
///
/// Built once per solver; sweeps only read from it.
#[derive(Debug, Clone)]
pub(crate) struct ModelTable<S, A>
where
    S: Clone + Eq + Hash,
{
    index: StateIndex<S>,
    rewards: Vec<f64>,
    terminal: Vec<bool>,
    rows: Vec<Vec<ActionRow<A>>>,
}

impl<S, A> ModelTable<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Debug,
{
    /// Query every state and transition of `mdp` and check the model's invariants.
    pub fn from_mdp<M>(mdp: &M) -> Result<Self, SolveError>
    where
        M: FiniteMdp<State = S, Action = A>,
    {
        let states = mdp.states();
        if states.is_empty() {
            return Err(SolveError::EmptyModel);
        }

        let mut index = StateIndex::with_capacity(states.len());
        for state in states {
            let label = format!("{state:?}");
            if index.insert(state).is_none() {
                return Err(SolveError::DuplicateState { state: label });
            }
        }

        let mut rewards = Vec::with_capacity(index.len());
        let mut terminal = Vec::with_capacity(index.len());
        let mut rows = Vec::with_capacity(index.len());

        for state in index.states() {
            let reward = mdp.reward(state);
            if !reward.is_finite() {
                return Err(SolveError::InvalidReward {
                    state: format!("{state:?}"),
                    value: reward,
                });
            }

            let is_terminal = mdp.is_terminal(state);
            let actions = mdp.actions(state);
            if is_terminal && !actions.is_empty() {
                return Err(SolveError::TerminalHasActions {
                    state: format!("{state:?}"),
                });
            }
            if !is_terminal && actions.is_empty() {
                return Err(SolveError::NoActions {
                    state: format!("{state:?}"),
                });
            }

            let mut state_rows = Vec::with_capacity(actions.len());
            for action in actions {
                let outcomes = resolve_outcomes(mdp, &index, state, action)?;
                state_rows.push(ActionRow { action, outcomes });
            }

            rewards.push(reward);
            terminal.push(is_terminal);
            rows.push(state_rows);
        }

        debug!(
            states = index.len(),
            terminals = terminal.iter().filter(|t| **t).count(),
            "indexed model"
        );

        Ok(Self {
            index,
            rewards,
            terminal,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn states(&self) -> &[S] {
        self.index.states()
    }

    pub fn index(&self) -> &StateIndex<S> {
        &self.index
    }

    pub fn reward(&self, position: usize) -> f64 {
        self.rewards[position]
    }

    pub fn is_terminal(&self, position: usize) -> bool {
        self.terminal[position]
    }

    pub fn rows(&self, position: usize) -> &[ActionRow<A>] {
        &self.rows[position]
    }

    /// Utilities every solve starts from: terminal rewards, zero elsewhere.
    pub fn initial_utilities(&self) -> Vec<f64> {
        (0..self.len())
            .map(|s| if self.terminal[s] { self.rewards[s] } else { 0.0 })
            .collect()
    }
}

fn resolve_outcomes<M>(
    mdp: &M,
    index: &StateIndex<M::State>,
    state: &M::State,
    action: M::Action,
) -> Result<Vec<(usize, f64)>, SolveError>
where
    M: FiniteMdp,
{
    let transitions = mdp.transitions(state, action);
    let mut outcomes = Vec::with_capacity(transitions.len());
    let mut sum = 0.0_f64;

    for (next, prob) in transitions {
        if !prob.is_finite() || prob < 0.0 {
            return Err(SolveError::InvalidProbability {
                state: format!("{state:?}"),
                action: format!("{action:?}"),
                value: prob,
            });
        }

        let position = index
            .position_of(&next)
            .ok_or_else(|| SolveError::UnknownNextState {
                state: format!("{state:?}"),
                action: format!("{action:?}"),
                next: format!("{next:?}"),
            })?;

        sum += prob;
        outcomes.push((position, prob));
    }

    if (sum - 1.0).abs() > PROB_TOLERANCE {
        return Err(SolveError::ProbabilitySum {
            state: format!("{state:?}"),
            action: format!("{action:?}"),
            sum,
            tolerance: PROB_TOLERANCE,
        });
    }

    Ok(outcomes)
}
