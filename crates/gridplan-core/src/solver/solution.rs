use std::hash::Hash;

use serde::Serialize;

use crate::solver::{config::Algorithm, index::StateIndex};

/// Converged utility of every state, in model state order.
#[derive(Debug, Clone, PartialEq)]
pub struct Utilities<S>
where
    S: Clone + Eq + Hash,
{
    index: StateIndex<S>,
    values: Vec<f64>,
}

impl<S> Utilities<S>
where
    S: Clone + Eq + Hash,
{
    pub(crate) fn new(index: StateIndex<S>, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self { index, values }
    }

    /// Return the utility of `state`, or `None` if it is not part of the model.
    pub fn get(&self, state: &S) -> Option<f64> {
        self.index.position_of(state).map(|i| self.values[i])
    }

    /// Return the states covered by this mapping.
    pub fn states(&self) -> &[S] {
        self.index.states()
    }

    /// Return the raw values, aligned with [`Utilities::states`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.index.states().iter().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute difference against another mapping over the same states.
    /// Returns `None` when the state sets differ.
    pub fn max_abs_diff(&self, other: &Utilities<S>) -> Option<f64> {
        if self.index.states() != other.index.states() {
            return None;
        }

        Some(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

/// One chosen action per non-terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy<S, A>
where
    S: Clone + Eq + Hash,
{
    index: StateIndex<S>,
    actions: Vec<Option<A>>,
}

impl<S, A> Policy<S, A>
where
    S: Clone + Eq + Hash,
    A: Copy,
{
    pub(crate) fn new(index: StateIndex<S>, actions: Vec<Option<A>>) -> Self {
        debug_assert_eq!(index.len(), actions.len());
        Self { index, actions }
    }

    /// Return the action for `state`; `None` for terminal or unknown states.
    pub fn get(&self, state: &S) -> Option<A> {
        self.index
            .position_of(state)
            .and_then(|i| self.actions[i])
    }

    /// Iterate `(state, action)` over non-terminal states in model order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, A)> {
        self.index
            .states()
            .iter()
            .zip(self.actions.iter())
            .filter_map(|(state, action)| action.map(|a| (state, a)))
    }

    /// Number of states with an action.
    pub fn len(&self) -> usize {
        self.actions.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bookkeeping for a finished solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolveStats {
    pub algorithm: Algorithm,
    /// Value sweeps for value iteration, improvement rounds for policy iteration.
    pub iterations: usize,
    /// Every Bellman sweep performed, evaluation sweeps included.
    pub sweeps: usize,
    /// Largest utility change of the last sweep.
    pub final_delta: f64,
}

/// Utilities, policy and statistics returned by a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<S, A>
where
    S: Clone + Eq + Hash,
{
    utilities: Utilities<S>,
    policy: Policy<S, A>,
    stats: SolveStats,
}

impl<S, A> Solution<S, A>
where
    S: Clone + Eq + Hash,
    A: Copy,
{
    pub(crate) fn new(utilities: Utilities<S>, policy: Policy<S, A>, stats: SolveStats) -> Self {
        Self {
            utilities,
            policy,
            stats,
        }
    }

    pub fn utilities(&self) -> &Utilities<S> {
        &self.utilities
    }

    pub fn policy(&self) -> &Policy<S, A> {
        &self.policy
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn into_parts(self) -> (Utilities<S>, Policy<S, A>, SolveStats) {
        (self.utilities, self.policy, self.stats)
    }
}
