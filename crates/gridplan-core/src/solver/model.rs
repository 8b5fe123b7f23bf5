use std::{fmt::Debug, hash::Hash};

/// Floating point tolerance used when validating probability sums.
pub const PROB_TOLERANCE: f64 = 1e-9;

/// Query interface for a finite, fully observed MDP with state-based rewards.
///
/// Implementations must be immutable for the lifetime of a solve: the same
/// query has to return the same answer every time it is asked.
pub trait FiniteMdp {
    type State: Clone + Eq + Hash + Debug;
    type Action: Copy + Eq + Debug;

    /// Return every state in a deterministic order.
    fn states(&self) -> Vec<Self::State>;

    /// Return the legal actions of a state in priority order.
    /// Terminal states have none.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Return the reward paid for occupying a state.
    fn reward(&self, state: &Self::State) -> f64;

    /// Return `(next_state, probability)` pairs for taking `action` in `state`.
    fn transitions(&self, state: &Self::State, action: Self::Action) -> Vec<(Self::State, f64)>;

    /// Return whether the process ends once `state` is entered.
    fn is_terminal(&self, state: &Self::State) -> bool;
}
