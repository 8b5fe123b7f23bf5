//! Bellman backups shared by both solvers.

use crate::solver::table::ActionRow;

/// Q-values closer than this to the maximum count as tied.
/// Ties go to the earliest action in the state's action order.
pub const TIE_TOLERANCE: f64 = 1e-10;

/// `Σ_{s'} T(s, a, s') · U[s']` for one resolved action row.
pub(crate) fn expected_utility(outcomes: &[(usize, f64)], utilities: &[f64]) -> f64 {
    outcomes
        .iter()
        .fold(0.0, |acc, (next, prob)| acc + prob * utilities[*next])
}

/// Q-value of every action row, in row order.
pub(crate) fn q_values<A>(rows: &[ActionRow<A>], utilities: &[f64]) -> Vec<f64> {
    rows.iter()
        .map(|row| expected_utility(&row.outcomes, utilities))
        .collect()
}

/// Index of the greedy action, breaking ties by position.
pub(crate) fn greedy_index(q_values: &[f64]) -> Option<usize> {
    let best = q_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    q_values.iter().position(|q| *q >= best - TIE_TOLERANCE)
}

/// Largest Q-value over all rows, `None` when there are no rows.
pub(crate) fn max_q<A>(rows: &[ActionRow<A>], utilities: &[f64]) -> Option<f64> {
    rows.iter()
        .map(|row| expected_utility(&row.outcomes, utilities))
        .reduce(f64::max)
}
