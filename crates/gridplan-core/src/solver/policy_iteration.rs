use std::{fmt::Debug, hash::Hash};

use tracing::{debug, info, warn};

use crate::solver::{
    bellman::expected_utility,
    config::Algorithm,
    error::{Phase, SolveError},
    solution::{Solution, SolveStats},
    solve::{SolveEvent, Solver},
};

/// Converged utilities of one policy evaluation.
struct Evaluation {
    utilities: Vec<f64>,
    sweeps: usize,
    delta: f64,
}

impl<S, A> Solver<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Debug,
{
    /// Solve with policy iteration.
    ///
    /// Starts from the first legal action of every state, evaluates the
    /// current policy to within `epsilon`, and replaces it with the greedy
    /// policy until no state changes its action.
    pub fn policy_iteration(&self) -> Result<Solution<S, A>, SolveError> {
        self.policy_iteration_with_hook(|_| {})
    }

    /// Policy iteration with a callback after every sweep, evaluation and improvement.
    pub fn policy_iteration_with_hook<F>(
        &self,
        mut on_event: F,
    ) -> Result<Solution<S, A>, SolveError>
    where
        F: FnMut(&SolveEvent<'_>),
    {
        let mut policy: Vec<Option<usize>> = (0..self.table.len())
            .map(|s| (!self.table.is_terminal(s)).then_some(0))
            .collect();
        let mut previous: Option<Vec<f64>> = None;
        let mut utility_change = f64::INFINITY;
        let mut total_sweeps = 0;
        let mut iteration = 0;

        loop {
            if iteration >= self.config.max_policy_iterations {
                warn!(iteration, "policy iteration hit its improvement bound");
                return Err(SolveError::DidNotConverge {
                    phase: Phase::PolicyImprovement,
                    iterations: iteration,
                    delta: utility_change,
                });
            }
            iteration += 1;

            let evaluation = self.evaluate_policy(&policy, &mut on_event)?;
            total_sweeps += evaluation.sweeps;
            if let Some(previous) = &previous {
                utility_change = previous
                    .iter()
                    .zip(&evaluation.utilities)
                    .map(|(old, new)| (new - old).abs())
                    .fold(0.0, f64::max);
            }
            on_event(&SolveEvent::PolicyEvaluated {
                iteration,
                sweeps: evaluation.sweeps,
                utilities: &evaluation.utilities,
            });

            let improved = self.greedy_rows(&evaluation.utilities);
            let changed = improved
                .iter()
                .zip(&policy)
                .filter(|(new, old)| new != old)
                .count();

            debug!(
                iteration,
                sweeps = evaluation.sweeps,
                changed,
                "policy improvement step"
            );
            on_event(&SolveEvent::PolicyImproved { iteration, changed });

            if changed == 0 {
                info!(
                    iterations = iteration,
                    sweeps = total_sweeps,
                    "policy iteration converged"
                );
                let stats = SolveStats {
                    algorithm: Algorithm::PolicyIteration,
                    iterations: iteration,
                    sweeps: total_sweeps,
                    final_delta: evaluation.delta,
                };
                return Ok(self.finish(evaluation.utilities, &policy, stats));
            }

            policy = improved;
            previous = Some(evaluation.utilities);
        }
    }

    /// Sweep `U(s) = R(s) + γ Σ_{s'} T(s, π(s), s') U(s')` to convergence.
    fn evaluate_policy<F>(
        &self,
        policy: &[Option<usize>],
        on_event: &mut F,
    ) -> Result<Evaluation, SolveError>
    where
        F: FnMut(&SolveEvent<'_>),
    {
        let table = &self.table;
        let mut utilities = table.initial_utilities();
        let mut sweeps = 0;
        let mut delta = f64::INFINITY;

        loop {
            if sweeps >= self.config.max_sweeps {
                warn!(sweeps, delta, "policy evaluation hit its sweep bound");
                return Err(SolveError::DidNotConverge {
                    phase: Phase::PolicyEvaluation,
                    iterations: sweeps,
                    delta,
                });
            }

            let (next, sweep_delta) = self.sweep(&utilities, |s, u| {
                policy[s].map_or(0.0, |row| expected_utility(&table.rows(s)[row].outcomes, u))
            });
            utilities = next;
            delta = sweep_delta;
            sweeps += 1;

            on_event(&SolveEvent::Sweep {
                phase: Phase::PolicyEvaluation,
                sweep: sweeps,
                delta,
            });

            if delta < self.config.epsilon {
                return Ok(Evaluation {
                    utilities,
                    sweeps,
                    delta,
                });
            }
        }
    }
}
