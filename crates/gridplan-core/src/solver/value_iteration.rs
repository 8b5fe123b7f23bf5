use std::{fmt::Debug, hash::Hash};

use tracing::{debug, info, warn};

use crate::solver::{
    bellman::max_q,
    config::Algorithm,
    error::{Phase, SolveError},
    solution::{Solution, SolveStats},
    solve::{SolveEvent, Solver},
};

impl<S, A> Solver<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Debug,
{
    /// Solve with value iteration.
    ///
    /// `U(s) = R(s) + γ · max_a Σ_{s'} T(s, a, s') · U(s')` is swept
    /// synchronously until the largest change of a sweep drops below `epsilon`,
    /// then the greedy policy is read off the final utilities.
    pub fn value_iteration(&self) -> Result<Solution<S, A>, SolveError> {
        self.value_iteration_with_hook(|_| {})
    }

    /// Value iteration with a callback after every sweep.
    pub fn value_iteration_with_hook<F>(&self, mut on_event: F) -> Result<Solution<S, A>, SolveError>
    where
        F: FnMut(&SolveEvent<'_>),
    {
        let table = &self.table;
        let mut utilities = table.initial_utilities();
        let mut sweeps = 0;
        let mut delta = f64::INFINITY;

        loop {
            if sweeps >= self.config.max_sweeps {
                warn!(sweeps, delta, "value iteration hit its sweep bound");
                return Err(SolveError::DidNotConverge {
                    phase: Phase::ValueIteration,
                    iterations: sweeps,
                    delta,
                });
            }

            // Every non-terminal state has at least one row once the table is built.
            let (next, sweep_delta) =
                self.sweep(&utilities, |s, u| max_q(table.rows(s), u).unwrap_or(0.0));
            utilities = next;
            delta = sweep_delta;
            sweeps += 1;

            debug!(sweep = sweeps, delta, "value iteration sweep");
            on_event(&SolveEvent::Sweep {
                phase: Phase::ValueIteration,
                sweep: sweeps,
                delta,
            });

            if delta < self.config.epsilon {
                break;
            }
        }

        info!(sweeps, delta, "value iteration converged");

        let rows = self.greedy_rows(&utilities);
        let stats = SolveStats {
            algorithm: Algorithm::ValueIteration,
            iterations: sweeps,
            sweeps,
            final_delta: delta,
        };
        Ok(self.finish(utilities, &rows, stats))
    }
}
