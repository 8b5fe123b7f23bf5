use std::{fmt::Debug, hash::Hash};

use tracing::debug;

use crate::solver::{
    bellman::{greedy_index, q_values},
    config::{Algorithm, SolverConfig},
    error::{Phase, SolveError},
    model::FiniteMdp,
    solution::{Policy, Solution, SolveStats, Utilities},
    table::ModelTable,
};

/// Progress notifications emitted while a solve runs.
#[derive(Debug, Clone, Copy)]
pub enum SolveEvent<'a> {
    /// One synchronous sweep finished.
    Sweep {
        phase: Phase,
        sweep: usize,
        delta: f64,
    },
    /// Policy evaluation of improvement round `iteration` converged.
    /// `utilities` is aligned with [`Solver::states`].
    PolicyEvaluated {
        iteration: usize,
        sweeps: usize,
        utilities: &'a [f64],
    },
    /// Greedy improvement of round `iteration` changed `changed` states.
    PolicyImproved { iteration: usize, changed: usize },
}

/// Value- and policy-iteration solver over a validated copy of a [`FiniteMdp`].
///
/// The solver keeps no state between calls: every solve starts from fresh
/// utilities and a fresh policy.
#[derive(Debug, Clone)]
pub struct Solver<S, A>
where
    S: Clone + Eq + Hash,
{
    pub(crate) table: ModelTable<S, A>,
    pub(crate) config: SolverConfig,
}

impl<S, A> Solver<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Debug,
{
    /// Validate `config` and the model, then index the model for sweeping.
    pub fn new<M>(mdp: &M, config: SolverConfig) -> Result<Self, SolveError>
    where
        M: FiniteMdp<State = S, Action = A>,
    {
        config.validate()?;
        let table = ModelTable::from_mdp(mdp)?;
        debug!(
            algorithm = %config.algorithm,
            gamma = config.gamma,
            epsilon = config.epsilon,
            "solver initialized"
        );
        Ok(Self { table, config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Model states in sweep order.
    pub fn states(&self) -> &[S] {
        self.table.states()
    }

    /// Run the algorithm selected in the config.
    pub fn solve(&self) -> Result<Solution<S, A>, SolveError> {
        self.solve_with_hook(|_| {})
    }

    /// Run the algorithm selected in the config and report progress to `on_event`.
    pub fn solve_with_hook<F>(&self, on_event: F) -> Result<Solution<S, A>, SolveError>
    where
        F: FnMut(&SolveEvent<'_>),
    {
        match self.config.algorithm {
            Algorithm::ValueIteration => self.value_iteration_with_hook(on_event),
            Algorithm::PolicyIteration => self.policy_iteration_with_hook(on_event),
        }
    }

    /// One synchronous sweep over all non-terminal states.
    ///
    /// `backup(s, u)` returns the expectation term for state `s` under the old
    /// utilities `u`; terminal entries are copied unchanged.
    pub(crate) fn sweep<B>(&self, utilities: &[f64], backup: B) -> (Vec<f64>, f64)
    where
        B: Fn(usize, &[f64]) -> f64,
    {
        let gamma = self.config.gamma;
        let mut next = utilities.to_vec();
        let mut delta = 0.0_f64;

        for s in 0..self.table.len() {
            if self.table.is_terminal(s) {
                continue;
            }
            next[s] = self.table.reward(s) + gamma * backup(s, utilities);
            delta = delta.max((next[s] - utilities[s]).abs());
        }

        (next, delta)
    }

    /// Greedy row index per state; `None` for terminal states.
    pub(crate) fn greedy_rows(&self, utilities: &[f64]) -> Vec<Option<usize>> {
        (0..self.table.len())
            .map(|s| {
                if self.table.is_terminal(s) {
                    None
                } else {
                    greedy_index(&q_values(self.table.rows(s), utilities))
                }
            })
            .collect()
    }

    /// Package dense vectors into the public result types.
    pub(crate) fn finish(
        &self,
        utilities: Vec<f64>,
        rows: &[Option<usize>],
        stats: SolveStats,
    ) -> Solution<S, A> {
        let actions = rows
            .iter()
            .enumerate()
            .map(|(s, row)| row.map(|r| self.table.rows(s)[r].action))
            .collect();

        Solution::new(
            Utilities::new(self.table.index().clone(), utilities),
            Policy::new(self.table.index().clone(), actions),
            stats,
        )
    }
}

/// Build a solver for `mdp` and run the algorithm selected in `config`.
pub fn solve<M>(
    mdp: &M,
    config: &SolverConfig,
) -> Result<Solution<M::State, M::Action>, SolveError>
where
    M: FiniteMdp,
{
    Solver::new(mdp, config.clone())?.solve()
}
