use gridplan_core::{FiniteMdp, Policy};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One rollout of a policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode<S> {
    /// Visited states, the start state first.
    pub states: Vec<S>,
    /// Discounted sum of the rewards of every visited state.
    pub total_return: f64,
    /// Whether the rollout ended in a terminal state rather than at the step limit.
    pub terminated: bool,
}

/// Seeded sampler of transitions and episodes over any [`FiniteMdp`].
#[derive(Debug, Clone)]
pub struct EpisodeSimulator<'a, M> {
    mdp: &'a M,
    rng: ChaCha8Rng,
}

impl<'a, M: FiniteMdp> EpisodeSimulator<'a, M> {
    /// Create a simulator with a deterministic RNG seed.
    pub fn new(mdp: &'a M, seed: u64) -> Self {
        Self {
            mdp,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn mdp(&self) -> &M {
        self.mdp
    }

    /// Sample a successor of `state` under `action`.
    ///
    /// Returns `None` when the pair has no outcomes, which is the case for
    /// terminal states.
    pub fn step(&mut self, state: &M::State, action: M::Action) -> Option<M::State> {
        let outcomes = self.mdp.transitions(state, action);
        if outcomes.is_empty() {
            return None;
        }

        let sample = (self.rng.next_u64() as f64) / ((u64::MAX as f64) + 1.0);
        let cdf: Vec<f64> = outcomes
            .iter()
            .scan(0.0_f64, |acc, (_, prob)| {
                *acc += prob;
                Some(*acc)
            })
            .collect();

        // Rounding can leave the last cumulative value just below 1.
        let chosen = cdf
            .partition_point(|p| *p <= sample)
            .min(outcomes.len() - 1);
        outcomes.into_iter().nth(chosen).map(|(next, _)| next)
    }

    /// Follow `policy` from `start` until a terminal state or `max_steps`
    /// transitions, accumulating `sum gamma^t * R(s_t)`.
    pub fn run_episode(
        &mut self,
        start: M::State,
        policy: &Policy<M::State, M::Action>,
        gamma: f64,
        max_steps: usize,
    ) -> Episode<M::State> {
        let mut state = start;
        let mut states = Vec::new();
        let mut total_return = 0.0_f64;
        let mut discount = 1.0_f64;
        let mut steps = 0;

        loop {
            total_return += discount * self.mdp.reward(&state);
            states.push(state.clone());

            if self.mdp.is_terminal(&state) {
                return Episode {
                    states,
                    total_return,
                    terminated: true,
                };
            }

            let next = match policy.get(&state) {
                Some(action) if steps < max_steps => self.step(&state, action),
                _ => None,
            };
            match next {
                Some(next) => state = next,
                None => {
                    return Episode {
                        states,
                        total_return,
                        terminated: false,
                    };
                }
            }

            discount *= gamma;
            steps += 1;
        }
    }

    /// Average return over `episodes` rollouts from `start`.
    pub fn mean_return(
        &mut self,
        start: &M::State,
        policy: &Policy<M::State, M::Action>,
        gamma: f64,
        max_steps: usize,
        episodes: usize,
    ) -> f64 {
        if episodes == 0 {
            return 0.0;
        }

        let total: f64 = (0..episodes)
            .map(|_| {
                self.run_episode(start.clone(), policy, gamma, max_steps)
                    .total_return
            })
            .sum();
        total / episodes as f64
    }
}
