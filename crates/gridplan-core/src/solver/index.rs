use std::collections::HashMap;
use std::hash::Hash;

/// Dense, insertion-ordered positions for arbitrary states.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StateIndex<S>
where
    S: Clone + Eq + Hash,
{
    states: Vec<S>,
    positions: HashMap<S, usize>,
}

impl<S> StateIndex<S>
where
    S: Clone + Eq + Hash,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a new state and return its position.
    /// Returns `None` if the state was already present.
    pub fn insert(&mut self, state: S) -> Option<usize> {
        if self.positions.contains_key(&state) {
            return None;
        }

        let position = self.states.len();
        self.states.push(state.clone());
        self.positions.insert(state, position);
        Some(position)
    }

    pub fn position_of(&self, state: &S) -> Option<usize> {
        self.positions.get(state).copied()
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
}
