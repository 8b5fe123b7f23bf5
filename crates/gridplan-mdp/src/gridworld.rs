use std::collections::{HashMap, HashSet, VecDeque};

use gridplan_core::FiniteMdp;
use tracing::debug;

use crate::{Action, Cell, GridSpec, MdpBuilder, MdpError, MdpSpec};

/// Stochastic gridworld: moves succeed with `intended` probability and slip
/// 90 degrees left or right otherwise. Bumping into a wall or the edge of the
/// grid leaves the agent where it was.
#[derive(Debug, Clone)]
pub struct Gridworld {
    spec: GridSpec,
    walls: HashSet<Cell>,
    terminals: HashMap<Cell, f64>,
}

impl Gridworld {
    /// Validate `spec` and build the world.
    pub fn new(spec: GridSpec) -> Result<Self, MdpError> {
        spec.validate()?;
        let world = Self::assemble(spec);
        world.check_terminals_reachable()?;
        debug!(
            height = world.spec.height,
            width = world.spec.width,
            states = world.states().len(),
            "gridworld initialized"
        );
        Ok(world)
    }

    /// The standard 4x3 world of [`GridSpec::standard`].
    pub fn standard() -> Self {
        Self::assemble(GridSpec::standard())
    }

    fn assemble(spec: GridSpec) -> Self {
        let walls = spec.walls.iter().copied().collect();
        let terminals = spec
            .terminals
            .iter()
            .map(|terminal| (terminal.cell, terminal.reward))
            .collect();
        Self {
            spec,
            walls,
            terminals,
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn height(&self) -> usize {
        self.spec.height
    }

    pub fn width(&self) -> usize {
        self.spec.width
    }

    pub fn start(&self) -> Cell {
        self.spec.start
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Return the reward of a terminal cell, `None` for any other cell.
    pub fn terminal_reward(&self, cell: Cell) -> Option<f64> {
        self.terminals.get(&cell).copied()
    }

    /// Whether `cell` is inside the grid and not a wall.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.spec.height && cell.col < self.spec.width && !self.is_wall(cell)
    }

    /// Deterministic result of moving `heading` from `cell`, without slipping.
    pub fn next_cell(&self, cell: Cell, heading: Action) -> Cell {
        let (d_row, d_col) = heading.delta();
        let target = match (
            cell.row.checked_add_signed(d_row),
            cell.col.checked_add_signed(d_col),
        ) {
            (Some(row), Some(col)) => Cell::new(row, col),
            _ => return cell,
        };

        if self.contains(target) { target } else { cell }
    }

    /// Export the world as a tabular spec with ids like `r2c0` and lowercase action names.
    pub fn to_mdp_spec(&self) -> Result<MdpSpec, MdpError> {
        let mut builder = MdpBuilder::new();
        builder.set_start(cell_id(self.start()));

        for cell in self.states() {
            builder.add_state(cell_id(cell), self.is_terminal(&cell), self.reward(&cell));
        }
        for cell in self.states() {
            for action in self.actions(&cell) {
                builder.add_action(cell_id(cell), action.as_str())?;
                for (next, prob) in self.transitions(&cell, action) {
                    builder.add_outcome(cell_id(cell), action.as_str(), cell_id(next), prob)?;
                }
            }
        }

        builder.build_spec()
    }

    fn check_terminals_reachable(&self) -> Result<(), MdpError> {
        let mut reached: HashSet<Cell> = HashSet::new();
        let mut queue: VecDeque<Cell> = self
            .states()
            .into_iter()
            .filter(|cell| !self.is_terminal(cell))
            .collect();

        while let Some(cell) = queue.pop_front() {
            for action in self.actions(&cell) {
                for (next, prob) in self.transitions(&cell, action) {
                    if prob > 0.0 && reached.insert(next) && !self.is_terminal(&next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        match self
            .spec
            .terminals
            .iter()
            .find(|terminal| !reached.contains(&terminal.cell))
        {
            Some(terminal) => Err(MdpError::UnreachableTerminal {
                row: terminal.cell.row,
                col: terminal.cell.col,
            }),
            None => Ok(()),
        }
    }
}

fn cell_id(cell: Cell) -> String {
    format!("r{}c{}", cell.row, cell.col)
}

impl FiniteMdp for Gridworld {
    type State = Cell;
    type Action = Action;

    /// Non-wall cells in row-major order.
    fn states(&self) -> Vec<Cell> {
        (0..self.spec.height)
            .flat_map(|row| (0..self.spec.width).map(move |col| Cell::new(row, col)))
            .filter(|cell| !self.is_wall(*cell))
            .collect()
    }

    fn actions(&self, state: &Cell) -> Vec<Action> {
        if self.is_terminal(state) {
            Vec::new()
        } else {
            Action::ALL.to_vec()
        }
    }

    fn reward(&self, state: &Cell) -> f64 {
        self.terminal_reward(*state)
            .unwrap_or(self.spec.step_reward)
    }

    /// Intended, left-slip and right-slip outcomes, merged when they land on
    /// the same cell. Terminal cells have no transitions.
    fn transitions(&self, state: &Cell, action: Action) -> Vec<(Cell, f64)> {
        if self.is_terminal(state) {
            return Vec::new();
        }

        let t = &self.spec.transition;
        let mut outcomes: Vec<(Cell, f64)> = Vec::with_capacity(3);
        for (heading, prob) in [
            (action, t.intended),
            (action.left(), t.slip_left),
            (action.right(), t.slip_right),
        ] {
            let next = self.next_cell(*state, heading);
            match outcomes.iter_mut().find(|(cell, _)| *cell == next) {
                Some((_, mass)) => *mass += prob,
                None => outcomes.push((next, prob)),
            }
        }
        outcomes
    }

    fn is_terminal(&self, state: &Cell) -> bool {
        self.terminals.contains_key(state)
    }
}
