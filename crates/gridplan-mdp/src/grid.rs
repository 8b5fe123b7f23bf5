use std::{collections::HashSet, fmt};

use gridplan_core::PROB_TOLERANCE;
use serde::{Deserialize, Serialize};

use crate::MdpError;

const DEFAULT_GRID_YAML: &str = include_str!("../config/gridworld.default.yaml");

/// Grid coordinate, 0-indexed with row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A cell that ends the episode and the reward paid on entering it.
pub struct TerminalSpec {
    pub cell: Cell,
    pub reward: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Outcome probabilities of a move: as intended, or slipping sideways.
pub struct TransitionSpec {
    pub intended: f64,
    pub slip_left: f64,
    pub slip_right: f64,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        TransitionSpec {
            intended: 0.8,
            slip_left: 0.1,
            slip_right: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Serializable gridworld layout used for YAML IO and validation.
pub struct GridSpec {
    pub height: usize,
    pub width: usize,
    /// Reward for occupying any non-terminal cell.
    pub step_reward: f64,
    /// Reference start cell; the solver itself does not use it.
    pub start: Cell,
    pub walls: Vec<Cell>,
    pub terminals: Vec<TerminalSpec>,
    pub transition: TransitionSpec,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard()
    }
}

impl GridSpec {
    /// The 4x3 world: wall at (1, 1), +1 at (0, 3), -1 at (1, 3), -0.04 per step.
    pub fn standard() -> Self {
        GridSpec {
            height: 3,
            width: 4,
            step_reward: -0.04,
            start: Cell::new(2, 0),
            walls: vec![Cell::new(1, 1)],
            terminals: vec![
                TerminalSpec {
                    cell: Cell::new(0, 3),
                    reward: 1.0,
                },
                TerminalSpec {
                    cell: Cell::new(1, 3),
                    reward: -1.0,
                },
            ],
            transition: TransitionSpec::default(),
        }
    }

    /// Parse a grid spec from YAML text and validate it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MdpError> {
        let spec: GridSpec = serde_yaml::from_str(yaml)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Return the default YAML layout included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_GRID_YAML
    }

    /// Parse the default YAML layout included with this crate.
    pub fn from_default_yaml() -> Result<Self, MdpError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Validate dimensions, special cells, rewards and slip probabilities.
    ///
    /// Terminal reachability depends on the move model and is checked by
    /// [`crate::Gridworld::new`].
    pub fn validate(&self) -> Result<(), MdpError> {
        if self.height == 0 || self.width == 0 {
            return Err(MdpError::EmptyGrid {
                height: self.height,
                width: self.width,
            });
        }

        for wall in &self.walls {
            self.check_bounds("wall", *wall)?;
        }
        let walls: HashSet<Cell> = self.walls.iter().copied().collect();

        self.check_bounds("start", self.start)?;
        if walls.contains(&self.start) {
            return Err(MdpError::StartOnWall {
                row: self.start.row,
                col: self.start.col,
            });
        }

        if !self.step_reward.is_finite() {
            return Err(MdpError::InvalidGridReward {
                role: "step",
                value: self.step_reward,
            });
        }

        let mut seen = HashSet::with_capacity(self.terminals.len());
        for terminal in &self.terminals {
            let cell = terminal.cell;
            self.check_bounds("terminal", cell)?;
            if walls.contains(&cell) {
                return Err(MdpError::TerminalOnWall {
                    row: cell.row,
                    col: cell.col,
                });
            }
            if !seen.insert(cell) {
                return Err(MdpError::DuplicateTerminal {
                    row: cell.row,
                    col: cell.col,
                });
            }
            if !terminal.reward.is_finite() {
                return Err(MdpError::InvalidGridReward {
                    role: "terminal",
                    value: terminal.reward,
                });
            }
        }

        let t = &self.transition;
        let mut sum = 0.0_f64;
        for (name, value) in [
            ("intended", t.intended),
            ("slip_left", t.slip_left),
            ("slip_right", t.slip_right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MdpError::InvalidSlipProbability { name, value });
            }
            sum += value;
        }
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(MdpError::SlipProbabilitySum {
                sum,
                tolerance: PROB_TOLERANCE,
            });
        }

        Ok(())
    }

    fn check_bounds(&self, role: &'static str, cell: Cell) -> Result<(), MdpError> {
        if cell.row >= self.height || cell.col >= self.width {
            return Err(MdpError::CellOutOfBounds {
                role,
                row: cell.row,
                col: cell.col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(())
    }
}
