use std::fmt;

use serde::{Deserialize, Serialize};

/// Compass move of the gridworld agent.
///
/// Declaration order is the tie-break priority of the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    North,
    South,
    East,
    West,
}

impl Action {
    /// All actions in priority order.
    pub const ALL: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    /// `(d_row, d_col)` of a successful move. Row 0 is the top of the grid.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::North => (-1, 0),
            Action::South => (1, 0),
            Action::East => (0, 1),
            Action::West => (0, -1),
        }
    }

    /// Heading 90 degrees to the left of this one.
    pub fn left(self) -> Action {
        match self {
            Action::North => Action::West,
            Action::South => Action::East,
            Action::East => Action::North,
            Action::West => Action::South,
        }
    }

    /// Heading 90 degrees to the right of this one.
    pub fn right(self) -> Action {
        match self {
            Action::North => Action::East,
            Action::South => Action::West,
            Action::East => Action::South,
            Action::West => Action::North,
        }
    }

    /// Arrow glyph used when rendering a policy.
    pub fn arrow(self) -> char {
        match self {
            Action::North => '^',
            Action::South => 'v',
            Action::East => '>',
            Action::West => '<',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::North => "north",
            Action::South => "south",
            Action::East => "east",
            Action::West => "west",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
