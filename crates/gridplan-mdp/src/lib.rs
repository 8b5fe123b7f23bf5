mod action;
mod builder;
mod compiled;
mod error;
mod grid;
mod gridworld;
mod io;
mod simulator;
mod spec;

pub use action::Action;
pub use builder::MdpBuilder;
pub use compiled::{ActionKey, CompiledMdp, StateKey};
pub use error::MdpError;
pub use grid::{Cell, GridSpec, TerminalSpec, TransitionSpec};
pub use gridworld::Gridworld;
pub use io::{compile_yaml, load_grid_yaml, load_yaml, save_grid_yaml, save_yaml};
pub use simulator::{Episode, EpisodeSimulator};
pub use spec::{ActionSpec, MdpSpec, OutcomeSpec, StateSpec};
