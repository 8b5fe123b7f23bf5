pub mod bellman;
pub mod config;
pub mod error;
mod index;
pub mod model;
mod policy_iteration;
pub mod snapshot;
pub mod solution;
pub mod solve;
mod table;
mod value_iteration;

#[cfg(test)]
mod tests;
