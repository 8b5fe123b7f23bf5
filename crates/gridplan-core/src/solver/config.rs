use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// Dynamic-programming method used by [`crate::Solver::solve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Repeated Bellman optimality sweeps, then greedy policy extraction.
    #[default]
    ValueIteration,
    /// Alternating policy evaluation and greedy improvement until stable.
    PolicyIteration,
}

impl Algorithm {
    /// Return the selector string accepted by [`Algorithm::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::ValueIteration => "value_iteration",
            Algorithm::PolicyIteration => "policy_iteration",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SolverConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "value_iteration" => Ok(Algorithm::ValueIteration),
            "policy_iteration" => Ok(Algorithm::PolicyIteration),
            other => Err(SolverConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Parameters for one solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    /// Discount factor, in `(0, 1]`.
    pub gamma: f64,
    /// A sweep whose largest utility change is below this value ends the loop.
    pub epsilon: f64,
    /// Sweep bound for value iteration and for each policy evaluation.
    pub max_sweeps: usize,
    /// Improvement-round bound for policy iteration.
    pub max_policy_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            algorithm: Algorithm::ValueIteration,
            gamma: 0.99,
            epsilon: 1e-4,
            max_sweeps: 10_000,
            max_policy_iterations: 1_000,
        }
    }
}

impl SolverConfig {
    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a solver config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolverConfigError> {
        let yaml = fs::read_to_string(path).map_err(SolverConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 || self.gamma > 1.0 {
            return Err(SolverConfigError::Invalid(format!(
                "gamma must be in (0, 1], got {}",
                self.gamma
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SolverConfigError::Invalid(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        if self.max_sweeps == 0 {
            return Err(SolverConfigError::Invalid(
                "max_sweeps must be greater than 0".to_string(),
            ));
        }
        if self.max_policy_iterations == 0 {
            return Err(SolverConfigError::Invalid(
                "max_policy_iterations must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `SolverConfig`.
#[derive(Debug)]
pub enum SolverConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
    UnknownAlgorithm(String),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SolverConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolverConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
            SolverConfigError::UnknownAlgorithm(name) => write!(
                f,
                "unknown algorithm '{name}'; expected one of: value_iteration, policy_iteration"
            ),
        }
    }
}

impl std::error::Error for SolverConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverConfigError::Io(err) => Some(err),
            SolverConfigError::Yaml(err) => Some(err),
            _ => None,
        }
    }
}
