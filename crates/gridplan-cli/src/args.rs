use std::path::PathBuf;

use gridplan_core::{Algorithm, SolverConfig};
use tracing::level_filters::LevelFilter;

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: gridplan [OPTIONS]

Solve a gridworld or tabular MDP with value or policy iteration.

Options:
  -a, --algorithm NAME           value_iteration | policy_iteration
  -g, --gamma F                  discount factor in (0, 1]
  -e, --epsilon F                convergence threshold
      --max-sweeps N             sweep bound per value loop
      --max-policy-iterations N  improvement-round bound
      --grid PATH                gridworld layout YAML (default: standard 4x3)
      --mdp PATH                 tabular MDP YAML instead of a grid
      --config PATH              solver config YAML; flags override it
      --format text|json         output format (default: text)
  -l, --log-level LEVEL          off | error | warn | info | debug | trace (default: info)
  -h, --help                     print this help";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Where the model comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    StandardGrid,
    Grid(PathBuf),
    Mdp(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub algorithm: Option<Algorithm>,
    pub gamma: Option<f64>,
    pub epsilon: Option<f64>,
    pub max_sweeps: Option<usize>,
    pub max_policy_iterations: Option<usize>,
    pub source: Source,
    pub config: Option<PathBuf>,
    pub format: Format,
    pub log_level: LevelFilter,
    pub help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            algorithm: None,
            gamma: None,
            epsilon: None,
            max_sweeps: None,
            max_policy_iterations: None,
            source: Source::default(),
            config: None,
            format: Format::default(),
            log_level: LevelFilter::INFO,
            help: false,
        }
    }
}

impl Args {
    /// Parse command-line arguments, without the program name.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-a" | "--algorithm" => {
                    let value = value_of(&arg, args.next())?;
                    parsed.algorithm = Some(
                        value
                            .parse()
                            .map_err(|_| CliError::Usage(format!("unknown algorithm '{value}'")))?,
                    );
                }
                "-g" | "--gamma" => parsed.gamma = Some(parse_value(&arg, args.next())?),
                "-e" | "--epsilon" => parsed.epsilon = Some(parse_value(&arg, args.next())?),
                "--max-sweeps" => parsed.max_sweeps = Some(parse_value(&arg, args.next())?),
                "--max-policy-iterations" => {
                    parsed.max_policy_iterations = Some(parse_value(&arg, args.next())?);
                }
                "--grid" | "--mdp" => {
                    if parsed.source != Source::StandardGrid {
                        return Err(CliError::Usage(
                            "--grid and --mdp may be given only once, and not together".to_string(),
                        ));
                    }
                    let path = PathBuf::from(value_of(&arg, args.next())?);
                    parsed.source = if arg == "--grid" {
                        Source::Grid(path)
                    } else {
                        Source::Mdp(path)
                    };
                }
                "--config" => parsed.config = Some(PathBuf::from(value_of(&arg, args.next())?)),
                "--format" => {
                    parsed.format = match value_of(&arg, args.next())?.as_str() {
                        "text" => Format::Text,
                        "json" => Format::Json,
                        other => {
                            return Err(CliError::Usage(format!("unknown format '{other}'")));
                        }
                    };
                }
                "-l" | "--log-level" => parsed.log_level = parse_value(&arg, args.next())?,
                other => return Err(CliError::Usage(format!("unknown argument '{other}'"))),
            }
        }

        Ok(parsed)
    }

    /// Start from `base` and apply every flag that was given.
    pub fn apply_overrides(&self, mut base: SolverConfig) -> SolverConfig {
        if let Some(algorithm) = self.algorithm {
            base.algorithm = algorithm;
        }
        if let Some(gamma) = self.gamma {
            base.gamma = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            base.epsilon = epsilon;
        }
        if let Some(max_sweeps) = self.max_sweeps {
            base.max_sweeps = max_sweeps;
        }
        if let Some(max_policy_iterations) = self.max_policy_iterations {
            base.max_policy_iterations = max_policy_iterations;
        }
        base
    }
}

fn value_of(flag: &str, value: Option<String>) -> Result<String, CliError> {
    value.ok_or_else(|| CliError::Usage(format!("{flag} expects a value")))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, CliError> {
    let value = value_of(flag, value)?;
    value
        .parse()
        .map_err(|_| CliError::Usage(format!("invalid value '{value}' for {flag}")))
}
