mod args;
mod error;
mod render;

use std::process::ExitCode;

use gridplan_core::{SolutionSnapshot, Solver, SolverConfig};
use gridplan_mdp::{Gridworld, compile_yaml, load_grid_yaml};
use tracing::{error, info};

use crate::{
    args::{Args, Format, Source, USAGE},
    error::CliError,
};

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(err.exit_code());
        }
    };

    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "gridplan failed");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let base = match &args.config {
        Some(path) => SolverConfig::from_yaml_path(path)?,
        None => SolverConfig::default(),
    };
    let config = args.apply_overrides(base);

    match &args.source {
        Source::StandardGrid => solve_grid(Gridworld::standard(), config, args.format),
        Source::Grid(path) => {
            let world = Gridworld::new(load_grid_yaml(path)?)?;
            solve_grid(world, config, args.format)
        }
        Source::Mdp(path) => {
            let mdp = compile_yaml(path)?;
            let solver = Solver::new(&mdp, config)?;
            let solution = solver.solve()?;
            info!(stats = %render::stats_line(solution.stats()), "solved tabular model");

            match args.format {
                Format::Json => {
                    let snapshot = SolutionSnapshot::from_solution(
                        &solution,
                        |key| mdp.state_id(*key).unwrap_or("?").to_string(),
                        |key, action| mdp.action_id(*key, action).unwrap_or("?").to_string(),
                    );
                    Ok(snapshot.to_json()? + "\n")
                }
                Format::Text => Ok(render::state_table(&mdp, &solution)),
            }
        }
    }
}

fn solve_grid(world: Gridworld, config: SolverConfig, format: Format) -> Result<String, CliError> {
    let solver = Solver::new(&world, config)?;
    let solution = solver.solve()?;
    info!(stats = %render::stats_line(solution.stats()), "solved gridworld");

    match format {
        Format::Json => {
            let snapshot = SolutionSnapshot::from_solution(
                &solution,
                |cell| format!("r{}c{}", cell.row, cell.col),
                |_, action| action.as_str().to_string(),
            );
            Ok(snapshot.to_json()? + "\n")
        }
        Format::Text => Ok(format!(
            "{}\n{}",
            render::utility_grid(&world, solution.utilities()),
            render::policy_grid(&world, solution.policy())
        )),
    }
}
