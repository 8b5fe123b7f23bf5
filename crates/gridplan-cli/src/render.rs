use std::fmt::Write;

use gridplan_core::{FiniteMdp, Policy, Solution, SolveStats, Utilities};
use gridplan_mdp::{Action, ActionKey, Cell, CompiledMdp, Gridworld, StateKey};

const CELL_WIDTH: usize = 8;
const WALL: &str = "#WALL#";

pub fn utility_grid(world: &Gridworld, utilities: &Utilities<Cell>) -> String {
    let mut out = String::from("Final Utilities:\n");
    render_rows(world, &mut out, |cell| match utilities.get(&cell) {
        Some(value) => format!("{value:.2}"),
        None => WALL.to_string(),
    });
    out
}

pub fn policy_grid(world: &Gridworld, policy: &Policy<Cell, Action>) -> String {
    let mut out = String::from("Optimal Policy:\n");
    render_rows(world, &mut out, |cell| {
        if world.is_wall(cell) {
            return WALL.to_string();
        }
        match (world.terminal_reward(cell), policy.get(&cell)) {
            (Some(reward), _) if reward > 0.0 => "[GOAL]".to_string(),
            (Some(_), _) => "[TRAP]".to_string(),
            (None, Some(action)) => action.arrow().to_string(),
            (None, None) => "?".to_string(),
        }
    });
    out
}

fn render_rows<F>(world: &Gridworld, out: &mut String, mut label: F)
where
    F: FnMut(Cell) -> String,
{
    for row in 0..world.height() {
        let line: Vec<String> = (0..world.width())
            .map(|col| format!("{:>CELL_WIDTH$}", label(Cell::new(row, col))))
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
}

/// One line per state: id, utility and chosen action (`-` for terminals).
pub fn state_table(mdp: &CompiledMdp, solution: &Solution<StateKey, ActionKey>) -> String {
    let mut out = String::from("Final Utilities and Policy:\n");
    for (key, utility) in solution.utilities().iter() {
        let id = mdp.state_id(*key).unwrap_or("?");
        let action = solution
            .policy()
            .get(key)
            .and_then(|action| mdp.action_id(*key, action))
            .unwrap_or("-");
        let terminal = if mdp.is_terminal(key) { " (terminal)" } else { "" };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{id:<16} {utility:>10.4}  {action}{terminal}");
    }
    out
}

pub fn stats_line(stats: &SolveStats) -> String {
    format!(
        "algorithm={} iterations={} sweeps={} final_delta={:.3e}",
        stats.algorithm, stats.iterations, stats.sweeps, stats.final_delta
    )
}
