pub mod board;
pub mod card;
pub mod cli;
pub mod deck;
pub mod display;
pub mod encode;
pub mod moves;
pub mod rules;
pub mod search;
pub mod stats;

#[cfg(test)]
pub(crate) mod canonical_boards;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::board::Board;
use crate::cli::Cli;
use crate::display::render_board;
use crate::search::{SearchConfig, SolveOutcome};
use crate::stats::Stats;

/// Entry point for the `klondike-brute` binary.
///
/// This:
///   - parses the command line (see [`cli::Cli`]),
///   - deals one or more seeded decks, or decodes a given `--board`,
///   - runs the search on each,
///   - prints a summary per game followed by the result line: the winning
///     state encoding, or `false`.
///
/// Example:
///   cargo run --release -- --seed=12345 --games=10
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(&cli, &mut out)
}

/// Same as [`run`] with an already parsed command line and explicit output.
pub fn run_with<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let config = cli.search_config();

    if let Some(text) = &cli.board {
        let board: Board = text.parse().context("could not decode --board")?;
        info!("solving given board");
        return solve_and_report(board, &config, cli, out).map(|_| ());
    }

    let base_seed = cli.seed.unwrap_or_else(rand::random);
    let mut stats = Stats::default();

    for game in 0..u64::from(cli.games) {
        let seed = base_seed.wrapping_add(game);
        info!(seed, game, "dealing");
        writeln!(out, "Deal seed: {seed}")?;

        let board = deck::deal_seeded(seed);
        let outcome = solve_and_report(board, &config, cli, out)
            .with_context(|| format!("solving deal with seed {seed}"))?;
        stats.record(outcome.termination, outcome.nodes_visited);
    }

    if cli.games > 1 {
        writeln!(out)?;
        writeln!(
            out,
            "Games: {}  won: {}  lost: {}  undecided: {}  win rate: {:.1}%",
            stats.games_played,
            stats.games_won,
            stats.games_lost,
            stats.games_undecided,
            100.0 * stats.win_rate()
        )?;
        writeln!(out, "Total nodes visited: {}", stats.nodes_visited)?;
    }

    Ok(())
}

fn solve_and_report<W: Write>(
    board: Board,
    config: &SearchConfig,
    cli: &Cli,
    out: &mut W,
) -> anyhow::Result<SolveOutcome> {
    if cli.show {
        writeln!(out, "{}", render_board(&board))?;
    }

    let outcome = search::solve_board(board, config)?;

    writeln!(out, "Nodes visited: {}", outcome.nodes_visited)?;
    writeln!(out, "Termination reason: {:?}", outcome.termination)?;
    writeln!(
        out,
        "Revisits pruned: {}, dead ends: {}, max path depth: {}",
        outcome.revisits_pruned, outcome.dead_ends, outcome.max_path_depth
    )?;

    if cli.line && outcome.is_win() {
        writeln!(out, "Winning line ({} steps):", outcome.winning_line.len())?;
        for (i, step) in outcome.winning_line.iter().enumerate() {
            writeln!(out, "  {:3}: {}", i + 1, step)?;
        }
    }

    writeln!(out, "{}", outcome.winning_state.as_deref().unwrap_or("false"))?;
    Ok(outcome)
}
