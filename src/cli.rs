//! Command-line surface of the `klondike-brute` binary.

use clap::{Parser, ValueEnum};

use crate::rules::Regime;
use crate::search::{SearchConfig, SearchLimits, Strategy};

#[derive(Debug, Parser)]
#[command(
    name = "klondike-brute",
    version,
    about = "Brute-force solver for Klondike (draw 3, unlimited redeals)"
)]
pub struct Cli {
    /// Seed for the first deal; later games use seed+1, seed+2, ...
    /// A random seed is picked (and printed) when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of deal-and-solve cycles.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub games: u32,

    /// Solve this encoded position instead of dealing.
    #[arg(long, conflicts_with_all = ["seed", "games"])]
    pub board: Option<String>,

    /// Foundation rules.
    #[arg(long, value_enum, default_value_t = RegimeArg::Ascending)]
    pub regime: RegimeArg,

    /// Which alternatives to explore at each node.
    #[arg(long, value_enum, default_value_t = StrategyArg::Backtracking)]
    pub strategy: StrategyArg,

    /// Stop a game after entering this many states.
    #[arg(long, default_value_t = 1_000_000)]
    pub max_nodes: u64,

    /// Do not follow lines longer than this many steps.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Drop the node budget and search until won or exhausted.
    #[arg(long)]
    pub unlimited: bool,

    /// Check card conservation after every step (always on in debug builds).
    #[arg(long)]
    pub verify: bool,

    /// Print the starting board before solving.
    #[arg(long)]
    pub show: bool,

    /// Print the winning sequence of steps.
    #[arg(long)]
    pub line: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegimeArg {
    /// Kings to empty columns, Aces to empty foundations, build up in suit.
    Ascending,
    /// No cards to empty piles, foundations stack down in suit.
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Backtracking,
    Greedy,
}

impl From<RegimeArg> for Regime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::Ascending => Regime::Ascending,
            RegimeArg::Descending => Regime::Descending,
        }
    }
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Backtracking => Strategy::Backtracking,
            StrategyArg::Greedy => Strategy::Greedy,
        }
    }
}

impl Cli {
    pub fn search_config(&self) -> SearchConfig {
        let limits = if self.unlimited {
            SearchLimits {
                max_depth: self.max_depth,
                ..SearchLimits::unlimited()
            }
        } else {
            SearchLimits {
                max_nodes: Some(self.max_nodes),
                max_depth: self.max_depth,
            }
        };
        SearchConfig {
            regime: self.regime.into(),
            strategy: self.strategy.into(),
            limits,
            verify_conservation: self.verify || cfg!(debug_assertions),
        }
    }
}
