use crate::search::TerminationReason;

/// Tally of repeated deal-and-solve runs.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub games_played: u64,
    pub games_won: u64,
    /// Proven unsolvable (search space exhausted).
    pub games_lost: u64,
    /// Stopped by a node or depth limit without an answer.
    pub games_undecided: u64,
    pub nodes_visited: u64,
}

impl Stats {
    pub fn record(&mut self, termination: TerminationReason, nodes_visited: u64) {
        self.games_played += 1;
        self.nodes_visited += nodes_visited;
        match termination {
            TerminationReason::Win => self.games_won += 1,
            TerminationReason::Exhausted => self.games_lost += 1,
            TerminationReason::MaxNodesReached | TerminationReason::MaxDepthReached => {
                self.games_undecided += 1
            }
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_played as f64
        }
    }
}
