//! Depth-first search over the move graph of a single board.
//!
//! The search keeps one mutable board and walks it with apply/undo pairs,
//! using an explicit stack of frames rather than recursion so deep lines of
//! play cannot overflow the call stack.
//!
//! Memoization is scoped to the current path: a state's encoding is added
//! to the path set when the search enters it and removed again when the
//! search backtracks out of it. A line of play therefore never revisits one
//! of its own ancestors (which is what guarantees termination), while two
//! sibling branches are free to pass through the same state.

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::board::{Board, BoardError};
use crate::encode::encode;
use crate::moves::{legal_moves, Applied, Step};
use crate::rules::Regime;

/// How many alternatives the search considers at each node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every legal move of every category, then the draw. Complete within
    /// the budget.
    #[default]
    Backtracking,
    /// Only the first legal move of each category, then the draw. Much
    /// faster, but can miss wins. This is still a backtracking search over
    /// a pruned move list: a failed line is undone and the next category
    /// is tried, rather than committing to the first move for good.
    Greedy,
}

/// Limits for a search run. The state space is large enough that full
/// exhaustion is not always practical, so the node budget is on by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Hard cap on the number of states entered in a single search.
    pub max_nodes: Option<u64>,
    /// Maximum number of steps from the starting board.
    pub max_depth: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_nodes: Some(1_000_000),
            max_depth: None,
        }
    }
}

impl SearchLimits {
    /// No budget at all: run until a win or until the space is exhausted.
    pub fn unlimited() -> Self {
        SearchLimits {
            max_nodes: None,
            max_depth: None,
        }
    }
}

/// Everything that selects a particular solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub regime: Regime,
    pub strategy: Strategy,
    pub limits: SearchLimits,
    /// Check card conservation after every applied step.
    pub verify_conservation: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            regime: Regime::default(),
            strategy: Strategy::default(),
            limits: SearchLimits::default(),
            verify_conservation: cfg!(debug_assertions),
        }
    }
}

/// Why a search stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TerminationReason {
    /// A won board was reached.
    Win,
    /// Every reachable line was explored without finding a win: this deal
    /// is unsolvable under the chosen rules and strategy.
    Exhausted,
    /// The node budget ran out first.
    MaxNodesReached,
    /// No win was found, but at least one line was cut by the depth limit.
    MaxDepthReached,
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("starting board is invalid: {0}")]
    InvalidStart(#[from] BoardError),
    #[error("board corrupted after {step:?}: {source}")]
    Corrupted {
        step: Step,
        #[source]
        source: BoardError,
    },
}

/// Result of searching one board.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// Encoding of the won board, if a win was found.
    pub winning_state: Option<String>,
    /// Steps from the starting board to the won board (empty if no win).
    pub winning_line: Vec<Step>,
    pub termination: TerminationReason,
    /// States entered, including those immediately pruned.
    pub nodes_visited: u64,
    /// Entries that hit a state already on the current path.
    pub revisits_pruned: u64,
    /// States with no move and nothing to draw.
    pub dead_ends: u64,
    /// Longest path held on the frame stack.
    pub max_path_depth: usize,
}

impl SolveOutcome {
    pub fn is_win(&self) -> bool {
        self.termination == TerminationReason::Win
    }
}

/// One expanded node on the current path.
struct Frame {
    key: String,
    steps: Vec<Step>,
    next: usize,
    /// The step currently applied on top of this node's board.
    applied: Option<Applied>,
}

enum Entered {
    Won(String),
    Expanded,
    Pruned,
    Leaf,
    OutOfBudget,
}

struct Search<'c> {
    config: &'c SearchConfig,
    path: FxHashSet<String>,
    frames: Vec<Frame>,
    nodes_visited: u64,
    revisits_pruned: u64,
    dead_ends: u64,
    max_path_depth: usize,
    depth_cut: bool,
}

impl<'c> Search<'c> {
    fn new(config: &'c SearchConfig) -> Self {
        Search {
            config,
            path: FxHashSet::default(),
            frames: Vec::new(),
            nodes_visited: 0,
            revisits_pruned: 0,
            dead_ends: 0,
            max_path_depth: 0,
            depth_cut: false,
        }
    }

    /// Candidate steps from `board`, in the order they are tried.
    fn steps_for(&self, board: &Board) -> Vec<Step> {
        let regime = self.config.regime;
        let mut steps = Vec::new();
        for &category in regime.categories() {
            let moves = legal_moves(board, category, regime).into_iter();
            match self.config.strategy {
                Strategy::Backtracking => steps.extend(moves.map(Step::Move)),
                Strategy::Greedy => steps.extend(moves.take(1).map(Step::Move)),
            }
        }
        // A draw with both piles empty would re-enter the same state.
        if !(board.stock.is_empty() && board.waste.is_empty()) {
            steps.push(Step::Draw);
        }
        steps
    }

    /// Visit the state `board` is currently in.
    fn enter(&mut self, board: &Board) -> Entered {
        if let Some(max) = self.config.limits.max_nodes {
            if self.nodes_visited >= max {
                return Entered::OutOfBudget;
            }
        }
        self.nodes_visited += 1;

        let key = encode(board);
        if board.is_won() {
            return Entered::Won(key);
        }
        if self.path.contains(&key) {
            self.revisits_pruned += 1;
            trace!(depth = self.frames.len(), "revisit pruned");
            return Entered::Pruned;
        }
        if let Some(max) = self.config.limits.max_depth {
            if self.frames.len() >= max {
                self.depth_cut = true;
                return Entered::Leaf;
            }
        }

        let steps = self.steps_for(board);
        if steps.is_empty() {
            self.dead_ends += 1;
            return Entered::Leaf;
        }

        trace!(
            depth = self.frames.len(),
            nodes = self.nodes_visited,
            candidates = steps.len(),
            "expand"
        );
        self.path.insert(key.clone());
        self.frames.push(Frame {
            key,
            steps,
            next: 0,
            applied: None,
        });
        self.max_path_depth = self.max_path_depth.max(self.frames.len());
        Entered::Expanded
    }

    /// Undo every applied step so `board` is back at the root position.
    fn unwind(&mut self, board: &mut Board) -> Vec<Step> {
        let mut line = Vec::with_capacity(self.frames.len());
        while let Some(mut frame) = self.frames.pop() {
            if let Some(applied) = frame.applied.take() {
                applied.undo(board);
                line.push(applied.step());
            }
        }
        self.path.clear();
        line.reverse();
        line
    }

    fn finish(
        &self,
        termination: TerminationReason,
        winning_state: Option<String>,
        winning_line: Vec<Step>,
    ) -> SolveOutcome {
        SolveOutcome {
            winning_state,
            winning_line,
            termination,
            nodes_visited: self.nodes_visited,
            revisits_pruned: self.revisits_pruned,
            dead_ends: self.dead_ends,
            max_path_depth: self.max_path_depth,
        }
    }

    fn run(&mut self, board: &mut Board) -> Result<SolveOutcome, SolveError> {
        match self.enter(board) {
            Entered::Won(key) => {
                return Ok(self.finish(TerminationReason::Win, Some(key), Vec::new()));
            }
            Entered::OutOfBudget => {
                return Ok(self.finish(TerminationReason::MaxNodesReached, None, Vec::new()));
            }
            Entered::Expanded | Entered::Pruned | Entered::Leaf => {}
        }

        loop {
            let Some(frame) = self.frames.last_mut() else {
                break;
            };
            if let Some(applied) = frame.applied.take() {
                applied.undo(board);
            }
            if frame.next >= frame.steps.len() {
                if let Some(done) = self.frames.pop() {
                    self.path.remove(&done.key);
                }
                continue;
            }
            let step = frame.steps[frame.next];
            frame.next += 1;
            frame.applied = Some(step.apply(board));

            if self.config.verify_conservation {
                if let Err(source) = board.check_conservation() {
                    return Err(SolveError::Corrupted { step, source });
                }
            }

            match self.enter(board) {
                Entered::Won(key) => {
                    let line = self.unwind(board);
                    return Ok(self.finish(TerminationReason::Win, Some(key), line));
                }
                Entered::OutOfBudget => {
                    self.unwind(board);
                    return Ok(self.finish(TerminationReason::MaxNodesReached, None, Vec::new()));
                }
                Entered::Expanded | Entered::Pruned | Entered::Leaf => {}
            }
        }

        let termination = if self.depth_cut {
            TerminationReason::MaxDepthReached
        } else {
            TerminationReason::Exhausted
        };
        Ok(self.finish(termination, None, Vec::new()))
    }
}

/// Search for a win from `board`.
///
/// On `Ok`, `board` is left exactly as it was passed in; the won position
/// is reported through [`SolveOutcome::winning_state`] and
/// [`SolveOutcome::winning_line`].
pub fn play(board: &mut Board, config: &SearchConfig) -> Result<SolveOutcome, SolveError> {
    if config.verify_conservation {
        board.check_conservation()?;
    }
    debug!(
        regime = ?config.regime,
        strategy = ?config.strategy,
        max_nodes = ?config.limits.max_nodes,
        max_depth = ?config.limits.max_depth,
        "search start"
    );

    let mut search = Search::new(config);
    let outcome = search.run(board)?;

    debug!(
        termination = ?outcome.termination,
        nodes = outcome.nodes_visited,
        pruned = outcome.revisits_pruned,
        dead_ends = outcome.dead_ends,
        max_depth = outcome.max_path_depth,
        "search done"
    );
    Ok(outcome)
}

/// Owned-board convenience around [`play`].
pub fn solve_board(mut board: Board, config: &SearchConfig) -> Result<SolveOutcome, SolveError> {
    play(&mut board, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PileKind, FOUNDATION_FULL};
    use crate::canonical_boards::{one_move_from_win, stuck_king_board, suit_pile};
    use crate::card::{Rank, Suit};
    use crate::deck::deal_seeded;
    use pretty_assertions::assert_eq;

    fn config(regime: Regime, strategy: Strategy) -> SearchConfig {
        SearchConfig {
            regime,
            strategy,
            limits: SearchLimits::default(),
            verify_conservation: true,
        }
    }

    #[test]
    fn one_move_from_win_is_solved() {
        let mut board = one_move_from_win(Regime::Ascending);
        let before = encode(&board);

        let outcome = play(&mut board, &config(Regime::Ascending, Strategy::Backtracking))
            .expect("search runs");
        assert!(outcome.is_win());

        let won: Board = outcome
            .winning_state
            .as_deref()
            .expect("winning encoding")
            .parse()
            .expect("winning encoding parses");
        assert!(won.is_won());
        for f in &won.foundations {
            assert_eq!(f.len(), FOUNDATION_FULL);
        }

        // The line ends by putting the King on its foundation.
        match outcome.winning_line.last() {
            Some(Step::Move(mv)) => {
                assert_eq!(mv.to.kind, PileKind::Foundation);
                assert_eq!(mv.card.rank, Rank::King);
            }
            other => panic!("unexpected last step {other:?}"),
        }

        // The caller gets its board back untouched.
        assert_eq!(encode(&board), before);
    }

    #[test]
    fn winning_line_replays_to_winning_state() {
        let mut board = one_move_from_win(Regime::Ascending);
        let outcome = play(&mut board, &config(Regime::Ascending, Strategy::Backtracking))
            .expect("search runs");
        for step in &outcome.winning_line {
            step.apply(&mut board);
        }
        assert_eq!(Some(encode(&board)), outcome.winning_state);
    }

    #[test]
    fn descending_regime_wins_by_unbuilding() {
        let mut board = one_move_from_win(Regime::Descending);
        let outcome = play(&mut board, &config(Regime::Descending, Strategy::Backtracking))
            .expect("search runs");
        assert!(outcome.is_win());
        assert_eq!(outcome.winning_line.len(), 1);
    }

    #[test]
    fn already_won_board_returns_immediately() {
        let mut board = Board::new_empty();
        for (i, &suit) in Suit::ALL.iter().enumerate() {
            board.foundations[i] = suit_pile(suit, Rank::Ace, Rank::King);
        }
        let outcome = play(&mut board, &SearchConfig::default()).expect("search runs");
        assert!(outcome.is_win());
        assert_eq!(outcome.nodes_visited, 1);
        assert!(outcome.winning_line.is_empty());
        assert_eq!(outcome.winning_state, Some(encode(&board)));
    }

    #[test]
    fn stuck_board_is_exhausted() {
        let mut board = stuck_king_board();
        let before = encode(&board);
        let outcome = play(&mut board, &config(Regime::Ascending, Strategy::Backtracking))
            .expect("search runs");

        assert_eq!(outcome.termination, TerminationReason::Exhausted);
        assert!(outcome.winning_state.is_none());
        assert!(outcome.revisits_pruned > 0);
        // Eight distinct states exist; the same state is re-entered from
        // different ancestors, so the path set must not act as a global memo.
        assert!(outcome.nodes_visited > 8);
        assert!(outcome.nodes_visited < 20_000);
        assert_eq!(encode(&board), before);
    }

    #[test]
    fn greedy_explores_a_subset() {
        let mut board = stuck_king_board();
        let full = play(&mut board, &config(Regime::Ascending, Strategy::Backtracking))
            .expect("search runs");
        let greedy = play(&mut board, &config(Regime::Ascending, Strategy::Greedy))
            .expect("search runs");

        assert_eq!(greedy.termination, TerminationReason::Exhausted);
        assert!(greedy.nodes_visited < full.nodes_visited);
    }

    #[test]
    fn greedy_still_finds_forced_win() {
        let mut board = one_move_from_win(Regime::Ascending);
        let outcome = play(&mut board, &config(Regime::Ascending, Strategy::Greedy))
            .expect("search runs");
        assert!(outcome.is_win());
    }

    #[test]
    fn node_budget_is_honoured_on_real_deal() {
        let mut board = deal_seeded(1);
        let before = encode(&board);
        let mut cfg = config(Regime::Ascending, Strategy::Backtracking);
        cfg.limits.max_nodes = Some(5_000);

        let outcome = play(&mut board, &cfg).expect("search runs");
        assert!(outcome.nodes_visited <= 5_000);
        assert!(matches!(
            outcome.termination,
            TerminationReason::Win | TerminationReason::Exhausted | TerminationReason::MaxNodesReached
        ));
        assert_eq!(outcome.is_win(), outcome.winning_state.is_some());
        assert_eq!(encode(&board), before);
    }

    #[test]
    fn depth_limit_is_reported() {
        let mut board = stuck_king_board();
        let mut cfg = config(Regime::Ascending, Strategy::Backtracking);
        cfg.limits.max_depth = Some(1);

        let outcome = play(&mut board, &cfg).expect("search runs");
        assert_eq!(outcome.termination, TerminationReason::MaxDepthReached);
        assert_eq!(outcome.max_path_depth, 1);
    }

    #[test]
    fn invalid_start_is_rejected() {
        let mut board = stuck_king_board();
        board.stock.pop();
        let err = play(&mut board, &config(Regime::Ascending, Strategy::Backtracking))
            .expect_err("51 cards must be rejected");
        assert!(matches!(
            err,
            SolveError::InvalidStart(BoardError::WrongCardCount { found: 51, .. })
        ));
    }

    #[test]
    fn descending_real_deal_never_reaches_foundations() {
        let outcome = solve_board(
            deal_seeded(3),
            &SearchConfig {
                limits: SearchLimits {
                    max_nodes: Some(2_000),
                    max_depth: None,
                },
                ..config(Regime::Descending, Strategy::Backtracking)
            },
        )
        .expect("search runs");
        assert!(!outcome.is_win());
    }
}
