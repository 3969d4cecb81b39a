//! Human-readable rendering of boards and search steps.
//!
//! Face-down cards are shown as "XX" and face-up cards with their
//! `short_str()` rank/suit code. The exposed card of a column is always
//! shown, even if it was dealt face-down, since a player could see it.
//!
//! This is only for people reading the CLI output; the canonical,
//! machine-readable form of a board lives in `encode`.

use core::fmt;

use crate::board::{Board, PileKind, PileRef, NUM_COLS};
use crate::card::Card;
use crate::moves::Step;

/// Format a single card for display, either face-up or face-down.
pub fn format_card_visible(card: Card, face_up: bool) -> String {
    if face_up {
        card.short_str()
    } else {
        "XX".to_string()
    }
}

/// Render only the foundation row, showing the top card of each pile.
///
///   - Empty foundation: `[  ]`
///   - Non-empty: e.g. `[AH]`, `[7C]`, `[KD]`
pub fn render_foundations(board: &Board) -> String {
    let mut s = String::from("Foundations: ");
    for pile in &board.foundations {
        match pile.top() {
            Some(card) => s.push_str(&format!("[{}] ", card.short_str())),
            None => s.push_str("[  ] "),
        }
    }
    s.trim_end().to_string()
}

/// Render the stock (as a count) and waste (top card and count) on one line.
pub fn render_stock_and_waste(board: &Board) -> String {
    let mut s = String::new();

    // Stock: we don't reveal internal order, only count.
    let stock_len = board.stock.len();
    if stock_len == 0 {
        s.push_str("Stock: [empty]");
    } else {
        s.push_str(&format!("Stock: [{} cards]", stock_len));
    }

    s.push_str("    ");

    match board.waste.top() {
        None => s.push_str("Waste: [empty]"),
        Some(top) => s.push_str(&format!(
            "Waste: [{}] ({} cards)",
            top.short_str(),
            board.waste.len()
        )),
    }

    s
}

/// Render all tableau columns as a multi-line string.
///
/// Columns are top-justified: row 0 holds the bottom card of every column
/// and each column extends downwards to its exposed card.
pub fn render_columns(board: &Board) -> String {
    let mut s = String::new();

    s.push_str("Columns:\n");
    s.push_str("      ");
    for col_idx in 0..NUM_COLS {
        s.push_str(&format!(" C{} ", col_idx + 1));
    }
    s.push('\n');

    let max_height = board.tableau.iter().map(|c| c.len()).max().unwrap_or(0);

    for row in 0..max_height {
        s.push_str("      ");
        for col in &board.tableau {
            match col.as_slice().get(row) {
                None => s.push_str("    "),
                Some(&card) => {
                    let exposed = row + 1 == col.len();
                    let rep = format_card_visible(card, exposed || !card.hidden);
                    s.push_str(&format!("{:>3} ", rep));
                }
            }
        }
        s.push('\n');
    }

    s
}

/// Render a full board (foundations, stock/waste, and columns).
pub fn render_board(board: &Board) -> String {
    let mut s = String::new();
    s.push_str(&render_foundations(board));
    s.push('\n');
    s.push_str(&render_stock_and_waste(board));
    s.push('\n');
    s.push('\n');
    s.push_str(&render_columns(board));
    s
}

impl fmt::Display for PileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PileKind::Tableau => write!(f, "Column {}", self.index + 1),
            PileKind::Foundation => write!(f, "Foundation {}", self.index + 1),
            PileKind::Waste => f.write_str("Waste"),
            PileKind::Stock => f.write_str("Stock"),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Move(mv) => write!(f, "{}: {} -> {}", mv.from, mv.card, mv.to),
            Step::Draw => f.write_str("Draw from Stock (up to 3 cards, redeal if empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical_boards::{one_move_from_win, stuck_king_board};
    use crate::card::{Rank, Suit};
    use crate::deck::deal_seeded;
    use crate::moves::Move;
    use crate::rules::Regime;

    /// Parse the string produced by `render_columns` back into a grid of
    /// per-cell strings ("", "XX", "AH", etc.).
    fn parse_rendered_column_grid(rendered: &str) -> Vec<Vec<String>> {
        let lines: Vec<&str> = rendered.lines().collect();
        if lines.len() <= 2 {
            return Vec::new();
        }
        let body = &lines[2..];
        let mut grid = vec![vec![String::new(); NUM_COLS]; body.len()];

        let base_offset = 6;
        for (row_idx, line) in body.iter().enumerate() {
            for col_idx in 0..NUM_COLS {
                let start = base_offset + 4 * col_idx;
                if start >= line.len() {
                    continue;
                }
                let end = (start + 4).min(line.len());
                grid[row_idx][col_idx] = line[start..end].trim().to_string();
            }
        }

        grid
    }

    #[test]
    fn initial_deal_shows_only_exposed_cards() {
        let board = deal_seeded(123456789);
        let grid = parse_rendered_column_grid(&render_columns(&board));
        assert_eq!(grid.len(), NUM_COLS);

        for (col_idx, col) in board.tableau.iter().enumerate() {
            for row in 0..NUM_COLS {
                let cell = &grid[row][col_idx];
                if row >= col.len() {
                    assert!(cell.is_empty());
                } else if row + 1 == col.len() {
                    assert_eq!(cell, &col.as_slice()[row].short_str());
                } else {
                    assert_eq!(cell, "XX");
                }
            }
        }
    }

    #[test]
    fn stock_and_waste_line() {
        let mut board = stuck_king_board();
        let line = render_stock_and_waste(&board);
        assert!(line.contains("Stock: [1 cards]"));
        assert!(line.contains("Waste: [empty]"));

        let king = board.stock.pop().expect("king");
        board.waste.push(king);
        let line = render_stock_and_waste(&board);
        assert!(line.contains("Stock: [empty]"));
        assert!(line.contains("Waste: [KH] (1 cards)"));
    }

    #[test]
    fn foundations_show_top_cards() {
        let board = one_move_from_win(Regime::Ascending);
        assert_eq!(
            render_foundations(&board),
            "Foundations: [KH] [KC] [KD] [QS]"
        );
        let empty = Board::new_empty();
        assert_eq!(render_foundations(&empty), "Foundations: [  ] [  ] [  ] [  ]");
    }

    #[test]
    fn steps_read_naturally() {
        let mv = Move {
            from: PileRef::WASTE,
            to: PileRef::tableau(2),
            card: Card::new(Suit::Hearts, Rank::Seven),
        };
        assert_eq!(Step::Move(mv).to_string(), "Waste: 7H -> Column 3");
        assert!(Step::Draw.to_string().starts_with("Draw"));
        assert_eq!(PileRef::foundation(3).to_string(), "Foundation 4");
    }

    #[test]
    fn render_board_has_all_sections() {
        let text = render_board(&deal_seeded(4));
        assert!(text.starts_with("Foundations:"));
        assert!(text.contains("Stock: [24 cards]"));
        assert!(text.contains("Columns:"));
    }
}
