//! Move representation, move generation and the stock cycler
//! (draw-3, unlimited redeals).
//
//! Every change the search makes to a board goes through a pair of
//! functions here: `Move::apply`/`Move::undo` for single-card transfers
//! and `draw`/`undo_draw` for the stock. Undo restores the board exactly,
//! so a search can walk the game tree on one mutable board.

use crate::board::{Board, PileKind, PileRef, NUM_COLS, NUM_FOUNDATIONS};
use crate::card::Card;
use crate::rules::Regime;

/// Cards moved from stock to waste per draw.
pub const DRAW_COUNT: usize = 3;

/// Groups of moves, tried by the search in the order given by
/// [`Regime::categories`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    TableauToTableau,
    TableauToFoundation,
    WasteToFoundation,
    WasteToTableau,
    /// Take the top card back off a foundation (descending regime only).
    FoundationToTableau,
}

impl MoveCategory {
    pub fn source_kind(self) -> PileKind {
        match self {
            MoveCategory::TableauToTableau | MoveCategory::TableauToFoundation => PileKind::Tableau,
            MoveCategory::WasteToFoundation | MoveCategory::WasteToTableau => PileKind::Waste,
            MoveCategory::FoundationToTableau => PileKind::Foundation,
        }
    }

    pub fn destination_kind(self) -> PileKind {
        match self {
            MoveCategory::TableauToFoundation | MoveCategory::WasteToFoundation => {
                PileKind::Foundation
            }
            MoveCategory::TableauToTableau
            | MoveCategory::WasteToTableau
            | MoveCategory::FoundationToTableau => PileKind::Tableau,
        }
    }

    /// Whether placement is judged by the foundation rule (same suit)
    /// rather than the tableau rule (alternating color).
    ///
    /// Cards coming off a foundation keep the foundation rule.
    pub fn uses_foundation_rule(self) -> bool {
        !matches!(
            self,
            MoveCategory::TableauToTableau | MoveCategory::WasteToTableau
        )
    }
}

/// Every pile of one kind, in index order.
fn piles_of(kind: PileKind) -> impl Iterator<Item = PileRef> {
    let count = match kind {
        PileKind::Tableau => NUM_COLS,
        PileKind::Foundation => NUM_FOUNDATIONS,
        PileKind::Waste | PileKind::Stock => 1,
    };
    (0..count).map(move |i| PileRef {
        kind,
        index: i as u8,
    })
}

/// Transfer of one exposed card between two piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: PileRef,
    pub to: PileRef,
    /// The card being moved, for logging and display.
    pub card: Card,
}

impl Move {
    /// Apply this move to the board.
    ///
    /// Assumes the move was produced by [`legal_moves`] for this exact
    /// board; legality is not re-checked.
    pub fn apply(&self, board: &mut Board) {
        if let Some(card) = board.pile_mut(self.from).pop() {
            debug_assert_eq!(card, self.card);
            board.pile_mut(self.to).push(card);
        }
    }

    /// Reverse a previous [`Move::apply`].
    pub fn undo(&self, board: &mut Board) {
        if let Some(card) = board.pile_mut(self.to).pop() {
            debug_assert_eq!(card, self.card);
            board.pile_mut(self.from).push(card);
        }
    }
}

/// All legal moves of one category, in (source, destination) index order.
pub fn legal_moves(board: &Board, category: MoveCategory, regime: Regime) -> Vec<Move> {
    let foundation_rule = category.uses_foundation_rule();
    let mut moves = Vec::new();

    for from in piles_of(category.source_kind()) {
        let Some(card) = board.pile(from).top() else {
            continue;
        };
        for to in piles_of(category.destination_kind()) {
            if to == from {
                continue;
            }
            if regime.can_place(card, to, board.pile(to).top(), foundation_rule) {
                moves.push(Move { from, to, card });
            }
        }
    }

    moves
}

/// What a single call to [`draw`] did, so it can be undone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DrawRecord {
    /// Cards moved from stock to waste (0..=3).
    pub drawn: u8,
    /// The waste was turned over into the stock before drawing.
    pub redealt: bool,
}

impl DrawRecord {
    /// The draw left the board untouched (stock and waste both empty).
    pub fn is_noop(&self) -> bool {
        self.drawn == 0 && !self.redealt
    }
}

/// Draw up to three cards from the stock onto the waste, one at a time.
///
/// If the stock is empty the waste is first turned over to become the new
/// stock (waste top ends up at the stock bottom) and the draw is retried.
/// With both piles empty nothing happens.
pub fn draw(board: &mut Board) -> DrawRecord {
    let mut record = DrawRecord::default();

    if board.stock.is_empty() {
        if board.waste.is_empty() {
            return record;
        }
        redeal(board);
        record.redealt = true;
    }

    while (record.drawn as usize) < DRAW_COUNT {
        let Some(card) = board.stock.pop() else {
            break;
        };
        board.waste.push(card);
        record.drawn += 1;
    }

    record
}

/// Reverse a previous [`draw`].
pub fn undo_draw(board: &mut Board, record: DrawRecord) {
    for _ in 0..record.drawn {
        if let Some(card) = board.waste.pop() {
            board.stock.push(card);
        }
    }
    if record.redealt {
        while let Some(card) = board.stock.pop() {
            board.waste.push(card);
        }
    }
}

/// Turn the waste over into the stock.
fn redeal(board: &mut Board) {
    while let Some(card) = board.waste.pop() {
        board.stock.push(card);
    }
}

/// One edge of the search tree: either a card move or a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Move(Move),
    Draw,
}

/// A step that has been applied, carrying what is needed to undo it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Applied {
    Move(Move),
    Draw(DrawRecord),
}

impl Step {
    pub fn apply(self, board: &mut Board) -> Applied {
        match self {
            Step::Move(mv) => {
                mv.apply(board);
                Applied::Move(mv)
            }
            Step::Draw => Applied::Draw(draw(board)),
        }
    }
}

impl Applied {
    pub fn undo(self, board: &mut Board) {
        match self {
            Applied::Move(mv) => mv.undo(board),
            Applied::Draw(record) => undo_draw(board, record),
        }
    }

    pub fn step(self) -> Step {
        match self {
            Applied::Move(mv) => Step::Move(mv),
            Applied::Draw(_) => Step::Draw,
        }
    }
}

// ----- Tests -----
