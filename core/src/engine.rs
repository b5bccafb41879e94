use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Hints granted at the start of every game.
pub const HINTS_PER_GAME: u8 = 3;

/// Flags granted at the start of every game, independent of the mine count.
pub const FLAGS_PER_GAME: CellCount = 81;

/// Valid transitions:
/// - InProgress -> Won (last safe cell revealed)
/// - InProgress -> Lost (a mine revealed)
///
/// Both end states are terminal; a new game is a new [`GameEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome and change set of a single reveal call.
///
/// `changed` lists every cell whose on-screen view changed, for incremental
/// rendering. On a loss it covers the whole board, since every cell's view
/// flips to revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealResult {
    pub outcome: RevealOutcome,
    pub changed: Vec<Coord2>,
}

impl RevealResult {
    const fn no_change() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            changed: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagResult {
    pub outcome: FlagOutcome,
    pub cell: CellState,
    pub flags_remaining: CellCount,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HintResult {
    pub cell_hinted: Option<Coord2>,
    pub hints_remaining: u8,
}

/// A single game from first reveal to win or loss.
///
/// Owns the whole session: mine layout, per-cell state, hint marks, and the
/// flag/hint budgets. All work happens synchronously inside each call; the
/// only external dependency is the RNG seeded at construction, so a given
/// seed replays the same game.
#[derive(Clone, Debug)]
pub struct GameEngine {
    layout: MineLayout,
    board: Array2<CellState>,
    hint_marks: Array2<bool>,
    revealed_count: CellCount,
    flags_remaining: CellCount,
    hints_remaining: u8,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl GameEngine {
    pub fn new(layout: MineLayout, seed: u64) -> Self {
        let size = layout.size();
        Self {
            layout,
            board: Array2::default(size.to_nd_index()),
            hint_marks: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flags_remaining: FLAGS_PER_GAME,
            hints_remaining: HINTS_PER_GAME,
            outcome: Default::default(),
            triggered_mine: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fresh game over a randomly generated layout.
    pub fn generate(config: GameConfig, seed: u64) -> Self {
        let layout = RandomLayoutGenerator::new(seed).generate(config);
        Self::new(layout, seed)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.layout.contains_mine(coords)
    }

    pub fn cell_state(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    /// Display projection of a cell, covering hints and the loss reveal-all.
    pub fn cell_view(&self, coords: Coord2) -> CellView {
        let state = self.board[coords.to_nd_index()];

        if matches!(self.outcome, Outcome::Lost) {
            return self.cell_view_lost(coords, state);
        }

        match state {
            CellState::Hidden if self.hint_marks[coords.to_nd_index()] => CellView::HintedMine,
            CellState::Hidden => CellView::Hidden,
            CellState::Revealed(count) => CellView::Revealed(count),
            CellState::Flagged => CellView::Flagged,
        }
    }

    fn cell_view_lost(&self, coords: Coord2, state: CellState) -> CellView {
        if self.layout.contains_mine(coords) {
            if self.triggered_mine == Some(coords) {
                CellView::TriggeredMine
            } else {
                CellView::Mine
            }
        } else {
            match state {
                CellState::Revealed(count) => CellView::Revealed(count),
                // hidden or flagged safe cells show their count once the game is lost
                _ => CellView::Revealed(self.layout.adjacent_mine_count(coords)),
            }
        }
    }

    /// Reveals a hidden cell, cascading through zero-count regions.
    ///
    /// Revealed and flagged cells are inert, as is the whole board once the
    /// game has ended; those calls return `NoChange` with an empty change
    /// set. A flagged cell must be unflagged before it can be revealed.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.layout.validate_coords(coords)?;

        if self.outcome.is_finished() || !self.board[coords.to_nd_index()].is_hidden() {
            return Ok(RevealResult::no_change());
        }

        if self.layout.contains_mine(coords) {
            return Ok(self.explode(coords));
        }

        let changed = self.reveal_safe_area(coords);

        if self.revealed_count == self.layout.safe_cell_count() {
            self.outcome = Outcome::Won;
            log::debug!("all {} safe cells revealed, game won", self.revealed_count);
            return Ok(RevealResult {
                outcome: RevealOutcome::Won,
                changed,
            });
        }

        Ok(RevealResult {
            outcome: RevealOutcome::Revealed,
            changed,
        })
    }

    fn explode(&mut self, coords: Coord2) -> RevealResult {
        self.triggered_mine = Some(coords);
        self.outcome = Outcome::Lost;
        log::debug!("mine triggered at {:?}, game lost", coords);

        // every cell's view flips to revealed, so the whole board changed
        let (rows, cols) = self.size();
        let changed = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .collect();

        RevealResult {
            outcome: RevealOutcome::Exploded,
            changed,
        }
    }

    /// Work-list flood fill from a safe hidden cell.
    ///
    /// Each cell is revealed at most once: the transition out of `Hidden` is
    /// the visited marker. Only neighbors of zero-count cells are enqueued,
    /// and a zero-count cell cannot border a mine, so the cascade can never
    /// reveal one. Flagged cells stay put and stop the cascade locally.
    fn reveal_safe_area(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut changed = Vec::new();
        let mut work_list = VecDeque::from([start]);

        while let Some(coords) = work_list.pop_front() {
            if !self.board[coords.to_nd_index()].is_hidden() {
                continue;
            }

            let count = self.layout.adjacent_mine_count(coords);
            self.board[coords.to_nd_index()] = CellState::Revealed(count);
            self.revealed_count += 1;
            changed.push(coords);
            log::trace!("revealed {:?}, adjacent mines: {}", coords, count);

            if count == 0 {
                work_list.extend(
                    self.layout
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        changed
    }

    /// Places or removes a flag, spending or refunding the flag budget.
    ///
    /// Revealed cells cannot be flagged, an exhausted budget makes placement
    /// a no-op, and a finished game ignores the call entirely.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagResult> {
        let coords = self.layout.validate_coords(coords)?;

        if self.outcome.is_finished() {
            return Ok(self.flag_result(FlagOutcome::NoChange, coords));
        }

        let outcome = match self.board[coords.to_nd_index()] {
            CellState::Hidden if self.flags_remaining > 0 => {
                self.board[coords.to_nd_index()] = CellState::Flagged;
                self.flags_remaining -= 1;
                FlagOutcome::Placed
            }
            CellState::Flagged => {
                self.board[coords.to_nd_index()] = CellState::Hidden;
                self.flags_remaining += 1;
                FlagOutcome::Removed
            }
            _ => FlagOutcome::NoChange,
        };

        Ok(self.flag_result(outcome, coords))
    }

    fn flag_result(&self, outcome: FlagOutcome, coords: Coord2) -> FlagResult {
        FlagResult {
            outcome,
            cell: self.board[coords.to_nd_index()],
            flags_remaining: self.flags_remaining,
        }
    }

    /// Spends a hint to mark a random un-hinted mine for display.
    ///
    /// The mark is purely visual: the cell stays `Hidden` for gameplay, does
    /// not count toward the win condition, and can still be flagged or
    /// fatally revealed. No-op when the budget is spent, the game is over,
    /// or every mine already carries a mark.
    pub fn use_hint(&mut self) -> HintResult {
        if self.hints_remaining == 0 || self.outcome.is_finished() {
            return HintResult {
                cell_hinted: None,
                hints_remaining: self.hints_remaining,
            };
        }

        let (rows, cols) = self.size();
        let candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&pos| {
                self.layout.contains_mine(pos) && !self.hint_marks[pos.to_nd_index()]
            })
            .collect();

        let Some(&coords) = candidates.as_slice().choose(&mut self.rng) else {
            return HintResult {
                cell_hinted: None,
                hints_remaining: self.hints_remaining,
            };
        };

        self.hint_marks[coords.to_nd_index()] = true;
        self.hints_remaining -= 1;
        log::debug!(
            "hint marked mine at {:?}, {} hints left",
            coords,
            self.hints_remaining
        );

        HintResult {
            cell_hinted: Some(coords),
            hints_remaining: self.hints_remaining,
        }
    }
}
