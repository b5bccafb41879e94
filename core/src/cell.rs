use serde::{Deserialize, Serialize};

/// Gameplay state of a single cell.
///
/// `Revealed` carries the adjacent mine count so the board never has to be
/// re-queried for it. The only transitions are `Hidden -> Revealed`
/// (irreversible) and `Hidden <-> Flagged`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What the presentation layer should draw for a single cell.
///
/// This is a projection of [`CellState`] plus end-of-game and hint
/// information: after a loss every cell maps to a revealed view, with mines
/// kept apart from numbered cells and the triggered mine kept apart from the
/// other mines. A hint mark overlays a hidden mine without changing its
/// gameplay state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(u8),
    Flagged,
    HintedMine,
    Mine,
    TriggeredMine,
}

impl CellView {
    /// Whether the cell still reads as unopened on screen.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::HintedMine)
    }
}
