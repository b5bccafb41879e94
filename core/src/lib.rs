#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Validated board parameters: grid size and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Builds a configuration, rejecting degenerate boards outright.
    ///
    /// A bad size or mine count is a caller bug, so it surfaces as
    /// [`GameError::InvalidConfiguration`] instead of being clamped into
    /// something playable.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        if mines == 0 || mines >= cell_product(rows, cols) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn easy() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn medium() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn hard() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_product(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Immutable mine placement: which cells hold mines, plus the cached total.
///
/// The layout is fixed once constructed; a new game gets a new layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit mine positions on a `size`-shaped grid.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig::new_unchecked(rows, cols, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mine_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask[coords.to_nd_index()]
    }

    /// Mines among the in-bounds 8-connected neighbors of `coords`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors(coords, self.size())
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Placed,
    Removed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_mine_count_filling_the_board() {
        assert_eq!(
            GameConfig::new(5, 5, 25),
            Err(GameError::InvalidConfiguration)
        );
    }

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 0, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 5, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 5, 26), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn config_accepts_maximal_mine_count() {
        let config = GameConfig::new(5, 5, 24).unwrap();
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn presets_match_the_standard_difficulties() {
        let easy = GameConfig::easy();
        assert_eq!((easy.rows(), easy.cols(), easy.mines()), (9, 9, 10));

        let medium = GameConfig::medium();
        assert_eq!((medium.rows(), medium.cols(), medium.mines()), (16, 16, 40));

        let hard = GameConfig::hard();
        assert_eq!((hard.rows(), hard.cols(), hard.mines()), (16, 30, 99));

        // every preset must survive the validating constructor
        for preset in [easy, medium, hard] {
            assert!(GameConfig::new(preset.rows(), preset.cols(), preset.mines()).is_ok());
        }
    }

    #[test]
    fn layout_counts_adjacent_mines_with_bounds_clamping() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (0, 1), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 6);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        // a mine cell still reports only its neighbors
        assert_eq!(layout.adjacent_mine_count((0, 0)), 1);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mine_coords() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let layout = MineLayout::from_mine_coords((2, 4), &[(0, 0)]).unwrap();

        assert_eq!(layout.validate_coords((1, 3)), Ok((1, 3)));
        assert_eq!(layout.validate_coords((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(layout.validate_coords((0, 4)), Err(GameError::OutOfBounds));
    }
}
