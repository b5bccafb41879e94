use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform mine placement without replacement, deterministic per seed.
///
/// Runs a partial Fisher-Yates pass over every cell index and takes the
/// first `mines` entries, instead of redrawing on collision, so the work is
/// bounded even on nearly-full boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let total = config.total_cells();
        let mines = config.mines();

        let mut indices: Vec<CellCount> = (0..total).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for draw in 0..mines {
            let pick = rng.random_range(draw..total);
            indices.swap(draw as usize, pick as usize);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        {
            let cells = mine_mask.as_slice_mut().expect("layout should be standard");
            for &index in &indices[..mines as usize] {
                cells[index as usize] = true;
            }
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        if layout.mine_count() != mines {
            log::warn!(
                "Generated layout mine count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                mines
            );
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mine_count() {
        for seed in 0..8 {
            let layout = RandomLayoutGenerator::new(seed).generate(GameConfig::easy());
            assert_eq!(layout.mine_count(), 10);
            assert_eq!(layout.size(), (9, 9));
            assert_eq!(layout.safe_cell_count(), 71);
        }
    }

    #[test]
    fn handles_nearly_full_boards() {
        let config = GameConfig::new(4, 4, 15).unwrap();
        let layout = RandomLayoutGenerator::new(3).generate(config);

        assert_eq!(layout.mine_count(), 15);
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_produces_the_same_layout() {
        let first = RandomLayoutGenerator::new(42).generate(GameConfig::medium());
        let second = RandomLayoutGenerator::new(42).generate(GameConfig::medium());

        assert_eq!(first, second);
    }

    #[test]
    fn adjacency_counts_match_a_direct_recount() {
        let layout = RandomLayoutGenerator::new(7).generate(GameConfig::easy());
        let (rows, cols) = layout.size();

        for row in 0..rows {
            for col in 0..cols {
                // recount with clamped index ranges, independent of NeighborIter
                let mut recount = 0;
                for n_row in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
                    for n_col in col.saturating_sub(1)..=(col + 1).min(cols - 1) {
                        if (n_row, n_col) != (row, col) && layout.contains_mine((n_row, n_col)) {
                            recount += 1;
                        }
                    }
                }
                assert_eq!(layout.adjacent_mine_count((row, col)), recount);
            }
        }
    }
}
