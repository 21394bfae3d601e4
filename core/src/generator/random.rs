use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Size of the first-click neighborhood kept clear of mines. Always subtracted in full,
/// even when the anchor sits on an edge and fewer tiles are excluded.
pub const SAFE_ZONE_TILES: CellCount = 9;

/// Shuffles a mine-slot sequence and deals it over the board around the anchor.
#[derive(Clone, Debug)]
pub struct ShuffledMinefieldGenerator<R> {
    rng: R,
}

impl<R: Rng> ShuffledMinefieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl ShuffledMinefieldGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MinefieldGenerator for ShuffledMinefieldGenerator<R> {
    fn generate(&mut self, config: GameConfig, anchor: Coord2) -> Array2<bool> {
        let mut slots = mine_slots(config);
        shuffle_slots(&mut slots, &mut self.rng);
        let mine_mask = place_mines(config, anchor, &slots);

        // double check mine count
        let count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if count != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
        }
        log::debug!("Placed {} mines around anchor {:?}", count, anchor);
        mine_mask
    }
}

/// `total - 9` slots, the first `mines` of them set.
pub fn mine_slots(config: GameConfig) -> Vec<bool> {
    let len = config.total_tiles().saturating_sub(SAFE_ZONE_TILES);
    (0..len).map(|i| i < config.mines).collect()
}

/// Fisher-Yates: for each index from the last down to 1, swap with a uniform pick from `0..=i`.
pub fn shuffle_slots<R: Rng + ?Sized>(slots: &mut [bool], rng: &mut R) {
    for i in (1..slots.len()).rev() {
        let j = rng.random_range(0..=i);
        slots.swap(i, j);
    }
}

/// Walks the board row-major, skipping the 3x3 square around `anchor`, and consumes one
/// slot per visited tile; a `true` slot makes that tile a mine. Stops once `config.mines`
/// mines are down or the slots run out.
pub fn place_mines(config: GameConfig, anchor: Coord2, slots: &[bool]) -> Array2<bool> {
    let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
    let mut slots = slots.iter().copied();
    let mut mines_placed = 0;

    'placing: for row in 0..config.height {
        for col in 0..config.width {
            if mines_placed == config.mines {
                break 'placing;
            }
            let coords = (row, col);
            if within_one(anchor, coords) {
                continue;
            }
            let Some(is_mine) = slots.next() else {
                break 'placing;
            };
            if is_mine {
                mine_mask[coords.to_nd_index()] = true;
                mines_placed += 1;
            }
        }
    }

    mine_mask
}
