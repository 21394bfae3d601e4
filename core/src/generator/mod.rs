use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts, consulted once per game on the first reveal.
pub trait MinefieldGenerator {
    /// Returns a `(height, width)` mask with `true` on every mine. `anchor` is the first
    /// revealed tile; implementations keep it and its neighbors clear.
    fn generate(&mut self, config: GameConfig, anchor: Coord2) -> Array2<bool>;
}
