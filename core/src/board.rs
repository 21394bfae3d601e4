use std::collections::VecDeque;
use std::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row-major grid of tiles, `height` rows by `width` columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    /// A board of unflagged count-0 tiles, sized `(height, width)`.
    pub fn new(size: Coord2) -> Self {
        Self {
            tiles: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.tiles.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_tiles(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile(&self, coords: Coord2) -> Tile {
        self[coords]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    /// Tiles with their coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Tile> + '_> + '_ {
        self.tiles.rows().into_iter().map(|row| row.into_iter().copied())
    }

    pub fn mine_count(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.is_mine()).count() as CellCount
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// Marks every `true` cell of `mine_mask` as a mine and gives every other tile its
    /// adjacent-mine count.
    pub fn arm(&mut self, mine_mask: &Array2<bool>) {
        debug_assert_eq!(mine_mask.dim(), self.tiles.dim());

        for (index, &is_mine) in mine_mask.indexed_iter() {
            self.tiles[index].kind = if is_mine {
                TileKind::Mine
            } else {
                TileKind::Count(0)
            };
        }

        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !self[coords].is_mine() {
                    let count = self.adjacent_mine_count(coords);
                    self[coords].kind = TileKind::Count(count);
                }
            }
        }
    }

    /// Breadth-first reveal from `start`, spreading through count-0 tiles.
    ///
    /// Mines and already revealed tiles are skipped, so a tile queued twice is only
    /// processed once. Flags swept over are removed; the number removed is returned so
    /// the caller can hand them back.
    pub fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut flags_returned = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let tile = self[coords];
            if tile.is_mine() || tile.is_revealed() {
                continue;
            }

            if tile.state == TileState::Flagged {
                flags_returned += 1;
            }
            self[coords].state = TileState::Revealed;
            log::trace!("Flood revealed tile at {:?}: {:?}", coords, tile.kind);

            if tile.kind == TileKind::Count(0) {
                to_visit.extend(self.iter_neighbors(coords));
            }
        }

        flags_returned
    }

    /// Number of tiles whose state is anything but revealed.
    pub fn unrevealed_count(&self) -> CellCount {
        self.tiles
            .iter()
            .filter(|tile| !tile.is_revealed())
            .count() as CellCount
    }

    /// Shows every unflagged mine and marks wrong flags, then marks the `clicked` mine.
    pub fn expose_mines(&mut self, clicked: Coord2) {
        for tile in self.tiles.iter_mut() {
            match (tile.kind, tile.state) {
                (TileKind::Mine, TileState::Unflagged) => tile.state = TileState::Revealed,
                (TileKind::Count(_), TileState::Flagged) => {
                    tile.state = TileState::FlaggedIncorrectly
                }
                _ => {}
            }
        }
        // after the sweep so it is not overwritten
        self[clicked].state = TileState::ClickedMine;
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.tiles[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.tiles[(row as usize, col as usize)]
    }
}
