use serde::{Deserialize, Serialize};

/// What a tile holds, fixed once mines are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Mine,
    /// Number of mines among the up-to-8 neighbors.
    Count(u8),
}

impl TileKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for TileKind {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player-visible state of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Unflagged,
    Flagged,
    Revealed,
    /// A flag on a safe tile, shown after a loss.
    FlaggedIncorrectly,
    /// The mine that ended the game.
    ClickedMine,
}

impl TileState {
    // whether the tile still looks closed to the player
    pub const fn is_closed(self) -> bool {
        use TileState::*;
        match self {
            Unflagged => true,
            Flagged => true,
            Revealed => false,
            FlaggedIncorrectly => true,
            ClickedMine => false,
        }
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Unflagged
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub state: TileState,
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        self.kind.is_mine()
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, TileState::Revealed)
    }
}
