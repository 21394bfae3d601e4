use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use records::*;
pub use stopwatch::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod records;
mod stopwatch;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Checks there is room for every mine outside a full first-click square.
    pub fn validate(self) -> Result<Self> {
        match self.total_tiles().checked_sub(SAFE_ZONE_TILES) {
            Some(room) if self.mines < room => Ok(self),
            _ => Err(GameError::TooManyMines),
        }
    }

    /// `(height, width)`, the shape of the board.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

// ordered by discriminant
const DIFFICULTY_TABLE: [(Difficulty, GameConfig); 3] = [
    (Difficulty::Easy, GameConfig::new(10, 8, 10)),
    (Difficulty::Medium, GameConfig::new(18, 14, 40)),
    (Difficulty::Hard, GameConfig::new(24, 20, 99)),
];

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> GameConfig {
        DIFFICULTY_TABLE[self as usize].1
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}

/// What a single action did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    /// First reveal: mines placed and the stage moved to playing.
    Started,
    Revealed,
    Flagged,
    Unflagged,
    Won,
    Lost,
    /// A new game replaced the previous one.
    Reset,
}

impl Outcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether the game ended with this outcome
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
