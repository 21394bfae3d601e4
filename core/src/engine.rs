use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Start -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Start, through a new game
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// No tile revealed yet, mines not placed
    Start,
    Playing,
    Won,
    Lost,
}

impl Stage {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Start)
    }

    /// Indicates the game has ended and only a new game is accepted
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Start
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal { row: Coord, col: Coord },
    ToggleFlag { row: Coord, col: Coord },
    NewGame { difficulty: Difficulty },
}

/// A whole game, from the untouched board to a win or loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    difficulty: Difficulty,
    config: GameConfig,
    board: Board,
    flags_left: isize,
    stage: Stage,
}

impl GameState {
    pub fn new(difficulty: Difficulty) -> Self {
        let config = difficulty.config();
        Self::fresh(difficulty, config)
    }

    /// A game labelled `difficulty` but played on a custom board.
    pub fn with_config(difficulty: Difficulty, config: GameConfig) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self::fresh(difficulty, config))
    }

    fn fresh(difficulty: Difficulty, config: GameConfig) -> Self {
        Self {
            difficulty,
            config,
            board: Board::new(config.size()),
            flags_left: config.mines as isize,
            stage: Default::default(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Flags still available; goes negative when more tiles are flagged than there are mines.
    pub fn flags_left(&self) -> isize {
        self.flags_left
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.board[coords]
    }

    /// Applies `action` in place. `generator` is only consulted by the first reveal.
    pub fn apply<G>(&mut self, action: Action, generator: &mut G) -> Result<Outcome>
    where
        G: MinefieldGenerator + ?Sized,
    {
        match action {
            Action::Reveal { row, col } => self.reveal((row, col), generator),
            Action::ToggleFlag { row, col } => self.toggle_flag((row, col)),
            Action::NewGame { difficulty } => Ok(self.new_game(difficulty)),
        }
    }

    /// Reveal an unflagged tile, placing the mines first if this is the opening move
    pub fn reveal<G>(&mut self, coords: Coord2, generator: &mut G) -> Result<Outcome>
    where
        G: MinefieldGenerator + ?Sized,
    {
        let coords = self.board.validate_coords(coords)?;

        if self.stage.is_final() || self.board[coords].state != TileState::Unflagged {
            log::trace!("Ignoring reveal at {:?} in stage {:?}", coords, self.stage);
            return Ok(Outcome::NoChange);
        }

        let started = self.stage.is_initial();
        if started {
            self.start(coords, generator);
        }

        let tile = self.board[coords];
        match tile.kind {
            TileKind::Mine => {
                self.lose(coords);
                return Ok(Outcome::Lost);
            }
            TileKind::Count(0) => self.flood_reveal(coords),
            TileKind::Count(count) => {
                self.board[coords].state = TileState::Revealed;
                log::debug!("Revealed tile at {:?}, mine count: {}", coords, count);
            }
        }

        if self.board.unrevealed_count() == self.config.mines {
            self.stage = Stage::Won;
            log::debug!("Game won");
            Ok(Outcome::Won)
        } else if started {
            Ok(Outcome::Started)
        } else {
            Ok(Outcome::Revealed)
        }
    }

    /// Place or remove a flag on a tile that is not revealed
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Outcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.stage.is_final() {
            return Ok(Outcome::NoChange);
        }

        let tile = &mut self.board[coords];
        Ok(match tile.state {
            TileState::Unflagged => {
                tile.state = TileState::Flagged;
                self.flags_left -= 1;
                log::debug!("Flagged {:?}, flags left: {}", coords, self.flags_left);
                Outcome::Flagged
            }
            TileState::Flagged => {
                tile.state = TileState::Unflagged;
                self.flags_left += 1;
                log::debug!("Unflagged {:?}, flags left: {}", coords, self.flags_left);
                Outcome::Unflagged
            }
            _ => Outcome::NoChange,
        })
    }

    /// Discard this game for a fresh one on `difficulty`'s board
    pub fn new_game(&mut self, difficulty: Difficulty) -> Outcome {
        log::debug!("New {} game, replacing one in stage {:?}", difficulty, self.stage);
        *self = Self::new(difficulty);
        Outcome::Reset
    }

    fn start<G>(&mut self, anchor: Coord2, generator: &mut G)
    where
        G: MinefieldGenerator + ?Sized,
    {
        let mine_mask = generator.generate(self.config, anchor);
        self.board.arm(&mine_mask);
        self.stage = Stage::Playing;
        log::debug!("Started {} game anchored at {:?}", self.difficulty, anchor);
    }

    fn flood_reveal(&mut self, start: Coord2) {
        let flags_returned = self.board.flood_reveal(start);
        self.flags_left += flags_returned as isize;
        log::debug!(
            "Flood-fill from {:?} returned {} flags",
            start,
            flags_returned
        );
    }

    fn lose(&mut self, clicked: Coord2) {
        self.stage = Stage::Lost;
        self.board.expose_mines(clicked);
        log::debug!("Game lost on mine at {:?}", clicked);
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;

    /// Places mines exactly where told, ignoring the anchor.
    struct FixedMinefield(Vec<Coord2>);

    impl MinefieldGenerator for FixedMinefield {
        fn generate(&mut self, config: GameConfig, _anchor: Coord2) -> Array2<bool> {
            let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
            for &coords in &self.0 {
                mine_mask[coords.to_nd_index()] = true;
            }
            mine_mask
        }
    }

    fn custom(width: Coord, height: Coord, mines: CellCount) -> GameState {
        GameState::with_config(Difficulty::Easy, GameConfig::new(width, height, mines)).unwrap()
    }

    fn reveal(row: Coord, col: Coord) -> Action {
        Action::Reveal { row, col }
    }

    fn flag(row: Coord, col: Coord) -> Action {
        Action::ToggleFlag { row, col }
    }

    /// 4 rows by 5 columns with a wall of mines in column 3:
    /// ```text
    /// 0 0 2 M 2
    /// 0 0 3 M 3
    /// 0 0 3 M 3
    /// 0 0 2 M 2
    /// ```
    fn walled() -> (GameState, FixedMinefield) {
        let game = custom(5, 4, 4);
        let mines = FixedMinefield(vec![(0, 3), (1, 3), (2, 3), (3, 3)]);
        (game, mines)
    }

    #[test]
    fn new_game_is_untouched() {
        for difficulty in Difficulty::ALL {
            let game = GameState::new(difficulty);
            let config = difficulty.config();

            assert_eq!(game.board().size(), (config.height, config.width));
            assert_eq!(game.flags_left(), config.mines as isize);
            assert_eq!(game.stage(), Stage::Start);
            assert!(game.board().iter().all(|(_, tile)| tile == Tile::default()));
        }
    }

    #[test]
    fn with_config_rejects_crowded_boards() {
        let result = GameState::with_config(Difficulty::Easy, GameConfig::new(4, 4, 7));
        assert_eq!(result, Err(GameError::TooManyMines));
    }

    #[test]
    fn first_reveal_is_always_safe() {
        for difficulty in Difficulty::ALL {
            let (rows, cols) = difficulty.config().size();
            for (seed, anchor) in [(0, 0), (rows - 1, cols - 1), (rows / 2, cols / 2), (0, cols / 3)]
                .into_iter()
                .enumerate()
            {
                let mut game = GameState::new(difficulty);
                let mut generator = ShuffledMinefieldGenerator::from_seed(seed as u64 + 100);

                let outcome = game.reveal(anchor, &mut generator).unwrap();

                assert_eq!(outcome, Outcome::Started);
                assert_eq!(game.stage(), Stage::Playing);
                assert_eq!(game.board().mine_count(), difficulty.config().mines);
                assert_eq!(game.tile_at(anchor).kind, TileKind::Count(0));
                assert!(game.tile_at(anchor).is_revealed());
                for neighbor in game.board().iter_neighbors(anchor) {
                    assert!(!game.tile_at(neighbor).is_mine());
                    assert!(game.tile_at(neighbor).is_revealed());
                }
            }
        }
    }

    #[test]
    fn counts_match_neighbors_after_start() {
        let mut game = GameState::new(Difficulty::Medium);
        game.reveal((7, 9), &mut ShuffledMinefieldGenerator::from_seed(3))
            .unwrap();

        let board = game.board();
        for (coords, tile) in board.iter() {
            if let TileKind::Count(count) = tile.kind {
                let expected = board
                    .iter_neighbors(coords)
                    .filter(|&pos| board.tile(pos).is_mine())
                    .count();
                assert_eq!(count as usize, expected, "{coords:?}");
            }
        }
    }

    #[test]
    fn opening_every_safe_tile_on_the_first_reveal_wins() {
        // a single mine in the far corner lets the first flood-fill clear the board
        let mut game = custom(4, 4, 1);
        let mut mines = FixedMinefield(vec![(3, 3)]);

        let outcome = game.apply(reveal(0, 0), &mut mines).unwrap();

        assert_eq!(outcome, Outcome::Won);
        assert_eq!(game.stage(), Stage::Won);
        assert_eq!(game.tile_at((3, 3)).kind, TileKind::Mine);
        assert_eq!(game.tile_at((3, 3)).state, TileState::Unflagged);
        assert_eq!(game.tile_at((2, 2)).kind, TileKind::Count(1));
        assert_eq!(game.board().unrevealed_count(), 1);
    }

    #[test]
    fn win_lands_exactly_on_the_last_safe_tile() {
        let (mut game, mut mines) = walled();

        assert_eq!(game.apply(reveal(0, 0), &mut mines), Ok(Outcome::Started));
        assert_eq!(game.board().unrevealed_count(), 8);

        for row in 0..3 {
            assert_eq!(game.apply(reveal(row, 4), &mut mines), Ok(Outcome::Revealed));
            assert_eq!(game.stage(), Stage::Playing);
        }
        assert_eq!(game.tile_at((1, 4)).kind, TileKind::Count(3));

        assert_eq!(game.apply(reveal(3, 4), &mut mines), Ok(Outcome::Won));
        assert_eq!(game.stage(), Stage::Won);
    }

    #[test]
    fn toggling_twice_restores_the_tile() {
        let mut game = GameState::new(Difficulty::Easy);
        let mut mines = FixedMinefield(vec![]);

        assert_eq!(game.apply(flag(2, 2), &mut mines), Ok(Outcome::Flagged));
        assert_eq!(game.flags_left(), 9);
        assert_eq!(game.tile_at((2, 2)).state, TileState::Flagged);

        assert_eq!(game.apply(flag(2, 2), &mut mines), Ok(Outcome::Unflagged));
        assert_eq!(game.flags_left(), 10);
        assert_eq!(game.tile_at((2, 2)).state, TileState::Unflagged);
        assert_eq!(game.stage(), Stage::Start);
    }

    #[test]
    fn flags_left_can_go_negative() {
        let mut game = custom(4, 4, 1);

        for col in 0..3 {
            game.toggle_flag((0, col)).unwrap();
        }

        assert_eq!(game.flags_left(), -2);
    }

    #[test]
    fn flood_fill_returns_swept_flags() {
        let (mut game, mut mines) = walled();
        game.toggle_flag((3, 0)).unwrap();
        game.toggle_flag((3, 4)).unwrap();
        assert_eq!(game.flags_left(), 2);

        game.apply(reveal(0, 0), &mut mines).unwrap();

        assert_eq!(game.tile_at((3, 0)).state, TileState::Revealed);
        assert_eq!(game.tile_at((3, 4)).state, TileState::Flagged);
        assert_eq!(game.flags_left(), 3);
    }

    #[test]
    fn revealed_tiles_cannot_be_flagged_and_flags_block_reveals() {
        let (mut game, mut mines) = walled();
        game.apply(reveal(0, 0), &mut mines).unwrap();

        assert_eq!(game.apply(flag(0, 0), &mut mines), Ok(Outcome::NoChange));
        assert_eq!(game.flags_left(), 4);

        game.apply(flag(0, 3), &mut mines).unwrap();
        assert_eq!(game.apply(reveal(0, 3), &mut mines), Ok(Outcome::NoChange));
        assert_eq!(game.stage(), Stage::Playing);
    }

    #[test]
    fn hitting_a_mine_shows_the_board() {
        let (mut game, mut mines) = walled();
        game.apply(reveal(0, 0), &mut mines).unwrap();
        game.apply(flag(0, 3), &mut mines).unwrap();
        game.apply(flag(0, 4), &mut mines).unwrap();

        let outcome = game.apply(reveal(2, 3), &mut mines).unwrap();

        assert_eq!(outcome, Outcome::Lost);
        assert_eq!(game.stage(), Stage::Lost);
        assert_eq!(game.tile_at((2, 3)).state, TileState::ClickedMine);
        assert_eq!(game.tile_at((0, 3)).state, TileState::Flagged);
        assert_eq!(game.tile_at((1, 3)).state, TileState::Revealed);
        assert_eq!(game.tile_at((3, 3)).state, TileState::Revealed);
        assert_eq!(game.tile_at((0, 4)).state, TileState::FlaggedIncorrectly);
        assert_eq!(game.tile_at((1, 4)).state, TileState::Unflagged);
    }

    #[test]
    fn finished_games_ignore_moves() {
        let (mut game, mut mines) = walled();
        game.apply(reveal(0, 0), &mut mines).unwrap();
        game.apply(reveal(0, 3), &mut mines).unwrap();
        let lost = game.clone();

        assert_eq!(game.apply(reveal(0, 4), &mut mines), Ok(Outcome::NoChange));
        assert_eq!(game.apply(flag(1, 4), &mut mines), Ok(Outcome::NoChange));
        assert_eq!(game, lost);
    }

    #[test]
    fn new_game_resets_from_every_stage() {
        let (mut started, mut mines) = walled();
        let mut playing = started.clone();
        playing.apply(reveal(0, 0), &mut mines).unwrap();
        let mut lost = playing.clone();
        lost.apply(reveal(1, 3), &mut mines).unwrap();
        let mut won = custom(4, 4, 1);
        won.apply(reveal(0, 0), &mut FixedMinefield(vec![(3, 3)]))
            .unwrap();
        assert_eq!(won.stage(), Stage::Won);

        for game in [&mut started, &mut playing, &mut lost, &mut won] {
            let outcome = game
                .apply(Action::NewGame { difficulty: Difficulty::Hard }, &mut mines)
                .unwrap();

            assert_eq!(outcome, Outcome::Reset);
            assert_eq!(*game, GameState::new(Difficulty::Hard));
        }
    }

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let mut game = GameState::new(Difficulty::Easy);
        let mut mines = FixedMinefield(vec![]);

        assert_eq!(game.apply(reveal(8, 0), &mut mines), Err(GameError::InvalidCoords));
        assert_eq!(game.apply(flag(0, 10), &mut mines), Err(GameError::InvalidCoords));
        assert_eq!(game, GameState::new(Difficulty::Easy));
    }

    #[test]
    fn state_round_trips_through_json() {
        let (mut game, mut mines) = walled();
        game.apply(reveal(0, 0), &mut mines).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
    }
}
