use std::fmt::Write;
use sweeper_core::{
    GameState, Leaderboard, LeaderboardFilter, Tile, TileKind, TileState, format_duration,
};

fn tile_symbol(tile: Tile) -> char {
    match (tile.state, tile.kind) {
        (TileState::Unflagged, _) => '#',
        (TileState::Flagged, _) => 'F',
        (TileState::FlaggedIncorrectly, _) => 'x',
        (TileState::ClickedMine, _) => '@',
        (TileState::Revealed, TileKind::Mine) => '*',
        (TileState::Revealed, TileKind::Count(0)) => '.',
        (TileState::Revealed, TileKind::Count(count)) => char::from(b'0' + count),
    }
}

/// Status line followed by the grid, with row and column numbers.
pub fn game(game: &GameState, time_in_ms: u64) -> String {
    let mut out = String::new();
    let (_, cols) = game.board().size();

    let _ = writeln!(
        out,
        "{}  flags: {}  time: {}  {:?}",
        game.difficulty(),
        game.flags_left(),
        format_duration(time_in_ms),
        game.stage()
    );

    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');

    for (row, tiles) in game.board().rows().enumerate() {
        let _ = write!(out, "{row:>3}");
        for tile in tiles {
            let _ = write!(out, "{:>3}", tile_symbol(tile));
        }
        out.push('\n');
    }
    out
}

pub fn leaderboard(leaderboard: &Leaderboard, filter: LeaderboardFilter, limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "leaderboard: {filter}");
    let ranked = leaderboard.ranked(filter, limit);
    if ranked.is_empty() {
        out.push_str("  no entries yet\n");
    }
    for (rank, entry) in ranked.into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {}  {:<6}  {}",
            rank + 1,
            format_duration(entry.time_in_ms),
            entry.difficulty,
            entry.created_at.format("%Y-%m-%d")
        );
    }
    out
}
