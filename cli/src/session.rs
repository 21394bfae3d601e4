use rand::rngs::SmallRng;
use sweeper_core::{
    Difficulty, GameState, LEADERBOARD_LIMIT, Outcome, Records, ShuffledMinefieldGenerator,
    Stopwatch, format_duration,
};

use crate::command::{Command, HELP};
use crate::render;

/// What the host should do after a command.
#[derive(Debug, PartialEq)]
pub enum Reply {
    Print(String),
    /// The game was won and the records changed, print and persist them
    Won(String),
    Quit,
}

/// One player's sitting: the current game plus everything that outlives it.
pub struct Session {
    game: GameState,
    generator: ShuffledMinefieldGenerator<SmallRng>,
    stopwatch: Stopwatch,
    records: Records,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u64, records: Records) -> Self {
        Self {
            game: GameState::new(difficulty),
            generator: ShuffledMinefieldGenerator::from_seed(seed),
            stopwatch: Stopwatch::new(),
            records,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn render(&self) -> String {
        render::game(&self.game, self.stopwatch.elapsed_ms())
    }

    pub fn handle(&mut self, command: Command) -> sweeper_core::Result<Reply> {
        match command {
            Command::Help => Ok(Reply::Print(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
            Command::Leaderboard(filter) => Ok(Reply::Print(render::leaderboard(
                &self.records.leaderboard,
                filter,
                LEADERBOARD_LIMIT,
            ))),
            _ => {
                let Some(action) = command.into_action(self.game.difficulty()) else {
                    return Ok(Reply::Print(self.render()));
                };
                let outcome = self.game.apply(action, &mut self.generator)?;
                self.stopwatch.follow(outcome);
                log::debug!("{:?} -> {:?}", action, outcome);

                match outcome {
                    Outcome::Won => Ok(Reply::Won(self.finish_win())),
                    Outcome::Lost => Ok(Reply::Print(format!("{}Boom.", self.render()))),
                    _ => Ok(Reply::Print(self.render())),
                }
            }
        }
    }

    fn finish_win(&mut self) -> String {
        let difficulty = self.game.difficulty();
        let time_in_ms = self.stopwatch.elapsed_ms();
        let improved = self.records.record_win(difficulty, time_in_ms);
        log::info!("Won {} in {}ms", difficulty, time_in_ms);

        let mut out = self.render();
        out.push_str(&format!("Cleared in {}.", format_duration(time_in_ms)));
        if improved {
            out.push_str(" New best time!");
        } else if let Some(best) = self.records.best_times.get(difficulty) {
            out.push_str(&format!(" Best: {}.", format_duration(best)));
        }
        out
    }
}
