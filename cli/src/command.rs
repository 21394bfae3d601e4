use anyhow::{Context, anyhow, bail};
use std::str::FromStr;
use sweeper_core::{Action, Coord, Difficulty, LeaderboardFilter};

pub const HELP: &str = "\
commands:
  r <row> <col>      reveal a tile
  f <row> <col>      toggle a flag
  n [difficulty]     new game (EASY, MEDIUM or HARD)
  lb [filter]        leaderboard (ALL, EASY, MEDIUM or HARD)
  h                  this help
  q                  quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord, Coord),
    Flag(Coord, Coord),
    /// New game, on the current difficulty when none is given
    NewGame(Option<Difficulty>),
    Leaderboard(LeaderboardFilter),
    Help,
    Quit,
}

impl Command {
    pub fn into_action(self, current: Difficulty) -> Option<Action> {
        match self {
            Command::Reveal(row, col) => Some(Action::Reveal { row, col }),
            Command::Flag(row, col) => Some(Action::ToggleFlag { row, col }),
            Command::NewGame(difficulty) => Some(Action::NewGame {
                difficulty: difficulty.unwrap_or(current),
            }),
            _ => None,
        }
    }
}

fn parse_coords<'a>(mut args: impl Iterator<Item = &'a str>) -> anyhow::Result<(Coord, Coord)> {
    let row = args.next().context("missing row")?;
    let col = args.next().context("missing column")?;
    if args.next().is_some() {
        bail!("expected only a row and a column");
    }
    let row = row.parse().with_context(|| format!("bad row {row:?}"))?;
    let col = col.parse().with_context(|| format!("bad column {col:?}"))?;
    Ok((row, col))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command, try `h`");
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                let (row, col) = parse_coords(words)?;
                Command::Reveal(row, col)
            }
            "f" | "flag" => {
                let (row, col) = parse_coords(words)?;
                Command::Flag(row, col)
            }
            "n" | "new" => Command::NewGame(words.next().map(str::parse).transpose()?),
            "lb" | "leaderboard" => Command::Leaderboard(
                words
                    .next()
                    .map(str::parse)
                    .transpose()?
                    .unwrap_or(LeaderboardFilter::All),
            ),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("unknown command {other:?}, try `h`")),
        })
    }
}
