use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sweeper_core::Difficulty;

use command::{Command, HELP};
use session::{Reply, Session};

mod command;
mod logging;
mod render;
mod session;
mod store;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board to start on: EASY, MEDIUM or HARD
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where best times and the leaderboard are kept
    #[arg(short, long, default_value = "sweeper-records.json")]
    records: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose.log_level_filter());

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let records = store::load(&args.records)?;
    let mut session = Session::new(args.difficulty, seed, records);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}\n\n{}", session.render())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        };

        match session.handle(command) {
            Ok(Reply::Print(text)) => writeln!(stdout, "{text}")?,
            Ok(Reply::Won(text)) => {
                writeln!(stdout, "{text}")?;
                store::save(&args.records, session.records())?;
            }
            Ok(Reply::Quit) => break,
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }

    log::debug!("Bye");
    Ok(())
}
