use chrono::prelude::*;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::*;

/// How many entries a ranked leaderboard shows by default.
pub const LEADERBOARD_LIMIT: usize = 50;

/// Fastest winning time per difficulty, in milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestTimes {
    times: BTreeMap<Difficulty, u64>,
}

impl BestTimes {
    pub fn get(&self, difficulty: Difficulty) -> Option<u64> {
        self.times.get(&difficulty).copied()
    }

    /// Keeps `time_in_ms` if it beats the stored time, returning whether it did.
    pub fn record(&mut self, difficulty: Difficulty, time_in_ms: u64) -> bool {
        match self.times.get(&difficulty) {
            Some(&best) if best <= time_in_ms => false,
            _ => {
                self.times.insert(difficulty, time_in_ms);
                true
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub difficulty: Difficulty,
    pub time_in_ms: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeaderboardFilter {
    All,
    Only(Difficulty),
}

impl LeaderboardFilter {
    pub const ALL: [LeaderboardFilter; 4] = [
        Self::All,
        Self::Only(Difficulty::Easy),
        Self::Only(Difficulty::Medium),
        Self::Only(Difficulty::Hard),
    ];

    pub fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == difficulty,
        }
    }
}

impl fmt::Display for LeaderboardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.pad("ALL"),
            Self::Only(difficulty) => f.pad(difficulty.label()),
        }
    }
}

impl FromStr for LeaderboardFilter {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Winning times from every game, ranked on demand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    next_id: u64,
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn submit(&mut self, difficulty: Difficulty, time_in_ms: u64) -> &LeaderboardEntry {
        self.submit_at(difficulty, time_in_ms, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        difficulty: Difficulty,
        time_in_ms: u64,
        created_at: DateTime<Utc>,
    ) -> &LeaderboardEntry {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Leaderboard entry {} for {}: {}ms", id, difficulty, time_in_ms);
        self.entries.push(LeaderboardEntry {
            id,
            difficulty,
            time_in_ms,
            created_at,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Fastest first, ties broken by the earlier entry, at most `limit` entries.
    pub fn ranked(&self, filter: LeaderboardFilter, limit: usize) -> Vec<&LeaderboardEntry> {
        let mut ranked: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| filter.matches(entry.difficulty))
            .collect();
        ranked.sort_by_key(|entry| (entry.time_in_ms, entry.created_at, entry.id));
        ranked.truncate(limit);
        ranked
    }
}

/// Everything a host keeps between games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub best_times: BestTimes,
    pub leaderboard: Leaderboard,
}

impl Records {
    /// Files a win in both stores, returning whether it set a new best time.
    pub fn record_win(&mut self, difficulty: Difficulty, time_in_ms: u64) -> bool {
        self.leaderboard.submit(difficulty, time_in_ms);
        self.best_times.record(difficulty, time_in_ms)
    }
}

/// Formats a duration as `MM:SS.t`.
pub fn format_duration(time_in_ms: u64) -> String {
    let tenths = (time_in_ms / 100) % 10;
    let secs = (time_in_ms / 1000) % 60;
    let mins = time_in_ms / 60_000;
    format!("{:02}:{:02}.{}", mins, secs, tenths)
}
