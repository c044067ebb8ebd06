use serde::{Deserialize, Serialize};

use crate::{PlayerId, SessionId};

/// One ranked closed session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: PlayerId,
    pub name: String,
    pub session: SessionId,
    pub profit_bps: i64,
    pub rank: u32,
}

/// Fixed-capacity board sorted descending by final profit rate.
///
/// Every closed session is a candidate entry; a player may hold
/// several spots. Sessions close exactly once, so an entry is never
/// replaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub capacity: usize,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    pub fn update(&mut self, player: PlayerId, name: String, session: SessionId, profit_bps: i64) {
        // Sessions close once; ignore a replayed insert for the same
        // session.
        if self.entries.iter().any(|e| e.session == session) {
            return;
        }

        // Early exit: board full and the candidate does not beat the
        // lowest entry.
        if self.entries.len() >= self.capacity {
            if let Some(last) = self.entries.last() {
                if profit_bps <= last.profit_bps {
                    return;
                }
            }
        }

        // Entries are sorted descending by profit rate; reversing the
        // comparison makes binary search yield the descending
        // insertion point.
        let insert_pos = self
            .entries
            .binary_search_by(|e| profit_bps.cmp(&e.profit_bps))
            .unwrap_or_else(|pos| pos);

        self.entries.insert(
            insert_pos,
            LeaderboardEntry {
                player,
                name,
                session,
                profit_bps,
                rank: 0,
            },
        );

        self.entries.truncate(self.capacity);
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.rank = (i + 1) as u32;
        }
    }

    /// First `n` entries, for podium views.
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(n)]
    }
}
