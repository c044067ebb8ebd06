use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public identifier of a registered player. Safe to show on boards.
pub type PlayerId = u64;

/// Bearer token issued at registration. Identification only, not an
/// account system; it is never included in public payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerToken(Uuid);

impl PlayerToken {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlayerToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stats: PlayerStats,
    pub created_at: u64,
}

impl Player {
    pub fn new(id: PlayerId, name: String, created_at: u64) -> Self {
        Self {
            id,
            name,
            stats: PlayerStats::default(),
            created_at,
        }
    }
}

/// Per-player aggregates, mutated only when a session closes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u64,
    /// Best final profit rate across all closed sessions, in basis
    /// points. `None` until the first session closes.
    pub best_profit_bps: Option<i64>,
}

impl PlayerStats {
    /// Fold one closed session into the aggregates.
    pub fn record_close(&mut self, profit_bps: i64) {
        self.games_played += 1;
        match self.best_profit_bps {
            Some(best) if best >= profit_bps => {}
            _ => self.best_profit_bps = Some(profit_bps),
        }
    }
}
