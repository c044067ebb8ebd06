use serde::{Deserialize, Serialize};

use crate::{CharacterKind, PlayerId, BPS, INITIAL_CAPITAL, INITIAL_CHANCES, SECONDS_PER_DAY};

pub type SessionId = u64;

/// One round's offer: a character pitching a generated idea. The
/// latest offer is held on the session until it is consumed by an
/// investment or replaced by the next offer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitch {
    pub character: CharacterKind,
    pub title: String,
    pub description: String,
}

/// Why a session closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// All decision chances were spent.
    ChancesExhausted,
    /// Capital hit zero.
    CapitalExhausted,
    /// Capital fell below the minimum wager before a new offer could
    /// be made.
    BelowMinimumWager,
}

/// Terminal summary reported when an operation closes the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedSummary {
    pub reason: CloseReason,
    pub final_profit_bps: i64,
}

/// A single playthrough: fixed starting capital, fixed number of
/// decision chances. Once `is_finished` is set the session is never
/// mutated again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub player: PlayerId,
    pub capital: u64,
    pub remaining_chances: u32,
    pub pending_pitch: Option<Pitch>,
    pub is_finished: bool,
    pub close_reason: Option<CloseReason>,
    /// Set exactly once, at close: `(capital - initial) / initial` in
    /// basis points.
    pub final_profit_bps: Option<i64>,
    pub created_at: u64,
}

impl Session {
    pub fn new(id: SessionId, player: PlayerId, created_at: u64) -> Self {
        Self {
            id,
            player,
            capital: INITIAL_CAPITAL,
            remaining_chances: INITIAL_CHANCES,
            pending_pitch: None,
            is_finished: false,
            close_reason: None,
            final_profit_bps: None,
            created_at,
        }
    }

    /// Terminal summary, once the session has closed.
    pub fn closed_summary(&self) -> Option<ClosedSummary> {
        match (self.close_reason, self.final_profit_bps) {
            (Some(reason), Some(final_profit_bps)) => Some(ClosedSummary {
                reason,
                final_profit_bps,
            }),
            _ => None,
        }
    }

    /// Net profit rate relative to the starting stake, in basis
    /// points.
    pub fn profit_bps(&self) -> i64 {
        (self.capital as i64 - INITIAL_CAPITAL as i64) * BPS / INITIAL_CAPITAL as i64
    }

    /// Leaderboard day bucket this session belongs to.
    pub fn day(&self) -> u64 {
        self.created_at / SECONDS_PER_DAY
    }
}
