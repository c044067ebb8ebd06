//! JSON bodies for the ventura HTTP/WebSocket API.

use serde::{Deserialize, Serialize};

use crate::{
    CloseReason, ClosedSummary, LeaderboardEntry, Pitch, PlayerId, PlayerStats, PlayerToken,
    RoundId, RoundRecord, Session, SessionId,
};

/// Header carrying the player token on player-scoped requests.
pub const PLAYER_TOKEN_HEADER: &str = "x-player-token";

/// `POST /player` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

/// `POST /player` response. The token is returned exactly once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub player: PlayerId,
    pub name: String,
    pub token: PlayerToken,
}

/// Session snapshot embedded in most game responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub id: SessionId,
    pub capital: u64,
    pub remaining_chances: u32,
    pub is_finished: bool,
    pub final_profit_bps: Option<i64>,
    pub created_at: u64,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            capital: session.capital,
            remaining_chances: session.remaining_chances,
            is_finished: session.is_finished,
            final_profit_bps: session.final_profit_bps,
            created_at: session.created_at,
        }
    }
}

/// `POST /session` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub session: SessionView,
    /// False when an unfinished session was resumed instead.
    pub created: bool,
}

/// `GET /session/:id/offer` response. Exactly one of `pitch` and
/// `closed` is set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OfferResponse {
    pub session: SessionView,
    pub pitch: Option<Pitch>,
    pub closed: Option<ClosedSummary>,
}

/// `POST /session/:id/invest` request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvestRequest {
    pub amount: u64,
}

/// `POST /session/:id/invest` and `GET /round/:id` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundResponse {
    pub round: RoundRecord,
    pub session: SessionView,
    pub closed: Option<ClosedSummary>,
}

/// `GET /player/me` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerPageResponse {
    pub player: PlayerId,
    pub name: String,
    pub stats: PlayerStats,
    /// Most recent finished sessions, newest first.
    pub recent: Vec<SessionView>,
}

/// `GET /rankings` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankingsResponse {
    /// Top of today's board, shown on the main page.
    pub podium: Vec<LeaderboardEntry>,
    /// Today's full board.
    pub today: Vec<LeaderboardEntry>,
    /// All-time board.
    pub hall_of_fame: Vec<LeaderboardEntry>,
}

/// Error body for every non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Events streamed over `GET /updates`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    RoundResolved {
        player: PlayerId,
        session: SessionId,
        round: RoundId,
        won: bool,
        return_pct: i32,
        capital: u64,
    },
    SessionClosed {
        player: PlayerId,
        session: SessionId,
        reason: CloseReason,
        final_profit_bps: i64,
    },
    /// A close changed the boards; clients refetch `/rankings`.
    BoardsChanged,
}

/// Subscription filter for `GET /updates`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdatesFilter {
    All,
    Player(PlayerId),
}

impl UpdatesFilter {
    pub fn matches(&self, update: &Update) -> bool {
        let subscriber = match self {
            UpdatesFilter::All => return true,
            UpdatesFilter::Player(player) => player,
        };
        match update {
            Update::RoundResolved { player, .. } => player == subscriber,
            Update::SessionClosed { player, .. } => player == subscriber,
            // Board changes are public.
            Update::BoardsChanged => true,
        }
    }
}
