//! In-memory registry of players, sessions, round records, and
//! leaderboards.
//!
//! This is the whole persistence layer: plain maps behind the
//! server's lock, with u64 sequence ids. Boards are folded in at
//! close time so ranking reads are just slices.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::resolve::{close_session, Resolution};
use ventura_types::{
    ClosedSummary, CloseReason, Leaderboard, LeaderboardEntry, Pitch, Player, PlayerId,
    PlayerToken, RoundId, RoundRecord, Session, SessionId, Verdict, DAILY_BOARD_SIZE,
    HALL_OF_FAME_SIZE, MAX_NAME_LENGTH,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("display name is empty or too long")]
    InvalidName,
    #[error("display name is already taken")]
    NameTaken,
    #[error("player not found")]
    PlayerNotFound,
    #[error("session not found")]
    SessionNotFound,
    #[error("session is already finished")]
    SessionFinished,
}

#[derive(Debug)]
pub struct GameStore {
    players: HashMap<PlayerId, Player>,
    tokens: HashMap<PlayerToken, PlayerId>,
    /// Lowercased name -> owner, for case-insensitive uniqueness.
    names: HashMap<String, PlayerId>,
    sessions: HashMap<SessionId, Session>,
    /// At most one unfinished session per player.
    active: HashMap<PlayerId, SessionId>,
    /// Finished sessions per player, in close order.
    finished: HashMap<PlayerId, Vec<SessionId>>,
    rounds: HashMap<RoundId, RoundRecord>,
    hall_of_fame: Leaderboard,
    /// Day bucket -> board.
    daily: HashMap<u64, Leaderboard>,
    next_player: PlayerId,
    next_session: SessionId,
    next_round: RoundId,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            tokens: HashMap::new(),
            names: HashMap::new(),
            sessions: HashMap::new(),
            active: HashMap::new(),
            finished: HashMap::new(),
            rounds: HashMap::new(),
            hall_of_fame: Leaderboard::new(HALL_OF_FAME_SIZE),
            daily: HashMap::new(),
            next_player: 1,
            next_session: 1,
            next_round: 1,
        }
    }

    /// Register a display name and mint a token for it.
    pub fn register(&mut self, name: &str, now: u64) -> Result<(Player, PlayerToken), StoreError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
            return Err(StoreError::InvalidName);
        }
        let key = name.to_lowercase();
        if self.names.contains_key(&key) {
            return Err(StoreError::NameTaken);
        }

        let id = self.next_player;
        self.next_player += 1;
        let player = Player::new(id, name.to_string(), now);
        let token = PlayerToken::random();

        self.names.insert(key, id);
        self.tokens.insert(token, id);
        self.players.insert(id, player.clone());
        debug!(player = id, name, "player registered");
        Ok((player, token))
    }

    pub fn authenticate(&self, token: PlayerToken) -> Option<PlayerId> {
        self.tokens.get(&token).copied()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Resume the player's unfinished session, or create a new one.
    /// The boolean is true when a session was created.
    pub fn start_session(
        &mut self,
        player: PlayerId,
        now: u64,
    ) -> Result<(Session, bool), StoreError> {
        if !self.players.contains_key(&player) {
            return Err(StoreError::PlayerNotFound);
        }
        if let Some(id) = self.active.get(&player) {
            if let Some(session) = self.sessions.get(id) {
                return Ok((session.clone(), false));
            }
        }

        let id = self.next_session;
        self.next_session += 1;
        let session = Session::new(id, player, now);
        self.sessions.insert(id, session.clone());
        self.active.insert(player, id);
        debug!(session = id, player, "session started");
        Ok((session, true))
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Attach the latest offer to the session, replacing any pitch
    /// the player skipped.
    pub fn set_pitch(&mut self, id: SessionId, pitch: Pitch) -> Result<(), StoreError> {
        let session = self.sessions.get_mut(&id).ok_or(StoreError::SessionNotFound)?;
        if session.is_finished {
            return Err(StoreError::SessionFinished);
        }
        session.pending_pitch = Some(pitch);
        Ok(())
    }

    /// Discard the pending pitch without spending a chance.
    pub fn clear_pitch(&mut self, id: SessionId) -> Result<(), StoreError> {
        let session = self.sessions.get_mut(&id).ok_or(StoreError::SessionNotFound)?;
        if session.is_finished {
            return Err(StoreError::SessionFinished);
        }
        session.pending_pitch = None;
        Ok(())
    }

    /// Close a session outside the invest path (capital fell below
    /// the wager floor at offer time).
    pub fn close_now(
        &mut self,
        id: SessionId,
        reason: CloseReason,
    ) -> Result<ClosedSummary, StoreError> {
        let session = self.sessions.get_mut(&id).ok_or(StoreError::SessionNotFound)?;
        if !session.is_finished {
            close_session(session, reason);
            self.apply_close(id);
        }
        self.sessions
            .get(&id)
            .and_then(|s| s.closed_summary())
            .ok_or(StoreError::SessionNotFound)
    }

    /// Persist a resolved round and, if the resolution closed the
    /// session, fold the close into stats and boards.
    pub fn commit_round(
        &mut self,
        session_id: SessionId,
        pitch: Pitch,
        amount: u64,
        resolution: &Resolution,
        verdict: Verdict,
        now: u64,
    ) -> Result<RoundRecord, StoreError> {
        let session = self.sessions.get(&session_id).ok_or(StoreError::SessionNotFound)?;
        let player = session.player;

        let id = self.next_round;
        self.next_round += 1;
        let record = RoundRecord {
            id,
            session: session_id,
            player,
            character: pitch.character,
            idea_title: pitch.title,
            idea_description: pitch.description,
            amount,
            won: resolution.won,
            return_pct: resolution.return_pct,
            verdict,
            created_at: now,
        };
        self.rounds.insert(id, record.clone());
        debug!(
            round = id,
            session = session_id,
            won = resolution.won,
            return_pct = resolution.return_pct,
            "round committed"
        );

        if resolution.closed.is_some() {
            self.apply_close(session_id);
        }
        Ok(record)
    }

    pub fn round(&self, id: RoundId) -> Option<&RoundRecord> {
        self.rounds.get(&id)
    }

    /// The player's most recent finished sessions, newest first.
    pub fn recent_finished(&self, player: PlayerId, limit: usize) -> Vec<Session> {
        let Some(ids) = self.finished.get(&player) else {
            return Vec::new();
        };
        ids.iter()
            .rev()
            .take(limit)
            .filter_map(|id| self.sessions.get(id).cloned())
            .collect()
    }

    pub fn hall_of_fame(&self) -> &[LeaderboardEntry] {
        &self.hall_of_fame.entries
    }

    pub fn daily_board(&self, day: u64) -> &[LeaderboardEntry] {
        self.daily.get(&day).map(|b| b.entries.as_slice()).unwrap_or(&[])
    }

    /// Stats and board bookkeeping for a session that just finished.
    fn apply_close(&mut self, session_id: SessionId) {
        let (player_id, day, profit_bps) = match self.sessions.get(&session_id) {
            Some(s) => (
                s.player,
                s.day(),
                s.final_profit_bps.unwrap_or_else(|| s.profit_bps()),
            ),
            None => return,
        };

        // A session closes exactly once.
        let closed = self.finished.entry(player_id).or_default();
        if closed.contains(&session_id) {
            return;
        }
        closed.push(session_id);

        if self.active.get(&player_id) == Some(&session_id) {
            self.active.remove(&player_id);
        }

        let name = match self.players.get_mut(&player_id) {
            Some(player) => {
                player.stats.record_close(profit_bps);
                player.name.clone()
            }
            None => return,
        };

        self.hall_of_fame
            .update(player_id, name.clone(), session_id, profit_bps);
        self.daily
            .entry(day)
            .or_insert_with(|| Leaderboard::new(DAILY_BOARD_SIZE))
            .update(player_id, name, session_id, profit_bps);
        debug!(session = session_id, player = player_id, profit_bps, "session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::settle;
    use ventura_types::{CharacterKind, INITIAL_CAPITAL, RECENT_GAMES, SECONDS_PER_DAY};

    fn pitch() -> Pitch {
        Pitch {
            character: CharacterKind::Veteran,
            title: "Franchise laundromat".to_string(),
            description: "Coin machines, but clean.".to_string(),
        }
    }

    fn verdict() -> Verdict {
        Verdict {
            summary: "It worked.".to_string(),
            reaction: "Told you.".to_string(),
        }
    }

    #[test]
    fn test_register_and_authenticate() {
        let mut store = GameStore::new();
        let (player, token) = store.register("Mira", 0).expect("register");

        assert_eq!(player.id, 1);
        assert_eq!(store.authenticate(token), Some(player.id));
        assert_eq!(store.player(player.id).map(|p| p.name.as_str()), Some("Mira"));
    }

    #[test]
    fn test_register_rejects_bad_names() {
        let mut store = GameStore::new();
        assert_eq!(store.register("", 0), Err(StoreError::InvalidName));
        assert_eq!(store.register("   ", 0), Err(StoreError::InvalidName));
        assert_eq!(
            store.register(&"x".repeat(MAX_NAME_LENGTH + 1), 0),
            Err(StoreError::InvalidName)
        );

        store.register("Mira", 0).expect("register");
        // Uniqueness is case-insensitive.
        assert_eq!(store.register("mira", 0), Err(StoreError::NameTaken));
    }

    #[test]
    fn test_start_session_resumes_active() {
        let mut store = GameStore::new();
        let (player, _) = store.register("Mira", 0).expect("register");

        let (first, created) = store.start_session(player.id, 10).expect("start");
        assert!(created);
        assert_eq!(first.capital, INITIAL_CAPITAL);

        let (second, created) = store.start_session(player.id, 20).expect("start");
        assert!(!created);
        assert_eq!(second.id, first.id);
    }

    #[test]
    fn test_commit_round_closing_updates_everything() {
        let mut store = GameStore::new();
        let (player, _) = store.register("Mira", 0).expect("register");
        let (session, _) = store.start_session(player.id, 100).expect("start");

        store.set_pitch(session.id, pitch()).expect("set pitch");
        let taken = store
            .session_mut(session.id)
            .and_then(|s| s.pending_pitch.take())
            .expect("pitch pending");

        // All-in loss: capital hits zero and the session closes.
        let resolution = {
            let s = store.session_mut(session.id).expect("session");
            settle(s, INITIAL_CAPITAL, false, 0)
        };
        assert!(resolution.closed.is_some());

        let record = store
            .commit_round(session.id, taken, INITIAL_CAPITAL, &resolution, verdict(), 100)
            .expect("commit");
        assert_eq!(record.return_pct, -100);
        assert_eq!(store.round(record.id).map(|r| r.player), Some(player.id));

        // Stats folded in.
        let stats = &store.player(player.id).expect("player").stats;
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.best_profit_bps, Some(-10_000));

        // Boards folded in.
        assert_eq!(store.hall_of_fame().len(), 1);
        assert_eq!(store.daily_board(0).len(), 1);
        assert_eq!(store.daily_board(0)[0].profit_bps, -10_000);

        // A new start gets a fresh session.
        let (next, created) = store.start_session(player.id, 200).expect("start");
        assert!(created);
        assert_ne!(next.id, session.id);

        // Recent list shows the closed run.
        let recent = store.recent_finished(player.id, RECENT_GAMES);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, session.id);
    }

    #[test]
    fn test_close_now_below_floor() {
        let mut store = GameStore::new();
        let (player, _) = store.register("Mira", 0).expect("register");
        let (session, _) = store.start_session(player.id, 0).expect("start");

        store.session_mut(session.id).expect("session").capital = 1_500;
        let summary = store
            .close_now(session.id, CloseReason::BelowMinimumWager)
            .expect("close");

        assert_eq!(summary.reason, CloseReason::BelowMinimumWager);
        // 10_000 -> 1_500 is -85%.
        assert_eq!(summary.final_profit_bps, -8_500);
        assert!(store.session(session.id).expect("session").is_finished);

        // Closing again is a no-op with the same rate.
        let again = store
            .close_now(session.id, CloseReason::BelowMinimumWager)
            .expect("close");
        assert_eq!(again.final_profit_bps, -8_500);
        let stats = &store.player(player.id).expect("player").stats;
        assert_eq!(stats.games_played, 1);
    }

    #[test]
    fn test_daily_boards_are_bucketed() {
        let mut store = GameStore::new();
        let (player, _) = store.register("Mira", 0).expect("register");

        let (first, _) = store.start_session(player.id, 0).expect("start");
        store
            .close_now(first.id, CloseReason::BelowMinimumWager)
            .expect("close");

        let (second, _) = store
            .start_session(player.id, 2 * SECONDS_PER_DAY)
            .expect("start");
        store
            .close_now(second.id, CloseReason::BelowMinimumWager)
            .expect("close");

        assert_eq!(store.daily_board(0).len(), 1);
        assert_eq!(store.daily_board(2).len(), 1);
        assert!(store.daily_board(1).is_empty());
        assert_eq!(store.hall_of_fame().len(), 2);
    }

    #[test]
    fn test_pitch_ops_respect_lifecycle() {
        let mut store = GameStore::new();
        let (player, _) = store.register("Mira", 0).expect("register");
        let (session, _) = store.start_session(player.id, 0).expect("start");

        assert_eq!(store.set_pitch(999, pitch()), Err(StoreError::SessionNotFound));
        store.set_pitch(session.id, pitch()).expect("set pitch");
        store.clear_pitch(session.id).expect("clear pitch");
        assert!(store
            .session(session.id)
            .expect("session")
            .pending_pitch
            .is_none());

        store
            .close_now(session.id, CloseReason::BelowMinimumWager)
            .expect("close");
        assert_eq!(
            store.set_pitch(session.id, pitch()),
            Err(StoreError::SessionFinished)
        );
    }
}
