/// Starting capital for a new session, in funds.
pub const INITIAL_CAPITAL: u64 = 10_000;

/// Decision chances granted to a new session.
pub const INITIAL_CHANCES: u32 = 5;

/// Minimum wager per round. A wager of the full remaining capital
/// (all-in) overrides the floor.
pub const MIN_WAGER: u64 = 2_000;

/// Return percentage recorded for a failed round (the wager is lost
/// in full).
pub const LOSS_RETURN_PCT: i32 = -100;

/// Basis points per unit (100% == 10_000).
pub const BPS: i64 = 10_000;

/// Maximum display-name length at registration.
pub const MAX_NAME_LENGTH: usize = 32;

/// All-time leaderboard size.
pub const HALL_OF_FAME_SIZE: usize = 10;

/// Per-day leaderboard size.
pub const DAILY_BOARD_SIZE: usize = 20;

/// Podium shown on the main page (prefix of today's board).
pub const PODIUM_SIZE: usize = 3;

/// Finished sessions shown on the player page.
pub const RECENT_GAMES: usize = 10;

/// Seconds per leaderboard day bucket.
pub const SECONDS_PER_DAY: u64 = 86_400;
