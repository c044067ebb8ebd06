use super::*;
use crate::api::{Update, UpdatesFilter};

#[test]
fn test_roster_weights_sum_to_100() {
    assert_eq!(roster_total_weight(), 100);
}

#[test]
fn test_profile_lookup_matches_kind() {
    for kind in CharacterKind::ALL {
        assert_eq!(kind.profile().kind, kind);
    }
}

#[test]
fn test_profile_return_bounds_ordered() {
    for kind in CharacterKind::ALL {
        let profile = kind.profile();
        assert!(profile.min_return_pct <= profile.max_return_pct);
        assert!(profile.success_bps <= BPS as u32);
        assert!(profile.weight > 0);
    }
}

#[test]
fn test_session_profit_bps() {
    let mut session = Session::new(1, 7, 0);
    assert_eq!(session.profit_bps(), 0);

    // 10_000 -> 15_000 is +50%.
    session.capital = 15_000;
    assert_eq!(session.profit_bps(), 5_000);

    // 10_000 -> 2_500 is -75%.
    session.capital = 2_500;
    assert_eq!(session.profit_bps(), -7_500);

    session.capital = 0;
    assert_eq!(session.profit_bps(), -BPS);
}

#[test]
fn test_session_day_bucket() {
    let session = Session::new(1, 7, 3 * SECONDS_PER_DAY + 123);
    assert_eq!(session.day(), 3);
}

#[test]
fn test_stats_record_close() {
    let mut stats = PlayerStats::default();
    assert_eq!(stats.best_profit_bps, None);

    // A losing run still sets the first best.
    stats.record_close(-10_000);
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.best_profit_bps, Some(-10_000));

    stats.record_close(2_500);
    assert_eq!(stats.best_profit_bps, Some(2_500));

    // A worse run never lowers the best.
    stats.record_close(1_000);
    assert_eq!(stats.games_played, 3);
    assert_eq!(stats.best_profit_bps, Some(2_500));
}

#[test]
fn test_leaderboard_update() {
    let mut board = Leaderboard::new(10);

    for i in 0..15u64 {
        board.update(i, format!("Player{}", i), i + 1, (i as i64 + 1) * 1_000);
    }

    // Should only keep top 10
    assert_eq!(board.entries.len(), 10);

    // Should be sorted by profit rate descending
    for i in 0..9 {
        assert!(board.entries[i].profit_bps >= board.entries[i + 1].profit_bps);
    }

    // Ranks should be 1-10
    for (i, entry) in board.entries.iter().enumerate() {
        assert_eq!(entry.rank, (i + 1) as u32);
    }
}

#[test]
fn test_leaderboard_ignores_duplicate_session() {
    let mut board = Leaderboard::new(10);
    board.update(1, "A".to_string(), 42, 500);
    board.update(1, "A".to_string(), 42, 9_000);

    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].profit_bps, 500);
}

#[test]
fn test_leaderboard_allows_multiple_sessions_per_player() {
    let mut board = Leaderboard::new(10);
    board.update(1, "A".to_string(), 10, 500);
    board.update(1, "A".to_string(), 11, 700);

    assert_eq!(board.entries.len(), 2);
    assert_eq!(board.entries[0].session, 11);
}

#[test]
fn test_leaderboard_podium() {
    let mut board = Leaderboard::new(20);
    for i in 0..5u64 {
        board.update(i, format!("P{}", i), i, i as i64 * 100);
    }
    assert_eq!(board.top(3).len(), 3);
    assert_eq!(board.top(3)[0].profit_bps, 400);

    let empty = Leaderboard::new(20);
    assert!(empty.top(3).is_empty());
}

#[test]
fn test_updates_filter() {
    let resolved = Update::RoundResolved {
        player: 1,
        session: 2,
        round: 3,
        won: true,
        return_pct: 25,
        capital: 12_500,
    };
    let closed = Update::SessionClosed {
        player: 1,
        session: 2,
        reason: CloseReason::ChancesExhausted,
        final_profit_bps: 2_500,
    };

    assert!(UpdatesFilter::All.matches(&resolved));
    assert!(UpdatesFilter::Player(1).matches(&resolved));
    assert!(!UpdatesFilter::Player(2).matches(&resolved));
    assert!(!UpdatesFilter::Player(2).matches(&closed));

    // Board changes are visible to every subscriber.
    assert!(UpdatesFilter::Player(2).matches(&Update::BoardsChanged));
}

#[test]
fn test_update_serialization_tag() {
    let update = Update::BoardsChanged;
    let json = serde_json::to_string(&update).expect("serialize update");
    assert_eq!(json, r#"{"type":"boards_changed"}"#);
}
