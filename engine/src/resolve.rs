//! Investment resolution.
//!
//! One round is a single linear decision: validate the wager, flip
//! the character's weighted coin, apply the bounded payout or the
//! total loss, spend a chance, and close the session if either
//! threshold is hit.

use thiserror::Error;

use crate::GameRng;
use ventura_types::{CloseReason, Pitch, Session, LOSS_RETURN_PCT, MIN_WAGER};

/// What one resolved wager did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub won: bool,
    /// Drawn percentage on a win, `LOSS_RETURN_PCT` on a loss.
    pub return_pct: i32,
    /// Signed capital change.
    pub delta: i64,
    pub capital_after: u64,
    pub closed: Option<CloseReason>,
}

/// Rejected wagers. The pending pitch is left untouched so the player
/// can retry with a valid amount.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvestError {
    #[error("session is already finished")]
    SessionFinished,
    #[error("no pitch is pending for this session")]
    NoPendingPitch,
    #[error("wager must be at least {min}, or the full capital of {capital} to go all-in")]
    BelowMinimum { min: u64, capital: u64 },
    #[error("wager {amount} exceeds capital {capital}")]
    ExceedsCapital { amount: u64, capital: u64 },
}

/// Resolve a wager against the session's pending pitch.
///
/// Returns the consumed pitch alongside the resolution; the caller
/// persists both as the round record.
pub fn resolve_investment(
    session: &mut Session,
    amount: u64,
    rng: &mut GameRng,
) -> Result<(Pitch, Resolution), InvestError> {
    if session.is_finished {
        return Err(InvestError::SessionFinished);
    }
    let Some(pitch) = session.pending_pitch.clone() else {
        return Err(InvestError::NoPendingPitch);
    };
    if amount < MIN_WAGER && amount != session.capital {
        return Err(InvestError::BelowMinimum {
            min: MIN_WAGER,
            capital: session.capital,
        });
    }
    if amount > session.capital {
        return Err(InvestError::ExceedsCapital {
            amount,
            capital: session.capital,
        });
    }

    let profile = pitch.character.profile();
    let won = rng.success(profile.success_bps);
    let return_pct = if won {
        rng.return_pct(profile.min_return_pct, profile.max_return_pct)
    } else {
        0
    };

    let resolution = settle(session, amount, won, return_pct);
    Ok((pitch, resolution))
}

/// Apply a decided outcome to the session.
///
/// Split out of [`resolve_investment`] so the arithmetic can be
/// exercised without an RNG. `return_pct` is ignored on a loss. The
/// wager must already be validated against the session's capital.
pub fn settle(session: &mut Session, amount: u64, won: bool, return_pct: u32) -> Resolution {
    let (return_pct, delta) = if won {
        let profit = amount.saturating_mul(return_pct as u64) / 100;
        session.capital = session.capital.saturating_add(profit);
        (return_pct as i32, profit as i64)
    } else {
        // The wager never exceeds capital, so this cannot underflow.
        session.capital = session.capital.saturating_sub(amount);
        (LOSS_RETURN_PCT, -(amount as i64))
    };

    session.remaining_chances = session.remaining_chances.saturating_sub(1);
    session.pending_pitch = None;

    let closed = if session.remaining_chances == 0 {
        Some(CloseReason::ChancesExhausted)
    } else if session.capital == 0 {
        Some(CloseReason::CapitalExhausted)
    } else {
        None
    };
    if let Some(reason) = closed {
        close_session(session, reason);
    }

    Resolution {
        won,
        return_pct,
        delta,
        capital_after: session.capital,
        closed,
    }
}

/// Mark a session finished and fix its final profit rate. Idempotent;
/// a finished session is never reopened.
pub fn close_session(session: &mut Session, reason: CloseReason) {
    if session.is_finished {
        return;
    }
    session.is_finished = true;
    session.pending_pitch = None;
    session.close_reason = Some(reason);
    session.final_profit_bps = Some(session.profit_bps());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ventura_types::{CharacterKind, INITIAL_CAPITAL, INITIAL_CHANCES};

    fn test_pitch(character: CharacterKind) -> Pitch {
        Pitch {
            character,
            title: "Self-stirring ramen pot".to_string(),
            description: "A pot that stirs itself. The lids are the hard part.".to_string(),
        }
    }

    fn open_session() -> Session {
        let mut session = Session::new(1, 7, 0);
        session.pending_pitch = Some(test_pitch(CharacterKind::Rookie));
        session
    }

    #[test]
    fn test_settle_win_math() {
        let mut session = open_session();
        let resolution = settle(&mut session, 2_000, true, 25);

        assert!(resolution.won);
        assert_eq!(resolution.return_pct, 25);
        assert_eq!(resolution.delta, 500);
        assert_eq!(session.capital, INITIAL_CAPITAL + 500);
        assert_eq!(session.remaining_chances, INITIAL_CHANCES - 1);
        assert_eq!(resolution.closed, None);
        assert!(session.pending_pitch.is_none());
        assert!(!session.is_finished);
    }

    #[test]
    fn test_settle_loss_math() {
        let mut session = open_session();
        let resolution = settle(&mut session, 3_000, false, 99);

        assert!(!resolution.won);
        assert_eq!(resolution.return_pct, LOSS_RETURN_PCT);
        assert_eq!(resolution.delta, -3_000);
        assert_eq!(session.capital, INITIAL_CAPITAL - 3_000);
        assert_eq!(resolution.closed, None);
    }

    #[test]
    fn test_settle_bust_closes_session() {
        let mut session = open_session();
        let resolution = settle(&mut session, INITIAL_CAPITAL, false, 0);

        assert_eq!(session.capital, 0);
        assert_eq!(resolution.closed, Some(CloseReason::CapitalExhausted));
        assert!(session.is_finished);
        // Total loss of the starting stake is -100%.
        assert_eq!(session.final_profit_bps, Some(-10_000));
    }

    #[test]
    fn test_settle_last_chance_closes_session() {
        let mut session = open_session();
        session.remaining_chances = 1;
        let resolution = settle(&mut session, 2_000, true, 50);

        assert_eq!(resolution.closed, Some(CloseReason::ChancesExhausted));
        assert!(session.is_finished);
        // 10_000 -> 11_000 is +10%.
        assert_eq!(session.final_profit_bps, Some(1_000));
    }

    #[test]
    fn test_settle_bust_on_last_chance_reports_chances() {
        let mut session = open_session();
        session.remaining_chances = 1;
        let resolution = settle(&mut session, INITIAL_CAPITAL, false, 0);

        // Both thresholds hit at once; chances take precedence.
        assert_eq!(resolution.closed, Some(CloseReason::ChancesExhausted));
        assert_eq!(session.final_profit_bps, Some(-10_000));
    }

    #[test]
    fn test_resolve_rejects_finished_session() {
        let mut session = open_session();
        session.is_finished = true;
        let mut rng = GameRng::seeded(1);

        let result = resolve_investment(&mut session, 2_000, &mut rng);
        assert_eq!(result, Err(InvestError::SessionFinished));
    }

    #[test]
    fn test_resolve_requires_pending_pitch() {
        let mut session = open_session();
        session.pending_pitch = None;
        let mut rng = GameRng::seeded(1);

        let result = resolve_investment(&mut session, 2_000, &mut rng);
        assert_eq!(result, Err(InvestError::NoPendingPitch));
    }

    #[test]
    fn test_resolve_rejects_below_minimum() {
        let mut session = open_session();
        let mut rng = GameRng::seeded(1);

        let result = resolve_investment(&mut session, 1_999, &mut rng);
        assert_eq!(
            result,
            Err(InvestError::BelowMinimum {
                min: MIN_WAGER,
                capital: INITIAL_CAPITAL,
            })
        );
        // A rejected wager leaves the offer intact.
        assert!(session.pending_pitch.is_some());
        assert_eq!(session.remaining_chances, INITIAL_CHANCES);
    }

    #[test]
    fn test_resolve_all_in_overrides_minimum() {
        let mut session = open_session();
        session.capital = 1_500;
        let mut rng = GameRng::seeded(1);

        // 1_500 is below the floor but equals capital, so it is an
        // all-in and must be accepted.
        let result = resolve_investment(&mut session, 1_500, &mut rng);
        assert!(result.is_ok());
    }

    #[test]
    fn test_resolve_rejects_zero_wager() {
        let mut session = open_session();
        let mut rng = GameRng::seeded(1);

        let result = resolve_investment(&mut session, 0, &mut rng);
        assert!(matches!(result, Err(InvestError::BelowMinimum { .. })));
    }

    #[test]
    fn test_resolve_rejects_over_capital() {
        let mut session = open_session();
        let mut rng = GameRng::seeded(1);

        let result = resolve_investment(&mut session, INITIAL_CAPITAL + 1, &mut rng);
        assert_eq!(
            result,
            Err(InvestError::ExceedsCapital {
                amount: INITIAL_CAPITAL + 1,
                capital: INITIAL_CAPITAL,
            })
        );
    }

    #[test]
    fn test_resolve_post_capital_matches_outcome() {
        // Whatever the draw, the post-resolution capital is an exact
        // function of the wager and the drawn percentage.
        for seed in 0..50 {
            let mut session = open_session();
            let mut rng = GameRng::seeded(seed);
            let amount = 2_000;

            let (pitch, resolution) =
                resolve_investment(&mut session, amount, &mut rng).expect("valid wager");
            let profile = pitch.character.profile();

            if resolution.won {
                let pct = resolution.return_pct as u32;
                assert!(pct >= profile.min_return_pct && pct <= profile.max_return_pct);
                assert_eq!(session.capital, INITIAL_CAPITAL + amount * pct as u64 / 100);
            } else {
                assert_eq!(resolution.return_pct, LOSS_RETURN_PCT);
                assert_eq!(session.capital, INITIAL_CAPITAL - amount);
            }
            assert_eq!(resolution.capital_after, session.capital);
        }
    }

    #[test]
    fn test_capital_never_negative_over_full_sessions() {
        for seed in 0..20 {
            let mut session = open_session();
            let mut rng = GameRng::seeded(seed);

            while !session.is_finished {
                session.pending_pitch = Some(test_pitch(rng.draw_character()));
                // Go all-in when the floor is out of reach.
                let amount = if session.capital < MIN_WAGER {
                    session.capital
                } else {
                    MIN_WAGER
                };
                resolve_investment(&mut session, amount, &mut rng).expect("valid wager");
            }

            assert!(session.remaining_chances == 0 || session.capital == 0);
            assert!(session.final_profit_bps.is_some());
        }
    }

    #[test]
    fn test_close_session_idempotent() {
        let mut session = open_session();
        session.capital = 12_000;
        close_session(&mut session, CloseReason::BelowMinimumWager);
        assert_eq!(session.final_profit_bps, Some(2_000));
        assert_eq!(session.close_reason, Some(CloseReason::BelowMinimumWager));

        session.capital = 99_000;
        close_session(&mut session, CloseReason::CapitalExhausted);
        // Neither the recorded rate nor the reason move after close.
        assert_eq!(session.final_profit_bps, Some(2_000));
        assert_eq!(session.close_reason, Some(CloseReason::BelowMinimumWager));
    }
}
