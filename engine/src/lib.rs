//! Game rules for the ventura investment game.
//!
//! This crate contains everything that decides a round: the seedable
//! RNG, the weighted character draw, the investment-resolution
//! function, the session close path, and the in-memory store that
//! holds players, sessions, round records, and boards.

mod resolve;
mod rng;
mod store;

pub use resolve::{close_session, resolve_investment, settle, InvestError, Resolution};
pub use rng::GameRng;
pub use store::{GameStore, StoreError};
