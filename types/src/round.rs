use serde::{Deserialize, Serialize};

use crate::{CharacterKind, PlayerId, SessionId};

pub type RoundId = u64;

/// Narrative judgment for a resolved round, produced by the
/// generative-text collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// What happened to the venture.
    pub summary: String,
    /// The pitching character's reaction.
    pub reaction: String,
}

/// Immutable record of one resolved investment. Created once per
/// round and never mutated afterward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub id: RoundId,
    pub session: SessionId,
    pub player: PlayerId,
    pub character: CharacterKind,
    pub idea_title: String,
    pub idea_description: String,
    pub amount: u64,
    pub won: bool,
    /// Drawn return percentage on a win, `LOSS_RETURN_PCT` on a loss.
    pub return_pct: i32,
    pub verdict: Verdict,
    pub created_at: u64,
}
