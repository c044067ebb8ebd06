use serde::{Deserialize, Serialize};

/// Pitch archetypes matching the frontend character set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterKind {
    Rookie = 0,
    Hipster = 1,
    Veteran = 2,
    Evangelist = 3,
    Recluse = 4,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 5] = [
        CharacterKind::Rookie,
        CharacterKind::Hipster,
        CharacterKind::Veteran,
        CharacterKind::Evangelist,
        CharacterKind::Recluse,
    ];

    /// Static tuning and flavor for this archetype.
    pub fn profile(self) -> &'static CharacterProfile {
        &ROSTER[self as usize]
    }

    /// Stable key used by the frontend for asset lookup.
    pub fn key(self) -> &'static str {
        match self {
            CharacterKind::Rookie => "rookie",
            CharacterKind::Hipster => "hipster",
            CharacterKind::Veteran => "veteran",
            CharacterKind::Evangelist => "evangelist",
            CharacterKind::Recluse => "recluse",
        }
    }
}

/// Static tuning for one archetype.
///
/// `weight` drives the random draw (weights across the roster sum to
/// 100). `success_bps` is the probability that an investment pitched
/// by this character succeeds, in basis points. On success the return
/// percentage is drawn uniformly from
/// `[min_return_pct, max_return_pct]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterProfile {
    pub kind: CharacterKind,
    pub name: &'static str,
    pub persona: &'static str,
    pub weight: u32,
    pub success_bps: u32,
    pub min_return_pct: u32,
    pub max_return_pct: u32,
}

/// The five pitch characters. Ordering matches `CharacterKind`
/// discriminants; `CharacterKind::profile` indexes into this table.
pub static ROSTER: [CharacterProfile; 5] = [
    CharacterProfile {
        kind: CharacterKind::Rookie,
        name: "Jun the Rookie",
        persona: "a wide-eyed first-time founder who pitches whatever went viral last week",
        weight: 30,
        success_bps: 5_000,
        min_return_pct: 10,
        max_return_pct: 50,
    },
    CharacterProfile {
        kind: CharacterKind::Hipster,
        name: "Soo from the Studio",
        persona: "a trend-chasing creative director with a loft office and no revenue model",
        weight: 25,
        success_bps: 5_500,
        min_return_pct: 20,
        max_return_pct: 80,
    },
    CharacterProfile {
        kind: CharacterKind::Veteran,
        name: "Director Han",
        persona: "a seasoned operator who only pitches businesses she has run before",
        weight: 20,
        success_bps: 7_500,
        min_return_pct: 5,
        max_return_pct: 30,
    },
    CharacterProfile {
        kind: CharacterKind::Evangelist,
        name: "G.P. Tae",
        persona: "an AI evangelist convinced every industry is one model away from disruption",
        weight: 15,
        success_bps: 3_500,
        min_return_pct: 80,
        max_return_pct: 300,
    },
    CharacterProfile {
        kind: CharacterKind::Recluse,
        name: "Quiet Min",
        persona: "a timid tinkerer who undersells ideas that almost always work",
        weight: 10,
        success_bps: 8_500,
        min_return_pct: 5,
        max_return_pct: 15,
    },
];

/// Sum of roster weights, the denominator of the character draw.
pub fn roster_total_weight() -> u32 {
    ROSTER.iter().map(|p| p.weight).sum()
}
