//! The generative-text boundary.
//!
//! Everything flavorful in ventura (the idea a character pitches and
//! the narrative verdict after a round) comes from an external
//! text-generation collaborator. This crate is the thin client for
//! that boundary: a [`Narrator`] trait, an HTTP implementation with
//! retries, and a scripted implementation for tests and offline
//! fallback.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ventura_types::{CharacterProfile, Verdict};

mod http;
mod scripted;

pub use http::{HttpNarrator, RetryPolicy};
pub use scripted::ScriptedNarrator;

/// An idea pitched by a character, as produced by the collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub title: String,
    pub description: String,
}

/// Error type for narrator operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("collaborator returned {0}")]
    Failed(reqwest::StatusCode),
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for narrator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Produces the short narrative strings the game shows: an idea for a
/// character's pitch and a verdict once the round is resolved.
pub trait Narrator {
    fn pitch(&self, character: &CharacterProfile) -> impl Future<Output = Result<Idea>> + Send;

    fn verdict(
        &self,
        character: &CharacterProfile,
        idea_title: &str,
        won: bool,
    ) -> impl Future<Output = Result<Verdict>> + Send;
}

/// Narrator selected at startup: the HTTP collaborator when one is
/// configured, scripted lines otherwise.
#[derive(Clone, Debug)]
pub enum AnyNarrator {
    Http(HttpNarrator),
    Scripted(ScriptedNarrator),
}

impl Narrator for AnyNarrator {
    async fn pitch(&self, character: &CharacterProfile) -> Result<Idea> {
        match self {
            AnyNarrator::Http(narrator) => narrator.pitch(character).await,
            AnyNarrator::Scripted(narrator) => narrator.pitch(character).await,
        }
    }

    async fn verdict(
        &self,
        character: &CharacterProfile,
        idea_title: &str,
        won: bool,
    ) -> Result<Verdict> {
        match self {
            AnyNarrator::Http(narrator) => narrator.verdict(character, idea_title, won).await,
            AnyNarrator::Scripted(narrator) => narrator.verdict(character, idea_title, won).await,
        }
    }
}
