use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::warn;

use crate::{error::ApiError, unix_now, AppState};
use ventura_engine::resolve_investment;
use ventura_narrator::{Idea, Narrator, ScriptedNarrator};
use ventura_types::{
    api::{
        InvestRequest, OfferResponse, PlayerPageResponse, RankingsResponse, RegisterRequest,
        RegisterResponse, RoundResponse, SessionView, StartResponse, Update, PLAYER_TOKEN_HEADER,
    },
    CharacterProfile, CloseReason, Pitch, PlayerId, PlayerToken, RoundId, SessionId, Verdict,
    MIN_WAGER, PODIUM_SIZE, RECENT_GAMES, SECONDS_PER_DAY,
};

fn token_from(headers: &HeaderMap) -> Result<PlayerToken, ApiError> {
    headers
        .get(PLAYER_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingToken)?
        .parse()
        .map_err(|_| ApiError::MissingToken)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<PlayerId, ApiError> {
    let token = token_from(headers)?;
    state
        .store
        .read()
        .await
        .authenticate(token)
        .ok_or(ApiError::UnknownToken)
}

/// Idea for a pitch, falling back to scripted lines when the
/// collaborator fails. A dead text service must not block the game.
async fn pitch_with_fallback(state: &AppState, profile: &CharacterProfile) -> Idea {
    match state.narrator.pitch(profile).await {
        Ok(idea) => idea,
        Err(err) => {
            warn!(error = %err, "narrator pitch failed, using scripted lines");
            state.metrics.narrator_fallbacks.inc();
            ScriptedNarrator.pitch(profile).await.unwrap_or_else(|_| Idea {
                title: "Untitled venture".to_string(),
                description: String::new(),
            })
        }
    }
}

async fn verdict_with_fallback(
    state: &AppState,
    profile: &CharacterProfile,
    idea_title: &str,
    won: bool,
) -> Verdict {
    match state.narrator.verdict(profile, idea_title, won).await {
        Ok(verdict) => verdict,
        Err(err) => {
            warn!(error = %err, "narrator verdict failed, using scripted lines");
            state.metrics.narrator_fallbacks.inc();
            ScriptedNarrator
                .verdict(profile, idea_title, won)
                .await
                .unwrap_or_default()
        }
    }
}

pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (player, token) = state.store.write().await.register(&body.name, unix_now())?;
    state.metrics.players_registered.inc();

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            player: player.id,
            name: player.name,
            token,
        }),
    ))
}

pub(crate) async fn player_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PlayerPageResponse>, ApiError> {
    let player_id = authenticate(&state, &headers).await?;

    let store = state.store.read().await;
    let player = store.player(player_id).ok_or(ApiError::NotFound)?;
    let recent = store
        .recent_finished(player_id, RECENT_GAMES)
        .iter()
        .map(SessionView::from)
        .collect();

    Ok(Json(PlayerPageResponse {
        player: player.id,
        name: player.name.clone(),
        stats: player.stats.clone(),
        recent,
    }))
}

pub(crate) async fn start_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StartResponse>, ApiError> {
    let player_id = authenticate(&state, &headers).await?;

    let (session, created) = state
        .store
        .write()
        .await
        .start_session(player_id, unix_now())?;
    if created {
        state.metrics.sessions_started.inc();
    }

    Ok(Json(StartResponse {
        session: SessionView::from(&session),
        created,
    }))
}

/// The round offer. Every call draws a fresh character and idea, so
/// asking again after a pass (or a refresh) rerolls the pitch; the
/// investment always consumes the latest one shown.
pub(crate) async fn offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    headers: HeaderMap,
) -> Result<Json<OfferResponse>, ApiError> {
    let player_id = authenticate(&state, &headers).await?;

    let mut store = state.store.write().await;
    let (owner, is_finished, capital) = {
        let session = store.session(id).ok_or(ApiError::NotFound)?;
        (session.player, session.is_finished, session.capital)
    };
    if owner != player_id {
        return Err(ApiError::Forbidden);
    }
    if is_finished {
        return Err(ApiError::Store(ventura_engine::StoreError::SessionFinished));
    }

    // Below the wager floor no valid round is possible; close now
    // rather than offer a pitch the player cannot take.
    if capital < MIN_WAGER {
        let summary = store.close_now(id, CloseReason::BelowMinimumWager)?;
        state.metrics.sessions_closed.inc();
        let session = store
            .session(id)
            .map(SessionView::from)
            .ok_or(ApiError::NotFound)?;
        state.broadcast(Update::SessionClosed {
            player: player_id,
            session: id,
            reason: summary.reason,
            final_profit_bps: summary.final_profit_bps,
        });
        state.broadcast(Update::BoardsChanged);
        return Ok(Json(OfferResponse {
            session,
            pitch: None,
            closed: Some(summary),
        }));
    }

    let character = state.rng.lock().await.draw_character();
    let idea = pitch_with_fallback(&state, character.profile()).await;
    let pitch = Pitch {
        character,
        title: idea.title,
        description: idea.description,
    };
    store.set_pitch(id, pitch.clone())?;

    let session = store
        .session(id)
        .map(SessionView::from)
        .ok_or(ApiError::NotFound)?;
    Ok(Json(OfferResponse {
        session,
        pitch: Some(pitch),
        closed: None,
    }))
}

pub(crate) async fn invest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    headers: HeaderMap,
    Json(body): Json<InvestRequest>,
) -> Result<Json<RoundResponse>, ApiError> {
    let player_id = authenticate(&state, &headers).await?;
    let now = unix_now();

    let mut store = state.store.write().await;
    let session = store.session_mut(id).ok_or(ApiError::NotFound)?;
    if session.player != player_id {
        return Err(ApiError::Forbidden);
    }

    let (pitch, resolution) = {
        let mut rng = state.rng.lock().await;
        resolve_investment(session, body.amount, &mut rng)?
    };

    let verdict =
        verdict_with_fallback(&state, pitch.character.profile(), &pitch.title, resolution.won)
            .await;
    let record = store.commit_round(id, pitch, body.amount, &resolution, verdict, now)?;

    state.metrics.rounds_resolved.inc();
    if resolution.won {
        state.metrics.rounds_won.inc();
    }

    let session = store.session(id).ok_or(ApiError::NotFound)?;
    let closed = session.closed_summary().filter(|_| resolution.closed.is_some());
    let view = SessionView::from(session);

    state.broadcast(Update::RoundResolved {
        player: player_id,
        session: id,
        round: record.id,
        won: record.won,
        return_pct: record.return_pct,
        capital: view.capital,
    });
    if let Some(summary) = &closed {
        state.metrics.sessions_closed.inc();
        state.broadcast(Update::SessionClosed {
            player: player_id,
            session: id,
            reason: summary.reason,
            final_profit_bps: summary.final_profit_bps,
        });
        state.broadcast(Update::BoardsChanged);
    }

    Ok(Json(RoundResponse {
        round: record,
        session: view,
        closed,
    }))
}

/// Skip the current pitch without spending a chance. The next offer
/// draws a new character.
pub(crate) async fn pass(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    headers: HeaderMap,
) -> Result<Json<SessionView>, ApiError> {
    let player_id = authenticate(&state, &headers).await?;

    let mut store = state.store.write().await;
    let owner = store
        .session(id)
        .map(|s| s.player)
        .ok_or(ApiError::NotFound)?;
    if owner != player_id {
        return Err(ApiError::Forbidden);
    }
    store.clear_pitch(id)?;

    store
        .session(id)
        .map(|s| Json(SessionView::from(s)))
        .ok_or(ApiError::NotFound)
}

/// The result screen: one immutable round record, visible only to
/// the player who made the wager.
pub(crate) async fn round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RoundId>,
    headers: HeaderMap,
) -> Result<Json<RoundResponse>, ApiError> {
    let player_id = authenticate(&state, &headers).await?;

    let store = state.store.read().await;
    let record = store.round(id).ok_or(ApiError::NotFound)?.clone();
    if record.player != player_id {
        return Err(ApiError::Forbidden);
    }

    let session = store.session(record.session).ok_or(ApiError::NotFound)?;
    Ok(Json(RoundResponse {
        round: record,
        session: SessionView::from(session),
        closed: session.closed_summary(),
    }))
}

pub(crate) async fn rankings(State(state): State<Arc<AppState>>) -> Json<RankingsResponse> {
    let store = state.store.read().await;
    let today = unix_now() / SECONDS_PER_DAY;

    let today_entries = store.daily_board(today).to_vec();
    let podium = today_entries.iter().take(PODIUM_SIZE).cloned().collect();

    Json(RankingsResponse {
        podium,
        today: today_entries,
        hall_of_fame: store.hall_of_fame().to_vec(),
    })
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        state.metrics.encode(),
    )
}
