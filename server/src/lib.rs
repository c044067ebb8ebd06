//! HTTP/WebSocket API for the ventura investment game.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tokio::sync::{broadcast, Mutex, RwLock};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::{Any, CorsLayer};

use ventura_engine::{GameRng, GameStore};
use ventura_narrator::AnyNarrator;
use ventura_types::api::{Update, PLAYER_TOKEN_HEADER};

pub mod config;
mod error;
mod metrics;
mod routes;
mod ws;

pub use config::Config;
pub use error::ApiError;
pub use metrics::Metrics;


/// Requests allowed per second, per client IP.
const RATE_LIMIT_PER_SECOND: u64 = 50;

/// Burst allowance on top of the per-second rate.
const RATE_LIMIT_BURST: u32 = 200;

/// Shared application state.
///
/// The store sits behind one async lock; a round is resolved and
/// committed under it, including the narrator round-trip, so a
/// session can never interleave two invests. Load is one
/// request-response cycle per player action, so serializing them is
/// cheap.
pub struct AppState {
    pub store: RwLock<GameStore>,
    pub narrator: AnyNarrator,
    pub rng: Mutex<GameRng>,
    pub updates: broadcast::Sender<Update>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(narrator: AnyNarrator) -> Self {
        let (updates, _) = broadcast::channel(1024);
        Self {
            store: RwLock::new(GameStore::new()),
            narrator,
            rng: Mutex::new(GameRng::from_entropy()),
            updates,
            metrics: Metrics::new(),
        }
    }

    pub(crate) fn broadcast(&self, update: Update) {
        // Send fails only when nobody is subscribed, which is the
        // common case.
        if self.updates.send(update).is_err() {
            tracing::trace!("no update subscribers");
        }
    }
}

pub struct Api {
    state: Arc<AppState>,
}

impl Api {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                HeaderName::from_static(PLAYER_TOKEN_HEADER),
            ]);

        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(RATE_LIMIT_PER_SECOND)
                .burst_size(RATE_LIMIT_BURST)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .unwrap(),
        );

        Router::new()
            .route("/player", post(routes::register))
            .route("/player/me", get(routes::player_page))
            .route("/session", post(routes::start_session))
            .route("/session/:id/offer", get(routes::offer))
            .route("/session/:id/invest", post(routes::invest))
            .route("/session/:id/pass", post(routes::pass))
            .route("/round/:id", get(routes::round))
            .route("/rankings", get(routes::rankings))
            .route("/updates", get(ws::updates_ws))
            .route("/healthz", get(routes::healthz))
            .route("/metrics", get(routes::metrics))
            .layer(cors)
            .layer(GovernorLayer {
                config: governor_conf,
            })
            .with_state(self.state.clone())
    }
}

/// Seconds since the Unix epoch.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
