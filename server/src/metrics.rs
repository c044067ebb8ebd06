use prometheus_client::{encoding::text::encode, metrics::counter::Counter, registry::Registry};

/// Counters exposed at `/metrics`.
pub struct Metrics {
    registry: Registry,
    pub players_registered: Counter,
    pub sessions_started: Counter,
    pub rounds_resolved: Counter,
    pub rounds_won: Counter,
    pub sessions_closed: Counter,
    pub narrator_fallbacks: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let players_registered = Counter::default();
        registry.register(
            "players_registered",
            "Players registered",
            players_registered.clone(),
        );

        let sessions_started = Counter::default();
        registry.register(
            "sessions_started",
            "Game sessions created",
            sessions_started.clone(),
        );

        let rounds_resolved = Counter::default();
        registry.register(
            "rounds_resolved",
            "Investment rounds resolved",
            rounds_resolved.clone(),
        );

        let rounds_won = Counter::default();
        registry.register("rounds_won", "Investment rounds won", rounds_won.clone());

        let sessions_closed = Counter::default();
        registry.register(
            "sessions_closed",
            "Game sessions closed",
            sessions_closed.clone(),
        );

        let narrator_fallbacks = Counter::default();
        registry.register(
            "narrator_fallbacks",
            "Collaborator failures covered by scripted lines",
            narrator_fallbacks.clone(),
        );

        Self {
            registry,
            players_registered,
            sessions_started,
            rounds_resolved,
            rounds_won,
            sessions_closed,
            narrator_fallbacks,
        }
    }

    /// Prometheus text exposition of all counters.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        // Encoding a static registry into a String cannot fail.
        let _ = encode(&mut buffer, &self.registry);
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
