use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::AppState;
use ventura_types::{api::UpdatesFilter, PlayerId};

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatesQuery {
    /// Restrict the stream to one player's events; board changes are
    /// always included.
    player: Option<PlayerId>,
}

pub(crate) async fn updates_ws(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UpdatesQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let filter = match query.player {
        Some(player) => UpdatesFilter::Player(player),
        None => UpdatesFilter::All,
    };
    ws.on_upgrade(move |socket| handle_updates_ws(socket, state, filter))
}

async fn handle_updates_ws(socket: WebSocket, state: Arc<AppState>, filter: UpdatesFilter) {
    info!(?filter, "updates WebSocket connected");
    let (mut sender, mut receiver) = socket.split();
    let mut updates = state.updates.subscribe();

    loop {
        tokio::select! {
            // Handle incoming WebSocket messages (ping/pong/close)
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("client closed WebSocket connection");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            warn!("failed to send pong, client disconnected");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {:?}", e);
                        break;
                    }
                    _ => {} // Ignore other message types
                }
            }
            // Forward broadcast updates the filter admits
            update = updates.recv() => {
                match update {
                    Ok(update) => {
                        if !filter.matches(&update) {
                            continue;
                        }
                        let payload = match serde_json::to_string(&update) {
                            Ok(payload) => payload,
                            Err(e) => {
                                warn!("failed to encode update: {:?}", e);
                                continue;
                            }
                        };
                        if sender.send(Message::Text(payload)).await.is_err() {
                            warn!("failed to send update, client disconnected");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // The client may catch up; keep receiving.
                        warn!(skipped, "updates subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("updates channel closed");
                        break;
                    }
                }
            }
        }
    }
    debug!("updates WebSocket handler exiting");
    let _ = sender.close().await;
}
