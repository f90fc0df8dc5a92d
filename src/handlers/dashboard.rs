use crate::{
    handlers::AppState,
    models::{ApiResponse, DashboardSummary},
};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    Json,
};
use futures::{SinkExt, StreamExt};
use tokio::time::interval;

pub async fn dashboard(State(state): State<AppState>) -> Json<ApiResponse<DashboardSummary>> {
    let summary = state.analytics.dashboard_summary(&state.store).await;
    Json(ApiResponse::ok(summary))
}

pub async fn dashboard_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| push_summaries(socket, state))
}

async fn push_summaries(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let mut interval = interval(state.config.dashboard_push_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let summary = state.analytics.dashboard_summary(&state.store).await;

                if let Ok(msg) = serde_json::to_string(&summary) {
                    if sender.send(Message::Text(msg)).await.is_err() {
                        break;
                    }
                }
            }

            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::debug!("Dashboard websocket closed");
}
