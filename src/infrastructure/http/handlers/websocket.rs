//! WebSocket Handlers
//!
//! - `/ws/events`: 推送播放事件
//! - `/ws/speech`: 远程朗读客户端通道（仅 remote 后端）

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::infrastructure::adapters::{RemoteClientMessage, RemoteSpeechEngine};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 播放事件 WebSocket
pub async fn events_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_events_socket(socket, state))
}

/// 远程朗读客户端 WebSocket
pub async fn speech_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.remote_speech.clone() {
        Some(engine) => ws.on_upgrade(move |socket| handle_speech_socket(socket, engine)),
        None => ApiError::ServiceUnavailable("Remote speech backend is not enabled".to_string())
            .into_response(),
    }
}

async fn handle_events_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut event_rx = state.event_publisher.subscribe();

    tracing::info!("Events WebSocket connected");

    // 事件转发任务
    let forward_task = tokio::spawn(async move {
        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Events WebSocket lagged behind");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
    });

    // 接收客户端消息（心跳）
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Events WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Events WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    join_either(forward_task, receive_task).await;

    tracing::info!("Events WebSocket disconnected");
}

async fn handle_speech_socket(socket: WebSocket, engine: Arc<RemoteSpeechEngine>) {
    let (mut sender, mut receiver) = socket.split();
    let (client_id, mut commands) = engine.attach();

    // 下行：朗读命令
    let forward_task = tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            let msg = match serde_json::to_string(&command) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize speech command");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(client_id, error = %e, "Failed to send speech command");
                break;
            }
        }
    });

    // 上行：客户端事件
    let receive_engine = engine.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<RemoteClientMessage>(&text)
                {
                    Ok(message) => receive_engine.handle_client_message(message),
                    Err(e) => {
                        tracing::warn!(client_id, error = %e, "Invalid speech client message")
                    }
                },
                Ok(Message::Close(_)) => {
                    tracing::info!(client_id, "Speech WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(client_id, error = %e, "Speech WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    join_either(forward_task, receive_task).await;

    engine.detach(client_id);
}

/// 等待任一任务结束，并中止另一个，释放它持有的订阅和连接
async fn join_either(mut forward_task: JoinHandle<()>, mut receive_task: JoinHandle<()>) {
    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => forward_task.abort(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::broadcast;

    #[tokio::test]
    async fn test_join_either_aborts_remaining_task() {
        let (tx, mut rx) = broadcast::channel::<u32>(4);

        // 模拟仍在等待事件的转发任务
        let forward_task = tokio::spawn(async move {
            while rx.recv().await.is_ok() {}
        });
        // 模拟客户端已关闭的接收任务
        let receive_task = tokio::spawn(async {});

        join_either(forward_task, receive_task).await;

        tokio::time::timeout(Duration::from_secs(1), async {
            while tx.receiver_count() > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("forward task still holds its subscription");
    }
}
