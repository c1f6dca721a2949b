//! WebSocket upgrade handler.
//!
//! Authentication happens before the upgrade; a channel is registered
//! only for a verified identity. Inbound lifecycle triggers route to
//! the same services the REST handlers use.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use hemolink_core::error::AppError;
use hemolink_realtime::connection::authenticator::{AuthenticatedConnection, WsAuthenticator};
use hemolink_realtime::connection::handle::ChannelHandle;
use hemolink_realtime::message::types::{InboundMessage, OutboundMessage, RequestAction};
use hemolink_service::context::RequestContext;
use hemolink_service::request::CreateRequestInput;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt} — authenticated WebSocket upgrade
pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade
    let authenticator = WsAuthenticator::new(state.jwt_decoder.clone());
    let identity = authenticator.authenticate(Some(&query.token))?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state, identity, socket)))
}

/// Drives an established WebSocket connection.
async fn handle_socket(state: AppState, identity: AuthenticatedConnection, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.registry.register(
        identity.recipient(),
        identity.role,
        identity.name.clone(),
    );
    let channel_id = handle.id;
    let ctx = RequestContext::new(identity.user_id, identity.role, identity.name.clone());

    info!(
        channel_id = %channel_id,
        user_id = %identity.user_id,
        role = %identity.role,
        "WebSocket channel registered"
    );

    handle.push(OutboundMessage::Connected { channel_id });

    // Forward queued outbound messages to the socket
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to serialize outbound message: {}", e);
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_inbound(&state, &ctx, &handle, &text).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(channel_id = %channel_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.registry.unregister(&channel_id);

    info!(
        channel_id = %channel_id,
        user_id = %identity.user_id,
        "WebSocket channel closed"
    );
}

/// Parses and routes one inbound message.
///
/// Service errors surface as an `error` message on the same channel;
/// they never tear the connection down.
async fn handle_inbound(
    state: &AppState,
    ctx: &RequestContext,
    handle: &Arc<ChannelHandle>,
    text: &str,
) {
    let msg = match serde_json::from_str::<InboundMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            handle.push(OutboundMessage::Error {
                code: "INVALID_MESSAGE".to_string(),
                message: format!("Unparseable message: {e}"),
            });
            return;
        }
    };

    let result = match msg {
        InboundMessage::BloodRequest { data } => {
            match serde_json::from_value::<CreateRequestInput>(data) {
                Ok(input) => state
                    .lifecycle
                    .create_request(ctx, input)
                    .await
                    .map(|_| ()),
                Err(e) => Err(AppError::validation(format!("Invalid request payload: {e}"))),
            }
        }
        InboundMessage::RequestAction { request_id, action } => {
            let outcome = match action {
                RequestAction::Accept => state.lifecycle.accept_request(ctx, request_id).await,
                RequestAction::Reject => state.lifecycle.reject_request(ctx, request_id).await,
                RequestAction::Cancel => state.lifecycle.cancel_request(ctx, request_id).await,
                RequestAction::Fulfill => state.lifecycle.fulfill_request(ctx, request_id).await,
            };
            outcome.map(|_| ())
        }
        InboundMessage::MarkRead { notification_id } => state
            .notifications
            .mark_read(ctx, notification_id)
            .await
            .map(|_| ()),
        InboundMessage::Pong { .. } => Ok(()),
    };

    if let Err(e) = result {
        handle.push(OutboundMessage::Error {
            code: e.kind.to_string(),
            message: e.message.clone(),
        });
    }
}
