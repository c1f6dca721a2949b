//! Inbound and outbound WebSocket message type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hemolink_entity::blood_request::{BloodRequest, RequestStatus};
use hemolink_entity::notification::Notification;

/// A lifecycle action a client may take on a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    /// Donor accepts the request.
    Accept,
    /// Matched donor withdraws.
    Reject,
    /// Requester cancels the request.
    Cancel,
    /// Requester confirms the donation took place.
    Fulfill,
}

impl RequestAction {
    /// Return the action as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::Fulfill => "fulfill",
        }
    }
}

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Create a new blood request.
    BloodRequest {
        /// Request attributes, validated server-side.
        data: serde_json::Value,
    },
    /// Take a lifecycle action on an existing request.
    RequestAction {
        /// Target request ID.
        request_id: Uuid,
        /// Action to perform.
        action: RequestAction,
    },
    /// Mark a notification as read.
    MarkRead {
        /// Notification ID.
        notification_id: Uuid,
    },
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Channel registered and ready.
    Connected {
        /// Assigned channel ID.
        channel_id: Uuid,
    },
    /// Notification delivery.
    Notification {
        /// Persisted notification ID.
        id: Uuid,
        /// Event type tag.
        event_type: String,
        /// Notification title.
        title: String,
        /// Notification body.
        message: String,
        /// Related blood request, if any.
        request_id: Option<Uuid>,
        /// Related donor, if any.
        match_donor_id: Option<Uuid>,
        /// When the notification was created.
        timestamp: DateTime<Utc>,
    },
    /// A blood request changed state.
    RequestUpdate {
        /// Request ID.
        request_id: Uuid,
        /// New lifecycle status.
        status: RequestStatus,
        /// Matched donor after the transition, if any.
        matched_donor_id: Option<Uuid>,
    },
    /// Full snapshot of a blood request (sent to its creator on create).
    BloodRequest {
        /// The created request.
        request: BloodRequest,
    },
    /// Ping (server keepalive).
    Ping {
        /// Server timestamp.
        timestamp: i64,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

impl OutboundMessage {
    /// Build a notification push from a persisted row.
    pub fn from_notification(notification: &Notification) -> Self {
        Self::Notification {
            id: notification.id,
            event_type: notification.event_type.clone(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            request_id: notification.request_id,
            match_donor_id: notification.match_donor_id,
            timestamp: notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_request_action_deserializes() {
        let json = r#"{"type":"request_action","request_id":"550e8400-e29b-41d4-a716-446655440000","action":"accept"}"#;
        let msg: InboundMessage = serde_json::from_str(json).unwrap();
        match msg {
            InboundMessage::RequestAction { action, .. } => {
                assert_eq!(action, RequestAction::Accept);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_outbound_notification_serializes_with_type_tag() {
        let msg = OutboundMessage::Notification {
            id: Uuid::new_v4(),
            event_type: "blood_request".into(),
            title: "Blood needed".into(),
            message: "O- needed nearby".into(),
            request_id: None,
            match_donor_id: None,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "notification");
        assert_eq!(json["event_type"], "blood_request");
    }

    #[test]
    fn test_unknown_inbound_type_rejected() {
        let json = r#"{"type":"shutdown"}"#;
        assert!(serde_json::from_str::<InboundMessage>(json).is_err());
    }
}
