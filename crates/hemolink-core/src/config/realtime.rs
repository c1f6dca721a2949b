//! Real-time WebSocket configuration.

use serde::{Deserialize, Serialize};

/// Settings for the WebSocket session registry and dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound buffer size per channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Maximum simultaneous channels per recipient.
    #[serde(default = "default_max_channels")]
    pub max_channels_per_recipient: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            max_channels_per_recipient: default_max_channels(),
        }
    }
}

fn default_channel_buffer() -> usize {
    64
}

fn default_max_channels() -> usize {
    8
}
