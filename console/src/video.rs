//! Remote control surface for embedded video feeds.
//!
//! The console does not render video. Feed identifiers are opaque strings
//! handed to the presentation layer, and remote commands travel one way
//! over a fire-and-forget channel: no acknowledgment, no delivery
//! confirmation, and a send to a detached receiver is dropped silently.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A remote command for an embedded feed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum FeedCommand {
    Mute,
    Unmute,
    Play,
    Pause,
    SetVolume {
        /// Target volume, clamped to 0..=100 on send.
        volume: u8,
    },
}

/// A command addressed to one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedCommand {
    pub feed_id: String,
    pub command: FeedCommand,
}

/// Sending half of the feed command channel.
#[derive(Debug, Clone)]
pub struct FeedRemote {
    tx: mpsc::UnboundedSender<AddressedCommand>,
}

impl FeedRemote {
    /// Create a remote plus the receiving end the presentation layer
    /// consumes.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AddressedCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Send a command to one feed, fire-and-forget.
    ///
    /// Out-of-range volumes are clamped rather than rejected; a detached
    /// receiver silently swallows the command.
    pub fn send(&self, feed_id: &str, command: FeedCommand) {
        let command = match command {
            FeedCommand::SetVolume { volume } => FeedCommand::SetVolume {
                volume: volume.min(100),
            },
            other => other,
        };

        let _ = self.tx.send(AddressedCommand {
            feed_id: feed_id.to_string(),
            command,
        });
    }
}
