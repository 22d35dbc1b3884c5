//! Speaker-change sound collaborator.

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Plays the notification sound when a speaker's time runs out.
/// Playback is fire-and-forget: failures are logged and swallowed.
#[async_trait]
pub trait Chime: Send + Sync {
    async fn play(&self);
}

/// Rings the terminal bell.
pub struct TerminalBell;

#[async_trait]
impl Chime for TerminalBell {
    async fn play(&self) {
        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").await {
            debug!("Failed to ring terminal bell: {}", e);
            return;
        }
        if let Err(e) = stdout.flush().await {
            debug!("Failed to flush terminal bell: {}", e);
        }
    }
}

/// No-op chime for when the bell is configured off.
pub struct SilentChime;

#[async_trait]
impl Chime for SilentChime {
    async fn play(&self) {}
}
