//! User-facing notices.
//!
//! Every recoverable failure the UI should know about is reported as a
//! [`Notice`] on a broadcast channel. None of them are fatal; the consumer
//! decides whether to offer a retry.

use tokio::sync::broadcast;

/// Buffered notices per subscriber before the oldest are dropped.
const NOTICE_CAPACITY: usize = 16;

/// A recoverable failure surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Fetching the remote catalog failed; local data was used instead.
    RemoteUpdateFailed,
    /// The bundled seed snapshot could not be loaded.
    CachedDataUnavailable,
    /// The selected stations could not be resolved for a distance.
    DistanceCalculationFailed,
}

/// Sending half of the notice channel.
pub type NoticeSender = broadcast::Sender<Notice>;

/// Create a notice channel.
pub fn notice_channel() -> (NoticeSender, broadcast::Receiver<Notice>) {
    broadcast::channel(NOTICE_CAPACITY)
}

/// Send a notice, ignoring the case where nobody is listening.
pub(crate) fn emit(tx: &NoticeSender, notice: Notice) {
    let _ = tx.send(notice);
}
