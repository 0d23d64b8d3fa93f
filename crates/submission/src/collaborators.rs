//! Collaborator seams consumed by the submission engine.
//!
//! Notification display and the processing pause are UI-adjacent concerns;
//! the engine only holds the seams so tests can observe notices and skip
//! real time.

use std::time::Duration;

/// Visual flavor of a transient notice.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient on-screen notification sink. Fire-and-forget: the engine never
/// consumes a return value.
pub trait Notifier {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// The simulated processing latency seam.
///
/// The engine calls this once per applying submission. No cancellation:
/// once the pause begins the submission always settles.
pub trait Pause {
    fn pause(&self, duration: Duration);
}

/// Wall-clock pause: blocks the calling thread for the configured delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// No-op pause for tests: the state machine runs without real time passing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPause;

impl Pause for NoopPause {
    fn pause(&self, _duration: Duration) {}
}
