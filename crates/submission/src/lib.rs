//! Submission engine: drives one form submission from validation through
//! inventory mutation to notification.
//!
//! Per submission the state machine is
//! `Idle → Validating → (Rejected | Applying → Settled)`; every attempt
//! that starts applying reaches `Settled`, whatever the outcome.

pub mod collaborators;
pub mod engine;

pub use collaborators::{NoopPause, Notifier, NoticeKind, Pause, ThreadPause};
pub use engine::{SubmissionConfig, SubmissionEngine, SubmissionOutcome, SubmissionState};
