//! Event distribution and read-model plumbing.
//!
//! Mutations publish events; readers (the rendering layer's read models)
//! subscribe rather than being called inline. This crate provides the
//! mechanics only: the event contract, envelopes, an in-process pub/sub bus,
//! and cursor-tracked projections.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod projection;

pub use bus::{EventBus, InMemoryBusError, InMemoryEventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use projection::{Projection, ProjectionError, ProjectionRunner};
