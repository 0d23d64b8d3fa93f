//! Projection utilities (read model builders).
//!
//! Read models are **disposable**: the inventory snapshot is the source of
//! truth, and a projection can always be rebuilt from it plus the event
//! stream. The runner tracks a sequence cursor so at-least-once delivery is
//! safe: duplicates are skipped, gaps are rejected.

use thiserror::Error;

use crate::{Event, EventEnvelope};

/// A projection builds a read model from a stream of event envelopes.
///
/// `apply` must be deterministic; idempotence is provided by the runner's
/// cursor, so implementations can assume each envelope arrives once, in
/// order.
pub trait Projection {
    type Ev: Event;

    /// Apply a single event to the projection, updating the read model.
    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// An envelope skipped ahead of the expected position; the read model
    /// would silently miss a mutation if it were applied.
    #[error("sequence gap in event stream (last applied {last}, found {found})")]
    SequenceGap { last: u64, found: u64 },
}

/// Runs envelopes through a projection, tracking the last applied sequence.
#[derive(Debug)]
pub struct ProjectionRunner<P>
where
    P: Projection,
{
    projection: P,
    last_sequence: u64,
}

impl<P> ProjectionRunner<P>
where
    P: Projection,
{
    /// Start from an empty stream position (first envelope must be sequence 1).
    pub fn new(projection: P) -> Self {
        Self::resume(projection, 0)
    }

    /// Resume behind a projection that was seeded from a snapshot taken at
    /// `last_sequence` (e.g. a board built from the loaded inventory).
    pub fn resume(projection: P, last_sequence: u64) -> Self {
        Self {
            projection,
            last_sequence,
        }
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    pub fn into_projection(self) -> P {
        self.projection
    }

    /// Sequence number of the last envelope applied (0 before any).
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Apply a single envelope.
    ///
    /// Duplicates (sequence at or below the cursor) are skipped silently;
    /// a gap is an error because the read model would go stale unnoticed.
    pub fn apply(&mut self, envelope: &EventEnvelope<P::Ev>) -> Result<(), ProjectionError> {
        let found = envelope.sequence_number();

        if found <= self.last_sequence {
            tracing::debug!(sequence = found, "skipping already-applied envelope");
            return Ok(());
        }
        if found != self.last_sequence + 1 {
            return Err(ProjectionError::SequenceGap {
                last: self.last_sequence,
                found,
            });
        }

        self.projection.apply(envelope);
        self.last_sequence = found;
        Ok(())
    }

    /// Apply many envelopes in order.
    pub fn run<'a>(
        &mut self,
        envelopes: impl IntoIterator<Item = &'a EventEnvelope<P::Ev>>,
    ) -> Result<(), ProjectionError>
    where
        P::Ev: 'a,
    {
        for envelope in envelopes {
            self.apply(envelope)?;
        }
        Ok(())
    }
}
