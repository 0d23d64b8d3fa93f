//! The mutation pipeline: apply a delta, persist the snapshot, publish the
//! event.

use chrono::Utc;
use thiserror::Error;

use hemobank_core::{AggregateRoot, BloodGroup, DomainError, EventId, execute};
use hemobank_events::{EventBus, EventEnvelope, Subscription};
use hemobank_inventory::{AdjustStock, Inventory, StockAdjusted, StockEntry};

use crate::slot::{StorageSlot, StoreError};
use crate::snapshot::SnapshotStore;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Deterministic domain rejection (insufficient stock, bad delta).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Persisting the snapshot failed; the in-memory mutation is rolled
    /// back so readers never observe unpersisted state.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the inventory and orchestrates its only mutation path.
///
/// Pipeline per mutation: decide (pure) → evolve → persist the full
/// snapshot → publish the event envelope. Publication is fire-and-forget
/// fan-out to read models; a publish failure is logged and swallowed
/// because the persisted snapshot remains the source of truth.
///
/// No other component mutates inventory; renderers read via
/// [`InventoryService::inventory`] at startup and subscribe for changes.
pub struct InventoryService<S, B> {
    inventory: Inventory,
    store: SnapshotStore<S>,
    bus: B,
}

impl<S, B> InventoryService<S, B>
where
    S: StorageSlot,
    B: EventBus<EventEnvelope<StockAdjusted>>,
{
    /// Load the persisted inventory (or the seed) and wire the bus.
    pub fn open(slot: S, bus: B) -> Self {
        let store = SnapshotStore::new(slot);
        let inventory = store.load();
        tracing::info!(version = inventory.version(), "inventory loaded");
        Self {
            inventory,
            store,
            bus,
        }
    }

    /// The current, fully-settled inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Subscribe to mutation envelopes (for read models / rendering).
    pub fn subscribe(&self) -> Subscription<EventEnvelope<StockAdjusted>> {
        self.bus.subscribe()
    }

    /// Apply a signed delta to a group's stock.
    ///
    /// A donation is `+1`; a request for `n` units is `-n`. On success the
    /// snapshot is persisted before the envelope is published, so a
    /// subscriber can never observe a change that did not reach storage.
    pub fn apply_delta(
        &mut self,
        group: BloodGroup,
        delta: i64,
    ) -> Result<StockEntry, ServiceError> {
        let command = AdjustStock {
            group,
            delta,
            occurred_at: Utc::now(),
        };

        let settled = self.inventory.clone();
        let events = execute(&mut self.inventory, &command)?;

        if let Err(err) = self.store.persist(&self.inventory) {
            // Roll the in-memory state back: callers and subscribers must
            // never observe stock that did not reach storage, and the
            // version counter must stay aligned with published sequences.
            self.inventory = settled;
            return Err(err.into());
        }

        for event in events {
            tracing::info!(
                group = %event.group,
                delta = event.delta,
                units = event.units,
                status = %event.status,
                "stock adjusted"
            );
            let envelope = EventEnvelope::new(EventId::new(), self.inventory.version(), event);
            if let Err(err) = self.bus.publish(envelope) {
                tracing::warn!(error = ?err, "failed to publish stock event");
            }
        }

        Ok(self.inventory.entry(group))
    }
}
