//! Snapshot persistence: the full inventory, serialized after every
//! mutation.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hemobank_core::BloodGroup;
use hemobank_inventory::Inventory;

use crate::slot::{StorageSlot, StoreError};

/// Wire form of one group's stock.
///
/// `status` is written for the benefit of external readers of the slot; it
/// is carried as an opaque string and never trusted on load (statuses are
/// re-derived from the unit counts).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEntry {
    units: u32,
    status: String,
}

type PersistedInventory = BTreeMap<String, PersistedEntry>;

/// Loads and persists inventory snapshots through a [`StorageSlot`].
#[derive(Debug)]
pub struct SnapshotStore<S> {
    slot: S,
}

impl<S> SnapshotStore<S>
where
    S: StorageSlot,
{
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Load the persisted inventory, falling back to the default seed.
    ///
    /// The fallback is silent towards the user: an absent slot, unreadable
    /// storage, malformed JSON, or a document that does not hold exactly the
    /// 8 known groups all log a warning and seed. A well-formed document is
    /// rebuilt with statuses re-derived from its unit counts.
    pub fn load(&self) -> Inventory {
        let contents = match self.slot.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::debug!("no persisted inventory, using default seed");
                return Inventory::seed();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted inventory, using default seed");
                return Inventory::seed();
            }
        };

        let persisted: PersistedInventory = match serde_json::from_str(&contents) {
            Ok(persisted) => persisted,
            Err(err) => {
                tracing::warn!(error = %err, "malformed persisted inventory, using default seed");
                return Inventory::seed();
            }
        };

        match restore(&persisted) {
            Some(inventory) => inventory,
            None => {
                tracing::warn!("persisted inventory is incomplete, using default seed");
                Inventory::seed()
            }
        }
    }

    /// Serialize the full inventory into the slot.
    ///
    /// Called after every successful mutation, so the slot always holds the
    /// latest fully-settled state.
    pub fn persist(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let persisted: PersistedInventory = inventory
            .entries()
            .map(|(group, entry)| {
                (
                    group.label().to_string(),
                    PersistedEntry {
                        units: entry.units(),
                        status: entry.status().as_str().to_string(),
                    },
                )
            })
            .collect();

        let contents = serde_json::to_string(&persisted)?;
        self.slot.write(&contents)
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }
}

/// A document is well-formed only if it holds exactly the 8 known labels.
fn restore(persisted: &PersistedInventory) -> Option<Inventory> {
    if persisted.len() != BloodGroup::ALL.len() {
        return None;
    }

    let mut units = Vec::with_capacity(BloodGroup::ALL.len());
    for (label, entry) in persisted {
        let group = BloodGroup::from_str(label).ok()?;
        units.push((group, entry.units));
    }

    Inventory::from_units(units).ok()
}
