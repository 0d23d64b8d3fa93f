use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hemobank_core::{
    Aggregate, AggregateRoot, BloodGroup, DomainError, DomainResult, InventoryId, StockStatus,
    execute,
};
use hemobank_events::Event;

/// Stock held for a single blood group.
///
/// `status` is always the derivation of `units`; there is no way to set it
/// independently.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockEntry {
    units: u32,
    status: StockStatus,
}

impl StockEntry {
    /// Build an entry for a unit count, deriving the status.
    pub fn of(units: u32) -> Self {
        Self {
            units,
            status: StockStatus::for_units(units),
        }
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }
}

/// Aggregate root: the full blood inventory.
///
/// Always holds all 8 groups; there is no partial state. The only mutation
/// path is [`Inventory::apply_delta`] (equivalently, handling an
/// [`AdjustStock`] command), which re-derives the status tier on every
/// change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    id: InventoryId,
    // One slot per group, indexed by declaration order: totality is
    // structural, not a runtime invariant.
    entries: [StockEntry; 8],
    version: u64,
}

/// Default seed used when no persisted snapshot exists.
const SEED: [(BloodGroup, u32); 8] = [
    (BloodGroup::APositive, 15),
    (BloodGroup::ANegative, 8),
    (BloodGroup::BPositive, 12),
    (BloodGroup::BNegative, 5),
    (BloodGroup::AbPositive, 3),
    (BloodGroup::AbNegative, 2),
    (BloodGroup::OPositive, 20),
    (BloodGroup::ONegative, 6),
];

impl Inventory {
    /// The default seed inventory, statuses derived from the seed counts.
    pub fn seed() -> Self {
        Self {
            id: InventoryId::new(),
            entries: SEED.map(|(_, units)| StockEntry::of(units)),
            version: 0,
        }
    }

    /// Rebuild an inventory from stored unit counts.
    ///
    /// Statuses are re-derived from the counts; storage is never trusted for
    /// them. Every group must appear exactly once.
    pub fn from_units(units: impl IntoIterator<Item = (BloodGroup, u32)>) -> DomainResult<Self> {
        let mut slots: [Option<StockEntry>; 8] = [None; 8];
        for (group, count) in units {
            let slot = &mut slots[group as usize];
            if slot.is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate blood group {group}"
                )));
            }
            *slot = Some(StockEntry::of(count));
        }

        let mut entries = [StockEntry::of(0); 8];
        for group in BloodGroup::ALL {
            entries[group as usize] = slots[group as usize].ok_or_else(|| {
                DomainError::validation(format!("missing blood group {group}"))
            })?;
        }

        Ok(Self {
            id: InventoryId::new(),
            entries,
            version: 0,
        })
    }

    /// Current stock for a group. The map is total, so this cannot miss.
    pub fn entry(&self, group: BloodGroup) -> StockEntry {
        self.entries[group as usize]
    }

    /// All entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = (BloodGroup, StockEntry)> + '_ {
        BloodGroup::ALL
            .into_iter()
            .map(|group| (group, self.entry(group)))
    }

    pub fn id_typed(&self) -> InventoryId {
        self.id
    }

    /// Apply a signed delta to a group's stock: the single mutation path.
    ///
    /// A donation is `+1`; a request for `n` units is `-n`. Fails with
    /// [`DomainError::InsufficientStock`] when the delta would drive the
    /// count negative, leaving the inventory untouched.
    pub fn apply_delta(
        &mut self,
        group: BloodGroup,
        delta: i64,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<StockEntry> {
        execute(
            self,
            &AdjustStock {
                group,
                delta,
                occurred_at,
            },
        )?;
        Ok(self.entry(group))
    }
}

impl AggregateRoot for Inventory {
    type Id = InventoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AdjustStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub group: BloodGroup,
    pub delta: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted.
///
/// Carries the post-state (`units`, `status`) so read models never repeat
/// the arithmetic or the status derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub group: BloodGroup,
    pub delta: i64,
    pub units: u32,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

impl Event for StockAdjusted {
    fn event_type(&self) -> &'static str {
        "inventory.stock_adjusted"
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Aggregate for Inventory {
    type Command = AdjustStock;
    type Event = StockAdjusted;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        // Status is re-derived from the count here as well; the event's
        // status field exists for consumers, not for state evolution.
        self.entries[event.group as usize] = StockEntry::of(event.units);
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if command.delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let current = self.entry(command.group).units();
        let next = i64::from(current) + command.delta;

        if next < 0 {
            let requested = command.delta.unsigned_abs().min(u64::from(u32::MAX)) as u32;
            return Err(DomainError::insufficient_stock(
                command.group,
                requested,
                current,
            ));
        }

        let units = u32::try_from(next)
            .map_err(|_| DomainError::invariant("unit count overflow"))?;

        Ok(vec![StockAdjusted {
            group: command.group,
            delta: command.delta,
            units,
            status: StockStatus::for_units(units),
            occurred_at: command.occurred_at,
        }])
    }
}
