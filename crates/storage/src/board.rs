//! Stock board: the render-ready read model behind the inventory display.
//!
//! The rendering collaborator consumes [`StockBoard::rows`] (one row per
//! group with its label, unit count, and status tier) and maps statuses to
//! styles on its side. The board is built from the loaded inventory at
//! startup and kept fresh by subscribing to published [`StockAdjusted`]
//! envelopes, so rendering is decoupled from the mutation path.

use hemobank_core::{BloodGroup, StockStatus};
use hemobank_events::{EventEnvelope, Projection};
use hemobank_inventory::{Inventory, StockAdjusted};

/// One display card's worth of data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub group: BloodGroup,
    pub units: u32,
    pub status: StockStatus,
}

/// Disposable read model: current stock per group, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockBoard {
    rows: [BoardRow; 8],
}

impl StockBoard {
    /// Snapshot the current inventory (the startup render).
    ///
    /// Pair with [`hemobank_events::ProjectionRunner::resume`] at the
    /// inventory's version so subsequent envelopes continue the stream.
    pub fn from_inventory(inventory: &Inventory) -> Self {
        Self {
            rows: BloodGroup::ALL.map(|group| {
                let entry = inventory.entry(group);
                BoardRow {
                    group,
                    units: entry.units(),
                    status: entry.status(),
                }
            }),
        }
    }

    /// All rows, in display order.
    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    /// The row for one group.
    pub fn row(&self, group: BloodGroup) -> BoardRow {
        self.rows[group as usize]
    }
}

impl Projection for StockBoard {
    type Ev = StockAdjusted;

    fn apply(&mut self, envelope: &EventEnvelope<StockAdjusted>) {
        let event = envelope.payload();
        // The event carries the post-state; no arithmetic on the read side.
        self.rows[event.group as usize] = BoardRow {
            group: event.group,
            units: event.units,
            status: event.status,
        };
    }
}
