//! Stock status tiers, derived from unit counts.

use serde::{Deserialize, Serialize};

/// Sufficiency tier of a blood group's stock.
///
/// A tier is always **derived** from the unit count via [`StockStatus::for_units`];
/// it is never stored or set independently. Declaration order is sufficiency
/// order, so the derived `Ord` ranks `Critical` greatest (most urgent restock).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Good,
    Medium,
    Low,
    Critical,
}

impl StockStatus {
    /// Derive the tier for a unit count.
    ///
    /// Tiers are contiguous and exhaustive over the non-negative integers:
    /// `>= 10` good, `5..=9` medium, `2..=4` low, `< 2` critical.
    pub fn for_units(units: u32) -> Self {
        if units >= 10 {
            StockStatus::Good
        } else if units >= 5 {
            StockStatus::Medium
        } else if units >= 2 {
            StockStatus::Low
        } else {
            StockStatus::Critical
        }
    }

    /// The serde/display form ("good", "medium", "low", "critical").
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Good => "good",
            StockStatus::Medium => "medium",
            StockStatus::Low => "low",
            StockStatus::Critical => "critical",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
