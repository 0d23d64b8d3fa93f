//! Storage layer: the durable slot, snapshot persistence, the mutation
//! pipeline, and the stock board read model.

pub mod board;
pub mod service;
pub mod slot;
pub mod snapshot;

pub use board::{BoardRow, StockBoard};
pub use service::{InventoryService, ServiceError};
pub use slot::{FileSlot, InMemorySlot, StorageSlot, StoreError};
pub use snapshot::SnapshotStore;
