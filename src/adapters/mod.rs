// Adapters layer: concrete implementations of the domain ports.

pub mod json_snapshot;
pub mod storage;

pub use json_snapshot::JsonSnapshot;
pub use storage::LocalStorage;
