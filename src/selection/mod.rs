//! Per-operator chunk selection bookkeeping

pub mod store;

pub use store::SelectionStore;
