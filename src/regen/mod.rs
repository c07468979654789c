//! Batched chunk regeneration

pub mod scheduler;
pub mod plan;

pub use scheduler::{
    RegenScheduler, ClientPort, ChunkOutcome, TickReport, CHUNKS_PER_TICK,
};
pub use plan::{RegenMode, build_targets};
