//! World coordinate types

pub mod pos;

pub use pos::{BlockPos, ChunkCoord, CHUNK_SIZE};
