//! Rechunk - batched chunk regeneration for voxel world saves

pub mod core;
pub mod world;
pub mod storage;
pub mod selection;
pub mod regen;
pub mod maintenance;
