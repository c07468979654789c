//! World chunk storage: region files on disk plus an in-memory cache

pub mod region;
pub mod cache;
pub mod store;

pub use region::{
    RegionChunk, RegionData,
    serialize_region, deserialize_region,
    compress_region, decompress_region,
    save_region, load_region, delete_region, region_exists,
    region_path,
};
pub use cache::RegionCache;
pub use store::{ChunkStore, FileChunkStore};
