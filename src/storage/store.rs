//! Chunk store: the storage capability consumed by the regeneration scheduler

use crate::core::error::Error;
use crate::storage::cache::RegionCache;
use crate::storage::region::{self, RegionChunk};
use crate::world::pos::ChunkCoord;
use std::path::PathBuf;
use tokio::runtime::Runtime;

/// Storage operations the regeneration scheduler needs from a world store
///
/// Implementations run on the world tick thread; `delete` is the one call
/// allowed to block, and must not return before the deletion is durable.
pub trait ChunkStore {
    /// Drop the chunk from the in-memory cache if resident
    ///
    /// Best-effort: returns false when the chunk was not loaded. Pending
    /// edits are discarded, since the caller is about to delete the chunk.
    fn evict(&mut self, coord: ChunkCoord) -> bool;

    /// Remove the chunk's backing storage
    ///
    /// Returns only once the deletion has completed, so the caller can
    /// safely reuse storage for the coordinate afterwards.
    fn delete(&mut self, coord: ChunkCoord) -> Result<(), Error>;

    /// Flush pending writes for chunks still resident in the cache
    fn flush(&mut self) -> Result<(), Error>;
}

/// File-backed chunk store: an LRU cache over one region file per chunk
///
/// Owns a tokio runtime for the async file operations and joins them
/// synchronously where the contract demands completion, keeping all world
/// mutation on the calling thread.
pub struct FileChunkStore {
    cache: RegionCache,
    base_dir: PathBuf,
    runtime: Runtime,
}

impl FileChunkStore {
    /// Create a file-backed store over the given chunks directory
    pub fn new(base_dir: PathBuf, max_cached: usize) -> Result<Self, Error> {
        let runtime = Runtime::new()?;
        Ok(Self {
            cache: RegionCache::new(max_cached),
            base_dir,
            runtime,
        })
    }

    /// Get a cached chunk, loading it from disk on a miss
    ///
    /// Returns `None` when the chunk exists neither in cache nor on disk.
    pub fn get(&mut self, coord: ChunkCoord) -> Result<Option<&RegionChunk>, Error> {
        if !self.cache.contains(coord) {
            let loaded = self
                .runtime
                .block_on(region::load_region(&self.base_dir, coord))?;
            match loaded {
                Some(chunk) => {
                    if let Some(spilled) = self.cache.insert(chunk) {
                        self.write_back(&spilled)?;
                    }
                }
                None => return Ok(None),
            }
        }
        Ok(self.cache.get(coord))
    }

    /// Insert a chunk, writing back any dirty entry spilled by the LRU
    pub fn insert(&mut self, chunk: RegionChunk) -> Result<(), Error> {
        if let Some(spilled) = self.cache.insert(chunk) {
            self.write_back(&spilled)?;
        }
        Ok(())
    }

    /// Mutable access to a cached chunk, marking it modified
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut RegionChunk> {
        self.cache.get_mut(coord)
    }

    /// Number of chunks currently held in the cache
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// The chunks directory this store operates on
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn write_back(&self, chunk: &RegionChunk) -> Result<(), Error> {
        if chunk.modified {
            self.runtime
                .block_on(region::save_region(&self.base_dir, chunk))?;
        }
        Ok(())
    }
}

impl ChunkStore for FileChunkStore {
    fn evict(&mut self, coord: ChunkCoord) -> bool {
        self.cache.remove(coord).is_some()
    }

    fn delete(&mut self, coord: ChunkCoord) -> Result<(), Error> {
        self.runtime
            .block_on(region::delete_region(&self.base_dir, coord))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        for coord in self.cache.dirty_coords() {
            if let Some(chunk) = self.cache.get(coord) {
                self.runtime
                    .block_on(region::save_region(&self.base_dir, chunk))?;
            }
            self.cache.mark_clean(coord);
        }
        Ok(())
    }
}
