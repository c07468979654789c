//! LRU cache for region chunks
//!
//! Keeps loaded chunks in memory with automatic eviction of the least
//! recently used entry when the cache is full. Chunks carry a `modified`
//! flag so pending edits can be flushed to disk in one pass.

use crate::storage::region::RegionChunk;
use crate::world::pos::ChunkCoord;
use std::collections::HashMap;

/// LRU cache for region chunks
pub struct RegionCache {
    /// Map of chunk coordinates to chunks
    chunks: HashMap<ChunkCoord, RegionChunk>,
    /// Access order: oldest first, newest last
    access_order: Vec<ChunkCoord>,
    /// Maximum number of chunks to keep in cache
    max_chunks: usize,
}

impl RegionCache {
    /// Create a new cache with the given capacity
    pub fn new(max_chunks: usize) -> Self {
        Self {
            chunks: HashMap::with_capacity(max_chunks),
            access_order: Vec::with_capacity(max_chunks),
            max_chunks,
        }
    }

    /// Get a chunk by coordinate, marking it recently used
    pub fn get(&mut self, coord: ChunkCoord) -> Option<&RegionChunk> {
        if self.chunks.contains_key(&coord) {
            self.touch(coord);
            self.chunks.get(&coord)
        } else {
            None
        }
    }

    /// Get a mutable chunk by coordinate, marking it recently used and modified
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut RegionChunk> {
        if self.chunks.contains_key(&coord) {
            self.touch(coord);
            let chunk = self.chunks.get_mut(&coord)?;
            chunk.modified = true;
            Some(chunk)
        } else {
            None
        }
    }

    /// Insert a chunk, evicting the least recently used entry at capacity
    ///
    /// Returns the evicted chunk (or the replaced one, when the coordinate
    /// was already resident) so the caller can write it back if needed.
    pub fn insert(&mut self, chunk: RegionChunk) -> Option<RegionChunk> {
        let coord = chunk.coord;

        if self.chunks.contains_key(&coord) {
            self.forget(coord);
        }

        let evicted = if self.chunks.len() >= self.max_chunks && !self.chunks.contains_key(&coord) {
            self.evict_oldest()
        } else {
            None
        };

        let replaced = self.chunks.insert(coord, chunk);
        self.access_order.push(coord);

        evicted.or(replaced)
    }

    /// Remove a chunk from the cache without writeback
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<RegionChunk> {
        self.forget(coord);
        self.chunks.remove(&coord)
    }

    /// Check if the cache contains a chunk
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of chunks in the cache
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Evict the least recently used chunk
    pub fn evict_oldest(&mut self) -> Option<RegionChunk> {
        if let Some(coord) = self.access_order.first().copied() {
            self.remove(coord)
        } else {
            None
        }
    }

    /// Coordinates of chunks with unsaved modifications
    pub fn dirty_coords(&self) -> Vec<ChunkCoord> {
        self.chunks
            .values()
            .filter(|c| c.modified)
            .map(|c| c.coord)
            .collect()
    }

    /// Clear a chunk's modified flag after a successful writeback
    pub fn mark_clean(&mut self, coord: ChunkCoord) {
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.modified = false;
        }
    }

    /// Move a coordinate to the most-recent end of the access order
    fn touch(&mut self, coord: ChunkCoord) {
        self.forget(coord);
        self.access_order.push(coord);
    }

    /// Drop a coordinate from the access order
    fn forget(&mut self, coord: ChunkCoord) {
        if let Some(pos) = self.access_order.iter().position(|&c| c == coord) {
            self.access_order.remove(pos);
        }
    }
}
