//! Block and chunk coordinates on the horizontal world grid

use rkyv::{Archive, Deserialize, Serialize};

/// Size of a chunk in blocks, per horizontal axis
///
/// Selection positions are recorded at block granularity; deletion always
/// operates at chunk granularity. This constant is the contract between the
/// two and matches the on-disk region file layout.
pub const CHUNK_SIZE: i32 = 32;

/// Fine-grained block position on the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub z: i32,
}

impl BlockPos {
    /// Create a new block position
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk grid coordinate of the X axis
    pub fn chunk_x(&self) -> i32 {
        self.x.div_euclid(CHUNK_SIZE)
    }

    /// Chunk grid coordinate of the Z axis
    pub fn chunk_z(&self) -> i32 {
        self.z.div_euclid(CHUNK_SIZE)
    }

    /// Coordinate of the chunk containing this block
    pub fn chunk(&self) -> ChunkCoord {
        ChunkCoord::new(self.chunk_x(), self.chunk_z())
    }
}

/// Integer coordinate identifying a chunk in the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Archive, Deserialize, Serialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Block position of this chunk's minimum corner
    pub fn block_origin(&self) -> BlockPos {
        BlockPos::new(self.x * CHUNK_SIZE, self.z * CHUNK_SIZE)
    }

    /// Chebyshev distance to another chunk (square-shaped neighborhoods)
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}
