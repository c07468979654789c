//! Region chunk serialization and disk I/O
//!
//! Each chunk is stored as one `{x}.{z}.region.bin` file under the world's
//! chunks directory. The payload is rkyv-serialized and LZ4-compressed.

use crate::world::pos::{ChunkCoord, CHUNK_SIZE};
use rkyv::{Archive, Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Serializable region chunk data
#[derive(Archive, Deserialize, Serialize)]
pub struct RegionData {
    pub coord_x: i32,
    pub coord_z: i32,
    /// Flat block-id plane, `CHUNK_SIZE * CHUNK_SIZE` entries
    pub blocks: Vec<u8>,
}

/// Runtime chunk held in the cache
pub struct RegionChunk {
    pub coord: ChunkCoord,
    /// Flat block-id plane, row-major over (x, z)
    pub blocks: Vec<u8>,
    /// Whether this chunk has been modified since last save
    pub modified: bool,
}

impl std::fmt::Debug for RegionChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionChunk")
            .field("coord", &self.coord)
            .field("modified", &self.modified)
            .finish()
    }
}

impl RegionChunk {
    /// Create a new empty chunk at the given coordinate
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![0; (CHUNK_SIZE * CHUNK_SIZE) as usize],
            modified: false,
        }
    }

    /// Create a chunk from an existing block plane
    pub fn from_blocks(coord: ChunkCoord, blocks: Vec<u8>) -> Self {
        Self {
            coord,
            blocks,
            modified: false,
        }
    }
}

/// Serialize a region chunk to bytes (uncompressed)
pub fn serialize_region(chunk: &RegionChunk) -> Result<Vec<u8>, io::Error> {
    let data = RegionData {
        coord_x: chunk.coord.x,
        coord_z: chunk.coord.z,
        blocks: chunk.blocks.clone(),
    };

    let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&data)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(bytes.to_vec())
}

/// Deserialize a region chunk from bytes (uncompressed)
pub fn deserialize_region(data: &[u8]) -> Result<RegionChunk, io::Error> {
    let archived = rkyv::access::<ArchivedRegionData, rkyv::rancor::Error>(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let region: RegionData = rkyv::deserialize::<RegionData, rkyv::rancor::Error>(archived)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let coord = ChunkCoord::new(region.coord_x, region.coord_z);

    Ok(RegionChunk::from_blocks(coord, region.blocks))
}

/// Compress a serialized region chunk using LZ4
pub fn compress_region(chunk: &RegionChunk) -> Result<Vec<u8>, io::Error> {
    let serialized = serialize_region(chunk)?;
    Ok(lz4_flex::compress_prepend_size(&serialized))
}

/// Decompress and deserialize a region chunk
pub fn decompress_region(data: &[u8]) -> Result<RegionChunk, io::Error> {
    let decompressed = lz4_flex::decompress_size_prepended(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("LZ4 decompression failed: {}", e)))?;
    deserialize_region(&decompressed)
}

/// Get the file path for a region chunk
pub fn region_path(base_dir: &Path, coord: ChunkCoord) -> PathBuf {
    base_dir.join(format!("{}.{}.region.bin", coord.x, coord.z))
}

/// Save a region chunk to disk (compressed)
pub async fn save_region(base_dir: &Path, chunk: &RegionChunk) -> Result<(), io::Error> {
    let path = region_path(base_dir, chunk.coord);

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let compressed = compress_region(chunk)?;
    tokio::fs::write(&path, compressed).await?;

    Ok(())
}

/// Load a region chunk from disk (if it exists)
pub async fn load_region(base_dir: &Path, coord: ChunkCoord) -> Result<Option<RegionChunk>, io::Error> {
    let path = region_path(base_dir, coord);

    if !path.exists() {
        return Ok(None);
    }

    let compressed = tokio::fs::read(&path).await?;
    let chunk = decompress_region(&compressed)?;

    Ok(Some(chunk))
}

/// Delete a region chunk from disk
///
/// Completes only once the file is gone; a missing file is not an error.
pub async fn delete_region(base_dir: &Path, coord: ChunkCoord) -> Result<(), io::Error> {
    let path = region_path(base_dir, coord);

    if path.exists() {
        tokio::fs::remove_file(&path).await?;
    }

    Ok(())
}

/// Check if a region chunk exists on disk
pub async fn region_exists(base_dir: &Path, coord: ChunkCoord) -> bool {
    region_path(base_dir, coord).exists()
}
