//! Offline region-file maintenance
//!
//! Operates directly on a world's chunks directory while the server is
//! offline: scan the `{x}.{z}.region.bin` files, split them into protected
//! and reset sets around one or more base positions, back the directory up,
//! and bulk-delete the reset set. Driven by the `purge_regions` binary.

use crate::core::error::Error;
use crate::world::pos::{BlockPos, ChunkCoord};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// One region file found in a chunks directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFile {
    pub coord: ChunkCoord,
    pub filename: String,
}

/// Regions split into keep and delete sets
#[derive(Debug, Default)]
pub struct Classified {
    /// Within the protect radius of at least one base
    pub protected: Vec<RegionFile>,
    /// Outside every base's radius; candidates for deletion
    pub reset: Vec<RegionFile>,
}

/// Options for one offline purge run
#[derive(Debug, Clone)]
pub struct PurgeOptions {
    pub chunks_dir: PathBuf,
    pub backups_dir: PathBuf,
    /// Block positions of the bases to protect
    pub bases: Vec<BlockPos>,
    /// Protect radius around each base, in chunks (Chebyshev)
    pub radius: i32,
    /// Report what would happen without touching any file
    pub dry_run: bool,
    /// Copy the region files aside before deleting
    pub backup: bool,
}

/// Result of one offline purge run
#[derive(Debug)]
pub struct PurgeReport {
    pub protected: usize,
    pub reset: usize,
    pub deleted: usize,
    pub dry_run: bool,
    pub backup_path: Option<PathBuf>,
}

/// Parse a `{x}.{z}.region.bin` filename into its chunk coordinate
pub fn parse_region_filename(name: &str) -> Option<ChunkCoord> {
    let stem = name.strip_suffix(".region.bin")?;
    let (x, z) = stem.split_once('.')?;
    if z.contains('.') {
        return None;
    }
    Some(ChunkCoord::new(x.parse().ok()?, z.parse().ok()?))
}

/// List all region files in a chunks directory
///
/// A missing directory yields an empty list; files that do not match the
/// region naming scheme are ignored.
pub fn scan_regions(chunks_dir: &Path) -> Result<Vec<RegionFile>, Error> {
    let mut regions = Vec::new();
    if !chunks_dir.exists() {
        return Ok(regions);
    }

    for entry in std::fs::read_dir(chunks_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(coord) = parse_region_filename(name) {
            regions.push(RegionFile {
                coord,
                filename: name.to_string(),
            });
        }
    }

    Ok(regions)
}

/// Split regions into protected and reset sets
///
/// A region is protected when it lies within `radius` chunks (Chebyshev
/// distance, so square-shaped areas) of any base position's chunk.
pub fn classify(regions: Vec<RegionFile>, bases: &[BlockPos], radius: i32) -> Classified {
    let base_chunks: Vec<ChunkCoord> = bases.iter().map(BlockPos::chunk).collect();

    let mut classified = Classified::default();
    for region in regions {
        let is_protected = base_chunks
            .iter()
            .any(|base| region.coord.chebyshev_distance(*base) <= radius);

        if is_protected {
            classified.protected.push(region);
        } else {
            classified.reset.push(region);
        }
    }

    classified
}

/// Copy every region file into a timestamped backup directory
///
/// Returns the backup directory, or `None` when there was nothing to back up.
pub fn backup_regions(chunks_dir: &Path, backups_dir: &Path) -> Result<Option<PathBuf>, Error> {
    let regions = scan_regions(chunks_dir)?;
    if regions.is_empty() {
        return Ok(None);
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Storage(e.to_string()))?
        .as_secs();
    let backup_dir = backups_dir.join(format!("chunks_backup_{}", timestamp));
    std::fs::create_dir_all(&backup_dir)?;

    for region in &regions {
        std::fs::copy(
            chunks_dir.join(&region.filename),
            backup_dir.join(&region.filename),
        )?;
    }

    log::info!(
        "Backed up {} region files to {}",
        regions.len(),
        backup_dir.display()
    );
    Ok(Some(backup_dir))
}

/// Delete the given region files, best-effort
///
/// Missing or undeletable files are logged and skipped. Returns the number
/// of files actually deleted.
pub fn delete_regions(chunks_dir: &Path, regions: &[RegionFile]) -> usize {
    let mut deleted = 0;
    for region in regions {
        let path = chunks_dir.join(&region.filename);
        match std::fs::remove_file(&path) {
            Ok(()) => deleted += 1,
            Err(e) => log::warn!("Failed to delete {}: {}", path.display(), e),
        }
    }
    deleted
}

/// Run a full offline purge: scan, classify, then back up and delete
///
/// Errors when the world has no region files at all. A dry run reports the
/// classification without touching anything.
pub fn run(opts: &PurgeOptions) -> Result<PurgeReport, Error> {
    let regions = scan_regions(&opts.chunks_dir)?;
    if regions.is_empty() {
        return Err(Error::Storage(
            "No regions found in this world.".to_string(),
        ));
    }

    let classified = classify(regions, &opts.bases, opts.radius);

    if opts.dry_run {
        return Ok(PurgeReport {
            protected: classified.protected.len(),
            reset: classified.reset.len(),
            deleted: 0,
            dry_run: true,
            backup_path: None,
        });
    }

    let backup_path = if opts.backup {
        backup_regions(&opts.chunks_dir, &opts.backups_dir)?
    } else {
        None
    };

    let deleted = delete_regions(&opts.chunks_dir, &classified.reset);

    Ok(PurgeReport {
        protected: classified.protected.len(),
        reset: classified.reset.len(),
        deleted,
        dry_run: false,
        backup_path,
    })
}
