//! Working-set planning: turn a selection into regeneration targets
//!
//! Validates the operator's mode flags and expands the selection before any
//! job starts; these pre-flight checks are the only failures surfaced
//! synchronously to the requester.

use crate::core::config::DEFAULT_PROTECT_RADIUS;
use crate::core::error::Error;
use crate::world::pos::{BlockPos, ChunkCoord};
use std::collections::HashSet;

/// How a selection expands into a regeneration working set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenMode {
    /// Regenerate only the selected chunks
    Reset,
    /// Regenerate a square area around the first selected chunk,
    /// keeping every selected chunk untouched
    Protect { radius: i32 },
}

impl RegenMode {
    /// Resolve the two editor checkboxes into a mode
    ///
    /// Exactly one of the flags must be set.
    pub fn from_flags(protect: bool, reset: bool) -> Result<Self, Error> {
        match (protect, reset) {
            (true, true) => Err(Error::Regen(
                "Error: You cannot select both Protect and Reset modes.".to_string(),
            )),
            (false, false) => Err(Error::Regen(
                "Error: Please select a mode (Protect or Reset).".to_string(),
            )),
            (true, false) => Ok(RegenMode::Protect {
                radius: DEFAULT_PROTECT_RADIUS,
            }),
            (false, true) => Ok(RegenMode::Reset),
        }
    }
}

/// Expand the operator's selection into the chunks to regenerate
///
/// Reset keeps the selected chunks in selection order, duplicates included.
/// Protect walks the `(2r+1)²` square centered on the first selected chunk
/// and keeps every chunk not covered by the selection. An empty final set is
/// an error either way; no job should start with nothing to do.
pub fn build_targets(mode: RegenMode, selection: &[BlockPos]) -> Result<Vec<ChunkCoord>, Error> {
    let targets = match mode {
        RegenMode::Reset => selection.iter().map(BlockPos::chunk).collect(),
        RegenMode::Protect { radius } => {
            let center = selection
                .first()
                .map(BlockPos::chunk)
                .ok_or_else(|| {
                    Error::Regen(
                        "Protect Mode requires at least one chunk selected to define the center."
                            .to_string(),
                    )
                })?;

            let protected: HashSet<ChunkCoord> =
                selection.iter().map(BlockPos::chunk).collect();

            let mut targets = Vec::new();
            for x in -radius..=radius {
                for z in -radius..=radius {
                    let coord = ChunkCoord::new(center.x + x, center.z + z);
                    if !protected.contains(&coord) {
                        targets.push(coord);
                    }
                }
            }
            targets
        }
    };

    if targets.is_empty() {
        return Err(Error::Regen("No chunks found to regenerate.".to_string()));
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(x: i32, z: i32) -> BlockPos {
        BlockPos::new(x, z)
    }

    #[test]
    fn test_from_flags() {
        assert!(RegenMode::from_flags(true, true).is_err());
        assert!(RegenMode::from_flags(false, false).is_err());
        assert_eq!(RegenMode::from_flags(false, true).unwrap(), RegenMode::Reset);
        assert_eq!(
            RegenMode::from_flags(true, false).unwrap(),
            RegenMode::Protect {
                radius: DEFAULT_PROTECT_RADIUS
            }
        );
    }

    #[test]
    fn test_reset_maps_blocks_to_chunks_in_order() {
        let selection = [block(0, 0), block(64, 0), block(32, 32)];
        let targets = build_targets(RegenMode::Reset, &selection).unwrap();
        assert_eq!(
            targets,
            vec![
                ChunkCoord::new(0, 0),
                ChunkCoord::new(2, 0),
                ChunkCoord::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_reset_keeps_duplicates() {
        // Two blocks in the same chunk both map to it
        let selection = [block(0, 0), block(5, 5)];
        let targets = build_targets(RegenMode::Reset, &selection).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0], targets[1]);
    }

    #[test]
    fn test_reset_empty_selection_is_error() {
        assert!(build_targets(RegenMode::Reset, &[]).is_err());
    }

    #[test]
    fn test_protect_excludes_selected_chunks() {
        let selection = [block(0, 0), block(32, 0)];
        let targets = build_targets(RegenMode::Protect { radius: 1 }, &selection).unwrap();

        // 3x3 square minus the two selected chunks
        assert_eq!(targets.len(), 7);
        assert!(!targets.contains(&ChunkCoord::new(0, 0)));
        assert!(!targets.contains(&ChunkCoord::new(1, 0)));
        assert!(targets.contains(&ChunkCoord::new(-1, -1)));
        assert!(targets.contains(&ChunkCoord::new(1, 1)));
    }

    #[test]
    fn test_protect_centers_on_first_selection() {
        let selection = [block(320, 320)];
        let targets = build_targets(RegenMode::Protect { radius: 1 }, &selection).unwrap();

        assert_eq!(targets.len(), 8);
        for coord in &targets {
            assert!(coord.chebyshev_distance(ChunkCoord::new(10, 10)) <= 1);
        }
    }

    #[test]
    fn test_protect_requires_center() {
        assert!(build_targets(RegenMode::Protect { radius: 1 }, &[]).is_err());
    }

    #[test]
    fn test_protect_fully_covered_square_is_error() {
        // Radius 0 square is just the center chunk, which is selected
        let selection = [block(0, 0)];
        assert!(build_targets(RegenMode::Protect { radius: 0 }, &selection).is_err());
    }
}
