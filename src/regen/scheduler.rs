//! Rate-limited regeneration scheduler
//!
//! Drains a queue of chunk coordinates in fixed-size batches, one batch per
//! host tick, deleting each chunk from the cache and from disk so the world
//! regenerates it on next load. The scheduler is an explicit state machine
//! driven by the host's tick loop; there is no background thread, so all
//! world mutation stays on the single cooperative world-update thread.

use crate::core::error::Error;
use crate::storage::store::ChunkStore;
use crate::world::pos::ChunkCoord;
use std::collections::VecDeque;
use uuid::Uuid;

/// Chunks regenerated per tick (higher = faster but more lag)
pub const CHUNKS_PER_TICK: usize = 5;

/// Requester-facing operations the scheduler needs from the host
pub trait ClientPort {
    /// Send a text message to the requester
    fn notify(&mut self, requester: Uuid, text: &str);

    /// Drop the requester's tracked chunk views so the client re-requests
    /// fresh state; a no-op when the requester is absent
    fn refresh_chunks(&mut self, requester: Uuid);
}

/// Per-chunk result of a regeneration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// Evicted from the cache, deleted from disk, flushed
    Done,
    /// Not resident in the cache; deleted from disk and flushed
    Skipped,
    /// Storage error while deleting or flushing; logged, job continues
    Failed,
}

/// What one tick accomplished; the host may ignore this entirely
#[derive(Debug, Default)]
pub struct TickReport {
    /// Outcome for every chunk attempted this tick, in queue order
    pub outcomes: Vec<(ChunkCoord, ChunkOutcome)>,
    /// True when this tick finished the job
    pub finished: bool,
}

/// One regeneration run over a fixed target set
struct RegenJob {
    remaining: VecDeque<ChunkCoord>,
    requester: Uuid,
}

enum JobState {
    Idle,
    Draining(RegenJob),
}

/// Batched chunk regeneration scheduler
///
/// `start` seeds a job and returns immediately; the host then calls `tick`
/// once per server tick until the job drains. A started job runs to
/// completion or halts only because the host stops ticking it.
pub struct RegenScheduler {
    state: JobState,
    chunks_per_tick: usize,
}

impl Default for RegenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RegenScheduler {
    /// Create a scheduler with the default batch size
    pub fn new() -> Self {
        Self::with_batch_size(CHUNKS_PER_TICK)
    }

    /// Create a scheduler with a custom batch size
    pub fn with_batch_size(chunks_per_tick: usize) -> Self {
        Self {
            state: JobState::Idle,
            chunks_per_tick: chunks_per_tick.max(1),
        }
    }

    /// Whether a job is currently draining
    pub fn is_draining(&self) -> bool {
        matches!(self.state, JobState::Draining(_))
    }

    /// Start a regeneration job over the given targets
    ///
    /// The queue preserves order and keeps duplicates; a duplicated chunk is
    /// deleted twice, harmlessly. Sends the starting notification and
    /// returns without blocking. Errors when a job is already draining;
    /// callers wanting overlapping jobs use separate schedulers.
    pub fn start(
        &mut self,
        requester: Uuid,
        targets: Vec<ChunkCoord>,
        client: &mut dyn ClientPort,
    ) -> Result<(), Error> {
        if self.is_draining() {
            return Err(Error::Regen(
                "a regeneration job is already running".to_string(),
            ));
        }

        let remaining: VecDeque<ChunkCoord> = targets.into();
        client.notify(
            requester,
            &format!("Starting regeneration of {} chunks...", remaining.len()),
        );
        log::info!("Starting regeneration of {} chunks", remaining.len());

        self.state = JobState::Draining(RegenJob {
            remaining,
            requester,
        });
        Ok(())
    }

    /// Run one batch; invoked by the host once per tick
    ///
    /// Pops up to the batch size from the queue and regenerates each chunk.
    /// When the queue empties, sends the completion notification and one
    /// visibility refresh, then returns to idle. A no-op while idle.
    pub fn tick(
        &mut self,
        store: &mut dyn ChunkStore,
        client: &mut dyn ClientPort,
    ) -> TickReport {
        let JobState::Draining(job) = &mut self.state else {
            return TickReport::default();
        };

        let mut report = TickReport::default();
        for _ in 0..self.chunks_per_tick {
            let Some(coord) = job.remaining.pop_front() else {
                break;
            };
            let outcome = regenerate_single(store, coord);
            report.outcomes.push((coord, outcome));
        }

        if job.remaining.is_empty() {
            let requester = job.requester;
            client.notify(requester, "Regeneration Complete!");
            client.refresh_chunks(requester);
            log::info!("Regeneration complete");
            self.state = JobState::Idle;
            report.finished = true;
        }

        report
    }
}

/// Regenerate one chunk: evict, delete from disk, flush
///
/// Eviction is best-effort; the chunk may simply not be loaded. The delete
/// is the one blocking step, bounded by the storage layer's latency: storage
/// must not be reused for a chunk still mid-deletion. A storage error never
/// aborts the batch.
fn regenerate_single(store: &mut dyn ChunkStore, coord: ChunkCoord) -> ChunkOutcome {
    let was_cached = store.evict(coord);

    let result = store.delete(coord).and_then(|_| store.flush());
    if let Err(e) = result {
        log::error!("Error regenerating chunk {}: {}", coord, e);
        return ChunkOutcome::Failed;
    }

    if was_cached {
        ChunkOutcome::Done
    } else {
        ChunkOutcome::Skipped
    }
}
