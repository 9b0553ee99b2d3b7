//! Lazy-deletion priority queue of pending fill candidates.
//!
//! Entries are `(key, level, coord)`; the lowest key pops first. Two side
//! sets stand in for a decrease-key operation:
//!   - `pending` holds every `(coord, level)` pair currently queued, so the
//!     identical pair is never queued twice.
//!   - `explored` holds every pair already handed out by `pop`, so stale heap
//!     entries are discarded instead of processed again.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use rand::Rng;

use crate::error::FloodError;
use crate::grid::Coord;

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    key: f64,
    level: u32,
    coord: Coord,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // Reversed so `BinaryHeap` (a max-heap) yields the smallest key first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.level.cmp(&self.level))
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

/// Priority queue over `(coord, level)` fill candidates.
///
/// The RNG is injected so callers control the jitter: the engine seeds a
/// `ChaCha8Rng`, tests can pass a fixed-output generator.
#[derive(Debug)]
pub struct FrontierQueue<R> {
    heap: BinaryHeap<FrontierEntry>,
    pending: HashSet<(Coord, u32)>,
    explored: HashSet<(Coord, u32)>,
    depth_first_factor: f64,
    rng: R,
}

impl<R: Rng> FrontierQueue<R> {
    pub fn new(depth_first_factor: f64, rng: R) -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: HashSet::new(),
            explored: HashSet::new(),
            depth_first_factor,
            rng,
        }
    }

    /// Queue `coord` at `level`.
    ///
    /// The priority key is `level * (depth_first_factor + U[0,1) * delay)`.
    /// Returns `Ok(false)` without queuing when the pair is already pending or
    /// already explored, and `InvalidLevel` when `level` is `None`.
    pub fn push(&mut self, coord: Coord, level: Option<u32>, delay: f64) -> Result<bool, FloodError> {
        let Some(level) = level else {
            return Err(FloodError::InvalidLevel { coord });
        };
        let pair = (coord, level);
        if self.explored.contains(&pair) || self.pending.contains(&pair) {
            return Ok(false);
        }
        self.pending.insert(pair);

        let jitter: f64 = self.rng.gen();
        let key = level as f64 * (self.depth_first_factor + jitter * delay);
        self.heap.push(FrontierEntry { key, level, coord });
        Ok(true)
    }

    /// Remove the lowest-key pair that has not been explored yet and mark it
    /// explored.
    pub fn pop(&mut self) -> Result<(Coord, u32), FloodError> {
        loop {
            let entry = self.heap.pop().ok_or(FloodError::FrontierExhausted)?;
            let pair = (entry.coord, entry.level);
            self.pending.remove(&pair);
            if self.explored.insert(pair) {
                return Ok(pair);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pairs handed out so far. Grows for the whole run.
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }

    pub fn is_pending(&self, coord: Coord, level: u32) -> bool {
        self.pending.contains(&(coord, level))
    }

    pub fn is_explored(&self, coord: Coord, level: u32) -> bool {
        self.explored.contains(&(coord, level))
    }

    pub fn depth_first_factor(&self) -> f64 {
        self.depth_first_factor
    }

    /// Affects keys of future pushes only; queued entries keep their keys.
    pub fn set_depth_first_factor(&mut self, factor: f64) {
        self.depth_first_factor = factor;
    }
}
