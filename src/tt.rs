//! Transposition table for caching search results.
//!
//! Uses Zobrist hashes to store and retrieve position evaluations, enabling
//! significant search tree pruning. Entries are grouped into four-way
//! buckets exactly like a single-threaded table would be, but the buckets
//! are partitioned across a fixed number of lock stripes so root-parallel
//! search workers can probe and store concurrently without a single global
//! mutex serialising every access.

use std::mem;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::board::Move;

/// Mate scores are stored ply-independent by rescaling relative to the
/// probing node's ply; this mirrors the magnitude search uses to mark a
/// forced mate (kept in sync with `board::search::constants::MATE_THRESHOLD`
/// by convention rather than a shared import, since that module is private
/// to the search tree).
const MATE_THRESHOLD: i32 = 28000;

const NUM_STRIPES: usize = 128;
const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    /// The stored score is the exact minimax value.
    Exact,
    /// The stored score is a lower bound (search failed high, score >= beta).
    LowerBound,
    /// The stored score is an upper bound (search failed low, score <= alpha).
    UpperBound,
}

#[derive(Clone, Copy, Debug)]
struct TTEntry {
    hash: u64,
    depth: u32,
    score: i32,
    bound_type: BoundType,
    best_move: Option<Move>,
    generation: u16,
}

/// A read-only snapshot of a probed entry, detached from the table's
/// internal locking so callers can inspect it after the bucket lock is
/// released.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    depth: u32,
    score: i32,
    bound_type: BoundType,
    best_move: Option<Move>,
}

impl Entry {
    #[inline]
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    #[must_use]
    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    #[inline]
    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}

type Bucket = [Option<TTEntry>; BUCKET_SIZE];

/// Convert a score produced by the search tree (distance-to-mate relative
/// to the current node) into the ply-independent form stored in the
/// table, so the same entry is valid no matter which ply later probes it.
#[inline]
fn score_to_tt(score: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score + ply
    } else if score < -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`]: convert a stored ply-independent mate score
/// back into one relative to the probing node's ply.
#[inline]
fn score_from_tt(score: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score - ply
    } else if score < -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

/// Striped, bucketed transposition table shared across search workers.
///
/// The table is sized to the nearest power of two not exceeding the
/// requested megabyte budget, then split evenly across `NUM_STRIPES` lock
/// stripes. Each stripe owns a contiguous run of buckets; probing or
/// storing a position only ever contends with other accesses that hash
/// into the same stripe.
pub struct TranspositionTable {
    stripes: Vec<Mutex<Vec<Bucket>>>,
    mask: usize,
    buckets_per_stripe: usize,
    generation: AtomicU16,
    occupied: AtomicUsize,
}

impl TranspositionTable {
    /// Build a table sized to approximately `size_mb` megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let (num_buckets, buckets_per_stripe) = Self::sizing(size_mb);
        let stripes = (0..NUM_STRIPES)
            .map(|_| Mutex::new(vec![Bucket::default(); buckets_per_stripe]))
            .collect();

        #[cfg(feature = "logging")]
        log::debug!("transposition table sized to {size_mb} MB ({num_buckets} buckets)");

        TranspositionTable {
            stripes,
            mask: num_buckets - 1,
            buckets_per_stripe,
            generation: AtomicU16::new(0),
            occupied: AtomicUsize::new(0),
        }
    }

    fn sizing(size_mb: usize) -> (usize, usize) {
        let entry_size = mem::size_of::<Bucket>();
        let mut num_buckets = (size_mb.max(1) * 1024 * 1024) / entry_size.max(1);
        num_buckets = num_buckets.next_power_of_two();
        if num_buckets < NUM_STRIPES {
            num_buckets = NUM_STRIPES;
        }
        (num_buckets, num_buckets / NUM_STRIPES)
    }

    /// Rebuild the table at a new size, discarding all existing entries.
    ///
    /// Must not be called while a search holding a reference to this table
    /// is in flight; the caller (the UCI `setoption Hash` handler, out of
    /// scope here) is responsible for that precondition.
    pub fn resize(&mut self, size_mb: usize) {
        let (num_buckets, buckets_per_stripe) = Self::sizing(size_mb);
        self.stripes = (0..NUM_STRIPES)
            .map(|_| Mutex::new(vec![Bucket::default(); buckets_per_stripe]))
            .collect();
        self.mask = num_buckets - 1;
        self.buckets_per_stripe = buckets_per_stripe;
        self.generation.store(0, Ordering::Relaxed);
        self.occupied.store(0, Ordering::Relaxed);

        #[cfg(feature = "logging")]
        log::debug!("transposition table resized to {size_mb} MB ({num_buckets} buckets)");
    }

    #[inline]
    fn locate(&self, hash: u64) -> (usize, usize) {
        let index = (hash as usize) & self.mask;
        let stripe = index % NUM_STRIPES;
        let local = index / NUM_STRIPES;
        (stripe, local)
    }

    /// Hint the CPU to start loading the bucket for `hash` into cache
    /// ahead of a probe that will follow once move generation produces a
    /// position to look up. A no-op on targets without a prefetch
    /// intrinsic; never observable from safe code either way.
    pub fn prefetch(&self, hash: u64) {
        let (stripe, local) = self.locate(hash);
        #[cfg(target_arch = "x86_64")]
        {
            use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
            if let Some(stripe) = self.stripes.get(stripe) {
                // SAFETY: `data_ptr` is a valid pointer for the lifetime of
                // the borrow; prefetch never dereferences it.
                if let Some(guard) = stripe.try_lock() {
                    if let Some(bucket) = guard.get(local) {
                        let ptr = (bucket as *const Bucket).cast::<i8>();
                        unsafe {
                            _mm_prefetch(ptr, _MM_HINT_T0);
                        }
                    }
                }
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = (stripe, local);
        }
    }

    /// Look up `hash`, rescaling any stored mate score back to `ply`.
    #[must_use]
    pub fn probe(&self, hash: u64, ply: u32) -> Option<Entry> {
        let (stripe, local) = self.locate(hash);
        let guard = self.stripes[stripe].lock();
        let bucket = &guard[local];
        bucket
            .iter()
            .flatten()
            .find(|entry| entry.hash == hash)
            .map(|entry| Entry {
                depth: entry.depth,
                score: score_from_tt(entry.score, ply),
                bound_type: entry.bound_type,
                best_move: entry.best_move,
            })
    }

    /// Store a search result for `hash`, rescaling a mate score from
    /// `ply`-relative to the ply-independent form kept in the table.
    ///
    /// Replacement order within a bucket: update an existing entry for the
    /// same hash in place, else fill an empty slot, else evict whichever
    /// slot has the lowest `depth * 2 - age` priority (matching the
    /// depth-preferred, age-aware scheme used by this table's original
    /// single-threaded form).
    pub fn store(
        &self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
        ply: u32,
    ) {
        let generation = self.generation.load(Ordering::Relaxed);
        let stored_score = score_to_tt(score, ply);
        let (stripe, local) = self.locate(hash);
        let mut guard = self.stripes[stripe].lock();
        let bucket = &mut guard[local];

        for slot in bucket.iter_mut() {
            if let Some(existing) = slot {
                if existing.hash == hash {
                    *slot = Some(TTEntry {
                        hash,
                        depth,
                        score: stored_score,
                        bound_type,
                        best_move,
                        generation,
                    });
                    return;
                }
            }
        }

        for slot in bucket.iter_mut() {
            if slot.is_none() {
                *slot = Some(TTEntry {
                    hash,
                    depth,
                    score: stored_score,
                    bound_type,
                    best_move,
                    generation,
                });
                self.occupied.fetch_add(1, Ordering::Relaxed);
                return;
            }
        }

        let mut replace_idx = 0;
        let mut worst_priority = i32::MAX;
        for (idx, slot) in bucket.iter().enumerate() {
            if let Some(entry) = slot {
                let age = generation.wrapping_sub(entry.generation);
                let priority = (entry.depth.saturating_mul(2) as i32) - i32::from(age);
                if priority < worst_priority {
                    worst_priority = priority;
                    replace_idx = idx;
                }
            }
        }
        bucket[replace_idx] = Some(TTEntry {
            hash,
            depth,
            score: stored_score,
            bound_type,
            best_move,
            generation,
        });
    }

    /// Bump the generation counter between iterative-deepening iterations
    /// so stale entries age out of replacement priority.
    pub fn new_generation(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Occupancy in permille (thousandths), the customary UCI `hashfull`
    /// unit, sampled across the whole table rather than a single stripe.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let total_slots = (self.mask + 1).saturating_mul(BUCKET_SIZE);
        if total_slots == 0 {
            return 0;
        }
        ((self.occupied.load(Ordering::Relaxed) as u64 * 1000) / total_slots as u64) as u32
    }

    #[must_use]
    pub fn size_buckets(&self) -> usize {
        self.mask + 1
    }

    #[allow(dead_code)]
    #[must_use]
    pub(crate) fn buckets_per_stripe(&self) -> usize {
        self.buckets_per_stripe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::{PieceType, Square};

    fn test_move() -> Move {
        Move::quiet(Square::new(1, 4), Square::new(3, 4))
    }

    #[test]
    fn store_then_probe_round_trips() {
        let mut tt = TranspositionTable::new(1);
        tt.store(0xdead_beef, 4, 37, BoundType::Exact, Some(test_move()), 0);
        let entry = tt.probe(0xdead_beef, 0).expect("entry should be present");
        assert_eq!(entry.score(), 37);
        assert_eq!(entry.depth(), 4);
        assert_eq!(entry.bound_type(), BoundType::Exact);
        assert_eq!(entry.best_move(), Some(test_move()));
    }

    #[test]
    fn probe_miss_returns_none() {
        let tt = TranspositionTable::new(1);
        assert!(tt.probe(12345, 0).is_none());
    }

    #[test]
    fn mate_score_rescales_across_ply() {
        let mut tt = TranspositionTable::new(1);
        let mate_in_three_from_here = MATE_THRESHOLD + 100 - 3;
        tt.store(7, 10, mate_in_three_from_here, BoundType::Exact, None, 5);
        // Probed at a shallower ply, the stored mate distance should look
        // further away by the ply difference.
        let entry = tt.probe(7, 2).unwrap();
        assert_eq!(entry.score(), mate_in_three_from_here - (5 - 2));
    }

    #[test]
    fn deeper_entry_replaces_shallower_one_for_same_hash() {
        let mut tt = TranspositionTable::new(1);
        tt.store(99, 2, 10, BoundType::Exact, None, 0);
        tt.store(99, 8, 20, BoundType::Exact, None, 0);
        let entry = tt.probe(99, 0).unwrap();
        assert_eq!(entry.depth(), 8);
        assert_eq!(entry.score(), 20);
    }

    #[test]
    fn hashfull_reports_zero_on_empty_table() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.hashfull_per_mille(), 0);
    }

    #[test]
    fn captured_piece_survives_round_trip() {
        let mut tt = TranspositionTable::new(1);
        let mv = Move::capture(Square::new(1, 4), Square::new(6, 4), PieceType::Pawn);
        tt.store(55, 3, 0, BoundType::LowerBound, Some(mv), 0);
        let entry = tt.probe(55, 0).unwrap();
        assert_eq!(entry.best_move(), Some(mv));
    }

    #[test]
    fn resize_discards_existing_entries() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 5, 10, BoundType::Exact, None, 0);
        assert!(tt.probe(42, 0).is_some());
        tt.resize(2);
        assert!(tt.probe(42, 0).is_none());
        assert_eq!(tt.hashfull_per_mille(), 0);
    }
}
