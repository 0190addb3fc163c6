//! Root-parallel search.
//!
//! Workers don't each run their own independent iterative deepening pass
//! (Lazy SMP); instead every depth iteration is itself parallelised across
//! the root move list. The calling thread searches the first root move
//! with a full window to establish a baseline score, then worker threads
//! pull the remaining moves from a shared atomic counter and search each
//! with a narrow PVS window centred on a shared atomic "best alpha",
//! re-searching with the full window whenever a worker's score beats it.
//! All workers share the transposition table; killer/history/counter-move
//! tables are kept private per worker, since Rust doesn't let us replicate
//! the original engine's literally-racy shared writes to plain integers
//! without `unsafe` (see DESIGN.md).

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::board::{Board, Move, EMPTY_MOVE, MAX_PLY};
use crate::tt::TranspositionTable;

use super::constants::MATE_THRESHOLD;
use super::simple::SimpleSearchContext;
use super::{
    SearchConfig, SearchInfoCallback, SearchIterationInfo, SearchParams, SearchResult,
    SearchState, MATE_SCORE,
};

/// State shared by the calling thread and every worker thread for one
/// root-parallel search.
pub struct SharedSearchState {
    pub tt: Arc<TranspositionTable>,
    pub stop: Arc<AtomicBool>,
    pub total_nodes: Arc<AtomicU64>,
    pub max_seldepth: Arc<AtomicU64>,
    pub generation: u16,
    pub params: SearchParams,
}

impl SharedSearchState {
    #[must_use]
    pub fn new(
        tt: Arc<TranspositionTable>,
        stop: Arc<AtomicBool>,
        generation: u16,
        params: SearchParams,
    ) -> Self {
        SharedSearchState {
            tt,
            stop,
            total_nodes: Arc::new(AtomicU64::new(0)),
            max_seldepth: Arc::new(AtomicU64::new(0)),
            generation,
            params,
        }
    }

    pub fn update_seldepth(&self, seldepth: u32) {
        let mut current = self.max_seldepth.load(Ordering::Relaxed);
        while u64::from(seldepth) > current {
            match self.max_seldepth.compare_exchange_weak(
                current,
                u64::from(seldepth),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current = c,
            }
        }
    }

    pub fn add_nodes(&self, nodes: u64) {
        self.total_nodes.fetch_add(nodes, Ordering::Relaxed);
    }
}

/// Configuration for root-parallel SMP search.
#[derive(Clone)]
pub struct SmpConfig {
    /// Number of worker threads (including the calling thread)
    pub num_threads: usize,
    /// Maximum depth to search
    pub max_depth: u32,
    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,
    /// Node limit (0 = unlimited)
    pub node_limit: u64,
    /// Optional callback for iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

impl Default for SmpConfig {
    fn default() -> Self {
        SmpConfig {
            num_threads: 1,
            max_depth: 64,
            time_limit_ms: 0,
            node_limit: 0,
            info_callback: None,
        }
    }
}

impl SmpConfig {
    /// Create config with specified thread count
    #[must_use]
    pub fn with_threads(num_threads: usize) -> Self {
        SmpConfig {
            num_threads: num_threads.max(1),
            ..Default::default()
        }
    }

    /// Set max depth
    #[must_use]
    pub fn depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set time limit
    #[must_use]
    pub fn time(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    /// Set node limit
    #[must_use]
    pub fn nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Set info callback
    #[must_use]
    pub fn with_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }
}

/// Depth at which an iteration is worth splitting across threads.
const MIN_PARALLEL_DEPTH: u32 = 4;

/// Search thread stack size (32 MB to handle deep recursion)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Result of searching one depth iteration, possibly across threads.
struct IterationResult {
    best_move: Option<Move>,
    score: i32,
}

/// Run root-parallel search.
///
/// Falls back to the ordinary single-threaded driver when `num_threads`
/// is 1, or when an individual iteration has too few root moves or too
/// shallow a depth to be worth splitting.
#[allow(clippy::needless_pass_by_value)]
pub fn smp_search(
    board: &Board,
    state: &mut SearchState,
    config: SmpConfig,
    stop: Arc<AtomicBool>,
) -> SearchResult {
    let num_threads = config.num_threads.max(1);

    if num_threads == 1 {
        let mut board_clone = board.clone();
        let search_config = SearchConfig {
            max_depth: Some(config.max_depth),
            time_limit_ms: config.time_limit_ms,
            node_limit: config.node_limit,
            extract_ponder: true,
            info_callback: config.info_callback,
            difficulty: 10,
            book: None,
        };
        return super::search(&mut board_clone, state, search_config, &stop);
    }

    state.generation = state.generation.wrapping_add(1);
    state.tables.tt.new_generation();
    state.stats.reset_search();

    let shared = Arc::new(SharedSearchState::new(
        state.shared_tt(),
        Arc::clone(&stop),
        state.generation,
        state.params.clone(),
    ));

    let start_time = Instant::now();
    let mut best_move: Option<Move> = None;
    let mut best_score = 0i32;

    for depth in 1..=config.max_depth {
        if shared.stop.load(Ordering::Relaxed) {
            break;
        }
        if config.time_limit_ms > 0 && start_time.elapsed().as_millis() as u64 >= config.time_limit_ms {
            break;
        }

        let Some(iteration) = search_iteration(
            board,
            &shared,
            depth,
            num_threads,
            config.node_limit,
            start_time,
            config.time_limit_ms,
        ) else {
            break;
        };

        if iteration.best_move.is_none() {
            break;
        }
        best_move = iteration.best_move;
        best_score = iteration.score;

        if let (Some(mv), Some(cb)) = (best_move, &config.info_callback) {
            let elapsed = start_time.elapsed().as_millis() as u64;
            let nodes = shared.total_nodes.load(Ordering::Relaxed);
            let nps = if elapsed > 0 { nodes * 1000 / elapsed } else { 0 };
            let mate_in = if best_score.abs() < MATE_THRESHOLD {
                None
            } else if best_score > 0 {
                Some((MATE_SCORE - best_score + 1) / 2)
            } else {
                Some(-(MATE_SCORE + best_score + 1) / 2)
            };
            let info = SearchIterationInfo {
                depth,
                nodes,
                nps,
                time_ms: elapsed,
                score: best_score,
                mate_in,
                pv: mv.to_string(),
                seldepth: shared.max_seldepth.load(Ordering::Relaxed) as u32,
                tt_hits: 0,
                multipv: 1,
            };
            cb(&info);
        }
    }

    state.stats.nodes = shared.total_nodes.load(Ordering::Relaxed);
    state.stats.total_nodes = state.stats.total_nodes.saturating_add(state.stats.nodes);
    state.stats.seldepth = shared.max_seldepth.load(Ordering::Relaxed) as u32;

    let ponder_move = best_move.and_then(|mv| {
        let mut temp_board = board.clone();
        temp_board.make_move(mv);
        let ponder = shared.tt.probe(temp_board.hash, 0).and_then(|entry| {
            entry.best_move().filter(|pmv| {
                let moves = temp_board.generate_moves();
                moves.iter().any(|m| m == pmv)
            })
        });
        temp_board.unmake_move(mv);
        ponder
    });

    SearchResult {
        best_move,
        ponder_move,
    }
}

/// Search a single depth, splitting the root move list across threads
/// when it's worth it.
#[allow(clippy::too_many_arguments)]
fn search_iteration(
    board: &Board,
    shared: &Arc<SharedSearchState>,
    depth: u32,
    num_threads: usize,
    node_limit: u64,
    start_time: Instant,
    time_limit_ms: u64,
) -> Option<IterationResult> {
    let root_moves = board.generate_moves();
    if root_moves.is_empty() {
        return None;
    }
    let mut moves: Vec<Move> = root_moves.iter().copied().collect();

    // Pin the current best move (from a previous iteration) first.
    if let Some(entry) = shared.tt.probe(board.hash, 0) {
        if let Some(best) = entry.best_move() {
            if let Some(pos) = moves.iter().position(|m| *m == best) {
                moves.swap(0, pos);
            }
        }
    }

    if moves.len() == 1 || depth < MIN_PARALLEL_DEPTH || num_threads <= 1 {
        return search_iteration_single_threaded(
            board,
            shared,
            &moves,
            depth,
            node_limit,
            start_time,
            time_limit_ms,
        );
    }

    // First move: full window, searched by the calling thread.
    let mut main_state = SearchState::with_shared_tt(Arc::clone(&shared.tt), shared.generation);
    main_state.params = shared.params.clone();
    let mut main_board = board.clone();
    let first_move = moves[0];

    let first_score = {
        let mut ctx = SimpleSearchContext {
            board: &mut main_board,
            state: &mut main_state,
            stop: &shared.stop,
            start_time,
            time_limit_ms,
            node_limit,
            nodes: 0,
            initial_depth: depth,
            static_eval: [0; MAX_PLY],
            previous_move: [EMPTY_MOVE; MAX_PLY],
            previous_piece: [None; MAX_PLY],
            root_moves: moves.clone(),
            info_callback: None,
        };
        ctx.board.make_move(first_move);
        let score = -ctx.alphabeta(depth - 1, -30000, 30000, true, 1, EMPTY_MOVE);
        ctx.board.unmake_move(first_move);
        shared.add_nodes(ctx.nodes);
        score
    };
    shared.update_seldepth(main_state.stats.seldepth);

    if shared.stop.load(Ordering::Relaxed) {
        return None;
    }

    let next_index = Arc::new(AtomicUsize::new(1));
    let best_alpha = Arc::new(AtomicI32::new(first_score));

    let mut handles: Vec<JoinHandle<Option<(Move, i32, u64, u32)>>> =
        Vec::with_capacity(num_threads - 1);
    for _ in 1..num_threads {
        let board_clone = board.clone();
        let shared_clone = Arc::clone(shared);
        let next_index_clone = Arc::clone(&next_index);
        let best_alpha_clone = Arc::clone(&best_alpha);
        let moves_clone = moves.clone();

        let handle = thread::Builder::new()
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                root_worker(
                    board_clone,
                    shared_clone,
                    next_index_clone,
                    best_alpha_clone,
                    moves_clone,
                    depth,
                    node_limit,
                    start_time,
                    time_limit_ms,
                )
            })
            .expect("failed to spawn search worker");
        handles.push(handle);
    }

    let mut best_move = Some(first_move);
    let mut best_score = first_score;

    for handle in handles {
        if let Ok(Some((mv, score, nodes, seldepth))) = handle.join() {
            shared.add_nodes(nodes);
            shared.update_seldepth(seldepth);
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }
    }

    if shared.stop.load(Ordering::Relaxed) {
        return None;
    }

    Some(IterationResult {
        best_move,
        score: best_score,
    })
}

/// Search a single depth iteration on the calling thread only (used below
/// the parallel threshold, or when only one root move is legal).
fn search_iteration_single_threaded(
    board: &Board,
    shared: &Arc<SharedSearchState>,
    moves: &[Move],
    depth: u32,
    node_limit: u64,
    start_time: Instant,
    time_limit_ms: u64,
) -> Option<IterationResult> {
    let mut local_state = SearchState::with_shared_tt(Arc::clone(&shared.tt), shared.generation);
    local_state.params = shared.params.clone();
    let mut local_board = board.clone();

    let score = {
        let mut ctx = SimpleSearchContext {
            board: &mut local_board,
            state: &mut local_state,
            stop: &shared.stop,
            start_time,
            time_limit_ms,
            node_limit,
            nodes: 0,
            initial_depth: depth,
            static_eval: [0; MAX_PLY],
            previous_move: [EMPTY_MOVE; MAX_PLY],
            previous_piece: [None; MAX_PLY],
            root_moves: moves.to_vec(),
            info_callback: None,
        };
        let score = ctx.alphabeta(depth, -30000, 30000, true, 0, EMPTY_MOVE);
        shared.add_nodes(ctx.nodes);
        score
    };
    shared.update_seldepth(local_state.stats.seldepth);

    if shared.stop.load(Ordering::Relaxed) {
        return None;
    }

    let best_move = shared
        .tt
        .probe(board.hash, 0)
        .and_then(|e| e.best_move())
        .filter(|m| moves.contains(m));

    Some(IterationResult { best_move, score })
}

/// A worker thread's contribution to one root-parallel iteration: pull
/// move indices from `next_index` until exhausted, searching each with a
/// narrow window centred on `best_alpha`.
#[allow(clippy::too_many_arguments)]
fn root_worker(
    mut board: Board,
    shared: Arc<SharedSearchState>,
    next_index: Arc<AtomicUsize>,
    best_alpha: Arc<AtomicI32>,
    moves: Vec<Move>,
    depth: u32,
    node_limit: u64,
    start_time: Instant,
    time_limit_ms: u64,
) -> Option<(Move, i32, u64, u32)> {
    let mut local_state = SearchState::with_shared_tt(Arc::clone(&shared.tt), shared.generation);
    local_state.params = shared.params.clone();
    local_state.tables.history.decay();
    local_state.tables.killer_moves.reset();
    local_state.tables.counter_moves.reset();

    let mut best: Option<(Move, i32)> = None;
    let mut total_nodes = 0u64;

    loop {
        if shared.stop.load(Ordering::Relaxed) {
            break;
        }
        let idx = next_index.fetch_add(1, Ordering::Relaxed);
        if idx >= moves.len() {
            break;
        }
        let mv = moves[idx];

        let score = {
            let mut ctx = SimpleSearchContext {
                board: &mut board,
                state: &mut local_state,
                stop: &shared.stop,
                start_time,
                time_limit_ms,
                node_limit,
                nodes: 0,
                initial_depth: depth,
                static_eval: [0; MAX_PLY],
                previous_move: [EMPTY_MOVE; MAX_PLY],
                previous_piece: [None; MAX_PLY],
                root_moves: moves.clone(),
                info_callback: None,
            };

            ctx.board.make_move(mv);
            let alpha = best_alpha.load(Ordering::Relaxed);
            let mut score = -ctx.alphabeta(depth - 1, -(alpha + 1), -alpha, true, 1, EMPTY_MOVE);
            if score > alpha {
                score = -ctx.alphabeta(depth - 1, -30000, -alpha, true, 1, EMPTY_MOVE);
            }
            ctx.board.unmake_move(mv);

            total_nodes += ctx.nodes;
            score
        };

        if shared.stop.load(Ordering::Relaxed) {
            break;
        }

        let mut current = best_alpha.load(Ordering::Relaxed);
        while score > current {
            match best_alpha.compare_exchange_weak(current, score, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => break,
                Err(c) => current = c,
            }
        }

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    best.map(|(mv, score)| (mv, score, total_nodes, local_state.stats.seldepth))
}
