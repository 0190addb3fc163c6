//! Tunable margins and depth gates consulted by the node-level pruning
//! and extension heuristics in `simple/pruning.rs` and `simple.rs`.

#[derive(Clone, Debug)]
pub struct SearchParams {
    /// Extra null-move reduction added on top of the depth-scaled term.
    pub null_reduction: u32,
    /// Minimum depth at which null-move pruning is attempted.
    pub null_min_depth: u32,
    /// Futility pruning margin, scaled by depth.
    pub futility_margin: i32,
    /// Minimum depth at which internal iterative deepening kicks in.
    pub iir_min_depth: u32,
    /// Per-depth margin subtracted from the TT score to test singularity.
    pub singular_margin: i32,
    /// Reverse futility / static null move margin, scaled by depth.
    pub rfp_margin: i32,
    /// Quiescence delta-pruning margin added on top of captured-piece value.
    pub delta_margin: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            null_reduction: 2,
            null_min_depth: 3,
            futility_margin: 100,
            iir_min_depth: 6,
            singular_margin: 3,
            rfp_margin: 120,
            delta_margin: 200,
        }
    }
}
