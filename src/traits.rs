//! Core trait definitions for layered dynamic programs.
//!
//! A layered DP advances one layer at a time: the frontier at layer `i + 1`
//! is a pure function of the frontier at layer `i` and the fixed instance
//! data. Table-filling recurrences such as 0/1 knapsack (one layer per item,
//! one frontier cell per capacity) fit this shape directly.
//!
//! Implementing [`LayeredProblem`] gives access to every execution mode of
//! [`LayeredEngine`](crate::engine::LayeredEngine):
//! - full table: every frontier is kept,
//! - rolling: only the latest frontier is kept,
//! - checkpointed: one frontier per block is kept and blocks are replayed
//!   during backtracking to recover an optimal path.

/// Trait for a layered dynamic program instance.
///
/// Semantics:
/// - There are `T = num_layers()` steps.
/// - `init_frontier()` is the frontier at layer 0.
/// - `forward_step(i, frontier)` maps layer `i` to layer `i + 1`.
/// - Reconstruction starts from `terminal_state(frontier_T)` and walks
///   `backtrack_step` from layer `T` down to layer 0.
pub trait LayeredProblem {
    /// Representation of the DP frontier at a layer (e.g. one DP row).
    type Frontier: Clone;

    /// A single state along the reconstructed path, one per layer.
    type State: Clone + PartialEq;

    /// Objective type.
    type Cost: Copy + Ord;

    /// Number of DP layers/steps `T`.
    fn num_layers(&self) -> usize;

    /// Initialize the frontier at layer 0.
    fn init_frontier(&self) -> Self::Frontier;

    /// Perform one DP step: from layer `layer` to `layer + 1`.
    ///
    /// Must only depend on `frontier` and fixed problem data.
    fn forward_step(&self, layer: usize, frontier: &Self::Frontier) -> Self::Frontier;

    /// The state at layer `T` that an optimal path ends in.
    fn terminal_state(&self, frontier_t: &Self::Frontier) -> Self::State;

    /// Step backwards across one layer.
    ///
    /// `before` is the frontier at `layer`, `after` the frontier at
    /// `layer + 1` and `state` lies on an optimal path at `layer + 1`.
    /// Returns the predecessor state at `layer` on that same path.
    fn backtrack_step(
        &self,
        layer: usize,
        before: &Self::Frontier,
        after: &Self::Frontier,
        state: &Self::State,
    ) -> Self::State;

    /// Extract the objective value from the final frontier.
    fn extract_cost(&self, frontier_t: &Self::Frontier) -> Self::Cost;
}

/// Engines own their problem; this lets them borrow one instead.
impl<P: LayeredProblem + ?Sized> LayeredProblem for &P {
    type Frontier = P::Frontier;
    type State = P::State;
    type Cost = P::Cost;

    fn num_layers(&self) -> usize {
        (**self).num_layers()
    }

    fn init_frontier(&self) -> Self::Frontier {
        (**self).init_frontier()
    }

    fn forward_step(&self, layer: usize, frontier: &Self::Frontier) -> Self::Frontier {
        (**self).forward_step(layer, frontier)
    }

    fn terminal_state(&self, frontier_t: &Self::Frontier) -> Self::State {
        (**self).terminal_state(frontier_t)
    }

    fn backtrack_step(
        &self,
        layer: usize,
        before: &Self::Frontier,
        after: &Self::Frontier,
        state: &Self::State,
    ) -> Self::State {
        (**self).backtrack_step(layer, before, after, state)
    }

    fn extract_cost(&self, frontier_t: &Self::Frontier) -> Self::Cost {
        (**self).extract_cost(frontier_t)
    }
}
