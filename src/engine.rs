//! Generic layered DP engine.
//!
//! The engine drives any [`LayeredProblem`] in one of three modes:
//! 1. [`table`](LayeredEngine::table) keeps every frontier,
//! 2. [`run_cost`](LayeredEngine::run_cost) keeps only the latest frontier,
//! 3. [`run`](LayeredEngine::run) keeps one checkpoint per block, then
//!    replays blocks from last to first and backtracks through them to
//!    recover an optimal path with reduced memory.
//!
//! The engine is completely generic over implementations of [`LayeredProblem`].

use crate::blocks::{default_block_size, BlockCheckpoint};
use crate::traits::LayeredProblem;

/// Layered DP engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use knap_dp::{problems::knapsack::KnapsackProblem, LayeredEngine};
///
/// let problem = KnapsackProblem::from_slices(&[1, 3, 4], &[15, 20, 30], 4).unwrap();
/// let engine = LayeredEngine::new(problem);
/// let (best, path) = engine.run();
/// assert_eq!(best, 35);
/// let budgets: Vec<usize> = path.iter().map(|cell| cell.budget).collect();
/// assert_eq!(budgets, vec![0, 1, 4, 4]);
/// ```
pub struct LayeredEngine<P: LayeredProblem> {
    problem: P,
    block_size: usize,
}

struct BuildArtifacts<P: LayeredProblem> {
    checkpoints: Vec<BlockCheckpoint<P::Frontier>>,
    frontier_t: P::Frontier,
}

impl<P: LayeredProblem> LayeredEngine<P> {
    /// Create a new engine with a heuristic block size (≈ √T).
    pub fn new(problem: P) -> Self {
        let b = default_block_size(problem.num_layers());
        Self::with_block_size(problem, b)
    }

    /// Create a new engine with an explicit block size.
    ///
    /// # Panics
    /// Panics if `block_size == 0`.
    pub fn with_block_size(problem: P, block_size: usize) -> Self {
        assert!(block_size > 0, "block_size must be positive");
        Self {
            problem,
            block_size,
        }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Return the configured block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Compute every frontier for layers `1..=T`, in order.
    ///
    /// The layer-0 frontier is not included; for a problem with zero layers
    /// the result is empty.
    pub fn table(&self) -> Vec<P::Frontier> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layered_table", layers = self.problem.num_layers());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let init = self.problem.init_frontier();
        let mut layers: Vec<P::Frontier> = Vec::with_capacity(self.problem.num_layers());
        for layer in 0..self.problem.num_layers() {
            let next = self.problem.forward_step(layer, layers.last().unwrap_or(&init));
            layers.push(next);
        }
        layers
    }

    /// Visit the frontiers for layers `1..=T` in order and return the last
    /// one (the layer-0 frontier when there are no layers).
    ///
    /// Only the previous and current frontier are alive at any time; the
    /// visitor decides what, if anything, to keep.
    pub fn for_each_frontier<V>(&self, mut visit: V) -> P::Frontier
    where
        V: FnMut(usize, &P::Frontier),
    {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layered_sweep", layers = self.problem.num_layers());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        (0..self.problem.num_layers()).fold(self.problem.init_frontier(), |frontier, layer| {
            let next = self.problem.forward_step(layer, &frontier);
            visit(layer + 1, &next);
            next
        })
    }

    /// Compute the optimal cost keeping a single frontier alive.
    pub fn run_cost(&self) -> P::Cost {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layered_run_cost", layers = self.problem.num_layers());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let frontier_t = self.for_each_frontier(|_, _| {});
        self.problem.extract_cost(&frontier_t)
    }

    /// Run the checkpointed DP and reconstruct an optimal path.
    ///
    /// Returns `(optimal_cost, states)` where `states[k]` is the state at
    /// layer `k`, so the path always has `T + 1` entries and ends in
    /// [`LayeredProblem::terminal_state`].
    pub fn run(&self) -> (P::Cost, Vec<P::State>) {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "layered_run",
            layers = self.problem.num_layers(),
            block_size = self.block_size
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let BuildArtifacts {
            checkpoints,
            frontier_t,
        } = {
            #[cfg(feature = "tracing")]
            let span = tracing::info_span!("build_checkpoints");
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            self.build_checkpoints()
        };

        let cost = self.problem.extract_cost(&frontier_t);
        let terminal = self.problem.terminal_state(&frontier_t);

        let path = {
            #[cfg(feature = "tracing")]
            let span = tracing::info_span!("backtrack", blocks = checkpoints.len());
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            self.backtrack(&checkpoints, terminal)
        };

        (cost, path)
    }

    /// Forward pass: record the frontier at the start of every block.
    fn build_checkpoints(&self) -> BuildArtifacts<P> {
        let t = self.problem.num_layers();
        let b = self.block_size;
        let num_blocks = if t == 0 { 0 } else { t.div_ceil(b) };

        let mut checkpoints = Vec::with_capacity(num_blocks);
        let mut frontier = self.problem.init_frontier();

        for k in 0..num_blocks {
            let start = k * b;
            let end = ((k + 1) * b).min(t);
            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("checkpoint_block", block = k, start, end);
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            let mut next = frontier.clone();
            for layer in start..end {
                next = self.problem.forward_step(layer, &next);
            }
            checkpoints.push(BlockCheckpoint {
                start,
                end,
                frontier,
            });
            frontier = next;
        }

        BuildArtifacts {
            checkpoints,
            frontier_t: frontier,
        }
    }

    /// Recompute the frontiers of one block: layers `start..=end`.
    fn replay_block(&self, block: &BlockCheckpoint<P::Frontier>) -> Vec<P::Frontier> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("replay_block", start = block.start, end = block.end);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut frontiers = Vec::with_capacity(block.len() + 1);
        frontiers.push(block.frontier.clone());
        for layer in block.start..block.end {
            let next = self.problem.forward_step(layer, &frontiers[frontiers.len() - 1]);
            frontiers.push(next);
        }
        frontiers
    }

    /// Walk the blocks from last to first, stepping backwards one layer at
    /// a time through each replayed block.
    fn backtrack(
        &self,
        checkpoints: &[BlockCheckpoint<P::Frontier>],
        terminal: P::State,
    ) -> Vec<P::State> {
        let t = self.problem.num_layers();
        let mut rev_path = Vec::with_capacity(t + 1);
        let mut state = terminal;
        rev_path.push(state.clone());

        for block in checkpoints.iter().rev() {
            let frontiers = self.replay_block(block);
            for layer in (block.start..block.end).rev() {
                let local = layer - block.start;
                state = self.problem.backtrack_step(
                    layer,
                    &frontiers[local],
                    &frontiers[local + 1],
                    &state,
                );
                rev_path.push(state.clone());
            }
        }

        rev_path.reverse();
        rev_path
    }
}
