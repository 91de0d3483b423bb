use crate::blocks::default_block_size;
use crate::{LayeredEngine, LayeredProblem};

/// Builder for [`LayeredEngine`] when the block size is a tuning decision
/// made away from where the problem is constructed.
pub struct EngineBuilder<P: LayeredProblem> {
    problem: P,
    block_size: Option<usize>,
}

impl<P: LayeredProblem> EngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            block_size: None,
        }
    }

    /// Checkpoint every `block_size` layers; `0` falls back to the default.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size).filter(|&b| b > 0);
        self
    }

    pub fn build(self) -> LayeredEngine<P> {
        let b = self
            .block_size
            .unwrap_or_else(|| default_block_size(self.problem.num_layers()));
        LayeredEngine::with_block_size(self.problem, b)
    }
}
