//! 0/1 knapsack as a layered DP.
//!
//! Layer `i` consumes item `i`; the frontier at layer `i + 1` is the DP row
//! `dp[i][0..=W]`, the best value reachable with items `0..=i` inside each
//! capacity budget. The frontier at layer 0 is all zeros (no items yet), so
//! the same transition produces the base row and every later row:
//!
//! ```text
//! dp[i][j] = dp[i-1][j]                                        if j < w_i
//! dp[i][j] = max(dp[i-1][j], dp[i-1][j - w_i] + v_i)           otherwise
//! ```
//!
//! Path states are [`PathCell`]s: the budget still available at a layer and
//! the optimal value held there. An item was taken exactly when the value
//! changes across its layer.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::engine::LayeredEngine;
use crate::error::{KnapsackError, KnapsackResult};
use crate::table::DpTable;
use crate::traits::LayeredProblem;

/// One item: its weight and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Item {
    pub weight: usize,
    pub value: u64,
}

impl Item {
    pub fn new(weight: usize, value: u64) -> Self {
        Self { weight, value }
    }
}

/// Validated knapsack instance: at least one item, a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackProblem {
    items: Vec<Item>,
    capacity: usize,
}

/// A cell on a reconstructed optimal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCell {
    /// Capacity budget at this layer.
    pub budget: usize,
    /// Best value reachable with the preceding items inside `budget`.
    pub value: u64,
}

/// An optimal subset of items.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Selection {
    /// Indices of the chosen items, ascending.
    pub items: Vec<usize>,
    pub total_weight: usize,
    pub total_value: u64,
}

impl KnapsackProblem {
    /// Validate an instance.
    ///
    /// Fails when `items` is empty, when the values could sum past
    /// `u64::MAX`, or when `items.len() * (capacity + 1)` cells would
    /// exceed the largest possible allocation (`isize::MAX` bytes).
    pub fn new(items: Vec<Item>, capacity: usize) -> KnapsackResult<Self> {
        if items.is_empty() {
            return Err(rejected(KnapsackError::NoItems));
        }
        items
            .iter()
            .try_fold(0u64, |acc, item| acc.checked_add(item.value))
            .ok_or_else(|| rejected(KnapsackError::ValueOverflow))?;
        capacity
            .checked_add(1)
            .and_then(|width| width.checked_mul(items.len()))
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<u64>()))
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or_else(|| {
                rejected(KnapsackError::TableTooLarge {
                    items: items.len(),
                    columns: capacity.saturating_add(1),
                })
            })?;
        Ok(Self { items, capacity })
    }

    /// Validate an instance given as parallel weight and value lists.
    pub fn from_slices(weights: &[usize], values: &[u64], capacity: usize) -> KnapsackResult<Self> {
        if weights.len() != values.len() {
            return Err(rejected(KnapsackError::LengthMismatch {
                weights: weights.len(),
                values: values.len(),
            }));
        }
        let items = weights
            .iter()
            .zip(values)
            .map(|(&weight, &value)| Item::new(weight, value))
            .collect();
        Self::new(items, capacity)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Build the full `n × (W + 1)` table.
    ///
    /// Rows are written straight into the table's buffer; besides it only
    /// the previous and current row are alive.
    pub fn table(&self) -> DpTable {
        let width = self.capacity + 1;
        let mut cells = Vec::with_capacity(self.items.len() * width);
        LayeredEngine::new(self).for_each_frontier(|_, row| cells.extend_from_slice(row));
        DpTable::from_cells(self.capacity, self.items.len(), cells)
    }

    /// Best total value, keeping only one row alive.
    pub fn max_value(&self) -> u64 {
        LayeredEngine::new(self).run_cost()
    }

    /// Recover an optimal subset with checkpointed rows (≈ √n rows live).
    pub fn select(&self) -> Selection {
        let (_, path) = LayeredEngine::new(self).run();
        Selection::from_path(&self.items, &path)
    }

    /// Same as [`select`](Self::select) with an explicit checkpoint spacing.
    ///
    /// # Panics
    /// Panics if `block_size == 0`.
    pub fn select_with_block_size(&self, block_size: usize) -> Selection {
        let (_, path) = LayeredEngine::with_block_size(self, block_size).run();
        Selection::from_path(&self.items, &path)
    }

    fn transition(&self, item: Item, prev: &[u64], budget: usize) -> u64 {
        if budget < item.weight {
            prev[budget]
        } else {
            prev[budget].max(prev[budget - item.weight] + item.value)
        }
    }

    fn step_back(&self, layer: usize, before: &[u64], after: &[u64], budget: usize) -> usize {
        if after[budget] == before[budget] {
            budget
        } else {
            budget - self.items[layer].weight
        }
    }
}

impl LayeredProblem for KnapsackProblem {
    type Frontier = Vec<u64>;
    type State = PathCell;
    type Cost = u64;

    fn num_layers(&self) -> usize {
        self.items.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        vec![0; self.capacity + 1]
    }

    #[cfg(not(feature = "parallel"))]
    fn forward_step(&self, layer: usize, frontier: &Self::Frontier) -> Self::Frontier {
        let item = self.items[layer];
        (0..=self.capacity)
            .map(|budget| self.transition(item, frontier, budget))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn forward_step(&self, layer: usize, frontier: &Self::Frontier) -> Self::Frontier {
        // cells of one row only read the previous row
        let item = self.items[layer];
        (0..=self.capacity)
            .into_par_iter()
            .map(|budget| self.transition(item, frontier, budget))
            .collect()
    }

    fn terminal_state(&self, frontier_t: &Self::Frontier) -> Self::State {
        PathCell {
            budget: self.capacity,
            value: frontier_t[self.capacity],
        }
    }

    fn backtrack_step(
        &self,
        layer: usize,
        before: &Self::Frontier,
        after: &Self::Frontier,
        state: &Self::State,
    ) -> Self::State {
        let budget = self.step_back(layer, before, after, state.budget);
        PathCell {
            budget,
            value: before[budget],
        }
    }

    fn extract_cost(&self, frontier_t: &Self::Frontier) -> Self::Cost {
        frontier_t[self.capacity]
    }
}

impl Selection {
    /// Read the chosen items off a path of `n + 1` cells.
    pub fn from_path(items: &[Item], path: &[PathCell]) -> Self {
        debug_assert_eq!(path.len(), items.len() + 1);
        let chosen: Vec<usize> = path
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0].value != w[1].value)
            .map(|(i, _)| i)
            .collect();
        Self::from_indices(items, chosen)
    }

    fn from_indices(items: &[Item], chosen: Vec<usize>) -> Self {
        let total_weight = chosen.iter().map(|&i| items[i].weight).sum();
        let total_value = chosen.iter().map(|&i| items[i].value).sum();
        Self {
            items: chosen,
            total_weight,
            total_value,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: usize) -> bool {
        self.items.binary_search(&item).is_ok()
    }
}

impl DpTable {
    /// Backtrack an optimal subset from `dp[n-1][W]` over the full table.
    ///
    /// At row `i`, an unchanged value against row `i - 1` (an all-zero row
    /// for `i == 0`) means item `i` was skipped; otherwise it was taken and
    /// its weight leaves the budget.
    ///
    /// # Panics
    /// Panics if `problem` is not the instance this table was built from.
    pub fn selection(&self, problem: &KnapsackProblem) -> Selection {
        assert_eq!(self.num_items(), problem.num_items(), "table/problem mismatch");
        assert_eq!(self.capacity(), problem.capacity(), "table/problem mismatch");

        let zeros = problem.init_frontier();
        let mut budget = self.capacity();
        let mut chosen = Vec::new();
        for i in (0..self.num_items()).rev() {
            let after = self.row(i).unwrap_or(&zeros);
            let before = match i {
                0 => &zeros[..],
                _ => self.row(i - 1).unwrap_or(&zeros),
            };
            if after[budget] != before[budget] {
                chosen.push(i);
            }
            budget = problem.step_back(i, before, after, budget);
        }
        chosen.reverse();
        Selection::from_indices(problem.items(), chosen)
    }
}

/// Solve and return the full DP table.
///
/// ```
/// let table = knap_dp::solve(&[1, 3, 4], &[15, 20, 30], 4).unwrap();
/// assert_eq!(table.get(2, 4), Some(35));
/// assert_eq!(table.to_string(), "0\t15\t15\t15\t15\n0\t15\t15\t20\t35\n0\t15\t15\t20\t35\n");
/// ```
pub fn solve(weights: &[usize], values: &[u64], capacity: usize) -> KnapsackResult<DpTable> {
    Ok(KnapsackProblem::from_slices(weights, values, capacity)?.table())
}

/// Optimal value only, in `O(W)` memory. Equal to
/// `solve(..)?.optimal_value()` for every valid input.
pub fn max_value(weights: &[usize], values: &[u64], capacity: usize) -> KnapsackResult<u64> {
    Ok(KnapsackProblem::from_slices(weights, values, capacity)?.max_value())
}

/// An optimal subset of items, without materialising the full table.
pub fn select(weights: &[usize], values: &[u64], capacity: usize) -> KnapsackResult<Selection> {
    Ok(KnapsackProblem::from_slices(weights, values, capacity)?.select())
}

fn rejected(err: KnapsackError) -> KnapsackError {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "rejected knapsack instance");
    err
}
