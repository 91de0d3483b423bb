//! The DP table returned by a full knapsack solve.
//!
//! Cells are stored row-major in one allocation: row `i` holds the best
//! value reachable with items `0..=i` for every capacity budget `0..=W`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Fully populated `n × (W + 1)` table of optimal values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DpTable {
    capacity: usize,
    num_items: usize,
    cells: Vec<u64>,
}

impl DpTable {
    /// Wrap a row-major buffer of `num_items * (capacity + 1)` cells.
    pub(crate) fn from_cells(capacity: usize, num_items: usize, cells: Vec<u64>) -> Self {
        debug_assert_eq!(cells.len(), num_items * (capacity + 1));
        Self {
            capacity,
            num_items,
            cells,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Number of columns, one per capacity budget `0..=capacity`.
    #[inline]
    pub fn width(&self) -> usize {
        self.capacity + 1
    }

    /// `dp[item][budget]`, or `None` outside the table.
    pub fn get(&self, item: usize, budget: usize) -> Option<u64> {
        if item >= self.num_items || budget > self.capacity {
            return None;
        }
        Some(self.cells[item * self.width() + budget])
    }

    /// Row for `item`, indexed by capacity budget.
    pub fn row(&self, item: usize) -> Option<&[u64]> {
        if item >= self.num_items {
            return None;
        }
        let w = self.width();
        Some(&self.cells[item * w..(item + 1) * w])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.cells.chunks_exact(self.width())
    }

    /// `dp[n-1][W]`: the best total value within capacity.
    pub fn optimal_value(&self) -> u64 {
        self.cells.last().copied().unwrap_or(0)
    }

    pub fn into_rows(self) -> Vec<Vec<u64>> {
        self.rows().map(<[u64]>::to_vec).collect()
    }
}

/// Tab-separated rendering, one line per item and one column per budget.
impl fmt::Display for DpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut cells = row.iter();
            if let Some(first) = cells.next() {
                write!(f, "{first}")?;
            }
            for cell in cells {
                write!(f, "\t{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
