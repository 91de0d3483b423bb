//! Layered dynamic programming with a 0/1 knapsack solver.
//!
//! The crate is built around a small engine for *layered* DPs, recurrences
//! that fill one row at a time from the row before it. The 0/1 knapsack
//! problem is the reference instance: one layer per item, one cell per
//! capacity budget.
//!
//! ## Core idea
//! 1. Model your recurrence as a sequence of frontiers (DP rows).
//! 2. Implement the [`LayeredProblem`] trait for that recurrence.
//! 3. Let [`LayeredEngine`] build the full table, only the optimal value in
//!    one row of memory, or an optimal path from √T checkpointed rows.
//!
//! ## Quick start
//! ```
//! let table = knap_dp::solve(&[1, 3, 4], &[15, 20, 30], 4).unwrap();
//! assert_eq!(table.optimal_value(), 35);
//! assert_eq!(table.row(0), Some(&[0, 15, 15, 15, 15][..]));
//!
//! let picked = knap_dp::select(&[1, 3, 4], &[15, 20, 30], 4).unwrap();
//! assert_eq!(picked.items, vec![0, 1]);
//! ```
//!
//! ## Features
//! - `parallel`: fill each knapsack row with rayon.
//! - `tracing`: spans around engine phases and events on rejected input.
//! - `serde`: `Serialize` for tables, items and selections.
//! - `cli`: the `knapsack` binary.

pub mod blocks;
pub mod builder;
pub mod engine;
pub mod error;
pub mod problems;
pub mod table;
pub mod traits;

pub use crate::builder::EngineBuilder;
pub use crate::engine::LayeredEngine;
pub use crate::error::{KnapsackError, KnapsackResult};
pub use crate::problems::knapsack::{
    max_value, select, solve, Item, KnapsackProblem, PathCell, Selection,
};
pub use crate::table::DpTable;
pub use crate::traits::LayeredProblem;
