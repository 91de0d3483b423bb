//! Problem implementations for the layered engine.
//!
//! - [`knapsack`]: 0/1 knapsack, one layer per item.

pub mod knapsack;
