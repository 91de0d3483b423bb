//! Example: the classic three-item bag solved via the layered engine.
//!
//! Run with:
//! `cargo run --example bag`

use knap_dp::{solve, KnapsackError, KnapsackProblem};

fn main() -> Result<(), KnapsackError> {
    // weight 1 / value 15, weight 3 / value 20, weight 4 / value 30; bag of 4
    let weights = [1, 3, 4];
    let values = [15, 20, 30];
    let capacity = 4;

    let table = solve(&weights, &values, capacity)?;
    println!("DP table (rows = items, columns = capacity 0..={capacity}):");
    print!("{table}");
    println!("Best value: {}", table.optimal_value());

    let problem = KnapsackProblem::from_slices(&weights, &values, capacity)?;
    let picked = problem.select();
    println!("Chosen items:");
    for &i in &picked.items {
        let item = problem.items()[i];
        println!("  item {i}: weight {}, value {}", item.weight, item.value);
    }
    Ok(())
}
