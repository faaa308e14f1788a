use crate::product::ParameterTuple;
use chrono::Local;
use std::time::Duration;

/// Helper function for displaying the greeting data for the sweep
pub fn show_greeting(target: &str, num_tuples: usize, repeat: usize) {
    println!("\n# Sweep");
    println!("- Started: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("- Target: {target}");
    println!("- Combinations: {num_tuples}");
    println!("- Repetitions: {repeat}\n");
}

pub fn output_file_line(path: &str) {
    println!("Writing results to {path}\n");
}

/// Helper function for displaying the tuple that is about to be run
pub fn tuple_progress(tuple: &ParameterTuple) {
    println!("Running {}", tuple.join(","));
}

/// Helper function for displaying the sweep totals once every tuple
/// was handled
pub fn show_farewell(num_tuples: usize, num_rows: usize, time: Duration) {
    println!("\nCombinations: {num_tuples}");
    println!("Rows written: {num_rows}");
    println!("Sweep time: {:.2} s", time.as_millis() as f64 / 1000.0)
}
