//! Time a full dataset load.
//!
//! Run with: cargo run --example benchmark_load -p data-loader -- <data-dir>
//! The directory defaults to the current one.

use data_loader::Dataset;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let data_dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("Loading Book-Crossing dataset from {}...\n", data_dir.display());

    let start = Instant::now();
    let dataset = Dataset::load_from_dir(&data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let stats = dataset.stats();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Books: {}", stats.books);
    println!("Ratings: {}", stats.ratings);
    println!("Users: {}", stats.users);
    println!("Dangling ratings: {}", stats.dangling_ratings);
    println!("\nPerformance: {:.0} ratings/second",
             stats.ratings as f64 / elapsed.as_secs_f64());
}
