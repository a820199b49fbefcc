//! jsondb Benchmark Library
//!
//! Data generators and collection factories shared by the criterion benches.

pub mod config;
pub mod data_gen;
pub mod stores;
