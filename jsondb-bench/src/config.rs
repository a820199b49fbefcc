//! Benchmark configuration

use std::path::PathBuf;

/// Where a benchmarked collection lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// No backing file
    InMemory,
    /// Backed by a JSON file, saving after every mutation
    File,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::InMemory => write!(f, "inmemory"),
            StoreType::File => write!(f, "file"),
        }
    }
}

/// Configuration for benchmark runs
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Directory for collection files
    pub base_path: PathBuf,
    /// Document counts to benchmark
    pub document_counts: Vec<usize>,
    /// Store types to benchmark
    pub store_types: Vec<StoreType>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            base_path: std::env::temp_dir().join("jsondb-bench"),
            document_counts: vec![100, 1_000, 10_000],
            store_types: vec![StoreType::InMemory, StoreType::File],
        }
    }
}

impl BenchmarkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick config with smaller document counts for fast testing
    pub fn quick() -> Self {
        Self {
            document_counts: vec![100, 1_000],
            ..Default::default()
        }
    }
}
