//! PageRank over the sentence-similarity graph.

pub mod standard;

pub use standard::StandardPageRank;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID), summing to 1
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// Final L1 change between the last two iterations
    pub delta: f64,
    pub converged: bool,
}

impl PageRankResult {
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Score of a node, 0 for unknown nodes
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}
