//! Standard PageRank algorithm
//!
//! Weighted power iteration with uniform teleport and dangling-node
//! redistribution. Iteration stops once the L1 change drops below
//! `tolerance * node_count`, or at the iteration cap.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardPageRank {
    pub damping: f64,
    pub max_iterations: usize,
    /// Per-node convergence tolerance
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl StandardPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();
        let teleport = (1.0 - self.damping) / n as f64;
        let threshold = self.tolerance * n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            new_scores.fill(teleport + self.damping * dangling_mass / n as f64);

            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);
                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] +=
                            self.damping * node_score * weight / total_weight;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);

            if delta < threshold {
                converged = true;
                break;
            }
        }

        // Already ~1; renormalize against drift.
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        PageRankResult::new(scores, iterations, delta, converged)
    }
}
