//! Frozen sentence-similarity graph in compressed sparse row layout.
//!
//! Built once per theme from a [`GraphBuilder`] and then only read by the
//! PageRank power iteration, which walks each node's outgoing edges.

use super::builder::GraphBuilder;

/// Sentence graph with edges packed per node.
///
/// Node `i` owns edge slots `offsets[i]..offsets[i + 1]`. Within a node the
/// slots are sorted by target, so every weighted sum over them runs in the
/// same order on every run.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    pub num_nodes: usize,
    offsets: Vec<usize>,
    targets: Vec<u32>,
    weights: Vec<f64>,
    /// Sum of each node's edge weights, self-loop counted once.
    strength: Vec<f64>,
    /// Sentence text per node.
    labels: Vec<String>,
}

impl CsrGraph {
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut graph = Self {
            num_nodes,
            offsets: Vec::with_capacity(num_nodes + 1),
            targets: Vec::new(),
            weights: Vec::new(),
            strength: Vec::with_capacity(num_nodes),
            labels: Vec::with_capacity(num_nodes),
        };
        graph.offsets.push(0);

        for (_, node) in builder.nodes() {
            let mut edges: Vec<(u32, f64)> = node.edges.iter().map(|(&t, &w)| (t, w)).collect();
            edges.sort_by_key(|&(t, _)| t);

            graph.labels.push(node.label.clone());
            graph.strength.push(edges.iter().map(|&(_, w)| w).sum());
            for (target, weight) in edges {
                graph.targets.push(target);
                graph.weights.push(weight);
            }
            graph.offsets.push(graph.targets.len());
        }

        graph
    }

    /// Outgoing `(target, weight)` pairs of `node`, by ascending target.
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let slots = self.offsets[node as usize]..self.offsets[node as usize + 1];
        slots.map(move |i| (self.targets[i], self.weights[i]))
    }

    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.strength[node as usize]
    }

    pub fn label(&self, node: u32) -> &str {
        &self.labels[node as usize]
    }

    /// Stored edge slots; an undirected edge fills two, a self-loop one.
    pub fn num_edges(&self) -> usize {
        self.targets.len()
    }

    /// Nodes whose rank mass has nowhere to flow.
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.strength[n as usize] <= 0.0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::from_builder(&GraphBuilder::new())
    }
}
