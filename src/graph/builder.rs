//! Mutable sentence-graph builder.
//!
//! Nodes are labelled by sentence text; edges are undirected and weighted.
//! Self-loops are kept because self-similarity is part of the salience graph.

use rustc_hash::FxHashMap;

use super::similarity::SimilarityMatrix;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// Sentence text for this node
    pub label: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    label_to_id: FxHashMap<String, u32>,
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given label, returning its ID
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.label_to_id.insert(label.to_string(), id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Add `weight` to the undirected edge between two nodes.
    ///
    /// A self-loop is stored once.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if from != to {
            if let Some(node) = self.nodes.get_mut(to as usize) {
                *node.edges.entry(from).or_insert(0.0) += weight;
            }
        }
    }

    /// Build the similarity graph over `labels`.
    ///
    /// Node `i` is `labels[i]`; every positive entry of the upper triangle
    /// (diagonal included) becomes an edge. Non-positive similarities carry
    /// no edge.
    pub fn from_similarity(labels: &[String], matrix: &SimilarityMatrix) -> Self {
        debug_assert_eq!(labels.len(), matrix.size());
        let mut builder = Self::with_capacity(labels.len());
        let ids: Vec<u32> = labels.iter().map(|l| builder.get_or_create_node(l)).collect();

        for i in 0..matrix.size() {
            for j in i..matrix.size() {
                let weight = matrix.get(i, j);
                if weight > 0.0 {
                    builder.increment_edge(ids[i], ids[j], weight);
                }
            }
        }

        builder
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        let loops = self
            .nodes()
            .filter(|(id, n)| n.edges.contains_key(id))
            .count();
        let entries: usize = self.nodes.iter().map(|n| n.edges.len()).sum();
        (entries - loops) / 2 + loops
    }

    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    pub fn get_node_id(&self, label: &str) -> Option<u32> {
        self.label_to_id.get(label).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
