//! Sentence-similarity graph
//!
//! A theme's claims become nodes; pairwise cosine similarities become
//! undirected weighted edges stored in CSR form for PageRank.

pub mod builder;
pub mod csr;
pub mod similarity;

pub use builder::GraphBuilder;
pub use csr::CsrGraph;
pub use similarity::SimilarityMatrix;
