//! Salience ranking of a theme's claims.
//!
//! Embed every sentence, build the all-pairs cosine graph (self-similarity
//! included), run PageRank and report one rounded score per sentence.

use tracing::{debug, warn};

use crate::error::CapabilityError;
use crate::graph::{CsrGraph, GraphBuilder, SimilarityMatrix};
use crate::pagerank::StandardPageRank;
use crate::pipeline::traits::SentenceEmbedder;
use crate::summarizer::unit_vector::LexicalEmbedder;
use crate::types::{round_to, SalienceScores};

/// Decimal places of emitted salience scores.
pub const SALIENCE_DECIMALS: i32 = 4;

/// Ranks sentences by centrality in their similarity graph.
#[derive(Debug, Clone)]
pub struct SalienceRanker<E = LexicalEmbedder> {
    embedder: E,
    pagerank: StandardPageRank,
}

impl Default for SalienceRanker<LexicalEmbedder> {
    fn default() -> Self {
        Self::new(LexicalEmbedder::default())
    }
}

impl<E: SentenceEmbedder> SalienceRanker<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            pagerank: StandardPageRank::default(),
        }
    }

    pub fn with_pagerank(mut self, pagerank: StandardPageRank) -> Self {
        self.pagerank = pagerank;
        self
    }

    pub fn pagerank(&self) -> &StandardPageRank {
        &self.pagerank
    }

    /// Score `sentences`, returning `sentence -> salience` in input order.
    ///
    /// Fewer than two sentences have no comparative ranking and yield an
    /// empty map. An embedding failure fails the whole theme.
    pub fn rank(&self, sentences: &[String]) -> Result<SalienceScores, CapabilityError> {
        if sentences.len() < 2 {
            return Ok(SalienceScores::new());
        }

        let vectors = sentences
            .iter()
            .map(|s| self.embedder.embed(s))
            .collect::<Result<Vec<_>, _>>()?;

        let matrix = SimilarityMatrix::from_vectors(&vectors);
        let graph = CsrGraph::from_builder(&GraphBuilder::from_similarity(sentences, &matrix));
        let result = self.pagerank.run(&graph);

        if result.converged {
            debug!(
                nodes = graph.num_nodes,
                edges = graph.num_edges(),
                iterations = result.iterations,
                "salience converged"
            );
        } else {
            warn!(
                nodes = graph.num_nodes,
                iterations = result.iterations,
                delta = result.delta,
                "salience did not converge; using last iterate"
            );
        }

        Ok((0..graph.num_nodes as u32)
            .map(|node| {
                (
                    graph.label(node).to_string(),
                    round_to(result.score(node), SALIENCE_DECIMALS),
                )
            })
            .collect())
    }
}
