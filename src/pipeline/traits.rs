//! Capability traits consumed by the pipeline.
//!
//! Each trait is one boundary to an external collaborator: the pretrained
//! claim classifier, the sentence embedder behind salience ranking, the
//! LLM-backed theme evaluator and the company profile lookup. The pipeline
//! is generic over these, so any backend can be swapped in without touching
//! stage logic.
//!
//! # Contract
//!
//! - Calls are synchronous and blocking.
//! - Implementations must be deterministic for a fixed model snapshot.
//! - Failures are reported as [`CapabilityError`]; the pipeline excludes the
//!   affected sentence or theme and keeps going.
//!
//! Wrap an implementation in [`Deadline`] to bound each call.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::CapabilityError;
use crate::session::CompanyProfile;
use crate::summarizer::unit_vector::UnitVector;

// ============================================================================
// Claim classifier
// ============================================================================

/// Output of the claim classifier for one sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub is_claim: bool,
    /// Probability of the claim class, expected in [0, 1].
    pub probability: f64,
}

/// Binary "is this a claim" classifier.
pub trait ClaimClassifier {
    fn classify(&self, sentence: &str) -> Result<Classification, CapabilityError>;
}

impl<T: ClaimClassifier + ?Sized> ClaimClassifier for Box<T> {
    fn classify(&self, sentence: &str) -> Result<Classification, CapabilityError> {
        (**self).classify(sentence)
    }
}

impl<T: ClaimClassifier + ?Sized> ClaimClassifier for Arc<T> {
    fn classify(&self, sentence: &str) -> Result<Classification, CapabilityError> {
        (**self).classify(sentence)
    }
}

// ============================================================================
// Sentence embedder
// ============================================================================

/// Maps a sentence to a vector for similarity comparisons.
pub trait SentenceEmbedder {
    fn embed(&self, sentence: &str) -> Result<UnitVector, CapabilityError>;
}

impl<T: SentenceEmbedder + ?Sized> SentenceEmbedder for Box<T> {
    fn embed(&self, sentence: &str) -> Result<UnitVector, CapabilityError> {
        (**self).embed(sentence)
    }
}

// ============================================================================
// Theme evaluator
// ============================================================================

/// Score and two-line narrative for one theme's top claims.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeEvaluation {
    /// Expected in [0, 1].
    pub score: f64,
    /// Expected to hold exactly two lines.
    pub summary: Vec<String>,
}

/// External (LLM-backed) evaluation of a theme's claims.
pub trait ThemeEvaluator {
    fn score_theme(&self, claim_sentences: &[String]) -> Result<ThemeEvaluation, CapabilityError>;
}

impl<T: ThemeEvaluator + ?Sized> ThemeEvaluator for Box<T> {
    fn score_theme(&self, claim_sentences: &[String]) -> Result<ThemeEvaluation, CapabilityError> {
        (**self).score_theme(claim_sentences)
    }
}

// ============================================================================
// Company profile source
// ============================================================================

/// External lookup of a company's published ESG profile.
pub trait CompanyProfileSource {
    fn lookup(&self, company: &str) -> Result<CompanyProfile, CapabilityError>;
}

// ============================================================================
// Deadline: per-call timeout wrapper
// ============================================================================

/// Bounds every call of the wrapped capability by `timeout`.
///
/// The call runs on a worker thread; if it does not answer in time the
/// caller gets [`CapabilityError::Timeout`] and the worker is abandoned.
#[derive(Debug)]
pub struct Deadline<C> {
    inner: Arc<C>,
    timeout: Duration,
}

impl<C> Clone for Deadline<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            timeout: self.timeout,
        }
    }
}

impl<C: Send + Sync + 'static> Deadline<C> {
    pub fn new(inner: C, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn call<T, F>(&self, capability: &'static str, f: F) -> Result<T, CapabilityError>
    where
        T: Send + 'static,
        F: FnOnce(&C) -> Result<T, CapabilityError> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name(format!("{capability}-call"))
            .spawn(move || {
                // The receiver may already be gone after a timeout.
                let _ = tx.send(f(&inner));
            })
            .map_err(|e| CapabilityError::failed(capability, e.to_string()))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(CapabilityError::Timeout {
                capability,
                timeout: self.timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(CapabilityError::failed(
                capability,
                "worker exited without a result",
            )),
        }
    }
}

impl<C: ClaimClassifier + Send + Sync + 'static> ClaimClassifier for Deadline<C> {
    fn classify(&self, sentence: &str) -> Result<Classification, CapabilityError> {
        let sentence = sentence.to_string();
        self.call("claim_classifier", move |c| c.classify(&sentence))
    }
}

impl<C: ThemeEvaluator + Send + Sync + 'static> ThemeEvaluator for Deadline<C> {
    fn score_theme(&self, claim_sentences: &[String]) -> Result<ThemeEvaluation, CapabilityError> {
        let claims = claim_sentences.to_vec();
        self.call("theme_evaluator", move |c| c.score_theme(&claims))
    }
}

impl<C: CompanyProfileSource + Send + Sync + 'static> CompanyProfileSource for Deadline<C> {
    fn lookup(&self, company: &str) -> Result<CompanyProfile, CapabilityError> {
        let company = company.to_string();
        self.call("company_profile_source", move |c| c.lookup(&company))
    }
}
