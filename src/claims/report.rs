//! Document-level assertiveness summary over the annotated claims.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{round_to, Claim, ClaimType};

/// Count of claims per [`ClaimType`], serialized with every type present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimTypeDistribution {
    pub performance: usize,
    pub future: usize,
    pub qualitative: usize,
}

impl ClaimTypeDistribution {
    fn record(&mut self, claim_type: ClaimType) {
        match claim_type {
            ClaimType::Performance => self.performance += 1,
            ClaimType::Future => self.future += 1,
            ClaimType::Qualitative => self.qualitative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.performance + self.future + self.qualitative
    }

    /// The distribution as a `type -> count` map.
    pub fn as_map(&self) -> BTreeMap<&'static str, usize> {
        BTreeMap::from([
            (ClaimType::Performance.as_str(), self.performance),
            (ClaimType::Future.as_str(), self.future),
            (ClaimType::Qualitative.as_str(), self.qualitative),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertivenessReport {
    pub total_claims: usize,
    pub claim_type_distribution: ClaimTypeDistribution,
    /// Mean assertiveness, rounded to 3 decimals.
    pub average_assertiveness_score: f64,
}

impl AssertivenessReport {
    /// Summarize `claims`. Returns `None` when there is nothing to summarize.
    pub fn from_claims(claims: &[Claim]) -> Option<Self> {
        if claims.is_empty() {
            return None;
        }

        let mut distribution = ClaimTypeDistribution::default();
        let mut total_score = 0.0;
        for claim in claims {
            distribution.record(claim.claim_type);
            total_score += claim.assertiveness_score;
        }

        Some(Self {
            total_claims: claims.len(),
            claim_type_distribution: distribution,
            average_assertiveness_score: round_to(total_score / claims.len() as f64, 3),
        })
    }
}
