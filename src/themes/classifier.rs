//! Keyword-based theme classification.
//!
//! Every keyword occurrence in the lowercased sentence adds one to its
//! theme's score. Keywords match as plain substrings, so `emission` also
//! counts inside `emissions`. The highest score wins; ties go to the theme
//! declared first, and a zero maximum falls back to [`Theme::Other`].

use crate::types::{Claim, ClassifiedClaim, Theme};

use super::keywords::keywords;

/// Keyword score of every scored theme, in declaration order.
pub fn score_themes(sentence: &str) -> [(Theme, usize); 6] {
    let text = sentence.to_lowercase();
    Theme::SCORED.map(|theme| {
        let score = keywords(theme)
            .iter()
            .map(|kw| text.matches(kw).count())
            .sum::<usize>();
        (theme, score)
    })
}

/// Assign the single best theme to a sentence.
pub fn classify_theme(sentence: &str) -> Theme {
    let mut best = (Theme::Other, 0);
    for (theme, score) in score_themes(sentence) {
        // strict comparison keeps the first-declared theme on ties
        if score > best.1 {
            best = (theme, score);
        }
    }
    best.0
}

/// Attach a theme to each claim, preserving order.
pub fn classify_claims(claims: &[Claim]) -> Vec<ClassifiedClaim> {
    claims
        .iter()
        .map(|claim| ClassifiedClaim {
            theme: classify_theme(&claim.sentence),
            claim: claim.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClaimType;

    #[test]
    fn test_highest_score_wins() {
        assert_eq!(
            classify_theme("We cut Scope 1 and Scope 2 emissions through solar power"),
            Theme::GhgEmissions
        );
        assert_eq!(
            classify_theme("Wastewater effluent quality improved"),
            Theme::WaterEffluents
        );
    }

    #[test]
    fn test_occurrences_are_counted() {
        let scores = score_themes("Water, water and more water");
        assert_eq!(scores[3], (Theme::WaterEffluents, 3));
    }

    #[test]
    fn test_substring_matching() {
        // "emissions" matches both "emission" and "emissions"
        let scores = score_themes("Emissions fell");
        assert_eq!(scores[1], (Theme::GhgEmissions, 2));
    }

    #[test]
    fn test_tie_goes_to_first_declared_theme() {
        // one climate keyword, one energy keyword
        assert_eq!(
            classify_theme("Climate goals guide our solar rollout"),
            Theme::ClimateChange
        );
        // one water keyword, one biodiversity keyword
        assert_eq!(
            classify_theme("Water restores the habitat"),
            Theme::WaterEffluents
        );
    }

    #[test]
    fn test_no_keyword_falls_back_to_other() {
        assert_eq!(classify_theme("Our people are our strength"), Theme::Other);
        assert_eq!(classify_theme(""), Theme::Other);
    }

    #[test]
    fn test_classify_claims_keeps_order_and_claim() {
        let claims = vec![
            Claim {
                sentence: "Landfill waste fell 20%".into(),
                confidence: 0.9,
                assertiveness_score: 0.74,
                claim_type: ClaimType::Performance,
            },
            Claim {
                sentence: "We value our staff".into(),
                confidence: 0.7,
                assertiveness_score: 0.62,
                claim_type: ClaimType::Qualitative,
            },
        ];
        let classified = classify_claims(&claims);
        assert_eq!(classified[0].theme, Theme::WasteCircularity);
        assert_eq!(classified[1].theme, Theme::Other);
        assert_eq!(classified[0].claim, claims[0]);
    }
}
