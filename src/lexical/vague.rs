//! Vague and euphemistic language density.

use once_cell::sync::Lazy;
use regex::Regex;

use super::phrase_regex;
use crate::types::{round_to, VagueScore};

/// Density multiplier: a 2% vague-term density saturates the 0..=100 scale.
pub const DENSITY_MULTIPLIER: f64 = 5000.0;

/// Feel-good and greenwashing-prone phrases.
pub const VAGUE_TERMS: &[&str] = &[
    // General feel-good terms
    "eco-friendly", "environmentally friendly", "green", "sustainable",
    "responsible", "clean", "ethical", "planet-friendly", "earth-friendly",
    "nature-friendly", "climate-friendly", "environmentally conscious",
    "eco-conscious", "green-minded", "green living", "green choice",
    // Carbon and climate buzzwords
    "net zero", "net-zero", "carbon neutral", "carbon-neutral",
    "climate positive", "carbon positive", "carbon conscious",
    "low carbon", "reduced carbon footprint", "lower emissions",
    "emissions reduction", "carbon offset", "offsetting emissions",
    "climate smart", "climate aligned", "climate responsible",
    // Sustainability and responsibility
    "sustainably sourced", "responsibly sourced", "responsible sourcing",
    "sustainable growth", "sustainable future", "long-term sustainability",
    "sustainability driven", "sustainability focused", "future-ready",
    "regenerative", "regenerative practices", "positive impact",
    // Circular economy and materials
    "circular", "circular economy", "closing the loop",
    "recyclable", "recycled", "recyclable materials",
    "eco materials", "green materials", "renewable materials",
    "resource efficient", "waste reduction", "zero waste",
    "less waste", "waste conscious",
    // Energy and resources
    "clean energy", "renewable energy", "green energy",
    "energy efficient", "energy efficiency",
    "low energy", "reduced energy use",
    "resource positive", "resource conscious",
    // Social and ethical
    "ethical sourcing", "fair practices", "fair trade inspired",
    "socially responsible", "community focused",
    "inclusive growth", "equitable practices",
    // Corporate marketing language
    "committed to sustainability", "driving change",
    "leading the transition", "doing our part",
    "making a difference", "purpose driven",
    "values led", "impact driven", "responsible business",
    "better for the planet", "better tomorrow",
    "positive change", "greener future",
    // Nature and biodiversity
    "nature positive", "biodiversity friendly",
    "protecting nature", "supporting ecosystems",
    "nature conscious", "environmental stewardship",
    // Open-ended timelines and intent
    "working towards", "aiming to reduce",
    "on a journey", "aspire to", "moving forward",
    "continuous improvement",
];

static VAGUE_MATCHERS: Lazy<Vec<Regex>> =
    Lazy::new(|| VAGUE_TERMS.iter().map(|t| phrase_regex(t)).collect());

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("static regex"));

/// Count vague-phrase occurrences and derive the density score.
///
/// Each phrase is counted on its own, so overlapping phrases ("green" inside
/// "green energy") both contribute.
pub fn vague_words_score(text: &str) -> VagueScore {
    let lowered = text.to_lowercase();
    let total_words = WORD.find_iter(&lowered).count();

    let vague_terms_found: usize = VAGUE_MATCHERS
        .iter()
        .map(|re| re.find_iter(&lowered).count())
        .sum();

    let density = vague_terms_found as f64 / total_words.max(1) as f64;
    let score = (density * DENSITY_MULTIPLIER).round().min(100.0);

    VagueScore {
        vague_terms_found,
        total_words,
        vague_density: round_to(density, 5),
        vague_words_score: score as u32,
    }
}
