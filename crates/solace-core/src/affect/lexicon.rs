//! Lexicon/rule-based sentiment scoring.
//!
//! Produces a compound polarity score in `[-1, 1]` from a valence table,
//! with negation flipping and booster amplification, normalized the usual
//! `s / sqrt(s^2 + alpha)` way. Any scorer honoring the same contract can
//! replace the bundled one.

/// Produces a compound sentiment score for a piece of text.
pub trait SentimentScorer: Send + Sync {
    /// Scores `text` into `[-1, 1]`; 0.0 for text with no signal.
    fn score(&self, text: &str) -> f64;
}

/// Word valences. Positive values lean pleasant, negative unpleasant.
const VALENCE_TABLE: &[(&str, f64)] = &[
    // pleasant
    ("happy", 2.7),
    ("happiness", 2.6),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("great", 3.1),
    ("good", 1.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("wonderful", 2.7),
    ("amazing", 2.8),
    ("excellent", 2.7),
    ("awesome", 3.1),
    ("fantastic", 2.6),
    ("calm", 1.3),
    ("calmer", 1.4),
    ("peaceful", 1.9),
    ("peace", 1.8),
    ("relaxed", 1.8),
    ("relax", 1.6),
    ("fine", 1.2),
    ("okay", 0.9),
    ("ok", 0.9),
    ("content", 1.7),
    ("grateful", 2.3),
    ("thankful", 2.2),
    ("excited", 2.2),
    ("hopeful", 1.9),
    ("hope", 1.4),
    ("better", 1.9),
    ("best", 3.2),
    ("smile", 1.5),
    ("enjoy", 2.0),
    ("enjoyed", 2.1),
    ("proud", 2.1),
    ("energized", 1.9),
    ("rested", 1.5),
    ("motivated", 1.9),
    // unpleasant
    ("sad", -2.1),
    ("sadness", -2.0),
    ("unhappy", -1.8),
    ("depressed", -2.7),
    ("depressing", -2.4),
    ("anxious", -1.9),
    ("anxiety", -1.8),
    ("worried", -1.6),
    ("worry", -1.5),
    ("stress", -1.7),
    ("stressed", -1.9),
    ("stressful", -1.8),
    ("afraid", -2.0),
    ("scared", -2.0),
    ("fear", -1.9),
    ("angry", -2.3),
    ("anger", -2.2),
    ("furious", -2.6),
    ("hate", -2.7),
    ("hated", -2.5),
    ("terrible", -2.6),
    ("awful", -2.5),
    ("horrible", -2.7),
    ("hopeless", -2.5),
    ("worthless", -2.5),
    ("useless", -2.1),
    ("lonely", -2.0),
    ("alone", -1.2),
    ("tired", -1.2),
    ("exhausted", -1.5),
    ("overwhelmed", -1.9),
    ("miserable", -2.6),
    ("cry", -1.9),
    ("crying", -2.0),
    ("hurt", -1.9),
    ("hurts", -1.9),
    ("upset", -1.8),
    ("bad", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("panic", -2.1),
    ("grief", -2.4),
    ("pain", -1.9),
    ("painful", -2.0),
    ("suicidal", -3.2),
    ("fail", -2.0),
    ("failed", -2.1),
    ("failure", -2.2),
];

/// Intensity boosters; each adds a fixed bump toward the valence sign of
/// the word it precedes.
const BOOSTERS: &[&str] = &[
    "so",
    "very",
    "really",
    "extremely",
    "absolutely",
    "incredibly",
    "totally",
    "deeply",
];

/// Negations flip and dampen the valence of the word they precede.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "isnt", "arent", "dont", "doesnt", "didnt", "cant", "cannot", "wont",
    "wouldnt", "couldnt",
];

const BOOST_INCREMENT: f64 = 0.3;
const NEGATION_FACTOR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// The bundled lexicon scorer.
#[derive(Debug, Default, Clone)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    fn valence_of(token: &str) -> Option<f64> {
        VALENCE_TABLE
            .iter()
            .find(|(word, _)| *word == token)
            .map(|(_, valence)| *valence)
    }

    /// Lowercases and strips punctuation; apostrophes are dropped so
    /// contractions match the negation list ("can't" -> "cant").
    fn tokenize(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|raw| {
                raw.chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|token| !token.is_empty())
            .collect()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut sum = 0.0;
        for (index, token) in tokens.iter().enumerate() {
            let Some(mut valence) = Self::valence_of(token) else {
                continue;
            };

            if index > 0 {
                let previous = tokens[index - 1].as_str();
                if BOOSTERS.contains(&previous) {
                    valence += BOOST_INCREMENT * valence.signum();
                }
                if NEGATIONS.contains(&previous) {
                    valence *= NEGATION_FACTOR;
                }
            }

            sum += valence;
        }

        let compound = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
        compound.clamp(-1.0, 1.0)
    }
}
