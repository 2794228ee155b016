// Sentiment Analysis module using lexicon-based approach
// Each lexicon word carries a polarity and a subjectivity; a text scores the mean over the
// words it contains, adjusted for intensifiers and nearby negations.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::tokenizer::{RegexTokenizer, Tokenizer};
use crate::config::{SENTIMENT_THRESHOLD_NEGATIVE, SENTIMENT_THRESHOLD_POSITIVE};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Positive above +0.1, Negative below -0.1, Neutral otherwise (both bounds exclusive).
    pub fn classify(polarity: f64) -> Self {
        if polarity > SENTIMENT_THRESHOLD_POSITIVE {
            SentimentLabel::Positive
        } else if polarity < SENTIMENT_THRESHOLD_NEGATIVE {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Negative to positive, in [-1, 1].
    pub polarity: f64,
    /// Factual to opinionated, in [0, 1].
    pub subjectivity: f64,
}

impl SentimentScore {
    pub const NEUTRAL: SentimentScore = SentimentScore {
        polarity: 0.0,
        subjectivity: 0.0,
    };
}

/// Anything that can turn text into polarity and subjectivity.
pub trait SentimentModel: Send + Sync {
    fn score(&self, text: &str) -> Result<SentimentScore>;
}

/// Classified sentiment of a whole text, with display percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub sentiment: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
    pub polarity_percentage: f64,
    pub subjectivity_percentage: f64,
}

impl From<SentimentScore> for Sentiment {
    fn from(score: SentimentScore) -> Self {
        Self {
            sentiment: SentimentLabel::classify(score.polarity),
            polarity: score.polarity,
            subjectivity: score.subjectivity,
            polarity_percentage: (score.polarity + 1.0) * 50.0,
            subjectivity_percentage: score.subjectivity * 100.0,
        }
    }
}

/// Polarity of one sentence; `sentence` is shortened for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSentiment {
    pub sentence: String,
    pub polarity: f64,
}

// (polarity, subjectivity)
static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        ("good", (0.7, 0.6)),
        ("great", (0.8, 0.75)),
        ("excellent", (1.0, 1.0)),
        ("wonderful", (1.0, 1.0)),
        ("fantastic", (0.4, 0.9)),
        ("amazing", (0.6, 0.9)),
        ("awesome", (1.0, 1.0)),
        ("love", (0.5, 0.6)),
        ("loved", (0.7, 0.8)),
        ("happy", (0.8, 1.0)),
        ("joy", (0.8, 0.9)),
        ("pleased", (0.5, 1.0)),
        ("delighted", (0.7, 1.0)),
        ("satisfied", (0.5, 1.0)),
        ("perfect", (1.0, 1.0)),
        ("beautiful", (0.85, 1.0)),
        ("brilliant", (0.9, 1.0)),
        ("outstanding", (0.5, 0.6)),
        ("superb", (1.0, 1.0)),
        ("impressive", (1.0, 1.0)),
        ("remarkable", (0.75, 0.75)),
        ("best", (1.0, 0.3)),
        ("better", (0.5, 0.5)),
        ("positive", (0.23, 0.55)),
        ("success", (0.3, 0.5)),
        ("successful", (0.75, 0.95)),
        ("win", (0.8, 0.4)),
        ("winning", (0.5, 0.75)),
        ("enjoy", (0.4, 0.5)),
        ("pleasant", (0.73, 0.97)),
        ("comfortable", (0.4, 0.7)),
        ("excited", (0.38, 0.75)),
        ("exciting", (0.3, 0.8)),
        ("thrilled", (0.6, 0.8)),
        ("bright", (0.7, 0.75)),
        ("powerful", (0.3, 1.0)),
        ("strong", (0.43, 0.73)),
        ("hopeful", (0.5, 0.8)),
        ("promising", (0.5, 0.7)),
        ("innovative", (0.5, 0.6)),
        ("nice", (0.6, 1.0)),
        ("easy", (0.43, 0.83)),
        ("helpful", (0.5, 0.5)),
        ("favorite", (0.5, 1.0)),
        ("recovery", (0.2, 0.3)),
        ("growth", (0.2, 0.2)),
        ("gain", (0.3, 0.3)),
        ("gains", (0.3, 0.3)),
        ("bad", (-0.7, 0.67)),
        ("terrible", (-1.0, 1.0)),
        ("awful", (-1.0, 1.0)),
        ("horrible", (-1.0, 1.0)),
        ("poor", (-0.4, 0.6)),
        ("worst", (-1.0, 1.0)),
        ("worse", (-0.4, 0.6)),
        ("hate", (-0.8, 0.9)),
        ("angry", (-0.5, 1.0)),
        ("sad", (-0.5, 1.0)),
        ("upset", (-0.4, 0.7)),
        ("disappointed", (-0.75, 0.75)),
        ("disappointing", (-0.6, 0.7)),
        ("unhappy", (-0.6, 0.9)),
        ("fail", (-0.5, 0.3)),
        ("failed", (-0.5, 0.3)),
        ("failure", (-0.32, 0.3)),
        ("problem", (-0.2, 0.3)),
        ("wrong", (-0.5, 0.9)),
        ("difficult", (-0.5, 1.0)),
        ("hard", (-0.29, 0.54)),
        ("tough", (-0.39, 0.83)),
        ("broken", (-0.4, 0.4)),
        ("painful", (-0.7, 0.9)),
        ("dangerous", (-0.6, 0.9)),
        ("disaster", (-0.8, 0.6)),
        ("crisis", (-0.4, 0.4)),
        ("negative", (-0.3, 0.4)),
        ("loss", (-0.3, 0.3)),
        ("losses", (-0.3, 0.3)),
        ("lost", (-0.3, 0.3)),
        ("decline", (-0.3, 0.3)),
        ("fear", (-0.4, 0.6)),
        ("worried", (-0.4, 0.7)),
        ("concern", (-0.1, 0.3)),
        ("unpleasant", (-0.6, 0.9)),
        ("frustrating", (-0.4, 0.7)),
        ("frustrated", (-0.7, 0.7)),
        ("ugly", (-0.7, 1.0)),
        ("boring", (-1.0, 1.0)),
        ("weak", (-0.38, 0.63)),
        ("slow", (-0.3, 0.4)),
        ("violent", (-0.8, 0.9)),
        ("deadly", (-0.2, 0.5)),
        ("corrupt", (-0.5, 0.5)),
    ]
    .iter()
    .copied()
    .collect()
});

// Multiplier applied to the following lexicon word.
static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("extremely", 1.5),
        ("absolutely", 1.4),
        ("really", 1.2),
        ("incredibly", 1.4),
        ("highly", 1.3),
        ("totally", 1.3),
        ("so", 1.2),
    ]
    .iter()
    .copied()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "nothing", "nobody", "neither", "nor", "none", "cannot",
        "isn't", "wasn't", "aren't", "don't", "doesn't", "didn't", "won't", "can't",
    ]
    .iter()
    .copied()
    .collect()
});

/// Default in-process sentiment model backed by a fixed lexicon.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentimentModel {
    tokenizer: RegexTokenizer,
}

impl LexiconSentimentModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SentimentModel for LexiconSentimentModel {
    fn score(&self, text: &str) -> Result<SentimentScore> {
        let lowered = text.to_lowercase();
        let words = self.tokenizer.split_words(&lowered);

        let mut matched: Vec<(f64, f64)> = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let (mut polarity, mut subjectivity) = match LEXICON.get(*word) {
                Some(&entry) => entry,
                None => continue,
            };

            if i > 0 {
                if let Some(&m) = INTENSIFIERS.get(words[i - 1]) {
                    polarity = (polarity * m).clamp(-1.0, 1.0);
                    subjectivity = (subjectivity * m).clamp(0.0, 1.0);
                }
            }

            // Check for negation in previous 1-2 words
            let negated = (i > 0 && NEGATIONS.contains(words[i - 1]))
                || (i > 1 && NEGATIONS.contains(words[i - 2]));
            if negated {
                polarity *= -0.5;
            }

            matched.push((polarity, subjectivity));
        }

        if matched.is_empty() {
            return Ok(SentimentScore::NEUTRAL);
        }

        let n = matched.len() as f64;
        let polarity = matched.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = matched.iter().map(|(_, s)| s).sum::<f64>() / n;

        Ok(SentimentScore {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        })
    }
}

/// First `max_chars` characters of `sentence`, with "..." appended when it was cut.
pub fn preview(sentence: &str, max_chars: usize) -> String {
    match sentence.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &sentence[..cut]),
        None => sentence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> SentimentLabel {
        let score = LexiconSentimentModel::new().score(text).unwrap();
        SentimentLabel::classify(score.polarity)
    }

    #[test]
    fn test_analyze_sentiment_positive() {
        assert_eq!(
            label("This is a wonderful day! I'm feeling great and happy!"),
            SentimentLabel::Positive
        );
    }

    #[test]
    fn test_analyze_sentiment_negative() {
        assert_eq!(
            label("This is terrible and awful. I hate it!"),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn test_analyze_sentiment_neutral() {
        let score = LexiconSentimentModel::new()
            .score("The sky is blue. The grass is green.")
            .unwrap();
        assert_eq!(score, SentimentScore::NEUTRAL);
        assert_eq!(SentimentLabel::classify(score.polarity), SentimentLabel::Neutral);
    }

    #[test]
    fn test_negation_handling() {
        let score = LexiconSentimentModel::new()
            .score("This is not good at all.")
            .unwrap();
        assert!((score.polarity - (-0.35)).abs() < 1e-9);
        assert_eq!(SentimentLabel::classify(score.polarity), SentimentLabel::Negative);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let model = LexiconSentimentModel::new();
        let plain = model.score("The results were good.").unwrap();
        let strong = model.score("The results were very good.").unwrap();
        assert!(strong.polarity > plain.polarity);
        assert!(strong.polarity <= 1.0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let model = LexiconSentimentModel::new();
        let score = model
            .score("Extremely perfect, absolutely superb, incredibly brilliant!")
            .unwrap();
        assert!((-1.0..=1.0).contains(&score.polarity));
        assert!((0.0..=1.0).contains(&score.subjectivity));
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(SentimentLabel::classify(0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(0.5), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify(-0.3), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::classify(0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(-0.1), SentimentLabel::Neutral);
    }

    #[test]
    fn test_percentages() {
        let s = Sentiment::from(SentimentScore {
            polarity: -0.5,
            subjectivity: 0.25,
        });
        assert_eq!(s.sentiment, SentimentLabel::Negative);
        assert_eq!(s.polarity_percentage, 25.0);
        assert_eq!(s.subjectivity_percentage, 25.0);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 100), "short");
        let long = "é".repeat(120);
        let p = preview(&long, 100);
        assert_eq!(p.chars().count(), 103);
        assert!(p.ends_with("..."));
        assert_eq!(preview(&"a".repeat(100), 100), "a".repeat(100));
    }

    #[test]
    fn test_label_serializes_as_name() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"Positive\"");
    }
}
