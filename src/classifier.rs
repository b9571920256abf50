//! Keyword-based emotional text classifier.
//!
//! Scores free text against the emotion lexicon and produces the full
//! analysis record: primary/secondary/composite emotions, sentiment,
//! valence, subjectivity, and the matched keywords. The classifier is a
//! pure function of its input text (plus a timestamp); it never fails,
//! degrading to a neutral low-signal result on empty input.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::emotion::{CompositeEmotion, CompositeKind, Emotion, Sentiment};
use crate::lexicon::{EmotionLexicon, ModifierTracker};

/// Confidence reported when the text carries no emotional signal.
const NO_SIGNAL_CONFIDENCE: f64 = 50.0;

/// Signed per-emotion score accumulator for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    /// Accumulated joy score.
    pub joy: f64,
    /// Accumulated sadness score.
    pub sadness: f64,
    /// Accumulated anger score.
    pub anger: f64,
    /// Accumulated fear score.
    pub fear: f64,
    /// Accumulated surprise score.
    pub surprise: f64,
    /// Accumulated fatigue score.
    pub fatigue: f64,
    /// Accumulated disgust score.
    pub disgust: f64,
}

impl EmotionScores {
    /// Returns the score for one emotion.
    #[must_use]
    pub const fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Fatigue => self.fatigue,
            Emotion::Disgust => self.disgust,
        }
    }

    /// Adds a signed delta to one emotion's score.
    pub fn add(&mut self, emotion: Emotion, delta: f64) {
        match emotion {
            Emotion::Joy => self.joy += delta,
            Emotion::Sadness => self.sadness += delta,
            Emotion::Anger => self.anger += delta,
            Emotion::Fear => self.fear += delta,
            Emotion::Surprise => self.surprise += delta,
            Emotion::Fatigue => self.fatigue += delta,
            Emotion::Disgust => self.disgust += delta,
        }
    }

    /// Sum of absolute scores across all emotions.
    #[must_use]
    pub fn total_magnitude(&self) -> f64 {
        Emotion::ALL.iter().map(|&e| self.get(e).abs()).sum()
    }

    /// Signed sum of the positive-valence emotions (joy, surprise).
    #[must_use]
    pub fn positive_sum(&self) -> f64 {
        self.joy + self.surprise
    }

    /// Signed sum of the negative-valence emotions (sadness, anger, fear,
    /// disgust). Fatigue is excluded from valence by design.
    #[must_use]
    pub fn negative_sum(&self) -> f64 {
        self.sadness + self.anger + self.fear + self.disgust
    }

    /// Emotions ranked by score, descending; ties keep canonical order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(Emotion, f64)> {
        let mut entries: Vec<(Emotion, f64)> =
            Emotion::ALL.iter().map(|&e| (e, self.get(e))).collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }
}

/// A runner-up emotion with its relative intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondaryEmotion {
    /// The emotion label.
    pub emotion: Emotion,

    /// Intensity relative to the total score, in [0, 100].
    pub intensity: f64,
}

/// Complete classifier output for one text.
///
/// Created once per analyzed text and immutable afterwards; consumed by
/// the explainability composer and the graph builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalAnalysis {
    /// Highest-scoring emotion; joy when every score is zero.
    pub primary_emotion: Emotion,

    /// Share of the primary score in the total, in [0, 100], rounded.
    /// 50 when the text carries no signal.
    pub confidence: f64,

    /// Up to three runner-up emotions with positive scores.
    pub secondary_emotions: Vec<SecondaryEmotion>,

    /// Derived composite emotions present in this text.
    pub composite_emotions: Vec<CompositeEmotion>,

    /// Sentiment label derived from the valence.
    pub sentiment: Sentiment,

    /// Density of emotional keywords, in [0, 1].
    pub subjectivity: f64,

    /// Signed valence of the text, in [-1, 1].
    pub emotional_valence: f64,

    /// Matched lexicon keywords, deduplicated in detection order.
    pub keywords: Vec<String>,

    /// Raw per-emotion score accumulator.
    pub scores: EmotionScores,

    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,
}

impl EmotionalAnalysis {
    /// Every emotion label this analysis surfaced: the primary, the
    /// secondaries, and the composites, deduplicated in that order.
    ///
    /// This is the label set the graph builder turns into emotion nodes.
    #[must_use]
    pub fn emotion_labels(&self) -> Vec<String> {
        let mut labels = vec![self.primary_emotion.label().to_string()];
        for secondary in &self.secondary_emotions {
            let label = secondary.emotion.label().to_string();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        for composite in &self.composite_emotions {
            let label = composite.kind.label().to_string();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}

/// Analyzes a text against the lexicon, timestamped with the current time.
///
/// # Examples
///
/// ```
/// use nostra_insight::{analyze_text, Emotion, EmotionLexicon, Sentiment};
///
/// let lexicon = EmotionLexicon::new();
/// let analysis = analyze_text(&lexicon, "I feel very happy today, great meeting");
/// assert_eq!(analysis.primary_emotion, Emotion::Joy);
/// assert_eq!(analysis.sentiment, Sentiment::Positive);
/// assert!(analysis.confidence > 50.0);
/// ```
#[must_use]
pub fn analyze_text(lexicon: &EmotionLexicon, text: &str) -> EmotionalAnalysis {
    analyze_text_at(lexicon, text, Utc::now())
}

/// Analyzes a text against the lexicon with an explicit timestamp.
///
/// The scan walks words in order, carrying one-shot negation and
/// intensifier state; each word scores at most one emotion (the first
/// lexicon match), which consumes any armed modifier.
#[must_use]
pub fn analyze_text_at(
    lexicon: &EmotionLexicon,
    text: &str,
    timestamp: DateTime<Utc>,
) -> EmotionalAnalysis {
    let normalized = text.to_lowercase();
    let mut scores = EmotionScores::default();
    let mut detected: Vec<String> = Vec::new();
    let mut tracker = ModifierTracker::new();
    let mut word_count = 0usize;

    for word in normalized.split_whitespace() {
        word_count += 1;
        tracker.observe(lexicon, word);
        if let Some((emotion, keyword)) = lexicon.match_keyword(word) {
            scores.add(emotion, tracker.apply());
            detected.push(keyword.to_string());
        }
    }

    let ranked = scores.ranked();
    let (primary_emotion, primary_score) =
        ranked.first().copied().unwrap_or((Emotion::Joy, 0.0));

    let total = scores.total_magnitude();
    let confidence = if total > 0.0 {
        (primary_score.abs() / total * 100.0).min(100.0).round()
    } else {
        NO_SIGNAL_CONFIDENCE
    };

    let denom = if total > 0.0 { total } else { 1.0 };
    let secondary_emotions: Vec<SecondaryEmotion> = ranked
        .iter()
        .skip(1)
        .take(3)
        .filter(|(_, score)| *score > 0.0)
        .map(|&(emotion, score)| SecondaryEmotion {
            emotion,
            intensity: (score / denom * 100.0).min(100.0),
        })
        .collect();

    let composite_emotions = detect_composites(&scores);

    let emotional_valence = if total > 0.0 {
        (scores.positive_sum() - scores.negative_sum()) / total
    } else {
        0.0
    };
    let sentiment = Sentiment::from_valence(emotional_valence);

    let event_count = detected.len();
    #[allow(clippy::cast_precision_loss)]
    let subjectivity = if word_count > 0 {
        (event_count as f64 / (word_count as f64 * 0.3)).min(1.0)
    } else {
        0.0
    };

    let mut keywords: Vec<String> = Vec::new();
    for keyword in detected {
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }

    EmotionalAnalysis {
        primary_emotion,
        confidence,
        secondary_emotions,
        composite_emotions,
        sentiment,
        subjectivity,
        emotional_valence,
        keywords,
        scores,
        timestamp,
    }
}

fn detect_composites(scores: &EmotionScores) -> Vec<CompositeEmotion> {
    CompositeKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let (a, b) = kind.components();
            let (score_a, score_b) = (scores.get(a), scores.get(b));
            (score_a > 0.0 && score_b > 0.0)
                .then(|| CompositeEmotion::new(kind, ((score_a + score_b) / 2.0).round()))
        })
        .collect()
}

const KEYWORD_STOPWORDS: &[&str] = &[
    "this", "that", "these", "those", "for", "but", "because", "as", "when", "where", "who",
    "which", "about", "also", "all", "very", "more", "less",
];

static NON_WORD: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn strip_punctuation(text: &str) -> String {
    match NON_WORD.get_or_init(|| Regex::new(r"[^\w\s]")) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        // The literal pattern always compiles; degrade to the raw text.
        Err(_) => text.to_string(),
    }
}

/// Extracts the most frequent content words from a text.
///
/// Words are lowercased, stripped of punctuation, and kept only when
/// longer than three characters and not a stopword. Ranking is by
/// frequency, descending; ties keep first-occurrence order.
#[must_use]
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let cleaned = strip_punctuation(&text.to_lowercase());
    let mut ranked: Vec<(String, usize)> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() <= 3 || KEYWORD_STOPWORDS.contains(&word) {
            continue;
        }
        match ranked.iter_mut().find(|(w, _)| w.as_str() == word) {
            Some((_, count)) => *count += 1,
            None => ranked.push((word.to_string(), 1)),
        }
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(max_keywords)
        .map(|(word, _)| word)
        .collect()
}
