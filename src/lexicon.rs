//! Emotion keyword lexicon and modifier detection.
//!
//! One lexicon backs both consumers of word-level signals: the classifier
//! (which needs one-shot, applied-to-match modifier state) and the
//! explainability composer (which needs whole-text occurrence counts).
//! Keeping a single source of truth avoids the two views drifting apart.

use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

/// Score multiplier applied when an intensifier precedes a keyword match.
pub const INTENSIFIER_MULTIPLIER: f64 = 1.5;

const JOY_KEYWORDS: &[&str] = &[
    "happy",
    "joyful",
    "content",
    "great",
    "excellent",
    "wonderful",
    "fantastic",
    "good",
    "better",
    "success",
    "achievement",
    "celebrate",
    "nice",
];

const SADNESS_KEYWORDS: &[&str] = &[
    "sad",
    "lonely",
    "melancholy",
    "depressed",
    "bad",
    "worse",
    "cry",
    "sorrow",
    "pain",
    "loss",
    "absence",
    "unhappy",
];

const ANGER_KEYWORDS: &[&str] = &[
    "angry",
    "mad",
    "furious",
    "annoyed",
    "irritated",
    "rage",
    "wrath",
    "frustrated",
    "hate",
    "unfair",
];

const FEAR_KEYWORDS: &[&str] = &[
    "fear",
    "scared",
    "dread",
    "anxiety",
    "nervous",
    "worried",
    "panic",
    "terror",
    "insecure",
    "afraid",
];

const SURPRISE_KEYWORDS: &[&str] = &[
    "surprised",
    "unexpected",
    "amazement",
    "incredible",
    "wow",
    "didn't expect",
    "shocking",
    "surprise",
    "amazing",
];

const FATIGUE_KEYWORDS: &[&str] = &[
    "tired",
    "exhausted",
    "drained",
    "fatigued",
    "sleepy",
    "weak",
    "no energy",
    "defeated",
];

const DISGUST_KEYWORDS: &[&str] = &[
    "disgust",
    "disgusting",
    "unpleasant",
    "horrible",
    "repulsive",
    "nauseating",
    "gross",
    "awful",
];

const NEGATIONS: &[&str] = &[
    "no", "never", "not", "without", "no one", "none", "neither", "nothing",
];

const INTENSIFIERS: &[&str] = &[
    "very",
    "quite",
    "extremely",
    "super",
    "totally",
    "really",
    "incredibly",
    "so",
];

/// A single emotional-word detection in a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalWordMatch {
    /// The lexicon keyword that matched.
    pub word: String,

    /// The emotion the keyword belongs to.
    pub emotion: Emotion,

    /// Detection weight; currently always 1.0.
    pub weight: f64,
}

/// Whole-text occurrence view over a lexicon: every emotional-word match
/// plus every negation and intensifier token, in text order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconScan {
    /// Emotional-word detections (one per scoring word).
    pub emotional_words: Vec<EmotionalWordMatch>,

    /// Negation tokens found, duplicates preserved.
    pub negations: Vec<String>,

    /// Intensifier tokens found, duplicates preserved.
    pub intensifiers: Vec<String>,
}

impl LexiconScan {
    /// Total count of negation and intensifier tokens.
    #[must_use]
    pub fn modifier_count(&self) -> usize {
        self.negations.len() + self.intensifiers.len()
    }

    /// Returns true if any negation or intensifier was found.
    #[must_use]
    pub fn has_modifiers(&self) -> bool {
        !self.negations.is_empty() || !self.intensifiers.is_empty()
    }
}

/// Per-emotion keyword lists plus negation and intensifier vocabularies.
///
/// Matching is bidirectional substring: a word matches a keyword when
/// either contains the other. Each word resolves to at most one
/// `(emotion, keyword)` pair, the first in canonical emotion and list
/// order.
///
/// # Examples
///
/// ```
/// use nostra_insight::{Emotion, EmotionLexicon};
///
/// let lexicon = EmotionLexicon::new();
/// assert_eq!(
///     lexicon.match_keyword("happy"),
///     Some((Emotion::Joy, "happy"))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EmotionLexicon {
    keywords: Vec<(Emotion, Vec<String>)>,
    negations: Vec<String>,
    intensifiers: Vec<String>,
}

impl EmotionLexicon {
    /// Creates the built-in lexicon.
    #[must_use]
    pub fn new() -> Self {
        let lists: [(Emotion, &[&str]); 7] = [
            (Emotion::Joy, JOY_KEYWORDS),
            (Emotion::Sadness, SADNESS_KEYWORDS),
            (Emotion::Anger, ANGER_KEYWORDS),
            (Emotion::Fear, FEAR_KEYWORDS),
            (Emotion::Surprise, SURPRISE_KEYWORDS),
            (Emotion::Fatigue, FATIGUE_KEYWORDS),
            (Emotion::Disgust, DISGUST_KEYWORDS),
        ];
        Self {
            keywords: lists
                .into_iter()
                .map(|(emotion, words)| {
                    (emotion, words.iter().map(ToString::to_string).collect())
                })
                .collect(),
            negations: NEGATIONS.iter().map(ToString::to_string).collect(),
            intensifiers: INTENSIFIERS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns the keyword list for one emotion.
    #[must_use]
    pub fn keywords_for(&self, emotion: Emotion) -> &[String] {
        self.keywords
            .iter()
            .find(|(e, _)| *e == emotion)
            .map_or(&[], |(_, words)| words.as_slice())
    }

    /// Returns the negation vocabulary.
    #[must_use]
    pub fn negations(&self) -> &[String] {
        &self.negations
    }

    /// Returns the intensifier vocabulary.
    #[must_use]
    pub fn intensifiers(&self) -> &[String] {
        &self.intensifiers
    }

    /// Adds a keyword to one emotion's list (normalized to lowercase).
    pub fn add_keyword(&mut self, emotion: Emotion, keyword: impl Into<String>) {
        let keyword = keyword.into().to_lowercase();
        if let Some((_, words)) = self.keywords.iter_mut().find(|(e, _)| *e == emotion) {
            if !words.contains(&keyword) {
                words.push(keyword);
            }
        }
    }

    /// Returns true if the word is a negation token (exact match).
    #[must_use]
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }

    /// Returns true if the word is an intensifier token (exact match).
    #[must_use]
    pub fn is_intensifier(&self, word: &str) -> bool {
        self.intensifiers.iter().any(|i| i == word)
    }

    /// Resolves a lowercase word to its first matching `(emotion, keyword)`
    /// pair, scanning emotions in canonical order and keywords in list
    /// order. Matching is bidirectional substring, so short words can hit
    /// longer keywords ("i" matches "fantastic").
    #[must_use]
    pub fn match_keyword(&self, word: &str) -> Option<(Emotion, &str)> {
        if word.is_empty() {
            return None;
        }
        for (emotion, words) in &self.keywords {
            for keyword in words {
                if word.contains(keyword.as_str()) || keyword.contains(word) {
                    return Some((*emotion, keyword.as_str()));
                }
            }
        }
        None
    }

    /// Produces the whole-text counts view: every emotional-word match and
    /// every negation/intensifier token in the text.
    #[must_use]
    pub fn scan(&self, text: &str) -> LexiconScan {
        let normalized = text.to_lowercase();
        let mut scan = LexiconScan::default();
        for word in normalized.split_whitespace() {
            if self.is_negation(word) {
                scan.negations.push(word.to_string());
            }
            if self.is_intensifier(word) {
                scan.intensifiers.push(word.to_string());
            }
            if let Some((emotion, keyword)) = self.match_keyword(word) {
                scan.emotional_words.push(EmotionalWordMatch {
                    word: keyword.to_string(),
                    emotion,
                    weight: 1.0,
                });
            }
        }
        scan
    }
}

impl Default for EmotionLexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot modifier state for the applied-to-match view.
///
/// A negation or intensifier arms the tracker; the next scoring event
/// consumes the armed state via [`ModifierTracker::apply`], which resets
/// it. Modifiers do not persist past the first keyword match after them.
#[derive(Debug, Clone)]
pub struct ModifierTracker {
    negation_active: bool,
    multiplier: f64,
}

impl ModifierTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            negation_active: false,
            multiplier: 1.0,
        }
    }

    /// Observes one word, arming negation or intensifier state when the
    /// word is in the corresponding vocabulary.
    pub fn observe(&mut self, lexicon: &EmotionLexicon, word: &str) {
        if lexicon.is_negation(word) {
            self.negation_active = true;
        }
        if lexicon.is_intensifier(word) {
            self.multiplier = INTENSIFIER_MULTIPLIER;
        }
    }

    /// Returns the signed score delta for one keyword match and resets the
    /// tracker: `-1 x multiplier` when negation is armed, `+1 x multiplier`
    /// otherwise.
    pub fn apply(&mut self) -> f64 {
        let sign = if self.negation_active { -1.0 } else { 1.0 };
        let delta = sign * self.multiplier;
        self.negation_active = false;
        self.multiplier = 1.0;
        delta
    }
}

impl Default for ModifierTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_keyword_exact() {
        let lexicon = EmotionLexicon::new();
        assert_eq!(lexicon.match_keyword("happy"), Some((Emotion::Joy, "happy")));
        assert_eq!(lexicon.match_keyword("tired"), Some((Emotion::Fatigue, "tired")));
        assert_eq!(lexicon.match_keyword("xyzzy"), None);
        assert_eq!(lexicon.match_keyword(""), None);
    }

    #[test]
    fn test_match_keyword_forward_substring() {
        let lexicon = EmotionLexicon::new();
        // Punctuation-suffixed tokens still contain the keyword.
        assert_eq!(lexicon.match_keyword("happy,"), Some((Emotion::Joy, "happy")));
        assert_eq!(lexicon.match_keyword("unhappy"), Some((Emotion::Joy, "happy")));
    }

    #[test]
    fn test_match_keyword_reverse_substring() {
        let lexicon = EmotionLexicon::new();
        // Short words hit the first keyword containing them.
        assert_eq!(
            lexicon.match_keyword("i"),
            Some((Emotion::Joy, "fantastic"))
        );
        // "no" is contained in "annoyed" before any fear/fatigue keyword.
        assert_eq!(
            lexicon.match_keyword("no"),
            Some((Emotion::Anger, "annoyed"))
        );
    }

    #[test]
    fn test_match_keyword_multiword_entries() {
        let lexicon = EmotionLexicon::new();
        assert_eq!(
            lexicon.match_keyword("expect"),
            Some((Emotion::Surprise, "didn't expect"))
        );
        assert_eq!(
            lexicon.match_keyword("energy"),
            Some((Emotion::Fatigue, "no energy"))
        );
    }

    #[test]
    fn test_negation_and_intensifier_membership() {
        let lexicon = EmotionLexicon::new();
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("nothing"));
        assert!(!lexicon.is_negation("knot"));
        assert!(lexicon.is_intensifier("very"));
        assert!(lexicon.is_intensifier("so"));
        assert!(!lexicon.is_intensifier("slightly"));
    }

    #[test]
    fn test_add_keyword() {
        let mut lexicon = EmotionLexicon::new();
        assert_eq!(lexicon.match_keyword("stoked"), None);
        lexicon.add_keyword(Emotion::Joy, "Stoked");
        assert_eq!(lexicon.match_keyword("stoked"), Some((Emotion::Joy, "stoked")));
        let count = lexicon.keywords_for(Emotion::Joy).len();
        lexicon.add_keyword(Emotion::Joy, "stoked");
        assert_eq!(lexicon.keywords_for(Emotion::Joy).len(), count);
    }

    #[test]
    fn test_tracker_negation_one_shot() {
        let lexicon = EmotionLexicon::new();
        let mut tracker = ModifierTracker::new();
        tracker.observe(&lexicon, "not");
        assert!((tracker.apply() + 1.0).abs() < f64::EPSILON);
        // Consumed: the next event is unmodified.
        assert!((tracker.apply() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_intensifier_one_shot() {
        let lexicon = EmotionLexicon::new();
        let mut tracker = ModifierTracker::new();
        tracker.observe(&lexicon, "very");
        assert!((tracker.apply() - 1.5).abs() < f64::EPSILON);
        assert!((tracker.apply() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_negated_intensifier() {
        let lexicon = EmotionLexicon::new();
        let mut tracker = ModifierTracker::new();
        tracker.observe(&lexicon, "not");
        tracker.observe(&lexicon, "very");
        assert!((tracker.apply() + 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_ignores_plain_words() {
        let lexicon = EmotionLexicon::new();
        let mut tracker = ModifierTracker::new();
        tracker.observe(&lexicon, "walked");
        assert!((tracker.apply() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scan_counts() {
        let lexicon = EmotionLexicon::new();
        let scan = lexicon.scan("Not very happy, not happy");
        assert_eq!(scan.negations, vec!["not", "not"]);
        assert_eq!(scan.intensifiers, vec!["very"]);
        assert_eq!(scan.modifier_count(), 3);
        assert!(scan.has_modifiers());
        let joys = scan
            .emotional_words
            .iter()
            .filter(|m| m.emotion == Emotion::Joy)
            .count();
        assert_eq!(joys, 2);
    }

    #[test]
    fn test_scan_empty_text() {
        let lexicon = EmotionLexicon::new();
        let scan = lexicon.scan("");
        assert!(scan.emotional_words.is_empty());
        assert!(!scan.has_modifiers());
        assert_eq!(scan.modifier_count(), 0);
    }
}
