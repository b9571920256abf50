//! Cognitive graph of concepts, people, and emotions across entries.
//!
//! Each journal entry contributes a delta: nodes for every entity and
//! emotion it mentions, plus association edges between everything
//! co-mentioned. Deltas merge into the accumulated graph without
//! mutating either input; nodes and edges only ever grow.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::{emoji_for_label, valence_for_label};

const ACTIVITY_KEYWORDS: &[&str] = &[
    "running",
    "swimming",
    "walking",
    "working",
    "studying",
    "reading",
    "cooking",
    "exercise",
    "yoga",
    "meditation",
    "meeting",
    "project",
];

const LOCATION_KEYWORDS: &[&str] = &[
    "home",
    "office",
    "cafe",
    "park",
    "gym",
    "beach",
    "city",
    "countryside",
    "mountain",
];

const CONCEPT_KEYWORDS: &[&str] = &[
    "work",
    "family",
    "health",
    "money",
    "time",
    "freedom",
    "love",
    "success",
    "failure",
    "goal",
    "dream",
    "hope",
];

/// Category of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Abstract concept (work, family, health).
    Concept,
    /// Emotion surfaced by an analysis.
    Emotion,
    /// Proper name detected in the text.
    Person,
    /// Activity keyword.
    Activity,
    /// Location keyword.
    Location,
    /// Calendar event; reserved for an external calendar collaborator.
    Event,
}

impl NodeType {
    /// Display color for this category.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Concept => "#6366F1",
            Self::Emotion => "#FBBF24",
            Self::Person => "#EC4899",
            Self::Activity => "#10B981",
            Self::Location => "#8B5CF6",
            Self::Event => "#3B82F6",
        }
    }

    /// Default emoji for entity nodes of this category. Emotion nodes
    /// carry a per-label emoji instead.
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Concept => "💡",
            Self::Emotion => "❓",
            Self::Person => "👤",
            Self::Activity => "🎯",
            Self::Location => "📍",
            Self::Event => "📅",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Concept => "concept",
            Self::Emotion => "emotion",
            Self::Person => "person",
            Self::Activity => "activity",
            Self::Location => "location",
            Self::Event => "event",
        };
        write!(f, "{s}")
    }
}

/// Deterministic node identifier: category plus normalized label.
///
/// The same `(type, label)` pair always yields the same id, which is
/// what lets repeat mentions merge instead of duplicating nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Composes the id for a category and label.
    #[must_use]
    pub fn compose(node_type: NodeType, label: &str) -> Self {
        Self(format!("{node_type}_{}", label.to_lowercase()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic edge identifier, symmetric in its endpoints.
///
/// The endpoint ids are sorted before hashing, so the pair (A, B)
/// resolves to the same edge as (B, A) whatever order extraction
/// surfaced them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Hashes the unordered endpoint pair into an edge id.
    #[must_use]
    pub fn between(a: &NodeId, b: &NodeId) -> Self {
        let (first, second) = if a.as_str() <= b.as_str() {
            (a, b)
        } else {
            (b, a)
        };
        let mut hasher = blake3::Hasher::new();
        hasher.update(first.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(second.as_str().as_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form annotations attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Sentiment annotation in [-1, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,

    /// Emotion labels associated with this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_emotions: Option<Vec<String>>,

    /// Intensity annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
}

/// One node of the cognitive graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveGraphNode {
    /// Deterministic identifier.
    pub id: NodeId,

    /// Category of the node.
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Display label; keeps the original casing for persons.
    pub label: String,

    /// Display emoji.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    /// Display color, fixed per category.
    pub color: String,

    /// Times this node has been observed; starts at 1.
    pub frequency: u64,

    /// First observation timestamp; never changes after creation.
    pub first_appearance: DateTime<Utc>,

    /// Most recent observation timestamp.
    pub last_appearance: DateTime<Utc>,

    /// Running emotional weight in [-1, 1].
    pub emotional_weight: f64,

    /// Free-form annotations.
    pub metadata: NodeMetadata,
}

impl CognitiveGraphNode {
    /// Creates a fresh entity node (person, activity, location, concept)
    /// observed once at `at`.
    #[must_use]
    pub fn entity(node_type: NodeType, label: impl Into<String>, at: DateTime<Utc>) -> Self {
        let label = label.into();
        Self {
            id: NodeId::compose(node_type, &label),
            node_type,
            label,
            emoji: Some(node_type.emoji().to_string()),
            color: node_type.color().to_string(),
            frequency: 1,
            first_appearance: at,
            last_appearance: at,
            emotional_weight: 0.0,
            metadata: NodeMetadata::default(),
        }
    }

    /// Creates a fresh emotion node observed once at `at`. The label may
    /// be a base emotion or a composite (nostalgia, hope, anxiety); its
    /// valence becomes the starting emotional weight.
    #[must_use]
    pub fn emotion(label: impl Into<String>, at: DateTime<Utc>) -> Self {
        let label = label.into();
        Self {
            id: NodeId::compose(NodeType::Emotion, &label),
            node_type: NodeType::Emotion,
            emoji: Some(emoji_for_label(&label).to_string()),
            color: NodeType::Emotion.color().to_string(),
            frequency: 1,
            first_appearance: at,
            last_appearance: at,
            emotional_weight: valence_for_label(&label),
            metadata: NodeMetadata {
                sentiment: None,
                related_emotions: Some(vec![label.clone()]),
                intensity: None,
            },
            label,
        }
    }
}

/// Relation category of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Statistical co-movement.
    Correlation,
    /// Directed influence.
    Causation,
    /// Plain co-occurrence.
    Association,
}

/// One edge of the cognitive graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveGraphEdge {
    /// Symmetric identifier of the endpoint pair.
    pub id: EdgeId,

    /// One endpoint.
    pub source: NodeId,

    /// The other endpoint.
    pub target: NodeId,

    /// Relation strength in [0, 1]; starts at 0.5, grows by 0.1 per
    /// re-observed co-occurrence.
    pub weight: f64,

    /// Times the endpoints have co-occurred; starts at 1.
    pub cooccurrences: u64,

    /// Days between appearances.
    pub temporal_distance: f64,

    /// Agreement of the endpoints' emotional weights, in [-1, 1].
    pub emotional_consistency: f64,

    /// Relation category.
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

/// Entities extracted from one entry, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Proper-name candidates, original casing, deduplicated.
    pub persons: Vec<String>,

    /// Matched location keywords.
    pub locations: Vec<String>,

    /// Matched activity keywords.
    pub activities: Vec<String>,

    /// Matched concept keywords.
    pub concepts: Vec<String>,
}

impl ExtractedEntities {
    /// Returns true when nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
            && self.locations.is_empty()
            && self.activities.is_empty()
            && self.concepts.is_empty()
    }
}

/// Keyword lists backing entity extraction.
///
/// Activities, locations, and concepts match by substring membership on
/// the lowercased entry text. Persons need no list; they come from the
/// capitalized-word heuristic.
#[derive(Debug, Clone)]
pub struct EntityLexicon {
    activities: Vec<String>,
    locations: Vec<String>,
    concepts: Vec<String>,
}

impl EntityLexicon {
    /// Creates the built-in lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self {
            activities: ACTIVITY_KEYWORDS.iter().map(ToString::to_string).collect(),
            locations: LOCATION_KEYWORDS.iter().map(ToString::to_string).collect(),
            concepts: CONCEPT_KEYWORDS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns the activity keywords.
    #[must_use]
    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Returns the location keywords.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Returns the concept keywords.
    #[must_use]
    pub fn concepts(&self) -> &[String] {
        &self.concepts
    }

    /// Adds an activity keyword (normalized to lowercase).
    pub fn add_activity(&mut self, keyword: impl Into<String>) {
        push_unique(&mut self.activities, keyword);
    }

    /// Adds a location keyword (normalized to lowercase).
    pub fn add_location(&mut self, keyword: impl Into<String>) {
        push_unique(&mut self.locations, keyword);
    }

    /// Adds a concept keyword (normalized to lowercase).
    pub fn add_concept(&mut self, keyword: impl Into<String>) {
        push_unique(&mut self.concepts, keyword);
    }
}

impl Default for EntityLexicon {
    fn default() -> Self {
        Self::new()
    }
}

fn push_unique(list: &mut Vec<String>, keyword: impl Into<String>) {
    let keyword = keyword.into().to_lowercase();
    if !list.contains(&keyword) {
        list.push(keyword);
    }
}

/// Extracts persons, locations, activities, and concepts from a text.
///
/// Persons are words longer than two characters with an uppercase
/// initial and a lowercase remainder; sentence-initial common words will
/// misfire, which downstream merging tolerates. Keyword categories match
/// by substring on the lowercased text.
///
/// # Examples
///
/// ```
/// use nostra_insight::{extract_entities, EntityLexicon};
///
/// let lexicon = EntityLexicon::new();
/// let entities = extract_entities(&lexicon, "went running with Ana at the park");
/// assert!(entities.persons.contains(&"Ana".to_string()));
/// assert_eq!(entities.activities, vec!["running".to_string()]);
/// assert_eq!(entities.locations, vec!["park".to_string()]);
/// ```
#[must_use]
pub fn extract_entities(lexicon: &EntityLexicon, text: &str) -> ExtractedEntities {
    let normalized = text.to_lowercase();

    let mut persons: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        if is_person_candidate(word)
            && !persons.iter().any(|p| p.to_lowercase() == word.to_lowercase())
        {
            persons.push(word.to_string());
        }
    }

    let matches = |keywords: &[String]| -> Vec<String> {
        keywords
            .iter()
            .filter(|k| normalized.contains(k.as_str()))
            .cloned()
            .collect()
    };

    ExtractedEntities {
        persons,
        locations: matches(&lexicon.locations),
        activities: matches(&lexicon.activities),
        concepts: matches(&lexicon.concepts),
    }
}

fn is_person_candidate(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str();
            word.chars().count() > 2 && first.is_uppercase() && rest == rest.to_lowercase()
        }
        None => false,
    }
}

/// Builds the node set for one entry: one node per distinct entity and
/// per distinct emotion label, all stamped with the entry date.
#[must_use]
pub fn nodes_from_analysis(
    entities: &ExtractedEntities,
    emotion_labels: &[String],
    entry_date: DateTime<Utc>,
) -> Vec<CognitiveGraphNode> {
    let mut nodes: Vec<CognitiveGraphNode> = Vec::new();

    for person in &entities.persons {
        push_unique_node(
            &mut nodes,
            CognitiveGraphNode::entity(NodeType::Person, person.clone(), entry_date),
        );
    }
    for activity in &entities.activities {
        push_unique_node(
            &mut nodes,
            CognitiveGraphNode::entity(NodeType::Activity, activity.clone(), entry_date),
        );
    }
    for location in &entities.locations {
        push_unique_node(
            &mut nodes,
            CognitiveGraphNode::entity(NodeType::Location, location.clone(), entry_date),
        );
    }
    for concept in &entities.concepts {
        push_unique_node(
            &mut nodes,
            CognitiveGraphNode::entity(NodeType::Concept, concept.clone(), entry_date),
        );
    }
    for label in emotion_labels {
        push_unique_node(&mut nodes, CognitiveGraphNode::emotion(label.clone(), entry_date));
    }

    nodes
}

fn push_unique_node(nodes: &mut Vec<CognitiveGraphNode>, node: CognitiveGraphNode) {
    if !nodes.iter().any(|n| n.id == node.id) {
        nodes.push(node);
    }
}

/// Connects every pair of nodes from one entry with an association edge.
///
/// Everything mentioned together is treated as related, so one entry
/// with `n` nodes yields `n * (n - 1) / 2` edges.
#[must_use]
pub fn connect_entry_nodes(nodes: &[CognitiveGraphNode]) -> Vec<CognitiveGraphEdge> {
    let mut edges = Vec::new();
    for (i, source) in nodes.iter().enumerate() {
        for target in nodes.iter().skip(i + 1) {
            edges.push(CognitiveGraphEdge {
                id: EdgeId::between(&source.id, &target.id),
                source: source.id.clone(),
                target: target.id.clone(),
                weight: 0.5,
                cooccurrences: 1,
                temporal_distance: 0.0,
                emotional_consistency: 0.0,
                edge_type: EdgeType::Association,
            });
        }
    }
    edges
}

/// Nodes and edges contributed by a single entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDelta {
    /// Nodes observed in the entry.
    pub nodes: Vec<CognitiveGraphNode>,

    /// Association edges between the entry's nodes.
    pub edges: Vec<CognitiveGraphEdge>,
}

impl GraphDelta {
    /// Extracts entities from the text, joins them with the analysis
    /// emotion labels, and connects everything pairwise.
    #[must_use]
    pub fn from_entry(
        lexicon: &EntityLexicon,
        text: &str,
        emotion_labels: &[String],
        at: DateTime<Utc>,
    ) -> Self {
        let entities = extract_entities(lexicon, text);
        let nodes = nodes_from_analysis(&entities, emotion_labels, at);
        let edges = connect_entry_nodes(&nodes);
        Self { nodes, edges }
    }
}

/// The accumulated cognitive graph.
///
/// Grows monotonically through [`CognitiveGraph::merge`]; nothing is
/// ever removed. Callers merging deltas from concurrent entries must
/// serialize the merge calls, since each merge reads the full graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CognitiveGraph {
    /// All nodes, in first-observation order.
    pub nodes: Vec<CognitiveGraphNode>,

    /// All edges, in first-observation order.
    pub edges: Vec<CognitiveGraphEdge>,
}

impl CognitiveGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn find_node(&self, id: &NodeId) -> Option<&CognitiveGraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Looks up an edge by id.
    #[must_use]
    pub fn find_edge(&self, id: &EdgeId) -> Option<&CognitiveGraphEdge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    /// Merges one entry's delta into the graph, returning the new graph.
    /// Neither `self` nor `delta` is modified.
    ///
    /// A re-observed node gains one frequency count, takes the delta's
    /// `last_appearance`, and averages its emotional weight with the
    /// delta's (recent observations weigh more than old ones). A
    /// re-observed edge gains one co-occurrence and 0.1 weight, capped
    /// at 1.0. Unseen nodes and edges are inserted as-is.
    #[must_use]
    pub fn merge(&self, delta: &GraphDelta) -> Self {
        let mut nodes = self.nodes.clone();
        for new_node in &delta.nodes {
            match nodes.iter_mut().find(|n| n.id == new_node.id) {
                Some(existing) => {
                    existing.frequency += 1;
                    existing.last_appearance = new_node.last_appearance;
                    existing.emotional_weight =
                        (existing.emotional_weight + new_node.emotional_weight) / 2.0;
                }
                None => nodes.push(new_node.clone()),
            }
        }

        let mut edges = self.edges.clone();
        for new_edge in &delta.edges {
            match edges.iter_mut().find(|e| e.id == new_edge.id) {
                Some(existing) => {
                    existing.cooccurrences += 1;
                    existing.weight = (existing.weight + 0.1).min(1.0);
                }
                None => edges.push(new_edge.clone()),
            }
        }

        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_extract_entities_by_category() {
        let lexicon = EntityLexicon::new();
        let entities =
            extract_entities(&lexicon, "went running with Ana at the park thinking about work");
        assert!(entities.persons.contains(&"Ana".to_string()));
        assert_eq!(entities.activities, vec!["running".to_string()]);
        assert_eq!(entities.locations, vec!["park".to_string()]);
        assert_eq!(entities.concepts, vec!["work".to_string()]);
    }

    #[test]
    fn test_person_heuristic_misfires_on_sentence_initial_words() {
        // Known limitation: any capitalized word qualifies.
        let lexicon = EntityLexicon::new();
        let entities = extract_entities(&lexicon, "Today was fine");
        assert!(entities.persons.contains(&"Today".to_string()));
    }

    #[test]
    fn test_person_heuristic_filters() {
        assert!(is_person_candidate("Ana"));
        assert!(!is_person_candidate("an"));
        assert!(!is_person_candidate("ana"));
        assert!(!is_person_candidate("ANA"));
        assert!(!is_person_candidate(""));
    }

    #[test]
    fn test_persons_deduplicated_per_entry() {
        let lexicon = EntityLexicon::new();
        let entities = extract_entities(&lexicon, "Ana met Ana");
        assert_eq!(entities.persons, vec!["Ana".to_string()]);
    }

    #[test]
    fn test_substring_membership_matches_inflections() {
        let lexicon = EntityLexicon::new();
        // "working" carries both the activity and the "work" concept.
        let entities = extract_entities(&lexicon, "late night working again");
        assert!(entities.activities.contains(&"working".to_string()));
        assert!(entities.concepts.contains(&"work".to_string()));
    }

    #[test]
    fn test_extensible_lexicon() {
        let mut lexicon = EntityLexicon::new();
        lexicon.add_activity("Climbing");
        lexicon.add_activity("climbing");
        let entities = extract_entities(&lexicon, "went climbing");
        assert_eq!(entities.activities, vec!["climbing".to_string()]);
    }

    #[test]
    fn test_entity_node_shape() {
        let node = CognitiveGraphNode::entity(NodeType::Person, "Ana", day(1));
        assert_eq!(node.id.as_str(), "person_ana");
        assert_eq!(node.label, "Ana");
        assert_eq!(node.color, "#EC4899");
        assert_eq!(node.emoji.as_deref(), Some("👤"));
        assert_eq!(node.frequency, 1);
        assert!(node.emotional_weight.abs() < f64::EPSILON);
    }

    #[test]
    fn test_emotion_node_carries_valence_and_emoji() {
        let joy = CognitiveGraphNode::emotion("joy", day(1));
        assert_eq!(joy.id.as_str(), "emotion_joy");
        assert_eq!(joy.emoji.as_deref(), Some("😊"));
        assert!((joy.emotional_weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            joy.metadata.related_emotions,
            Some(vec!["joy".to_string()])
        );

        // Composite labels resolve too.
        let hope = CognitiveGraphNode::emotion("hope", day(1));
        assert!((hope.emotional_weight - 0.8).abs() < f64::EPSILON);
        assert_eq!(hope.emoji.as_deref(), Some("🌟"));

        let unknown = CognitiveGraphNode::emotion("boredom", day(1));
        assert_eq!(unknown.emoji.as_deref(), Some("❓"));
        assert!(unknown.emotional_weight.abs() < f64::EPSILON);
    }

    #[test]
    fn test_edge_id_symmetric() {
        let a = NodeId::compose(NodeType::Person, "Ana");
        let b = NodeId::compose(NodeType::Location, "park");
        let c = NodeId::compose(NodeType::Concept, "work");
        assert_eq!(EdgeId::between(&a, &b), EdgeId::between(&b, &a));
        assert_ne!(EdgeId::between(&a, &b), EdgeId::between(&a, &c));
    }

    #[test]
    fn test_connect_entry_nodes_complete_graph() {
        let entities = ExtractedEntities {
            persons: vec!["Ana".to_string()],
            locations: vec!["park".to_string()],
            activities: vec!["running".to_string()],
            concepts: vec![],
        };
        let nodes = nodes_from_analysis(&entities, &["joy".to_string()], day(1));
        assert_eq!(nodes.len(), 4);
        let edges = connect_entry_nodes(&nodes);
        assert_eq!(edges.len(), 6);
        for edge in &edges {
            assert!((edge.weight - 0.5).abs() < f64::EPSILON);
            assert_eq!(edge.cooccurrences, 1);
            assert_eq!(edge.edge_type, EdgeType::Association);
        }
    }

    #[test]
    fn test_nodes_deduplicated_by_id() {
        let entities = ExtractedEntities::default();
        let labels = vec!["joy".to_string(), "joy".to_string()];
        let nodes = nodes_from_analysis(&entities, &labels, day(1));
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_merge_inserts_then_accumulates() {
        let lexicon = EntityLexicon::new();
        let delta = GraphDelta::from_entry(&lexicon, "running at the park", &["joy".to_string()], day(1));
        let graph = CognitiveGraph::new().merge(&delta);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let joy_id = NodeId::compose(NodeType::Emotion, "joy");
        assert_eq!(graph.find_node(&joy_id).map(|n| n.frequency), Some(1));

        // Re-merging the same entry bumps frequency by exactly one per
        // call and grows edge weights by 0.1.
        let again = GraphDelta::from_entry(&lexicon, "running at the park", &["joy".to_string()], day(2));
        let graph = graph.merge(&again);
        let joy = graph.find_node(&joy_id).expect("joy node");
        assert_eq!(joy.frequency, 2);
        assert_eq!(joy.last_appearance, day(2));
        assert_eq!(joy.first_appearance, day(1));
        for edge in &graph.edges {
            assert_eq!(edge.cooccurrences, 2);
            assert!((edge.weight - 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_merge_weight_capped_at_one() {
        let lexicon = EntityLexicon::new();
        let mut graph = CognitiveGraph::new();
        for d in 1..=8 {
            let delta =
                GraphDelta::from_entry(&lexicon, "running at the park", &[], day(d));
            graph = graph.merge(&delta);
        }
        for edge in &graph.edges {
            assert!(edge.weight <= 1.0);
            assert_eq!(edge.cooccurrences, 8);
        }
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let lexicon = EntityLexicon::new();
        let delta = GraphDelta::from_entry(&lexicon, "yoga at home", &["joy".to_string()], day(1));
        let base = CognitiveGraph::new().merge(&delta);
        let before = base.clone();
        let delta2 = GraphDelta::from_entry(&lexicon, "yoga at home", &["joy".to_string()], day(2));
        let _merged = base.merge(&delta2);
        assert_eq!(base, before);
        assert_eq!(delta2.nodes[0].frequency, 1);
    }

    #[test]
    fn test_merge_averages_emotional_weight() {
        let base_node = CognitiveGraphNode::entity(NodeType::Concept, "work", day(1));
        let mut observed = base_node.clone();
        observed.emotional_weight = 1.0;

        let graph = CognitiveGraph {
            nodes: vec![base_node],
            edges: vec![],
        };
        let delta = GraphDelta {
            nodes: vec![observed],
            edges: vec![],
        };
        let merged = graph.merge(&delta);
        assert!((merged.nodes[0].emotional_weight - 0.5).abs() < f64::EPSILON);

        // A second identical observation pulls the average toward it.
        let merged = merged.merge(&delta);
        assert!((merged.nodes[0].emotional_weight - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_node_serialization_uses_type_key() {
        let node = CognitiveGraphNode::emotion("joy", day(1));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"emotion\""));
        assert!(json.contains("\"emotion_joy\""));
        let back: CognitiveGraphNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
