//! Intent extraction using ordered regex patterns.
//!
//! Patterns are scanned as one flat, ordered list: the first pattern that
//! matches decides the intent, its first capture group is the target and
//! any further non-empty groups are context. When nothing matches, coarse
//! keyword checks pick a best-guess intent before falling back to `respond`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::normalize::normalize;
use crate::error::AppError;

/// Coarse action category inferred from a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Go to a module
    Navigation,
    /// Open a creation form
    Create,
    /// Search within a module
    Search,
    /// Modify an existing record
    Update,
    /// Remove or close a record
    Delete,
    /// Status or counts
    Status,
    /// Hand an item to someone
    Assign,
    /// Nothing recognised; answer with text
    Respond,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl IntentKind {
    pub fn label(&self) -> &'static str {
        match self {
            IntentKind::Navigation => "navigation",
            IntentKind::Create => "create",
            IntentKind::Search => "search",
            IntentKind::Update => "update",
            IntentKind::Delete => "delete",
            IntentKind::Status => "status",
            IntentKind::Assign => "assign",
            IntentKind::Respond => "respond",
        }
    }
}

/// Result of intent extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIntent {
    pub action: IntentKind,
    /// Phrase believed to name the entity or module
    pub target: String,
    /// Secondary captures (search filter, assignee, ...)
    pub context: Vec<String>,
}

impl ExtractedIntent {
    fn bare(action: IntentKind, normalized: &str) -> Self {
        Self {
            action,
            target: normalized.to_string(),
            context: Vec::new(),
        }
    }
}

/// Pattern sources in priority order. Intents are grouped in declaration
/// order: navigation, create, search, update, delete, status, assign.
pub const INTENT_PATTERN_SOURCES: &[(IntentKind, &str)] = &[
    (
        IntentKind::Navigation,
        r"(?i)(?:go to|navigate to|open|show me|take me to|view)\s+(?:the\s+)?(.+?)(?:\s+(?:page|section|module|dashboard))?$",
    ),
    (
        IntentKind::Navigation,
        r"(?i)(?:switch to|change to)\s+(.+?)(?:\s+(?:mode|view))?$",
    ),
    (
        IntentKind::Navigation,
        r"(?i)i\s+(?:want to|need to|would like to)\s+(?:see|check|view)\s+(.+?)$",
    ),
    (
        IntentKind::Create,
        r"(?i)(?:create|add|new|make)\s+(?:a\s+)?(.+?)(?:\s+(?:record|entry|item))?(?:\s+for\s+(.+?))?$",
    ),
    (
        IntentKind::Create,
        r"(?i)i\s+(?:want to|need to|would like to)\s+(?:create|add|make)\s+(?:a\s+)?(.+?)$",
    ),
    (
        IntentKind::Create,
        r"(?i)(?:register|setup|establish)\s+(?:a\s+)?(.+?)$",
    ),
    (IntentKind::Search, r"(?i)(?:find|search|look for|locate)\s+(.+?)$"),
    (
        IntentKind::Search,
        r"(?i)(?:show me|display)\s+(?:all\s+)?(.+?)(?:\s+(?:with|containing|matching)\s+(.+?))?$",
    ),
    (
        IntentKind::Search,
        r"(?i)i\s+(?:want to|need to)\s+(?:find|search for)\s+(.+?)$",
    ),
    (
        IntentKind::Update,
        r"(?i)(?:update|edit|modify|change)\s+(.+?)(?:\s+(?:to|with)\s+(.+?))?$",
    ),
    (
        IntentKind::Update,
        r"(?i)(?:set|assign)\s+(.+?)(?:\s+(?:to|as)\s+(.+?))?$",
    ),
    (IntentKind::Delete, r"(?i)(?:delete|remove|cancel)\s+(.+?)$"),
    (IntentKind::Delete, r"(?i)(?:close|resolve)\s+(.+?)$"),
    (
        IntentKind::Status,
        r"(?i)(?:what|show)\s+(?:is\s+)?(?:the\s+)?(?:status of|current)\s+(.+?)$",
    ),
    (
        IntentKind::Status,
        r"(?i)(?:how many|count)\s+(.+?)(?:\s+(?:are there|do we have))?$",
    ),
    (IntentKind::Assign, r"(?i)(?:assign|give)\s+(.+?)\s+to\s+(.+?)$"),
    (
        IntentKind::Assign,
        r"(?i)(?:set\s+)?(.+?)\s+(?:assignee|owner|responsible)\s+(?:to|as)\s+(.+?)$",
    ),
];

/// Substring fallbacks checked when no pattern matched, in priority order.
const FALLBACK_KEYWORDS: &[(IntentKind, &[&str])] = &[
    (IntentKind::Create, &["create", "add", "new"]),
    (IntentKind::Search, &["find", "search", "show"]),
    (IntentKind::Navigation, &["go", "open", "navigate"]),
];

/// A compiled pattern and the intent it votes for
pub struct IntentPattern {
    pub intent: IntentKind,
    regex: Regex,
}

impl IntentPattern {
    fn capture(&self, text: &str) -> Option<ExtractedIntent> {
        let caps = self.regex.captures(text)?;
        let target = caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let context = caps
            .iter()
            .skip(2)
            .flatten()
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Some(ExtractedIntent {
            action: self.intent,
            target,
            context,
        })
    }
}

fn compile_patterns() -> Result<Vec<IntentPattern>, AppError> {
    INTENT_PATTERN_SOURCES
        .iter()
        .map(|(intent, source)| {
            Ok(IntentPattern {
                intent: *intent,
                regex: Regex::new(source)?,
            })
        })
        .collect()
}

// Compiled once; a bad pattern surfaces as a classification error on every call.
static INTENT_PATTERNS: LazyLock<Result<Vec<IntentPattern>, AppError>> =
    LazyLock::new(compile_patterns);

/// Extracts intents from chat messages using the static pattern table
pub struct IntentExtractor {
    patterns: &'static [IntentPattern],
}

impl IntentExtractor {
    /// Borrow the compiled pattern table
    pub fn new() -> Result<Self, AppError> {
        let patterns = INTENT_PATTERNS.as_ref().map_err(Clone::clone)?;
        Ok(Self { patterns })
    }

    /// Number of compiled patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Extract the intent of a raw chat message
    pub fn extract(&self, message: &str) -> ExtractedIntent {
        let normalized = normalize(message);

        if let Some(intent) = self
            .patterns
            .iter()
            .find_map(|pattern| pattern.capture(&normalized))
        {
            return intent;
        }

        FALLBACK_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
            .map(|(intent, _)| ExtractedIntent::bare(*intent, &normalized))
            .unwrap_or_else(|| ExtractedIntent::bare(IntentKind::Respond, &normalized))
    }
}

/// Extract the intent of a raw chat message with the shared pattern table
pub fn extract_intent(message: &str) -> Result<ExtractedIntent, AppError> {
    Ok(IntentExtractor::new()?.extract(message))
}
