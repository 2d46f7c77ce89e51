//! Deterministic offline heuristics
//!
//! These run whenever the remote backend is unusable or fails. Both functions
//! are pure and never suspend.

use super::models::{round2, ClassificationResult, UrgencyLabel};

pub const SUMMARY_PREFIX: &str = "Summary: ";
pub const ELLIPSIS: char = '…';

pub const DEFAULT_MAX_TOKENS: usize = 60;
pub const MIN_MAX_TOKENS: usize = 16;
pub const MAX_MAX_TOKENS: usize = 200;

/// Characters allowed per token of summary budget
pub const CHARS_PER_TOKEN: usize = 4;

const BASE_URGENCY: f64 = 0.25;
const KEYWORD_URGENCY: f64 = 0.8;
const SHORT_TEXT_URGENCY: f64 = 0.55;
const HINT_URGENCY: f64 = 0.9;
const SHORT_TEXT_CHARS: usize = 80;

const URGENT_TERMS: [&str; 7] = ["urgent", "asap", "now", "minutes", "soon", "today", "immediately"];

/// Normalize a requested token budget.
///
/// Unset or zero becomes the default; everything else is clamped into
/// `[MIN_MAX_TOKENS, MAX_MAX_TOKENS]`.
pub fn clamp_token_budget(requested: Option<i64>) -> usize {
    match requested {
        None | Some(0) => DEFAULT_MAX_TOKENS,
        Some(n) => n.clamp(MIN_MAX_TOKENS as i64, MAX_MAX_TOKENS as i64) as usize,
    }
}

/// Whitespace-collapsed, truncated summary prefixed with `Summary: `
pub fn summarize_offline(text: &str, max_tokens: usize) -> String {
    let snippet = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let max_chars = max_tokens * CHARS_PER_TOKEN;

    let mut summary = String::with_capacity(SUMMARY_PREFIX.len() + snippet.len() + ELLIPSIS.len_utf8());
    summary.push_str(SUMMARY_PREFIX);

    match snippet.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            summary.push_str(snippet[..cut].trim_end());
            summary.push(ELLIPSIS);
        }
        None => summary.push_str(&snippet),
    }

    summary
}

/// Keyword, length and hint based urgency scoring.
///
/// Each step can only raise the score. The first hint found in the text wins.
pub fn classify_offline(text: &str, hints: &[String]) -> ClassificationResult {
    let lowered = text.to_lowercase();
    let mut urgency = BASE_URGENCY;

    if URGENT_TERMS.iter().any(|term| lowered.contains(term)) {
        urgency = urgency.max(KEYWORD_URGENCY);
    }

    if text.chars().count() < SHORT_TEXT_CHARS {
        urgency = urgency.max(SHORT_TEXT_URGENCY);
    }

    let hinted = hints
        .iter()
        .filter(|hint| !hint.is_empty())
        .any(|hint| lowered.contains(&hint.trim().to_lowercase()));
    if hinted {
        urgency = urgency.max(HINT_URGENCY);
    }

    let urgency = round2(urgency);
    ClassificationResult {
        urgency,
        label: UrgencyLabel::from_urgency(urgency),
    }
}
