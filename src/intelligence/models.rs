//! Result types produced by the text intelligence engine

use serde::{Deserialize, Serialize};

/// Urgency at or above this value is labelled urgent
pub const URGENT_THRESHOLD: f64 = 0.6;

/// Binary urgency label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLabel {
    Urgent,
    Normal,
}

impl UrgencyLabel {
    /// Derive the label from a numeric urgency
    pub fn from_urgency(urgency: f64) -> Self {
        if urgency >= URGENT_THRESHOLD {
            Self::Urgent
        } else {
            Self::Normal
        }
    }

    /// Parse one of the two accepted label strings, exactly
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "urgent" => Some(Self::Urgent),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Normal => "normal",
        }
    }
}

/// Urgency score with its label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub urgency: f64,
    pub label: UrgencyLabel,
}

impl ClassificationResult {
    /// Clamp into [0, 1], round to two decimals and derive the label.
    ///
    /// Returns `None` for non-finite input.
    pub fn from_score(urgency: f64) -> Option<Self> {
        if !urgency.is_finite() {
            return None;
        }
        let urgency = round2(urgency.clamp(0.0, 1.0));
        Some(Self {
            urgency,
            label: UrgencyLabel::from_urgency(urgency),
        })
    }

    pub fn is_urgent(&self) -> bool {
        self.label == UrgencyLabel::Urgent
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
