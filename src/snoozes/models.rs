//! Data models for snoozed notifications

use crate::error::{Result, SnoozeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reject urgency scores outside `[0, 1]`
pub fn validate_urgency(urgency: Option<f64>) -> Result<()> {
    match urgency {
        Some(value) if !(0.0..=1.0).contains(&value) => Err(SnoozeError::Validation(
            "urgency must be between 0.0 and 1.0".to_string(),
        )),
        _ => Ok(()),
    }
}

/// A snoozed notification as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnoozeRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub summary: String,
    #[serde(default)]
    pub urgency: Option<f64>,
    #[serde(rename = "snoozeUntil")]
    pub snooze_until: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Request to store (create or overwrite) a snoozed notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnoozeStoreRequest {
    pub id: String,
    pub title: String,
    pub body: String,
    pub summary: String,
    #[serde(default)]
    pub urgency: Option<f64>,
    #[serde(rename = "snoozeUntil", alias = "snooze_until")]
    pub snooze_until: DateTime<Utc>,
}

impl SnoozeStoreRequest {
    /// Build the stored record, stamping both timestamps with `now`
    pub fn into_record(self, now: DateTime<Utc>) -> SnoozeRecord {
        SnoozeRecord {
            id: self.id,
            title: self.title,
            body: self.body,
            summary: self.summary,
            urgency: self.urgency,
            snooze_until: self.snooze_until,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnoozeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<f64>,
    #[serde(
        default,
        rename = "snoozeUntil",
        alias = "snooze_until",
        skip_serializing_if = "Option::is_none"
    )]
    pub snooze_until: Option<DateTime<Utc>>,
}

impl SnoozeUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.summary.is_none()
            && self.urgency.is_none()
            && self.snooze_until.is_none()
    }

    /// Apply present fields to a record; returns whether anything changed
    pub fn apply(self, record: &mut SnoozeRecord, now: DateTime<Utc>) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(body) = self.body {
            record.body = body;
        }
        if let Some(summary) = self.summary {
            record.summary = summary;
        }
        if let Some(urgency) = self.urgency {
            record.urgency = Some(urgency);
        }
        if let Some(snooze_until) = self.snooze_until {
            record.snooze_until = snooze_until;
        }
        record.updated_at = now;
        true
    }
}

/// Response for store/update/delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnoozeWriteResponse {
    pub ok: bool,
    pub id: String,
}

impl SnoozeWriteResponse {
    pub fn ok(id: impl Into<String>) -> Self {
        Self { ok: true, id: id.into() }
    }
}

/// Query parameters for listing snoozed items
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnoozeListQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Listed view of a record; body and timestamps stay in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnoozeListItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub urgency: Option<f64>,
    #[serde(rename = "snoozeUntil")]
    pub snooze_until: DateTime<Utc>,
}

impl From<SnoozeRecord> for SnoozeListItem {
    fn from(record: SnoozeRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            summary: record.summary,
            urgency: record.urgency,
            snooze_until: record.snooze_until,
        }
    }
}

/// Listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnoozeListResponse {
    pub items: Vec<SnoozeListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_request() -> SnoozeStoreRequest {
        SnoozeStoreRequest {
            id: "abc".to_string(),
            title: "Rent Payment".to_string(),
            body: "Rent is due tomorrow".to_string(),
            summary: "Summary: Rent is due tomorrow".to_string(),
            urgency: Some(0.55),
            snooze_until: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_store_request_accepts_both_field_names() {
        let camel = r#"{"id":"a","title":"t","body":"b","summary":"s","snoozeUntil":"2026-01-01T09:00:00Z"}"#;
        let snake = r#"{"id":"a","title":"t","body":"b","summary":"s","snooze_until":"2026-01-01T09:00:00Z"}"#;

        let camel: SnoozeStoreRequest = serde_json::from_str(camel).unwrap();
        let snake: SnoozeStoreRequest = serde_json::from_str(snake).unwrap();
        assert_eq!(camel.snooze_until, snake.snooze_until);
        assert!(camel.urgency.is_none());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        let record = sample_request().into_record(now);
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("snoozeUntil").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("snooze_until").is_none());
    }

    #[test]
    fn test_update_applies_present_fields_only() {
        let created = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 12, 31, 13, 0, 0).unwrap();
        let mut record = sample_request().into_record(created);

        let update = SnoozeUpdate {
            summary: Some("Pay rent".to_string()),
            ..Default::default()
        };
        assert!(update.apply(&mut record, later));
        assert_eq!(record.summary, "Pay rent");
        assert_eq!(record.title, "Rent Payment");
        assert_eq!(record.updated_at, later);
        assert_eq!(record.created_at, created);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let created = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        let mut record = sample_request().into_record(created);
        assert!(!SnoozeUpdate::default().apply(&mut record, Utc::now()));
        assert_eq!(record.updated_at, created);
    }
}
