use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// ExecutionStatus represents the lifecycle state of an execution as reported
/// by the backend. The backend owns this state machine; the dashboard only
/// renders it.
///
/// `Unknown` absorbs status strings introduced by newer backend versions so
/// that a single unrecognized row never fails deserialization of the whole
/// executions list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Pending => write!(f, "PENDING"),
            ExecutionStatus::Running => write!(f, "RUNNING"),
            ExecutionStatus::Completed => write!(f, "COMPLETED"),
            ExecutionStatus::Failed => write!(f, "FAILED"),
            ExecutionStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Trigger describes the event that caused an execution to start.
///
/// `function_name` identifies the backend function the execution invoked;
/// `trigger_type` is a free-form origin marker (e.g. "EVENT" for manual test
/// triggers, "CRON" for scheduled ones).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub trigger_type: String,
    pub function_name: String,
}

/// Execution is a recorded run of a backend function, together with the
/// trigger that created it. Owned and mutated exclusively by the backend;
/// the dashboard holds transient, re-fetchable copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Execution {
    pub id: Uuid,
    pub trigger_id: Uuid,
    pub trigger: Trigger,
    pub status: ExecutionStatus,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Body of `POST /trigger`. `payload` carries the user's payload text
/// re-encoded as a JSON string literal; an empty payload field is omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerRequest {
    pub function_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl TriggerRequest {
    /// Build the wire request from raw form input. The payload text is
    /// serialized again before transmission (the field value on the wire is
    /// a JSON string literal of the user's text); an empty field is dropped.
    pub fn from_form_input(function_name: &str, payload: &str) -> Self {
        let payload = if payload.is_empty() {
            None
        } else {
            // Encoding a string as JSON cannot fail.
            Some(serde_json::to_string(payload).unwrap_or_default())
        };
        Self {
            function_name: function_name.to_string(),
            payload,
        }
    }
}

/// Deserialize an optional RFC 3339 timestamp, mapping absent, null, or
/// unparseable values to `None`. A bad timestamp on one execution should
/// degrade to an empty duration cell, not fail the whole list fetch.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
