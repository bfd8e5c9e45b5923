// Status-to-presentation mappings for the executions table

use crate::models::ExecutionStatus;
use serde::Serialize;

/// BadgeCategory is the visual severity class attached to an execution
/// status badge.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Success,
    Danger,
    Medium,
    Neutral,
}

impl BadgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeCategory::Success => "success",
            BadgeCategory::Danger => "danger",
            BadgeCategory::Medium => "medium",
            BadgeCategory::Neutral => "neutral",
        }
    }
}

/// Map an execution status to its badge category. Total over the status
/// enumeration; anything the dashboard does not recognize renders as a
/// neutral in-progress badge, same as RUNNING.
pub fn badge_category(status: &ExecutionStatus) -> BadgeCategory {
    match status {
        ExecutionStatus::Completed => BadgeCategory::Success,
        ExecutionStatus::Failed => BadgeCategory::Danger,
        ExecutionStatus::Pending => BadgeCategory::Medium,
        ExecutionStatus::Running | ExecutionStatus::Unknown => BadgeCategory::Neutral,
    }
}

/// Map an execution status to the glyph shown inside its badge. Same
/// default arm as `badge_category`.
pub fn badge_icon(status: &ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Completed => "check",
        ExecutionStatus::Failed => "server-crash",
        ExecutionStatus::Pending => "file-stack",
        ExecutionStatus::Running | ExecutionStatus::Unknown => "loader",
    }
}
