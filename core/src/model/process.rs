use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a single task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Submitted,
    Working,
    Aborting,
    Completed,
}

impl ProcessStatus {
    /// Terminal states are never polled again.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessStatus::Completed)
    }

    /// States that keep a watch alive.
    pub fn is_active(self) -> bool {
        matches!(self, ProcessStatus::Working | ProcessStatus::Aborting)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessStatus::Submitted => "submitted",
            ProcessStatus::Working => "working",
            ProcessStatus::Aborting => "aborting",
            ProcessStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress counters reported by the backend while a process runs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStatistics {
    #[serde(default)]
    pub acquired: u64,

    #[serde(default)]
    pub succeeded: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl ProcessStatistics {
    pub fn failed(&self) -> u64 {
        self.acquired.saturating_sub(self.succeeded)
    }
}

/// A single execution instance of a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInfo {
    pub uuid: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: ProcessStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ProcessStatistics>,
}

/// One line of a task's run history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub uuid: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ProcessStatistics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_format_is_lowercase() {
        let s: ProcessStatus = serde_json::from_str(r#""working""#).unwrap();
        assert_eq!(s, ProcessStatus::Working);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#""working""#);
    }

    #[test]
    fn only_completed_is_terminal() {
        assert!(ProcessStatus::Completed.is_terminal());
        for s in [
            ProcessStatus::Submitted,
            ProcessStatus::Working,
            ProcessStatus::Aborting,
        ] {
            assert!(!s.is_terminal(), "{s} must not be terminal");
        }
    }

    #[test]
    fn active_states_keep_polling() {
        assert!(ProcessStatus::Working.is_active());
        assert!(ProcessStatus::Aborting.is_active());
        assert!(!ProcessStatus::Submitted.is_active());
        assert!(!ProcessStatus::Completed.is_active());
    }

    #[test]
    fn failed_saturates() {
        let stats = ProcessStatistics {
            acquired: 10,
            succeeded: 12,
            ..Default::default()
        };
        assert_eq!(stats.failed(), 0);
    }
}
