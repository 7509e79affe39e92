//! Job status models for the Zendesk API.
//!
//! Bulk operations run in the background on Zendesk's side and hand back a
//! job status. Zendesk only keeps the last 100 jobs, and each expires after
//! about an hour, so a lookup for an old job may legitimately find nothing.

use serde::{Deserialize, Serialize};

/// State of a background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Waiting to start.
    Queued,
    /// Running.
    Working,
    /// Stopped with an error.
    Failed,
    /// Finished.
    Completed,
    /// Cancelled.
    Killed,
    /// Any state this client does not know about.
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Returns true once the job will not change state again.
    pub fn is_finished(self) -> bool {
        matches!(self, JobState::Failed | JobState::Completed | JobState::Killed)
    }
}

/// A background job handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    /// Job ID (a hex string).
    pub id: String,

    /// API URL to poll this job.
    #[serde(default)]
    pub url: Option<String>,

    /// Current state.
    pub status: JobState,

    /// Number of tasks in the job.
    #[serde(default)]
    pub total: Option<u64>,

    /// Number of tasks done so far.
    #[serde(default)]
    pub progress: Option<u64>,

    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,

    /// Per-item results once the job has run. Shape varies by job kind.
    #[serde(default)]
    pub results: Option<serde_json::Value>,
}

/// Single-job envelope: `{"job_status": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// The wrapped job status.
    pub job_status: JobStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_status_deserializes() {
        let json = r#"{
            "job_status": {
                "id": "8b726e606741012ffc2d782bcb7848fe",
                "url": "https://acme.zendesk.com/api/v2/job_statuses/8b726e606741012ffc2d782bcb7848fe.json",
                "total": 2,
                "progress": 2,
                "status": "completed",
                "message": "Completed at Fri Apr 13 02:51:53 +0000 2012",
                "results": [{"id": 3, "action": "update", "success": true, "status": "Updated"}]
            }
        }"#;

        let response: JobStatusResponse = serde_json::from_str(json).unwrap();
        let job = response.job_status;
        assert_eq!(job.id, "8b726e606741012ffc2d782bcb7848fe");
        assert_eq!(job.status, JobState::Completed);
        assert_eq!(job.progress, Some(2));
        assert!(job.results.unwrap().is_array());
    }

    #[test]
    fn test_queued_job_without_progress() {
        let job: JobStatus =
            serde_json::from_str(r#"{"id": "abc", "status": "queued", "progress": null}"#).unwrap();
        assert_eq!(job.status, JobState::Queued);
        assert!(job.progress.is_none());
        assert!(!job.status.is_finished());
    }

    #[test]
    fn test_finished_states() {
        assert!(JobState::Completed.is_finished());
        assert!(JobState::Failed.is_finished());
        assert!(JobState::Killed.is_finished());
        assert!(!JobState::Working.is_finished());
        assert!(!JobState::Unknown.is_finished());
    }
}
