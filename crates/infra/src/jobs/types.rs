//! Core job types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopforge_core::ChannelId;

/// Unique job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job kind for routing to the appropriate handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Recompute discounted prices for the channels in the payload.
    PriceRecalculation,
    /// Generic/custom job
    Custom { kind: String },
}

impl JobKind {
    pub fn custom(kind: impl Into<String>) -> Self {
        Self::Custom { kind: kind.into() }
    }

    pub fn type_name(&self) -> &str {
        match self {
            JobKind::PriceRecalculation => "price_recalculation",
            JobKind::Custom { kind } => kind,
        }
    }
}

/// Payload of a [`JobKind::PriceRecalculation`] job: the channels whose
/// promotion rules must be marked dirty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecalculationPayload {
    pub channel_ids: Vec<ChannelId>,
}

/// Job execution status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Queued, waiting to be picked up
    Pending,
    /// Currently being executed
    Running,
    /// Completed successfully
    Completed,
    /// Failed; inspection/replay is up to the consumer
    Failed { error: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed { .. })
    }
}

/// A background job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Job kind for routing
    pub kind: JobKind,
    /// JSON payload
    pub payload: serde_json::Value,
    /// Current status
    pub status: JobStatus,
    /// When the job was created; claim order follows this
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a pending job. The timestamp is passed in so callers with an
    /// injected clock stay deterministic.
    pub fn new(kind: JobKind, payload: serde_json::Value, created_at: DateTime<Utc>) -> Self {
        Self {
            id: JobId::new(),
            kind,
            payload,
            status: JobStatus::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_jobs_start_pending() {
        let job = Job::new(
            JobKind::PriceRecalculation,
            serde_json::json!({"channel_ids": []}),
            Utc::now(),
        );
        assert_eq!(job.status, JobStatus::Pending);
        assert!(!job.status.is_terminal());
    }

    #[test]
    fn kind_has_a_routing_name() {
        assert_eq!(JobKind::PriceRecalculation.type_name(), "price_recalculation");
        assert_eq!(JobKind::custom("reindex").type_name(), "reindex");
    }

    #[test]
    fn price_recalculation_payload_round_trips() {
        let payload = PriceRecalculationPayload {
            channel_ids: vec![ChannelId::new(), ChannelId::new()],
        };
        let value = serde_json::to_value(&payload).unwrap();
        let back: PriceRecalculationPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back, payload);
    }
}
