//! Stream domain models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STREAM_STALENESS_SECS;

/// One generation episode for a chat.
///
/// Only the most recent stream of a chat is eligible for resumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: String,
    pub chat_id: String,
    pub created_at: DateTime<Utc>,
}

/// Resumption settings supplied by the caller; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePolicy {
    pub staleness_window: Duration,
}

impl ResumePolicy {
    pub fn new(staleness_window: Duration) -> Self {
        Self { staleness_window }
    }

    /// Decides whether `latest` may be resumed at `now`.
    pub fn decide(&self, latest: Option<&Stream>, now: DateTime<Utc>) -> ResumeDecision {
        match latest {
            None => ResumeDecision::Refused(RefusalReason::NoStream),
            Some(stream) => {
                let age = now - stream.created_at;
                if age <= self.staleness_window {
                    ResumeDecision::Resume {
                        stream_id: stream.id.clone(),
                    }
                } else {
                    ResumeDecision::Refused(RefusalReason::Stale { age })
                }
            }
        }
    }
}

impl Default for ResumePolicy {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_STREAM_STALENESS_SECS))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeDecision {
    Resume { stream_id: String },
    /// The client must start a new generation.
    Refused(RefusalReason),
}

impl ResumeDecision {
    pub fn stream_id(&self) -> Option<&str> {
        match self {
            ResumeDecision::Resume { stream_id } => Some(stream_id),
            ResumeDecision::Refused(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefusalReason {
    NoStream,
    Stale { age: Duration },
}
