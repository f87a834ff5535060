use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use super::streams_model::{ResumeDecision, ResumePolicy, Stream};
use super::streams_traits::{StreamRepositoryTrait, StreamServiceTrait};
use crate::errors::Result;

/// Service applying the caller's staleness window to stream bookkeeping.
pub struct StreamService {
    repository: Arc<dyn StreamRepositoryTrait>,
    policy: ResumePolicy,
}

impl StreamService {
    pub fn new(repository: Arc<dyn StreamRepositoryTrait>, policy: ResumePolicy) -> Self {
        StreamService { repository, policy }
    }
}

#[async_trait]
impl StreamServiceTrait for StreamService {
    async fn begin_stream(&self, chat_id: &str) -> Result<Stream> {
        self.repository.begin_stream(chat_id).await
    }

    fn resume(&self, chat_id: &str, now: DateTime<Utc>) -> Result<ResumeDecision> {
        let latest = self.repository.latest_stream(chat_id)?;
        let decision = self.policy.decide(latest.as_ref(), now);
        if let ResumeDecision::Refused(reason) = &decision {
            debug!("Refusing stream resume for chat {}: {:?}", chat_id, reason);
        }
        Ok(decision)
    }
}
