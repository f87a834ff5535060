//! Streams module - resumable stream bookkeeping and the resume policy.

mod streams_model;
mod streams_service;
mod streams_traits;


pub use streams_model::{RefusalReason, ResumeDecision, ResumePolicy, Stream};
pub use streams_service::StreamService;
pub use streams_traits::{StreamRepositoryTrait, StreamServiceTrait};
