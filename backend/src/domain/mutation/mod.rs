//! Resource mutation pipeline.
//!
//! One generic orchestrator serves every [`Resource`](crate::domain::Resource)
//! kind. It parses the payload, applies the access policy, merges present
//! fields into a working copy, validates the result, commits, and invalidates
//! the kind's cache tag.

mod error;
mod pipeline;

pub use error::MutationError;
pub use pipeline::MutationPipeline;
