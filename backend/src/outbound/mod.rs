//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: in-memory repositories for advice and users
//! - **cache**: tag-version cache invalidation
//! - **credentials**: Argon2id credential hashing
//!
//! Adapters are thin translators between domain types and infrastructure.
//! They contain no business logic.

pub mod cache;
pub mod credentials;
pub mod persistence;
