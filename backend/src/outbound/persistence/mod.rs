//! Persistence adapters implementing the repository ports.
//!
//! Query execution and schema management belong to the store of record; the
//! adapters here keep rows in process memory.

mod in_memory;

pub use in_memory::{
    InMemoryAdviceRepository, InMemoryRepository, InMemoryUserRepository, UniqueKey,
};
