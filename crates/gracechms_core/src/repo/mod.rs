//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the raw key-value contract the store is written against.
//! - Isolate SQLite details from store and view orchestration.
//!
//! # Invariants
//! - Repositories never interpret stored values; decoding belongs to the store.

pub mod kv_repo;
