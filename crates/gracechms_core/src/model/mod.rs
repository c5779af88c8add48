//! Church-management domain model.
//!
//! # Responsibility
//! - Define the seven persisted record shapes and their storage keys.
//! - Provide the numeric and calendar helpers views rely on.
//!
//! # Invariants
//! - Every record carries a prefixed id unique within its collection.
//! - Cross-collection ids (`member_id`, `leader`) are weak references.
//! - Monetary amounts are integer minor units (cents).

pub mod calendar;
pub mod collection;
pub mod money;
pub mod records;
