//! Per-entity repositories: a trait seam for each collection plus the
//! MongoDB-backed implementation. Services are wired against the traits
//! so stores can be swapped in tests.

pub mod articles;
pub mod comments;
pub mod follows;
pub mod likes;
pub mod members;
pub mod mongo;
pub mod notices;
pub mod notifications;
pub mod properties;
pub mod views;

/// Outcome of an insert into a uniquely-indexed relationship collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The unique index rejected the write: the record already exists.
    Duplicate,
}
