//! Git collaborator for vigil: revision resolution and changeset extraction.
//!
//! Git is treated as an external black box. Every operation shells out to
//! the `git` binary and returns its stdout as text; the resolution and
//! extraction logic on top is pure and unit-tested.

pub mod changeset;
pub mod repo;
pub mod resolve;
