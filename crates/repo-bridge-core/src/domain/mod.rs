//! Domain entities for repo-bridge.
//!
//! Pure data with no infrastructure dependencies.  Nothing in here validates
//! anything: the payload decoder is the single point of truth for what counts
//! as a legal [`repository::Repository`], and it is the only code allowed to
//! construct one.

/// The selected repository and its commits.
pub mod repository;
