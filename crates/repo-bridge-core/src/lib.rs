//! # repo-bridge-core
//!
//! Shared library for the repo-bridge host containing the domain model, the
//! payload decoder, and the channel envelope codec.
//!
//! It has zero dependencies on async runtimes, UI frameworks, or OS APIs.
//!
//! # Architecture overview
//!
//! An embedded "module" UI runtime and a "host" UI runtime cannot share
//! memory.  The module sends the host a single named method invocation whose
//! argument is an untyped JSON structure describing the repository the user
//! picked.  The host must turn that structure into typed values before
//! anything else touches it.
//!
//! - **`domain`** – Immutable value types: [`Repository`] and its [`Commit`]s.
//!   By the time an instance exists it is already valid.
//!
//! - **`payload`** – The decoder.  The only place where cross-runtime type
//!   errors can occur.  Required identity fields are strict; everything else
//!   degrades gracefully.
//!
//! - **`protocol`** – The invocation envelope (`{"method", "arguments"}`), the
//!   three-way response (success / error / not implemented), and the
//!   line-oriented JSON codec used by the host's channel transport.

pub mod domain;
pub mod payload;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `repo_bridge_core::Repository` instead of the full module path.
pub use domain::repository::{Commit, RepoId, Repository};
pub use payload::decoder::{decode_repository, DecodeError};
pub use protocol::codec::{decode_call, encode_response, ProtocolError};
pub use protocol::messages::{MethodCall, MethodResponse};
