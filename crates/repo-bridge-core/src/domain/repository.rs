//! Repository and commit value types.
//!
//! A [`Repository`] is created exclusively by
//! [`crate::payload::decode_repository`] from one bridge invocation and is
//! read-only thereafter.  Hosts share it as `Arc<Repository>`; a newer
//! selection supersedes it, nothing ever edits it in place.
//!
//! # Absent vs empty commits
//!
//! `commits` is `Option<Vec<Commit>>` on purpose:
//!
//! - `None` means the module did not send a commit list at all.
//! - `Some(vec![])` means it sent one and it was empty.
//!
//! The host renders these two cases differently, so they must never be
//! collapsed into one another.

use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Identifier of a repository, unique within a session.
pub type RepoId = i64;

/// A repository selected by the user inside the embedded module.
///
/// Equality and hashing use the identifier only: two snapshots of the same
/// repository compare equal even if, say, the description changed between
/// them.  Compare the accessors directly when field-level equality matters.
///
/// Serialises with the same camelCase keys the module sends, so a snapshot
/// can be logged or handed to a UI layer without a separate mapping.
/// There is intentionally no `Deserialize` impl.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    id: RepoId,
    name: String,
    full_name: String,
    description: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commits: Option<Vec<Commit>>,
}

impl Repository {
    pub(crate) fn new(
        id: RepoId,
        name: String,
        full_name: String,
        description: Option<String>,
        avatar_url: Option<String>,
        html_url: Option<String>,
        commits: Option<Vec<Commit>>,
    ) -> Self {
        Self {
            id,
            name,
            full_name,
            description,
            avatar_url,
            html_url,
            commits,
        }
    }

    pub fn id(&self) -> RepoId {
        self.id
    }

    /// Short repository name, e.g. `"repo"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner-qualified name, e.g. `"octo/repo"`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Canonical web link for the repository.
    pub fn html_url(&self) -> Option<&str> {
        self.html_url.as_deref()
    }

    /// The commit list, or `None` when the module did not supply one.
    pub fn commits(&self) -> Option<&[Commit]> {
        self.commits.as_deref()
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Repository {}

impl Hash for Repository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One commit belonging to a [`Repository`].
///
/// Only ever built after the decoder has checked that all three fields were
/// present and were strings, so there is no partially-initialised commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    sha: String,
    author_name: String,
    message: String,
}

impl Commit {
    pub(crate) fn new(sha: String, author_name: String, message: String) -> Self {
        Self {
            sha,
            author_name,
            message,
        }
    }

    /// Full commit hash as sent by the module.
    pub fn sha(&self) -> &str {
        &self.sha
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
