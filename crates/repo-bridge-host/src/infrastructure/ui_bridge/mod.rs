//! Presentation adapter: exposes the current selection to host rendering code.
//!
//! The host UI never talks to the store directly.  It owns one
//! [`RepoViewModel`] for the lifetime of its screen, reads the selection from
//! it, and asks it to launch the module.
//!
//! # How the view model stays current
//!
//! ```text
//! SelectionStore ──Subscription──► [mirror task] ──watch::Sender──► watch::Receiver(s)
//!                                                                     ↑ rendering code
//! ```
//!
//! The mirror task is spawned on the current Tokio runtime.  A `watch`
//! channel is what rendering code wants: it always holds the latest value and
//! lets any number of readers await "something changed".
//!
//! # DTOs
//!
//! [`RepoDetailDto`] is a plain serialisable snapshot of a repository, shaped
//! for a detail screen: it carries a two-letter placeholder for missing
//! avatars and abbreviated commit hashes so every UI renders them the same
//! way.

use std::sync::Arc;

use repo_bridge_core::{Commit, RepoId, Repository};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::application::selection_store::{Selection, SelectionStore};
use crate::infrastructure::surface::SurfaceManager;

/// Number of characters shown for an abbreviated commit hash.
pub const SHORT_SHA_LEN: usize = 7;

/// Number of characters used for the avatar placeholder.
const INITIALS_LEN: usize = 2;

// ── View model ────────────────────────────────────────────────────────────────

/// Read-only view of the current selection plus the "launch module" action.
pub struct RepoViewModel {
    selected: watch::Receiver<Selection>,
    surfaces: Arc<dyn SurfaceManager>,
    mirror: Option<JoinHandle<()>>,
}

impl RepoViewModel {
    /// Subscribes to `store` and starts mirroring it.
    ///
    /// The current selection is available from [`current`](Self::current)
    /// as soon as this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn new(store: &SelectionStore, surfaces: Arc<dyn SurfaceManager>) -> Self {
        let mut subscription = store.subscribe();
        // subscribe() always queues the latest value first.
        let initial = subscription.try_recv().flatten();
        let (tx, rx) = watch::channel(initial);

        let mirror = tokio::spawn(async move {
            while let Some(selection) = subscription.recv().await {
                if tx.send(selection).is_err() {
                    break;
                }
            }
            debug!("view model mirror task finished");
        });

        Self {
            selected: rx,
            surfaces,
            mirror: Some(mirror),
        }
    }

    /// A receiver that observes every selection change.
    pub fn selected(&self) -> watch::Receiver<Selection> {
        self.selected.clone()
    }

    /// The selection as of now.
    pub fn current(&self) -> Selection {
        self.selected.borrow().clone()
    }

    /// Render snapshot of the current selection, if any.
    pub fn detail(&self) -> Option<RepoDetailDto> {
        self.selected
            .borrow()
            .as_deref()
            .map(RepoDetailDto::from)
    }

    /// Asks the host to show the module surface.  Fire-and-forget.
    pub fn request_launch(&self) {
        info!("launch of module surface requested");
        self.surfaces.launch_module_surface();
    }

    /// `true` until [`shutdown`](Self::shutdown) has been called.
    pub fn is_active(&self) -> bool {
        self.mirror.is_some()
    }

    /// Stops mirroring and releases the store subscription.
    ///
    /// Safe to call more than once.  The last mirrored value stays readable.
    pub async fn shutdown(&mut self) {
        if let Some(mirror) = self.mirror.take() {
            mirror.abort();
            // Awaiting guarantees the subscription has been dropped.
            let _ = mirror.await;
            debug!("view model shut down");
        }
    }
}

impl Drop for RepoViewModel {
    fn drop(&mut self) {
        if let Some(mirror) = self.mirror.take() {
            mirror.abort();
        }
    }
}

// ── DTOs ──────────────────────────────────────────────────────────────────────

/// Detail-screen snapshot of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDetailDto {
    pub id: RepoId,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    /// Upper-cased first characters of the name, shown when there is no avatar.
    pub initials: String,
    /// `true` only when a commit list was supplied and is non-empty.
    pub has_commits: bool,
    pub recent_commits: Vec<CommitDto>,
}

/// One row of the "recent commits" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDto {
    pub message: String,
    pub author_name: String,
    pub short_sha: String,
}

impl From<&Repository> for RepoDetailDto {
    fn from(repo: &Repository) -> Self {
        let recent_commits: Vec<CommitDto> = repo
            .commits()
            .unwrap_or_default()
            .iter()
            .map(CommitDto::from)
            .collect();

        Self {
            id: repo.id(),
            name: repo.name().to_string(),
            full_name: repo.full_name().to_string(),
            description: repo.description().map(str::to_string),
            avatar_url: repo.avatar_url().map(str::to_string),
            html_url: repo.html_url().map(str::to_string),
            initials: repo
                .name()
                .chars()
                .take(INITIALS_LEN)
                .collect::<String>()
                .to_uppercase(),
            has_commits: !recent_commits.is_empty(),
            recent_commits,
        }
    }
}

impl From<&Commit> for CommitDto {
    fn from(commit: &Commit) -> Self {
        Self {
            message: commit.message().to_string(),
            author_name: commit.author_name().to_string(),
            short_sha: commit.sha().chars().take(SHORT_SHA_LEN).collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
