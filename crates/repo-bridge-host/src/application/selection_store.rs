//! SelectionStore: the single source of truth for the selected repository.
//!
//! # Semantics
//!
//! - At most one current value (`Some(repo)` or `None`); no history.
//! - Exactly one [`SelectionWriter`] exists per store, created together with
//!   the first [`SelectionStore`] handle by [`SelectionStore::channel`].
//! - [`SelectionStore::subscribe`] returns a [`Subscription`] that first
//!   yields the latest value and then every later write, in write order.
//!
//! # Fan-out
//!
//! ```text
//! writer.set(v) ──lock──► latest = v
//!                         ├──► subscriber queue #1  (unbounded mpsc)
//!                         ├──► subscriber queue #2
//!                         └──► subscriber queue #n
//! ```
//!
//! Replacing the latest value and pushing it into every queue happens under
//! one lock, and subscribing (replay + registration) takes the same lock.
//! Therefore every subscriber sees the same total order of writes, never
//! misses a write made after it subscribed, and never sees an older write
//! after a newer one.  Queues are unbounded so a slow reader never causes
//! writes to be coalesced or dropped.

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures_util::Stream;
use repo_bridge_core::Repository;
use tokio::sync::mpsc;
use tracing::debug;

/// The value held by the store: the current repository, or none.
pub type Selection = Option<Arc<Repository>>;

struct StoreState {
    latest: Selection,
    subscribers: Vec<mpsc::UnboundedSender<Selection>>,
    writes: u64,
}

impl StoreState {
    fn new() -> Self {
        Self {
            latest: None,
            subscribers: Vec::new(),
            writes: 0,
        }
    }
}

fn lock(inner: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    // Every critical section leaves the state consistent, so a poisoned lock
    // is still safe to use.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Reader handle ─────────────────────────────────────────────────────────────

/// Cloneable read handle: subscribe to changes or take a snapshot.
#[derive(Clone)]
pub struct SelectionStore {
    inner: Arc<Mutex<StoreState>>,
}

impl SelectionStore {
    /// Creates an empty store and returns its only writer plus a reader handle.
    pub fn channel() -> (SelectionWriter, SelectionStore) {
        let inner = Arc::new(Mutex::new(StoreState::new()));
        (
            SelectionWriter {
                inner: Arc::clone(&inner),
            },
            SelectionStore { inner },
        )
    }

    /// Starts a new subscription.
    ///
    /// The latest value is queued immediately, so the first item a
    /// subscriber receives is always the current selection (possibly `None`).
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = lock(&self.inner);
        // The receiver is alive, so this send cannot fail.
        let _ = tx.send(state.latest.clone());
        state.subscribers.push(tx);
        debug!(
            "selection store: subscriber added ({} active)",
            state.subscribers.len()
        );
        Subscription { receiver: rx }
    }

    /// Snapshot of the current selection.
    pub fn current(&self) -> Selection {
        lock(&self.inner).latest.clone()
    }

    /// Number of subscriptions that have not been dropped yet.
    ///
    /// Dropped subscriptions are pruned on the next write, and also here.
    pub fn subscriber_count(&self) -> usize {
        let mut state = lock(&self.inner);
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.len()
    }

    /// Total number of writes since the store was created.
    pub fn write_count(&self) -> u64 {
        lock(&self.inner).writes
    }
}

// ── Writer handle ─────────────────────────────────────────────────────────────

/// The store's single writer.  Not `Clone`.
pub struct SelectionWriter {
    inner: Arc<Mutex<StoreState>>,
}

impl SelectionWriter {
    /// Replaces the current selection and publishes it to every subscriber.
    ///
    /// When this returns, the value is visible to [`SelectionStore::current`]
    /// and queued for every live subscription.
    pub fn set(&self, value: Selection) {
        let mut state = lock(&self.inner);
        state.latest = value.clone();
        state.writes = state.writes.wrapping_add(1);
        state.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
        debug!(
            "selection store: write #{} ({}) published to {} subscribers",
            state.writes,
            describe(&value),
            state.subscribers.len()
        );
    }

    /// Returns a new reader handle for the same store.
    pub fn store(&self) -> SelectionStore {
        SelectionStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn describe(value: &Selection) -> String {
    match value {
        Some(repo) => format!("repo id={}", repo.id()),
        None => "cleared".to_string(),
    }
}

// ── Subscription ──────────────────────────────────────────────────────────────

/// An ordered stream of selections.
///
/// Yields `Some(selection)` for every write (and once for the replayed
/// latest value).  Only ends (`None`) after the writer and every store handle
/// have been dropped and the queue is drained.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<Selection>,
}

impl Subscription {
    /// Waits for the next selection.
    pub async fn recv(&mut self) -> Option<Selection> {
        self.receiver.recv().await
    }

    /// Returns the next queued selection without waiting, if any.
    pub fn try_recv(&mut self) -> Option<Selection> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for Subscription {
    type Item = Selection;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
