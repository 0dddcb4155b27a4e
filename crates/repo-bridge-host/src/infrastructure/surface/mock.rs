//! Recording surface manager for unit testing.
//!
//! Captures every request instead of touching a real host surface.

use std::sync::{Arc, Mutex};

use super::{SurfaceManager, SurfaceRequest};

/// A [`SurfaceManager`] that records requests in call order.
///
/// Clones share the same log, so a test can hand one clone to the code under
/// test and keep another for assertions.
#[derive(Clone, Default)]
pub struct RecordingSurfaceManager {
    requests: Arc<Mutex<Vec<SurfaceRequest>>>,
}

impl RecordingSurfaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<SurfaceRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }

    /// Number of requests of the given kind.
    pub fn count(&self, kind: SurfaceRequest) -> usize {
        self.requests
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|r| **r == kind)
            .count()
    }
}

impl SurfaceManager for RecordingSurfaceManager {
    fn launch_module_surface(&self) {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(SurfaceRequest::Launch);
    }

    fn close_module_surface(&self) {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(SurfaceRequest::Close);
    }
}
