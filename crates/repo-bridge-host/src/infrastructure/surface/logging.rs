//! Headless surface manager used by the `repo-bridge-host` binary.
//!
//! There is no real window to show when the bridge runs on a terminal, so
//! this implementation tracks visibility and logs every request.  Repeated
//! requests are accepted and logged at `debug` as no-ops.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use super::SurfaceManager;

/// Logs surface requests and tracks whether the module is visible.
#[derive(Debug, Default)]
pub struct LoggingSurfaceManager {
    visible: AtomicBool,
}

impl LoggingSurfaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }
}

impl SurfaceManager for LoggingSurfaceManager {
    fn launch_module_surface(&self) {
        if self.visible.swap(true, Ordering::AcqRel) {
            debug!("module surface already visible; launch is a no-op");
        } else {
            info!("module surface launched");
        }
    }

    fn close_module_surface(&self) {
        if self.visible.swap(false, Ordering::AcqRel) {
            info!("module surface closed");
        } else {
            debug!("module surface already hidden; close is a no-op");
        }
    }
}
