//! BridgeDispatcher: routes named invocations from the embedded module.
//!
//! # Routing table
//!
//! ```text
//! method            side effect                          response
//! ────────────────────────────────────────────────────────────────────────
//! select            decode → writer.set(Some(repo))      success(true)
//!                   (decode failed: none)                error(DECODE_ERROR)
//! dismiss           surfaces.close_module_surface()      success(true)
//! anything else     none                                 not_implemented
//! ```
//!
//! The store is written before [`BridgeDispatcher::handle`] returns, so the
//! completion signal is never sent ahead of the write.  A failed `select`
//! leaves the previous selection in place.

use std::sync::Arc;

use repo_bridge_core::protocol::messages::{error_codes, METHOD_DISMISS, METHOD_SELECT};
use repo_bridge_core::{decode_repository, MethodCall, MethodResponse};
use serde_json::Value;
use tracing::{info, warn};

use crate::application::selection_store::SelectionWriter;
use crate::infrastructure::surface::SurfaceManager;

/// Method names the dispatcher answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRoutes {
    pub select: String,
    pub dismiss: String,
}

impl Default for MethodRoutes {
    fn default() -> Self {
        Self {
            select: METHOD_SELECT.to_string(),
            dismiss: METHOD_DISMISS.to_string(),
        }
    }
}

enum Route {
    Select,
    Dismiss,
    Unknown,
}

impl MethodRoutes {
    fn route(&self, method: &str) -> Route {
        if method == self.select {
            Route::Select
        } else if method == self.dismiss {
            Route::Dismiss
        } else {
            Route::Unknown
        }
    }
}

/// Owns the store's writer and the surface manager handle.
pub struct BridgeDispatcher {
    writer: SelectionWriter,
    surfaces: Arc<dyn SurfaceManager>,
    routes: MethodRoutes,
}

impl BridgeDispatcher {
    /// Creates a dispatcher with the default `select` / `dismiss` routes.
    pub fn new(writer: SelectionWriter, surfaces: Arc<dyn SurfaceManager>) -> Self {
        Self::with_routes(writer, surfaces, MethodRoutes::default())
    }

    pub fn with_routes(
        writer: SelectionWriter,
        surfaces: Arc<dyn SurfaceManager>,
        routes: MethodRoutes,
    ) -> Self {
        Self {
            writer,
            surfaces,
            routes,
        }
    }

    /// Handles one invocation and returns its single completion signal.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        match self.routes.route(&call.method) {
            Route::Select => self.select(&call.arguments),
            Route::Dismiss => self.dismiss(),
            Route::Unknown => {
                warn!("unknown bridge method `{}`", call.method);
                MethodResponse::NotImplemented
            }
        }
    }

    /// Decodes `payload` and, on success, makes it the current selection.
    pub fn select(&self, payload: &Value) -> MethodResponse {
        match decode_repository(payload) {
            Ok(repo) => {
                info!(
                    "selected repository {} (id={})",
                    repo.full_name(),
                    repo.id()
                );
                self.writer.set(Some(Arc::new(repo)));
                MethodResponse::success(true)
            }
            Err(e) => {
                warn!("rejected select payload: {e}");
                MethodResponse::error(error_codes::DECODE_ERROR, e.to_string())
            }
        }
    }

    /// Asks the host to hide the module surface.  Never touches the store.
    pub fn dismiss(&self) -> MethodResponse {
        info!("module requested dismissal");
        self.surfaces.close_module_surface();
        MethodResponse::success(true)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
