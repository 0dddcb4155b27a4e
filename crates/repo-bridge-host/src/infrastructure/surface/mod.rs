//! Surface manager seam: requests to show or hide the module's UI surface.
//!
//! The real surface manager belongs to the host platform (it owns windows,
//! activities, or whatever hosts the embedded module) and is out of scope
//! here.  The bridge only ever *calls* it:
//!
//! - the dispatcher calls [`SurfaceManager::close_module_surface`] on `dismiss`
//! - the view model calls [`SurfaceManager::launch_module_surface`] when the
//!   user asks for the module
//!
//! Both requests are fire-and-forget and carry no payload.  Implementations
//! must tolerate repeated calls; the bridge makes no assumption about when
//! the module runtime is constructed or torn down.
//!
//! # Testability
//!
//! [`mock::RecordingSurfaceManager`] records every request so tests can
//! assert on side effects without a real host.

pub mod logging;
pub mod mock;

/// A request the bridge sent to the surface manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRequest {
    Launch,
    Close,
}

/// Outbound interface to the host's surface-management collaborator.
pub trait SurfaceManager: Send + Sync {
    /// Shows the module surface (starting the module if needed).
    fn launch_module_surface(&self);
    /// Hides or terminates the module surface.
    fn close_module_surface(&self);
}

pub use logging::LoggingSurfaceManager;
pub use mock::RecordingSurfaceManager;
