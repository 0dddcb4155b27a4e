//! Infrastructure layer for the host application.
//!
//! Contains the adapters around the bridge core: the line-oriented channel
//! transport, the surface manager seam, config file storage, and the
//! presentation adapter consumed by rendering code.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `repo_bridge_core`.  Only the `SurfaceManager` trait is imported back into
//! `application`.

pub mod channel;
pub mod storage;
pub mod surface;
pub mod ui_bridge;
