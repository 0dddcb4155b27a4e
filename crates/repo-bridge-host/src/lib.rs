//! repo-bridge-host library crate.
//!
//! Receives invocations from the embedded module, turns them into typed
//! repositories, and republishes the current selection to the host UI.
//!
//! # Architecture
//!
//! ```text
//! Embedded module (JSON method calls over a fixed channel)
//!         ↕
//! [repo-bridge-host]
//!   ├── application/
//!   │     ├── selection_store/  single-writer, replay-latest broadcast
//!   │     └── dispatch/         routes select / dismiss / unknown
//!   └── infrastructure/
//!         ├── channel/          newline-delimited JSON transport
//!         ├── surface/          launch/close requests to the surface manager
//!         ├── ui_bridge/        view model + render DTOs for the host UI
//!         └── storage/          TOML config persistence
//! ```
//!
//! # Layer rules
//!
//! - `application` depends on `repo-bridge-core` and on the
//!   [`infrastructure::surface::SurfaceManager`] trait only.
//! - `infrastructure` may depend on everything else plus `tokio` I/O.

/// Application layer: selection store and bridge dispatcher.
pub mod application;

/// Infrastructure layer: transport, surface manager, UI adapter, config.
pub mod infrastructure;
