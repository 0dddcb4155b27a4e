//! Application layer for repo-bridge-host.
//!
//! # Sub-modules
//!
//! - **`selection_store`** – Holds "the currently selected repository" and
//!   broadcasts every change, in order, to any number of subscribers.  New
//!   subscribers immediately receive the latest value.
//!
//! - **`dispatch`** – Routes named invocations from the module: decodes
//!   `select` payloads into the store, forwards `dismiss` to the surface
//!   manager, and answers anything else with "not implemented".
//!
//! Neither module performs I/O.

pub mod dispatch;
pub mod selection_store;

pub use dispatch::{BridgeDispatcher, MethodRoutes};
pub use selection_store::{Selection, SelectionStore, SelectionWriter, Subscription};
