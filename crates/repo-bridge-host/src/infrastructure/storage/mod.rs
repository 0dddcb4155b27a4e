//! Storage infrastructure: configuration file persistence.
//!
//! Only host settings are persisted.  Repository selections are never
//! written to disk.

pub mod config;
