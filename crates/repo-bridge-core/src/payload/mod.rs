//! Payload decoding: untyped JSON → validated domain values.

pub mod decoder;

pub use decoder::{decode_repository, DecodeError};
