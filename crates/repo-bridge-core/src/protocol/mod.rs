//! Protocol module containing the channel envelope types and the JSON codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_call, decode_response, encode_call, encode_response, ProtocolError};
pub use messages::*;
