//! Pair-Setup message framing

pub mod tlv;


pub use tlv::{TlvDecoder, TlvEncoder, TlvError, TlvItem, TlvType};
