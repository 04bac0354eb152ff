//! Per-kind MIDI-CI messages
//!
//! Each kind gets a `put_*` encoder, a `get_*` decoder and an `is_*`
//! predicate. Kinds with the same wire shape share a payload struct.

/// Generate the `put_*` / `get_*` / `is_*` triple for each listed kind
macro_rules! message_functions {
    ($($kind:ident ($name:literal): $ty:ty => $put:ident, $get:ident, $is:ident;)+) => {
        $(
            #[doc = concat!("Encode a ", $name, " message into `buffer`, returning the bytes written")]
            pub fn $put(buffer: &mut [u8], message: &$ty) -> $crate::protocol::Result<usize> {
                $crate::protocol::put(buffer, $crate::protocol::SubId::$kind, message)
            }

            #[doc = concat!("Decode a ", $name, " message, returning it with the bytes consumed")]
            pub fn $get(buffer: &[u8]) -> $crate::protocol::Result<($ty, usize)> {
                $crate::protocol::get(buffer, $crate::protocol::SubId::$kind)
            }

            #[doc = concat!("Check whether `buffer` holds a ", $name, " message")]
            #[must_use]
            pub fn $is(buffer: &[u8]) -> bool {
                $crate::protocol::is_kind(buffer, $crate::protocol::SubId::$kind)
            }
        )+
    };
}

mod ack;
mod discovery;
mod negotiation;
mod process;
mod profile;
mod property;

pub use ack::*;
pub use discovery::*;
pub use negotiation::*;
pub use process::*;
pub use profile::*;
pub use property::*;
