//! MIDI-CI (MIDI Capability Inquiry) message codec
//!
//! Encodes and decodes the Universal System Exclusive messages MIDI devices use
//! to discover each other, negotiate protocols, configure profiles, exchange
//! properties and answer process inquiries.
//!
//! # Quick Start
//!
//! ```rust
//! use midi_ci::protocol::{CiHeader, InvalidateMuid, Muid, get_invalidate_muid, put_invalidate_muid};
//!
//! let header = CiHeader::broadcast(0x7F, 0x01, Muid::new(100)?);
//! let message = InvalidateMuid::new(header, Muid::new(0x0123_4567)?);
//!
//! let mut buffer = [0u8; 32];
//! let written = put_invalidate_muid(&mut buffer, &message)?;
//!
//! let (decoded, consumed) = get_invalidate_muid(&buffer)?;
//! assert_eq!(decoded, message);
//! assert_eq!(consumed, written);
//! # Ok::<(), midi_ci::Error>(())
//! ```
//!
//! Messages of unknown kind can be decoded through [`Message`]:
//!
//! ```rust
//! use midi_ci::{Message, MidiCi, MidiCiConfig};
//!
//! let session = MidiCi::new(MidiCiConfig::default());
//! let bytes = Message::Nak(session.broadcast_header()).encode()?;
//!
//! let (message, _) = Message::decode(&bytes)?;
//! assert_eq!(message.sub_id(), midi_ci::protocol::SubId::Nak);
//! # Ok::<(), midi_ci::Error>(())
//! ```
//!
//! # Features
//!
//! - **Caller-owned buffers** - `put_*` / `get_*` never allocate for fixed-size kinds
//! - **Typed errors** - truncated or foreign input is rejected, never read out of bounds
//! - **Injected randomness** - MUIDs come from a [`MuidSource`](protocol::MuidSource)
//! - **Optional serde** - enable the `serde` feature to serialize decoded messages
//!
//! # Wire Layout
//!
//! Fields form a logical byte stream that is stored in 4-byte groups, high
//! byte first. See [`protocol::group_index`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]

pub mod protocol;
pub mod session;

pub use protocol::{
    BROADCAST_MUID, CiHeader, Error, Message, MessageBody, Muid, Result, SubId, decode, encode,
};
pub use session::{DeviceIdentity, MidiCi, MidiCiConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
