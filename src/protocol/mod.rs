//! MIDI-CI protocol core implementation
//!
//! This module provides the wire format, message types, and codec for MIDI-CI.

mod codec;
mod cursor;
mod error;
mod header;
mod message;
mod messages;
mod muid;
mod types;

pub use codec::{MessageBody, decode, encode, get, put};
pub use cursor::{GroupCursor, GroupReader, GroupWriter, group_index, padded_len};
pub use error::{Error, Result};
pub use header::{CiHeader, check_preamble, classify, is_kind};
pub use message::Message;
pub use messages::*;
pub use muid::{
    Muid, MuidSource, UuidMuidSource, generate_muid, get_muid, get_muid_with_position, put_muid,
    put_muid_with_position,
};
pub use types::{AuthorityLevel, Capability, ProfileId, ProtocolType, SubId};

/// SysEx start byte
pub const SYSEX_START: u8 = 0xF0;

/// SysEx end byte
pub const SYSEX_END: u8 = 0xF7;

/// Universal non-realtime SysEx ID
pub const UNIVERSAL_NON_REALTIME: u8 = 0x7E;

/// Sub-ID#1 for MIDI-CI
pub const MIDI_CI_SUB_ID: u8 = 0x0D;

/// Device ID addressing the whole MIDI port
pub const DEVICE_ID_WHOLE_PORT: u8 = 0x7F;

/// Broadcast MUID ("to all devices")
pub const BROADCAST_MUID: u32 = Muid::MAX;

/// Logical length of the common header (preamble through destination MUID)
pub const HEADER_LEN: usize = 14;

/// Smallest encoded message (header-only kinds)
pub const MIN_MESSAGE_SIZE: usize = padded_len(HEADER_LEN);

/// Size of the confirm-protocol test data
pub const TEST_PATTERN_LEN: usize = 48;

/// Test data both sides of a protocol switch agree on: bytes `0..48`
pub const CONFIRM_TEST_PATTERN: [u8; TEST_PATTERN_LEN] = {
    let mut pattern = [0u8; TEST_PATTERN_LEN];
    let mut i = 0;
    while i < TEST_PATTERN_LEN {
        pattern[i] = i as u8;
        i += 1;
    }
    pattern
};
