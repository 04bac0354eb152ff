//! MIDI-CI codec error types

use thiserror::Error;

use super::SubId;

/// MIDI-CI codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer too small to hold (or to contain) the message
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// One of the fixed SysEx preamble bytes does not match
    #[error("invalid preamble byte at logical index {index}: expected {expected:#04x}, got {found:#04x}")]
    InvalidPreamble {
        /// Logical index within the preamble
        index: usize,
        /// Expected byte
        expected: u8,
        /// Found byte
        found: u8,
    },

    /// Sub-ID#2 belongs to another message kind
    #[error("unexpected sub-id: expected {expected}, got {found:#04x}")]
    UnexpectedSubId {
        /// Kind the caller asked for
        expected: SubId,
        /// Sub-ID#2 found in the buffer
        found: u8,
    },

    /// Sub-ID#2 does not name any known message kind
    #[error("unknown MIDI-CI sub-id: {found:#04x}")]
    UnknownSubId {
        /// Sub-ID#2 found in the buffer
        found: u8,
    },

    /// A broadcast-only message carried a non-broadcast destination
    #[error("expected broadcast destination, got {found:#09x}")]
    ExpectedBroadcast {
        /// Destination MUID found in the buffer
        found: u32,
    },

    /// Terminator byte is not `0xF7`
    #[error("invalid SysEx terminator: expected 0xf7, got {found:#04x}")]
    InvalidTerminator {
        /// Found byte
        found: u8,
    },

    /// Confirm-protocol test data differs from the fixed pattern
    #[error("test pattern mismatch at byte {index}")]
    TestPatternMismatch {
        /// First differing byte
        index: usize,
    },

    /// MUID value does not fit in 28 bits
    #[error("MUID out of range: {value:#x} (max 0x0fffffff)")]
    MuidOverflow {
        /// Offending value
        value: u32,
    },

    /// Variable-length field longer than its length prefix can express
    #[error("{field} too long: {len} (max {max})")]
    LengthOverflow {
        /// Field name
        field: &'static str,
        /// Actual length
        len: usize,
        /// Maximum allowed
        max: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
