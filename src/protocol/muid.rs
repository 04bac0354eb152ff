//! MUID (MIDI Unique ID) codec
//!
//! A MUID is a 28-bit value carried in four 7-bit-clean bytes. The low three
//! bytes hold seven payload bits each; the most significant byte holds bits
//! 24..28 in its low nibble and the three leftover bit-7s (bits 23, 15, 7) in
//! bits 6, 5 and 4.

use std::fmt;

use uuid::Uuid;

use super::cursor::group_index;
use super::{Error, Result};

/// MIDI Unique ID (28 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Muid(u32);

impl Muid {
    /// Largest representable MUID
    pub const MAX: u32 = 0x0FFF_FFFF;

    /// Reserved "to all devices" address
    pub const BROADCAST: Self = Self(Self::MAX);

    /// Create a MUID, rejecting values that do not fit in 28 bits
    pub const fn new(value: u32) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::MuidOverflow { value });
        }

        Ok(Self(value))
    }

    /// Create a MUID from the low 28 bits of `value`
    #[must_use]
    pub const fn from_truncated(value: u32) -> Self {
        Self(value & Self::MAX)
    }

    /// Raw value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Check for the broadcast address
    #[must_use]
    pub const fn is_broadcast(self) -> bool {
        self.0 == Self::MAX
    }

    /// Pack into wire bytes, most significant byte first
    #[must_use]
    pub const fn to_wire(self) -> [u8; 4] {
        let m = self.0;

        [
            (((m >> 24) & 0x0F) | ((m & 0x80_0000) >> 17) | ((m & 0x8000) >> 10) | ((m & 0x80) >> 3))
                as u8,
            ((m >> 16) & 0x7F) as u8,
            ((m >> 8) & 0x7F) as u8,
            (m & 0x7F) as u8,
        ]
    }

    /// Unpack wire bytes, most significant byte first
    #[must_use]
    pub const fn from_wire(bytes: [u8; 4]) -> Self {
        let msb = bytes[0] as u32;

        Self(
            ((msb & 0x0F) << 24)
                | ((bytes[1] as u32 & 0x7F) << 16)
                | ((bytes[2] as u32 & 0x7F) << 8)
                | (bytes[3] as u32 & 0x7F)
                | ((msb & 0x40) << 17)
                | ((msb & 0x20) << 10)
                | ((msb & 0x10) << 3),
        )
    }
}

impl TryFrom<u32> for Muid {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Muid> for u32 {
    fn from(muid: Muid) -> Self {
        muid.0
    }
}

impl fmt::Display for Muid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#09x}", self.0)
    }
}

/// Source of uniformly distributed 28-bit integers
pub trait MuidSource {
    /// Draw the next value; only the low 28 bits are used
    fn next_u28(&mut self) -> u32;
}

/// Default MUID source backed by random (v4) UUIDs
///
/// Stateless, so every caller can hold its own copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidMuidSource;

impl MuidSource for UuidMuidSource {
    fn next_u28(&mut self) -> u32 {
        let uuid = Uuid::new_v4();
        let bytes = uuid.as_bytes();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) & Muid::MAX
    }
}

impl<F> MuidSource for F
where
    F: FnMut() -> u32,
{
    fn next_u28(&mut self) -> u32 {
        self()
    }
}

/// Generate a fresh MUID
pub fn generate_muid<S: MuidSource + ?Sized>(source: &mut S) -> Muid {
    Muid::from_truncated(source.next_u28())
}

/// Write a MUID into the first 4-byte group of `buffer`
pub fn put_muid(buffer: &mut [u8], muid: Muid) -> Result<()> {
    put_muid_with_position(buffer, 0, muid)
}

/// Read a MUID from the first 4-byte group of `buffer`
pub fn get_muid(buffer: &[u8]) -> Result<Muid> {
    get_muid_with_position(buffer, 0)
}

/// Write a MUID starting at logical `position`, crossing group boundaries as needed
pub fn put_muid_with_position(buffer: &mut [u8], position: usize, muid: Muid) -> Result<()> {
    let needed = required_len(position);
    if buffer.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            got: buffer.len(),
        });
    }

    for (k, byte) in muid.to_wire().into_iter().enumerate() {
        buffer[group_index(position + k)] = byte;
    }

    Ok(())
}

/// Read a MUID starting at logical `position`, crossing group boundaries as needed
pub fn get_muid_with_position(buffer: &[u8], position: usize) -> Result<Muid> {
    let needed = required_len(position);
    if buffer.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            got: buffer.len(),
        });
    }

    let mut wire = [0u8; 4];
    for (k, byte) in wire.iter_mut().enumerate() {
        *byte = buffer[group_index(position + k)];
    }

    Ok(Muid::from_wire(wire))
}

// Physical length covering every group touched by logical bytes position..position + 4.
fn required_len(position: usize) -> usize {
    (position + 3) / 4 * 4 + 4
}
