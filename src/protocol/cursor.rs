//! Sequential field access over 4-byte SysEx groups
//!
//! Messages are laid out as a logical byte stream. Each group of four logical
//! bytes is stored high byte first, so logical position `p` lives at physical
//! index `(p / 4) * 4 + (3 - p % 4)`.

use bytes::Bytes;

use super::muid::Muid;
use super::{Error, Result, SYSEX_END};

/// Physical buffer index of logical position `position`
#[inline]
#[must_use]
pub const fn group_index(position: usize) -> usize {
    (position / 4) * 4 + (3 - position % 4)
}

/// Total message length for a payload ending at logical `end` (terminator included)
#[inline]
#[must_use]
pub const fn padded_len(end: usize) -> usize {
    (end + 1).div_ceil(4) * 4
}

/// Walks logical positions through 4-byte groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupCursor {
    offset: usize,
    nth: i8,
}

impl GroupCursor {
    /// Cursor at logical position 0
    #[must_use]
    pub const fn new() -> Self {
        Self { offset: 0, nth: 3 }
    }

    /// Cursor at an arbitrary logical position
    #[must_use]
    pub const fn at(position: usize) -> Self {
        Self {
            offset: (position / 4) * 4,
            nth: 3 - (position % 4) as i8,
        }
    }

    /// Current logical position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.offset + (3 - self.nth) as usize
    }

    /// Physical index of the current position
    #[must_use]
    pub const fn index(&self) -> usize {
        self.offset + self.nth as usize
    }

    /// Return the current physical index and step to the next logical byte
    pub fn next_index(&mut self) -> usize {
        let index = self.index();

        self.nth -= 1;
        if self.nth < 0 {
            self.nth = 3;
            self.offset += 4;
        }

        index
    }

    /// Advance by `count` logical bytes without touching the buffer
    pub fn skip(&mut self, count: usize) {
        *self = Self::at(self.position() + count);
    }

    /// Write `byte` at the current position and advance
    ///
    /// The whole group holding the position must fit in `buffer`.
    pub fn write_byte(&mut self, buffer: &mut [u8], byte: u8) -> Result<()> {
        self.check_group(buffer.len())?;
        buffer[self.index()] = byte;
        self.next_index();
        Ok(())
    }

    /// Read the byte at the current position and advance
    ///
    /// The whole group holding the position must be present in `buffer`.
    pub fn read_byte(&mut self, buffer: &[u8]) -> Result<u8> {
        self.check_group(buffer.len())?;
        let byte = buffer[self.index()];
        self.next_index();
        Ok(byte)
    }

    fn check_group(&self, len: usize) -> Result<()> {
        let needed = self.offset + 4;
        if len < needed {
            return Err(Error::BufferTooSmall { needed, got: len });
        }
        Ok(())
    }
}

impl Default for GroupCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Field writer over a caller-owned buffer
#[derive(Debug)]
pub struct GroupWriter<'a> {
    buffer: &'a mut [u8],
    cursor: GroupCursor,
}

impl<'a> GroupWriter<'a> {
    /// Writer starting at logical position 0
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            cursor: GroupCursor::new(),
        }
    }

    /// Current logical position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Write one byte
    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.cursor.write_byte(self.buffer, value)
    }

    /// Write a 16-bit value, least significant byte first
    pub fn put_u16(&mut self, value: u16) -> Result<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Write a 32-bit value, least significant byte first
    pub fn put_u32(&mut self, value: u32) -> Result<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    /// Write raw bytes in logical order
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.put_u8(byte)?;
        }
        Ok(())
    }

    /// Write a MUID in wire form
    pub fn put_muid(&mut self, muid: Muid) -> Result<()> {
        self.put_bytes(&muid.to_wire())
    }

    /// Zero-fill to the group boundary, write `0xF7` and return the total length
    pub fn pad_and_terminate(&mut self) -> Result<usize> {
        let total = padded_len(self.position());
        while self.position() < total - 1 {
            self.put_u8(0)?;
        }
        self.put_u8(SYSEX_END)?;
        Ok(total)
    }
}

/// Field reader over a received buffer
#[derive(Debug, Clone)]
pub struct GroupReader<'a> {
    buffer: &'a [u8],
    cursor: GroupCursor,
}

impl<'a> GroupReader<'a> {
    /// Reader starting at logical position 0
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: GroupCursor::new(),
        }
    }

    /// Reader starting at logical `position`
    #[must_use]
    pub const fn at(buffer: &'a [u8], position: usize) -> Self {
        Self {
            buffer,
            cursor: GroupCursor::at(position),
        }
    }

    /// Current logical position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Logical bytes left before the end of the buffer
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position())
    }

    /// Read one byte
    pub fn get_u8(&mut self) -> Result<u8> {
        self.cursor.read_byte(self.buffer)
    }

    /// Read a 16-bit value, least significant byte first
    pub fn get_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.get_array()?))
    }

    /// Read a 32-bit value, least significant byte first
    pub fn get_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.get_array()?))
    }

    /// Read a fixed-size field
    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        for byte in &mut out {
            *byte = self.get_u8()?;
        }
        Ok(out)
    }

    /// Read `len` bytes of variable-length data
    pub fn get_bytes(&mut self, len: usize) -> Result<Bytes> {
        if len > 0 {
            // End of the group holding the last byte
            let needed = (self.position() + len - 1) / 4 * 4 + 4;
            if self.buffer.len() < needed {
                return Err(Error::BufferTooSmall {
                    needed,
                    got: self.buffer.len(),
                });
            }
        }

        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.get_u8()?);
        }
        Ok(Bytes::from(out))
    }

    /// Read a MUID in wire form
    pub fn get_muid(&mut self) -> Result<Muid> {
        Ok(Muid::from_wire(self.get_array()?))
    }

    /// Skip the zero padding, check the `0xF7` terminator and return the total length
    pub fn expect_terminator(&mut self) -> Result<usize> {
        let total = padded_len(self.position());
        let mut terminator = GroupCursor::at(total - 1);
        let found = terminator.read_byte(self.buffer)?;
        if found != SYSEX_END {
            return Err(Error::InvalidTerminator { found });
        }

        self.cursor = terminator;
        Ok(total)
    }
}
