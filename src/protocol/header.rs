//! MIDI-CI common header and SysEx framing
//!
//! Every MIDI-CI message starts with the same 14 logical bytes.

use super::codec::MessageBody;
use super::cursor::{GroupReader, GroupWriter};
use super::muid::Muid;
use super::{
    DEVICE_ID_WHOLE_PORT, Error, HEADER_LEN, MIDI_CI_SUB_ID, Result, SYSEX_START, SubId,
    UNIVERSAL_NON_REALTIME,
};

/// Logical length of the fixed preamble including Sub-ID#2
const PREAMBLE_LEN: usize = 5;

/// Smallest physical buffer that holds a full preamble
const PREAMBLE_GROUPS_LEN: usize = 8;

/// Fields shared by every MIDI-CI message
///
/// # Wire Format
///
/// Logical byte order; each group of four is stored high byte first.
///
/// ```text
/// 0        1        2          3        4         5         6..10    10..14
/// +--------+--------+----------+--------+---------+---------+--------+-------------+
/// |  0xF0  |  0x7E  | DeviceID |  0x0D  | Sub-ID2 | Version | Source | Destination |
/// +--------+--------+----------+--------+---------+---------+--------+-------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CiHeader {
    /// Device ID (`0x7F` addresses the whole port)
    pub device_id: u8,
    /// Message format version
    pub version: u8,
    /// Sender MUID
    pub source: Muid,
    /// Receiver MUID
    pub destination: Muid,
}

impl CiHeader {
    /// Create a header addressed to `destination`
    #[must_use]
    pub const fn new(device_id: u8, version: u8, source: Muid, destination: Muid) -> Self {
        Self {
            device_id,
            version,
            source,
            destination,
        }
    }

    /// Create a header addressed to every device
    #[must_use]
    pub const fn broadcast(device_id: u8, version: u8, source: Muid) -> Self {
        Self::new(device_id, version, source, Muid::BROADCAST)
    }

    /// Header with the given endpoints, whole-port device ID and version 1
    #[must_use]
    pub const fn between(source: Muid, destination: Muid) -> Self {
        Self::new(DEVICE_ID_WHOLE_PORT, 0x01, source, destination)
    }
}

/// Header-only kinds (NAK, profile inquiry, process inquiry) carry no payload
impl MessageBody for CiHeader {
    fn header(&self) -> &CiHeader {
        self
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        0
    }

    fn write_payload(&self, _kind: SubId, _writer: &mut GroupWriter<'_>) -> Result<()> {
        Ok(())
    }

    fn read_payload(_kind: SubId, header: CiHeader, _reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(header)
    }
}

/// Write the preamble, Sub-ID#2 and common header fields
///
/// Broadcast-only kinds always carry [`Muid::BROADCAST`].
pub(crate) fn write_header(
    writer: &mut GroupWriter<'_>,
    kind: SubId,
    header: &CiHeader,
) -> Result<()> {
    writer.put_u8(SYSEX_START)?;
    writer.put_u8(UNIVERSAL_NON_REALTIME)?;
    writer.put_u8(header.device_id)?;
    writer.put_u8(MIDI_CI_SUB_ID)?;
    writer.put_u8(kind.as_u8())?;
    writer.put_u8(header.version)?;
    writer.put_muid(header.source)?;

    let destination = if kind.is_broadcast() {
        Muid::BROADCAST
    } else {
        header.destination
    };
    writer.put_muid(destination)?;

    debug_assert_eq!(writer.position(), HEADER_LEN);
    Ok(())
}

/// Read the common header of a message already known to be of `kind`
pub(crate) fn read_header(buffer: &[u8], kind: SubId) -> Result<(CiHeader, GroupReader<'_>)> {
    check_preamble(buffer, kind)?;

    let mut reader = GroupReader::at(buffer, 2);
    let device_id = reader.get_u8()?;

    let mut reader = GroupReader::at(buffer, PREAMBLE_LEN);
    let version = reader.get_u8()?;
    let source = reader.get_muid()?;
    let destination = reader.get_muid()?;

    if kind.is_broadcast() && !destination.is_broadcast() {
        return Err(Error::ExpectedBroadcast {
            found: destination.as_u32(),
        });
    }

    let header = CiHeader {
        device_id,
        version,
        source,
        destination,
    };
    Ok((header, reader))
}

/// Validate the fixed preamble and Sub-ID#2 of `buffer` against `kind`
///
/// This is the single check shared by the `is_*` predicates and the
/// `get_*` decoders.
pub fn check_preamble(buffer: &[u8], kind: SubId) -> Result<()> {
    let found = sub_id_byte(buffer)?;
    if found != kind.as_u8() {
        return Err(Error::UnexpectedSubId {
            expected: kind,
            found,
        });
    }

    Ok(())
}

/// Check whether `buffer` holds a message of `kind`
///
/// Pure; never mutates and never panics on short input.
#[must_use]
pub fn is_kind(buffer: &[u8], kind: SubId) -> bool {
    check_preamble(buffer, kind).is_ok()
}

/// Identify the message kind of `buffer`
///
/// Returns `None` when the preamble is not MIDI-CI or Sub-ID#2 is unknown.
#[must_use]
pub fn classify(buffer: &[u8]) -> Option<SubId> {
    sub_id_byte(buffer).ok().and_then(SubId::from_u8)
}

// Validate the universal SysEx preamble and return the raw Sub-ID#2 byte.
pub(crate) fn sub_id_byte(buffer: &[u8]) -> Result<u8> {
    if buffer.len() < PREAMBLE_GROUPS_LEN {
        return Err(Error::BufferTooSmall {
            needed: PREAMBLE_GROUPS_LEN,
            got: buffer.len(),
        });
    }

    let mut reader = GroupReader::new(buffer);
    let preamble: [u8; PREAMBLE_LEN] = reader.get_array()?;

    for (index, expected) in [(0, SYSEX_START), (1, UNIVERSAL_NON_REALTIME), (3, MIDI_CI_SUB_ID)] {
        if preamble[index] != expected {
            return Err(Error::InvalidPreamble {
                index,
                expected,
                found: preamble[index],
            });
        }
    }

    Ok(preamble[4])
}
