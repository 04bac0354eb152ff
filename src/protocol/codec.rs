//! MIDI-CI message codec (encode/decode)
//!
//! Every message kind shares the same frame: header, kind-specific payload,
//! zero padding to a 4-byte group boundary and the `0xF7` terminator. The
//! payload is delegated to a [`MessageBody`].

use tracing::{debug, trace};

use super::cursor::{GroupReader, GroupWriter, padded_len};
use super::header::{CiHeader, read_header, write_header};
use super::{Error, HEADER_LEN, Message, Result, SubId};

/// Kind-specific part of a MIDI-CI message
///
/// One body type may serve several kinds with the same wire shape (a request
/// and its reply, for instance); `kind` tells it which one is being coded.
pub trait MessageBody {
    /// Common header fields
    fn header(&self) -> &CiHeader;

    /// Logical length of the payload following the common header
    fn payload_len(&self, kind: SubId) -> usize;

    /// Reject field values the wire format cannot express
    fn validate(&self, _kind: SubId) -> Result<()> {
        Ok(())
    }

    /// Write the payload in wire order
    fn write_payload(&self, kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()>;

    /// Read the payload in wire order
    fn read_payload(kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self>
    where
        Self: Sized;

    /// Total encoded length, padding and terminator included
    fn encoded_len(&self, kind: SubId) -> usize {
        padded_len(HEADER_LEN + self.payload_len(kind))
    }
}

/// Encode `message` as `kind` into `buffer`, returning the bytes written
///
/// The buffer is left untouched when it is too small or a field is out of range.
pub fn put<M: MessageBody + ?Sized>(buffer: &mut [u8], kind: SubId, message: &M) -> Result<usize> {
    message.validate(kind)?;

    let needed = message.encoded_len(kind);
    if buffer.len() < needed {
        debug!(%kind, needed, got = buffer.len(), "buffer too small for MIDI-CI message");
        return Err(Error::BufferTooSmall {
            needed,
            got: buffer.len(),
        });
    }

    let mut writer = GroupWriter::new(buffer);
    write_header(&mut writer, kind, message.header())?;
    message.write_payload(kind, &mut writer)?;
    let written = writer.pad_and_terminate()?;

    trace!(%kind, len = written, "encoded MIDI-CI message");
    Ok(written)
}

/// Decode a message of `kind` from `buffer`, returning it with the bytes consumed
pub fn get<M: MessageBody>(buffer: &[u8], kind: SubId) -> Result<(M, usize)> {
    match decode_body(buffer, kind) {
        Ok((message, consumed)) => {
            trace!(%kind, len = consumed, "decoded MIDI-CI message");
            Ok((message, consumed))
        }
        Err(err) => {
            debug!(%kind, error = %err, "rejected MIDI-CI message");
            Err(err)
        }
    }
}

fn decode_body<M: MessageBody>(buffer: &[u8], kind: SubId) -> Result<(M, usize)> {
    let (header, mut reader) = read_header(buffer, kind)?;
    let message = M::read_payload(kind, header, &mut reader)?;
    let consumed = reader.expect_terminator()?;
    Ok((message, consumed))
}

/// Encode any message into a freshly allocated buffer
///
/// # Format
///
/// ```text
/// [F0 7E dev 0D] [sub-id version source...] [destination...] [payload] [00..] [F7]
/// ```
///
/// Shown in logical order; each 4-byte group is stored high byte first.
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; message.encoded_len()];
    let written = message.encode_into(&mut bytes)?;
    bytes.truncate(written);
    Ok(bytes)
}

/// Decode any MIDI-CI message, returning it with the bytes consumed
///
/// # Errors
///
/// Returns an error if:
/// - Buffer is too small
/// - Preamble is not a MIDI-CI universal SysEx preamble
/// - Sub-ID#2 is unknown
/// - A broadcast-only kind is not addressed to the broadcast MUID
/// - Confirm-protocol test data is corrupt
/// - Terminator is missing
pub fn decode(bytes: &[u8]) -> Result<(Message, usize)> {
    Message::decode(bytes)
}
