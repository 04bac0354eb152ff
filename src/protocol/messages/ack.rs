//! ACK and NAK

use bytes::Bytes;

use crate::protocol::{CiHeader, Error, GroupReader, GroupWriter, MessageBody, Result, SubId};

/// Positive acknowledgement of an earlier transaction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ack {
    /// Common header
    pub header: CiHeader,
    /// Sub-ID#2 of the message being acknowledged
    pub orig_transaction: u8,
    /// Status code
    pub status_code: u8,
    /// Status data
    pub status_data: u8,
    /// Details for the status code
    pub details: [u8; 5],
    /// Optional text for the user
    pub message: Bytes,
}

impl Ack {
    /// Largest message text the length prefix can express
    pub const MAX_MESSAGE_LEN: usize = u16::MAX as usize;
}

impl MessageBody for Ack {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        3 + 5 + 2 + self.message.len()
    }

    fn validate(&self, _kind: SubId) -> Result<()> {
        if self.message.len() > Self::MAX_MESSAGE_LEN {
            return Err(Error::LengthOverflow {
                field: "ack message",
                len: self.message.len(),
                max: Self::MAX_MESSAGE_LEN,
            });
        }
        Ok(())
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_u8(self.orig_transaction)?;
        writer.put_u8(self.status_code)?;
        writer.put_u8(self.status_data)?;
        writer.put_bytes(&self.details)?;
        writer.put_u16(self.message.len() as u16)?;
        writer.put_bytes(&self.message)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let orig_transaction = reader.get_u8()?;
        let status_code = reader.get_u8()?;
        let status_data = reader.get_u8()?;
        let details = reader.get_array()?;
        let len = reader.get_u16()?;
        let message = reader.get_bytes(usize::from(len))?;

        Ok(Self {
            header,
            orig_transaction,
            status_code,
            status_data,
            details,
            message,
        })
    }
}

message_functions! {
    Ack ("ACK"): Ack => put_ack, get_ack, is_ack;
    Nak ("NAK"): CiHeader => put_nak, get_nak, is_nak;
}
