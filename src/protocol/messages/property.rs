//! Property exchange: capabilities, get/set property data, subscription
//!
//! Header and property data are carried as opaque bytes; their JSON schema is
//! left to the application.

use bytes::Bytes;

use crate::protocol::{CiHeader, Error, GroupReader, GroupWriter, MessageBody, Result, SubId};

/// Property exchange capabilities inquiry and reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyExchangeCapabilities {
    /// Common header
    pub header: CiHeader,
    /// Number of simultaneous property exchange requests supported
    pub supported_count: u8,
    /// Property exchange major version
    pub major: u8,
    /// Property exchange minor version
    pub minor: u8,
}

impl MessageBody for PropertyExchangeCapabilities {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        3
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_u8(self.supported_count)?;
        writer.put_u8(self.major)?;
        writer.put_u8(self.minor)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(Self {
            header,
            supported_count: reader.get_u8()?,
            major: reader.get_u8()?,
            minor: reader.get_u8()?,
        })
    }
}

/// One chunk of a property exchange transaction
///
/// Shared by get, set and subscription, each with its reply.
///
/// # Wire Format
///
/// ```text
/// request_id u8 | header_len u16 | header_data | chunk_count u16 | nth_chunk u16 | property_len u16 | property_data
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyData {
    /// Common header
    pub header: CiHeader,
    /// Request id tying replies to their inquiry
    pub request_id: u8,
    /// Property header (JSON)
    pub header_data: Bytes,
    /// Total number of chunks in the transaction
    pub chunk_count: u16,
    /// Index of this chunk, starting at 1
    pub nth_chunk: u16,
    /// Property data of this chunk
    pub property_data: Bytes,
}

impl PropertyData {
    /// Largest header or property data the length prefixes can express
    pub const MAX_DATA_LEN: usize = u16::MAX as usize;

    /// Single-chunk message with no property data
    #[must_use]
    pub const fn request(header: CiHeader, request_id: u8, header_data: Bytes) -> Self {
        Self {
            header,
            request_id,
            header_data,
            chunk_count: 1,
            nth_chunk: 1,
            property_data: Bytes::new(),
        }
    }

    /// Check whether this is the last chunk of its transaction
    #[must_use]
    pub const fn is_last_chunk(&self) -> bool {
        self.nth_chunk >= self.chunk_count
    }
}

impl MessageBody for PropertyData {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        1 + 2 + self.header_data.len() + 2 + 2 + 2 + self.property_data.len()
    }

    fn validate(&self, _kind: SubId) -> Result<()> {
        let fields = [
            ("header data", &self.header_data),
            ("property data", &self.property_data),
        ];
        for (field, data) in fields {
            if data.len() > Self::MAX_DATA_LEN {
                return Err(Error::LengthOverflow {
                    field,
                    len: data.len(),
                    max: Self::MAX_DATA_LEN,
                });
            }
        }
        Ok(())
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_u8(self.request_id)?;
        writer.put_u16(self.header_data.len() as u16)?;
        writer.put_bytes(&self.header_data)?;
        writer.put_u16(self.chunk_count)?;
        writer.put_u16(self.nth_chunk)?;
        writer.put_u16(self.property_data.len() as u16)?;
        writer.put_bytes(&self.property_data)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let request_id = reader.get_u8()?;
        let header_len = reader.get_u16()?;
        let header_data = reader.get_bytes(usize::from(header_len))?;
        let chunk_count = reader.get_u16()?;
        let nth_chunk = reader.get_u16()?;
        let property_len = reader.get_u16()?;
        let property_data = reader.get_bytes(usize::from(property_len))?;

        Ok(Self {
            header,
            request_id,
            header_data,
            chunk_count,
            nth_chunk,
            property_data,
        })
    }
}

message_functions! {
    PropertyExchangeCapabilities ("property exchange capabilities inquiry"): PropertyExchangeCapabilities =>
        put_property_exchange_capabilities, get_property_exchange_capabilities,
        is_property_exchange_capabilities;
    PropertyExchangeCapabilitiesReply ("property exchange capabilities reply"): PropertyExchangeCapabilities =>
        put_property_exchange_capabilities_reply, get_property_exchange_capabilities_reply,
        is_property_exchange_capabilities_reply;
    GetPropertyData ("get property data inquiry"): PropertyData =>
        put_get_property_data, get_get_property_data, is_get_property_data;
    GetPropertyDataReply ("get property data reply"): PropertyData =>
        put_get_property_data_reply, get_get_property_data_reply, is_get_property_data_reply;
    SetPropertyData ("set property data inquiry"): PropertyData =>
        put_set_property_data, get_set_property_data, is_set_property_data;
    SetPropertyDataReply ("set property data reply"): PropertyData =>
        put_set_property_data_reply, get_set_property_data_reply, is_set_property_data_reply;
    Subscription ("subscription"): PropertyData => put_subscription, get_subscription, is_subscription;
    SubscriptionReply ("subscription reply"): PropertyData =>
        put_subscription_reply, get_subscription_reply, is_subscription_reply;
}
