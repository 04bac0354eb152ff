//! Discovery, discovery reply and invalidate MUID

use crate::protocol::{CiHeader, GroupReader, GroupWriter, MessageBody, Muid, Result, SubId};

/// Device identity announced by discovery and discovery reply
///
/// Discovery is always broadcast; the reply is addressed to the inquirer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Discovery {
    /// Common header
    pub header: CiHeader,
    /// SysEx manufacturer ID (1- or 3-byte form, zero padded)
    pub manufacturer_id: [u8; 3],
    /// Device family
    pub device_family: u16,
    /// Device family model number
    pub device_family_model_number: u16,
    /// Software revision level
    pub software_revision_level: [u8; 4],
    /// Capability inquiry category bits
    pub capability: u8,
    /// Largest SysEx message the device accepts
    pub max_sysex_message_size: u32,
}

impl Discovery {
    /// Known capability bits of [`Self::capability`]
    #[must_use]
    pub const fn capabilities(&self) -> crate::protocol::Capability {
        crate::protocol::Capability::from_u8(self.capability)
    }
}

impl MessageBody for Discovery {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        3 + 2 + 2 + 4 + 1 + 4
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_bytes(&self.manufacturer_id)?;
        writer.put_u16(self.device_family)?;
        writer.put_u16(self.device_family_model_number)?;
        writer.put_bytes(&self.software_revision_level)?;
        writer.put_u8(self.capability)?;
        writer.put_u32(self.max_sysex_message_size)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(Self {
            header,
            manufacturer_id: reader.get_array()?,
            device_family: reader.get_u16()?,
            device_family_model_number: reader.get_u16()?,
            software_revision_level: reader.get_array()?,
            capability: reader.get_u8()?,
            max_sysex_message_size: reader.get_u32()?,
        })
    }
}

/// Ask every device to drop a MUID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidateMuid {
    /// Common header (destination is always broadcast)
    pub header: CiHeader,
    /// MUID to invalidate
    pub target_muid: Muid,
}

impl InvalidateMuid {
    /// Create an invalidate MUID message
    #[must_use]
    pub const fn new(header: CiHeader, target_muid: Muid) -> Self {
        Self {
            header,
            target_muid,
        }
    }
}

impl MessageBody for InvalidateMuid {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        4
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_muid(self.target_muid)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(Self {
            header,
            target_muid: reader.get_muid()?,
        })
    }
}

message_functions! {
    Discovery ("discovery"): Discovery => put_discovery, get_discovery, is_discovery;
    DiscoveryReply ("discovery reply"): Discovery => put_discovery_reply, get_discovery_reply, is_discovery_reply;
    InvalidateMuid ("invalidate MUID"): InvalidateMuid => put_invalidate_muid, get_invalidate_muid, is_invalidate_muid;
}
