//! Protocol negotiation: initiate, set, confirm

use crate::protocol::{
    AuthorityLevel, CONFIRM_TEST_PATTERN, CiHeader, Error, GroupReader, GroupWriter, MessageBody,
    ProtocolType, Result, SubId, TEST_PATTERN_LEN,
};

/// Wire size of one protocol type record
const PROTOCOL_TYPE_LEN: usize = 5;

/// Offer (or answer with) the protocols a device supports, most preferred first
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolNegotiation {
    /// Common header
    pub header: CiHeader,
    /// Authority level of the sender
    pub authority_level: AuthorityLevel,
    /// Supported protocols
    pub protocols: Vec<ProtocolType>,
}

impl ProtocolNegotiation {
    /// Most protocols the 8-bit count can announce
    pub const MAX_PROTOCOLS: usize = u8::MAX as usize;
}

impl MessageBody for ProtocolNegotiation {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        2 + PROTOCOL_TYPE_LEN * self.protocols.len()
    }

    fn validate(&self, _kind: SubId) -> Result<()> {
        if self.protocols.len() > Self::MAX_PROTOCOLS {
            return Err(Error::LengthOverflow {
                field: "protocol list",
                len: self.protocols.len(),
                max: Self::MAX_PROTOCOLS,
            });
        }
        Ok(())
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_u8(self.authority_level.0)?;
        writer.put_u8(self.protocols.len() as u8)?;
        for protocol in &self.protocols {
            writer.put_bytes(&protocol.0)?;
        }
        Ok(())
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let authority_level = AuthorityLevel(reader.get_u8()?);
        let count = usize::from(reader.get_u8()?);

        let mut protocols = Vec::with_capacity(count.min(reader.remaining() / PROTOCOL_TYPE_LEN));
        for _ in 0..count {
            protocols.push(ProtocolType(reader.get_array()?));
        }

        Ok(Self {
            header,
            authority_level,
            protocols,
        })
    }
}

/// Switch to a new protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetProtocolType {
    /// Common header
    pub header: CiHeader,
    /// Authority level of the sender
    pub authority_level: AuthorityLevel,
    /// Protocol to switch to
    pub protocol_type: ProtocolType,
}

impl MessageBody for SetProtocolType {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        1 + PROTOCOL_TYPE_LEN
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_u8(self.authority_level.0)?;
        writer.put_bytes(&self.protocol_type.0)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(Self {
            header,
            authority_level: AuthorityLevel(reader.get_u8()?),
            protocol_type: ProtocolType(reader.get_array()?),
        })
    }
}

/// Test (or confirm) a freshly set protocol
///
/// The test and test-reply kinds carry [`CONFIRM_TEST_PATTERN`] after the
/// authority level; the established kind carries only the authority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmProtocolType {
    /// Common header
    pub header: CiHeader,
    /// Authority level of the sender
    pub authority_level: AuthorityLevel,
}

impl ConfirmProtocolType {
    /// Create a confirm message
    #[must_use]
    pub const fn new(header: CiHeader, authority_level: AuthorityLevel) -> Self {
        Self {
            header,
            authority_level,
        }
    }
}

const fn carries_test_pattern(kind: SubId) -> bool {
    !matches!(kind, SubId::ConfirmProtocolTypeEstablished)
}

impl MessageBody for ConfirmProtocolType {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, kind: SubId) -> usize {
        if carries_test_pattern(kind) {
            1 + TEST_PATTERN_LEN
        } else {
            1
        }
    }

    fn write_payload(&self, kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_u8(self.authority_level.0)?;
        if carries_test_pattern(kind) {
            writer.put_bytes(&CONFIRM_TEST_PATTERN)?;
        }
        Ok(())
    }

    fn read_payload(kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let authority_level = AuthorityLevel(reader.get_u8()?);

        if carries_test_pattern(kind) {
            let pattern: [u8; TEST_PATTERN_LEN] = reader.get_array()?;
            if let Some(index) = pattern
                .iter()
                .zip(CONFIRM_TEST_PATTERN.iter())
                .position(|(found, expected)| found != expected)
            {
                return Err(Error::TestPatternMismatch { index });
            }
        }

        Ok(Self::new(header, authority_level))
    }
}

message_functions! {
    InitiateProtocolNegotiation ("initiate protocol negotiation"): ProtocolNegotiation =>
        put_initiate_protocol_negotiation, get_initiate_protocol_negotiation, is_initiate_protocol_negotiation;
    InitiateProtocolNegotiationReply ("initiate protocol negotiation reply"): ProtocolNegotiation =>
        put_initiate_protocol_negotiation_reply, get_initiate_protocol_negotiation_reply,
        is_initiate_protocol_negotiation_reply;
    SetProtocolType ("set protocol type"): SetProtocolType =>
        put_set_protocol_type, get_set_protocol_type, is_set_protocol_type;
    ConfirmProtocolType ("confirm protocol type"): ConfirmProtocolType =>
        put_confirm_protocol_type, get_confirm_protocol_type, is_confirm_protocol_type;
    ConfirmProtocolTypeReply ("confirm protocol type reply"): ConfirmProtocolType =>
        put_confirm_protocol_type_reply, get_confirm_protocol_type_reply, is_confirm_protocol_type_reply;
    ConfirmProtocolTypeEstablished ("confirm protocol type established"): ConfirmProtocolType =>
        put_confirm_protocol_type_established, get_confirm_protocol_type_established,
        is_confirm_protocol_type_established;
}
