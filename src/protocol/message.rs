//! Any MIDI-CI message

use tracing::debug;

use super::header::{CiHeader, classify, sub_id_byte};
use super::messages::{
    Ack, ConfirmProtocolType, Discovery, InvalidateMuid, MessageReport, MessageReportReply,
    ProcessCapabilitiesReply, ProfileChange, ProfileReply, ProfileReport, ProfileSpecificData,
    PropertyData, PropertyExchangeCapabilities, ProtocolNegotiation, SetProtocolType,
};
use super::{Error, MessageBody, Result, SubId, codec};

macro_rules! message_enum {
    ($($(#[$doc:meta])* $kind:ident($ty:ty),)+) => {
        /// MIDI-CI message of any kind
        ///
        /// Each variant is named after its Sub-ID#2 and wraps the payload
        /// struct shared by kinds of the same wire shape.
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Message {
            $($(#[$doc])* $kind($ty),)+
        }

        impl Message {
            /// Message kind
            #[must_use]
            pub const fn sub_id(&self) -> SubId {
                match self {
                    $(Self::$kind(_) => SubId::$kind,)+
                }
            }

            /// Kind-specific body, as the generic codec sees it
            #[must_use]
            pub fn body(&self) -> &dyn MessageBody {
                match self {
                    $(Self::$kind(body) => body,)+
                }
            }

            fn decode_kind(kind: SubId, buffer: &[u8]) -> Result<(Self, usize)> {
                match kind {
                    $(SubId::$kind => codec::get(buffer, kind).map(|(body, len)| (Self::$kind(body), len)),)+
                }
            }
        }
    };
}

message_enum! {
    /// Discovery (0x70)
    Discovery(Discovery),
    /// Reply to discovery (0x71)
    DiscoveryReply(Discovery),
    /// Invalidate MUID (0x7E)
    InvalidateMuid(InvalidateMuid),
    /// ACK (0x7D)
    Ack(Ack),
    /// NAK (0x7F)
    Nak(CiHeader),
    /// Initiate protocol negotiation (0x10)
    InitiateProtocolNegotiation(ProtocolNegotiation),
    /// Reply to initiate protocol negotiation (0x11)
    InitiateProtocolNegotiationReply(ProtocolNegotiation),
    /// Set new protocol (0x12)
    SetProtocolType(SetProtocolType),
    /// Test new protocol (0x13)
    ConfirmProtocolType(ConfirmProtocolType),
    /// Test new protocol reply (0x14)
    ConfirmProtocolTypeReply(ConfirmProtocolType),
    /// New protocol established (0x15)
    ConfirmProtocolTypeEstablished(ConfirmProtocolType),
    /// Profile inquiry (0x20)
    Profile(CiHeader),
    /// Reply to profile inquiry (0x21)
    ProfileReply(ProfileReply),
    /// Profile enabled report (0x24)
    ProfileEnabledReport(ProfileReport),
    /// Profile disabled report (0x25)
    ProfileDisabledReport(ProfileReport),
    /// Profile added report (0x26)
    ProfileAdded(ProfileChange),
    /// Profile removed report (0x27)
    ProfileRemoved(ProfileChange),
    /// Profile specific data (0x2F)
    ProfileSpecificData(ProfileSpecificData),
    /// Property exchange capabilities inquiry (0x30)
    PropertyExchangeCapabilities(PropertyExchangeCapabilities),
    /// Reply to property exchange capabilities (0x31)
    PropertyExchangeCapabilitiesReply(PropertyExchangeCapabilities),
    /// Get property data inquiry (0x34)
    GetPropertyData(PropertyData),
    /// Reply to get property data (0x35)
    GetPropertyDataReply(PropertyData),
    /// Set property data inquiry (0x36)
    SetPropertyData(PropertyData),
    /// Reply to set property data (0x37)
    SetPropertyDataReply(PropertyData),
    /// Subscription (0x38)
    Subscription(PropertyData),
    /// Reply to subscription (0x39)
    SubscriptionReply(PropertyData),
    /// Process inquiry capabilities (0x40)
    ProcessCapabilities(CiHeader),
    /// Reply to process inquiry capabilities (0x41)
    ProcessCapabilitiesReply(ProcessCapabilitiesReply),
    /// MIDI message report inquiry (0x42)
    MessageReport(MessageReport),
    /// Reply to MIDI message report (0x43)
    MessageReportReply(MessageReportReply),
    /// End of MIDI message report (0x44)
    EndOfMessageReport(CiHeader),
}

impl Message {
    /// Common header
    #[must_use]
    pub fn header(&self) -> &CiHeader {
        self.body().header()
    }

    /// Encoded size, padding and terminator included
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.body().encoded_len(self.sub_id())
    }

    /// Encode into a caller-owned buffer, returning the bytes written
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize> {
        codec::put(buffer, self.sub_id(), self.body())
    }

    /// Encode into an exactly sized buffer
    pub fn encode(&self) -> Result<Vec<u8>> {
        codec::encode(self)
    }

    /// Decode any message, returning it with the bytes consumed
    pub fn decode(buffer: &[u8]) -> Result<(Self, usize)> {
        let Some(kind) = classify(buffer) else {
            // Distinguish a foreign preamble from an unknown kind
            let found = sub_id_byte(buffer)?;
            debug!(found, "unknown MIDI-CI sub-id");
            return Err(Error::UnknownSubId { found });
        };
        Self::decode_kind(kind, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::fixtures::{all_messages, header};
    use crate::protocol::{Muid, is_kind};

    #[test]
    fn test_fixtures_cover_every_kind() {
        let kinds: Vec<SubId> = all_messages().iter().map(Message::sub_id).collect();
        for kind in SubId::ALL {
            assert!(kinds.contains(&kind), "missing {kind}");
        }
        assert_eq!(kinds.len(), SubId::ALL.len());
    }

    #[test]
    fn test_roundtrip_every_kind() {
        for message in all_messages() {
            let encoded = message.encode().unwrap();
            assert_eq!(encoded.len(), message.encoded_len());
            assert_eq!(encoded.len() % 4, 0);

            let (decoded, consumed) = Message::decode(&encoded).unwrap();
            assert_eq!(decoded, message, "{}", message.sub_id());
            assert_eq!(consumed, encoded.len());
        }
    }

    #[test]
    fn test_is_kind_matches_only_own_kind() {
        for message in all_messages() {
            let encoded = message.encode().unwrap();
            for kind in SubId::ALL {
                assert_eq!(is_kind(&encoded, kind), kind == message.sub_id(), "{kind}");
            }
        }
    }

    #[test]
    fn test_header_accessor() {
        let message = Message::Nak(header());
        assert_eq!(message.header(), &header());
        assert_eq!(message.sub_id(), SubId::Nak);
        assert_eq!(message.encoded_len(), 16);
    }

    #[test]
    fn test_encode_into_small_buffer() {
        let message = Message::Profile(header());
        let mut buffer = [0u8; 12];
        assert_eq!(
            message.encode_into(&mut buffer),
            Err(Error::BufferTooSmall { needed: 16, got: 12 })
        );
    }

    #[test]
    fn test_decode_foreign_preamble() {
        let mut encoded = Message::Nak(header()).encode().unwrap();
        encoded[2] = 0x7F;
        assert!(matches!(
            Message::decode(&encoded),
            Err(Error::InvalidPreamble { index: 1, .. })
        ));
    }

    #[test]
    fn test_broadcast_kinds_decode_broadcast() {
        for message in all_messages() {
            let encoded = message.encode().unwrap();
            let (decoded, _) = Message::decode(&encoded).unwrap();
            if message.sub_id().is_broadcast() {
                assert_eq!(decoded.header().destination, Muid::BROADCAST);
            }
        }
    }
}
