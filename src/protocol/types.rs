//! MIDI-CI message kinds and small wire value types

use std::fmt;

/// MIDI-CI Sub-ID#2: identifies the message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SubId {
    /// Initiate protocol negotiation
    InitiateProtocolNegotiation = 0x10,
    /// Reply to initiate protocol negotiation
    InitiateProtocolNegotiationReply = 0x11,
    /// Set new protocol
    SetProtocolType = 0x12,
    /// Test new protocol (initiator to responder)
    ConfirmProtocolType = 0x13,
    /// Test new protocol (responder to initiator)
    ConfirmProtocolTypeReply = 0x14,
    /// Confirmation new protocol established
    ConfirmProtocolTypeEstablished = 0x15,

    /// Profile inquiry
    Profile = 0x20,
    /// Reply to profile inquiry
    ProfileReply = 0x21,
    /// Profile enabled report
    ProfileEnabledReport = 0x24,
    /// Profile disabled report
    ProfileDisabledReport = 0x25,
    /// Profile added report
    ProfileAdded = 0x26,
    /// Profile removed report
    ProfileRemoved = 0x27,
    /// Profile specific data
    ProfileSpecificData = 0x2F,

    /// Inquiry: property exchange capabilities
    PropertyExchangeCapabilities = 0x30,
    /// Reply to property exchange capabilities
    PropertyExchangeCapabilitiesReply = 0x31,
    /// Inquiry: get property data
    GetPropertyData = 0x34,
    /// Reply to get property data
    GetPropertyDataReply = 0x35,
    /// Inquiry: set property data
    SetPropertyData = 0x36,
    /// Reply to set property data
    SetPropertyDataReply = 0x37,
    /// Subscription
    Subscription = 0x38,
    /// Reply to subscription
    SubscriptionReply = 0x39,

    /// Inquiry: process inquiry capabilities
    ProcessCapabilities = 0x40,
    /// Reply to process inquiry capabilities
    ProcessCapabilitiesReply = 0x41,
    /// Inquiry: MIDI message report
    MessageReport = 0x42,
    /// Reply to MIDI message report
    MessageReportReply = 0x43,
    /// End of MIDI message report
    EndOfMessageReport = 0x44,

    /// Discovery
    Discovery = 0x70,
    /// Reply to discovery
    DiscoveryReply = 0x71,
    /// ACK
    Ack = 0x7D,
    /// Invalidate MUID
    InvalidateMuid = 0x7E,
    /// NAK
    Nak = 0x7F,
}

impl SubId {
    /// Every message kind, in Sub-ID order
    pub const ALL: [Self; 31] = [
        Self::InitiateProtocolNegotiation,
        Self::InitiateProtocolNegotiationReply,
        Self::SetProtocolType,
        Self::ConfirmProtocolType,
        Self::ConfirmProtocolTypeReply,
        Self::ConfirmProtocolTypeEstablished,
        Self::Profile,
        Self::ProfileReply,
        Self::ProfileEnabledReport,
        Self::ProfileDisabledReport,
        Self::ProfileAdded,
        Self::ProfileRemoved,
        Self::ProfileSpecificData,
        Self::PropertyExchangeCapabilities,
        Self::PropertyExchangeCapabilitiesReply,
        Self::GetPropertyData,
        Self::GetPropertyDataReply,
        Self::SetPropertyData,
        Self::SetPropertyDataReply,
        Self::Subscription,
        Self::SubscriptionReply,
        Self::ProcessCapabilities,
        Self::ProcessCapabilitiesReply,
        Self::MessageReport,
        Self::MessageReportReply,
        Self::EndOfMessageReport,
        Self::Discovery,
        Self::DiscoveryReply,
        Self::Ack,
        Self::InvalidateMuid,
        Self::Nak,
    ];

    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x10 => Some(Self::InitiateProtocolNegotiation),
            0x11 => Some(Self::InitiateProtocolNegotiationReply),
            0x12 => Some(Self::SetProtocolType),
            0x13 => Some(Self::ConfirmProtocolType),
            0x14 => Some(Self::ConfirmProtocolTypeReply),
            0x15 => Some(Self::ConfirmProtocolTypeEstablished),
            0x20 => Some(Self::Profile),
            0x21 => Some(Self::ProfileReply),
            0x24 => Some(Self::ProfileEnabledReport),
            0x25 => Some(Self::ProfileDisabledReport),
            0x26 => Some(Self::ProfileAdded),
            0x27 => Some(Self::ProfileRemoved),
            0x2F => Some(Self::ProfileSpecificData),
            0x30 => Some(Self::PropertyExchangeCapabilities),
            0x31 => Some(Self::PropertyExchangeCapabilitiesReply),
            0x34 => Some(Self::GetPropertyData),
            0x35 => Some(Self::GetPropertyDataReply),
            0x36 => Some(Self::SetPropertyData),
            0x37 => Some(Self::SetPropertyDataReply),
            0x38 => Some(Self::Subscription),
            0x39 => Some(Self::SubscriptionReply),
            0x40 => Some(Self::ProcessCapabilities),
            0x41 => Some(Self::ProcessCapabilitiesReply),
            0x42 => Some(Self::MessageReport),
            0x43 => Some(Self::MessageReportReply),
            0x44 => Some(Self::EndOfMessageReport),
            0x70 => Some(Self::Discovery),
            0x71 => Some(Self::DiscoveryReply),
            0x7D => Some(Self::Ack),
            0x7E => Some(Self::InvalidateMuid),
            0x7F => Some(Self::Nak),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this kind is always sent to the broadcast MUID
    #[must_use]
    pub const fn is_broadcast(self) -> bool {
        matches!(
            self,
            Self::Discovery
                | Self::InvalidateMuid
                | Self::ProfileEnabledReport
                | Self::ProfileDisabledReport
                | Self::ProfileAdded
                | Self::ProfileRemoved
        )
    }

    /// Check if this kind answers an inquiry
    #[must_use]
    pub const fn is_reply(self) -> bool {
        matches!(
            self,
            Self::InitiateProtocolNegotiationReply
                | Self::ConfirmProtocolTypeReply
                | Self::ProfileReply
                | Self::PropertyExchangeCapabilitiesReply
                | Self::GetPropertyDataReply
                | Self::SetPropertyDataReply
                | Self::SubscriptionReply
                | Self::ProcessCapabilitiesReply
                | Self::MessageReportReply
                | Self::DiscoveryReply
        )
    }
}

impl fmt::Display for SubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InitiateProtocolNegotiation => "InitiateProtocolNegotiation",
            Self::InitiateProtocolNegotiationReply => "InitiateProtocolNegotiationReply",
            Self::SetProtocolType => "SetProtocolType",
            Self::ConfirmProtocolType => "ConfirmProtocolType",
            Self::ConfirmProtocolTypeReply => "ConfirmProtocolTypeReply",
            Self::ConfirmProtocolTypeEstablished => "ConfirmProtocolTypeEstablished",
            Self::Profile => "Profile",
            Self::ProfileReply => "ProfileReply",
            Self::ProfileEnabledReport => "ProfileEnabledReport",
            Self::ProfileDisabledReport => "ProfileDisabledReport",
            Self::ProfileAdded => "ProfileAdded",
            Self::ProfileRemoved => "ProfileRemoved",
            Self::ProfileSpecificData => "ProfileSpecificData",
            Self::PropertyExchangeCapabilities => "PropertyExchangeCapabilities",
            Self::PropertyExchangeCapabilitiesReply => "PropertyExchangeCapabilitiesReply",
            Self::GetPropertyData => "GetPropertyData",
            Self::GetPropertyDataReply => "GetPropertyDataReply",
            Self::SetPropertyData => "SetPropertyData",
            Self::SetPropertyDataReply => "SetPropertyDataReply",
            Self::Subscription => "Subscription",
            Self::SubscriptionReply => "SubscriptionReply",
            Self::ProcessCapabilities => "ProcessCapabilities",
            Self::ProcessCapabilitiesReply => "ProcessCapabilitiesReply",
            Self::MessageReport => "MessageReport",
            Self::MessageReportReply => "MessageReportReply",
            Self::EndOfMessageReport => "EndOfMessageReport",
            Self::Discovery => "Discovery",
            Self::DiscoveryReply => "DiscoveryReply",
            Self::Ack => "Ack",
            Self::InvalidateMuid => "InvalidateMuid",
            Self::Nak => "Nak",
        };
        write!(f, "{name}")
    }
}

/// 5-byte profile identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileId(pub [u8; 5]);

impl From<[u8; 5]> for ProfileId {
    fn from(bytes: [u8; 5]) -> Self {
        Self(bytes)
    }
}

/// 5-byte protocol type record (protocol, version, extensions, 2 reserved)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolType(pub [u8; 5]);

impl ProtocolType {
    /// MIDI 1.0, no extensions
    pub const MIDI_1: Self = Self([0x01, 0x00, 0x00, 0x00, 0x00]);
    /// MIDI 2.0, no extensions
    pub const MIDI_2: Self = Self([0x02, 0x00, 0x00, 0x00, 0x00]);
}

impl From<[u8; 5]> for ProtocolType {
    fn from(bytes: [u8; 5]) -> Self {
        Self(bytes)
    }
}

/// Authority level of the negotiating device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthorityLevel(pub u8);

impl AuthorityLevel {
    /// Transport layer
    pub const TRANSPORT: Self = Self(0x10);
    /// Endpoint device
    pub const ENDPOINT: Self = Self(0x20);
    /// Host operating system / MIDI driver
    pub const HOST: Self = Self(0x30);
    /// Application
    pub const APPLICATION: Self = Self(0x40);
    /// Highest authority
    pub const HIGHEST: Self = Self(0x60);
}

/// Capability bits carried by discovery messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capability(u8);

impl Capability {
    /// Valid capability bits mask
    pub const VALID_MASK: u8 = Self::PROTOCOL_NEGOTIATION
        | Self::PROFILE_CONFIGURATION
        | Self::PROPERTY_EXCHANGE
        | Self::PROCESS_INQUIRY;
    /// Protocol negotiation supported
    pub const PROTOCOL_NEGOTIATION: u8 = 1 << 1;
    /// Profile configuration supported
    pub const PROFILE_CONFIGURATION: u8 = 1 << 2;
    /// Property exchange supported
    pub const PROPERTY_EXCHANGE: u8 = 1 << 3;
    /// Process inquiry supported
    pub const PROCESS_INQUIRY: u8 = 1 << 4;

    /// Create empty capabilities
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create from byte, keeping only known bits
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        Self(value & Self::VALID_MASK)
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Set a capability
    #[must_use]
    pub const fn with(mut self, bit: u8) -> Self {
        debug_assert!(bit & !Self::VALID_MASK == 0, "invalid capability bit");
        self.0 |= bit;
        self
    }

    /// Check if capability is set
    #[must_use]
    pub const fn has(self, bit: u8) -> bool {
        (self.0 & bit) != 0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.has(Self::PROTOCOL_NEGOTIATION) {
            parts.push("PROTOCOL_NEGOTIATION");
        }
        if self.has(Self::PROFILE_CONFIGURATION) {
            parts.push("PROFILE_CONFIGURATION");
        }
        if self.has(Self::PROPERTY_EXCHANGE) {
            parts.push("PROPERTY_EXCHANGE");
        }
        if self.has(Self::PROCESS_INQUIRY) {
            parts.push("PROCESS_INQUIRY");
        }
        if parts.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", parts.join(" | "))
        }
    }
}
