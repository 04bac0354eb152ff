//! MIDI-CI session helper
//!
//! Owns the local MUID and stamps the configured header fields into outgoing
//! messages. It keeps no other protocol state.

use tracing::debug;

use crate::protocol::{
    Capability, CiHeader, DEVICE_ID_WHOLE_PORT, Discovery, InvalidateMuid, Muid, MuidSource,
    PropertyExchangeCapabilities, UuidMuidSource, generate_muid,
};

/// Configurable parameters for a [`MidiCi`] session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiCiConfig {
    /// Device ID written into every header (default `0x7F`, whole port)
    pub device_id: u8,
    /// Message format version (default 1)
    pub version: u8,
    /// Property exchange major version announced in capabilities (default 1)
    pub property_exchange_major: u8,
    /// Property exchange minor version announced in capabilities (default 2)
    pub property_exchange_minor: u8,
}

impl Default for MidiCiConfig {
    fn default() -> Self {
        Self {
            device_id: DEVICE_ID_WHOLE_PORT,
            version: 0x01,
            property_exchange_major: 1,
            property_exchange_minor: 2,
        }
    }
}

impl MidiCiConfig {
    /// Set the device ID
    #[must_use]
    pub const fn with_device_id(mut self, device_id: u8) -> Self {
        self.device_id = device_id;
        self
    }

    /// Set the message format version
    #[must_use]
    pub const fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Set the property exchange version
    #[must_use]
    pub const fn with_property_exchange_version(mut self, major: u8, minor: u8) -> Self {
        self.property_exchange_major = major;
        self.property_exchange_minor = minor;
        self
    }
}

/// Identity a device announces in discovery messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// SysEx manufacturer ID
    pub manufacturer_id: [u8; 3],
    /// Device family
    pub device_family: u16,
    /// Device family model number
    pub device_family_model_number: u16,
    /// Software revision level
    pub software_revision_level: [u8; 4],
    /// Supported capability categories
    pub capability: Capability,
    /// Largest SysEx message the device accepts
    pub max_sysex_message_size: u32,
}

/// Local MIDI-CI endpoint
#[derive(Debug, Clone)]
pub struct MidiCi<S: MuidSource = UuidMuidSource> {
    config: MidiCiConfig,
    source: S,
    muid: Muid,
}

impl MidiCi {
    /// Create a session drawing MUIDs from random UUIDs
    #[must_use]
    pub fn new(config: MidiCiConfig) -> Self {
        Self::with_source(config, UuidMuidSource)
    }
}

impl<S: MuidSource> MidiCi<S> {
    /// Create a session with a custom MUID source
    pub fn with_source(config: MidiCiConfig, mut source: S) -> Self {
        let muid = generate_muid(&mut source);
        debug!(%muid, "generated local MUID");
        Self {
            config,
            source,
            muid,
        }
    }

    /// Session configuration
    #[must_use]
    pub const fn config(&self) -> &MidiCiConfig {
        &self.config
    }

    /// Local MUID
    #[must_use]
    pub const fn muid(&self) -> Muid {
        self.muid
    }

    /// Draw a fresh MUID without adopting it
    pub fn generate_muid(&mut self) -> Muid {
        generate_muid(&mut self.source)
    }

    /// Replace the local MUID, e.g. after another device invalidated it
    pub fn regenerate_muid(&mut self) -> Muid {
        let previous = self.muid;
        self.muid = generate_muid(&mut self.source);
        debug!(%previous, muid = %self.muid, "regenerated local MUID");
        self.muid
    }

    /// Header from the local MUID to `destination`
    #[must_use]
    pub const fn header(&self, destination: Muid) -> CiHeader {
        CiHeader::new(self.config.device_id, self.config.version, self.muid, destination)
    }

    /// Header from the local MUID to every device
    #[must_use]
    pub const fn broadcast_header(&self) -> CiHeader {
        self.header(Muid::BROADCAST)
    }

    /// Discovery announcing `identity`
    #[must_use]
    pub const fn discovery(&self, identity: &DeviceIdentity) -> Discovery {
        self.identity_message(self.broadcast_header(), identity)
    }

    /// Discovery reply announcing `identity` to `destination`
    #[must_use]
    pub const fn discovery_reply(&self, destination: Muid, identity: &DeviceIdentity) -> Discovery {
        self.identity_message(self.header(destination), identity)
    }

    const fn identity_message(&self, header: CiHeader, identity: &DeviceIdentity) -> Discovery {
        Discovery {
            header,
            manufacturer_id: identity.manufacturer_id,
            device_family: identity.device_family,
            device_family_model_number: identity.device_family_model_number,
            software_revision_level: identity.software_revision_level,
            capability: identity.capability.as_u8(),
            max_sysex_message_size: identity.max_sysex_message_size,
        }
    }

    /// Ask every device to drop `target`
    #[must_use]
    pub const fn invalidate_muid(&self, target: Muid) -> InvalidateMuid {
        InvalidateMuid::new(self.broadcast_header(), target)
    }

    /// Property exchange capabilities with the configured version
    #[must_use]
    pub const fn property_exchange_capabilities(
        &self,
        destination: Muid,
        supported_count: u8,
    ) -> PropertyExchangeCapabilities {
        PropertyExchangeCapabilities {
            header: self.header(destination),
            supported_count,
            major: self.config.property_exchange_major,
            minor: self.config.property_exchange_minor,
        }
    }

    /// Check whether a received message targets this session
    ///
    /// True for the local MUID and for broadcast.
    #[must_use]
    pub const fn is_addressed_to_me(&self, header: &CiHeader) -> bool {
        header.destination.is_broadcast() || header.destination.as_u32() == self.muid.as_u32()
    }
}
