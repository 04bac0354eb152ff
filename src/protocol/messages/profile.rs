//! Profile configuration messages

use bytes::Bytes;

use crate::protocol::{CiHeader, Error, GroupReader, GroupWriter, MessageBody, ProfileId, Result, SubId};

/// Wire size of one profile id
const PROFILE_ID_LEN: usize = 5;

fn put_profiles(writer: &mut GroupWriter<'_>, profiles: &[ProfileId]) -> Result<()> {
    writer.put_u16(profiles.len() as u16)?;
    for profile in profiles {
        writer.put_bytes(&profile.0)?;
    }
    Ok(())
}

fn get_profiles(reader: &mut GroupReader<'_>) -> Result<Vec<ProfileId>> {
    let count = usize::from(reader.get_u16()?);
    let mut profiles = Vec::with_capacity(count.min(reader.remaining() / PROFILE_ID_LEN));
    for _ in 0..count {
        profiles.push(ProfileId(reader.get_array()?));
    }
    Ok(profiles)
}

/// Answer to a profile inquiry: enabled and disabled profiles
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileReply {
    /// Common header
    pub header: CiHeader,
    /// Currently enabled profiles
    pub enabled: Vec<ProfileId>,
    /// Supported but disabled profiles
    pub disabled: Vec<ProfileId>,
}

impl ProfileReply {
    /// Most profiles either list can hold
    pub const MAX_PROFILES: usize = u16::MAX as usize;
}

impl MessageBody for ProfileReply {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        2 + PROFILE_ID_LEN * self.enabled.len() + 2 + PROFILE_ID_LEN * self.disabled.len()
    }

    fn validate(&self, _kind: SubId) -> Result<()> {
        let lists = [
            ("enabled profiles", &self.enabled),
            ("disabled profiles", &self.disabled),
        ];
        for (field, list) in lists {
            if list.len() > Self::MAX_PROFILES {
                return Err(Error::LengthOverflow {
                    field,
                    len: list.len(),
                    max: Self::MAX_PROFILES,
                });
            }
        }
        Ok(())
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        put_profiles(writer, &self.enabled)?;
        put_profiles(writer, &self.disabled)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let enabled = get_profiles(reader)?;
        let disabled = get_profiles(reader)?;
        Ok(Self {
            header,
            enabled,
            disabled,
        })
    }
}

/// Report that a profile was enabled or disabled (always broadcast)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileReport {
    /// Common header
    pub header: CiHeader,
    /// Affected profile
    pub profile: ProfileId,
    /// Number of channels the profile spans
    pub channel_count: u16,
}

impl MessageBody for ProfileReport {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        PROFILE_ID_LEN + 2
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_bytes(&self.profile.0)?;
        writer.put_u16(self.channel_count)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(Self {
            header,
            profile: ProfileId(reader.get_array()?),
            channel_count: reader.get_u16()?,
        })
    }
}

/// Report that a profile was added or removed (always broadcast)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileChange {
    /// Common header
    pub header: CiHeader,
    /// Affected profile
    pub profile: ProfileId,
}

impl MessageBody for ProfileChange {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        PROFILE_ID_LEN
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_bytes(&self.profile.0)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        Ok(Self {
            header,
            profile: ProfileId(reader.get_array()?),
        })
    }
}

/// Opaque data addressed to one profile
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileSpecificData {
    /// Common header
    pub header: CiHeader,
    /// Target profile
    pub profile: ProfileId,
    /// Profile-defined data
    pub data: Bytes,
}

impl MessageBody for ProfileSpecificData {
    fn header(&self) -> &CiHeader {
        &self.header
    }

    fn payload_len(&self, _kind: SubId) -> usize {
        PROFILE_ID_LEN + 4 + self.data.len()
    }

    fn validate(&self, _kind: SubId) -> Result<()> {
        if u32::try_from(self.data.len()).is_err() {
            return Err(Error::LengthOverflow {
                field: "profile specific data",
                len: self.data.len(),
                max: u32::MAX as usize,
            });
        }
        Ok(())
    }

    fn write_payload(&self, _kind: SubId, writer: &mut GroupWriter<'_>) -> Result<()> {
        writer.put_bytes(&self.profile.0)?;
        writer.put_u32(self.data.len() as u32)?;
        writer.put_bytes(&self.data)
    }

    fn read_payload(_kind: SubId, header: CiHeader, reader: &mut GroupReader<'_>) -> Result<Self> {
        let profile = ProfileId(reader.get_array()?);
        let len = reader.get_u32()? as usize;
        Ok(Self {
            header,
            profile,
            data: reader.get_bytes(len)?,
        })
    }
}

message_functions! {
    Profile ("profile inquiry"): CiHeader => put_profile, get_profile, is_profile;
    ProfileReply ("profile inquiry reply"): ProfileReply => put_profile_reply, get_profile_reply, is_profile_reply;
    ProfileEnabledReport ("profile enabled report"): ProfileReport =>
        put_profile_enabled_report, get_profile_enabled_report, is_profile_enabled_report;
    ProfileDisabledReport ("profile disabled report"): ProfileReport =>
        put_profile_disabled_report, get_profile_disabled_report, is_profile_disabled_report;
    ProfileAdded ("profile added report"): ProfileChange => put_profile_added, get_profile_added, is_profile_added;
    ProfileRemoved ("profile removed report"): ProfileChange =>
        put_profile_removed, get_profile_removed, is_profile_removed;
    ProfileSpecificData ("profile specific data"): ProfileSpecificData =>
        put_profile_specific_data, get_profile_specific_data, is_profile_specific_data;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::fixtures::{broadcast_header, destination, header};
    use crate::protocol::{Muid, group_index, put_muid_with_position};

    const GM2: ProfileId = ProfileId([0x7E, 0x00, 0x01, 0x01, 0x00]);
    const DRAWBAR: ProfileId = ProfileId([0x7E, 0x00, 0x02, 0x01, 0x00]);

    #[test]
    fn test_profile_inquiry() {
        let mut buffer = [0u8; 16];
        assert_eq!(put_profile(&mut buffer, &header()).unwrap(), 16);
        assert!(is_profile(&buffer));
        assert!(!is_profile_reply(&buffer));
        assert_eq!(get_profile(&buffer).unwrap().0, header());
    }

    #[test]
    fn test_profile_reply_roundtrip() {
        let message = ProfileReply {
            header: header(),
            enabled: vec![GM2],
            disabled: vec![DRAWBAR, ProfileId([1, 2, 3, 4, 5])],
        };
        let mut buffer = [0u8; 64];

        // 14 + 2 + 5 + 2 + 10 = 33, terminator at 35
        let written = put_profile_reply(&mut buffer, &message).unwrap();
        assert_eq!(written, 36);
        assert_eq!(buffer[group_index(14)], 1);
        assert_eq!(buffer[group_index(21)], 2);

        let (decoded, consumed) = get_profile_reply(&buffer).unwrap();
        assert_eq!(consumed, 36);
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_profile_reply_empty_lists() {
        let message = ProfileReply {
            header: header(),
            enabled: Vec::new(),
            disabled: Vec::new(),
        };
        let mut buffer = [0u8; 32];

        let written = put_profile_reply(&mut buffer, &message).unwrap();
        assert_eq!(written, 20);
        assert_eq!(get_profile_reply(&buffer).unwrap().0, message);
    }

    #[test]
    fn test_profile_reply_count_beyond_buffer() {
        let message = ProfileReply {
            header: header(),
            enabled: vec![GM2],
            disabled: Vec::new(),
        };
        let mut buffer = [0u8; 32];
        put_profile_reply(&mut buffer, &message).unwrap();

        buffer[group_index(15)] = 0xFF;
        assert!(matches!(get_profile_reply(&buffer), Err(Error::BufferTooSmall { .. })));
    }

    #[test]
    fn test_profile_reports_are_broadcast() {
        let report = ProfileReport {
            header: header(),
            profile: GM2,
            channel_count: 16,
        };
        let mut buffer = [0u8; 24];

        assert_eq!(put_profile_enabled_report(&mut buffer, &report).unwrap(), 24);
        let (decoded, _) = get_profile_enabled_report(&buffer).unwrap();
        assert_eq!(decoded.header.destination, Muid::BROADCAST);
        assert_eq!(decoded.channel_count, 16);
        assert!(!is_profile_disabled_report(&buffer));

        put_profile_disabled_report(&mut buffer, &report).unwrap();
        assert!(is_profile_disabled_report(&buffer));
    }

    #[test]
    fn test_profile_report_rejects_unicast() {
        let report = ProfileReport {
            header: broadcast_header(),
            profile: GM2,
            channel_count: 1,
        };
        let mut buffer = [0u8; 24];
        put_profile_enabled_report(&mut buffer, &report).unwrap();

        put_muid_with_position(&mut buffer, 10, destination()).unwrap();

        assert_eq!(
            get_profile_enabled_report(&buffer),
            Err(Error::ExpectedBroadcast {
                found: destination().as_u32(),
            })
        );
    }

    #[test]
    fn test_profile_added_removed() {
        let change = ProfileChange {
            header: broadcast_header(),
            profile: DRAWBAR,
        };
        let mut buffer = [0u8; 20];

        assert_eq!(put_profile_added(&mut buffer, &change).unwrap(), 20);
        assert_eq!(get_profile_added(&buffer).unwrap(), (change, 20));
        assert!(get_profile_removed(&buffer).is_err());

        put_profile_removed(&mut buffer, &change).unwrap();
        assert_eq!(get_profile_removed(&buffer).unwrap().0, change);
    }

    #[test]
    fn test_profile_specific_data() {
        let message = ProfileSpecificData {
            header: header(),
            profile: GM2,
            data: Bytes::from_static(&[0x10, 0x20, 0x30, 0x40, 0x50]),
        };
        let mut buffer = [0u8; 40];

        // 14 + 5 + 4 + 5 = 28, terminator at 31
        let written = put_profile_specific_data(&mut buffer, &message).unwrap();
        assert_eq!(written, 32);
        assert_eq!(buffer[group_index(19)], 5);

        assert_eq!(get_profile_specific_data(&buffer).unwrap(), (message, 32));
    }
}
