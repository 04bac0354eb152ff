use bytes::Bytes;
use proptest::prelude::*;

use midi_ci::protocol::{
    self, Ack, AuthorityLevel, CiHeader, ConfirmProtocolType, Discovery, Error, InvalidateMuid,
    Message, Muid, ProfileId, ProfileReply, PropertyData, ProtocolNegotiation, ProtocolType,
    SubId, classify, group_index,
};
use midi_ci::{DeviceIdentity, MidiCi, MidiCiConfig};

fn muid(value: u32) -> Muid {
    Muid::new(value).unwrap()
}

fn unicast() -> CiHeader {
    CiHeader::new(0x7F, 0x01, muid(0x0111_1111), muid(0x0222_2222))
}

#[test]
fn discovery_scenario() {
    let message = Discovery {
        header: CiHeader::broadcast(0x7F, 1, muid(0x12345)),
        manufacturer_id: [0x01, 0x00, 0x00],
        device_family: 0x0100,
        device_family_model_number: 0x0001,
        software_revision_level: [1, 0, 0, 0],
        capability: 0x0F,
        max_sysex_message_size: 512,
    };

    let mut buffer = [0u8; 64];
    let written = protocol::put_discovery(&mut buffer, &message).unwrap();
    assert_eq!(written % 4, 0);
    assert!(protocol::is_discovery(&buffer));

    let (decoded, consumed) = protocol::get_discovery(&buffer).unwrap();
    assert_eq!(consumed, written);
    assert_eq!(decoded.header.device_id, 0x7F);
    assert_eq!(decoded.header.version, 1);
    assert_eq!(decoded.header.source.as_u32(), 0x12345);
    assert_eq!(decoded.manufacturer_id, [0x01, 0x00, 0x00]);
    assert_eq!(decoded.device_family, 0x0100);
    assert_eq!(decoded.device_family_model_number, 0x0001);
    assert_eq!(decoded.software_revision_level, [1, 0, 0, 0]);
    assert_eq!(decoded.capability, 0x0F);
    assert_eq!(decoded.max_sysex_message_size, 512);
}

#[test]
fn invalidate_muid_scenario() {
    let message = InvalidateMuid::new(CiHeader::broadcast(0x7F, 1, muid(100)), Muid::BROADCAST);

    let mut buffer = [0u8; 32];
    let written = protocol::put_invalidate_muid(&mut buffer, &message).unwrap();
    assert!(protocol::is_invalidate_muid(&buffer));

    let (decoded, consumed) = protocol::get_invalidate_muid(&buffer).unwrap();
    assert_eq!(consumed, written);
    assert_eq!(decoded.target_muid, Muid::BROADCAST);
    assert_eq!(decoded.header.source.as_u32(), 100);
}

#[test]
fn physical_preamble() {
    let bytes = Message::Nak(CiHeader::new(0x05, 0x01, muid(1), muid(2))).encode().unwrap();

    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..4], &[0x0D, 0x05, 0x7E, 0xF0]);
    assert_eq!(bytes[7], 0x7F);
    assert_eq!(bytes[6], 0x01);
    assert_eq!(bytes[12], 0xF7);
}

#[test]
fn empty_payloads_roundtrip() {
    let messages = [
        Message::Ack(Ack {
            header: unicast(),
            orig_transaction: 0x12,
            status_code: 0,
            status_data: 0,
            details: [0; 5],
            message: Bytes::new(),
        }),
        Message::InitiateProtocolNegotiation(ProtocolNegotiation {
            header: unicast(),
            authority_level: AuthorityLevel::APPLICATION,
            protocols: Vec::new(),
        }),
        Message::ProfileReply(ProfileReply {
            header: unicast(),
            enabled: Vec::new(),
            disabled: Vec::new(),
        }),
        Message::GetPropertyDataReply(PropertyData {
            header: unicast(),
            request_id: 0,
            header_data: Bytes::new(),
            chunk_count: 0,
            nth_chunk: 0,
            property_data: Bytes::new(),
        }),
    ];

    for message in messages {
        let bytes = message.encode().unwrap();
        assert_eq!(Message::decode(&bytes).unwrap(), (message, bytes.len()));
    }
}

#[test]
fn largest_property_data_roundtrip() {
    let message = Message::SetPropertyDataReply(PropertyData {
        header: unicast(),
        request_id: 0x7F,
        header_data: Bytes::from_static(br#"{"status":200}"#),
        chunk_count: 1,
        nth_chunk: 1,
        property_data: Bytes::from((0..65_535u32).map(|i| (i % 128) as u8).collect::<Vec<_>>()),
    });

    let bytes = message.encode().unwrap();
    let (decoded, consumed) = Message::decode(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(decoded, message);
}

#[test]
fn protocol_negotiation_session() {
    let initiator = MidiCi::with_source(MidiCiConfig::default(), || 0x0000_1000_u32);
    let responder = MidiCi::with_source(MidiCiConfig::default(), || 0x0000_2000_u32);

    let offer = Message::InitiateProtocolNegotiation(ProtocolNegotiation {
        header: initiator.header(responder.muid()),
        authority_level: AuthorityLevel::HOST,
        protocols: vec![ProtocolType::MIDI_2, ProtocolType::MIDI_1],
    });
    let bytes = offer.encode().unwrap();

    let (received, _) = Message::decode(&bytes).unwrap();
    assert!(responder.is_addressed_to_me(received.header()));
    assert!(!initiator.is_addressed_to_me(received.header()));

    let confirm = ConfirmProtocolType::new(responder.header(initiator.muid()), AuthorityLevel::ENDPOINT);
    let mut buffer = [0u8; 64];
    let written = protocol::put_confirm_protocol_type_reply(&mut buffer, &confirm).unwrap();
    assert_eq!(written, 64);
    assert_eq!(classify(&buffer), Some(SubId::ConfirmProtocolTypeReply));
    assert_eq!(protocol::get_confirm_protocol_type_reply(&buffer).unwrap().0, confirm);
}

#[test]
fn discovery_from_session() {
    let session = MidiCi::new(MidiCiConfig::default().with_device_id(0x00));
    let identity = DeviceIdentity {
        manufacturer_id: [0x7D, 0x00, 0x00],
        max_sysex_message_size: 4096,
        ..DeviceIdentity::default()
    };

    let bytes = Message::Discovery(session.discovery(&identity)).encode().unwrap();
    let (decoded, _) = Message::decode(&bytes).unwrap();
    let Message::Discovery(discovery) = decoded else {
        panic!("expected discovery, got {decoded:?}");
    };
    assert_eq!(discovery.header.device_id, 0x00);
    assert_eq!(discovery.header.source, session.muid());
    assert_eq!(discovery.max_sysex_message_size, 4096);
}

#[test]
fn broadcast_only_kinds_reject_unicast() {
    let change = protocol::ProfileChange {
        header: CiHeader::broadcast(0x7F, 1, muid(5)),
        profile: ProfileId([0x7E, 0, 1, 1, 0]),
    };
    let mut bytes = Message::ProfileAdded(change).encode().unwrap();

    protocol::put_muid_with_position(&mut bytes, 10, muid(6)).unwrap();
    assert_eq!(Message::decode(&bytes), Err(Error::ExpectedBroadcast { found: 6 }));
}

#[test]
fn truncated_input_is_rejected() {
    let bytes = Message::Nak(unicast()).encode().unwrap();
    for len in 0..bytes.len() {
        assert!(matches!(
            Message::decode(&bytes[..len]),
            Err(Error::BufferTooSmall { .. })
        ));
    }
}

#[test]
fn predicates_do_not_mutate() {
    let bytes = Message::Profile(unicast()).encode().unwrap();
    let copy = bytes.clone();

    assert!(protocol::is_profile(&bytes));
    assert!(!protocol::is_nak(&bytes));
    assert_eq!(bytes, copy);
    assert_eq!(bytes[group_index(4)], SubId::Profile.as_u8());
}

proptest! {
    #[test]
    fn prop_ack_roundtrip(
        source in 0u32..=Muid::MAX,
        destination in 0u32..=Muid::MAX,
        status in any::<[u8; 3]>(),
        details in any::<[u8; 5]>(),
        text in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let message = Message::Ack(Ack {
            header: CiHeader::new(0x7F, 1, muid(source), muid(destination)),
            orig_transaction: status[0],
            status_code: status[1],
            status_data: status[2],
            details,
            message: Bytes::from(text),
        });

        let bytes = message.encode().unwrap();
        prop_assert_eq!(Message::decode(&bytes).unwrap(), (message, bytes.len()));
    }

    #[test]
    fn prop_classify_agrees_with_sub_id(kind in proptest::sample::select(SubId::ALL.to_vec())) {
        let header = if kind.is_broadcast() {
            CiHeader::broadcast(0x7F, 1, muid(1))
        } else {
            unicast()
        };
        let mut buffer = [0u8; 16];
        protocol::put(&mut buffer, kind, &header).unwrap();

        prop_assert_eq!(classify(&buffer), Some(kind));
        for other in SubId::ALL {
            prop_assert_eq!(protocol::is_kind(&buffer, other), other == kind);
        }
    }
}
