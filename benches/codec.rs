use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use midi_ci::protocol::{
    self, CiHeader, Discovery, Message, Muid, PropertyData, get_discovery, put_discovery,
};

fn header() -> CiHeader {
    CiHeader::new(0x7F, 0x01, Muid::from_truncated(0x0123_4567), Muid::from_truncated(0x0765_4321))
}

fn discovery() -> Discovery {
    Discovery {
        header: CiHeader::broadcast(0x7F, 0x01, Muid::from_truncated(0x0123_4567)),
        manufacturer_id: [0x00, 0x21, 0x09],
        device_family: 0x0100,
        device_family_model_number: 0x0001,
        software_revision_level: [1, 0, 0, 0],
        capability: 0x0E,
        max_sysex_message_size: 512,
    }
}

fn property(len: usize) -> Message {
    Message::GetPropertyDataReply(PropertyData {
        header: header(),
        request_id: 1,
        header_data: Bytes::from_static(br#"{"status":200}"#),
        chunk_count: 1,
        nth_chunk: 1,
        property_data: Bytes::from(vec![0x41; len]),
    })
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    // Fixed-size message into a caller-owned buffer
    let message = discovery();
    let mut buffer = [0u8; 32];
    group.throughput(Throughput::Bytes(32));
    group.bench_function("put_discovery", |b| {
        b.iter(|| {
            black_box(put_discovery(&mut buffer, black_box(&message)).unwrap());
        });
    });

    // Property data (1 KB)
    let medium = property(1024);
    group.throughput(Throughput::Bytes(1024));
    group.bench_function("encode_property_1kb", |b| {
        b.iter(|| {
            black_box(medium.encode().unwrap());
        });
    });

    // Property data (64 KB - 1, the largest chunk)
    let large = property(u16::MAX as usize);
    group.throughput(Throughput::Bytes(u64::from(u16::MAX)));
    group.bench_function("encode_property_64kb", |b| {
        b.iter(|| {
            black_box(large.encode().unwrap());
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let mut buffer = [0u8; 32];
    put_discovery(&mut buffer, &discovery()).unwrap();
    group.throughput(Throughput::Bytes(32));
    group.bench_function("get_discovery", |b| {
        b.iter(|| {
            black_box(get_discovery(black_box(&buffer)).unwrap());
        });
    });

    let medium = property(1024).encode().unwrap();
    group.throughput(Throughput::Bytes(1024));
    group.bench_function("decode_property_1kb", |b| {
        b.iter(|| {
            black_box(Message::decode(&medium).unwrap());
        });
    });

    let large = property(u16::MAX as usize).encode().unwrap();
    group.throughput(Throughput::Bytes(u64::from(u16::MAX)));
    group.bench_function("decode_property_64kb", |b| {
        b.iter(|| {
            black_box(Message::decode(&large).unwrap());
        });
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let encoded = Message::Nak(header()).encode().unwrap();
    group.bench_function("classify", |b| {
        b.iter(|| {
            black_box(protocol::classify(black_box(&encoded)));
        });
    });

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let message = property(1024);
    group.throughput(Throughput::Bytes(1024));
    group.bench_function("roundtrip_property_1kb", |b| {
        b.iter(|| {
            let encoded = message.encode().unwrap();
            black_box(Message::decode(&encoded).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_classify, bench_roundtrip);
criterion_main!(benches);
