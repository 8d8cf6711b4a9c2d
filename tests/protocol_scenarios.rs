//! End-to-end scenarios driven directly against an in-process
//! [`PacketEncoder`]/[`PacketDecoder`] pair, matching how the codec is
//! actually exercised without needing a real socket.

use mcproto::protocol::decode::PacketDecoder;
use mcproto::protocol::encode::PacketEncoder;
use mcproto::protocol::packets::{
    HandshakeC2s, HandshakeNextState, LoginCompressionS2c, LoginDisconnectS2c, PingRequestC2s,
    PingResponseS2c, StatusRequestC2s, StatusResponseS2c,
};
use mcproto::protocol::packet_map::PacketMap;
use mcproto::protocol::{Bounded, ProtocolError};
use mcproto::{CompressionThreshold, Decode, PacketDirection, PacketState};

// A macro (rather than a generic fn) so that `frame` is bound directly in the
// caller's scope: `HandshakeC2s<'a>` borrows from the decoded frame body, and
// that borrow must outlive the `decoded` binding used by the caller.
macro_rules! roundtrip {
    ($enc:expr, $dec:expr, $pkt:expr, $out:ident : $ty:ty) => {
        $enc.append_packet($pkt).unwrap();
        let bytes = $enc.take();
        $dec.queue_bytes(bytes);
        let frame = $dec
            .try_next_packet()
            .unwrap()
            .expect("a complete frame was queued");
        let $out: $ty = frame.decode().unwrap();
    };
}

/// S1 — status ping round-trip.
#[test]
fn status_ping_round_trip() {
    let mut enc = PacketEncoder::new();
    let mut dec = PacketDecoder::new();

    let handshake = HandshakeC2s {
        protocol_version: 757,
        server_address: Bounded("localhost"),
        server_port: 12345,
        next_state: HandshakeNextState::Status,
    };
    roundtrip!(enc, dec, &handshake, decoded: HandshakeC2s);
    assert_eq!(decoded.next_state, HandshakeNextState::Status);

    roundtrip!(enc, dec, &StatusRequestC2s, _status_req: StatusRequestC2s);

    let json = r#"{"version":{"name":"1.18.1","protocol":757}}"#.to_owned();
    let response = StatusResponseS2c { json: json.clone() };
    roundtrip!(enc, dec, &response, decoded: StatusResponseS2c);
    assert_eq!(decoded.json, json);

    let ping = PingRequestC2s {
        payload: 1234567890,
    };
    roundtrip!(enc, dec, &ping, decoded: PingRequestC2s);
    assert_eq!(decoded.payload, 1234567890);

    let pong = PingResponseS2c {
        payload: decoded.payload,
    };
    roundtrip!(enc, dec, &pong, decoded: PingResponseS2c);
    assert_eq!(decoded.payload, 1234567890);
}

/// S4 — compression threshold transition: packets under the threshold carry
/// the uncompressed `varint(0)` sentinel; packets over it go through zlib.
#[test]
fn compression_threshold_transition() {
    let mut enc = PacketEncoder::new();
    let mut dec = PacketDecoder::new();

    // Before LoginSetCompression, threshold is DEFAULT (disabled): no data
    // length prefix at all.
    let small = LoginDisconnectS2c {
        reason: "x".repeat(40),
    };
    enc.append_packet(&small).unwrap();
    let bytes = enc.take();
    dec.queue_bytes(bytes);
    let frame = dec.try_next_packet().unwrap().unwrap();
    let _: LoginDisconnectS2c = frame.decode().unwrap();

    // Server raises the threshold.
    let threshold = CompressionThreshold(256);
    enc.set_compression(threshold);
    dec.set_compression(threshold);

    // A packet below the threshold still round-trips, uncompressed.
    let under = LoginDisconnectS2c {
        reason: "y".repeat(40),
    };
    enc.append_packet(&under).unwrap();
    let bytes = enc.take();
    assert!(
        is_uncompressed_sentinel(&bytes),
        "packet under the threshold should carry the zero data-length sentinel"
    );
    dec.queue_bytes(bytes);
    let frame = dec.try_next_packet().unwrap().unwrap();
    let decoded: LoginDisconnectS2c = frame.decode().unwrap();
    assert_eq!(decoded, under);

    // A packet over the threshold is compressed.
    let over = LoginDisconnectS2c {
        reason: "z".repeat(1024),
    };
    enc.append_packet(&over).unwrap();
    let bytes = enc.take();
    assert!(
        !is_uncompressed_sentinel(&bytes),
        "packet over the threshold should be zlib-compressed"
    );
    dec.queue_bytes(bytes);
    let frame = dec.try_next_packet().unwrap().unwrap();
    let decoded: LoginDisconnectS2c = frame.decode().unwrap();
    assert_eq!(decoded, over);
}

/// Reads the first (packet length) and second (data length) VarInts of an
/// enframed, compression-enabled packet and reports whether the data length
/// is the "not compressed" sentinel of zero.
fn is_uncompressed_sentinel(bytes: &[u8]) -> bool {
    use mcproto::protocol::var_int::VarInt;

    let mut r = &bytes[..];
    VarInt::decode(&mut r).unwrap(); // packet length, discarded
    VarInt::decode(&mut r).unwrap().0 == 0
}

/// LoginSetCompression carries the new threshold verbatim.
#[test]
fn login_set_compression_carries_threshold() {
    let mut enc = PacketEncoder::new();
    let mut dec = PacketDecoder::new();

    let pkt = LoginCompressionS2c {
        threshold: mcproto::protocol::var_int::VarInt(256),
    };
    roundtrip!(enc, dec, &pkt, decoded: LoginCompressionS2c);
    assert_eq!(decoded.threshold.0, 256);
}

/// S5 — an id with nothing registered for it in a given state/direction
/// raises a typed error instead of silently returning `None`.
#[test]
fn unknown_packet_id_is_an_error() {
    let map = PacketMap::new(757);

    let err = map
        .resolve(PacketState::Play, PacketDirection::Serverbound, 0xFE)
        .unwrap_err();

    assert!(matches!(
        err,
        ProtocolError::UnknownPacketId {
            protocol: 757,
            state: PacketState::Play,
            id: 0xFE,
            direction: PacketDirection::Serverbound,
        }
    ));
}

/// S6 — a compound tag serialized, gzipped, then fed to the gzip-aware
/// reader decodes identically to the same tag fed uncompressed.
#[test]
fn nbt_gzip_transparency() {
    use std::io::Write as _;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use mcproto::nbt::{compound, from_binary_gzip_aware, to_binary};

    let tag = compound! {
        "byte" => 123_i8,
        "list_of_int" => mcproto::nbt::List::Int(vec![3, -7, 5]),
        "string" => "hello",
    };

    let mut plain = Vec::new();
    to_binary(&mut plain, &tag, "root").unwrap();

    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(&plain).unwrap();
    let gzipped = gz.finish().unwrap();

    let (from_plain, plain_name) = from_binary_gzip_aware(&plain).unwrap();
    let (from_gzipped, gzipped_name) = from_binary_gzip_aware(&gzipped).unwrap();

    assert_eq!(from_plain, tag);
    assert_eq!(from_gzipped, tag);
    assert_eq!(plain_name, "root");
    assert_eq!(gzipped_name, "root");
}
