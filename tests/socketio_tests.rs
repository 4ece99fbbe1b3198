#![allow(dead_code)]
mod socketio {
    include!("../src/core/socketio.rs");
}

use serde_json::json;
use socketio::*;

#[test]
fn open_handshake_decodes() {
    let frame = r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
    match EnginePacket::decode(frame).unwrap() {
        EnginePacket::Open(hs) => {
            assert_eq!(hs.sid, "lv_VI97HAXpY6yYWAAAC");
            assert_eq!(hs.ping_interval, 25000);
            assert_eq!(hs.ping_timeout, 20000);
            assert_eq!(hs.max_payload, Some(1_000_000));
        }
        other => panic!("expected open, got {other:?}"),
    }
}

#[test]
fn ping_is_answered_with_matching_pong() {
    assert_eq!(EnginePacket::decode("2").unwrap(), EnginePacket::Ping(String::new()));
    assert_eq!(EnginePacket::Pong(String::new()).encode(), "3");
    assert_eq!(EnginePacket::Pong("probe".into()).encode(), "3probe");
}

#[test]
fn toggle_event_frame_matches_wire_format() {
    let frame = event_frame("toggle_feature", json!({"feature": "audio"}));
    assert_eq!(frame, r#"42["toggle_feature",{"feature":"audio"}]"#);
}

#[test]
fn connect_packet_frames() {
    let connect = SocketPacket::Connect {
        namespace: DEFAULT_NAMESPACE.into(),
        data: None,
    };
    assert_eq!(connect.to_frame(), "40");
    let admin = SocketPacket::Connect {
        namespace: "/admin".into(),
        data: Some(json!({"token": "x"})),
    };
    assert_eq!(admin.encode(), r#"0/admin,{"token":"x"}"#);

    match SocketPacket::decode(r#"0{"sid":"abc"}"#).unwrap() {
        SocketPacket::Connect { namespace, data } => {
            assert_eq!(namespace, "/");
            assert_eq!(data, Some(json!({"sid": "abc"})));
        }
        other => panic!("expected connect, got {other:?}"),
    }
}

#[test]
fn event_with_namespace_and_ack_id() {
    let p = SocketPacket::decode(r#"2/admin,12["control_state",{"audio":true}]"#).unwrap();
    assert_eq!(
        p,
        SocketPacket::Event {
            namespace: "/admin".into(),
            id: Some(12),
            name: "control_state".into(),
            args: vec![json!({"audio": true})],
        }
    );
    assert_eq!(p.encode(), r#"2/admin,12["control_state",{"audio":true}]"#);
}

#[test]
fn malformed_packets_are_rejected() {
    assert!(matches!(EnginePacket::decode(""), Err(PacketError::Empty)));
    assert!(matches!(EnginePacket::decode("9"), Err(PacketError::EngineType('9'))));
    assert!(matches!(SocketPacket::decode("2[]"), Err(PacketError::MissingEventName)));
    assert!(matches!(SocketPacket::decode("2[1,2]"), Err(PacketError::MissingEventName)));
    assert!(matches!(SocketPacket::decode("2[\"x\""), Err(PacketError::Json(_))));
    assert!(matches!(SocketPacket::decode(r#"51-["x",{}]"#), Err(PacketError::Binary)));
    assert!(matches!(SocketPacket::decode("7"), Err(PacketError::SocketType('7'))));
}

#[test]
fn socket_url_follows_page_scheme() {
    assert_eq!(
        socket_url("https:", "example.com"),
        "wss://example.com/socket.io/?EIO=4&transport=websocket"
    );
    assert_eq!(
        socket_url("http:", "localhost:5000"),
        "ws://localhost:5000/socket.io/?EIO=4&transport=websocket"
    );
}
