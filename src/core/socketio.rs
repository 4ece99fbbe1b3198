// Text framing of the real-time channel: Engine.IO v4 packets carrying
// Socket.IO v5 packets over a WebSocket.
//
// Only the text protocol is handled; binary attachments are rejected.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, Error)]
pub enum PacketError {
    #[error("empty frame")]
    Empty,
    #[error("unknown engine packet type {0:?}")]
    EngineType(char),
    #[error("unknown socket packet type {0:?}")]
    SocketType(char),
    #[error("binary packets are not supported")]
    Binary,
    #[error("event packet without a name")]
    MissingEventName,
    #[error("bad JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Server handshake carried by the Engine.IO `open` packet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self, PacketError> {
        let mut chars = frame.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let rest = chars.as_str();
        Ok(match kind {
            '0' => EnginePacket::Open(serde_json::from_str(rest)?),
            '1' => EnginePacket::Close,
            '2' => EnginePacket::Ping(rest.to_string()),
            '3' => EnginePacket::Pong(rest.to_string()),
            '4' => EnginePacket::Message(rest.to_string()),
            '5' => EnginePacket::Upgrade,
            '6' => EnginePacket::Noop,
            other => return Err(PacketError::EngineType(other)),
        })
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(_) => "0".to_string(),
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(p) => format!("2{p}"),
            EnginePacket::Pong(p) => format!("3{p}"),
            EnginePacket::Message(m) => format!("4{m}"),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        id: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        id: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        data: Option<Value>,
    },
}

/// Split `"/ns,rest"` into namespace and remainder.
fn split_namespace(s: &str) -> (String, &str) {
    if s.starts_with('/') {
        match s.find(',') {
            Some(i) => (s[..i].to_string(), &s[i + 1..]),
            None => (s.to_string(), ""),
        }
    } else {
        (DEFAULT_NAMESPACE.to_string(), s)
    }
}

/// Split a leading ack id off the JSON payload.
fn split_id(s: &str) -> (Option<u64>, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return (None, s);
    }
    (s[..digits].parse().ok(), &s[digits..])
}

fn parse_optional(s: &str) -> Result<Option<Value>, PacketError> {
    if s.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::from_str(s)?))
    }
}

fn parse_array(s: &str) -> Result<Vec<Value>, PacketError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(s)?)
}

impl SocketPacket {
    pub fn decode(message: &str) -> Result<Self, PacketError> {
        let mut chars = message.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let (namespace, rest) = split_namespace(chars.as_str());
        Ok(match kind {
            '0' => SocketPacket::Connect {
                namespace,
                data: parse_optional(rest)?,
            },
            '1' => SocketPacket::Disconnect { namespace },
            '2' => {
                let (id, json) = split_id(rest);
                let mut args = parse_array(json)?;
                if args.is_empty() {
                    return Err(PacketError::MissingEventName);
                }
                let name = match args.remove(0) {
                    Value::String(s) => s,
                    _ => return Err(PacketError::MissingEventName),
                };
                SocketPacket::Event {
                    namespace,
                    id,
                    name,
                    args,
                }
            }
            '3' => {
                let (id, json) = split_id(rest);
                SocketPacket::Ack {
                    namespace,
                    id: id.unwrap_or_default(),
                    args: parse_array(json)?,
                }
            }
            '4' => SocketPacket::ConnectError {
                namespace,
                data: parse_optional(rest)?,
            },
            '5' | '6' => return Err(PacketError::Binary),
            other => return Err(PacketError::SocketType(other)),
        })
    }

    pub fn encode(&self) -> String {
        fn ns(namespace: &str) -> String {
            if namespace == DEFAULT_NAMESPACE {
                String::new()
            } else {
                format!("{namespace},")
            }
        }
        match self {
            SocketPacket::Connect { namespace, data } => match data {
                Some(d) => format!("0{}{}", ns(namespace), d),
                None => format!("0{}", ns(namespace)),
            },
            SocketPacket::Disconnect { namespace } => format!("1{}", ns(namespace)),
            SocketPacket::Event {
                namespace,
                id,
                name,
                args,
            } => {
                let mut all = Vec::with_capacity(args.len() + 1);
                all.push(Value::String(name.clone()));
                all.extend(args.iter().cloned());
                let id = id.map(|i| i.to_string()).unwrap_or_default();
                format!("2{}{}{}", ns(namespace), id, Value::Array(all))
            }
            SocketPacket::Ack {
                namespace,
                id,
                args,
            } => format!("3{}{}{}", ns(namespace), id, Value::Array(args.clone())),
            SocketPacket::ConnectError { namespace, data } => match data {
                Some(d) => format!("4{}{}", ns(namespace), d),
                None => format!("4{}", ns(namespace)),
            },
        }
    }

    /// Wrap in an Engine.IO message frame.
    #[inline]
    pub fn to_frame(&self) -> String {
        EnginePacket::Message(self.encode()).encode()
    }
}

/// Full text frame for an event on the default namespace.
pub fn event_frame(name: &str, payload: Value) -> String {
    SocketPacket::Event {
        namespace: DEFAULT_NAMESPACE.to_string(),
        id: None,
        name: name.to_string(),
        args: vec![payload],
    }
    .to_frame()
}

/// WebSocket endpoint for a page served from `host` over `page_protocol`
/// (`"http:"` or `"https:"`).
pub fn socket_url(page_protocol: &str, host: &str) -> String {
    let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/socket.io/?EIO=4&transport=websocket")
}
