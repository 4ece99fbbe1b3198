//! Socket.IO client over a browser WebSocket.
//!
//! Fire-and-forget: `emit` while disconnected drops the event with a
//! warning. There is no retry and no reconnect.

use crate::core::socketio::{event_frame, socket_url, EnginePacket, SocketPacket, DEFAULT_NAMESPACE};
use fnv::FnvHashMap;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Handler = Box<dyn FnMut(&[Value])>;

struct Inner {
    ws: web::WebSocket,
    connected: bool,
    handlers: FnvHashMap<String, Vec<Handler>>,
}

#[derive(Clone)]
pub struct Channel {
    inner: Rc<RefCell<Inner>>,
}

impl Channel {
    /// Open the channel to the server that served the page.
    pub fn connect() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let location = window.location();
        let protocol = location
            .protocol()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let host = location
            .host()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let url = socket_url(&protocol, &host);
        let ws = web::WebSocket::new(&url)
            .map_err(|e| anyhow::anyhow!("websocket {url}: {:?}", e))?;
        log::info!("[socket] connecting to {}", url);

        let inner = Rc::new(RefCell::new(Inner {
            ws: ws.clone(),
            connected: false,
            handlers: FnvHashMap::default(),
        }));

        let weak = Rc::downgrade(&inner);
        let onmessage = Closure::wrap(Box::new(move |ev: web::MessageEvent| {
            let Some(text) = ev.data().as_string() else {
                log::warn!("[socket] ignoring binary frame");
                return;
            };
            if let Some(inner) = weak.upgrade() {
                on_frame(&inner, &text);
            }
        }) as Box<dyn FnMut(_)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        let weak = Rc::downgrade(&inner);
        let onclose = Closure::wrap(Box::new(move |ev: web::CloseEvent| {
            log::warn!("[socket] closed (code {})", ev.code());
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().connected = false;
            }
        }) as Box<dyn FnMut(_)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        Ok(Self { inner })
    }

    /// Register a handler for a server event.
    pub fn on(&self, event: &str, handler: impl FnMut(&[Value]) + 'static) {
        self.inner
            .borrow_mut()
            .handlers
            .entry(event.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Send `event` with one JSON payload. Returns false when the event was
    /// dropped.
    pub fn emit(&self, event: &str, payload: &impl Serialize) -> bool {
        let inner = self.inner.borrow();
        if !inner.connected {
            log::warn!("[socket] not connected; dropping {}", event);
            return false;
        }
        let payload = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => {
                log::error!("[socket] {} payload: {}", event, e);
                return false;
            }
        };
        if let Err(e) = inner.ws.send_with_str(&event_frame(event, payload)) {
            log::warn!("[socket] send {} failed: {:?}", event, e);
            return false;
        }
        true
    }
}

fn send(inner: &Rc<RefCell<Inner>>, frame: &str) {
    if let Err(e) = inner.borrow().ws.send_with_str(frame) {
        log::warn!("[socket] send failed: {:?}", e);
    }
}

fn on_frame(inner: &Rc<RefCell<Inner>>, text: &str) {
    let packet = match EnginePacket::decode(text) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[socket] bad frame {:?}: {}", text, e);
            return;
        }
    };
    match packet {
        EnginePacket::Open(hs) => {
            log::info!(
                "[socket] open sid={} ping={}ms/{}ms",
                hs.sid,
                hs.ping_interval,
                hs.ping_timeout
            );
            let connect = SocketPacket::Connect {
                namespace: DEFAULT_NAMESPACE.to_string(),
                data: None,
            };
            send(inner, &connect.to_frame());
        }
        EnginePacket::Ping(p) => send(inner, &EnginePacket::Pong(p).encode()),
        EnginePacket::Close => inner.borrow_mut().connected = false,
        EnginePacket::Message(m) => on_message(inner, &m),
        EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {}
    }
}

fn on_message(inner: &Rc<RefCell<Inner>>, message: &str) {
    let packet = match SocketPacket::decode(message) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[socket] bad packet {:?}: {}", message, e);
            return;
        }
    };
    match packet {
        SocketPacket::Connect { namespace, .. } => {
            log::info!("[socket] connected to namespace {}", namespace);
            inner.borrow_mut().connected = true;
        }
        SocketPacket::Disconnect { namespace } => {
            log::warn!("[socket] server disconnected namespace {}", namespace);
            inner.borrow_mut().connected = false;
        }
        SocketPacket::ConnectError { data, .. } => {
            log::error!("[socket] connect error: {:?}", data);
        }
        SocketPacket::Event { name, args, .. } => {
            // Handlers may emit, so run them without holding the borrow.
            let taken = inner.borrow_mut().handlers.remove(&name);
            let Some(mut handlers) = taken else {
                log::debug!("[socket] unhandled event {}", name);
                return;
            };
            for h in handlers.iter_mut() {
                h(&args);
            }
            let mut guard = inner.borrow_mut();
            let slot = guard.handlers.entry(name).or_default();
            handlers.append(slot);
            *slot = handlers;
        }
        SocketPacket::Ack { .. } => {}
    }
}
