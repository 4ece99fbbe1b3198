#![cfg(target_arch = "wasm32")]
use crate::core::constants::CONTROL_STATE_EVENT;
use crate::core::{ControlState, ViewerConfig, ViewerState};
use crate::frame::{CompletedLoads, ControlSource};
use crate::render::LoadedModel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod channel;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod loader;
mod panel;
mod render;

type SharedViewer = Rc<RefCell<ViewerState<LoadedModel>>>;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, viewer: SharedViewer) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        let (w, h) = dom::canvas_client_size(&canvas_resize);
        viewer.borrow_mut().camera.set_viewport(w, h);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Defaults overridden by `data-*` attributes on the canvas. A bad value is
/// logged and the default kept.
fn read_config(canvas: &web::HtmlCanvasElement) -> ViewerConfig {
    let mut config = ViewerConfig::default();
    for name in ViewerConfig::ATTRIBUTES {
        let Some(value) = canvas.get_attribute(name) else {
            continue;
        };
        if let Err(e) = config.apply_attribute(name, &value) {
            log::warn!("[viewer] {}", e);
        }
    }
    config
}

fn wire_switch_button(document: &web::Document, viewer: SharedViewer, completed: CompletedLoads) {
    let wired = dom::add_click_listener(document, constants::SWITCH_MODEL_BUTTON_ID, move |_| {
        let ticket = viewer.borrow_mut().manual_swap();
        if let Some(ticket) = ticket {
            frame::spawn_load(ticket, completed.clone());
        }
    });
    if !wired {
        log::info!(
            "[viewer] no #{}; manual swapping disabled",
            constants::SWITCH_MODEL_BUTTON_ID
        );
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hoodie-viewer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let has_panel = document
        .get_element_by_id(crate::core::Feature::Audio.button_id())
        .is_some();
    let canvas = document
        .get_element_by_id(constants::CANVAS_ID)
        .and_then(|e| e.dyn_into::<web::HtmlCanvasElement>().ok());
    if !has_panel && canvas.is_none() {
        log::info!("nothing to wire on this page");
        return Ok(());
    }

    let channel = match channel::Channel::connect() {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("[socket] unavailable: {:?}", e);
            None
        }
    };

    if has_panel {
        if let Err(e) = panel::wire_toggle_panel(&document, channel.clone()) {
            log::error!("[toggle] {:?}", e);
        }
    }

    let Some(canvas) = canvas else {
        return Ok(());
    };

    let config = read_config(&canvas);
    log::info!("[viewer] config {:?}", config);
    let viewer: SharedViewer = Rc::new(RefCell::new(ViewerState::new(config)));
    let completed: CompletedLoads = Rc::new(RefCell::new(Vec::new()));
    let control = ControlSource::default();

    wire_canvas_resize(&canvas, viewer.clone());
    wire_switch_button(&document, viewer.clone(), completed.clone());
    events::wire_orbit_drag(&canvas, viewer.clone());
    events::wire_wheel_zoom(&canvas, viewer.clone());

    if let Some(ch) = &channel {
        let pushed = control.pushed.clone();
        ch.on(CONTROL_STATE_EVENT, move |args| {
            let Some(v) = args.first() else { return };
            match serde_json::from_value::<ControlState>(v.clone()) {
                Ok(state) => *pushed.borrow_mut() = Some(state),
                Err(e) => log::warn!("[viewer] bad {} payload: {}", CONTROL_STATE_EVENT, e),
            }
        });
    }

    let first = viewer.borrow_mut().initial_load();
    frame::spawn_load(first, completed.clone());

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[viewer] rendering disabled; viewer state still updates");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        canvas,
        document,
        gpu,
        completed,
        control,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
