use crate::constants::{CONTROL_STATE_GLOBAL, DARK_THEME_CLASS};
use crate::core::constants::background_for_theme;
use crate::core::{ControlState, CpuModel, LoadOutcome, LoadTicket, ViewerState};
use crate::dom;
use crate::loader;
use crate::render::{self, LoadedModel};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Finished fetches waiting to be attached by the next frame.
pub type CompletedLoads = Rc<RefCell<Vec<(LoadTicket, anyhow::Result<CpuModel>)>>>;

/// Where the per-frame control-state snapshot comes from: the latest
/// `control_state` push if any, else `window.latestControlState`, else the
/// baseline.
#[derive(Clone, Default)]
pub struct ControlSource {
    pub pushed: Rc<RefCell<Option<ControlState>>>,
    warned: Rc<RefCell<bool>>,
}

impl ControlSource {
    pub fn snapshot(&self) -> ControlState {
        if let Some(s) = self.pushed.borrow().as_ref() {
            return s.clone();
        }
        self.read_global().unwrap_or_default()
    }

    fn read_global(&self) -> Option<ControlState> {
        let window = web::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONTROL_STATE_GLOBAL)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let text = js_sys::JSON::stringify(&value).ok()?.as_string()?;
        match ControlState::from_json(&text) {
            Ok(s) => Some(s),
            Err(e) => {
                if !self.warned.replace(true) {
                    log::warn!("[viewer] ignoring malformed {}: {}", CONTROL_STATE_GLOBAL, e);
                }
                None
            }
        }
    }
}

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<ViewerState<LoadedModel>>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,
    pub completed: CompletedLoads,
    pub control: ControlSource,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        self.attach_completed();

        if let Some(g) = &mut self.gpu {
            let dark = dom::body_has_class(&self.document, DARK_THEME_CLASS);
            g.set_background(background_for_theme(dark));
        }

        // Fallback for layout races the resize event misses
        dom::sync_canvas_backing_size(&self.canvas);
        let size = dom::canvas_client_size(&self.canvas);
        let state = self.control.snapshot();

        let outcome = self.viewer.borrow_mut().frame_update(&state, size);
        for ticket in outcome.loads {
            spawn_load(ticket, self.completed.clone());
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let viewer = self.viewer.borrow();
            let model = viewer.displayed().and_then(|d| {
                d.model
                    .gpu
                    .as_ref()
                    .map(|gm| (gm, d.transform.matrix()))
            });
            if let Err(e) = g.render(viewer.view_projection(), model) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn attach_completed(&mut self) {
        let done: Vec<_> = self.completed.borrow_mut().drain(..).collect();
        for (ticket, result) in done {
            let mut viewer = self.viewer.borrow_mut();
            match result {
                Ok(cpu) => {
                    let gpu = self.gpu.as_ref().map(|g| g.upload_model(&cpu));
                    match viewer.on_model_loaded(&ticket, LoadedModel { cpu, gpu }) {
                        LoadOutcome::Attached { previous } => log::info!(
                            "[viewer] showing {} (replaced {})",
                            ticket.path,
                            previous.map(|p| p.path).unwrap_or_else(|| "nothing".into())
                        ),
                        LoadOutcome::Superseded { .. } => {}
                    }
                }
                Err(e) => {
                    log::error!("[load] {} failed: {:?}", ticket.path, e);
                    viewer.on_load_failed(&ticket);
                }
            }
        }
    }
}

/// Fetch in the background; the result is attached by a later frame.
pub fn spawn_load(ticket: LoadTicket, completed: CompletedLoads) {
    spawn_local(async move {
        let result = loader::load_model(&ticket.path).await;
        completed.borrow_mut().push((ticket, result));
    });
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame` from `requestAnimationFrame` for the lifetime of the page.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
