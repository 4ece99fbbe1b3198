use crate::core::ViewerState;
use crate::render::LoadedModel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last_x: f32,
    pub last_y: f32,
}

/// Pointer drags on the canvas orbit the camera horizontally.
pub fn wire_orbit_drag(
    canvas: &web::HtmlCanvasElement,
    viewer: Rc<RefCell<ViewerState<LoadedModel>>>,
) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(canvas, drag.clone());
    wire_pointermove(canvas, drag.clone(), viewer);
    wire_pointerup(canvas, drag);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, drag: Rc<RefCell<DragState>>) {
    let target = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        ds.active = true;
        ds.pointer_id = ev.pointer_id();
        ds.last_x = ev.client_x() as f32;
        ds.last_y = ev.client_y() as f32;
        _ = target.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(
    canvas: &web::HtmlCanvasElement,
    drag: Rc<RefCell<DragState>>,
    viewer: Rc<RefCell<ViewerState<LoadedModel>>>,
) {
    let target = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (dx, dy) = {
            let mut ds = drag.borrow_mut();
            if !ds.active || ds.pointer_id != ev.pointer_id() {
                return;
            }
            let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
            let d = (x - ds.last_x, y - ds.last_y);
            ds.last_x = x;
            ds.last_y = y;
            d
        };
        let height = target.client_height() as f32;
        viewer.borrow_mut().controls.handle_drag(dx, dy, height);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(canvas: &web::HtmlCanvasElement, drag: Rc<RefCell<DragState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        if ds.pointer_id == ev.pointer_id() {
            ds.active = false;
        }
    }) as Box<dyn FnMut(_)>);
    for name in ["pointerup", "pointercancel"] {
        _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Wheel zoom; a no-op unless the controls allow zooming.
pub fn wire_wheel_zoom(
    canvas: &web::HtmlCanvasElement,
    viewer: Rc<RefCell<ViewerState<LoadedModel>>>,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let mut v = viewer.borrow_mut();
        if v.controls.enabled && v.controls.enable_zoom {
            ev.prevent_default();
        }
        v.controls.handle_wheel(ev.delta_y() as f32);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
