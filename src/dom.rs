use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire a click handler on `element_id`. Returns false when the element is
/// absent, in which case nothing is wired.
#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(&web::HtmlElement) + 'static,
) -> bool {
    let Some(el) = document
        .get_element_by_id(element_id)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    else {
        return false;
    };
    let target = el.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(
        Box::new(move || handler(&target)) as Box<dyn FnMut()>
    );
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
    true
}

/// Displayed (CSS) size of the canvas in whole pixels.
#[inline]
pub fn canvas_client_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    (
        canvas.client_width().max(0) as u32,
        canvas.client_height().max(0) as u32,
    )
}

/// Match the canvas backing store to its displayed size. A collapsed
/// container (zero in either dimension) leaves the backing store alone.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> bool {
    let (w, h) = canvas_client_size(canvas);
    if w == 0 || h == 0 {
        return false;
    }
    if canvas.width() == w && canvas.height() == h {
        return false;
    }
    canvas.set_width(w);
    canvas.set_height(h);
    true
}

pub fn body_has_class(document: &web::Document, class: &str) -> bool {
    document
        .body()
        .map(|b| b.class_list().contains(class))
        .unwrap_or(false)
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

#[inline]
pub fn style_value(el: &web::HtmlElement, property: &str) -> String {
    el.style().get_property_value(property).unwrap_or_default()
}
