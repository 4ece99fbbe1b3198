//! Toggle panel wiring: feature buttons, optimistic face flips and the
//! heater controls container.

use crate::channel::Channel;
use crate::constants::HEATER_CONTROLS_ID;
use crate::core::constants::{CONTROL_STATE_EVENT, TOGGLE_EVENT};
use crate::core::toggle::{next_heater_display, toggle_click};
use crate::core::{ButtonFace, ControlState, Feature, ToggleEvent};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

fn button(document: &web::Document, feature: Feature) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(feature.button_id())
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
}

fn heater_controls(document: &web::Document) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(HEATER_CONTROLS_ID)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
fn show_face(el: &web::HtmlElement, face: &ButtonFace) {
    el.set_inner_text(&face.label);
    dom::set_style(el, "background-color", face.color());
}

pub fn toggle_heater_controls(document: &web::Document) {
    if let Some(div) = heater_controls(document) {
        let next = next_heater_display(&dom::style_value(&div, "display"));
        dom::set_style(&div, "display", next);
    }
}

/// Bring button faces in line with a server-pushed snapshot.
pub fn reconcile(document: &web::Document, state: &ControlState) {
    for feature in Feature::ALL {
        let Some(el) = button(document, feature) else {
            continue;
        };
        let mut face = ButtonFace::from_label(&el.inner_text());
        if face.reconcile(feature.enabled_in(state)) {
            show_face(&el, &face);
            log::info!("[toggle] {} reconciled to {}", feature.id(), face.on);
        }
    }
    if let Some(div) = heater_controls(document) {
        dom::set_style(&div, "display", if state.mouse { "block" } else { "none" });
    }
}

/// Wire every feature button. All buttons are mandatory. Without a channel
/// the faces still flip; only the emit is dropped.
pub fn wire_toggle_panel(document: &web::Document, channel: Option<Channel>) -> anyhow::Result<()> {
    if let Some(missing) = Feature::ALL
        .into_iter()
        .find(|f| button(document, *f).is_none())
    {
        anyhow::bail!("missing #{}", missing.button_id());
    }

    for feature in Feature::ALL {
        let channel = channel.clone();
        let doc = document.clone();
        dom::add_click_listener(document, feature.button_id(), move |el| {
            let emit = channel
                .as_ref()
                .map(|ch| move |ev: &ToggleEvent| ch.emit(TOGGLE_EVENT, ev));
            let click = toggle_click(feature, &el.inner_text(), emit);
            show_face(el, &click.face);
            if channel.is_none() {
                log::warn!("[toggle] no channel; {} not sent", feature.id());
            }
            log::info!("[toggle] {} -> {}", feature.id(), click.face.label);
            if feature.reveals_heaters() {
                toggle_heater_controls(&doc);
            }
        });
    }

    if let Some(channel) = channel {
        let doc = document.clone();
        channel.on(CONTROL_STATE_EVENT, move |args| {
            let Some(v) = args.first() else { return };
            match serde_json::from_value::<ControlState>(v.clone()) {
                Ok(state) => reconcile(&doc, &state),
                Err(e) => log::warn!("[toggle] bad {} payload: {}", CONTROL_STATE_EVENT, e),
            }
        });
    }
    Ok(())
}
