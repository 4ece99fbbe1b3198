// Toggle panel presentation: feature identifiers and button faces.

use super::constants::{TOGGLE_OFF_COLOR, TOGGLE_ON_COLOR};
use super::control::ControlState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Audio,
    Screen,
    Mouse,
    Heater1,
    Heater2,
    Heater3,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Audio,
        Feature::Screen,
        Feature::Mouse,
        Feature::Heater1,
        Feature::Heater2,
        Feature::Heater3,
    ];

    /// Identifier sent over the wire.
    pub fn id(self) -> &'static str {
        match self {
            Feature::Audio => "audio",
            Feature::Screen => "screen",
            Feature::Mouse => "mouse",
            Feature::Heater1 => "heater1",
            Feature::Heater2 => "heater2",
            Feature::Heater3 => "heater3",
        }
    }

    /// DOM id of the button controlling this feature.
    pub fn button_id(self) -> &'static str {
        match self {
            Feature::Audio => "audio-btn",
            Feature::Screen => "screen-btn",
            Feature::Mouse => "mouse-btn",
            Feature::Heater1 => "heater-1",
            Feature::Heater2 => "heater-2",
            Feature::Heater3 => "heater-3",
        }
    }

    pub fn from_id(id: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Index into `ControlState::heaters` for heater features.
    pub fn heater_index(self) -> Option<usize> {
        match self {
            Feature::Heater1 => Some(0),
            Feature::Heater2 => Some(1),
            Feature::Heater3 => Some(2),
            _ => None,
        }
    }

    /// Whether clicking this feature also shows/hides the heater controls.
    #[inline]
    pub fn reveals_heaters(self) -> bool {
        self == Feature::Mouse
    }

    /// Server-side truth for this feature in a control-state snapshot.
    pub fn enabled_in(self, state: &ControlState) -> bool {
        match self {
            Feature::Audio => state.audio,
            Feature::Screen => state.screen,
            Feature::Mouse => state.mouse,
            heater => heater
                .heater_index()
                .and_then(|i| state.heaters.get(i))
                .is_some_and(|level| *level > 0.0),
        }
    }
}

/// Payload of a `toggle_feature` event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToggleEvent {
    pub feature: Feature,
}

/// Button label and on/off state as shown locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonFace {
    pub label: String,
    pub on: bool,
}

impl ButtonFace {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim_end().to_string();
        let on = label.ends_with("ON");
        Self { label, on }
    }

    #[inline]
    pub fn color(&self) -> &'static str {
        if self.on {
            TOGGLE_ON_COLOR
        } else {
            TOGGLE_OFF_COLOR
        }
    }

    /// Swap the ON/OFF suffix. A label without a suffix keeps its text and
    /// turns on. Returns the new background colour.
    pub fn flip(&mut self) -> &'static str {
        if let Some(stem) = self.label.strip_suffix("ON") {
            self.label = format!("{stem}OFF");
            self.on = false;
        } else if let Some(stem) = self.label.strip_suffix("OFF") {
            self.label = format!("{stem}ON");
            self.on = true;
        } else {
            self.on = true;
        }
        self.color()
    }

    /// Force the face to `on`. Returns true when it changed.
    pub fn reconcile(&mut self, on: bool) -> bool {
        if self.on == on {
            return false;
        }
        self.flip();
        self.on = on;
        true
    }
}

/// Outcome of one click on a feature button.
#[derive(Clone, Debug, PartialEq)]
pub struct ToggleClick {
    pub face: ButtonFace,
    pub sent: bool,
}

/// Handle a click on `feature`'s button showing `label`. The event goes to
/// `emit` when there is one; the face flips either way.
pub fn toggle_click<F>(feature: Feature, label: &str, emit: Option<F>) -> ToggleClick
where
    F: FnOnce(&ToggleEvent) -> bool,
{
    let sent = emit.is_some_and(|send| send(&ToggleEvent { feature }));
    let mut face = ButtonFace::from_label(label);
    face.flip();
    ToggleClick { face, sent }
}

/// Next `display` value of the heater controls container.
#[inline]
pub fn next_heater_display(current: &str) -> &'static str {
    if current == "none" {
        "block"
    } else {
        "none"
    }
}
