// Control-state snapshot and the asset variant derived from it.

use super::constants::{VARIANT_EXTENSION, VARIANT_PREFIX};
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Feature flags published by the controller backend. Read-only for the
/// viewer.
///
/// `Default` is the baseline used when no snapshot exists at all (lights on,
/// everything else off). Inside a published snapshot a missing or `null`
/// field reads as off, so `lights_enabled` must be sent explicitly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lights_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub audio: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mouse: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub heaters: SmallVec<[f32; 3]>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vibration: bool,
    #[serde(default)]
    pub sensitivity: Option<f32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sync_with_audio: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            lights_enabled: true,
            audio: false,
            screen: false,
            mouse: false,
            heaters: smallvec![0.0, 0.0, 0.0],
            vibration: false,
            sensitivity: None,
            sync_with_audio: false,
        }
    }
}

impl ControlState {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    #[inline]
    pub fn any_heater_active(&self) -> bool {
        self.heaters.iter().any(|h| *h > 0.0)
    }

    pub fn variant_code(&self) -> VariantCode {
        VariantCode {
            lit: self.lights_enabled && (self.audio || self.screen),
            heated: self.mouse || self.any_heater_active(),
            vibrating: self.vibration,
        }
    }

    #[inline]
    pub fn asset_file(&self) -> String {
        self.variant_code().asset_file()
    }
}

/// Three-digit visual variant code, one digit per visible feature group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VariantCode {
    pub lit: bool,
    pub heated: bool,
    pub vibrating: bool,
}

impl VariantCode {
    pub fn asset_file(&self) -> String {
        format!("{VARIANT_PREFIX}{self}{VARIANT_EXTENSION}")
    }
}

impl fmt::Display for VariantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            u8::from(self.lit),
            u8::from(self.heated),
            u8::from(self.vibrating)
        )
    }
}

/// Tracks the last derived asset so a reload fires only on change.
#[derive(Clone, Debug, Default)]
pub struct AssetSelector {
    last: Option<String>,
}

impl AssetSelector {
    /// Returns the asset file when it differs from the previous observation.
    pub fn observe(&mut self, state: &ControlState) -> Option<String> {
        let file = state.asset_file();
        if self.last.as_deref() == Some(file.as_str()) {
            return None;
        }
        self.last = Some(file.clone());
        Some(file)
    }

    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
