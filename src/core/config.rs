use super::constants::{ASSET_BASE, INITIAL_ASSET, MANUAL_ASSETS, SPIN_PER_FRAME};
use super::model::LoadPolicy;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("attribute {name}: expected true/false, got {value:?}")]
    Bool { name: String, value: String },
    #[error("attribute {name}: expected a number, got {value:?}")]
    Number { name: String, value: String },
    #[error("attribute {name}: unknown load policy {value:?}")]
    Policy { name: String, value: String },
    #[error("attribute {name}: asset list is empty")]
    EmptyList { name: String },
}

/// Runtime options of the viewer. Defaults come from `constants`; a page
/// can override them with `data-*` attributes on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub asset_base: String,
    pub initial_asset: String,
    pub manual_assets: Vec<String>,
    pub state_driven: bool,
    pub freeze_framing_after_first_load: bool,
    pub load_policy: LoadPolicy,
    pub orbit_enabled: bool,
    pub spin_per_frame: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_base: ASSET_BASE.to_string(),
            initial_asset: INITIAL_ASSET.to_string(),
            manual_assets: MANUAL_ASSETS.iter().map(|s| s.to_string()).collect(),
            state_driven: true,
            freeze_framing_after_first_load: true,
            load_policy: LoadPolicy::LastCompletedWins,
            orbit_enabled: true,
            spin_per_frame: SPIN_PER_FRAME,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Bool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

impl ViewerConfig {
    /// Attribute names understood by [`apply_attribute`](Self::apply_attribute).
    pub const ATTRIBUTES: [&'static str; 8] = [
        "data-asset-base",
        "data-initial-asset",
        "data-manual-assets",
        "data-state-driven",
        "data-freeze-framing",
        "data-load-policy",
        "data-orbit",
        "data-spin",
    ];

    /// Apply one `data-*` override. Unknown names are ignored.
    pub fn apply_attribute(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name {
            "data-asset-base" => self.asset_base = value.trim().to_string(),
            "data-initial-asset" => self.initial_asset = value.trim().to_string(),
            "data-manual-assets" => {
                let list: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if list.is_empty() {
                    return Err(ConfigError::EmptyList {
                        name: name.to_string(),
                    });
                }
                self.manual_assets = list;
            }
            "data-state-driven" => self.state_driven = parse_bool(name, value)?,
            "data-freeze-framing" => {
                self.freeze_framing_after_first_load = parse_bool(name, value)?
            }
            "data-load-policy" => {
                self.load_policy = match value.trim() {
                    "last-completed" => LoadPolicy::LastCompletedWins,
                    "latest-request" => LoadPolicy::LatestRequestWins,
                    _ => {
                        return Err(ConfigError::Policy {
                            name: name.to_string(),
                            value: value.to_string(),
                        })
                    }
                }
            }
            "data-orbit" => self.orbit_enabled = parse_bool(name, value)?,
            "data-spin" => {
                self.spin_per_frame =
                    value
                        .trim()
                        .parse::<f32>()
                        .map_err(|_| ConfigError::Number {
                            name: name.to_string(),
                            value: value.to_string(),
                        })?
            }
            _ => {}
        }
        Ok(())
    }

    /// Resolve an asset file name against `asset_base`. Absolute paths and
    /// URLs are returned unchanged.
    pub fn asset_url(&self, file: &str) -> String {
        if file.starts_with('/') || file.contains("://") || self.asset_base.is_empty() {
            return file.to_string();
        }
        if self.asset_base.ends_with('/') {
            format!("{}{}", self.asset_base, file)
        } else {
            format!("{}/{}", self.asset_base, file)
        }
    }
}
