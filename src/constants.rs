// DOM element ids and page hooks used by the web frontend.

// Viewer
pub const CANVAS_ID: &str = "threeCanvas";
pub const SWITCH_MODEL_BUTTON_ID: &str = "switchModelBtn";
pub const DARK_THEME_CLASS: &str = "dark";
pub const CONTROL_STATE_GLOBAL: &str = "latestControlState";

// Toggle panel
pub const HEATER_CONTROLS_ID: &str = "heater-controls";

// Rendering
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
