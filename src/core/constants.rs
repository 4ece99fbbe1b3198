/// Viewer and panel tuning constants.
///
/// Values mirror the look of the deployed viewer page; they are grouped by
/// the subsystem that reads them.
// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START_POSITION: [f32; 3] = [0.0, 1.5, 3.0];

// Framing: distance = max_dim / (2 tan(fov/2)) * margin
pub const FRAMING_DISTANCE_MARGIN: f32 = 1.5;
pub const FRAMING_TARGET_HEIGHT_FRACTION: f32 = 0.001;

// Idle spin applied to the displayed model every frame (radians)
pub const SPIN_PER_FRAME: f32 = 0.005;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2; // horizontal orbit only
pub const ORBIT_EPS: f32 = 1e-6;
pub const ORBIT_ZOOM_SCALE: f32 = 0.95;

// Lighting rig (linear RGB, intensity)
pub const HEMI_SKY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const HEMI_GROUND_COLOR: [f32; 3] = [0.266_666_7, 0.266_666_7, 0.266_666_7]; // #444444
pub const HEMI_INTENSITY: f32 = 1.0;
pub const DIR_LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const DIR_LIGHT_INTENSITY: f32 = 1.5;
pub const DIR_LIGHT_POSITION: [f32; 3] = [5.0, 10.0, 7.5];
pub const AMBIENT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const AMBIENT_INTENSITY: f32 = 0.3;

// Scene background per document theme
pub const BACKGROUND_LIGHT: [f32; 3] = [0.941_176_5, 0.941_176_5, 0.941_176_5]; // #f0f0f0
pub const BACKGROUND_DARK: [f32; 3] = [0.070_588_2, 0.070_588_2, 0.070_588_2]; // #121212

// Assets
pub const ASSET_BASE: &str = "/static/";
pub const INITIAL_ASSET: &str = "hoodie1.gltf";
pub const MANUAL_ASSETS: [&str; 2] = ["hoodie1.gltf", "hoodie2.gltf"];
pub const VARIANT_PREFIX: &str = "hoodie";
pub const VARIANT_EXTENSION: &str = ".gltf";

// Toggle panel
pub const TOGGLE_ON_COLOR: &str = "#E22DA1";
pub const TOGGLE_OFF_COLOR: &str = "#666";
pub const TOGGLE_EVENT: &str = "toggle_feature";
pub const CONTROL_STATE_EVENT: &str = "control_state";

#[inline]
pub fn background_for_theme(dark: bool) -> [f32; 3] {
    if dark {
        BACKGROUND_DARK
    } else {
        BACKGROUND_LIGHT
    }
}
