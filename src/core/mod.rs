pub mod camera;
pub mod config;
pub mod constants;
pub mod control;
pub mod framing;
pub mod mesh;
pub mod model;
pub mod orbit;
pub mod socketio;
pub mod toggle;
pub mod viewer;

pub use camera::*;
pub use config::*;
pub use control::*;
pub use framing::*;
pub use mesh::*;
pub use model::*;
pub use orbit::*;
pub use toggle::*;
pub use viewer::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
