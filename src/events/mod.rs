pub mod pointer;

pub use pointer::{wire_orbit_drag, wire_wheel_zoom};
