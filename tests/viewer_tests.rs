// Host-side tests for the viewer controller: framing, swapping, load
// ordering and per-frame updates, with a stand-in model type.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}
mod config {
    include!("../src/core/config.rs");
}
mod control {
    include!("../src/core/control.rs");
}
mod framing {
    include!("../src/core/framing.rs");
}
mod mesh {
    include!("../src/core/mesh.rs");
}
mod model {
    include!("../src/core/model.rs");
}
mod orbit {
    include!("../src/core/orbit.rs");
}
mod viewer {
    include!("../src/core/viewer.rs");
}

use config::ViewerConfig;
use control::ControlState;
use framing::{camera_distance, Aabb};
use glam::Vec3;
use model::{LoadOutcome, LoadPolicy, ModelTransform, Phase};
use viewer::*;

/// Box-shaped model; bounds are translated by the transform position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BoxModel(Aabb);

impl BoxModel {
    fn sized(size: Vec3) -> Self {
        BoxModel(Aabb {
            min: Vec3::ZERO,
            max: size,
        })
    }
}

impl Bounded for BoxModel {
    fn bounds(&self, t: &ModelTransform) -> Aabb {
        Aabb {
            min: self.0.min + t.position,
            max: self.0.max + t.position,
        }
    }
}

fn manual_config() -> ViewerConfig {
    ViewerConfig {
        state_driven: false,
        ..ViewerConfig::default()
    }
}

fn attached<M>(outcome: LoadOutcome<M>) -> bool {
    matches!(outcome, LoadOutcome::Attached { .. })
}

#[test]
fn first_load_frames_camera_and_recenters_model() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    assert_eq!(v.phase(), Phase::Unloaded);
    let ticket = v.initial_load();
    assert_eq!(ticket.path, "/static/hoodie1.gltf");
    assert_eq!(v.phase(), Phase::Loading);

    let size = Vec3::new(1.0, 2.0, 0.5);
    assert!(attached(v.on_model_loaded(&ticket, BoxModel::sized(size))));
    assert_eq!(v.phase(), Phase::Displayed);

    let d = v.displayed().unwrap();
    assert_eq!(d.transform.position, -size * 0.5);
    assert_eq!(d.transform.scale, Vec3::ONE);
    assert_eq!(d.transform.rotation_y, 0.0);

    let expected_z = camera_distance(size, 45.0);
    assert!((v.camera.position.z - expected_z).abs() < 1e-3);
    assert!((v.camera.position.y - 0.002).abs() < 1e-4);
    assert_eq!(v.controls.target, Vec3::new(0.0, 0.002, 0.0));
}

#[test]
fn framing_is_frozen_after_first_model() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    let t = v.initial_load();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::ONE));
    let z = v.camera.position.z;

    let t = v.manual_swap().unwrap();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::splat(10.0)));
    assert!((v.camera.position.z - z).abs() < 1e-3);
    assert_eq!(v.framing().computations(), 1);
}

#[test]
fn unfrozen_framing_reframes_each_model() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(ViewerConfig {
        freeze_framing_after_first_load: false,
        ..manual_config()
    });
    let t = v.initial_load();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::ONE));
    let z = v.camera.position.z;
    let t = v.manual_swap().unwrap();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::splat(10.0)));
    assert!(v.camera.position.z > z * 5.0);
    assert_eq!(v.framing().computations(), 2);
}

#[test]
fn manual_swap_cycles_and_keeps_rotation() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    let t = v.initial_load();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::ONE));
    for _ in 0..10 {
        v.frame_update(&ControlState::default(), (800, 600));
    }
    let rot = v.displayed().unwrap().transform.rotation_y;
    assert!((rot - 10.0 * constants::SPIN_PER_FRAME).abs() < 1e-5);

    let t = v.manual_swap().unwrap();
    assert_eq!(t.path, "/static/hoodie2.gltf");
    assert_eq!(t.preserve_rotation, rot);
    v.on_model_loaded(&t, BoxModel::sized(Vec3::ONE));
    assert_eq!(v.displayed().unwrap().transform.rotation_y, rot);
    assert_eq!(v.displayed().unwrap().path, "/static/hoodie2.gltf");

    let t = v.manual_swap().unwrap();
    assert_eq!(t.path, "/static/hoodie1.gltf");
}

#[test]
fn manual_swap_without_assets_does_nothing() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(ViewerConfig {
        manual_assets: Vec::new(),
        ..manual_config()
    });
    assert!(v.manual_swap().is_none());
    assert_eq!(v.phase(), Phase::Unloaded);
}

#[test]
fn last_completed_load_wins_by_default() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    let a = v.request_load("a.gltf", 0.0);
    let b = v.request_load("b.gltf", 0.0);
    assert!(attached(v.on_model_loaded(&b, BoxModel::sized(Vec3::ONE))));
    assert_eq!(v.phase(), Phase::Loading);
    match v.on_model_loaded(&a, BoxModel::sized(Vec3::ONE)) {
        LoadOutcome::Attached { previous } => assert_eq!(previous.unwrap().path, "b.gltf"),
        LoadOutcome::Superseded { .. } => panic!("stale load must still attach"),
    }
    assert_eq!(v.displayed().unwrap().path, "a.gltf");
    assert_eq!(v.phase(), Phase::Displayed);
}

#[test]
fn latest_request_policy_drops_stale_completions() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(ViewerConfig {
        load_policy: LoadPolicy::LatestRequestWins,
        ..manual_config()
    });
    let a = v.request_load("a.gltf", 0.0);
    let b = v.request_load("b.gltf", 0.0);
    assert!(attached(v.on_model_loaded(&b, BoxModel::sized(Vec3::ONE))));
    assert!(matches!(
        v.on_model_loaded(&a, BoxModel::sized(Vec3::splat(9.0))),
        LoadOutcome::Superseded { .. }
    ));
    assert_eq!(v.displayed().unwrap().path, "b.gltf");
}

#[test]
fn failed_load_keeps_current_model() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    let t = v.initial_load();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::ONE));
    let t = v.manual_swap().unwrap();
    v.on_load_failed(&t);
    assert_eq!(v.phase(), Phase::Displayed);
    assert_eq!(v.displayed().unwrap().path, "/static/hoodie1.gltf");
}

#[test]
fn empty_bounds_leave_framing_alone() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    let start = v.camera.position;
    let t = v.initial_load();
    v.on_model_loaded(&t, BoxModel(Aabb::EMPTY));
    assert_eq!(v.framing().computations(), 0);
    assert_eq!(v.camera.position, start);
    assert_eq!(v.phase(), Phase::Displayed);
}

#[test]
fn state_changes_trigger_variant_loads_once() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(ViewerConfig::default());
    let first = v.frame_update(&ControlState::default(), (640, 480));
    assert_eq!(first.loads.len(), 1);
    assert_eq!(first.loads[0].path, "/static/hoodie000.gltf");
    assert!(first.resized);

    let again = v.frame_update(&ControlState::default(), (640, 480));
    assert!(again.loads.is_empty());
    assert!(!again.resized);

    let lit = ControlState {
        audio: true,
        vibration: true,
        ..ControlState::default()
    };
    let out = v.frame_update(&lit, (640, 480));
    assert_eq!(out.loads.len(), 1);
    assert_eq!(out.loads[0].path, "/static/hoodie101.gltf");
}

#[test]
fn manual_mode_ignores_control_state() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    let lit = ControlState {
        screen: true,
        ..ControlState::default()
    };
    assert!(v.frame_update(&lit, (640, 480)).loads.is_empty());
}

#[test]
fn zero_sized_surface_keeps_aspect() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    v.frame_update(&ControlState::default(), (1000, 500));
    let aspect = v.camera.aspect;
    let out = v.frame_update(&ControlState::default(), (0, 0));
    assert!(!out.resized);
    assert_eq!(v.camera.aspect, aspect);
    assert!(v.view_projection().is_finite());
}

#[test]
fn spin_accumulates_only_on_displayed_model() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    v.frame_update(&ControlState::default(), (10, 10));
    assert!(v.model_matrix().is_none());

    let t = v.initial_load();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::ONE));
    v.frame_update(&ControlState::default(), (10, 10));
    v.frame_update(&ControlState::default(), (10, 10));
    let rot = v.displayed().unwrap().transform.rotation_y;
    assert!((rot - 2.0 * constants::SPIN_PER_FRAME).abs() < 1e-6);
    assert!(v.model_matrix().is_some());
}

#[test]
fn idle_spin_stays_bounded_and_steady_over_a_day() {
    let mut v: ViewerState<BoxModel> = ViewerState::new(manual_config());
    let t = v.initial_load();
    v.on_model_loaded(&t, BoxModel::sized(Vec3::ONE));
    let state = ControlState::default();
    // 24h at 60 fps
    for _ in 0..5_184_000u32 {
        v.frame_update(&state, (10, 10));
    }
    let before = v.displayed().unwrap().transform.rotation_y;
    assert!((0.0..std::f32::consts::TAU).contains(&before));
    v.frame_update(&state, (10, 10));
    let after = v.displayed().unwrap().transform.rotation_y;
    let step = (after - before).rem_euclid(std::f32::consts::TAU);
    assert!(
        (step - constants::SPIN_PER_FRAME).abs() < 1e-5,
        "step {step} after a day of spinning"
    );
}
