// Platform-free viewer controller: camera framing, model swapping and the
// per-frame update. The web layer owns fetching and GPU work; this type
// decides what to load and where everything goes.

use super::camera::Camera;
use super::config::ViewerConfig;
use super::control::{AssetSelector, ControlState};
use super::framing::{recenter, Aabb, CameraFraming, Framing};
use super::mesh::CpuModel;
use super::model::{DisplayedModel, LoadOutcome, LoadTicket, ModelSlot, ModelTransform, Phase};
use super::orbit::OrbitControls;
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Anything the viewer can display must report its bounds under a transform.
pub trait Bounded {
    fn bounds(&self, transform: &ModelTransform) -> Aabb;
}

impl Bounded for CpuModel {
    fn bounds(&self, transform: &ModelTransform) -> Aabb {
        CpuModel::bounds(self, transform)
    }
}

/// Result of one frame update.
#[derive(Debug, Default)]
pub struct FrameOutcome {
    /// The surface size changed and the renderer must reconfigure.
    pub resized: bool,
    /// Loads the caller must start.
    pub loads: Vec<LoadTicket>,
}

pub struct ViewerState<M> {
    pub config: ViewerConfig,
    pub camera: Camera,
    pub controls: OrbitControls,
    framing: Framing,
    slot: ModelSlot<M>,
    selector: AssetSelector,
    manual_index: usize,
}

impl<M: Bounded> ViewerState<M> {
    pub fn new(config: ViewerConfig) -> Self {
        let controls = OrbitControls::new(config.orbit_enabled);
        let manual_index = config
            .manual_assets
            .iter()
            .position(|a| *a == config.initial_asset)
            .unwrap_or(0);
        Self {
            framing: Framing::new(config.freeze_framing_after_first_load),
            slot: ModelSlot::new(config.load_policy),
            selector: AssetSelector::default(),
            camera: Camera::default(),
            controls,
            manual_index,
            config,
        }
    }

    /// Request a load of `path` that will show up rotated by `preserve_rotation`.
    pub fn request_load(&mut self, path: impl Into<String>, preserve_rotation: f32) -> LoadTicket {
        let ticket = self.slot.begin_load(path, preserve_rotation);
        log::info!(
            "[viewer] loading {} (gen {}, rot {:.3})",
            ticket.path,
            ticket.generation,
            ticket.preserve_rotation
        );
        ticket
    }

    pub fn initial_load(&mut self) -> LoadTicket {
        let url = self.config.asset_url(&self.config.initial_asset);
        self.request_load(url, 0.0)
    }

    /// Cycle to the next manual asset, keeping the current vertical rotation.
    pub fn manual_swap(&mut self) -> Option<LoadTicket> {
        let n = self.config.manual_assets.len();
        if n == 0 {
            return None;
        }
        let rotation = self.slot.current_rotation();
        self.manual_index = (self.manual_index + 1) % n;
        let url = self.config.asset_url(&self.config.manual_assets[self.manual_index]);
        Some(self.request_load(url, rotation))
    }

    /// Attach a finished load: reset its transform, recentre it, apply
    /// framing and snap the camera. Returns what the slot did with it.
    pub fn on_model_loaded(&mut self, ticket: &LoadTicket, model: M) -> LoadOutcome<M> {
        let mut transform = ModelTransform::default();
        transform.reset(ticket.preserve_rotation);
        if self.slot.is_superseded(ticket) {
            log::info!(
                "[viewer] dropping superseded load {} (gen {})",
                ticket.path,
                ticket.generation
            );
            return self.slot.complete_load(ticket, model, transform);
        }

        let bounds = model.bounds(&transform);
        transform.position = recenter(transform.position, bounds.center());
        if bounds.is_empty() {
            log::warn!("[viewer] {} has empty bounds; framing unchanged", ticket.path);
        } else {
            let f = self.framing.frame(bounds.size(), self.camera.fov_y_degrees);
            self.apply_framing(f);
        }
        self.slot.complete_load(ticket, model, transform)
    }

    pub fn on_load_failed(&mut self, ticket: &LoadTicket) {
        self.slot.fail_load(ticket);
    }

    fn apply_framing(&mut self, f: CameraFraming) {
        self.camera.position.z = f.camera_z;
        self.camera.position.y = f.target_y;
        self.controls.target = Vec3::new(0.0, f.target_y, 0.0);
        self.camera.position = self.controls.update(self.camera.position);
    }

    /// Advance one frame: idle spin, viewport sizing, state-driven asset
    /// trigger and orbit update, in that order.
    pub fn frame_update(&mut self, state: &ControlState, surface: (u32, u32)) -> FrameOutcome {
        let spin = self.config.spin_per_frame;
        if let Some(d) = self.slot.displayed_mut() {
            // Kept in [0, 2π) so the per-frame step stays exact in f32
            d.transform.rotation_y = (d.transform.rotation_y + spin).rem_euclid(TAU);
        }

        let resized = self.camera.set_viewport(surface.0, surface.1);

        let mut loads = Vec::new();
        if self.config.state_driven {
            if let Some(file) = self.selector.observe(state) {
                let rotation = self.slot.current_rotation();
                let url = self.config.asset_url(&file);
                loads.push(self.request_load(url, rotation));
            }
        }

        self.camera.position = self.controls.update(self.camera.position);
        FrameOutcome { resized, loads }
    }

    #[inline]
    pub fn displayed(&self) -> Option<&DisplayedModel<M>> {
        self.slot.displayed()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.slot.phase()
    }

    #[inline]
    pub fn framing(&self) -> &Framing {
        &self.framing
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.view_projection(self.controls.target)
    }

    pub fn model_matrix(&self) -> Option<Mat4> {
        self.slot.displayed().map(|d| d.transform.matrix())
    }
}
