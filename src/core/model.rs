// Active model lifecycle: `Unloaded → Loading → Displayed → Loading → …`.
//
// Loads are asynchronous; each request gets a [`LoadTicket`] carrying a
// monotonically increasing generation. What happens when loads overlap is
// decided by [`LoadPolicy`].

use glam::{Mat4, Quat, Vec3};

/// Placement of the displayed model in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_y: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl ModelTransform {
    /// Unit scale, rotation only about the vertical axis. Position is kept.
    pub fn reset(&mut self, rotation_y: f32) {
        self.scale = Vec3::ONE;
        self.rotation_y = rotation_y;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.rotation_y),
            self.position,
        )
    }
}

/// How completions of overlapping loads are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Every completion attaches, in completion order; the last to finish
    /// ends up displayed.
    #[default]
    LastCompletedWins,
    /// Completions older than the newest request are discarded.
    LatestRequestWins,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadTicket {
    pub generation: u64,
    pub path: String,
    pub preserve_rotation: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unloaded,
    Loading,
    Displayed,
}

#[derive(Debug)]
pub struct DisplayedModel<M> {
    pub model: M,
    pub path: String,
    pub generation: u64,
    pub transform: ModelTransform,
}

#[derive(Debug)]
pub enum LoadOutcome<M> {
    /// The model is now displayed; `previous` is the detached one, if any.
    Attached { previous: Option<DisplayedModel<M>> },
    /// A newer request superseded this load and the policy dropped it.
    Superseded { model: M },
}

#[derive(Debug)]
pub struct ModelSlot<M> {
    policy: LoadPolicy,
    displayed: Option<DisplayedModel<M>>,
    next_generation: u64,
    latest_requested: Option<u64>,
    in_flight: usize,
}

impl<M> ModelSlot<M> {
    pub fn new(policy: LoadPolicy) -> Self {
        Self {
            policy,
            displayed: None,
            next_generation: 0,
            latest_requested: None,
            in_flight: 0,
        }
    }

    pub fn begin_load(&mut self, path: impl Into<String>, preserve_rotation: f32) -> LoadTicket {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.latest_requested = Some(generation);
        self.in_flight += 1;
        LoadTicket {
            generation,
            path: path.into(),
            preserve_rotation,
        }
    }

    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        model: M,
        transform: ModelTransform,
    ) -> LoadOutcome<M> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.policy == LoadPolicy::LatestRequestWins
            && self.latest_requested != Some(ticket.generation)
        {
            return LoadOutcome::Superseded { model };
        }
        let previous = self.displayed.replace(DisplayedModel {
            model,
            path: ticket.path.clone(),
            generation: ticket.generation,
            transform,
        });
        LoadOutcome::Attached { previous }
    }

    /// A load that will never complete; the displayed model stays.
    pub fn fail_load(&mut self, _ticket: &LoadTicket) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// True when a completion for `ticket` would be dropped by the policy.
    pub fn is_superseded(&self, ticket: &LoadTicket) -> bool {
        self.policy == LoadPolicy::LatestRequestWins
            && self.latest_requested != Some(ticket.generation)
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight > 0 {
            Phase::Loading
        } else if self.displayed.is_some() {
            Phase::Displayed
        } else {
            Phase::Unloaded
        }
    }

    #[inline]
    pub fn displayed(&self) -> Option<&DisplayedModel<M>> {
        self.displayed.as_ref()
    }

    #[inline]
    pub fn displayed_mut(&mut self) -> Option<&mut DisplayedModel<M>> {
        self.displayed.as_mut()
    }

    /// Current vertical rotation of the displayed model, 0 when none.
    pub fn current_rotation(&self) -> f32 {
        self.displayed
            .as_ref()
            .map(|d| d.transform.rotation_y)
            .unwrap_or(0.0)
    }
}
