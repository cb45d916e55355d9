//! Intermittent wireframe overlay.
//!
//! [`OverlayMachine`] owns the hidden → fading_in → visible → fading_out cycle
//! and the opacity it implies. The geometry that is shown is supplied by a
//! [`WireframeOverlay`] variant; one deployment uses exactly one of them.

mod globe;
mod polyhedra;

pub use globe::GlobeOverlay;
pub use polyhedra::PolyhedraOverlay;

use crate::constants::{OVERLAY_FADE_SPEED, OVERLAY_MAX_OPACITY};
use crate::rng::RandomSource;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayPhase {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

impl OverlayPhase {
    /// The phase that follows this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            OverlayPhase::Hidden => OverlayPhase::FadingIn,
            OverlayPhase::FadingIn => OverlayPhase::Visible,
            OverlayPhase::Visible => OverlayPhase::FadingOut,
            OverlayPhase::FadingOut => OverlayPhase::Hidden,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OverlayPhase::Hidden => "hidden",
            OverlayPhase::FadingIn => "fading_in",
            OverlayPhase::Visible => "visible",
            OverlayPhase::FadingOut => "fading_out",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayState {
    pub phase: OverlayPhase,
    /// Seconds spent in the current phase.
    pub timer: f32,
    /// Threshold for leaving `Hidden` or `Visible`.
    pub next_trigger: f32,
}

/// Half-open `[lo, hi)` range a duration is drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationRange {
    pub lo: f32,
    pub hi: f32,
}

impl DurationRange {
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    pub fn draw(&self, rng: &mut dyn RandomSource) -> f32 {
        rng.range(self.lo, self.hi)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.lo && v <= self.hi
    }
}

/// Duration ranges that give each overlay variant its rhythm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayTiming {
    /// Delay before the first appearance.
    pub initial: DurationRange,
    /// How long the overlay stays fully visible.
    pub visible: DurationRange,
    /// Gap between appearances.
    pub hidden: DurationRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: OverlayPhase,
    pub to: OverlayPhase,
}

pub struct OverlayMachine {
    state: OverlayState,
    opacity: f32,
    timing: OverlayTiming,
    fade_speed: f32,
    max_opacity: f32,
}

impl OverlayMachine {
    pub fn new(timing: OverlayTiming, rng: &mut dyn RandomSource) -> Self {
        Self::with_fade(timing, OVERLAY_FADE_SPEED, OVERLAY_MAX_OPACITY, rng)
    }

    pub fn with_fade(
        timing: OverlayTiming,
        fade_speed: f32,
        max_opacity: f32,
        rng: &mut dyn RandomSource,
    ) -> Self {
        Self {
            state: OverlayState {
                phase: OverlayPhase::Hidden,
                timer: 0.0,
                next_trigger: timing.initial.draw(rng),
            },
            opacity: 0.0,
            timing,
            fade_speed,
            max_opacity,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn phase(&self) -> OverlayPhase {
        self.state.phase
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn max_opacity(&self) -> f32 {
        self.max_opacity
    }

    pub fn timing(&self) -> OverlayTiming {
        self.timing
    }

    /// Advance by `dt` seconds. Performs at most one phase transition, no
    /// matter how large `dt` is, and returns it if one happened.
    pub fn advance(&mut self, dt: f32, rng: &mut dyn RandomSource) -> Option<PhaseChange> {
        let dt = dt.max(0.0);
        let from = self.state.phase;
        self.state.timer += dt;

        let to = match from {
            OverlayPhase::Hidden => {
                if self.state.timer >= self.state.next_trigger {
                    Some(OverlayPhase::FadingIn)
                } else {
                    None
                }
            }
            OverlayPhase::FadingIn => {
                self.opacity = (self.opacity + dt * self.fade_speed).min(self.max_opacity);
                if self.opacity >= self.max_opacity {
                    self.state.next_trigger = self.timing.visible.draw(rng);
                    Some(OverlayPhase::Visible)
                } else {
                    None
                }
            }
            OverlayPhase::Visible => {
                if self.state.timer >= self.state.next_trigger {
                    Some(OverlayPhase::FadingOut)
                } else {
                    None
                }
            }
            OverlayPhase::FadingOut => {
                self.opacity = (self.opacity - dt * self.fade_speed).max(0.0);
                if self.opacity <= 0.0 {
                    self.state.next_trigger = self.timing.hidden.draw(rng);
                    Some(OverlayPhase::Hidden)
                } else {
                    None
                }
            }
        }?;

        self.state.phase = to;
        self.state.timer = 0.0;
        log::debug!(
            "[overlay] {} -> {} (next trigger {:.2}s)",
            from.name(),
            to.name(),
            self.state.next_trigger
        );
        Some(PhaseChange { from, to })
    }
}

/// Values the overlay material needs each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayMaterial {
    pub opacity: f32,
    pub time: f32,
    pub color: Vec3,
}

/// A wireframe shape that can be shown by the overlay machine.
pub trait WireframeOverlay {
    fn name(&self) -> &'static str;

    /// Duration ranges used by the visibility cycle for this shape.
    fn timing(&self) -> OverlayTiming;

    /// Animate the shape's own transform.
    fn advance(&mut self, dt: f32, elapsed: f32);

    /// Line-list vertex pairs in model space.
    fn segments(&self) -> &[Vec3];

    /// Bumped whenever `segments` changes; the vertex count never changes.
    fn geometry_revision(&self) -> u64 {
        0
    }

    fn transform(&self) -> Mat4;

    fn color(&self) -> Vec3;
}

/// Which overlay shape a deployment shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayVariant {
    #[default]
    Globe,
    Polyhedra,
}

impl OverlayVariant {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "globe" => Some(OverlayVariant::Globe),
            "polyhedra" => Some(OverlayVariant::Polyhedra),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn WireframeOverlay> {
        match self {
            OverlayVariant::Globe => Box::new(GlobeOverlay::new()),
            OverlayVariant::Polyhedra => Box::new(PolyhedraOverlay::new()),
        }
    }
}

/// Overlay machine coupled with the shape it reveals.
pub struct OverlayStage {
    machine: OverlayMachine,
    shape: Box<dyn WireframeOverlay>,
    time: f32,
}

impl OverlayStage {
    pub fn new(shape: Box<dyn WireframeOverlay>, rng: &mut dyn RandomSource) -> Self {
        let machine = OverlayMachine::new(shape.timing(), rng);
        Self {
            machine,
            shape,
            time: 0.0,
        }
    }

    pub fn advance(
        &mut self,
        dt: f32,
        elapsed: f32,
        rng: &mut dyn RandomSource,
    ) -> Option<PhaseChange> {
        let change = self.machine.advance(dt, rng);
        self.time = elapsed;
        self.shape.advance(dt, elapsed);
        change
    }

    pub fn machine(&self) -> &OverlayMachine {
        &self.machine
    }

    pub fn shape(&self) -> &dyn WireframeOverlay {
        self.shape.as_ref()
    }

    pub fn material(&self) -> OverlayMaterial {
        OverlayMaterial {
            opacity: self.machine.opacity(),
            time: self.time,
            color: self.shape.color(),
        }
    }
}
