//! Input to orientation/zoom state machine.
//!
//! Ambient mode spins the model with the page scroll. Detail mode orbits the
//! camera around the model under drag and wheel input with clamped polar angle
//! and distance.

use crate::constants::{
    detail_eye_vec3, BOB_AMPLITUDE, BOB_FREQUENCY, MAX_DISTANCE, MAX_POLAR_ANGLE, MIN_DISTANCE,
    ROTATE_SPEED, WHEEL_NOTCH_PX, ZOOM_SPEED, ZOOM_STEP_BASE,
};
use crate::input::{InputEvent, InputQueue};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

// keeps look-at well defined when the orbit sits on the pole
const POLE_EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Ambient,
    Detail,
}

/// Spherical camera placement around the origin.
///
/// `yaw` is measured from the canonical viewing direction, so the default
/// orbit has yaw 0 and places the camera at the detail preset eye.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub yaw: f32,
    pub polar: f32,
    pub distance: f32,
}

impl Orbit {
    pub fn canonical() -> Self {
        let eye = detail_eye_vec3();
        let distance = eye.length();
        Self {
            yaw: 0.0,
            polar: (eye.y / distance).acos(),
            distance,
        }
    }

    fn base_azimuth() -> f32 {
        let eye = detail_eye_vec3();
        eye.x.atan2(eye.z)
    }

    /// Camera position for this orbit, looking at the origin.
    pub fn eye(&self) -> Vec3 {
        let azimuth = Self::base_azimuth() - self.yaw;
        let (sp, cp) = self.polar.clamp(POLE_EPSILON, PI - POLE_EPSILON).sin_cos();
        let (sa, ca) = azimuth.sin_cos();
        Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self::canonical()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionState {
    pub mode: InteractionMode,
    pub scroll_fraction: f32,
    pub orbit: Orbit,
    /// Seconds since start; drives the idle bob.
    pub elapsed: f32,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Ambient,
            scroll_fraction: 0.0,
            orbit: Orbit::canonical(),
            elapsed: 0.0,
        }
    }
}

impl InteractionState {
    /// Model yaw in Ambient mode, orbit yaw in Detail mode.
    pub fn yaw(&self) -> f32 {
        match self.mode {
            InteractionMode::Ambient => self.scroll_fraction * TAU,
            InteractionMode::Detail => self.orbit.yaw,
        }
    }

    pub fn bob_offset(&self) -> f32 {
        (self.elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE
    }
}

#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ROTATE_SPEED, ZOOM_SPEED)
    }
}

impl InteractionController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            state: InteractionState::default(),
            rotate_speed,
            zoom_speed,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    pub fn yaw(&self) -> f32 {
        self.state.yaw()
    }

    pub fn polar(&self) -> f32 {
        self.state.orbit.polar
    }

    pub fn distance(&self) -> f32 {
        self.state.orbit.distance
    }

    pub fn bob_offset(&self) -> f32 {
        self.state.bob_offset()
    }

    /// Clamped to [0, 1]; non-finite values are ignored.
    pub fn set_scroll_fraction(&mut self, fraction: f32) {
        if fraction.is_finite() {
            self.state.scroll_fraction = fraction.clamp(0.0, 1.0);
        }
    }

    /// Orbit by a drag expressed as fractions of the viewport height.
    /// Right increases yaw, up lowers the polar angle.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if self.state.mode != InteractionMode::Detail || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let orbit = &mut self.state.orbit;
        orbit.yaw += TAU * dx * self.rotate_speed;
        orbit.polar = (orbit.polar + TAU * dy * self.rotate_speed).clamp(0.0, MAX_POLAR_ANGLE);
    }

    /// Zoom by a wheel delta in pixels; positive moves away.
    pub fn wheel(&mut self, delta: f32) {
        if self.state.mode != InteractionMode::Detail || !delta.is_finite() {
            return;
        }
        let scale = ZOOM_STEP_BASE.powf(-self.zoom_speed * delta / WHEEL_NOTCH_PX);
        let orbit = &mut self.state.orbit;
        orbit.distance = (orbit.distance * scale).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Snap the orbit back to the canonical view.
    pub fn reset(&mut self) {
        self.state.orbit = Orbit::canonical();
    }

    pub fn enter_detail(&mut self) {
        self.state.mode = InteractionMode::Detail;
        self.reset();
    }

    pub fn enter_ambient(&mut self) {
        self.state.mode = InteractionMode::Ambient;
        self.reset();
    }

    /// Advance the bob clock. Negative or non-finite steps are ignored.
    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.state.elapsed += dt;
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Scroll(f) => self.set_scroll_fraction(f),
            InputEvent::Drag { dx, dy } => self.drag(dx, dy),
            InputEvent::Wheel(d) => self.wheel(d),
            InputEvent::Reset => self.reset(),
        }
    }

    pub fn drain(&mut self, queue: &mut InputQueue) {
        for event in queue.drain() {
            self.apply(event);
        }
    }
}
