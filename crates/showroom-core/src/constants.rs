use glam::Vec3;
use std::f32::consts::PI;

// Shared scene/interaction tuning constants used by the core and the web frontend.

// Camera presets
pub const AMBIENT_EYE: [f32; 3] = [5.0, 2.0, 5.0]; // wide shot used while browsing
pub const AMBIENT_FOV_DEG: f32 = 45.0;
pub const DETAIL_EYE: [f32; 3] = [4.0, 2.0, 4.0]; // canonical front-three-quarter
pub const DETAIL_FOV_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Orbit limits (detail mode)
pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 10.0;
pub const MAX_POLAR_ANGLE: f32 = PI / 1.8; // slightly past horizontal, never the underside

// Orbit feel
pub const ROTATE_SPEED: f32 = 0.4;
pub const ZOOM_SPEED: f32 = 0.6;
pub const ZOOM_STEP_BASE: f32 = 0.95; // per wheel notch at zoom speed 1.0
pub const WHEEL_NOTCH_PX: f32 = 100.0; // pixel delta counted as one wheel notch

// Model placement
pub const AMBIENT_MODEL_SCALE: f32 = 2.0;
pub const AMBIENT_MODEL_Y: f32 = 0.0;
pub const DETAIL_MODEL_SCALE: f32 = 1.2;
pub const DETAIL_MODEL_Y: f32 = -0.5;

// Idle bob (applied in every mode)
pub const BOB_FREQUENCY: f32 = 0.5; // rad/s
pub const BOB_AMPLITUDE: f32 = 0.1;

// Placeholder float sway
pub const FLOAT_SPEED: f32 = 1.5;
pub const FLOAT_ROTATION_INTENSITY: f32 = 0.3;
pub const FLOAT_LIFT_INTENSITY: f32 = 0.3;

// Brand accents (sRGB hex)
pub const DEFAULT_ACCENT_HEX: u32 = 0xff6b35;
pub const BRAND_ACCENTS: [(&str, u32); 5] = [
    ("yamaha", 0x0066cc),
    ("honda", 0xcc0000),
    ("kawasaki", 0x00cc66),
    ("ducati", 0xcc3300),
    ("bmw", 0x0099cc),
];

// Ground grid
pub const GROUND_Y: f32 = -2.0;
pub const GROUND_SIZE: f32 = 30.0;
pub const GROUND_DIVISIONS: u32 = 30;
pub const GROUND_COLOR_HEX: u32 = 0x001122;
pub const GROUND_OPACITY: f32 = 0.4;

// Atmosphere particles
pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_RADIUS: f32 = 0.02;
pub const PARTICLE_SPREAD_XZ: f32 = 20.0;
pub const PARTICLE_SPREAD_Y: f32 = 10.0;
pub const PARTICLE_COLOR_HEX: u32 = 0x00ffff;
pub const PARTICLE_OPACITY: f32 = 0.6;
pub const PARTICLE_MAX_EMISSIVE: f32 = 0.5;
pub const PARTICLE_SEED: u64 = 42;

// Background
pub const CLEAR_COLOR: [f64; 4] = [0.01, 0.015, 0.03, 1.0];

#[inline]
pub fn detail_eye_vec3() -> Vec3 {
    Vec3::from_array(DETAIL_EYE)
}

#[inline]
pub fn ambient_eye_vec3() -> Vec3 {
    Vec3::from_array(AMBIENT_EYE)
}

/// Convert a 0xRRGGBB sRGB value into linear RGB.
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}
