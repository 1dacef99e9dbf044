//! Camera description shared with the web frontend.

use crate::constants::{
    ambient_eye_vec3, AMBIENT_FOV_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, DETAIL_FOV_DEG,
};
use crate::interaction::Orbit;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    fn looking_at_origin(eye: Vec3, fov_deg: f32, aspect: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
            fovy_radians: fov_deg.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Wide shot used while browsing.
    pub fn ambient(aspect: f32) -> Self {
        Self::looking_at_origin(ambient_eye_vec3(), AMBIENT_FOV_DEG, aspect)
    }

    /// Close shot placed by the detail orbit.
    pub fn detail(orbit: &Orbit, aspect: f32) -> Self {
        Self::looking_at_origin(orbit.eye(), DETAIL_FOV_DEG, aspect)
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
