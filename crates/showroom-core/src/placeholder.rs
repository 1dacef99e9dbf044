//! Procedural stand-in motorcycle built from primitive solids.
//!
//! Offsets and materials are fixed; only the accent color varies, so two
//! records of the same brand produce identical meshes.

use crate::constants::{
    hex_to_linear, FLOAT_LIFT_INTENSITY, FLOAT_ROTATION_INTENSITY, FLOAT_SPEED,
};
use crate::mesh::{Material, MeshData, Shape};
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

pub const PART_COUNT: usize = 12;

const ROUND_SEGMENTS: u32 = 32;
const SPHERE_ROWS: u32 = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderPart {
    pub name: &'static str,
    pub shape: Shape,
    pub translation: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub material: Material,
}

impl PlaceholderPart {
    pub fn transform(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.translation,
        )
    }
}

fn part(name: &'static str, shape: Shape, at: [f32; 3], material: Material) -> PlaceholderPart {
    PlaceholderPart {
        name,
        shape,
        translation: Vec3::from_array(at),
        rotation: Vec3::ZERO,
        material,
    }
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32) -> Shape {
    Shape::Cylinder {
        radius_top,
        radius_bottom,
        height,
        segments: ROUND_SEGMENTS,
    }
}

fn sphere(radius: f32) -> Shape {
    Shape::Sphere {
        radius,
        width_segments: ROUND_SEGMENTS,
        height_segments: SPHERE_ROWS,
    }
}

fn cuboid(x: f32, y: f32, z: f32) -> Shape {
    Shape::Box {
        size: Vec3::new(x, y, z),
    }
}

/// The twelve parts for a given accent (0xRRGGBB).
pub fn parts(accent_hex: u32) -> SmallVec<[PlaceholderPart; PART_COUNT]> {
    let accent = hex_to_linear(accent_hex);
    let rubber = hex_to_linear(0x2a2a2a);
    let black = hex_to_linear(0x1a1a1a);

    let mut front_wheel = part(
        "front_wheel",
        cylinder(0.45, 0.45, 0.25),
        [1.3, -0.6, 0.0],
        Material::new(rubber, 0.8, 0.2),
    );
    front_wheel.rotation.x = FRAC_PI_2;
    let mut rear_wheel = part(
        "rear_wheel",
        cylinder(0.45, 0.45, 0.3),
        [-1.1, -0.6, 0.0],
        Material::new(rubber, 0.8, 0.2),
    );
    rear_wheel.rotation.x = FRAC_PI_2;
    let mut handlebar = part(
        "handlebar",
        cylinder(0.02, 0.02, 0.7),
        [1.5, 0.6, 0.0],
        Material::new(hex_to_linear(0x444444), 0.8, 0.2),
    );
    handlebar.rotation.z = FRAC_PI_2;
    let mut exhaust = part(
        "exhaust",
        cylinder(0.06, 0.08, 1.0),
        [-0.8, -0.2, 0.35],
        Material::new(hex_to_linear(0x666666), 0.9, 0.1).glow(hex_to_linear(0xff4400), 0.1),
    );
    exhaust.rotation.y = FRAC_PI_6;

    let strip = Material::new(accent, 0.0, 1.0).glow(accent, 0.3);
    let white = hex_to_linear(0xffffff);
    let red = hex_to_linear(0xff0000);

    smallvec::smallvec![
        part(
            "frame",
            cuboid(2.2, 0.25, 0.6),
            [0.0, 0.0, 0.0],
            Material::new(accent, 0.9, 0.1).glow(accent, 0.1),
        ),
        part(
            "tank",
            Shape::Capsule {
                radius: 0.35,
                length: 1.0,
                cap_segments: 4,
                radial_segments: 8,
            },
            [0.4, 0.35, 0.0],
            Material::new(black, 0.95, 0.05),
        ),
        front_wheel,
        rear_wheel,
        part(
            "fork",
            cylinder(0.03, 0.03, 0.8),
            [1.4, 0.2, 0.0],
            Material::new(hex_to_linear(0x333333), 0.9, 0.1),
        ),
        handlebar,
        exhaust,
        part(
            "seat",
            cuboid(0.8, 0.1, 0.4),
            [-0.3, 0.4, 0.0],
            Material::new(black, 0.1, 0.8),
        ),
        part(
            "headlight",
            sphere(0.08),
            [1.6, 0.3, 0.0],
            Material::new(white, 0.0, 1.0)
                .glow(white, 0.8)
                .with_opacity(0.9),
        ),
        part(
            "taillight",
            sphere(0.04),
            [-1.3, 0.2, 0.0],
            Material::new(red, 0.0, 1.0).glow(red, 0.6),
        ),
        part("accent_strip_right", cuboid(1.5, 0.05, 0.02), [0.5, 0.15, 0.32], strip),
        part("accent_strip_left", cuboid(1.5, 0.05, 0.02), [0.5, 0.15, -0.32], strip),
    ]
}

/// Merge all parts into a single mesh in model space.
pub fn build(accent_hex: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for p in parts(accent_hex) {
        mesh.push_shape(p.shape, p.transform(), &p.material);
    }
    mesh
}

/// Gentle sway applied on top of the placeholder's model transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatPose {
    pub rotation: Vec3,
    pub lift: f32,
}

impl FloatPose {
    pub fn at(elapsed: f32) -> Self {
        let t = elapsed / 4.0 * FLOAT_SPEED;
        let ri = FLOAT_ROTATION_INTENSITY;
        Self {
            rotation: Vec3::new(t.cos() / 8.0 * ri, t.sin() / 8.0 * ri, t.sin() / 20.0 * ri),
            lift: t.sin() / 10.0 * FLOAT_LIFT_INTENSITY,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            Vec3::new(0.0, self.lift, 0.0),
        )
    }
}
