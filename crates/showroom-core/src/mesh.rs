//! CPU-side mesh data and primitive tessellation.
//!
//! Shapes follow the usual Y-up conventions: boxes are centered, cylinders and
//! capsules run along Y, spheres start at the +Y pole. Triangles wind
//! counter-clockwise when seen from outside.

use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    /// rgb, intensity
    pub emissive: [f32; 4],
    /// metalness, roughness
    pub material: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Surface parameters baked into vertices. Colors are linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl Material {
    pub fn new(color: [f32; 3], metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            opacity: 1.0,
            metalness,
            roughness,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
        }
    }

    pub fn glow(mut self, emissive: [f32; 3], intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new([1.0; 3], 0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Box {
        size: Vec3,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Capsule {
        radius: f32,
        length: f32,
        cap_segments: u32,
        radial_segments: u32,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

struct Geometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Tessellate `shape`, move it by `transform` and append it with `material`.
    pub fn push_shape(&mut self, shape: Shape, transform: Mat4, material: &Material) {
        let g = tessellate(shape);
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        let base = self.vertices.len() as u32;
        self.vertices
            .extend(g.positions.iter().zip(&g.normals).map(|(p, n)| Vertex {
                position: transform.transform_point3(*p).to_array(),
                normal: (normal_matrix * *n).normalize_or_zero().to_array(),
                color: [
                    material.color[0],
                    material.color[1],
                    material.color[2],
                    material.opacity,
                ],
                emissive: [
                    material.emissive[0],
                    material.emissive[1],
                    material.emissive[2],
                    material.emissive_intensity,
                ],
                material: [material.metalness, material.roughness],
            }));
        self.indices.extend(g.indices.iter().map(|i| base + i));
    }

    /// Append already-built mesh data, offsetting its indices.
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    /// Axis-aligned bounds as (min, max), `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

fn tessellate(shape: Shape) -> Geometry {
    match shape {
        Shape::Box { size } => box_geometry(size),
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
            segments,
        } => cylinder_geometry(radius_top, radius_bottom, height, segments.max(3)),
        Shape::Sphere {
            radius,
            width_segments,
            height_segments,
        } => {
            let rows: Vec<(f32, f32)> = (0..=height_segments.max(2))
                .map(|iy| {
                    let phi = iy as f32 / height_segments.max(2) as f32 * PI;
                    (phi, radius * phi.cos())
                })
                .collect();
            lathe(&rows, radius, width_segments.max(3))
        }
        Shape::Capsule {
            radius,
            length,
            cap_segments,
            radial_segments,
        } => {
            let caps = cap_segments.max(1);
            let half = length * 0.5;
            let upper = (0..=caps).map(|iy| {
                let phi = iy as f32 / caps as f32 * FRAC_PI_2;
                (phi, radius * phi.cos() + half)
            });
            let lower = (0..=caps).map(|iy| {
                let phi = FRAC_PI_2 + iy as f32 / caps as f32 * FRAC_PI_2;
                (phi, radius * phi.cos() - half)
            });
            let rows: Vec<_> = upper.chain(lower).collect();
            lathe(&rows, radius, radial_segments.max(3))
        }
    }
}

fn box_geometry(size: Vec3) -> Geometry {
    let half = size * 0.5;
    let mut g = Geometry {
        positions: Vec::with_capacity(24),
        normals: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };
    for n in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
        let u = n.any_orthonormal_vector();
        let v = n.cross(u);
        let base = g.positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            g.positions.push((n + u * su + v * sv) * half);
            g.normals.push(n);
        }
        g.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    g
}

fn cylinder_geometry(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Geometry {
    let half = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    let mut g = Geometry {
        positions: Vec::new(),
        normals: Vec::new(),
        indices: Vec::new(),
    };
    let ring = |i: u32| {
        let theta = i as f32 / segments as f32 * TAU;
        (theta.sin(), theta.cos())
    };

    // side: row 0 at the top, row 1 at the bottom
    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for i in 0..=segments {
            let (s, c) = ring(i);
            g.positions.push(Vec3::new(r * s, y, r * c));
            g.normals.push(Vec3::new(s, slope, c).normalize());
        }
    }
    let row = segments + 1;
    for i in 0..segments {
        let a = i;
        let b = row + i;
        let c = row + i + 1;
        let d = i + 1;
        g.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    for (top, y, r) in [(true, half, radius_top), (false, -half, radius_bottom)] {
        if r <= 0.0 {
            continue;
        }
        let normal = if top { Vec3::Y } else { Vec3::NEG_Y };
        let center = g.positions.len() as u32;
        g.positions.push(Vec3::new(0.0, y, 0.0));
        g.normals.push(normal);
        for i in 0..=segments {
            let (s, c) = ring(i);
            g.positions.push(Vec3::new(r * s, y, r * c));
            g.normals.push(normal);
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = a + 1;
            if top {
                g.indices.extend_from_slice(&[center, a, b]);
            } else {
                g.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }
    g
}

/// Revolve a profile around Y. Each row is `(phi, y)` where `phi` is the polar
/// angle of the surface normal and the ring radius is `radius * sin(phi)`.
fn lathe(rows: &[(f32, f32)], radius: f32, segments: u32) -> Geometry {
    let mut g = Geometry {
        positions: Vec::new(),
        normals: Vec::new(),
        indices: Vec::new(),
    };
    for &(phi, y) in rows {
        let ring = radius * phi.sin();
        for ix in 0..=segments {
            let theta = ix as f32 / segments as f32 * TAU;
            let dir = Vec3::new(-theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            g.positions
                .push(Vec3::new(-theta.cos() * ring, y, theta.sin() * ring));
            g.normals.push(dir.normalize_or_zero());
        }
    }
    let stride = segments + 1;
    let last = rows.len() as u32 - 1;
    for iy in 0..last {
        let top_pole = rows[iy as usize].0 <= f32::EPSILON;
        let bottom_pole = (PI - rows[iy as usize + 1].0).abs() <= 1e-5;
        for ix in 0..segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if !top_pole {
                g.indices.extend_from_slice(&[a, b, d]);
            }
            if !bottom_pole {
                g.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    g
}
