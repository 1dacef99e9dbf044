//! Frame assembly: camera, lighting rig, ground, atmosphere and the mounted model.
//!
//! The renderer is generic over a [`Surface`] so the same logic drives the
//! WebGPU canvas in the browser and recording surfaces in tests.

use crate::catalog::ProductRecord;
use crate::constants::{
    hex_to_linear, AMBIENT_MODEL_SCALE, AMBIENT_MODEL_Y, CLEAR_COLOR, DETAIL_MODEL_SCALE,
    DETAIL_MODEL_Y, GROUND_COLOR_HEX, GROUND_DIVISIONS, GROUND_OPACITY, GROUND_SIZE, GROUND_Y,
    PARTICLE_COLOR_HEX, PARTICLE_COUNT, PARTICLE_MAX_EMISSIVE, PARTICLE_OPACITY, PARTICLE_RADIUS,
    PARTICLE_SPREAD_XZ, PARTICLE_SPREAD_Y,
};
use crate::error::AssetError;
use crate::interaction::{InteractionMode, InteractionState};
use crate::mesh::{LineVertex, Material, MeshData, Shape};
use crate::model::{brand_accent, ModelDescriptor, ModelResolver, Resolution};
use crate::placeholder::{self, FloatPose};
use crate::state::Camera;
use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Opaque id for geometry living on a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Drawing backend the scene submits frames to.
pub trait Surface {
    type Error: fmt::Display;

    fn upload(&mut self, mesh: &MeshData) -> MeshHandle;
    fn upload_lines(&mut self, lines: &[LineVertex]) -> MeshHandle;
    fn release(&mut self, handle: MeshHandle);
    fn draw(&mut self, frame: &FrameDescription) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Directional,
    Point,
    Spot { angle: f32, penumbra: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    /// Linear RGB.
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    fn new(kind: LightKind, position: [f32; 3], hex: u32, intensity: f32) -> Self {
        Self {
            kind,
            position: Vec3::from_array(position),
            color: hex_to_linear(hex),
            intensity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingRig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub lights: [Light; 4],
}

impl LightingRig {
    /// Fill, key, accent, top spot and rim.
    pub fn standard() -> Self {
        Self {
            ambient_color: hex_to_linear(0x0066cc),
            ambient_intensity: 0.4,
            lights: [
                Light::new(LightKind::Directional, [10.0, 10.0, 5.0], 0x00ffff, 1.0),
                Light::new(LightKind::Point, [-10.0, -10.0, -10.0], 0xff0080, 0.6),
                Light::new(
                    LightKind::Spot {
                        angle: 0.3,
                        penumbra: 1.0,
                    },
                    [0.0, 15.0, 0.0],
                    0x00ff80,
                    1.2,
                ),
                Light::new(LightKind::Point, [0.0, 2.0, -8.0], 0xffffff, 0.8),
            ],
        }
    }
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelDraw {
    pub handle: MeshHandle,
    pub transform: Mat4,
}

/// Everything a surface needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameDescription {
    pub camera: Camera,
    pub lights: LightingRig,
    pub clear_color: [f64; 4],
    pub ground: MeshHandle,
    pub particles: Option<MeshHandle>,
    pub model: Option<ModelDraw>,
    pub elapsed: f32,
}

impl FrameDescription {
    pub fn view_projection(&self) -> Mat4 {
        self.camera.view_projection()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolveTicket(pub u64);

/// Asset the host should fetch and hand back through `complete`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveRequest {
    pub ticket: ResolveTicket,
    pub path: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountedKind {
    Placeholder,
    Asset,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MountedModel {
    pub record_id: String,
    pub handle: MeshHandle,
    pub kind: MountedKind,
    pending: Option<ResolveRequest>,
}

impl MountedModel {
    pub fn pending(&self) -> Option<&ResolveRequest> {
        self.pending.as_ref()
    }
}

/// Grid lines covering the ground square.
pub fn ground_grid() -> Vec<LineVertex> {
    let [r, g, b] = hex_to_linear(GROUND_COLOR_HEX);
    let color = [r, g, b, GROUND_OPACITY];
    let half = GROUND_SIZE * 0.5;
    let step = GROUND_SIZE / GROUND_DIVISIONS as f32;
    let mut lines = Vec::with_capacity((GROUND_DIVISIONS as usize + 1) * 4);
    for i in 0..=GROUND_DIVISIONS {
        let k = -half + i as f32 * step;
        for (a, b) in [([k, -half], [k, half]), ([-half, k], [half, k])] {
            lines.push(LineVertex {
                position: [a[0], GROUND_Y, a[1]],
                color,
            });
            lines.push(LineVertex {
                position: [b[0], GROUND_Y, b[1]],
                color,
            });
        }
    }
    lines
}

/// Small emissive motes scattered above the ground. Same seed, same field.
pub fn particle_field(seed: u64) -> MeshData {
    let mut rng = StdRng::seed_from_u64(seed);
    let color = hex_to_linear(PARTICLE_COLOR_HEX);
    let mut mesh = MeshData::default();
    for _ in 0..PARTICLE_COUNT {
        let at = Vec3::new(
            (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD_XZ,
            rng.gen::<f32>() * PARTICLE_SPREAD_Y,
            (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD_XZ,
        );
        let material = Material::new(color, 0.0, 1.0)
            .glow(color, rng.gen::<f32>() * PARTICLE_MAX_EMISSIVE)
            .with_opacity(PARTICLE_OPACITY);
        mesh.push_shape(
            Shape::Sphere {
                radius: PARTICLE_RADIUS,
                width_segments: 8,
                height_segments: 6,
            },
            Mat4::from_translation(at),
            &material,
        );
    }
    mesh
}

pub struct SceneRenderer<S: Surface> {
    surface: S,
    resolver: ModelResolver,
    lights: LightingRig,
    ground: MeshHandle,
    particles: MeshHandle,
    mounted: Option<MountedModel>,
    requests: Vec<ResolveRequest>,
    next_ticket: u64,
}

impl<S: Surface> SceneRenderer<S> {
    pub fn new(mut surface: S, resolver: ModelResolver, particle_seed: u64) -> Self {
        let ground = surface.upload_lines(&ground_grid());
        let particles = surface.upload(&particle_field(particle_seed));
        Self {
            surface,
            resolver,
            lights: LightingRig::standard(),
            ground,
            particles,
            mounted: None,
            requests: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }

    pub fn mounted(&self) -> Option<&MountedModel> {
        self.mounted.as_ref()
    }

    pub fn is_resolving(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.pending.is_some())
    }

    /// Mount the model for `record`, or nothing.
    ///
    /// Refocusing the record that is already mounted is a no-op. Any other
    /// change releases the current model and cancels its resolution first.
    pub fn focus(&mut self, record: Option<&ProductRecord>) {
        if self.mounted.as_ref().map(|m| m.record_id.as_str()) == record.map(|r| r.id.as_str()) {
            return;
        }
        self.release();
        let Some(record) = record else {
            return;
        };

        let handle = self
            .surface
            .upload(&placeholder::build(brand_accent(&record.brand)));
        let pending = match self.resolver.resolve(record) {
            ModelDescriptor::ExternalAsset { path } => {
                self.next_ticket += 1;
                let request = ResolveRequest {
                    ticket: ResolveTicket(self.next_ticket),
                    path,
                };
                log::debug!("[scene] requesting {} ({:?})", request.path, request.ticket);
                self.requests.push(request.clone());
                Some(request)
            }
            ModelDescriptor::ProceduralPlaceholder { .. } => None,
        };
        log::info!("[scene] mounted placeholder for {}", record.slug);
        self.mounted = Some(MountedModel {
            record_id: record.id.clone(),
            handle,
            kind: MountedKind::Placeholder,
            pending,
        });
    }

    /// Drop the mounted model and cancel its in-flight resolution.
    pub fn release(&mut self) {
        if let Some(m) = self.mounted.take() {
            if let Some(p) = &m.pending {
                self.requests.retain(|r| r.ticket != p.ticket);
                log::debug!("[scene] cancelled {:?}", p.ticket);
            }
            self.surface.release(m.handle);
        }
    }

    /// Requests issued since the last call.
    pub fn take_requests(&mut self) -> Vec<ResolveRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Feed back a fetch result. Returns `true` when a real asset got mounted.
    ///
    /// Results for anything but the current pending ticket are discarded.
    pub fn complete(
        &mut self,
        ticket: ResolveTicket,
        fetched: Result<Vec<u8>, AssetError>,
    ) -> bool {
        let Some(mounted) = self
            .mounted
            .as_mut()
            .filter(|m| m.pending.as_ref().is_some_and(|p| p.ticket == ticket))
        else {
            log::debug!("[scene] discarding stale resolution {ticket:?}");
            return false;
        };
        let Some(request) = mounted.pending.take() else {
            return false;
        };
        match self.resolver.finish(&request.path, fetched) {
            Resolution::Resolved(mesh) => {
                let handle = self.surface.upload(&mesh);
                self.surface.release(mounted.handle);
                mounted.handle = handle;
                mounted.kind = MountedKind::Asset;
                true
            }
            Resolution::Unresolved => false,
        }
    }

    /// Model-space to world transform for the current mount.
    pub fn model_transform(&self, state: &InteractionState) -> Option<Mat4> {
        let mounted = self.mounted.as_ref()?;
        let bob = state.bob_offset();
        let group = match state.mode {
            InteractionMode::Ambient => Mat4::from_scale_rotation_translation(
                Vec3::splat(AMBIENT_MODEL_SCALE),
                Quat::from_rotation_y(state.yaw()),
                Vec3::new(0.0, AMBIENT_MODEL_Y + bob, 0.0),
            ),
            InteractionMode::Detail => Mat4::from_scale_rotation_translation(
                Vec3::splat(DETAIL_MODEL_SCALE),
                Quat::IDENTITY,
                Vec3::new(0.0, DETAIL_MODEL_Y + bob, 0.0),
            ),
        };
        Some(match mounted.kind {
            MountedKind::Placeholder => group * FloatPose::at(state.elapsed).matrix(),
            MountedKind::Asset => group,
        })
    }

    pub fn camera(state: &InteractionState, aspect: f32) -> Camera {
        match state.mode {
            InteractionMode::Ambient => Camera::ambient(aspect),
            InteractionMode::Detail => Camera::detail(&state.orbit, aspect),
        }
    }

    /// Build and submit one frame.
    pub fn render(&mut self, state: &InteractionState, aspect: f32) -> Result<(), S::Error> {
        let model = self
            .mounted
            .as_ref()
            .zip(self.model_transform(state))
            .map(|(m, transform)| ModelDraw {
                handle: m.handle,
                transform,
            });
        let frame = FrameDescription {
            camera: Self::camera(state, aspect),
            lights: self.lights,
            clear_color: CLEAR_COLOR,
            ground: self.ground,
            particles: model.map(|_| self.particles),
            model,
            elapsed: state.elapsed,
        };
        self.surface.draw(&frame)
    }
}
