// Shared fixtures for the host-side integration tests.

#![allow(dead_code)]

use showroom_core::mesh::LineVertex;
use showroom_core::{FrameDescription, MeshData, MeshHandle, Surface};
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Surface that keeps every upload and frame in memory.
#[derive(Default)]
pub struct RecordingSurface {
    next: u32,
    pub live: BTreeMap<u32, MeshData>,
    pub lines: BTreeMap<u32, usize>,
    pub released: Vec<MeshHandle>,
    pub frames: Vec<FrameDescription>,
}

impl RecordingSurface {
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.live.get(&handle.0)
    }

    pub fn last_frame(&self) -> Option<&FrameDescription> {
        self.frames.last()
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn upload(&mut self, mesh: &MeshData) -> MeshHandle {
        self.next += 1;
        self.live.insert(self.next, mesh.clone());
        MeshHandle(self.next)
    }

    fn upload_lines(&mut self, lines: &[LineVertex]) -> MeshHandle {
        self.next += 1;
        self.lines.insert(self.next, lines.len());
        MeshHandle(self.next)
    }

    fn release(&mut self, handle: MeshHandle) {
        self.live.remove(&handle.0);
        self.released.push(handle);
    }

    fn draw(&mut self, frame: &FrameDescription) -> Result<(), Self::Error> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Single-triangle binary glTF whose node is lifted one unit up.
pub fn triangle_glb() -> Vec<u8> {
    let json = r#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[0]}],"nodes":[{"mesh":0,"translation":[0.0,1.0,0.0]}],"meshes":[{"primitives":[{"attributes":{"POSITION":0}}]}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0.0,0.0,0.0],"max":[1.0,1.0,0.0]}],"bufferViews":[{"buffer":0,"byteLength":36}],"buffers":[{"byteLength":36}]}"#;
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = Vec::with_capacity(36);
    for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}
