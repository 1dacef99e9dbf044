use super::helpers;
use crate::constants::{DEPTH_FORMAT, MSAA_SAMPLES};

/// Multisampled color and depth attachments sized to the canvas.
///
/// The color target resolves into the swapchain texture each frame.
pub(crate) struct RenderTargets {
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let (msaa_tex, msaa_view) =
            helpers::create_attachment(device, "msaa_color", width, height, color_format, MSAA_SAMPLES);
        let (depth_tex, depth_view) =
            helpers::create_attachment(device, "depth", width, height, DEPTH_FORMAT, MSAA_SAMPLES);
        Self {
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
    ) {
        self.msaa_tex.destroy();
        self.depth_tex.destroy();
        *self = Self::new(device, width, height, color_format);
    }
}
