// Host-side tuning for the web frontend

// DOM ids
pub const CANVAS_ID: &str = "showroom-canvas";
pub const LOADING_ID: &str = "model-loading";
pub const CLOSE_BUTTON_ID: &str = "viewer-close";
pub const RESET_BUTTON_ID: &str = "viewer-reset";

// Rendering
pub const MSAA_SAMPLES: u32 = 4;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

// Frame delta clamp (seconds), avoids jumps after a hidden tab resumes
pub const MAX_FRAME_DT: f32 = 0.1;
