pub mod displacement;
pub mod intensity;

pub use displacement::{render_tiles, TileGridParams, TileParamsUpdate};
pub use intensity::HoverIntensity;

/// Explicit per-frame context: the host supplies the frame counter and
/// the pointer position (canvas pixel coordinates, top-left origin), so
/// rendering has no hidden globals and tests can drive synthetic frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub frame_count: u64,
    pub pointer_x: f32,
    pub pointer_y: f32,
}
