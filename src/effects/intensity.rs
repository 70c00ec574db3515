// src/effects/intensity.rs
//
// Hover-driven intensity easing. Two logical states, RESTING (target 0)
// and ACTIVE (target 1), selected purely from the hover flag each frame;
// the easing itself is the only smoothing between them.

/// Exponential smoothing rate toward the target, applied every frame.
pub const EASE_RATE: f32 = 0.1;

/// Intensity above this counts as an active animation.
pub const ACTIVE_THRESHOLD: f32 = 0.01;

/// The hover box side is this fraction of the text size.
const HOVER_BOX_SCALE: f32 = 0.8;

#[derive(Debug, Clone, Default)]
pub struct HoverIntensity {
    is_hovering: bool,
    target: f32,
    pub(crate) current: f32,
    active: bool,
}

impl HoverIntensity {
    pub fn new() -> Self {
        Self::default()
    }

    /// One per-frame step: recompute hover from the pointer, retarget,
    /// ease, refresh the active flag.
    pub fn update(
        &mut self,
        pointer_x: f32,
        pointer_y: f32,
        text_size: f32,
        canvas_w: u32,
        canvas_h: u32,
    ) {
        self.is_hovering = hover_hit(pointer_x, pointer_y, text_size, canvas_w, canvas_h);
        self.target = if self.is_hovering { 1.0 } else { 0.0 };
        self.current =
            (self.current + (self.target - self.current) * EASE_RATE).clamp(0.0, 1.0);
        self.active = self.current > ACTIVE_THRESHOLD;
    }

    pub fn is_hovering(&self) -> bool {
        self.is_hovering
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Approximate hit test: a square box centered on the canvas with side
/// 0.8 × text size. Strictly inside on both axes counts as a hover; this
/// is a deliberate approximation, not per-glyph testing.
pub(crate) fn hover_hit(
    pointer_x: f32,
    pointer_y: f32,
    text_size: f32,
    canvas_w: u32,
    canvas_h: u32,
) -> bool {
    let side = text_size * HOVER_BOX_SCALE;
    let x0 = canvas_w as f32 / 2.0 - side / 2.0;
    let y0 = canvas_h as f32 / 2.0 - side / 2.0;

    pointer_x > x0 && pointer_x < x0 + side && pointer_y > y0 && pointer_y < y0 + side
}
