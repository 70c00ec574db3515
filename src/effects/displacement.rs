// src/effects/displacement.rs
//
// The per-frame tile pass. The canvas is partitioned into a fixed grid;
// every tile is copied from the text buffer at a source position offset
// by a sinusoid of the frame counter and the tile coordinates, scaled by
// the eased hover intensity. Only the source moves; the destination is
// always the tile's true grid position. A deterministic subset of
// displaced tiles gets a subtle multiplicative color shimmer on top.
//
// Each tile row owns a disjoint horizontal band of the destination
// raster, so rows are processed in parallel.

use std::f32::consts::PI;

use image::RgbaImage;
use rayon::prelude::*;

use crate::effects::intensity::HoverIntensity;
use crate::error::EffectError;
use crate::views::canvas::{blit_span, multiply_span, PixelCanvas};

const BYTES_PER_PIXEL: usize = 4;

/// Peak tint alpha at full intensity (0..=255 scale).
const TINT_ALPHA: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGridParams {
    pub tiles_x: u32,
    pub tiles_y: u32,
    /// Multiplier on the frame counter inside the wave phase.
    pub speed: f32,
    /// Per-axis phase coefficients; exactly 0.0 disables that axis.
    pub dispersion_x: f32,
    pub dispersion_y: f32,
    /// Displacement amplitude in pixels.
    pub factor: f32,
}

impl Default for TileGridParams {
    fn default() -> Self {
        Self {
            tiles_x: 16,
            tiles_y: 16,
            speed: 0.005,
            dispersion_x: 0.05,
            dispersion_y: 0.0,
            factor: 100.0,
        }
    }
}

impl TileGridParams {
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.tiles_x == 0 || self.tiles_y == 0 {
            return Err(EffectError::Config(format!(
                "tile counts must be at least 1 (got {}x{})",
                self.tiles_x, self.tiles_y
            )));
        }
        for (name, value) in [
            ("speed", self.speed),
            ("dispersion_x", self.dispersion_x),
            ("dispersion_y", self.dispersion_y),
            ("factor", self.factor),
        ] {
            if !value.is_finite() {
                return Err(EffectError::Config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

/// Partial parameter update; unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileParamsUpdate {
    pub tiles_x: Option<u32>,
    pub tiles_y: Option<u32>,
    pub speed: Option<f32>,
    pub dispersion_x: Option<f32>,
    pub dispersion_y: Option<f32>,
    pub factor: Option<f32>,
}

impl TileParamsUpdate {
    pub fn apply_to(&self, base: &TileGridParams) -> TileGridParams {
        TileGridParams {
            tiles_x: self.tiles_x.unwrap_or(base.tiles_x),
            tiles_y: self.tiles_y.unwrap_or(base.tiles_y),
            speed: self.speed.unwrap_or(base.speed),
            dispersion_x: self.dispersion_x.unwrap_or(base.dispersion_x),
            dispersion_y: self.dispersion_y.unwrap_or(base.dispersion_y),
            factor: self.factor.unwrap_or(base.factor),
        }
    }
}

/// Integer pixel offsets for the source rect of tile (x, y).
///
/// An axis whose dispersion is exactly 0 is forced to 0 whatever the
/// sinusoid evaluates to; this also absorbs floating-point noise in the
/// phase product.
pub(crate) fn wave_offsets(
    frame: u64,
    x: u32,
    y: u32,
    params: &TileGridParams,
    intensity: f32,
) -> (i32, i32) {
    let phase = frame as f32 * params.speed;
    let xy = (x * y) as f32;

    let raw_x = (phase + xy * params.dispersion_x).sin() * params.factor;
    let raw_y = (phase + xy * params.dispersion_y).sin() * params.factor;

    let mut wave_x = (raw_x * intensity).floor() as i32;
    let mut wave_y = (raw_y * intensity).floor() as i32;

    if params.dispersion_x == 0.0 {
        wave_x = 0;
    }
    if params.dispersion_y == 0.0 {
        wave_y = 0;
    }
    (wave_x, wave_y)
}

/// Fixed pseudo-random-looking subset of tiles that take the shimmer.
pub(crate) fn tint_selected(x: u32, y: u32) -> bool {
    (x + y * 3) % 7 == 0 || (x * 2 + y) % 11 == 0
}

/// Slowly cycling near-white tint; channels clamp to the byte range.
pub(crate) fn tint_color(frame: u64, x: u32, y: u32) -> (u8, u8, u8) {
    let t = frame as f32 * 0.01;
    let r = 255.0 + (t + x as f32 * 0.5).sin() * 40.0;
    let g = 255.0 + (t + y as f32 * 0.5 + PI / 2.0).sin() * 40.0;
    let b = 255.0 + (t + (x + y) as f32 * 0.3 + PI).sin() * 40.0;

    (
        r.clamp(0.0, 255.0) as u8,
        g.clamp(0.0, 255.0) as u8,
        b.clamp(0.0, 255.0) as u8,
    )
}

/// Render one frame of the tile pass onto `canvas`.
///
/// Tile dimensions truncate: a canvas not evenly divisible by the tile
/// counts leaves its remainder rows/columns untouched rather than
/// stretching edge tiles to cover them.
pub fn render_tiles(
    canvas: &mut PixelCanvas,
    source: &RgbaImage,
    params: &TileGridParams,
    state: &HoverIntensity,
    frame_count: u64,
) {
    let tile_w = canvas.width() / params.tiles_x;
    let tile_h = canvas.height() / params.tiles_y;
    if tile_w == 0 || tile_h == 0 {
        return; // grid finer than the canvas; nothing to copy
    }

    let stride = canvas.width() as usize * BYTES_PER_PIXEL;
    let band_len = tile_h as usize * stride;
    let covered = band_len * params.tiles_y as usize;
    let span_len = tile_w as usize * BYTES_PER_PIXEL;

    let active = state.is_active();
    let intensity = state.current();

    let buf = &mut canvas.raw_mut()[..covered];
    buf.par_chunks_mut(band_len)
        .enumerate()
        .for_each(|(tile_y, band)| {
            let ty = tile_y as u32;
            for tx in 0..params.tiles_x {
                let (wave_x, wave_y) = if active {
                    wave_offsets(frame_count, tx, ty, params, intensity)
                } else {
                    (0, 0)
                };

                let sx = (tx * tile_w) as i64 + wave_x as i64;
                let sy = (ty * tile_h) as i64 + wave_y as i64;
                let dest_col = (tx * tile_w) as usize * BYTES_PER_PIXEL;

                for row in 0..tile_h as usize {
                    let start = row * stride + dest_col;
                    blit_span(
                        &mut band[start..start + span_len],
                        source,
                        sx,
                        sy + row as i64,
                        tile_w,
                    );
                }

                // Shimmer only on displaced tiles from the fixed subset.
                if active && (wave_x != 0 || wave_y != 0) && tint_selected(tx, ty) {
                    let (r, g, b) = tint_color(frame_count, tx, ty);
                    let alpha = TINT_ALPHA * intensity;
                    for row in 0..tile_h as usize {
                        let start = row * stride + dest_col;
                        multiply_span(&mut band[start..start + span_len], r, g, b, alpha);
                    }
                }
            }
        });
}
