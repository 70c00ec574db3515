// src/views/canvas.rs
//
// The visible canvas: a plain RGBA8 raster plus the two primitives the
// tile pass is built from, a region blit and a multiplicative tint.
//
// Out-of-bounds policy: source reads outside the buffer produce
// transparent black, written to the destination with replace semantics.
// The result of a frame therefore never depends on the previous frame.

use image::{Rgba, RgbaImage};

const BYTES_PER_PIXEL: usize = 4;

pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut *self.image
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Copy a `w`×`h` region from `src` at (`sx`, `sy`) onto this canvas
    /// at (`dx`, `dy`). Source coordinates may be negative or past the
    /// source edge; such reads come back transparent. Destination rows and
    /// columns past the canvas edge are clipped.
    pub fn copy_region(&mut self, src: &RgbaImage, sx: i64, sy: i64, w: u32, h: u32, dx: u32, dy: u32) {
        let canvas_w = self.width() as usize;
        let canvas_h = self.height();
        let stride = canvas_w * BYTES_PER_PIXEL;

        if dx >= self.width() || dy >= canvas_h {
            return;
        }
        let w = w.min(self.width() - dx);
        let rows = h.min(canvas_h - dy);

        let buf = self.raw_mut();
        for row in 0..rows {
            let dest_start = (dy + row) as usize * stride + dx as usize * BYTES_PER_PIXEL;
            let dest = &mut buf[dest_start..dest_start + w as usize * BYTES_PER_PIXEL];
            blit_span(dest, src, sx, sy + row as i64, w);
        }
    }

    /// Fill a rect with a multiplicative tint at the given alpha (0..=255).
    /// The rect is clipped to the canvas.
    pub fn tint_rect(&mut self, dx: u32, dy: u32, w: u32, h: u32, r: u8, g: u8, b: u8, alpha: f32) {
        let canvas_w = self.width() as usize;
        let canvas_h = self.height();
        let stride = canvas_w * BYTES_PER_PIXEL;

        if dx >= self.width() || dy >= canvas_h {
            return;
        }
        let w = w.min(self.width() - dx);
        let rows = h.min(canvas_h - dy);

        let buf = self.raw_mut();
        for row in 0..rows {
            let dest_start = (dy + row) as usize * stride + dx as usize * BYTES_PER_PIXEL;
            let dest = &mut buf[dest_start..dest_start + w as usize * BYTES_PER_PIXEL];
            multiply_span(dest, r, g, b, alpha);
        }
    }
}

/// Write `len` pixels into `dst` (exactly `len * 4` bytes) from the source
/// row `sy` starting at column `sx`. Out-of-range reads yield transparent
/// black.
pub(crate) fn blit_span(dst: &mut [u8], src: &RgbaImage, sx: i64, sy: i64, len: u32) {
    debug_assert_eq!(dst.len(), len as usize * BYTES_PER_PIXEL);

    let src_w = src.width() as i64;
    let src_h = src.height() as i64;

    if sy < 0 || sy >= src_h {
        dst.fill(0);
        return;
    }

    let row_base = sy as usize * src_w as usize * BYTES_PER_PIXEL;
    let src_raw = src.as_raw();

    // Fast path: the whole span lies inside the source row.
    if sx >= 0 && sx + len as i64 <= src_w {
        let start = row_base + sx as usize * BYTES_PER_PIXEL;
        dst.copy_from_slice(&src_raw[start..start + len as usize * BYTES_PER_PIXEL]);
        return;
    }

    for i in 0..len as i64 {
        let x = sx + i;
        let out = i as usize * BYTES_PER_PIXEL;
        if x >= 0 && x < src_w {
            let start = row_base + x as usize * BYTES_PER_PIXEL;
            dst[out..out + BYTES_PER_PIXEL]
                .copy_from_slice(&src_raw[start..start + BYTES_PER_PIXEL]);
        } else {
            dst[out..out + BYTES_PER_PIXEL].fill(0);
        }
    }
}

/// Multiplicative tint over a span of pixels: each channel moves from its
/// current value toward `dst * tint / 255` by `alpha / 255`. The
/// destination alpha channel is untouched.
pub(crate) fn multiply_span(dst: &mut [u8], r: u8, g: u8, b: u8, alpha: f32) {
    let t = (alpha / 255.0).clamp(0.0, 1.0);
    if t <= 0.0 {
        return;
    }
    let tint = [r as f32, g as f32, b as f32];

    for pixel in dst.chunks_exact_mut(BYTES_PER_PIXEL) {
        for c in 0..3 {
            let d = pixel[c] as f32;
            let multiplied = d * tint[c] / 255.0;
            pixel[c] = (d + (multiplied - d) * t).round() as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_source(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn copy_region_in_bounds_is_exact() {
        let src = gradient_source(8, 8);
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.copy_region(&src, 2, 3, 4, 4, 0, 0);

        assert_eq!(canvas.image().get_pixel(0, 0), &Rgba([2, 3, 7, 255]));
        assert_eq!(canvas.image().get_pixel(3, 3), &Rgba([5, 6, 7, 255]));
    }

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let src = gradient_source(4, 4);
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.clear(Rgba([9, 9, 9, 255]));

        // Source rect pushed two pixels off the left and top edges.
        canvas.copy_region(&src, -2, -2, 4, 4, 0, 0);

        assert_eq!(canvas.image().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.image().get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
        // (2,2) reads source (0,0)
        assert_eq!(canvas.image().get_pixel(2, 2), &Rgba([0, 0, 7, 255]));
    }

    #[test]
    fn fully_off_source_row_blanks_the_span() {
        let src = gradient_source(4, 4);
        let mut dst = [0xAAu8; 16];
        blit_span(&mut dst, &src, 0, 10, 4);
        assert!(dst.iter().all(|&b| b == 0));
    }

    #[test]
    fn destination_clipping_at_canvas_edge() {
        let src = gradient_source(8, 8);
        let mut canvas = PixelCanvas::new(4, 4);
        // Destination starts at (3,3); only one pixel fits.
        canvas.copy_region(&src, 0, 0, 4, 4, 3, 3);
        assert_eq!(canvas.image().get_pixel(3, 3), &Rgba([0, 0, 7, 255]));
        assert_eq!(canvas.image().get_pixel(2, 3), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn multiply_at_full_alpha_is_plain_multiply() {
        let mut span = [200, 100, 50, 255];
        multiply_span(&mut span, 255, 127, 0, 255.0);
        assert_eq!(span[0], 200); // × 255/255
        assert_eq!(span[1], 50); // × 127/255, rounded
        assert_eq!(span[2], 0); // × 0
        assert_eq!(span[3], 255); // alpha untouched
    }

    #[test]
    fn multiply_at_zero_alpha_is_identity() {
        let mut span = [200, 100, 50, 255];
        multiply_span(&mut span, 0, 0, 0, 0.0);
        assert_eq!(span, [200, 100, 50, 255]);
    }

    #[test]
    fn multiply_at_half_alpha_blends_halfway() {
        let mut span = [200, 0, 0, 255];
        multiply_span(&mut span, 0, 0, 0, 127.5);
        // halfway between 200 and 0
        assert_eq!(span[0], 100);
    }

    #[test]
    fn copy_region_fully_off_canvas_is_a_no_op() {
        let src = gradient_source(8, 8);
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.clear(Rgba([9, 9, 9, 255]));

        canvas.copy_region(&src, 0, 0, 4, 4, 10, 0);
        canvas.copy_region(&src, 0, 0, 4, 4, 0, 10);

        assert!(canvas.image().pixels().all(|p| *p == Rgba([9, 9, 9, 255])));
    }

    #[test]
    fn tint_rect_fully_off_canvas_is_a_no_op() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.clear(Rgba([100, 100, 100, 255]));

        canvas.tint_rect(10, 0, 4, 4, 0, 0, 0, 255.0);
        canvas.tint_rect(0, 10, 4, 4, 0, 0, 0, 255.0);

        assert!(canvas
            .image()
            .pixels()
            .all(|p| *p == Rgba([100, 100, 100, 255])));
    }

    #[test]
    fn tint_rect_clips_to_canvas() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.clear(Rgba([100, 100, 100, 255]));
        canvas.tint_rect(2, 2, 10, 10, 0, 0, 0, 255.0);
        assert_eq!(canvas.image().get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.image().get_pixel(1, 1), &Rgba([100, 100, 100, 255]));
    }
}
