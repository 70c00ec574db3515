// src/views/text_buffer.rs
//
// The off-screen raster holding the current word. Regenerated whenever
// text, style or fonts change; the tile pass only ever reads from it.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use serde::{Deserialize, Serialize};

/// Pixel inset used for the left/right/top/bottom alignment anchors.
const EDGE_INSET: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

impl HAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl VAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Everything the buffer needs to draw one word.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub text: String,
    pub size: f32,
    pub align_h: HAlign,
    pub align_v: VAlign,
    pub background: Rgba<u8>,
    pub color: Rgba<u8>,
}

pub struct TextBuffer {
    image: RgbaImage,
}

impl TextBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Reallocate at new dimensions. The caller repaints afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    /// Clear to the background color and draw the word at its anchor.
    /// Empty text or no resolvable font leaves a background-only buffer;
    /// neither is an error.
    pub fn repaint(&mut self, style: &TextStyle, font: Option<&Font<'static>>) {
        for pixel in self.image.pixels_mut() {
            *pixel = style.background;
        }

        if style.text.is_empty() {
            return;
        }
        let font = match font {
            Some(f) => f,
            None => return,
        };

        let scale = Scale::uniform(style.size);
        let text_w = measure_width(font, &style.text, scale);
        let v = font.v_metrics(scale);
        let text_h = v.ascent - v.descent;

        let (anchor_x, anchor_y) = anchor(style.align_h, style.align_v, self.width(), self.height());
        let (x, y) = glyph_origin(anchor_x, anchor_y, text_w, text_h, style.align_h, style.align_v);

        draw_text_mut(
            &mut self.image,
            style.color,
            x.round() as i32,
            y.round() as i32,
            scale,
            font,
            &style.text,
        );
    }
}

/// Anchor position on the canvas: center of the axis for center
/// alignment, a fixed inset from the edge otherwise.
pub(crate) fn anchor(align_h: HAlign, align_v: VAlign, width: u32, height: u32) -> (f32, f32) {
    let x = match align_h {
        HAlign::Left => EDGE_INSET,
        HAlign::Center => width as f32 / 2.0,
        HAlign::Right => width as f32 - EDGE_INSET,
    };
    let y = match align_v {
        VAlign::Top => EDGE_INSET,
        VAlign::Center => height as f32 / 2.0,
        VAlign::Bottom => height as f32 - EDGE_INSET,
    };
    (x, y)
}

/// Convert the anchor to the top-left corner of the measured glyph box.
pub(crate) fn glyph_origin(
    anchor_x: f32,
    anchor_y: f32,
    text_w: f32,
    text_h: f32,
    align_h: HAlign,
    align_v: VAlign,
) -> (f32, f32) {
    let x = match align_h {
        HAlign::Left => anchor_x,
        HAlign::Center => anchor_x - text_w / 2.0,
        HAlign::Right => anchor_x - text_w,
    };
    let y = match align_v {
        VAlign::Top => anchor_y,
        VAlign::Center => anchor_y - text_h / 2.0,
        VAlign::Bottom => anchor_y - text_h,
    };
    (x, y)
}

fn measure_width(font: &Font, text: &str, scale: Scale) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}
