// src/views/mod.rs

pub mod canvas;
pub mod kinetic_text;
pub mod text_buffer;

pub use canvas::PixelCanvas;
pub use kinetic_text::{EffectConfig, EffectSnapshot, KineticText, TextStyleUpdate};
pub use text_buffer::{HAlign, TextBuffer, TextStyle, VAlign};
