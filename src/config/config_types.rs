// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

/// Initial text style. Colors are RGBA arrays so grayscale and colored
/// setups share one form.
#[derive(Debug, Deserialize)]
pub struct TextConfig {
    pub content: String,
    pub size: f32,
    pub family: String,
    pub align_h: String,
    pub align_v: String,
    pub background: [u8; 4],
    pub color: [u8; 4],
    pub font_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EffectParamsConfig {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub speed: f32,
    pub dispersion_x: f32,
    pub dispersion_y: f32,
    pub factor: f32,
}

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    pub output_directory: String,
    pub word_list_file: Option<String>,
}

/// Named font families: key is what `set_family` accepts, value is a
/// font file path.
pub type FontTable = HashMap<String, String>;
