// src/views/kinetic_text.rs
//
// KineticText is the effect instance: it owns the text buffer, the tile
// parameters, the word list, the font registry and the hover-eased
// animation state, and exposes the validated mutator surface the host
// drives. One render call produces one frame.

use std::path::{Path, PathBuf};

use image::Rgba;
use rusttype::Font;

use crate::config::Config;
use crate::effects::{render_tiles, FrameInput, HoverIntensity, TileGridParams, TileParamsUpdate};
use crate::error::EffectError;
use crate::models::WordList;
use crate::services::{image_exporter, FontBook};
use crate::views::canvas::PixelCanvas;
use crate::views::text_buffer::{HAlign, TextBuffer, TextStyle, VAlign};

/// Full initial configuration of one effect instance.
#[derive(Debug, Clone)]
pub struct EffectConfig {
    pub width: u32,
    pub height: u32,
    pub style: TextStyle,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            style: default_style(),
        }
    }
}

fn default_style() -> TextStyle {
    TextStyle {
        text: "kinetic".to_string(),
        size: 400.0,
        align_h: HAlign::Center,
        align_v: VAlign::Center,
        background: Rgba([0, 0, 0, 255]),
        color: Rgba([255, 255, 255, 255]),
    }
}

/// Batch text-style update; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct TextStyleUpdate {
    pub text: Option<String>,
    pub size: Option<f32>,
    pub family: Option<String>,
    pub align_h: Option<HAlign>,
    pub align_v: Option<VAlign>,
    pub background: Option<Rgba<u8>>,
    pub color: Option<Rgba<u8>>,
}

/// Read-only view of the complete instance state.
#[derive(Debug, Clone)]
pub struct EffectSnapshot {
    pub width: u32,
    pub height: u32,
    pub text: String,
    pub text_size: f32,
    pub font_family: String,
    pub align_h: HAlign,
    pub align_v: VAlign,
    pub background: Rgba<u8>,
    pub color: Rgba<u8>,
    pub words: Vec<String>,
    pub word_index: usize,
    pub params: TileGridParams,
    pub font_resolved: bool,
    pub font_load_pending: bool,
}

pub struct KineticText {
    width: u32,
    height: u32,
    style: TextStyle,
    params: TileGridParams,
    animation: HoverIntensity,
    buffer: TextBuffer,
    words: WordList,
    fonts: FontBook,
}

impl KineticText {
    pub fn new(config: EffectConfig, fonts: FontBook) -> Result<Self, EffectError> {
        validate_dimensions(config.width, config.height)?;
        validate_text_size(config.style.size)?;

        let mut effect = Self {
            width: config.width,
            height: config.height,
            buffer: TextBuffer::new(config.width, config.height),
            style: config.style,
            params: TileGridParams::default(),
            animation: HoverIntensity::new(),
            words: WordList::default(),
            fonts,
        };
        effect.repaint();
        Ok(effect)
    }

    /// Build an instance from the application config: alignment strings,
    /// tile parameters, the named font table and the optional word-list
    /// file all come from config.toml.
    pub fn from_config(config: &Config) -> Result<Self, EffectError> {
        let align_h = HAlign::parse(&config.text.align_h).ok_or_else(|| {
            EffectError::Config(format!("unknown align_h '{}'", config.text.align_h))
        })?;
        let align_v = VAlign::parse(&config.text.align_v).ok_or_else(|| {
            EffectError::Config(format!("unknown align_v '{}'", config.text.align_v))
        })?;

        let named = config
            .fonts
            .iter()
            .map(|(name, path)| (name.clone(), config.resolve_font_path(path)))
            .collect();
        let fonts = FontBook::new(&config.text.family, named);

        let effect_config = EffectConfig {
            width: config.canvas.width,
            height: config.canvas.height,
            style: TextStyle {
                text: config.text.content.clone(),
                size: config.text.size,
                align_h,
                align_v,
                background: Rgba(config.text.background),
                color: Rgba(config.text.color),
            },
        };

        let mut effect = Self::new(effect_config, fonts)?;
        effect.set_tile_params(TileGridParams {
            tiles_x: config.effect.tiles_x,
            tiles_y: config.effect.tiles_y,
            speed: config.effect.speed,
            dispersion_x: config.effect.dispersion_x,
            dispersion_y: config.effect.dispersion_y,
            factor: config.effect.factor,
        })?;

        if let Some(path) = config.resolve_word_list_path() {
            match WordList::load(&path) {
                Ok(list) => {
                    println!("Word list loaded: {}", path.display());
                    effect.words = list;
                    effect.apply_text(effect.words.current().to_string());
                }
                Err(e) => eprintln!("Warning: {e}; keeping stock word list"),
            }
        }

        if let Some(font_path) = &config.text.font_path {
            effect.load_external_font(config.resolve_font_path(font_path));
        }

        Ok(effect)
    }

    // ---- per-frame ----

    /// Render one frame: resolve any finished font load, advance the
    /// hover easing, run the tile pass. Never fails; all state was
    /// validated at the setter boundary.
    pub fn render(&mut self, canvas: &mut PixelCanvas, input: &FrameInput) {
        if self.fonts.poll() {
            self.repaint();
        }

        self.animation.update(
            input.pointer_x,
            input.pointer_y,
            self.style.size,
            self.width,
            self.height,
        );

        render_tiles(
            canvas,
            self.buffer.image(),
            &self.params,
            &self.animation,
            input.frame_count,
        );
    }

    // ---- configuration ----

    pub fn configure(&mut self, config: EffectConfig) -> Result<(), EffectError> {
        validate_dimensions(config.width, config.height)?;
        validate_text_size(config.style.size)?;

        self.width = config.width;
        self.height = config.height;
        self.style = config.style;
        self.buffer.resize(config.width, config.height);
        self.repaint();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EffectError> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.buffer.resize(width, height);
        self.repaint();
        Ok(())
    }

    pub fn set_tile_params(&mut self, params: TileGridParams) -> Result<(), EffectError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Merge a partial update over the current parameters. The merged
    /// whole is validated; a rejected update changes nothing.
    pub fn update_tile_params(&mut self, update: TileParamsUpdate) -> Result<(), EffectError> {
        let merged = update.apply_to(&self.params);
        merged.validate()?;
        self.params = merged;
        Ok(())
    }

    pub fn tile_params(&self) -> &TileGridParams {
        &self.params
    }

    pub fn set_text(&mut self, text: &str) {
        self.apply_text(text.to_string());
    }

    pub fn set_text_size(&mut self, size: f32) -> Result<(), EffectError> {
        validate_text_size(size)?;
        self.style.size = size;
        self.repaint();
        Ok(())
    }

    pub fn set_alignment(&mut self, align_h: HAlign, align_v: VAlign) {
        self.style.align_h = align_h;
        self.style.align_v = align_v;
        self.repaint();
    }

    pub fn set_colors(&mut self, background: Rgba<u8>, color: Rgba<u8>) {
        self.style.background = background;
        self.style.color = color;
        self.repaint();
    }

    /// Apply several text properties at once with a single repaint.
    pub fn set_text_style(&mut self, update: TextStyleUpdate) -> Result<(), EffectError> {
        if let Some(size) = update.size {
            validate_text_size(size)?;
        }
        if let Some(family) = &update.family {
            self.fonts.set_family(family);
        }
        if let Some(text) = update.text {
            self.style.text = text;
        }
        if let Some(size) = update.size {
            self.style.size = size;
        }
        if let Some(align_h) = update.align_h {
            self.style.align_h = align_h;
        }
        if let Some(align_v) = update.align_v {
            self.style.align_v = align_v;
        }
        if let Some(background) = update.background {
            self.style.background = background;
        }
        if let Some(color) = update.color {
            self.style.color = color;
        }
        self.repaint();
        Ok(())
    }

    /// Restore the stock configuration. Canvas dimensions and the font
    /// registry survive; the external font handle does not.
    pub fn reset(&mut self) {
        self.style = default_style();
        self.params = TileGridParams::default();
        self.words = WordList::default();
        self.animation.reset();
        self.fonts.clear_external();
        self.repaint();
        println!("Effect reset to defaults");
    }

    // ---- fonts ----

    pub fn set_font(&mut self, font: Font<'static>) {
        self.fonts.set_external(font);
        self.repaint();
    }

    pub fn set_font_family(&mut self, name: &str) -> bool {
        let changed = self.fonts.set_family(name);
        if changed {
            self.repaint();
        }
        changed
    }

    pub fn load_external_font<P: AsRef<Path>>(&mut self, path: P) {
        self.fonts.load_external(path);
    }

    pub fn available_fonts(&self) -> Vec<&str> {
        self.fonts.available()
    }

    // ---- word list ----

    pub fn set_word_list(&mut self, words: Vec<String>) -> Result<(), EffectError> {
        self.words.replace(words)?;
        self.apply_text(self.words.current().to_string());
        println!("Word list updated: {:?}", self.words.words());
        Ok(())
    }

    pub fn next_word(&mut self) -> String {
        let word = self.words.next().to_string();
        self.apply_text(word.clone());
        word
    }

    pub fn previous_word(&mut self) -> String {
        let word = self.words.previous().to_string();
        self.apply_text(word.clone());
        word
    }

    pub fn current_word(&self) -> &str {
        &self.style.text
    }

    pub fn word_list(&self) -> &[String] {
        self.words.words()
    }

    // ---- introspection ----

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn intensity(&self) -> f32 {
        self.animation.current()
    }

    pub fn is_hovering(&self) -> bool {
        self.animation.is_hovering()
    }

    pub fn is_animation_active(&self) -> bool {
        self.animation.is_active()
    }

    pub fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            width: self.width,
            height: self.height,
            text: self.style.text.clone(),
            text_size: self.style.size,
            font_family: self.fonts.family().to_string(),
            align_h: self.style.align_h,
            align_v: self.style.align_v,
            background: self.style.background,
            color: self.style.color,
            words: self.words.words().to_vec(),
            word_index: self.words.index(),
            params: self.params,
            font_resolved: self.fonts.current().is_some(),
            font_load_pending: self.fonts.has_pending(),
        }
    }

    // ---- export ----

    pub fn save_image(
        &self,
        canvas: &PixelCanvas,
        output_dir: &Path,
        filename: Option<&str>,
    ) -> Result<PathBuf, EffectError> {
        image_exporter::save_png(canvas.image(), output_dir, filename)
    }

    // ---- internals ----

    fn apply_text(&mut self, text: String) {
        self.style.text = text;
        self.repaint();
    }

    fn repaint(&mut self) {
        self.buffer.repaint(&self.style, self.fonts.current());
    }
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), EffectError> {
    if width == 0 || height == 0 {
        return Err(EffectError::Config(format!(
            "canvas dimensions must be positive (got {width}x{height})"
        )));
    }
    Ok(())
}

fn validate_text_size(size: f32) -> Result<(), EffectError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(EffectError::Config(format!(
            "text size must be positive and finite (got {size})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn effect() -> KineticText {
        KineticText::new(EffectConfig::default(), FontBook::new("", HashMap::new())).unwrap()
    }

    fn hover_input(frame: u64) -> FrameInput {
        FrameInput {
            frame_count: frame,
            pointer_x: 200.0,
            pointer_y: 200.0,
        }
    }

    fn away_input(frame: u64) -> FrameInput {
        FrameInput {
            frame_count: frame,
            pointer_x: -50.0,
            pointer_y: -50.0,
        }
    }

    #[test]
    fn rejected_tile_params_keep_prior_values() {
        let mut effect = effect();
        let before = *effect.tile_params();

        let bad = TileGridParams {
            tiles_x: 0,
            ..before
        };
        assert!(effect.set_tile_params(bad).is_err());
        assert_eq!(*effect.tile_params(), before);

        let bad_update = TileParamsUpdate {
            tiles_y: Some(0),
            ..Default::default()
        };
        assert!(effect.update_tile_params(bad_update).is_err());
        assert_eq!(*effect.tile_params(), before);
    }

    #[test]
    fn rejected_text_size_keeps_prior_value() {
        let mut effect = effect();
        assert!(effect.set_text_size(0.0).is_err());
        assert!(effect.set_text_size(f32::NAN).is_err());
        assert_eq!(effect.snapshot().text_size, 400.0);

        assert!(effect.set_text_size(120.0).is_ok());
        assert_eq!(effect.snapshot().text_size, 120.0);
    }

    #[test]
    fn zero_dimension_configs_are_rejected() {
        let mut effect = effect();
        assert!(effect.resize(0, 100).is_err());
        assert_eq!(effect.width(), 400);

        let bad = EffectConfig {
            width: 100,
            height: 0,
            ..Default::default()
        };
        assert!(effect.configure(bad).is_err());
    }

    #[test]
    fn word_cycle_updates_current_text() {
        let mut effect = effect();
        assert_eq!(effect.current_word(), "kinetic");
        assert_eq!(effect.next_word(), "typography");
        assert_eq!(effect.current_word(), "typography");
        assert_eq!(effect.previous_word(), "kinetic");
        assert_eq!(effect.previous_word(), "dynamic");
    }

    #[test]
    fn empty_word_list_is_rejected_and_state_preserved() {
        let mut effect = effect();
        effect.next_word();
        let snapshot = effect.snapshot();

        assert!(effect.set_word_list(Vec::new()).is_err());
        let after = effect.snapshot();
        assert_eq!(after.words, snapshot.words);
        assert_eq!(after.word_index, snapshot.word_index);
        assert_eq!(after.text, snapshot.text);
    }

    #[test]
    fn new_word_list_resets_text_to_first_word() {
        let mut effect = effect();
        effect
            .set_word_list(vec!["alpha".into(), "beta".into()])
            .unwrap();
        assert_eq!(effect.current_word(), "alpha");
        assert_eq!(effect.snapshot().word_index, 0);
    }

    #[test]
    fn render_without_font_fills_background_and_runs() {
        let mut effect = effect();
        let mut canvas = PixelCanvas::new(400, 400);
        effect.render(&mut canvas, &away_input(0));
        // No font resolvable: buffer is pure background, so is the canvas.
        assert!(canvas
            .image()
            .pixels()
            .all(|p| *p == image::Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn hover_raises_intensity_and_leaving_decays_it() {
        let mut effect = effect();
        let mut canvas = PixelCanvas::new(400, 400);

        for frame in 0..100 {
            effect.render(&mut canvas, &hover_input(frame));
        }
        assert!(effect.is_hovering());
        assert!(effect.is_animation_active());
        let peak = effect.intensity();
        assert!(peak > 0.99);

        effect.render(&mut canvas, &away_input(100));
        assert!(!effect.is_hovering());
        let after = effect.intensity();
        assert!((after - peak * 0.9).abs() < 1e-5);
    }

    #[test]
    fn resize_reshapes_the_buffer() {
        let mut effect = effect();
        effect.resize(128, 64).unwrap();
        assert_eq!(effect.width(), 128);
        assert_eq!(effect.height(), 64);

        let mut canvas = PixelCanvas::new(128, 64);
        effect.render(&mut canvas, &away_input(0));
    }

    #[test]
    fn reset_restores_stock_state() {
        let mut effect = effect();
        effect.set_text("something");
        effect.set_text_size(42.0).unwrap();
        effect
            .set_tile_params(TileGridParams {
                tiles_x: 4,
                ..Default::default()
            })
            .unwrap();
        effect.next_word();

        effect.reset();
        let snapshot = effect.snapshot();
        assert_eq!(snapshot.text, "kinetic");
        assert_eq!(snapshot.text_size, 400.0);
        assert_eq!(snapshot.params, TileGridParams::default());
        assert_eq!(snapshot.word_index, 0);
        assert_eq!(snapshot.words.len(), 5);
    }

    #[test]
    fn batch_style_update_applies_all_fields() {
        let mut effect = effect();
        effect
            .set_text_style(TextStyleUpdate {
                text: Some("warp".into()),
                size: Some(80.0),
                align_h: Some(HAlign::Left),
                background: Some(Rgba([5, 5, 5, 255])),
                ..Default::default()
            })
            .unwrap();

        let snapshot = effect.snapshot();
        assert_eq!(snapshot.text, "warp");
        assert_eq!(snapshot.text_size, 80.0);
        assert_eq!(snapshot.align_h, HAlign::Left);
        assert_eq!(snapshot.background, Rgba([5, 5, 5, 255]));
        // untouched fields keep their values
        assert_eq!(snapshot.align_v, VAlign::Center);
    }

    #[test]
    fn batch_style_update_rejects_bad_size_atomically() {
        let mut effect = effect();
        let result = effect.set_text_style(TextStyleUpdate {
            text: Some("ignored".into()),
            size: Some(-1.0),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(effect.snapshot().text, "kinetic");
    }

    #[test]
    fn snapshot_reflects_configuration() {
        let effect = effect();
        let snapshot = effect.snapshot();
        assert_eq!(snapshot.width, 400);
        assert_eq!(snapshot.height, 400);
        assert_eq!(snapshot.text, "kinetic");
        assert_eq!(snapshot.params.tiles_x, 16);
        assert!(!snapshot.font_resolved);
        assert!(!snapshot.font_load_pending);
    }
}
