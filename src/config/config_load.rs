// src/config/config_load.rs
//
// loading config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::config_types::*;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub canvas: CanvasConfig,
    pub text: TextConfig,
    pub effect: EffectParamsConfig,
    pub paths: PathConfig,
    #[serde(default)]
    pub fonts: FontTable,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_working_dir()
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).ok()?;
            toml::from_str(&content).ok()
        } else {
            None
        }
    }

    fn load_from_working_dir() -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string("config.toml")?;
        Ok(toml::from_str(&content)?)
    }

    pub fn resolve_output_dir(&self) -> PathBuf {
        Self::resolve(&self.paths.output_directory)
    }

    pub fn resolve_word_list_path(&self) -> Option<PathBuf> {
        self.paths.word_list_file.as_deref().map(Self::resolve)
    }

    pub fn resolve_font_path(&self, path: &str) -> PathBuf {
        Self::resolve(path)
    }

    // Relative paths are resolved against the executable directory when
    // possible, matching where build.rs places config.toml.
    fn resolve(path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            return PathBuf::from(path);
        }
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        {
            exe_dir.join(path)
        } else {
            PathBuf::from(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            [window]
            width = 400
            height = 400

            [canvas]
            width = 400
            height = 400

            [text]
            content = "kinetic"
            size = 400.0
            family = "arial"
            align_h = "center"
            align_v = "center"
            background = [0, 0, 0, 255]
            color = [255, 255, 255, 255]

            [effect]
            tiles_x = 16
            tiles_y = 16
            speed = 0.005
            dispersion_x = 0.05
            dispersion_y = 0.0
            factor = 100.0

            [paths]
            output_directory = "output"
            word_list_file = "words.json"

            [fonts]
            arial = "/usr/share/fonts/arial.ttf"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.canvas.width, 400);
        assert_eq!(config.text.content, "kinetic");
        assert_eq!(config.effect.tiles_x, 16);
        assert_eq!(config.effect.dispersion_y, 0.0);
        assert_eq!(config.fonts["arial"], "/usr/share/fonts/arial.ttf");
        assert_eq!(config.paths.word_list_file.as_deref(), Some("words.json"));
    }

    #[test]
    fn fonts_table_is_optional() {
        let toml_str = r#"
            [window]
            width = 100
            height = 100

            [canvas]
            width = 100
            height = 100

            [text]
            content = "a"
            size = 50.0
            family = "arial"
            align_h = "left"
            align_v = "top"
            background = [0, 0, 0, 255]
            color = [255, 255, 255, 255]

            [effect]
            tiles_x = 2
            tiles_y = 2
            speed = 0.005
            dispersion_x = 0.0
            dispersion_y = 0.0
            factor = 100.0

            [paths]
            output_directory = "output"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.fonts.is_empty());
        assert!(config.paths.word_list_file.is_none());
    }
}
