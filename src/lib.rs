// src/lib.rs
//
// kinetype: a kinetic typography effect. A word is rendered to an
// off-screen buffer, then redrawn every frame as a grid of tiles whose
// source sampling positions ride a time-varying waveform; hovering the
// text drives the displacement intensity up, leaving lets it relax.

pub mod config;
pub mod effects;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

pub use effects::{FrameInput, HoverIntensity, TileGridParams, TileParamsUpdate};
pub use error::EffectError;
pub use models::WordList;
pub use views::{EffectConfig, EffectSnapshot, KineticText, PixelCanvas};
