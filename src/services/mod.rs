pub mod font_library;
pub mod image_exporter;

pub use font_library::FontBook;
