pub mod canvas;
pub mod config;
pub mod font;
pub mod generator;
pub mod glyph_data;
