pub mod geometry;
pub mod glyphs;
pub mod render;
