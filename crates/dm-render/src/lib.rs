pub mod glyph;
pub mod hit;

pub use glyph::{DeskGlyph, GlyphPalette, coordinate_readout};
pub use hit::{hit_delete_button, hit_test};
