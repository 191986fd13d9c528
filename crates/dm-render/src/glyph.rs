//! Desk glyph geometry.
//!
//! A desk is drawn as a small monitor: a screen rect with a stand below it.
//! All shapes are in view-box units (`[0,1]²` over the displayed image,
//! y growing downward); renderers scale them through the letterbox.

use dm_core::{GlyphMetrics, NormPos};
use kurbo::{Circle, Point, Rect};

/// Screen takes the top three quarters of the glyph height.
const SCREEN_SHARE: f64 = 0.75;
/// Stand width relative to glyph width.
const STAND_WIDTH_SHARE: f64 = 0.3;

const HOVER_INSET: f64 = 0.002;
const SELECTION_INSET: f64 = 0.003;
const DELETE_RADIUS: f64 = 0.008;
const DELETE_OFFSET: f64 = 0.01;
const LABEL_RISE: f64 = 0.025;
const READOUT_DROP: f64 = 0.035;

pub const HOVER_STROKE: &str = "#fbbf24";
pub const SELECTION_STROKE: &str = "#8b5cf6";
pub const DELETE_FILL: &str = "#ef4444";
pub const DELETE_STROKE: &str = "#991b1b";

/// Fill/stroke colors for a desk, keyed on occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPalette {
    pub screen_fill: &'static str,
    pub stroke: &'static str,
    pub stand_fill: &'static str,
}

impl GlyphPalette {
    pub fn for_desk(occupied: bool) -> Self {
        if occupied {
            Self {
                screen_fill: "#dc2626",
                stroke: "#991b1b",
                stand_fill: "#7f1d1d",
            }
        } else {
            Self {
                screen_fill: "#16a34a",
                stroke: "#15803d",
                stand_fill: "#166534",
            }
        }
    }
}

/// Resolved shapes for one desk glyph, in view-box units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeskGlyph {
    pub center: Point,
    pub screen: Rect,
    pub stand: Rect,
    pub hover_ring: Rect,
    pub selection_ring: Rect,
    pub delete_button: Circle,
    pub label_anchor: Point,
    pub readout_anchor: Point,
}

impl DeskGlyph {
    pub fn layout(pos: NormPos, m: &GlyphMetrics) -> Self {
        let c = pos.to_view();
        let (w, h) = (m.width, m.height);
        let top = c.y - h / 2.0;
        let outline = Rect::new(c.x - w / 2.0, top, c.x + w / 2.0, top + h);

        let screen = Rect::new(outline.x0, top, outline.x1, top + h * SCREEN_SHARE);
        let stand_half = w * STAND_WIDTH_SHARE / 2.0;
        let stand = Rect::new(c.x - stand_half, screen.y1, c.x + stand_half, outline.y1);

        Self {
            center: c,
            screen,
            stand,
            hover_ring: outline.inflate(HOVER_INSET, HOVER_INSET),
            selection_ring: outline.inflate(SELECTION_INSET, SELECTION_INSET),
            delete_button: Circle::new(
                Point::new(outline.x1 + DELETE_OFFSET, top - DELETE_OFFSET),
                DELETE_RADIUS,
            ),
            label_anchor: Point::new(c.x, c.y - LABEL_RISE),
            readout_anchor: Point::new(c.x, c.y + READOUT_DROP),
        }
    }

    /// Full glyph box (screen + stand); the clickable area.
    pub fn bounds(&self) -> Rect {
        self.screen.union(self.stand)
    }
}

/// Live coordinate readout shown under a dragged desk.
pub fn coordinate_readout(pos: NormPos) -> String {
    format!("x: {:.1}% y: {:.1}%", pos.x_n * 100.0, pos.y_n * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-12;

    #[test]
    fn glyph_is_centered_on_view_point() {
        let g = DeskGlyph::layout(NormPos::new(0.5, 0.75), &GlyphMetrics::default());
        assert!((g.center.y - 0.25).abs() < EPS);
        let b = g.bounds();
        assert!((b.center().x - 0.5).abs() < EPS);
        assert!((b.center().y - 0.25).abs() < EPS);
        assert!((b.width() - 0.025).abs() < EPS);
        assert!((b.height() - 0.012).abs() < EPS);
    }

    #[test]
    fn stand_sits_under_screen() {
        let g = DeskGlyph::layout(NormPos::CENTER, &GlyphMetrics::default());
        assert!((g.stand.y0 - g.screen.y1).abs() < EPS);
        assert!(g.stand.width() < g.screen.width());
    }

    #[test]
    fn delete_button_is_up_and_right() {
        let g = DeskGlyph::layout(NormPos::CENTER, &GlyphMetrics::default());
        assert!(g.delete_button.center.x > g.screen.x1);
        assert!(g.delete_button.center.y < g.screen.y0);
    }

    #[test]
    fn palette_follows_occupancy() {
        assert_eq!(GlyphPalette::for_desk(true).screen_fill, "#dc2626");
        assert_eq!(GlyphPalette::for_desk(false).screen_fill, "#16a34a");
    }

    #[test]
    fn readout_formats_percentages() {
        assert_eq!(coordinate_readout(NormPos::new(0.1234, 0.5)), "x: 12.3% y: 50.0%");
    }
}
