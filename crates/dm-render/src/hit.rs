//! Hit testing: view-box point → desk lookup.
//!
//! Walks desks in reverse paint order so the topmost glyph wins.

use crate::glyph::DeskGlyph;
use dm_core::{Desk, DeskId, DeskSet, GlyphMetrics, NormPos};
use kurbo::{Point, Shape};

/// Find the topmost desk whose glyph contains `view`.
///
/// `display` yields the position each desk is drawn at, so a desk being
/// dragged is hit where its preview is, not where it is stored.
pub fn hit_test(
    desks: &DeskSet,
    view: Point,
    metrics: &GlyphMetrics,
    display: impl Fn(&Desk) -> NormPos,
) -> Option<DeskId> {
    desks
        .iter()
        .rev()
        .find(|desk| {
            DeskGlyph::layout(display(desk), metrics)
                .bounds()
                .contains(view)
        })
        .map(|desk| {
            log::trace!("hit {} at ({:.4}, {:.4})", desk.id, view.x, view.y);
            desk.id
        })
}

/// Whether `view` lands on the delete button of a desk drawn at `pos`.
pub fn hit_delete_button(pos: NormPos, view: Point, metrics: &GlyphMetrics) -> bool {
    DeskGlyph::layout(pos, metrics).delete_button.contains(view)
}
