//! Canvas2D renderer for the floor map.
//!
//! The canvas covers the map container one-to-one, so every shape is drawn
//! in container-local pixels: view-box geometry from `dm-render` goes
//! through the letterbox and is then shifted by the container origin.

use dm_core::{DeskId, Letterbox, Point, Rect, Size, TooltipPlacement, tooltip_lines};
use dm_editor::DeskMap;
use dm_render::glyph::{DELETE_FILL, DELETE_STROKE, HOVER_STROKE, SELECTION_STROKE};
use dm_render::{DeskGlyph, GlyphPalette, coordinate_readout};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Colors for everything that is not a desk glyph.
pub struct MapTheme {
    pub backdrop: &'static str,
    pub label: &'static str,
    pub readout_bg: &'static str,
    pub readout_text: &'static str,
    pub badge_bg: &'static str,
    pub badge_text: &'static str,
    pub tooltip_bg: &'static str,
    pub tooltip_border: &'static str,
    pub tooltip_title: &'static str,
    pub tooltip_text: &'static str,
}

impl Default for MapTheme {
    fn default() -> Self {
        Self {
            backdrop: "#f8fafc",
            label: "#1f2937",
            readout_bg: "rgba(17, 24, 39, 0.85)",
            readout_text: "#ffffff",
            badge_bg: "rgba(139, 92, 246, 0.92)",
            badge_text: "#ffffff",
            tooltip_bg: "#ffffff",
            tooltip_border: "#e5e7eb",
            tooltip_title: "#111827",
            tooltip_text: "#4b5563",
        }
    }
}

const FONT: &str = "Inter, system-ui, sans-serif";

/// Draw the whole map. Does nothing while the map has no letterbox.
pub fn render_map(
    ctx: &CanvasRenderingContext2d,
    map: &DeskMap,
    image: Option<&HtmlImageElement>,
    theme: &MapTheme,
) {
    let Some(lb) = map.letterbox() else {
        return;
    };
    let size = lb.container().size();

    ctx.clear_rect(0.0, 0.0, size.width, size.height);
    ctx.set_fill_style_str(theme.backdrop);
    ctx.fill_rect(0.0, 0.0, size.width, size.height);

    if let Some(image) = image {
        let display = local_rect(&lb, lb.display());
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            display.x0,
            display.y0,
            display.width(),
            display.height(),
        );
    }

    for desk in map.desks() {
        let pos = map.display_position(desk);
        let glyph = DeskGlyph::layout(pos, &map.config().glyph);
        let hovered = map.hovered() == Some(desk.id);
        let selected = map.is_selected(desk.id);
        let overlays = desk_overlays(map, desk.id);

        draw_glyph(ctx, &lb, &glyph, GlyphPalette::for_desk(desk.occupied), hovered, selected);

        if overlays.label {
            draw_label(ctx, &lb, glyph.label_anchor, &desk.label, theme);
        }
        if overlays.delete_button {
            draw_delete_button(ctx, &lb, &glyph);
        }
        if overlays.readout {
            draw_readout(ctx, &lb, glyph.readout_anchor, &coordinate_readout(pos), theme);
        }
    }

    if map.is_admin() && !map.selection().is_empty() {
        draw_selection_badge(ctx, map.selection().len(), theme);
    }

    if let Some((desk, placement)) = map.tooltip() {
        draw_tooltip(ctx, &desk.label, &tooltip_lines(desk), &placement, theme);
    }
}

/// Decorations drawn on top of a desk glyph.
#[derive(Debug, Default, PartialEq, Eq)]
struct DeskOverlays {
    label: bool,
    delete_button: bool,
    readout: bool,
}

/// Labels and the delete button follow hover; the readout follows the drag.
fn desk_overlays(map: &DeskMap, id: DeskId) -> DeskOverlays {
    let hovered = map.hovered() == Some(id);
    let dragged = map.dragged();
    DeskOverlays {
        label: hovered,
        delete_button: hovered && map.is_admin() && dragged.is_none(),
        readout: dragged == Some(id),
    }
}

// ─── Coordinates ─────────────────────────────────────────────────────────

fn local_point(lb: &Letterbox, view: Point) -> Point {
    lb.to_local(lb.view_to_screen(view))
}

fn view_rect(lb: &Letterbox, r: Rect) -> Rect {
    let origin = local_point(lb, r.origin());
    let scale = lb.view_scale();
    Rect::from_origin_size(
        origin,
        Size::new(r.width() * scale.width, r.height() * scale.height),
    )
}

fn local_rect(lb: &Letterbox, client: Rect) -> Rect {
    Rect::from_origin_size(lb.to_local(client.origin()), client.size())
}

// ─── Desk glyphs ─────────────────────────────────────────────────────────

fn draw_glyph(
    ctx: &CanvasRenderingContext2d,
    lb: &Letterbox,
    glyph: &DeskGlyph,
    palette: GlyphPalette,
    hovered: bool,
    selected: bool,
) {
    ctx.save();

    if selected {
        let ring = view_rect(lb, glyph.selection_ring);
        ctx.set_stroke_style_str(SELECTION_STROKE);
        ctx.set_line_width(2.0);
        let _ = ctx.set_line_dash(&js_sys::Array::of2(&4.0.into(), &2.0.into()));
        ctx.stroke_rect(ring.x0, ring.y0, ring.width(), ring.height());
        let _ = ctx.set_line_dash(&js_sys::Array::new());
    }
    if hovered {
        let ring = view_rect(lb, glyph.hover_ring);
        ctx.set_stroke_style_str(HOVER_STROKE);
        ctx.set_line_width(2.0);
        ctx.stroke_rect(ring.x0, ring.y0, ring.width(), ring.height());
    }

    let screen = view_rect(lb, glyph.screen);
    ctx.set_fill_style_str(palette.screen_fill);
    ctx.fill_rect(screen.x0, screen.y0, screen.width(), screen.height());
    ctx.set_stroke_style_str(palette.stroke);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(screen.x0, screen.y0, screen.width(), screen.height());

    let stand = view_rect(lb, glyph.stand);
    ctx.set_fill_style_str(palette.stand_fill);
    ctx.fill_rect(stand.x0, stand.y0, stand.width(), stand.height());

    ctx.restore();
}

fn draw_label(
    ctx: &CanvasRenderingContext2d,
    lb: &Letterbox,
    anchor: Point,
    label: &str,
    theme: &MapTheme,
) {
    let p = local_point(lb, anchor);
    ctx.save();
    ctx.set_font(&format!("600 10px {FONT}"));
    ctx.set_fill_style_str(theme.label);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(label, p.x, p.y);
    ctx.restore();
}

fn draw_delete_button(ctx: &CanvasRenderingContext2d, lb: &Letterbox, glyph: &DeskGlyph) {
    let c = local_point(lb, glyph.delete_button.center);
    let r = glyph.delete_button.radius * lb.view_scale().width;

    ctx.save();
    ctx.begin_path();
    let _ = ctx.arc(c.x, c.y, r, 0.0, std::f64::consts::TAU);
    ctx.set_fill_style_str(DELETE_FILL);
    ctx.fill();
    ctx.set_stroke_style_str(DELETE_STROKE);
    ctx.set_line_width(1.0);
    ctx.stroke();

    ctx.set_font(&format!("bold {:.0}px {FONT}", (r * 1.4).max(8.0)));
    ctx.set_fill_style_str("#ffffff");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text("×", c.x, c.y);
    ctx.restore();
}

fn draw_readout(
    ctx: &CanvasRenderingContext2d,
    lb: &Letterbox,
    anchor: Point,
    text: &str,
    theme: &MapTheme,
) {
    let p = local_point(lb, anchor);
    ctx.save();
    ctx.set_font(&format!("11px {FONT}"));
    let width = ctx
        .measure_text(text)
        .map(|m| m.width())
        .unwrap_or(text.len() as f64 * 6.0);
    let (w, h) = (width + 10.0, 18.0);
    ctx.set_fill_style_str(theme.readout_bg);
    ctx.fill_rect(p.x - w / 2.0, p.y - h / 2.0, w, h);
    ctx.set_fill_style_str(theme.readout_text);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(text, p.x, p.y);
    ctx.restore();
}

// ─── Overlays ────────────────────────────────────────────────────────────

fn draw_selection_badge(ctx: &CanvasRenderingContext2d, count: usize, theme: &MapTheme) {
    let lines = [
        format!("DESKS SELECTED: {count}"),
        "CTRL+SHIFT+Click to select/deselect".to_string(),
        "Press ENTER to align desks".to_string(),
    ];
    let (x, y, w, h) = (12.0, 12.0, 240.0, 62.0);

    ctx.save();
    ctx.set_fill_style_str(theme.badge_bg);
    rounded_rect_path(ctx, x, y, w, h, 6.0);
    ctx.fill();

    ctx.set_fill_style_str(theme.badge_text);
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    for (i, line) in lines.iter().enumerate() {
        let weight = if i == 0 { "bold 12px" } else { "11px" };
        ctx.set_font(&format!("{weight} {FONT}"));
        let _ = ctx.fill_text(line, x + 10.0, y + 8.0 + i as f64 * 16.0);
    }
    ctx.restore();
}

fn draw_tooltip(
    ctx: &CanvasRenderingContext2d,
    title: &str,
    lines: &[dm_core::TooltipLine],
    placement: &TooltipPlacement,
    theme: &MapTheme,
) {
    let r = placement.rect();

    ctx.save();
    ctx.set_shadow_color("rgba(0, 0, 0, 0.15)");
    ctx.set_shadow_blur(12.0);
    ctx.set_shadow_offset_y(4.0);
    ctx.set_fill_style_str(theme.tooltip_bg);
    rounded_rect_path(ctx, r.x0, r.y0, r.width(), r.height(), 8.0);
    ctx.fill();
    ctx.set_shadow_color("transparent");
    ctx.set_stroke_style_str(theme.tooltip_border);
    ctx.set_line_width(1.0);
    ctx.stroke();

    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    ctx.set_font(&format!("bold 14px {FONT}"));
    ctx.set_fill_style_str(theme.tooltip_title);
    let _ = ctx.fill_text(title, r.x0 + 14.0, r.y0 + 12.0);

    ctx.set_font(&format!("12px {FONT}"));
    ctx.set_fill_style_str(theme.tooltip_text);
    for (i, line) in lines.iter().enumerate() {
        let text = format!("{}: {}", line.label, line.value);
        let _ = ctx.fill_text(&text, r.x0 + 14.0, r.y0 + 38.0 + i as f64 * 20.0);
    }
    ctx.restore();
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.quadratic_curve_to(x + w, y, x + w, y + r);
    ctx.line_to(x + w, y + h - r);
    ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    ctx.line_to(x + r, y + h);
    ctx.quadratic_curve_to(x, y + h, x, y + h - r);
    ctx.line_to(x, y + r);
    ctx.quadratic_curve_to(x, y, x + r, y);
    ctx.close_path();
}
