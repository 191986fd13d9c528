//! Desk tooltip content and placement.
//!
//! Placement works in container-local pixels. The returned `x` is the
//! tooltip's horizontal center (the box is drawn centered on it), `y` its top
//! edge. The preferred spot is up and to the right of the desk; the box flips
//! left or below when it would overflow the padded container, then gets
//! clamped so it stays inside.

use crate::config::TooltipMetrics;
use crate::model::Desk;
use kurbo::{Point, Rect, Size};

/// One `Label: value` row in the tooltip body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLine {
    pub label: &'static str,
    pub value: String,
}

/// Tooltip rows for a desk. The desk label itself is the title and is not
/// included.
pub fn tooltip_lines(desk: &Desk) -> Vec<TooltipLine> {
    let status = if desk.occupied { "Occupied" } else { "Available" };
    let mut lines = vec![
        TooltipLine {
            label: "Status",
            value: status.to_string(),
        },
        TooltipLine {
            label: "Zone",
            value: desk.zone.label().to_string(),
        },
    ];
    if let Some(user) = &desk.user {
        lines.push(TooltipLine {
            label: "User",
            value: user.clone(),
        });
        if let Some(start) = &desk.start_time {
            lines.push(TooltipLine {
                label: "Start",
                value: start.clone(),
            });
        }
        if let Some(end) = &desk.end_time {
            lines.push(TooltipLine {
                label: "End",
                value: end.clone(),
            });
        }
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalSide {
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalSide {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    /// Horizontal center of the box.
    pub x: f64,
    /// Top edge of the box.
    pub y: f64,
    pub horizontal: HorizontalSide,
    pub vertical: VerticalSide,
    pub size: Size,
}

impl TooltipPlacement {
    /// The tooltip box in container-local pixels.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.x - self.size.width / 2.0, self.y),
            self.size,
        )
    }
}

/// Place a tooltip for a desk drawn at `anchor` (container-local pixels)
/// inside a container of `container` size.
pub fn place_tooltip(anchor: Point, container: Size, m: &TooltipMetrics) -> TooltipPlacement {
    let (w, h) = (m.width, m.height);
    let left = m.padding;
    let right = container.width - m.padding;
    let top = m.padding;
    let bottom = container.height - m.padding;

    let mut x = anchor.x + m.offset;
    let mut y = anchor.y - m.offset - h;
    let mut horizontal = HorizontalSide::Right;
    let mut vertical = VerticalSide::Above;

    if x + w / 2.0 > right {
        x = anchor.x - m.offset - w;
        horizontal = HorizontalSide::Left;
    } else if x - w / 2.0 < left {
        x = anchor.x + m.offset;
    }

    if y < top {
        y = anchor.y + m.offset;
        vertical = VerticalSide::Below;
    } else if y + h > bottom {
        y = anchor.y - m.offset - h;
    }

    // Not f64::clamp: a container narrower than the box pins it to the
    // leading edge.
    x = (left + w / 2.0).max(x.min(right - w / 2.0));
    y = top.max(y.min(bottom - h));

    TooltipPlacement {
        x,
        y,
        horizontal,
        vertical,
        size: Size::new(w, h),
    }
}
