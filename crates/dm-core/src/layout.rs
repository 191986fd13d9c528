//! Letterbox coordinate transform.
//!
//! The floor-plan image is fitted inside its container with "contain"
//! semantics: aspect ratio preserved, centered on the free axis. Desk
//! positions live in the normalized space of the displayed image, so every
//! pointer position has to go through the same letterbox math on the way in
//! (drop, live preview, hit testing) and on the way out (painting, tooltip).

use crate::model::NormPos;
use kurbo::{Point, Rect, Size};

/// A mounted rendering surface: the container's bounding rect in client
/// (viewport) coordinates and the background image's intrinsic aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub container: Rect,
    /// Image width divided by image height.
    pub image_aspect: f64,
}

impl Surface {
    pub fn new(container: Rect, image_aspect: f64) -> Self {
        Self {
            container,
            image_aspect,
        }
    }

    /// Resolve the displayed image rect, or `None` if the surface is degenerate.
    pub fn letterbox(&self) -> Option<Letterbox> {
        Letterbox::fit(self.container, self.image_aspect)
    }
}

/// Where the image actually lands inside its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    container: Rect,
    display: Rect,
}

impl Letterbox {
    /// Fit an image of `image_aspect` inside `container`, centered.
    ///
    /// Returns `None` when the container has no positive finite area or the
    /// aspect ratio is not a positive finite number.
    pub fn fit(container: Rect, image_aspect: f64) -> Option<Self> {
        let w = container.width();
        let h = container.height();
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return None;
        }
        if !(image_aspect.is_finite() && image_aspect > 0.0) {
            return None;
        }

        let container_aspect = w / h;
        let (size, left, top) = if image_aspect > container_aspect {
            // Image is relatively wider: full width, bars above and below
            let dh = w / image_aspect;
            (Size::new(w, dh), 0.0, (h - dh) / 2.0)
        } else {
            // Image is relatively taller: full height, bars left and right
            let dw = h * image_aspect;
            (Size::new(dw, h), (w - dw) / 2.0, 0.0)
        };

        let origin = Point::new(container.x0 + left, container.y0 + top);
        Some(Self {
            container,
            display: Rect::from_origin_size(origin, size),
        })
    }

    /// The displayed image rect in client coordinates.
    pub fn display(&self) -> Rect {
        self.display
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// Client point → normalized image position. Not clamped.
    pub fn to_normalized(&self, p: Point) -> NormPos {
        let rel_x = p.x - self.display.x0;
        let rel_y = p.y - self.display.y0;
        NormPos::new(
            rel_x / self.display.width(),
            1.0 - rel_y / self.display.height(),
        )
    }

    /// Normalized image position → client point.
    pub fn to_screen(&self, pos: NormPos) -> Point {
        self.view_to_screen(pos.to_view())
    }

    /// View-box point (`[0,1]²`, y down) → client point.
    pub fn view_to_screen(&self, v: Point) -> Point {
        Point::new(
            self.display.x0 + v.x * self.display.width(),
            self.display.y0 + v.y * self.display.height(),
        )
    }

    /// Client point → view-box point.
    pub fn screen_to_view(&self, p: Point) -> Point {
        self.to_normalized(p).to_view()
    }

    /// Pixels per view-box unit along each axis.
    pub fn view_scale(&self) -> Size {
        self.display.size()
    }

    /// Client point → container-local point (origin at the container's
    /// top-left corner).
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.container.x0, p.y - self.container.y0)
    }
}
