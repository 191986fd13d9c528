//! Input abstraction layer.
//!
//! Normalizes browser pointer, click and keyboard events into a single
//! `InputEvent` enum consumed by tools. Pointer coordinates are client
//! (viewport) pixels, the same space as the mounted container rect.

use dm_core::Point;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl+Shift: toggles a desk in or out of the selection set.
    pub const MULTI_SELECT: Modifiers = Modifiers {
        shift: true,
        ctrl: true,
        alt: false,
        meta: false,
    };

    pub fn is_multi_select(&self) -> bool {
        self.ctrl && self.shift
    }
}

/// A normalized input event.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer pressed. `pointer_id` is forwarded to pointer capture.
    PointerDown {
        x: f64,
        y: f64,
        pointer_id: i32,
        modifiers: Modifiers,
    },

    PointerMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    /// Pointer released. Only the pointer that started a drag can end it.
    PointerUp {
        x: f64,
        y: f64,
        pointer_id: i32,
        modifiers: Modifiers,
    },

    /// Pointer gesture aborted (lost capture, window blur, touch cancel).
    PointerCancel,

    /// A completed click (press and release on the same target).
    Click {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, pointer_id: i32, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            x,
            y,
            pointer_id,
            modifiers,
        }
    }

    pub fn pointer_move(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerMove { x, y, modifiers }
    }

    pub fn pointer_up(x: f64, y: f64, pointer_id: i32, modifiers: Modifiers) -> Self {
        Self::PointerUp {
            x,
            y,
            pointer_id,
            modifiers,
        }
    }

    pub fn click(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::Click { x, y, modifiers }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Click { x, y, .. } => Some(Point::new(*x, *y)),
            Self::PointerCancel | Self::Key { .. } => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. }
            | Self::Click { modifiers, .. }
            | Self::Key { modifiers, .. } => *modifiers,
            Self::PointerCancel => Modifiers::NONE,
        }
    }
}
