//! Tool system for desk interactions.
//!
//! Each tool translates input events into `DeskMutation`s that the
//! `DeskEngine` applies. Tools only act in admin mode.
//!
//! | Gesture | Tool | Effect |
//! |---------|------|--------|
//! | Press on a desk, move, release | `DragTool` | Live preview, commit on release |
//! | Ctrl+Shift+Click on a desk | `SelectTool` | Toggle selection membership |

use crate::capture::{CaptureLease, PointerCapture};
use crate::engine::DeskMutation;
use crate::input::InputEvent;
use dm_core::{DeskId, DeskSet, Letterbox, NormPos, Point};
use smallvec::SmallVec;

/// Read-only view of the map a tool needs to interpret an event.
pub struct ToolContext<'a> {
    pub desks: &'a DeskSet,
    pub letterbox: Option<Letterbox>,
    pub admin: bool,
    pub capture: &'a dyn PointerCapture,
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    /// Handle an input event. `hit` is the topmost desk under the pointer.
    fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<DeskId>,
        cx: &ToolContext<'_>,
    ) -> Vec<DeskMutation>;
}

// ─── Drag Tool ───────────────────────────────────────────────────────────

/// An in-progress drag. Dropping it releases pointer capture.
#[derive(Debug)]
struct DragSession {
    desk_id: DeskId,
    pointer_id: i32,
    start: NormPos,
    preview: NormPos,
    _lease: CaptureLease,
}

#[derive(Debug, Default)]
pub struct DragTool {
    session: Option<DragSession>,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The desk being dragged.
    pub fn dragged(&self) -> Option<DeskId> {
        self.session.as_ref().map(|s| s.desk_id)
    }

    /// The dragged desk and where it is currently drawn.
    pub fn preview(&self) -> Option<(DeskId, NormPos)> {
        self.session.as_ref().map(|s| (s.desk_id, s.preview))
    }

    /// Abort without committing. Returns whether a session was active.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("drag of {} cancelled", session.desk_id);
                true
            }
            None => false,
        }
    }
}

impl Tool for DragTool {
    fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<DeskId>,
        cx: &ToolContext<'_>,
    ) -> Vec<DeskMutation> {
        match event {
            InputEvent::PointerDown { pointer_id, .. } => {
                if !cx.admin {
                    return vec![];
                }
                if let Some(active) = &self.session {
                    log::debug!(
                        "pointer {pointer_id} pressed while {} is dragged, ignored",
                        active.desk_id
                    );
                    return vec![];
                }
                let Some(desk) = hit.and_then(|id| cx.desks.get(id)) else {
                    return vec![];
                };
                let start = desk.position();
                log::debug!("drag start {} at ({:.4}, {:.4})", desk.id, start.x_n, start.y_n);
                self.session = Some(DragSession {
                    desk_id: desk.id,
                    pointer_id: *pointer_id,
                    start,
                    preview: start,
                    _lease: cx.capture.acquire(*pointer_id),
                });
                vec![]
            }
            InputEvent::PointerMove { x, y, .. } => {
                if let (Some(session), Some(lb)) = (self.session.as_mut(), cx.letterbox) {
                    session.preview = lb.to_normalized(Point::new(*x, *y));
                }
                vec![]
            }
            InputEvent::PointerUp {
                x, y, pointer_id, ..
            } => {
                let Some(session) = self.session.take_if(|s| s.pointer_id == *pointer_id) else {
                    return vec![];
                };
                let Some(lb) = cx.letterbox else {
                    log::debug!("drop of {} without a surface, discarded", session.desk_id);
                    return vec![];
                };
                let to = lb.to_normalized(Point::new(*x, *y));
                if to == session.start {
                    return vec![];
                }
                vec![DeskMutation::MoveDesk {
                    id: session.desk_id,
                    to,
                }]
            }
            InputEvent::PointerCancel => {
                self.cancel();
                vec![]
            }
            InputEvent::Click { .. } | InputEvent::Key { .. } => vec![],
        }
    }
}

// ─── Select Tool ─────────────────────────────────────────────────────────

/// Multi-selection for alignment. Ids keep insertion order.
#[derive(Debug, Default)]
pub struct SelectTool {
    selected: SmallVec<[DeskId; 8]>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[DeskId] {
        &self.selected
    }

    pub fn is_selected(&self, id: DeskId) -> bool {
        self.selected.contains(&id)
    }

    /// Add `id` if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, id: DeskId) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    pub fn remove(&mut self, id: DeskId) {
        self.selected.retain(|s| *s != id);
    }

    /// Drop ids not satisfying `keep`.
    pub fn retain(&mut self, keep: impl Fn(DeskId) -> bool) {
        self.selected.retain(|s| keep(*s));
    }

    pub fn clear(&mut self) -> bool {
        let had = !self.selected.is_empty();
        self.selected.clear();
        had
    }
}

impl Tool for SelectTool {
    fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<DeskId>,
        cx: &ToolContext<'_>,
    ) -> Vec<DeskMutation> {
        if let InputEvent::Click { modifiers, .. } = event {
            if cx.admin && modifiers.is_multi_select() {
                if let Some(id) = hit {
                    let now = self.toggle(id);
                    log::debug!("{id} {}", if now { "selected" } else { "deselected" });
                }
            }
        }
        vec![]
    }
}
