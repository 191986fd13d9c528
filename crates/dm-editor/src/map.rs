//! The floor-map controller.
//!
//! `DeskMap` owns the desk list, the mounted surface, the admin flag and all
//! interaction state (hover, drag session, selection, pending delete). Hosts
//! feed it `InputEvent`s and read back a `Response` describing what changed.

use crate::align::align_row;
use crate::capture::{NoCapture, PointerCapture};
use crate::engine::{DeskEngine, DeskMutation};
use crate::handle::DeskCommands;
use crate::input::InputEvent;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::sync::{PositionChange, SyncOutbox};
use crate::tools::{DragTool, SelectTool, Tool, ToolContext};
use dm_core::{
    ConfigError, Desk, DeskId, DeskSet, Letterbox, MapConfig, NormPos, Point, Rect, Surface,
    TooltipPlacement, place_tooltip,
};
use dm_render::{hit_delete_button, hit_test};
use serde::Serialize;

/// Host callback invoked after a drag commits: `(desk, xN, yN)`.
pub type PositionCallback = Box<dyn FnMut(DeskId, f64, f64)>;

/// What an event changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The map needs to be redrawn.
    pub repaint: bool,
    /// A drag committed a new position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed: Option<PositionChange>,
    /// The host should ask the user to confirm this deletion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_delete: Option<DeleteRequest>,
    /// Desks repositioned by alignment, in row order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aligned: Vec<PositionChange>,
}

/// A staged deletion awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRequest {
    pub id: DeskId,
    pub label: String,
}

/// Pointer cursor to show over the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

pub struct DeskMap {
    engine: DeskEngine,
    config: MapConfig,
    surface: Option<Surface>,
    admin: bool,
    drag_tool: DragTool,
    select_tool: SelectTool,
    hovered: Option<DeskId>,
    pending_delete: Option<DeleteRequest>,
    capture: Box<dyn PointerCapture>,
    on_position_change: Option<PositionCallback>,
    outbox: SyncOutbox,
}

impl Default for DeskMap {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl DeskMap {
    pub fn new(config: MapConfig) -> Self {
        Self {
            engine: DeskEngine::new(),
            config,
            surface: None,
            admin: false,
            drag_tool: DragTool::new(),
            select_tool: SelectTool::new(),
            hovered: None,
            pending_delete: None,
            capture: Box::new(NoCapture),
            on_position_change: None,
            outbox: SyncOutbox::new(),
        }
    }

    pub fn with_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.set_capture(capture);
        self
    }

    /// Swap the capture provider. An active drag keeps its existing lease.
    pub fn set_capture(&mut self, capture: impl PointerCapture + 'static) {
        self.capture = Box::new(capture);
    }

    pub fn set_position_callback(&mut self, callback: impl FnMut(DeskId, f64, f64) + 'static) {
        self.on_position_change = Some(Box::new(callback));
    }

    pub fn clear_position_callback(&mut self) {
        self.on_position_change = None;
    }

    // ─── Surface ─────────────────────────────────────────────────────────

    /// Attach to a container whose bounding rect is `container` (client px).
    pub fn mount(&mut self, container: Rect) {
        log::info!(
            "mounted at {:.0}x{:.0}+{:.0}+{:.0}",
            container.width(),
            container.height(),
            container.x0,
            container.y0
        );
        self.surface = Some(Surface::new(container, self.config.image_aspect));
    }

    /// Detach from the container. Ends any drag without committing.
    pub fn unmount(&mut self) {
        self.drag_tool.cancel();
        self.hovered = None;
        self.surface = None;
        log::info!("unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Update the background image's aspect ratio (width / height).
    /// A non-positive or non-finite ratio is rejected and the old one kept.
    pub fn set_image_aspect(&mut self, aspect: f64) -> Result<(), ConfigError> {
        MapConfig::check_aspect(aspect)?;
        self.config.image_aspect = aspect;
        if let Some(surface) = self.surface.as_mut() {
            surface.image_aspect = aspect;
        }
        Ok(())
    }

    pub fn set_config(&mut self, config: MapConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(surface) = self.surface.as_mut() {
            surface.image_aspect = config.image_aspect;
        }
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The current letterbox, or `None` when unmounted or degenerate.
    pub fn letterbox(&self) -> Option<Letterbox> {
        self.surface.and_then(|s| s.letterbox())
    }

    // ─── State ───────────────────────────────────────────────────────────

    /// Switch admin mode. Leaving it ends any drag and drops a pending delete.
    pub fn set_admin_mode(&mut self, admin: bool) {
        if self.admin == admin {
            return;
        }
        self.admin = admin;
        if !admin {
            self.drag_tool.cancel();
            self.pending_delete = None;
        }
        log::info!("admin mode {}", if admin { "on" } else { "off" });
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Replace the desk list. Interaction state tied to old desks is reset.
    pub fn load_desks(&mut self, desks: Vec<Desk>) {
        self.drag_tool.cancel();
        self.pending_delete = None;
        self.hovered = None;
        self.engine.load(desks);
        let desks = &self.engine.desks;
        self.select_tool.retain(|id| desks.contains(id));
    }

    pub fn desks(&self) -> &DeskSet {
        &self.engine.desks
    }

    pub fn hovered(&self) -> Option<DeskId> {
        self.hovered
    }

    pub fn selection(&self) -> &[DeskId] {
        self.select_tool.selected()
    }

    pub fn is_selected(&self, id: DeskId) -> bool {
        self.select_tool.is_selected(id)
    }

    pub fn dragged(&self) -> Option<DeskId> {
        self.drag_tool.dragged()
    }

    pub fn drag_preview(&self) -> Option<(DeskId, NormPos)> {
        self.drag_tool.preview()
    }

    pub fn pending_delete(&self) -> Option<&DeleteRequest> {
        self.pending_delete.as_ref()
    }

    /// Where `desk` is drawn: its drag preview if it is being dragged.
    pub fn display_position(&self, desk: &Desk) -> NormPos {
        match self.drag_tool.preview() {
            Some((id, preview)) if id == desk.id => preview,
            _ => desk.position(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        if self.drag_tool.is_dragging() {
            Cursor::Grabbing
        } else if self.admin {
            Cursor::Grab
        } else {
            Cursor::Default
        }
    }

    /// The hovered desk and where its tooltip goes, in container-local px.
    /// Hidden while dragging.
    pub fn tooltip(&self) -> Option<(&Desk, TooltipPlacement)> {
        if self.drag_tool.is_dragging() {
            return None;
        }
        let desk = self.engine.desks.get(self.hovered?)?;
        let lb = self.letterbox()?;
        let anchor = lb.to_local(lb.to_screen(desk.position()));
        let placement = place_tooltip(anchor, lb.container().size(), &self.config.tooltip);
        Some((desk, placement))
    }

    pub fn outbox(&self) -> &SyncOutbox {
        &self.outbox
    }

    pub fn outbox_mut(&mut self) -> &mut SyncOutbox {
        &mut self.outbox
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: InputEvent) -> Response {
        let mut response = Response::default();
        match &event {
            InputEvent::PointerDown { x, y, .. } => {
                let p = Point::new(*x, *y);
                if let Some(request) = self.delete_button_at(p) {
                    log::debug!("delete requested for {}", request.id);
                    self.pending_delete = Some(request.clone());
                    response.confirm_delete = Some(request);
                    return response;
                }
                let hit = self.hit_at(p);
                self.run_drag_tool(&event, hit);
                if let Some(id) = self.drag_tool.dragged() {
                    self.hovered = Some(id);
                    response.repaint = true;
                }
            }
            InputEvent::PointerMove { x, y, .. } => {
                if let Some(id) = self.drag_tool.dragged() {
                    self.run_drag_tool(&event, None);
                    self.hovered = Some(id);
                    response.repaint = true;
                } else {
                    let hovered = self.hover_at(Point::new(*x, *y));
                    if hovered != self.hovered {
                        self.hovered = hovered;
                        response.repaint = true;
                    }
                }
            }
            InputEvent::PointerUp { .. } => {
                let was_dragging = self.drag_tool.is_dragging();
                for mutation in self.run_drag_tool(&event, None) {
                    if let DeskMutation::MoveDesk { id, to } = mutation {
                        response.committed = self.commit_move(id, to);
                    }
                }
                response.repaint = was_dragging && !self.drag_tool.is_dragging();
            }
            InputEvent::PointerCancel => {
                response.repaint = self.drag_tool.cancel();
            }
            InputEvent::Click { x, y, .. } => {
                let hit = self.hit_at(Point::new(*x, *y));
                let before = self.select_tool.selected().len();
                let letterbox = self.letterbox();
                let cx = ToolContext {
                    desks: &self.engine.desks,
                    letterbox,
                    admin: self.admin,
                    capture: self.capture.as_ref(),
                };
                self.select_tool.handle(&event, hit, &cx);
                response.repaint = self.select_tool.selected().len() != before;
            }
            InputEvent::Key { key, .. } => {
                if !self.admin {
                    return response;
                }
                match ShortcutMap::resolve(key) {
                    Some(ShortcutAction::AlignSelected) => {
                        response.aligned = self.align_selected();
                        response.repaint = !response.aligned.is_empty();
                    }
                    Some(ShortcutAction::ClearSelection) => {
                        response.repaint = self.clear_selection();
                    }
                    None => {}
                }
            }
        }
        response
    }

    /// Pointer left the map. Clears hover unless a drag is in progress.
    pub fn pointer_leave(&mut self) -> bool {
        if self.drag_tool.is_dragging() || self.hovered.is_none() {
            return false;
        }
        self.hovered = None;
        true
    }

    /// Abort the active drag, if any.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag_tool.cancel()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Lay the selected desks out on one row and clear the selection.
    /// Returns the new positions; empty when fewer than two selected desks
    /// exist or outside admin mode.
    pub fn align_selected(&mut self) -> Vec<PositionChange> {
        if !self.admin {
            return vec![];
        }
        let Some(moves) = align_row(&self.engine.desks, self.select_tool.selected()) else {
            return vec![];
        };
        let changes: Vec<PositionChange> = moves
            .iter()
            .map(|(id, pos)| PositionChange::new(*id, *pos))
            .collect();
        self.engine.apply_mutation(DeskMutation::MoveDesks { moves });
        self.select_tool.clear();
        log::info!("aligned {} desks", changes.len());
        changes
    }

    pub fn clear_selection(&mut self) -> bool {
        if !self.admin {
            return false;
        }
        self.select_tool.clear()
    }

    // ─── Deletion ────────────────────────────────────────────────────────

    /// Stage deletion of `id`. The host confirms or cancels.
    pub fn request_delete(&mut self, id: DeskId) -> Option<DeleteRequest> {
        if !self.admin {
            return None;
        }
        let desk = self.engine.desks.get(id)?;
        let request = DeleteRequest {
            id,
            label: desk.label.clone(),
        };
        self.pending_delete = Some(request.clone());
        Some(request)
    }

    /// Delete the staged desk. Returns its id, or `None` if nothing was staged.
    pub fn confirm_delete(&mut self) -> Option<DeskId> {
        let request = self.pending_delete.take()?;
        let id = request.id;
        if self.drag_tool.dragged() == Some(id) {
            self.drag_tool.cancel();
        }
        self.engine.apply_mutation(DeskMutation::RemoveDesk { id });
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        self.select_tool.remove(id);
        log::info!("deleted {id}");
        Some(id)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.pending_delete.take().is_some()
    }

    // ─── Internal ────────────────────────────────────────────────────────

    fn run_drag_tool(&mut self, event: &InputEvent, hit: Option<DeskId>) -> Vec<DeskMutation> {
        let letterbox = self.letterbox();
        let cx = ToolContext {
            desks: &self.engine.desks,
            letterbox,
            admin: self.admin,
            capture: self.capture.as_ref(),
        };
        self.drag_tool.handle(event, hit, &cx)
    }

    fn commit_move(&mut self, id: DeskId, to: NormPos) -> Option<PositionChange> {
        if !self.engine.apply_mutation(DeskMutation::MoveDesk { id, to }) {
            return None;
        }
        let change = PositionChange::new(id, to);
        if let Some(callback) = self.on_position_change.as_mut() {
            callback(id, to.x_n, to.y_n);
        }
        self.outbox.push(change);
        Some(change)
    }

    /// Topmost desk whose glyph is under client point `p`.
    fn hit_at(&self, p: Point) -> Option<DeskId> {
        let lb = self.letterbox()?;
        let view = lb.screen_to_view(p);
        hit_test(&self.engine.desks, view, &self.config.glyph, |d| {
            self.display_position(d)
        })
    }

    /// The hovered desk's delete button, if `p` is on it. Admin only.
    fn delete_button_at(&self, p: Point) -> Option<DeleteRequest> {
        if !self.admin || self.drag_tool.is_dragging() {
            return None;
        }
        let desk = self.engine.desks.get(self.hovered?)?;
        let view = self.letterbox()?.screen_to_view(p);
        hit_delete_button(self.display_position(desk), view, &self.config.glyph).then(|| {
            DeleteRequest {
                id: desk.id,
                label: desk.label.clone(),
            }
        })
    }

    /// The button sits outside the glyph box, so hovering it keeps the desk
    /// hovered.
    fn hover_at(&self, p: Point) -> Option<DeskId> {
        if self.delete_button_at(p).is_some() {
            return self.hovered;
        }
        self.hit_at(p)
    }
}

impl DeskCommands for DeskMap {
    fn add_desk(&mut self) -> Option<DeskId> {
        if !self.admin {
            return None;
        }
        let id = DeskId::sequential(
            &self.config.single_add_prefix,
            self.engine.desks.next_sequence(),
        );
        let desk = Desk::new(id, self.config.default_position, self.config.default_zone);
        self.engine
            .apply_mutation(DeskMutation::AddDesks { desks: vec![desk] });
        log::info!("added {id}");
        Some(id)
    }

    fn add_multiple_desks(&mut self, prefix: &str, count: usize) -> Vec<DeskId> {
        if !self.admin || count == 0 {
            return vec![];
        }
        let first = self.engine.desks.next_sequence();
        let desks: Vec<Desk> = (0..count)
            .map(|i| {
                Desk::new(
                    DeskId::sequential(prefix, first + i),
                    self.config.default_position,
                    self.config.default_zone,
                )
            })
            .collect();
        let ids: Vec<DeskId> = desks.iter().map(|d| d.id).collect();
        self.engine.apply_mutation(DeskMutation::AddDesks { desks });
        log::info!("added {count} desks with prefix {prefix:?}");
        ids
    }
}
