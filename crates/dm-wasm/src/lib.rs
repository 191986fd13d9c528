//! WASM bridge for Desk Map: exposes the floor-map editor to JavaScript.
//!
//! Built with `wasm-pack build --target web`. The host page owns the DOM:
//! it forwards pointer and key events, reports the container's bounding
//! rect, performs coordinate sync requests, and asks for confirmation
//! before deletes. Everything else lives in `DeskMap`.

mod logger;
mod render2d;

use dm_core::tooltip::{HorizontalSide, VerticalSide};
use dm_core::{Desk, DeskId, MapConfig, Rect, reference_layout_seeded};
use dm_editor::{
    BatchCoordinateUpdate, BulkAddRequest, CaptureLease, DeskCommands, DeskMap, InputEvent,
    Modifiers, PointerCapture, Response, SyncError, classify_response,
};
use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// The JS-facing floor-map controller.
#[wasm_bindgen]
pub struct DeskMapCanvas {
    map: DeskMap,
    theme: render2d::MapTheme,
}

impl Default for DeskMapCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl DeskMapCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        logger::init(log::LevelFilter::Info);

        Self {
            map: DeskMap::default(),
            theme: render2d::MapTheme::default(),
        }
    }

    /// Set the console log level (`"off"`, `"error"`, ..., `"trace"`).
    pub fn set_log_level(&self, level: &str) {
        logger::init(logger::parse_level(level));
    }

    /// Use `canvas` for pointer capture during drags.
    pub fn attach_canvas(&mut self, canvas: HtmlCanvasElement) {
        self.map.set_capture(CanvasCapture { canvas });
    }

    // ─── Surface & Config ────────────────────────────────────────────────

    /// Report the container's bounding client rect.
    pub fn mount(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.map
            .mount(Rect::from_origin_size((x, y), (width, height)));
    }

    pub fn unmount(&mut self) {
        self.map.unmount();
    }

    /// Image width divided by height, once the background has loaded.
    /// Returns `false` and keeps the previous ratio when `aspect` is not a
    /// positive number.
    pub fn set_image_aspect(&mut self, aspect: f64) -> bool {
        match self.map.set_image_aspect(aspect) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Apply a JSON `MapConfig`. Returns `{"ok":true}` or
    /// `{"ok":false,"error":"..."}`.
    pub fn set_config(&mut self, json: &str) -> String {
        let result = MapConfig::from_json(json).and_then(|config| self.map.set_config(config));
        match result {
            Ok(()) => json!({ "ok": true }).to_string(),
            Err(err) => {
                log::warn!("rejected config: {err}");
                json!({ "ok": false, "error": err.to_string() }).to_string()
            }
        }
    }

    pub fn set_admin_mode(&mut self, admin: bool) {
        self.map.set_admin_mode(admin);
    }

    pub fn is_admin(&self) -> bool {
        self.map.is_admin()
    }

    // ─── Desks ───────────────────────────────────────────────────────────

    /// Replace the desk list from a JSON array. Returns `{"ok":true,"count":n}`
    /// or `{"ok":false,"error":"..."}`.
    pub fn load_desks(&mut self, json: &str) -> String {
        match serde_json::from_str::<Vec<Desk>>(json) {
            Ok(desks) => {
                let count = desks.len();
                self.map.load_desks(desks);
                json!({ "ok": true, "count": count }).to_string()
            }
            Err(err) => json!({ "ok": false, "error": err.to_string() }).to_string(),
        }
    }

    /// Load the built-in 78-desk layout with seeded occupancy.
    pub fn load_reference_layout(&mut self, seed: u32) -> usize {
        self.map.load_desks(reference_layout_seeded(u64::from(seed)));
        self.map.desks().len()
    }

    pub fn desks_json(&self) -> String {
        serde_json::to_string(self.map.desks()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Add one desk. Returns its id, or an empty string outside admin mode.
    pub fn add_desk(&mut self) -> String {
        self.map
            .add_desk()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Add `count` desks with `prefix`. Returns a JSON array of new ids.
    pub fn add_multiple_desks(&mut self, prefix: &str, count: u32) -> String {
        let ids = self.map.add_multiple_desks(prefix, count as usize);
        ids_json(&ids)
    }

    /// Validate raw form input, then bulk add. Returns
    /// `{"ok":true,"ids":[...]}` or `{"ok":false,"error":"..."}`.
    pub fn add_multiple_desks_checked(&mut self, prefix: &str, count: &str) -> String {
        match BulkAddRequest::parse(prefix, count) {
            Ok(req) => {
                let ids = self.map.add_multiple_desks(&req.prefix, req.count);
                let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                json!({ "ok": true, "ids": ids }).to_string()
            }
            Err(err) => json!({ "ok": false, "error": err.to_string() }).to_string(),
        }
    }

    /// Delete the desk staged by the last delete-button press. Returns its
    /// id, or an empty string if nothing was staged.
    pub fn confirm_delete(&mut self) -> String {
        self.map
            .confirm_delete()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.map.cancel_delete()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Pointer pressed. Returns a response JSON, see `Response`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        pointer_id: i32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        response_json(&self.map.handle(InputEvent::pointer_down(x, y, pointer_id, mods)))
    }

    pub fn handle_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        response_json(&self.map.handle(InputEvent::pointer_move(x, y, mods)))
    }

    /// Pointer released. Only the pointer that started a drag commits it.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        pointer_id: i32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        response_json(&self.map.handle(InputEvent::pointer_up(x, y, pointer_id, mods)))
    }

    /// `pointercancel` or `lostpointercapture`.
    pub fn handle_pointer_cancel(&mut self) -> String {
        response_json(&self.map.handle(InputEvent::PointerCancel))
    }

    /// Pointer left the container. Returns whether to repaint.
    pub fn handle_pointer_leave(&mut self) -> bool {
        self.map.pointer_leave()
    }

    pub fn handle_click(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        response_json(&self.map.handle(InputEvent::click(x, y, mods)))
    }

    /// `key` is `KeyboardEvent.key`.
    pub fn handle_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        response_json(&self.map.handle(InputEvent::key(key, mods)))
    }

    // ─── Coordinate Sync ─────────────────────────────────────────────────

    /// Call `callback(deskId, xN, yN)` after every committed drag.
    pub fn set_position_callback(&mut self, callback: js_sys::Function) {
        self.map.set_position_callback(move |id, x, y| {
            let result = callback.call3(
                &JsValue::NULL,
                &JsValue::from_str(id.as_str()),
                &JsValue::from_f64(x),
                &JsValue::from_f64(y),
            );
            if let Err(err) = result {
                log::warn!("position callback threw for {id}: {err:?}");
            }
        });
    }

    pub fn clear_position_callback(&mut self) {
        self.map.clear_position_callback();
    }

    /// Drain queued position changes as a JSON array of
    /// `{deskId, xN, yN, timestamp}`.
    pub fn take_sync_updates(&mut self, timestamp: &str) -> String {
        let updates = self.map.outbox_mut().take_stamped(timestamp);
        serde_json::to_string(&updates).unwrap_or_else(|_| "[]".to_string())
    }

    /// Drain queued position changes as one `{updates, timestamp}` batch,
    /// or `null` when nothing is queued.
    pub fn take_sync_batch(&mut self, timestamp: &str) -> String {
        let changes = self.map.outbox_mut().drain();
        if changes.is_empty() {
            return "null".to_string();
        }
        let batch = BatchCoordinateUpdate::new(changes, timestamp);
        serde_json::to_string(&batch).unwrap_or_else(|_| "null".to_string())
    }

    /// Record the HTTP status of a desk's sync request. Returns whether it
    /// counted as success (404 does not).
    pub fn report_sync_result(&mut self, desk_id: &str, status: u16, reason: &str) -> bool {
        let result = classify_response(status, reason);
        let ok = result.is_ok();
        self.map.outbox_mut().record(DeskId::intern(desk_id), result);
        ok
    }

    /// Record a network-level failure for a desk's sync request.
    pub fn report_sync_failure(&mut self, desk_id: &str, message: &str) {
        self.map.outbox_mut().record(
            DeskId::intern(desk_id),
            Err(SyncError::Transport(message.to_string())),
        );
    }

    /// `[{deskId, error}]` for desks whose last sync failed.
    pub fn sync_failures_json(&self) -> String {
        let failures: Vec<_> = self
            .map
            .outbox()
            .failures()
            .map(|(id, msg)| json!({ "deskId": id, "error": msg }))
            .collect();
        serde_json::Value::Array(failures).to_string()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// The hovered desk's tooltip, or `null`. Coordinates are
    /// container-local; `x` is the horizontal center, `y` the top.
    pub fn tooltip_json(&self) -> String {
        let Some((desk, p)) = self.map.tooltip() else {
            return "null".to_string();
        };
        let lines: Vec<_> = dm_core::tooltip_lines(desk)
            .into_iter()
            .map(|l| json!({ "label": l.label, "value": l.value }))
            .collect();
        json!({
            "id": desk.id,
            "label": desk.label,
            "lines": lines,
            "x": p.x,
            "y": p.y,
            "width": p.size.width,
            "height": p.size.height,
            "horizontal": horizontal_name(p.horizontal),
            "vertical": vertical_name(p.vertical),
        })
        .to_string()
    }

    /// CSS cursor for the container.
    pub fn cursor(&self) -> String {
        self.map.cursor().as_css().to_string()
    }

    pub fn selected_ids(&self) -> String {
        ids_json(self.map.selection())
    }

    pub fn hovered_id(&self) -> String {
        self.map
            .hovered()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Draw the map. The canvas must match the mounted container's size.
    pub fn render(&self, ctx: &CanvasRenderingContext2d, image: Option<HtmlImageElement>) {
        render2d::render_map(ctx, &self.map, image.as_ref(), &self.theme);
    }
}

// ─── Pointer capture ─────────────────────────────────────────────────────

struct CanvasCapture {
    canvas: HtmlCanvasElement,
}

impl PointerCapture for CanvasCapture {
    fn acquire(&self, pointer_id: i32) -> CaptureLease {
        if let Err(err) = self.canvas.set_pointer_capture(pointer_id) {
            log::warn!("setPointerCapture({pointer_id}) failed: {err:?}");
            return CaptureLease::detached();
        }
        let canvas = self.canvas.clone();
        CaptureLease::new(move || {
            let _ = canvas.release_pointer_capture(pointer_id);
        })
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

fn response_json(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| r#"{"repaint":true}"#.to_string())
}

fn ids_json(ids: &[DeskId]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

fn horizontal_name(side: HorizontalSide) -> &'static str {
    match side {
        HorizontalSide::Right => "right",
        HorizontalSide::Left => "left",
    }
}

fn vertical_name(side: VerticalSide) -> &'static str {
    match side {
        VerticalSide::Above => "above",
        VerticalSide::Below => "below",
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Desk Map WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn admin_canvas() -> DeskMapCanvas {
        let mut canvas = DeskMapCanvas::new();
        canvas.mount(0.0, 0.0, 1000.0, 1000.0);
        canvas.set_admin_mode(true);
        canvas
    }

    fn json(s: &str) -> serde_json::Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn reference_layout_loads() {
        let mut canvas = admin_canvas();
        assert_eq!(canvas.load_reference_layout(42), 78);
        let desks = json(&canvas.desks_json());
        assert_eq!(desks.as_array().map(Vec::len), Some(78));
        assert_eq!(desks[0]["id"], "MZ001");
    }

    #[test]
    fn checked_bulk_add_reports_errors() {
        let mut canvas = admin_canvas();
        let bad = json(&canvas.add_multiple_desks_checked("  ", "3"));
        assert_eq!(bad["ok"], false);
        let bad = json(&canvas.add_multiple_desks_checked("MZ", "zero"));
        assert_eq!(bad["ok"], false);

        let ok = json(&canvas.add_multiple_desks_checked(" MZ ", "2"));
        assert_eq!(ok["ok"], true);
        assert_eq!(ok["ids"], serde_json::json!(["MZ001", "MZ002"]));
    }

    #[test]
    fn drag_round_trip_through_bridge() {
        let mut canvas = admin_canvas();
        canvas.load_desks(r#"[{"id":"W1","label":"W1","xN":0.25,"yN":0.75}]"#);

        let down = json(&canvas.handle_pointer_down(250.0, 250.0, 1, false, false, false, false));
        assert_eq!(down["repaint"], true);
        assert_eq!(canvas.cursor(), "grabbing");

        let up = json(&canvas.handle_pointer_up(500.0, 500.0, 1, false, false, false, false));
        assert_eq!(up["committed"]["deskId"], "W1");
        assert_eq!(up["committed"]["xN"], 0.5);
        assert_eq!(canvas.cursor(), "grab");

        let updates = json(&canvas.take_sync_updates("2024-05-01T10:00:00Z"));
        assert_eq!(updates[0]["deskId"], "W1");
        assert_eq!(updates[0]["timestamp"], "2024-05-01T10:00:00Z");
        assert_eq!(canvas.take_sync_batch("later"), "null");
    }

    #[test]
    fn keys_take_modifiers_in_pointer_order() {
        let mut canvas = admin_canvas();
        canvas.load_desks(
            r#"[{"id":"K1","label":"K1","xN":0.25,"yN":0.75},
                {"id":"K2","label":"K2","xN":0.75,"yN":0.5}]"#,
        );
        // shift, ctrl, alt, meta
        canvas.handle_click(250.0, 250.0, true, true, false, false);
        canvas.handle_click(750.0, 500.0, true, true, false, false);
        assert_eq!(json(&canvas.selected_ids()), serde_json::json!(["K1", "K2"]));

        let aligned = json(&canvas.handle_key("Enter", true, false, false, false));
        assert_eq!(aligned["aligned"][1]["yN"], 0.75);
        assert_eq!(json(&canvas.selected_ids()), serde_json::json!([]));

        canvas.handle_click(250.0, 250.0, true, true, false, false);
        let cleared = json(&canvas.handle_key("Escape", false, false, false, false));
        assert_eq!(cleared["repaint"], true);
        assert_eq!(json(&canvas.selected_ids()), serde_json::json!([]));
    }

    #[test]
    fn invalid_image_aspect_is_refused() {
        let mut canvas = admin_canvas();
        assert!(canvas.set_image_aspect(1.5));
        assert!(!canvas.set_image_aspect(0.0));
        assert!(!canvas.set_image_aspect(f64::NAN));
    }

    #[test]
    fn sync_404_is_a_failure() {
        let mut canvas = admin_canvas();
        assert!(canvas.report_sync_result("W2", 200, "OK"));
        assert!(!canvas.report_sync_result("W3", 404, "Not Found"));
        canvas.report_sync_failure("W4", "offline");
        let failures = json(&canvas.sync_failures_json());
        let mut ids: Vec<&str> = failures
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["deskId"].as_str())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["W3", "W4"]);
    }

    #[test]
    fn tooltip_json_shape() {
        let mut canvas = admin_canvas();
        assert_eq!(canvas.tooltip_json(), "null");
        canvas.load_desks(r#"[{"id":"T1","label":"T1","xN":0.5,"yN":0.5,"occupied":true,"user":"Mike Chen","startTime":"08:30 AM","endTime":"04:30 PM"}]"#);
        canvas.handle_pointer_move(500.0, 500.0, false, false, false, false);
        let tip = json(&canvas.tooltip_json());
        assert_eq!(tip["label"], "T1");
        assert_eq!(tip["horizontal"], "right");
        assert_eq!(tip["vertical"], "above");
        assert_eq!(tip["lines"][0]["value"], "Occupied");
        assert_eq!(tip["lines"][2]["value"], "Mike Chen");
    }

    #[test]
    fn bad_config_is_rejected() {
        let mut canvas = DeskMapCanvas::new();
        assert_eq!(json(&canvas.set_config(r#"{"imageAspect":-1}"#))["ok"], false);
        assert_eq!(json(&canvas.set_config("not json"))["ok"], false);
        assert_eq!(json(&canvas.set_config(r#"{"singleAddPrefix":"HD"}"#))["ok"], true);
    }
}
