//! Integration tests: adding and deleting desks through the command handle.

use dm_core::{Desk, DeskId, NormPos, Rect, Zone, reference_layout_seeded};
use dm_editor::{
    BulkAddRequest, CommandQueue, DeskCommand, DeskCommands, DeskMap, InputEvent, Modifiers,
};
use pretty_assertions::assert_eq;

fn desk(id: &str, x: f64, y: f64) -> Desk {
    Desk::new(DeskId::intern(id), NormPos::new(x, y), Zone::LeftWing)
}

fn admin_map(desks: Vec<Desk>) -> DeskMap {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut map = DeskMap::default();
    map.mount(Rect::new(0.0, 0.0, 1000.0, 1000.0));
    map.load_desks(desks);
    map.set_admin_mode(true);
    map
}

fn ids(map: &DeskMap) -> Vec<String> {
    map.desks().iter().map(|d| d.id.to_string()).collect()
}

// ─── Add ─────────────────────────────────────────────────────────────────

#[test]
fn bulk_add_continues_numbering() {
    let mut map = admin_map(vec![desk("a", 0.1, 0.1), desk("b", 0.2, 0.2)]);
    let created = map.add_multiple_desks("MZ", 5);
    assert_eq!(created.len(), 5);
    assert_eq!(
        ids(&map),
        vec!["a", "b", "MZ003", "MZ004", "MZ005", "MZ006", "MZ007"]
    );
    for d in map.desks().iter().skip(2) {
        assert_eq!(d.position(), NormPos::CENTER);
        assert_eq!(d.zone, Zone::SouthZone);
        assert!(!d.occupied);
        assert_eq!(d.label, d.id.as_str());
    }
}

#[test]
fn single_add_uses_desk_prefix() {
    let mut map = admin_map(vec![desk("x", 0.1, 0.1)]);
    assert_eq!(map.add_desk(), Some(DeskId::intern("DESK002")));
    assert_eq!(map.add_desk(), Some(DeskId::intern("DESK003")));
    assert_eq!(map.desks().len(), 3);
}

#[test]
fn adds_are_inert_outside_admin() {
    let mut map = admin_map(vec![]);
    map.set_admin_mode(false);
    assert_eq!(map.add_desk(), None);
    assert!(map.add_multiple_desks("MZ", 3).is_empty());
    assert!(map.desks().is_empty());
}

#[test]
fn zero_count_adds_nothing() {
    let mut map = admin_map(vec![]);
    assert!(map.add_multiple_desks("MZ", 0).is_empty());
    assert!(map.desks().is_empty());
}

#[test]
fn queued_commands_apply_in_order() {
    let mut map = admin_map(reference_layout_seeded(7).as_slice().to_vec());
    assert_eq!(map.desks().len(), 78);

    let mut queue = CommandQueue::new();
    queue.push(DeskCommand::AddDesk);
    queue.push(BulkAddRequest::parse(" MZ ", "2").unwrap().into_command());
    let created = queue.apply_to(&mut map);

    let names: Vec<&str> = created.iter().map(|id| id.as_str()).collect();
    assert_eq!(names, vec!["DESK079", "MZ080", "MZ081"]);
}

// ─── Delete ──────────────────────────────────────────────────────────────

#[test]
fn confirmed_delete_removes_desk_and_clears_hover() {
    let mut map = admin_map(vec![
        desk("d1", 0.2, 0.2),
        desk("d2", 0.5, 0.5),
        desk("d3", 0.8, 0.8),
    ]);
    let d3 = DeskId::intern("d3");

    // Hover d3, then select it
    map.handle(InputEvent::pointer_move(800.0, 200.0, Modifiers::NONE));
    assert_eq!(map.hovered(), Some(d3));
    map.handle(InputEvent::click(800.0, 200.0, Modifiers::MULTI_SELECT));
    assert!(map.is_selected(d3));

    let request = map.request_delete(d3).unwrap();
    assert_eq!(request.label, "d3");
    assert_eq!(map.confirm_delete(), Some(d3));

    assert_eq!(ids(&map), vec!["d1", "d2"]);
    assert_eq!(map.hovered(), None);
    assert!(map.selection().is_empty());
}

#[test]
fn cancelled_delete_keeps_desk() {
    let mut map = admin_map(vec![desk("k1", 0.2, 0.2)]);
    map.request_delete(DeskId::intern("k1"));
    assert!(map.cancel_delete());
    assert_eq!(map.confirm_delete(), None);
    assert_eq!(map.desks().len(), 1);
}

#[test]
fn leaving_admin_drops_pending_delete() {
    let mut map = admin_map(vec![desk("p1", 0.2, 0.2)]);
    map.request_delete(DeskId::intern("p1"));
    map.set_admin_mode(false);
    assert!(map.pending_delete().is_none());
    assert_eq!(map.confirm_delete(), None);
    assert_eq!(map.request_delete(DeskId::intern("p1")), None);
}

#[test]
fn deleting_dragged_desk_ends_drag() {
    let mut map = admin_map(vec![desk("g1", 0.5, 0.5)]);
    let id = DeskId::intern("g1");
    map.handle(InputEvent::pointer_down(500.0, 500.0, 1, Modifiers::NONE));
    assert_eq!(map.dragged(), Some(id));
    map.request_delete(id);
    assert_eq!(map.confirm_delete(), Some(id));
    assert_eq!(map.dragged(), None);
    let r = map.handle(InputEvent::pointer_up(600.0, 600.0, 1, Modifiers::NONE));
    assert_eq!(r.committed, None);
}
