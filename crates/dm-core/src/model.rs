//! Core desk data model.
//!
//! A floor map is an ordered list of `Desk` records placed over a background
//! floor-plan image. Positions are stored in normalized image space
//! (`NormPos`), so they survive any container resize. The list order is also
//! the paint order: later desks draw on top and win hit tests.

use crate::id::DeskId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

// ─── Positions ───────────────────────────────────────────────────────────

/// Position normalized to the background image.
///
/// `x_n = 0` is the left edge and `x_n = 1` the right edge. `y_n` is inverted
/// relative to screen space: `y_n = 1` is the visual top, `y_n = 0` the
/// bottom. Values are never clamped, so desks may sit outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPos {
    #[serde(rename = "xN")]
    pub x_n: f64,
    #[serde(rename = "yN")]
    pub y_n: f64,
}

impl NormPos {
    /// The default placement for newly created desks.
    pub const CENTER: NormPos = NormPos { x_n: 0.5, y_n: 0.5 };

    pub const fn new(x_n: f64, y_n: f64) -> Self {
        Self { x_n, y_n }
    }

    /// View-box point: same `x`, `y` flipped so it grows downward.
    pub fn to_view(self) -> Point {
        Point::new(self.x_n, 1.0 - self.y_n)
    }

    pub fn from_view(p: Point) -> Self {
        Self::new(p.x, 1.0 - p.y)
    }

    /// Whether both coordinates lie inside the visible image.
    pub fn is_on_map(&self) -> bool {
        (0.0..=1.0).contains(&self.x_n) && (0.0..=1.0).contains(&self.y_n)
    }
}

impl Default for NormPos {
    fn default() -> Self {
        Self::CENTER
    }
}

// ─── Zones ───────────────────────────────────────────────────────────────

/// Display category for a desk. Labeling only; not checked against position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "Left Wing")]
    LeftWing,
    #[serde(rename = "Right Wing")]
    RightWing,
    #[default]
    #[serde(rename = "South Zone")]
    SouthZone,
}

impl Zone {
    pub fn label(self) -> &'static str {
        match self {
            Zone::LeftWing => "Left Wing",
            Zone::RightWing => "Right Wing",
            Zone::SouthZone => "South Zone",
        }
    }
}

// ─── Desks ───────────────────────────────────────────────────────────────

/// A desk and its placement on the floor map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desk {
    pub id: DeskId,
    pub label: String,
    #[serde(rename = "xN")]
    pub x_n: f64,
    #[serde(rename = "yN")]
    pub y_n: f64,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub zone: Zone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl Desk {
    /// A vacant desk whose label mirrors its id.
    pub fn new(id: DeskId, pos: NormPos, zone: Zone) -> Self {
        Self {
            id,
            label: id.as_str().to_string(),
            x_n: pos.x_n,
            y_n: pos.y_n,
            occupied: false,
            zone,
            user: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn position(&self) -> NormPos {
        NormPos::new(self.x_n, self.y_n)
    }

    pub fn set_position(&mut self, pos: NormPos) {
        self.x_n = pos.x_n;
        self.y_n = pos.y_n;
    }

    /// Mark the desk as taken by `user` for the given schedule.
    pub fn occupy(&mut self, user: &str, start_time: &str, end_time: &str) {
        self.occupied = true;
        self.user = Some(user.to_string());
        self.start_time = Some(start_time.to_string());
        self.end_time = Some(end_time.to_string());
    }
}

// ─── Desk Set ────────────────────────────────────────────────────────────

/// Ordered collection of desks owned by one floor map.
///
/// IDs are caller-assigned and never deduplicated; lookups return the first
/// desk with a matching id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeskSet {
    desks: Vec<Desk>,
}

impl DeskSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.desks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.desks.is_empty()
    }

    /// Next number in the id sequence (`len + 1`).
    pub fn next_sequence(&self) -> usize {
        self.desks.len() + 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Desk> {
        self.desks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Desk> {
        self.desks.iter_mut()
    }

    pub fn as_slice(&self) -> &[Desk] {
        &self.desks
    }

    pub fn get(&self, id: DeskId) -> Option<&Desk> {
        self.desks.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DeskId) -> Option<&mut Desk> {
        self.desks.iter_mut().find(|d| d.id == id)
    }

    pub fn contains(&self, id: DeskId) -> bool {
        self.get(id).is_some()
    }

    pub fn push(&mut self, desk: Desk) {
        self.desks.push(desk);
    }

    pub fn extend(&mut self, desks: impl IntoIterator<Item = Desk>) {
        self.desks.extend(desks);
    }

    /// Remove every desk with the given id. Returns how many were removed.
    pub fn remove(&mut self, id: DeskId) -> usize {
        let before = self.desks.len();
        self.desks.retain(|d| d.id != id);
        before - self.desks.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = DeskId> + '_ {
        self.desks.iter().map(|d| d.id)
    }
}

impl From<Vec<Desk>> for DeskSet {
    fn from(desks: Vec<Desk>) -> Self {
        Self { desks }
    }
}

impl<'a> IntoIterator for &'a DeskSet {
    type Item = &'a Desk;
    type IntoIter = std::slice::Iter<'a, Desk>;

    fn into_iter(self) -> Self::IntoIter {
        self.desks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn desk_json_uses_wire_names() {
        let mut desk = Desk::new(DeskId::intern("MZ010"), NormPos::new(0.1, 0.34), Zone::LeftWing);
        desk.occupy("Sarah Johnson", "09:00 AM", "05:00 PM");

        let json = serde_json::to_value(&desk).unwrap();
        assert_eq!(json["id"], "MZ010");
        assert_eq!(json["label"], "MZ010");
        assert_eq!(json["xN"], 0.1);
        assert_eq!(json["yN"], 0.34);
        assert_eq!(json["zone"], "Left Wing");
        assert_eq!(json["user"], "Sarah Johnson");
        assert_eq!(json["startTime"], "09:00 AM");
        assert_eq!(json["endTime"], "05:00 PM");
    }

    #[test]
    fn desk_json_defaults_optional_fields() {
        let desk: Desk =
            serde_json::from_str(r#"{"id":"A001","label":"A001","xN":0.2,"yN":0.8}"#).unwrap();
        assert!(!desk.occupied);
        assert_eq!(desk.zone, Zone::SouthZone);
        assert_eq!(desk.user, None);
        assert_eq!(desk.position(), NormPos::new(0.2, 0.8));
    }

    #[test]
    fn view_point_flips_y() {
        let p = NormPos::new(0.25, 0.9).to_view();
        assert!((p.x - 0.25).abs() < 1e-12);
        assert!((p.y - 0.1).abs() < 1e-12);
        let back = NormPos::from_view(p);
        assert!((back.y_n - 0.9).abs() < 1e-12);
    }

    #[test]
    fn desk_set_keeps_duplicates_and_order() {
        let id = DeskId::intern("DUP001");
        let mut set = DeskSet::new();
        set.push(Desk::new(id, NormPos::new(0.1, 0.1), Zone::SouthZone));
        set.push(Desk::new(id, NormPos::new(0.9, 0.9), Zone::SouthZone));
        assert_eq!(set.len(), 2);
        assert_eq!(set.next_sequence(), 3);
        // First match wins
        assert_eq!(set.get(id).map(|d| d.x_n), Some(0.1));
        assert_eq!(set.remove(id), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn off_map_positions_are_representable() {
        let pos = NormPos::new(-0.2, 1.3);
        assert!(!pos.is_on_map());
        assert!(NormPos::CENTER.is_on_map());
    }
}
