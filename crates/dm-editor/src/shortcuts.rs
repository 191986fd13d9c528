//! Keyboard shortcut mapping.
//!
//! Maps `KeyboardEvent.key` values to editor actions. Both bindings are
//! admin-only; the map itself does not check the mode.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Lay the selected desks out on one row.
    AlignSelected,
    ClearSelection,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a `KeyboardEvent.key` to an action. Held modifiers do not
    /// change the binding.
    pub fn resolve(key: &str) -> Option<ShortcutAction> {
        match key {
            "Enter" => Some(ShortcutAction::AlignSelected),
            "Escape" => Some(ShortcutAction::ClearSelection),
            _ => None,
        }
    }
}
