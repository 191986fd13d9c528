//! Desk mutations and the engine that applies them.
//!
//! Tools and commands never touch the desk list directly: they produce
//! `DeskMutation`s and the `DeskEngine` applies them. A mutation that targets
//! a missing desk is a no-op, not an error.

use dm_core::{Desk, DeskId, DeskSet, NormPos};

/// A single change to the desk list.
#[derive(Debug, Clone, PartialEq)]
pub enum DeskMutation {
    /// Append desks in order.
    AddDesks { desks: Vec<Desk> },
    /// Commit a dragged desk's new position.
    MoveDesk { id: DeskId, to: NormPos },
    /// Reposition several desks at once (alignment).
    MoveDesks { moves: Vec<(DeskId, NormPos)> },
    RemoveDesk { id: DeskId },
}

/// Owns the authoritative desk list.
#[derive(Debug, Clone, Default)]
pub struct DeskEngine {
    pub desks: DeskSet,
}

impl DeskEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_desks(desks: Vec<Desk>) -> Self {
        Self {
            desks: DeskSet::from(desks),
        }
    }

    /// Replace the whole desk list.
    pub fn load(&mut self, desks: Vec<Desk>) {
        log::info!("loaded {} desks", desks.len());
        self.desks = DeskSet::from(desks);
    }

    /// Apply a mutation. Returns `true` if the desk list changed.
    pub fn apply_mutation(&mut self, mutation: DeskMutation) -> bool {
        match mutation {
            DeskMutation::AddDesks { desks } => {
                if desks.is_empty() {
                    return false;
                }
                log::debug!("adding {} desk(s)", desks.len());
                self.desks.extend(desks);
                true
            }
            DeskMutation::MoveDesk { id, to } => {
                let mut moved = false;
                for desk in self.desks.iter_mut().filter(|d| d.id == id) {
                    desk.set_position(to);
                    moved = true;
                }
                if moved {
                    log::debug!("moved {id} to ({:.4}, {:.4})", to.x_n, to.y_n);
                }
                moved
            }
            DeskMutation::MoveDesks { moves } => {
                let mut moved = false;
                for desk in self.desks.iter_mut() {
                    if let Some((_, to)) = moves.iter().find(|(id, _)| *id == desk.id) {
                        desk.set_position(*to);
                        moved = true;
                    }
                }
                if moved {
                    log::debug!("repositioned {} desk(s)", moves.len());
                }
                moved
            }
            DeskMutation::RemoveDesk { id } => {
                let removed = self.desks.remove(id);
                if removed > 0 {
                    log::debug!("removed {id}");
                }
                removed > 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::Zone;

    fn desk(id: &str, x: f64, y: f64) -> Desk {
        Desk::new(DeskId::intern(id), NormPos::new(x, y), Zone::SouthZone)
    }

    #[test]
    fn move_updates_position() {
        let mut engine = DeskEngine::from_desks(vec![desk("e1", 0.1, 0.1)]);
        let id = DeskId::intern("e1");
        assert!(engine.apply_mutation(DeskMutation::MoveDesk {
            id,
            to: NormPos::new(0.3, 0.7),
        }));
        assert_eq!(engine.desks.get(id).unwrap().position(), NormPos::new(0.3, 0.7));
    }

    #[test]
    fn mutations_on_missing_desk_are_noops() {
        let mut engine = DeskEngine::from_desks(vec![desk("e2", 0.1, 0.1)]);
        let ghost = DeskId::intern("ghost");
        assert!(!engine.apply_mutation(DeskMutation::MoveDesk {
            id: ghost,
            to: NormPos::CENTER,
        }));
        assert!(!engine.apply_mutation(DeskMutation::RemoveDesk { id: ghost }));
        assert_eq!(engine.desks.len(), 1);
    }

    #[test]
    fn add_empty_batch_is_noop() {
        let mut engine = DeskEngine::new();
        assert!(!engine.apply_mutation(DeskMutation::AddDesks { desks: vec![] }));
    }

    #[test]
    fn batch_move_only_touches_listed_desks() {
        let mut engine =
            DeskEngine::from_desks(vec![desk("b1", 0.1, 0.1), desk("b2", 0.2, 0.2), desk("b3", 0.3, 0.3)]);
        engine.apply_mutation(DeskMutation::MoveDesks {
            moves: vec![
                (DeskId::intern("b1"), NormPos::new(0.1, 0.9)),
                (DeskId::intern("b3"), NormPos::new(0.3, 0.9)),
            ],
        });
        let ys: Vec<f64> = engine.desks.iter().map(|d| d.y_n).collect();
        assert_eq!(ys, vec![0.9, 0.2, 0.9]);
    }
}
