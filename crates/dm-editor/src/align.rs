//! Row alignment for multi-selected desks.
//!
//! Selected desks are laid out on one horizontal row: the row takes the
//! `yN` of the leftmost desk, and `xN` values are spread evenly between the
//! leftmost and rightmost desk.

use dm_core::{DeskId, DeskSet, NormPos};

/// Compute aligned positions for the `selected` desks.
///
/// Only ids present in `desks` take part. Returns `None` when fewer than two
/// remain. Result order is ascending by original `xN` (stable for ties).
pub fn align_row(desks: &DeskSet, selected: &[DeskId]) -> Option<Vec<(DeskId, NormPos)>> {
    let mut row: Vec<(DeskId, NormPos)> = desks
        .iter()
        .filter(|d| selected.contains(&d.id))
        .map(|d| (d.id, d.position()))
        .collect();
    if row.len() < 2 {
        return None;
    }

    row.sort_by(|a, b| a.1.x_n.total_cmp(&b.1.x_n));

    let target_y = row[0].1.y_n;
    let min_x = row[0].1.x_n;
    let max_x = row[row.len() - 1].1.x_n;
    let spacing = (max_x - min_x) / (row.len() - 1) as f64;

    Some(
        row.into_iter()
            .enumerate()
            .map(|(i, (id, _))| (id, NormPos::new(min_x + spacing * i as f64, target_y)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::{Desk, Zone};

    fn desk(id: &str, x: f64, y: f64) -> Desk {
        Desk::new(DeskId::intern(id), NormPos::new(x, y), Zone::SouthZone)
    }

    #[test]
    fn spreads_evenly_between_extremes() {
        let desks = DeskSet::from(vec![
            desk("r1", 0.8, 0.3),
            desk("r2", 0.2, 0.6),
            desk("r3", 0.3, 0.1),
            desk("r4", 0.35, 0.9),
        ]);
        let ids: Vec<DeskId> = desks.ids().collect();
        let aligned = align_row(&desks, &ids).unwrap();

        let order: Vec<&str> = aligned.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["r2", "r3", "r4", "r1"]);

        let expected_x = [0.2, 0.4, 0.6, 0.8];
        for ((_, pos), x) in aligned.iter().zip(expected_x) {
            assert!((pos.x_n - x).abs() < 1e-12, "{} vs {x}", pos.x_n);
            assert_eq!(pos.y_n, 0.6);
        }
    }

    #[test]
    fn single_or_missing_selection_is_noop() {
        let desks = DeskSet::from(vec![desk("s1", 0.1, 0.1), desk("s2", 0.2, 0.2)]);
        assert!(align_row(&desks, &[DeskId::intern("s1")]).is_none());
        assert!(align_row(&desks, &[DeskId::intern("s1"), DeskId::intern("gone")]).is_none());
        assert!(align_row(&desks, &[]).is_none());
    }

    #[test]
    fn unselected_desks_are_ignored() {
        let desks = DeskSet::from(vec![desk("u1", 0.1, 0.5), desk("u2", 0.5, 0.1), desk("u3", 0.9, 0.9)]);
        let aligned = align_row(&desks, &[DeskId::intern("u1"), DeskId::intern("u3")]).unwrap();
        assert_eq!(aligned.len(), 2);
        assert!(aligned.iter().all(|(id, _)| id.as_str() != "u2"));
    }
}
