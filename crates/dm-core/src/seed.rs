//! Reference floor layout (`MZ001`..`MZ078`).
//!
//! Hand-placed coordinates for the reference floor plan: two wings of 21
//! desks each and 36 desks across the center and south area. Occupancy is
//! random (75%) with a sample occupant and schedule, so demos and tests can
//! seed a populated map deterministically from an RNG seed.

use crate::id::DeskId;
use crate::model::{Desk, NormPos, Zone};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Probability that a generated desk is occupied.
const OCCUPANCY_RATE: f64 = 0.75;

const SAMPLE_OCCUPANTS: &[(&str, &str, &str)] = &[
    ("Sarah Johnson", "09:00 AM", "05:00 PM"),
    ("Michael Chen", "08:30 AM", "04:30 PM"),
    ("Emily Rodriguez", "10:00 AM", "06:00 PM"),
    ("David Williams", "09:30 AM", "05:30 PM"),
    ("Lisa Anderson", "08:00 AM", "04:00 PM"),
    ("James Martinez", "09:00 AM", "05:00 PM"),
    ("Jennifer Lee", "10:30 AM", "06:30 PM"),
    ("Robert Taylor", "09:00 AM", "05:00 PM"),
    ("Maria Garcia", "08:30 AM", "04:30 PM"),
    ("Christopher Brown", "09:00 AM", "05:00 PM"),
];

use crate::model::Zone::{LeftWing as L, RightWing as R, SouthZone as S};

/// `(xN, yN, zone)` for desks 1..=78, in id order.
#[rustfmt::skip]
const REFERENCE_POSITIONS: [(f64, f64, Zone); 78] = [
    // Left wing top
    (0.10, 0.12, L), (0.14, 0.12, L), (0.18, 0.12, L),
    (0.10, 0.18, L), (0.14, 0.18, L), (0.18, 0.18, L),
    // Left wing mid
    (0.10, 0.28, L), (0.14, 0.28, L), (0.18, 0.28, L),
    (0.10, 0.34, L), (0.14, 0.34, L), (0.18, 0.34, L),
    // Left wing lower-mid
    (0.10, 0.42, L), (0.14, 0.42, L), (0.18, 0.42, L),
    (0.12, 0.48, L), (0.16, 0.48, L),
    // Left wing south
    (0.08, 0.58, L), (0.13, 0.58, L), (0.08, 0.64, L), (0.13, 0.64, L),
    // Right wing top
    (0.82, 0.12, R), (0.86, 0.12, R), (0.90, 0.12, R),
    (0.82, 0.18, R), (0.86, 0.18, R), (0.90, 0.18, R),
    // Right wing mid
    (0.82, 0.28, R), (0.86, 0.28, R), (0.90, 0.28, R),
    (0.82, 0.34, R), (0.86, 0.34, R), (0.90, 0.34, R),
    // Right wing lower-mid
    (0.82, 0.42, R), (0.86, 0.42, R), (0.90, 0.42, R),
    (0.84, 0.48, R), (0.88, 0.48, R),
    // Right wing south
    (0.87, 0.58, R), (0.92, 0.58, R), (0.87, 0.64, R), (0.92, 0.64, R),
    // Center top
    (0.35, 0.14, S), (0.42, 0.14, S), (0.49, 0.14, S), (0.56, 0.14, S),
    (0.35, 0.20, S), (0.42, 0.20, S), (0.49, 0.20, S), (0.56, 0.20, S),
    // Center middle
    (0.35, 0.38, S), (0.42, 0.38, S), (0.49, 0.38, S), (0.56, 0.38, S),
    (0.35, 0.44, S), (0.42, 0.44, S), (0.49, 0.44, S), (0.56, 0.44, S),
    // South row 1
    (0.22, 0.56, S), (0.32, 0.56, S), (0.42, 0.56, S), (0.52, 0.56, S),
    (0.62, 0.56, S), (0.72, 0.56, S), (0.78, 0.56, S), (0.65, 0.62, S),
    // South row 2
    (0.22, 0.72, S), (0.32, 0.72, S), (0.42, 0.72, S), (0.52, 0.72, S),
    (0.62, 0.72, S), (0.72, 0.72, S), (0.78, 0.78, S), (0.65, 0.80, S),
    // South row 3
    (0.35, 0.88, S), (0.45, 0.88, S), (0.55, 0.88, S), (0.65, 0.88, S),
];

/// Generate the 78-desk reference layout, drawing occupancy from `rng`.
pub fn reference_layout<R: Rng + ?Sized>(rng: &mut R) -> Vec<Desk> {
    REFERENCE_POSITIONS
        .iter()
        .enumerate()
        .map(|(i, &(x, y, zone))| {
            let pos = NormPos::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
            let mut desk = Desk::new(DeskId::sequential("MZ", i + 1), pos, zone);
            if rng.gen_bool(OCCUPANCY_RATE) {
                let (user, start, end) = SAMPLE_OCCUPANTS[rng.gen_range(0..SAMPLE_OCCUPANTS.len())];
                desk.occupy(user, start, end);
            }
            desk
        })
        .collect()
}

/// Reference layout with a deterministic occupancy pattern for `seed`.
pub fn reference_layout_seeded(seed: u64) -> Vec<Desk> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let desks = reference_layout(&mut rng);
    log::debug!(
        "generated reference layout: {} desks, {} occupied (seed {seed})",
        desks.len(),
        desks.iter().filter(|d| d.occupied).count()
    );
    desks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_78_sequential_desks() {
        let desks = reference_layout_seeded(7);
        assert_eq!(desks.len(), 78);
        assert_eq!(desks[0].id.as_str(), "MZ001");
        assert_eq!(desks[77].id.as_str(), "MZ078");
        assert!(desks.iter().all(|d| d.position().is_on_map()));
    }

    #[test]
    fn zone_counts_match_floor_plan() {
        let desks = reference_layout_seeded(1);
        let count = |z: Zone| desks.iter().filter(|d| d.zone == z).count();
        assert_eq!(count(Zone::LeftWing), 21);
        assert_eq!(count(Zone::RightWing), 21);
        assert_eq!(count(Zone::SouthZone), 36);
    }

    #[test]
    fn same_seed_same_occupancy() {
        let a = reference_layout_seeded(42);
        let b = reference_layout_seeded(42);
        assert_eq!(a, b);
    }

    #[test]
    fn occupied_desks_carry_a_schedule() {
        for desk in reference_layout_seeded(3) {
            if desk.occupied {
                assert!(desk.user.is_some());
                assert!(desk.start_time.is_some() && desk.end_time.is_some());
            } else {
                assert!(desk.user.is_none());
            }
        }
    }
}
