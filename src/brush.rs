//! Brush geometry and drag-direction inference.
//!
//! All functions in this module are free of ECS dependencies and operate on
//! plain [`hexx::Hex`] coordinates, making them straightforward to unit-test.

use hexx::Hex;

/// The six edge directions of a pointy-top hex cell, in canonical order.
///
/// East/west neighbors sit on the same axial row; the other four step between
/// rows. `roads` arrays in cell state are indexed by `direction as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexDirection {
    /// North-east, axial offset `(1, -1)`.
    NE,
    /// East, axial offset `(1, 0)`.
    E,
    /// South-east, axial offset `(0, 1)`.
    SE,
    /// South-west, axial offset `(-1, 1)`.
    SW,
    /// West, axial offset `(-1, 0)`.
    W,
    /// North-west, axial offset `(0, -1)`.
    NW,
}

impl HexDirection {
    /// All six directions in enumeration order.
    pub const ALL: [Self; 6] = [
        Self::NE,
        Self::E,
        Self::SE,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Axial unit offset of this direction.
    pub const fn offset(self) -> Hex {
        match self {
            Self::NE => Hex::new(1, -1),
            Self::E => Hex::new(1, 0),
            Self::SE => Hex::new(0, 1),
            Self::SW => Hex::new(-1, 1),
            Self::W => Hex::new(-1, 0),
            Self::NW => Hex::new(0, -1),
        }
    }

    /// The inverse direction. An involution: `d.opposite().opposite() == d`.
    pub const fn opposite(self) -> Self {
        match self {
            Self::NE => Self::SW,
            Self::E => Self::W,
            Self::SE => Self::NW,
            Self::SW => Self::NE,
            Self::W => Self::E,
            Self::NW => Self::SE,
        }
    }

    /// The coordinate one step from `of` in this direction.
    pub const fn neighbor(self, of: Hex) -> Hex {
        of.const_add(self.offset())
    }
}

/// Enumerates the brush footprint of `radius` around `center`.
///
/// Row-major over axial rows in two half-passes: the top half down to and
/// including the center row, then the bottom half. The result is the full
/// axial disk — `3r² + 3r + 1` coordinates, all within `radius` steps of
/// `center` — so radius 0 yields exactly the center. Coordinates that fall
/// outside the grid are filtered out by the caller's cell lookup, not here.
pub fn brush_footprint(center: Hex, radius: u32) -> impl Iterator<Item = Hex> {
    let radius = radius as i32;
    let top = (0..=radius).flat_map(move |row| {
        let y = center.y - radius + row;
        (center.x - row..=center.x + radius).map(move |x| Hex::new(x, y))
    });
    let bottom = (0..radius).flat_map(move |row| {
        let y = center.y + radius - row;
        (center.x - radius..=center.x + row).map(move |x| Hex::new(x, y))
    });
    top.chain(bottom)
}

/// Resolves which direction connects `previous` to `current`, if any.
///
/// Checks the six directions in enumeration order and returns the first
/// match; the offsets are pairwise distinct, so the first match is the only
/// one. `None` means the two cells are not adjacent (including
/// `previous == current`) and no drag is active.
pub fn drag_direction(previous: Hex, current: Hex) -> Option<HexDirection> {
    HexDirection::ALL
        .into_iter()
        .find(|d| d.neighbor(previous) == current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::platform::collections::HashSet;
    use hexx::shapes;

    // ── HexDirection ────────────────────────────────────────────────

    #[test]
    fn opposite_is_an_involution() {
        for d in HexDirection::ALL {
            assert_eq!(d.opposite().opposite(), d, "{d:?}");
        }
    }

    #[test]
    fn opposite_offsets_cancel() {
        for d in HexDirection::ALL {
            assert_eq!(
                d.offset().const_add(d.opposite().offset()),
                Hex::ZERO,
                "{d:?}"
            );
        }
    }

    #[test]
    fn offsets_are_pairwise_distinct() {
        let unique: HashSet<Hex> = HexDirection::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn offsets_cover_the_unit_ring() {
        let ring: HashSet<Hex> = Hex::ZERO.ring(1).collect();
        let offsets: HashSet<Hex> = HexDirection::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(offsets, ring);
    }

    // ── brush_footprint ─────────────────────────────────────────────

    #[test]
    fn radius_zero_is_just_the_center() {
        let center = Hex::new(3, -2);
        let cells: Vec<Hex> = brush_footprint(center, 0).collect();
        assert_eq!(cells, vec![center]);
    }

    #[test]
    fn footprint_size_matches_hex_disk_cardinality() {
        for r in 0..=4u32 {
            let count = brush_footprint(Hex::ZERO, r).count();
            let expected = (3 * r * r + 3 * r + 1) as usize;
            assert_eq!(count, expected, "radius {r}");
        }
    }

    #[test]
    fn every_member_is_within_radius_of_center() {
        let center = Hex::new(-4, 7);
        for r in 0..=3u32 {
            for hex in brush_footprint(center, r) {
                assert!(
                    center.unsigned_distance_to(hex) <= r,
                    "{hex:?} outside radius {r}"
                );
            }
        }
    }

    #[test]
    fn footprint_matches_hexx_hexagon_shape() {
        for r in 0..=3u32 {
            let ours: HashSet<Hex> = brush_footprint(Hex::new(2, 2), r).collect();
            let theirs: HashSet<Hex> = shapes::hexagon(Hex::new(2, 2), r).collect();
            assert_eq!(ours, theirs, "radius {r}");
        }
    }

    #[test]
    fn radius_one_is_the_neighbor_set_plus_center() {
        let cells: HashSet<Hex> = brush_footprint(Hex::ZERO, 1).collect();
        let mut expected: HashSet<Hex> =
            HexDirection::ALL.iter().map(|d| d.offset()).collect();
        expected.insert(Hex::ZERO);
        assert_eq!(cells.len(), 7);
        assert_eq!(cells, expected);
    }

    #[test]
    fn footprint_is_restartable() {
        let first: Vec<Hex> = brush_footprint(Hex::ZERO, 2).collect();
        let second: Vec<Hex> = brush_footprint(Hex::ZERO, 2).collect();
        assert_eq!(first, second);
    }

    // ── drag_direction ──────────────────────────────────────────────

    #[test]
    fn neighbor_round_trips_through_every_direction() {
        let p = Hex::new(2, 2);
        for d in HexDirection::ALL {
            assert_eq!(drag_direction(p, d.neighbor(p)), Some(d));
        }
    }

    #[test]
    fn same_cell_is_not_a_drag() {
        let p = Hex::new(1, -3);
        assert_eq!(drag_direction(p, p), None);
    }

    #[test]
    fn two_steps_away_is_not_a_drag() {
        let p = Hex::ZERO;
        for d in HexDirection::ALL {
            let two_out = d.neighbor(d.neighbor(p));
            assert_eq!(drag_direction(p, two_out), None, "{d:?}");
        }
    }
}
