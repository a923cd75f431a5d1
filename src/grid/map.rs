use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::{Hex, HexLayout, HexOrientation, shapes};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::MapSettings;
use super::cell::HexCell;
use crate::brush::HexDirection;
use crate::math;

/// Encapsulates the hex layout and the editable cell storage.
///
/// Single-cell attributes are mutated through [`get_mut`](Self::get_mut);
/// everything that spans two cells — rivers, roads, and the elevation rules
/// that constrain them — goes through the methods here so both endpoints stay
/// consistent.
pub struct CellMap {
    layout: HexLayout,
    corner_offsets: [Vec2; 6],
    cells: HashMap<Hex, HexCell>,
}

impl CellMap {
    /// Builds a hexagon of `map_radius` rings around the origin, sampling
    /// noise for initial elevations and deriving colors from the elevation
    /// band.
    pub fn from_settings(s: &MapSettings, palette_len: usize) -> Self {
        let layout = HexLayout {
            orientation: HexOrientation::Pointy,
            scale: Vec2::splat(s.cell_spacing),
            ..default()
        };
        let corner_slice = layout.center_aligned_hex_corners();
        let corner_offsets: [Vec2; 6] = std::array::from_fn(|i| corner_slice[i]);

        let elevation_fbm: Fbm<Perlin> = Fbm::new(s.seed).set_octaves(s.noise_octaves);

        let mut cells = HashMap::new();
        for hex in shapes::hexagon(Hex::ZERO, s.map_radius) {
            let pos = layout.hex_to_world_pos(hex);
            let noise_val = elevation_fbm.get([
                pos.x as f64 / s.noise_scale,
                pos.y as f64 / s.noise_scale,
            ]);
            let elevation =
                math::map_noise_to_range(noise_val, 0.0, s.max_elevation as f32).round() as i32;
            cells.insert(
                hex,
                HexCell {
                    elevation,
                    color_index: initial_color_index(elevation, s.max_elevation, palette_len),
                    ..HexCell::default()
                },
            );
        }

        Self {
            layout,
            corner_offsets,
            cells,
        }
    }

    /// Minimal constructor for tests: a flat hexagon of default cells.
    #[cfg(test)]
    pub fn flat(radius: u32, spacing: f32) -> Self {
        let layout = HexLayout {
            orientation: HexOrientation::Pointy,
            scale: Vec2::splat(spacing),
            ..default()
        };
        let corner_slice = layout.center_aligned_hex_corners();
        let corner_offsets: [Vec2; 6] = std::array::from_fn(|i| corner_slice[i]);

        let mut cells = HashMap::new();
        for hex in shapes::hexagon(Hex::ZERO, radius) {
            cells.insert(hex, HexCell::default());
        }

        Self {
            layout,
            corner_offsets,
            cells,
        }
    }

    // ── Coordinate conversion ──────────────────────────────────────

    /// World-space 2D position of a hex center (delegates to inner HexLayout).
    pub fn hex_to_world_pos(&self, hex: Hex) -> Vec2 {
        self.layout.hex_to_world_pos(hex)
    }

    /// Hex coordinate from a world-space 2D position (delegates to inner HexLayout).
    pub fn world_pos_to_hex(&self, pos: Vec2) -> Hex {
        self.layout.world_pos_to_hex(pos)
    }

    /// Corner offsets of a cell relative to its center, at layout scale.
    pub fn corner_offsets(&self) -> &[Vec2; 6] {
        &self.corner_offsets
    }

    // ── Cell access ────────────────────────────────────────────────

    /// Whether this hex exists in the grid.
    pub fn contains(&self, hex: Hex) -> bool {
        self.cells.contains_key(&hex)
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Read access to a cell.
    pub fn get(&self, hex: Hex) -> Option<&HexCell> {
        self.cells.get(&hex)
    }

    /// Write access to a cell's topology-neutral attributes (color, water,
    /// densities, wall flag). Elevation and river/road edits go through the
    /// dedicated methods below.
    pub fn get_mut(&mut self, hex: Hex) -> Option<&mut HexCell> {
        self.cells.get_mut(&hex)
    }

    /// Iterates all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Hex, &HexCell)> {
        self.cells.iter().map(|(&hex, cell)| (hex, cell))
    }

    /// The neighboring coordinate in `direction`, if that cell exists.
    pub fn neighbor(&self, hex: Hex, direction: HexDirection) -> Option<Hex> {
        let neighbor = direction.neighbor(hex);
        self.cells.contains_key(&neighbor).then_some(neighbor)
    }

    // ── Elevation ──────────────────────────────────────────────────

    /// Sets a cell's elevation and re-validates incident rivers and roads.
    ///
    /// Rivers must keep flowing level or downhill; roads cannot span an
    /// elevation difference greater than one step.
    pub fn set_elevation(&mut self, hex: Hex, elevation: i32) {
        let Some(cell) = self.cells.get_mut(&hex) else {
            return;
        };
        if cell.elevation == elevation {
            return;
        }
        cell.elevation = elevation;

        let outgoing = self.cells[&hex].outgoing_river;
        if let Some(direction) = outgoing
            && let Some(neighbor) = self.neighbor(hex, direction)
            && self.cells[&neighbor].elevation > elevation
        {
            self.remove_outgoing_river(hex);
        }
        let incoming = self.cells[&hex].incoming_river;
        if let Some(direction) = incoming
            && let Some(neighbor) = self.neighbor(hex, direction)
            && self.cells[&neighbor].elevation < elevation
        {
            self.remove_incoming_river(hex);
        }

        for direction in HexDirection::ALL {
            if self.cells[&hex].has_road(direction)
                && let Some(neighbor) = self.neighbor(hex, direction)
                && (self.cells[&neighbor].elevation - elevation).abs() > 1
            {
                self.remove_road_edge(hex, direction);
            }
        }
    }

    // ── Rivers ─────────────────────────────────────────────────────

    /// Starts (or redirects) a river flowing out of `hex` in `direction`.
    ///
    /// Requires the target cell to exist and to not be uphill. Any previous
    /// outgoing river is removed first, a reversed incoming river on the same
    /// edge is cleared, a road on the claimed edge is washed out, and the
    /// neighbor's previous incoming river (from whichever source) is
    /// displaced before its incoming end is pointed back at `hex`.
    pub fn set_outgoing_river(&mut self, hex: Hex, direction: HexDirection) {
        let Some(cell) = self.cells.get(&hex) else {
            return;
        };
        if cell.outgoing_river == Some(direction) {
            return;
        }
        let (elevation, incoming) = (cell.elevation, cell.incoming_river);
        let Some(neighbor) = self.neighbor(hex, direction) else {
            return;
        };
        if self.cells[&neighbor].elevation > elevation {
            return;
        }

        self.remove_outgoing_river(hex);
        if incoming == Some(direction) {
            self.remove_incoming_river(hex);
        }
        self.remove_road_edge(hex, direction);

        if let Some(cell) = self.cells.get_mut(&hex) {
            cell.outgoing_river = Some(direction);
        }
        self.remove_incoming_river(neighbor);
        if let Some(cell) = self.cells.get_mut(&neighbor) {
            cell.incoming_river = Some(direction.opposite());
        }
    }

    /// Removes the river segment leaving `hex`, clearing both endpoints.
    pub fn remove_outgoing_river(&mut self, hex: Hex) {
        let Some(direction) = self.cells.get(&hex).and_then(|c| c.outgoing_river) else {
            return;
        };
        if let Some(cell) = self.cells.get_mut(&hex) {
            cell.outgoing_river = None;
        }
        if let Some(cell) = self.cells.get_mut(&direction.neighbor(hex)) {
            cell.incoming_river = None;
        }
    }

    /// Removes the river segment entering `hex`, clearing both endpoints.
    pub fn remove_incoming_river(&mut self, hex: Hex) {
        let Some(direction) = self.cells.get(&hex).and_then(|c| c.incoming_river) else {
            return;
        };
        if let Some(cell) = self.cells.get_mut(&hex) {
            cell.incoming_river = None;
        }
        if let Some(cell) = self.cells.get_mut(&direction.neighbor(hex)) {
            cell.outgoing_river = None;
        }
    }

    /// Removes any river touching `hex`.
    pub fn remove_river(&mut self, hex: Hex) {
        let Some(cell) = self.cells.get(&hex) else {
            return;
        };
        if !cell.has_river() {
            return;
        }
        self.remove_outgoing_river(hex);
        self.remove_incoming_river(hex);
    }

    // ── Roads ──────────────────────────────────────────────────────

    /// Adds a road across the edge in `direction`, on both sides.
    ///
    /// Refused when the neighbor is missing, a river claims the edge, or the
    /// elevation difference exceeds one step.
    pub fn add_road(&mut self, hex: Hex, direction: HexDirection) {
        let Some(neighbor) = self.neighbor(hex, direction) else {
            return;
        };
        let Some(cell) = self.cells.get(&hex) else {
            return;
        };
        if cell.has_river_through_edge(direction) {
            return;
        }
        if (cell.elevation - self.cells[&neighbor].elevation).abs() > 1 {
            return;
        }
        if let Some(cell) = self.cells.get_mut(&hex) {
            cell.roads[direction as usize] = true;
        }
        if let Some(cell) = self.cells.get_mut(&neighbor) {
            cell.roads[direction.opposite() as usize] = true;
        }
    }

    /// Removes all roads touching `hex`, on both sides of each edge.
    pub fn remove_roads(&mut self, hex: Hex) {
        for direction in HexDirection::ALL {
            self.remove_road_edge(hex, direction);
        }
    }

    fn remove_road_edge(&mut self, hex: Hex, direction: HexDirection) {
        if let Some(cell) = self.cells.get_mut(&hex) {
            cell.roads[direction as usize] = false;
        }
        if let Some(cell) = self.cells.get_mut(&direction.neighbor(hex)) {
            cell.roads[direction.opposite() as usize] = false;
        }
    }
}

/// Elevation band → palette index, clamped to the palette length.
fn initial_color_index(elevation: i32, max_elevation: i32, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let t = elevation.clamp(0, max_elevation) as f32 / max_elevation.max(1) as f32;
    ((t * palette_len as f32) as usize).min(palette_len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;

    fn default_map_settings() -> MapSettings {
        GridConfig::default().map
    }

    #[test]
    fn from_settings_populates_all_hexes() {
        let cfg = GridConfig::default();
        let map = CellMap::from_settings(&cfg.map, cfg.palette.len());
        let expected = shapes::hexagon(Hex::ZERO, cfg.map.map_radius).count();
        assert_eq!(map.cell_count(), expected);
    }

    #[test]
    fn generated_colors_stay_within_the_palette() {
        let cfg = GridConfig::default();
        let map = CellMap::from_settings(&cfg.map, cfg.palette.len());
        for (hex, cell) in map.iter() {
            assert!(
                cell.color_index < cfg.palette.len(),
                "{hex:?} has color {}",
                cell.color_index
            );
        }
    }

    #[test]
    fn hex_to_world_and_back_roundtrip() {
        let s = default_map_settings();
        let map = CellMap::from_settings(&s, 5);
        for hex in shapes::hexagon(Hex::ZERO, 3) {
            let world = map.hex_to_world_pos(hex);
            assert_eq!(map.world_pos_to_hex(world), hex, "roundtrip failed for {hex:?}");
        }
    }

    #[test]
    fn neighbor_requires_the_cell_to_exist() {
        let map = CellMap::flat(1, 4.0);
        assert_eq!(
            map.neighbor(Hex::ZERO, HexDirection::E),
            Some(Hex::new(1, 0))
        );
        // Edge cell looking outward.
        assert_eq!(map.neighbor(Hex::new(1, 0), HexDirection::E), None);
    }

    // ── Rivers ─────────────────────────────────────────────────────

    #[test]
    fn outgoing_river_links_both_endpoints() {
        let mut map = CellMap::flat(2, 4.0);
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);

        let from = map.get(Hex::ZERO).unwrap();
        let to = map.get(HexDirection::SE.neighbor(Hex::ZERO)).unwrap();
        assert_eq!(from.outgoing_river, Some(HexDirection::SE));
        assert_eq!(to.incoming_river, Some(HexDirection::NW));
    }

    #[test]
    fn redirecting_a_river_clears_the_old_target() {
        let mut map = CellMap::flat(2, 4.0);
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);
        map.set_outgoing_river(Hex::ZERO, HexDirection::E);

        let old_target = map.get(HexDirection::SE.neighbor(Hex::ZERO)).unwrap();
        assert_eq!(old_target.incoming_river, None);
        let new_target = map.get(HexDirection::E.neighbor(Hex::ZERO)).unwrap();
        assert_eq!(new_target.incoming_river, Some(HexDirection::W));
    }

    #[test]
    fn river_refuses_to_flow_uphill() {
        let mut map = CellMap::flat(2, 4.0);
        let target = HexDirection::E.neighbor(Hex::ZERO);
        map.set_elevation(target, 2);
        map.set_outgoing_river(Hex::ZERO, HexDirection::E);
        assert_eq!(map.get(Hex::ZERO).unwrap().outgoing_river, None);
    }

    #[test]
    fn reversing_flow_replaces_the_incoming_end() {
        let mut map = CellMap::flat(2, 4.0);
        let east = HexDirection::E.neighbor(Hex::ZERO);
        map.set_outgoing_river(Hex::ZERO, HexDirection::E);
        map.set_outgoing_river(east, HexDirection::W);

        let origin = map.get(Hex::ZERO).unwrap();
        assert_eq!(origin.outgoing_river, None);
        assert_eq!(origin.incoming_river, Some(HexDirection::E));
        let east_cell = map.get(east).unwrap();
        assert_eq!(east_cell.outgoing_river, Some(HexDirection::W));
        assert_eq!(east_cell.incoming_river, None);
    }

    #[test]
    fn new_river_displaces_the_targets_previous_source() {
        let mut map = CellMap::flat(2, 4.0);
        let target = Hex::new(0, 1);
        // First river into `target` from the north-west.
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);
        // Second river into `target` from the east.
        let east_of_target = HexDirection::E.neighbor(target);
        map.set_outgoing_river(east_of_target, HexDirection::W);

        assert_eq!(map.get(Hex::ZERO).unwrap().outgoing_river, None);
        assert_eq!(
            map.get(target).unwrap().incoming_river,
            Some(HexDirection::E)
        );
    }

    #[test]
    fn remove_river_clears_both_segments() {
        let mut map = CellMap::flat(2, 4.0);
        let mid = HexDirection::SE.neighbor(Hex::ZERO);
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);
        map.set_outgoing_river(mid, HexDirection::SE);

        map.remove_river(mid);

        assert_eq!(map.get(Hex::ZERO).unwrap().outgoing_river, None);
        assert!(!map.get(mid).unwrap().has_river());
        let downstream = map.get(HexDirection::SE.neighbor(mid)).unwrap();
        assert_eq!(downstream.incoming_river, None);
    }

    // ── Roads ──────────────────────────────────────────────────────

    #[test]
    fn roads_are_mirrored_on_both_sides() {
        let mut map = CellMap::flat(1, 4.0);
        map.add_road(Hex::ZERO, HexDirection::NE);

        assert!(map.get(Hex::ZERO).unwrap().has_road(HexDirection::NE));
        let neighbor = map.get(HexDirection::NE.neighbor(Hex::ZERO)).unwrap();
        assert!(neighbor.has_road(HexDirection::SW));
    }

    #[test]
    fn road_refused_across_a_river_edge() {
        let mut map = CellMap::flat(1, 4.0);
        map.set_outgoing_river(Hex::ZERO, HexDirection::E);
        map.add_road(Hex::ZERO, HexDirection::E);
        assert!(!map.get(Hex::ZERO).unwrap().has_road(HexDirection::E));
    }

    #[test]
    fn road_refused_across_a_cliff() {
        let mut map = CellMap::flat(1, 4.0);
        let target = HexDirection::W.neighbor(Hex::ZERO);
        map.set_elevation(target, 2);
        map.add_road(Hex::ZERO, HexDirection::W);
        assert!(!map.get(Hex::ZERO).unwrap().has_road(HexDirection::W));
    }

    #[test]
    fn road_allowed_on_a_single_step() {
        let mut map = CellMap::flat(1, 4.0);
        let target = HexDirection::W.neighbor(Hex::ZERO);
        map.set_elevation(target, 1);
        map.add_road(Hex::ZERO, HexDirection::W);
        assert!(map.get(Hex::ZERO).unwrap().has_road(HexDirection::W));
    }

    #[test]
    fn remove_roads_clears_the_mirrored_flags() {
        let mut map = CellMap::flat(1, 4.0);
        map.add_road(Hex::ZERO, HexDirection::E);
        map.add_road(Hex::ZERO, HexDirection::NW);

        map.remove_roads(Hex::ZERO);

        assert!(!map.get(Hex::ZERO).unwrap().has_roads());
        assert!(
            !map.get(HexDirection::E.neighbor(Hex::ZERO))
                .unwrap()
                .has_road(HexDirection::W)
        );
    }

    #[test]
    fn a_new_river_washes_out_the_road_on_its_edge() {
        let mut map = CellMap::flat(1, 4.0);
        map.add_road(Hex::ZERO, HexDirection::SE);
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);

        assert!(!map.get(Hex::ZERO).unwrap().has_road(HexDirection::SE));
        let neighbor = map.get(HexDirection::SE.neighbor(Hex::ZERO)).unwrap();
        assert!(!neighbor.has_road(HexDirection::NW));
    }

    // ── Elevation re-validation ────────────────────────────────────

    #[test]
    fn raising_the_target_washes_out_an_outgoing_river() {
        let mut map = CellMap::flat(2, 4.0);
        let target = HexDirection::SE.neighbor(Hex::ZERO);
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);

        map.set_elevation(target, 3);

        assert_eq!(map.get(Hex::ZERO).unwrap().outgoing_river, None);
        assert_eq!(map.get(target).unwrap().incoming_river, None);
    }

    #[test]
    fn raising_a_cell_washes_out_its_incoming_river() {
        let mut map = CellMap::flat(2, 4.0);
        let target = HexDirection::SE.neighbor(Hex::ZERO);
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);

        map.set_elevation(target, 3);

        assert!(!map.get(target).unwrap().has_river());
    }

    #[test]
    fn raising_a_cell_keeps_a_still_downhill_river() {
        let mut map = CellMap::flat(2, 4.0);
        map.set_elevation(Hex::ZERO, 2);
        map.set_outgoing_river(Hex::ZERO, HexDirection::SE);

        map.set_elevation(Hex::ZERO, 3);

        assert_eq!(
            map.get(Hex::ZERO).unwrap().outgoing_river,
            Some(HexDirection::SE)
        );
    }

    #[test]
    fn elevation_change_removes_roads_over_new_cliffs() {
        let mut map = CellMap::flat(1, 4.0);
        map.add_road(Hex::ZERO, HexDirection::E);

        map.set_elevation(Hex::ZERO, 2);

        assert!(!map.get(Hex::ZERO).unwrap().has_road(HexDirection::E));
        let neighbor = map.get(HexDirection::E.neighbor(Hex::ZERO)).unwrap();
        assert!(!neighbor.has_road(HexDirection::W));
    }

    // ── Color bands ────────────────────────────────────────────────

    #[test]
    fn color_band_spans_the_palette() {
        assert_eq!(initial_color_index(0, 6, 5), 0);
        assert_eq!(initial_color_index(6, 6, 5), 4);
        assert_eq!(initial_color_index(3, 6, 5), 2);
    }
}
