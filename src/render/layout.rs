// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Where racks and nodes land on the canvas, per system.

use crate::config::{Layout, SystemConfig};
use crate::grid::Cell;

/// Trestles rack that is only populated up to this grid column
const TRESTLES_PARTIAL_RACK: u32 = 12;
const TRESTLES_PARTIAL_RACK_LAST_COLUMN: usize = 25;
/// Trestles grid columns below this have no hardware
const TRESTLES_FIRST_COLUMN: usize = 2;

impl Layout {
    /// Position of a rack in rack space: (column, row) of the rack picture
    pub fn rack_position(self, rack: u32, racks_per_row: u32) -> (f64, f64) {
        let per_row = i64::from(racks_per_row);
        let index = match self {
            Layout::Gordon => i64::from(rack),
            // Racks are numbered from 1
            Layout::Trestles => i64::from(rack) - 1,
        };
        // Truncating division keeps rack 0 of a 1-based system in the first row
        (index.rem_euclid(per_row) as f64, (index / per_row) as f64)
    }

    /// Canvas origin of a rack's top-left node.
    ///
    /// Neighboring racks are separated by two node widths (gordon) or two
    /// canvas units (trestles).
    pub fn rack_origin(self, rack: u32, config: &SystemConfig) -> (f64, f64) {
        let (rack_x, rack_y) = self.rack_position(rack, config.racks_per_row);
        let (xdim, ydim) = (config.rack_xdim as f64, config.rack_ydim as f64);
        match self {
            Layout::Gordon => (
                rack_x * (xdim + 2.0) * config.size_x,
                rack_y * (ydim + 2.0) * config.size_y,
            ),
            Layout::Trestles => (
                rack_x * (xdim * config.size_x + 2.0),
                rack_y * (ydim * config.size_y + 2.0),
            ),
        }
    }

    /// Anchor of the "rack N" label for a rack at `origin`
    pub fn label_anchor(self, origin: (f64, f64)) -> (f64, f64) {
        let (x, y) = origin;
        match self {
            Layout::Gordon => (x, y - 0.1),
            Layout::Trestles => (x, y + 0.5),
        }
    }

    /// Horizontal and vertical node index of a cell within its rack.
    ///
    /// Gordon grids are drawn with the first axis vertical; trestles grids
    /// are transposed, so their single column runs horizontally.
    pub fn placement(self, cell: Cell) -> (usize, usize) {
        match self {
            Layout::Gordon => (cell.y, cell.x),
            Layout::Trestles => (cell.x, cell.y),
        }
    }

    /// Whether a cell has hardware behind it and is drawn at all
    pub fn is_drawn(self, rack: u32, cell: Cell) -> bool {
        match self {
            Layout::Gordon => true,
            Layout::Trestles => {
                cell.y >= TRESTLES_FIRST_COLUMN
                    && !(rack == TRESTLES_PARTIAL_RACK && cell.y > TRESTLES_PARTIAL_RACK_LAST_COLUMN)
            }
        }
    }

    /// Footprint of a merged supernode, if the system has them
    pub fn supernode_size(self, config: &SystemConfig) -> Option<(f64, f64)> {
        match self {
            Layout::Gordon => config.subrack_ydim.map(|rows| {
                (config.rack_xdim as f64 * config.size_x, rows as f64 * config.size_y)
            }),
            Layout::Trestles => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gordon_rack_origin() {
        let config = SystemConfig::gordon();
        assert_eq!(Layout::Gordon.rack_origin(0, &config), (0.0, 0.0));
        // rack 13 -> rack space (3, 1); rack width (8+2)*0.5, height (8+2)*1.0
        assert_eq!(Layout::Gordon.rack_origin(13, &config), (15.0, 10.0));
    }

    #[test]
    fn test_trestles_rack_origin() {
        let config = SystemConfig::trestles();
        assert_eq!(Layout::Trestles.rack_origin(1, &config), (0.0, 0.0));
        // rack 8 -> rack space (1, 1); 1*8.0+2 wide, 32*0.75+2 tall
        assert_eq!(Layout::Trestles.rack_origin(8, &config), (10.0, 26.0));
        assert_eq!(Layout::Trestles.rack_position(6, 6), (5.0, 0.0));
        assert_eq!(Layout::Trestles.rack_position(7, 6), (0.0, 1.0));
    }

    #[test]
    fn test_trestles_rack_zero_stays_in_first_row() {
        assert_eq!(Layout::Trestles.rack_position(0, 6), (5.0, 0.0));
    }

    #[test]
    fn test_label_offsets() {
        assert_eq!(Layout::Gordon.label_anchor((5.0, 10.0)), (5.0, 9.9));
        assert_eq!(Layout::Trestles.label_anchor((5.0, 10.0)), (5.0, 10.5));
    }

    #[test]
    fn test_placement_is_transposed() {
        let cell = Cell::new(1, 2);
        assert_eq!(Layout::Gordon.placement(cell), (2, 1));
        assert_eq!(Layout::Trestles.placement(cell), (1, 2));
    }

    #[test]
    fn test_trestles_unpopulated_positions() {
        let layout = Layout::Trestles;
        assert!(!layout.is_drawn(3, Cell::new(0, 0)));
        assert!(!layout.is_drawn(3, Cell::new(0, 1)));
        assert!(layout.is_drawn(3, Cell::new(0, 2)));
        assert!(layout.is_drawn(3, Cell::new(0, 31)));
        assert!(layout.is_drawn(12, Cell::new(0, 25)));
        assert!(!layout.is_drawn(12, Cell::new(0, 26)));
        assert!(Layout::Gordon.is_drawn(12, Cell::new(0, 0)));
    }

    #[test]
    fn test_supernode_size() {
        assert_eq!(Layout::Gordon.supernode_size(&SystemConfig::gordon()), Some((4.0, 2.0)));
        assert_eq!(Layout::Trestles.supernode_size(&SystemConfig::trestles()), None);
    }
}
