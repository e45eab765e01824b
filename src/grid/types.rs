// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

use anyhow::{bail, Result};

use crate::config::{Layout, SystemConfig};
use crate::record::LOAD_ABSENT;

/// Position of a node inside its rack's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// First grid axis (`0..rack_xdim`)
    pub x: usize,
    /// Second grid axis (`0..rack_ydim`)
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Layout {
    /// Decode a slot number into a grid cell.
    ///
    /// Gordon encodes row and column in the tens and ones digits (both
    /// 1-based); trestles numbers a single column from 1.
    pub fn slot_to_cell(self, slot: u32) -> Result<Cell> {
        let (x, y) = match self {
            Layout::Gordon => {
                if slot >= 100 {
                    bail!("slot {} does not fit the two-digit gordon encoding", slot);
                }
                (i64::from(slot / 10) - 1, i64::from(slot % 10) - 1)
            }
            Layout::Trestles => (0, i64::from(slot) - 1),
        };
        if x < 0 || y < 0 {
            bail!("slot {} decodes to a negative grid position ({}, {})", slot, x, y);
        }
        Ok(Cell::new(x as usize, y as usize))
    }
}

/// Load and core-count grids of one rack
#[derive(Debug, Clone, PartialEq)]
pub struct RackGrid {
    pub rack: u32,
    xdim: usize,
    ydim: usize,
    load: Vec<f64>,
    cpus: Vec<u32>,
}

impl RackGrid {
    /// Fresh grid: every node absent, every core count nominal
    pub fn new(rack: u32, config: &SystemConfig) -> Self {
        let len = config.rack_xdim * config.rack_ydim;
        Self {
            rack,
            xdim: config.rack_xdim,
            ydim: config.rack_ydim,
            load: vec![LOAD_ABSENT; len],
            cpus: vec![config.ppn; len],
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.x < self.xdim && cell.y < self.ydim).then(|| cell.x * self.ydim + cell.y)
    }

    /// Store a node's reading. The last write to a cell wins.
    pub fn set(&mut self, cell: Cell, load: f64, cpus: u32) -> Result<()> {
        let Some(idx) = self.index(cell) else {
            bail!(
                "cell ({}, {}) lies outside the {}x{} grid of rack {}",
                cell.x, cell.y, self.xdim, self.ydim, self.rack
            );
        };
        self.load[idx] = load;
        self.cpus[idx] = cpus;
        Ok(())
    }

    /// Load stored at a cell (panics outside the grid)
    pub fn load(&self, cell: Cell) -> f64 {
        self.load[cell.x * self.ydim + cell.y]
    }

    /// Core count stored at a cell (panics outside the grid)
    pub fn cpus(&self, cell: Cell) -> u32 {
        self.cpus[cell.x * self.ydim + cell.y]
    }

    /// All cells in storage order (first axis outer, second axis inner)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.xdim).flat_map(move |x| (0..self.ydim).map(move |y| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gordon_slot_decoding() {
        assert_eq!(Layout::Gordon.slot_to_cell(23).unwrap(), Cell::new(1, 2));
        assert_eq!(Layout::Gordon.slot_to_cell(11).unwrap(), Cell::new(0, 0));
        assert_eq!(Layout::Gordon.slot_to_cell(88).unwrap(), Cell::new(7, 7));
    }

    #[test]
    fn test_gordon_slot_out_of_range() {
        assert!(Layout::Gordon.slot_to_cell(100).is_err());
        assert!(Layout::Gordon.slot_to_cell(123).is_err());
        // A zero digit has no 1-based position
        assert!(Layout::Gordon.slot_to_cell(20).is_err());
        assert!(Layout::Gordon.slot_to_cell(5).is_err());
    }

    #[test]
    fn test_trestles_slot_decoding() {
        assert_eq!(Layout::Trestles.slot_to_cell(5).unwrap(), Cell::new(0, 4));
        assert_eq!(Layout::Trestles.slot_to_cell(1).unwrap(), Cell::new(0, 0));
        assert!(Layout::Trestles.slot_to_cell(0).is_err());
    }

    #[test]
    fn test_new_grid_is_absent() {
        let config = SystemConfig::gordon();
        let grid = RackGrid::new(4, &config);
        assert_eq!(grid.cells().count(), 64);
        for cell in grid.cells() {
            assert_eq!(grid.load(cell), LOAD_ABSENT);
            assert_eq!(grid.cpus(cell), config.ppn);
        }
    }

    #[test]
    fn test_set_last_write_wins() {
        let config = SystemConfig::trestles();
        let mut grid = RackGrid::new(1, &config);
        let cell = Cell::new(0, 4);
        grid.set(cell, 3.5, 32).unwrap();
        grid.set(cell, 7.25, 16).unwrap();
        assert_eq!(grid.load(cell), 7.25);
        assert_eq!(grid.cpus(cell), 16);
        // Neighbors untouched
        assert_eq!(grid.load(Cell::new(0, 3)), LOAD_ABSENT);
    }

    #[test]
    fn test_set_outside_grid() {
        let config = SystemConfig::trestles();
        let mut grid = RackGrid::new(1, &config);
        assert!(grid.set(Cell::new(0, 32), 1.0, 32).is_err());
        assert!(grid.set(Cell::new(1, 0), 1.0, 32).is_err());
    }

    #[test]
    fn test_cells_order() {
        let config = SystemConfig::gordon();
        let grid = RackGrid::new(0, &config);
        let cells: Vec<Cell> = grid.cells().take(9).collect();
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[7], Cell::new(0, 7));
        assert_eq!(cells[8], Cell::new(1, 0));
    }
}
