// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Rack rendering: turns a completed rack grid into canvas primitives.

pub mod color;
pub mod layout;
pub mod png;
pub mod scene;

use tracing::debug;

use crate::config::SystemConfig;
use crate::grid::RackGrid;
use color::classify;
use scene::{Rect, Scene};

pub use png::write_png;

/// Draw one rack onto the scene.
///
/// Supernodes (cells reporting more cores than a single node has) cover a
/// whole subrack and are drawn after the ordinary nodes so they stay on top.
pub fn draw_rack(scene: &mut Scene, grid: &RackGrid, config: &SystemConfig) {
    let layout = config.system;
    let (node_x, node_y) = layout.rack_origin(grid.rack, config);
    let (label_x, label_y) = layout.label_anchor((node_x, node_y));
    scene.add_label(label_x, label_y, format!("rack {}", grid.rack));

    let supernode_size = layout.supernode_size(config);
    let mut supernodes = Vec::new();
    let mut drawn = 0usize;

    for cell in grid.cells() {
        if !layout.is_drawn(grid.rack, cell) {
            continue;
        }

        let cpus = grid.cpus(cell);
        let fill = classify(grid.load(cell), cpus, config.ppn).color();
        let (col, row) = layout.placement(cell);
        let plot_x = col as f64 * config.size_x + node_x;
        let plot_y = row as f64 * config.size_y + node_y;

        match supernode_size.filter(|_| cpus > config.ppn) {
            Some((width, height)) => supernodes.push(Rect::node(plot_x, plot_y, width, height, fill)),
            None => scene.add_rect(Rect::node(plot_x, plot_y, config.size_x, config.size_y, fill)),
        }
        drawn += 1;
    }

    debug!(rack = grid.rack, nodes = drawn, supernodes = supernodes.len(), "Drew rack");
    for rect in supernodes {
        scene.add_rect(rect);
    }
}
