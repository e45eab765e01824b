// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Per-rack counts, printed as NDJSON with `--summary`.

use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::grid::RackGrid;
use crate::render::color::{classify, CellClass};

/// What one rendered rack looked like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackSummary {
    pub rack: u32,
    /// Drawn positions with a node in them (including offline ones)
    pub nodes: u32,
    /// Nodes that are offline or down
    pub unavailable: u32,
    /// Nodes loaded above 110% of the nominal core count
    pub overloaded: u32,
    /// Drawn positions without a node
    pub absent: u32,
    /// Cells reporting more cores than a single node has
    pub supernodes: u32,
    /// Mean load over available nodes, `None` if there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_load: Option<f64>,
}

impl RackSummary {
    pub fn from_grid(grid: &RackGrid, config: &SystemConfig) -> Self {
        let layout = config.system;
        let mut summary = RackSummary {
            rack: grid.rack,
            nodes: 0,
            unavailable: 0,
            overloaded: 0,
            absent: 0,
            supernodes: 0,
            mean_load: None,
        };
        let mut load_sum = 0.0;
        let mut available = 0u32;

        for cell in grid.cells().filter(|&cell| layout.is_drawn(grid.rack, cell)) {
            let load = grid.load(cell);
            let cpus = grid.cpus(cell);
            match classify(load, cpus, config.ppn) {
                CellClass::Absent => {
                    summary.absent += 1;
                    continue;
                }
                CellClass::Unavailable => summary.unavailable += 1,
                class => {
                    if class == CellClass::Overloaded {
                        summary.overloaded += 1;
                    }
                    load_sum += load;
                    available += 1;
                }
            }
            summary.nodes += 1;
            if cpus > config.ppn && layout.supernode_size(config).is_some() {
                summary.supernodes += 1;
            }
        }

        if available > 0 {
            summary.mean_load = Some(load_sum / f64::from(available));
        }
        summary
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
