// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Per-system diagram geometry.
//!
//! The rack layout of each supported cluster is hand-coded here; nothing is
//! derived from the input stream.

use std::fmt;

use tracing::warn;

/// Geometry variant of a supported system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Multi-row, multi-column racks; slots encode row/column in tens/ones digits
    Gordon,
    /// Single-column racks; slots are a plain 1-based index
    Trestles,
}

impl Layout {
    pub fn name(self) -> &'static str {
        match self {
            Layout::Gordon => "gordon",
            Layout::Trestles => "trestles",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed diagram parameters for one system, created once per run
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Nodes per rack along the first grid axis
    pub rack_xdim: usize,
    /// Nodes per rack along the second grid axis
    pub rack_ydim: usize,
    /// Rows spanned by a merged supernode (gordon only)
    pub subrack_ydim: Option<usize>,
    /// Racks drawn per row of the final picture
    pub racks_per_row: u32,
    /// Width of one node's rectangle in canvas units
    pub size_x: f64,
    /// Height of one node's rectangle in canvas units
    pub size_y: f64,
    /// Geometry variant
    pub system: Layout,
    /// Nominal cores per node
    pub ppn: u32,
}

impl SystemConfig {
    pub fn gordon() -> Self {
        Self {
            rack_xdim: 8,
            rack_ydim: 8,
            subrack_ydim: Some(2),
            racks_per_row: 10,
            size_x: 0.5,
            size_y: 1.0,
            system: Layout::Gordon,
            ppn: 16,
        }
    }

    pub fn trestles() -> Self {
        Self {
            rack_xdim: 1,
            rack_ydim: 32,
            subrack_ydim: None,
            racks_per_row: 6,
            size_x: 8.0,
            size_y: 0.75,
            system: Layout::Trestles,
            ppn: 32,
        }
    }

    /// Default name of the rendered image, e.g. `gordon-load.png`
    pub fn output_file_name(&self) -> String {
        format!("{}-load.png", self.system)
    }
}

/// Pick the geometry for a system identifier (usually the host name).
///
/// Returns the config and whether the identifier was recognized. Unknown
/// identifiers fall back to the trestles layout.
pub fn classify_system(identifier: &str) -> (SystemConfig, bool) {
    if identifier.contains("gordon") || identifier.contains("gcn") {
        (SystemConfig::gordon(), true)
    } else {
        (SystemConfig::trestles(), identifier.contains("trestles"))
    }
}

/// Resolve the active config, warning when the system is unknown
pub fn resolve_config(identifier: &str) -> SystemConfig {
    let (config, known) = classify_system(identifier);
    if !known {
        warn!(system = identifier, assumed = %config.system, "Unknown system; assuming {}", config.system);
    }
    config
}

/// Name of the executing host, used when no system is given explicitly
pub fn host_identifier() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
