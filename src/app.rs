// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::SystemConfig;
use crate::grid::{RackGrid, RackSink, RackStream};
use crate::render::draw_rack;
use crate::render::scene::Scene;
use crate::summary::RackSummary;

/// Application state: the active geometry and everything drawn so far
pub struct App {
    pub config: SystemConfig,
    /// The canvas all racks are drawn onto
    pub scene: Scene,
    /// One entry per rendered rack, in render order
    pub summaries: Vec<RackSummary>,
}

impl RackSink for App {
    fn rack_complete(&mut self, grid: &RackGrid) -> Result<()> {
        draw_rack(&mut self.scene, grid, &self.config);
        self.summaries.push(RackSummary::from_grid(grid, &self.config));
        Ok(())
    }
}

impl App {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            summaries: Vec::new(),
        }
    }

    /// Consume a whole record stream, drawing each rack as it completes
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.load_all([reader])
    }

    /// Consume several readers as one record stream, so a rack continued
    /// across a reader boundary is still one rack
    pub fn load_all<R: BufRead>(&mut self, readers: impl IntoIterator<Item = R>) -> Result<()> {
        let config = self.config.clone();
        let mut stream = RackStream::new(&config);
        for reader in readers {
            for line in reader.lines() {
                let line = line.context("Failed to read input line")?;
                stream.push_line(&line, self)?;
            }
        }
        debug!(records = stream.records, skipped = stream.skipped_lines, "Input consumed");
        stream.finish(self)
    }

    /// Load from the given files in order, or from stdin when none are given.
    /// A path of `-` also means stdin.
    pub fn load_inputs(&mut self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return self.load(io::stdin().lock());
        }

        let readers = paths
            .iter()
            .map(|path| open_input(path))
            .collect::<Result<Vec<_>>>()?;
        self.load_all(readers)
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
