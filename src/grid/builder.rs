// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Streaming assembly of per-rack grids.
//!
//! Records of one rack arrive contiguously. A rack is complete as soon as a
//! record for a different rack shows up, or when the input ends.

use anyhow::{bail, Context, Result};
use tracing::{debug, trace};

use super::types::RackGrid;
use crate::config::SystemConfig;
use crate::record::{parse_record, NodeRecord, IO_NODE_NAME, LOAD_UNAVAILABLE};

/// Receiver of completed racks
pub trait RackSink {
    fn rack_complete(&mut self, grid: &RackGrid) -> Result<()>;
}

/// Builds rack grids from a record stream and hands each finished rack to a sink
pub struct RackStream<'a> {
    config: &'a SystemConfig,
    current: Option<RackGrid>,
    last_nodename: Option<String>,
    pub records: u64,
    pub skipped_lines: u64,
}

impl<'a> RackStream<'a> {
    pub fn new(config: &'a SystemConfig) -> Self {
        Self {
            config,
            current: None,
            last_nodename: None,
            records: 0,
            skipped_lines: 0,
        }
    }

    /// Feed one raw input line; non-record lines are ignored
    pub fn push_line(&mut self, line: &str, sink: &mut impl RackSink) -> Result<()> {
        match parse_record(line)? {
            Some(record) => self.push(record, sink),
            None => {
                self.skipped_lines += 1;
                Ok(())
            }
        }
    }

    /// Apply one parsed record to the current rack
    pub fn push(&mut self, record: NodeRecord, sink: &mut impl RackSink) -> Result<()> {
        let grid = match self.current.take() {
            Some(grid) if grid.rack == record.rack => grid,
            previous => {
                if let Some(done) = previous {
                    sink.rack_complete(&done)?;
                }
                debug!(rack = record.rack, "Starting rack");
                RackGrid::new(record.rack, self.config)
            }
        };
        let grid = self.current.insert(grid);

        if record.cpus == 0 {
            bail!("node {}-{}-{} reports zero cores", record.nodename, record.rack, record.slot);
        }

        self.config
            .system
            .slot_to_cell(record.slot)
            .and_then(|cell| grid.set(cell, record.load, record.cpus))
            .with_context(|| format!("Failed to place node {}-{}-{}", record.nodename, record.rack, record.slot))?;

        if record.load == LOAD_UNAVAILABLE {
            trace!(node = %record.nodename, rack = record.rack, slot = record.slot, state = %record.state, "Node unavailable");
        }

        self.records += 1;
        self.last_nodename = Some(record.nodename);
        Ok(())
    }

    /// End of input: flush the last rack unless the stream ended on an I/O node.
    ///
    /// Racks handed over at a boundary are no longer open, so a rack is never
    /// flushed twice.
    pub fn finish(self, sink: &mut impl RackSink) -> Result<()> {
        let ends_on_io_node = self.last_nodename.as_deref() == Some(IO_NODE_NAME);

        match self.current {
            Some(grid) if !ends_on_io_node => sink.rack_complete(&grid),
            Some(grid) => {
                debug!(rack = grid.rack, "Stream ended on an I/O node; final rack not drawn");
                Ok(())
            }
            None => Ok(()),
        }
    }
}
