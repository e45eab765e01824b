// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Parser for the whitespace-delimited node status feed.
//!
//! Expected shape of a line:
//!
//! ```text
//! <nodename>-<rack>-<slot> <int> <int> <cpus> <int>/<int> <token> <token> <load> <state>
//! ```
//!
//! Anything else (headers, separators, blank lines) is not a record.

use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use super::types::is_unavailable_state;
use super::{NodeRecord, LOAD_UNAVAILABLE};

static LINE_RE: OnceLock<Regex> = OnceLock::new();

fn line_regex() -> &'static Regex {
    LINE_RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            ^(\S+)-(\d+)-(\d+)\s+   # nodename-rack-slot
            \d+\s+
            \d+\s+
            (\d+)\s+                # cpus
            \d+/\d+\s+
            \S+\s+
            \S+\s+
            (\d+\.\d+)\s*           # load
            (\S+)\s*$               # state
            ",
        )
        .expect("node record pattern is valid")
    })
}

/// Parse one line of the feed.
///
/// Returns `Ok(None)` for lines that are not node records. Offline/down
/// nodes get their load replaced by [`LOAD_UNAVAILABLE`]. A line of the
/// record shape whose numbers do not fit is an error.
pub fn parse_record(line: &str) -> Result<Option<NodeRecord>> {
    let Some(caps) = line_regex().captures(line) else {
        return Ok(None);
    };

    let node = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
    let state = caps[6].to_string();
    let mut load: f64 = field(&caps[5], "load", &node)?;
    if is_unavailable_state(&state) {
        load = LOAD_UNAVAILABLE;
    }

    Ok(Some(NodeRecord {
        nodename: caps[1].to_string(),
        rack: field(&caps[2], "rack", &node)?,
        slot: field(&caps[3], "slot", &node)?,
        cpus: field(&caps[4], "cpus", &node)?,
        load,
        state,
    }))
}

fn field<T>(value: &str, name: &str, node: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid {} '{}' for node {}", name, value, node))
}
