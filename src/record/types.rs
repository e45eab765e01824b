// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Load stored for a slot that no record has touched (node does not exist)
pub const LOAD_ABSENT: f64 = -2.0;

/// Load stored for a node that is present but offline or down
pub const LOAD_UNAVAILABLE: f64 = -1.0;

/// Node name reserved for I/O nodes; a stream ending on one skips the final rack
pub const IO_NODE_NAME: &str = "ion";

/// One status line of the node feed
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// Host name prefix before the rack/slot suffix (e.g. "gcn" in "gcn-3-45")
    pub nodename: String,
    /// Rack number
    pub rack: u32,
    /// Position within the rack, encoded per system
    pub slot: u32,
    /// Cores reported for this node
    pub cpus: u32,
    /// Load average, or [`LOAD_UNAVAILABLE`] if the node is offline/down
    pub load: f64,
    /// Raw state token
    pub state: String,
}

/// Case-sensitive check for "offline" or "down" anywhere in the state token
pub fn is_unavailable_state(state: &str) -> bool {
    state.contains("offline") || state.contains("down")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_states() {
        assert!(is_unavailable_state("offline"));
        assert!(is_unavailable_state("down"));
        assert!(is_unavailable_state("down,offline"));
        assert!(is_unavailable_state("state-unknown,down"));
        assert!(!is_unavailable_state("free"));
        assert!(!is_unavailable_state("job-exclusive"));
        // Case-sensitive
        assert!(!is_unavailable_state("DOWN"));
    }
}
