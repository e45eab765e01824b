// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

pub mod parser;
pub mod types;

pub use parser::parse_record;
pub use types::{NodeRecord, IO_NODE_NAME, LOAD_ABSENT, LOAD_UNAVAILABLE};
