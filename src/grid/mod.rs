// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

pub mod builder;
pub mod types;

pub use builder::{RackSink, RackStream};
pub use types::{Cell, RackGrid};
