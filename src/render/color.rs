// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Node color classification and the sequential load scale.

/// 8-bit RGB color, independent of the output backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
/// Slot without a node
pub const ABSENT_COLOR: Rgb = Rgb(128, 128, 128);
/// Node offline or down
pub const UNAVAILABLE_COLOR: Rgb = Rgb(255, 0, 0);
/// Load far above the nominal core count
pub const OVERLOADED_COLOR: Rgb = Rgb(255, 255, 0);

/// ColorBrewer "Blues", light to dark, evenly spaced over [0, 1]
const BLUES: [Rgb; 9] = [
    Rgb(247, 251, 255),
    Rgb(222, 235, 247),
    Rgb(198, 219, 239),
    Rgb(158, 202, 225),
    Rgb(107, 174, 214),
    Rgb(66, 146, 198),
    Rgb(33, 113, 181),
    Rgb(8, 81, 156),
    Rgb(8, 48, 107),
];

/// Number of discrete shades the scale is sampled into
const SCALE_STEPS: usize = 256;

/// Pick a color from the Blues scale; `t` is clamped to [0, 1].
///
/// The scale is a table of [`SCALE_STEPS`] shades: `t` selects bin
/// `floor(t * SCALE_STEPS)` and each bin shows the gradient at its lower edge.
pub fn blues(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let bin = ((t * SCALE_STEPS as f64) as usize).min(SCALE_STEPS - 1);
    let pos = bin as f64 / (SCALE_STEPS - 1) as f64 * (BLUES.len() - 1) as f64;
    let lo = (pos.floor() as usize).min(BLUES.len() - 2);
    let frac = pos - lo as f64;
    let (a, b) = (BLUES[lo], BLUES[lo + 1]);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// What a grid cell shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellClass {
    Absent,
    Unavailable,
    Overloaded,
    /// Normal load at the given scale intensity
    Load(f64),
}

impl CellClass {
    pub fn color(self) -> Rgb {
        match self {
            CellClass::Absent => ABSENT_COLOR,
            CellClass::Unavailable => UNAVAILABLE_COLOR,
            CellClass::Overloaded => OVERLOADED_COLOR,
            CellClass::Load(t) => blues(t),
        }
    }
}

/// Classify a cell from its load `w`, its core count `cpus` and the nominal
/// cores per node.
///
/// A node at zero load on all nominal cores sits at 0.4 on the scale; a fully
/// loaded one at 1.2, which the scale clamps to its darkest shade.
pub fn classify(w: f64, cpus: u32, ppn: u32) -> CellClass {
    if w < -1.5 {
        CellClass::Absent
    } else if w < -0.5 {
        CellClass::Unavailable
    } else if w > 1.1 * f64::from(ppn) {
        CellClass::Overloaded
    } else {
        CellClass::Load(((0.50 + w / f64::from(cpus)) / 1.25).clamp(0.0, 1.0))
    }
}
