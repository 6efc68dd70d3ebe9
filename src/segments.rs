//! Turn breakpoints into interpolation samples, keeping the hinge sharp.

use rgb::RGB;
use crate::error::{Error, Result};
use crate::normalize::Normalizer;

/// One interpolation sample at normalized position `x`.  Left of `x`
/// the curve ends in `below`; right of `x` it starts from `above`.
/// Both are equal except where the curve jumps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub below: RGB<f64>,
    pub above: RGB<f64>,
}

impl Sample {
    fn flat(x: f64, c: RGB<f64>) -> Self { Sample { x, below: c, above: c } }
}

/// Interpolation samples built from a table's breakpoints.
#[derive(Clone, Debug)]
pub struct Segments {
    /// Sorted by `x`; two samples share the hinge position.
    pub samples: Vec<Sample>,
    /// The hinge if it lies strictly inside the table's range.
    pub hinge: Option<f64>,
    /// Index of the breakpoint closest to the hinge.
    pub hinge_index: Option<usize>,
    pub normalizer: Normalizer,
}

impl Segments {
    /// Whether the table has a hinge strictly inside its range.
    pub fn is_dynamic(&self) -> bool { self.hinge.is_some() }

    /// Normalized position of the hinge.
    pub fn hinge_position(&self) -> Option<f64> {
        self.hinge.map(|h| self.normalizer.apply(h))
    }
}

/// Build the samples for `positions` (non-decreasing) and the unit RGB
/// `colors` at these positions.
///
/// A `hinge` outside the open interval `(positions[0], positions[n-1])`
/// is dropped.  Otherwise two samples are stacked at the breakpoint
/// closest to the hinge so that interpolation jumps there from the
/// color of the previous breakpoint to the color of that breakpoint.
/// Nothing is stacked when that breakpoint is the first or the last
/// one: both end colors stay reachable.
///
/// Fails with [`Error::Unsorted`] if `positions` decrease somewhere.
pub fn build(positions: &[f64], colors: &[RGB<f64>], hinge: Option<f64>)
             -> Result<Segments> {
    debug_assert_eq!(positions.len(), colors.len());
    let (first, last) = match (positions.first(), positions.last()) {
        (Some(&first), Some(&last)) if positions.len() >= 2 => (first, last),
        _ => return Err(Error::Empty),
    };
    if let Some(i) = positions.windows(2).position(|w| w[1] < w[0]) {
        return Err(Error::Unsorted { index: i + 1, previous: positions[i],
                                     found: positions[i + 1] })
    }
    if !(first < last) {
        return Err(Error::DegenerateRange { vmin: first, vmax: last })
    }
    let hinge = hinge.filter(|&h| first < h && h < last);
    let normalizer = match hinge {
        Some(h) => Normalizer::TwoSlope {
            vmin: first, center: h, vmax: last,
            center_pos: (h - first) / (last - first) },
        None => Normalizer::Linear { vmin: first, vmax: last },
    };
    let hinge_index = hinge.map(|h| closest(positions, h));

    let n = positions.len();
    let mut samples = Vec::with_capacity(n + 1);
    for (i, (&p, &c)) in positions.iter().zip(colors).enumerate() {
        let x = normalizer.apply(p);
        if hinge_index == Some(i) && 0 < i && i + 1 < n {
            samples.push(Sample { x, below: colors[i - 1], above: c });
        }
        samples.push(Sample::flat(x, c));
    }
    Ok(Segments { samples, hinge, hinge_index, normalizer })
}

/// Index of the first position closest to `v`.
fn closest(positions: &[f64], v: f64) -> usize {
    let mut best = 0;
    for (i, p) in positions.iter().enumerate() {
        if (p - v).abs() < (positions[best] - v).abs() { best = i }
    }
    best
}
