//! Piecewise-linear color models.

use rgb::RGB;
use crate::{from_unit, ColorRange, RGBColor};
use crate::dynamic::DynamicColorModel;
use crate::error::Result;
use crate::segments::{self, Sample};

/// Default number of entries of the lookup table.
pub const DEFAULT_LUT_SIZE: usize = 256;

/// A continuous map from \[0, 1\] to colors, interpolating linearly
/// between samples and jumping where two samples share a position.
///
/// The model keeps the breakpoints it was built from (data positions,
/// unit RGB colors and hinge) so that it can be rescaled later by a
/// [`DynamicColorModel`].  It is immutable once built.
#[derive(Clone, Debug)]
pub struct ColorModel {
    name: String,
    samples: Vec<Sample>, // Invariant: length ≥ 2, sorted by `x` ∈ [0, 1]
    positions: Vec<f64>,
    colors: Vec<RGB<f64>>,
    hinge: Option<f64>,
    hinge_position: Option<f64>,
    lut: Vec<RGB<f64>>,
}

/// `n` evenly spaced values from `a` to `b` (both included).
pub(crate) fn linspace(a: f64, b: f64, n: usize)
                       -> impl Iterator<Item = f64> {
    let last = n.saturating_sub(1).max(1) as f64;
    (0 .. n).map(move |i| {
        if i + 1 == n && n > 1 { b }
        else { a + (b - a) * (i as f64 / last) }
    })
}

fn lerp(c0: RGB<f64>, c1: RGB<f64>, t: f64) -> RGB<f64> {
    RGB { r: c0.r + t * (c1.r - c0.r),
          g: c0.g + t * (c1.g - c0.g),
          b: c0.b + t * (c1.b - c0.b) }
}

impl ColorModel {
    /// Build a model from breakpoint `positions` (non-decreasing) and
    /// unit RGB `colors`, with an optional `hinge`.  See
    /// [`segments::build`] for the treatment of the hinge.
    pub fn from_breakpoints(name: impl Into<String>, positions: Vec<f64>,
                            colors: Vec<RGB<f64>>, hinge: Option<f64>,
                            lut_size: usize) -> Result<Self> {
        let segs = segments::build(&positions, &colors, hinge)?;
        let hinge_position = segs.hinge_position();
        Ok(Self::from_samples(name.into(), segs.samples, positions, colors,
                              segs.hinge, hinge_position, lut_size))
    }

    fn from_samples(name: String, samples: Vec<Sample>,
                    positions: Vec<f64>, colors: Vec<RGB<f64>>,
                    hinge: Option<f64>, hinge_position: Option<f64>,
                    lut_size: usize) -> Self {
        let mut m = ColorModel { name, samples, positions, colors, hinge,
                                 hinge_position, lut: vec![] };
        let lut = linspace(0., 1., lut_size.max(2)).map(|t| m.sample(t))
            .collect();
        m.lut = lut;
        m
    }

    /// A model interpolating `colors` evenly over \[0, 1\], the
    /// breakpoints being evenly spread over `[vmin, vmax]`.  No jump is
    /// introduced at the `hinge`.
    pub(crate) fn from_listed(name: String, colors: Vec<RGB<f64>>,
                              vmin: f64, vmax: f64, hinge: Option<f64>,
                              lut_size: usize) -> Self {
        let n = colors.len();
        let samples = linspace(0., 1., n).zip(&colors)
            .map(|(x, &c)| Sample { x, below: c, above: c })
            .collect();
        let positions = linspace(vmin, vmax, n).collect();
        let hinge_position = hinge.map(|h| (h - vmin) / (vmax - vmin));
        Self::from_samples(name, samples, positions, colors, hinge,
                           hinge_position, lut_size)
    }

    /// The name of the model.
    pub fn name(&self) -> &str { &self.name }

    /// Data positions of the breakpoints the model was built from.
    pub fn positions(&self) -> &[f64] { &self.positions }

    /// Unit RGB colors at [`positions`][Self::positions].
    pub fn colors(&self) -> &[RGB<f64>] { &self.colors }

    /// The hinge, in data units, if it lies strictly inside the range.
    pub fn hinge(&self) -> Option<f64> { self.hinge }

    /// The position of the hinge in \[0, 1\].
    pub fn hinge_position(&self) -> Option<f64> { self.hinge_position }

    /// Whether the model has a hinge.
    pub fn is_dynamic(&self) -> bool { self.hinge.is_some() }

    /// Data range `(first, last)` of the breakpoints.
    pub fn domain(&self) -> (f64, f64) {
        (self.positions[0], self.positions[self.positions.len() - 1])
    }

    /// The interpolation samples, sorted by position.
    pub fn samples(&self) -> &[Sample] { &self.samples }

    /// Return the unit RGB color at `t` ∈ \[0, 1\].  Values of `t`
    /// outside \[0, 1\] are clamped.  At a jump, the color reached from
    /// below is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use cpt_colormap::parse_color_segments;
    /// let m = parse_color_segments(&["0 black 10 white"], "gray",
    ///                              None, Default::default(), 256)?;
    /// assert_eq!(m.sample(0.5).r, 0.5);
    /// # Ok::<(), cpt_colormap::Error>(())
    /// ```
    pub fn sample(&self, t: f64) -> RGB<f64> {
        let t = t.clamp(0., 1.);
        let s = &self.samples;
        let k = s.partition_point(|s| s.x < t);
        if k == s.len() { return s[k - 1].above }
        if k == 0 || s[k].x == t { return s[k].below }
        let (s0, s1) = (&s[k - 1], &s[k]);
        lerp(s0.above, s1.below, (t - s0.x) / (s1.x - s0.x))
    }

    /// [`sample`][Self::sample] every value of `ts`.
    pub fn sample_all(&self, ts: &[f64]) -> Vec<RGB<f64>> {
        ts.iter().map(|&t| self.sample(t)).collect()
    }

    /// The lookup table: the model sampled at `lut_size` evenly
    /// spaced points of \[0, 1\].
    pub fn lut(&self) -> &[RGB<f64>] { &self.lut }

    pub fn lut_size(&self) -> usize { self.lut.len() }

    /// Return the lookup table entry for `t`, i.e. `lut[⌊t N⌋]` with
    /// `t` clamped to \[0, 1\] and `N` the size of the table.
    pub fn lookup(&self, t: f64) -> RGB<f64> {
        let n = self.lut.len();
        let i = (t.clamp(0., 1.) * n as f64) as usize;
        self.lut[i.min(n - 1)]
    }

    /// The same model with a lookup table of `lut_size` entries.
    pub fn resampled(&self, lut_size: usize) -> Self {
        let m = self.clone();
        Self::from_samples(m.name, m.samples, m.positions, m.colors,
                           m.hinge, m.hinge_position, lut_size)
    }

    /// Return the model mirrored on \[0, 1\]: the color at `t` of the
    /// new model is the color at `1 - t` of `self`.  Breakpoints are
    /// mirrored within the same data range.  The name defaults to the
    /// current one followed by `-reversed`.
    pub fn reversed(&self, name: Option<&str>) -> Self {
        let name = match name {
            Some(n) => n.to_string(),
            None => format!("{}-reversed", self.name),
        };
        let (first, last) = self.domain();
        let samples = self.samples.iter().rev()
            .map(|s| Sample { x: 1. - s.x, below: s.above, above: s.below })
            .collect();
        let positions = self.positions.iter().rev()
            .map(|p| first + last - p).collect();
        let colors = self.colors.iter().rev().copied().collect();
        Self::from_samples(name, samples, positions, colors,
                           self.hinge.map(|h| first + last - h),
                           self.hinge_position.map(|x| 1. - x),
                           self.lut.len())
    }

    /// Wrap the model for dynamic rescaling around its hinge.  Return
    /// `None` if the model has no hinge.
    pub fn into_dynamic(self) -> Option<DynamicColorModel> {
        DynamicColorModel::new(self)
    }
}

impl<Color: RGBColor> ColorRange<Color> for ColorModel {
    fn rgb(&self, t: f64) -> Color { from_unit(self.sample(t)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    const RED: RGB<f64> = RGB { r: 1., g: 0., b: 0. };
    const GREEN: RGB<f64> = RGB { r: 0., g: 1., b: 0. };
    const BLUE: RGB<f64> = RGB { r: 0., g: 0., b: 1. };

    fn hinged() -> ColorModel {
        ColorModel::from_breakpoints("hinged", vec![-1., 0., 1.],
                                     vec![RED, BLUE, GREEN], Some(0.), 256)
            .unwrap()
    }

    fn close(a: RGB<f64>, b: RGB<f64>) -> bool {
        (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9
            && (a.b - b.b).abs() < 1e-9
    }

    #[test]
    fn jump_at_hinge() {
        let m = hinged();
        assert_eq!(m.hinge_position(), Some(0.5));
        assert_eq!(m.sample(0.), RED);
        // The arm below the hinge holds the previous breakpoint color.
        assert_eq!(m.sample(0.25), RED);
        assert_eq!(m.sample(0.5), RED);
        assert!(close(m.sample(0.5 + 1e-12), BLUE));
        assert!(close(m.sample(0.75), RGB { r: 0., g: 0.5, b: 0.5 }));
        assert_eq!(m.sample(1.), GREEN);
    }

    #[test]
    fn hinge_near_last_keeps_end_color() {
        let m = ColorModel::from_breakpoints("top", vec![0., 1., 10.],
                                             vec![RED, BLUE, GREEN], Some(9.),
                                             256).unwrap();
        assert_eq!((m.sample(0.), m.sample(1.)), (RED, GREEN));
        assert_eq!(m.lut()[255], GREEN);
        assert_eq!(m.lookup(1.), GREEN);
        let d = m.into_dynamic().unwrap();
        assert_eq!(d.sample_value(10.).unwrap(), GREEN);
        assert_eq!(d.sample_value(0.).unwrap(), RED);
    }

    #[test]
    fn clamped_outside() {
        let m = hinged();
        assert_eq!(m.sample(-3.), RED);
        assert_eq!(m.sample(7.), GREEN);
        assert_eq!(m.sample_all(&[-1., 2.]), vec![RED, GREEN]);
    }

    #[test]
    fn lut_access() {
        let m = hinged();
        assert_eq!(m.lut_size(), 256);
        assert_eq!(m.lut()[0], RED);
        assert_eq!(m.lut()[255], GREEN);
        assert_eq!(m.lookup(1.), GREEN);
        assert_eq!(m.lookup(0.), RED);
        // ⌊0.5·256⌋ = 128 lies just above the hinge.
        assert!(m.lookup(0.5).b > 0.9);
        assert_eq!(m.resampled(3).lut().len(), 3);
        assert_eq!(m.resampled(0).lut_size(), 2);
    }

    #[test]
    fn reversed_mirrors() {
        let m = hinged();
        let r = m.reversed(None);
        assert_eq!(r.name(), "hinged-reversed");
        assert_eq!(r.positions(), &[-1., 0., 1.]);
        assert_eq!(r.colors(), &[GREEN, BLUE, RED]);
        assert_eq!(r.hinge(), Some(0.));
        assert_eq!(r.sample(0.), GREEN);
        assert_eq!(r.sample(1.), RED);
        // Reached from below in the mirrored model: the upper side.
        assert_eq!(r.sample(0.5), BLUE);
        assert_eq!(r.sample(0.75), RED);
        assert_eq!(m.reversed(Some("flipped")).name(), "flipped");
    }

    #[test]
    fn reversed_twice() {
        let m = hinged();
        let rr = m.reversed(None).reversed(None);
        assert_eq!(rr.name(), "hinged-reversed-reversed");
        for t in linspace(0., 1., 101) {
            assert!(close(m.sample(t), rr.sample(t)), "t = {t}");
        }
    }

    #[test]
    fn listed_model() {
        let m = ColorModel::from_listed("l".into(), vec![RED, GREEN, BLUE],
                                        -1., 1., Some(0.), 16);
        assert_eq!(m.positions(), &[-1., 0., 1.]);
        assert_eq!(m.hinge_position(), Some(0.5));
        assert_eq!(m.sample(0.5), GREEN);
        assert!(close(m.sample(0.25), RGB { r: 0.5, g: 0.5, b: 0. }));
    }

    #[test]
    fn as_color_range() {
        let m = hinged();
        let c: RGB8 = m.rgb(1.);
        assert_eq!(c, RGB8::new(0, 255, 0));
        let v: Vec<(f64, RGB8)> = m.range(0., 1., 3).collect();
        assert_eq!(v, vec![(0., RGB8::new(255, 0, 0)),
                           (0.5, RGB8::new(255, 0, 0)),
                           (1., RGB8::new(0, 255, 0))]);
    }

    #[test]
    fn spaced() {
        let v: Vec<f64> = linspace(-1., 1., 5).collect();
        assert_eq!(v, vec![-1., -0.5, 0., 0.5, 1.]);
        assert_eq!(linspace(2., 3., 1).collect::<Vec<_>>(), vec![2.]);
        assert_eq!(linspace(2., 3., 0).count(), 0);
    }
}
