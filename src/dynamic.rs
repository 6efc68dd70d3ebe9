//! Rescaling of a hinged color model.

use rgb::RGB;
use crate::{from_unit, RGBColor};
use crate::error::{Error, Result};
use crate::model::ColorModel;
use crate::normalize::Normalizer;

/// A [`ColorModel`] with a hinge, stretched to a `[vmin, vmax]` range
/// by scaling the part below the hinge and the part above it
/// independently.
///
/// For instance a model with range \[-1, 1\] and hinge `0` may be
/// rescaled to \[-10, 5\] keeping its hinge at `0`:
///
/// ```text
/// <|min_color-----------hinge_color-----------max_color|>
/// -1                         0                         1
///                             \
///                              \
/// <|min_color-----------------hinge_color-----max_color|>
/// -10                              0                   5
/// ```
///
/// The range is per-instance mutable state and is not synchronized:
/// share a `DynamicColorModel` across threads only behind a lock, or
/// give each thread its own instance.
#[derive(Clone, Debug)]
pub struct DynamicColorModel {
    model: ColorModel,
    center_pos: f64, // hinge position in [0, 1], fixed by `model`
    vmin: f64,
    hinge: f64,
    vmax: f64,
}

impl DynamicColorModel {
    /// Wrap `model`, the range and hinge being initialized to those of
    /// `model`.  Return `None` if `model` has no hinge.
    pub fn new(model: ColorModel) -> Option<Self> {
        let hinge = model.hinge()?;
        let center_pos = model.hinge_position()?;
        let (vmin, vmax) = model.domain();
        Some(DynamicColorModel { model, center_pos, vmin, hinge, vmax })
    }

    /// Wrap `model` whose hinge sits at `center_pos` in \[0, 1\], with
    /// the given initial range.
    pub(crate) fn with_range(model: ColorModel, center_pos: f64, vmin: f64,
                             hinge: f64, vmax: f64) -> Self {
        DynamicColorModel { model, center_pos, vmin, hinge, vmax }
    }

    pub fn model(&self) -> &ColorModel { &self.model }

    pub fn name(&self) -> &str { self.model.name() }

    pub fn vmin(&self) -> f64 { self.vmin }

    pub fn hinge(&self) -> f64 { self.hinge }

    pub fn vmax(&self) -> f64 { self.vmax }

    /// Set the range to `[vmin, vmax]` around `hinge`.  Values given as
    /// `None` keep their current setting.
    ///
    /// Nothing is checked: `vmin > vmax` or a hinge outside the range
    /// are accepted as is, it is up to the caller to provide a sensible
    /// range.  [`derive_normalizer`][Self::derive_normalizer] only
    /// rejects `vmin == vmax`.
    pub fn set_range(&mut self, vmin: Option<f64>, vmax: Option<f64>,
                     hinge: Option<f64>) {
        if let Some(v) = vmin { self.vmin = v }
        if let Some(v) = vmax { self.vmax = v }
        if let Some(h) = hinge { self.hinge = h }
    }

    /// Return the map sending `vmin ↦ 0`, the hinge to its position in
    /// the underlying model and `vmax ↦ 1`, linear on both sides of the
    /// hinge.
    ///
    /// # Example
    ///
    /// ```
    /// use cpt_colormap::parse_color_segments;
    /// let m = parse_color_segments(&["-1 red 0 blue", "0 blue 1 green"],
    ///                              "rb", Some(0.), Default::default(), 256)?;
    /// let mut d = m.into_dynamic().unwrap();
    /// d.set_range(Some(-10.), Some(5.), None);
    /// let norm = d.derive_normalizer()?;
    /// assert_eq!(norm.apply(-5.), 0.25);
    /// assert_eq!(norm.apply(0.), 0.5);
    /// # Ok::<(), cpt_colormap::Error>(())
    /// ```
    pub fn derive_normalizer(&self) -> Result<Normalizer> {
        if self.vmin == self.vmax {
            return Err(Error::DegenerateRange { vmin: self.vmin,
                                                vmax: self.vmax })
        }
        Ok(Normalizer::TwoSlope { vmin: self.vmin, center: self.hinge,
                                  vmax: self.vmax,
                                  center_pos: self.center_pos })
    }

    /// The unit RGB color of the data value `v` under the current range.
    pub fn sample_value(&self, v: f64) -> Result<RGB<f64>> {
        Ok(self.model.sample(self.derive_normalizer()?.apply(v)))
    }

    /// [`sample_value`][Self::sample_value] in any color encoding.
    ///
    /// ```
    /// use rgb::RGB8;
    /// use cpt_colormap::parse_color_segments;
    /// let m = parse_color_segments(&["-1 red 0 red", "0 blue 1 blue"],
    ///                              "rb", Some(0.), Default::default(), 256)?;
    /// let d = m.into_dynamic().unwrap();
    /// assert_eq!(d.color_of::<RGB8>(0.5)?, RGB8::new(0, 0, 255));
    /// # Ok::<(), cpt_colormap::Error>(())
    /// ```
    pub fn color_of<Color: RGBColor>(&self, v: f64) -> Result<Color> {
        Ok(from_unit(self.sample_value(v)?))
    }

    /// The mirrored model (see [`ColorModel::reversed`]) with the hinge
    /// mirrored within the current range.
    pub fn reversed(&self, name: Option<&str>) -> Self {
        Self::with_range(self.model.reversed(name), 1. - self.center_pos,
                         self.vmin, self.vmin + self.vmax - self.hinge,
                         self.vmax)
    }

    /// Return the underlying model.
    pub fn into_model(self) -> ColorModel { self.model }
}
