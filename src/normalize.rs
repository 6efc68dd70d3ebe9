//! Color encodings and position normalizers.

use std::str::FromStr;
use rgb::RGB;
use crate::error::Error;

/// The way color components are written in a color table.  One
/// encoding applies to a whole table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorEncoding {
    /// Red, green and blue components in \[0, 255\].
    #[default]
    Rgb,
    /// Hue in degrees in \[0, 360\), saturation and value in \[0, 1\].
    Hsv,
}

impl FromStr for ColorEncoding {
    type Err = Error;

    /// Accepts the tags found in `COLOR_MODEL` headers: `RGB`, `HSV`
    /// and `+HSV` (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RGB" | "+RGB" => Ok(ColorEncoding::Rgb),
            "HSV" | "+HSV" => Ok(ColorEncoding::Hsv),
            _ => Err(Error::UnsupportedColorModel(s.trim().to_string())),
        }
    }
}

impl ColorEncoding {
    /// Convert raw components, as read from the table, to RGB colors
    /// with components in \[0, 1\].
    pub fn to_unit_rgb(self, raw: &[RGB<f64>]) -> Vec<RGB<f64>> {
        match self {
            ColorEncoding::Rgb => raw.iter()
                .map(|c| RGB { r: c.r / 255., g: c.g / 255., b: c.b / 255. })
                .collect(),
            ColorEncoding::Hsv => raw.iter()
                .map(|c| hsv_to_rgb(c.r / 360., c.g, c.b))
                .collect(),
        }
    }
}

/// Convert the color with hue `h` ∈ \[0, 1\], saturation `s` and value
/// `v` to RGB with components in \[0, 1\].  A hue of `1.` is the same
/// as `0.`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> RGB<f64> {
    let h6 = 6. * h;
    let f = h6.fract();
    let sector = h6.trunc().rem_euclid(6.);
    let p = v * (1. - s);
    let q = v * (1. - s * f);
    let t = v * (1. - s * (1. - f));
    let (r, g, b) = {
        if sector == 0.      { (v, t, p) }
        else if sector == 1. { (q, v, p) }
        else if sector == 2. { (p, v, t) }
        else if sector == 3. { (p, q, v) }
        else if sector == 4. { (t, p, v) }
        else                 { (v, p, q) }
    };
    RGB { r, g, b }
}

/// A map from data values to the \[0, 1\] sampling domain of a
/// [`ColorModel`][crate::ColorModel].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalizer {
    /// Plain min-max normalization.  Values outside `[vmin, vmax]` are
    /// mapped outside \[0, 1\].
    Linear { vmin: f64, vmax: f64 },
    /// Two linear pieces meeting at `center`, sending `vmin ↦ 0`,
    /// `center ↦ center_pos` and `vmax ↦ 1`.  Results are clamped to
    /// \[0, 1\].
    TwoSlope { vmin: f64, center: f64, vmax: f64, center_pos: f64 },
}

impl Normalizer {
    /// Map `v` to the sampling domain.
    pub fn apply(&self, v: f64) -> f64 {
        match *self {
            Normalizer::Linear { vmin, vmax } => (v - vmin) / (vmax - vmin),
            Normalizer::TwoSlope { vmin, center, vmax, center_pos } => {
                if v == vmin { return 0. }
                if v == vmax { return 1. }
                if v == center { return center_pos }
                // `v` lies on the upper arm when it is on the same side
                // of `center` as `vmax` (this also copes with vmin > vmax).
                let upper = (v - center) * (vmax - center) > 0.;
                let x = if upper {
                    if vmax == center { 1. }
                    else {
                        center_pos
                            + (1. - center_pos) * (v - center) / (vmax - center)
                    }
                } else if vmin == center { 0. }
                else {
                    center_pos - center_pos * (v - center) / (vmin - center)
                };
                x.clamp(0., 1.)
            }
        }
    }

    /// Map every value of `vs`.
    pub fn apply_all(&self, vs: &[f64]) -> Vec<f64> {
        vs.iter().map(|&v| self.apply(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: RGB<f64>, b: RGB<f64>) -> bool {
        (a.r - b.r).abs() < 1e-12 && (a.g - b.g).abs() < 1e-12
            && (a.b - b.b).abs() < 1e-12
    }

    #[test]
    fn hsv_primaries() {
        assert!(close(hsv_to_rgb(0., 1., 1.), RGB { r: 1., g: 0., b: 0. }));
        assert!(close(hsv_to_rgb(120. / 360., 1., 1.),
                      RGB { r: 0., g: 1., b: 0. }));
        assert!(close(hsv_to_rgb(240. / 360., 1., 1.),
                      RGB { r: 0., g: 0., b: 1. }));
        assert!(close(hsv_to_rgb(1., 1., 1.), RGB { r: 1., g: 0., b: 0. }));
        assert!(close(hsv_to_rgb(0.3, 0., 0.4),
                      RGB { r: 0.4, g: 0.4, b: 0.4 }));
    }

    #[test]
    fn hsv_intermediate_hue() {
        // 30° is halfway between red and yellow.
        assert!(close(hsv_to_rgb(30. / 360., 1., 1.),
                      RGB { r: 1., g: 0.5, b: 0. }));
        assert!(close(hsv_to_rgb(300. / 360., 0.5, 0.8),
                      RGB { r: 0.8, g: 0.4, b: 0.8 }));
    }

    #[test]
    fn encoding_tags() {
        assert_eq!("RGB".parse::<ColorEncoding>().unwrap(), ColorEncoding::Rgb);
        assert_eq!(" +hsv".parse::<ColorEncoding>().unwrap(),
                   ColorEncoding::Hsv);
        match "CMYK".parse::<ColorEncoding>() {
            Err(Error::UnsupportedColorModel(tag)) => assert_eq!(tag, "CMYK"),
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn rgb_to_unit() {
        let raw = [RGB { r: 255., g: 0., b: 51. }];
        let unit = ColorEncoding::Rgb.to_unit_rgb(&raw);
        assert!(close(unit[0], RGB { r: 1., g: 0., b: 0.2 }));
    }

    #[test]
    fn two_slope_arms() {
        let n = Normalizer::TwoSlope { vmin: -10., center: 0., vmax: 5.,
                                       center_pos: 0.5 };
        assert_eq!(n.apply(-10.), 0.);
        assert_eq!(n.apply(-5.), 0.25);
        assert_eq!(n.apply(0.), 0.5);
        assert_eq!(n.apply(2.5), 0.75);
        assert_eq!(n.apply(5.), 1.);
        assert_eq!(n.apply(100.), 1.);
        assert_eq!(n.apply(-100.), 0.);
    }

    #[test]
    fn two_slope_inverted_range() {
        let n = Normalizer::TwoSlope { vmin: 4., center: 2., vmax: 0.,
                                       center_pos: 0.25 };
        assert_eq!(n.apply(4.), 0.);
        assert_eq!(n.apply(3.), 0.125);
        assert_eq!(n.apply(1.), 0.625);
        assert_eq!(n.apply(0.), 1.);
    }

    #[test]
    fn linear_is_unclamped() {
        let n = Normalizer::Linear { vmin: 0., vmax: 10. };
        assert_eq!(n.apply_all(&[0., 5., 10., 20.]), vec![0., 0.5, 1., 2.]);
    }
}
