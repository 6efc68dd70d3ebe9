//! GMT color palette tables as continuous color models.
//!
//! - [`read_color_table`] reads a `.cpt` file into a [`ColorModel`].
//! - [`DynamicColorModel`] rescales a model with a hinge (a pivot
//!   value, e.g. sea level) to any range, stretching the colors below
//!   and above the hinge independently.
//! - [`join_color_tables`] glues two models into a diverging one.
//!
//! Models are sampled on \[0, 1\] with [`ColorModel::sample`] or, for
//! any [`RGBColor`] type, through the [`ColorRange`] trait.
//!
//! ```
//! use std::io::Cursor;
//! use rgb::RGB8;
//! use cpt_colormap::{read_color_table_from, ColorRange, ReadOptions};
//! let cpt = "# HINGE = 0\n-100 blue 0 blue\n0 darkgreen 2000 white\n";
//! let m = read_color_table_from(Cursor::new(cpt),
//!                               &ReadOptions::new().name("topo"))?;
//! let deep: RGB8 = m.rgb(0.);
//! assert_eq!(deep, RGB8::new(0, 0, 255));
//! let mut d = m.into_dynamic().unwrap();
//! d.set_range(Some(-5000.), Some(500.), None);
//! let sea = d.sample_value(-2500.)?;
//! assert_eq!(sea.b, 1.);
//! # Ok::<(), cpt_colormap::Error>(())
//! ```

use std::marker::PhantomData;
use rgb::{RGB, RGBA, RGB8, RGB16, RGBA8, RGBA16};

mod cpt;
mod dynamic;
mod error;
mod join;
mod model;
mod names;
mod normalize;
mod segments;

pub use cpt::{parse_breakpoints, parse_color_segments, read_color_table,
              read_color_table_from, Breakpoints, ReadOptions};
pub use dynamic::DynamicColorModel;
pub use error::{Error, Result};
pub use join::{join_color_tables, Registry};
pub use model::{ColorModel, DEFAULT_LUT_SIZE};
pub use names::named_color;
pub use normalize::{hsv_to_rgb, ColorEncoding, Normalizer};
pub use segments::Sample;

/// Colors indexed by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// The color at `t`, clamped to \[0, 1\].
    fn rgb(&self, t: f64) -> Color;

    /// Iterate over `n` evenly spaced values from `a` to `b`, both
    /// included, each with its color.  `a > b` is allowed; the first
    /// value always gets the color at `0` and the last the color at `1`.
    fn range(self, a: f64, b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        Range { colors: self, color: PhantomData, a, b, n,
                front: 0, back: n }
    }
}

/// Iterator returned by [`ColorRange::range`].
pub struct Range<R, Color> {
    colors: R,
    color: PhantomData<Color>,
    a: f64,
    b: f64,
    n: usize,
    front: usize, // next index yielded by `next`
    back: usize, // one past the next index yielded by `next_back`
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    fn nth_value(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            return (self.a, self.colors.rgb(0.))
        }
        if k + 1 == self.n {
            return (self.b, self.colors.rgb(1.))
        }
        let t = k as f64 / (self.n - 1) as f64;
        ((1. - t) * self.a + t * self.b, self.colors.rgb(t))
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back { return None }
        self.front += 1;
        Some(self.nth_value(self.front - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn len(&self) -> usize { self.back - self.front }
}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back { return None }
        self.back -= 1;
        Some(self.nth_value(self.back))
    }
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    /// Integer encodings round to the nearest value.
    fn from_rgba(rgba: RGBA<f64>) -> Self;
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA { r: self.r, g: self.g, b: self.b, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { RGB { r: c.r, g: c.g, b: c.b } }
}

/// Convert a unit RGB color (components in \[0, 1\]) to `Color`.
pub(crate) fn from_unit<Color: RGBColor>(c: RGB<f64>) -> Color {
    Color::from_rgba(RGBA { r: 255. * c.r, g: 255. * c.g, b: 255. * c.b,
                            a: 255. })
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,
               b: c.b.round() as u8 }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: c.r.round() as u16,  g: c.g.round() as u16,
                b: c.b.round() as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r.round() as u8,  g: c.g.round() as u8,
                b: c.b.round() as u8, a: c.a.round() as u8 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: c.r.round() as u16,  g: c.g.round() as u16,
                 b: c.b.round() as u16, a: c.a.round() as u16 }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gray() -> ColorModel {
        parse_color_segments(&["0 black 10 white"], "gray", None,
                             ColorEncoding::Rgb, 256).unwrap()
    }

    #[test]
    fn gray_range() {
        for (i, (x, c)) in ColorRange::<RGB8>::range(gray(), 0., 10., 11)
            .enumerate() {
            assert!((x - i as f64).abs() <= 1e-14, "{} ≉ {}", x, i);
            let v = 25.5 * i as f64;
            assert!((c.r as f64 - v).abs() <= 0.5 && c.r == c.g && c.g == c.b,
                    "{:?} at {}", c, i);
        }
    }

    #[test]
    fn range_both_ends() {
        let mut r = ColorRange::<RGBA8>::range(gray(), 0., 1., 3);
        assert_eq!(r.len(), 3);
        assert_eq!(r.next_back().map(|(x, c)| (x, c.r)), Some((1., 255)));
        assert_eq!(r.next().map(|(x, c)| (x, c.a)), Some((0., 255)));
        assert_eq!(r.len(), 1);
        assert_eq!(r.next().map(|(x, _)| x), Some(0.5));
        assert!(r.next().is_none());
        assert_eq!(ColorRange::<RGB16>::range(gray(), 0., 1., 0).count(), 0);
    }

    #[test]
    fn rgb_color_round_trip() {
        let c = RGBA8::new(1, 2, 3, 4);
        assert_eq!(RGBA8::from_rgba(c.to_rgba()), c);
        let c = RGB8::new(10, 20, 30);
        assert_eq!(RGB8::from_rgba(c.to_rgba()), c);
        let c = RGBA16::new(1000, 2, 3, 4);
        assert_eq!(RGBA16::from_rgba(c.to_rgba()), c);
        let c = RGB { r: 12.5, g: 0., b: 255. };
        assert_eq!(c.to_rgba().a, 255.);
        assert_eq!(RGB::<f64>::from_rgba(c.to_rgba()), c);
    }

    #[test]
    fn unscaled_color_range() {
        let v: Vec<(f64, RGB<f64>)> = gray().range(10., 0., 3).collect();
        assert_eq!(v, vec![(10., RGB { r: 0., g: 0., b: 0. }),
                           (5., RGB { r: 127.5, g: 127.5, b: 127.5 }),
                           (0., RGB { r: 255., g: 255., b: 255. })]);
        let mut r = ColorRange::<RGB<f64>>::range(gray(), 0., 1., 1);
        assert_eq!(r.next_back(), Some((0., RGB { r: 0., g: 0., b: 0. })));
        assert_eq!(r.len(), 0);
    }

    fn unit(c: (u8, u8, u8)) -> RGB<f64> {
        RGB { r: c.0 as f64 / 255., g: c.1 as f64 / 255.,
              b: c.2 as f64 / 255. }
    }

    fn close(a: RGB<f64>, b: RGB<f64>, eps: f64) -> bool {
        (a.r - b.r).abs() <= eps && (a.g - b.g).abs() <= eps
            && (a.b - b.b).abs() <= eps
    }

    prop_compose! {
        fn table()(start in -50f64..50.,
                   steps in prop::collection::vec(
                       (0.1f64..10., any::<(u8, u8, u8)>()), 3..8),
                   first in any::<(u8, u8, u8)>())
                  -> (Vec<f64>, Vec<RGB<f64>>) {
            let mut positions = vec![start];
            let mut colors = vec![unit(first)];
            for (dz, c) in steps {
                positions.push(positions[positions.len() - 1] + dz);
                colors.push(unit(c));
            }
            (positions, colors)
        }
    }

    proptest! {
        #[test]
        fn boundary_colors((positions, colors) in table()) {
            let m = ColorModel::from_breakpoints("t", positions, colors.clone(),
                                                 None, 64).unwrap();
            prop_assert_eq!(m.sample(0.), colors[0]);
            prop_assert_eq!(m.sample(1.), colors[colors.len() - 1]);
        }

        #[test]
        fn jump_at_hinge((positions, colors) in table(),
                         k in any::<prop::sample::Index>()) {
            let k = 1 + k.index(positions.len() - 2);
            let hinge = positions[k];
            let m = ColorModel::from_breakpoints("t", positions, colors.clone(),
                                                 Some(hinge), 64).unwrap();
            let x = m.hinge_position().unwrap();
            prop_assert!(0. < x && x < 1.);
            prop_assert_eq!(m.sample(x), colors[k - 1]);
            prop_assert!(close(m.sample(x + 1e-9), colors[k], 1e-4));
        }

        #[test]
        fn reversed_twice((positions, colors) in table(),
                          hinge in -50f64..100.,
                          ts in prop::collection::vec(0f64..=1., 1..20)) {
            let m = ColorModel::from_breakpoints("t", positions, colors,
                                                 Some(hinge), 64).unwrap();
            let rr = m.reversed(None).reversed(None);
            for t in ts {
                prop_assert!(close(m.sample(t), rr.sample(t), 1e-9));
            }
        }

        #[test]
        fn normalizer_ends((positions, colors) in table(),
                           vmin in -1e6f64..1e6, vmax in -1e6f64..1e6,
                           hinge in -1e6f64..1e6) {
            prop_assume!(vmin != vmax);
            let h = positions[1];
            let m = ColorModel::from_breakpoints("t", positions, colors,
                                                 Some(h), 64).unwrap();
            let mut d = m.into_dynamic().unwrap();
            d.set_range(Some(vmin), Some(vmax), Some(hinge));
            let n = d.derive_normalizer().unwrap();
            prop_assert_eq!(n.apply(vmin), 0.);
            prop_assert_eq!(n.apply(vmax), 1.);
        }
    }
}
