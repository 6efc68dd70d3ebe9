//! Joining two color models into a diverging one.

use std::collections::HashMap;
use std::path::Path;
use crate::cpt::{read_color_table, ReadOptions};
use crate::dynamic::DynamicColorModel;
use crate::error::{Error, Result};
use crate::model::{linspace, ColorModel};

/// Return the dynamic model made of `lut_size / 2` colors sampled
/// evenly from `first` followed by as many sampled from `second`.
///
/// The result always has range \[-1, 1\] and hinge `0`, whatever the
/// ranges of the inputs, and is named `"<first>-><second>"`.  No jump
/// is introduced between the two halves.
///
/// # Example
///
/// ```
/// use cpt_colormap::{join_color_tables, parse_color_segments};
/// let cold = parse_color_segments(&["0 blue 1 white"], "cold", None,
///                                 Default::default(), 256)?;
/// let hot = parse_color_segments(&["0 white 1 red"], "hot", None,
///                                Default::default(), 256)?;
/// let d = join_color_tables(&cold, &hot, 256);
/// assert_eq!(d.name(), "cold->hot");
/// assert_eq!((d.vmin(), d.hinge(), d.vmax()), (-1., 0., 1.));
/// # Ok::<(), cpt_colormap::Error>(())
/// ```
pub fn join_color_tables(first: &ColorModel, second: &ColorModel,
                         lut_size: usize) -> DynamicColorModel {
    let half = (lut_size / 2).max(1);
    let colors = linspace(0., 1., half).map(|t| first.sample(t))
        .chain(linspace(0., 1., half).map(|t| second.sample(t)))
        .collect();
    let name = format!("{}->{}", first.name(), second.name());
    let model = ColorModel::from_listed(name, colors, -1., 1., Some(0.),
                                        lut_size);
    DynamicColorModel::with_range(model, 0.5, -1., 0., 1.)
}

/// A collection of color models, looked up by name.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    models: HashMap<String, ColorModel>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    /// Register `model` under its name, returning the model previously
    /// registered under that name, if any.
    pub fn insert(&mut self, model: ColorModel) -> Option<ColorModel> {
        self.models.insert(model.name().to_string(), model)
    }

    /// Read the color table at `path` and register it.
    pub fn read(&mut self, path: impl AsRef<Path>, opts: &ReadOptions)
                -> Result<&ColorModel> {
        let model = read_color_table(path, opts)?;
        let name = model.name().to_string();
        self.insert(model);
        self.get(&name)
    }

    pub fn get(&self, name: &str) -> Result<&ColorModel> {
        self.models.get(name).ok_or_else(|| Error::UnknownModel(name.into()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize { self.models.len() }

    pub fn is_empty(&self) -> bool { self.models.is_empty() }

    /// [`join_color_tables`] for two registered models.
    pub fn join(&self, first: &str, second: &str, lut_size: usize)
                -> Result<DynamicColorModel> {
        Ok(join_color_tables(self.get(first)?, self.get(second)?, lut_size))
    }
}
