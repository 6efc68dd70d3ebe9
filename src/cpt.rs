//! Reading GMT color palette tables (`.cpt` files).
//!
//! Each segment line reads `z0 color0 z1 color1` where a color is
//! either three components (`r g b`, `r/g/b` or GMT's `h-s-v`) or a
//! GMT color name such as `black`.  Only the left boundary of each
//! line and the right boundary of the last one are kept: the right
//! boundary of a line must be the left boundary of the next one.

use std::{fs::File,
          io::{BufRead, BufReader},
          path::Path};
use rgb::RGB;
use crate::error::{Error, Result};
use crate::model::{ColorModel, DEFAULT_LUT_SIZE};
use crate::names::named_color;
use crate::normalize::ColorEncoding;

/// Options to read a color table.
///
/// Created by [`ReadOptions::new`] (or `default`), then refined with
/// the other methods.
#[derive(Clone, Debug)]
pub struct ReadOptions {
    name: Option<String>,
    hinge: Option<f64>,
    override_hinge: bool,
    lut_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions { name: None, hinge: Some(0.), override_hinge: false,
                      lut_size: DEFAULT_LUT_SIZE }
    }
}

impl ReadOptions {
    pub fn new() -> Self { Self::default() }

    /// Name of the model.  Defaults to the file name up to its first
    /// `.` (and to the empty string when reading from a stream).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Hinge used when the table does not declare one in a `HINGE`
    /// header, or always if [`override_hinge`][Self::override_hinge]
    /// is set.  Defaults to `Some(0.)`.
    pub fn hinge(mut self, hinge: Option<f64>) -> Self {
        self.hinge = hinge;
        self
    }

    /// Ignore the hinge declared in the header.
    pub fn override_hinge(mut self, yes: bool) -> Self {
        self.override_hinge = yes;
        self
    }

    /// Number of entries of the lookup table (at least 2).
    pub fn lut_size(mut self, n: usize) -> Self {
        self.lut_size = n;
        self
    }
}

/// Raw breakpoints of a table: `n + 1` positions for `n` segment lines
/// and the color components at each of them, in the table's encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints {
    pub positions: Vec<f64>,
    pub components: Vec<RGB<f64>>,
}

fn tokens(line: &str) -> Vec<&str> {
    // Drop a trailing `;label`.
    let body = line.split(';').next().unwrap_or("");
    body.split(|c: char| c.is_whitespace() || c == '/')
        .filter(|t| !t.is_empty())
        .collect()
}

fn number(tokens: &[&str], i: usize, line: usize,
          reason: &'static str) -> Result<f64> {
    match tokens.get(i) {
        Some(t) => t.parse().map_err(|_| Error::Parse {
            line, token: t.to_string(), reason }),
        None => Err(Error::Parse { line, token: String::new(),
                                   reason: "missing field" }),
    }
}

/// Parse the color starting at `tokens[i]`, returning it together with
/// the index of the next token.
fn color(tokens: &[&str], i: usize, line: usize)
         -> Result<(RGB<f64>, usize)> {
    let t = match tokens.get(i) {
        Some(t) => *t,
        None => return Err(Error::Parse { line, token: String::new(),
                                          reason: "missing color" }),
    };
    if let Ok(r) = t.parse::<f64>() {
        let g = number(tokens, i + 1, line, "expected three components")?;
        let b = number(tokens, i + 2, line, "expected three components")?;
        return Ok((RGB { r, g, b }, i + 3))
    }
    let dashed: Vec<f64> = t.split('-').filter_map(|x| x.parse().ok())
        .collect();
    if dashed.len() == 3 && t.split('-').count() == 3 {
        return Ok((RGB { r: dashed[0], g: dashed[1], b: dashed[2] }, i + 1))
    }
    match named_color(t) {
        Some(c) => Ok((RGB { r: c.r as f64, g: c.g as f64, b: c.b as f64 },
                       i + 1)),
        None => Err(Error::UnknownColorName { line, name: t.to_string() }),
    }
}

/// Parse segment lines, given with their line numbers.
///
/// Fails with [`Error::Empty`] if there is no line, with
/// [`Error::Discontinuous`] if a segment does not start where the
/// previous one ends and with [`Error::Parse`] if it ends below its
/// start.
pub fn parse_breakpoints<I, S>(lines: I) -> Result<Breakpoints>
where I: IntoIterator<Item = (usize, S)>,
      S: AsRef<str> {
    let mut positions = vec![];
    let mut components = vec![];
    // Right boundary of the latest line; its color is only needed for
    // the last line.
    let mut last: Option<(f64, Result<RGB<f64>>)> = None;
    for (n, line) in lines {
        let tok = tokens(line.as_ref());
        let z0 = number(&tok, 0, n, "position must be a number")?;
        if let Some((end, _)) = &last {
            if *end != z0 {
                return Err(Error::Discontinuous { line: n, expected: *end,
                                                  found: z0 })
            }
        }
        let (c0, i) = color(&tok, 1, n)?;
        let z1 = number(&tok, i, n, "position must be a number")?;
        if z1 < z0 {
            return Err(Error::Parse {
                line: n, token: tok[i].to_string(),
                reason: "segment ends before it starts" })
        }
        positions.push(z0);
        components.push(c0);
        // Trailing annotation fields (`L`, `U`, `B`) are ignored.
        last = Some((z1, color(&tok, i + 1, n).map(|(c, _)| c)));
    }
    let (z1, c1) = last.ok_or(Error::Empty)?;
    positions.push(z1);
    components.push(c1?);
    Ok(Breakpoints { positions, components })
}

/// Build a color model from the segment lines of a table (no header,
/// comment nor `B`/`F`/`N` line).
///
/// # Example
///
/// ```
/// use cpt_colormap::{parse_color_segments, ColorEncoding};
/// let m = parse_color_segments(&["-1 255 0 0 0 0 255 255",
///                                "0 0 0 255 1 0 255 0"],
///                              "rbg", Some(0.), ColorEncoding::Rgb, 256)?;
/// assert_eq!(m.hinge_position(), Some(0.5));
/// # Ok::<(), cpt_colormap::Error>(())
/// ```
pub fn parse_color_segments<S: AsRef<str>>(
    lines: &[S], name: &str, hinge: Option<f64>, encoding: ColorEncoding,
    lut_size: usize) -> Result<ColorModel>
{
    let bp = parse_breakpoints(lines.iter().enumerate()
                               .map(|(i, l)| (i + 1, l.as_ref())))?;
    build_model(bp, name, hinge, encoding, lut_size)
}

fn build_model(bp: Breakpoints, name: &str, hinge: Option<f64>,
               encoding: ColorEncoding, lut_size: usize)
               -> Result<ColorModel> {
    let colors = encoding.to_unit_rgb(&bp.components);
    ColorModel::from_breakpoints(name, bp.positions, colors, hinge,
                                 lut_size)
}

/// Read a color table from `reader`.
pub fn read_color_table_from<R: BufRead>(reader: R, opts: &ReadOptions)
                                         -> Result<ColorModel> {
    let mut encoding = ColorEncoding::Rgb;
    let mut hinge = opts.hinge;
    let mut segments = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let n = i + 1;
        if line.is_empty() { continue }
        if line.starts_with('#') {
            if line.contains("HSV") {
                encoding = ColorEncoding::Hsv;
            } else if line.contains("COLOR_MODEL") {
                if let Some((_, tag)) = line.split_once('=') {
                    encoding = tag.parse()?;
                }
            } else if line.contains("HINGE") && !opts.override_hinge {
                // `HARD_HINGE` and `SOFT_HINGE` carry no value.
                if let Some(v) = line.rsplit_once('=').map(|(_, v)| v.trim()) {
                    hinge = Some(v.parse().map_err(|_| Error::Parse {
                        line: n, token: v.to_string(),
                        reason: "hinge must be a number" })?);
                }
            }
            continue
        }
        if line.starts_with(['B', 'F', 'N']) { continue }
        segments.push((n, line.to_string()));
    }
    let bp = parse_breakpoints(segments)?;
    let name = opts.name.clone().unwrap_or_default();
    build_model(bp, &name, hinge, encoding, opts.lut_size)
}

/// Read the color table in the file `path`.
///
/// The hinge is, by order of priority, the one given in `opts` if
/// [`ReadOptions::override_hinge`] is set, the one declared by a
/// `HINGE = …` header, and the one given in `opts`.  The returned
/// model is dynamic if that hinge lies strictly inside the table's
/// range (see [`ColorModel::into_dynamic`]).
pub fn read_color_table(path: impl AsRef<Path>, opts: &ReadOptions)
                        -> Result<ColorModel> {
    let path = path.as_ref();
    let fh = BufReader::new(File::open(path)?);
    match &opts.name {
        Some(_) => read_color_table_from(fh, opts),
        None => {
            let name = path.file_name()
                .map(|f| f.to_string_lossy())
                .unwrap_or_default();
            let name = name.split('.').next().unwrap_or("").to_string();
            read_color_table_from(fh, &opts.clone().name(name))
        }
    }
}
