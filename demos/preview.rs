//! Write an HTML preview of a color table.
//!
//! Usage: `cargo run --example preview -- FILE.cpt [VMIN VMAX [HINGE]]`
//!
//! Three bars are drawn: the model on \[0, 1\], the model over its own
//! range, and (for tables with a hinge) the model rescaled to
//! `[VMIN, VMAX]` around `HINGE`.

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use cpt_colormap::{read_color_table, ColorModel, ColorRange,
                   DynamicColorModel, ReadOptions};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

/// Colors of `d` for `n` data values evenly spread over `[a, b]`.
fn over_range(d: &DynamicColorModel, a: f64, b: f64, n: usize)
              -> cpt_colormap::Result<Vec<RGB8>> {
    let dt = (b - a) / (n - 1) as f64;
    (0 .. n).map(|i| d.color_of(a + i as f64 * dt)).collect()
}

fn preview(fh: &mut impl Write, m: ColorModel, new_range: &[f64],
           n: usize) -> Result<(), Err> {
    writeln!(fh, "<h3>{}</h3>", m.name())?;
    let colors: Vec<RGB8> = m.clone().range(0., 1., n).map(|(_, c)| c)
        .collect();
    table_of_colors(fh, &colors, 2, "no norm")?;
    let Some(mut d) = m.into_dynamic() else {
        writeln!(fh, "<p>No hinge: the table cannot be rescaled.</p>")?;
        return Ok(())
    };
    let (vmin, vmax) = (d.vmin(), d.vmax());
    let colors = over_range(&d, vmin, vmax, n)?;
    table_of_colors(fh, &colors, 2,
                    &format!("original norm [{vmin}, {vmax}], hinge {}",
                             d.hinge()))?;
    if let [vmin, vmax, rest @ ..] = new_range {
        d.set_range(Some(*vmin), Some(*vmax), rest.first().copied());
        // Show the new range within the extent of both ranges.
        let a = vmin.min(d.model().domain().0);
        let b = vmax.max(d.model().domain().1);
        let colors = over_range(&d, a, b, n)?;
        table_of_colors(fh, &colors, 2,
                        &format!("new norm [{vmin}, {vmax}], hinge {} \
                                  (shown on [{a}, {b}])", d.hinge()))?;
    }
    Ok(())
}

fn main() -> Result<(), Err> {
    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        return Err(format!("Usage: {} FILE.cpt [VMIN VMAX [HINGE]]",
                           args[0]).into())
    };
    let new_range = args[2..].iter().map(|a| a.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;
    let m = read_color_table(path, &ReadOptions::new())?;
    let mut fh = BufWriter::new(File::create("preview.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>cpt-colormap: {}</title>\n\
                  </head>\n\
                  <body>", m.name())?;
    let r = m.reversed(None);
    preview(&mut fh, m, &new_range, 300)?;
    preview(&mut fh, r, &new_range, 300)?;
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
