#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot and Julia set plotter
//!
//! Both sets are drawn from the same recurrence: take a complex number
//! `z`, square it, add a constant `c`, and repeat.  Some orbits wander
//! off to infinity; others stay trapped near the origin forever.  The
//! Mandelbrot set is the collection of constants `c` for which the
//! orbit of zero stays trapped.  A Julia set turns the question around:
//! it fixes `c` and collects the starting points whose orbits stay
//! trapped.
//!
//! Nobody can iterate forever, so this crate iterates a fixed number
//! of times and watches whether the orbit leaves a disc around the
//! origin.  Each pixel of the output samples one point of a rectangle
//! of the complex plane, and the resulting grid of yes/no answers is
//! written out as a black and white image.

pub mod cli;
pub mod config;
pub mod error;
pub mod escape;
pub mod grid;
pub mod output;
pub mod plane;
pub mod render;

pub use config::PlotConfig;
pub use error::{Error, Result};
pub use escape::{escape_time, is_in_julia, is_in_mandelbrot, membership, EscapeCheck};
pub use grid::Grid;
pub use plane::{PlaneMapper, Region};
pub use render::{Mode, Progress, Renderer};

use log::info;

/// Render the plot `config` describes and write it to
/// `config.output`.  Returns the grid that was written.
pub fn plot(config: &PlotConfig) -> Result<Grid> {
    let renderer = config.renderer()?;
    info!(
        "rendering {:?} over {} .. {} with {} iterations on {} threads",
        renderer.mode(),
        config.zmin,
        config.zmax,
        config.max_iter,
        config.threads
    );
    let grid = renderer.render(config.threads)?;
    output::write_image(&config.output, &grid)?;
    Ok(grid)
}
