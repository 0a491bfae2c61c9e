// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The settings of a single plot, with the defaults each fractal
//! starts from.

use num::Complex;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::escape::{EscapeCheck, DIVERGENCE_THRESHOLD};
use crate::plane::Region;
use crate::render::{Mode, Renderer};

/// Everything a plot needs, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotConfig {
    /// Where the image goes.
    pub output: PathBuf,
    /// Lower-left corner of the plotted region.
    pub zmin: Complex<f64>,
    /// Upper-right corner of the plotted region.
    pub zmax: Complex<f64>,
    /// Distance between samples on both axes.
    pub pixel_size: f64,
    /// Iterations per pixel.
    pub max_iter: usize,
    /// Render worker threads.
    pub threads: usize,
    /// Mandelbrot, or Julia with its parameter.
    pub mode: Mode,
}

impl PlotConfig {
    /// The whole Mandelbrot set at a thousand pixels per unit.
    pub fn mandelbrot() -> PlotConfig {
        PlotConfig {
            output: PathBuf::from("Mandelbrot.png"),
            zmin: Complex::new(-2.0, -1.5),
            zmax: Complex::new(1.0, 1.5),
            pixel_size: 1e-3,
            max_iter: 50,
            threads: num_cpus::get(),
            mode: Mode::Mandelbrot,
        }
    }

    /// The Julia set of `-0.8 + 0.156i`.
    pub fn julia() -> PlotConfig {
        PlotConfig {
            output: PathBuf::from("Julia.png"),
            zmin: Complex::new(-2.0, -1.0),
            zmax: Complex::new(2.0, 1.0),
            pixel_size: 1e-3,
            max_iter: 10,
            threads: num_cpus::get(),
            mode: Mode::Julia {
                c: Complex::new(-0.8, 0.156),
                threshold: DIVERGENCE_THRESHOLD,
                check: EscapeCheck::FinalIterate,
            },
        }
    }

    /// Check the settings and build the renderer they describe.
    pub fn renderer(&self) -> Result<Renderer> {
        if self.threads == 0 {
            return Err(Error::invalid("at least one render thread is required"));
        }
        let region = Region::new(self.zmin, self.zmax)?;
        Renderer::new(region, self.pixel_size, self.max_iter, self.mode)
    }
}
