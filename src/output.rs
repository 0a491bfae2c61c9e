// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a grid into an image file.
//!
//! Members of the set are black and everything else is white.  The
//! first row of the grid (the bottom of the region) becomes the top
//! line of the image, so the picture comes out flipped vertically
//! relative to the usual orientation of the complex plane.

use image::ColorType;
use log::debug;
use std::convert::TryFrom;
use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Gray level of a member pixel.
pub const INSIDE: u8 = 0;
/// Gray level of a pixel that escaped.
pub const OUTSIDE: u8 = 255;

/// One 8-bit gray sample per cell, in grid order.
pub fn pixelate(grid: &Grid) -> Vec<u8> {
    grid.cells()
        .iter()
        .map(|&member| if member { INSIDE } else { OUTSIDE })
        .collect()
}

/// Write `grid` as a grayscale image.  The format is picked from the
/// extension of `path`.
pub fn write_image<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<()> {
    let path = path.as_ref();
    let width = u32::try_from(grid.cols())
        .map_err(|_| Error::invalid(format!("{} columns do not fit in an image", grid.cols())))?;
    let height = u32::try_from(grid.rows())
        .map_err(|_| Error::invalid(format!("{} rows do not fit in an image", grid.rows())))?;
    let pixels = pixelate(grid);
    image::save_buffer(path, &pixels, width, height, ColorType::Gray(8))?;
    debug!("wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}
