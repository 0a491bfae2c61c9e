// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which relates a rectangle on the
//! complex plane, sampled every `pixel_size` units along both axes, to
//! an integral grid of pixels with its origin at 0,0.
//!
//! Sampling starts exactly at the lower-left corner and stops before
//! the upper-right one, so a span `s` sampled with pitch `p` yields
//! `ceil(s / p)` samples, the last of which may fall short of the
//! corner.
use num::Complex;

use crate::error::{Error, Result};

/// The lower-left (`zmin`) and upper-right (`zmax`) corners of an
/// axis-aligned rectangle on the complex plane, treating the real part
/// as x and the imaginary part as y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    zmin: Complex<f64>,
    zmax: Complex<f64>,
}

impl Region {
    /// Fails unless both corners are finite and `zmin` is strictly
    /// below and to the left of `zmax`.
    pub fn new(zmin: Complex<f64>, zmax: Complex<f64>) -> Result<Region> {
        if !(zmin.re.is_finite() && zmin.im.is_finite()) {
            return Err(Error::invalid(format!("zmin {} is not finite", zmin)));
        }
        if !(zmax.re.is_finite() && zmax.im.is_finite()) {
            return Err(Error::invalid(format!("zmax {} is not finite", zmax)));
        }
        if zmin.re >= zmax.re {
            return Err(Error::invalid(format!(
                "zmin {} is not to the left of zmax {}",
                zmin, zmax
            )));
        }
        if zmin.im >= zmax.im {
            return Err(Error::invalid(format!(
                "zmin {} is not below zmax {}",
                zmin, zmax
            )));
        }
        Ok(Region { zmin, zmax })
    }

    /// Lower-left corner.
    pub fn zmin(&self) -> Complex<f64> {
        self.zmin
    }

    /// Upper-right corner.
    pub fn zmax(&self) -> Complex<f64> {
        self.zmax
    }

    /// Width along the real axis.
    pub fn real_span(&self) -> f64 {
        self.zmax.re - self.zmin.re
    }

    /// Height along the imaginary axis.
    pub fn imag_span(&self) -> f64 {
        self.zmax.im - self.zmin.im
    }
}

/// Column and row of a cell in the grid.  Row 0 is the bottom of the
/// region (the smallest imaginary part).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Largest grid a mapper will describe, in pixels.  At one byte per
/// cell that is 4 GiB, well past any image worth plotting.
pub const MAX_PIXELS: u64 = 1 << 32;

/// Number of samples taken across `span` at `step` intervals.
fn samples(span: f64, step: f64) -> f64 {
    (span / step).ceil()
}

/// Maps pixels of an integral grid onto sample points of a region of
/// the complex plane.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    region: Region,
    pixel_size: f64,
    cols: usize,
    rows: usize,
}

impl PlaneMapper {
    /// Fails on a non-positive or non-finite pitch, or on a pitch so
    /// fine the grid would exceed `MAX_PIXELS` or the encoder's
    /// `u32` dimensions.
    pub fn new(region: Region, pixel_size: f64) -> Result<PlaneMapper> {
        if !(pixel_size.is_finite() && pixel_size > 0.0) {
            return Err(Error::invalid(format!(
                "pixel size must be a positive number, got {}",
                pixel_size
            )));
        }

        let cols = samples(region.real_span(), pixel_size);
        let rows = samples(region.imag_span(), pixel_size);
        let limit = f64::from(u32::max_value());
        if !(cols <= limit && rows <= limit) {
            return Err(Error::invalid(format!(
                "a pixel size of {} gives a {} x {} grid, which is too large",
                pixel_size, rows, cols
            )));
        }
        if !(cols >= 1.0 && rows >= 1.0) {
            return Err(Error::invalid(format!(
                "a pixel size of {} leaves no samples in the region",
                pixel_size
            )));
        }
        let pixels = (cols as u64).checked_mul(rows as u64);
        if pixels.map_or(true, |p| p > MAX_PIXELS || p > usize::max_value() as u64) {
            return Err(Error::invalid(format!(
                "a pixel size of {} gives a {} x {} grid, more than {} pixels",
                pixel_size, rows, cols, MAX_PIXELS
            )));
        }
        let (cols, rows) = (cols as usize, rows as usize);

        Ok(PlaneMapper {
            region,
            pixel_size,
            cols,
            rows,
        })
    }

    /// The sampled region.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Distance between neighbouring samples on either axis.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Number of columns, i.e. samples along the real axis.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows, i.e. samples along the imaginary axis.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// Never true for a mapper that `new` accepted; kept alongside
    /// `len`.
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// The real part sampled by column `col`.
    #[inline]
    pub fn real_at(&self, col: usize) -> f64 {
        self.region.zmin.re + (col as f64) * self.pixel_size
    }

    /// The imaginary part sampled by row `row`.
    #[inline]
    pub fn imag_at(&self, row: usize) -> f64 {
        self.region.zmin.im + (row as f64) * self.pixel_size
    }

    /// Given a pixel on the integral grid, return the point of the
    /// complex plane it samples.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.real_at(pixel.0), self.imag_at(pixel.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(zmin: (f64, f64), zmax: (f64, f64)) -> Result<Region> {
        Region::new(Complex::new(zmin.0, zmin.1), Complex::new(zmax.0, zmax.1))
    }

    #[test]
    fn region_fails_on_bad_shape() {
        assert!(region((-1.0, 1.0), (1.0, -1.0)).is_err());
        assert!(region((1.0, -1.0), (-1.0, 1.0)).is_err());
    }

    #[test]
    fn region_fails_on_zero_area() {
        assert!(region((0.0, -1.0), (0.0, 1.0)).is_err());
        assert!(region((-1.0, 0.5), (1.0, 0.5)).is_err());
    }

    #[test]
    fn region_fails_on_non_finite_corners() {
        assert!(region((std::f64::NEG_INFINITY, -1.0), (1.0, 1.0)).is_err());
        assert!(region((-1.0, -1.0), (1.0, std::f64::NAN)).is_err());
    }

    #[test]
    fn planemapper_fails_on_bad_pitch() {
        let r = region((-1.0, -1.0), (1.0, 1.0)).unwrap();
        assert!(PlaneMapper::new(r, 0.0).is_err());
        assert!(PlaneMapper::new(r, -0.1).is_err());
        assert!(PlaneMapper::new(r, std::f64::NAN).is_err());
        assert!(PlaneMapper::new(r, 1e-300).is_err());
        assert!(PlaneMapper::new(r, std::f64::INFINITY).is_err());
    }

    #[test]
    fn planemapper_caps_the_pixel_count() {
        let r = region((-2.0, -1.5), (1.0, 1.5)).unwrap();
        // 3e8 samples per axis fit in a u32 but not in memory.
        match PlaneMapper::new(r, 1e-8) {
            Err(Error::InvalidConfiguration(_)) => {}
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
        // 30000 x 30000 is under the cap.
        let pm = PlaneMapper::new(r, 1e-4).unwrap();
        assert!(pm.len() as u64 <= MAX_PIXELS);
    }

    #[test]
    fn grid_dimensions_round_up() {
        let r = region((-2.0, -1.5), (1.0, 1.5)).unwrap();
        let pm = PlaneMapper::new(r, 1e-3).unwrap();
        assert_eq!((pm.rows(), pm.cols()), (3000, 3000));

        let r = region((0.0, 0.0), (1.0, 0.5)).unwrap();
        let pm = PlaneMapper::new(r, 0.3).unwrap();
        assert_eq!((pm.rows(), pm.cols()), (2, 4));
        assert_eq!(pm.len(), 8);
        assert!(!pm.is_empty());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let r = region((0.0, 0.0), (5.0, 5.0)).unwrap();
        let pm = PlaneMapper::new(r, 1.0).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 1)), Complex::new(4.0, 1.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let r = region((-2.0, -2.0), (2.0, 2.0)).unwrap();
        let pm = PlaneMapper::new(r, 0.5).unwrap();
        assert_eq!((pm.rows(), pm.cols()), (8, 8));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(7, 0)), Complex::new(1.5, -2.0));
    }
}
