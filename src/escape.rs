// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.
//!
//! Both fractals come from the same recurrence, `z <- z * z + c`.  The
//! Mandelbrot set fixes `z0 = 0` and asks, for each `c`, whether the
//! orbit stays bounded; a Julia set fixes `c` and asks the same
//! question for each starting value `z0`.  "Bounded" is approximated by
//! iterating a fixed number of times and watching whether the orbit
//! leaves the disc of radius `threshold` around the origin.
//!
//! Magnitudes are compared as `|z| <= threshold`, never as
//! `|z| > threshold`, so that an orbit which has overflowed into NaN is
//! treated as escaped rather than as a member.

use num::Complex;

/// The classical divergence radius.  Once an orbit leaves the disc of
/// radius two (and `|c| <= 2`) it is guaranteed to go to infinity.
pub const DIVERGENCE_THRESHOLD: f64 = 2.0;

/// How a Julia orbit is judged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeCheck {
    /// Stop as soon as any iterate leaves the disc.  This is how every
    /// Mandelbrot point is tested.
    EveryIterate,
    /// Run all the iterations and only look at where the orbit ended
    /// up.  This is the traditional behaviour of the Julia plotter and
    /// remains the default for it.
    FinalIterate,
}

impl Default for EscapeCheck {
    fn default() -> Self {
        EscapeCheck::FinalIterate
    }
}

#[inline]
fn within(z: Complex<f64>, threshold: f64) -> bool {
    z.norm() <= threshold
}

/// Iterate the orbit of `z0` under `z * z + c` at most `max_iter`
/// times.  Returns the 1-based step at which the orbit first left the
/// disc of radius `threshold`, or `None` if it never did.
pub fn escape_time(
    c: Complex<f64>,
    z0: Complex<f64>,
    max_iter: usize,
    threshold: f64,
) -> Option<usize> {
    let mut z = z0;
    for i in 1..=max_iter {
        z = z * z + c;
        if !within(z, threshold) {
            return Some(i);
        }
    }
    None
}

/// True when the orbit stays inside the disc for all `max_iter` steps.
#[inline]
pub fn membership(c: Complex<f64>, z0: Complex<f64>, max_iter: usize, threshold: f64) -> bool {
    escape_time(c, z0, max_iter, threshold).is_none()
}

/// Iterate exactly `max_iter` times without checking intermediate
/// values, then test only the last iterate.  An orbit that overflows
/// along the way ends in infinity or NaN and fails the test.
pub fn final_within(c: Complex<f64>, z0: Complex<f64>, max_iter: usize, threshold: f64) -> bool {
    let mut z = z0;
    for _ in 0..max_iter {
        z = z * z + c;
    }
    within(z, threshold)
}

/// Is `c` in the Mandelbrot set, as far as `max_iter` iterations can
/// tell?
pub fn is_in_mandelbrot(c: Complex<f64>, max_iter: usize) -> bool {
    membership(c, Complex::new(0.0, 0.0), max_iter, DIVERGENCE_THRESHOLD)
}

/// Is `z` in the filled Julia set of `c`, as far as `max_iter`
/// iterations and the chosen `check` can tell?
pub fn is_in_julia(
    c: Complex<f64>,
    z: Complex<f64>,
    max_iter: usize,
    threshold: f64,
    check: EscapeCheck,
) -> bool {
    match check {
        EscapeCheck::EveryIterate => membership(c, z, max_iter, threshold),
        EscapeCheck::FinalIterate => final_within(c, z, max_iter, threshold),
    }
}
