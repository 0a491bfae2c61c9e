// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grid rasterizer.
//!
//! A `Renderer` walks every pixel of a `PlaneMapper`, turns it into a
//! point on the complex plane, and asks the escape-time evaluator
//! whether that point belongs to the set.  No pixel depends on any
//! other, so the threaded renderer simply hands whole rows to whichever
//! worker asks for one next; the rows are disjoint slices of the grid,
//! so the workers never write to the same memory.

use itertools::iproduct;
use log::{debug, info};
use num::Complex;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::escape::{self, EscapeCheck, DIVERGENCE_THRESHOLD};
use crate::grid::Grid;
use crate::plane::{Pixel, PlaneMapper, Region};

/// Number of progress notifications over a whole render.
const PROGRESS_STEPS: usize = 20;

/// Pixels are handed to `Progress` in batches of at most a tenth of
/// one notification step.
const BATCHES_PER_STEP: usize = 10;

/// Which fractal to draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mode {
    /// Every pixel is its own recurrence parameter; orbits start at 0.
    Mandelbrot,
    /// One recurrence parameter for the whole image; every pixel is
    /// the start of an orbit.
    Julia {
        /// The recurrence parameter.
        c: Complex<f64>,
        /// Divergence radius.
        threshold: f64,
        /// Whether to watch the whole orbit or only its last iterate.
        check: EscapeCheck,
    },
}

impl Mode {
    /// Julia mode with the classical radius and the default check.
    pub fn julia(c: Complex<f64>) -> Mode {
        Mode::Julia {
            c,
            threshold: DIVERGENCE_THRESHOLD,
            check: EscapeCheck::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Mode::Mandelbrot => Ok(()),
            Mode::Julia { c, threshold, .. } => {
                if !(c.re.is_finite() && c.im.is_finite()) {
                    return Err(Error::invalid(format!("julia parameter {} is not finite", c)));
                }
                if !(threshold.is_finite() && threshold > 0.0) {
                    return Err(Error::invalid(format!(
                        "divergence threshold must be a positive number, got {}",
                        threshold
                    )));
                }
                Ok(())
            }
        }
    }
}

struct Tally {
    done: usize,
    reported: Vec<usize>,
}

/// Tracks how many pixels have been rendered and logs the percentage
/// at `PROGRESS_STEPS` even intervals.  Safe to share between workers;
/// the reported percentage never goes backwards, whatever order rows
/// finish in.
pub struct Progress {
    total: usize,
    tally: Mutex<Tally>,
}

impl Progress {
    /// A tracker for a render of `total` pixels.
    pub fn new(total: usize) -> Progress {
        Progress {
            total,
            tally: Mutex::new(Tally {
                done: 0,
                reported: Vec::with_capacity(PROGRESS_STEPS + 1),
            }),
        }
    }

    /// How many pixels a worker should finish before calling
    /// `advance`, so that no notification step is skipped even when the
    /// grid is a single row.
    pub fn batch(&self) -> usize {
        (self.total / (PROGRESS_STEPS * BATCHES_PER_STEP)).max(1)
    }

    /// Record `pixels` more finished pixels.
    pub fn advance(&self, pixels: usize) {
        let mut tally = match self.tally.lock() {
            Ok(tally) => tally,
            Err(poisoned) => poisoned.into_inner(),
        };
        tally.done = (tally.done + pixels).min(self.total);
        let step = if self.total == 0 {
            PROGRESS_STEPS
        } else {
            (tally.done as u128 * PROGRESS_STEPS as u128 / self.total as u128) as usize
        };
        let percent = step * 100 / PROGRESS_STEPS;
        if tally.reported.last().map_or(true, |&last| percent > last) {
            tally.reported.push(percent);
            info!("{}%", percent);
        }
    }

    /// The last percentage reported, if any.
    pub fn percent(&self) -> Option<usize> {
        self.history().last().cloned()
    }

    /// Every percentage reported so far, oldest first.
    pub fn history(&self) -> Vec<usize> {
        match self.tally.lock() {
            Ok(tally) => tally.reported.clone(),
            Err(poisoned) => poisoned.into_inner().reported.clone(),
        }
    }
}

/// Everything needed to rasterize one fractal image.  Once built, a
/// renderer is immutable and can be rendered any number of times with
/// identical results.
#[derive(Debug)]
pub struct Renderer {
    plane: PlaneMapper,
    max_iter: usize,
    mode: Mode,
}

impl Renderer {
    /// Validates every parameter up front: a renderer that exists
    /// describes a non-empty grid of at most `MAX_PIXELS` cells.
    pub fn new(region: Region, pixel_size: f64, max_iter: usize, mode: Mode) -> Result<Self> {
        if max_iter == 0 {
            return Err(Error::invalid("max_iter must be at least 1"));
        }
        mode.validate()?;
        let plane = PlaneMapper::new(region, pixel_size)?;
        Ok(Renderer {
            plane,
            max_iter,
            mode,
        })
    }

    /// The pixel-to-point mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Iterations per pixel.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// The fractal being drawn.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    fn classify(&self, pixel: &Pixel) -> bool {
        let point = self.plane.pixel_to_point(pixel);
        match self.mode {
            Mode::Mandelbrot => escape::is_in_mandelbrot(point, self.max_iter),
            Mode::Julia {
                c,
                threshold,
                check,
            } => escape::is_in_julia(c, point, self.max_iter, threshold, check),
        }
    }

    fn render_row(&self, row: usize, cells: &mut [bool], progress: &Progress) {
        let batch = progress.batch();
        let mut pending = 0;
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = self.classify(&Pixel(col, row));
            pending += 1;
            if pending == batch {
                progress.advance(pending);
                pending = 0;
            }
        }
        progress.advance(pending);
    }

    fn announce(&self) {
        info!(
            "Plot density: {} x {} px.",
            self.plane.rows(),
            self.plane.cols()
        );
    }

    /// The main function for single-threaded rendering.
    pub fn render_single(&self) -> Grid {
        let progress = Progress::new(self.plane.len());
        self.render_single_with(&progress)
    }

    fn render_single_with(&self, progress: &Progress) -> Grid {
        self.announce();
        progress.advance(0);
        let (rows, cols) = (self.plane.rows(), self.plane.cols());
        let mut grid = Grid::new(rows, cols);
        let batch = progress.batch();
        let mut pending = 0;
        for ((row, col), cell) in iproduct!(0..rows, 0..cols).zip(grid.cells_mut().iter_mut()) {
            *cell = self.classify(&Pixel(col, row));
            pending += 1;
            if pending == batch {
                progress.advance(pending);
                pending = 0;
            }
        }
        progress.advance(pending);
        grid
    }

    /// Render across `threads` worker threads.
    pub fn render(&self, threads: usize) -> Result<Grid> {
        let progress = Progress::new(self.plane.len());
        self.render_with(threads, &progress)
    }

    /// Render across `threads` worker threads, reporting to a
    /// caller-supplied `progress`.
    pub fn render_with(&self, threads: usize, progress: &Progress) -> Result<Grid> {
        if threads == 0 {
            return Err(Error::invalid("at least one render thread is required"));
        }
        if threads == 1 {
            return Ok(self.render_single_with(progress));
        }

        self.announce();
        progress.advance(0);
        let cols = self.plane.cols();
        let mut grid = Grid::new(self.plane.rows(), cols);
        {
            let rows = Arc::new(Mutex::new(grid.cells_mut().chunks_mut(cols).enumerate()));
            crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    let rows = rows.clone();
                    spawner.spawn(move |_| {
                        let mut rendered = 0;
                        loop {
                            let next = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => None,
                            };
                            match next {
                                Some((row, cells)) => {
                                    self.render_row(row, cells, progress);
                                    rendered += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        debug!("worker {} rendered {} rows", worker, rendered);
                    });
                }
            })
            .map_err(|_| Error::WorkerPanicked)?;
        }
        Ok(grid)
    }
}
