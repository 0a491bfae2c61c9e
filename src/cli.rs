// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line front end shared by the `mandelbrot` and `julia`
//! binaries.

use clap::{App, Arg, ArgMatches};
use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::escape::EscapeCheck;
use crate::render::Mode;

const OUTPUT: &str = "output";
const ZMIN: &str = "zmin";
const ZMAX: &str = "zmax";
const C: &str = "c";
const PIXEL_SIZE: &str = "pixel_size";
const MAX_ITER: &str = "max-iter";
const THREADS: &str = "threads";
const THRESHOLD: &str = "threshold";
const EARLY_EXIT: &str = "early-exit";

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Accepts either a `re,im` pair or a complex literal such as
/// `-0.8+0.156j`, `1.5i` or `(2-1j)`.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    let s = s.trim();
    let s = if s.starts_with('(') && s.ends_with(')') {
        &s[1..s.len() - 1]
    } else {
        s
    };
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => Complex::from_str(s).ok(),
    }
}

fn validate_complex(s: &str, err: &str) -> std::result::Result<(), String> {
    match parse_complex(s) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_positive(s: &str, err: &str) -> std::result::Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(()),
        _ => Err(err.to_string()),
    }
}

fn validate_range(
    s: &str,
    low: usize,
    high: usize,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> std::result::Result<(), String> {
    match usize::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn common<'a, 'b>(
    app: App<'a, 'b>,
    output: &'a str,
    zmin: &'a str,
    zmax: &'a str,
    max_iter: &'a str,
) -> App<'a, 'b> {
    let max_threads = num_cpus::get();

    app.arg(
        Arg::with_name(OUTPUT)
            .long(OUTPUT)
            .short("o")
            .takes_value(true)
            .default_value(output)
            .help("Output file name"),
    )
    .arg(
        Arg::with_name(ZMIN)
            .long(ZMIN)
            .takes_value(true)
            .allow_hyphen_values(true)
            .use_delimiter(false)
            .default_value(zmin)
            .validator(|s| validate_complex(&s, "Could not parse lower left corner"))
            .help("Minimum complex value for the plot"),
    )
    .arg(
        Arg::with_name(ZMAX)
            .long(ZMAX)
            .takes_value(true)
            .allow_hyphen_values(true)
            .use_delimiter(false)
            .default_value(zmax)
            .validator(|s| validate_complex(&s, "Could not parse upper right corner"))
            .help("Maximum complex value for the plot"),
    )
    .arg(
        Arg::with_name(PIXEL_SIZE)
            .long(PIXEL_SIZE)
            .takes_value(true)
            .default_value("1e-3")
            .validator(|s| validate_positive(&s, "Pixel size must be a positive number"))
            .help("Pixel size for plot resolution"),
    )
    .arg(
        Arg::with_name(MAX_ITER)
            .long(MAX_ITER)
            .takes_value(true)
            .default_value(max_iter)
            .validator(|s| {
                validate_range(
                    &s,
                    1,
                    usize::max_value(),
                    "Could not parse iteration count",
                    "Iteration count must be at least 1",
                )
            })
            .help("Maximum number of iterations for the sequence"),
    )
    .arg(
        Arg::with_name(THREADS)
            .long(THREADS)
            .short("t")
            .takes_value(true)
            .validator(move |s| {
                validate_range(
                    &s,
                    1,
                    max_threads,
                    "Could not parse thread count",
                    &format!("Thread count must be between 1 and {}", max_threads),
                )
            })
            .help("Number of threads to use in the renderer [default: all CPUs]"),
    )
}

/// Arguments of the `mandelbrot` binary.
pub fn mandelbrot_app<'a, 'b>() -> App<'a, 'b> {
    common(
        App::new("mandelbrot")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Plot the Mandelbrot set with customizable parameters."),
        "Mandelbrot.png",
        "-2.0-1.5j",
        "1.0+1.5j",
        "50",
    )
}

/// Arguments of the `julia` binary.
pub fn julia_app<'a, 'b>() -> App<'a, 'b> {
    common(
        App::new("julia")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Plot a Julia set with customizable parameters."),
        "Julia.png",
        "-2.0-1.0j",
        "2.0+1.0j",
        "10",
    )
    .arg(
        Arg::with_name(C)
            .long(C)
            .short("c")
            .takes_value(true)
            .allow_hyphen_values(true)
            .use_delimiter(false)
            .default_value("-0.8+0.156j")
            .validator(|s| validate_complex(&s, "Could not parse the Julia constant"))
            .help("Complex constant for the Julia set"),
    )
    .arg(
        Arg::with_name(THRESHOLD)
            .long(THRESHOLD)
            .takes_value(true)
            .default_value("2")
            .validator(|s| validate_positive(&s, "Threshold must be a positive number"))
            .help("Divergence threshold on the norm of the sequence"),
    )
    .arg(
        Arg::with_name(EARLY_EXIT)
            .long(EARLY_EXIT)
            .help("Reject a point as soon as any iterate exceeds the threshold, instead of only checking the last one"),
    )
}

fn complex_of(matches: &ArgMatches, name: &str, fallback: Complex<f64>) -> Result<Complex<f64>> {
    match matches.value_of(name) {
        None => Ok(fallback),
        Some(s) => parse_complex(s)
            .ok_or_else(|| Error::invalid(format!("could not parse {} as a complex number", s))),
    }
}

fn number_of<T: FromStr>(matches: &ArgMatches, name: &str, fallback: T) -> Result<T> {
    match matches.value_of(name) {
        None => Ok(fallback),
        Some(s) => {
            T::from_str(s).map_err(|_| Error::invalid(format!("could not parse {} for {}", s, name)))
        }
    }
}

/// Layer the parsed arguments over `base`.  Options that only make
/// sense for Julia sets are ignored when `base` is a Mandelbrot plot.
pub fn config_from_matches(matches: &ArgMatches, base: PlotConfig) -> Result<PlotConfig> {
    let mode = match base.mode {
        Mode::Mandelbrot => Mode::Mandelbrot,
        Mode::Julia {
            c,
            threshold,
            check,
        } => Mode::Julia {
            c: complex_of(matches, C, c)?,
            threshold: number_of(matches, THRESHOLD, threshold)?,
            check: if matches.is_present(EARLY_EXIT) {
                EscapeCheck::EveryIterate
            } else {
                check
            },
        },
    };

    Ok(PlotConfig {
        output: matches
            .value_of(OUTPUT)
            .map(PathBuf::from)
            .unwrap_or(base.output),
        zmin: complex_of(matches, ZMIN, base.zmin)?,
        zmax: complex_of(matches, ZMAX, base.zmax)?,
        pixel_size: number_of(matches, PIXEL_SIZE, base.pixel_size)?,
        max_iter: number_of(matches, MAX_ITER, base.max_iter)?,
        threads: number_of(matches, THREADS, base.threads)?,
        mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_range_checked() {
        assert!(validate_range("4", 1, 8, "nan", "range").is_ok());
        assert_eq!(validate_range("0", 1, 8, "nan", "range"), Err("range".to_string()));
        assert_eq!(validate_range("-3", 1, 8, "nan", "range"), Err("nan".to_string()));
        assert_eq!(validate_range("four", 1, 8, "nan", "range"), Err("nan".to_string()));
    }

    #[test]
    fn parses_pairs() {
        assert_eq!(parse_pair::<u16>("800x600", 'x'), Some((800, 600)));
        assert_eq!(parse_pair::<f64>("-1.5,0.25", ','), Some((-1.5, 0.25)));
        assert_eq!(parse_pair::<u16>("800", 'x'), None);
        assert_eq!(parse_pair::<u16>("800xfoo", 'x'), None);
    }

    #[test]
    fn parses_complex_literals() {
        assert_eq!(parse_complex("-2.0,-1.5"), Some(Complex::new(-2.0, -1.5)));
        assert_eq!(parse_complex("-0.8+0.156j"), Some(Complex::new(-0.8, 0.156)));
        assert_eq!(parse_complex("(2-1j)"), Some(Complex::new(2.0, -1.0)));
        assert_eq!(parse_complex("1.5i"), Some(Complex::new(0.0, 1.5)));
        assert_eq!(parse_complex("nonsense"), None);
    }

    #[test]
    fn mandelbrot_defaults_match_the_config() {
        let matches = mandelbrot_app().get_matches_from(vec!["mandelbrot"]);
        let config = config_from_matches(&matches, PlotConfig::mandelbrot()).unwrap();
        assert_eq!(config, PlotConfig::mandelbrot());
    }

    #[test]
    fn julia_defaults_match_the_config() {
        let matches = julia_app().get_matches_from(vec!["julia"]);
        let config = config_from_matches(&matches, PlotConfig::julia()).unwrap();
        assert_eq!(config, PlotConfig::julia());
    }

    #[test]
    fn julia_options_are_applied() {
        let matches = julia_app().get_matches_from(vec![
            "julia",
            "-o",
            "out.png",
            "-c",
            "0.25",
            "--zmin",
            "-1-1j",
            "--zmax=1,1",
            "--pixel_size",
            "0.5",
            "--max-iter",
            "100",
            "--threshold",
            "3",
            "--early-exit",
            "-t",
            "1",
        ]);
        let config = config_from_matches(&matches, PlotConfig::julia()).unwrap();
        assert_eq!(config.output, PathBuf::from("out.png"));
        assert_eq!(config.zmin, Complex::new(-1.0, -1.0));
        assert_eq!(config.zmax, Complex::new(1.0, 1.0));
        assert_eq!(config.pixel_size, 0.5);
        assert_eq!(config.max_iter, 100);
        assert_eq!(config.threads, 1);
        assert_eq!(
            config.mode,
            Mode::Julia {
                c: Complex::new(0.25, 0.0),
                threshold: 3.0,
                check: EscapeCheck::EveryIterate,
            }
        );
    }

    #[test]
    fn bad_values_are_refused() {
        assert!(mandelbrot_app()
            .get_matches_from_safe(vec!["mandelbrot", "--pixel_size", "-1"])
            .is_err());
        assert!(mandelbrot_app()
            .get_matches_from_safe(vec!["mandelbrot", "--max-iter", "0"])
            .is_err());
        assert!(mandelbrot_app()
            .get_matches_from_safe(vec!["mandelbrot", "--zmin", "left"])
            .is_err());
        assert!(mandelbrot_app()
            .get_matches_from_safe(vec!["mandelbrot", "-c", "0.25"])
            .is_err());
    }
}
