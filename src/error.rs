// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised while configuring a render, rendering it, or writing
//! the resulting image.

use failure::Fail;
use std::io;

/// Everything that can go wrong between the command line and the
/// image file.
#[derive(Debug, Fail)]
pub enum Error {
    /// The region, pitch, iteration bound, threshold or thread count
    /// cannot produce a meaningful grid.  Raised before any pixel is
    /// computed.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// One of the render workers panicked; the grid is incomplete and
    /// has been discarded.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The image could not be written.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl Error {
    pub(crate) fn invalid<S: Into<String>>(message: S) -> Self {
        Error::InvalidConfiguration(message.into())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_the_problem() {
        let err = Error::invalid("pixel size must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: pixel size must be positive"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "nope").into();
        match err {
            Error::Io(ref inner) => assert_eq!(inner.kind(), io::ErrorKind::NotFound),
            _ => panic!("expected an Io error, got {:?}", err),
        }
    }
}
