//! Targets for encoding.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::{error, io};
use std::convert::Infallible;
use bytes::BytesMut;


//------------ Target --------------------------------------------------------

/// Something encoded octets can be written to.
///
/// This is a cut-down `io::Write` whose implementations choose their own
/// error type. In-memory targets use `Infallible` so that the result of
/// writing to them can be unwrapped via [`infallible`] without a panic
/// path.
pub trait Target {
    /// The error returned when writing fails.
    type Error: error::Error;

    /// Appends all of `data` to the target.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Target> Target for &mut T {
    type Error = T::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_all(self, data)
    }
}

impl Target for Vec<u8> {
    type Error = Infallible;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl Target for BytesMut {
    type Error = Infallible;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.extend_from_slice(data);
        Ok(())
    }
}


//------------ IoTarget ------------------------------------------------------

/// Wraps an `io::Write` so it can serve as a target.
///
/// Errors of the writer are passed through unchanged.
pub struct IoTarget<W>(W);

impl<W> IoTarget<W> {
    /// Wraps the given writer.
    pub fn new(writer: W) -> Self {
        IoTarget(writer)
    }

    /// Returns a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.0
    }

    /// Unwraps the writer.
    pub fn into_writer(self) -> W {
        self.0
    }
}

impl<W> From<W> for IoTarget<W> {
    fn from(writer: W) -> Self {
        IoTarget::new(writer)
    }
}

impl<W: io::Write> Target for IoTarget<W> {
    type Error = io::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), io::Error> {
        io::Write::write_all(&mut self.0, data)
    }
}


//------------ infallible ----------------------------------------------------

/// Unwraps a result whose error type can’t have any values.
pub fn infallible<T, E: Into<Infallible>>(res: Result<T, E>) -> T {
    match res {
        Ok(some) => some,
        Err(err) => {
            let never: Infallible = err.into();
            match never { }
        }
    }
}


//============ Tests =========================================================
