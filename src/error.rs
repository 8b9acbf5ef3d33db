use core::fmt;

/// The requested shape is not one of the [`Geometry`](crate::Geometry) variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedGeometry {
    pub columns: u8,
    pub rows: u8,
}

impl fmt::Display for UnsupportedGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported display geometry {}x{}", self.columns, self.rows)
    }
}

/// Errors returned by the driver, generic over the bus error.
///
/// A failed transaction aborts the running `initialize` or `refresh`; nothing is retried since a
/// repeated half byte would leave the controller out of step.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A bus transaction failed.
    I2c(E),
    /// The display shape is not supported.
    ///
    /// Not returned by the driver itself; lets callers chain `Geometry::try_from` or
    /// [`Geometry::from_code`](crate::Geometry::from_code) with `?` in functions returning this
    /// error.
    Geometry(UnsupportedGeometry),
}

impl<E> From<UnsupportedGeometry> for Error<E> {
    fn from(err: UnsupportedGeometry) -> Self {
        Error::Geometry(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(err) => write!(f, "i2c transaction failed: {:?}", err),
            Error::Geometry(err) => fmt::Display::fmt(err, f),
        }
    }
}
