//! Errors reported by the register model and the conversion driver
//!
//! Every configuration error is detected before a register write is issued, so
//! a failed call leaves the peripheral exactly as it was.

/// Error returned by fallible operations of this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A value or index is outside the domain of the field it targets.
    ///
    /// Returned for channel indices above 7, for values wider than a bit
    /// field, and for misaligned register map base addresses.
    OutOfRange,
    /// A value fits the field but is an encoding the hardware prohibits.
    ///
    /// For example the accuracy code `0b11` or the addition count `0b100`.
    IllegalValue,
    /// A configuration write was attempted while a conversion is running.
    PreconditionViolation,
    /// The register map is unbound or the driver has not been initialized.
    NotReady,
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfRange => write!(fmt, "value out of range"),
            Error::IllegalValue => write!(fmt, "prohibited register encoding"),
            Error::PreconditionViolation => write!(fmt, "conversion must be stopped"),
            Error::NotReady => write!(fmt, "converter not bound or not initialized"),
        }
    }
}
