//! Logging shims
//!
//! Statements go to `defmt` or to the `log` facade depending on the enabled
//! crate feature, and compile to nothing when neither is enabled.
#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)+);
        #[cfg(feature = "log")]
        log::trace!($($arg)+);
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)+);
        #[cfg(feature = "log")]
        log::debug!($($arg)+);
    }};
}

macro_rules! warning {
    ($($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)+);
        #[cfg(feature = "log")]
        log::warn!($($arg)+);
    }};
}

pub(crate) use {debug, trace, warning};
