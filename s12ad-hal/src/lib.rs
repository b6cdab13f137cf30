//! HAL for the Renesas S12AD 12-bit A/D converter
//!
//! This is an implementation of the [`embedded-hal`](https://crates.io/crates/embedded-hal)
//! ADC traits for the S12AD successive-approximation converter, on top of a
//! typed, checked model of its memory-mapped registers.
//!
//! The register map can be bound to the physical peripheral or to a
//! [`pac::RegisterBlock`] living in ordinary memory, which is how the driver
//! is exercised off target.
//!
//! NOTE This HAL is still under active development. This API will remain volatile until 1.0.0
//!
//! # Crate features
//!
//! * **defmt** -
//!   Implement `defmt::Format` for several types and log through `defmt`.
//! * **log** -
//!   Log through the `log` facade.

#![warn(missing_docs)]
#![no_std]

mod fmt;

pub mod adc;
pub mod channel;
pub mod compare;
pub mod config;
pub mod dma;
pub mod error;
pub mod field;
pub mod pac;
pub mod readout;
pub mod register;
pub mod typelevel;

// Provide access to common datastructures to avoid repeating ourselves
pub use adc::Adc;
pub use error::Error;
pub use pac::S12ad;
