//! Readout cache
//!
//! The most recently retrieved conversion results, keyed by what they measure
//! instead of by channel number. Fields are refreshed one at a time, so a
//! [`Readout`] is not a coherent snapshot of a single scan.
//!
//! | Channel | Measurement |
//! |---------|-------------|
//! | 0 | edge detect |
//! | 1 | minimum loop |
//! | 2 | 24 V supply |
//! | 3 | terminal temperature (raw, see [`TemperatureLookup`]) |
//! | 4 | maximum loop |
//! | 5 | head resistance |
//! | 6 | take-up tension |
//! | 7 | low pressure |
//!
//! To share the cache between the scan end interrupt and the main flow, copy
//! it into a [`SharedReadout`]:
//!
//! ```
//! use s12ad_hal::readout::{Measurement, Readout, SharedReadout};
//!
//! static READOUT: SharedReadout = SharedReadout::new();
//!
//! // In the interrupt handler, after `Adc::handle_scan_end`:
//! READOUT.update(|readout| readout.set(Measurement::MaxLoop, 0x3ff));
//!
//! // In the main flow:
//! assert_eq!(READOUT.load().max_loop, 0x3ff);
//! ```

use core::cell::Cell;

use critical_section::Mutex;

use crate::Error;

/// A named measurement and the channel it is converted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Measurement {
    /// Edge detect sensor, channel 0
    EdgeDetect,
    /// Minimum loop sensor, channel 1
    MinLoop,
    /// 24 V supply, channel 2
    Vdd,
    /// Terminal temperature, channel 3
    TerminalTemperature,
    /// Maximum loop sensor, channel 4
    MaxLoop,
    /// Head resistance, channel 5
    HeadResistance,
    /// Take-up tension, channel 6
    TakeUpTension,
    /// Low pressure sensor, channel 7
    PressureLow,
}

impl Measurement {
    /// All measurements in channel order.
    pub const ALL: [Measurement; 8] = [
        Measurement::EdgeDetect,
        Measurement::MinLoop,
        Measurement::Vdd,
        Measurement::TerminalTemperature,
        Measurement::MaxLoop,
        Measurement::HeadResistance,
        Measurement::TakeUpTension,
        Measurement::PressureLow,
    ];

    /// Channel the measurement is converted on.
    pub const fn channel(self) -> u8 {
        self as u8
    }

    /// Measurement converted on `channel`.
    pub fn from_channel(channel: u8) -> Result<Self, Error> {
        Self::ALL
            .get(channel as usize)
            .copied()
            .ok_or(Error::OutOfRange)
    }
}

/// Most recent value of every measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readout {
    /// Edge detect sensor
    pub edge_detect: u16,
    /// Minimum loop sensor
    pub min_loop: u16,
    /// 24 V supply
    pub vdd: u16,
    /// Raw terminal temperature
    pub terminal_temperature: u16,
    /// Maximum loop sensor
    pub max_loop: u16,
    /// Head resistance
    pub head_resistance: u16,
    /// Take-up tension
    pub take_up_tension: u16,
    /// Low pressure sensor
    pub pressure_low: u16,
}

impl Readout {
    /// Value of one measurement.
    pub fn get(&self, measurement: Measurement) -> u16 {
        match measurement {
            Measurement::EdgeDetect => self.edge_detect,
            Measurement::MinLoop => self.min_loop,
            Measurement::Vdd => self.vdd,
            Measurement::TerminalTemperature => self.terminal_temperature,
            Measurement::MaxLoop => self.max_loop,
            Measurement::HeadResistance => self.head_resistance,
            Measurement::TakeUpTension => self.take_up_tension,
            Measurement::PressureLow => self.pressure_low,
        }
    }

    /// Store one measurement.
    pub fn set(&mut self, measurement: Measurement, value: u16) {
        let slot = match measurement {
            Measurement::EdgeDetect => &mut self.edge_detect,
            Measurement::MinLoop => &mut self.min_loop,
            Measurement::Vdd => &mut self.vdd,
            Measurement::TerminalTemperature => &mut self.terminal_temperature,
            Measurement::MaxLoop => &mut self.max_loop,
            Measurement::HeadResistance => &mut self.head_resistance,
            Measurement::TakeUpTension => &mut self.take_up_tension,
            Measurement::PressureLow => &mut self.pressure_low,
        };
        *slot = value;
    }

    /// Terminal temperature converted through an external table.
    pub fn terminal_temperature_with<L: TemperatureLookup>(&self, lookup: &L) -> L::Temperature {
        lookup.lookup(self.terminal_temperature)
    }
}

/// Conversion from the raw terminal temperature reading to a temperature.
///
/// The table itself belongs to the application.
pub trait TemperatureLookup {
    /// Temperature representation produced by the table.
    type Temperature;

    /// Convert a raw reading.
    fn lookup(&self, raw: u16) -> Self::Temperature;
}

/// A [`Readout`] that can live in a `static` and be shared with an interrupt
/// handler.
pub struct SharedReadout {
    inner: Mutex<Cell<Readout>>,
}

impl SharedReadout {
    /// An all-zero readout.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Readout {
                edge_detect: 0,
                min_loop: 0,
                vdd: 0,
                terminal_temperature: 0,
                max_loop: 0,
                head_resistance: 0,
                take_up_tension: 0,
                pressure_low: 0,
            })),
        }
    }

    /// Replace the stored readout.
    pub fn store(&self, readout: Readout) {
        critical_section::with(|cs| self.inner.borrow(cs).set(readout));
    }

    /// Copy of the stored readout.
    pub fn load(&self) -> Readout {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Modify the stored readout inside one critical section.
    pub fn update<F: FnOnce(&mut Readout)>(&self, f: F) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut readout = cell.get();
            f(&mut readout);
            cell.set(readout);
        });
    }
}

impl Default for SharedReadout {
    fn default() -> Self {
        Self::new()
    }
}
