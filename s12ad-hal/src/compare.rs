//! Compare-window monitor
//!
//! Two comparators watch converted values. Window A covers any set of
//! channels, window B a single channel. With the window function off each
//! compares against one reference; with it on each checks a lower/upper pair.
//!
//! ```
//! use s12ad_hal::{
//!     channel::ChannelSet,
//!     compare::{CompareLevel, WindowA, WindowB},
//!     pac::{RegisterBlock, S12ad},
//!     Adc,
//! };
//!
//! let block = RegisterBlock::new();
//! let mut adc = Adc::new(S12ad::new(&block));
//! adc.initialize().unwrap();
//!
//! adc.build_compare()
//!     .window_function(true)
//!     .window_a(WindowA::new(
//!         ChannelSet::from_indices(&[4, 6]).unwrap(),
//!         CompareLevel::Outside,
//!         0x100,
//!         0xe00,
//!     ))
//!     .window_b(WindowB::new(2, CompareLevel::Inside, 0x200, 0x300))
//!     .interrupt_a(true)
//!     .apply()
//!     .unwrap();
//! ```
//!
//! Status flags are set by the hardware. This module only reads them.

use crate::{
    adc::Adc,
    channel::{check_channel, ChannelSet},
    fmt::debug,
    pac::{adcmpansr0, adcmpbnsr, adcmpbsr, adcmpcr, adcmplr0, adcmpsr0, adwinmon},
    Error,
};

/// Condition under which a comparator reports a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompareLevel {
    /// Value below the reference. Window function off.
    Below,
    /// Value above the reference. Window function off.
    Above,
    /// Value outside the window. Window function on.
    Outside,
    /// Value inside the window. Window function on.
    Inside,
}

impl CompareLevel {
    fn condition_bit(self, window_function: bool) -> Result<bool, Error> {
        match (self, window_function) {
            (CompareLevel::Below, false) | (CompareLevel::Outside, true) => Ok(false),
            (CompareLevel::Above, false) | (CompareLevel::Inside, true) => Ok(true),
            _ => Err(Error::IllegalValue),
        }
    }
}

/// Window A setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowA {
    /// Channels compared.
    pub channels: ChannelSet,
    /// Match condition, shared by all channels.
    pub level: CompareLevel,
    /// Reference, or lower window bound.
    pub lower: u16,
    /// Upper window bound, unused with the window function off.
    pub upper: u16,
}

impl WindowA {
    /// Create a window A setting.
    pub const fn new(channels: ChannelSet, level: CompareLevel, lower: u16, upper: u16) -> Self {
        Self {
            channels,
            level,
            lower,
            upper,
        }
    }
}

/// Window B setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowB {
    /// Channel compared, 0 to 7.
    pub channel: u8,
    /// Match condition.
    pub level: CompareLevel,
    /// Reference, or lower window bound.
    pub lower: u16,
    /// Upper window bound, unused with the window function off.
    pub upper: u16,
}

impl WindowB {
    /// Create a window B setting.
    pub const fn new(channel: u8, level: CompareLevel, lower: u16, upper: u16) -> Self {
        Self {
            channel,
            level,
            lower,
            upper,
        }
    }
}

/// Comparator status as reported by the hardware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompareStatus {
    /// Window A channels whose condition was met.
    pub window_a: ChannelSet,
    /// Window B condition was met.
    pub window_b: bool,
    /// Current window A result.
    pub monitor_a: bool,
    /// Current window B result.
    pub monitor_b: bool,
    /// Current combined result of windows A and B.
    pub combined: bool,
}

/// Used to configure the compare function
///
/// See [`Adc::build_compare`] for details. Windows left unset are disabled.
pub struct CompareBuilder<'b, 'a, D> {
    adc: &'b mut Adc<'a, D>,
    window_function: bool,
    window_a: Option<WindowA>,
    window_b: Option<WindowB>,
    interrupt_a: bool,
    interrupt_b: bool,
}

impl<'b, 'a, D> CompareBuilder<'b, 'a, D> {
    /// Compare against a lower/upper window instead of a single reference.
    pub fn window_function(mut self, enabled: bool) -> Self {
        self.window_function = enabled;
        self
    }

    /// Enable window A.
    pub fn window_a(mut self, window: WindowA) -> Self {
        self.window_a = Some(window);
        self
    }

    /// Enable window B.
    pub fn window_b(mut self, window: WindowB) -> Self {
        self.window_b = Some(window);
        self
    }

    /// Raise the compare interrupt on a window A match.
    pub fn interrupt_a(mut self, enabled: bool) -> Self {
        self.interrupt_a = enabled;
        self
    }

    /// Raise the compare interrupt on a window B match.
    pub fn interrupt_b(mut self, enabled: bool) -> Self {
        self.interrupt_b = enabled;
        self
    }

    /// Check the whole setting, then program the comparators.
    ///
    /// Requires the converter to be stopped.
    pub fn apply(self) -> Result<(), Error> {
        self.adc.ensure_stopped()?;
        let regs = self.adc.regs();

        let (cmpansr0, cmplr0) = match self.window_a {
            Some(window) => {
                let above = window.level.condition_bit(self.window_function)?;
                let levels = if above { window.channels.bits() } else { 0 };
                (
                    adcmpansr0::CMPCHA0
                        .write(regs.adcmpansr0().read(), window.channels.bits() as u16)?,
                    adcmplr0::CMPLCHA0.write(regs.adcmplr0().read(), levels as u16)?,
                )
            }
            None => (
                adcmpansr0::CMPCHA0.write(regs.adcmpansr0().read(), 0)?,
                adcmplr0::CMPLCHA0.write(regs.adcmplr0().read(), 0)?,
            ),
        };
        let cmpbnsr = match self.window_b {
            Some(window) => {
                check_channel(window.channel)?;
                let above = window.level.condition_bit(self.window_function)?;
                let word = adcmpbnsr::CMPCHB.write(regs.adcmpbnsr().read(), window.channel)?;
                adcmpbnsr::CMPLB.write_bool(word, above)?
            }
            None => {
                let word = adcmpbnsr::CMPCHB
                    .write(regs.adcmpbnsr().read(), adcmpbnsr::NO_CHANNEL)?;
                adcmpbnsr::CMPLB.write_bool(word, false)?
            }
        };
        let cmpcr = {
            let word = regs.adcmpcr().read();
            let word = adcmpcr::WCMPE.write_bool(word, self.window_function)?;
            let word = adcmpcr::CMPAE.write_bool(word, self.window_a.is_some())?;
            let word = adcmpcr::CMPBE.write_bool(word, self.window_b.is_some())?;
            let word = adcmpcr::CMPAIE.write_bool(word, self.interrupt_a)?;
            adcmpcr::CMPBIE.write_bool(word, self.interrupt_b)?
        };

        regs.adcmpansr0().check(cmpansr0)?;
        regs.adcmplr0().check(cmplr0)?;
        regs.adcmpbnsr().check(cmpbnsr)?;
        regs.adcmpcr().check(cmpcr)?;

        if let Some(window) = self.window_a {
            regs.adcmpdr0().write(window.lower)?;
            regs.adcmpdr1().write(window.upper)?;
        }
        if let Some(window) = self.window_b {
            regs.adwinllb().write(window.lower)?;
            regs.adwinulb().write(window.upper)?;
        }
        regs.adcmpansr0().write(cmpansr0)?;
        regs.adcmplr0().write(cmplr0)?;
        regs.adcmpbnsr().write(cmpbnsr)?;
        regs.adcmpcr().write(cmpcr)?;
        debug!(
            "S12AD compare: window A {:?}, window B {:?}",
            self.window_a, self.window_b
        );
        Ok(())
    }
}

impl<'a, D> Adc<'a, D> {
    /// Start configuring the compare function.
    pub fn build_compare(&mut self) -> CompareBuilder<'_, 'a, D> {
        CompareBuilder {
            adc: self,
            window_function: false,
            window_a: None,
            window_b: None,
            interrupt_a: false,
            interrupt_b: false,
        }
    }

    /// Turn both comparators and their interrupts off.
    pub fn disable_compare(&mut self) -> Result<(), Error> {
        self.ensure_stopped()?;
        self.regs().adcmpcr().modify(|word| {
            let word = adcmpcr::CMPAE.write_bool(word, false)?;
            let word = adcmpcr::CMPBE.write_bool(word, false)?;
            let word = adcmpcr::CMPAIE.write_bool(word, false)?;
            adcmpcr::CMPBIE.write_bool(word, false)
        })
    }

    /// Comparator status flags and monitors.
    pub fn compare_status(&self) -> Result<CompareStatus, Error> {
        self.ensure_ready()?;
        let regs = self.regs();
        let monitor = regs.adwinmon().read();
        Ok(CompareStatus {
            window_a: ChannelSet::from_bits(regs.adcmpsr0().read_field(adcmpsr0::CMPSTCHA0) as u8),
            window_b: regs.adcmpbsr().is_set(adcmpbsr::CMPSTB),
            monitor_a: adwinmon::MONCMPA.is_set(monitor),
            monitor_b: adwinmon::MONCMPB.is_set(monitor),
            combined: adwinmon::MONCOMB.is_set(monitor),
        })
    }
}
