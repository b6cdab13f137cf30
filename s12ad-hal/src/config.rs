//! Provides a [`Config`] for converter configuration and all its options.
//!
//! A `Config` is applied in one call, after the whole value has been checked:
//!
//! ```
//! use s12ad_hal::{
//!     config::{self, Config},
//!     pac::{RegisterBlock, S12ad},
//!     Adc,
//! };
//!
//! let block = RegisterBlock::new();
//! let mut adc = Adc::new(S12ad::new(&block));
//! adc.initialize().unwrap();
//!
//! let config = Config::default()
//!     .scan_mode(config::ScanMode::Continuous)
//!     .accuracy(config::Accuracy::Ten)
//!     .channels(config::ScanGroup::A, &[0, 4, 6])
//!     .unwrap();
//! adc.configure(&config).unwrap();
//! ```
//!
//! Individual settings can also be changed later with the matching `Adc`
//! setter, for example [`Adc::set_accuracy`](crate::Adc::set_accuracy).

use crate::{channel::ChannelSet, Error};

/// How the enabled channels are visited once a scan starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanMode {
    /// Convert every selected channel once, then stop.
    #[default]
    Single,
    /// Groups A, B (and C) scanned on their own triggers.
    Group,
    /// Repeat the scan until stopped.
    Continuous,
}

impl ScanMode {
    pub(crate) const fn code(self) -> u16 {
        match self {
            ScanMode::Single => 0b00,
            ScanMode::Group => 0b01,
            ScanMode::Continuous => 0b10,
        }
    }

    pub(crate) fn from_code(code: u16) -> Result<Self, Error> {
        match code {
            0b00 => Ok(ScanMode::Single),
            0b01 => Ok(ScanMode::Group),
            0b10 => Ok(ScanMode::Continuous),
            _ => Err(Error::IllegalValue),
        }
    }
}

/// Where a triggered scan start comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerSource {
    /// An on-chip peripheral event selected by the start trigger code.
    #[default]
    Synchronous,
    /// The ADTRG# pin.
    Asynchronous,
}

/// Conversion accuracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Accuracy {
    /// 12-bit
    #[default]
    Twelve,
    /// 10-bit
    Ten,
    /// 8-bit
    Eight,
}

impl Accuracy {
    /// Width of one converted sample.
    pub const fn bits(self) -> u8 {
        match self {
            Accuracy::Twelve => 12,
            Accuracy::Ten => 10,
            Accuracy::Eight => 8,
        }
    }

    pub(crate) const fn code(self) -> u16 {
        match self {
            Accuracy::Twelve => 0b00,
            Accuracy::Ten => 0b01,
            Accuracy::Eight => 0b10,
        }
    }

    pub(crate) fn from_code(code: u16) -> Result<Self, Error> {
        match code {
            0b00 => Ok(Accuracy::Twelve),
            0b01 => Ok(Accuracy::Ten),
            0b10 => Ok(Accuracy::Eight),
            _ => Err(Error::IllegalValue),
        }
    }
}

/// Placement of a sample inside its 16 bit data register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Justification {
    /// Sample in the low bits.
    #[default]
    Right,
    /// Sample in the high bits.
    Left,
}

/// How repeated conversions of one channel are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdditionMode {
    /// The results are summed, widening the value.
    #[default]
    Addition,
    /// The results are averaged.
    Average,
}

/// Number of conversions combined per channel.
///
/// Only the counts the hardware encodes are representable. Use
/// [`AdditionCount::from_code`] to turn a raw 3 bit code into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdditionCount {
    /// Convert once.
    #[default]
    Once,
    /// Convert twice.
    Twice,
    /// Convert three times.
    Thrice,
    /// Convert four times.
    FourTimes,
    /// Convert sixteen times.
    SixteenTimes,
}

impl AdditionCount {
    /// Number of conversions.
    pub const fn times(self) -> u8 {
        match self {
            AdditionCount::Once => 1,
            AdditionCount::Twice => 2,
            AdditionCount::Thrice => 3,
            AdditionCount::FourTimes => 4,
            AdditionCount::SixteenTimes => 16,
        }
    }

    /// The 3 bit register code.
    pub const fn code(self) -> u8 {
        match self {
            AdditionCount::Once => 0b000,
            AdditionCount::Twice => 0b001,
            AdditionCount::Thrice => 0b010,
            AdditionCount::FourTimes => 0b011,
            AdditionCount::SixteenTimes => 0b101,
        }
    }

    /// Decode a 3 bit register code.
    ///
    /// Codes wider than 3 bits give [`Error::OutOfRange`], the prohibited
    /// patterns `0b100`, `0b110` and `0b111` give [`Error::IllegalValue`].
    pub fn from_code(code: u8) -> Result<Self, Error> {
        match code {
            0b000 => Ok(AdditionCount::Once),
            0b001 => Ok(AdditionCount::Twice),
            0b010 => Ok(AdditionCount::Thrice),
            0b011 => Ok(AdditionCount::FourTimes),
            0b101 => Ok(AdditionCount::SixteenTimes),
            0b100 | 0b110 | 0b111 => Err(Error::IllegalValue),
            _ => Err(Error::OutOfRange),
        }
    }

    /// Extra bits a sum of this many conversions needs.
    ///
    /// ×2 to ×4 add 2 bits, ×16 adds 4.
    pub(crate) const fn extra_bits(self) -> u8 {
        match self {
            AdditionCount::Once => 0,
            AdditionCount::Twice | AdditionCount::Thrice | AdditionCount::FourTimes => 2,
            AdditionCount::SixteenTimes => 4,
        }
    }
}

impl TryFrom<u8> for AdditionCount {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        Self::from_code(code)
    }
}

/// Channel groups with their own channel select register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanGroup {
    /// Group A, also the channel set of single and continuous scans.
    A,
    /// Group B
    B,
    /// Group C, only scanned while enabled
    C,
}

/// Conversion voltage used by a fixed self-diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosisVoltage {
    /// 0 V
    Zero,
    /// Half the reference voltage
    HalfReference,
    /// The reference voltage
    Reference,
}

impl DiagnosisVoltage {
    pub(crate) const fn code(self) -> u16 {
        match self {
            DiagnosisVoltage::Zero => 0b01,
            DiagnosisVoltage::HalfReference => 0b10,
            DiagnosisVoltage::Reference => 0b11,
        }
    }
}

/// Self-diagnosis setting.
///
/// Self-diagnosis must not be combined with addition or average mode. The
/// driver logs a warning when it sees both but leaves the decision to the
/// caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfDiagnosis {
    /// No self-diagnosis conversion.
    #[default]
    Disabled,
    /// Rotate through 0 V, half reference and reference on every scan.
    Rotation,
    /// Always convert the given voltage.
    Fixed(DiagnosisVoltage),
}

/// Result status found in the self-diagnosis data register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosisStatus {
    /// No self-diagnosis conversion since reset.
    NotExecuted,
    /// Converted 0 V.
    Zero,
    /// Converted half the reference voltage.
    HalfReference,
    /// Converted the reference voltage.
    Reference,
}

impl DiagnosisStatus {
    pub(crate) const fn from_code(code: u16) -> Self {
        match code & 0b11 {
            0b00 => DiagnosisStatus::NotExecuted,
            0b01 => DiagnosisStatus::Zero,
            0b10 => DiagnosisStatus::HalfReference,
            _ => DiagnosisStatus::Reference,
        }
    }
}

/// What the disconnection detection assist does before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssistMode {
    /// Discharge the sampling capacitor.
    Discharge,
    /// Precharge the sampling capacitor.
    Precharge,
}

/// Disconnection detection assist setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisconnectionAssist {
    /// Discharge or precharge
    pub mode: AssistMode,
    /// Assist period in states, 1 to 15
    pub period: u8,
}

/// Group priority control.
///
/// Everything but `enabled` depends on priority control being on, and
/// `resume_interrupted_channel` also depends on `rescan_group_b`.
/// [`Adc::set_group_priority`](crate::Adc::set_group_priority) rejects other
/// combinations with [`Error::IllegalValue`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupPriority {
    /// Group A has priority over groups B and C.
    pub enabled: bool,
    /// Restart group B after it was interrupted by group A.
    pub rescan_group_b: bool,
    /// Restart from the interrupted channel rather than the first one.
    pub resume_interrupted_channel: bool,
    /// Start group B scans continuously in single scan mode.
    pub continuous_group_b: bool,
}

impl GroupPriority {
    pub(crate) fn check(&self) -> Result<(), Error> {
        let dependent = self.rescan_group_b || self.continuous_group_b;
        if !self.enabled && (dependent || self.resume_interrupted_channel) {
            return Err(Error::IllegalValue);
        }
        if self.resume_interrupted_channel && !self.rescan_group_b {
            return Err(Error::IllegalValue);
        }
        Ok(())
    }
}

/// Configuration for the converter.
///
/// `Config::default()` describes the power-on state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub struct Config {
    /// How the selected channels are scanned.
    pub scan_mode: ScanMode,
    /// Trigger start, `None` for software start only.
    pub trigger: Option<TriggerSource>,
    /// Channel converted twice in double trigger mode, `None` to disable it.
    pub double_trigger: Option<u8>,
    /// Conversion accuracy.
    pub accuracy: Accuracy,
    /// Data register format.
    pub justification: Justification,
    /// Clear data registers after they are read.
    pub auto_clear: bool,
    /// Addition or average.
    pub addition_mode: AdditionMode,
    /// Conversions per channel for the channels in `averaging`.
    pub addition_count: AdditionCount,
    /// Channels of group A.
    pub group_a: ChannelSet,
    /// Channels of group B.
    pub group_b: ChannelSet,
    /// Channels of group C.
    pub group_c: ChannelSet,
    /// Channels converted `addition_count` times.
    pub averaging: ChannelSet,
    /// Raise the scan end interrupt.
    pub scan_end_interrupt: bool,
    /// Self-diagnosis setting.
    pub self_diagnosis: SelfDiagnosis,
}

impl Config {
    /// Set the scan mode
    pub fn scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    /// Enable trigger start and pick the trigger source
    pub fn trigger(mut self, trigger: Option<TriggerSource>) -> Self {
        self.trigger = trigger;
        self
    }

    /// Enable double trigger mode for a channel
    pub fn double_trigger(mut self, channel: Option<u8>) -> Self {
        self.double_trigger = channel;
        self
    }

    /// Change the accuracy
    pub fn accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Set the data register format
    pub fn justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    /// Enable automatic clearing of the data registers
    pub fn auto_clear(mut self, enabled: bool) -> Self {
        self.auto_clear = enabled;
        self
    }

    /// Set addition or average mode and the number of conversions
    pub fn addition(mut self, mode: AdditionMode, count: AdditionCount) -> Self {
        self.addition_mode = mode;
        self.addition_count = count;
        self
    }

    /// Select the channels of a group
    pub fn channels(mut self, group: ScanGroup, channels: &[u8]) -> Result<Self, Error> {
        let set = ChannelSet::from_indices(channels)?;
        match group {
            ScanGroup::A => self.group_a = set,
            ScanGroup::B => self.group_b = set,
            ScanGroup::C => self.group_c = set,
        }
        Ok(self)
    }

    /// Select the channels that use the addition count
    pub fn averaging(mut self, channels: &[u8]) -> Result<Self, Error> {
        self.averaging = ChannelSet::from_indices(channels)?;
        Ok(self)
    }

    /// Enable the scan end interrupt
    pub fn scan_end_interrupt(mut self, enabled: bool) -> Self {
        self.scan_end_interrupt = enabled;
        self
    }

    /// Set the self-diagnosis mode
    pub fn self_diagnosis(mut self, diagnosis: SelfDiagnosis) -> Self {
        self.self_diagnosis = diagnosis;
        self
    }
}
