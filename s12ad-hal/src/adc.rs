//! Analog-Digital Converter (ADC)
//!
//! [`Adc`] sequences configuration and start/stop of the S12AD converter.
//! Configuration is only accepted while the converter is stopped, and every
//! value is checked before the first register write, so a rejected call
//! leaves the peripheral untouched.
//!
//! ## Usage
//!
//! Scan three channels once and read the results after the scan end
//! interrupt:
//!
//! ```no_run
//! use s12ad_hal::{config::ScanMode, pac::S12ad, readout::Measurement, Adc};
//!
//! let mut adc = Adc::new(S12ad::take().unwrap());
//! adc.initialize().unwrap();
//! adc.set_scan_mode(ScanMode::Single).unwrap();
//! adc.select_channels_for_conversion(&[0, 4, 6]).unwrap();
//! adc.set_scan_end_interrupt_enable(true).unwrap();
//! adc.start_stop_conversion(true).unwrap();
//!
//! // In the scan end interrupt handler:
//! adc.handle_scan_end().unwrap();
//! let tension = adc.readout().get(Measurement::TakeUpTension);
//! ```
//!
//! Capture a reading through the embedded-hal 0.2 `OneShot` trait:
//!
//! ```no_run
//! // Embedded HAL 1.0.0 doesn't have an ADC trait, so use the one from 0.2
//! use embedded_hal_0_2::adc::OneShot;
//! use s12ad_hal::{channel::An004, pac::S12ad, Adc};
//!
//! let mut adc = Adc::new(S12ad::take().unwrap());
//! adc.initialize().unwrap();
//! let counts: u16 = nb::block!(adc.read(&mut An004)).unwrap();
//! ```
//!
//! ## Conversion state
//!
//! The state is the ADST bit itself. The hardware clears it on its own at the
//! end of a single scan and may set it on a trigger, so
//! [`Adc::conversion_state`] always reads it back instead of remembering the
//! last request.

use embedded_hal_0_2::adc::{Channel, OneShot};

use crate::{
    channel::{check_channel, ChannelSet},
    config::{
        Accuracy, AdditionCount, AdditionMode, AssistMode, Config, DiagnosisStatus,
        DiagnosisVoltage, DisconnectionAssist, GroupPriority, Justification, ScanGroup, ScanMode,
        SelfDiagnosis, TriggerSource,
    },
    dma::{DataRegisterSource, NoDma},
    field::Field,
    fmt::{debug, trace, warning},
    pac::{
        adadc, adads0, adansa0, adansb0, adansc0, adcer, adcsr, addiscr, adgctrgr, adgspcr, adrd,
        adsstr, adstrgr, RegisterBlock, S12ad,
    },
    readout::{Measurement, Readout},
    Error,
};

/// Observed state of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionState {
    /// No scan in progress.
    Stopped,
    /// A scan is in progress or continuous/group scanning is active.
    Running,
}

/// Layout of a converted value inside its data register.
///
/// ```
/// use s12ad_hal::adc::DataFormat;
/// use s12ad_hal::config::{Accuracy, Justification};
///
/// let format = DataFormat::new(Accuracy::Ten, Justification::Right);
/// assert_eq!(format.extract(0xfeab), 0x2ab);
///
/// let format = DataFormat::new(Accuracy::Ten, Justification::Left);
/// assert_eq!(format.extract(0xaac0), 0x2ab);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataFormat {
    width: u8,
    justification: Justification,
}

impl DataFormat {
    /// Format of a single conversion.
    pub const fn new(accuracy: Accuracy, justification: Justification) -> Self {
        Self {
            width: accuracy.bits(),
            justification,
        }
    }

    /// Format of the sum of `count` conversions.
    pub const fn with_addition(self, count: AdditionCount) -> Self {
        let width = self.width + count.extra_bits();
        Self {
            width: if width > 16 { 16 } else { width },
            ..self
        }
    }

    /// Number of significant bits.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Placement of the significant bits.
    pub const fn justification(&self) -> Justification {
        self.justification
    }

    /// The bits of the data register holding the value.
    pub const fn field(&self) -> Field<u16> {
        let offset = match self.justification {
            Justification::Right => 0,
            Justification::Left => 16 - self.width,
        };
        Field::new(offset as usize, self.width as usize)
    }

    /// Extract the value from a raw data register word.
    pub fn extract(&self, raw: u16) -> u16 {
        self.field().read(raw)
    }
}

/// Analog to Digital Converter (ADC).
///
/// `D` is the DMA channel handle associated with the converter, [`NoDma`]
/// until one is attached with [`Adc::with_dma`].
pub struct Adc<'a, D = NoDma> {
    device: S12ad<'a>,
    ready: bool,
    readout: Readout,
    one_shot: Option<u8>,
    dma: D,
}

impl<'a> Adc<'a, NoDma> {
    /// Create a driver for the bound register map.
    ///
    /// Nothing is written until [`Adc::initialize`] is called.
    pub fn new(device: S12ad<'a>) -> Self {
        Self {
            device,
            ready: false,
            readout: Readout::default(),
            one_shot: None,
            dma: NoDma,
        }
    }
}

impl<'a, D> Adc<'a, D> {
    /// Free the underlying register map and DMA handle.
    pub fn free(self) -> (S12ad<'a>, D) {
        (self.device, self.dma)
    }

    /// Raw access to the registers, for status inspection.
    pub fn device(&self) -> &S12ad<'a> {
        &self.device
    }

    /// Put the control registers into their baseline state.
    ///
    /// Stops any conversion, then clears scan mode, triggers, accuracy,
    /// format, channel masks, group settings and the compare function. Status
    /// registers and sampling times are left alone. Must be called before any
    /// other operation.
    pub fn initialize(&mut self) -> Result<(), Error> {
        let regs = self.regs();
        regs.adcsr().write(0)?;
        regs.adansa0().write(0)?;
        regs.adansb0().write(0)?;
        regs.adansc0().write(0)?;
        regs.adads0().write(0)?;
        regs.adadc().write(0)?;
        regs.adcer().write(0)?;
        regs.adstrgr().write(0)?;
        regs.adgctrgr().write(0)?;
        regs.adgspcr().write(0)?;
        regs.addiscr().write(0)?;
        regs.adcmpcr().write(0)?;
        regs.adcmpansr0().write(0)?;
        regs.adcmplr0().write(0)?;
        regs.adcmpdr0().write(0)?;
        regs.adcmpdr1().write(0)?;
        regs.adcmpbnsr().write(0)?;
        regs.adwinllb().write(0)?;
        regs.adwinulb().write(0)?;

        self.ready = true;
        self.one_shot = None;
        self.readout = Readout::default();
        debug!("S12AD initialized at {:?}", self.device.base());
        Ok(())
    }

    /// Whether [`Adc::initialize`] has been called.
    pub fn is_initialized(&self) -> bool {
        self.ready
    }

    pub(crate) fn regs(&self) -> &'a RegisterBlock {
        self.device.register_block()
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), Error> {
        if self.ready {
            Ok(())
        } else {
            debug!("S12AD used before initialize");
            Err(Error::NotReady)
        }
    }

    pub(crate) fn ensure_stopped(&self) -> Result<(), Error> {
        self.ensure_ready()?;
        if self.is_running() {
            debug!("S12AD configuration rejected, conversion running");
            return Err(Error::PreconditionViolation);
        }
        Ok(())
    }

    /// Current conversion state, read from the hardware.
    pub fn conversion_state(&self) -> ConversionState {
        if self.is_running() {
            ConversionState::Running
        } else {
            ConversionState::Stopped
        }
    }

    /// Whether a conversion is in progress.
    pub fn is_running(&self) -> bool {
        self.regs().adcsr().is_set(adcsr::ADST)
    }

    /// Start (`true`) or stop (`false`) conversion.
    ///
    /// In single scan mode the hardware returns to stopped by itself once the
    /// scan completes. Stopping has no effect on data already handed to a DMA
    /// transfer. It cancels a pending `OneShot` read, so the next read of that
    /// channel starts a new conversion.
    pub fn start_stop_conversion(&mut self, start: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        self.regs().adcsr().write_field(adcsr::ADST, start as u16)?;
        if !start {
            self.one_shot = None;
        }
        trace!("S12AD start bit set to {:?}", start);
        Ok(())
    }

    /// Set the scan mode.
    pub fn set_scan_mode(&mut self, mode: ScanMode) -> Result<(), Error> {
        self.ensure_stopped()?;
        self.regs().adcsr().write_field(adcsr::ADCS, mode.code())?;
        debug!("S12AD scan mode {:?}", mode);
        Ok(())
    }

    /// Configured scan mode.
    pub fn scan_mode(&self) -> Result<ScanMode, Error> {
        self.ensure_ready()?;
        ScanMode::from_code(self.regs().adcsr().read_field(adcsr::ADCS))
    }

    /// Select the trigger source used when trigger start is enabled.
    pub fn set_trigger(&mut self, source: TriggerSource) -> Result<(), Error> {
        self.ensure_stopped()?;
        let asynchronous = source == TriggerSource::Asynchronous;
        self.regs()
            .adcsr()
            .write_field(adcsr::EXTRG, asynchronous as u16)
    }

    /// Enable or disable trigger start.
    pub fn enable_trigger(&mut self, enabled: bool) -> Result<(), Error> {
        self.ensure_stopped()?;
        self.regs().adcsr().write_field(adcsr::TRGE, enabled as u16)
    }

    /// Set the 6 bit start trigger code of a group.
    pub fn set_start_trigger(&mut self, group: ScanGroup, code: u8) -> Result<(), Error> {
        self.ensure_stopped()?;
        let regs = self.regs();
        match group {
            ScanGroup::A => regs.adstrgr().write_field(adstrgr::TRSA, code as u16),
            ScanGroup::B => regs.adstrgr().write_field(adstrgr::TRSB, code as u16),
            ScanGroup::C => regs.adgctrgr().write_field(adgctrgr::TRSC, code),
        }
    }

    /// Enable double trigger mode for `channel`, or disable it with `None`.
    pub fn set_double_trigger(&mut self, channel: Option<u8>) -> Result<(), Error> {
        self.ensure_stopped()?;
        let word = double_trigger_word(self.regs().adcsr().read(), channel)?;
        self.regs().adcsr().write(word)
    }

    /// Set the conversion accuracy.
    pub fn set_accuracy(&mut self, accuracy: Accuracy) -> Result<(), Error> {
        self.ensure_stopped()?;
        self.regs()
            .adcer()
            .write_field(adcer::ADPRC, accuracy.code())?;
        debug!("S12AD accuracy {:?}", accuracy);
        Ok(())
    }

    /// Configured accuracy.
    pub fn accuracy(&self) -> Result<Accuracy, Error> {
        self.ensure_ready()?;
        Accuracy::from_code(self.regs().adcer().read_field(adcer::ADPRC))
    }

    /// Set the data register format.
    pub fn set_justification(&mut self, justification: Justification) -> Result<(), Error> {
        self.ensure_stopped()?;
        let left = justification == Justification::Left;
        self.regs().adcer().write_field(adcer::ADRFMT, left as u16)
    }

    /// Configured data register format.
    pub fn justification(&self) -> Result<Justification, Error> {
        self.ensure_ready()?;
        Ok(if self.regs().adcer().is_set(adcer::ADRFMT) {
            Justification::Left
        } else {
            Justification::Right
        })
    }

    /// Clear data registers automatically after they are read.
    pub fn set_auto_clear(&mut self, enabled: bool) -> Result<(), Error> {
        self.ensure_stopped()?;
        self.regs().adcer().write_field(adcer::ACE, enabled as u16)
    }

    /// Choose between addition and average of the repeated conversions.
    pub fn set_addition_mode(&mut self, mode: AdditionMode) -> Result<(), Error> {
        self.ensure_stopped()?;
        let average = mode == AdditionMode::Average;
        self.regs().adadc().write_field(adadc::AVEE, average as u8)
    }

    /// Set the number of conversions combined for the averaging channels.
    ///
    /// Raw 3 bit codes go through [`AdditionCount::from_code`] first, which
    /// rejects the prohibited encodings.
    pub fn set_addition_count(&mut self, count: AdditionCount) -> Result<(), Error> {
        self.ensure_stopped()?;
        self.regs().adadc().write_field(adadc::ADC, count.code())?;
        debug!("S12AD addition count {:?}", count);
        Ok(())
    }

    /// Configured addition count.
    pub fn addition_count(&self) -> Result<AdditionCount, Error> {
        self.ensure_ready()?;
        AdditionCount::from_code(self.regs().adadc().read_field(adadc::ADC))
    }

    /// Add channels to a scan group.
    ///
    /// The whole list is checked first: an index above 7 gives
    /// [`Error::OutOfRange`], a repeated index [`Error::IllegalValue`], and in
    /// both cases the register is left as it was. Channels already selected
    /// stay selected.
    pub fn select_channels(&mut self, group: ScanGroup, channels: &[u8]) -> Result<(), Error> {
        self.ensure_stopped()?;
        let set = ChannelSet::from_indices(channels)?;
        self.write_group(group, self.group_channels(group).union(set))?;
        debug!("S12AD group {:?} selected {:?}", group, set);
        Ok(())
    }

    /// Remove channels from a scan group.
    pub fn deselect_channels(&mut self, group: ScanGroup, channels: &[u8]) -> Result<(), Error> {
        self.ensure_stopped()?;
        let set = ChannelSet::from_indices(channels)?;
        self.write_group(group, self.group_channels(group).difference(set))
    }

    /// Channels currently selected in a scan group.
    pub fn selected_channels(&self, group: ScanGroup) -> Result<ChannelSet, Error> {
        self.ensure_ready()?;
        Ok(self.group_channels(group))
    }

    /// Add channels to the conversion set (group A).
    pub fn select_channels_for_conversion(&mut self, channels: &[u8]) -> Result<(), Error> {
        self.select_channels(ScanGroup::A, channels)
    }

    /// Add channels to the addition/average set.
    pub fn select_channels_for_averaging(&mut self, channels: &[u8]) -> Result<(), Error> {
        self.ensure_stopped()?;
        let set = ChannelSet::from_indices(channels)?;
        self.regs().adads0().modify(|word| {
            adads0::ADS0.write(word, adads0::ADS0.read(word) | u16::from(set))
        })?;
        if self.self_diagnosis_enabled() {
            warning!("S12AD averaging selected while self-diagnosis is enabled");
        }
        Ok(())
    }

    /// Remove channels from the addition/average set.
    pub fn deselect_channels_for_averaging(&mut self, channels: &[u8]) -> Result<(), Error> {
        self.ensure_stopped()?;
        let set = ChannelSet::from_indices(channels)?;
        self.regs().adads0().modify(|word| {
            adads0::ADS0.write(word, adads0::ADS0.read(word) & !u16::from(set))
        })
    }

    /// Channels currently in the addition/average set.
    pub fn averaging_channels(&self) -> Result<ChannelSet, Error> {
        self.ensure_ready()?;
        Ok(ChannelSet::from_bits(
            self.regs().adads0().read_field(adads0::ADS0) as u8,
        ))
    }

    /// Enable or disable group C scanning.
    pub fn enable_group_c(&mut self, enabled: bool) -> Result<(), Error> {
        self.ensure_stopped()?;
        self.regs()
            .adgctrgr()
            .write_field(adgctrgr::GRCE, enabled as u8)
    }

    /// Enable or disable the scan end interrupt.
    ///
    /// Only the enable bit is touched; installing a handler is up to the
    /// application.
    pub fn set_scan_end_interrupt_enable(&mut self, enabled: bool) -> Result<(), Error> {
        self.set_group_scan_end_interrupt(ScanGroup::A, enabled)
    }

    /// Enable or disable the scan end interrupt of one group.
    pub fn set_group_scan_end_interrupt(
        &mut self,
        group: ScanGroup,
        enabled: bool,
    ) -> Result<(), Error> {
        self.ensure_stopped()?;
        let regs = self.regs();
        match group {
            ScanGroup::A => regs.adcsr().write_field(adcsr::ADIE, enabled as u16),
            ScanGroup::B => regs.adcsr().write_field(adcsr::GBADIE, enabled as u16),
            ScanGroup::C => regs.adgctrgr().write_field(adgctrgr::GCADIE, enabled as u8),
        }
    }

    /// Configure group priority control.
    pub fn set_group_priority(&mut self, priority: GroupPriority) -> Result<(), Error> {
        self.ensure_stopped()?;
        priority.check()?;
        self.regs().adgspcr().modify(|word| {
            let word = adgspcr::PGS.write_bool(word, priority.enabled)?;
            let word = adgspcr::GBRSCN.write_bool(word, priority.rescan_group_b)?;
            let word = adgspcr::LGRRS.write_bool(word, priority.resume_interrupted_channel)?;
            adgspcr::GBRP.write_bool(word, priority.continuous_group_b)
        })
    }

    /// Enable or disable self-diagnosis with a fixed 0 V conversion voltage.
    pub fn self_diagnostic(&mut self, enable: bool) -> Result<(), Error> {
        self.set_self_diagnosis(if enable {
            SelfDiagnosis::Fixed(DiagnosisVoltage::Zero)
        } else {
            SelfDiagnosis::Disabled
        })
    }

    /// Configure self-diagnosis.
    ///
    /// Self-diagnosis can't be combined with addition or average mode. This is
    /// not rejected, only logged.
    pub fn set_self_diagnosis(&mut self, diagnosis: SelfDiagnosis) -> Result<(), Error> {
        self.ensure_stopped()?;
        let (enabled, fixed, voltage) = match diagnosis {
            SelfDiagnosis::Disabled => (false, false, 0b00),
            SelfDiagnosis::Rotation => (true, false, DiagnosisVoltage::Zero.code()),
            SelfDiagnosis::Fixed(voltage) => (true, true, voltage.code()),
        };
        self.regs().adcer().modify(|word| {
            let word = adcer::DIAGVAL.write(word, voltage)?;
            let word = adcer::DIAGLD.write_bool(word, fixed)?;
            adcer::DIAGM.write_bool(word, enabled)
        })?;
        if enabled && self.averaging_configured() {
            warning!("S12AD self-diagnosis enabled together with addition/average mode");
        }
        debug!("S12AD self-diagnosis {:?}", diagnosis);
        Ok(())
    }

    fn self_diagnosis_enabled(&self) -> bool {
        self.regs().adcer().is_set(adcer::DIAGM)
    }

    fn averaging_configured(&self) -> bool {
        self.regs().adads0().read_field(adads0::ADS0) != 0
            && self.regs().adadc().read_field(adadc::ADC) != 0
    }

    /// Status and value of the last self-diagnosis conversion.
    pub fn self_diagnosis_result(&self) -> Result<(DiagnosisStatus, u16), Error> {
        self.ensure_ready()?;
        let raw = self.regs().adrd().read();
        let format = DataFormat::new(self.accuracy()?, self.justification()?);
        let status = match format.justification() {
            Justification::Right => adrd::DIAGST_RIGHT.read(raw),
            Justification::Left => adrd::DIAGST_LEFT.read(raw),
        };
        Ok((DiagnosisStatus::from_code(status), format.extract(raw)))
    }

    /// Configure the disconnection detection assist, or turn it off with
    /// `None`. The period must be 1 to 15 states.
    pub fn set_disconnection_assist(
        &mut self,
        assist: Option<DisconnectionAssist>,
    ) -> Result<(), Error> {
        self.ensure_stopped()?;
        let (precharge, period) = match assist {
            None => (false, 0),
            Some(DisconnectionAssist { period: 0, .. }) => return Err(Error::OutOfRange),
            Some(assist) => (assist.mode == AssistMode::Precharge, assist.period),
        };
        self.regs().addiscr().modify(|word| {
            let word = addiscr::PERIOD.write(word, period)?;
            addiscr::PRECHARGE.write_bool(word, precharge)
        })
    }

    /// Set the sampling time of a channel in states, 5 to 255.
    pub fn set_sampling_states(&mut self, channel: u8, states: u8) -> Result<(), Error> {
        self.ensure_stopped()?;
        let index = check_channel(channel)?;
        if states < adsstr::MIN_STATES {
            return Err(Error::OutOfRange);
        }
        self.regs().adsstr(index).write_field(adsstr::SST, states)
    }

    /// Apply a whole configuration.
    ///
    /// Every setting is checked before the first write. Group priority, start
    /// triggers and sampling times are not part of [`Config`] and keep their
    /// values.
    pub fn configure(&mut self, config: &Config) -> Result<(), Error> {
        self.ensure_stopped()?;
        let regs = self.regs();

        let adcsr = {
            let word = double_trigger_word(regs.adcsr().read(), config.double_trigger)?;
            let word = adcsr::ADCS.write(word, config.scan_mode.code())?;
            let word = adcsr::ADIE.write_bool(word, config.scan_end_interrupt)?;
            let word = adcsr::TRGE.write_bool(word, config.trigger.is_some())?;
            adcsr::EXTRG.write_bool(
                word,
                config.trigger == Some(TriggerSource::Asynchronous),
            )?
        };
        let adcer = {
            let (enabled, fixed, voltage) = match config.self_diagnosis {
                SelfDiagnosis::Disabled => (false, false, 0b00),
                SelfDiagnosis::Rotation => (true, false, DiagnosisVoltage::Zero.code()),
                SelfDiagnosis::Fixed(voltage) => (true, true, voltage.code()),
            };
            let word = adcer::ADPRC.write(regs.adcer().read(), config.accuracy.code())?;
            let word = adcer::ADRFMT
                .write_bool(word, config.justification == Justification::Left)?;
            let word = adcer::ACE.write_bool(word, config.auto_clear)?;
            let word = adcer::DIAGVAL.write(word, voltage)?;
            let word = adcer::DIAGLD.write_bool(word, fixed)?;
            adcer::DIAGM.write_bool(word, enabled)?
        };
        let adadc = {
            let word = adadc::ADC.write(regs.adadc().read(), config.addition_count.code())?;
            adadc::AVEE.write_bool(word, config.addition_mode == AdditionMode::Average)?
        };
        let ansa0 = adansa0::ANSA0.write(regs.adansa0().read(), config.group_a.into())?;
        let ansb0 = adansb0::ANSB0.write(regs.adansb0().read(), config.group_b.into())?;
        let ansc0 = adansc0::ANSC0.write(regs.adansc0().read(), config.group_c.into())?;
        let ads0 = adads0::ADS0.write(regs.adads0().read(), config.averaging.into())?;

        if config.self_diagnosis != SelfDiagnosis::Disabled
            && !config.averaging.is_empty()
            && config.addition_count != AdditionCount::Once
        {
            warning!("S12AD self-diagnosis configured together with addition/average mode");
        }

        regs.adansa0().check(ansa0)?;
        regs.adansb0().check(ansb0)?;
        regs.adansc0().check(ansc0)?;
        regs.adads0().check(ads0)?;
        regs.adadc().check(adadc)?;
        regs.adcer().check(adcer)?;
        regs.adcsr().check(adcsr)?;

        regs.adansa0().write(ansa0)?;
        regs.adansb0().write(ansb0)?;
        regs.adansc0().write(ansc0)?;
        regs.adads0().write(ads0)?;
        regs.adadc().write(adadc)?;
        regs.adcer().write(adcer)?;
        regs.adcsr().write(adcsr)?;
        debug!("S12AD configured: {:?}", config);
        Ok(())
    }

    fn group_channels(&self, group: ScanGroup) -> ChannelSet {
        let regs = self.regs();
        let bits = match group {
            ScanGroup::A => regs.adansa0().read_field(adansa0::ANSA0),
            ScanGroup::B => regs.adansb0().read_field(adansb0::ANSB0),
            ScanGroup::C => regs.adansc0().read_field(adansc0::ANSC0),
        };
        ChannelSet::from_bits(bits as u8)
    }

    fn write_group(&self, group: ScanGroup, set: ChannelSet) -> Result<(), Error> {
        let regs = self.regs();
        match group {
            ScanGroup::A => regs.adansa0().write_field(adansa0::ANSA0, set.into()),
            ScanGroup::B => regs.adansb0().write_field(adansb0::ANSB0, set.into()),
            ScanGroup::C => regs.adansc0().write_field(adansc0::ANSC0, set.into()),
        }
    }

    /// How the data register of `channel` is to be interpreted under the
    /// current configuration.
    pub fn data_format(&self, channel: u8) -> Result<DataFormat, Error> {
        self.ensure_ready()?;
        check_channel(channel)?;
        let format = DataFormat::new(self.accuracy()?, self.justification()?);
        let regs = self.regs();
        let averaged = ChannelSet::from_bits(regs.adads0().read_field(adads0::ADS0) as u8);
        if averaged.contains(channel) && !regs.adadc().is_set(adadc::AVEE) {
            Ok(format.with_addition(self.addition_count()?))
        } else {
            Ok(format)
        }
    }

    /// Raw content of the data register of `channel`.
    pub fn data(&self, channel: u8) -> Result<u16, Error> {
        self.ensure_ready()?;
        let index = check_channel(channel)?;
        Ok(self.regs().addr(index).read())
    }

    /// Converted value of `channel`, interpreted with the configured accuracy,
    /// format and addition setting.
    pub fn sample(&self, channel: u8) -> Result<u16, Error> {
        let format = self.data_format(channel)?;
        Ok(format.extract(self.data(channel)?))
    }

    /// Raw content of the data duplexing register.
    pub fn duplicated_data(&self) -> Result<u16, Error> {
        self.ensure_ready()?;
        Ok(self.regs().addbldr().read())
    }

    /// Raw content of data duplexing register A.
    pub fn duplicated_data_a(&self) -> Result<u16, Error> {
        self.ensure_ready()?;
        Ok(self.regs().addbldra().read())
    }

    /// Raw content of data duplexing register B.
    pub fn duplicated_data_b(&self) -> Result<u16, Error> {
        self.ensure_ready()?;
        Ok(self.regs().addbldrb().read())
    }

    /// Read a named measurement and store it in the readout cache.
    pub fn read_measurement(&mut self, measurement: Measurement) -> Result<u16, Error> {
        let value = self.sample(measurement.channel())?;
        self.readout.set(measurement, value);
        Ok(value)
    }

    /// Read the max loop sensor.
    pub fn max_loop_state(&mut self) -> Result<u16, Error> {
        self.read_measurement(Measurement::MaxLoop)
    }

    /// Read the take-up tension sensor.
    pub fn take_up_tension_state(&mut self) -> Result<u16, Error> {
        self.read_measurement(Measurement::TakeUpTension)
    }

    /// The most recently retrieved measurements.
    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    /// Refresh the readout cache after a scan.
    ///
    /// Meant to be called from the scan end interrupt handler. Every channel
    /// selected in group A, B or an enabled group C is read. In continuous
    /// mode a new scan may already be overwriting data registers, so the cache
    /// is not a coherent snapshot.
    pub fn handle_scan_end(&mut self) -> Result<ConversionState, Error> {
        self.ensure_ready()?;
        let regs = self.regs();
        let mut channels = self
            .selected_channels(ScanGroup::A)?
            .union(self.selected_channels(ScanGroup::B)?);
        if regs.adgctrgr().is_set(adgctrgr::GRCE) {
            channels = channels.union(self.selected_channels(ScanGroup::C)?);
        }
        for channel in channels.iter() {
            let value = self.sample(channel)?;
            self.readout.set(Measurement::from_channel(channel)?, value);
        }
        let state = self.conversion_state();
        trace!("S12AD scan end, state {:?}", state);
        Ok(state)
    }

    /// Associate a DMA channel handle with the converter.
    pub fn with_dma<T>(self, dma: T) -> Adc<'a, T> {
        Adc {
            device: self.device,
            ready: self.ready,
            readout: self.readout,
            one_shot: self.one_shot,
            dma,
        }
    }

    /// Give back the DMA channel handle.
    pub fn release_dma(self) -> (Adc<'a, NoDma>, D) {
        let dma = self.dma;
        let adc = Adc {
            device: self.device,
            ready: self.ready,
            readout: self.readout,
            one_shot: self.one_shot,
            dma: NoDma,
        };
        (adc, dma)
    }

    /// The associated DMA channel handle.
    pub fn dma(&self) -> &D {
        &self.dma
    }

    /// The associated DMA channel handle, mutably.
    pub fn dma_mut(&mut self) -> &mut D {
        &mut self.dma
    }

    /// The data registers as a source for DMA transfers.
    pub fn dma_source(&self) -> DataRegisterSource<'a> {
        DataRegisterSource::new(self.regs())
    }
}

fn double_trigger_word(word: u16, channel: Option<u8>) -> Result<u16, Error> {
    match channel {
        Some(channel) => {
            check_channel(channel)?;
            let word = adcsr::DBLANS.write(word, channel as u16)?;
            adcsr::DBLE.write_bool(word, true)
        }
        None => {
            let word = adcsr::DBLANS.write(word, 0)?;
            adcsr::DBLE.write_bool(word, false)
        }
    }
}

// Single scan of one channel. The channel selection of group A and the scan
// mode are overwritten.
impl<'a, D, WORD, SRC> OneShot<Adc<'a, D>, WORD, SRC> for Adc<'a, D>
where
    WORD: From<u16>,
    SRC: Channel<Adc<'a, D>, ID = u8>,
{
    type Error = Error;

    fn read(&mut self, _pin: &mut SRC) -> nb::Result<WORD, Self::Error> {
        let chan = SRC::channel();

        match self.one_shot {
            Some(pending) if pending == chan => {
                if self.is_running() {
                    return Err(nb::Error::WouldBlock);
                }
                self.one_shot = None;
                Ok(self.sample(chan)?.into())
            }
            Some(_) => Err(nb::Error::Other(Error::PreconditionViolation)),
            None => {
                self.ensure_stopped()?;
                let index = check_channel(chan)?;
                let regs = self.regs();
                regs.adansa0().write_field(adansa0::ANSA0, 1 << index)?;
                regs.adcsr().modify(|word| {
                    let word = adcsr::ADCS.write(word, ScanMode::Single.code())?;
                    adcsr::ADST.write_bool(word, true)
                })?;
                self.one_shot = Some(chan);
                Err(nb::Error::WouldBlock)
            }
        }
    }
}
