mod sim;

mod tests {
    use crate::sim;
    use s12ad_hal::{
        adc::ConversionState,
        channel::ChannelSet,
        config::{
            Accuracy, AdditionCount, AdditionMode, AssistMode, Config, DisconnectionAssist,
            GroupPriority, Justification, ScanGroup, ScanMode, SelfDiagnosis, TriggerSource,
        },
        pac::{adcer, adcsr, RegisterBlock, S12ad},
        Adc, Error,
    };

    #[test]
    fn operations_before_initialize_are_not_ready() {
        let block = RegisterBlock::new();
        let mut adc = Adc::new(S12ad::new(&block));
        assert!(!adc.is_initialized());
        assert_eq!(adc.set_scan_mode(ScanMode::Continuous), Err(Error::NotReady));
        assert_eq!(adc.start_stop_conversion(true), Err(Error::NotReady));
        assert_eq!(adc.select_channels_for_conversion(&[0]), Err(Error::NotReady));
        assert_eq!(adc.data(0), Err(Error::NotReady));
        assert_eq!(block.adcsr().read(), 0);
        assert_eq!(block.adansa0().read(), 0);

        adc.initialize().unwrap();
        assert!(adc.is_initialized());
        adc.set_scan_mode(ScanMode::Continuous).unwrap();
    }

    #[test]
    fn initialize_restores_baseline() {
        let block = RegisterBlock::new();
        block.adcsr().write(0xd283).unwrap();
        block.adansa0().write(0x00ff).unwrap();
        block.adads0().write(0x0003).unwrap();
        block.adadc().write(0x85).unwrap();
        block.adcer().write(0x8f24).unwrap();
        block.adcmpcr().write(0xea00).unwrap();
        block.adsstr(3).write(0x20).unwrap();

        let adc = sim::adc(&block);
        assert_eq!(adc.conversion_state(), ConversionState::Stopped);
        assert_eq!(block.adcsr().read(), 0);
        assert_eq!(block.adansa0().read(), 0);
        assert_eq!(block.adads0().read(), 0);
        assert_eq!(block.adadc().read(), 0);
        assert_eq!(block.adcer().read(), 0);
        assert_eq!(block.adcmpcr().read(), 0);
        assert_eq!(block.adsstr(3).read(), 0x20);
    }

    #[test]
    fn start_then_stop() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_scan_mode(ScanMode::Continuous).unwrap();

        adc.start_stop_conversion(true).unwrap();
        assert_eq!(adc.conversion_state(), ConversionState::Running);
        sim::end_scan(&block);
        assert_eq!(adc.conversion_state(), ConversionState::Running);

        adc.start_stop_conversion(false).unwrap();
        assert_eq!(adc.conversion_state(), ConversionState::Stopped);
    }

    #[test]
    fn single_scan_stops_by_itself() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_scan_mode(ScanMode::Single).unwrap();
        adc.start_stop_conversion(true).unwrap();
        assert!(adc.is_running());

        sim::end_scan(&block);
        assert_eq!(adc.conversion_state(), ConversionState::Stopped);
        adc.set_accuracy(Accuracy::Eight).unwrap();
    }

    #[test]
    fn trigger_start_is_observed() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_trigger(TriggerSource::Asynchronous).unwrap();
        adc.enable_trigger(true).unwrap();
        assert!(block.adcsr().is_set(adcsr::EXTRG));
        assert!(block.adcsr().is_set(adcsr::TRGE));

        sim::trigger(&block);
        assert_eq!(adc.conversion_state(), ConversionState::Running);
        assert_eq!(
            adc.set_trigger(TriggerSource::Synchronous),
            Err(Error::PreconditionViolation)
        );
    }

    #[test]
    fn configuration_while_running_is_rejected() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_scan_mode(ScanMode::Continuous).unwrap();
        adc.select_channels_for_conversion(&[1]).unwrap();
        adc.start_stop_conversion(true).unwrap();

        let adcsr = block.adcsr().read();
        let adansa0 = block.adansa0().read();
        let adads0 = block.adads0().read();
        let adadc = block.adadc().read();
        let adcer = block.adcer().read();

        assert_eq!(
            adc.set_scan_mode(ScanMode::Single),
            Err(Error::PreconditionViolation)
        );
        assert_eq!(
            adc.select_channels_for_conversion(&[2]),
            Err(Error::PreconditionViolation)
        );
        assert_eq!(
            adc.set_accuracy(Accuracy::Ten),
            Err(Error::PreconditionViolation)
        );
        assert_eq!(
            adc.select_channels_for_averaging(&[1]),
            Err(Error::PreconditionViolation)
        );
        assert_eq!(
            adc.set_addition_mode(AdditionMode::Average),
            Err(Error::PreconditionViolation)
        );
        assert_eq!(
            adc.set_addition_count(AdditionCount::FourTimes),
            Err(Error::PreconditionViolation)
        );
        assert_eq!(
            adc.set_scan_end_interrupt_enable(true),
            Err(Error::PreconditionViolation)
        );
        assert_eq!(adc.self_diagnostic(true), Err(Error::PreconditionViolation));
        assert_eq!(
            adc.configure(&Config::default()),
            Err(Error::PreconditionViolation)
        );

        assert_eq!(block.adcsr().read(), adcsr);
        assert_eq!(block.adansa0().read(), adansa0);
        assert_eq!(block.adads0().read(), adads0);
        assert_eq!(block.adadc().read(), adadc);
        assert_eq!(block.adcer().read(), adcer);
    }

    #[test]
    fn channel_selection_sets_exactly_the_given_bits() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        block.adansa0().write(0x0010).unwrap();

        adc.select_channels_for_conversion(&[0, 3, 7]).unwrap();
        assert_eq!(block.adansa0().read(), 0b1001_1001);

        assert_eq!(
            adc.select_channels_for_conversion(&[8]),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            adc.select_channels_for_conversion(&[1, 2, 9]),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            adc.select_channels_for_conversion(&[5, 5]),
            Err(Error::IllegalValue)
        );
        assert_eq!(block.adansa0().read(), 0b1001_1001);

        adc.deselect_channels(ScanGroup::A, &[0, 4]).unwrap();
        assert_eq!(block.adansa0().read(), 0b1000_1000);
        assert_eq!(
            adc.selected_channels(ScanGroup::A),
            ChannelSet::from_indices(&[3, 7])
        );
    }

    #[test]
    fn group_selection_targets_its_own_register() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.select_channels(ScanGroup::B, &[1, 2]).unwrap();
        adc.select_channels(ScanGroup::C, &[6]).unwrap();
        assert_eq!(block.adansa0().read(), 0);
        assert_eq!(block.adansb0().read(), 0b0000_0110);
        assert_eq!(block.adansc0().read(), 0b0100_0000);
    }

    #[test]
    fn averaging_selection() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.select_channels_for_averaging(&[2, 4]).unwrap();
        assert_eq!(block.adads0().read(), 0b0001_0100);
        assert_eq!(adc.select_channels_for_averaging(&[12]), Err(Error::OutOfRange));
        adc.deselect_channels_for_averaging(&[2]).unwrap();
        assert_eq!(adc.averaging_channels(), Ok(ChannelSet::from_bits(0b0001_0000)));
    }

    #[test]
    fn addition_count_codes() {
        for (code, times) in [(0b000, 1), (0b001, 2), (0b010, 3), (0b011, 4), (0b101, 16)] {
            assert_eq!(AdditionCount::from_code(code).map(|c| c.times()), Ok(times));
        }
        for code in [0b100, 0b110, 0b111] {
            assert_eq!(AdditionCount::from_code(code), Err(Error::IllegalValue));
        }
        assert_eq!(AdditionCount::from_code(8), Err(Error::OutOfRange));
        assert_eq!(AdditionCount::try_from(0b101), Ok(AdditionCount::SixteenTimes));

        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_addition_mode(AdditionMode::Average).unwrap();
        adc.set_addition_count(AdditionCount::SixteenTimes).unwrap();
        assert_eq!(block.adadc().read(), 0x85);
        assert_eq!(adc.addition_count(), Ok(AdditionCount::SixteenTimes));
    }

    #[test]
    fn scan_mode_round_trip() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        for mode in [ScanMode::Group, ScanMode::Continuous, ScanMode::Single] {
            adc.set_scan_mode(mode).unwrap();
            assert_eq!(adc.scan_mode(), Ok(mode));
        }
        sim::force(block.adcsr(), 0x6000);
        assert_eq!(adc.scan_mode(), Err(Error::IllegalValue));
    }

    #[test]
    fn scan_end_interrupts() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_scan_end_interrupt_enable(true).unwrap();
        assert_eq!(block.adcsr().read(), 0x1000);
        adc.set_group_scan_end_interrupt(ScanGroup::B, true).unwrap();
        adc.set_group_scan_end_interrupt(ScanGroup::C, true).unwrap();
        assert_eq!(block.adcsr().read(), 0x1040);
        assert_eq!(block.adgctrgr().read(), 0x40);
        adc.set_scan_end_interrupt_enable(false).unwrap();
        assert_eq!(block.adcsr().read(), 0x0040);
    }

    #[test]
    fn double_trigger() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_double_trigger(Some(5)).unwrap();
        assert_eq!(block.adcsr().read(), 0x0085);
        assert_eq!(adc.set_double_trigger(Some(8)), Err(Error::OutOfRange));
        assert_eq!(block.adcsr().read(), 0x0085);
        adc.set_double_trigger(None).unwrap();
        assert_eq!(block.adcsr().read(), 0);
    }

    #[test]
    fn start_triggers() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_start_trigger(ScanGroup::A, 0x09).unwrap();
        adc.set_start_trigger(ScanGroup::B, 0x0a).unwrap();
        adc.set_start_trigger(ScanGroup::C, 0x3f).unwrap();
        adc.enable_group_c(true).unwrap();
        assert_eq!(block.adstrgr().read(), 0x090a);
        assert_eq!(block.adgctrgr().read(), 0xbf);
        assert_eq!(
            adc.set_start_trigger(ScanGroup::A, 0x40),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn group_priority_dependencies() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        let without_priority = GroupPriority {
            rescan_group_b: true,
            ..GroupPriority::default()
        };
        assert_eq!(
            adc.set_group_priority(without_priority),
            Err(Error::IllegalValue)
        );
        let resume_without_rescan = GroupPriority {
            enabled: true,
            resume_interrupted_channel: true,
            ..GroupPriority::default()
        };
        assert_eq!(
            adc.set_group_priority(resume_without_rescan),
            Err(Error::IllegalValue)
        );
        assert_eq!(block.adgspcr().read(), 0);

        adc.set_group_priority(GroupPriority {
            enabled: true,
            rescan_group_b: true,
            resume_interrupted_channel: true,
            continuous_group_b: true,
        })
        .unwrap();
        assert_eq!(block.adgspcr().read(), 0xc003);
    }

    #[test]
    fn self_diagnosis_settings() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.self_diagnostic(true).unwrap();
        assert!(block.adcer().is_set(adcer::DIAGM));
        assert!(block.adcer().is_set(adcer::DIAGLD));
        assert_eq!(block.adcer().read_field(adcer::DIAGVAL), 0b01);

        adc.set_self_diagnosis(SelfDiagnosis::Rotation).unwrap();
        assert!(!block.adcer().is_set(adcer::DIAGLD));
        assert_ne!(block.adcer().read_field(adcer::DIAGVAL), 0b00);

        adc.self_diagnostic(false).unwrap();
        assert_eq!(block.adcer().read(), 0);
    }

    #[test]
    fn self_diagnosis_with_averaging_is_left_to_the_caller() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.select_channels_for_averaging(&[1]).unwrap();
        adc.set_addition_count(AdditionCount::Twice).unwrap();
        adc.self_diagnostic(true).unwrap();
        assert!(block.adcer().is_set(adcer::DIAGM));
    }

    #[test]
    fn other_hardware_settings() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_disconnection_assist(Some(DisconnectionAssist {
            mode: AssistMode::Precharge,
            period: 4,
        }))
        .unwrap();
        assert_eq!(block.addiscr().read(), 0x14);
        for period in [0, 16] {
            assert_eq!(
                adc.set_disconnection_assist(Some(DisconnectionAssist {
                    mode: AssistMode::Discharge,
                    period,
                })),
                Err(Error::OutOfRange)
            );
        }
        assert_eq!(block.addiscr().read(), 0x14);
        adc.set_disconnection_assist(None).unwrap();
        assert_eq!(block.addiscr().read(), 0);

        adc.set_sampling_states(7, 40).unwrap();
        assert_eq!(block.adsstr(7).read(), 40);
        assert_eq!(adc.set_sampling_states(7, 4), Err(Error::OutOfRange));
        assert_eq!(adc.set_sampling_states(8, 40), Err(Error::OutOfRange));

        adc.set_auto_clear(true).unwrap();
        assert!(block.adcer().is_set(adcer::ACE));
    }

    #[test]
    fn configure_applies_everything() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        let config = Config::default()
            .scan_mode(ScanMode::Continuous)
            .trigger(Some(TriggerSource::Asynchronous))
            .double_trigger(Some(2))
            .accuracy(Accuracy::Ten)
            .justification(Justification::Left)
            .addition(AdditionMode::Addition, AdditionCount::FourTimes)
            .channels(ScanGroup::A, &[0, 4, 6])
            .unwrap()
            .averaging(&[4])
            .unwrap()
            .scan_end_interrupt(true);
        adc.configure(&config).unwrap();

        assert_eq!(block.adcsr().read(), 0x5382);
        assert_eq!(block.adcer().read(), 0x8002);
        assert_eq!(block.adadc().read(), 0x03);
        assert_eq!(block.adansa0().read(), 0b0101_0001);
        assert_eq!(block.adads0().read(), 0b0001_0000);
        assert_eq!(adc.conversion_state(), ConversionState::Stopped);
    }

    #[test]
    fn configure_is_all_or_nothing() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        let config = Config::default()
            .accuracy(Accuracy::Eight)
            .channels(ScanGroup::A, &[1])
            .unwrap()
            .double_trigger(Some(9));
        assert_eq!(adc.configure(&config), Err(Error::OutOfRange));
        assert_eq!(block.adcer().read(), 0);
        assert_eq!(block.adansa0().read(), 0);
        assert_eq!(block.adcsr().read(), 0);
    }

    #[test]
    fn config_builder_rejects_bad_channels() {
        assert_eq!(
            Config::default().channels(ScanGroup::B, &[3, 8]).err(),
            Some(Error::OutOfRange)
        );
        assert_eq!(
            Config::default().averaging(&[3, 3]).err(),
            Some(Error::IllegalValue)
        );
    }
}
