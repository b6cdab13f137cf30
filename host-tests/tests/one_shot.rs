mod sim;

mod tests {
    use crate::sim;
    use embedded_dma::ReadBuffer;
    use embedded_hal_0_2::adc::{Channel, OneShot};
    use s12ad_hal::{
        channel::{An002, An003, An005},
        config::{Accuracy, ScanMode},
        dma::NoDma,
        pac::{adcsr, RegisterBlock},
        Adc, Error,
    };

    #[test]
    fn typed_inputs_carry_their_channel() {
        assert_eq!(<An002 as Channel<Adc<'_>>>::channel(), 2);
        assert_eq!(<An005 as Channel<Adc<'_>>>::channel(), 5);
    }

    #[test]
    fn one_shot_read() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_scan_mode(ScanMode::Continuous).unwrap();
        adc.set_accuracy(Accuracy::Eight).unwrap();

        let first: nb::Result<u16, Error> = adc.read(&mut An005);
        assert_eq!(first, Err(nb::Error::WouldBlock));
        assert_eq!(block.adansa0().read(), 0b0010_0000);
        assert_eq!(block.adcsr().read_field(adcsr::ADCS), 0b00);
        assert!(block.adcsr().is_set(adcsr::ADST));

        let pending: nb::Result<u16, Error> = adc.read(&mut An005);
        assert_eq!(pending, Err(nb::Error::WouldBlock));
        let other: nb::Result<u16, Error> = adc.read(&mut An002);
        assert_eq!(other, Err(nb::Error::Other(Error::PreconditionViolation)));

        sim::convert(&block, 5, 0x01a7);
        sim::end_scan(&block);
        let value: u16 = nb::block!(adc.read(&mut An005)).unwrap();
        assert_eq!(value, 0xa7);
    }

    #[test]
    fn one_shot_needs_a_stopped_converter() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        adc.set_scan_mode(ScanMode::Continuous).unwrap();
        adc.start_stop_conversion(true).unwrap();
        let result: nb::Result<u16, Error> = adc.read(&mut An002);
        assert_eq!(result, Err(nb::Error::Other(Error::PreconditionViolation)));
    }

    #[test]
    fn stopping_cancels_a_pending_read() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        sim::convert(&block, 3, 0x0abc);

        let first: nb::Result<u16, Error> = adc.read(&mut An003);
        assert_eq!(first, Err(nb::Error::WouldBlock));
        adc.start_stop_conversion(false).unwrap();
        assert!(!adc.is_running());

        let restarted: nb::Result<u16, Error> = adc.read(&mut An003);
        assert_eq!(restarted, Err(nb::Error::WouldBlock));
        assert!(block.adcsr().is_set(adcsr::ADST));
        let other: nb::Result<u16, Error> = adc.read(&mut An002);
        assert_eq!(other, Err(nb::Error::Other(Error::PreconditionViolation)));

        sim::convert(&block, 3, 0x0123);
        sim::end_scan(&block);
        let value: u16 = nb::block!(adc.read(&mut An003)).unwrap();
        assert_eq!(value, 0x0123);
    }

    #[test]
    fn driver_exposes_its_registers() {
        let block = RegisterBlock::new();
        let mut adc = sim::adc(&block);
        let _: nb::Result<u16, Error> = adc.read(&mut An005);
        assert_eq!(adc.device().adansa0().read(), 0b0010_0000);
        assert!(adc.device().adcsr().is_set(adcsr::ADST));
    }

    #[test]
    fn dma_handle_is_kept_and_returned() {
        #[derive(Debug, PartialEq)]
        struct Channel3;

        let block = RegisterBlock::new();
        let adc = sim::adc(&block).with_dma(Channel3);
        assert_eq!(adc.dma(), &Channel3);
        assert!(adc.is_initialized());

        let source = adc.dma_source();
        // Safety: only the address and length are inspected
        let (ptr, len) = unsafe { source.read_buffer() };
        assert_eq!(ptr, block.addr(0).as_ptr() as *const u16);
        assert_eq!(len, 8);
        assert_eq!(source.address(), ptr as usize);

        let (adc, dma) = adc.release_dma();
        assert_eq!(dma, Channel3);
        assert_eq!(adc.dma(), &NoDma);
    }
}
