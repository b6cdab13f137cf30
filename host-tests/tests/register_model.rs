mod tests {
    use s12ad_hal::{
        field::Field,
        pac::{
            adadc, adansa0, adansb0, adansc0, adads0, adcer, adcmpansr0, adcmpbnsr, adcmpbsr,
            adcmpcr, adcmpdr0, adcmpdr1, adcmplr0, adcmpsr0, adcsr, addiscr, adgctrgr, adgspcr,
            adsstr, adstrgr, adwinllb, adwinmon, adwinulb, RegisterBlock, S12ad,
        },
        register::RegisterSpec,
        Error,
    };

    #[test]
    fn read_right_justifies() {
        let field: Field<u16> = Field::new(4, 3);
        assert_eq!(field.read(0b0000_0000_0101_0000), 0b101);
        assert_eq!(field.read(0xffff), 0b111);
        assert_eq!(field.read(0xff8f), 0);
    }

    #[test]
    fn write_isolates_other_bits() {
        let fields: [Field<u16>; 4] = [
            Field::new(0, 1),
            Field::new(1, 2),
            Field::new(8, 6),
            Field::new(15, 1),
        ];
        for &word in &[0x0000u16, 0xffff, 0xa5a5, 0x5a5a, 0x8001] {
            for field in fields {
                let value = (field.max() as u16) & 0b10_1010;
                let written = field.write(word, value).unwrap();
                assert_eq!(field.read(written), value);
                for other in fields.iter().filter(|other| !other.overlaps(&field)) {
                    assert_eq!(other.read(written), other.read(word));
                }
                let outside = !(field.mask() as u16);
                assert_eq!(written & outside, word & outside);
            }
        }
    }

    #[test]
    fn too_wide_values_are_rejected() {
        let field: Field<u8> = Field::new(0, 3);
        assert_eq!(field.write(0x55, 0b1000), Err(Error::OutOfRange));
        assert_eq!(field.write(0x55, 0xff), Err(Error::OutOfRange));
        assert_eq!(adstrgr::TRSA.write(0, 64), Err(Error::OutOfRange));
        assert_eq!(adstrgr::TRSA.write(0, 63), Ok(0x3f00));
    }

    #[test]
    fn prohibited_encodings_are_rejected() {
        assert_eq!(adcsr::ADCS.write(0, 0b11), Err(Error::IllegalValue));
        assert_eq!(adcer::ADPRC.write(0, 0b11), Err(Error::IllegalValue));
        for code in [0b100, 0b110, 0b111] {
            assert_eq!(adadc::ADC.write(0, code), Err(Error::IllegalValue));
        }
        for code in [0b000, 0b001, 0b010, 0b011, 0b101] {
            assert_eq!(adadc::ADC.read(adadc::ADC.write(0x80, code).unwrap()), code);
        }
        assert_eq!(adcmpbnsr::CMPCHB.write(0, 0x08), Err(Error::IllegalValue));
        assert_eq!(adcmpbnsr::CMPCHB.write(0, 0x3f), Ok(0x3f));
        assert_eq!(adcmpbnsr::CMPCHB.write(0, 0x40), Err(Error::OutOfRange));
    }

    #[test]
    fn register_write_field_is_read_modify_write() {
        let block = RegisterBlock::new();
        block.adcsr().write(0x9283).unwrap();
        block.adcsr().write_field(adcsr::ADCS, 0b10).unwrap();
        assert_eq!(block.adcsr().read(), 0xd283);

        assert_eq!(
            block.adcsr().write_field(adcsr::ADCS, 0b11),
            Err(Error::IllegalValue)
        );
        assert_eq!(block.adcsr().read(), 0xd283);
    }

    #[test]
    fn descriptors_stay_out_of_reserved_bits() {
        fn check<S: RegisterSpec>() {
            let reserved = Into::<u32>::into(S::RESERVED);
            for field in S::FIELDS {
                assert_eq!(field.mask() & reserved, 0, "bit {}", field.offset());
            }
        }
        check::<adcsr::Spec>();
        check::<adansa0::Spec>();
        check::<adads0::Spec>();
        check::<adadc::Spec>();
        check::<adcer::Spec>();
        check::<adstrgr::Spec>();
        check::<adansb0::Spec>();
        check::<addiscr::Spec>();
        check::<adgspcr::Spec>();
        check::<adcmpcr::Spec>();
        check::<adcmpansr0::Spec>();
        check::<adcmplr0::Spec>();
        check::<adcmpsr0::Spec>();
        check::<adcmpdr0::Spec>();
        check::<adcmpdr1::Spec>();
        check::<adcmpbnsr::Spec>();
        check::<adwinllb::Spec>();
        check::<adwinulb::Spec>();
        check::<adcmpbsr::Spec>();
        check::<adansc0::Spec>();
        check::<adgctrgr::Spec>();
        check::<adsstr::Spec>();

        for field in [adwinmon::MONCMPA, adwinmon::MONCMPB, adwinmon::MONCOMB] {
            assert_eq!(field.mask() as u8 & adwinmon::RESERVED, 0);
        }
    }

    #[test]
    fn reserved_bits_are_never_written() {
        let block = RegisterBlock::new();
        let s12ad = S12ad::new(&block);

        assert_eq!(
            s12ad.adcsr().write_field(Field::new(5, 1), 1),
            Err(Error::OutOfRange)
        );
        assert_eq!(s12ad.adcsr().write(0x0020), Err(Error::OutOfRange));
        assert_eq!(
            s12ad.adcsr().modify(|word| Ok(word | 0x0400)),
            Err(Error::OutOfRange)
        );
        assert_eq!(s12ad.adadc().write(0x08), Err(Error::OutOfRange));
        assert_eq!(
            s12ad.adcmpbnsr().write_field(Field::new(6, 1), 1),
            Err(Error::OutOfRange)
        );

        assert_eq!(block.adcsr().read(), 0);
        assert_eq!(block.adadc().read(), 0);
        assert_eq!(block.adcmpbnsr().read(), 0);
    }

    #[test]
    fn whole_word_writes_check_encodings() {
        let block = RegisterBlock::new();
        block.adcsr().write(0x4000).unwrap();

        assert_eq!(block.adcsr().check(0x6000), Err(Error::IllegalValue));
        assert_eq!(block.adcsr().write(0x6000), Err(Error::IllegalValue));
        assert_eq!(block.adcer().write(0x0006), Err(Error::IllegalValue));
        assert_eq!(block.adadc().write(0x04), Err(Error::IllegalValue));
        assert_eq!(block.adcmpbnsr().write(0x08), Err(Error::IllegalValue));

        assert_eq!(block.adcsr().read(), 0x4000);
        assert_eq!(block.adcer().read(), 0);
        assert_eq!(block.adadc().read(), 0);
        assert_eq!(block.adcmpbnsr().read(), 0);
        assert_eq!(block.adcmpbnsr().check(adcmpbnsr::NO_CHANNEL), Ok(()));
    }

    #[test]
    fn distinct_fields_do_not_overlap() {
        let fields = [
            adcsr::ADST,
            adcsr::ADCS,
            adcsr::ADIE,
            adcsr::TRGE,
            adcsr::EXTRG,
            adcsr::DBLE,
            adcsr::GBADIE,
            adcsr::DBLANS,
        ];
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                assert!(!a.overlaps(b), "{:?} / {:?}", a, b);
            }
        }
        // Aliases share their bits on purpose
        assert!(addiscr::PERIOD.overlaps(&addiscr::ADNDIS));
        assert!(addiscr::PRECHARGE.overlaps(&addiscr::ADNDIS));
    }
}
