//! Register map of the S12AD converter
//!
//! [`RegisterBlock`] reproduces the peripheral layout byte for byte, reserved
//! gaps included. Each register has a module of the same name holding its
//! [`Field`](crate::field::Field) descriptors and a `RESERVED` mask of the bits
//! no descriptor may touch. Read-write registers also get a `Spec` type, and
//! every write through their [`Reg`] is checked against both.
//!
//! Registers are independent: the block offers no operation spanning more than
//! one of them.
//!
//! [`S12ad`] binds a register block, either the physical one at
//! [`S12ad::BASE`] or an in-memory one created with [`RegisterBlock::new`].
//!
//! ```
//! use s12ad_hal::pac::{adcsr, RegisterBlock, S12ad};
//!
//! let block = RegisterBlock::new();
//! let s12ad = S12ad::new(&block);
//! s12ad.adcsr().write_field(adcsr::ADCS, 0b10).unwrap();
//! assert_eq!(s12ad.adcsr().read(), 0x4000);
//! ```

use core::{cell::Cell, mem::offset_of, ops::Deref};

use critical_section::Mutex;

use crate::{
    register::{ReadOnly, Reg},
    Error,
};

/// Register block of the converter
#[repr(C)]
pub struct RegisterBlock {
    adcsr: Reg<adcsr::Spec>,
    _reserved0: [u8; 2],
    adansa0: Reg<adansa0::Spec>,
    _reserved1: [u8; 2],
    adads0: Reg<adads0::Spec>,
    _reserved2: [u8; 2],
    adadc: Reg<adadc::Spec>,
    _reserved3: [u8; 1],
    adcer: Reg<adcer::Spec>,
    adstrgr: Reg<adstrgr::Spec>,
    _reserved4: [u8; 2],
    adansb0: Reg<adansb0::Spec>,
    _reserved5: [u8; 2],
    addbldr: ReadOnly<u16>,
    _reserved6: [u8; 4],
    adrd: ReadOnly<u16>,
    addr: [ReadOnly<u16>; 8],
    _reserved7: [u8; 0x4a],
    addiscr: Reg<addiscr::Spec>,
    _reserved8: [u8; 5],
    adgspcr: Reg<adgspcr::Spec>,
    _reserved9: [u8; 2],
    addbldra: ReadOnly<u16>,
    addbldrb: ReadOnly<u16>,
    _reserved10: [u8; 4],
    adwinmon: ReadOnly<u8>,
    _reserved11: [u8; 3],
    adcmpcr: Reg<adcmpcr::Spec>,
    _reserved12: [u8; 2],
    adcmpansr0: Reg<adcmpansr0::Spec>,
    _reserved13: [u8; 2],
    adcmplr0: Reg<adcmplr0::Spec>,
    _reserved14: [u8; 2],
    adcmpdr0: Reg<adcmpdr0::Spec>,
    adcmpdr1: Reg<adcmpdr1::Spec>,
    adcmpsr0: Reg<adcmpsr0::Spec>,
    _reserved15: [u8; 4],
    adcmpbnsr: Reg<adcmpbnsr::Spec>,
    _reserved16: [u8; 1],
    adwinllb: Reg<adwinllb::Spec>,
    adwinulb: Reg<adwinulb::Spec>,
    adcmpbsr: Reg<adcmpbsr::Spec>,
    _reserved17: [u8; 0x27],
    adansc0: Reg<adansc0::Spec>,
    _reserved18: [u8; 3],
    adgctrgr: Reg<adgctrgr::Spec>,
    _reserved19: [u8; 6],
    adsstr: [Reg<adsstr::Spec>; 8],
}

const _: () = {
    assert!(offset_of!(RegisterBlock, adcsr) == 0x00);
    assert!(offset_of!(RegisterBlock, adansa0) == 0x04);
    assert!(offset_of!(RegisterBlock, adads0) == 0x08);
    assert!(offset_of!(RegisterBlock, adadc) == 0x0c);
    assert!(offset_of!(RegisterBlock, adcer) == 0x0e);
    assert!(offset_of!(RegisterBlock, adstrgr) == 0x10);
    assert!(offset_of!(RegisterBlock, adansb0) == 0x14);
    assert!(offset_of!(RegisterBlock, addbldr) == 0x18);
    assert!(offset_of!(RegisterBlock, adrd) == 0x1e);
    assert!(offset_of!(RegisterBlock, addr) == 0x20);
    assert!(offset_of!(RegisterBlock, addiscr) == 0x7a);
    assert!(offset_of!(RegisterBlock, adgspcr) == 0x80);
    assert!(offset_of!(RegisterBlock, addbldra) == 0x84);
    assert!(offset_of!(RegisterBlock, addbldrb) == 0x86);
    assert!(offset_of!(RegisterBlock, adwinmon) == 0x8c);
    assert!(offset_of!(RegisterBlock, adcmpcr) == 0x90);
    assert!(offset_of!(RegisterBlock, adcmpansr0) == 0x94);
    assert!(offset_of!(RegisterBlock, adcmplr0) == 0x98);
    assert!(offset_of!(RegisterBlock, adcmpdr0) == 0x9c);
    assert!(offset_of!(RegisterBlock, adcmpdr1) == 0x9e);
    assert!(offset_of!(RegisterBlock, adcmpsr0) == 0xa0);
    assert!(offset_of!(RegisterBlock, adcmpbnsr) == 0xa6);
    assert!(offset_of!(RegisterBlock, adwinllb) == 0xa8);
    assert!(offset_of!(RegisterBlock, adwinulb) == 0xaa);
    assert!(offset_of!(RegisterBlock, adcmpbsr) == 0xac);
    assert!(offset_of!(RegisterBlock, adansc0) == 0xd4);
    assert!(offset_of!(RegisterBlock, adgctrgr) == 0xd9);
    assert!(offset_of!(RegisterBlock, adsstr) == 0xe0);
    assert!(core::mem::size_of::<RegisterBlock>() == RegisterBlock::SIZE);
};

impl RegisterBlock {
    /// Size of the register block in bytes.
    pub const SIZE: usize = 0xe8;

    /// Number of analog input channels.
    pub const CHANNELS: usize = 8;

    /// Create a register block in ordinary memory, in the power-on state.
    pub const fn new() -> Self {
        Self {
            adcsr: Reg::new(0),
            _reserved0: [0; 2],
            adansa0: Reg::new(0),
            _reserved1: [0; 2],
            adads0: Reg::new(0),
            _reserved2: [0; 2],
            adadc: Reg::new(0),
            _reserved3: [0; 1],
            adcer: Reg::new(0),
            adstrgr: Reg::new(0),
            _reserved4: [0; 2],
            adansb0: Reg::new(0),
            _reserved5: [0; 2],
            addbldr: ReadOnly::new(0),
            _reserved6: [0; 4],
            adrd: ReadOnly::new(0),
            addr: [
                ReadOnly::new(0),
                ReadOnly::new(0),
                ReadOnly::new(0),
                ReadOnly::new(0),
                ReadOnly::new(0),
                ReadOnly::new(0),
                ReadOnly::new(0),
                ReadOnly::new(0),
            ],
            _reserved7: [0; 0x4a],
            addiscr: Reg::new(0),
            _reserved8: [0; 5],
            adgspcr: Reg::new(0),
            _reserved9: [0; 2],
            addbldra: ReadOnly::new(0),
            addbldrb: ReadOnly::new(0),
            _reserved10: [0; 4],
            adwinmon: ReadOnly::new(0),
            _reserved11: [0; 3],
            adcmpcr: Reg::new(0),
            _reserved12: [0; 2],
            adcmpansr0: Reg::new(0),
            _reserved13: [0; 2],
            adcmplr0: Reg::new(0),
            _reserved14: [0; 2],
            adcmpdr0: Reg::new(0),
            adcmpdr1: Reg::new(0),
            adcmpsr0: Reg::new(0),
            _reserved15: [0; 4],
            adcmpbnsr: Reg::new(0),
            _reserved16: [0; 1],
            adwinllb: Reg::new(0),
            adwinulb: Reg::new(0),
            adcmpbsr: Reg::new(0),
            _reserved17: [0; 0x27],
            adansc0: Reg::new(0),
            _reserved18: [0; 3],
            adgctrgr: Reg::new(0),
            _reserved19: [0; 6],
            adsstr: [
                Reg::new(0),
                Reg::new(0),
                Reg::new(0),
                Reg::new(0),
                Reg::new(0),
                Reg::new(0),
                Reg::new(0),
                Reg::new(0),
            ],
        }
    }

    /// 0x00 - A/D control register
    #[inline(always)]
    pub const fn adcsr(&self) -> &Reg<adcsr::Spec> {
        &self.adcsr
    }
    /// 0x04 - A/D channel select register A0
    #[inline(always)]
    pub const fn adansa0(&self) -> &Reg<adansa0::Spec> {
        &self.adansa0
    }
    /// 0x08 - A/D-converted value addition/average channel select register 0
    #[inline(always)]
    pub const fn adads0(&self) -> &Reg<adads0::Spec> {
        &self.adads0
    }
    /// 0x0c - A/D-converted value addition/average count select register
    #[inline(always)]
    pub const fn adadc(&self) -> &Reg<adadc::Spec> {
        &self.adadc
    }
    /// 0x0e - A/D control extended register
    #[inline(always)]
    pub const fn adcer(&self) -> &Reg<adcer::Spec> {
        &self.adcer
    }
    /// 0x10 - A/D conversion start trigger select register
    #[inline(always)]
    pub const fn adstrgr(&self) -> &Reg<adstrgr::Spec> {
        &self.adstrgr
    }
    /// 0x14 - A/D channel select register B0
    #[inline(always)]
    pub const fn adansb0(&self) -> &Reg<adansb0::Spec> {
        &self.adansb0
    }
    /// 0x18 - A/D data duplexing register
    #[inline(always)]
    pub const fn addbldr(&self) -> &ReadOnly<u16> {
        &self.addbldr
    }
    /// 0x1e - A/D self-diagnosis data register
    #[inline(always)]
    pub const fn adrd(&self) -> &ReadOnly<u16> {
        &self.adrd
    }
    /// 0x20 + 2n - A/D data register n
    ///
    /// Panics if `n` is not below [`RegisterBlock::CHANNELS`].
    #[inline(always)]
    pub const fn addr(&self, n: usize) -> &ReadOnly<u16> {
        &self.addr[n]
    }
    /// Iterator over the data registers, channel 0 first
    #[inline(always)]
    pub fn addr_iter(&self) -> impl Iterator<Item = &ReadOnly<u16>> {
        self.addr.iter()
    }
    /// 0x7a - A/D disconnection detection control register
    #[inline(always)]
    pub const fn addiscr(&self) -> &Reg<addiscr::Spec> {
        &self.addiscr
    }
    /// 0x80 - A/D group scan priority control register
    #[inline(always)]
    pub const fn adgspcr(&self) -> &Reg<adgspcr::Spec> {
        &self.adgspcr
    }
    /// 0x84 - A/D data duplexing register A
    #[inline(always)]
    pub const fn addbldra(&self) -> &ReadOnly<u16> {
        &self.addbldra
    }
    /// 0x86 - A/D data duplexing register B
    #[inline(always)]
    pub const fn addbldrb(&self) -> &ReadOnly<u16> {
        &self.addbldrb
    }
    /// 0x8c - A/D compare function window A/B status monitor register
    #[inline(always)]
    pub const fn adwinmon(&self) -> &ReadOnly<u8> {
        &self.adwinmon
    }
    /// 0x90 - A/D compare function control register
    #[inline(always)]
    pub const fn adcmpcr(&self) -> &Reg<adcmpcr::Spec> {
        &self.adcmpcr
    }
    /// 0x94 - A/D compare function window A channel select register 0
    #[inline(always)]
    pub const fn adcmpansr0(&self) -> &Reg<adcmpansr0::Spec> {
        &self.adcmpansr0
    }
    /// 0x98 - A/D compare function window A comparison condition setting register 0
    #[inline(always)]
    pub const fn adcmplr0(&self) -> &Reg<adcmplr0::Spec> {
        &self.adcmplr0
    }
    /// 0x9c - A/D compare function window A lower-side level setting register
    #[inline(always)]
    pub const fn adcmpdr0(&self) -> &Reg<adcmpdr0::Spec> {
        &self.adcmpdr0
    }
    /// 0x9e - A/D compare function window A upper-side level setting register
    #[inline(always)]
    pub const fn adcmpdr1(&self) -> &Reg<adcmpdr1::Spec> {
        &self.adcmpdr1
    }
    /// 0xa0 - A/D compare function window A channel status register 0
    #[inline(always)]
    pub const fn adcmpsr0(&self) -> &Reg<adcmpsr0::Spec> {
        &self.adcmpsr0
    }
    /// 0xa6 - A/D compare function window B channel select register
    #[inline(always)]
    pub const fn adcmpbnsr(&self) -> &Reg<adcmpbnsr::Spec> {
        &self.adcmpbnsr
    }
    /// 0xa8 - A/D compare function window B lower-side level setting register
    #[inline(always)]
    pub const fn adwinllb(&self) -> &Reg<adwinllb::Spec> {
        &self.adwinllb
    }
    /// 0xaa - A/D compare function window B upper-side level setting register
    #[inline(always)]
    pub const fn adwinulb(&self) -> &Reg<adwinulb::Spec> {
        &self.adwinulb
    }
    /// 0xac - A/D compare function window B status register
    #[inline(always)]
    pub const fn adcmpbsr(&self) -> &Reg<adcmpbsr::Spec> {
        &self.adcmpbsr
    }
    /// 0xd4 - A/D channel select register C0
    #[inline(always)]
    pub const fn adansc0(&self) -> &Reg<adansc0::Spec> {
        &self.adansc0
    }
    /// 0xd9 - A/D group C trigger select register
    #[inline(always)]
    pub const fn adgctrgr(&self) -> &Reg<adgctrgr::Spec> {
        &self.adgctrgr
    }
    /// 0xe0 + n - A/D sampling state register n
    ///
    /// Panics if `n` is not below [`RegisterBlock::CHANNELS`].
    #[inline(always)]
    pub const fn adsstr(&self, n: usize) -> &Reg<adsstr::Spec> {
        &self.adsstr[n]
    }
}

impl Default for RegisterBlock {
    fn default() -> Self {
        Self::new()
    }
}

// Implements `RegisterSpec` from the descriptors and `RESERVED` mask of the
// enclosing register module.
macro_rules! register_spec {
    ($name:literal, $ux:ty, [$($field:ident),+ $(,)?]) => {
        #[doc = concat!("Layout of ", $name)]
        pub struct Spec;

        impl crate::register::RegisterSpec for Spec {
            type Ux = $ux;
            const RESERVED: $ux = RESERVED;
            const FIELDS: &'static [crate::field::Field<$ux>] = &[$($field),+];
        }
    };
}

/// ADCSR field descriptors
pub mod adcsr {
    use crate::field::Field;

    /// A/D conversion start
    pub const ADST: Field<u16> = Field::new(15, 1);
    /// Scan mode select: single, group or continuous
    pub const ADCS: Field<u16> = Field::new(13, 2).with_legal(&[0b00, 0b01, 0b10]);
    /// Scan end interrupt enable
    pub const ADIE: Field<u16> = Field::new(12, 1);
    /// Trigger start enable
    pub const TRGE: Field<u16> = Field::new(9, 1);
    /// Trigger select: synchronous or asynchronous (ADTRG#)
    pub const EXTRG: Field<u16> = Field::new(8, 1);
    /// Double trigger mode select
    pub const DBLE: Field<u16> = Field::new(7, 1);
    /// Group B scan end interrupt enable
    pub const GBADIE: Field<u16> = Field::new(6, 1);
    /// Double trigger channel select
    pub const DBLANS: Field<u16> = Field::new(0, 5).with_legal(&[0, 1, 2, 3, 4, 5, 6, 7]);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0x0c20;

    register_spec!("ADCSR", u16, [ADST, ADCS, ADIE, TRGE, EXTRG, DBLE, GBADIE, DBLANS]);
}

/// ADANSA0 field descriptors
pub mod adansa0 {
    use crate::field::Field;

    /// Channel select for group A
    pub const ANSA0: Field<u16> = Field::new(0, 8);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xff00;

    register_spec!("ADANSA0", u16, [ANSA0]);
}

/// ADADS0 field descriptors
pub mod adads0 {
    use crate::field::Field;

    /// Addition/average channel select
    pub const ADS0: Field<u16> = Field::new(0, 8);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xff00;

    register_spec!("ADADS0", u16, [ADS0]);
}

/// ADADC field descriptors
pub mod adadc {
    use crate::field::Field;

    /// Average mode enable
    pub const AVEE: Field<u8> = Field::new(7, 1);
    /// Addition/average count select
    pub const ADC: Field<u8> = Field::new(0, 3).with_legal(&[0b000, 0b001, 0b010, 0b011, 0b101]);
    /// Bits without a descriptor
    pub const RESERVED: u8 = 0x78;

    register_spec!("ADADC", u8, [AVEE, ADC]);
}

/// ADCER field descriptors
pub mod adcer {
    use crate::field::Field;

    /// Data register format select
    pub const ADRFMT: Field<u16> = Field::new(15, 1);
    /// Self-diagnosis enable
    pub const DIAGM: Field<u16> = Field::new(11, 1);
    /// Self-diagnosis mode select: rotation or fixed
    pub const DIAGLD: Field<u16> = Field::new(10, 1);
    /// Self-diagnosis conversion voltage select
    ///
    /// `0b00` is only legal while self-diagnosis is disabled, which the
    /// descriptor does not check.
    pub const DIAGVAL: Field<u16> = Field::new(8, 2);
    /// Automatic clearing enable
    pub const ACE: Field<u16> = Field::new(5, 1);
    /// Conversion accuracy
    pub const ADPRC: Field<u16> = Field::new(1, 2).with_legal(&[0b00, 0b01, 0b10]);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0x70d9;

    register_spec!("ADCER", u16, [ADRFMT, DIAGM, DIAGLD, DIAGVAL, ACE, ADPRC]);
}

/// ADSTRGR field descriptors
pub mod adstrgr {
    use crate::field::Field;

    /// Conversion start trigger for group A
    pub const TRSA: Field<u16> = Field::new(8, 6);
    /// Conversion start trigger for group B
    pub const TRSB: Field<u16> = Field::new(0, 6);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xc0c0;

    register_spec!("ADSTRGR", u16, [TRSA, TRSB]);
}

/// ADANSB0 field descriptors
pub mod adansb0 {
    use crate::field::Field;

    /// Channel select for group B
    pub const ANSB0: Field<u16> = Field::new(0, 8);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xff00;

    register_spec!("ADANSB0", u16, [ANSB0]);
}

/// ADRD field descriptors
///
/// The status bits move with the data register format, hence two aliases.
pub mod adrd {
    use crate::field::Field;

    /// Self-diagnosis status, right-justified format
    pub const DIAGST_RIGHT: Field<u16> = Field::new(14, 2);
    /// Self-diagnosis status, left-justified format
    pub const DIAGST_LEFT: Field<u16> = Field::new(0, 2);
}

/// ADDISCR field descriptors
pub mod addiscr {
    use crate::field::Field;

    /// Disconnection detection assist setting
    pub const ADNDIS: Field<u8> = Field::new(0, 5);
    /// Precharge (1) or discharge (0), alias of `ADNDIS` bit 4
    pub const PRECHARGE: Field<u8> = Field::new(4, 1);
    /// Assist period in states, alias of `ADNDIS` bits 3..0, 0 disables
    pub const PERIOD: Field<u8> = Field::new(0, 4);
    /// Bits without a descriptor
    pub const RESERVED: u8 = 0xe0;

    register_spec!("ADDISCR", u8, [ADNDIS, PRECHARGE, PERIOD]);
}

/// ADGSPCR field descriptors
pub mod adgspcr {
    use crate::field::Field;

    /// Single scan continuous start for group B, requires `PGS`
    pub const GBRP: Field<u16> = Field::new(15, 1);
    /// Restart from the interrupted channel, requires `PGS` and `GBRSCN`
    pub const LGRRS: Field<u16> = Field::new(14, 1);
    /// Group B restart after priority interruption, requires `PGS`
    pub const GBRSCN: Field<u16> = Field::new(1, 1);
    /// Group priority operation
    pub const PGS: Field<u16> = Field::new(0, 1);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0x3ffc;

    register_spec!("ADGSPCR", u16, [GBRP, LGRRS, GBRSCN, PGS]);
}

/// ADWINMON field descriptors
pub mod adwinmon {
    use crate::field::Field;

    /// Comparison result monitor B
    pub const MONCMPB: Field<u8> = Field::new(5, 1);
    /// Comparison result monitor A
    pub const MONCMPA: Field<u8> = Field::new(4, 1);
    /// Combined comparison result monitor
    pub const MONCOMB: Field<u8> = Field::new(0, 1);
    /// Bits without a descriptor
    pub const RESERVED: u8 = 0xce;
}

/// ADCMPCR field descriptors
pub mod adcmpcr {
    use crate::field::Field;

    /// Window A interrupt enable
    pub const CMPAIE: Field<u16> = Field::new(15, 1);
    /// Window function setting
    pub const WCMPE: Field<u16> = Field::new(14, 1);
    /// Window B interrupt enable
    pub const CMPBIE: Field<u16> = Field::new(13, 1);
    /// Window A operation enable
    pub const CMPAE: Field<u16> = Field::new(11, 1);
    /// Window B operation enable
    pub const CMPBE: Field<u16> = Field::new(9, 1);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0x15ff;

    register_spec!("ADCMPCR", u16, [CMPAIE, WCMPE, CMPBIE, CMPAE, CMPBE]);
}

/// ADCMPANSR0 field descriptors
pub mod adcmpansr0 {
    use crate::field::Field;

    /// Window A channel select
    pub const CMPCHA0: Field<u16> = Field::new(0, 8);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xff00;

    register_spec!("ADCMPANSR0", u16, [CMPCHA0]);
}

/// ADCMPLR0 field descriptors
pub mod adcmplr0 {
    use crate::field::Field;

    /// Window A comparison condition per channel
    pub const CMPLCHA0: Field<u16> = Field::new(0, 8);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xff00;

    register_spec!("ADCMPLR0", u16, [CMPLCHA0]);
}

/// ADCMPSR0 field descriptors
pub mod adcmpsr0 {
    use crate::field::Field;

    /// Window A status per channel
    pub const CMPSTCHA0: Field<u16> = Field::new(0, 8);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xff00;

    register_spec!("ADCMPSR0", u16, [CMPSTCHA0]);
}

/// ADCMPDR0 field descriptors
pub mod adcmpdr0 {
    use crate::field::Field;

    /// Window A reference, or lower bound with the window function on
    pub const LEVEL: Field<u16> = Field::new(0, 16);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0;

    register_spec!("ADCMPDR0", u16, [LEVEL]);
}

/// ADCMPDR1 field descriptors
pub mod adcmpdr1 {
    use crate::field::Field;

    /// Window A upper bound
    pub const LEVEL: Field<u16> = Field::new(0, 16);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0;

    register_spec!("ADCMPDR1", u16, [LEVEL]);
}

/// ADCMPBNSR field descriptors
pub mod adcmpbnsr {
    use crate::field::Field;

    /// Window B comparison condition
    pub const CMPLB: Field<u8> = Field::new(7, 1);
    /// Window B channel select, `0x3f` selects no channel
    pub const CMPCHB: Field<u8> =
        Field::new(0, 6).with_legal(&[0, 1, 2, 3, 4, 5, 6, 7, NO_CHANNEL]);
    /// `CMPCHB` encoding that selects no channel
    pub const NO_CHANNEL: u8 = 0x3f;
    /// Bits without a descriptor
    pub const RESERVED: u8 = 0x40;

    register_spec!("ADCMPBNSR", u8, [CMPLB, CMPCHB]);
}

/// ADWINLLB field descriptors
pub mod adwinllb {
    use crate::field::Field;

    /// Window B reference, or lower bound with the window function on
    pub const LEVEL: Field<u16> = Field::new(0, 16);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0;

    register_spec!("ADWINLLB", u16, [LEVEL]);
}

/// ADWINULB field descriptors
pub mod adwinulb {
    use crate::field::Field;

    /// Window B upper bound
    pub const LEVEL: Field<u16> = Field::new(0, 16);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0;

    register_spec!("ADWINULB", u16, [LEVEL]);
}

/// ADCMPBSR field descriptors
pub mod adcmpbsr {
    use crate::field::Field;

    /// Window B status
    pub const CMPSTB: Field<u8> = Field::new(0, 1);
    /// Bits without a descriptor
    pub const RESERVED: u8 = 0xfe;

    register_spec!("ADCMPBSR", u8, [CMPSTB]);
}

/// ADANSC0 field descriptors
pub mod adansc0 {
    use crate::field::Field;

    /// Channel select for group C
    pub const ANSC0: Field<u16> = Field::new(0, 8);
    /// Bits without a descriptor
    pub const RESERVED: u16 = 0xff00;

    register_spec!("ADANSC0", u16, [ANSC0]);
}

/// ADGCTRGR field descriptors
pub mod adgctrgr {
    use crate::field::Field;

    /// Group C enable
    pub const GRCE: Field<u8> = Field::new(7, 1);
    /// Group C scan end interrupt enable
    pub const GCADIE: Field<u8> = Field::new(6, 1);
    /// Conversion start trigger for group C
    pub const TRSC: Field<u8> = Field::new(0, 6);
    /// Bits without a descriptor
    pub const RESERVED: u8 = 0;

    register_spec!("ADGCTRGR", u8, [GRCE, GCADIE, TRSC]);
}

/// ADSSTRn field descriptors
pub mod adsstr {
    use crate::field::Field;

    /// Sampling time in states
    pub const SST: Field<u8> = Field::new(0, 8);
    /// Smallest legal sampling time
    pub const MIN_STATES: u8 = 5;
    /// Bits without a descriptor
    pub const RESERVED: u8 = 0;

    register_spec!("ADSSTRn", u8, [SST]);
}

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// A bound register map
///
/// Dereferences to the [`RegisterBlock`] it was created from. At most one
/// handle should exist per physical converter; [`S12ad::take`] enforces that for
/// the instance at [`S12ad::BASE`].
pub struct S12ad<'a> {
    block: &'a RegisterBlock,
}

impl<'a> S12ad<'a> {
    /// Base address of the physical converter.
    pub const BASE: usize = 0xe800_5800;

    /// Bind a register block that lives in ordinary memory.
    ///
    /// Nothing stops two handles from sharing one block; [`S12ad::take`] is
    /// the only aliasing guard and covers the physical converter alone. To
    /// inspect the registers behind a driver, use
    /// [`Adc::device`](crate::Adc::device) instead of binding a second handle.
    pub const fn new(block: &'a RegisterBlock) -> Self {
        Self { block }
    }

    /// Bind the register block at `base`.
    ///
    /// A null base is reported as [`Error::NotReady`] and a base that is not
    /// aligned for 16 bit access as [`Error::OutOfRange`].
    ///
    /// # Safety
    ///
    /// `base` must point to a converter register block (or memory laid out
    /// like one) that stays valid for `'a`, and no other handle may be bound to
    /// it.
    pub unsafe fn from_base(base: usize) -> Result<Self, Error> {
        if base == 0 {
            return Err(Error::NotReady);
        }
        if base % core::mem::align_of::<RegisterBlock>() != 0 {
            return Err(Error::OutOfRange);
        }
        Ok(Self {
            block: &*(base as *const RegisterBlock),
        })
    }

    /// Address of the bound register block.
    pub fn base(&self) -> usize {
        self.block as *const RegisterBlock as usize
    }

    /// The bound register block, for the full lifetime of the binding.
    pub const fn register_block(&self) -> &'a RegisterBlock {
        self.block
    }
}

impl S12ad<'static> {
    /// Take the physical converter. Returns `None` after the first call.
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            if TAKEN.borrow(cs).replace(true) {
                None
            } else {
                // Safety: the flag makes this the only handle handed out
                Some(unsafe { Self::steal() })
            }
        })
    }

    /// Bind the physical converter without checking for other handles.
    ///
    /// # Safety
    ///
    /// Must only be called on the target device, and never while another handle
    /// to the physical converter is in use.
    pub unsafe fn steal() -> Self {
        Self {
            block: &*(Self::BASE as *const RegisterBlock),
        }
    }
}

impl Deref for S12ad<'_> {
    type Target = RegisterBlock;

    #[inline(always)]
    fn deref(&self) -> &RegisterBlock {
        self.block
    }
}
