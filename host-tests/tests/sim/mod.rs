//! Simulated converter hardware
//!
//! Plays the part of the analog front end: it writes the registers the
//! peripheral owns and ends scans the way the hardware would.
#![allow(dead_code)]

use s12ad_hal::{
    field::RegisterWord,
    pac::{adcsr, RegisterBlock, S12ad},
    register::{ReadOnly, Reg, RegisterSpec},
    Adc,
};

/// A driver over `block`, initialized.
pub fn adc(block: &RegisterBlock) -> Adc<'_> {
    let mut adc = Adc::new(S12ad::new(block));
    adc.initialize().unwrap();
    adc
}

/// Store a value into a register only the hardware writes.
pub fn hw_write<W: RegisterWord>(reg: &ReadOnly<W>, value: W) {
    // Safety: the block lives in ordinary memory
    unsafe { reg.as_ptr().write_volatile(value) }
}

/// Store any value into a read-write register, bypassing its checks.
///
/// Stands in for the hardware state a faulty or foreign writer could leave.
pub fn force<S: RegisterSpec>(reg: &Reg<S>, value: S::Ux) {
    // Safety: the block lives in ordinary memory
    unsafe { reg.as_ptr().write_volatile(value) }
}

/// Place a conversion result in the data register of `channel`.
pub fn convert(block: &RegisterBlock, channel: usize, raw: u16) {
    hw_write(block.addr(channel), raw);
}

/// End the current scan. In single scan mode the start bit drops.
pub fn end_scan(block: &RegisterBlock) {
    let word = block.adcsr().read();
    if adcsr::ADCS.read(word) == 0b00 {
        block.adcsr().write(adcsr::ADST.write(word, 0).unwrap()).unwrap();
    }
}

/// A trigger starting a scan.
pub fn trigger(block: &RegisterBlock) {
    let word = block.adcsr().read();
    block.adcsr().write(adcsr::ADST.write(word, 1).unwrap()).unwrap();
}
