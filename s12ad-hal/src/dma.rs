//! DMA collaboration
//!
//! The converter does not program a DMA controller. It only keeps whatever
//! channel handle the application associates with it (see
//! [`Adc::with_dma`](crate::Adc::with_dma)) and describes its data registers
//! as a transfer source.

use core::marker::PhantomData;

use embedded_dma::ReadBuffer;

use crate::pac::RegisterBlock;

/// Placeholder used while no DMA channel is associated with the converter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoDma;

/// The data registers ADDR0 to ADDR7 as a DMA source
///
/// The registers are consecutive 16 bit words, so a transfer reads them with an
/// incrementing source address.
pub struct DataRegisterSource<'a> {
    ptr: *const u16,
    marker: PhantomData<&'a RegisterBlock>,
}

impl<'a> DataRegisterSource<'a> {
    pub(crate) fn new(block: &'a RegisterBlock) -> Self {
        Self {
            ptr: block.addr(0).as_ptr() as *const u16,
            marker: PhantomData,
        }
    }

    /// Bus address of ADDR0.
    pub fn address(&self) -> usize {
        self.ptr as usize
    }
}

/// Safety: the pointer targets the data register bank, which stays mapped for
/// as long as the register block is borrowed.
unsafe impl ReadBuffer for DataRegisterSource<'_> {
    type Word = u16;

    unsafe fn read_buffer(&self) -> (*const Self::Word, usize) {
        (self.ptr, RegisterBlock::CHANNELS)
    }
}
