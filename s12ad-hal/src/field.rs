//! Bit-range descriptors over register words
//!
//! A [`Field`] names a run of bits inside an 8 or 16 bit register word. The
//! descriptor holds no state: reading extracts and right-justifies the bits of a
//! word, writing produces a new word with exactly those bits replaced and every
//! other bit preserved.
//!
//! Fields may carry the set of encodings the hardware accepts. Writing an
//! encoding outside that set fails with [`Error::IllegalValue`], writing a
//! value wider than the field fails with [`Error::OutOfRange`]. Neither case
//! ever truncates or wraps.
//!
//! ```
//! use s12ad_hal::field::Field;
//! use s12ad_hal::Error;
//!
//! // A 2 bit mode field at bits 14..13 where `0b11` is prohibited.
//! const MODE: Field<u16> = Field::new(13, 2).with_legal(&[0b00, 0b01, 0b10]);
//!
//! let word = MODE.write(0x8001, 0b10).unwrap();
//! assert_eq!(word, 0xC001);
//! assert_eq!(MODE.read(word), 0b10);
//! assert_eq!(MODE.write(word, 0b11), Err(Error::IllegalValue));
//! assert_eq!(MODE.write(word, 0b100), Err(Error::OutOfRange));
//! ```

use bitfield::{BitRange, BitRangeMut};

use crate::{typelevel::Sealed, Error};

/// Raw storage type of a register: `u8` or `u16`.
///
/// This trait is sealed and can't be implemented in other crates.
pub trait RegisterWord:
    Sealed + Copy + PartialEq + Into<u32> + BitRange<Self> + BitRangeMut<Self>
{
    /// Total width of the word in bits.
    const BITS: usize;
}

impl Sealed for u8 {}
impl RegisterWord for u8 {
    const BITS: usize = 8;
}

impl Sealed for u16 {}
impl RegisterWord for u16 {
    const BITS: usize = 16;
}

/// Descriptor of a bit range inside a register word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<W: 'static> {
    offset: usize,
    width: usize,
    legal: Option<&'static [W]>,
}

impl<W: RegisterWord> Field<W> {
    /// Describe `width` bits starting at bit `offset`.
    ///
    /// Panics (at compile time when used in a `const`) if the range does not
    /// fit the word.
    pub const fn new(offset: usize, width: usize) -> Self {
        assert!(width > 0 && offset + width <= W::BITS);
        Self {
            offset,
            width,
            legal: None,
        }
    }

    /// Restrict the field to an enumerated set of encodings.
    pub const fn with_legal(self, legal: &'static [W]) -> Self {
        Self {
            legal: Some(legal),
            ..self
        }
    }

    /// Position of the least significant bit of the field.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bits covered by the field.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Position of the most significant bit of the field.
    pub const fn msb(&self) -> usize {
        self.offset + self.width - 1
    }

    /// Largest value that fits the field.
    pub const fn max(&self) -> u32 {
        (1 << self.width) - 1
    }

    /// Bits covered by the field, in word position.
    pub const fn mask(&self) -> u32 {
        self.max() << self.offset
    }

    /// The enumerated legal encodings, if the field has any.
    pub const fn legal_values(&self) -> Option<&'static [W]> {
        self.legal
    }

    /// Check that `value` may be written to this field.
    pub fn check(&self, value: W) -> Result<(), Error> {
        if value.into() > self.max() {
            return Err(Error::OutOfRange);
        }
        match self.legal {
            Some(legal) if !legal.contains(&value) => Err(Error::IllegalValue),
            _ => Ok(()),
        }
    }

    /// Extract the field from `word`, right-justified.
    pub fn read(&self, word: W) -> W {
        word.bit_range(self.msb(), self.offset)
    }

    /// Whether any bit of the field is set in `word`.
    pub fn is_set(&self, word: W) -> bool {
        (word.into() & self.mask()) != 0
    }

    /// Return `word` with the field replaced by `value`.
    ///
    /// All bits outside the field are preserved. Nothing is produced if the
    /// value does not pass [`Field::check`].
    pub fn write(&self, word: W, value: W) -> Result<W, Error> {
        self.check(value)?;
        let mut word = word;
        word.set_bit_range(self.msb(), self.offset, value);
        Ok(word)
    }

    /// Whether the two fields share at least one bit.
    pub const fn overlaps(&self, other: &Field<W>) -> bool {
        self.mask() & other.mask() != 0
    }
}

impl Field<u8> {
    /// Return `word` with a single bit field set or cleared.
    pub fn write_bool(&self, word: u8, value: bool) -> Result<u8, Error> {
        self.write(word, value as u8)
    }
}

impl Field<u16> {
    /// Return `word` with a single bit field set or cleared.
    pub fn write_bool(&self, word: u16, value: bool) -> Result<u16, Error> {
        self.write(word, value as u16)
    }
}
