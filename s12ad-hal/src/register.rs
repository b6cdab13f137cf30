//! Volatile register cells
//!
//! [`Reg`] is a read-write register and [`ReadOnly`] a register whose value is
//! only ever produced by the hardware. Both are `repr(transparent)` over a
//! [`VolatileCell`], so a [`RegisterBlock`](crate::pac::RegisterBlock) placed at
//! the peripheral base address maps them one to one onto the hardware words.
//!
//! A [`Reg`] is typed by its [`RegisterSpec`], which lists the reserved bits
//! and the field descriptors of the register. Every write is checked against
//! it: reserved bits give [`Error::OutOfRange`], a prohibited field encoding
//! [`Error::IllegalValue`], and in both cases the register is not written.

use core::marker::PhantomData;

use vcell::VolatileCell;

use crate::{
    field::{Field, RegisterWord},
    Error,
};

/// Layout of one read-write register
pub trait RegisterSpec {
    /// Raw storage type.
    type Ux: RegisterWord + 'static;
    /// Bits no write may set.
    const RESERVED: Self::Ux;
    /// Field descriptors of the register, aliases included.
    const FIELDS: &'static [Field<Self::Ux>];

    /// Check a whole register word.
    fn validate(word: Self::Ux) -> Result<(), Error> {
        if Into::<u32>::into(word) & Into::<u32>::into(Self::RESERVED) != 0 {
            return Err(Error::OutOfRange);
        }
        Self::FIELDS
            .iter()
            .try_for_each(|field| field.check(field.read(word)))
    }
}

/// Read-write register
#[repr(transparent)]
pub struct Reg<S: RegisterSpec> {
    cell: VolatileCell<S::Ux>,
    _spec: PhantomData<S>,
}

impl<S: RegisterSpec> Reg<S> {
    /// Create a register holding `reset`.
    ///
    /// Only useful for register blocks that live in ordinary memory.
    pub const fn new(reset: S::Ux) -> Self {
        Self {
            cell: VolatileCell::new(reset),
            _spec: PhantomData,
        }
    }

    /// Read the whole word.
    #[inline(always)]
    pub fn read(&self) -> S::Ux {
        self.cell.get()
    }

    /// Check whether `word` may be written to this register.
    #[inline]
    pub fn check(&self, word: S::Ux) -> Result<(), Error> {
        S::validate(word)
    }

    /// Overwrite the whole word.
    ///
    /// Nothing is written if `value` sets a reserved bit or holds a prohibited
    /// field encoding.
    pub fn write(&self, value: S::Ux) -> Result<(), Error> {
        S::validate(value)?;
        self.cell.set(value);
        Ok(())
    }

    /// Read one field.
    #[inline]
    pub fn read_field(&self, field: Field<S::Ux>) -> S::Ux {
        field.read(self.read())
    }

    /// Whether any bit of `field` is set.
    #[inline]
    pub fn is_set(&self, field: Field<S::Ux>) -> bool {
        field.is_set(self.read())
    }

    /// Read-modify-write of one field.
    ///
    /// A descriptor covering a reserved bit is refused with
    /// [`Error::OutOfRange`]. The value is checked before the register is
    /// touched.
    pub fn write_field(&self, field: Field<S::Ux>, value: S::Ux) -> Result<(), Error> {
        if field.mask() & Into::<u32>::into(S::RESERVED) != 0 {
            return Err(Error::OutOfRange);
        }
        self.modify(|word| field.write(word, value))
    }

    /// Read-modify-write of the whole word.
    ///
    /// Nothing is written back if `f` fails or its result does not pass
    /// [`Reg::check`].
    pub fn modify<F>(&self, f: F) -> Result<(), Error>
    where
        F: FnOnce(S::Ux) -> Result<S::Ux, Error>,
    {
        let word = f(self.read())?;
        self.write(word)
    }

    /// Raw pointer to the register word.
    ///
    /// Writes through it bypass every check.
    pub fn as_ptr(&self) -> *mut S::Ux {
        self.cell.as_ptr()
    }
}

/// Register written by the hardware only
#[repr(transparent)]
pub struct ReadOnly<W: RegisterWord> {
    cell: VolatileCell<W>,
}

impl<W: RegisterWord> ReadOnly<W> {
    /// Create a register holding `reset`.
    pub const fn new(reset: W) -> Self {
        Self {
            cell: VolatileCell::new(reset),
        }
    }

    /// Read the whole word.
    #[inline(always)]
    pub fn read(&self) -> W {
        self.cell.get()
    }

    /// Read one field.
    #[inline]
    pub fn read_field(&self, field: Field<W>) -> W {
        field.read(self.read())
    }

    /// Whether any bit of `field` is set.
    #[inline]
    pub fn is_set(&self, field: Field<W>) -> bool {
        field.is_set(self.read())
    }

    /// Raw pointer to the register word.
    ///
    /// This is the address DMA transfers read from. Writing through it is only
    /// meaningful for register blocks that live in ordinary memory.
    pub fn as_ptr(&self) -> *mut W {
        self.cell.as_ptr()
    }
}
