//! Analog input channels
//!
//! Channels are numbered 0 to 7. A [`ChannelSet`] is the validated form of a
//! caller-supplied list of indices: building one either accepts every index or
//! rejects the whole list.
//!
//! The unit structs [`An000`] to [`An007`] name the inputs at type level so they
//! can be read through [`embedded_hal_0_2::adc::OneShot`].

use embedded_hal_0_2::adc::Channel;
use paste::paste;

use crate::{adc::Adc, Error};

/// Number of analog input channels
pub const CHANNEL_COUNT: u8 = 8;

/// Check a channel index and turn it into a register bit position.
pub(crate) fn check_channel(channel: u8) -> Result<usize, Error> {
    if channel < CHANNEL_COUNT {
        Ok(channel as usize)
    } else {
        Err(Error::OutOfRange)
    }
}

/// A set of channel indices, stored as the 8 bit mask the select registers use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSet(u8);

impl ChannelSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All eight channels.
    pub const fn all() -> Self {
        Self(0xff)
    }

    /// Build a set from a register mask, bit `n` standing for channel `n`.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Build a set from a list of indices.
    ///
    /// Fails with [`Error::OutOfRange`] if any index is above 7 and with
    /// [`Error::IllegalValue`] if an index appears twice.
    ///
    /// ```
    /// use s12ad_hal::channel::ChannelSet;
    /// use s12ad_hal::Error;
    ///
    /// assert_eq!(ChannelSet::from_indices(&[0, 3, 7]).unwrap().bits(), 0b1000_1001);
    /// assert_eq!(ChannelSet::from_indices(&[8]), Err(Error::OutOfRange));
    /// assert_eq!(ChannelSet::from_indices(&[1, 1]), Err(Error::IllegalValue));
    /// ```
    pub fn from_indices(indices: &[u8]) -> Result<Self, Error> {
        let mut set = Self::empty();
        for &channel in indices {
            let bit = check_channel(channel)?;
            if set.0 & (1 << bit) != 0 {
                return Err(Error::IllegalValue);
            }
            set.0 |= 1 << bit;
        }
        Ok(set)
    }

    /// The register mask.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `channel` is in the set. Indices above 7 never are.
    pub const fn contains(self, channel: u8) -> bool {
        channel < CHANNEL_COUNT && self.0 & (1 << channel) != 0
    }

    /// Number of channels in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Channels in either set.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Channels of `self` that are not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Iterate over the indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..CHANNEL_COUNT).filter(move |&channel| self.contains(channel))
    }
}

impl From<ChannelSet> for u16 {
    fn from(set: ChannelSet) -> u16 {
        set.0 as u16
    }
}

macro_rules! analog_inputs {
    ($($n:literal),+) => {
        paste! {
            $(
                #[doc = "Analog input AN00" $n]
                #[derive(Debug, Default)]
                #[cfg_attr(feature = "defmt", derive(defmt::Format))]
                pub struct [<An00 $n>];

                impl<D> Channel<Adc<'_, D>> for [<An00 $n>] {
                    type ID = u8; // channels are identified numerically

                    fn channel() -> u8 {
                        $n
                    }
                }
            )+
        }
    };
}

analog_inputs!(0, 1, 2, 3, 4, 5, 6, 7);
