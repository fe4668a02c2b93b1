//! The processor status register.
//!
//! Four flags in the low nibble of a single byte: carry, zero, overflow,
//! negative. Instructions own their flag effects; this module only
//! provides the bit set and its rendering.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Status flags, one bit each. `C` is bit 0, `Z` bit 1, `V` bit 2,
    /// `N` bit 3; the high nibble is always zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// Carry out of bit 15 of the last arithmetic result.
        const CARRY = 0b0001;
        /// The last governing result was zero.
        const ZERO = 0b0010;
        /// Signed overflow in the last arithmetic result.
        const OVERFLOW = 0b0100;
        /// Bit 15 of the last governing result was one.
        const NEGATIVE = 0b1000;
    }
}

impl Flags {
    /// Short letter name of a single flag bit.
    pub fn letter(flag: Flags) -> &'static str {
        if flag == Flags::CARRY {
            "C"
        } else if flag == Flags::ZERO {
            "Z"
        } else if flag == Flags::OVERFLOW {
            "V"
        } else if flag == Flags::NEGATIVE {
            "N"
        } else {
            "?"
        }
    }
}

impl Default for Flags {
    fn default() -> Flags {
        Flags::empty()
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C={} Z={} V={} N={}",
            u8::from(self.contains(Flags::CARRY)),
            u8::from(self.contains(Flags::ZERO)),
            u8::from(self.contains(Flags::OVERFLOW)),
            u8::from(self.contains(Flags::NEGATIVE)),
        )
    }
}
