/// Byte width of an instruction operand.
///
/// Only 1, 2 and 4 byte operands exist; a 3 byte slot cannot be expressed.
/// All arithmetic helpers work on `u64` so that an unmasked 32-bit sum
/// (up to `2 * MAX + 1`) never wraps before flags are derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    Byte = 1,
    Word = 2,
    Dword = 4,
}

/// Width of a raw memory address (the `moffs` forms read one of these).
pub const ADDRESS_SIZE: Width = Width::Dword;

impl Width {
    pub const ALL: [Width; 3] = [Width::Byte, Width::Word, Width::Dword];

    #[inline]
    pub const fn from_bytes(bytes: usize) -> Option<Width> {
        match bytes {
            1 => Some(Width::Byte),
            2 => Some(Width::Word),
            4 => Some(Width::Dword),
            _ => None,
        }
    }

    #[inline]
    pub const fn bytes(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.bytes() * 8
    }

    /// `MAX(w) = 2^(8w) - 1`.
    #[inline]
    pub const fn max_value(self) -> u64 {
        (1u64 << self.bits()) - 1
    }

    /// `MAX(w) + 1`, the modulus of two's-complement arithmetic at this width.
    #[inline]
    pub const fn modulus(self) -> u64 {
        1u64 << self.bits()
    }

    #[inline]
    pub const fn mask(self, value: u64) -> u64 {
        value & self.max_value()
    }

    /// Bit `8w - 1` of `value`. Bits above the width are ignored.
    #[inline]
    pub const fn sign_bit(self, value: u64) -> bool {
        (value >> (self.bits() - 1)) & 1 != 0
    }

    /// Sign-extend a `from`-wide value to this width.
    ///
    /// The result is masked to this width, so extending a byte `0xFF` to a
    /// dword yields `0xFFFF_FFFF`, not a 64-bit all-ones value.
    #[inline]
    pub const fn sign_extend(self, value: u64, from: Width) -> u64 {
        let value = from.mask(value);
        if from.sign_bit(value) {
            self.mask(value | !from.max_value())
        } else {
            self.mask(value)
        }
    }

    /// Signed interpretation of a `self`-wide value, used for displacements.
    #[inline]
    pub const fn to_signed(self, value: u64) -> i64 {
        let value = self.mask(value);
        if self.sign_bit(value) {
            value as i64 - self.modulus() as i64
        } else {
            value as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_per_width() {
        assert_eq!(Width::Byte.max_value(), 0xFF);
        assert_eq!(Width::Word.max_value(), 0xFFFF);
        assert_eq!(Width::Dword.max_value(), 0xFFFF_FFFF);
        assert_eq!(Width::Dword.modulus(), 0x1_0000_0000);
        assert_eq!(Width::from_bytes(3), None);
        assert_eq!(Width::from_bytes(2), Some(Width::Word));
    }

    #[test]
    fn sign_bit_uses_top_bit_of_width() {
        assert!(Width::Byte.sign_bit(0x80));
        assert!(!Width::Byte.sign_bit(0x100));
        assert!(Width::Word.sign_bit(0x1_8000));
        assert!(!Width::Dword.sign_bit(0x7FFF_FFFF));
    }

    #[test]
    fn sign_extend_narrow_immediates() {
        assert_eq!(Width::Dword.sign_extend(0xFF, Width::Byte), 0xFFFF_FFFF);
        assert_eq!(Width::Word.sign_extend(0x80, Width::Byte), 0xFF80);
        assert_eq!(Width::Dword.sign_extend(0x7F, Width::Byte), 0x7F);
        assert_eq!(Width::Byte.sign_extend(0x1FF, Width::Byte), 0xFF);
    }

    #[test]
    fn signed_displacements() {
        assert_eq!(Width::Byte.to_signed(0xFE), -2);
        assert_eq!(Width::Byte.to_signed(0x05), 5);
        assert_eq!(Width::Word.to_signed(0x8000), -0x8000);
        assert_eq!(Width::Dword.to_signed(0xFFFF_FFFF), -1);
    }
}
