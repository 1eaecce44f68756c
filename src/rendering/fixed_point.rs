/// Modular fixed-point helpers.
///
/// Every accumulator in the rasterizer lives in a fixed bit width and wraps on
/// overflow instead of saturating. Values are carried in `i64` holding the
/// unsigned representative `0..2^bits`; `sign_extend` recovers the two's
/// complement reading when a quantity is used as a signed step.

/// A bit width with wrap-around semantics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Wrap {
    bits: u32,
}

impl Wrap {
    #[inline]
    pub const fn new(bits: u32) -> Self {
        assert!(bits > 0 && bits < 63);
        Self { bits }
    }

    #[inline]
    pub const fn mask(self) -> i64 {
        (1i64 << self.bits) - 1
    }

    #[inline]
    pub const fn sign_bit(self) -> i64 {
        1i64 << (self.bits - 1)
    }

    /// Reduce modulo `2^bits` to the unsigned representative.
    #[inline]
    pub const fn wrap(self, value: i64) -> i64 {
        value & self.mask()
    }

    /// Reduce modulo `2^bits` and read the result as two's complement.
    #[inline]
    pub const fn sign_extend(self, value: i64) -> i64 {
        let v = value & self.mask();
        if v & self.sign_bit() != 0 {
            v - (1i64 << self.bits)
        } else {
            v
        }
    }

    #[inline]
    pub const fn is_negative(self, value: i64) -> bool {
        value & self.sign_bit() != 0
    }

    /// Wrapping add of a signed step to a wrapped accumulator.
    #[inline]
    pub const fn add(self, acc: i64, step: i64) -> i64 {
        self.wrap(acc + step)
    }
}

/// Round half away from zero (C `lround`), saturating at the `i64` range.
#[inline]
pub fn round_to_int(value: f32) -> i64 {
    value.round() as i64
}

/// Truncate toward zero, saturating at the `i64` range.
#[inline]
pub fn truncate_to_int(value: f32) -> i64 {
    value as i64
}
