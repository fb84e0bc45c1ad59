/*
 * Filename: data.rs
 * Description: fixed point temperature values and their register encoding.
 */

use core::fmt;

/// 0.0625 C per bit, scaled by 10_000.
pub const DEGREES_PER_BIT: i32 = 625;
/// Rescale from the 10_000 scale down to hundredths.
pub const FIXED_POINT: i32 = 100;

const CODE_MIN: i32 = -2048;
const CODE_MAX: i32 = 2047;
const CENTI_MIN: i32 = CODE_MIN * DEGREES_PER_BIT / FIXED_POINT;
const CENTI_MAX: i32 = CODE_MAX * DEGREES_PER_BIT / FIXED_POINT;


/// Temperature in hundredths of a degree Celsius.
///
/// Decoding truncates toward zero, so the fractional part is a magnitude
/// and the sign lives with the whole value. -0.0625 C reads as `-0.06`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    centi: i32,
}

impl Temperature {
    /// Decode a temperature or limit register.
    ///
    /// The low nibble is status/don't-care and gets shifted out, the
    /// remaining 12-bit two's complement code is scaled in integer math.
    pub const fn from_raw(raw: u16) -> Self {
        let code = ((raw as i16) >> 4) as i32;
        Temperature {
            centi: code * DEGREES_PER_BIT / FIXED_POINT,
        }
    }

    /// Encode into the limit register layout, low nibble zero.
    ///
    /// Rounds to the nearest 12-bit code and saturates outside
    /// -128.00 ..= 127.93 C.
    pub fn to_raw(self) -> u16 {
        let centi = self.centi.clamp(CENTI_MIN, CENTI_MAX);

        // |centi| / 6.25 rounded half away from zero.
        let magnitude = (centi.abs() * 4 + 12) / 25;
        let code = if centi < 0 { -magnitude } else { magnitude };
        let code = code.clamp(CODE_MIN, CODE_MAX);

        ((code as i16) << 4) as u16
    }

    pub const fn from_degrees(degrees: i16) -> Self {
        Temperature {
            centi: degrees as i32 * FIXED_POINT,
        }
    }

    pub const fn from_centidegrees(centi: i32) -> Self {
        Temperature { centi }
    }

    pub const fn centidegrees(&self) -> i32 {
        self.centi
    }

    /// Whole degrees, truncated toward zero.
    pub const fn integer(&self) -> i32 {
        self.centi / FIXED_POINT
    }

    /// Hundredths of a degree, always 0..=99.
    pub const fn fraction(&self) -> u8 {
        (self.centi % FIXED_POINT).unsigned_abs() as u8
    }

    pub const fn is_negative(&self) -> bool {
        self.centi < 0
    }
}

impl From<u16> for Temperature {
    fn from(raw: u16) -> Self {
        Temperature::from_raw(raw)
    }
}

impl From<Temperature> for u16 {
    fn from(t: Temperature) -> Self {
        t.to_raw()
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.integer().unsigned_abs(),
            self.fraction()
        )
    }
}


/// Low and high alarm thresholds. The driver does not check that low < high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Limits {
    pub low: Temperature,
    pub high: Temperature,
}
