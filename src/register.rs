//! Register Mapping
//!
//! The pointer byte written after the device address selects one of these.
//! Every register is 16 bits wide and travels MSB first.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Temperature result, 12-bit code left aligned.
    Temperature = 0x00,
    /// Configuration, see [`crate::Config`].
    Configuration = 0x01,
    /// Low alarm threshold.
    LowLimit = 0x02,
    /// High alarm threshold.
    HighLimit = 0x03,
    /// Die identification, read only.
    DieId = 0x0F,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }
}


/// Selects one of the two alarm threshold registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Limit {
    Low,
    High,
}

impl From<Limit> for Register {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Low => Register::LowLimit,
            Limit::High => Register::HighLimit,
        }
    }
}


// Raw register values handy for thresholds and tests.
pub const TEMP_25C: u16 = 0x1900;
pub const TEMP_30C: u16 = 0x1E00;
pub const TEMP_31C: u16 = 0x1F00;

/// Power-on value of the low limit register (75 C).
pub const LLIM_DEFAULT: u16 = 0x4B00;
/// Power-on value of the high limit register (80 C).
pub const HLIM_DEFAULT: u16 = 0x5000;


/// Split a register value into the bytes sent on the wire.
pub(crate) fn to_wire(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Join the two bytes received from the wire, first one is the MSB.
pub(crate) fn from_wire(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}
