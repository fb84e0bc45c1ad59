//Bits and their meanings, check the TMP1075 datasheet (SBOS854)
/*
 * bit[15]: OS, one-shot conversion trigger
 * bit[14:13]: R, conversion rate
 * bit[12:11]: F, consecutive faults before the alert fires
 * bit[10]: POL, alert polarity
 * bit[9]: TM, 0: comparator mode, 1: interrupt mode
 * bit[8]: SD, shutdown
 * bit[7:0]: Reserved, reads 0xFF
*/

pub const CFGR_OS: u16 = 1 << 15;
pub const CFGR_R: u16 = 0b11 << 13;
pub const CFGR_F: u16 = 0b11 << 11;
pub const CFGR_POL: u16 = 1 << 10;
pub const CFGR_TM: u16 = 1 << 9;
pub const CFGR_SD: u16 = 1 << 8;
pub const CFGR_RESERVED: u16 = 0x00FF;

/// Configuration register after power-on or a general call reset.
pub const CFGR_DEFAULT: u16 = 0x00FF;

const R_SHIFT: u16 = 13;
const F_SHIFT: u16 = 11;

#[repr(u16)]
#[allow(dead_code)]
pub enum BitMasks {
    OneShot = CFGR_OS,
    ConversionRate = CFGR_R,
    FaultQueue = CFGR_F,
    Polarity = CFGR_POL,
    ThermostatMode = CFGR_TM,
    Shutdown = CFGR_SD,
}


/// Time between conversions in continuous mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionRate {
    Ms27_5 = 0b00,
    Ms55 = 0b01,
    Ms110 = 0b10,
    Ms220 = 0b11,
}

/// Consecutive out-of-limit conversions needed to assert ALERT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultQueue {
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Six = 0b11,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermostatMode {
    Comparator,
    Interrupt,
}


/// Configuration register contents.
///
/// Setters only touch their own field, so the reserved bits of a value
/// obtained from the device are written back unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub bits: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config { bits: CFGR_DEFAULT }
    }
}

impl From<u16> for Config {
    fn from(bits: u16) -> Self {
        Config { bits }
    }
}

impl From<Config> for u16 {
    fn from(config: Config) -> Self {
        config.bits
    }
}

impl Config {
    pub fn new(bits: u16) -> Config {
        Config { bits }
    }

    fn set_mask(&mut self, mask: u16, on: bool) {
        if on {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
    }

    pub fn is_one_shot(&self) -> bool {
        self.bits & BitMasks::OneShot as u16 > 0
    }

    pub fn set_one_shot(&mut self, on: bool) -> &mut Self {
        self.set_mask(CFGR_OS, on);
        self
    }

    pub fn conversion_rate(&self) -> ConversionRate {
        match (self.bits & BitMasks::ConversionRate as u16) >> R_SHIFT {
            0b00 => ConversionRate::Ms27_5,
            0b01 => ConversionRate::Ms55,
            0b10 => ConversionRate::Ms110,
            _ => ConversionRate::Ms220,
        }
    }

    pub fn set_conversion_rate(&mut self, rate: ConversionRate) -> &mut Self {
        self.bits = (self.bits & !CFGR_R) | ((rate as u16) << R_SHIFT);
        self
    }

    pub fn fault_queue(&self) -> FaultQueue {
        match (self.bits & BitMasks::FaultQueue as u16) >> F_SHIFT {
            0b00 => FaultQueue::One,
            0b01 => FaultQueue::Two,
            0b10 => FaultQueue::Four,
            _ => FaultQueue::Six,
        }
    }

    pub fn set_fault_queue(&mut self, faults: FaultQueue) -> &mut Self {
        self.bits = (self.bits & !CFGR_F) | ((faults as u16) << F_SHIFT);
        self
    }

    pub fn polarity(&self) -> Polarity {
        if self.bits & BitMasks::Polarity as u16 > 0 {
            return Polarity::ActiveHigh;
        }
        Polarity::ActiveLow
    }

    pub fn set_polarity(&mut self, polarity: Polarity) -> &mut Self {
        self.set_mask(CFGR_POL, polarity == Polarity::ActiveHigh);
        self
    }

    pub fn thermostat_mode(&self) -> ThermostatMode {
        if self.bits & BitMasks::ThermostatMode as u16 > 0 {
            return ThermostatMode::Interrupt;
        }
        ThermostatMode::Comparator
    }

    pub fn set_thermostat_mode(&mut self, mode: ThermostatMode) -> &mut Self {
        self.set_mask(CFGR_TM, mode == ThermostatMode::Interrupt);
        self
    }

    pub fn is_shutdown(&self) -> bool {
        self.bits & BitMasks::Shutdown as u16 > 0
    }

    pub fn set_shutdown(&mut self, on: bool) -> &mut Self {
        self.set_mask(CFGR_SD, on);
        self
    }

    pub fn reserved(&self) -> u16 {
        self.bits & CFGR_RESERVED
    }
}
