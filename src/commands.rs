
//We have sepreate consts and enums for the puporse of being used during
//testing(consts) or as parameters(enum).

/// SMBus general call address, every device on the bus listens here.
pub const GENERAL_CALL_ADDR: u8 = 0x00;

/// Second byte of a general call: software reset.
pub const GENERAL_CALL_RESET: u8 = 0x06;

/// What the die-identification register reads on a TMP1075.
pub const DEVICE_ID: u16 = 0x7500;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeneralCall {
    Reset = GENERAL_CALL_RESET,
}
