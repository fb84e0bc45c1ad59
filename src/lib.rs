//! Driver for the TI TMP1075 two-wire temperature sensor, built on the
//! [`embedded-hal`] 1.0 I2C traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//!
//! The sensor is created with [`Tmp1075::new`] and has to pass
//! [`Tmp1075::init`], which checks the die identification register, before
//! any register can be touched through the returned [`InitializedTmp1075`].
//! Temperatures are decoded into [`Temperature`] with integer math only.
//!
//! Hosts that drive the bus through start/stop/byte routines instead of an
//! I2C peripheral can wrap them in [`bitbang::PrimitiveBus`].
//!
//! ## Features
//!
//! - `defmt`: log through `defmt` and derive `defmt::Format` on public types.
//! - `log`: log through the `log` facade.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

use embedded_hal::i2c;

//Import the sensor's general call bytes and identity
mod commands;
pub use crate::commands::{GeneralCall, DEVICE_ID, GENERAL_CALL_ADDR, GENERAL_CALL_RESET};

mod register;
pub use crate::register::{Limit, Register, HLIM_DEFAULT, LLIM_DEFAULT, TEMP_25C, TEMP_30C, TEMP_31C};

//Configuration register fields
mod config;
pub use crate::config::{
    Config,
    ConversionRate,
    FaultQueue,
    Polarity,
    ThermostatMode,
    CFGR_DEFAULT,
    CFGR_F,
    CFGR_OS,
    CFGR_POL,
    CFGR_R,
    CFGR_RESERVED,
    CFGR_SD,
    CFGR_TM,
};

mod data;
pub use crate::data::{Limits, Temperature};

pub mod bitbang;

#[cfg(test)]
mod sim;


/// TMP1075 address with A0..A2 tied to GND. The pins select 0x48..=0x4F.
pub const SENSOR_ADDR: u8 = 0b0100_1000; // = 0x48


//Impliment Error type for our driver.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus reported a failure, typically a missing acknowledge.
    Bus(E),
    /// Die identification did not read [`DEVICE_ID`]. Holds what it read.
    IdentityMismatch(u16),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::IdentityMismatch(id) => write!(
                f,
                "die id {:#06x} does not match {:#06x}",
                id, DEVICE_ID
            ),
        }
    }
}


/// Knobs for [`Tmp1075::init`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Broadcast a general call reset before the identity check. Every
    /// device on the bus that understands general calls will reset.
    pub general_call_reset: bool,
}


/// Every readable register in one go, as the raw bus values.
///
/// Each field comes from its own transaction, so the snapshot is not atomic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDump {
    pub temperature: u16,
    pub configuration: u16,
    pub low_limit: u16,
    pub high_limit: u16,
}

impl RegisterDump {
    pub fn temperature(&self) -> Temperature {
        Temperature::from_raw(self.temperature)
    }

    pub fn config(&self) -> Config {
        Config::new(self.configuration)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            low: Temperature::from_raw(self.low_limit),
            high: Temperature::from_raw(self.high_limit),
        }
    }
}


pub struct Tmp1075<I2C>
where I2C: i2c::I2c
{
    i2c: I2C,
    address: u8,
}

//Impliment functions for the sensor that require the embedded-hal
//I2C.
impl<E, I2C> Tmp1075<I2C>
where I2C: i2c::I2c<Error = E>
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Tmp1075 { i2c, address }
    }

    /// Check the part is there and is a TMP1075.
    ///
    /// Nothing past the die id read happens on failure, and no handle for
    /// register access is handed out.
    pub fn init(
        &mut self,
        options: InitOptions,
        ) -> Result<InitializedTmp1075<'_, I2C>, Error<E>>
    {
        self.init_with_sampling(options, || {})
    }

    /// Like [`init`](Self::init), calling `setup_sampling` once between the
    /// optional reset and the identity check. That's where the host arms
    /// whatever timer or interrupt will poll the sensor later.
    pub fn init_with_sampling<F>(
        &mut self,
        options: InitOptions,
        setup_sampling: F,
        ) -> Result<InitializedTmp1075<'_, I2C>, Error<E>>
        where F: FnOnce(),
    {
        if options.general_call_reset {
            self.reset()?;
        }

        setup_sampling();

        let id = self.read16(Register::DieId)?;
        if id != DEVICE_ID {
            warn!("die id {:#x} at address {:#x}, not a tmp1075", id, self.address);
            return Err(Error::IdentityMismatch(id));
        }

        debug!("tmp1075 at {:#x} ready", self.address);
        Ok(InitializedTmp1075 { sensor: self })
    }

    /// General call reset. Goes to address 0, so it resets every device on
    /// the bus that honours general calls, not only this one.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        debug!("general call reset");
        self.i2c
            .write(GENERAL_CALL_ADDR, &[GeneralCall::Reset as u8])
            .map_err(Error::Bus)
    }

    /// Hand the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read16(&mut self, reg: Register) -> Result<u16, Error<E>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg.addr()], &mut buf)
            .map_err(Error::Bus)?;

        let value = register::from_wire(buf);
        trace!("read reg {:#x} = {:#x}", reg.addr(), value);
        Ok(value)
    }

    fn write16(&mut self, reg: Register, value: u16) -> Result<(), Error<E>> {
        let [msb, lsb] = register::to_wire(value);
        trace!("write reg {:#x} = {:#x}", reg.addr(), value);
        self.i2c
            .write(self.address, &[reg.addr(), msb, lsb])
            .map_err(Error::Bus)
    }
}


//This stucture encapsulates the Sensor structure after the sensor
//has been initialized; enforcing correct method availbility.
pub struct InitializedTmp1075<'a, I2C>
where I2C: i2c::I2c
{
    sensor: &'a mut Tmp1075<I2C>,
}

impl <'a, E, I2C> InitializedTmp1075<'a, I2C>
where I2C: i2c::I2c<Error = E>
{
    /// One 16-bit register read. Nothing is cached, every call hits the bus.
    pub fn read_register(&mut self, reg: Register) -> Result<u16, Error<E>> {
        self.sensor.read16(reg)
    }

    /// One 16-bit register write, MSB first on the wire.
    pub fn write_register(&mut self, reg: Register, value: u16) -> Result<(), Error<E>> {
        self.sensor.write16(reg, value)
    }

    pub fn read_temperature(&mut self) -> Result<Temperature, Error<E>> {
        let raw = self.sensor.read16(Register::Temperature)?;
        Ok(Temperature::from_raw(raw))
    }

    pub fn read_configuration(&mut self) -> Result<Config, Error<E>> {
        let bits = self.sensor.read16(Register::Configuration)?;
        Ok(Config::new(bits))
    }

    /// Writes all 16 bits as given. To keep the reserved bits, start from
    /// [`read_configuration`](Self::read_configuration).
    pub fn write_configuration(&mut self, config: Config) -> Result<(), Error<E>> {
        self.sensor.write16(Register::Configuration, config.bits)
    }

    /// Read, let `f` change it, write it back. Two separate transactions.
    pub fn modify_configuration<F>(&mut self, f: F) -> Result<Config, Error<E>>
        where F: FnOnce(&mut Config),
    {
        let mut config = self.read_configuration()?;
        f(&mut config);
        self.write_configuration(config)?;
        Ok(config)
    }

    pub fn read_limit(&mut self, which: Limit) -> Result<Temperature, Error<E>> {
        let raw = self.sensor.read16(which.into())?;
        Ok(Temperature::from_raw(raw))
    }

    /// The value lands on the nearest 0.0625 C step the register can hold.
    pub fn write_limit(&mut self, which: Limit, value: Temperature) -> Result<(), Error<E>> {
        self.sensor.write16(which.into(), value.to_raw())
    }

    pub fn read_limits(&mut self) -> Result<Limits, Error<E>> {
        let low = self.read_limit(Limit::Low)?;
        let high = self.read_limit(Limit::High)?;
        Ok(Limits { low, high })
    }

    /// Low first, then high. Ordering between the two is up to the caller.
    pub fn write_limits(&mut self, limits: Limits) -> Result<(), Error<E>> {
        self.write_limit(Limit::Low, limits.low)?;
        self.write_limit(Limit::High, limits.high)
    }

    pub fn read_device_id(&mut self) -> Result<u16, Error<E>> {
        self.sensor.read16(Register::DieId)
    }

    /// See [`Tmp1075::reset`]. Registers go back to power-on values.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        self.sensor.reset()
    }

    pub fn dump_registers(&mut self) -> Result<RegisterDump, Error<E>> {
        Ok(RegisterDump {
            temperature: self.sensor.read16(Register::Temperature)?,
            configuration: self.sensor.read16(Register::Configuration)?,
            low_limit: self.sensor.read16(Register::LowLimit)?,
            high_limit: self.sensor.read16(Register::HighLimit)?,
        })
    }
}


#[cfg(test)]
mod sensor_test {
    use std::cell::Cell;

    use embedded_hal_mock::eh1::i2c::{
        Mock as I2cMock,
        Transaction as I2cTransaction,
    };
    use embedded_hal::i2c::ErrorKind;

    use super::*;

    fn die_id_read(id: u16) -> I2cTransaction {
        I2cTransaction::write_read(
            SENSOR_ADDR,
            vec![Register::DieId.addr()],
            id.to_be_bytes().to_vec(),
        )
    }

    #[test]
    fn correct_init()
    {
        let expectations = [die_id_read(DEVICE_ID)];

        let i2c = I2cMock::new(&expectations);
        let mut sensor_instance = Tmp1075::new(i2c, SENSOR_ADDR);

        let initialized = sensor_instance.init(InitOptions::default());
        assert!(initialized.is_ok());

        initialized.unwrap().sensor.i2c.done();
    }

    #[test]
    fn init_with_reset()
    {
        let expectations = [
            I2cTransaction::write(GENERAL_CALL_ADDR, vec![GENERAL_CALL_RESET]),
            die_id_read(DEVICE_ID),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor_instance = Tmp1075::new(i2c, SENSOR_ADDR);

        let options = InitOptions { general_call_reset: true };
        assert!(sensor_instance.init(options).is_ok());

        sensor_instance.i2c.done();
    }

    #[test]
    fn wrong_device_id()
    {
        //Only the id read is expected, done() fails on anything after it.
        let expectations = [die_id_read(0x7501)];

        let i2c = I2cMock::new(&expectations);
        let mut sensor_instance = Tmp1075::new(i2c, SENSOR_ADDR);

        let results = sensor_instance.init(InitOptions::default());
        assert_eq!(results.err(), Some(Error::IdentityMismatch(0x7501)));

        sensor_instance.i2c.done();
    }

    #[test]
    fn init_bus_error()
    {
        let expectations = [
            die_id_read(DEVICE_ID).with_error(ErrorKind::Other),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor_instance = Tmp1075::new(i2c, SENSOR_ADDR);

        let results = sensor_instance.init(InitOptions::default());
        assert_eq!(
            results.err(),
            Some(Error::Bus(ErrorKind::Other))
        );

        sensor_instance.i2c.done();
    }

    #[test]
    fn reset_failure_stops_init()
    {
        let expectations = [
            I2cTransaction::write(GENERAL_CALL_ADDR, vec![GENERAL_CALL_RESET])
                .with_error(ErrorKind::Other),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor_instance = Tmp1075::new(i2c, SENSOR_ADDR);

        let called = Cell::new(false);
        let options = InitOptions { general_call_reset: true };
        let results = sensor_instance.init_with_sampling(options, || called.set(true));

        assert!(results.is_err());
        assert!(!called.get());
        sensor_instance.i2c.done();
    }

    #[test]
    fn sampling_setup_runs_once()
    {
        let expectations = [die_id_read(DEVICE_ID)];

        let i2c = I2cMock::new(&expectations);
        let mut sensor_instance = Tmp1075::new(i2c, SENSOR_ADDR);

        let calls = Cell::new(0);
        let results = sensor_instance
            .init_with_sampling(InitOptions::default(), || calls.set(calls.get() + 1));

        assert!(results.is_ok());
        assert_eq!(calls.get(), 1);
        sensor_instance.i2c.done();
    }

    #[test]
    fn other_address()
    {
        let expectations = [
            I2cTransaction::write_read(0x4B, vec![0x0F], vec![0x75, 0x00]),
        ];

        let i2c = I2cMock::new(&expectations);
        let mut sensor_instance = Tmp1075::new(i2c, 0x4B);

        assert!(sensor_instance.init(InitOptions::default()).is_ok());
        sensor_instance.i2c.done();
    }

    #[test]
    fn error_display()
    {
        let e: Error<()> = Error::IdentityMismatch(0x1234);
        assert_eq!(e.to_string(), "die id 0x1234 does not match 0x7500");

        let e: Error<ErrorKind> = Error::Bus(ErrorKind::Other);
        assert!(e.to_string().starts_with("bus error"));
    }
}
