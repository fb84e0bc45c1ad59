//! Bus primitives to `embedded_hal::i2c::I2c`.
//!
//! Hosts without an I2C peripheral usually drive the bus with a handful of
//! routines: start, stop, put a byte, get a byte. [`BusPrimitives`] describes
//! that set and [`PrimitiveBus`] frames full transactions on top of it, so
//! the driver can run on either a HAL peripheral or a bit-banged port.

use embedded_hal::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

/// Acknowledge bit, sent by the receiver after every byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Receiver took the byte, more may follow.
    Ack,
    /// Receiver is done or not listening.
    Nack,
}

/// Raw two-wire bus routines supplied by the host.
pub trait BusPrimitives {
    /// One-time pin/peripheral setup.
    fn init(&mut self);

    /// Start condition, also used for repeated starts.
    fn start(&mut self);

    /// Stop condition.
    fn stop(&mut self);

    /// Shift a byte out and return what the receiver answered.
    fn write_byte(&mut self, byte: u8) -> Ack;

    /// Shift a byte in and answer with `ack`. [`Ack::Ack`] asks the device
    /// for another byte, [`Ack::Nack`] ends the read.
    fn read_byte(&mut self, ack: Ack) -> u8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    NoAcknowledge(NoAcknowledgeSource),
}

impl i2c::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        match *self {
            BusFault::NoAcknowledge(source) => ErrorKind::NoAcknowledge(source),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Write = 0,
    Read = 1,
}


/// An [`i2c::I2c`] implementation on top of [`BusPrimitives`].
pub struct PrimitiveBus<P> {
    primitives: P,
}

impl<P: BusPrimitives> PrimitiveBus<P> {
    /// Takes ownership of the primitives and runs their one-time init.
    pub fn new(mut primitives: P) -> Self {
        primitives.init();
        debug!("bit-banged bus initialized");
        PrimitiveBus { primitives }
    }

    pub fn release(self) -> P {
        self.primitives
    }

    fn begin(&mut self, address: u8, direction: Direction) -> Result<(), BusFault> {
        self.primitives.start();
        self.send((address << 1) | direction as u8, NoAcknowledgeSource::Address)
    }

    fn send(&mut self, byte: u8, source: NoAcknowledgeSource) -> Result<(), BusFault> {
        match self.primitives.write_byte(byte) {
            Ack::Ack => Ok(()),
            Ack::Nack => {
                warn!("no acknowledge for byte {:#x}", byte);
                // Let go of the bus before reporting.
                self.primitives.stop();
                Err(BusFault::NoAcknowledge(source))
            }
        }
    }
}

impl<P: BusPrimitives> ErrorType for PrimitiveBus<P> {
    type Error = BusFault;
}

impl<P: BusPrimitives> i2c::I2c for PrimitiveBus<P> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut direction = None;

        for i in 0..operations.len() {
            let read_follows = matches!(operations.get(i + 1), Some(Operation::Read(_)));

            match &mut operations[i] {
                Operation::Write(bytes) => {
                    if direction != Some(Direction::Write) {
                        self.begin(address, Direction::Write)?;
                    }
                    for &byte in bytes.iter() {
                        self.send(byte, NoAcknowledgeSource::Data)?;
                    }
                    direction = Some(Direction::Write);
                }
                Operation::Read(buffer) => {
                    if direction != Some(Direction::Read) {
                        self.begin(address, Direction::Read)?;
                    }
                    // Only the very last byte of a read run gets a NACK.
                    let len = buffer.len();
                    for (n, slot) in buffer.iter_mut().enumerate() {
                        let ack = if n + 1 < len || read_follows {
                            Ack::Ack
                        } else {
                            Ack::Nack
                        };
                        *slot = self.primitives.read_byte(ack);
                    }
                    direction = Some(Direction::Read);
                }
            }
        }

        if direction.is_some() {
            self.primitives.stop();
        }
        Ok(())
    }
}
