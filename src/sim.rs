//! A TMP1075 on the far end of a bit-banged bus, for tests.
//!
//! Decodes the address and pointer bytes the way the part does, answers
//! reads MSB first, and latches a register write on the stop condition.
//! Writable registers echo back whatever was last written.

use crate::bitbang::{Ack, BusPrimitives};
use crate::commands::{DEVICE_ID, GENERAL_CALL_ADDR, GENERAL_CALL_RESET};
use crate::config::CFGR_DEFAULT;
use crate::register::{Register, HLIM_DEFAULT, LLIM_DEFAULT};

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Address,
    Pointer,
    Data,
    Read,
    GeneralCall,
    NotUs,
}

pub(crate) struct SimTmp1075 {
    pub address: u8,
    pub regs: [u16; 16],
    pub inits: usize,
    /// Every ack/nack the master sent while reading.
    pub read_acks: std::vec::Vec<Ack>,
    state: State,
    pointer: usize,
    pending: std::vec::Vec<u8>,
    read_index: usize,
}

impl SimTmp1075 {
    pub fn new(address: u8, temperature: u16) -> Self {
        let mut sim = SimTmp1075 {
            address,
            regs: [0; 16],
            inits: 0,
            read_acks: std::vec::Vec::new(),
            state: State::Idle,
            pointer: 0,
            pending: std::vec::Vec::new(),
            read_index: 0,
        };
        sim.power_on();
        sim.regs[Register::Temperature.addr() as usize] = temperature;
        sim
    }

    fn power_on(&mut self) {
        self.regs[Register::Configuration.addr() as usize] = CFGR_DEFAULT;
        self.regs[Register::LowLimit.addr() as usize] = LLIM_DEFAULT;
        self.regs[Register::HighLimit.addr() as usize] = HLIM_DEFAULT;
        self.regs[Register::DieId.addr() as usize] = DEVICE_ID;
    }

    fn latch(&mut self) {
        let writable = [
            Register::Configuration.addr() as usize,
            Register::LowLimit.addr() as usize,
            Register::HighLimit.addr() as usize,
        ];
        if self.pending.len() == 2 && writable.contains(&self.pointer) {
            self.regs[self.pointer] = u16::from_be_bytes([self.pending[0], self.pending[1]]);
        }
        self.pending.clear();
    }
}

impl BusPrimitives for SimTmp1075 {
    fn init(&mut self) {
        self.inits += 1;
    }

    fn start(&mut self) {
        self.state = State::Address;
    }

    fn stop(&mut self) {
        if self.state == State::Data {
            self.latch();
        }
        self.state = State::Idle;
    }

    fn write_byte(&mut self, byte: u8) -> Ack {
        match self.state {
            State::Address => {
                let (addr, read) = (byte >> 1, byte & 1 == 1);
                if addr == self.address {
                    self.state = if read { State::Read } else { State::Pointer };
                    self.read_index = 0;
                    Ack::Ack
                } else if addr == GENERAL_CALL_ADDR && !read {
                    self.state = State::GeneralCall;
                    Ack::Ack
                } else {
                    self.state = State::NotUs;
                    Ack::Nack
                }
            }
            State::Pointer => {
                self.pointer = (byte & 0x0F) as usize;
                self.state = State::Data;
                Ack::Ack
            }
            State::Data if self.pending.len() < 2 => {
                self.pending.push(byte);
                Ack::Ack
            }
            State::Data => {
                // Too long, drop the whole write.
                self.pending.clear();
                self.state = State::NotUs;
                Ack::Nack
            }
            State::GeneralCall => {
                if byte == GENERAL_CALL_RESET {
                    self.power_on();
                }
                Ack::Ack
            }
            _ => Ack::Nack,
        }
    }

    fn read_byte(&mut self, ack: Ack) -> u8 {
        self.read_acks.push(ack);
        if self.state != State::Read {
            return 0xFF;
        }
        let [msb, lsb] = self.regs[self.pointer].to_be_bytes();
        let byte = if self.read_index == 0 { msb } else { lsb };
        self.read_index += 1;
        byte
    }
}
