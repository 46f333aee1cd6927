//! A simulated MCP23008 behind an `embedded_hal::i2c::I2c` implementation, for tests which
//! care about the resulting chip state rather than the exact bus traffic.
//!
//! Modelled: register pointer and SEQOP, direction, polarity, the output latch, and
//! interrupt-on-change with INTF/INTCAP latching.  Interrupt conditions are only evaluated when
//! the external pin levels change through [`SimChip::drive`], so a level-triggered pin does not
//! re-fire after its latch was cleared.
use crate::registers::{iocon, Register};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use std::cell::RefCell;
use std::rc::Rc;

struct State {
    regs: [u8; 11],
    pointer: u8,
    external: u8,
}

impl State {
    fn reg(&self, reg: Register) -> u8 {
        self.regs[reg.addr() as usize]
    }

    fn port(&self) -> u8 {
        let iodir = self.reg(Register::IODIR);
        let inputs = (self.external ^ self.reg(Register::IPOL)) & iodir;
        let outputs = self.reg(Register::OLAT) & !iodir;
        inputs | outputs
    }

    fn read(&mut self, addr: u8) -> u8 {
        match addr {
            a if a == Register::GPIO.addr() => {
                self.regs[Register::INTF.addr() as usize] = 0;
                self.port()
            }
            a if a == Register::INTCAP.addr() => {
                self.regs[Register::INTF.addr() as usize] = 0;
                self.reg(Register::INTCAP)
            }
            a => self.regs[a as usize],
        }
    }

    fn write(&mut self, addr: u8, value: u8) {
        match addr {
            a if a == Register::GPIO.addr() || a == Register::OLAT.addr() => {
                self.regs[Register::OLAT.addr() as usize] = value;
            }
            a if a == Register::INTF.addr() || a == Register::INTCAP.addr() => {}
            a => self.regs[a as usize] = value,
        }
    }

    fn advance(&mut self) {
        if self.reg(Register::IOCON) & iocon::SEQOP == 0 {
            self.pointer = (self.pointer + 1) % self.regs.len() as u8;
        }
    }
}

#[derive(Clone)]
pub(crate) struct SimChip {
    address: u8,
    state: Rc<RefCell<State>>,
}

impl SimChip {
    /// A chip in its power-on state.
    pub fn new(address: u8) -> Self {
        let mut regs = [0x00; 11];
        regs[Register::IODIR.addr() as usize] = 0xff;
        Self {
            address,
            state: Rc::new(RefCell::new(State {
                regs,
                pointer: 0,
                external: 0x00,
            })),
        }
    }

    /// Peek at a register without side effects.  GPIO shows the current port value.
    pub fn register(&self, reg: Register) -> u8 {
        let st = self.state.borrow();
        match reg {
            Register::GPIO => st.port(),
            reg => st.reg(reg),
        }
    }

    /// Apply new levels to the pins from the outside and latch any resulting interrupt.
    pub fn drive(&self, levels: u8) {
        let mut st = self.state.borrow_mut();
        let old = st.port();
        st.external = levels;
        let new = st.port();

        let armed = st.reg(Register::GPINTEN) & st.reg(Register::IODIR);
        let intcon = st.reg(Register::INTCON);
        let against_defval = intcon & (new ^ st.reg(Register::DEFVAL));
        let against_previous = !intcon & (new ^ old);
        let fired = armed & (against_defval | against_previous);

        if fired != 0 {
            if st.reg(Register::INTF) == 0 {
                st.regs[Register::INTCAP.addr() as usize] = new;
            }
            st.regs[Register::INTF.addr() as usize] |= fired;
        }
    }
}

impl ErrorType for SimChip {
    type Error = ErrorKind;
}

impl I2c for SimChip {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let mut st = self.state.borrow_mut();
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some((reg, data)) = bytes.split_first() {
                        st.pointer = *reg;
                        for value in data {
                            let pointer = st.pointer;
                            st.write(pointer, *value);
                            st.advance();
                        }
                    }
                }
                Operation::Read(buf) => {
                    for value in buf.iter_mut() {
                        let pointer = st.pointer;
                        *value = st.read(pointer);
                        st.advance();
                    }
                }
            }
        }
        Ok(())
    }
}
