//! Support for the `MCP23008` "8-Bit I/O Expander with Serial Interface"
//!
//! Datasheet: https://ww1.microchip.com/downloads/en/DeviceDoc/MCP23008-MCP23S08-Data-Sheet-20001919F.pdf
//!
//! The MCP23008 offers a single eight-bit GPIO port.  It has three address pins, so eight
//! devices can coexist on an I2C bus.
//!
//! The driver keeps no copy of the chip's registers.  Every operation is a fresh sequence of
//! register accesses, so pin changes and interrupt latches on the chip are always seen as they
//! are.  Single-pin operations are read-modify-write cycles which leave the other pins alone.
//!
//! When a bus access fails, the operation returns the bus error right away and sends nothing
//! more.  A multi-register sequence interrupted that way leaves the chip partly configured;
//! there is no rollback.
use crate::fmt::{debug, trace};
use crate::registers::{iocon, Register};
use crate::{I2cExt, InterruptMode, InterruptOutput, PinId, PinMode};

/// Default I2C address, with A0..A2 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// `MCP23008` "8-Bit I/O Expander with Serial Interface"
#[derive(Debug)]
pub struct Mcp23008<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C> Mcp23008<I2C> {
    /// Create a driver for a chip at [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver for a chip at the 7-bit address `addr`.
    pub fn with_address(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Create a driver for a chip with the given levels on its address pins.
    pub fn with_address_pins(i2c: I2C, a0: bool, a1: bool, a2: bool) -> Self {
        let addr = DEFAULT_ADDRESS | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8);
        Self::with_address(i2c, addr)
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Destroy the driver and return the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: crate::I2cBus> Mcp23008<I2C> {
    /// Put the chip into the configuration the rest of this driver relies on.
    ///
    /// Sequential addressing is disabled (IOCON.SEQOP=1) so that repeated accesses stay on
    /// the addressed register, and the pull-ups are enabled on all pins.  The pull-ups only
    /// take effect on pins configured as inputs.
    ///
    /// This must be called once before anything else.  It is not checked.
    pub fn begin(&mut self) -> Result<(), I2C::Error> {
        debug!("mcp23008 {=u8:#x}: init", self.addr);
        self.i2c.write_reg(self.addr, Register::IOCON, iocon::SEQOP)?;
        self.i2c.write_reg(self.addr, Register::GPPU, 0xff)
    }

    /// Switch to a different device address and initialize the chip found there.
    pub fn begin_at(&mut self, addr: u8) -> Result<(), I2C::Error> {
        self.addr = addr;
        self.begin()
    }

    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write_reg(self.addr, reg, value)
    }

    pub fn read_register(&mut self, reg: Register) -> Result<u8, I2C::Error> {
        self.i2c.read_reg(self.addr, reg)
    }

    /// Read all registers, in address order.
    pub fn dump_registers(&mut self) -> Result<[u8; 11], I2C::Error> {
        let mut values = [0x00; 11];
        for (reg, value) in Register::ALL.iter().zip(values.iter_mut()) {
            *value = self.i2c.read_reg(self.addr, *reg)?;
            debug!("mcp23008 {=u8:#x}: {} = {=u8:#b}", self.addr, reg, *value);
        }
        Ok(values)
    }

    /// Configure direction, pull-ups and input polarity of the whole port at once.
    ///
    /// - `directions`: 1 = input, 0 = output (IODIR)
    /// - `pullups`: 1 = pull-up enabled, only effective on inputs (GPPU)
    /// - `inverted`: 1 = input reads inverted (IPOL)
    pub fn port_mode(
        &mut self,
        directions: u8,
        pullups: u8,
        inverted: u8,
    ) -> Result<(), I2C::Error> {
        self.i2c.write_reg(self.addr, Register::IODIR, directions)?;
        self.i2c.write_reg(self.addr, Register::GPPU, pullups)?;
        self.i2c.write_reg(self.addr, Register::IPOL, inverted)
    }

    /// Configure a single pin.
    ///
    /// `inverted` swaps the meaning of input and output, see [`PinMode::register_bits`].
    pub fn pin_mode(
        &mut self,
        pin: PinId,
        mode: PinMode,
        inverted: bool,
    ) -> Result<(), I2C::Error> {
        let (input, pull_up) = mode.register_bits(inverted);
        trace!("mcp23008 {=u8:#x}: {} as {}", self.addr, pin, mode);
        self.update_pin(Register::IODIR, pin, input)?;
        self.update_pin(Register::GPPU, pin, pull_up)
    }

    /// Enable or disable the pull-up of a single pin.
    pub fn set_pull_up(&mut self, pin: PinId, enable: bool) -> Result<(), I2C::Error> {
        self.update_pin(Register::GPPU, pin, enable)
    }

    /// Invert the input polarity of a single pin.
    pub fn set_polarity(&mut self, pin: PinId, inverted: bool) -> Result<(), I2C::Error> {
        self.update_pin(Register::IPOL, pin, inverted)
    }

    /// Drive a single output pin.
    ///
    /// A write to GPIO lands in OLAT on this chip, so the latch is updated directly.  Reading
    /// GPIO instead would copy the levels of input pins into the latch.
    pub fn digital_write(&mut self, pin: PinId, state: bool) -> Result<(), I2C::Error> {
        self.update_pin(Register::OLAT, pin, state)
    }

    /// Drive the output pins in `mask` to the matching bits of `bits` in a single
    /// read-modify-write of the latch.
    pub fn write_pins(&mut self, mask: u8, bits: u8) -> Result<(), I2C::Error> {
        self.i2c.update_bits(self.addr, Register::OLAT, mask, bits)
    }

    /// Read the level of a single pin.
    pub fn digital_read(&mut self, pin: PinId) -> Result<bool, I2C::Error> {
        Ok(self.read_port()? & pin.mask() != 0)
    }

    /// Read back the level a pin is being driven to.
    pub fn is_set_high(&mut self, pin: PinId) -> Result<bool, I2C::Error> {
        Ok(self.i2c.read_reg(self.addr, Register::OLAT)? & pin.mask() != 0)
    }

    pub fn write_port(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write_reg(self.addr, Register::GPIO, value)
    }

    pub fn read_port(&mut self) -> Result<u8, I2C::Error> {
        self.i2c.read_reg(self.addr, Register::GPIO)
    }

    /// Arm the interrupt-on-change of a single pin.
    ///
    /// INTCON and DEFVAL are set up first and GPINTEN last, so the pin is never armed with a
    /// stale compare configuration.  Other pins keep their configuration; call this once for
    /// every pin that should raise interrupts.
    ///
    /// For [`InterruptMode::Change`] the current pin level is read first and stored as the
    /// DEFVAL baseline.
    pub fn interrupt(&mut self, pin: PinId, mode: InterruptMode) -> Result<(), I2C::Error> {
        let baseline = match mode {
            InterruptMode::Change => self.read_port()? & pin.mask() != 0,
            InterruptMode::Rising | InterruptMode::Falling => false,
        };
        let (intcon, defval) = mode.control_bits(baseline);
        debug!("mcp23008 {=u8:#x}: arm {} on {}", self.addr, pin, mode);

        self.update_pin(Register::INTCON, pin, intcon)?;
        self.update_pin(Register::DEFVAL, pin, defval)?;
        self.update_pin(Register::GPINTEN, pin, true)
    }

    /// Arm the interrupt-on-change of all pins with the same mode.
    pub fn interrupt_port(&mut self, mode: InterruptMode) -> Result<(), I2C::Error> {
        let baseline = match mode {
            InterruptMode::Change => self.read_port()?,
            InterruptMode::Rising | InterruptMode::Falling => 0x00,
        };
        let mut intcon = 0x00;
        let mut defval = 0x00;
        for pin in PinId::ALL {
            let (c, d) = mode.control_bits(baseline & pin.mask() != 0);
            intcon |= if c { pin.mask() } else { 0 };
            defval |= if d { pin.mask() } else { 0 };
        }
        debug!("mcp23008 {=u8:#x}: arm port on {}", self.addr, mode);

        self.i2c.write_reg(self.addr, Register::INTCON, intcon)?;
        self.i2c.write_reg(self.addr, Register::DEFVAL, defval)?;
        self.i2c.write_reg(self.addr, Register::GPINTEN, 0xff)
    }

    /// Disarm the interrupt-on-change of a single pin.
    pub fn disable_interrupt(&mut self, pin: PinId) -> Result<(), I2C::Error> {
        self.update_pin(Register::GPINTEN, pin, false)
    }

    /// Disarm the interrupt-on-change of all pins.
    pub fn disable_interrupts(&mut self) -> Result<(), I2C::Error> {
        self.i2c.write_reg(self.addr, Register::GPINTEN, 0x00)
    }

    /// Current interrupt configuration of a pin, `None` if it is not armed.
    pub fn interrupt_state(&mut self, pin: PinId) -> Result<Option<InterruptMode>, I2C::Error> {
        let gpinten = self.i2c.read_reg(self.addr, Register::GPINTEN)?;
        if gpinten & pin.mask() == 0 {
            return Ok(None);
        }
        let intcon = self.i2c.read_reg(self.addr, Register::INTCON)? & pin.mask() != 0;
        let defval = self.i2c.read_reg(self.addr, Register::DEFVAL)? & pin.mask() != 0;
        Ok(Some(InterruptMode::from_control_bits(intcon, defval)))
    }

    /// Pins which caused the pending interrupt, one bit per pin (INTF).
    ///
    /// This does not clear the interrupt, see [`clear_interrupts()`](Self::clear_interrupts).
    /// Use [`PinId::iter_mask`] to turn the result into pins.
    pub fn interrupted_by(&mut self) -> Result<u8, I2C::Error> {
        self.i2c.read_reg(self.addr, Register::INTF)
    }

    /// Clear the pending interrupt and return the port value captured when it occurred (INTCAP).
    ///
    /// Until this is called the INT output stays asserted.
    pub fn clear_interrupts(&mut self) -> Result<u8, I2C::Error> {
        self.i2c.read_reg(self.addr, Register::INTCAP)
    }

    /// Configure the electrical behavior of the INT output.
    pub fn interrupt_output(&mut self, config: InterruptOutput) -> Result<(), I2C::Error> {
        self.i2c.update_bits(
            self.addr,
            Register::IOCON,
            iocon::ODR | iocon::INTPOL,
            config.iocon_bits(),
        )
    }

    fn update_pin(&mut self, reg: Register, pin: PinId, set: bool) -> Result<(), I2C::Error> {
        let bits = if set { pin.mask() } else { 0x00 };
        self.i2c.update_bits(self.addr, reg, pin.mask(), bits)
    }
}
