use crate::fmt::trace;
use crate::registers::Register;
use embedded_hal::i2c as hal_i2c;

/// Blanket trait for types implementing `i2c::I2c`
pub trait I2cBus: hal_i2c::I2c {}

impl<T> I2cBus for T where T: hal_i2c::I2c {}

/// Single-byte register access on top of the bus.
///
/// Every register access is one complete bus transaction.  Nothing is cached, each read
/// fetches the current value from the chip.
pub(crate) trait I2cExt {
    type Error;

    fn write_reg(&mut self, addr: u8, reg: Register, value: u8) -> Result<(), Self::Error>;
    fn read_reg(&mut self, addr: u8, reg: Register) -> Result<u8, Self::Error>;

    /// Replace the bits of `reg` selected by `mask` with the matching bits of `bits`.
    ///
    /// Bits outside of `mask` are written back exactly as read.  If the read fails, nothing is
    /// written.
    fn update_bits(
        &mut self,
        addr: u8,
        reg: Register,
        mask: u8,
        bits: u8,
    ) -> Result<(), Self::Error> {
        let old = self.read_reg(addr, reg)?;
        let new = (old & !mask) | (bits & mask);
        self.write_reg(addr, reg, new)
    }
}

impl<I2C: I2cBus> I2cExt for I2C {
    type Error = I2C::Error;

    fn write_reg(&mut self, addr: u8, reg: Register, value: u8) -> Result<(), Self::Error> {
        trace!("i2c {=u8:#x}: {} <- {=u8:#b}", addr, reg, value);
        self.write(addr, &[reg.into(), value])
    }

    fn read_reg(&mut self, addr: u8, reg: Register) -> Result<u8, Self::Error> {
        let mut buf = [0x00];
        self.write_read(addr, &[reg.into()], &mut buf)?;
        trace!("i2c {=u8:#x}: {} -> {=u8:#b}", addr, reg, buf[0]);
        Ok(buf[0])
    }
}
