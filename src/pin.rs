use crate::{InterruptMode, Mcp23008, PinId, PinMode, PortMutex};
use core::marker::PhantomData;
use embedded_hal::digital::{self as hal_digital, ErrorKind};

/// Representation of a port-expander pin.
///
/// `Pin` is not constructed directly, this type is created by placing an [`Mcp23008`] inside a
/// [`PortMutex`] and then getting access to all its pins using [`Mcp23008::split()`].
pub struct Pin<'a, MODE, MUTEX> {
    pin: PinId,
    port_driver: &'a MUTEX,
    _m: PhantomData<MODE>,
}

/// The eight pins of an [`Mcp23008`], all configured as inputs (the reset state).
pub struct Parts<'a, M> {
    pub gp0: Pin<'a, crate::mode::Input, M>,
    pub gp1: Pin<'a, crate::mode::Input, M>,
    pub gp2: Pin<'a, crate::mode::Input, M>,
    pub gp3: Pin<'a, crate::mode::Input, M>,
    pub gp4: Pin<'a, crate::mode::Input, M>,
    pub gp5: Pin<'a, crate::mode::Input, M>,
    pub gp6: Pin<'a, crate::mode::Input, M>,
    pub gp7: Pin<'a, crate::mode::Input, M>,
}

impl<I2C: crate::I2cBus> Mcp23008<I2C> {
    /// Hand out the pins of a driver that is shared through `mutex`.
    ///
    /// The driver stays usable through the mutex, for example to read
    /// [`interrupted_by()`](Mcp23008::interrupted_by) in an interrupt handler.
    pub fn split<M>(mutex: &M) -> Parts<'_, M>
    where
        M: PortMutex<Port = Self>,
    {
        Parts {
            gp0: Pin::new(PinId::Gp0, mutex),
            gp1: Pin::new(PinId::Gp1, mutex),
            gp2: Pin::new(PinId::Gp2, mutex),
            gp3: Pin::new(PinId::Gp3, mutex),
            gp4: Pin::new(PinId::Gp4, mutex),
            gp5: Pin::new(PinId::Gp5, mutex),
            gp6: Pin::new(PinId::Gp6, mutex),
            gp7: Pin::new(PinId::Gp7, mutex),
        }
    }
}

/// Bus error seen through a pin.
///
/// Wraps the bus error so it can serve as an `embedded_hal::digital::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinError<E>(pub E);

impl<E> From<E> for PinError<E> {
    fn from(e: E) -> Self {
        Self(e)
    }
}

impl<E: core::fmt::Debug> hal_digital::Error for PinError<E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl<'a, MODE, MUTEX, I2C> Pin<'a, MODE, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    pub(crate) fn new(pin: PinId, port_driver: &'a MUTEX) -> Self {
        Self {
            pin,
            port_driver,
            _m: PhantomData,
        }
    }

    pub fn pin_id(&self) -> PinId {
        self.pin
    }

    pub(crate) fn port_driver(&self) -> &MUTEX {
        self.port_driver
    }

    fn into_mode<M>(self, mode: PinMode) -> Result<Pin<'a, M, MUTEX>, PinError<I2C::Error>> {
        self.port_driver
            .lock(|drv| drv.pin_mode(self.pin, mode, false))?;
        Ok(Pin {
            pin: self.pin,
            port_driver: self.port_driver,
            _m: PhantomData,
        })
    }

    pub fn into_input(self) -> Result<Pin<'a, crate::mode::Input, MUTEX>, PinError<I2C::Error>> {
        self.into_mode(PinMode::Input)
    }

    pub fn into_input_pull_up(
        self,
    ) -> Result<Pin<'a, crate::mode::Input, MUTEX>, PinError<I2C::Error>> {
        self.into_mode(PinMode::InputPullUp)
    }

    /// Turn the pin into an output, driving whatever level is currently in the latch.
    pub fn into_output(self) -> Result<Pin<'a, crate::mode::Output, MUTEX>, PinError<I2C::Error>> {
        self.into_mode(PinMode::Output)
    }

    /// Turn the pin into an output which starts out HIGH.
    ///
    /// The latch is written before the direction changes so the pin never glitches LOW.
    pub fn into_output_high(
        self,
    ) -> Result<Pin<'a, crate::mode::Output, MUTEX>, PinError<I2C::Error>> {
        self.port_driver
            .lock(|drv| drv.digital_write(self.pin, true))?;
        self.into_mode(PinMode::Output)
    }
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, I2C> Pin<'a, MODE, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    pub fn is_high(&self) -> Result<bool, PinError<I2C::Error>> {
        Ok(self.port_driver.lock(|drv| drv.digital_read(self.pin))?)
    }

    pub fn is_low(&self) -> Result<bool, PinError<I2C::Error>> {
        self.is_high().map(|b| !b)
    }

    /// Invert the level reported for this pin.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), PinError<I2C::Error>> {
        Ok(self
            .port_driver
            .lock(|drv| drv.set_polarity(self.pin, inverted))?)
    }

    /// Arm the interrupt-on-change of this pin.
    pub fn enable_interrupt(&mut self, mode: InterruptMode) -> Result<(), PinError<I2C::Error>> {
        Ok(self
            .port_driver
            .lock(|drv| drv.interrupt(self.pin, mode))?)
    }

    pub fn disable_interrupt(&mut self) -> Result<(), PinError<I2C::Error>> {
        Ok(self
            .port_driver
            .lock(|drv| drv.disable_interrupt(self.pin))?)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, I2C> Pin<'a, MODE, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    pub fn set_state(&mut self, state: bool) -> Result<(), PinError<I2C::Error>> {
        Ok(self
            .port_driver
            .lock(|drv| drv.digital_write(self.pin, state))?)
    }

    pub fn set_high(&mut self) -> Result<(), PinError<I2C::Error>> {
        self.set_state(true)
    }

    pub fn set_low(&mut self) -> Result<(), PinError<I2C::Error>> {
        self.set_state(false)
    }

    pub fn is_set_high(&self) -> Result<bool, PinError<I2C::Error>> {
        Ok(self.port_driver.lock(|drv| drv.is_set_high(self.pin))?)
    }

    pub fn is_set_low(&self) -> Result<bool, PinError<I2C::Error>> {
        self.is_set_high().map(|b| !b)
    }

    pub fn toggle(&mut self) -> Result<(), PinError<I2C::Error>> {
        let high = self.is_set_high()?;
        self.set_state(!high)
    }
}

impl<'a, MODE, MUTEX, I2C> hal_digital::ErrorType for Pin<'a, MODE, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    type Error = PinError<I2C::Error>;
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, I2C> hal_digital::InputPin for Pin<'a, MODE, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_high(self)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_low(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, I2C> hal_digital::OutputPin for Pin<'a, MODE, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, I2C> hal_digital::StatefulOutputPin
    for Pin<'a, MODE, MUTEX>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_high(self)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_low(self)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::registers::Register;
    use crate::sim::SimChip;
    use crate::{InterruptMode, Mcp23008, PinError};
    use core::cell::RefCell;
    use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    #[test]
    fn mcp23008_pins() {
        let expectations = [
            // pin setup gp0
            mock_i2c::Transaction::write_read(0x20, vec![0x00], vec![0xff]),
            mock_i2c::Transaction::write(0x20, vec![0x00, 0xfe]),
            mock_i2c::Transaction::write_read(0x20, vec![0x06], vec![0xff]),
            mock_i2c::Transaction::write(0x20, vec![0x06, 0xfe]),
            // pin setup gp7 as input
            mock_i2c::Transaction::write_read(0x20, vec![0x00], vec![0xfe]),
            mock_i2c::Transaction::write(0x20, vec![0x00, 0xfe]),
            mock_i2c::Transaction::write_read(0x20, vec![0x06], vec![0xfe]),
            mock_i2c::Transaction::write(0x20, vec![0x06, 0x7e]),
            // output gp0
            mock_i2c::Transaction::write_read(0x20, vec![0x0a], vec![0x00]),
            mock_i2c::Transaction::write(0x20, vec![0x0a, 0x01]),
            mock_i2c::Transaction::write_read(0x20, vec![0x0a], vec![0x01]),
            mock_i2c::Transaction::write(0x20, vec![0x0a, 0x00]),
            // input gp7
            mock_i2c::Transaction::write_read(0x20, vec![0x09], vec![0x80]),
            mock_i2c::Transaction::write_read(0x20, vec![0x09], vec![0x7f]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mcp = RefCell::new(Mcp23008::new(bus.clone()));
        let pins = Mcp23008::split(&mcp);

        let mut gp0 = pins.gp0.into_output().unwrap();
        let gp7 = pins.gp7.into_input().unwrap();

        gp0.set_high().unwrap();
        gp0.set_low().unwrap();

        assert!(gp7.is_high().unwrap());
        assert!(gp7.is_low().unwrap());

        bus.done();
    }

    #[test]
    fn bus_error_through_pin() {
        let expectations = [mock_i2c::Transaction::write_read(0x20, vec![0x09], vec![0x00])
            .with_error(ErrorKind::Bus)];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mcp = RefCell::new(Mcp23008::new(bus.clone()));
        let pins = Mcp23008::split(&mcp);

        let mut gp2 = pins.gp2;
        assert_eq!(InputPin::is_high(&mut gp2), Err(PinError(ErrorKind::Bus)));

        bus.done();
    }

    #[test]
    fn hal_traits_on_simulated_chip() {
        let chip = SimChip::new(0x20);
        let mcp = std::sync::Mutex::new(Mcp23008::new(chip.clone()));
        let pins = Mcp23008::split(&mcp);

        let mut gp1 = pins.gp1.into_output_high().unwrap();
        let mut gp5 = pins.gp5.into_input_pull_up().unwrap();
        assert_eq!(chip.register(Register::OLAT), 0b0000_0010);
        assert_eq!(chip.register(Register::IODIR), 0b1111_1101);
        assert_eq!(chip.register(Register::GPPU), 0b0010_0000);

        assert!(StatefulOutputPin::is_set_high(&mut gp1).unwrap());
        StatefulOutputPin::toggle(&mut gp1).unwrap();
        assert!(StatefulOutputPin::is_set_low(&mut gp1).unwrap());
        OutputPin::set_high(&mut gp1).unwrap();
        assert_eq!(chip.register(Register::OLAT), 0b0000_0010);

        chip.drive(0b0010_0000);
        assert!(InputPin::is_high(&mut gp5).unwrap());
        gp5.set_inverted(true).unwrap();
        assert!(InputPin::is_low(&mut gp5).unwrap());
    }

    #[test]
    fn pin_interrupts() {
        let chip = SimChip::new(0x20);
        let mcp = RefCell::new(Mcp23008::new(chip.clone()));
        let pins = Mcp23008::split(&mcp);

        let mut gp4 = pins.gp4.into_input().unwrap();
        gp4.enable_interrupt(InterruptMode::Rising).unwrap();
        assert_eq!(chip.register(Register::GPINTEN), 0b0001_0000);

        chip.drive(0b0001_0000);
        assert_eq!(mcp.borrow_mut().interrupted_by().unwrap(), 0b0001_0000);
        assert_eq!(mcp.borrow_mut().clear_interrupts().unwrap(), 0b0001_0000);

        gp4.disable_interrupt().unwrap();
        assert_eq!(chip.register(Register::GPINTEN), 0x00);
    }
}
