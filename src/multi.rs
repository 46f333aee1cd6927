use crate::{Mcp23008, PinError, PortMutex};

/// Set multiple pins at the same time.
///
/// The usual method of setting multiple pins
///
/// ```no_run
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// # let mcp = core::cell::RefCell::new(mcp23008::Mcp23008::new(i2c));
/// # let p = mcp23008::Mcp23008::split(&mcp);
/// # let mut io0 = p.gp0.into_output().unwrap();
/// # let mut io1 = p.gp1.into_output().unwrap();
/// io0.set_high().unwrap();
/// io1.set_low().unwrap();
/// ```
///
/// can be problematic because the time between the two operations might be significant (they are
/// done as two separate read-modify-write cycles).  If it is desired that multiple pins change
/// state in a single bus write, the `write_multiple()` function provides an interface to do this.
///
/// ## Example
/// ```no_run
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// # let mcp = core::cell::RefCell::new(mcp23008::Mcp23008::new(i2c));
/// # let p = mcp23008::Mcp23008::split(&mcp);
/// # let mut io0 = p.gp0.into_output().unwrap();
/// # let mut io1 = p.gp1.into_output().unwrap();
/// mcp23008::write_multiple(
///     [&mut io0, &mut io1],
///     [true, false],
/// ).unwrap();
/// ```
pub fn write_multiple<I2C, MUTEX, MODE: crate::mode::HasOutput, const N: usize>(
    pins: [&mut crate::Pin<'_, MODE, MUTEX>; N],
    states: [bool; N],
) -> Result<(), PinError<I2C::Error>>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    let mut mask = 0x00;
    let mut bits = 0x00;

    let port_driver = pins[0].port_driver();
    for (pin, state) in pins.iter().zip(states.iter()) {
        assert!(core::ptr::eq(pin.port_driver(), port_driver));
        mask |= pin.pin_id().mask();
        if *state {
            bits |= pin.pin_id().mask();
        }
    }

    port_driver.lock(|drv| drv.write_pins(mask, bits))?;
    Ok(())
}

/// Read multiple pins at the same time.
///
/// When a port-expander sends an interrupt that one of its inputs changed state, it might be
/// important to find out which input was responsible as quickly as possible _and_ by checking all
/// inputs at once.  The naive approach of checking the pins in order
///
/// ```no_run
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// # let mcp = core::cell::RefCell::new(mcp23008::Mcp23008::new(i2c));
/// # let p = mcp23008::Mcp23008::split(&mcp);
/// # let io0 = p.gp0;
/// # let io1 = p.gp1;
/// if io0.is_high().unwrap() {
///     // ...
/// } else if io1.is_high().unwrap() {
///     // ...
/// }
/// ```
///
/// is suboptimal because each read will happen as its own bus transaction and there is thus quite
/// some delay.  Also the pins are checked one after the other, not all at once, which could lead
/// to glitches.  The `read_multiple()` function provides an interface to circumvent these
/// problems.
///
/// ## Example
/// ```no_run
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// # let mcp = core::cell::RefCell::new(mcp23008::Mcp23008::new(i2c));
/// # let p = mcp23008::Mcp23008::split(&mcp);
/// # let io0 = p.gp0;
/// # let io1 = p.gp1;
/// let values = mcp23008::read_multiple([&io0, &io1]).unwrap();
/// if values[0] {
///     // ...
/// } else if values[1] {
///     // ...
/// }
/// ```
pub fn read_multiple<I2C, MUTEX, MODE: crate::mode::HasInput, const N: usize>(
    pins: [&crate::Pin<'_, MODE, MUTEX>; N],
) -> Result<[bool; N], PinError<I2C::Error>>
where
    I2C: crate::I2cBus,
    MUTEX: PortMutex<Port = Mcp23008<I2C>>,
{
    let port_driver = pins[0].port_driver();
    let port = port_driver.lock(|drv| drv.read_port())?;

    let mut ret = [false; N];
    for (pin, state) in pins.iter().zip(ret.iter_mut()) {
        assert!(core::ptr::eq(pin.port_driver(), port_driver));
        *state = port & pin.pin_id().mask() != 0;
    }

    Ok(ret)
}
