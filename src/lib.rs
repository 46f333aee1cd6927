//! Driver for the Microchip MCP23008 8-bit I2C I/O expander.
//!
//! The driver works on top of any [`embedded_hal::i2c::I2c`] bus.  Every method of [`Mcp23008`]
//! is a short sequence of single-register accesses; no register contents are cached.
//!
//! ```
//! # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//! # let mut i2c = Mock::new(&[
//! #     Transaction::write(0x20, vec![0x05, 0x20]),
//! #     Transaction::write(0x20, vec![0x06, 0xff]),
//! #     Transaction::write_read(0x20, vec![0x00], vec![0xff]),
//! #     Transaction::write(0x20, vec![0x00, 0xfe]),
//! #     Transaction::write_read(0x20, vec![0x06], vec![0xff]),
//! #     Transaction::write(0x20, vec![0x06, 0xfe]),
//! #     Transaction::write_read(0x20, vec![0x0a], vec![0x00]),
//! #     Transaction::write(0x20, vec![0x0a, 0x01]),
//! #     Transaction::write_read(0x20, vec![0x04], vec![0x00]),
//! #     Transaction::write(0x20, vec![0x04, 0x80]),
//! #     Transaction::write_read(0x20, vec![0x03], vec![0x00]),
//! #     Transaction::write(0x20, vec![0x03, 0x00]),
//! #     Transaction::write_read(0x20, vec![0x02], vec![0x00]),
//! #     Transaction::write(0x20, vec![0x02, 0x80]),
//! #     Transaction::write_read(0x20, vec![0x07], vec![0x80]),
//! #     Transaction::write_read(0x20, vec![0x08], vec![0x81]),
//! # ]);
//! use mcp23008::{InterruptMode, Mcp23008, PinId, PinMode};
//!
//! let mut mcp = Mcp23008::new(i2c.clone());
//! mcp.begin()?;
//!
//! mcp.pin_mode(PinId::Gp0, PinMode::Output, false)?;
//! mcp.digital_write(PinId::Gp0, true)?;
//!
//! // GP7 is an input with pull-up after `begin()`
//! mcp.interrupt(PinId::Gp7, InterruptMode::Rising)?;
//!
//! // ... later, when the INT line fires:
//! for pin in PinId::iter_mask(mcp.interrupted_by()?) {
//!     assert_eq!(pin, PinId::Gp7);
//! }
//! let captured = mcp.clear_interrupts()?;
//! assert_eq!(captured & PinId::Gp7.mask(), PinId::Gp7.mask());
//! # i2c.done();
//! # Ok::<(), embedded_hal::i2c::ErrorKind>(())
//! ```
//!
//! To share the chip, for example to use its pins as `embedded-hal` pins, place the driver in a
//! [`PortMutex`] and [`split()`](Mcp23008::split) it.
//!
//! # Features
//!
//! - **`defmt`**: trace every register access with `defmt` and implement `defmt::Format` on
//!   the public types.
//! - **`std`**: [`PortMutex`] for `std::sync::Mutex`.
//! - **`critical-section`**: [`PortMutex`] for `critical_section::Mutex<RefCell<_>>`.
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

mod fmt;

mod bus;
mod common;
mod driver;
mod multi;
mod mutex;
mod pin;
pub mod registers;
#[cfg(test)]
mod sim;

pub use bus::I2cBus;
pub use common::mode;
pub use common::{InterruptMode, InterruptOutput, PinId, PinMode};
pub use driver::{Mcp23008, DEFAULT_ADDRESS};
pub use multi::read_multiple;
pub use multi::write_multiple;
pub use mutex::PortMutex;
pub use pin::{Parts, Pin, PinError};
pub use registers::Register;

pub(crate) use bus::I2cExt;
