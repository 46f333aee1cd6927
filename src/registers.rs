//! Register map of the MCP23008.
//!
//! Datasheet: https://ww1.microchip.com/downloads/en/DeviceDoc/MCP23008-MCP23S08-Data-Sheet-20001919F.pdf

/// The eleven control registers of the MCP23008, by address.
///
/// Unlike the MCP23017 there is no BANK bit, so this layout is fixed.
///
/// For all registers the reset value is 0x00, except for IODIR which is 0xFF (making all pins
/// inputs) at reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::upper_case_acronyms)]
pub enum Register {
    /// IODIR: input/output direction: 0=output; 1=input
    IODIR = 0x00,
    /// IPOL: input polarity: 0=register values match input pins; 1=opposite
    IPOL = 0x01,
    /// GPINTEN: interrupt-on-change: 0=disable; 1=enable
    GPINTEN = 0x02,
    /// DEFVAL: default values for interrupt-on-change
    DEFVAL = 0x03,
    /// INTCON: interrupt-on-change config: 0=compare to previous pin value;
    ///   1=compare to corresponding bit in DEFVAL
    INTCON = 0x04,
    /// IOCON: configuration register, see [`iocon`] for the bit layout
    IOCON = 0x05,
    /// GPPU: GPIO pull-ups: enables weak internal pull-ups on each pin (when configured
    ///   as an input)
    GPPU = 0x06,
    /// INTF: interrupt flags: 0=no interrupt pending; 1=corresponding pin caused interrupt
    INTF = 0x07,
    /// INTCAP: interrupt captured value: reflects value of each pin at the time that they
    ///   caused an interrupt.  Reading it clears the interrupt.
    INTCAP = 0x08,
    /// GPIO: reflects logic level on pins.  Writes go to OLAT.
    GPIO = 0x09,
    /// OLAT: output latches: sets state for pins configured as outputs
    OLAT = 0x0a,
}

impl Register {
    /// All registers in address order.
    pub const ALL: [Register; 11] = [
        Register::IODIR,
        Register::IPOL,
        Register::GPINTEN,
        Register::DEFVAL,
        Register::INTCON,
        Register::IOCON,
        Register::GPPU,
        Register::INTF,
        Register::INTCAP,
        Register::GPIO,
        Register::OLAT,
    ];

    /// Address of this register on the device.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(r: Register) -> u8 {
        r.addr()
    }
}

/// Bits of the IOCON register.
///
/// - Bit 7-6: unimplemented
/// - Bit 5: SEQOP: 1=sequential operation disabled, address pointer does not increment
/// - Bit 4: DISSLW: disables slew rate control on SDA
/// - Bit 3: HAEN: hardware address enable, MCP23S08 only
/// - Bit 2: ODR: INT pin is 0=active-driver output (INTPOL sets polarity) or
///   1=open-drain output (overrides INTPOL)
/// - Bit 1: INTPOL: INT pin is 0=active-low or 1=active-high
/// - Bit 0: unimplemented
pub mod iocon {
    pub const SEQOP: u8 = 1 << 5;
    pub const DISSLW: u8 = 1 << 4;
    pub const HAEN: u8 = 1 << 3;
    pub const ODR: u8 = 1 << 2;
    pub const INTPOL: u8 = 1 << 1;
}
