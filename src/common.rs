use crate::registers::iocon;

/// One of the eight GPIO pins.  The discriminant is the bit position in every register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinId {
    Gp0 = 0,
    Gp1 = 1,
    Gp2 = 2,
    Gp3 = 3,
    Gp4 = 4,
    Gp5 = 5,
    Gp6 = 6,
    Gp7 = 7,
}

impl PinId {
    pub const ALL: [PinId; 8] = [
        PinId::Gp0,
        PinId::Gp1,
        PinId::Gp2,
        PinId::Gp3,
        PinId::Gp4,
        PinId::Gp5,
        PinId::Gp6,
        PinId::Gp7,
    ];

    /// Pin for a raw pin number, `None` if it is not in `0..=7`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Bit mask of this pin inside a register byte.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    /// Pins whose bit is set in `value`, lowest first.
    ///
    /// Handy for decoding the byte returned by
    /// [`interrupted_by()`](crate::Mcp23008::interrupted_by).
    pub fn iter_mask(value: u8) -> impl Iterator<Item = PinId> {
        Self::ALL.into_iter().filter(move |p| value & p.mask() != 0)
    }
}

/// Direction and pull-up configuration of a single pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Output,
    Input,
    InputPullUp,
}

impl PinMode {
    /// IODIR and GPPU bit for this mode, as `(iodir, gppu)`.
    ///
    /// The chip calls a pin with IODIR=1 an input, while most board APIs number INPUT as 0
    /// and OUTPUT as 1.  `inverted` flips the IODIR bit to bridge the two numbering schemes and
    /// has no other effect.
    pub const fn register_bits(self, inverted: bool) -> (bool, bool) {
        match self {
            PinMode::Output => (inverted, false),
            PinMode::Input => (!inverted, false),
            PinMode::InputPullUp => (!inverted, true),
        }
    }
}

/// Trigger condition for the interrupt-on-change of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    /// Any change compared to the previous pin value.
    Change,
    /// The pin reads high.
    Rising,
    /// The pin reads low.
    Falling,
}

impl InterruptMode {
    /// INTCON and DEFVAL bit for this mode, as `(intcon, defval)`.
    ///
    /// `baseline` is the current level of the pin.  INTCON=0 compares against the previous
    /// pin value and leaves DEFVAL unused, so for `Change` the baseline is stored there only to
    /// keep DEFVAL in a known state.  INTCON=1 fires while the pin differs from DEFVAL, so
    /// DEFVAL holds the level which must *not* trigger.
    pub const fn control_bits(self, baseline: bool) -> (bool, bool) {
        match self {
            InterruptMode::Change => (false, baseline),
            InterruptMode::Rising => (true, false),
            InterruptMode::Falling => (true, true),
        }
    }

    /// Decode the INTCON and DEFVAL bits of an armed pin.
    pub const fn from_control_bits(intcon: bool, defval: bool) -> Self {
        match (intcon, defval) {
            (false, _) => InterruptMode::Change,
            (true, false) => InterruptMode::Rising,
            (true, true) => InterruptMode::Falling,
        }
    }
}

/// Electrical configuration of the INT output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptOutput {
    /// Push-pull, low while an interrupt is pending.  This is the reset state.
    #[default]
    ActiveLow,
    /// Push-pull, high while an interrupt is pending.
    ActiveHigh,
    /// Open-drain, pulled low while an interrupt is pending.
    OpenDrain,
}

impl InterruptOutput {
    /// ODR and INTPOL bits of IOCON for this configuration.
    pub(crate) const fn iocon_bits(self) -> u8 {
        match self {
            InterruptOutput::ActiveLow => 0,
            InterruptOutput::ActiveHigh => iocon::INTPOL,
            InterruptOutput::OpenDrain => iocon::ODR,
        }
    }
}

/// Pin Modes
pub mod mode {
    /// Trait for pin-modes which can be used to set a logic level.
    pub trait HasOutput {}
    /// Trait for pin-modes which can be used to read a logic level.
    pub trait HasInput {}

    /// Pin configured as an input.
    pub struct Input;
    impl HasInput for Input {}

    /// Pin configured as an output.
    pub struct Output;
    impl HasOutput for Output {}
}
