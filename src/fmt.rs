//! Logging shims.  With the `defmt` feature these forward to `defmt`, otherwise they expand to
//! nothing and their arguments are not evaluated.

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
    };
}

pub(crate) use debug;
pub(crate) use trace;
