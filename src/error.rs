//! GPIO error types

use crate::config::{NUM_PORTS, PINS_PER_PORT};

/// Result type for the checked GPIO operations
pub type Result<T> = core::result::Result<T, GpioError>;

/// Out-of-range identifier passed to a GPIO operation.
///
/// Returned by the `try_*` operations only. The unchecked operations swallow it and fall back
/// to a no-op (writes) or a zero sentinel (reads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Port identifier is not below `NUM_PORTS`
    #[error("port {0} is out of range (0..{max})", max = NUM_PORTS)]
    InvalidPort(u8),
    /// Pin identifier is not below `PINS_PER_PORT`
    #[error("pin {0} is out of range (0..{max})", max = PINS_PER_PORT)]
    InvalidPin(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GpioError::InvalidPort(9).to_string(),
            "port 9 is out of range (0..4)"
        );
        assert_eq!(
            GpioError::InvalidPin(8).to_string(),
            "pin 8 is out of range (0..8)"
        );
    }
}
