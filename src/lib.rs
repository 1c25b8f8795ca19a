//! GPIO register layer for the ATmega16/32.
//!
//! Four 8-bit ports (A to D), each backed by a direction (DDRx), output (PORTx) and input
//! (PINx) register. Pins and ports are addressed by small integer identifiers; see
//! [`GpioController`] for the operations and how out-of-range identifiers are treated.
//!
//! ```no_run
//! use atmega_gpio::{GpioController, Level, PinDirection, PinMask, Port, Pin};
//!
//! let mut gpio = GpioController::new();
//! gpio.setup_port_direction(Port::B, PinMask::ALL_OUTPUT);
//! gpio.setup_pin_direction(Port::D, Pin::P2, PinDirection::Input);
//! gpio.write_pin(Port::B, Pin::P0, Level::High);
//! let _button = gpio.read_pin(Port::D, Pin::P2);
//! ```
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod sdk;

pub use error::{GpioError, Result};
pub use sdk::mcu::gpio::{
    gpio_read_pin, gpio_read_port, gpio_setup_pin_direction, gpio_setup_port_direction,
    gpio_write_pin, gpio_write_port, GpioController, Level, Mmio, Pin, PinDirection, PinMask,
    Port, RegisterBank,
};
#[cfg(any(test, feature = "mock"))]
pub use sdk::mcu::mock::RamRegisterBank;
