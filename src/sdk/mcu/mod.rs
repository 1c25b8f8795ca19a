pub mod gpio;
pub mod irq_i;
pub mod register;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
