use bitflags::bitflags;
use log::trace;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::error::{GpioError, Result};
use crate::sdk::mcu::register::{read_reg8, write_reg8, PortRegisters, PORT_REGISTERS};
use crate::{BIT, BIT_MASK, BM_CLR, BM_FLIP, BM_IS_SET, BM_SET};

/// GPIO port of the ATmega16/32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

impl Port {
    /// Validates a raw port identifier.
    pub fn from_id(id: u8) -> Result<Self> {
        Self::from_u8(id).ok_or(GpioError::InvalidPort(id))
    }

    /// Register triple of this port
    pub fn registers(self) -> &'static PortRegisters {
        &PORT_REGISTERS[self as usize]
    }
}

impl From<Port> for u8 {
    fn from(port: Port) -> u8 {
        port as u8
    }
}

/// Pin (bit) within a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pin {
    P0 = 0,
    P1 = 1,
    P2 = 2,
    P3 = 3,
    P4 = 4,
    P5 = 5,
    P6 = 6,
    P7 = 7,
}

impl Pin {
    /// Validates a raw pin identifier.
    pub fn from_id(id: u8) -> Result<Self> {
        Self::from_u8(id).ok_or(GpioError::InvalidPin(id))
    }

    /// Single-bit mask selecting this pin in a port register
    pub fn mask(self) -> u8 {
        BIT!(self as u8)
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> u8 {
        pin as u8
    }
}

/// GPIO pin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    Input = 0,
    Output = 1,
}

/// Logic level of a single pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low = 0,
    High = 1,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

bitflags! {
    /// Per-pin mask for whole-port operations. As a direction, a set bit selects output.
    ///
    /// Any combination of bits is meaningful, not only [`PinMask::ALL_INPUT`] and
    /// [`PinMask::ALL_OUTPUT`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PinMask: u8 {
        const PIN0 = BIT!(0);
        const PIN1 = BIT!(1);
        const PIN2 = BIT!(2);
        const PIN3 = BIT!(3);
        const PIN4 = BIT!(4);
        const PIN5 = BIT!(5);
        const PIN6 = BIT!(6);
        const PIN7 = BIT!(7);
    }
}

impl PinMask {
    pub const ALL_INPUT: PinMask = PinMask::empty();
    pub const ALL_OUTPUT: PinMask = PinMask::all();
}

impl From<u8> for PinMask {
    fn from(bits: u8) -> Self {
        PinMask::from_bits_retain(bits)
    }
}

impl From<Pin> for PinMask {
    fn from(pin: Pin) -> Self {
        PinMask::from_bits_retain(pin.mask())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinMask {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PinMask({=u8:#010b})", self.bits())
    }
}

/// Access to the 8-bit registers behind the GPIO ports.
///
/// [`Mmio`] talks to the real hardware; tests plug in an in-memory bank instead.
pub trait RegisterBank {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

/// Memory-mapped register access through volatile loads and stores.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mmio;

impl RegisterBank for Mmio {
    #[inline(always)]
    fn read(&self, addr: u16) -> u8 {
        read_reg8(addr)
    }

    #[inline(always)]
    fn write(&mut self, addr: u16, value: u8) {
        write_reg8(addr, value)
    }
}

/// Resolves a raw port identifier to its register triple.
fn port_registers(port: u8) -> Result<&'static PortRegisters> {
    Port::from_id(port).map(Port::registers).map_err(rejected)
}

/// Resolves a raw (port, pin) pair to the port's register triple and the pin's bit mask.
///
/// Both identifiers are checked before anything is returned, so no caller ever touches a
/// register for a half-valid address.
fn pin_registers(port: u8, pin: u8) -> Result<(&'static PortRegisters, u8)> {
    let regs = port_registers(port)?;
    let pin = Pin::from_id(pin).map_err(rejected)?;
    Ok((regs, pin.mask()))
}

fn rejected(err: GpioError) -> GpioError {
    trace!("gpio: request rejected, {}", err);
    err
}

/// Port/pin level access to the GPIO registers.
///
/// Holds no state of its own: every call is a direct transformation of the registers in
/// the bank. Port and pin identifiers are raw `u8` values (or [`Port`] / [`Pin`]), so
/// out-of-range requests are possible and are handled in one of two ways:
///
/// * the plain operations silently do nothing, and reads return 0 / [`Level::Low`]. A read
///   of a low pin and a rejected read look the same to the caller.
/// * the `try_*` operations return [`GpioError`] instead.
///
/// Either way an invalid request never touches a register.
///
/// Single-bit updates are a read-modify-write of a shared register and run inside a
/// critical section, so an interrupt handler modifying the same register cannot slip in
/// between the read and the write.
pub struct GpioController<B: RegisterBank = Mmio> {
    bank: B,
}

impl GpioController<Mmio> {
    /// Controller for the on-chip GPIO registers
    pub const fn new() -> Self {
        Self { bank: Mmio }
    }
}

impl Default for GpioController<Mmio> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RegisterBank> GpioController<B> {
    pub const fn with_bank(bank: B) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn into_bank(self) -> B {
        self.bank
    }

    /// Read-modify-write of one register under a critical section.
    fn modify(&mut self, addr: u16, f: impl FnOnce(u8) -> u8) {
        let bank = &mut self.bank;
        critical_section::with(|_| {
            let value = bank.read(addr);
            bank.write(addr, f(value));
        });
    }

    /// Configures one pin as input or output.
    ///
    /// # Parameters
    ///
    /// * `port` - Port identifier, 0 to `NUM_PORTS - 1`
    /// * `pin` - Pin identifier, 0 to `PINS_PER_PORT - 1`
    /// * `direction` - Requested direction
    ///
    /// # Algorithm
    ///
    /// 1. Validate both identifiers; return the error untouched if either is out of range
    /// 2. Read the port's direction register
    /// 3. Set the pin's bit for output, clear it for input
    /// 4. Write the register back
    ///
    /// # Notes
    ///
    /// * All other bits of the direction register are preserved
    /// * Steps 2 to 4 run in a critical section
    pub fn try_setup_pin_direction(
        &mut self,
        port: impl Into<u8>,
        pin: impl Into<u8>,
        direction: PinDirection,
    ) -> Result<()> {
        let (regs, mask) = pin_registers(port.into(), pin.into())?;

        self.modify(regs.ddr, |mut ddr| {
            match direction {
                PinDirection::Input => BM_CLR!(ddr, mask),
                PinDirection::Output => BM_SET!(ddr, mask),
            }
            ddr
        });

        Ok(())
    }

    /// Configures all pins of a port at once.
    ///
    /// The direction register is replaced by `direction`, the previous contents are not merged.
    /// Use [`PinMask::ALL_INPUT`] / [`PinMask::ALL_OUTPUT`] or any mix of bits.
    pub fn try_setup_port_direction(
        &mut self,
        port: impl Into<u8>,
        direction: impl Into<PinMask>,
    ) -> Result<()> {
        let regs = port_registers(port.into())?;
        self.bank.write(regs.ddr, direction.into().bits());
        Ok(())
    }

    /// Reads the electrical level of one pin from the input register.
    ///
    /// The input register follows the pin regardless of its direction, so on an output pin
    /// this reads back the driven level.
    pub fn try_read_pin(&self, port: impl Into<u8>, pin: impl Into<u8>) -> Result<Level> {
        let pin = pin.into();
        let (regs, _) = pin_registers(port.into(), pin)?;

        Ok(Level::from(BIT_MASK!(self.bank.read(regs.pin), pin) != 0))
    }

    /// Reads the whole input register of a port.
    pub fn try_read_port(&self, port: impl Into<u8>) -> Result<u8> {
        let regs = port_registers(port.into())?;
        Ok(self.bank.read(regs.pin))
    }

    /// Drives one pin high or low.
    ///
    /// # Parameters
    ///
    /// * `port` - Port identifier, 0 to `NUM_PORTS - 1`
    /// * `pin` - Pin identifier, 0 to `PINS_PER_PORT - 1`
    /// * `level` - Level to write into the output register
    ///
    /// # Algorithm
    ///
    /// 1. Validate both identifiers
    /// 2. Read the port's output register
    /// 3. Set the pin's bit for `High`, clear it for `Low`
    /// 4. Write the register back
    ///
    /// # Notes
    ///
    /// * On a pin configured as input the same bit switches the internal pull-up instead.
    ///   The direction is not checked here: the hardware decides what the bit means
    /// * All other bits of the output register are preserved
    pub fn try_write_pin(
        &mut self,
        port: impl Into<u8>,
        pin: impl Into<u8>,
        level: Level,
    ) -> Result<()> {
        let (regs, mask) = pin_registers(port.into(), pin.into())?;

        self.modify(regs.port, |mut out| {
            match level {
                Level::Low => BM_CLR!(out, mask),
                Level::High => BM_SET!(out, mask),
            }
            out
        });

        Ok(())
    }

    /// Replaces the whole output register of a port with `value`.
    pub fn try_write_port(&mut self, port: impl Into<u8>, value: u8) -> Result<()> {
        let regs = port_registers(port.into())?;
        self.bank.write(regs.port, value);
        Ok(())
    }

    /// Inverts one bit of the output register.
    pub fn try_toggle_pin(&mut self, port: impl Into<u8>, pin: impl Into<u8>) -> Result<()> {
        let (regs, mask) = pin_registers(port.into(), pin.into())?;

        self.modify(regs.port, |mut out| {
            BM_FLIP!(out, mask);
            out
        });

        Ok(())
    }

    /// Reads back the configured direction of one pin from the direction register.
    pub fn try_read_pin_direction(
        &self,
        port: impl Into<u8>,
        pin: impl Into<u8>,
    ) -> Result<PinDirection> {
        let (regs, mask) = pin_registers(port.into(), pin.into())?;

        Ok(if BM_IS_SET!(self.bank.read(regs.ddr), mask) {
            PinDirection::Output
        } else {
            PinDirection::Input
        })
    }

    /// Reads back the whole direction register of a port.
    pub fn try_read_port_direction(&self, port: impl Into<u8>) -> Result<PinMask> {
        let regs = port_registers(port.into())?;
        Ok(PinMask::from_bits_retain(self.bank.read(regs.ddr)))
    }

    /// Like [`try_setup_pin_direction`](Self::try_setup_pin_direction), invalid identifiers are ignored.
    pub fn setup_pin_direction(
        &mut self,
        port: impl Into<u8>,
        pin: impl Into<u8>,
        direction: PinDirection,
    ) {
        let _ = self.try_setup_pin_direction(port, pin, direction);
    }

    /// Like [`try_setup_port_direction`](Self::try_setup_port_direction), an invalid port is ignored.
    pub fn setup_port_direction(&mut self, port: impl Into<u8>, direction: impl Into<PinMask>) {
        let _ = self.try_setup_port_direction(port, direction);
    }

    /// Like [`try_read_pin`](Self::try_read_pin), but returns `Low` for invalid identifiers.
    pub fn read_pin(&self, port: impl Into<u8>, pin: impl Into<u8>) -> Level {
        self.try_read_pin(port, pin).unwrap_or(Level::Low)
    }

    /// Like [`try_read_port`](Self::try_read_port), but returns 0 for an invalid port.
    pub fn read_port(&self, port: impl Into<u8>) -> u8 {
        self.try_read_port(port).unwrap_or(0)
    }

    pub fn write_pin(&mut self, port: impl Into<u8>, pin: impl Into<u8>, level: Level) {
        let _ = self.try_write_pin(port, pin, level);
    }

    pub fn write_port(&mut self, port: impl Into<u8>, value: u8) {
        let _ = self.try_write_port(port, value);
    }

    pub fn toggle_pin(&mut self, port: impl Into<u8>, pin: impl Into<u8>) {
        let _ = self.try_toggle_pin(port, pin);
    }

    /// Returns `Input` for invalid identifiers.
    pub fn read_pin_direction(&self, port: impl Into<u8>, pin: impl Into<u8>) -> PinDirection {
        self.try_read_pin_direction(port, pin)
            .unwrap_or(PinDirection::Input)
    }

    /// Returns [`PinMask::ALL_INPUT`] for an invalid port.
    pub fn read_port_direction(&self, port: impl Into<u8>) -> PinMask {
        self.try_read_port_direction(port)
            .unwrap_or(PinMask::ALL_INPUT)
    }
}

/// Configures one pin of the on-chip GPIO as input or output.
///
/// Out-of-range `port` or `pin` makes this a no-op.
pub fn gpio_setup_pin_direction(port: u8, pin: u8, direction: PinDirection) {
    GpioController::new().setup_pin_direction(port, pin, direction)
}

/// Overwrites the direction register of a port, 1 = output.
pub fn gpio_setup_port_direction(port: u8, direction: u8) {
    GpioController::new().setup_port_direction(port, direction)
}

/// Returns the input level of a pin as 0 or 1; 0 for an out-of-range request.
pub fn gpio_read_pin(port: u8, pin: u8) -> u8 {
    GpioController::new().read_pin(port, pin) as u8
}

/// Returns the input register of a port; 0 for an out-of-range port.
pub fn gpio_read_port(port: u8) -> u8 {
    GpioController::new().read_port(port)
}

/// Writes a pin of the output register: a `value` of 1 sets it, any other value clears it.
pub fn gpio_write_pin(port: u8, pin: u8, value: u8) {
    GpioController::new().write_pin(port, pin, Level::from(value == Level::High as u8))
}

/// Overwrites the output register of a port.
pub fn gpio_write_port(port: u8, value: u8) {
    GpioController::new().write_port(port, value)
}
