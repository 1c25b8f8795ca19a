use crate::config::NUM_PORTS;
use crate::BIT;

// Addresses are in data space: I/O register n lives at 0x20 + n.

#[cfg_attr(test, mry::mry)]
pub fn read_reg8(addr: u16) -> u8 {
    unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
}

#[cfg_attr(test, mry::mry)]
pub fn write_reg8(addr: u16, value: u8) {
    unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
}

macro_rules! regrw {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            pub const [<$x:upper _ADDR>]: u16 = $a;

            pub fn [<read_ $x>]() -> u8 {
                read_reg8($a)
            }

            pub fn [<write_ $x>](value: u8) {
                write_reg8($a, value)
            }
        }
    };
}

macro_rules! gpio_port_regs {
    ( $p:ident, $pin:expr, $ddr:expr, $port:expr ) => {
        paste::paste! {
            pub const [<REG_PIN $p>]: u16 = $pin;
            pub const [<REG_DDR $p>]: u16 = $ddr;
            pub const [<REG_PORT $p>]: u16 = $port;
        }
    };
}

/****************************************************
 gpio regs: PINx (input), DDRx (direction), PORTx (output)
 *****************************************************/
gpio_port_regs!(A, 0x39, 0x3a, 0x3b);
gpio_port_regs!(B, 0x36, 0x37, 0x38);
gpio_port_regs!(C, 0x33, 0x34, 0x35);
gpio_port_regs!(D, 0x30, 0x31, 0x32);

/// Register triple backing one GPIO port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRegisters {
    /// Input register, read-only
    pub pin: u16,
    /// Direction register, 1 = output
    pub ddr: u16,
    /// Output register, drives outputs or enables pull-ups on inputs
    pub port: u16,
}

/// Dispatch table, indexed by port identifier.
pub const PORT_REGISTERS: [PortRegisters; NUM_PORTS as usize] = [
    PortRegisters { pin: REG_PINA, ddr: REG_DDRA, port: REG_PORTA },
    PortRegisters { pin: REG_PINB, ddr: REG_DDRB, port: REG_PORTB },
    PortRegisters { pin: REG_PINC, ddr: REG_DDRC, port: REG_PORTC },
    PortRegisters { pin: REG_PIND, ddr: REG_DDRD, port: REG_PORTD },
];

/****************************************************
 status register
 *****************************************************/
regrw!(reg_sreg, 0x5f);

#[allow(non_camel_case_types)]
pub enum FLD_SREG {
    C = BIT!(0),
    Z = BIT!(1),
    N = BIT!(2),
    V = BIT!(3),
    S = BIT!(4),
    H = BIT!(5),
    T = BIT!(6),
    I = BIT!(7),
}
