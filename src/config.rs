// Board layout of the ATmega16/32: four 8-bit ports, A to D.

pub const NUM_PORTS: u8 = 4;
pub const PINS_PER_PORT: u8 = 8;

pub const PORTA_ID: u8 = 0;
pub const PORTB_ID: u8 = 1;
pub const PORTC_ID: u8 = 2;
pub const PORTD_ID: u8 = 3;

pub const PIN0_ID: u8 = 0;
pub const PIN1_ID: u8 = 1;
pub const PIN2_ID: u8 = 2;
pub const PIN3_ID: u8 = 3;
pub const PIN4_ID: u8 = 4;
pub const PIN5_ID: u8 = 5;
pub const PIN6_ID: u8 = 6;
pub const PIN7_ID: u8 = 7;
