//! In-memory register bank
//!
//! Stands in for the memory-mapped I/O space so the controller can be exercised off-target.

use crate::sdk::mcu::gpio::RegisterBank;

/// Size of the emulated data space: the 32 general purpose registers plus the 64 I/O registers.
pub const IO_SPACE: usize = 0x60;

/// Fake register file backed by plain memory.
///
/// Unlike real hardware the input registers are not wired to the output registers. Tests
/// drive them with [`RamRegisterBank::set`] to simulate external pin levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamRegisterBank {
    mem: [u8; IO_SPACE],
    writes: usize,
}

impl RamRegisterBank {
    /// Creates a bank with every register cleared, like the AVR after reset
    pub const fn new() -> Self {
        Self {
            mem: [0; IO_SPACE],
            writes: 0,
        }
    }

    /// Copy of the whole register file
    pub fn snapshot(&self) -> [u8; IO_SPACE] {
        self.mem
    }

    pub fn get(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    /// Sets a register from the outside (e.g. an input level). Not counted in [`writes`].
    ///
    /// [`writes`]: RamRegisterBank::writes
    pub fn set(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    /// Number of writes issued through [`RegisterBank::write`]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for RamRegisterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBank for RamRegisterBank {
    fn read(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_bank_counts_writes_only() {
        let mut bank = RamRegisterBank::new();

        bank.set(0x39, 0xAA);
        assert_eq!(bank.read(0x39), 0xAA);
        assert_eq!(bank.writes(), 0);

        bank.write(0x3b, 0x01);
        bank.write(0x3b, 0x02);
        assert_eq!(bank.get(0x3b), 0x02);
        assert_eq!(bank.writes(), 2);
    }

    #[test]
    fn test_ram_bank_snapshot() {
        let mut bank = RamRegisterBank::default();
        let before = bank.snapshot();

        bank.write(0x30, 0x55);
        let after = bank.snapshot();

        assert_ne!(before, after);
        assert_eq!(after[0x30], 0x55);
        assert!(after.iter().enumerate().all(|(i, v)| i == 0x30 || *v == 0));
    }
}
