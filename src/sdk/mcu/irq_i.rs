use crate::sdk::mcu::register::{read_reg_sreg, write_reg_sreg, FLD_SREG};

/// Globally masks interrupts and returns the SREG value seen before masking.
pub fn irq_disable() -> u8 {
    let r = read_reg_sreg();
    write_reg_sreg(r & !(FLD_SREG::I as u8));
    return r;
}

/// Re-enables interrupts if they were enabled in `sreg`, as returned by [`irq_disable`].
///
/// Only the I bit is restored; the arithmetic flags are left as they are now.
pub fn irq_restore(sreg: u8) {
    if sreg & FLD_SREG::I as u8 != 0 {
        write_reg_sreg(read_reg_sreg() | FLD_SREG::I as u8);
    }
}

#[cfg(feature = "critical-section-impl")]
mod sreg_critical_section {
    use super::{irq_disable, irq_restore};

    struct SregCriticalSection;
    critical_section::set_impl!(SregCriticalSection);

    unsafe impl critical_section::Impl for SregCriticalSection {
        unsafe fn acquire() -> critical_section::RawRestoreState {
            irq_disable()
        }

        unsafe fn release(state: critical_section::RawRestoreState) {
            irq_restore(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::mcu::register::{
        mock_read_reg8, mock_write_reg8, read_reg8, write_reg8, REG_SREG_ADDR,
    };
    use mry::Any;

    #[test]
    #[mry::lock(read_reg8, write_reg8)]
    fn test_irq_disable_clears_i_bit() {
        mock_read_reg8(REG_SREG_ADDR).returns(0x83);
        mock_write_reg8(Any, Any).returns(());

        assert_eq!(irq_disable(), 0x83);

        // Flags survive, only I is dropped
        mock_write_reg8(REG_SREG_ADDR, 0x03).assert_called(1);
    }

    #[test]
    #[mry::lock(read_reg8, write_reg8)]
    fn test_irq_restore_enabled() {
        mock_read_reg8(REG_SREG_ADDR).returns(0x02);
        mock_write_reg8(Any, Any).returns(());

        irq_restore(0x80);

        mock_write_reg8(REG_SREG_ADDR, 0x82).assert_called(1);
    }

    #[test]
    #[mry::lock(read_reg8, write_reg8)]
    fn test_irq_restore_disabled_is_noop() {
        mock_read_reg8(Any).returns(0x00);
        mock_write_reg8(Any, Any).returns(());

        // Interrupts were already off when the section was entered
        irq_restore(0x03);

        mock_write_reg8(Any, Any).assert_called(0);
    }
}
