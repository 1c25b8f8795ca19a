// Single-bit helpers for 8-bit registers. `$bit` is a bit index, `$mask` a ready-made mask.

#[macro_export]
macro_rules! BIT {
    ( $bit:expr ) => {
        (1 << $bit)
    };
}

#[macro_export]
macro_rules! BM_SET {
    ( $x:expr, $mask:expr ) => {
        $x |= $mask
    };
}

#[macro_export]
macro_rules! BM_CLR {
    ( $x:expr, $mask:expr ) => {
        $x &= !($mask)
    };
}

#[macro_export]
macro_rules! BM_FLIP {
    ( $x:expr, $mask:expr ) => {
        $x ^= $mask
    };
}

#[macro_export]
macro_rules! BM_IS_SET {
    ( $x:expr, $mask:expr ) => {
        (($x) & ($mask)) != 0
    };
}

// Isolates bit `$bit` and shifts it down to 0 or 1
#[macro_export]
macro_rules! BIT_MASK {
    ( $x:expr, $bit:expr ) => {
        ((($x) & $crate::BIT!($bit)) >> ($bit))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_bit() {
        let mask: u8 = BIT!(5);
        assert_eq!(mask, 0b0010_0000);
        // Parenthesised, so negation covers the whole mask
        let inverted: u8 = !BIT!(0);
        assert_eq!(inverted, 0xFE);
    }

    #[test]
    fn test_set_clear_flip() {
        let mut reg: u8 = 0b1000_0001;

        BM_SET!(reg, BIT!(3));
        assert_eq!(reg, 0b1000_1001);

        BM_CLR!(reg, BIT!(7));
        assert_eq!(reg, 0b0000_1001);

        BM_FLIP!(reg, BIT!(0) | BIT!(1));
        assert_eq!(reg, 0b0000_1010);
    }

    #[test]
    fn test_is_set_and_bit_mask() {
        let reg: u8 = 0b0100_0100;

        assert!(BM_IS_SET!(reg, BIT!(2)));
        assert!(!BM_IS_SET!(reg, BIT!(3)));

        assert_eq!(BIT_MASK!(reg, 6u8), 1);
        assert_eq!(BIT_MASK!(reg, 5u8), 0);
    }
}
