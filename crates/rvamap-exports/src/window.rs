/// Half-width of the address window searched around the target RVA.
pub const SEARCH_DELTA: u64 = 0x1000;

use crate::error::ParseHexError;

/// Address window centered on a relative virtual address.
///
/// The RVA is kept signed: a base address above the virtual address is not
/// rejected. The window around a negative RVA still reaches exports whose RVA
/// is below `rva + delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RvaWindow {
    rva: i128,
    delta: u64,
}

impl RvaWindow {
    /// Creates the window around `virtual_addr - base_addr`, with a half-width
    /// of [SEARCH_DELTA].
    pub fn from_addresses(virtual_addr: u64, base_addr: u64) -> Self {
        Self {
            rva: i128::from(virtual_addr) - i128::from(base_addr),
            delta: SEARCH_DELTA,
        }
    }

    /// Returns the RVA at the center of the window.
    pub fn rva(&self) -> i128 {
        self.rva
    }

    /// Returns the half-width of the window.
    pub fn delta(&self) -> u64 {
        self.delta
    }

    /// Returns the lower (excluded) bound of the window.
    pub fn min(&self) -> i128 {
        self.rva - i128::from(self.delta)
    }

    /// Returns the upper (excluded) bound of the window.
    pub fn max(&self) -> i128 {
        self.rva + i128::from(self.delta)
    }

    /// Returns whether `rva` lies strictly inside the window.
    pub fn contains(&self, rva: u64) -> bool {
        let rva = i128::from(rva);
        self.min() < rva && rva < self.max()
    }
}

/// Formats a signed value as lowercase hexadecimal with a `0x` prefix.
///
/// Negative values keep their sign in front of the prefix (`-0x10`).
pub fn format_hex(value: i128) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}

/// Parses an unsigned hexadecimal value, without `0x` prefix nor sign.
pub fn parse_hex(s: &str) -> Result<u64, ParseHexError> {
    if s.starts_with(['+', '-']) {
        return Err(ParseHexError::Sign);
    }

    Ok(u64::from_str_radix(s, 16)?)
}

#[cfg(test)]
mod tests {
    use super::{RvaWindow, SEARCH_DELTA, format_hex, parse_hex};
    use crate::error::ParseHexError;

    #[test]
    fn window_from_crash_addresses() {
        let window = RvaWindow::from_addresses(0x7ffac3d43cb7, 0x7ffac3cb0000);

        assert_eq!(window.rva(), 0x93cb7);
        assert_eq!(window.delta(), SEARCH_DELTA);
        assert_eq!(window.min(), 0x92cb7);
        assert_eq!(window.max(), 0x94cb7);
    }

    #[test]
    fn window_bounds_are_excluded() {
        let window = RvaWindow::from_addresses(0x7ffac3d43cb7, 0x7ffac3cb0000);

        assert!(!window.contains(0x92cb7));
        assert!(window.contains(0x92cb8));
        assert!(window.contains(0x93cb7));
        assert!(window.contains(0x94cb6));
        assert!(!window.contains(0x94cb7));
    }

    #[test]
    fn negative_rva_is_kept() {
        let window = RvaWindow::from_addresses(0x1000, 0x1010);

        assert_eq!(window.rva(), -0x10);
        assert_eq!(format_hex(window.rva()), "-0x10");

        // the window still reaches small positive RVAs
        assert!(window.contains(0));
        assert!(window.contains(0xfef));
        assert!(!window.contains(0xff0));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(format_hex(0), "0x0");
        assert_eq!(format_hex(0x93cb7), "0x93cb7");
        assert_eq!(format_hex(i128::from(SEARCH_DELTA)), "0x1000");
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("7ffac3d43cb7"), Ok(0x7ffac3d43cb7));
        assert_eq!(parse_hex("00093CA0"), Ok(0x93ca0));

        assert_eq!(parse_hex("+1000"), Err(ParseHexError::Sign));
        assert_eq!(parse_hex("-1000"), Err(ParseHexError::Sign));
        assert!(matches!(parse_hex("0x1000"), Err(ParseHexError::Int(_))));
        assert!(matches!(parse_hex(""), Err(ParseHexError::Int(_))));
    }
}
