//! Wrapping ring-buffer indices
//!
//! Both EVE memories the host streams into are rings whose size is a power
//! of two: the display list (`RAM_DL`, 8 KiB) and the co-processor FIFO
//! (`RAM_CMD`, 4 KiB). A [`WrappingIndex`] keeps an offset into one of them
//! and masks on every mutation, so it can never leave `[0, M)`.
//!
//! ```
//! use eve_driver::CmdIndex;
//!
//! let idx = CmdIndex::new(4092) + 8;
//! assert_eq!(idx.value(), 4);
//! assert_eq!(idx - CmdIndex::new(4092), 8);
//! ```
//!
//! A modulus that is not a power of two is rejected at compile time:
//!
//! ```compile_fail
//! let _ = eve_driver::WrappingIndex::<1000>::new(0);
//! ```

use core::ops::{Add, AddAssign, Sub};

/// Offset into a ring of `M` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WrappingIndex<const M: u16>(u16);

/// Index into `RAM_DL`.
pub type DlIndex = WrappingIndex<8192>;

/// Index into `RAM_CMD`.
pub type CmdIndex = WrappingIndex<4096>;

impl<const M: u16> WrappingIndex<M> {
    const MASK: u16 = {
        assert!(M.is_power_of_two(), "ring size must be a power of two");
        M.wrapping_sub(1)
    };

    /// Ring size in bytes.
    pub const SIZE: u16 = M;

    /// Create an index; `initial` is reduced modulo `M`.
    pub const fn new(initial: u16) -> Self {
        Self(initial & Self::MASK)
    }

    /// Index moved forward by `delta` (backwards when negative).
    #[must_use]
    pub const fn add(self, delta: i16) -> Self {
        Self(self.0.wrapping_add_signed(delta) & Self::MASK)
    }

    /// Index moved backwards by `delta` (forwards when negative).
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // two's complement reinterpretation is the point
    pub const fn sub(self, delta: i16) -> Self {
        Self(self.0.wrapping_sub(delta as u16) & Self::MASK)
    }

    /// Current offset, always below `M`.
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl<const M: u16> Add<u16> for WrappingIndex<M> {
    type Output = Self;

    fn add(self, rhs: u16) -> Self {
        Self(self.0.wrapping_add(rhs) & Self::MASK)
    }
}

impl<const M: u16> AddAssign<u16> for WrappingIndex<M> {
    fn add_assign(&mut self, rhs: u16) {
        *self = *self + rhs;
    }
}

impl<const M: u16> Sub<u16> for WrappingIndex<M> {
    type Output = Self;

    fn sub(self, rhs: u16) -> Self {
        Self(self.0.wrapping_sub(rhs) & Self::MASK)
    }
}

/// Forward distance from `rhs` to `self`, in `[0, M)`.
impl<const M: u16> Sub for WrappingIndex<M> {
    type Output = u16;

    fn sub(self, rhs: Self) -> u16 {
        self.0.wrapping_sub(rhs.0) & Self::MASK
    }
}

impl<const M: u16> From<WrappingIndex<M>> for u16 {
    fn from(index: WrappingIndex<M>) -> u16 {
        index.0
    }
}

impl<const M: u16> From<WrappingIndex<M>> for u32 {
    fn from(index: WrappingIndex<M>) -> u32 {
        u32::from(index.0)
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_masks_initial_value() {
        assert_eq!(CmdIndex::new(4096).value(), 0);
        assert_eq!(CmdIndex::new(4100).value(), 4);
        assert_eq!(DlIndex::new(8191).value(), 8191);
    }

    #[test]
    fn test_signed_deltas() {
        let idx = CmdIndex::new(0);
        assert_eq!(idx.add(-4).value(), 4092);
        assert_eq!(idx.sub(4).value(), 4092);
        assert_eq!(idx.sub(-4).value(), 4);
        assert_eq!(CmdIndex::new(10).add(i16::MIN).value(), 10);
    }

    #[test]
    fn test_operators() {
        let mut idx = DlIndex::new(8188);
        idx += 4;
        assert_eq!(idx.value(), 0);
        assert_eq!((idx - 4u16).value(), 8188);
        assert_eq!(DlIndex::new(4) - DlIndex::new(8188), 8);
    }

    proptest! {
        #[test]
        fn prop_value_always_in_range(start in any::<u16>(), deltas in proptest::collection::vec(any::<i16>(), 0..32)) {
            let mut idx = CmdIndex::new(start);
            for d in deltas {
                idx = idx.add(d);
                prop_assert!(idx.value() < 4096);
            }
        }

        #[test]
        fn prop_matches_modular_arithmetic(start in any::<u16>(), delta in any::<i16>()) {
            let expected = (i32::from(start) + i32::from(delta)).rem_euclid(8192);
            prop_assert_eq!(i32::from(DlIndex::new(start).add(delta).value()), expected);
            let expected = (i32::from(start) - i32::from(delta)).rem_euclid(8192);
            prop_assert_eq!(i32::from(DlIndex::new(start).sub(delta).value()), expected);
        }

        #[test]
        fn prop_distance_inverts_add(start in any::<u16>(), step in 0u16..4096) {
            let a = CmdIndex::new(start);
            prop_assert_eq!((a + step) - a, step);
        }
    }
}
