//! Edge detection events and the hardware trait that arms them.

use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Set of GPIO interrupt conditions.
///
/// Bit values follow the RP2040 `IO_BANK0` interrupt layout, so a raw
/// event word read from the interrupt status register can be wrapped
/// directly with [`EdgeMask::from_bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeMask(u8);

impl EdgeMask {
    /// No condition
    pub const NONE: Self = Self(0);
    /// Pin held low
    pub const LEVEL_LOW: Self = Self(0x1);
    /// Pin held high
    pub const LEVEL_HIGH: Self = Self(0x2);
    /// High to low transition (button press on a pulled-up input)
    pub const EDGE_FALL: Self = Self(0x4);
    /// Low to high transition
    pub const EDGE_RISE: Self = Self(0x8);
    /// Both transitions
    pub const EDGE_BOTH: Self = Self(0x4 | 0x8);

    /// Wrap a raw event word, discarding unknown bits.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_bits(bits: u32) -> Self {
        Self((bits & 0xF) as u8)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every condition in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for EdgeMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EdgeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for EdgeMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Platform edge-detection subsystem
///
/// Implement this trait on top of your HAL's GPIO interrupt registers.
/// The platform's GPIO interrupt vector is expected to read the pending
/// pin and event word and forward them to
/// [`DispatchManager::dispatch`](crate::dispatch::DispatchManager::dispatch).
pub trait EdgeDetector {
    /// Arm or disarm the trigger conditions in `events` for `pin`.
    fn set_trigger_enabled(&mut self, pin: u8, events: EdgeMask, enabled: bool);

    /// Unmask or mask the GPIO bank interrupt line at the interrupt controller.
    fn enable_interrupt_line(&mut self, enabled: bool);
}
