//! Chip variants of the EVE family
//!
//! Every FT81x / BT81x part reports a 32-bit identifier at `0x0C0000` after
//! boot. The variants differ in two ways that matter to the host driver:
//!
//! - **Touch engine**: resistive and capacitive parts map *different*
//!   registers onto the same addresses (e.g. `0x302104` is `REG_TOUCH_MODE`
//!   on a resistive part and `REG_CTOUCH_MODE` on a capacitive one).
//! - **Generation**: EVE3 (BT815/6) and EVE4 (BT817/8) add co-processor
//!   commands and registers that older parts silently misinterpret.
//!
//! A profile that uses [`ChipId::Any`] disables both checks.

/// Expected chip identifier, or a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipId {
    /// Accept any chip; identifier is not read during initialization.
    #[default]
    Any,
    /// FT810: EVE2, resistive touch, 18-bit RGB.
    Ft810,
    /// FT811: EVE2, capacitive touch, 18-bit RGB.
    Ft811,
    /// FT812: EVE2, resistive touch, 24-bit RGB.
    Ft812,
    /// FT813: EVE2, capacitive touch, 24-bit RGB.
    Ft813,
    /// BT815: EVE3, capacitive touch, QSPI flash.
    Bt815,
    /// BT816: EVE3, resistive touch, QSPI flash.
    Bt816,
    /// BT817: EVE4, capacitive touch.
    Bt817,
    /// BT818: EVE4, resistive touch.
    Bt818,
}

/// EVE silicon generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Generation {
    /// FT810..FT813
    Eve2,
    /// BT815, BT816
    Eve3,
    /// BT817, BT818
    Eve4,
}

/// Touch engine built into the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEngine {
    /// 4-wire resistive touch (single point, pressure reading).
    Resistive,
    /// I²C capacitive touch controller (up to five points).
    Capacitive,
}

impl ChipId {
    /// All concrete chip identifiers.
    pub const ALL: [ChipId; 8] = [
        ChipId::Ft810,
        ChipId::Ft811,
        ChipId::Ft812,
        ChipId::Ft813,
        ChipId::Bt815,
        ChipId::Bt816,
        ChipId::Bt817,
        ChipId::Bt818,
    ];

    /// Value read back from `REG_CHIP_ID` (`0x0C0000`), or 0 for [`ChipId::Any`].
    pub const fn raw(self) -> u32 {
        match self {
            ChipId::Any => 0,
            ChipId::Ft810 => 0x0001_1008,
            ChipId::Ft811 => 0x0001_1108,
            ChipId::Ft812 => 0x0001_1208,
            ChipId::Ft813 => 0x0001_1308,
            ChipId::Bt815 => 0x0001_1508,
            ChipId::Bt816 => 0x0001_1608,
            ChipId::Bt817 => 0x0001_1708,
            ChipId::Bt818 => 0x0001_1808,
        }
    }

    /// Map a raw identifier back to a concrete chip.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|chip| chip.raw() == raw)
    }

    /// Marketing name of the part.
    pub const fn name(self) -> &'static str {
        match self {
            ChipId::Any => "any",
            ChipId::Ft810 => "FT810",
            ChipId::Ft811 => "FT811",
            ChipId::Ft812 => "FT812",
            ChipId::Ft813 => "FT813",
            ChipId::Bt815 => "BT815",
            ChipId::Bt816 => "BT816",
            ChipId::Bt817 => "BT817",
            ChipId::Bt818 => "BT818",
        }
    }

    /// Silicon generation; `None` for the wildcard.
    pub const fn generation(self) -> Option<Generation> {
        match self {
            ChipId::Any => None,
            ChipId::Ft810 | ChipId::Ft811 | ChipId::Ft812 | ChipId::Ft813 => Some(Generation::Eve2),
            ChipId::Bt815 | ChipId::Bt816 => Some(Generation::Eve3),
            ChipId::Bt817 | ChipId::Bt818 => Some(Generation::Eve4),
        }
    }

    /// Which register set the touch addresses refer to; `None` for the wildcard.
    pub const fn touch_engine(self) -> Option<TouchEngine> {
        match self {
            ChipId::Any => None,
            ChipId::Ft810 | ChipId::Ft812 | ChipId::Bt816 | ChipId::Bt818 => {
                Some(TouchEngine::Resistive)
            }
            ChipId::Ft811 | ChipId::Ft813 | ChipId::Bt815 | ChipId::Bt817 => {
                Some(TouchEngine::Capacitive)
            }
        }
    }

    /// Number of RGB bits per channel the chip drives when `REG_OUTBITS` is 0.
    pub const fn default_bits_per_channel(self) -> Option<u8> {
        match self {
            ChipId::Any => None,
            ChipId::Ft810 | ChipId::Ft811 => Some(6),
            _ => Some(8),
        }
    }
}

impl Generation {
    /// Short label used in logs and tooling output.
    pub const fn name(self) -> &'static str {
        match self {
            Generation::Eve2 => "EVE2",
            Generation::Eve3 => "EVE3",
            Generation::Eve4 => "EVE4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ids_round_trip() {
        for chip in ChipId::ALL {
            assert_eq!(ChipId::from_raw(chip.raw()), Some(chip));
        }
        assert_eq!(ChipId::from_raw(0), None);
        assert_eq!(ChipId::from_raw(0x0001_1408), None);
    }

    #[test]
    fn test_raw_id_layout() {
        // Little-endian bytes at 0x0C0000: 08 1x 01 00
        assert_eq!(ChipId::Ft813.raw().to_le_bytes(), [0x08, 0x13, 0x01, 0x00]);
        assert_eq!(ChipId::Bt817.raw(), 0x0001_1708);
    }

    #[test]
    fn test_touch_engines() {
        assert_eq!(ChipId::Ft810.touch_engine(), Some(TouchEngine::Resistive));
        assert_eq!(ChipId::Ft813.touch_engine(), Some(TouchEngine::Capacitive));
        assert_eq!(ChipId::Bt815.touch_engine(), Some(TouchEngine::Capacitive));
        assert_eq!(ChipId::Bt818.touch_engine(), Some(TouchEngine::Resistive));
        assert_eq!(ChipId::Any.touch_engine(), None);
    }

    #[test]
    fn test_generations_are_ordered() {
        assert!(Generation::Eve2 < Generation::Eve3);
        assert!(Generation::Eve3 < Generation::Eve4);
        assert_eq!(ChipId::Bt816.generation(), Some(Generation::Eve3));
        assert_eq!(ChipId::Bt818.generation(), Some(Generation::Eve4));
        assert_eq!(ChipId::Any.generation(), None);
    }

    #[test]
    fn test_default_output_depth() {
        assert_eq!(ChipId::Ft811.default_bits_per_channel(), Some(6));
        assert_eq!(ChipId::Ft812.default_bits_per_channel(), Some(8));
    }
}
