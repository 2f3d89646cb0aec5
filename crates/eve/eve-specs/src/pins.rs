//! Pin drive strength and power-down state
//!
//! EVE3/EVE4 parts accept a `PINDRIVE` host command per pin group, with the
//! parameter byte encoded as `(pin << 2) | strength`. The largest pin group
//! is `0x19`, so an encoded entry never reaches [`PIN_DRIVE_END`].

use crate::ProfileError;

/// Terminator used by raw, byte-encoded pin drive tables.
pub const PIN_DRIVE_END: u8 = 0xFF;

/// Pin group addressed by the `PINDRIVE` and `PIN_PD_STATE` host commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    /// GPIO0
    Gpio0 = 0x00,
    /// GPIO1
    Gpio1 = 0x01,
    /// GPIO2
    Gpio2 = 0x02,
    /// GPIO3
    Gpio3 = 0x03,
    /// DISP
    Disp = 0x08,
    /// DE
    De = 0x09,
    /// VSYNC and HSYNC
    VsyncHsync = 0x0A,
    /// PCLK
    Pclk = 0x0B,
    /// BACKLIGHT
    Backlight = 0x0C,
    /// R, G, B
    Rgb = 0x0D,
    /// AUDIO_L
    AudioL = 0x0E,
    /// INT_N
    IntN = 0x0F,
    /// CTP_RST_N
    CtpRstN = 0x10,
    /// CTP_SCL
    CtpScl = 0x11,
    /// CTP_SDA
    CtpSda = 0x12,
    /// SPI MISO, MOSI, IO2, IO3
    Spi = 0x13,
    /// SPIM_SCLK
    SpimSclk = 0x14,
    /// SPIM_SS_N
    SpimSsN = 0x15,
    /// SPIM_MISO
    SpimMiso = 0x16,
    /// SPIM_MOSI
    SpimMosi = 0x17,
    /// SPIM_IO2
    SpimIo2 = 0x18,
    /// SPIM_IO3
    SpimIo3 = 0x19,
}

impl Pin {
    const ALL: [Pin; 22] = [
        Pin::Gpio0,
        Pin::Gpio1,
        Pin::Gpio2,
        Pin::Gpio3,
        Pin::Disp,
        Pin::De,
        Pin::VsyncHsync,
        Pin::Pclk,
        Pin::Backlight,
        Pin::Rgb,
        Pin::AudioL,
        Pin::IntN,
        Pin::CtpRstN,
        Pin::CtpScl,
        Pin::CtpSda,
        Pin::Spi,
        Pin::SpimSclk,
        Pin::SpimSsN,
        Pin::SpimMiso,
        Pin::SpimMosi,
        Pin::SpimIo2,
        Pin::SpimIo3,
    ];

    /// Pin group number as sent to the chip.
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Look up a pin group by number.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|pin| pin.raw() == raw)
    }
}

/// Output drive strength.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveStrength {
    /// 5 mA / 1.2 mA depending on pin group
    Low = 0,
    /// 10 mA / 2.4 mA
    Medium = 1,
    /// 15 mA / 3.6 mA
    High = 2,
    /// 20 mA / 4.8 mA
    Maximum = 3,
}

/// State of a pin while the chip is powered down (`PIN_PD_STATE`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PdState {
    /// High impedance
    Float = 0,
    /// Weak pull-down
    PullDown = 1,
    /// Weak pull-up
    PullUp = 2,
}

/// One entry in a panel's pin drive table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinDrive {
    /// Pin group
    pub pin: Pin,
    /// Drive strength for the group
    pub strength: DriveStrength,
}

impl PinDrive {
    /// Create a new entry.
    pub const fn new(pin: Pin, strength: DriveStrength) -> Self {
        Self { pin, strength }
    }

    /// Parameter byte for the `PINDRIVE` host command.
    pub const fn raw(self) -> u8 {
        self.pin.raw().wrapping_shl(2) | self.strength as u8
    }

    /// Decode a parameter byte.
    pub fn from_raw(raw: u8) -> Option<Self> {
        let strength = match raw & 0b11 {
            0 => DriveStrength::Low,
            1 => DriveStrength::Medium,
            2 => DriveStrength::High,
            _ => DriveStrength::Maximum,
        };
        Pin::from_raw(raw.wrapping_shr(2)).map(|pin| Self { pin, strength })
    }

    /// Parse a byte table terminated by [`PIN_DRIVE_END`].
    ///
    /// Bytes after the terminator are ignored. A table without a terminator
    /// is read to its end.
    pub fn table_from_raw<const N: usize>(
        raw: &[u8],
    ) -> Result<heapless::Vec<PinDrive, N>, ProfileError> {
        let mut table = heapless::Vec::new();
        for &byte in raw.iter().take_while(|&&b| b != PIN_DRIVE_END) {
            let entry = PinDrive::from_raw(byte).ok_or(ProfileError::InvalidPinDrive(byte))?;
            table
                .push(entry)
                .map_err(|_| ProfileError::PinDriveTableFull)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_matches_host_command_layout() {
        assert_eq!(PinDrive::new(Pin::Gpio0, DriveStrength::Low).raw(), 0x00);
        assert_eq!(PinDrive::new(Pin::Pclk, DriveStrength::High).raw(), 0x2E);
        assert_eq!(
            PinDrive::new(Pin::SpimSclk, DriveStrength::Medium).raw(),
            0x51
        );
    }

    #[test]
    fn test_no_entry_collides_with_terminator() {
        for pin in Pin::ALL {
            let entry = PinDrive::new(pin, DriveStrength::Maximum);
            assert_ne!(entry.raw(), PIN_DRIVE_END);
            assert_eq!(PinDrive::from_raw(entry.raw()), Some(entry));
        }
    }

    #[test]
    fn test_table_stops_at_terminator() {
        let table =
            PinDrive::table_from_raw::<4>(&[0x2E, 0x51, PIN_DRIVE_END, 0x00]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.first().map(|e| e.pin), Some(Pin::Pclk));
    }

    #[test]
    fn test_table_rejects_unknown_pin() {
        // Pin group 0x05 does not exist
        assert_eq!(
            PinDrive::table_from_raw::<4>(&[0x14, PIN_DRIVE_END]),
            Err(ProfileError::InvalidPinDrive(0x14))
        );
    }

    #[test]
    fn test_table_capacity() {
        assert_eq!(
            PinDrive::table_from_raw::<1>(&[0x00, 0x04]),
            Err(ProfileError::PinDriveTableFull)
        );
    }
}
