//! Crystalfontz EVE panel profiles
//!
//! Timing values come from the module datasheets.

use crate::{ChipId, ClockSelect, DriveStrength, PanelProfile, Pin, PinDrive};

/// Crystalfontz CFA480128Ex-039Tx (480×128, FT81x)
///
/// Bar-type display run from the internal oscillator.
/// - Pixel clock: 60 MHz / 7 ≈ 8.57 MHz
/// - Refresh: ≈ 60 Hz
pub const CFA480128: PanelProfile<'static> = PanelProfile::new(
    480, 24, 11, 6, 521, // width, front porch, sync width, back porch, padding
    128, 4, 1, 3, 1, // height, front porch, sync lines, back porch, padding
    7,
)
.with_name("CFA480128Ex-039Tx");

/// Drive strengths for the CFA800480E3 family.
///
/// PCLK needs the high setting at 36 MHz; the flash clock runs at medium.
pub const CFA800480_PIN_DRIVE: [PinDrive; 22] = [
    PinDrive::new(Pin::Gpio0, DriveStrength::Low),
    PinDrive::new(Pin::Gpio1, DriveStrength::Low),
    PinDrive::new(Pin::Gpio2, DriveStrength::Low),
    PinDrive::new(Pin::Gpio3, DriveStrength::Low),
    PinDrive::new(Pin::Disp, DriveStrength::Low),
    PinDrive::new(Pin::De, DriveStrength::Low),
    PinDrive::new(Pin::VsyncHsync, DriveStrength::Low),
    PinDrive::new(Pin::Pclk, DriveStrength::High),
    PinDrive::new(Pin::Backlight, DriveStrength::Low),
    PinDrive::new(Pin::Rgb, DriveStrength::Low),
    PinDrive::new(Pin::AudioL, DriveStrength::Low),
    PinDrive::new(Pin::IntN, DriveStrength::Low),
    PinDrive::new(Pin::CtpRstN, DriveStrength::Low),
    PinDrive::new(Pin::CtpScl, DriveStrength::Low),
    PinDrive::new(Pin::CtpSda, DriveStrength::Low),
    PinDrive::new(Pin::Spi, DriveStrength::Low),
    PinDrive::new(Pin::SpimSclk, DriveStrength::Medium),
    PinDrive::new(Pin::SpimSsN, DriveStrength::Low),
    PinDrive::new(Pin::SpimMiso, DriveStrength::Low),
    PinDrive::new(Pin::SpimMosi, DriveStrength::Low),
    PinDrive::new(Pin::SpimIo2, DriveStrength::Low),
    PinDrive::new(Pin::SpimIo3, DriveStrength::Low),
];

/// Crystalfontz CFA800480E3-050Sx (800×480, BT817)
///
/// 5" module with capacitive touch.
/// - System clock: 6 × 12 MHz = 72 MHz
/// - Pixel clock: 72 MHz / 2 = 36 MHz
/// - Refresh: ≈ 72 Hz
///
/// # Known Quirks
/// - Requires the external crystal multiplier; the internal oscillator
///   cannot reach 72 MHz.
pub const CFA800480: PanelProfile<'static> = PanelProfile::new(
    800, 8, 4, 8, 178, // width, front porch, sync width, back porch, padding
    480, 8, 4, 8, 1, // height, front porch, sync lines, back porch, padding
    2,
)
.with_name("CFA800480E3-050Sx")
.with_chip_id(ChipId::Bt817)
.with_external_clock()
.with_clock_select(ClockSelect::X6)
.with_frequency(72_000_000)
.with_pin_drive(&CFA800480_PIN_DRIVE);
