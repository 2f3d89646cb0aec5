//! Owned panel configuration, loadable from JSON or TOML
//!
//! [`PanelProfile`] borrows its name and pin drive table so it can live in
//! flash as a `const`. Configuration files need owned storage instead; this
//! module keeps it in fixed-capacity `heapless` containers so loading a
//! panel does not require an allocator.

use serde::{Deserialize, Serialize};

use crate::{ChipId, ClockSelect, ClockSource, PanelProfile, PanelTiming, PinDrive, ProfileError};

/// Maximum length of a configured panel name.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum number of pin drive entries in a configuration.
pub const MAX_PIN_DRIVE: usize = 32;

/// Deserializable panel description.
///
/// ```
/// # use eve_specs::PanelConfig;
/// let json = r#"{
///     "name": "CFA480128",
///     "timing": {
///         "width": 480, "h_front_porch": 24, "h_sync_width": 11,
///         "h_back_porch": 6, "h_padding": 521,
///         "height": 128, "v_front_porch": 4, "v_sync_width": 1,
///         "v_back_porch": 3, "v_padding": 1,
///         "pclk": 7
///     }
/// }"#;
/// let config: PanelConfig = serde_json::from_str(json).unwrap();
/// let profile = config.profile().unwrap();
/// assert_eq!(profile.hcycle, 1042);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PanelConfig {
    /// Panel name
    pub name: heapless::String<MAX_NAME_LEN>,
    /// Porch-level timing
    pub timing: PanelTiming,
    /// Oscillator source
    #[serde(default)]
    pub clock_source: ClockSource,
    /// PLL multiplier
    #[serde(default)]
    pub clock_select: ClockSelect,
    /// Expected chip
    #[serde(default)]
    pub chip_id: ChipId,
    /// System clock in Hz; 0 keeps the chip default
    #[serde(default)]
    pub frequency: u32,
    /// 10 mA LCD pin drive
    #[serde(default)]
    pub lcd_drive_10ma: bool,
    /// RGB clock spreading
    #[serde(default)]
    pub cspread: bool,
    /// Output dithering
    #[serde(default)]
    pub dither: bool,
    /// `REG_OUTBITS`; 0 keeps the chip default
    #[serde(default)]
    pub outbits: u16,
    /// Pin drive strength overrides
    #[serde(default)]
    pub pin_drive: heapless::Vec<PinDrive, MAX_PIN_DRIVE>,
}

impl PanelConfig {
    /// Create a configuration with default clock and chip settings.
    pub fn new(name: &str, timing: PanelTiming) -> Result<Self, ProfileError> {
        let name = heapless::String::try_from(name).map_err(|_| ProfileError::NameTooLong)?;
        Ok(Self {
            name,
            timing,
            clock_source: ClockSource::default(),
            clock_select: ClockSelect::default(),
            chip_id: ChipId::default(),
            frequency: 0,
            lcd_drive_10ma: false,
            cspread: false,
            dither: false,
            outbits: 0,
            pin_drive: heapless::Vec::new(),
        })
    }

    /// Check the timing for zero sizes, a stopped clock and overflow.
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.timing.validate()
    }

    /// Build a profile borrowing this configuration's name and pin table.
    pub fn profile(&self) -> Result<PanelProfile<'_>, ProfileError> {
        let mut profile = PanelProfile::from_timing(&self.timing)?
            .with_name(self.name.as_str())
            .with_clock_select(self.clock_select)
            .with_chip_id(self.chip_id)
            .with_frequency(self.frequency)
            .with_lcd_drive_10ma(self.lcd_drive_10ma)
            .with_cspread(self.cspread)
            .with_dither(self.dither)
            .with_outbits(self.outbits)
            .with_pin_drive(self.pin_drive.as_slice());
        profile.clock_source = self.clock_source;
        Ok(profile)
    }
}
