//! Panel profile types
//!
//! A [`PanelProfile`] is the immutable parameter record the driver programs
//! into the chip during initialization. Profiles are usually `const` items
//! built with [`PanelProfile::new`] from the porch values in a panel
//! datasheet; the derived cycle/offset/sync registers are computed once.

use crate::{ChipId, PinDrive};

/// System clock assumed when a profile does not set a frequency.
pub const DEFAULT_SYSTEM_CLOCK_HZ: u32 = 60_000_000;

/// Clock source for the EVE PLL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal relaxation oscillator
    #[default]
    Internal,
    /// External 12 MHz crystal or clock
    External,
}

/// PLL multiplier passed with the `CLKSEL` host command.
///
/// Multipliers of 4 and up also set the high PLL range bit (`0x40`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSelect {
    /// Chip default (60 MHz on FT81x, 72 MHz on BT817/8 after frequency setup)
    #[default]
    Default = 0x00,
    /// 2 × 12 MHz
    X2 = 0x02,
    /// 3 × 12 MHz
    X3 = 0x03,
    /// 4 × 12 MHz
    X4 = 0x44,
    /// 5 × 12 MHz
    X5 = 0x45,
    /// 6 × 12 MHz
    X6 = 0x46,
    /// 7 × 12 MHz
    X7 = 0x47,
}

impl ClockSelect {
    /// Parameter byte for the host command.
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Timing axis, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Horizontal (pixels per line)
    Horizontal,
    /// Vertical (lines per frame)
    Vertical,
}

/// Errors from validating panel parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileError {
    /// Active width or height is zero
    ZeroSize(Axis),
    /// A pixel clock divisor of 0 never starts the LCD
    ZeroPixelClock,
    /// Porches plus active area do not fit the 16-bit cycle register
    Overflow(Axis),
    /// Pin drive byte does not name a pin group
    InvalidPinDrive(u8),
    /// Pin drive table has more entries than fit the destination
    PinDriveTableFull,
    /// Profile name is longer than the configuration allows
    NameTooLong,
}

#[cfg(feature = "std")]
impl std::error::Error for ProfileError {}

impl core::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let axis = |a: &Axis| match a {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        };
        match self {
            Self::ZeroSize(a) => write!(f, "{} active size is zero", axis(a)),
            Self::ZeroPixelClock => write!(f, "pixel clock divisor is zero"),
            Self::Overflow(a) => write!(f, "{} cycle does not fit in 16 bits", axis(a)),
            Self::InvalidPinDrive(b) => write!(f, "invalid pin drive entry {b:#04x}"),
            Self::PinDriveTableFull => write!(f, "pin drive table is full"),
            Self::NameTooLong => write!(f, "panel name is too long"),
        }
    }
}

/// Porch-level timing description of a panel, as found in datasheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PanelTiming {
    /// Active width in pixels
    pub width: u16,
    /// Horizontal front porch
    pub h_front_porch: u16,
    /// Horizontal sync pulse width
    pub h_sync_width: u16,
    /// Horizontal back porch
    pub h_back_porch: u16,
    /// Extra pixel clocks per line
    pub h_padding: u16,
    /// Active height in lines
    pub height: u16,
    /// Vertical front porch
    pub v_front_porch: u16,
    /// Vertical sync pulse lines
    pub v_sync_width: u16,
    /// Vertical back porch
    pub v_back_porch: u16,
    /// Extra lines per frame
    pub v_padding: u16,
    /// Pixel clock divisor (system clock / pclk)
    pub pclk: u8,
    /// Pixel clock polarity: 1 clocks data on the falling edge
    #[cfg_attr(feature = "serde", serde(default = "default_pclk_pol"))]
    pub pclk_pol: u8,
    /// RGB output pin order
    #[cfg_attr(feature = "serde", serde(default))]
    pub swizzle: u8,
}

#[cfg(feature = "serde")]
fn default_pclk_pol() -> u8 {
    1
}

impl PanelTiming {
    /// Check that the timing produces a usable profile.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.width == 0 {
            return Err(ProfileError::ZeroSize(Axis::Horizontal));
        }
        if self.height == 0 {
            return Err(ProfileError::ZeroSize(Axis::Vertical));
        }
        if self.pclk == 0 {
            return Err(ProfileError::ZeroPixelClock);
        }
        checked_sum(&[
            self.h_front_porch,
            self.h_sync_width,
            self.h_back_porch,
            self.width,
            self.h_padding,
        ])
        .ok_or(ProfileError::Overflow(Axis::Horizontal))?;
        checked_sum(&[
            self.v_front_porch,
            self.v_sync_width,
            self.v_back_porch,
            self.height,
            self.v_padding,
        ])
        .ok_or(ProfileError::Overflow(Axis::Vertical))?;
        Ok(())
    }
}

fn checked_sum(parts: &[u16]) -> Option<u16> {
    parts.iter().try_fold(0u16, |acc, &p| acc.checked_add(p))
}

/// Timing and electrical parameters of one physical panel.
///
/// Profiles are borrowed by the driver for its whole lifetime, so a single
/// `const` profile can serve several chips driving identical panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanelProfile<'a> {
    /// Panel name (e.g., "Crystalfontz CFA800480E3")
    pub name: &'a str,
    /// Internal oscillator or external crystal
    pub clock_source: ClockSource,
    /// PLL multiplier
    pub clock_select: ClockSelect,
    /// Chip expected on the bus, or [`ChipId::Any`]
    pub chip_id: ChipId,
    /// System clock in Hz stored in `REG_FREQUENCY`; 0 leaves the default
    pub frequency: u32,
    /// 10 mA (true) or 5 mA drive on the LCD pins
    pub lcd_drive_10ma: bool,
    /// RGB clock spreading
    pub cspread: bool,
    /// Output dithering
    pub dither: bool,
    /// `REG_OUTBITS` value (3 bits per colour); 0 keeps the chip default
    pub outbits: u16,

    /// Active width
    pub hsize: u16,
    /// Total pixel clocks per line
    pub hcycle: u16,
    /// Start of the active line
    pub hoffset: u16,
    /// Start of HSYNC
    pub hsync0: u16,
    /// End of HSYNC
    pub hsync1: u16,

    /// Active height
    pub vsize: u16,
    /// Total lines per frame
    pub vcycle: u16,
    /// Start of the active frame
    pub voffset: u16,
    /// Start of VSYNC
    pub vsync0: u16,
    /// End of VSYNC
    pub vsync1: u16,

    /// RGB output pin order
    pub swizzle: u8,
    /// Pixel clock polarity
    pub pclk_pol: u8,
    /// Pixel clock divisor; written last during initialization
    pub pclk: u8,

    /// Drive strength overrides, applied in order
    pub pin_drive: &'a [PinDrive],
}

impl<'a> PanelProfile<'a> {
    /// Build a profile from porch values.
    ///
    /// Per axis: `cycle = fp + sync + bp + active + pad`,
    /// `offset = fp + sync + bp`, `sync0 = fp`, `sync1 = fp + sync`.
    ///
    /// The sums wrap on overflow; use [`PanelProfile::from_timing`] for
    /// untrusted values.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        width: u16,
        h_front_porch: u16,
        h_sync_width: u16,
        h_back_porch: u16,
        h_padding: u16,
        height: u16,
        v_front_porch: u16,
        v_sync_width: u16,
        v_back_porch: u16,
        v_padding: u16,
        pclk: u8,
    ) -> Self {
        let hsync1 = h_front_porch.wrapping_add(h_sync_width);
        let hoffset = hsync1.wrapping_add(h_back_porch);
        let vsync1 = v_front_porch.wrapping_add(v_sync_width);
        let voffset = vsync1.wrapping_add(v_back_porch);

        Self {
            name: "custom",
            clock_source: ClockSource::Internal,
            clock_select: ClockSelect::Default,
            chip_id: ChipId::Any,
            frequency: 0,
            lcd_drive_10ma: false,
            cspread: false,
            dither: false,
            outbits: 0,
            hsize: width,
            hcycle: hoffset.wrapping_add(width).wrapping_add(h_padding),
            hoffset,
            hsync0: h_front_porch,
            hsync1,
            vsize: height,
            vcycle: voffset.wrapping_add(height).wrapping_add(v_padding),
            voffset,
            vsync0: v_front_porch,
            vsync1,
            swizzle: 0,
            pclk_pol: 1,
            pclk,
            pin_drive: &[],
        }
    }

    /// Build a profile from a validated [`PanelTiming`].
    pub fn from_timing(timing: &PanelTiming) -> Result<Self, ProfileError> {
        timing.validate()?;
        Ok(Self::new(
            timing.width,
            timing.h_front_porch,
            timing.h_sync_width,
            timing.h_back_porch,
            timing.h_padding,
            timing.height,
            timing.v_front_porch,
            timing.v_sync_width,
            timing.v_back_porch,
            timing.v_padding,
            timing.pclk,
        )
        .with_pclk_pol(timing.pclk_pol)
        .with_swizzle(timing.swizzle))
    }

    /// Set the display name.
    pub const fn with_name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    /// Use the external clock input.
    pub const fn with_external_clock(mut self) -> Self {
        self.clock_source = ClockSource::External;
        self
    }

    /// Set the PLL multiplier.
    pub const fn with_clock_select(mut self, clock_select: ClockSelect) -> Self {
        self.clock_select = clock_select;
        self
    }

    /// Require a specific chip.
    pub const fn with_chip_id(mut self, chip_id: ChipId) -> Self {
        self.chip_id = chip_id;
        self
    }

    /// Store a system clock frequency in `REG_FREQUENCY`.
    pub const fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Drive the LCD pins with 10 mA instead of 5 mA.
    pub const fn with_lcd_drive_10ma(mut self, enable: bool) -> Self {
        self.lcd_drive_10ma = enable;
        self
    }

    /// Enable RGB clock spreading.
    pub const fn with_cspread(mut self, enable: bool) -> Self {
        self.cspread = enable;
        self
    }

    /// Enable dithering.
    pub const fn with_dither(mut self, enable: bool) -> Self {
        self.dither = enable;
        self
    }

    /// Set `REG_OUTBITS` (`0b0000_000R_RRGG_GBBB`).
    pub const fn with_outbits(mut self, outbits: u16) -> Self {
        self.outbits = outbits;
        self
    }

    /// Set the RGB swizzle.
    pub const fn with_swizzle(mut self, swizzle: u8) -> Self {
        self.swizzle = swizzle;
        self
    }

    /// Set the pixel clock polarity.
    pub const fn with_pclk_pol(mut self, pclk_pol: u8) -> Self {
        self.pclk_pol = pclk_pol;
        self
    }

    /// Attach a pin drive table.
    pub const fn with_pin_drive(mut self, table: &'a [PinDrive]) -> Self {
        self.pin_drive = table;
        self
    }

    /// Horizontal centre of the active area in pixels.
    pub const fn hcenter(&self) -> u16 {
        self.hsize / 2
    }

    /// Vertical centre of the active area in pixels.
    pub const fn vcenter(&self) -> u16 {
        self.vsize / 2
    }

    /// Expected frame rate in millihertz, or `None` when the pixel clock is
    /// off or the cycle counts are zero.
    pub fn refresh_millihertz(&self) -> Option<u32> {
        let sysclk = if self.frequency == 0 {
            DEFAULT_SYSTEM_CLOCK_HZ
        } else {
            self.frequency
        };
        let pclk_hz = u64::from(sysclk).checked_div(u64::from(self.pclk))?;
        let clocks_per_frame = u64::from(self.hcycle).checked_mul(u64::from(self.vcycle))?;
        let mhz = pclk_hz.checked_mul(1000)?.checked_div(clocks_per_frame)?;
        u32::try_from(mhz).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn timing_480x128() -> PanelTiming {
        PanelTiming {
            width: 480,
            h_front_porch: 24,
            h_sync_width: 11,
            h_back_porch: 6,
            h_padding: 521,
            height: 128,
            v_front_porch: 4,
            v_sync_width: 1,
            v_back_porch: 3,
            v_padding: 1,
            pclk: 7,
            pclk_pol: 1,
            swizzle: 0,
        }
    }

    #[test]
    fn test_derived_horizontal_timing() {
        let p = PanelProfile::from_timing(&timing_480x128()).unwrap();
        assert_eq!(p.hcycle, 24 + 11 + 6 + 480 + 521);
        assert_eq!(p.hcycle, 1042);
        assert_eq!(p.hoffset, 41);
        assert_eq!(p.hsync0, 24);
        assert_eq!(p.hsync1, 35);
    }

    #[test]
    fn test_derived_vertical_timing() {
        let p = PanelProfile::from_timing(&timing_480x128()).unwrap();
        assert_eq!(p.vcycle, 4 + 1 + 3 + 128 + 1);
        assert_eq!(p.voffset, 8);
        assert_eq!(p.vsync0, 4);
        assert_eq!(p.vsync1, 5);
    }

    #[test]
    fn test_defaults() {
        let p = PanelProfile::new(320, 1, 1, 1, 0, 240, 1, 1, 1, 0, 5);
        assert_eq!(p.clock_source, ClockSource::Internal);
        assert_eq!(p.clock_select, ClockSelect::Default);
        assert_eq!(p.chip_id, ChipId::Any);
        assert_eq!(p.frequency, 0);
        assert_eq!(p.pclk_pol, 1);
        assert_eq!(p.swizzle, 0);
        assert_eq!(p.outbits, 0);
        assert!(p.pin_drive.is_empty());
        assert_eq!((p.hcenter(), p.vcenter()), (160, 120));
    }

    #[test]
    fn test_validation_errors() {
        let mut t = timing_480x128();
        t.pclk = 0;
        assert_eq!(t.validate(), Err(ProfileError::ZeroPixelClock));

        let mut t = timing_480x128();
        t.height = 0;
        assert_eq!(t.validate(), Err(ProfileError::ZeroSize(Axis::Vertical)));

        let mut t = timing_480x128();
        t.h_padding = u16::MAX;
        assert_eq!(
            PanelProfile::from_timing(&t),
            Err(ProfileError::Overflow(Axis::Horizontal))
        );
    }

    #[test]
    fn test_refresh_rate() {
        // 60 MHz / 7 / (1042 × 137) ≈ 60.04 Hz
        let p = PanelProfile::from_timing(&timing_480x128()).unwrap();
        let mhz = p.refresh_millihertz().unwrap();
        assert!((59_000..61_000).contains(&mhz), "got {mhz}");

        let off = p.with_pclk_pol(0);
        assert!(off.refresh_millihertz().is_some());
        let mut stopped = p;
        stopped.pclk = 0;
        assert_eq!(stopped.refresh_millihertz(), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ProfileError::Overflow(Axis::Vertical).to_string(),
            "vertical cycle does not fit in 16 bits"
        );
        assert_eq!(
            ProfileError::InvalidPinDrive(0x14).to_string(),
            "invalid pin drive entry 0x14"
        );
    }
}
