//! Parameter types for display-list words, co-processor records and host
//! commands

/// Comparison for `ALPHA_FUNC` and `STENCIL_FUNC`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Func {
    /// Never pass
    Never = 0,
    /// Pass when less
    Less = 1,
    /// Pass when less or equal
    LEqual = 2,
    /// Pass when greater
    Greater = 3,
    /// Pass when greater or equal
    GEqual = 4,
    /// Pass when equal
    Equal = 5,
    /// Pass when not equal
    NotEqual = 6,
    /// Always pass
    Always = 7,
}

/// Graphics primitive for `BEGIN`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Primitive {
    /// Bitmaps
    Bitmaps = 1,
    /// Points
    Points = 2,
    /// Independent lines
    Lines = 3,
    /// Connected lines
    LineStrip = 4,
    /// Fill to the right of the strip
    EdgeStripR = 5,
    /// Fill to the left of the strip
    EdgeStripL = 6,
    /// Fill above the strip
    EdgeStripA = 7,
    /// Fill below the strip
    EdgeStripB = 8,
    /// Rectangles
    Rects = 9,
}

/// Bitmap pixel format.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum BitmapFormat {
    Argb1555 = 0,
    L1 = 1,
    L4 = 2,
    L8 = 3,
    Rgb332 = 4,
    Argb2 = 5,
    Argb4 = 6,
    Rgb565 = 7,
    Text8x8 = 9,
    TextVga = 10,
    Bargraph = 11,
    Paletted565 = 14,
    Paletted4444 = 15,
    Paletted8 = 16,
    L2 = 17,
    /// `BITMAP_EXT_FORMAT` only (BT81x)
    Argb8 = 0x20,
    /// Use `BITMAP_EXT_FORMAT` for the real format (BT81x)
    Glformat = 31,
    CompressedRgbaAstc4x4 = 37808,
    CompressedRgbaAstc5x4 = 37809,
    CompressedRgbaAstc5x5 = 37810,
    CompressedRgbaAstc6x5 = 37811,
    CompressedRgbaAstc6x6 = 37812,
    CompressedRgbaAstc8x5 = 37813,
    CompressedRgbaAstc8x6 = 37814,
    CompressedRgbaAstc8x8 = 37815,
    CompressedRgbaAstc10x5 = 37816,
    CompressedRgbaAstc10x6 = 37817,
    CompressedRgbaAstc10x8 = 37818,
    CompressedRgbaAstc10x10 = 37819,
    CompressedRgbaAstc12x10 = 37820,
    CompressedRgbaAstc12x12 = 37821,
}

/// Bitmap sampling filter.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Filter {
    /// Nearest neighbour
    Nearest = 0,
    /// Bilinear interpolation
    Bilinear = 1,
}

/// Bitmap wrap mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wrap {
    /// Transparent outside the bitmap
    Border = 0,
    /// Tile the bitmap
    Repeat = 1,
}

/// Blend factor for `BLEND_FUNC`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum BlendFunc {
    Zero = 0,
    One = 1,
    SrcAlpha = 2,
    DstAlpha = 3,
    OneMinusSrcAlpha = 4,
    OneMinusDstAlpha = 5,
}

/// Stencil action for `STENCIL_OP`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum StencilOp {
    Zero = 0,
    Keep = 1,
    Replace = 2,
    Incr = 3,
    Decr = 4,
    Invert = 5,
}

/// Source channel for `BITMAP_SWIZZLE` (BT81x).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Swizzle {
    Zero = 0,
    One = 1,
    Red = 2,
    Green = 3,
    Blue = 4,
    Alpha = 5,
}

/// Co-processor option flags.
///
/// Several names share a value because the chip interprets the bits per
/// command: [`Options::FLAT`] and [`Options::SIGNED`] are both `0x100`,
/// [`Options::OPT_3D`] and [`Options::RGB565`] are both 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Options(u16);

impl Options {
    /// No options
    pub const NONE: Self = Self(0);
    /// 3D look for widgets
    pub const OPT_3D: Self = Self(0);
    /// `LOADIMAGE` decodes to RGB565
    pub const RGB565: Self = Self(0);
    /// `LOADIMAGE` decodes to L8
    pub const MONO: Self = Self(1);
    /// Do not emit display-list commands
    pub const NODL: Self = Self(2);
    /// Synchronize video updates to the frame
    pub const NOTEAR: Self = Self(4);
    /// Scale video to full screen
    pub const FULLSCREEN: Self = Self(8);
    /// Source is the media FIFO
    pub const MEDIAFIFO: Self = Self(0x10);
    /// Decode the audio track
    pub const SOUND: Self = Self(0x20);
    /// Flat widgets
    pub const FLAT: Self = Self(0x100);
    /// Signed number output
    pub const SIGNED: Self = Self(0x100);
    /// Centre horizontally
    pub const CENTERX: Self = Self(0x200);
    /// Centre vertically
    pub const CENTERY: Self = Self(0x400);
    /// Centre both ways
    pub const CENTER: Self = Self(0x600);
    /// Right-justify
    pub const RIGHTX: Self = Self(0x800);
    /// No background
    pub const NOBACK: Self = Self(0x1000);
    /// Fill text to `FILLWIDTH` (BT81x)
    pub const FILL: Self = Self(0x2000);
    /// No tick marks
    pub const NOTICKS: Self = Self(0x2000);
    /// No hour and minute hands
    pub const NOHM: Self = Self(0x4000);
    /// No gauge pointer
    pub const NOPOINTER: Self = Self(0x4000);
    /// No second hand
    pub const NOSECS: Self = Self(0x8000);
    /// No hands at all
    pub const NOHANDS: Self = Self(0xC000);
    /// Load from flash (BT81x)
    pub const FLASH: Self = Self(0x40);
    /// Render text with the format string extension (BT81x)
    pub const FORMAT: Self = Self(0x1000);
    /// Overlay animation over the current display list (BT81x)
    pub const OVERLAY: Self = Self(0x80);

    /// Options from raw bits.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Raw bits widened for 32-bit record fields.
    pub const fn bits32(self) -> u32 {
        self.0 as u32
    }

    /// Combine two option sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True when every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for Options {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// When `REG_DLSWAP` takes effect.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DlSwap {
    /// Swap completed (read-back value)
    Done = 0,
    /// Swap after the current scan line
    Line = 1,
    /// Swap after the current frame
    #[default]
    Frame = 2,
}

/// Interrupt sources for `REG_INT_FLAGS` / `REG_INT_MASK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntFlags(u16);

impl IntFlags {
    /// Display list swap occurred
    pub const SWAP: Self = Self(0x01);
    /// Touch detected
    pub const TOUCH: Self = Self(0x02);
    /// Touch-screen tag value change
    pub const TAG: Self = Self(0x04);
    /// Sound effect ended
    pub const SOUND: Self = Self(0x08);
    /// Audio playback ended
    pub const PLAYBACK: Self = Self(0x10);
    /// Command FIFO empty
    pub const CMDEMPTY: Self = Self(0x20);
    /// Command FIFO flag (`CMD_INTERRUPT`)
    pub const CMDFLAG: Self = Self(0x40);
    /// Touch-screen conversions completed
    pub const CONVCOMPLETE: Self = Self(0x80);
    /// Graphics engine underrun (BT817/8)
    pub const UNDERRUN: Self = Self(0x100);

    /// Flags from raw bits.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True when every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for IntFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Audio sample format for `REG_PLAYBACK_FORMAT`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Samples {
    /// 8-bit signed linear
    Linear = 0,
    /// 8-bit µ-law
    ULaw = 1,
    /// 4-bit IMA ADPCM
    Adpcm = 2,
}

/// Touch sampling mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchMode {
    /// Touch disabled
    #[default]
    Off = 0,
    /// Single sample on request
    OneShot = 1,
    /// Sample once per frame
    Frame = 2,
    /// Sample continuously
    Continuous = 3,
}

/// Co-processor API level for `CMD_APILEVEL` (BT817/8).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApiLevel {
    /// BT815 compatible
    Bt815 = 1,
    /// BT817 / BT818 extensions
    Bt817 = 2,
}

/// Animation loop mode for `CMD_ANIMSTART` (BT81x).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimLoop {
    /// Play once, then clear
    Once = 0,
    /// Loop forever
    Loop = 1,
    /// Play once, then hold the last frame
    Hold = 2,
}

/// Buffers cleared by the clear helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClearFlags {
    /// Colour buffer
    pub color: bool,
    /// Stencil buffer
    pub stencil: bool,
    /// Tag buffer
    pub tag: bool,
}

impl ClearFlags {
    /// Clear nothing, only set the clear colour
    pub const NONE: Self = Self {
        color: false,
        stencil: false,
        tag: false,
    };
    /// Clear every buffer
    pub const ALL: Self = Self {
        color: true,
        stencil: true,
        tag: true,
    };

    /// True when at least one buffer is selected.
    pub const fn any(self) -> bool {
        self.color || self.stencil || self.tag
    }
}

/// Host command opcodes (first header byte).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Wake from standby, sleep or power-down
    Active = 0x00,
    /// Stop the clock, keep the PLL running
    Standby = 0x41,
    /// Stop the clock and the PLL
    Sleep = 0x42,
    /// Power down the core
    PowerDown = 0x43,
    /// Select the external crystal or clock
    ClkExt = 0x44,
    /// Select the internal oscillator
    ClkInt = 0x48,
    /// Power down individual ROMs
    PdRoms = 0x49,
    /// Power down the core (alternate encoding)
    PowerDown1 = 0x50,
    /// PLL multiplier
    ClkSel = 0x61,
    /// PLL multiplier (alternate encoding)
    ClkSel1 = 0x62,
    /// Reset the core
    RstPulse = 0x68,
    /// Pin drive strength
    PinDrive = 0x70,
    /// Pin state while powered down
    PinPdState = 0x71,
}

impl HostCommand {
    /// Short label for logs.
    pub const fn name(self) -> &'static str {
        match self {
            HostCommand::Active => "ACTIVE",
            HostCommand::Standby => "STANDBY",
            HostCommand::Sleep => "SLEEP",
            HostCommand::PowerDown => "PWRDOWN",
            HostCommand::ClkExt => "CLKEXT",
            HostCommand::ClkInt => "CLKINT",
            HostCommand::PdRoms => "PD_ROMS",
            HostCommand::PowerDown1 => "PWRDOWN1",
            HostCommand::ClkSel => "CLKSEL",
            HostCommand::ClkSel1 => "CLKSEL1",
            HostCommand::RstPulse => "RST_PULSE",
            HostCommand::PinDrive => "PINDRIVE",
            HostCommand::PinPdState => "PIN_PD_STATE",
        }
    }
}

/// Chip power state reachable through host commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Running
    Active,
    /// Clock gated, PLL running; wakes quickly
    Standby,
    /// Clock and PLL stopped
    Sleep,
    /// Core powered down; registers are lost
    PowerDown,
}

impl PowerMode {
    /// Host command that enters this mode.
    pub const fn host_command(self) -> HostCommand {
        match self {
            PowerMode::Active => HostCommand::Active,
            PowerMode::Standby => HostCommand::Standby,
            PowerMode::Sleep => HostCommand::Sleep,
            PowerMode::PowerDown => HostCommand::PowerDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_aliases() {
        assert_eq!(Options::OPT_3D, Options::RGB565);
        assert_eq!(Options::FLAT, Options::SIGNED);
        assert_eq!(Options::CENTERX | Options::CENTERY, Options::CENTER);
        assert!(Options::NOHANDS.contains(Options::NOSECS));
        assert_eq!(Options::CENTER.bits32(), 0x600);
    }

    #[test]
    fn test_clear_flags() {
        assert!(!ClearFlags::NONE.any());
        assert!(ClearFlags::ALL.any());
        assert!(ClearFlags {
            tag: true,
            ..ClearFlags::NONE
        }
        .any());
    }

    #[test]
    fn test_power_modes_map_to_host_commands() {
        assert_eq!(PowerMode::Active.host_command() as u8, 0x00);
        assert_eq!(PowerMode::Standby.host_command() as u8, 0x41);
        assert_eq!(PowerMode::Sleep.host_command() as u8, 0x42);
        assert_eq!(PowerMode::PowerDown.host_command() as u8, 0x43);
    }

    #[test]
    fn test_astc_formats_exceed_u8() {
        assert_eq!(BitmapFormat::CompressedRgbaAstc4x4 as u16, 37808);
        assert_eq!(BitmapFormat::CompressedRgbaAstc12x12 as u16, 37821);
    }
}
