//! Register addresses
//!
//! Registers shared by every EVE chip are at the top level. Touch registers
//! alias between engines: resistive and capacitive parts map different
//! meanings onto the same addresses, so those live in [`resistive`],
//! [`capacitive`] and [`touch_host`]. Pick the set with
//! [`ChipId::touch_engine`](eve_specs::ChipId::touch_engine).

// ── Identification and clock ───────────────────────────────────────────────

pub use eve_specs::memory_map::REG_ID;
/// Frame counter since reset
pub const REG_FRAMES: u32 = 0x30_2004;
/// Clock cycles since reset
pub const REG_CLOCK: u32 = 0x30_2008;
/// Main clock frequency in Hz
pub const REG_FREQUENCY: u32 = 0x30_200C;
/// Line-by-line render mode
pub const REG_RENDERMODE: u32 = 0x30_2010;
/// Scanline select for render mode
pub const REG_SNAPY: u32 = 0x30_2014;
/// Trigger for render mode
pub const REG_SNAPSHOT: u32 = 0x30_2018;
/// Render mode output format
pub const REG_SNAPFORMAT: u32 = 0x30_201C;
/// Engine reset: bit 0 co-processor, bit 1 touch, bit 2 audio
pub const REG_CPURESET: u32 = 0x30_2020;
/// Live video tap CRC
pub const REG_TAP_CRC: u32 = 0x30_2024;
/// Live video tap mask
pub const REG_TAP_MASK: u32 = 0x30_2028;

// ── Panel timing ───────────────────────────────────────────────────────────

/// Horizontal total cycle count
pub const REG_HCYCLE: u32 = 0x30_202C;
/// Horizontal display start offset
pub const REG_HOFFSET: u32 = 0x30_2030;
/// Horizontal active width
pub const REG_HSIZE: u32 = 0x30_2034;
/// Horizontal sync fall offset
pub const REG_HSYNC0: u32 = 0x30_2038;
/// Horizontal sync rise offset
pub const REG_HSYNC1: u32 = 0x30_203C;
/// Vertical total cycle count
pub const REG_VCYCLE: u32 = 0x30_2040;
/// Vertical display start offset
pub const REG_VOFFSET: u32 = 0x30_2044;
/// Vertical active height
pub const REG_VSIZE: u32 = 0x30_2048;
/// Vertical sync fall offset
pub const REG_VSYNC0: u32 = 0x30_204C;
/// Vertical sync rise offset
pub const REG_VSYNC1: u32 = 0x30_2050;

// ── Display output ─────────────────────────────────────────────────────────

/// Display list swap control
pub const REG_DLSWAP: u32 = 0x30_2054;
/// Screen rotation
pub const REG_ROTATE: u32 = 0x30_2058;
/// RGB output bit depth
pub const REG_OUTBITS: u32 = 0x30_205C;
/// Output dithering
pub const REG_DITHER: u32 = 0x30_2060;
/// RGB signal swizzle
pub const REG_SWIZZLE: u32 = 0x30_2064;
/// RGB clock spreading
pub const REG_CSPREAD: u32 = 0x30_2068;
/// PCLK polarity: 0 rising edge, 1 falling edge
pub const REG_PCLK_POL: u32 = 0x30_206C;
/// PCLK divisor; 0 disables the output
pub const REG_PCLK: u32 = 0x30_2070;
/// X coordinate for the tag query
pub const REG_TAG_X: u32 = 0x30_2074;
/// Y coordinate for the tag query
pub const REG_TAG_Y: u32 = 0x30_2078;
/// Tag at (`REG_TAG_X`, `REG_TAG_Y`)
pub const REG_TAG: u32 = 0x30_207C;

// ── Audio ──────────────────────────────────────────────────────────────────

/// Playback volume
pub const REG_VOL_PB: u32 = 0x30_2080;
/// Synthesizer volume
pub const REG_VOL_SOUND: u32 = 0x30_2084;
/// Synthesizer sound select
pub const REG_SOUND: u32 = 0x30_2088;
/// Start the synthesizer
pub const REG_PLAY: u32 = 0x30_208C;
/// Audio playback start address in `RAM_G`
pub const REG_PLAYBACK_START: u32 = 0x30_20B4;
/// Audio playback length
pub const REG_PLAYBACK_LENGTH: u32 = 0x30_20B8;
/// Audio playback read pointer
pub const REG_PLAYBACK_READPTR: u32 = 0x30_20BC;
/// Audio playback sample rate
pub const REG_PLAYBACK_FREQ: u32 = 0x30_20C0;
/// Audio playback format
pub const REG_PLAYBACK_FORMAT: u32 = 0x30_20C4;
/// Audio playback loop enable
pub const REG_PLAYBACK_LOOP: u32 = 0x30_20C8;
/// Start audio playback
pub const REG_PLAYBACK_PLAY: u32 = 0x30_20CC;
/// Pause audio playback (BT81x)
pub const REG_PLAYBACK_PAUSE: u32 = 0x30_25EC;

// ── GPIO, backlight, interrupts ────────────────────────────────────────────

/// Legacy GPIO direction
pub const REG_GPIO_DIR: u32 = 0x30_2090;
/// Legacy GPIO
pub const REG_GPIO: u32 = 0x30_2094;
/// Extended GPIO direction
pub const REG_GPIOX_DIR: u32 = 0x30_2098;
/// Extended GPIO; bit 15 enables the display, bit 12 selects 10 mA LCD drive
pub const REG_GPIOX: u32 = 0x30_209C;
/// Interrupt flags, cleared on read
pub const REG_INT_FLAGS: u32 = 0x30_20A8;
/// Global interrupt enable
pub const REG_INT_EN: u32 = 0x30_20AC;
/// Interrupt enable mask
pub const REG_INT_MASK: u32 = 0x30_20B0;
/// Backlight PWM frequency in Hz
pub const REG_PWM_HZ: u32 = 0x30_20D0;
/// Backlight PWM duty, 0..=128
pub const REG_PWM_DUTY: u32 = 0x30_20D4;
/// Display list macro 0
pub const REG_MACRO_0: u32 = 0x30_20D8;
/// Display list macro 1
pub const REG_MACRO_1: u32 = 0x30_20DC;

/// `REG_GPIOX` bit that enables the display output
pub const GPIOX_DISPLAY_ENABLE: u16 = 0x8000;
/// `REG_GPIOX` bit that selects 10 mA drive on the LCD pins
pub const GPIOX_LCD_DRIVE_10MA: u16 = 0x1000;

// ── Co-processor ───────────────────────────────────────────────────────────

pub use eve_specs::memory_map::{REG_CMD_READ, REG_CMD_WRITE};
/// Co-processor write offset into `RAM_DL`
pub const REG_CMD_DL: u32 = 0x30_2100;
/// Free space in `RAM_CMD` (BT81x auto-increment interface)
pub const REG_CMDB_SPACE: u32 = 0x30_2574;
/// Auto-increment command write port (BT81x)
pub const REG_CMDB_WRITE: u32 = 0x30_2578;

// ── Miscellaneous ──────────────────────────────────────────────────────────

/// Built-in self test enable
pub const REG_BIST_EN: u32 = 0x30_2174;
/// Internal oscillator trim
pub const REG_TRIM: u32 = 0x30_2180;
/// Analogue comparator control
pub const REG_ANA_COMP: u32 = 0x30_2184;
/// QSPI bus width
pub const REG_SPI_WIDTH: u32 = 0x30_2188;
/// Internal busy bits
pub const REG_BUSYBITS: u32 = 0x30_20E8;
/// ROM sub-bank select
pub const REG_ROMSUB_SEL: u32 = 0x30_20F0;
/// Display list CRC
pub const REG_CRC: u32 = 0x30_2178;
/// SPI early transmit
pub const REG_SPI_EARLY_TX: u32 = 0x30_217C;
/// Firmware date stamp
pub const REG_DATESTAMP: u32 = 0x30_2564;
/// Reduce frame rate when the renderer falls behind (BT81x)
pub const REG_ADAPTIVE_FRAMERATE: u32 = 0x30_257C;
/// Flash attach state (BT81x)
pub const REG_FLASH_STATUS: u32 = 0x30_25F0;
/// Render underrun counter (BT817/8)
pub const REG_UNDERRUN: u32 = 0x30_260C;
/// Maximum horizontal cycle per line (BT817/8)
pub const REG_AH_CYCLE_MAX: u32 = 0x30_2610;
/// PCLK frequency control (BT817/8)
pub const REG_PCLK_FREQ: u32 = 0x30_2614;
/// PCLK doubling (BT817/8)
pub const REG_PCLK_2X: u32 = 0x30_2618;
/// Tracker 0 value
pub const REG_TRACKER: u32 = 0x30_9000;
/// Tracker 1 value
pub const REG_TRACKER_1: u32 = 0x30_9004;
/// Tracker 2 value
pub const REG_TRACKER_2: u32 = 0x30_9008;
/// Tracker 3 value
pub const REG_TRACKER_3: u32 = 0x30_900C;
/// Tracker 4 value
pub const REG_TRACKER_4: u32 = 0x30_9010;
/// Media FIFO read pointer
pub const REG_MEDIAFIFO_READ: u32 = 0x30_9014;
/// Media FIFO write pointer
pub const REG_MEDIAFIFO_WRITE: u32 = 0x30_9018;
/// Detected flash size in MiB (BT81x)
pub const REG_FLASH_SIZE: u32 = 0x30_9024;
/// Running animation channels (BT81x)
pub const REG_ANIM_ACTIVE: u32 = 0x30_902C;
/// Video playback control (BT81x)
pub const REG_PLAY_CONTROL: u32 = 0x30_914E;

// ── Touch registers that do not alias ──────────────────────────────────────

/// Tag of the touched object
pub const REG_TOUCH_TAG: u32 = 0x30_212C;
/// Coordinates used for the touch tag lookup
pub const REG_TOUCH_TAG_XY: u32 = 0x30_2128;
/// Touch transform coefficient A
pub const REG_TOUCH_TRANSFORM_A: u32 = 0x30_2150;
/// Touch transform coefficient B
pub const REG_TOUCH_TRANSFORM_B: u32 = 0x30_2154;
/// Touch transform coefficient C
pub const REG_TOUCH_TRANSFORM_C: u32 = 0x30_2158;
/// Touch transform coefficient D
pub const REG_TOUCH_TRANSFORM_D: u32 = 0x30_215C;
/// Touch transform coefficient E
pub const REG_TOUCH_TRANSFORM_E: u32 = 0x30_2160;
/// Touch transform coefficient F
pub const REG_TOUCH_TRANSFORM_F: u32 = 0x30_2164;
/// Touch engine configuration
pub const REG_TOUCH_CONFIG: u32 = 0x30_2168;

/// The six transform registers in order A..F.
pub const REG_TOUCH_TRANSFORM: [u32; 6] = [
    REG_TOUCH_TRANSFORM_A,
    REG_TOUCH_TRANSFORM_B,
    REG_TOUCH_TRANSFORM_C,
    REG_TOUCH_TRANSFORM_D,
    REG_TOUCH_TRANSFORM_E,
    REG_TOUCH_TRANSFORM_F,
];

/// Registers of 4-wire resistive parts (FT810, FT812, BT816, BT818).
pub mod resistive {
    /// Sampling mode, see [`TouchMode`](crate::TouchMode)
    pub const REG_TOUCH_MODE: u32 = 0x30_2104;
    /// ADC mode: 0 single-ended, 1 differential
    pub const REG_TOUCH_ADC_MODE: u32 = 0x30_2108;
    /// Drive time in clocks / 6
    pub const REG_TOUCH_CHARGE: u32 = 0x30_210C;
    /// Settle time in clocks / 6
    pub const REG_TOUCH_SETTLE: u32 = 0x30_2110;
    /// Oversampling factor
    pub const REG_TOUCH_OVERSAMPLE: u32 = 0x30_2114;
    /// Resistance threshold for touch detection
    pub const REG_TOUCH_RZTHRESH: u32 = 0x30_2118;
    /// Raw ADC X/Y
    pub const REG_TOUCH_RAW_XY: u32 = 0x30_211C;
    /// Touch resistance
    pub const REG_TOUCH_RZ: u32 = 0x30_2120;
    /// Screen X (high 16) and Y (low 16); 0x8000 when not touched
    pub const REG_TOUCH_SCREEN_XY: u32 = 0x30_2124;
    /// Tag lookup coordinates
    pub const REG_TOUCH_TAG_XY: u32 = 0x30_2128;
    /// Tag of the touched object
    pub const REG_TOUCH_TAG: u32 = 0x30_212C;
    /// Touch engine configuration
    pub const REG_TOUCH_CONFIG: u32 = 0x30_2168;
    /// Unfiltered X/Y
    pub const REG_TOUCH_DIRECT_XY: u32 = 0x30_218C;
    /// Unfiltered Z1/Z2
    pub const REG_TOUCH_DIRECT_Z1Z2: u32 = 0x30_2190;
}

/// Registers of capacitive parts (FT811, FT813, BT815, BT817).
pub mod capacitive {
    /// Sampling mode, see [`TouchMode`](crate::TouchMode)
    pub const REG_CTOUCH_MODE: u32 = 0x30_2104;
    /// 0 compatibility (single touch), 1 extended (multi-touch)
    pub const REG_CTOUCH_EXTENDED: u32 = 0x30_2108;
    /// Touch 1 X (high 16) and Y (low 16)
    pub const REG_CTOUCH_TOUCH1_XY: u32 = 0x30_211C;
    /// Touch 4 Y
    pub const REG_CTOUCH_TOUCH4_Y: u32 = 0x30_2120;
    /// Touch 0 X (high 16) and Y (low 16)
    pub const REG_CTOUCH_TOUCH0_XY: u32 = 0x30_2124;
    /// Tag lookup coordinates
    pub const REG_CTOUCH_TAG_XY: u32 = 0x30_2128;
    /// Tag of touch 0
    pub const REG_CTOUCH_TAG: u32 = 0x30_212C;
    /// Tag lookup coordinates, touch 1
    pub const REG_CTOUCH_TAG1_XY: u32 = 0x30_2130;
    /// Tag of touch 1
    pub const REG_CTOUCH_TAG1: u32 = 0x30_2134;
    /// Tag lookup coordinates, touch 2
    pub const REG_CTOUCH_TAG2_XY: u32 = 0x30_2138;
    /// Tag of touch 2
    pub const REG_CTOUCH_TAG2: u32 = 0x30_213C;
    /// Tag lookup coordinates, touch 3
    pub const REG_CTOUCH_TAG3_XY: u32 = 0x30_2140;
    /// Tag of touch 3
    pub const REG_CTOUCH_TAG3: u32 = 0x30_2144;
    /// Tag lookup coordinates, touch 4
    pub const REG_CTOUCH_TAG4_XY: u32 = 0x30_2148;
    /// Tag of touch 4
    pub const REG_CTOUCH_TAG4: u32 = 0x30_214C;
    /// Touch engine configuration
    pub const REG_CTOUCH_CONFIG: u32 = 0x30_2168;
    /// Touch 4 X
    pub const REG_CTOUCH_TOUCH4_X: u32 = 0x30_216C;
    /// Touch 2 X (high 16) and Y (low 16)
    pub const REG_CTOUCH_TOUCH2_XY: u32 = 0x30_218C;
    /// Touch 3 X (high 16) and Y (low 16)
    pub const REG_CTOUCH_TOUCH3_XY: u32 = 0x30_2190;
}

/// Touch host mode registers (BT81x with `REG_TOUCH_CONFIG` host mode).
pub mod touch_host {
    /// Host-supplied touch X
    pub const REG_EHOST_TOUCH_X: u32 = 0x30_210C;
    /// Host-supplied touch id
    pub const REG_EHOST_TOUCH_ID: u32 = 0x30_2114;
    /// Host-supplied touch Y
    pub const REG_EHOST_TOUCH_Y: u32 = 0x30_2118;
    /// Acknowledge the host-supplied touch
    pub const REG_EHOST_TOUCH_ACK: u32 = 0x30_2170;
}
