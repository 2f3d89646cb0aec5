//! Co-processor commands
//!
//! [`CoCmd`] lists every command id with the silicon generation it needs.
//! The typed [`Coprocessor`] methods below each encode one record through
//! [`encode_record`](crate::encoding::record::encode_record); commands with
//! output fields return [`ResultSlot`]s to read back after execution.
//!
//! When the panel profile names a concrete chip, a command that chip does
//! not implement fails with [`Error::Unsupported`] before any byte is sent.
//! With [`ChipId::Any`] nothing is checked.

use eve_specs::{ChipId, Generation};
use platform::Transport;

use crate::coprocessor::{Coprocessor, ResultSlot};
use crate::encoding::record::Arg;
use crate::types::{AnimLoop, ApiLevel, BitmapFormat, Options};
use crate::Error;

/// Silicon generations that implement a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Availability {
    /// FT81x and every BT81x
    All,
    /// FT81x only
    Eve2Only,
    /// BT815/6 and later
    Eve3Plus,
    /// BT817/8 only
    Eve4Only,
}

impl Availability {
    /// True when chips of `generation` implement the command.
    pub const fn allows(self, generation: Generation) -> bool {
        match self {
            Availability::All => true,
            Availability::Eve2Only => matches!(generation, Generation::Eve2),
            Availability::Eve3Plus => !matches!(generation, Generation::Eve2),
            Availability::Eve4Only => matches!(generation, Generation::Eve4),
        }
    }
}

macro_rules! co_commands {
    ($( $variant:ident = $id:literal, $name:literal, $avail:ident; )*) => {
        /// Co-processor command id.
        #[repr(u32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum CoCmd {
            $(
                #[doc = concat!("`CMD_", $name, "`")]
                $variant = $id,
            )*
        }

        impl CoCmd {
            /// Every command, in id order.
            pub const ALL: &'static [CoCmd] = &[$( CoCmd::$variant ),*];

            /// Programming guide name without the `CMD_` prefix.
            pub const fn name(self) -> &'static str {
                match self {
                    $( CoCmd::$variant => $name, )*
                }
            }

            /// Generations that implement the command.
            pub const fn availability(self) -> Availability {
                match self {
                    $( CoCmd::$variant => Availability::$avail, )*
                }
            }
        }
    };
}

co_commands! {
    DlStart = 0xFFFF_FF00, "DLSTART", All;
    Swap = 0xFFFF_FF01, "SWAP", All;
    Interrupt = 0xFFFF_FF02, "INTERRUPT", All;
    BgColor = 0xFFFF_FF09, "BGCOLOR", All;
    FgColor = 0xFFFF_FF0A, "FGCOLOR", All;
    Gradient = 0xFFFF_FF0B, "GRADIENT", All;
    Text = 0xFFFF_FF0C, "TEXT", All;
    Button = 0xFFFF_FF0D, "BUTTON", All;
    Keys = 0xFFFF_FF0E, "KEYS", All;
    Progress = 0xFFFF_FF0F, "PROGRESS", All;
    Slider = 0xFFFF_FF10, "SLIDER", All;
    Scrollbar = 0xFFFF_FF11, "SCROLLBAR", All;
    Toggle = 0xFFFF_FF12, "TOGGLE", All;
    Gauge = 0xFFFF_FF13, "GAUGE", All;
    Clock = 0xFFFF_FF14, "CLOCK", All;
    Calibrate = 0xFFFF_FF15, "CALIBRATE", All;
    Spinner = 0xFFFF_FF16, "SPINNER", All;
    Stop = 0xFFFF_FF17, "STOP", All;
    MemCrc = 0xFFFF_FF18, "MEMCRC", All;
    RegRead = 0xFFFF_FF19, "REGREAD", All;
    MemWrite = 0xFFFF_FF1A, "MEMWRITE", All;
    MemSet = 0xFFFF_FF1B, "MEMSET", All;
    MemZero = 0xFFFF_FF1C, "MEMZERO", All;
    MemCpy = 0xFFFF_FF1D, "MEMCPY", All;
    Append = 0xFFFF_FF1E, "APPEND", All;
    Snapshot = 0xFFFF_FF1F, "SNAPSHOT", All;
    BitmapTransform = 0xFFFF_FF21, "BITMAP_TRANSFORM", Eve3Plus;
    Inflate = 0xFFFF_FF22, "INFLATE", All;
    GetPtr = 0xFFFF_FF23, "GETPTR", All;
    LoadImage = 0xFFFF_FF24, "LOADIMAGE", All;
    GetProps = 0xFFFF_FF25, "GETPROPS", All;
    LoadIdentity = 0xFFFF_FF26, "LOADIDENTITY", All;
    Translate = 0xFFFF_FF27, "TRANSLATE", All;
    Scale = 0xFFFF_FF28, "SCALE", All;
    Rotate = 0xFFFF_FF29, "ROTATE", All;
    SetMatrix = 0xFFFF_FF2A, "SETMATRIX", All;
    SetFont = 0xFFFF_FF2B, "SETFONT", All;
    Track = 0xFFFF_FF2C, "TRACK", All;
    Dial = 0xFFFF_FF2D, "DIAL", All;
    Number = 0xFFFF_FF2E, "NUMBER", All;
    Screensaver = 0xFFFF_FF2F, "SCREENSAVER", All;
    Sketch = 0xFFFF_FF30, "SKETCH", All;
    Logo = 0xFFFF_FF31, "LOGO", All;
    Coldstart = 0xFFFF_FF32, "COLDSTART", All;
    GetMatrix = 0xFFFF_FF33, "GETMATRIX", All;
    GradColor = 0xFFFF_FF34, "GRADCOLOR", All;
    CSketch = 0xFFFF_FF35, "CSKETCH", Eve2Only;
    SetRotate = 0xFFFF_FF36, "SETROTATE", All;
    Snapshot2 = 0xFFFF_FF37, "SNAPSHOT2", All;
    SetBase = 0xFFFF_FF38, "SETBASE", All;
    MediaFifo = 0xFFFF_FF39, "MEDIAFIFO", All;
    PlayVideo = 0xFFFF_FF3A, "PLAYVIDEO", All;
    SetFont2 = 0xFFFF_FF3B, "SETFONT2", All;
    SetScratch = 0xFFFF_FF3C, "SETSCRATCH", All;
    RomFont = 0xFFFF_FF3F, "ROMFONT", All;
    VideoStart = 0xFFFF_FF40, "VIDEOSTART", All;
    VideoFrame = 0xFFFF_FF41, "VIDEOFRAME", All;
    Sync = 0xFFFF_FF42, "SYNC", Eve3Plus;
    SetBitmap = 0xFFFF_FF43, "SETBITMAP", All;
    FlashErase = 0xFFFF_FF44, "FLASHERASE", Eve3Plus;
    FlashWrite = 0xFFFF_FF45, "FLASHWRITE", Eve3Plus;
    FlashRead = 0xFFFF_FF46, "FLASHREAD", Eve3Plus;
    FlashUpdate = 0xFFFF_FF47, "FLASHUPDATE", Eve3Plus;
    FlashDetach = 0xFFFF_FF48, "FLASHDETACH", Eve3Plus;
    FlashAttach = 0xFFFF_FF49, "FLASHATTACH", Eve3Plus;
    FlashFast = 0xFFFF_FF4A, "FLASHFAST", Eve3Plus;
    FlashSpiDesel = 0xFFFF_FF4B, "FLASHSPIDESEL", Eve3Plus;
    FlashSpiTx = 0xFFFF_FF4C, "FLASHSPITX", Eve3Plus;
    FlashSpiRx = 0xFFFF_FF4D, "FLASHSPIRX", Eve3Plus;
    FlashSource = 0xFFFF_FF4E, "FLASHSOURCE", Eve3Plus;
    ClearCache = 0xFFFF_FF4F, "CLEARCACHE", Eve3Plus;
    Inflate2 = 0xFFFF_FF50, "INFLATE2", Eve3Plus;
    RotateAround = 0xFFFF_FF51, "ROTATEAROUND", Eve3Plus;
    ResetFonts = 0xFFFF_FF52, "RESETFONTS", Eve3Plus;
    AnimStart = 0xFFFF_FF53, "ANIMSTART", Eve3Plus;
    AnimStop = 0xFFFF_FF54, "ANIMSTOP", Eve3Plus;
    AnimXy = 0xFFFF_FF55, "ANIMXY", Eve3Plus;
    AnimDraw = 0xFFFF_FF56, "ANIMDRAW", Eve3Plus;
    GradientA = 0xFFFF_FF57, "GRADIENTA", Eve3Plus;
    FillWidth = 0xFFFF_FF58, "FILLWIDTH", Eve3Plus;
    AppendF = 0xFFFF_FF59, "APPENDF", Eve3Plus;
    AnimFrame = 0xFFFF_FF5A, "ANIMFRAME", Eve3Plus;
    VideoStartF = 0xFFFF_FF5F, "VIDEOSTARTF", Eve3Plus;
    CalibrateSub = 0xFFFF_FF60, "CALIBRATESUB", Eve3Plus;
    TestCard = 0xFFFF_FF61, "TESTCARD", Eve4Only;
    Hsf = 0xFFFF_FF62, "HSF", Eve4Only;
    ApiLevel = 0xFFFF_FF63, "APILEVEL", Eve4Only;
    GetImage = 0xFFFF_FF64, "GETIMAGE", Eve4Only;
    Wait = 0xFFFF_FF65, "WAIT", Eve4Only;
    ReturnCmd = 0xFFFF_FF66, "RETURN", Eve4Only;
    CallList = 0xFFFF_FF67, "CALLLIST", Eve4Only;
    NewList = 0xFFFF_FF68, "NEWLIST", Eve4Only;
    EndList = 0xFFFF_FF69, "ENDLIST", Eve4Only;
    PclkFreq = 0xFFFF_FF6A, "PCLKFREQ", Eve4Only;
    FontCache = 0xFFFF_FF6B, "FONTCACHE", Eve4Only;
    FontCacheQuery = 0xFFFF_FF6C, "FONTCACHEQUERY", Eve4Only;
    AnimFrameRam = 0xFFFF_FF6D, "ANIMFRAMERAM", Eve4Only;
    AnimStartRam = 0xFFFF_FF6E, "ANIMSTARTRAM", Eve4Only;
    RunAnim = 0xFFFF_FF6F, "RUNANIM", Eve4Only;
    FlashProgram = 0xFFFF_FF70, "FLASHPROGRAM", Eve4Only;
}

impl CoCmd {
    /// 32-bit id that starts the record.
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// True when `chip` implements the command; always true for
    /// [`ChipId::Any`].
    pub const fn is_available_on(self, chip: ChipId) -> bool {
        match chip.generation() {
            None => true,
            Some(generation) => self.availability().allows(generation),
        }
    }
}

// Signed coordinates and unsigned sizes are both 16-bit fields.
const fn x(v: i16) -> Arg<'static> {
    Arg::I16(v)
}

const fn u(v: u16) -> Arg<'static> {
    Arg::U16(v)
}

const fn w(v: u32) -> Arg<'static> {
    Arg::U32(v)
}

const fn opt(o: Options) -> Arg<'static> {
    Arg::U16(o.bits())
}

/// Payload length as a 32-bit record field.
fn len32(data: &[u8]) -> u32 {
    u32::try_from(data.len()).unwrap_or(u32::MAX)
}

impl<T: Transport> Coprocessor<'_, '_, T> {
    /// Queue one record; returns its `N` output slots.
    pub fn emit<const N: usize>(
        &mut self,
        cmd: CoCmd,
        args: &[Arg<'_>],
    ) -> Result<[ResultSlot; N], Error<T::Error>> {
        let chip = self.eve.profile.chip_id;
        if !cmd.is_available_on(chip) {
            warn!("eve: CMD_{} not available on {}", cmd.name(), chip.name());
            return Err(Error::Unsupported);
        }
        trace!("eve: CMD_{}", cmd.name());
        let start = self.eve.cmd_index;
        let mut offsets = [0u16; N];
        self.eve.write_record(cmd.id(), args, &mut offsets)?;
        Ok(offsets.map(|offset| ResultSlot(start + offset)))
    }

    fn run(&mut self, cmd: CoCmd, args: &[Arg<'_>]) -> Result<(), Error<T::Error>> {
        self.emit::<0>(cmd, args).map(|_| ())
    }

    fn run1(&mut self, cmd: CoCmd, args: &[Arg<'_>]) -> Result<ResultSlot, Error<T::Error>> {
        self.emit::<1>(cmd, args).map(|[slot]| slot)
    }

    // ── List control ────────────────────────────────────────────────────

    /// Start a new display list at `RAM_DL` offset 0.
    pub fn dl_start(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::DlStart, &[])
    }

    /// Swap the display list the co-processor built.
    pub fn swap(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Swap, &[])
    }

    /// Raise `INT_CMDFLAG` after `ms` milliseconds.
    pub fn interrupt(&mut self, ms: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Interrupt, &[w(ms)])
    }

    /// Append `num` bytes of display list from `RAM_G`.
    pub fn append(&mut self, ptr: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Append, &[w(ptr), w(num)])
    }

    /// Append `num` bytes of display list from flash (BT81x).
    pub fn append_f(&mut self, ptr: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::AppendF, &[w(ptr), w(num)])
    }

    /// Stop the spinner, screensaver or sketch.
    pub fn stop(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Stop, &[])
    }

    /// Display-list offset the next command will write (`REG_CMD_DL`).
    pub fn get_ptr(&mut self) -> Result<ResultSlot, Error<T::Error>> {
        self.run1(CoCmd::GetPtr, &[Arg::Result])
    }

    /// Select the co-processor API level (BT817/8).
    pub fn api_level(&mut self, level: ApiLevel) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::ApiLevel, &[w(level as u32)])
    }

    /// Wait for the next video scan-out (BT81x).
    pub fn sync(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Sync, &[])
    }

    /// Delay the co-processor for `us` microseconds (BT817/8).
    pub fn wait(&mut self, us: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Wait, &[w(us)])
    }

    /// Start recording a command list at `a` (BT817/8).
    pub fn new_list(&mut self, a: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::NewList, &[w(a)])
    }

    /// Finish the command list started by [`new_list`](Self::new_list).
    pub fn end_list(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::EndList, &[])
    }

    /// Execute the command list at `a` (BT817/8).
    pub fn call_list(&mut self, a: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::CallList, &[w(a)])
    }

    /// Return from a command list (BT817/8).
    pub fn return_cmd(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::ReturnCmd, &[])
    }

    // ── Widgets ─────────────────────────────────────────────────────────

    /// Background colour for widgets.
    pub fn bg_color(&mut self, rgb: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::BgColor, &[w(rgb)])
    }

    /// Foreground colour for widgets.
    pub fn fg_color(&mut self, rgb: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FgColor, &[w(rgb)])
    }

    /// Highlight colour for 3D widgets.
    pub fn grad_color(&mut self, rgb: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::GradColor, &[w(rgb)])
    }

    /// Smooth colour gradient between two points.
    pub fn gradient(
        &mut self,
        x0: i16,
        y0: i16,
        rgb0: u32,
        x1: i16,
        y1: i16,
        rgb1: u32,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Gradient,
            &[x(x0), x(y0), w(rgb0), x(x1), x(y1), w(rgb1)],
        )
    }

    /// Gradient with alpha (BT81x).
    pub fn gradient_a(
        &mut self,
        x0: i16,
        y0: i16,
        argb0: u32,
        x1: i16,
        y1: i16,
        argb1: u32,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::GradientA,
            &[x(x0), x(y0), w(argb0), x(x1), x(y1), w(argb1)],
        )
    }

    /// Text string.
    pub fn text(
        &mut self,
        x0: i16,
        y0: i16,
        font: u16,
        options: Options,
        s: &str,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Text,
            &[x(x0), x(y0), u(font), opt(options), Arg::Str(s, 0)],
        )
    }

    /// Width in pixels for `OPT_FILL` text (BT81x).
    pub fn fill_width(&mut self, s: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FillWidth, &[w(s)])
    }

    /// Push button with a label.
    pub fn button(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        font: u16,
        options: Options,
        s: &str,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Button,
            &[
                x(x0),
                x(y0),
                u(width),
                u(height),
                u(font),
                opt(options),
                Arg::Str(s, 0),
            ],
        )
    }

    /// Row of keys, one per character of `s`.
    pub fn keys(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        font: u16,
        options: Options,
        s: &str,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Keys,
            &[
                x(x0),
                x(y0),
                u(width),
                u(height),
                u(font),
                opt(options),
                Arg::Str(s, 0),
            ],
        )
    }

    /// Progress bar.
    pub fn progress(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        options: Options,
        val: u16,
        range: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Progress,
            &[
                x(x0),
                x(y0),
                u(width),
                u(height),
                opt(options),
                u(val),
                u(range),
                u(0),
            ],
        )
    }

    /// Slider.
    pub fn slider(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        options: Options,
        val: u16,
        range: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Slider,
            &[
                x(x0),
                x(y0),
                u(width),
                u(height),
                opt(options),
                u(val),
                u(range),
                u(0),
            ],
        )
    }

    /// Scroll bar.
    pub fn scrollbar(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        options: Options,
        val: u16,
        size: u16,
        range: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Scrollbar,
            &[
                x(x0),
                x(y0),
                u(width),
                u(height),
                opt(options),
                u(val),
                u(size),
                u(range),
            ],
        )
    }

    /// Toggle switch; `s` holds both labels separated by `\xFF`.
    pub fn toggle(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        font: u16,
        options: Options,
        state: u16,
        s: &str,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Toggle,
            &[
                x(x0),
                x(y0),
                u(width),
                u(font),
                opt(options),
                u(state),
                Arg::Str(s, 0),
            ],
        )
    }

    /// Gauge.
    pub fn gauge(
        &mut self,
        x0: i16,
        y0: i16,
        radius: u16,
        options: Options,
        major: u16,
        minor: u16,
        val: u16,
        range: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Gauge,
            &[
                x(x0),
                x(y0),
                u(radius),
                opt(options),
                u(major),
                u(minor),
                u(val),
                u(range),
            ],
        )
    }

    /// Analog clock face.
    pub fn clock(
        &mut self,
        x0: i16,
        y0: i16,
        radius: u16,
        options: Options,
        h: u16,
        m: u16,
        s: u16,
        ms: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Clock,
            &[
                x(x0),
                x(y0),
                u(radius),
                opt(options),
                u(h),
                u(m),
                u(s),
                u(ms),
            ],
        )
    }

    /// Rotary dial; `val` is 0..=65535 for a full turn.
    pub fn dial(
        &mut self,
        x0: i16,
        y0: i16,
        radius: u16,
        options: Options,
        val: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Dial,
            &[x(x0), x(y0), u(radius), opt(options), u(val), u(0)],
        )
    }

    /// Decimal number (or base set with [`set_base`](Self::set_base)).
    pub fn number(
        &mut self,
        x0: i16,
        y0: i16,
        font: u16,
        options: Options,
        n: i32,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Number,
            &[x(x0), x(y0), u(font), opt(options), Arg::I32(n)],
        )
    }

    /// Radix for [`number`](Self::number).
    pub fn set_base(&mut self, base: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::SetBase, &[w(base)])
    }

    /// Busy indicator; runs until [`stop`](Self::stop).
    pub fn spinner(
        &mut self,
        x0: i16,
        y0: i16,
        style: u16,
        scale: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Spinner, &[x(x0), x(y0), u(style), u(scale)])
    }

    /// Track touches on a rectangular or rotary area for `tag`.
    pub fn track(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        tag: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Track,
            &[x(x0), x(y0), u(width), u(height), u(tag), u(0)],
        )
    }

    /// Animated screensaver; runs until [`stop`](Self::stop).
    pub fn screensaver(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Screensaver, &[])
    }

    /// Touch sketch into a bitmap at `ptr`.
    pub fn sketch(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        ptr: u32,
        format: BitmapFormat,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Sketch,
            &[
                x(x0),
                x(y0),
                u(width),
                u(height),
                w(ptr),
                u(format as u16),
                u(0),
            ],
        )
    }

    /// Capacitive sketch with sampling frequency (FT811/3 only).
    pub fn csketch(
        &mut self,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
        ptr: u32,
        format: BitmapFormat,
        freq: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::CSketch,
            &[
                x(x0),
                x(y0),
                u(width),
                u(height),
                w(ptr),
                u(format as u16),
                u(freq),
            ],
        )
    }

    /// Play the FTDI logo animation.
    pub fn logo(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Logo, &[])
    }

    /// Reset co-processor state (colours, fonts, matrix) to defaults.
    pub fn coldstart(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Coldstart, &[])
    }

    /// Draw a test pattern (BT817/8).
    pub fn test_card(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::TestCard, &[])
    }

    // ── Touch ───────────────────────────────────────────────────────────

    /// Run the interactive three-point calibration. The slot reads 0 on
    /// failure.
    pub fn calibrate(&mut self) -> Result<ResultSlot, Error<T::Error>> {
        self.run1(CoCmd::Calibrate, &[Arg::Result])
    }

    /// Calibrate using a sub-window of the screen (BT81x).
    pub fn calibrate_sub(
        &mut self,
        x0: u16,
        y0: u16,
        width: u16,
        height: u16,
    ) -> Result<ResultSlot, Error<T::Error>> {
        self.run1(
            CoCmd::CalibrateSub,
            &[u(x0), u(y0), u(width), u(height), Arg::Result],
        )
    }

    // ── Memory ──────────────────────────────────────────────────────────

    /// CRC-32 of `num` bytes at `ptr`.
    pub fn mem_crc(&mut self, ptr: u32, num: u32) -> Result<ResultSlot, Error<T::Error>> {
        self.run1(CoCmd::MemCrc, &[w(ptr), w(num), Arg::Result])
    }

    /// Read the register at `ptr` into the result slot.
    pub fn reg_read(&mut self, ptr: u32) -> Result<ResultSlot, Error<T::Error>> {
        self.run1(CoCmd::RegRead, &[w(ptr), Arg::Result])
    }

    /// Copy `data` to `ptr` from the ring.
    ///
    /// The whole record must fit in the ring; larger payloads belong in
    /// `RAM_G` via [`Eve::write_buffer`](crate::Eve::write_buffer).
    pub fn mem_write(&mut self, ptr: u32, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::MemWrite, &[w(ptr), w(len32(data)), Arg::Bytes(data)])
    }

    /// Fill `num` bytes at `ptr` with `value`.
    pub fn mem_set(&mut self, ptr: u32, value: u8, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::MemSet, &[w(ptr), w(u32::from(value)), w(num)])
    }

    /// Zero `num` bytes at `ptr`.
    pub fn mem_zero(&mut self, ptr: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::MemZero, &[w(ptr), w(num)])
    }

    /// Copy `num` bytes from `src` to `dest`.
    pub fn mem_cpy(&mut self, dest: u32, src: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::MemCpy, &[w(dest), w(src), w(num)])
    }

    /// Decompress zlib `data` to `ptr`.
    pub fn inflate(&mut self, ptr: u32, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Inflate, &[w(ptr), Arg::Bytes(data)])
    }

    /// Decompress with a source option such as `OPT_MEDIAFIFO` (BT81x).
    pub fn inflate2(
        &mut self,
        ptr: u32,
        options: Options,
        data: &[u8],
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Inflate2,
            &[w(ptr), w(options.bits32()), Arg::Bytes(data)],
        )
    }

    /// Stream zlib `data` of any size through the ring to `ptr`.
    pub fn inflate_streamed(&mut self, ptr: u32, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Inflate, &[w(ptr)])?;
        self.eve.stream_bytes(data)
    }

    /// Snapshot the screen as ARGB4 to `ptr`.
    pub fn snapshot(&mut self, ptr: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Snapshot, &[w(ptr)])
    }

    /// Snapshot a region in `format` to `ptr`.
    pub fn snapshot2(
        &mut self,
        format: BitmapFormat,
        ptr: u32,
        x0: i16,
        y0: i16,
        width: u16,
        height: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::Snapshot2,
            &[
                w(u32::from(format as u16)),
                w(ptr),
                x(x0),
                x(y0),
                u(width),
                u(height),
            ],
        )
    }

    /// Use `RAM_G` at `ptr` of `size` bytes as the media FIFO.
    pub fn media_fifo(&mut self, ptr: u32, size: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::MediaFifo, &[w(ptr), w(size)])
    }

    // ── Images and video ────────────────────────────────────────────────

    /// Decode a JPEG or PNG that follows in the ring to `ptr`.
    pub fn load_image(
        &mut self,
        ptr: u32,
        options: Options,
        data: &[u8],
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::LoadImage,
            &[w(ptr), w(options.bits32()), Arg::Bytes(data)],
        )
    }

    /// Decode an image of any size, streaming it through the ring.
    pub fn load_image_streamed(
        &mut self,
        ptr: u32,
        options: Options,
        data: &[u8],
    ) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::LoadImage, &[w(ptr), w(options.bits32())])?;
        self.eve.stream_bytes(data)
    }

    /// Address, width and height of the last decoded image.
    pub fn get_props(&mut self) -> Result<[ResultSlot; 3], Error<T::Error>> {
        self.emit(CoCmd::GetProps, &[Arg::Result, Arg::Result, Arg::Result])
    }

    /// Source, format, width, height and palette of the last image (BT817/8).
    pub fn get_image(&mut self) -> Result<[ResultSlot; 5], Error<T::Error>> {
        self.emit(
            CoCmd::GetImage,
            &[Arg::Result, Arg::Result, Arg::Result, Arg::Result, Arg::Result],
        )
    }

    /// Play a video; data comes from the media FIFO or flash per `options`.
    pub fn play_video(&mut self, options: Options) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::PlayVideo, &[w(options.bits32())])
    }

    /// Prepare frame-by-frame video decoding.
    pub fn video_start(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::VideoStart, &[])
    }

    /// Prepare frame-by-frame video decoding from flash (BT81x).
    pub fn video_start_f(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::VideoStartF, &[])
    }

    /// Decode the next frame to `dst`; `ptr` receives the completion flag.
    pub fn video_frame(&mut self, dst: u32, ptr: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::VideoFrame, &[w(dst), w(ptr)])
    }

    /// Bitmap setup for an image at `addr` in one command.
    pub fn set_bitmap(
        &mut self,
        addr: u32,
        format: BitmapFormat,
        width: u16,
        height: u16,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::SetBitmap,
            &[w(addr), u(format as u16), u(width), u(height), u(0)],
        )
    }

    // ── Matrix ──────────────────────────────────────────────────────────

    /// Reset the bitmap matrix to identity.
    pub fn load_identity(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::LoadIdentity, &[])
    }

    /// Translate by 16.16 fixed-point offsets.
    pub fn translate(&mut self, tx: i32, ty: i32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Translate, &[Arg::I32(tx), Arg::I32(ty)])
    }

    /// Scale by 16.16 fixed-point factors.
    pub fn scale(&mut self, sx: i32, sy: i32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Scale, &[Arg::I32(sx), Arg::I32(sy)])
    }

    /// Rotate clockwise; 65536 is a full turn.
    pub fn rotate(&mut self, angle: i32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Rotate, &[Arg::I32(angle)])
    }

    /// Rotate and scale about a point (BT81x).
    pub fn rotate_around(
        &mut self,
        x0: i32,
        y0: i32,
        angle: i32,
        scale: i32,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::RotateAround,
            &[Arg::I32(x0), Arg::I32(y0), Arg::I32(angle), Arg::I32(scale)],
        )
    }

    /// Write the current matrix to the display list.
    pub fn set_matrix(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::SetMatrix, &[])
    }

    /// Coefficients a..f of the current matrix.
    pub fn get_matrix(&mut self) -> Result<[ResultSlot; 6], Error<T::Error>> {
        self.emit(CoCmd::GetMatrix, &[Arg::Result; 6])
    }

    /// Matrix mapping three source points onto three target points
    /// (BT81x). The slot reads 0 when the points are degenerate.
    pub fn bitmap_transform(
        &mut self,
        src: [(i32, i32); 3],
        dst: [(i32, i32); 3],
    ) -> Result<ResultSlot, Error<T::Error>> {
        let [(x0, y0), (x1, y1), (x2, y2)] = src;
        let [(tx0, ty0), (tx1, ty1), (tx2, ty2)] = dst;
        self.run1(
            CoCmd::BitmapTransform,
            &[
                Arg::I32(x0),
                Arg::I32(y0),
                Arg::I32(x1),
                Arg::I32(y1),
                Arg::I32(x2),
                Arg::I32(y2),
                Arg::I32(tx0),
                Arg::I32(ty0),
                Arg::I32(tx1),
                Arg::I32(ty1),
                Arg::I32(tx2),
                Arg::I32(ty2),
                Arg::Result,
            ],
        )
    }

    /// Rotate the screen (`REG_ROTATE` plus touch transform).
    pub fn set_rotate(&mut self, rotation: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::SetRotate, &[w(rotation)])
    }

    // ── Fonts ───────────────────────────────────────────────────────────

    /// Register a RAM font as `font`.
    pub fn set_font(&mut self, font: u32, ptr: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::SetFont, &[w(font), w(ptr)])
    }

    /// Register a RAM font and set up its bitmap handle.
    pub fn set_font2(&mut self, font: u32, ptr: u32, firstchar: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::SetFont2, &[w(font), w(ptr), w(firstchar)])
    }

    /// Bitmap handle the co-processor may use as scratch.
    pub fn set_scratch(&mut self, handle: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::SetScratch, &[w(handle)])
    }

    /// Load ROM font `romslot` into handle `font`.
    pub fn rom_font(&mut self, font: u32, romslot: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::RomFont, &[w(font), w(romslot)])
    }

    /// Restore the built-in font set (BT81x).
    pub fn reset_fonts(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::ResetFonts, &[])
    }

    /// Cache glyphs of a flash font in `RAM_G` (BT817/8).
    pub fn font_cache(&mut self, font: u32, ptr: i32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FontCache, &[w(font), Arg::I32(ptr), w(num)])
    }

    /// Total and used size of the font cache (BT817/8).
    pub fn font_cache_query(&mut self) -> Result<[ResultSlot; 2], Error<T::Error>> {
        self.emit(CoCmd::FontCacheQuery, &[Arg::Result, Arg::Result])
    }

    // ── Flash (BT81x) ───────────────────────────────────────────────────

    /// Erase the whole flash.
    pub fn flash_erase(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashErase, &[])
    }

    /// Write `data` from the ring to erased flash at `ptr`.
    pub fn flash_write(&mut self, ptr: u32, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::FlashWrite,
            &[w(ptr), w(len32(data)), Arg::Bytes(data)],
        )
    }

    /// Copy `num` bytes of flash at `src` to `RAM_G` at `dest`.
    pub fn flash_read(&mut self, dest: u32, src: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashRead, &[w(dest), w(src), w(num)])
    }

    /// Write `RAM_G` to flash, erasing only sectors that differ.
    pub fn flash_update(&mut self, dest: u32, src: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashUpdate, &[w(dest), w(src), w(num)])
    }

    /// Write `RAM_G` to erased flash (BT817/8).
    pub fn flash_program(&mut self, dest: u32, src: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashProgram, &[w(dest), w(src), w(num)])
    }

    /// Detach from flash so the SPI lines can be driven directly.
    pub fn flash_detach(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashDetach, &[])
    }

    /// Re-attach to flash.
    pub fn flash_attach(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashAttach, &[])
    }

    /// Enter full-speed flash mode; the slot receives the result code.
    pub fn flash_fast(&mut self) -> Result<ResultSlot, Error<T::Error>> {
        self.run1(CoCmd::FlashFast, &[Arg::Result])
    }

    /// Deassert the flash chip select.
    pub fn flash_spi_desel(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashSpiDesel, &[])
    }

    /// Send `data` to a detached flash.
    pub fn flash_spi_tx(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashSpiTx, &[w(len32(data)), Arg::Bytes(data)])
    }

    /// Receive `num` bytes from a detached flash into `ptr`.
    pub fn flash_spi_rx(&mut self, ptr: u32, num: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashSpiRx, &[w(ptr), w(num)])
    }

    /// Flash address used by the next `OPT_FLASH` command.
    pub fn flash_source(&mut self, ptr: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::FlashSource, &[w(ptr)])
    }

    /// Flush the bitmap cache after flash contents changed.
    pub fn clear_cache(&mut self) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::ClearCache, &[])
    }

    // ── Animation (BT81x) ───────────────────────────────────────────────

    /// Start animation `aoptr` in flash on channel `ch`.
    pub fn anim_start(&mut self, ch: i32, aoptr: u32, mode: AnimLoop) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::AnimStart,
            &[Arg::I32(ch), w(aoptr), w(mode as u32)],
        )
    }

    /// Start animation `aoptr` in `RAM_G` on channel `ch` (BT817/8).
    pub fn anim_start_ram(
        &mut self,
        ch: i32,
        aoptr: u32,
        mode: AnimLoop,
    ) -> Result<(), Error<T::Error>> {
        self.run(
            CoCmd::AnimStartRam,
            &[Arg::I32(ch), w(aoptr), w(mode as u32)],
        )
    }

    /// Stop channel `ch`; -1 stops all.
    pub fn anim_stop(&mut self, ch: i32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::AnimStop, &[Arg::I32(ch)])
    }

    /// Move channel `ch` to `(x0, y0)`.
    pub fn anim_xy(&mut self, ch: i32, x0: i16, y0: i16) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::AnimXy, &[Arg::I32(ch), x(x0), x(y0)])
    }

    /// Draw channel `ch`; -1 draws all.
    pub fn anim_draw(&mut self, ch: i32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::AnimDraw, &[Arg::I32(ch)])
    }

    /// Draw one frame of the animation in flash.
    pub fn anim_frame(
        &mut self,
        x0: i16,
        y0: i16,
        aoptr: u32,
        frame: u32,
    ) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::AnimFrame, &[x(x0), x(y0), w(aoptr), w(frame)])
    }

    /// Draw one frame of the animation in `RAM_G` (BT817/8).
    pub fn anim_frame_ram(
        &mut self,
        x0: i16,
        y0: i16,
        aoptr: u32,
        frame: u32,
    ) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::AnimFrameRam, &[x(x0), x(y0), w(aoptr), w(frame)])
    }

    /// Play animations on the channels in `waitmask` until done (BT817/8).
    pub fn run_anim(&mut self, waitmask: u32, play: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::RunAnim, &[w(waitmask), w(play)])
    }

    // ── Display timing (BT817/8) ────────────────────────────────────────

    /// Horizontal scan-out size for non-square pixels.
    pub fn hsf(&mut self, width: u32) -> Result<(), Error<T::Error>> {
        self.run(CoCmd::Hsf, &[w(width)])
    }

    /// Program the pixel clock PLL to approach `ftarget`; the slot receives
    /// the frequency actually set.
    pub fn pclk_freq(&mut self, ftarget: u32, rounding: i32) -> Result<ResultSlot, Error<T::Error>> {
        self.run1(
            CoCmd::PclkFreq,
            &[w(ftarget), Arg::I32(rounding), Arg::Result],
        )
    }
}
