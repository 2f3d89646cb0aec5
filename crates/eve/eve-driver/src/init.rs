//! Initialization state machine
//!
//! [`Eve::begin`] walks the chip from power-on to a running panel in a fixed
//! order of [`InitStage`]s:
//!
//! ```text
//! Reset → ClockSelect → PollId → PollReset → ChipId → Frequency → SyncIndex
//!       → EarlyInit → PanelRegisters → TouchInit → BootstrapList → EnableOutput
//! ```
//!
//! Board code hooks into the two points where panels differ (GPIO setup
//! before the timing registers, touch configuration after them) through
//! [`InitHooks`]. The register writes that only depend on the profile are
//! exposed as a [`panel_register_plan`] so tools can show them without a
//! chip attached.

use eve_specs::{ChipId, ClockSource, PanelProfile};
use platform::Transport;

use crate::memory_map::{CHIP_ID_READY, REG_CHIP_ID};
use crate::registers::{
    GPIOX_DISPLAY_ENABLE, GPIOX_LCD_DRIVE_10MA, REG_CPURESET, REG_CSPREAD, REG_DITHER,
    REG_DLSWAP, REG_FREQUENCY, REG_GPIOX, REG_HCYCLE, REG_HOFFSET, REG_HSIZE, REG_HSYNC0,
    REG_HSYNC1, REG_ID, REG_OUTBITS, REG_PCLK, REG_PCLK_POL, REG_PLAY, REG_PWM_DUTY,
    REG_PWM_HZ, REG_SOUND, REG_SWIZZLE, REG_VCYCLE, REG_VOFFSET, REG_VOL_PB, REG_VOL_SOUND,
    REG_VSIZE, REG_VSYNC0, REG_VSYNC1,
};
use crate::encoding::dl;
use crate::{DlIndex, DlSwap, Error, Eve, HostCommand};

/// Polls of `REG_ID` / `REG_CPURESET`, 1 ms apart, before giving up.
pub const BOOT_POLL_TRIES: u32 = 250;

/// `SOUND` value that silences the audio output.
const SOUND_MUTE: u16 = 0x60;

/// One step of [`Eve::begin`], in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStage {
    /// Power cycle and slow SPI clock
    Reset,
    /// Clock source, PLL multiplier, wake
    ClockSelect,
    /// Wait for `REG_ID == 0x7C`
    PollId,
    /// Wait for the engines to leave reset
    PollReset,
    /// Compare `REG_CHIP_ID` with the profile
    ChipId,
    /// `REG_FREQUENCY`
    Frequency,
    /// Adopt the chip's `REG_CMD_WRITE`
    SyncIndex,
    /// [`InitHooks::early_init`]
    EarlyInit,
    /// Timing, pin and signal registers
    PanelRegisters,
    /// [`InitHooks::touch_init`]
    TouchInit,
    /// First display list and swap
    BootstrapList,
    /// Display enable, pixel clock, backlight
    EnableOutput,
}

impl InitStage {
    /// Every stage, in execution order.
    pub const ALL: [InitStage; 12] = [
        InitStage::Reset,
        InitStage::ClockSelect,
        InitStage::PollId,
        InitStage::PollReset,
        InitStage::ChipId,
        InitStage::Frequency,
        InitStage::SyncIndex,
        InitStage::EarlyInit,
        InitStage::PanelRegisters,
        InitStage::TouchInit,
        InitStage::BootstrapList,
        InitStage::EnableOutput,
    ];

    /// Label used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            InitStage::Reset => "reset",
            InitStage::ClockSelect => "clock-select",
            InitStage::PollId => "poll-id",
            InitStage::PollReset => "poll-reset",
            InitStage::ChipId => "chip-id",
            InitStage::Frequency => "frequency",
            InitStage::SyncIndex => "sync-index",
            InitStage::EarlyInit => "early-init",
            InitStage::PanelRegisters => "panel-registers",
            InitStage::TouchInit => "touch-init",
            InitStage::BootstrapList => "bootstrap-list",
            InitStage::EnableOutput => "enable-output",
        }
    }
}

/// Options for [`Eve::begin`] that do not belong to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitConfig {
    /// When the bootstrap list is swapped in
    pub swap: DlSwap,
    /// Backlight PWM frequency in Hz (`REG_PWM_HZ`)
    pub backlight_hz: u16,
    /// Backlight duty, 0..=128 (`REG_PWM_DUTY`)
    pub backlight_duty: u8,
    /// Silence the audio engine after start-up
    pub mute_audio: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            swap: DlSwap::Frame,
            backlight_hz: 300,
            backlight_duty: 32,
            mute_audio: false,
        }
    }
}

/// Board-specific steps of [`Eve::begin`].
///
/// Both methods have defaults; implement only what the board needs. An
/// error aborts initialization and is returned from `begin` unchanged, so a
/// hook may report its own failure as [`Error::Hook`].
pub trait InitHooks<T: Transport> {
    /// Runs after the chip is up and before any panel register is written,
    /// e.g. to drive a GPIO that powers the panel.
    fn early_init(&mut self, eve: &mut Eve<'_, T>) -> Result<(), Error<T::Error>> {
        let _ = eve;
        Ok(())
    }

    /// Runs after the panel registers. The default turns touch off.
    fn touch_init(&mut self, eve: &mut Eve<'_, T>) -> Result<(), Error<T::Error>> {
        eve.disable_touch()
    }
}

/// Hooks that keep every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl<T: Transport> InitHooks<T> for DefaultHooks {}

/// Access width of a register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWidth {
    /// `write8`
    U8,
    /// `write16`
    U16,
    /// `write32`
    U32,
}

/// One register write that [`Eve::begin`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    /// Register name without the `REG_` prefix
    pub name: &'static str,
    /// Register address
    pub address: u32,
    /// Value written
    pub value: u32,
    /// Access width
    pub width: RegisterWidth,
}

impl RegisterWrite {
    const fn u8(name: &'static str, address: u32, value: u8) -> Self {
        Self {
            name,
            address,
            value: value as u32,
            width: RegisterWidth::U8,
        }
    }

    const fn u16(name: &'static str, address: u32, value: u16) -> Self {
        Self {
            name,
            address,
            value: value as u32,
            width: RegisterWidth::U16,
        }
    }

    const fn u32(name: &'static str, address: u32, value: u32) -> Self {
        Self {
            name,
            address,
            value,
            width: RegisterWidth::U32,
        }
    }
}

const TIMING_REGISTERS: usize = 10;
const OUTPUT_REGISTERS: usize = 2;
const SIGNAL_REGISTERS: usize = 2;
const MUTE_REGISTERS: usize = 4;

/// The ten timing registers, horizontal first.
pub const fn timing_registers(profile: &PanelProfile<'_>) -> [RegisterWrite; TIMING_REGISTERS] {
    [
        RegisterWrite::u16("HSIZE", REG_HSIZE, profile.hsize),
        RegisterWrite::u16("HCYCLE", REG_HCYCLE, profile.hcycle),
        RegisterWrite::u16("HOFFSET", REG_HOFFSET, profile.hoffset),
        RegisterWrite::u16("HSYNC0", REG_HSYNC0, profile.hsync0),
        RegisterWrite::u16("HSYNC1", REG_HSYNC1, profile.hsync1),
        RegisterWrite::u16("VSIZE", REG_VSIZE, profile.vsize),
        RegisterWrite::u16("VCYCLE", REG_VCYCLE, profile.vcycle),
        RegisterWrite::u16("VOFFSET", REG_VOFFSET, profile.voffset),
        RegisterWrite::u16("VSYNC0", REG_VSYNC0, profile.vsync0),
        RegisterWrite::u16("VSYNC1", REG_VSYNC1, profile.vsync1),
    ]
}

/// RGB pin order and pixel clock polarity.
pub const fn output_registers(profile: &PanelProfile<'_>) -> [RegisterWrite; OUTPUT_REGISTERS] {
    [
        RegisterWrite::u8("SWIZZLE", REG_SWIZZLE, profile.swizzle),
        RegisterWrite::u8("PCLK_POL", REG_PCLK_POL, profile.pclk_pol),
    ]
}

/// Clock spreading and dithering.
pub const fn signal_registers(profile: &PanelProfile<'_>) -> [RegisterWrite; SIGNAL_REGISTERS] {
    [
        RegisterWrite::u8("CSPREAD", REG_CSPREAD, profile.cspread as u8),
        RegisterWrite::u8("DITHER", REG_DITHER, profile.dither as u8),
    ]
}

/// Longest plan [`panel_register_plan`] produces.
///
/// FREQUENCY, the blanking PCLK/PWM_DUTY pair, OUTBITS and the four
/// enable-output writes surround the register groups.
#[allow(clippy::arithmetic_side_effects)] // const-evaluated
pub const PLAN_CAPACITY: usize =
    1 + 2 + TIMING_REGISTERS + OUTPUT_REGISTERS + SIGNAL_REGISTERS + 1 + 4 + MUTE_REGISTERS;

/// Every plain register write of [`Eve::begin`] for `profile` and `config`,
/// in order.
///
/// Read-modify-writes of `REG_GPIOX`, host commands (clock, `PINDRIVE`),
/// hook writes and the bootstrap list are not included.
pub fn panel_register_plan(
    profile: &PanelProfile<'_>,
    config: &InitConfig,
) -> heapless::Vec<RegisterWrite, PLAN_CAPACITY> {
    let mut plan = heapless::Vec::new();
    let mut push = |w: RegisterWrite| {
        let pushed = plan.push(w).is_ok();
        debug_assert!(pushed, "PLAN_CAPACITY too small for {}", w.name);
    };

    if profile.frequency != 0 {
        push(RegisterWrite::u32("FREQUENCY", REG_FREQUENCY, profile.frequency));
    }
    push(RegisterWrite::u8("PCLK", REG_PCLK, 0));
    push(RegisterWrite::u8("PWM_DUTY", REG_PWM_DUTY, 0));
    timing_registers(profile).into_iter().for_each(&mut push);
    output_registers(profile).into_iter().for_each(&mut push);
    signal_registers(profile).into_iter().for_each(&mut push);
    if profile.outbits != 0 {
        push(RegisterWrite::u16("OUTBITS", REG_OUTBITS, profile.outbits));
    }
    push(RegisterWrite::u32("DLSWAP", REG_DLSWAP, config.swap as u32));
    push(RegisterWrite::u8("PCLK", REG_PCLK, profile.pclk));
    push(RegisterWrite::u16("PWM_HZ", REG_PWM_HZ, config.backlight_hz));
    push(RegisterWrite::u8("PWM_DUTY", REG_PWM_DUTY, config.backlight_duty));
    if config.mute_audio {
        for w in mute_registers() {
            push(w);
        }
    }
    plan
}

const fn mute_registers() -> [RegisterWrite; MUTE_REGISTERS] {
    [
        RegisterWrite::u8("VOL_PB", REG_VOL_PB, 0),
        RegisterWrite::u8("VOL_SOUND", REG_VOL_SOUND, 0),
        RegisterWrite::u16("SOUND", REG_SOUND, SOUND_MUTE),
        RegisterWrite::u8("PLAY", REG_PLAY, 1),
    ]
}

#[allow(clippy::cast_possible_truncation)] // values come from typed constructors
impl<'p, T: Transport> Eve<'p, T> {
    /// Perform one planned register write.
    pub fn apply(&mut self, write: &RegisterWrite) -> Result<(), Error<T::Error>> {
        match write.width {
            RegisterWidth::U8 => self.write8(write.address, write.value as u8),
            RegisterWidth::U16 => self.write16(write.address, write.value as u16),
            RegisterWidth::U32 => self.write32(write.address, write.value),
        }
    }

    fn apply_all(&mut self, writes: &[RegisterWrite]) -> Result<(), Error<T::Error>> {
        for w in writes {
            self.apply(w)?;
        }
        Ok(())
    }

    /// Bring the chip up and start the panel.
    ///
    /// On success the bootstrap list (black screen) is showing, the pixel
    /// clock and backlight run, and both local indices match the chip.
    pub fn begin<H: InitHooks<T>>(
        &mut self,
        hooks: &mut H,
        config: &InitConfig,
    ) -> Result<(), Error<T::Error>> {
        info!("eve: begin {}", self.profile.name);
        self.stage(InitStage::Reset, Self::reset)?;
        self.stage(InitStage::ClockSelect, Self::select_clock)?;
        self.stage(InitStage::PollId, |eve| {
            eve.poll_boot(REG_ID, CHIP_ID_READY)
        })?;
        self.stage(InitStage::PollReset, |eve| eve.poll_boot(REG_CPURESET, 0))?;
        self.stage(InitStage::ChipId, Self::check_chip_id)?;
        self.stage(InitStage::Frequency, |eve| {
            let frequency = eve.profile.frequency;
            if frequency == 0 {
                return Ok(());
            }
            eve.write32(REG_FREQUENCY, frequency)
        })?;
        self.stage(InitStage::SyncIndex, |eve| eve.sync_write_index().map(|_| ()))?;
        self.stage(InitStage::EarlyInit, |eve| hooks.early_init(eve))?;
        self.stage(InitStage::PanelRegisters, Self::program_panel)?;
        self.stage(InitStage::TouchInit, |eve| hooks.touch_init(eve))?;
        self.stage(InitStage::BootstrapList, |eve| eve.bootstrap_list(config.swap))?;
        self.stage(InitStage::EnableOutput, |eve| eve.enable_output(config))?;
        info!("eve: ready");
        Ok(())
    }

    /// [`begin`](Self::begin) with [`DefaultHooks`] and
    /// [`InitConfig::default`].
    pub fn begin_default(&mut self) -> Result<(), Error<T::Error>> {
        self.begin(&mut DefaultHooks, &InitConfig::default())
    }

    fn stage(
        &mut self,
        stage: InitStage,
        run: impl FnOnce(&mut Self) -> Result<(), Error<T::Error>>,
    ) -> Result<(), Error<T::Error>> {
        debug!("eve: init {}", stage.name());
        run(self).map_err(|err| {
            warn!("eve: init failed during {}", stage.name());
            err
        })
    }

    fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.transport.begin().map_err(Error::Transport)?;
        self.power_off()?;
        self.transport.power(true).map_err(Error::Transport)?;
        self.transport.delay_ms(21);
        self.transport.select(true).map_err(Error::Transport)?;
        self.transport.init(true).map_err(Error::Transport)
    }

    fn select_clock(&mut self) -> Result<(), Error<T::Error>> {
        let source = match self.profile.clock_source {
            ClockSource::External => HostCommand::ClkExt,
            ClockSource::Internal => HostCommand::ClkInt,
        };
        self.host_command(source, 0)?;
        self.host_command(HostCommand::ClkSel, self.profile.clock_select.raw())?;
        self.host_command(HostCommand::Active, 0)?;
        self.transport.delay_ms(40);
        self.transport.init(false).map_err(Error::Transport)
    }

    fn poll_boot(&mut self, register: u32, expected: u8) -> Result<(), Error<T::Error>> {
        if self.wait_for_value(register, expected, BOOT_POLL_TRIES, 1)? == 0 {
            return Err(Error::Timeout { register });
        }
        Ok(())
    }

    fn check_chip_id(&mut self) -> Result<(), Error<T::Error>> {
        let expected = self.profile.chip_id;
        if expected == ChipId::Any {
            return Ok(());
        }
        let found = self.read32(REG_CHIP_ID)?;
        if found != expected.raw() {
            return Err(Error::ChipIdMismatch {
                expected: expected.raw(),
                found,
            });
        }
        debug!("eve: found {}", expected.name());
        Ok(())
    }

    fn program_panel(&mut self) -> Result<(), Error<T::Error>> {
        let profile = self.profile;
        self.write8(REG_PCLK, 0)?;
        self.write8(REG_PWM_DUTY, 0)?;
        self.apply_all(&timing_registers(profile))?;
        self.apply_all(&output_registers(profile))?;

        let (set, clear) = if profile.lcd_drive_10ma {
            (GPIOX_LCD_DRIVE_10MA, 0)
        } else {
            (0, GPIOX_LCD_DRIVE_10MA)
        };
        self.modify16(REG_GPIOX, set, clear)?;

        for entry in profile.pin_drive {
            self.host_command(HostCommand::PinDrive, entry.raw())?;
        }

        self.apply_all(&signal_registers(profile))?;
        if profile.outbits != 0 {
            self.write16(REG_OUTBITS, profile.outbits)?;
        }
        Ok(())
    }

    fn bootstrap_list(&mut self, swap: DlSwap) -> Result<(), Error<T::Error>> {
        self.reset_dl_index(DlIndex::new(0));
        self.dl_word(dl::clear_color(0))?;
        self.dl_word(dl::clear(true, true, true))?;
        self.dl_word(dl::display())?;
        self.write32(REG_DLSWAP, swap as u32)
    }

    fn enable_output(&mut self, config: &InitConfig) -> Result<(), Error<T::Error>> {
        self.modify16(REG_GPIOX, GPIOX_DISPLAY_ENABLE, 0)?;
        self.write8(REG_PCLK, self.profile.pclk)?;
        self.write16(REG_PWM_HZ, config.backlight_hz)?;
        self.write8(REG_PWM_DUTY, config.backlight_duty)?;
        if config.mute_audio {
            self.apply_all(&mute_registers())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use eve_specs::displays::{CFA480128, CFA800480};

    #[test]
    fn test_stage_names_are_unique() {
        for (i, a) in InitStage::ALL.iter().enumerate() {
            for b in InitStage::ALL.iter().skip(i.wrapping_add(1)) {
                assert_ne!(a.name(), b.name());
            }
        }
        assert_eq!(InitStage::TouchInit.name(), "touch-init");
    }

    #[test]
    fn test_default_config() {
        let config = InitConfig::default();
        assert_eq!(config.swap, DlSwap::Frame);
        assert_eq!(config.backlight_hz, 300);
        assert_eq!(config.backlight_duty, 32);
        assert!(!config.mute_audio);
    }

    #[test]
    fn test_timing_registers_from_profile() {
        let regs = timing_registers(&CFA480128);
        assert_eq!(regs[0].name, "HSIZE");
        assert_eq!(regs[0].value, 480);
        assert_eq!(regs[1].value, 1042);
        assert_eq!(regs[2].value, 41);
        assert_eq!(regs[4].value, 35);
        assert_eq!(regs[6].address, REG_VCYCLE);
        assert!(regs.iter().all(|r| r.width == RegisterWidth::U16));
    }

    #[test]
    fn test_plan_skips_unset_values() {
        let plan = panel_register_plan(&CFA480128, &InitConfig::default());
        assert!(plan.iter().all(|w| w.name != "FREQUENCY"));
        assert!(plan.iter().all(|w| w.name != "OUTBITS"));
        assert_eq!(plan.first().map(|w| w.name), Some("PCLK"));
        assert_eq!(plan.last().map(|w| (w.name, w.value)), Some(("PWM_DUTY", 32)));
    }

    #[test]
    fn test_plan_for_bt817_panel() {
        let config = InitConfig {
            mute_audio: true,
            ..InitConfig::default()
        };
        let plan = panel_register_plan(&CFA800480, &config);
        assert_eq!(plan[0].name, "FREQUENCY");
        assert_eq!(plan[0].value, 72_000_000);
        assert_eq!(plan[0].width, RegisterWidth::U32);
        let pclk = plan.iter().rev().find(|w| w.name == "PCLK").unwrap();
        assert_eq!(pclk.value, 2);
        let tail: Vec<&str> = plan.iter().rev().take(4).map(|w| w.name).collect();
        assert_eq!(tail, ["PLAY", "SOUND", "VOL_SOUND", "VOL_PB"]);
        assert_eq!(plan.len(), PLAN_CAPACITY - 1);
    }

    #[test]
    fn test_longest_plan_fits() {
        let profile = CFA800480.with_outbits(0x0666);
        let config = InitConfig {
            mute_audio: true,
            ..InitConfig::default()
        };
        let plan = panel_register_plan(&profile, &config);
        assert_eq!(plan.len(), PLAN_CAPACITY);
        assert_eq!(PLAN_CAPACITY, 26);
        assert_eq!(plan.iter().filter(|w| w.name == "OUTBITS").count(), 1);
        assert_eq!(plan.last().map(|w| (w.name, w.value)), Some(("PLAY", 1)));
    }
}
