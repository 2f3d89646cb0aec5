//! Drawing shortcuts on the co-processor ring
//!
//! Each helper appends a short, fixed sequence of commands to `RAM_CMD` and
//! returns the write index after it. Nothing is executed until
//! [`Eve::execute`] or [`dl_finish`](Eve::dl_finish).
//!
//! Vertex coordinates use the current `VERTEX_FORMAT`, which is 1/16 pixel
//! after `CMD_DLSTART`.

use platform::Transport;

use crate::builder::DisplayListBuilder;
use crate::registers::REG_PWM_DUTY;
use crate::{ClearFlags, CmdIndex, Error, Eve, Options, Primitive};

/// Largest `REG_PWM_DUTY` value (backlight fully on).
pub const BACKLIGHT_MAX: u8 = 128;

/// ROM font used by the spinner screens.
const SPINNER_FONT: u16 = 27;

/// Pack 8-bit channels into `0xRRGGBB`.
pub const fn to_rgb(r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([0, r, g, b])
}

/// Screen centre as a signed widget coordinate.
pub(crate) fn center(v: u16) -> i16 {
    i16::try_from(v).unwrap_or(i16::MAX)
}

impl<T: Transport> Eve<'_, T> {
    /// First free byte in `RAM_G` after the last image or inflate.
    ///
    /// Waits for the ring to drain, runs `CMD_GETPTR` and waits again.
    pub fn get_ptr(&mut self) -> Result<u32, Error<T::Error>> {
        self.wait_complete()?;
        let slot = self.cmd().get_ptr()?;
        self.execute(true)?;
        let ptr = self.read_result(slot)?;
        debug!("eve: RAM_G free from {:#x}", ptr);
        Ok(ptr)
    }

    /// End the list with `DISPLAY`, swap it in and start execution.
    pub fn dl_finish(&mut self, wait: bool) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.display()?;
        cmd.swap()?;
        self.execute(wait)
    }

    /// Set the clear colour and clear the buffers in `flags`.
    ///
    /// With [`ClearFlags::NONE`] only the colour is set.
    pub fn clear(
        &mut self,
        red: u8,
        green: u8,
        blue: u8,
        flags: ClearFlags,
    ) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.clear_color_rgb(red, green, blue)?;
        if flags.any() {
            cmd.clear(flags.color, flags.stencil, flags.tag)?;
        }
        Ok(cmd.index())
    }

    /// Drawing colour for the following commands.
    pub fn color(&mut self, red: u8, green: u8, blue: u8) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.color_rgb(red, green, blue)?;
        Ok(cmd.index())
    }

    /// Drawing colour from `0xRRGGBB`.
    pub fn color_rgb24(&mut self, rgb: u32) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.color(rgb)?;
        Ok(cmd.index())
    }

    /// Drawing alpha for the following commands.
    pub fn alpha(&mut self, alpha: u8) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.color_a(alpha)?;
        Ok(cmd.index())
    }

    /// Dot of diameter `size` centred on `(x, y)`.
    pub fn point(&mut self, x: i16, y: i16, size: u16) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.point_size(size)?;
        cmd.begin(Primitive::Points)?;
        cmd.vertex2f(x, y)?;
        cmd.end()?;
        Ok(cmd.index())
    }

    /// Line from `(x0, y0)` to `(x1, y1)`.
    pub fn line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        width: u16,
    ) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.line_width(width)?;
        cmd.begin(Primitive::Lines)?;
        cmd.vertex2f(x0, y0)?;
        cmd.vertex2f(x1, y1)?;
        cmd.end()?;
        Ok(cmd.index())
    }

    /// Solid rectangle between two corners.
    pub fn filled_rectangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
    ) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        // One pixel keeps the corners square.
        cmd.line_width(16)?;
        cmd.begin(Primitive::Rects)?;
        cmd.vertex2f(x0, y0)?;
        cmd.vertex2f(x1, y1)?;
        cmd.end()?;
        Ok(cmd.index())
    }

    /// Rectangle outline between two corners, `width` pixels thick.
    pub fn open_rectangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        width: u16,
    ) -> Result<CmdIndex, Error<T::Error>> {
        let mut cmd = self.cmd();
        cmd.line_width(width.saturating_mul(16))?;
        cmd.begin(Primitive::Lines)?;
        for (x, y) in [
            (x0, y0),
            (x1, y0),
            (x1, y0),
            (x1, y1),
            (x1, y1),
            (x0, y1),
            (x0, y1),
            (x0, y0),
        ] {
            cmd.vertex2f(x, y)?;
        }
        cmd.end()?;
        Ok(cmd.index())
    }

    /// Replace the screen with `message` and a spinner, both centred.
    ///
    /// The spinner keeps the co-processor busy until
    /// [`stop_spinner`](Self::stop_spinner).
    pub fn start_spinner(
        &mut self,
        clear_rgb: u32,
        text_rgb: u32,
        spinner_rgb: u32,
        message: &str,
    ) -> Result<CmdIndex, Error<T::Error>> {
        self.wait_complete()?;
        let (x, y) = (center(self.hcenter()), center(self.vcenter()));
        let mut cmd = self.cmd();
        cmd.dl_start()?;
        cmd.clear_color(clear_rgb)?;
        cmd.clear(true, true, true)?;
        cmd.color_a(255)?;
        cmd.color(text_rgb)?;
        cmd.text(x, y, SPINNER_FONT, Options::CENTER, message)?;
        cmd.color(spinner_rgb)?;
        cmd.spinner(x, y, 0, 1)?;
        self.dl_finish(false)
    }

    /// Stop the spinner and leave `message` on a cleared screen.
    pub fn stop_spinner(
        &mut self,
        clear_rgb: u32,
        text_rgb: u32,
        message: &str,
    ) -> Result<CmdIndex, Error<T::Error>> {
        self.wait_complete()?;
        let (x, y) = (center(self.hcenter()), center(self.vcenter()));
        let mut cmd = self.cmd();
        cmd.dl_start()?;
        cmd.clear_color(clear_rgb)?;
        cmd.clear(true, true, true)?;
        cmd.color_a(255)?;
        cmd.stop()?;
        cmd.color(text_rgb)?;
        cmd.text(x, y, SPINNER_FONT, Options::CENTER, message)?;
        self.dl_finish(false)
    }

    /// Backlight duty cycle, clamped to [`BACKLIGHT_MAX`].
    pub fn set_backlight(&mut self, duty: u8) -> Result<(), Error<T::Error>> {
        self.write8(REG_PWM_DUTY, duty.min(BACKLIGHT_MAX))
    }
}
