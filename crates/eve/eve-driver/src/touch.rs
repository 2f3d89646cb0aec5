//! Touch read-back and calibration
//!
//! Resistive and capacitive parts put different registers at the same
//! addresses (see [`registers`](crate::registers)). The profile's chip id
//! picks the set through [`ChipId::touch_engine`]; with [`ChipId::Any`] only
//! the registers both engines share are used.

use eve_specs::{ChipId, TouchEngine};
use platform::Transport;

use crate::builder::DisplayListBuilder;
use crate::helpers::center;
use crate::registers::capacitive::{
    REG_CTOUCH_EXTENDED, REG_CTOUCH_TOUCH0_XY, REG_CTOUCH_TOUCH1_XY, REG_CTOUCH_TOUCH2_XY,
    REG_CTOUCH_TOUCH3_XY, REG_CTOUCH_TOUCH4_X, REG_CTOUCH_TOUCH4_Y,
};
use crate::registers::resistive::{REG_TOUCH_MODE, REG_TOUCH_RZTHRESH, REG_TOUCH_SCREEN_XY};
use crate::registers::{REG_TOUCH_TAG, REG_TOUCH_TRANSFORM};
use crate::{Error, Eve, Options, TouchMode};

/// Coordinate the touch engine reports when nothing is touched.
pub const NO_TOUCH: i16 = -32768;

/// One touch point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// X in pixels
    pub x: i16,
    /// Y in pixels
    pub y: i16,
}

impl TouchPoint {
    /// Split a packed `X << 16 | Y` register; `None` when not touched.
    pub fn from_xy(raw: u32) -> Option<Self> {
        let [x_hi, x_lo, y_hi, y_lo] = raw.to_be_bytes();
        let x = i16::from_be_bytes([x_hi, x_lo]);
        let y = i16::from_be_bytes([y_hi, y_lo]);
        (x != NO_TOUCH && y != NO_TOUCH).then_some(Self { x, y })
    }
}

/// Primary touch and the tag under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Touched point, `None` when the screen is not touched
    pub point: Option<TouchPoint>,
    /// `TAG` value of the touched object, 0 for none
    pub tag: u8,
}

impl TouchSample {
    /// True when a finger or stylus is down.
    pub const fn is_touched(&self) -> bool {
        self.point.is_some()
    }
}

impl<T: Transport> Eve<'_, T> {
    /// Primary touch point and tag.
    pub fn read_touch(&mut self) -> Result<TouchSample, Error<T::Error>> {
        let xy = self.read32(REG_TOUCH_SCREEN_XY)?;
        let tag = self.read8(REG_TOUCH_TAG)?;
        Ok(TouchSample {
            point: TouchPoint::from_xy(xy),
            tag,
        })
    }

    /// All five points of a capacitive controller in extended mode.
    ///
    /// Fails with [`Error::Unsupported`] unless the profile names a
    /// capacitive chip.
    pub fn read_touch_points(&mut self) -> Result<[Option<TouchPoint>; 5], Error<T::Error>> {
        if self.touch_engine() != Some(TouchEngine::Capacitive) {
            return Err(Error::Unsupported);
        }
        let mut points = [None; 5];
        for (slot, reg) in points.iter_mut().zip([
            REG_CTOUCH_TOUCH0_XY,
            REG_CTOUCH_TOUCH1_XY,
            REG_CTOUCH_TOUCH2_XY,
            REG_CTOUCH_TOUCH3_XY,
        ]) {
            *slot = TouchPoint::from_xy(self.read32(reg)?);
        }
        // Touch 4 is split over two registers.
        let x = self.read16(REG_CTOUCH_TOUCH4_X)?;
        let y = self.read16(REG_CTOUCH_TOUCH4_Y)?;
        if let Some(last) = points.last_mut() {
            *last = TouchPoint::from_xy(u32::from(x).wrapping_shl(16) | u32::from(y));
        }
        Ok(points)
    }

    /// Switch a capacitive controller between single-touch (false) and
    /// five-point (true) reporting.
    pub fn set_extended_touch(&mut self, extended: bool) -> Result<(), Error<T::Error>> {
        if self.touch_engine() != Some(TouchEngine::Capacitive) {
            return Err(Error::Unsupported);
        }
        self.write8(REG_CTOUCH_EXTENDED, u8::from(extended))
    }

    /// Sampling mode of the touch engine.
    pub fn set_touch_mode(&mut self, mode: TouchMode) -> Result<(), Error<T::Error>> {
        self.write8(REG_TOUCH_MODE, mode as u8)
    }

    /// Stop touch sampling.
    pub fn disable_touch(&mut self) -> Result<(), Error<T::Error>> {
        self.write8(REG_TOUCH_MODE, TouchMode::Off as u8)?;
        self.write16(REG_TOUCH_RZTHRESH, 0)
    }

    /// Load a calibration matrix, e.g. one saved after [`calibrate`](Self::calibrate).
    pub fn set_touch_transform(&mut self, matrix: [u32; 6]) -> Result<(), Error<T::Error>> {
        for (reg, value) in REG_TOUCH_TRANSFORM.into_iter().zip(matrix) {
            self.write32(reg, value)?;
        }
        Ok(())
    }

    /// Current calibration matrix, A..F.
    pub fn touch_transform(&mut self) -> Result<[u32; 6], Error<T::Error>> {
        let mut matrix = [0u32; 6];
        for (value, reg) in matrix.iter_mut().zip(REG_TOUCH_TRANSFORM) {
            *value = self.read32(reg)?;
        }
        Ok(matrix)
    }

    /// Run the interactive calibration with `prompt` centred on screen.
    ///
    /// Blocks until the user has tapped all three dots. Returns the
    /// co-processor result, which is 0 when calibration failed.
    pub fn calibrate(&mut self, prompt: &str) -> Result<u32, Error<T::Error>> {
        let (x, y) = (center(self.hcenter()), center(self.vcenter()));
        let slot = {
            let mut cmd = self.cmd();
            cmd.dl_start()?;
            cmd.clear_color_rgb(0, 0, 0)?;
            cmd.clear(true, true, true)?;
            cmd.color_rgb(255, 255, 255)?;
            cmd.text(x, y, 27, Options::CENTER, prompt)?;
            cmd.calibrate()?
        };
        self.execute(true)?;
        let result = self.read_result(slot)?;
        if result == 0 {
            warn!("eve: touch calibration failed");
        }
        Ok(result)
    }

    fn touch_engine(&self) -> Option<TouchEngine> {
        match self.profile.chip_id {
            ChipId::Any => None,
            chip => chip.touch_engine(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use eve_specs::displays::{CFA480128, CFA800480};
    use platform::mocks::FakeEve;

    #[test]
    fn test_no_touch_reads_none() {
        let mut fake = FakeEve::new();
        fake.set_u32(REG_TOUCH_SCREEN_XY, 0x8000_8000);
        let mut eve = Eve::new(&mut fake, &CFA480128);
        let sample = eve.read_touch().unwrap();
        assert!(!sample.is_touched());
        assert_eq!(sample.tag, 0);
    }

    #[test]
    fn test_touch_point_and_tag() {
        let mut fake = FakeEve::new();
        fake.set_u32(REG_TOUCH_SCREEN_XY, (120 << 16) | 45);
        fake.set_u8(REG_TOUCH_TAG, 7);
        let mut eve = Eve::new(&mut fake, &CFA480128);
        let sample = eve.read_touch().unwrap();
        assert_eq!(sample.point, Some(TouchPoint { x: 120, y: 45 }));
        assert_eq!(sample.tag, 7);
    }

    #[test]
    fn test_multi_touch_needs_capacitive_chip() {
        let mut fake = FakeEve::new();
        let mut eve = Eve::new(&mut fake, &CFA480128);
        assert_eq!(eve.read_touch_points(), Err(Error::Unsupported));
        assert_eq!(eve.set_extended_touch(true), Err(Error::Unsupported));
    }

    #[test]
    fn test_multi_touch_reads_five_points() {
        let mut fake = FakeEve::new();
        for reg in [REG_CTOUCH_TOUCH0_XY, REG_CTOUCH_TOUCH2_XY, REG_CTOUCH_TOUCH3_XY] {
            fake.set_u32(reg, 0x8000_8000);
        }
        fake.set_u32(REG_CTOUCH_TOUCH1_XY, (10 << 16) | 20);
        fake.set_u16(REG_CTOUCH_TOUCH4_X, 300);
        fake.set_u16(REG_CTOUCH_TOUCH4_Y, 400);
        let mut eve = Eve::new(&mut fake, &CFA800480);
        let points = eve.read_touch_points().unwrap();
        assert_eq!(
            points,
            [
                None,
                Some(TouchPoint { x: 10, y: 20 }),
                None,
                None,
                Some(TouchPoint { x: 300, y: 400 }),
            ]
        );
    }

    #[test]
    fn test_transform_round_trip() {
        let mut fake = FakeEve::new();
        let mut eve = Eve::new(&mut fake, &CFA480128);
        let matrix = [0x1_0000, 0, 0xFFFF_FFF0, 0, 0x1_0000, 12];
        eve.set_touch_transform(matrix).unwrap();
        assert_eq!(eve.touch_transform().unwrap(), matrix);
    }

    #[test]
    fn test_disable_touch_writes() {
        let mut fake = FakeEve::new();
        fake.set_u16(REG_TOUCH_RZTHRESH, 1200);
        let mut eve = Eve::new(&mut fake, &CFA480128);
        eve.disable_touch().unwrap();
        drop(eve);
        assert_eq!(fake.writes_to(REG_TOUCH_MODE), [vec![0]]);
        assert_eq!(fake.writes_to(REG_TOUCH_RZTHRESH), [vec![0, 0]]);
    }
}
