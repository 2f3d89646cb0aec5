//! Driver instance

use eve_specs::{PanelProfile, PdState, Pin};
use platform::Transport;

use crate::{CmdIndex, DlIndex, Error, HostCommand, PowerMode};

/// One EVE chip bound to a panel profile and a transport.
///
/// The transport is owned; pass `&mut transport` to keep ownership at the
/// call site (`Transport` is implemented for `&mut T`). The profile is
/// always borrowed and may be shared between instances.
///
/// Every operation takes `&mut self`, so transactions on one chip can never
/// interleave.
pub struct Eve<'p, T: Transport> {
    pub(crate) transport: T,
    pub(crate) profile: &'p PanelProfile<'p>,
    pub(crate) dl_index: DlIndex,
    pub(crate) cmd_index: CmdIndex,
    hcenter: u16,
    vcenter: u16,
}

impl<'p, T: Transport> Eve<'p, T> {
    /// Bind a transport to a panel. Nothing is sent until
    /// [`begin`](Self::begin).
    pub fn new(transport: T, profile: &'p PanelProfile<'p>) -> Self {
        Self {
            transport,
            profile,
            dl_index: DlIndex::new(0),
            cmd_index: CmdIndex::new(0),
            hcenter: profile.hcenter(),
            vcenter: profile.vcenter(),
        }
    }

    /// Panel profile this instance drives.
    pub fn profile(&self) -> &'p PanelProfile<'p> {
        self.profile
    }

    /// Shared access to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exclusive access to the transport.
    ///
    /// Bytes sent here bypass the driver's index bookkeeping.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    /// Horizontal centre of the active area in pixels.
    pub fn hcenter(&self) -> u16 {
        self.hcenter
    }

    /// Vertical centre of the active area in pixels.
    pub fn vcenter(&self) -> u16 {
        self.vcenter
    }

    /// Local display list write offset.
    pub fn dl_index(&self) -> DlIndex {
        self.dl_index
    }

    /// Local co-processor write offset.
    pub fn cmd_index(&self) -> CmdIndex {
        self.cmd_index
    }

    /// Pause (true) or resume (false) use of the bus. Pausing also
    /// deselects the chip so another device can use a shared bus.
    pub fn pause(&mut self, pause: bool) -> Result<(), Error<T::Error>> {
        self.transport.pause(pause).map_err(Error::Transport)?;
        if pause {
            self.transport.select(false).map_err(Error::Transport)?;
        }
        Ok(())
    }

    /// Hold the chip in power-down and release the transport hardware.
    pub fn end(&mut self) -> Result<(), Error<T::Error>> {
        debug!("eve: end");
        self.power_off()?;
        self.transport.end().map_err(Error::Transport)
    }

    /// Deselect and pull the power-down line low.
    pub(crate) fn power_off(&mut self) -> Result<(), Error<T::Error>> {
        self.pause(true)?;
        self.transport.delay_ms(20);
        self.transport.power(false).map_err(Error::Transport)?;
        self.transport.delay_ms(6);
        Ok(())
    }

    /// Send a host command.
    ///
    /// The 3-byte header is `cmd, param, 0`; host commands have no payload.
    pub fn host_command(&mut self, cmd: HostCommand, param: u8) -> Result<(), Error<T::Error>> {
        trace!("eve: host command {} {:#x}", cmd.name(), param);
        self.start(cmd as u8, param, 0)?;
        self.end_transaction()
    }

    /// Move the chip between active, standby, sleep and power-down.
    ///
    /// Waking from [`PowerMode::PowerDown`] loses all register state;
    /// run [`begin`](Self::begin) again afterwards.
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<T::Error>> {
        debug!("eve: power mode {}", mode.host_command().name());
        self.host_command(mode.host_command(), 0)
    }

    /// Choose what a pin does while the chip is powered down.
    pub fn pin_pd_state(&mut self, pin: Pin, state: PdState) -> Result<(), Error<T::Error>> {
        let param = pin.raw().wrapping_shl(2) | state as u8;
        self.host_command(HostCommand::PinPdState, param)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use eve_specs::displays::CFA480128;
    use platform::mocks::{Event, FakeEve};

    #[test]
    fn test_centres_from_profile() {
        let eve = Eve::new(FakeEve::new(), &CFA480128);
        assert_eq!(eve.hcenter(), 240);
        assert_eq!(eve.vcenter(), 64);
        assert_eq!(eve.dl_index().value(), 0);
        assert_eq!(eve.cmd_index().value(), 0);
    }

    #[test]
    fn test_host_command_framing() {
        let mut fake = FakeEve::new();
        let mut eve = Eve::new(&mut fake, &CFA480128);
        eve.set_power_mode(PowerMode::Standby).unwrap();
        eve.set_power_mode(PowerMode::Active).unwrap();
        eve.pin_pd_state(Pin::Backlight, PdState::PullDown).unwrap();
        drop(eve);
        assert_eq!(
            fake.host_commands(),
            vec![
                (0x41, 0),
                (0x00, 0),
                (0x71, Pin::Backlight.raw() << 2 | 1)
            ]
        );
        assert!(!fake.is_selected());
    }

    #[test]
    fn test_end_powers_down_and_releases() {
        let mut fake = FakeEve::new();
        let mut eve = Eve::new(&mut fake, &CFA480128);
        eve.end().unwrap();
        assert_eq!(
            fake.events(),
            &[
                Event::Pause(true),
                Event::Delay(20),
                Event::Power(false),
                Event::Delay(6),
                Event::End,
            ]
        );
    }
}
