//! embedded-hal 1.0 SPI transport
//!
//! Chip select is driven manually rather than through `SpiDevice`: an EVE
//! transaction (header, dummy byte, payload) is often issued as several bus
//! calls, and the chip must stay selected across all of them.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::Transport;

/// Errors from the SPI transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<S, C, P> {
    /// SPI bus error
    Spi(S),
    /// Chip select pin error
    ChipSelect(C),
    /// Power-down pin error
    PowerDown(P),
}

#[cfg(feature = "std")]
impl<S: core::fmt::Debug, C: core::fmt::Debug, P: core::fmt::Debug> std::error::Error
    for TransportError<S, C, P>
{
}

impl<S, C, P> core::fmt::Display for TransportError<S, C, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(_) => write!(f, "SPI bus error"),
            Self::ChipSelect(_) => write!(f, "chip select pin error"),
            Self::PowerDown(_) => write!(f, "power-down pin error"),
        }
    }
}

/// Hook that switches the bus between the slow boot clock and full speed.
///
/// Before the PLL is running the chip accepts at most 11 MHz; afterwards up
/// to 30 MHz. Bus clock changes are HAL specific, so the caller supplies them.
pub type SpeedSwitch<SPI> = fn(&mut SPI, bool) -> Result<(), <SPI as embedded_hal::spi::ErrorType>::Error>;

/// [`Transport`] over an embedded-hal SPI bus with manual chip select.
pub struct SpiTransport<SPI, CS, PD, D>
where
    SPI: SpiBus,
{
    spi: SPI,
    cs: CS,
    pd: PD,
    delay: D,
    speed: Option<SpeedSwitch<SPI>>,
    selected: bool,
}

impl<SPI, CS, PD, D> SpiTransport<SPI, CS, PD, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    PD: OutputPin,
    D: DelayNs,
{
    /// Create a transport. The chip is assumed deselected.
    pub fn new(spi: SPI, cs: CS, pd: PD, delay: D) -> Self {
        Self {
            spi,
            cs,
            pd,
            delay,
            speed: None,
            selected: false,
        }
    }

    /// Install a bus clock switch used by [`Transport::init`].
    #[must_use]
    pub fn with_speed_switch(mut self, switch: SpeedSwitch<SPI>) -> Self {
        self.speed = Some(switch);
        self
    }

    /// Release the bus, pins and delay.
    pub fn release(self) -> (SPI, CS, PD, D) {
        (self.spi, self.cs, self.pd, self.delay)
    }

    /// Current chip-select state as tracked by the transport.
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

impl<SPI, CS, PD, D> Transport for SpiTransport<SPI, CS, PD, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    PD: OutputPin,
    D: DelayNs,
{
    type Error = TransportError<SPI::Error, CS::Error, PD::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(TransportError::ChipSelect)?;
        self.selected = false;
        Ok(())
    }

    fn init(&mut self, slow: bool) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("spi transport: init slow={}", slow);
        match self.speed {
            Some(switch) => switch(&mut self.spi, slow).map_err(TransportError::Spi),
            None => Ok(()),
        }
    }

    fn power(&mut self, enable: bool) -> Result<(), Self::Error> {
        if enable {
            self.pd.set_high().map_err(TransportError::PowerDown)
        } else {
            self.pd.set_low().map_err(TransportError::PowerDown)
        }
    }

    fn select(&mut self, enable: bool) -> Result<bool, Self::Error> {
        if enable == self.selected {
            return Ok(false);
        }
        if enable {
            self.cs.set_low().map_err(TransportError::ChipSelect)?;
        } else {
            // All clocked-out bytes must reach the chip before CS rises.
            self.spi.flush().map_err(TransportError::Spi)?;
            self.cs.set_high().map_err(TransportError::ChipSelect)?;
        }
        self.selected = enable;
        Ok(true)
    }

    fn transfer(&mut self, value: u8) -> Result<u8, Self::Error> {
        let mut buf = [value];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(TransportError::Spi)?;
        let [received] = buf;
        Ok(received)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn send8(&mut self, value: u8) -> Result<(), Self::Error> {
        self.spi.write(&[value]).map_err(TransportError::Spi)
    }

    fn send16(&mut self, value: u16) -> Result<(), Self::Error> {
        self.spi
            .write(&value.to_le_bytes())
            .map_err(TransportError::Spi)
    }

    fn send32(&mut self, value: u32) -> Result<(), Self::Error> {
        self.spi
            .write(&value.to_le_bytes())
            .map_err(TransportError::Spi)
    }

    fn send_buffer(&mut self, data: &[u8]) -> Result<u32, Self::Error> {
        self.spi.write(data).map_err(TransportError::Spi)?;
        Ok(u32::try_from(data.len()).unwrap_or(u32::MAX))
    }

    fn receive_buffer(&mut self, buffer: &mut [u8]) -> Result<u32, Self::Error> {
        buffer.fill(0);
        self.spi
            .transfer_in_place(buffer)
            .map_err(TransportError::Spi)?;
        Ok(u32::try_from(buffer.len()).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    type TestTransport = SpiTransport<SpiMock<u8>, PinMock, PinMock, NoopDelay>;

    fn finish(t: TestTransport) {
        let (mut spi, mut cs, mut pd, _) = t.release();
        spi.done();
        cs.done();
        pd.done();
    }

    #[test]
    fn test_select_toggles_only_on_change() {
        let spi = SpiMock::new(&[SpiTransaction::flush()]);
        let cs = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let pd = PinMock::new(&[]);
        let mut t = SpiTransport::new(spi, cs, pd, NoopDelay);

        assert!(!t.select(false).unwrap());
        assert!(t.select(true).unwrap());
        assert!(t.is_selected());
        assert!(!t.select(true).unwrap());
        assert!(t.select(false).unwrap());
        finish(t);
    }

    #[test]
    fn test_power_drives_pd_line() {
        let spi = SpiMock::new(&[]);
        let cs = PinMock::new(&[]);
        let pd = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut t = SpiTransport::new(spi, cs, pd, NoopDelay);
        t.power(false).unwrap();
        t.power(true).unwrap();
        finish(t);
    }

    #[test]
    fn test_words_are_sent_little_endian() {
        let spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x34, 0x12]),
            SpiTransaction::write_vec(vec![0x78, 0x56, 0x34, 0x12]),
            SpiTransaction::write_vec(vec![0xAB]),
        ]);
        let mut t = SpiTransport::new(spi, PinMock::new(&[]), PinMock::new(&[]), NoopDelay);
        t.send16(0x1234).unwrap();
        t.send32(0x1234_5678).unwrap();
        t.send8(0xAB).unwrap();
        finish(t);
    }

    #[test]
    fn test_receive_clocks_out_zeros() {
        let spi = SpiMock::new(&[
            SpiTransaction::transfer_in_place(vec![0, 0, 0, 0], vec![0x08, 0x17, 0x01, 0x00]),
            SpiTransaction::transfer_in_place(vec![0x55], vec![0x7C]),
        ]);
        let mut t = SpiTransport::new(spi, PinMock::new(&[]), PinMock::new(&[]), NoopDelay);
        assert_eq!(t.receive32().unwrap(), 0x0001_1708);
        assert_eq!(t.transfer(0x55).unwrap(), 0x7C);
        finish(t);
    }

    #[test]
    fn test_speed_switch_is_called() {
        fn switch(
            spi: &mut SpiMock<u8>,
            slow: bool,
        ) -> Result<(), <SpiMock<u8> as embedded_hal::spi::ErrorType>::Error> {
            // Encode the requested speed as a single written byte
            spi.write(&[u8::from(slow)])
        }

        let spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![1]),
            SpiTransaction::write_vec(vec![0]),
        ]);
        let mut t = SpiTransport::new(spi, PinMock::new(&[]), PinMock::new(&[]), NoopDelay)
            .with_speed_switch(switch);
        t.init(true).unwrap();
        t.init(false).unwrap();
        finish(t);
    }

    #[test]
    fn test_pin_error_is_mapped() {
        use embedded_hal_mock::eh1::MockError;
        use std::io::ErrorKind;

        let cs = PinMock::new(&[PinTransaction::set(PinState::Low)
            .with_error(MockError::Io(ErrorKind::NotConnected))]);
        let mut t = SpiTransport::new(SpiMock::new(&[]), cs, PinMock::new(&[]), NoopDelay);
        let err = t.select(true).unwrap_err();
        assert!(matches!(err, TransportError::ChipSelect(_)));
        assert!(!t.is_selected());
        finish(t);
    }

    /// Power-down line on a different GPIO driver than chip select.
    struct ExpanderPin;

    #[derive(Debug, PartialEq, Eq)]
    struct ExpanderNak;

    impl embedded_hal::digital::Error for ExpanderNak {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::digital::ErrorType for ExpanderPin {
        type Error = ExpanderNak;
    }

    impl OutputPin for ExpanderPin {
        fn set_low(&mut self) -> Result<(), ExpanderNak> {
            Err(ExpanderNak)
        }

        fn set_high(&mut self) -> Result<(), ExpanderNak> {
            Err(ExpanderNak)
        }
    }

    #[test]
    fn test_power_down_pin_keeps_its_own_error_type() {
        let mut cs = PinMock::new(&[]);
        let mut t = SpiTransport::new(SpiMock::new(&[]), cs.clone(), ExpanderPin, NoopDelay);
        let err = t.power(false).unwrap_err();
        assert!(matches!(err, TransportError::PowerDown(ExpanderNak)));
        assert_eq!(err.to_string(), "power-down pin error");
        let (mut spi, _, _, _) = t.release();
        spi.done();
        cs.done();
    }
}
