//! Register and memory access
//!
//! Each call is exactly one transaction. [`Eve::wait_for_value`] is the only
//! retry primitive in the driver; everything else reports the first
//! transport error.

use platform::Transport;

use crate::{Error, Eve};

impl<T: Transport> Eve<'_, T> {
    /// Read one byte.
    pub fn read8(&mut self, addr: u32) -> Result<u8, Error<T::Error>> {
        self.begin_read(addr)?;
        let value = self.transport.receive8().map_err(Error::Transport)?;
        self.end_transaction()?;
        Ok(value)
    }

    /// Read a little-endian 16-bit value.
    pub fn read16(&mut self, addr: u32) -> Result<u16, Error<T::Error>> {
        self.begin_read(addr)?;
        let value = self.transport.receive16().map_err(Error::Transport)?;
        self.end_transaction()?;
        Ok(value)
    }

    /// Read a little-endian 32-bit value.
    pub fn read32(&mut self, addr: u32) -> Result<u32, Error<T::Error>> {
        self.begin_read(addr)?;
        let value = self.transport.receive32().map_err(Error::Transport)?;
        self.end_transaction()?;
        Ok(value)
    }

    /// Write one byte.
    pub fn write8(&mut self, addr: u32, value: u8) -> Result<(), Error<T::Error>> {
        self.begin_write(addr)?;
        self.transport.send8(value).map_err(Error::Transport)?;
        self.end_transaction()
    }

    /// Write a little-endian 16-bit value.
    pub fn write16(&mut self, addr: u32, value: u16) -> Result<(), Error<T::Error>> {
        self.begin_write(addr)?;
        self.transport.send16(value).map_err(Error::Transport)?;
        self.end_transaction()
    }

    /// Write a little-endian 32-bit value.
    pub fn write32(&mut self, addr: u32, value: u32) -> Result<(), Error<T::Error>> {
        self.begin_write(addr)?;
        self.transport.send32(value).map_err(Error::Transport)?;
        self.end_transaction()
    }

    /// Fill `buffer` from consecutive addresses starting at `addr`.
    pub fn read_buffer(&mut self, addr: u32, buffer: &mut [u8]) -> Result<(), Error<T::Error>> {
        self.begin_read(addr)?;
        self.transport
            .receive_buffer(buffer)
            .map_err(Error::Transport)?;
        self.end_transaction()
    }

    /// Write `data` to consecutive addresses starting at `addr`.
    pub fn write_buffer(&mut self, addr: u32, data: &[u8]) -> Result<(), Error<T::Error>> {
        self.begin_write(addr)?;
        self.transport.send_buffer(data).map_err(Error::Transport)?;
        self.end_transaction()
    }

    /// Poll the byte at `addr` until it equals `expected`.
    ///
    /// Tries at most `max_tries` times and sleeps `delay_ms` between
    /// unsuccessful tries. Returns the number of tries that were still left
    /// when the value matched (at least 1), or 0 on timeout.
    pub fn wait_for_value(
        &mut self,
        addr: u32,
        expected: u8,
        max_tries: u32,
        delay_ms: u32,
    ) -> Result<u32, Error<T::Error>> {
        let mut remaining = max_tries;
        while remaining > 0 {
            if self.read8(addr)? == expected {
                return Ok(remaining);
            }
            remaining = remaining.wrapping_sub(1);
            if remaining > 0 {
                self.transport.delay_ms(delay_ms);
            }
        }
        Ok(0)
    }

    /// Read-modify-write a 16-bit register: bits in `set` are set, bits in
    /// `clear` are cleared.
    pub fn modify16(&mut self, addr: u32, set: u16, clear: u16) -> Result<u16, Error<T::Error>> {
        let value = (self.read16(addr)? & !clear) | set;
        self.write16(addr, value)?;
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registers::{REG_GPIOX, REG_ID};
    use eve_specs::displays::CFA480128;
    use platform::mocks::{Event, FakeEve, FakeError};

    #[test]
    fn test_register_round_trip() {
        let mut fake = FakeEve::new();
        let mut eve = Eve::new(&mut fake, &CFA480128);
        eve.write32(0x1000, 0xDEAD_BEEF).unwrap();
        eve.write16(0x1004, 0x1234).unwrap();
        eve.write8(0x1006, 0x56).unwrap();
        assert_eq!(eve.read32(0x1000).unwrap(), 0xDEAD_BEEF);
        assert_eq!(eve.read16(0x1004).unwrap(), 0x1234);
        assert_eq!(eve.read8(0x1006).unwrap(), 0x56);
        drop(eve);
        assert_eq!(fake.bytes_at(0x1000, 4), [0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn test_each_access_is_one_transaction() {
        let mut fake = FakeEve::new();
        let mut eve = Eve::new(&mut fake, &CFA480128);
        eve.write_buffer(0x2000, &[1, 2, 3, 4, 5]).unwrap();
        let mut back = [0u8; 5];
        eve.read_buffer(0x2000, &mut back).unwrap();
        assert_eq!(back, [1, 2, 3, 4, 5]);
        drop(eve);
        assert_eq!(
            fake.events(),
            &[
                Event::Write {
                    addr: 0x2000,
                    data: vec![1, 2, 3, 4, 5]
                },
                Event::Read {
                    addr: 0x2000,
                    len: 5
                },
            ]
        );
    }

    #[test]
    fn test_wait_for_value_reports_remaining_tries() {
        let mut fake = FakeEve::new();
        fake.script_reads(REG_ID, [0, 0, 0x7C]);
        let mut eve = Eve::new(&mut fake, &CFA480128);
        assert_eq!(eve.wait_for_value(REG_ID, 0x7C, 250, 1).unwrap(), 248);
        drop(eve);
        let delays = fake
            .events()
            .iter()
            .filter(|e| matches!(e, Event::Delay(1)))
            .count();
        assert_eq!(delays, 2);
    }

    #[test]
    fn test_wait_for_value_times_out() {
        let mut fake = FakeEve::new();
        let mut eve = Eve::new(&mut fake, &CFA480128);
        assert_eq!(eve.wait_for_value(REG_ID, 0x7C, 5, 2).unwrap(), 0);
        drop(eve);
        assert_eq!(fake.reads_of(REG_ID), 5);
        let delays = fake
            .events()
            .iter()
            .filter(|e| matches!(e, Event::Delay(2)))
            .count();
        assert_eq!(delays, 4);
    }

    #[test]
    fn test_wait_for_value_first_try() {
        let mut fake = FakeEve::booted(0);
        let mut eve = Eve::new(&mut fake, &CFA480128);
        assert_eq!(eve.wait_for_value(REG_ID, 0x7C, 1, 1).unwrap(), 1);
    }

    #[test]
    fn test_modify16() {
        let mut fake = FakeEve::new();
        fake.set_u16(REG_GPIOX, 0x10FF);
        let mut eve = Eve::new(&mut fake, &CFA480128);
        assert_eq!(eve.modify16(REG_GPIOX, 0x8000, 0x1000).unwrap(), 0x80FF);
    }

    #[test]
    fn test_transport_error_propagates() {
        let mut fake = FakeEve::new();
        fake.fail_after(0);
        let mut eve = Eve::new(&mut fake, &CFA480128);
        assert_eq!(eve.read8(REG_ID), Err(Error::Transport(FakeError)));
    }
}
