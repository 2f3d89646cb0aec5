//! Transport abstraction for EVE display controllers
//!
//! The EVE protocol is byte oriented: every transaction is framed by the
//! chip-select line and consists of a 3-byte header followed by data bytes.
//! A [`Transport`] only has to provide chip select, a single-byte transfer,
//! power-down control and a millisecond delay; everything else has a default
//! body built on [`Transport::transfer`] that implementations may override
//! with bulk transfers.
//!
//! All multi-byte values travel little-endian.

/// Byte-level link to one EVE chip.
pub trait Transport {
    /// Error type for bus and pin failures
    type Error: core::fmt::Debug;

    /// Prepare the hardware (pins, bus) before the first transaction.
    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Release the hardware after the chip has been powered down.
    fn end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Pause (true) or resume (false) use of a shared bus.
    fn pause(&mut self, pause: bool) -> Result<(), Self::Error> {
        let _ = pause;
        Ok(())
    }

    /// (Re)initialize the bus; `slow` selects the reduced clock required
    /// before the PLL is running.
    fn init(&mut self, slow: bool) -> Result<(), Self::Error>;

    /// Drive the power-down line: true powers the chip, false holds it in reset.
    fn power(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Assert (true) or release (false) chip select.
    ///
    /// Returns true when the line actually changed state.
    fn select(&mut self, enable: bool) -> Result<bool, Self::Error>;

    /// Exchange one byte.
    fn transfer(&mut self, value: u8) -> Result<u8, Self::Error>;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Send one byte.
    fn send8(&mut self, value: u8) -> Result<(), Self::Error> {
        self.transfer(value).map(|_| ())
    }

    /// Send a 16-bit value, least significant byte first.
    fn send16(&mut self, value: u16) -> Result<(), Self::Error> {
        for b in value.to_le_bytes() {
            self.send8(b)?;
        }
        Ok(())
    }

    /// Send a 32-bit value, least significant byte first.
    fn send32(&mut self, value: u32) -> Result<(), Self::Error> {
        for b in value.to_le_bytes() {
            self.send8(b)?;
        }
        Ok(())
    }

    /// Receive one byte (sends 0).
    fn receive8(&mut self) -> Result<u8, Self::Error> {
        self.transfer(0)
    }

    /// Receive a little-endian 16-bit value.
    fn receive16(&mut self) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.receive_buffer(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Receive a little-endian 32-bit value.
    fn receive32(&mut self) -> Result<u32, Self::Error> {
        let mut buf = [0u8; 4];
        self.receive_buffer(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Send a buffer; returns the number of bytes sent.
    fn send_buffer(&mut self, data: &[u8]) -> Result<u32, Self::Error> {
        let mut sent: u32 = 0;
        for &b in data {
            self.send8(b)?;
            sent = sent.wrapping_add(1);
        }
        Ok(sent)
    }

    /// Fill a buffer from the chip; returns the number of bytes received.
    fn receive_buffer(&mut self, buffer: &mut [u8]) -> Result<u32, Self::Error> {
        let mut received: u32 = 0;
        for slot in buffer.iter_mut() {
            *slot = self.receive8()?;
            received = received.wrapping_add(1);
        }
        Ok(received)
    }

    /// Send a nul-terminated string.
    ///
    /// At most `maxlen - 1` characters are sent, stopping early at an
    /// embedded nul; a terminating 0 is always sent. A `maxlen` of 0 means
    /// 65536. Returns the number of bytes sent including the terminator.
    fn send_string(&mut self, message: &str, maxlen: u16) -> Result<u32, Self::Error> {
        let mut sent: u32 = 0;
        for b in string_bytes(message, maxlen) {
            self.send8(b)?;
            sent = sent.wrapping_add(1);
        }
        Ok(sent)
    }

    /// Pad with zero bytes until `num` (bytes sent so far) is a multiple
    /// of 4; returns the padded count.
    fn send_alignment_bytes(&mut self, num: u32) -> Result<u32, Self::Error> {
        let pad = alignment_padding(num);
        for _ in 0..pad {
            self.send8(0)?;
        }
        Ok(num.wrapping_add(pad))
    }
}

/// The bytes of a nul-terminated string field: at most `maxlen - 1`
/// characters (65535 when `maxlen` is 0), cut at an embedded nul, then the
/// terminator.
///
/// ```
/// let bytes: Vec<u8> = platform::transport::string_bytes("hello", 4).collect();
/// assert_eq!(bytes, b"hel\0");
/// ```
pub fn string_bytes(message: &str, maxlen: u16) -> impl Iterator<Item = u8> + '_ {
    let limit = if maxlen == 0 {
        usize::from(u16::MAX)
    } else {
        usize::from(maxlen.wrapping_sub(1))
    };
    message
        .bytes()
        .take(limit)
        .take_while(|&b| b != 0)
        .chain(core::iter::once(0))
}

/// Zero bytes needed after `num` bytes to reach a 4-byte boundary.
pub const fn alignment_padding(num: u32) -> u32 {
    num.wrapping_neg() & 3
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        (**self).begin()
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        (**self).end()
    }

    fn pause(&mut self, pause: bool) -> Result<(), Self::Error> {
        (**self).pause(pause)
    }

    fn init(&mut self, slow: bool) -> Result<(), Self::Error> {
        (**self).init(slow)
    }

    fn power(&mut self, enable: bool) -> Result<(), Self::Error> {
        (**self).power(enable)
    }

    fn select(&mut self, enable: bool) -> Result<bool, Self::Error> {
        (**self).select(enable)
    }

    fn transfer(&mut self, value: u8) -> Result<u8, Self::Error> {
        (**self).transfer(value)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }

    fn send8(&mut self, value: u8) -> Result<(), Self::Error> {
        (**self).send8(value)
    }

    fn send16(&mut self, value: u16) -> Result<(), Self::Error> {
        (**self).send16(value)
    }

    fn send32(&mut self, value: u32) -> Result<(), Self::Error> {
        (**self).send32(value)
    }

    fn receive8(&mut self) -> Result<u8, Self::Error> {
        (**self).receive8()
    }

    fn receive16(&mut self) -> Result<u16, Self::Error> {
        (**self).receive16()
    }

    fn receive32(&mut self) -> Result<u32, Self::Error> {
        (**self).receive32()
    }

    fn send_buffer(&mut self, data: &[u8]) -> Result<u32, Self::Error> {
        (**self).send_buffer(data)
    }

    fn receive_buffer(&mut self, buffer: &mut [u8]) -> Result<u32, Self::Error> {
        (**self).receive_buffer(buffer)
    }

    fn send_string(&mut self, message: &str, maxlen: u16) -> Result<u32, Self::Error> {
        (**self).send_string(message, maxlen)
    }

    fn send_alignment_bytes(&mut self, num: u32) -> Result<u32, Self::Error> {
        (**self).send_alignment_bytes(num)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    /// Records every byte; answers reads with an incrementing counter.
    #[derive(Default)]
    struct Recorder {
        sent: std::vec::Vec<u8>,
        next: u8,
    }

    impl Transport for Recorder {
        type Error = core::convert::Infallible;

        fn init(&mut self, _slow: bool) -> Result<(), Self::Error> {
            Ok(())
        }

        fn power(&mut self, _enable: bool) -> Result<(), Self::Error> {
            Ok(())
        }

        fn select(&mut self, _enable: bool) -> Result<bool, Self::Error> {
            Ok(true)
        }

        fn transfer(&mut self, value: u8) -> Result<u8, Self::Error> {
            self.sent.push(value);
            self.next = self.next.wrapping_add(1);
            Ok(self.next)
        }

        fn delay_ms(&mut self, _ms: u32) {}
    }

    #[test]
    fn test_multibyte_values_are_little_endian() {
        let mut t = Recorder::default();
        t.send16(0x1234).unwrap();
        t.send32(0xAABB_CCDD).unwrap();
        assert_eq!(t.sent, [0x34, 0x12, 0xDD, 0xCC, 0xBB, 0xAA]);

        let mut t = Recorder::default();
        assert_eq!(t.receive32().unwrap(), 0x0403_0201);
        assert_eq!(t.sent, [0, 0, 0, 0]);
    }

    #[test]
    fn test_send_string_truncates_and_terminates() {
        let mut t = Recorder::default();
        assert_eq!(t.send_string("hello", 4).unwrap(), 4);
        assert_eq!(t.sent, b"hel\0");

        let mut t = Recorder::default();
        assert_eq!(t.send_string("ab\0cd", 16).unwrap(), 3);
        assert_eq!(t.sent, b"ab\0");

        let mut t = Recorder::default();
        assert_eq!(t.send_string("", 1).unwrap(), 1);
        assert_eq!(t.sent, [0]);
    }

    #[test]
    fn test_send_string_zero_maxlen_means_unbounded() {
        let mut t = Recorder::default();
        assert_eq!(t.send_string("abc", 0).unwrap(), 4);
    }

    #[test]
    fn test_alignment_padding() {
        let mut t = Recorder::default();
        assert_eq!(t.send_alignment_bytes(5).unwrap(), 8);
        assert_eq!(t.sent, [0, 0, 0]);
        assert_eq!(t.send_alignment_bytes(8).unwrap(), 8);
        assert_eq!(t.sent.len(), 3);
    }

    #[test]
    fn test_alignment_padding_counts() {
        let pads: std::vec::Vec<u32> = (0..8).map(alignment_padding).collect();
        assert_eq!(pads, [0, 3, 2, 1, 0, 3, 2, 1]);
        assert_eq!(alignment_padding(u32::MAX), 1);
    }

    #[test]
    fn test_string_bytes_caps_unbounded_strings() {
        let long = "x".repeat(70_000);
        assert_eq!(string_bytes(&long, 0).count(), 65_536);
        assert_eq!(string_bytes(&long, 0).last(), Some(0));
    }

    #[test]
    fn test_borrowed_transport_forwards() {
        fn send_via<T: Transport>(mut t: T) -> Result<u32, T::Error> {
            t.send_buffer(&[1, 2, 3])
        }

        let mut owned = Recorder::default();
        assert_eq!(send_via(&mut owned).unwrap(), 3);
        assert_eq!(owned.sent, [1, 2, 3]);
    }

    proptest::proptest! {
        #[test]
        fn prop_string_length(s in "[a-z]{0,40}", maxlen in 1u16..64) {
            let mut t = Recorder::default();
            let n = t.send_string(&s, maxlen).unwrap();
            let expected = s.len().min(usize::from(maxlen - 1)) + 1;
            proptest::prop_assert_eq!(n as usize, expected);
            proptest::prop_assert_eq!(t.sent.last().copied(), Some(0));
        }

        #[test]
        fn prop_alignment(num in 0u32..10_000) {
            let mut t = Recorder::default();
            let padded = t.send_alignment_bytes(num).unwrap();
            proptest::prop_assert_eq!(padded % 4, 0);
            proptest::prop_assert!(padded - num < 4);
            proptest::prop_assert!(t.sent.iter().all(|&b| b == 0));
        }
    }
}
