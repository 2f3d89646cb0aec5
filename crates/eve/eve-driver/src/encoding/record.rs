//! Co-processor record encoding
//!
//! A record is a 4-byte command id followed by little-endian fields, an
//! optional nul-terminated string or raw buffer, and zero padding up to a
//! 4-byte boundary. Every typed co-processor method is a single call to
//! [`encode_record`] with a list of [`Arg`]s.
//!
//! ```
//! use eve_driver::encoding::record::{encode_record, Arg};
//!
//! let mut out: heapless::Vec<u8, 32> = heapless::Vec::new();
//! let len = encode_record(&mut out, 0xFFFF_FF0C, &[
//!     Arg::I16(10), Arg::I16(20), Arg::U16(28), Arg::U16(0), Arg::Str("Hi", 0),
//! ], &mut []).unwrap();
//! assert_eq!(len, 16);
//! assert_eq!(&out[12..], b"Hi\0\0");
//! ```

use platform::transport::{alignment_padding, string_bytes};

/// One field of a co-processor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// 2-byte unsigned field
    U16(u16),
    /// 2-byte signed field
    I16(i16),
    /// 4-byte unsigned field
    U32(u32),
    /// 4-byte signed field
    I32(i32),
    /// Nul-terminated string, at most `maxlen - 1` characters (0 means 65536)
    Str(&'a str, u16),
    /// Raw payload, zero-padded
    Bytes(&'a [u8]),
    /// 4-byte output slot the co-processor fills in
    Result,
}

/// Byte destination for a record.
///
/// Only [`put_u8`](Self::put_u8) is required.
pub trait RecordSink {
    /// Error type of the destination
    type Error;

    /// Append one byte.
    fn put_u8(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Append a little-endian 16-bit value.
    fn put_u16(&mut self, value: u16) -> Result<(), Self::Error> {
        for b in value.to_le_bytes() {
            self.put_u8(b)?;
        }
        Ok(())
    }

    /// Append a little-endian 32-bit value.
    fn put_u32(&mut self, value: u32) -> Result<(), Self::Error> {
        for b in value.to_le_bytes() {
            self.put_u8(b)?;
        }
        Ok(())
    }

    /// Append a buffer; returns its length.
    fn put_bytes(&mut self, data: &[u8]) -> Result<u32, Self::Error> {
        let mut sent: u32 = 0;
        for &b in data {
            self.put_u8(b)?;
            sent = sent.wrapping_add(1);
        }
        Ok(sent)
    }

    /// Append a nul-terminated string; returns the bytes written including
    /// the terminator.
    fn put_string(&mut self, message: &str, maxlen: u16) -> Result<u32, Self::Error> {
        let mut sent: u32 = 0;
        for b in string_bytes(message, maxlen) {
            self.put_u8(b)?;
            sent = sent.wrapping_add(1);
        }
        Ok(sent)
    }

    /// Append zero bytes until `num` is a multiple of 4; returns the padded
    /// count.
    fn put_padding(&mut self, num: u32) -> Result<u32, Self::Error> {
        let pad = alignment_padding(num);
        for _ in 0..pad {
            self.put_u8(0)?;
        }
        Ok(num.wrapping_add(pad))
    }
}

/// Fixed-capacity buffer was too small for the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferFull;

impl core::fmt::Display for BufferFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "record buffer full")
    }
}

/// Records can be staged in RAM, e.g. to build a command list for
/// `CMD_APPEND` or to compare against a capture.
impl<const N: usize> RecordSink for heapless::Vec<u8, N> {
    type Error = BufferFull;

    fn put_u8(&mut self, value: u8) -> Result<(), BufferFull> {
        self.push(value).map_err(|_| BufferFull)
    }
}

/// Encode one record into `sink`.
///
/// Returns the record length in bytes, id included. For every
/// [`Arg::Result`], the byte offset of the slot from the start of the
/// record is stored in the next entry of `slots`; surplus slots are left
/// untouched and surplus results are not reported. Offsets past 64 KiB
/// (only possible after a large [`Arg::Bytes`]) are stored modulo 65536,
/// which still lands on the right word of the ring.
pub fn encode_record<S: RecordSink + ?Sized>(
    sink: &mut S,
    id: u32,
    args: &[Arg<'_>],
    slots: &mut [u16],
) -> Result<u32, S::Error> {
    sink.put_u32(id)?;
    let mut len: u32 = 4;
    let mut slots = slots.iter_mut();

    for arg in args {
        match *arg {
            Arg::U16(v) => {
                sink.put_u16(v)?;
                len = len.wrapping_add(2);
            }
            Arg::I16(v) => {
                sink.put_u16(u16::from_ne_bytes(v.to_ne_bytes()))?;
                len = len.wrapping_add(2);
            }
            Arg::U32(v) => {
                sink.put_u32(v)?;
                len = len.wrapping_add(4);
            }
            Arg::I32(v) => {
                sink.put_u32(u32::from_ne_bytes(v.to_ne_bytes()))?;
                len = len.wrapping_add(4);
            }
            Arg::Str(s, maxlen) => {
                let n = sink.put_string(s, maxlen)?;
                len = len.wrapping_add(sink.put_padding(n)?);
            }
            Arg::Bytes(data) => {
                let n = sink.put_bytes(data)?;
                len = len.wrapping_add(sink.put_padding(n)?);
            }
            Arg::Result => {
                if let Some(slot) = slots.next() {
                    // Kept modulo 64 KiB, so exact modulo the 4 KiB ring.
                    let [lo, hi, ..] = len.to_le_bytes();
                    *slot = u16::from_le_bytes([lo, hi]);
                }
                sink.put_u32(0)?;
                len = len.wrapping_add(4);
            }
        }
    }
    Ok(len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    type Buf = heapless::Vec<u8, 256>;

    fn encode(id: u32, args: &[Arg<'_>], slots: &mut [u16]) -> (u32, Buf) {
        let mut out = Buf::new();
        let len = encode_record(&mut out, id, args, slots).unwrap();
        (len, out)
    }

    #[test]
    fn test_text_record_layout() {
        let (len, out) = encode(
            0xFFFF_FF0C,
            &[
                Arg::I16(-1),
                Arg::I16(64),
                Arg::U16(27),
                Arg::U16(0x600),
                Arg::Str("abc", 0),
            ],
            &mut [],
        );
        assert_eq!(len, 16);
        assert_eq!(
            out.as_slice(),
            &[
                0x0C, 0xFF, 0xFF, 0xFF, //
                0xFF, 0xFF, 0x40, 0x00, //
                0x1B, 0x00, 0x00, 0x06, //
                b'a', b'b', b'c', 0,
            ]
        );
    }

    #[test]
    fn test_string_pads_with_zeros() {
        let (len, out) = encode(0xFFFF_FF0C, &[Arg::Str("abcd", 0)], &mut []);
        // 4 chars + nul = 5, padded to 8
        assert_eq!(len, 12);
        assert_eq!(&out[4..], b"abcd\0\0\0\0");
    }

    #[test]
    fn test_string_truncated_to_maxlen() {
        let (len, out) = encode(0xFFFF_FF0C, &[Arg::Str("hello", 3)], &mut []);
        assert_eq!(len, 8);
        assert_eq!(&out[4..], b"he\0\0");
    }

    #[test]
    fn test_string_field_matches_transport_rule() {
        for (text, maxlen) in [("hello", 4), ("ab\0cd", 16), ("", 1), ("abc", 0)] {
            let (len, out) = encode(0xFFFF_FF0C, &[Arg::Str(text, maxlen)], &mut []);
            let expected: std::vec::Vec<u8> = string_bytes(text, maxlen).collect();
            let field = &out[4..];
            assert_eq!(&field[..expected.len()], expected.as_slice(), "{text:?}");
            assert!(field[expected.len()..].iter().all(|&b| b == 0));
            assert_eq!(len % 4, 0);
        }
    }

    #[test]
    fn test_buffer_padding() {
        let (len, out) = encode(
            0xFFFF_FF22,
            &[Arg::U32(0x1000), Arg::Bytes(&[1, 2, 3, 4, 5])],
            &mut [],
        );
        assert_eq!(len, 16);
        assert_eq!(&out[8..], &[1, 2, 3, 4, 5, 0, 0, 0]);

        let (len, _) = encode(0xFFFF_FF22, &[Arg::Bytes(&[])], &mut []);
        assert_eq!(len, 4);
    }

    #[test]
    fn test_result_slot_offsets() {
        let mut slots = [0u16; 3];
        let (len, out) = encode(
            0xFFFF_FF25,
            &[Arg::Result, Arg::Result, Arg::Result],
            &mut slots,
        );
        assert_eq!(len, 16);
        assert_eq!(slots, [4, 8, 12]);
        assert!(out[4..].iter().all(|&b| b == 0));
    }

    /// Counts bytes without storing them.
    struct Counter(u32);

    impl RecordSink for Counter {
        type Error = core::convert::Infallible;

        fn put_u8(&mut self, _value: u8) -> Result<(), Self::Error> {
            self.0 = self.0.wrapping_add(1);
            Ok(())
        }
    }

    #[test]
    fn test_result_after_large_payload_wraps_with_ring() {
        let payload = std::vec![0xA5u8; 70_000];
        let mut slots = [0u16; 1];
        let mut sink = Counter(0);
        let len = encode_record(
            &mut sink,
            0xFFFF_FF22,
            &[Arg::Bytes(&payload), Arg::Result],
            &mut slots,
        )
        .unwrap();
        assert_eq!(len, 70_008);
        assert_eq!(sink.0, len);
        // 70_004 modulo 65536, not clamped
        assert_eq!(slots, [4468]);
        let slot = crate::CmdIndex::new(0) + slots[0];
        assert_eq!(slot.value(), 372); // 70_004 mod 4096
    }

    #[test]
    fn test_result_after_inputs() {
        let mut slots = [0u16; 1];
        let (len, _) = encode(
            0xFFFF_FF18,
            &[Arg::U32(0), Arg::U32(1024), Arg::Result],
            &mut slots,
        );
        assert_eq!(len, 16);
        assert_eq!(slots, [12]);
    }

    #[test]
    fn test_signed_fields() {
        let (_, out) = encode(0xFFFF_FF27, &[Arg::I32(-65536)], &mut []);
        assert_eq!(&out[4..], &[0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn test_buffer_full_is_reported() {
        let mut out: heapless::Vec<u8, 6> = heapless::Vec::new();
        assert_eq!(
            encode_record(&mut out, 0xFFFF_FF0C, &[Arg::Str("long", 0)], &mut []),
            Err(BufferFull)
        );
    }
}
