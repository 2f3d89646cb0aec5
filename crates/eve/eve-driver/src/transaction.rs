//! Transaction framing
//!
//! Every exchange with the chip is one chip-select cycle:
//!
//! ```text
//! read:          CS↓  A21..16  A15..8  A7..0  dummy  data...  CS↑
//! write:         CS↓  0x80|A21..16  A15..8  A7..0  data...    CS↑
//! host command:  CS↓  cmd  param  0x00                        CS↑
//! ```
//!
//! A transaction always begins by deselecting, so a previous one that was
//! left open (for example a co-processor record still streaming) is
//! terminated first. Data is little-endian.

use platform::Transport;

use crate::memory_map::ADDRESS_MASK;
use crate::{Error, Eve};

/// Header bit that marks a memory write.
pub const WRITE_FLAG: u32 = 0x80_0000;

/// Reduce an address to the 22 bits a header can carry.
///
/// Passing a wider address is a caller bug: debug builds assert, release
/// builds mask.
#[inline]
pub fn mask_address(addr: u32) -> u32 {
    debug_assert!(
        addr <= ADDRESS_MASK,
        "EVE address out of the 22-bit range"
    );
    addr & ADDRESS_MASK
}

/// Header bytes for a memory read at `addr`.
pub fn read_header(addr: u32) -> [u8; 3] {
    let [_, a, b, c] = mask_address(addr).to_be_bytes();
    [a, b, c]
}

/// Header bytes for a memory write at `addr`.
pub fn write_header(addr: u32) -> [u8; 3] {
    let [_, a, b, c] = (WRITE_FLAG | mask_address(addr)).to_be_bytes();
    [a, b, c]
}

impl<T: Transport> Eve<'_, T> {
    /// Deselect, select and send a 3-byte header.
    pub(crate) fn start(&mut self, b0: u8, b1: u8, b2: u8) -> Result<(), Error<T::Error>> {
        self.transport.select(false).map_err(Error::Transport)?;
        self.transport.select(true).map_err(Error::Transport)?;
        self.transport
            .send_buffer(&[b0, b1, b2])
            .map_err(Error::Transport)?;
        Ok(())
    }

    /// Open a read at `addr`; the dummy byte has been clocked when this
    /// returns, so the next bytes received are data.
    pub fn begin_read(&mut self, addr: u32) -> Result<(), Error<T::Error>> {
        let [a, b, c] = read_header(addr);
        self.start(a, b, c)?;
        self.transport.send8(0).map_err(Error::Transport)
    }

    /// Open a write at `addr`.
    pub fn begin_write(&mut self, addr: u32) -> Result<(), Error<T::Error>> {
        let [a, b, c] = write_header(addr);
        self.start(a, b, c)
    }

    /// Close the current transaction.
    pub fn end_transaction(&mut self) -> Result<(), Error<T::Error>> {
        self.transport.select(false).map_err(Error::Transport)?;
        Ok(())
    }
}
