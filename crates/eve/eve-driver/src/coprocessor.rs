//! Co-processor ring management
//!
//! `RAM_CMD` is a 4 KiB ring. The host appends at its local [`CmdIndex`],
//! publishes by writing `REG_CMD_WRITE`, and the chip advances
//! `REG_CMD_READ` as it executes. The ring is empty when both pointers
//! match; 4 bytes are always kept free so a full ring is never mistaken for
//! an empty one.
//!
//! `REG_CMD_READ == 0xFFF` means the co-processor hit an illegal command
//! and stopped. [`Eve::recover_from_fault`] restarts it.

use platform::Transport;

use crate::builder::DisplayListBuilder;
use crate::encoding::record::{encode_record, Arg, RecordSink};
use crate::encoding::DlWord;
use crate::memory_map::{CMD_READ_FAULT, RAM_CMD, RAM_ERR_REPORT, RAM_ERR_REPORT_SIZE};
use crate::registers::{REG_CMD_DL, REG_CMD_READ, REG_CMD_WRITE, REG_CPURESET};
use crate::{CmdIndex, Error, Eve};

/// Fault report copied out of `RAM_ERR_REPORT`.
pub type FaultMessage = heapless::String<RAM_ERR_REPORT_SIZE>;

/// What `REG_CMD_READ` says about the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoprocessorState {
    /// Read pointer caught up with the local write index
    Idle,
    /// Commands still pending
    Busy,
    /// Co-processor stopped on an illegal command
    Fault,
}

/// Location of an output field inside a queued record.
///
/// The co-processor overwrites the slot when it executes the command; read
/// it with [`Eve::read_result`] after [`Eve::wait_complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResultSlot(pub(crate) CmdIndex);

impl ResultSlot {
    /// Offset of the slot in `RAM_CMD`.
    pub fn index(self) -> CmdIndex {
        self.0
    }
}

impl<'p, T: Transport> Eve<'p, T> {
    /// Load the local write index from `REG_CMD_WRITE`.
    pub fn sync_write_index(&mut self) -> Result<CmdIndex, Error<T::Error>> {
        let write = self.read16(REG_CMD_WRITE)?;
        self.cmd_index = CmdIndex::new(write);
        Ok(self.cmd_index)
    }

    /// Queue one word at the local write index without publishing it.
    pub fn append(&mut self, word: u32) -> Result<CmdIndex, Error<T::Error>> {
        let addr = RAM_CMD.wrapping_add(u32::from(self.cmd_index));
        self.write32(addr, word)?;
        self.cmd_index += 4;
        Ok(self.cmd_index)
    }

    /// Bytes that can still be queued before the ring is full.
    pub fn free_space(&mut self) -> Result<u16, Error<T::Error>> {
        let read = CmdIndex::new(self.read16(REG_CMD_READ)?);
        let used = self.cmd_index - read;
        Ok(RAM_CMD_FREE.wrapping_sub(used) & CmdIndex::SIZE.wrapping_sub(1))
    }

    /// Compare `REG_CMD_READ` against the local write index.
    pub fn is_busy(&mut self) -> Result<CoprocessorState, Error<T::Error>> {
        let read = self.read16(REG_CMD_READ)?;
        Ok(if read == CMD_READ_FAULT {
            CoprocessorState::Fault
        } else if CmdIndex::new(read) != self.cmd_index {
            CoprocessorState::Busy
        } else {
            CoprocessorState::Idle
        })
    }

    /// Spin until the co-processor has executed everything published.
    ///
    /// There is no delay and no timeout; use
    /// [`wait_complete_timeout`](Self::wait_complete_timeout) where a hung
    /// chip must not hang the host.
    pub fn wait_complete(&mut self) -> Result<(), Error<T::Error>> {
        loop {
            match self.is_busy()? {
                CoprocessorState::Idle => return Ok(()),
                CoprocessorState::Busy => {}
                CoprocessorState::Fault => {
                    warn!("eve: co-processor fault");
                    return Err(Error::CoprocessorFault);
                }
            }
        }
    }

    /// Like [`wait_complete`](Self::wait_complete) but gives up after
    /// `max_polls` reads, sleeping `delay_ms` between them.
    pub fn wait_complete_timeout(
        &mut self,
        max_polls: u32,
        delay_ms: u32,
    ) -> Result<(), Error<T::Error>> {
        for poll in 0..max_polls {
            if poll > 0 {
                self.transport.delay_ms(delay_ms);
            }
            match self.is_busy()? {
                CoprocessorState::Idle => return Ok(()),
                CoprocessorState::Busy => {}
                CoprocessorState::Fault => {
                    warn!("eve: co-processor fault");
                    return Err(Error::CoprocessorFault);
                }
            }
        }
        warn!("eve: co-processor still busy after {} polls", max_polls);
        Err(Error::Timeout {
            register: REG_CMD_READ,
        })
    }

    /// Publish everything queued so far; optionally wait for it to run.
    pub fn execute(&mut self, wait: bool) -> Result<CmdIndex, Error<T::Error>> {
        self.write16(REG_CMD_WRITE, self.cmd_index.value())?;
        if wait {
            self.wait_complete()?;
        }
        Ok(self.cmd_index)
    }

    /// Read the value the co-processor stored in a result slot.
    pub fn read_result(&mut self, slot: ResultSlot) -> Result<u32, Error<T::Error>> {
        self.read32(RAM_CMD.wrapping_add(u32::from(slot.0)))
    }

    /// Read the nul-terminated fault report (BT81x).
    ///
    /// Bytes outside printable ASCII are replaced by `?`.
    pub fn read_fault_message(&mut self) -> Result<FaultMessage, Error<T::Error>> {
        let mut raw = [0u8; RAM_ERR_REPORT_SIZE];
        self.read_buffer(RAM_ERR_REPORT, &mut raw)?;
        let mut message = FaultMessage::new();
        for &b in raw.iter().take_while(|&&b| b != 0) {
            let c = if b.is_ascii_graphic() || b == b' ' {
                char::from(b)
            } else {
                '?'
            };
            if message.push(c).is_err() {
                break;
            }
        }
        Ok(message)
    }

    /// Restart a faulted co-processor and return its fault report.
    ///
    /// Holds the co-processor in reset, zeroes the ring pointers and the
    /// display-list offset, then releases it. The local write index is
    /// reset to 0; anything queued but not executed is lost.
    pub fn recover_from_fault(&mut self) -> Result<FaultMessage, Error<T::Error>> {
        let report = self.read_fault_message()?;
        warn!("eve: recovering co-processor: {}", report.as_str());
        self.write8(REG_CPURESET, 1)?;
        self.write16(REG_CMD_READ, 0)?;
        self.write16(REG_CMD_WRITE, 0)?;
        self.write16(REG_CMD_DL, 0)?;
        self.write8(REG_CPURESET, 0)?;
        self.cmd_index = CmdIndex::new(0);
        Ok(report)
    }

    /// Stream a payload that may be larger than the ring.
    ///
    /// Used after a record header whose data follows in the ring
    /// (`CMD_LOADIMAGE`, `CMD_INFLATE`, ...). Chunks never exceed the free
    /// space, each chunk is published as it is written, and the final chunk
    /// is zero-padded to 4 bytes. Blocks in
    /// [`wait_complete`](Self::wait_complete) whenever the ring is full.
    pub fn stream_bytes(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        let mut rest = data;
        while !rest.is_empty() {
            let free = usize::from(self.free_space()? & !3);
            if free == 0 {
                self.wait_complete()?;
                continue;
            }
            let (chunk, tail) = rest.split_at(free.min(rest.len()));
            let mut ring = RingWriter::new(self);
            let sent = ring.put_bytes(chunk)?;
            if tail.is_empty() {
                ring.put_padding(sent)?;
            }
            ring.finish()?;
            self.execute(false)?;
            rest = tail;
        }
        Ok(())
    }

    /// Encode one record at the local write index.
    pub(crate) fn write_record(
        &mut self,
        id: u32,
        args: &[Arg<'_>],
        slots: &mut [u16],
    ) -> Result<u32, Error<T::Error>> {
        let mut ring = RingWriter::new(self);
        let len = encode_record(&mut ring, id, args, slots)?;
        ring.finish()?;
        Ok(len)
    }

    /// Builder view that queues commands in the co-processor ring.
    ///
    /// Nothing runs until [`execute`](Self::execute).
    pub fn cmd(&mut self) -> Coprocessor<'_, 'p, T> {
        Coprocessor { eve: self }
    }
}

/// Ring size minus the 4 bytes that are always kept free.
const RAM_CMD_FREE: u16 = 4092;

/// Byte writer into `RAM_CMD` that follows the ring around.
///
/// The write transaction is opened lazily and reopened at `RAM_CMD`
/// whenever the offset wraps, so a record may straddle the end of the ring.
struct RingWriter<'a, 'p, T: Transport> {
    eve: &'a mut Eve<'p, T>,
    offset: CmdIndex,
    open: bool,
}

impl<'a, 'p, T: Transport> RingWriter<'a, 'p, T> {
    fn new(eve: &'a mut Eve<'p, T>) -> Self {
        let offset = eve.cmd_index;
        Self {
            eve,
            offset,
            open: false,
        }
    }

    /// Close the transaction and move the local write index past the bytes
    /// written.
    fn finish(self) -> Result<CmdIndex, Error<T::Error>> {
        let Self { eve, offset, open } = self;
        if open {
            eve.end_transaction()?;
        }
        eve.cmd_index = offset;
        Ok(offset)
    }
}

impl<T: Transport> RecordSink for RingWriter<'_, '_, T> {
    type Error = Error<T::Error>;

    fn put_u8(&mut self, value: u8) -> Result<(), Self::Error> {
        if !self.open {
            self.eve
                .begin_write(RAM_CMD.wrapping_add(u32::from(self.offset)))?;
            self.open = true;
        }
        self.eve.transport.send8(value).map_err(Error::Transport)?;
        self.offset += 1;
        if self.offset.value() == 0 {
            self.eve.end_transaction()?;
            self.open = false;
        }
        Ok(())
    }
}

/// Co-processor builder borrowed from [`Eve::cmd`].
///
/// Display-list commands come from [`DisplayListBuilder`]; widget and
/// utility records are inherent methods (see [`commands`](crate::commands)).
pub struct Coprocessor<'e, 'p, T: Transport> {
    pub(crate) eve: &'e mut Eve<'p, T>,
}

impl<T: Transport> Coprocessor<'_, '_, T> {
    /// Local write index after the last queued command.
    pub fn index(&self) -> CmdIndex {
        self.eve.cmd_index
    }

    /// Publish the queued commands; see [`Eve::execute`].
    pub fn execute(&mut self, wait: bool) -> Result<CmdIndex, Error<T::Error>> {
        self.eve.execute(wait)
    }
}

impl<T: Transport> DisplayListBuilder for Coprocessor<'_, '_, T> {
    type Error = Error<T::Error>;

    fn append_word(&mut self, word: DlWord) -> Result<(), Self::Error> {
        self.eve.append(word.raw()).map(|_| ())
    }
}
