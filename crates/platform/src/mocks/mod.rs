//! Mock implementations for testing
//!
//! [`FakeEve`] is a simulated EVE chip behind the [`Transport`] trait. It
//! decodes the transaction framing the same way the silicon does (3-byte
//! big-endian header, dummy byte before read data), keeps a sparse byte
//! memory, and records every transaction in an event log so tests can
//! assert on exact register traffic without an SPI mock script.

#![cfg(any(test, feature = "std"))]

use std::boxed::Box;
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use eve_specs::memory_map::{CHIP_ID_READY, REG_CHIP_ID, REG_CMD_READ, REG_CMD_WRITE, REG_ID};

use crate::Transport;

/// Observable action on the simulated chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `Transport::begin`
    Begin,
    /// `Transport::end`
    End,
    /// `Transport::pause`
    Pause(bool),
    /// `Transport::init`
    Init {
        /// Slow clock requested
        slow: bool,
    },
    /// `Transport::power`
    Power(bool),
    /// `Transport::delay_ms`
    Delay(u32),
    /// Host command transaction
    HostCommand {
        /// Command byte
        cmd: u8,
        /// Parameter byte
        param: u8,
    },
    /// Completed memory write transaction
    Write {
        /// Start address
        addr: u32,
        /// Bytes written
        data: Vec<u8>,
    },
    /// Completed memory read transaction
    Read {
        /// Start address
        addr: u32,
        /// Number of data bytes clocked out
        len: usize,
    },
}

/// Injected failure returned by [`FakeEve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

impl core::fmt::Display for FakeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "injected transport failure")
    }
}

impl std::error::Error for FakeError {}

#[derive(Debug)]
enum Phase {
    Idle,
    Header { bytes: [u8; 3], len: usize },
    HostCommand { cmd: u8, param: u8 },
    ReadDummy { addr: u32 },
    Read { addr: u32, offset: u32, script: Option<[u8; 4]> },
    Write { addr: u32, data: Vec<u8> },
}

/// Simulated EVE chip.
pub struct FakeEve {
    memory: BTreeMap<u32, u8>,
    scripts: BTreeMap<u32, VecDeque<u32>>,
    events: Vec<Event>,
    phase: Phase,
    selected: bool,
    powered: bool,
    auto_drain: bool,
    fail_after: Option<usize>,
    transfers: usize,
    on_execute: Option<Box<dyn FnMut(&mut FakeEve)>>,
}

impl Default for FakeEve {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeEve {
    /// Blank chip: all memory reads return 0.
    pub fn new() -> Self {
        Self {
            memory: BTreeMap::new(),
            scripts: BTreeMap::new(),
            events: Vec::new(),
            phase: Phase::Idle,
            selected: false,
            powered: false,
            auto_drain: false,
            fail_after: None,
            transfers: 0,
            on_execute: None,
        }
    }

    /// Chip that has finished booting: `REG_ID` reads 0x7C, `REG_CPURESET`
    /// reads 0 and the chip identifier is `chip_id`.
    pub fn booted(chip_id: u32) -> Self {
        let mut eve = Self::new();
        eve.set_u8(REG_ID, CHIP_ID_READY);
        eve.set_u32(REG_CHIP_ID, chip_id);
        eve
    }

    /// Copy every value written to `REG_CMD_WRITE` into `REG_CMD_READ`, as
    /// if the co-processor executed the ring instantly.
    #[must_use]
    pub fn with_auto_drain(mut self) -> Self {
        self.auto_drain = true;
        self
    }

    /// Run `f` whenever `REG_CMD_WRITE` is written, before any auto-drain.
    ///
    /// Used to emulate co-processor commands that produce results, e.g.
    /// storing a value into a result slot in `RAM_CMD`.
    pub fn on_execute(&mut self, f: impl FnMut(&mut FakeEve) + 'static) {
        self.on_execute = Some(Box::new(f));
    }

    /// Fail every transfer after the first `n`.
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(self.transfers.saturating_add(n));
    }

    /// Store one byte.
    pub fn set_u8(&mut self, addr: u32, value: u8) {
        self.memory.insert(addr, value);
    }

    /// Store a little-endian 16-bit value.
    pub fn set_u16(&mut self, addr: u32, value: u16) {
        self.set_bytes(addr, &value.to_le_bytes());
    }

    /// Store a little-endian 32-bit value.
    pub fn set_u32(&mut self, addr: u32, value: u32) {
        self.set_bytes(addr, &value.to_le_bytes());
    }

    /// Store a byte string.
    pub fn set_bytes(&mut self, addr: u32, data: &[u8]) {
        for (a, &b) in (addr..).zip(data) {
            self.memory.insert(a, b);
        }
    }

    /// Read back one byte.
    pub fn u8_at(&self, addr: u32) -> u8 {
        self.memory.get(&addr).copied().unwrap_or(0)
    }

    /// Read back a little-endian 16-bit value.
    pub fn u16_at(&self, addr: u32) -> u16 {
        u16::from_le_bytes([self.u8_at(addr), self.u8_at(addr.wrapping_add(1))])
    }

    /// Read back a little-endian 32-bit value.
    pub fn u32_at(&self, addr: u32) -> u32 {
        let mut b = [0u8; 4];
        for (a, slot) in (addr..).zip(b.iter_mut()) {
            *slot = self.u8_at(a);
        }
        u32::from_le_bytes(b)
    }

    /// Read back a byte range.
    pub fn bytes_at(&self, addr: u32, len: usize) -> Vec<u8> {
        (addr..).take(len).map(|a| self.u8_at(a)).collect()
    }

    /// Queue values returned by successive read transactions starting at
    /// `addr`. The last value repeats once the queue is down to one entry.
    pub fn script_reads(&mut self, addr: u32, values: impl IntoIterator<Item = u32>) {
        self.scripts.entry(addr).or_default().extend(values);
    }

    /// Everything that happened so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    /// Host commands in order, as `(cmd, param)`.
    pub fn host_commands(&self) -> Vec<(u8, u8)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::HostCommand { cmd, param } => Some((*cmd, *param)),
                _ => None,
            })
            .collect()
    }

    /// Payloads of every write transaction that started at `addr`.
    pub fn writes_to(&self, addr: u32) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Write { addr: a, data } if *a == addr => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of read transactions that started at `addr`.
    pub fn reads_of(&self, addr: u32) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Read { addr: a, .. } if *a == addr))
            .count()
    }

    /// Start addresses of all write transactions, in order.
    pub fn write_addresses(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Write { addr, .. } => Some(*addr),
                _ => None,
            })
            .collect()
    }

    /// Power-down line state.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Chip-select state.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    fn next_script(&mut self, addr: u32) -> Option<[u8; 4]> {
        let queue = self.scripts.get_mut(&addr)?;
        let value = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().copied()
        };
        value.map(u32::to_le_bytes)
    }

    fn finish_transaction(&mut self) {
        match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => {}
            // A partial header is ignored by the chip
            Phase::Header { .. } => {}
            Phase::HostCommand { cmd, param } => {
                self.events.push(Event::HostCommand { cmd, param });
            }
            // Header 00 xx 00 without a dummy byte is the ACTIVE host command
            Phase::ReadDummy { addr } => {
                let [_, _, param, _] = addr.to_be_bytes();
                self.events.push(Event::HostCommand { cmd: 0, param });
            }
            Phase::Read { addr, offset, .. } => {
                self.events.push(Event::Read {
                    addr,
                    len: offset as usize,
                });
            }
            Phase::Write { addr, data } => {
                self.events.push(Event::Write { addr, data });
                if addr == REG_CMD_WRITE {
                    if let Some(mut f) = self.on_execute.take() {
                        f(self);
                        self.on_execute = Some(f);
                    }
                    if self.auto_drain {
                        let write = self.u32_at(REG_CMD_WRITE);
                        self.set_u32(REG_CMD_READ, write);
                    }
                }
            }
        }
    }

    fn decode_header(&mut self, bytes: [u8; 3]) {
        let [b0, b1, b2] = bytes;
        let addr = u32::from_be_bytes([0, b0 & 0x3F, b1, b2]);
        self.phase = match b0 & 0xC0 {
            0x80 => Phase::Write {
                addr,
                data: Vec::new(),
            },
            0x00 => Phase::ReadDummy { addr },
            _ => Phase::HostCommand { cmd: b0, param: b1 },
        };
    }

    fn clock_byte(&mut self, value: u8) -> u8 {
        match &mut self.phase {
            Phase::Idle => 0,
            Phase::Header { bytes, len } => {
                if let Some(slot) = bytes.get_mut(*len) {
                    *slot = value;
                    *len = len.saturating_add(1);
                }
                if *len == 3 {
                    let bytes = *bytes;
                    self.decode_header(bytes);
                }
                0
            }
            Phase::HostCommand { .. } => 0,
            Phase::ReadDummy { addr } => {
                let addr = *addr;
                let script = self.next_script(addr);
                self.phase = Phase::Read {
                    addr,
                    offset: 0,
                    script,
                };
                0
            }
            Phase::Read {
                addr,
                offset,
                script,
            } => {
                let here = addr.wrapping_add(*offset);
                let scripted = script
                    .as_ref()
                    .and_then(|s| s.get(*offset as usize).copied());
                *offset = offset.wrapping_add(1);
                match scripted {
                    Some(b) => b,
                    None => self.memory.get(&here).copied().unwrap_or(0),
                }
            }
            Phase::Write { addr, data } => {
                let here = addr.wrapping_add(u32::try_from(data.len()).unwrap_or(u32::MAX));
                data.push(value);
                self.memory.insert(here, value);
                0
            }
        }
    }
}

impl Transport for FakeEve {
    type Error = FakeError;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Begin);
        Ok(())
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::End);
        Ok(())
    }

    fn pause(&mut self, pause: bool) -> Result<(), Self::Error> {
        self.events.push(Event::Pause(pause));
        Ok(())
    }

    fn init(&mut self, slow: bool) -> Result<(), Self::Error> {
        self.events.push(Event::Init { slow });
        Ok(())
    }

    fn power(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.powered = enable;
        self.events.push(Event::Power(enable));
        Ok(())
    }

    fn select(&mut self, enable: bool) -> Result<bool, Self::Error> {
        if enable == self.selected {
            return Ok(false);
        }
        self.selected = enable;
        if enable {
            self.phase = Phase::Header {
                bytes: [0; 3],
                len: 0,
            };
        } else {
            self.finish_transaction();
        }
        Ok(true)
    }

    fn transfer(&mut self, value: u8) -> Result<u8, Self::Error> {
        if self.fail_after.is_some_and(|n| self.transfers >= n) {
            return Err(FakeError);
        }
        self.transfers = self.transfers.saturating_add(1);
        if !self.selected {
            return Ok(0);
        }
        Ok(self.clock_byte(value))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::Delay(ms));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn header(t: &mut FakeEve, h: u32) {
        t.select(false).unwrap();
        t.select(true).unwrap();
        let [_, b0, b1, b2] = h.to_be_bytes();
        for b in [b0, b1, b2] {
            t.send8(b).unwrap();
        }
    }

    #[test]
    fn test_write_then_read_back() {
        let mut eve = FakeEve::new();
        header(&mut eve, 0x80_0000 | 0x1000);
        eve.send32(0xDEAD_BEEF).unwrap();
        header(&mut eve, 0x1000);
        eve.send8(0).unwrap();
        assert_eq!(eve.receive32().unwrap(), 0xDEAD_BEEF);
        eve.select(false).unwrap();

        assert_eq!(
            eve.events(),
            &[
                Event::Write {
                    addr: 0x1000,
                    data: vec![0xEF, 0xBE, 0xAD, 0xDE]
                },
                Event::Read {
                    addr: 0x1000,
                    len: 4
                },
            ]
        );
    }

    #[test]
    fn test_host_commands_are_decoded() {
        let mut eve = FakeEve::new();
        header(&mut eve, 0x61_4600);
        header(&mut eve, 0x00_0000);
        eve.select(false).unwrap();
        assert_eq!(eve.host_commands(), vec![(0x61, 0x46), (0x00, 0x00)]);
    }

    #[test]
    fn test_scripted_reads_repeat_last_value() {
        let mut eve = FakeEve::new();
        eve.script_reads(REG_ID, [0, u32::from(CHIP_ID_READY)]);
        fn read(eve: &mut FakeEve) -> u8 {
            header(eve, REG_ID);
            eve.send8(0).unwrap();
            eve.receive8().unwrap()
        }
        assert_eq!(read(&mut eve), 0);
        assert_eq!(read(&mut eve), CHIP_ID_READY);
        assert_eq!(read(&mut eve), CHIP_ID_READY);
    }

    #[test]
    fn test_booted_chip_answers_at_shared_addresses() {
        let eve = FakeEve::booted(eve_specs::ChipId::Bt817.raw());
        assert_eq!(eve.u8_at(eve_specs::memory_map::REG_ID), CHIP_ID_READY);
        assert_eq!(
            eve.u32_at(eve_specs::memory_map::REG_CHIP_ID),
            eve_specs::ChipId::Bt817.raw()
        );
    }

    #[test]
    fn test_auto_drain_copies_write_pointer() {
        let mut eve = FakeEve::new().with_auto_drain();
        header(&mut eve, 0x80_0000 | REG_CMD_WRITE);
        eve.send16(0x0124).unwrap();
        eve.select(false).unwrap();
        assert_eq!(eve.u16_at(REG_CMD_READ), 0x0124);
    }

    #[test]
    fn test_injected_failure() {
        let mut eve = FakeEve::new();
        eve.fail_after(2);
        assert!(eve.transfer(0).is_ok());
        assert!(eve.transfer(0).is_ok());
        assert_eq!(eve.transfer(0), Err(FakeError));
    }
}
