//! Co-processor integration tests: queue records, publish them, read
//! results back and recover from faults on the simulated chip.
//!
//! Run with: cargo test -p eve-driver --test coprocessor

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use eve_driver::memory_map::{RAM_CMD, RAM_ERR_REPORT};
use eve_driver::registers::{REG_CMD_DL, REG_CMD_READ, REG_CMD_WRITE, REG_CPURESET};
use eve_driver::{
    BitmapFormat, CoprocessorState, DisplayListBuilder, Error, Eve, Options,
};
use eve_specs::displays::{CFA480128, CFA800480};
use platform::mocks::{Event, FakeEve};

// ---------------------------------------------------------------------------
// Test: a complete screen
// ---------------------------------------------------------------------------

#[test]
fn test_screen_is_queued_then_published() {
    let mut fake = FakeEve::new().with_auto_drain();
    let mut eve = Eve::new(&mut fake, &CFA480128);
    {
        let mut cmd = eve.cmd();
        cmd.dl_start().unwrap();
        cmd.clear_color_rgb(0, 0, 64).unwrap();
        cmd.clear(true, true, true).unwrap();
        cmd.text(240, 64, 28, Options::CENTER, "Hi").unwrap();
    }
    // Nothing is published until execute.
    assert_eq!(eve.cmd_index().value(), 28);
    assert_eq!(eve.dl_finish(true).unwrap().value(), 36);
    drop(eve);

    assert_eq!(fake.writes_to(REG_CMD_WRITE), [vec![36, 0]]);
    assert_eq!(
        fake.bytes_at(RAM_CMD, 36),
        [
            0x00, 0xFF, 0xFF, 0xFF, // DLSTART
            0x40, 0x00, 0x00, 0x02, // CLEAR_COLOR_RGB(0, 0, 64)
            0x07, 0x00, 0x00, 0x26, // CLEAR(1, 1, 1)
            0x0C, 0xFF, 0xFF, 0xFF, // TEXT
            240, 0, 64, 0, //
            28, 0, 0x00, 0x06, //
            b'H', b'i', 0, 0, //
            0x00, 0x00, 0x00, 0x00, // DISPLAY
            0x01, 0xFF, 0xFF, 0xFF, // SWAP
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: result slots
// ---------------------------------------------------------------------------

#[test]
fn test_result_read_after_execution() {
    let mut fake = FakeEve::new().with_auto_drain();
    // The chip writes the CRC into the slot after the two arguments.
    fake.on_execute(|chip| chip.set_u32(RAM_CMD + 12, 0xDEAD_BEEF));
    let mut eve = Eve::new(&mut fake, &CFA480128);
    let slot = eve.cmd().mem_crc(0x1000, 256).unwrap();
    assert_eq!(slot.index().value(), 12);
    eve.execute(true).unwrap();
    assert_eq!(eve.read_result(slot).unwrap(), 0xDEAD_BEEF);
}

#[test]
fn test_image_properties() {
    let mut fake = FakeEve::new().with_auto_drain();
    fake.on_execute(|chip| {
        chip.set_u32(RAM_CMD + 4, 0x0001_0000);
        chip.set_u32(RAM_CMD + 8, 320);
        chip.set_u32(RAM_CMD + 12, 240);
    });
    let mut eve = Eve::new(&mut fake, &CFA800480);
    let [ptr, width, height] = eve.cmd().get_props().unwrap();
    eve.execute(true).unwrap();
    assert_eq!(eve.read_result(ptr).unwrap(), 0x0001_0000);
    assert_eq!(eve.read_result(width).unwrap(), 320);
    assert_eq!(eve.read_result(height).unwrap(), 240);
}

// ---------------------------------------------------------------------------
// Test: chip gating
// ---------------------------------------------------------------------------

#[test]
fn test_eve2_only_command_rejected_on_bt817() {
    let mut fake = FakeEve::new();
    let mut eve = Eve::new(&mut fake, &CFA800480);
    let result = eve
        .cmd()
        .csketch(0, 0, 480, 272, 0, BitmapFormat::L8, 1500);
    assert_eq!(result, Err(Error::Unsupported));
    assert_eq!(eve.cmd_index().value(), 0);
    drop(eve);
    assert!(fake.write_addresses().is_empty());
}

// ---------------------------------------------------------------------------
// Test: faults and timeouts
// ---------------------------------------------------------------------------

#[test]
fn test_fault_is_reported_and_recovered() {
    let mut fake = FakeEve::new();
    fake.on_execute(|chip| {
        chip.set_u16(REG_CMD_READ, 0x0FFF);
        chip.set_bytes(RAM_ERR_REPORT, b"ERROR: image type not supported\0");
    });
    let mut eve = Eve::new(&mut fake, &CFA480128);
    eve.cmd().load_image(0, Options::NONE, &[0x42; 16]).unwrap();
    assert_eq!(eve.execute(true), Err(Error::CoprocessorFault));
    assert_eq!(eve.is_busy().unwrap(), CoprocessorState::Fault);

    let report = eve.recover_from_fault().unwrap();
    assert_eq!(report.as_str(), "ERROR: image type not supported");
    assert_eq!(eve.cmd_index().value(), 0);
    drop(eve);

    assert_eq!(fake.writes_to(REG_CPURESET), [vec![1], vec![0]]);
    assert_eq!(fake.u16_at(REG_CMD_READ), 0);
    assert_eq!(fake.u16_at(REG_CMD_WRITE), 0);
    assert_eq!(fake.u16_at(REG_CMD_DL), 0);
}

#[test]
fn test_stalled_coprocessor_times_out() {
    let mut fake = FakeEve::new();
    let mut eve = Eve::new(&mut fake, &CFA480128);
    eve.cmd().swap().unwrap();
    eve.execute(false).unwrap();
    assert_eq!(
        eve.wait_complete_timeout(5, 2),
        Err(Error::Timeout {
            register: REG_CMD_READ
        })
    );
    drop(eve);
    assert_eq!(fake.reads_of(REG_CMD_READ), 5);
    let waits = fake
        .events()
        .iter()
        .filter(|e| **e == Event::Delay(2))
        .count();
    assert_eq!(waits, 4);
}

// ---------------------------------------------------------------------------
// Test: ring wrap without draining
// ---------------------------------------------------------------------------

/// 1025 words (4100 bytes) against a co-processor that never reads: the
/// write index wraps to 0 and then 4, free space follows it modulo 4096.
/// Overrunning the chip is the caller's job to avoid (check `free_space`);
/// after exactly 1024 words the ring looks empty again.
#[test]
fn test_append_4100_bytes_wraps() {
    let mut fake = FakeEve::new();
    let mut eve = Eve::new(&mut fake, &CFA480128);

    let mut trail = Vec::new();
    for word in 0..1025u32 {
        let index = eve.append(word).unwrap();
        let free = eve.free_space().unwrap();
        if word >= 1020 {
            trail.push((index.value(), free));
        }
        if word == 1023 {
            assert_eq!(eve.is_busy().unwrap(), CoprocessorState::Idle);
        }
    }
    assert_eq!(
        trail,
        [(4084, 8), (4088, 4), (4092, 0), (0, 4092), (4, 4088)]
    );
    assert_eq!(eve.is_busy().unwrap(), CoprocessorState::Busy);
    drop(eve);

    // Word 1024 landed on top of word 0; nothing was published.
    assert_eq!(fake.bytes_at(RAM_CMD, 8), [0, 4, 0, 0, 1, 0, 0, 0]);
    assert_eq!(fake.bytes_at(RAM_CMD + 4092, 4), 1023u32.to_le_bytes());
    assert!(fake.writes_to(REG_CMD_WRITE).is_empty());
}

// ---------------------------------------------------------------------------
// Test: payloads larger than the ring
// ---------------------------------------------------------------------------

#[test]
fn test_streamed_image_larger_than_ring() {
    let mut fake = FakeEve::new().with_auto_drain();
    let mut eve = Eve::new(&mut fake, &CFA480128);
    let image = vec![0x5A; 10_001];
    eve.cmd()
        .load_image_streamed(0x2000, Options::NONE, &image)
        .unwrap();
    // 12-byte header, payload padded to 10 004, modulo the 4 KiB ring.
    assert_eq!(eve.cmd_index().value(), 1824);
    drop(eve);

    // Each chunk fills the free space exactly and is published on its own.
    assert_eq!(
        fake.writes_to(REG_CMD_WRITE),
        [
            4092u16.to_le_bytes().to_vec(),
            4088u16.to_le_bytes().to_vec(),
            1824u16.to_le_bytes().to_vec(),
        ]
    );
    assert_eq!(fake.bytes_at(RAM_CMD + 1816, 8), [0x5A, 0x5A, 0x5A, 0x5A, 0x5A, 0, 0, 0]);
}
