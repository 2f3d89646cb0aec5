//! Driver-over-SPI tests: check the bytes and chip-select edges the driver
//! produces on a mocked embedded-hal bus.
//!
//! Run with: cargo test -p eve-driver --test spi_framing

#![allow(clippy::unwrap_used)]

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use eve_driver::registers::{REG_ID, REG_PWM_DUTY};
use eve_driver::{Eve, HostCommand};
use eve_specs::displays::CFA480128;
use platform::SpiTransport;

fn one_transaction() -> [PinTransaction; 2] {
    [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]
}

// ---------------------------------------------------------------------------
// Test: host command
// ---------------------------------------------------------------------------

/// ACTIVE is the three bytes 00 00 00 in its own chip-select cycle.
#[test]
fn test_host_command_framing() {
    let mut spi = SpiMock::new(&[
        SpiTransaction::write_vec(vec![0x00, 0x00, 0x00]),
        SpiTransaction::flush(),
    ]);
    let mut cs = PinMock::new(&one_transaction());
    let mut pd = PinMock::new(&[]);

    let transport = SpiTransport::new(spi.clone(), cs.clone(), pd.clone(), NoopDelay);
    let mut eve = Eve::new(transport, &CFA480128);
    eve.host_command(HostCommand::Active, 0).unwrap();
    drop(eve);

    spi.done();
    cs.done();
    pd.done();
}

// ---------------------------------------------------------------------------
// Test: register access
// ---------------------------------------------------------------------------

/// Write header has bit 23 set; the value follows without a dummy byte.
#[test]
fn test_register_write_framing() {
    let mut spi = SpiMock::new(&[
        SpiTransaction::write_vec(vec![0xB0, 0x20, 0xD4]),
        SpiTransaction::write_vec(vec![64]),
        SpiTransaction::flush(),
    ]);
    let mut cs = PinMock::new(&one_transaction());
    let mut pd = PinMock::new(&[]);

    let transport = SpiTransport::new(spi.clone(), cs.clone(), pd.clone(), NoopDelay);
    let mut eve = Eve::new(transport, &CFA480128);
    eve.write8(REG_PWM_DUTY, 64).unwrap();
    drop(eve);

    spi.done();
    cs.done();
    pd.done();
}

/// Read header, dummy byte, then the value is clocked in.
#[test]
fn test_register_read_framing() {
    let mut spi = SpiMock::new(&[
        SpiTransaction::write_vec(vec![0x30, 0x20, 0x00]),
        SpiTransaction::write_vec(vec![0x00]),
        SpiTransaction::transfer_in_place(vec![0x00], vec![0x7C]),
        SpiTransaction::flush(),
    ]);
    let mut cs = PinMock::new(&one_transaction());
    let mut pd = PinMock::new(&[]);

    let transport = SpiTransport::new(spi.clone(), cs.clone(), pd.clone(), NoopDelay);
    let mut eve = Eve::new(transport, &CFA480128);
    assert_eq!(eve.read8(REG_ID).unwrap(), 0x7C);
    drop(eve);

    spi.done();
    cs.done();
    pd.done();
}
