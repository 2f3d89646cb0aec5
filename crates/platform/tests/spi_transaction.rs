//! SPI transport integration tests — verify EVE transaction framing over a
//! mocked embedded-hal bus.
//!
//! Run with: cargo test -p platform --test spi_transaction

#![allow(clippy::unwrap_used)]

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use platform::{SpiTransport, Transport};

// ---------------------------------------------------------------------------
// Test: register read framing
// ---------------------------------------------------------------------------

/// Reading REG_ID (0x302000) is: CS low, 3 header bytes, dummy byte,
/// one data byte, flush, CS high.
#[test]
fn test_register_read_framing() {
    let spi_txns = [
        SpiTransaction::write_vec(vec![0x30]),
        SpiTransaction::write_vec(vec![0x20]),
        SpiTransaction::write_vec(vec![0x00]),
        SpiTransaction::write_vec(vec![0x00]),
        SpiTransaction::transfer_in_place(vec![0x00], vec![0x7C]),
        SpiTransaction::flush(),
    ];
    let cs_txns = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];

    let mut spi = SpiMock::new(&spi_txns);
    let mut cs = PinMock::new(&cs_txns);
    let mut pd = PinMock::new(&[]);

    let mut t = SpiTransport::new(spi.clone(), cs.clone(), pd.clone(), NoopDelay);
    t.select(false).unwrap();
    t.select(true).unwrap();
    for b in [0x30, 0x20, 0x00] {
        t.send8(b).unwrap();
    }
    t.send8(0).unwrap();
    assert_eq!(t.receive8().unwrap(), 0x7C);
    t.select(false).unwrap();

    spi.done();
    cs.done();
    pd.done();
}

// ---------------------------------------------------------------------------
// Test: bulk write goes out as one bus write
// ---------------------------------------------------------------------------

#[test]
fn test_buffer_write_is_single_bus_write() {
    let payload = [0x26u8, 0x00, 0x00, 0x07];
    let mut spi = SpiMock::new(&[SpiTransaction::write_vec(payload.to_vec())]);
    let mut cs = PinMock::new(&[]);
    let mut pd = PinMock::new(&[]);

    let mut t = SpiTransport::new(spi.clone(), cs.clone(), pd.clone(), NoopDelay);
    assert_eq!(t.send_buffer(&payload).unwrap(), 4);

    spi.done();
    cs.done();
    pd.done();
}

// ---------------------------------------------------------------------------
// Test: borrowed transport
// ---------------------------------------------------------------------------

/// A `&mut SpiTransport` is itself a transport, so callers can keep
/// ownership of the bus while a driver uses it.
#[test]
fn test_borrowed_transport_is_transport() {
    fn power_cycle<T: Transport>(mut t: T) -> Result<(), T::Error> {
        t.power(false)?;
        t.delay_ms(20);
        t.power(true)
    }

    let mut spi = SpiMock::new(&[]);
    let mut cs = PinMock::new(&[]);
    let mut pd = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);

    let mut t = SpiTransport::new(spi.clone(), cs.clone(), pd.clone(), NoopDelay);
    power_cycle(&mut t).unwrap();
    assert!(!t.is_selected());

    spi.done();
    cs.done();
    pd.done();
}
