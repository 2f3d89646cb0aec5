//! Transport layer for EVE display controllers
//!
//! This crate provides the byte-level link between a host and an FT81x /
//! BT81x chip, keeping the protocol driver independent of any HAL.
//!
//! # Architecture Layers
//!
//! ```text
//! Application / demos
//!         ↓
//! eve-driver (protocol core, command encoding, init state machine)
//!         ↓
//! Platform (this crate - Transport trait)
//!         ↓
//! embedded-hal 1.0 SPI bus + GPIO  |  FakeEve (tests)
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable defmt logging and `defmt::Format` derives
//!
//! # Example
//!
//! ```no_run
//! use platform::Transport;
//!
//! fn read_id<T: Transport>(t: &mut T) -> Result<u8, T::Error> {
//!     t.select(false)?;
//!     t.select(true)?;
//!     // READ header for REG_ID (0x302000), then the dummy byte
//!     for b in [0x30, 0x20, 0x00, 0x00] {
//!         t.send8(b)?;
//!     }
//!     let id = t.receive8()?;
//!     t.select(false)?;
//!     Ok(id)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this transport crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod mocks;
pub mod spi;
pub mod transport;

pub use spi::{SpeedSwitch, SpiTransport, TransportError};
pub use transport::Transport;
