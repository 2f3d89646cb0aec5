//! Host-side driver for EVE display controllers (FT81x / BT81x)
//!
//! The driver brings an EVE chip out of reset into a known clock and timing
//! state for any panel described by an [`eve_specs::PanelProfile`], then
//! offers two channels for drawing:
//!
//! - **Display list** (`RAM_DL`): 32-bit words written directly by the host
//!   through [`Eve::dl`].
//! - **Co-processor ring** (`RAM_CMD`): a 4 KiB ring the chip drains
//!   asynchronously. Display-list words and widget records are appended
//!   through [`Eve::cmd`], published with [`Eve::execute`] and awaited with
//!   [`Eve::wait_complete`].
//!
//! # Architecture Layers
//!
//! ```text
//! Application / demos
//!         ↓
//! helpers, touch          (convenience drawing, calibration, touch read-back)
//!         ↓
//! init                    (reset → clock → poll → panel → bootstrap list)
//!         ↓
//! display_list, coprocessor, commands   (index bookkeeping, ring management)
//!         ↓
//! encoding                (DL bit packing, co-processor record streaming)
//!         ↓
//! memory, transaction     (register access, 3-byte header framing)
//!         ↓
//! platform::Transport     (SPI bus, FakeEve in tests)
//! ```
//!
//! # Features
//!
//! - `std`: `std::error::Error` for [`Error`]
//! - `defmt`: defmt logging and `defmt::Format` derives
//! - `tracing`: tracing logging for desktop hosts
//!
//! # Example
//!
//! ```no_run
//! use eve_driver::{DisplayListBuilder, Eve, Options};
//! use eve_specs::displays::CFA480128;
//! use platform::Transport;
//!
//! fn hello<T: Transport>(transport: T) -> Result<(), eve_driver::Error<T::Error>> {
//!     let mut eve = Eve::new(transport, &CFA480128);
//!     eve.begin_default()?;
//!
//!     let (x, y) = (eve.hcenter(), eve.vcenter());
//!     let mut cmd = eve.cmd();
//!     cmd.dl_start()?;
//!     cmd.clear_color_rgb(0, 0, 64)?;
//!     cmd.clear(true, true, true)?;
//!     cmd.text(x as i16, y as i16, 28, Options::CENTER, "Hello")?;
//!     eve.dl_finish(true)?;
//!     Ok(())
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
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt/tracing over println! in lib code
// Pedantic lints suppressed for this driver crate:
#![allow(clippy::doc_markdown)] // register names and hex addresses in doc comments
#![allow(clippy::must_use_candidate)] // encoders are used inline
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // every fallible call returns Error<T::Error>
#![allow(clippy::too_many_arguments)] // widget records mirror the chip's parameter lists
#![allow(clippy::fn_params_excessive_bools)] // CLEAR and COLOR_MASK take one flag per buffer

#[macro_use]
mod fmt;

pub mod builder;
pub mod commands;
pub mod coprocessor;
pub mod display_list;
mod driver;
pub mod encoding;
mod error;
pub mod helpers;
pub mod index;
pub mod init;
pub mod memory;
pub mod registers;
pub mod touch;
pub mod transaction;
pub mod types;

/// Address space, shared with `platform::mocks::FakeEve`
pub use eve_specs::memory_map;

pub use builder::DisplayListBuilder;
pub use commands::{Availability, CoCmd};
pub use coprocessor::{Coprocessor, CoprocessorState, ResultSlot};
pub use display_list::DisplayList;
pub use driver::Eve;
pub use encoding::DlWord;
pub use error::Error;
pub use helpers::to_rgb;
pub use index::{CmdIndex, DlIndex, WrappingIndex};
pub use init::{DefaultHooks, InitConfig, InitHooks, InitStage, RegisterWrite, RegisterWidth};
pub use touch::{TouchPoint, TouchSample};
pub use types::*;
