//! EVE Panel Specifications
//!
//! Timing and electrical parameters for LCD panels driven by FT81x / BT81x
//! (EVE2, EVE3, EVE4) display controllers, plus the chip-variant table the
//! driver needs to pick the right touch registers and command set.
//!
//! # Features
//!
//! - **no_std compatible** - Profiles are `const` and borrowed by the driver
//! - **Panel templates** - Pre-configured profiles for Crystalfontz panels
//! - **Serde support** - Optional [`PanelConfig`] for JSON/TOML panel files
//! - **Chip variants** - Touch engine and generation per chip identifier
//!
//! # Example
//!
//! ```
//! use eve_specs::displays::CFA480128;
//!
//! let profile = CFA480128;
//! println!("Panel: {}", profile.name);
//! println!("Active area: {}×{}", profile.hsize, profile.vsize);
//! assert_eq!(profile.hcycle, 1042);
//! assert_eq!(profile.hoffset, 41);
//! ```
//!
//! # Custom Panel Profiles
//!
//! ```
//! use eve_specs::{ChipId, ClockSelect, PanelProfile};
//!
//! const MY_PANEL: PanelProfile<'static> = PanelProfile::new(
//!     320, 10, 2, 20, 6, // width, front porch, sync width, back porch, padding
//!     240, 4, 2, 2, 1,   // height, front porch, sync lines, back porch, padding
//!     8,                 // pixel clock divisor
//! )
//! .with_name("Custom QVGA")
//! .with_chip_id(ChipId::Ft812)
//! .with_clock_select(ClockSelect::Default);
//!
//! assert_eq!(MY_PANEL.hcycle, 358);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod chip;
#[cfg(feature = "serde")]
mod config;
pub mod displays;
pub mod memory_map;
mod panel;
pub mod pins;

pub use chip::{ChipId, Generation, TouchEngine};
#[cfg(feature = "serde")]
pub use config::PanelConfig;
pub use panel::{Axis, ClockSelect, ClockSource, PanelProfile, PanelTiming, ProfileError};
pub use pins::{DriveStrength, PdState, Pin, PinDrive, PIN_DRIVE_END};
