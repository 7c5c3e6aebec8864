//! # sik-params
//!
//! A portable, no_std parameter store for SiK-style telemetry radio modems
//! (HM-TRP, RFD900 and friends).
//!
//! This crate implements the persistent configuration engine of the radio firmware:
//! - two dense, enum-indexed parameter tables (persisted **static** radio settings and
//!   ephemeral **runtime** power-control values)
//! - bidirectional name/ID lookup for the AT command layer
//! - per-parameter range rules applied on every write
//! - a CRC-guarded, format-stamped image saved to and loaded from a flash scratch region
//! - an optional, write-once transmit power calibration table
//!
//! ## Crate features
//! | Feature              | Description |
//! |----------------------|-------------|
//! | `std`                | Disables `#![no_std]` support |
//! | `global` (default)   | `critical_section` guarded singletons and the flat `param_*` surface |
//! | `calibration`        | Transmit power calibration store, for boards that carry one |
//! | `embedded-storage`   | [`storage::NorFlashRegion`] adapter for `embedded-storage` flash drivers |
//! | `defmt-0-3`          | Uses `defmt` logging |
//! | `log`                | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use sik_params::storage::RamRegion;
//! use sik_params::store::ParamStore;
//! use sik_params::table::StaticParam;
//!
//! let mut params = ParamStore::new(RamRegion::<128>::new());
//! if !params.load() {
//!     // Blank or stale scratch region; the compiled-in defaults are active.
//! }
//! assert!(params.set_static(StaticParam::TxPower, 27).is_ok());
//! assert!(params.save().is_ok());
//! ```
//!
//! ## Integration Notes
//!
//! - Parameter ordinals double as AT S-register numbers and as offsets in the
//!   persisted image, so they are never renumbered. New parameters are appended.
//! - Writes only touch memory. Nothing is durable until [`store::ParamStore::save`].
//! - The calibration table lives in its own region and is never touched by a
//!   parameter reset.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "global")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

#[cfg(feature = "calibration")]
pub mod calibration;
pub mod consts;
pub(crate) mod crc;
pub mod error;
#[cfg(feature = "global")]
pub mod global;
pub mod image;
pub mod names;
pub mod range;
pub mod storage;
pub mod store;
pub mod table;

pub use error::Error;
