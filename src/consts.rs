//! Constants used across the parameter store.
//!
//! This module defines table sizes, the persisted image geometry, board limits
//! and the calibration table layout.
//!
//! ## Key Concepts
//!
//! - **Format stamp**: static parameter 0 always holds [`PARAM_FORMAT_CURRENT`]. Bump it
//!   whenever the meaning of an existing ordinal changes.
//! - **Sentinels**: [`PARAM_S_MAX`] and [`PARAM_R_MAX`] are one past the last valid ordinal
//!   and double as the "not found" result of raw name lookups.
//! - **Image**: a length byte, the little-endian record, and a CRC-16 trailer.
//! - **Erased flash** reads back as [`ERASED_BYTE`].
//!
//! These values should be used wherever the image or the tables are sized so that
//! the persisted layout stays in one place.

/// Current parameter format ID, stored in static parameter 0.
///
/// An image carrying any other stamp was written by incompatible firmware and is
/// discarded on load.
pub const PARAM_FORMAT_CURRENT: u32 = 0x1B;

/// Number of static (persisted) parameters. One past the last valid static ordinal.
pub const PARAM_S_MAX: usize = 16;

/// Number of runtime (volatile) parameters. One past the last valid runtime ordinal.
pub const PARAM_R_MAX: usize = 2;

/// Size in bytes of a single stored parameter value.
pub const PARAM_VALUE_LEN: usize = 4;

/// Length (in bytes) of the full record: every static value, format stamp first.
pub const PARAM_RECORD_LEN: usize = PARAM_S_MAX * PARAM_VALUE_LEN;

/// Smallest record accepted on load.
///
/// Images written before trailing parameters were appended carry fewer values.
/// Anything shorter than this is treated as corrupt.
pub const MIN_RECORD_PARAMS: usize = 12;

/// Length (in bytes) of the image length prefix.
pub const IMAGE_HEADER_LEN: usize = 1;

/// Length (in bytes) of the CRC-16 trailer.
pub const IMAGE_CRC_LEN: usize = 2;

/// Maximum size (in bytes) of the persisted image.
///
/// A scratch region must be at least this large.
pub const PARAM_IMAGE_LEN: usize = IMAGE_HEADER_LEN + PARAM_RECORD_LEN + IMAGE_CRC_LEN;

/// Value of an erased flash byte.
pub const ERASED_BYTE: u8 = 0xFF;

/// How many times [`save`](crate::store::ParamStore::save) writes the image before giving up.
pub const SAVE_ATTEMPTS: u8 = 2;

/// Highest transmit power the board supports, in dBm.
pub const BOARD_MAX_TX_POWER: u32 = 30;

/// Number of calibration levels, one per dBm step from 0 to [`BOARD_MAX_TX_POWER`].
pub const CALIBRATION_LEVELS: usize = BOARD_MAX_TX_POWER as usize + 1;

/// Offset of the lock byte inside the calibration image.
pub const CALIBRATION_LOCK_OFFSET: usize = CALIBRATION_LEVELS;

/// Size (in bytes) of the calibration image: every level plus the lock byte.
pub const CALIBRATION_IMAGE_LEN: usize = CALIBRATION_LEVELS + 1;

/// Value programmed into the lock byte when the calibration table is locked.
///
/// Any value other than [`ERASED_BYTE`] reads back as locked.
pub const CALIBRATION_LOCKED: u8 = 0x00;
