//! Error types for the parameter and calibration stores.
//!
//! Every failure in this crate is local and recoverable. The worst outcome is a
//! configuration that reverts to its compiled-in defaults.

use thiserror::Error;

/// The storage primitive that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum StorageOp {
    /// Reading the region.
    Read,
    /// Programming bytes into the region.
    Program,
    /// Erasing the region.
    Erase,
}

impl core::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            StorageOp::Read => "read",
            StorageOp::Program => "program",
            StorageOp::Erase => "erase",
        })
    }
}

/// Errors returned by the parameter and calibration stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The ordinal is outside the valid range for its table.
    #[error("unknown parameter")]
    UnknownParameter,
    /// The value is rejected by the parameter's range rule.
    #[error("value out of range")]
    OutOfRange,
    /// The scratch region holds no image (erased flash).
    #[error("no persisted parameters")]
    Blank,
    /// The image length or checksum is invalid.
    #[error("persisted parameters are corrupt")]
    Corrupt,
    /// The image was written by firmware with a different parameter format.
    #[error("parameter format {found} does not match {expected}")]
    FormatMismatch {
        /// Stamp found in the image.
        found: u32,
        /// Stamp this firmware expects.
        expected: u32,
    },
    /// The storage driver reported a failure.
    #[error("storage {0} failed")]
    Storage(StorageOp),
    /// Data read back after a write differs from what was written.
    #[error("storage verification failed")]
    VerifyFailed,
    /// The region is too small for the image.
    #[error("storage region too small")]
    RegionTooSmall,
    /// The calibration table is locked.
    #[error("calibration is locked")]
    CalibrationLocked,
    /// The calibration level is outside the table.
    #[error("invalid calibration level")]
    InvalidLevel,
    /// `0xFF` marks an unprogrammed calibration level and can't be stored.
    #[error("calibration value 0xFF is reserved")]
    ReservedValue,
    /// Some calibration levels have not been programmed yet.
    #[error("calibration is incomplete")]
    CalibrationIncomplete,
}
