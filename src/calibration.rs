//! Transmit power calibration store.
//!
//! Boards that need per-unit RF calibration carry a small table of correction
//! bytes, one per dBm step from 0 to [`BOARD_MAX_TX_POWER`](crate::consts::BOARD_MAX_TX_POWER).
//! The table is filled in at the factory and then locked. Once locked, it can't be
//! written again until the underlying storage is erased by other means.
//!
//! The table lives in its own scratch region. A parameter reset never touches it.
//!
//! ```text
//! +----------+----------+-----+------------------+------+
//! | level[0] | level[1] | ... | level[LEVELS-1]  | lock |
//! +----------+----------+-----+------------------+------+
//! ```
//!
//! An unprogrammed level reads back as `0xFF`, so `0xFF` itself can't be stored.
//! The lock byte is `0xFF` while the table is open and [`CALIBRATION_LOCKED`] once
//! locked. Any other lock byte found in storage also counts as locked.
//!
//! ## Example
//!
//! ```rust
//! use sik_params::calibration::CalibrationStore;
//! use sik_params::consts::CALIBRATION_LEVELS;
//! use sik_params::storage::RamRegion;
//!
//! let mut cal = CalibrationStore::open(RamRegion::<64>::new()).unwrap();
//! for level in 0..CALIBRATION_LEVELS as u8 {
//!     assert!(cal.calibration_set(level, 100 + level));
//! }
//! assert!(cal.calibration_lock());
//! assert!(!cal.calibration_set(3, 0));
//! assert_eq!(cal.calibration_get(3), 103);
//! ```

use crate::Error;
use crate::consts::{
    CALIBRATION_IMAGE_LEN, CALIBRATION_LEVELS, CALIBRATION_LOCK_OFFSET, CALIBRATION_LOCKED,
    ERASED_BYTE,
};
use crate::error::StorageOp;
use crate::storage::ScratchRegion;

/// Write-once table of transmit power correction bytes.
///
/// ## Notes
///
/// - Every write is read back from storage before it's reported as successful.
/// - The in-memory copy only changes once storage holds the new contents.
/// - Reading never touches storage after [`open`](CalibrationStore::open).
#[derive(Debug)]
pub struct CalibrationStore<S: ScratchRegion> {
    region: S,
    levels: [u8; CALIBRATION_LEVELS],
    locked: bool,
}

impl<S: ScratchRegion> CalibrationStore<S> {
    /// Opens the calibration table stored in `region`.
    ///
    /// # Errors
    /// - [`Error::RegionTooSmall`] if the region can't hold the table
    /// - [`Error::Storage`] if the region can't be read. An unreadable table is
    ///   never assumed to be unlocked.
    pub fn open(mut region: S) -> Result<Self, Error> {
        let image = read_image(&mut region)?;
        let mut levels = [ERASED_BYTE; CALIBRATION_LEVELS];
        levels.copy_from_slice(&image[..CALIBRATION_LEVELS]);
        let locked = image[CALIBRATION_LOCK_OFFSET] != ERASED_BYTE;
        debug!("calibration opened, locked={}", locked);
        Ok(Self {
            region,
            levels,
            locked,
        })
    }

    /// Returns `true` once the table has been locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Consumes the store and returns the scratch region.
    pub fn release(self) -> S {
        self.region
    }

    /// Every level, in order. Unprogrammed levels are `0xFF`.
    pub fn levels(&self) -> &[u8; CALIBRATION_LEVELS] {
        &self.levels
    }

    /// Returns the correction byte for `level`, or `None` if `level` is outside the table.
    pub fn try_get(&self, level: u8) -> Option<u8> {
        self.levels.get(level as usize).copied()
    }

    /// Returns the correction byte for `level`.
    ///
    /// # Returns
    /// The stored byte, or `0xFF` for an unprogrammed or out-of-table level.
    pub fn get(&self, level: u8) -> u8 {
        self.try_get(level).unwrap_or(ERASED_BYTE)
    }

    /// Writes the correction byte for `level`.
    ///
    /// # Behavior
    /// - If storage only needs bits cleared and the region can be reprogrammed,
    ///   the single byte is programmed in place
    /// - Otherwise the whole table is erased and rewritten
    /// - Either way, the table is read back and compared
    ///
    /// # Errors
    /// - [`Error::CalibrationLocked`] once the table is locked, in memory or in storage
    /// - [`Error::InvalidLevel`] if `level` is outside the table
    /// - [`Error::ReservedValue`] for `0xFF`, which reads back as unprogrammed
    /// - [`Error::Storage`] or [`Error::VerifyFailed`] if the write didn't stick
    pub fn set(&mut self, level: u8, value: u8) -> Result<(), Error> {
        if self.locked {
            return Err(Error::CalibrationLocked);
        }
        let index = level as usize;
        if index >= CALIBRATION_LEVELS {
            return Err(Error::InvalidLevel);
        }
        if value == ERASED_BYTE {
            return Err(Error::ReservedValue);
        }

        let mut image = self.image();
        image[index] = value;
        self.commit(&image, index)?;
        self.levels[index] = value;
        Ok(())
    }

    /// Locks the table for good.
    ///
    /// # Behavior
    /// - Refuses while any level is still unprogrammed
    /// - Programs the lock byte and reads the table back
    /// - Locking an already locked table succeeds without touching storage, including
    ///   one whose lock byte is already set in storage
    ///
    /// # Errors
    /// - [`Error::CalibrationIncomplete`] if a level still reads `0xFF`
    /// - [`Error::Storage`] or [`Error::VerifyFailed`] if the lock didn't stick. The
    ///   table stays unlocked in that case.
    pub fn lock(&mut self) -> Result<(), Error> {
        if self.locked {
            return Ok(());
        }
        if self.levels.contains(&ERASED_BYTE) {
            return Err(Error::CalibrationIncomplete);
        }

        let mut image = self.image();
        image[CALIBRATION_LOCK_OFFSET] = CALIBRATION_LOCKED;
        match self.commit(&image, CALIBRATION_LOCK_OFFSET) {
            Ok(()) | Err(Error::CalibrationLocked) => {}
            Err(e) => return Err(e),
        }
        self.locked = true;
        info!("calibration locked");
        Ok(())
    }

    /// Writes the correction byte for `level`.
    ///
    /// # Returns
    /// `true` if the byte was written, `false` otherwise.
    ///
    /// # See also
    /// - [`CalibrationStore::set()`] for the reason behind a `false`
    pub fn calibration_set(&mut self, level: u8, value: u8) -> bool {
        match self.set(level, value) {
            Ok(()) => true,
            Err(e) => {
                debug!("calibration level {} rejected: {}", level, e);
                false
            }
        }
    }

    /// Returns the correction byte for `level`, or `0xFF` if there is none.
    pub fn calibration_get(&self, level: u8) -> u8 {
        self.get(level)
    }

    /// Locks the table.
    ///
    /// # Returns
    /// `true` if the table is now locked in storage.
    pub fn calibration_lock(&mut self) -> bool {
        match self.lock() {
            Ok(()) => true,
            Err(e) => {
                warn!("calibration lock failed: {}", e);
                false
            }
        }
    }

    fn image(&self) -> [u8; CALIBRATION_IMAGE_LEN] {
        let mut image = [ERASED_BYTE; CALIBRATION_IMAGE_LEN];
        image[..CALIBRATION_LEVELS].copy_from_slice(&self.levels);
        if self.locked {
            image[CALIBRATION_LOCK_OFFSET] = CALIBRATION_LOCKED;
        }
        image
    }

    /// Brings storage to `image`, where only the byte at `offset` differs from
    /// the in-memory copy.
    ///
    /// A lock byte already set in storage wins over the in-memory copy: the
    /// stored levels are adopted and nothing is written.
    fn commit(&mut self, image: &[u8; CALIBRATION_IMAGE_LEN], offset: usize) -> Result<(), Error> {
        let current = read_image(&mut self.region)?;
        if current[CALIBRATION_LOCK_OFFSET] != ERASED_BYTE {
            warn!("calibration already locked in storage");
            self.levels.copy_from_slice(&current[..CALIBRATION_LEVELS]);
            self.locked = true;
            return Err(Error::CalibrationLocked);
        }

        let in_place = self.region.can_reprogram()
            && current.iter().enumerate().all(|(i, &old)| {
                if i == offset {
                    old & image[i] == image[i]
                } else {
                    old == image[i]
                }
            });

        if in_place {
            trace!("calibration byte {} programmed in place", offset);
            self.region
                .program(offset, &image[offset..=offset])
                .map_err(|_| Error::Storage(StorageOp::Program))?;
        } else {
            trace!("calibration table rewritten");
            self.region
                .erase()
                .map_err(|_| Error::Storage(StorageOp::Erase))?;
            self.region
                .program(0, image)
                .map_err(|_| Error::Storage(StorageOp::Program))?;
        }

        if read_image(&mut self.region)? != *image {
            return Err(Error::VerifyFailed);
        }
        Ok(())
    }
}

fn read_image<S: ScratchRegion>(region: &mut S) -> Result<[u8; CALIBRATION_IMAGE_LEN], Error> {
    if region.capacity() < CALIBRATION_IMAGE_LEN {
        return Err(Error::RegionTooSmall);
    }
    let mut image = [0u8; CALIBRATION_IMAGE_LEN];
    region
        .read(0, &mut image)
        .map_err(|_| Error::Storage(StorageOp::Read))?;
    Ok(image)
}
