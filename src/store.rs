//! Parameter store and persistence engine.
//!
//! This module provides the [`ParamStore`] struct, which owns both parameter tables
//! and the scratch region they are persisted to. It is the single writer of
//! configuration state: the AT command layer and the radio control loop both go
//! through it, either directly or through the [`crate::global`] singleton.
//!
//! ## Features
//!
//! - Range-checked setters for the static and runtime tables
//! - Raw-ordinal accessors matching the AT S-register interface
//! - Load with format stamp, length and CRC validation, falling back to defaults
//! - Save as one erase+program transaction, verified by read-back and retried
//!
//! ## Example
//!
//! ```rust
//! use sik_params::storage::RamRegion;
//! use sik_params::store::{ParamStore, StoreState};
//! use sik_params::table::StaticParam;
//!
//! let mut params = ParamStore::open(RamRegion::<128>::new());
//! assert!(matches!(params.state(), StoreState::LoadedInvalid(_)));
//!
//! params.set_static(StaticParam::NetId, 42).unwrap();
//! params.save().unwrap();
//!
//! // Simulate a restart on the same flash
//! let mut params = ParamStore::open(params.release());
//! assert_eq!(params.state(), StoreState::LoadedValid);
//! assert_eq!(params.get_static(StaticParam::NetId), 42);
//! ```
//!
//! ## Design Notes
//!
//! Writes only touch memory. Nothing is durable until [`ParamStore::save`] returns
//! `Ok`. Runtime parameters are never persisted and start from their defaults.

use crate::Error;
use crate::consts::{PARAM_FORMAT_CURRENT, PARAM_IMAGE_LEN, PARAM_R_MAX, PARAM_S_MAX, SAVE_ATTEMPTS};
use crate::error::StorageOp;
use crate::image::{self, Record};
use crate::storage::ScratchRegion;
use crate::table::{ParamValue, RUNTIME_INFO, RuntimeParam, STATIC_INFO, StaticParam, Table};

/// Where the static table's contents came from.
///
/// A store starts [`Uninitialized`](StoreState::Uninitialized) and moves to one of
/// the loaded states on every [`ParamStore::load`]. Saving is a transient step
/// inside [`ParamStore::save`] and does not change the state.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum StoreState {
    /// No load attempted. The table holds compiled-in defaults.
    #[default]
    Uninitialized,
    /// The persisted image was valid and its values are in the table.
    LoadedValid,
    /// The persisted image could not be used. The table holds compiled-in defaults
    /// and the reason is kept here.
    LoadedInvalid(Error),
}

/// Owner of the static and runtime parameter tables and their scratch region.
///
/// ## Type Parameters
///
/// - `S`: A [`ScratchRegion`] at least [`PARAM_IMAGE_LEN`] bytes long
///
/// ## Notes
///
/// - Only one `ParamStore` should exist per firmware image.
/// - Rejected writes never change the table.
/// - [`get_static`](ParamStore::get_static) and friends return values, never errors.
///   The raw `param_*_get` accessors return `0` for an unknown ordinal, the
///   `param_*_try_get` ones return `None`.
#[derive(Debug)]
pub struct ParamStore<S: ScratchRegion> {
    region: S,
    state: StoreState,
    statics: Table<PARAM_S_MAX>,
    runtime: Table<PARAM_R_MAX>,
    dirty: bool,

    /// Counter of saves that reached storage and verified.
    pub save_good: u16,

    /// Counter of saves that failed after every attempt.
    pub save_bad: u16,
}

impl<S: ScratchRegion> ParamStore<S> {
    /// Creates a store holding compiled-in defaults, without touching storage.
    ///
    /// # Arguments
    /// - `region`: The scratch region the static table is persisted to.
    pub fn new(region: S) -> Self {
        Self {
            region,
            state: StoreState::Uninitialized,
            statics: Table::new(&STATIC_INFO),
            runtime: Table::new(&RUNTIME_INFO),
            dirty: false,
            save_good: 0,
            save_bad: 0,
        }
    }

    /// Creates a store and immediately loads the persisted parameters.
    ///
    /// The outcome is available through [`state()`](ParamStore::state).
    pub fn open(region: S) -> Self {
        let mut store = Self::new(region);
        let _ = store.load();
        store
    }

    /// Current load state.
    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Returns `true` if the last load found a valid image.
    pub fn is_loaded(&self) -> bool {
        self.state == StoreState::LoadedValid
    }

    /// Returns `true` if the static table changed since it was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The scratch region.
    pub fn region(&self) -> &S {
        &self.region
    }

    /// The scratch region, mutably.
    pub fn region_mut(&mut self) -> &mut S {
        &mut self.region
    }

    /// Consumes the store and returns the scratch region.
    pub fn release(self) -> S {
        self.region
    }

    /// Every static value in ordinal order.
    pub fn statics(&self) -> &[ParamValue; PARAM_S_MAX] {
        self.statics.values()
    }

    /// Every runtime value in ordinal order.
    pub fn runtime(&self) -> &[ParamValue; PARAM_R_MAX] {
        self.runtime.values()
    }

    /// Returns the value of a static parameter.
    pub fn get_static(&self, param: StaticParam) -> ParamValue {
        self.statics.values()[param.index()]
    }

    /// Sets a static parameter.
    ///
    /// # Note
    /// The value is not saved until [`save()`](ParamStore::save) is called.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the parameter's rule rejects `value`. The table is
    /// left unchanged.
    pub fn set_static(&mut self, param: StaticParam, value: ParamValue) -> Result<(), Error> {
        self.statics.set(param.index(), value)?;
        self.dirty = true;
        Ok(())
    }

    /// Clamps `value` into the parameter's rule and stores it.
    ///
    /// # Returns
    /// The value actually stored.
    pub fn set_static_clamped(&mut self, param: StaticParam, value: ParamValue) -> ParamValue {
        self.dirty = true;
        self.statics
            .set_clamped(param.index(), value)
            .unwrap_or(value)
    }

    /// Returns the value of a runtime parameter.
    pub fn get_runtime(&self, param: RuntimeParam) -> ParamValue {
        self.runtime.values()[param.index()]
    }

    /// Sets a runtime parameter. Runtime parameters are never saved.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the parameter's rule rejects `value`.
    pub fn set_runtime(&mut self, param: RuntimeParam, value: ParamValue) -> Result<(), Error> {
        self.runtime.set(param.index(), value)
    }

    /// Clamps `value` into the parameter's rule and stores it.
    ///
    /// # Returns
    /// The value actually stored.
    pub fn set_runtime_clamped(&mut self, param: RuntimeParam, value: ParamValue) -> ParamValue {
        self.runtime
            .set_clamped(param.index(), value)
            .unwrap_or(value)
    }

    /// Sets a static parameter by raw ordinal.
    ///
    /// # Returns
    /// `true` if the ordinal is known and the value is valid.
    pub fn param_s_set(&mut self, id: u8, value: ParamValue) -> bool {
        match StaticParam::try_from(id).and_then(|p| self.set_static(p, value)) {
            Ok(()) => true,
            Err(e) => {
                debug!("S{}={} rejected: {}", id, value, e);
                false
            }
        }
    }

    /// Sets a runtime parameter by raw ordinal.
    ///
    /// # Returns
    /// `true` if the ordinal is known and the value is valid.
    pub fn param_r_set(&mut self, id: u8, value: ParamValue) -> bool {
        match RuntimeParam::try_from(id).and_then(|p| self.set_runtime(p, value)) {
            Ok(()) => true,
            Err(e) => {
                debug!("R{}={} rejected: {}", id, value, e);
                false
            }
        }
    }

    /// Returns a static parameter by raw ordinal, or zero if the ordinal is not known.
    ///
    /// # Notes
    /// Zero is also a legitimate value for several parameters. Use
    /// [`param_s_try_get()`](ParamStore::param_s_try_get) to tell the two apart.
    pub fn param_s_get(&self, id: u8) -> ParamValue {
        self.param_s_try_get(id).unwrap_or(0)
    }

    /// Returns a runtime parameter by raw ordinal, or zero if the ordinal is not known.
    pub fn param_r_get(&self, id: u8) -> ParamValue {
        self.param_r_try_get(id).unwrap_or(0)
    }

    /// Returns a static parameter by raw ordinal, or `None` if the ordinal is not known.
    pub fn param_s_try_get(&self, id: u8) -> Option<ParamValue> {
        self.statics.get(id as usize)
    }

    /// Returns a runtime parameter by raw ordinal, or `None` if the ordinal is not known.
    pub fn param_r_try_get(&self, id: u8) -> Option<ParamValue> {
        self.runtime.get(id as usize)
    }

    /// Resets every static parameter to its compiled-in default.
    ///
    /// # Note
    /// This just resets, it does not save. Runtime parameters and the scratch
    /// region are left alone.
    pub fn reset_defaults(&mut self) {
        self.statics.reset();
        self.dirty = true;
        info!("parameters reset to defaults");
    }

    /// Loads the static parameters from the scratch region.
    ///
    /// # Returns
    /// - `true`: A valid image was found and its values are now in the table
    /// - `false`: No usable image; the table holds compiled-in defaults
    ///
    /// # See also
    /// - [`ParamStore::try_load()`] for the reason behind a `false`
    pub fn load(&mut self) -> bool {
        self.try_load().is_ok()
    }

    /// Loads the static parameters from the scratch region.
    ///
    /// # Behavior
    /// - Reads and decodes the whole image (see [`crate::image`])
    /// - On any failure, resets the table to defaults and records
    ///   [`StoreState::LoadedInvalid`]
    /// - On success, values that no longer pass their rule are replaced by their
    ///   default, parameters missing from a shorter legacy record keep their
    ///   default, and the table is replaced in one step
    ///
    /// # Errors
    /// - [`Error::RegionTooSmall`] if the region cannot hold an image
    /// - [`Error::Storage`] if the region cannot be read
    /// - [`Error::Blank`], [`Error::Corrupt`], [`Error::FormatMismatch`] for an
    ///   unusable image
    pub fn try_load(&mut self) -> Result<(), Error> {
        match self.read_image() {
            Ok(record) => {
                self.adopt(&record);
                self.state = StoreState::LoadedValid;
                self.dirty = false;
                info!("loaded {} parameters", record.len());
                Ok(())
            }
            Err(e) => {
                self.statics.reset();
                self.state = StoreState::LoadedInvalid(e);
                self.dirty = false;
                warn!("stored parameters unusable, using defaults: {}", e);
                Err(e)
            }
        }
    }

    /// Saves the static parameters to the scratch region.
    ///
    /// # Behavior
    /// - Stamps parameter 0 with [`PARAM_FORMAT_CURRENT`]
    /// - Erases the region and programs the complete image in one pass
    /// - Reads the image back and compares it
    /// - Retries up to [`SAVE_ATTEMPTS`] times
    ///
    /// # Errors
    /// The last failure once every attempt is used up: [`Error::Storage`],
    /// [`Error::VerifyFailed`], or [`Error::RegionTooSmall`]. A failed save leaves
    /// the table untouched and the store dirty.
    pub fn save(&mut self) -> Result<(), Error> {
        if self.region.capacity() < PARAM_IMAGE_LEN {
            self.save_bad = self.save_bad.wrapping_add(1);
            return Err(Error::RegionTooSmall);
        }
        let mut values = *self.statics.values();
        values[StaticParam::Format.index()] = PARAM_FORMAT_CURRENT;
        let image = image::encode(&values);

        let mut last = Error::VerifyFailed;
        for attempt in 1..=SAVE_ATTEMPTS {
            match self.write_image(&image) {
                Ok(()) => {
                    self.dirty = false;
                    self.save_good = self.save_good.wrapping_add(1);
                    debug!("parameters saved on attempt {}", attempt);
                    return Ok(());
                }
                Err(e) => {
                    warn!("parameter save attempt {} failed: {}", attempt, e);
                    last = e;
                }
            }
        }
        self.save_bad = self.save_bad.wrapping_add(1);
        error!("parameters not saved: {}", last);
        Err(last)
    }

    fn read_image(&mut self) -> Result<Record, Error> {
        if self.region.capacity() < PARAM_IMAGE_LEN {
            return Err(Error::RegionTooSmall);
        }
        let mut buf = [0u8; PARAM_IMAGE_LEN];
        self.region
            .read(0, &mut buf)
            .map_err(|_| Error::Storage(StorageOp::Read))?;
        image::decode(&buf)
    }

    fn write_image(&mut self, image: &[u8; PARAM_IMAGE_LEN]) -> Result<(), Error> {
        self.region
            .erase()
            .map_err(|_| Error::Storage(StorageOp::Erase))?;
        self.region
            .program(0, image)
            .map_err(|_| Error::Storage(StorageOp::Program))?;

        let mut check = [0u8; PARAM_IMAGE_LEN];
        self.region
            .read(0, &mut check)
            .map_err(|_| Error::Storage(StorageOp::Read))?;
        if check != *image {
            return Err(Error::VerifyFailed);
        }
        Ok(())
    }

    /// Copies a decoded record over the defaults, rejecting values that fail their rule.
    fn adopt(&mut self, record: &Record) {
        let mut values = *Table::new(&STATIC_INFO).values();
        for ((slot, info), &value) in values.iter_mut().zip(STATIC_INFO.iter()).zip(record) {
            if info.range.contains(value) {
                *slot = value;
            } else {
                warn!("stored {}={} out of range, using default", info.name, value);
            }
        }
        self.statics.replace(values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOARD_MAX_TX_POWER, ERASED_BYTE};
    use crate::crc::crc16;
    use crate::storage::RamRegion;

    type Region = RamRegion<PARAM_IMAGE_LEN>;

    fn defaults() -> [ParamValue; PARAM_S_MAX] {
        *Table::new(&STATIC_INFO).values()
    }

    #[test]
    fn test_store_initialization() {
        let store = ParamStore::new(Region::new());
        assert_eq!(store.state(), StoreState::Uninitialized);
        assert!(!store.is_dirty());
        assert_eq!(store.statics(), &defaults());
        assert_eq!(store.get_runtime(RuntimeParam::TargetRssi), 255);
        assert_eq!(store.get_runtime(RuntimeParam::HysteresisRssi), 50);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = ParamStore::new(Region::new());
        assert!(store.set_static(StaticParam::AirSpeed, 128).is_ok());
        assert_eq!(store.get_static(StaticParam::AirSpeed), 128);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_txpower_bounds() {
        let mut store = ParamStore::new(Region::new());
        let before = store.get_static(StaticParam::TxPower);
        assert_eq!(
            store.set_static(StaticParam::TxPower, BOARD_MAX_TX_POWER + 1),
            Err(Error::OutOfRange)
        );
        assert_eq!(store.get_static(StaticParam::TxPower), before);
        assert!(store.set_static(StaticParam::TxPower, BOARD_MAX_TX_POWER).is_ok());
        assert_eq!(store.get_static(StaticParam::TxPower), BOARD_MAX_TX_POWER);
    }

    #[test]
    fn test_raw_accessors_reject_unknown_ordinals() {
        let mut store = ParamStore::new(Region::new());
        assert!(!store.param_s_set(PARAM_S_MAX as u8, 1));
        assert!(!store.param_r_set(PARAM_R_MAX as u8, 1));
        assert_eq!(store.param_s_get(PARAM_S_MAX as u8), 0);
        assert_eq!(store.param_r_get(u8::MAX), 0);
        assert_eq!(store.param_s_try_get(PARAM_S_MAX as u8), None);
        assert_eq!(store.param_s_try_get(StaticParam::Ecc as u8), Some(0));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_raw_set_matches_typed_set() {
        let mut store = ParamStore::new(Region::new());
        assert!(store.param_s_set(StaticParam::DutyCycle as u8, 50));
        assert_eq!(store.get_static(StaticParam::DutyCycle), 50);
        assert!(!store.param_s_set(StaticParam::DutyCycle as u8, 101));
        assert_eq!(store.param_s_get(StaticParam::DutyCycle as u8), 50);
        assert!(store.param_r_set(RuntimeParam::TargetRssi as u8, 120));
        assert_eq!(store.param_r_get(RuntimeParam::TargetRssi as u8), 120);
    }

    #[test]
    fn test_format_cannot_be_changed() {
        let mut store = ParamStore::new(Region::new());
        assert!(!store.param_s_set(0, 0));
        assert!(!store.param_s_set(0, PARAM_FORMAT_CURRENT + 1));
        assert_eq!(store.get_static(StaticParam::Format), PARAM_FORMAT_CURRENT);
    }

    #[test]
    fn test_clamped_setters() {
        let mut store = ParamStore::new(Region::new());
        assert_eq!(store.set_static_clamped(StaticParam::DutyCycle, 250), 100);
        assert_eq!(store.set_static_clamped(StaticParam::Mavlink, 2), 2);
        assert_eq!(store.set_runtime_clamped(RuntimeParam::HysteresisRssi, 900), 255);
        assert_eq!(store.get_runtime(RuntimeParam::HysteresisRssi), 255);
    }

    #[test]
    fn test_fresh_boot_on_erased_region() {
        let mut store = ParamStore::new(Region::new());
        assert!(!store.load());
        assert_eq!(store.state(), StoreState::LoadedInvalid(Error::Blank));
        assert_eq!(store.statics(), &defaults());
    }

    #[test]
    fn test_save_then_load_restores_values() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::NetId, 0xdead_beef).unwrap();
        store.set_static(StaticParam::SerialSpeed, 115).unwrap();
        store.set_static(StaticParam::RtsCts, 1).unwrap();
        let saved = *store.statics();
        assert_eq!(store.save(), Ok(()));
        assert!(!store.is_dirty());
        assert_eq!(store.save_good, 1);

        let mut restarted = ParamStore::new(store.release());
        assert!(restarted.load());
        assert_eq!(restarted.state(), StoreState::LoadedValid);
        assert_eq!(restarted.statics(), &saved);
    }

    #[test]
    fn test_load_failure_discards_unsaved_changes() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::NetId, 7).unwrap();
        assert!(!store.load());
        assert_eq!(store.get_static(StaticParam::NetId), 25);
    }

    #[test]
    fn test_stale_format_loads_defaults() {
        let mut values = defaults();
        values[0] = 0x1a;
        values[StaticParam::NetId.index()] = 99;
        let mut region = Region::new();
        region.rewrite(&image::encode(&values)).unwrap();

        let mut store = ParamStore::new(region);
        assert!(!store.load());
        assert_eq!(
            store.state(),
            StoreState::LoadedInvalid(Error::FormatMismatch {
                found: 0x1a,
                expected: PARAM_FORMAT_CURRENT
            })
        );
        assert_eq!(store.statics(), &defaults());
    }

    #[test]
    fn test_read_failure_loads_defaults() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::Ecc, 1).unwrap();
        store.save().unwrap();
        store.region_mut().fail_reads(true);
        assert_eq!(store.try_load(), Err(Error::Storage(StorageOp::Read)));
        assert_eq!(store.statics(), &defaults());
    }

    #[test]
    fn test_save_writes_current_stamp_first() {
        let mut store = ParamStore::new(Region::new());
        store.save().unwrap();
        assert_eq!(&store.region().as_bytes()[1..5], &PARAM_FORMAT_CURRENT.to_le_bytes());
        assert_eq!(store.get_static(StaticParam::Format), PARAM_FORMAT_CURRENT);
        assert_eq!(store.statics(), &defaults());
    }

    #[test]
    fn test_corrupt_image_loads_defaults() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::Ecc, 1).unwrap();
        store.save().unwrap();
        let ecc = 1 + StaticParam::Ecc.index() * 4;
        assert_eq!(store.region().as_bytes()[ecc], 0x01);
        store.region_mut().corrupt(ecc, 0x00);
        assert_eq!(store.try_load(), Err(Error::Corrupt));
        assert_eq!(store.get_static(StaticParam::Ecc), 0);
    }

    #[test]
    fn test_torn_image_is_rejected() {
        let mut values = defaults();
        values[StaticParam::NetId.index()] = 1234;
        let mut region = Region::new();
        region.tear_next_program(PARAM_IMAGE_LEN / 2);
        region.rewrite(&image::encode(&values)).unwrap();

        let mut store = ParamStore::new(region);
        assert_eq!(store.try_load(), Err(Error::Corrupt));
        assert_eq!(store.statics(), &defaults());
    }

    #[test]
    fn test_out_of_range_stored_value_reverts_to_default() {
        let mut values = defaults();
        values[StaticParam::TxPower.index()] = 99;
        values[StaticParam::NetId.index()] = 5;
        let mut region = Region::new();
        region.rewrite(&image::encode(&values)).unwrap();

        let mut store = ParamStore::new(region);
        assert!(store.load());
        assert_eq!(store.get_static(StaticParam::TxPower), 20);
        assert_eq!(store.get_static(StaticParam::NetId), 5);
    }

    #[test]
    fn test_legacy_short_record_keeps_trailing_defaults() {
        let mut values = defaults();
        values[StaticParam::AirSpeed.index()] = 128;
        let len = 12 * 4;
        let mut image = [ERASED_BYTE; 1 + 12 * 4 + 2];
        image[0] = len as u8;
        for (i, v) in values[..12].iter().enumerate() {
            image[1 + i * 4..5 + i * 4].copy_from_slice(&v.to_le_bytes());
        }
        let crc = crc16(&image[..1 + len]);
        image[1 + len..].copy_from_slice(&crc.to_le_bytes());
        let mut region = Region::new();
        region.rewrite(&image).unwrap();

        let mut store = ParamStore::new(region);
        assert!(store.load());
        assert_eq!(store.get_static(StaticParam::AirSpeed), 128);
        assert_eq!(store.get_static(StaticParam::MaxWindow), 131);
        assert_eq!(store.get_static(StaticParam::RtsCts), 0);
    }

    #[test]
    fn test_save_retries_transient_failure() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::MinFreq, 915).unwrap();
        store.region_mut().fail_next_writes(1);
        assert_eq!(store.save(), Ok(()));
        assert!(store.load());
        assert_eq!(store.get_static(StaticParam::MinFreq), 915);
    }

    #[test]
    fn test_save_retries_torn_write() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::MaxFreq, 928).unwrap();
        store.region_mut().tear_next_program(10);
        assert_eq!(store.save(), Ok(()));
        assert_eq!(store.region().erase_count(), 2);
        assert!(store.load());
        assert_eq!(store.get_static(StaticParam::MaxFreq), 928);
    }

    #[test]
    fn test_save_failure_is_surfaced() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::MinFreq, 433).unwrap();
        store.region_mut().fail_next_writes(SAVE_ATTEMPTS);
        assert_eq!(store.save(), Err(Error::Storage(StorageOp::Erase)));
        assert!(store.is_dirty());
        assert_eq!(store.save_bad, 1);
        assert_eq!(store.get_static(StaticParam::MinFreq), 433);
    }

    #[test]
    fn test_region_too_small() {
        let mut store = ParamStore::new(RamRegion::<16>::new());
        assert_eq!(store.save(), Err(Error::RegionTooSmall));
        assert_eq!(store.try_load(), Err(Error::RegionTooSmall));
    }

    #[test]
    fn test_reset_defaults_is_idempotent_and_memory_only() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::NetId, 77).unwrap();
        store.save().unwrap();
        let persisted = *store.region().as_bytes();

        store.reset_defaults();
        let once = *store.statics();
        store.reset_defaults();
        assert_eq!(store.statics(), &once);
        assert_eq!(once, defaults());
        assert_eq!(store.region().as_bytes(), &persisted);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_reset_leaves_runtime_alone() {
        let mut store = ParamStore::new(Region::new());
        store.set_runtime(RuntimeParam::TargetRssi, 90).unwrap();
        store.reset_defaults();
        assert_eq!(store.get_runtime(RuntimeParam::TargetRssi), 90);
    }

    #[test]
    fn test_open_loads_immediately() {
        let mut store = ParamStore::new(Region::new());
        store.set_static(StaticParam::Manchester, 1).unwrap();
        store.save().unwrap();
        let store = ParamStore::open(store.release());
        assert_eq!(store.state(), StoreState::LoadedValid);
        assert_eq!(store.get_static(StaticParam::Manchester), 1);
    }
}
