use crate::Error;
use crate::calibration::CalibrationStore;
use crate::consts::ERASED_BYTE;
use crate::storage::ScratchRegion;
use core::cell::RefCell;
use critical_section::Mutex;

/// A `critical_section` guarded calibration store singleton.
pub type GlobalCalibration<S> = Mutex<RefCell<Option<CalibrationStore<S>>>>;

/// Used to initialize the global static `CalibrationStore` for use with
/// `critical_section`.
pub const fn global_calibration_init<S: ScratchRegion>() -> GlobalCalibration<S> {
    Mutex::new(RefCell::new(None))
}

/// Opens the calibration store on `region` and installs it in `global`.
///
/// # Errors
/// Whatever [`CalibrationStore::open`] reports. Nothing is installed in that case,
/// so every later `calibration_set` fails.
pub fn global_calibration_setup<S: ScratchRegion>(
    global: &GlobalCalibration<S>,
    region: S,
) -> Result<(), Error> {
    let store = CalibrationStore::open(region)?;
    critical_section::with(|cs| {
        let _ = global.borrow(cs).replace(Some(store));
    });
    Ok(())
}

/// Runs `f` on the installed calibration store inside a critical section.
///
/// # Returns
/// `None` if no store has been installed yet.
pub fn with_calibration<S: ScratchRegion, R>(
    global: &GlobalCalibration<S>,
    f: impl FnOnce(&mut CalibrationStore<S>) -> R,
) -> Option<R> {
    critical_section::with(|cs| global.borrow(cs).borrow_mut().as_mut().map(f))
}

/// Writes a calibration level.
///
/// # Returns
/// `false` if the table is locked, the level is invalid, the write failed, or
/// no store is installed.
pub fn calibration_set<S: ScratchRegion>(global: &GlobalCalibration<S>, level: u8, value: u8) -> bool {
    with_calibration(global, |c| c.calibration_set(level, value)).unwrap_or(false)
}

/// Returns a calibration level, or `0xFF` if there is none.
pub fn calibration_get<S: ScratchRegion>(global: &GlobalCalibration<S>, level: u8) -> u8 {
    with_calibration(global, |c| c.calibration_get(level)).unwrap_or(ERASED_BYTE)
}

/// Locks the calibration table.
///
/// # Returns
/// `true` if the table is locked in storage.
pub fn calibration_lock<S: ScratchRegion>(global: &GlobalCalibration<S>) -> bool {
    with_calibration(global, |c| c.calibration_lock()).unwrap_or(false)
}
