use crate::storage::ScratchRegion;
use crate::store::ParamStore;
use crate::table::ParamValue;
use core::cell::RefCell;
use critical_section::Mutex;

/// A `critical_section` guarded parameter store singleton.
pub type GlobalParams<S> = Mutex<RefCell<Option<ParamStore<S>>>>;

/// Used to initialize the global static `ParamStore` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust
/// use sik_params::global::{GlobalParams, global_params_init};
/// use sik_params::storage::RamRegion;
///
/// static PARAMS: GlobalParams<RamRegion<128>> = global_params_init();
/// ```
pub const fn global_params_init<S: ScratchRegion>() -> GlobalParams<S> {
    Mutex::new(RefCell::new(None))
}

/// Opens the parameter store on `region` and installs it in `global`.
///
/// Any store already installed is replaced.
///
/// # Returns
/// `true` if valid parameters were loaded, `false` if the defaults are active.
pub fn global_params_setup<S: ScratchRegion>(global: &GlobalParams<S>, region: S) -> bool {
    let store = ParamStore::open(region);
    let loaded = store.is_loaded();
    critical_section::with(|cs| {
        let _ = global.borrow(cs).replace(Some(store));
    });
    loaded
}

/// Runs `f` on the installed store inside a critical section.
///
/// # Returns
/// `None` if no store has been installed yet.
///
/// # Example
/// ```rust
/// use sik_params::global::{self, GlobalParams};
/// use sik_params::storage::RamRegion;
/// use sik_params::table::RuntimeParam;
///
/// static PARAMS: GlobalParams<RamRegion<128>> = global::global_params_init();
///
/// assert_eq!(global::with_params(&PARAMS, |p| p.state()), None);
/// let _ = global::global_params_setup(&PARAMS, RamRegion::new());
/// let rssi = global::with_params(&PARAMS, |p| p.get_runtime(RuntimeParam::TargetRssi));
/// assert_eq!(rssi, Some(255));
/// ```
pub fn with_params<S: ScratchRegion, R>(
    global: &GlobalParams<S>,
    f: impl FnOnce(&mut ParamStore<S>) -> R,
) -> Option<R> {
    critical_section::with(|cs| global.borrow(cs).borrow_mut().as_mut().map(f))
}

/// Sets a static parameter by raw ordinal.
///
/// # Returns
/// `false` if the ordinal or value is rejected, or no store is installed.
pub fn param_s_set<S: ScratchRegion>(global: &GlobalParams<S>, id: u8, value: ParamValue) -> bool {
    with_params(global, |p| p.param_s_set(id, value)).unwrap_or(false)
}

/// Returns a static parameter by raw ordinal.
///
/// # Returns
/// Zero for an unknown ordinal, or if no store is installed.
pub fn param_s_get<S: ScratchRegion>(global: &GlobalParams<S>, id: u8) -> ParamValue {
    with_params(global, |p| p.param_s_get(id)).unwrap_or(0)
}

/// Sets a runtime parameter by raw ordinal.
///
/// Safe to call from interrupt context.
pub fn param_r_set<S: ScratchRegion>(global: &GlobalParams<S>, id: u8, value: ParamValue) -> bool {
    with_params(global, |p| p.param_r_set(id, value)).unwrap_or(false)
}

/// Returns a runtime parameter by raw ordinal.
///
/// Safe to call from interrupt context.
pub fn param_r_get<S: ScratchRegion>(global: &GlobalParams<S>, id: u8) -> ParamValue {
    with_params(global, |p| p.param_r_get(id)).unwrap_or(0)
}

/// Reloads the static parameters from storage.
///
/// # Returns
/// `true` if valid parameters were loaded.
pub fn param_load<S: ScratchRegion>(global: &GlobalParams<S>) -> bool {
    with_params(global, |p| p.load()).unwrap_or(false)
}

/// Saves the static parameters to storage.
///
/// # Returns
/// `true` only once the image has been written and verified.
///
/// # Notes
/// The whole save runs inside one critical section. Interrupts stay masked for
/// the duration of the flash erase and program.
pub fn param_save<S: ScratchRegion>(global: &GlobalParams<S>) -> bool {
    with_params(global, |p| p.save().is_ok()).unwrap_or(false)
}

/// Resets the static parameters to their defaults, without saving.
pub fn param_default<S: ScratchRegion>(global: &GlobalParams<S>) {
    let _ = with_params(global, |p| p.reset_defaults());
}
