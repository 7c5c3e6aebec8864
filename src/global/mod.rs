//! Global singletons for firmware use.
//!
//! The command loop and interrupt handlers both need the parameter tables. This
//! module keeps the stores in `critical_section` guarded statics and exposes the
//! flat `param_*` / `calibration_*` surface the rest of the firmware calls.
//!
//! Every helper runs its body inside `critical_section::with`, so a `set` from the
//! main loop and a read from an ISR never interleave, and a `calibration_set`
//! racing a `calibration_lock` resolves in whichever order the sections ran.
//!
//! Contains:
//! - [`global_params_init`] / [`global_params_setup`] and the `init_param_store!` /
//!   `setup_param_store!` macros
//! - [`with_params`] for arbitrary access, plus the flat `param_*` helpers
//! - With feature `calibration`: the same for [`CalibrationStore`](crate::calibration::CalibrationStore)
//!
//! ## Example
//!
//! ```rust
//! use sik_params::global::{self, GlobalParams};
//! use sik_params::storage::RamRegion;
//!
//! static PARAMS: GlobalParams<RamRegion<128>> = global::global_params_init();
//!
//! // Blank flash, so the defaults are active.
//! assert!(!global::global_params_setup(&PARAMS, RamRegion::new()));
//!
//! let id = global::param_s_id("TXPOWER");
//! assert!(global::param_s_set(&PARAMS, id, 27));
//! assert!(global::param_save(&PARAMS));
//! assert_eq!(global::param_s_get(&PARAMS, id), 27);
//! ```

mod params;
pub use params::*;

#[cfg(feature = "calibration")]
mod calibration;
#[cfg(feature = "calibration")]
pub use calibration::*;

mod macros;

pub use crate::names::{param_r_id, param_r_name, param_s_id, param_s_name};
