/// Declares a static global `PARAMS` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `PARAMS` suitable for use in
/// interrupt-based environments, where both the main loop and an ISR need
/// to safely access the parameter tables.
///
/// # Arguments
/// - `$region`: The concrete scratch region type (must implement `ScratchRegion`)
///
/// # Example
/// ```rust
/// use sik_params::storage::RamRegion;
///
/// sik_params::init_param_store!(RamRegion<128>);
///
/// fn main() {
///     assert!(!sik_params::setup_param_store!(RamRegion::<128>::new()));
///     assert_eq!(sik_params::global::param_s_get(&PARAMS, 3), 25);
/// }
/// ```
#[macro_export]
macro_rules! init_param_store {
    ( $region:ty ) => {
        pub static PARAMS: $crate::global::GlobalParams<$region> =
            $crate::global::global_params_init();
    };
}

/// Opens the parameter store and installs it in the `PARAMS` singleton.
///
/// Evaluates to `true` if valid parameters were loaded from the region.
///
/// # Arguments
/// - `$region`: The scratch region holding the persisted parameters
///
/// # Notes
/// - Requires `init_param_store!` to have been used earlier.
/// - Call once from `main()` before enabling interrupts that read parameters.
#[macro_export]
macro_rules! setup_param_store {
    ( $region:expr ) => {
        $crate::global::global_params_setup(&PARAMS, $region)
    };
}

/// Declares a static global `CALIBRATION` instance protected by a `critical_section` mutex.
///
/// # Arguments
/// - `$region`: The concrete scratch region type (must implement `ScratchRegion`)
///
/// # Example
/// ```rust
/// use sik_params::storage::RamRegion;
///
/// sik_params::init_calibration_store!(RamRegion<32>);
///
/// fn main() {
///     sik_params::setup_calibration_store!(RamRegion::<32>::new()).unwrap();
///     assert!(sik_params::global::calibration_set(&CALIBRATION, 0, 0x40));
///     assert_eq!(sik_params::global::calibration_get(&CALIBRATION, 0), 0x40);
/// }
/// ```
#[cfg(feature = "calibration")]
#[macro_export]
macro_rules! init_calibration_store {
    ( $region:ty ) => {
        pub static CALIBRATION: $crate::global::GlobalCalibration<$region> =
            $crate::global::global_calibration_init();
    };
}

/// Opens the calibration store and installs it in the `CALIBRATION` singleton.
///
/// Evaluates to the `Result` of opening the region.
///
/// # Notes
/// - Requires `init_calibration_store!` to have been used earlier.
#[cfg(feature = "calibration")]
#[macro_export]
macro_rules! setup_calibration_store {
    ( $region:expr ) => {
        $crate::global::global_calibration_setup(&CALIBRATION, $region)
    };
}
