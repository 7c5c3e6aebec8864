//! Parameter identifiers, their compiled-in descriptors, and the value tables.
//!
//! Two independent families of parameters exist:
//!
//! - [`StaticParam`]: radio link settings, persisted by [`crate::store::ParamStore::save`].
//!   Ordinal 0 is the format stamp.
//! - [`RuntimeParam`]: dynamic power control values. Reset at every start, never saved.
//!
//! Ordinals match the AT S-register numbers and the offsets in the persisted image,
//! so they are never reordered. New parameters are appended before the `MAX`
//! sentinel, and [`STATIC_INFO`] / [`RUNTIME_INFO`] gain a matching entry.

use crate::Error;
use crate::consts::{BOARD_MAX_TX_POWER, PARAM_FORMAT_CURRENT, PARAM_R_MAX, PARAM_S_MAX};
use crate::range::Range;

/// Parameter value type. All parameters have this type.
pub type ParamValue = u32;

/// Serial speed selectors accepted by the UART driver (kbaud, truncated).
pub const SERIAL_SPEEDS: [u32; 9] = [1, 2, 4, 9, 19, 38, 57, 115, 230];

/// Compiled-in description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    /// Canonical (upper case) name used by the AT command layer
    pub name: &'static str,
    /// Value after a reset to defaults
    pub default: ParamValue,
    /// Values a write may store
    pub range: Range,
}

impl ParamInfo {
    const fn new(name: &'static str, default: ParamValue, range: Range) -> Self {
        Self {
            name,
            default,
            range,
        }
    }
}

/// Static (persisted) parameter identifiers.
///
/// Parameter zero is the format stamp and cannot be changed through the setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum StaticParam {
    /// Parameter format stamp. Must always be parameter 0.
    Format = 0,
    /// Serial baud rate selector, see [`SERIAL_SPEEDS`]
    SerialSpeed,
    /// Over the air data rate
    AirSpeed,
    /// Network ID
    NetId,
    /// Transmit power in dBm
    TxPower,
    /// Golay error correction, 0 or 1
    Ecc,
    /// MAVLink framing: 0 = ignore, 1 = use, 2 = RC override
    Mavlink,
    /// Opportunistic resend, 0 or 1
    OppResend,
    /// Lowest hopping frequency in MHz, 0 = board default
    MinFreq,
    /// Highest hopping frequency in MHz, 0 = board default
    MaxFreq,
    /// Number of hopping channels, 0 = board default
    NumChannels,
    /// Transmit duty cycle in percent
    DutyCycle,
    /// Listen before talk RSSI threshold, 0 = disabled
    LbtRssi,
    /// Manchester encoding, 0 or 1
    Manchester,
    /// Hardware flow control, 0 or 1
    RtsCts,
    /// Maximum transmit window in milliseconds
    MaxWindow,
}

/// Runtime (volatile) parameter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum RuntimeParam {
    /// RSSI the dynamic power control tries to hold, 255 = disabled
    TargetRssi = 0,
    /// Hysteresis band around the target RSSI
    HysteresisRssi,
}

/// Descriptors for the static parameters, indexed by ordinal.
pub static STATIC_INFO: [ParamInfo; PARAM_S_MAX] = [
    ParamInfo::new("FORMAT", PARAM_FORMAT_CURRENT, Range::exactly(PARAM_FORMAT_CURRENT)),
    ParamInfo::new("SERIAL_SPEED", 57, Range::OneOf(&SERIAL_SPEEDS)),
    ParamInfo::new("AIR_SPEED", 64, Range::span(0, 256)),
    ParamInfo::new("NETID", 25, Range::ANY),
    ParamInfo::new("TXPOWER", 20, Range::span(0, BOARD_MAX_TX_POWER)),
    ParamInfo::new("ECC", 0, Range::FLAG),
    ParamInfo::new("MAVLINK", 1, Range::span(0, 2)),
    ParamInfo::new("OPPRESEND", 0, Range::FLAG),
    ParamInfo::new("MIN_FREQ", 0, Range::ANY),
    ParamInfo::new("MAX_FREQ", 0, Range::ANY),
    ParamInfo::new("NUM_CHANNELS", 0, Range::span(0, 50)),
    ParamInfo::new("DUTY_CYCLE", 100, Range::span(0, 100)),
    ParamInfo::new("LBT_RSSI", 0, Range::span(0, 220)),
    ParamInfo::new("MANCHESTER", 0, Range::FLAG),
    ParamInfo::new("RTSCTS", 0, Range::FLAG),
    ParamInfo::new("MAX_WINDOW", 131, Range::span(0, 131)),
];

/// Descriptors for the runtime parameters, indexed by ordinal.
pub static RUNTIME_INFO: [ParamInfo; PARAM_R_MAX] = [
    ParamInfo::new("TARGET_RSSI", 255, Range::span(0, 255)),
    ParamInfo::new("HYSTERESIS_RSSI", 50, Range::span(0, 255)),
];

impl StaticParam {
    /// Every static parameter in ordinal order.
    pub const ALL: [StaticParam; PARAM_S_MAX] = [
        StaticParam::Format,
        StaticParam::SerialSpeed,
        StaticParam::AirSpeed,
        StaticParam::NetId,
        StaticParam::TxPower,
        StaticParam::Ecc,
        StaticParam::Mavlink,
        StaticParam::OppResend,
        StaticParam::MinFreq,
        StaticParam::MaxFreq,
        StaticParam::NumChannels,
        StaticParam::DutyCycle,
        StaticParam::LbtRssi,
        StaticParam::Manchester,
        StaticParam::RtsCts,
        StaticParam::MaxWindow,
    ];

    /// Position of this parameter in the table and in the persisted record.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a parameter by raw ordinal.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PARAM_S_MAX {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Compiled-in descriptor.
    pub fn info(self) -> &'static ParamInfo {
        &STATIC_INFO[self.index()]
    }
}

impl RuntimeParam {
    /// Every runtime parameter in ordinal order.
    pub const ALL: [RuntimeParam; PARAM_R_MAX] =
        [RuntimeParam::TargetRssi, RuntimeParam::HysteresisRssi];

    /// Position of this parameter in the table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a parameter by raw ordinal.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PARAM_R_MAX {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Compiled-in descriptor.
    pub fn info(self) -> &'static ParamInfo {
        &RUNTIME_INFO[self.index()]
    }
}

impl TryFrom<u8> for StaticParam {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize).ok_or(Error::UnknownParameter)
    }
}

impl TryFrom<u8> for RuntimeParam {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize).ok_or(Error::UnknownParameter)
    }
}

/// A fixed-size table of parameter values with their descriptors.
///
/// All writes go through the descriptor's [`Range`]. A rejected write leaves the
/// table untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<const N: usize> {
    values: [ParamValue; N],
    info: &'static [ParamInfo; N],
}

impl<const N: usize> Table<N> {
    /// Creates a table holding the compiled-in defaults.
    pub fn new(info: &'static [ParamInfo; N]) -> Self {
        Self {
            values: info.map(|i| i.default),
            info,
        }
    }

    /// Returns the value at `index`, or `None` past the end of the table.
    pub fn get(&self, index: usize) -> Option<ParamValue> {
        self.values.get(index).copied()
    }

    /// Stores `value` at `index` if the parameter's rule accepts it.
    ///
    /// # Errors
    /// - [`Error::UnknownParameter`] if `index` is past the end of the table
    /// - [`Error::OutOfRange`] if the rule rejects `value`
    pub fn set(&mut self, index: usize, value: ParamValue) -> Result<(), Error> {
        let info = self.info.get(index).ok_or(Error::UnknownParameter)?;
        if !info.range.contains(value) {
            return Err(Error::OutOfRange);
        }
        self.values[index] = value;
        Ok(())
    }

    /// Clamps `value` into the parameter's rule and stores the result.
    ///
    /// # Returns
    /// The value actually stored.
    ///
    /// # Errors
    /// [`Error::UnknownParameter`] if `index` is past the end of the table.
    pub fn set_clamped(&mut self, index: usize, value: ParamValue) -> Result<ParamValue, Error> {
        let info = self.info.get(index).ok_or(Error::UnknownParameter)?;
        let clamped = info.range.clamp(value);
        self.values[index] = clamped;
        Ok(clamped)
    }

    /// Resets every slot to its compiled-in default.
    pub fn reset(&mut self) {
        for (value, info) in self.values.iter_mut().zip(self.info.iter()) {
            *value = info.default;
        }
    }

    /// Raw values in ordinal order.
    pub fn values(&self) -> &[ParamValue; N] {
        &self.values
    }

    /// Descriptors in ordinal order.
    pub fn info(&self) -> &'static [ParamInfo; N] {
        self.info
    }

    /// Overwrites every value at once. Rules are not checked.
    pub(crate) fn replace(&mut self, values: [ParamValue; N]) {
        self.values = values;
    }
}
