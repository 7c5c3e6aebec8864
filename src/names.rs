//! Name lookup for both parameter families.
//!
//! Matching is ASCII case-insensitive: the canonical names are upper case and the
//! AT command parser upper-cases its input, but `txpower` and `TXPOWER` name the
//! same parameter either way. Tables are tiny, so lookups are a linear scan.
//!
//! The raw `param_*_id` functions keep the firmware convention of returning the
//! table's `MAX` ordinal when a name is unknown.

use crate::consts::{PARAM_R_MAX, PARAM_S_MAX};
use crate::table::{ParamInfo, RUNTIME_INFO, RuntimeParam, STATIC_INFO, StaticParam};

fn position(info: &[ParamInfo], name: &str) -> Option<usize> {
    info.iter().position(|i| i.name.eq_ignore_ascii_case(name))
}

impl StaticParam {
    /// Looks up a static parameter by name.
    pub fn from_name(name: &str) -> Option<Self> {
        position(&STATIC_INFO, name).and_then(Self::from_index)
    }

    /// Canonical name of the parameter.
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl RuntimeParam {
    /// Looks up a runtime parameter by name.
    pub fn from_name(name: &str) -> Option<Self> {
        position(&RUNTIME_INFO, name).and_then(Self::from_index)
    }

    /// Canonical name of the parameter.
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

/// Looks up a static parameter ordinal by name.
///
/// # Returns
/// The ordinal, or `PARAM_S_MAX` if the name is not known.
pub fn param_s_id(name: &str) -> u8 {
    StaticParam::from_name(name).map_or(PARAM_S_MAX as u8, |p| p as u8)
}

/// Looks up a runtime parameter ordinal by name.
///
/// # Returns
/// The ordinal, or `PARAM_R_MAX` if the name is not known.
pub fn param_r_id(name: &str) -> u8 {
    RuntimeParam::from_name(name).map_or(PARAM_R_MAX as u8, |p| p as u8)
}

/// Returns the name of a static parameter, or `None` if the ordinal is not known.
pub fn param_s_name(id: u8) -> Option<&'static str> {
    StaticParam::try_from(id).ok().map(StaticParam::name)
}

/// Returns the name of a runtime parameter, or `None` if the ordinal is not known.
pub fn param_r_name(id: u8) -> Option<&'static str> {
    RuntimeParam::try_from(id).ok().map(RuntimeParam::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(StaticParam::from_name("TXPOWER"), Some(StaticParam::TxPower));
        assert_eq!(StaticParam::from_name("FORMAT"), Some(StaticParam::Format));
        assert_eq!(
            RuntimeParam::from_name("TARGET_RSSI"),
            Some(RuntimeParam::TargetRssi)
        );
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(StaticParam::from_name("txpower"), Some(StaticParam::TxPower));
        assert_eq!(
            StaticParam::from_name("Serial_Speed"),
            Some(StaticParam::SerialSpeed)
        );
    }

    #[test]
    fn test_unknown_name_returns_sentinel() {
        assert_eq!(param_s_id("NOPE"), PARAM_S_MAX as u8);
        assert_eq!(param_r_id("TXPOWER"), PARAM_R_MAX as u8);
        assert_eq!(param_s_id(""), PARAM_S_MAX as u8);
        assert_eq!(param_s_id("TXPOWE"), PARAM_S_MAX as u8);
    }

    #[test]
    fn test_families_are_disjoint() {
        assert_eq!(StaticParam::from_name("TARGET_RSSI"), None);
        assert_eq!(RuntimeParam::from_name("NETID"), None);
    }

    #[test]
    fn test_name_of_invalid_ordinal_is_none() {
        assert_eq!(param_s_name(PARAM_S_MAX as u8), None);
        assert_eq!(param_r_name(u8::MAX), None);
        assert_eq!(param_s_name(3), Some("NETID"));
    }

    #[test]
    fn test_names_round_trip() {
        for id in 0..PARAM_S_MAX as u8 {
            let name = param_s_name(id).unwrap();
            assert_eq!(param_s_id(name), id);
        }
        for id in 0..PARAM_R_MAX as u8 {
            let name = param_r_name(id).unwrap();
            assert_eq!(param_r_id(name), id);
        }
    }
}
