//! Persisted image encoding and decoding.
//!
//! The static table is saved as a single contiguous image:
//!
//! ```text
//! +-----+-----------------------------------------------+-----------+
//! | len | value[0] | value[1] | ... | value[PARAM_S_MAX-1] | crc16 LE  |
//! | u8  | u32 LE (format stamp)     each u32 LE           | u16       |
//! +-----+-----------------------------------------------+-----------+
//! ```
//!
//! - `len` counts the record bytes only. An erased region reads `0xFF` here.
//! - The CRC covers `len` and the record, so a torn write never yields an image
//!   with a valid stamp but stale values.
//! - Records shorter than the current table were written before trailing
//!   parameters were appended. They decode to fewer values.
//!
//! ## Functions
//!
//! - [`encode`]: Serialises a full table snapshot
//! - [`decode`]: Validates an image and recovers the stored values

use crate::Error;
use crate::consts::{
    ERASED_BYTE, IMAGE_HEADER_LEN, MIN_RECORD_PARAMS, PARAM_FORMAT_CURRENT, PARAM_IMAGE_LEN,
    PARAM_RECORD_LEN, PARAM_S_MAX, PARAM_VALUE_LEN,
};
use crate::crc::crc16;
use crate::table::ParamValue;
use heapless::Vec;

/// Values recovered from an image, format stamp first.
pub type Record = Vec<ParamValue, PARAM_S_MAX>;

/// Serialises a table snapshot into a persisted image.
///
/// # Arguments
/// - `values`: Every static value in ordinal order, format stamp first
///
/// # Returns
/// The complete image, ready to be programmed from offset 0.
pub fn encode(values: &[ParamValue; PARAM_S_MAX]) -> [u8; PARAM_IMAGE_LEN] {
    let end = IMAGE_HEADER_LEN + PARAM_RECORD_LEN;
    let mut image = [ERASED_BYTE; PARAM_IMAGE_LEN];
    image[0] = PARAM_RECORD_LEN as u8;
    for (chunk, value) in image[IMAGE_HEADER_LEN..end]
        .chunks_exact_mut(PARAM_VALUE_LEN)
        .zip(values.iter())
    {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    let crc = crc16(&image[..end]);
    image[end..].copy_from_slice(&crc.to_le_bytes());
    image
}

/// Validates a persisted image and recovers its values.
///
/// # Behavior
/// - A length byte of `0xFF` means the region was never written
/// - The record length must be a whole number of values, between
///   [`MIN_RECORD_PARAMS`] values and the current table size
/// - The CRC trailer must match
/// - The first value must equal [`PARAM_FORMAT_CURRENT`]
///
/// # Errors
/// - [`Error::Blank`] for an erased region
/// - [`Error::Corrupt`] for a bad length or CRC
/// - [`Error::FormatMismatch`] for an image written by incompatible firmware
pub fn decode(image: &[u8]) -> Result<Record, Error> {
    let len = *image.first().ok_or(Error::Corrupt)? as usize;
    if len == ERASED_BYTE as usize {
        return Err(Error::Blank);
    }
    if len % PARAM_VALUE_LEN != 0
        || len < MIN_RECORD_PARAMS * PARAM_VALUE_LEN
        || len > PARAM_RECORD_LEN
    {
        return Err(Error::Corrupt);
    }

    let end = IMAGE_HEADER_LEN + len;
    let trailer = image.get(end..end + 2).ok_or(Error::Corrupt)?;
    let stored = u16::from_le_bytes([trailer[0], trailer[1]]);
    if crc16(&image[..end]) != stored {
        return Err(Error::Corrupt);
    }

    let mut record = Record::new();
    for c in image[IMAGE_HEADER_LEN..end].chunks_exact(PARAM_VALUE_LEN) {
        record
            .push(u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .map_err(|_| Error::Corrupt)?;
    }

    match record.first() {
        Some(&PARAM_FORMAT_CURRENT) => Ok(record),
        Some(&found) => Err(Error::FormatMismatch {
            found,
            expected: PARAM_FORMAT_CURRENT,
        }),
        None => Err(Error::Corrupt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{STATIC_INFO, StaticParam, Table};

    fn defaults() -> [ParamValue; PARAM_S_MAX] {
        *Table::new(&STATIC_INFO).values()
    }

    /// Builds an image with an arbitrary record, CRC included.
    fn framed(record: &[u32]) -> [u8; PARAM_IMAGE_LEN] {
        let mut image = [ERASED_BYTE; PARAM_IMAGE_LEN];
        image[0] = (record.len() * PARAM_VALUE_LEN) as u8;
        for (i, v) in record.iter().enumerate() {
            let at = IMAGE_HEADER_LEN + i * PARAM_VALUE_LEN;
            image[at..at + PARAM_VALUE_LEN].copy_from_slice(&v.to_le_bytes());
        }
        let end = IMAGE_HEADER_LEN + record.len() * PARAM_VALUE_LEN;
        let crc = crc16(&image[..end]);
        image[end..end + 2].copy_from_slice(&crc.to_le_bytes());
        image
    }

    #[test]
    fn test_layout_is_stamp_first_little_endian() {
        let mut values = defaults();
        values[StaticParam::NetId.index()] = 0x0102_0304;
        let image = encode(&values);
        assert_eq!(image[0] as usize, PARAM_RECORD_LEN);
        assert_eq!(&image[1..5], &PARAM_FORMAT_CURRENT.to_le_bytes());
        let netid = 1 + StaticParam::NetId.index() * 4;
        assert_eq!(&image[netid..netid + 4], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_decode_recovers_values() {
        let mut values = defaults();
        values[StaticParam::TxPower.index()] = 27;
        let record = decode(&encode(&values)).unwrap();
        assert_eq!(record.as_slice(), &values[..]);
    }

    #[test]
    fn test_erased_region_is_blank() {
        assert_eq!(decode(&[ERASED_BYTE; PARAM_IMAGE_LEN]), Err(Error::Blank));
    }

    #[test]
    fn test_empty_input_is_corrupt() {
        assert_eq!(decode(&[]), Err(Error::Corrupt));
    }

    #[test]
    fn test_bad_crc_is_corrupt() {
        let mut image = encode(&defaults());
        image[10] ^= 0x01;
        assert_eq!(decode(&image), Err(Error::Corrupt));
    }

    #[test]
    fn test_bad_length_is_corrupt() {
        let mut image = encode(&defaults());
        image[0] = 63;
        assert_eq!(decode(&image), Err(Error::Corrupt));
        image[0] = 0;
        assert_eq!(decode(&image), Err(Error::Corrupt));
    }

    #[test]
    fn test_truncated_image_is_corrupt() {
        let image = encode(&defaults());
        assert_eq!(decode(&image[..PARAM_IMAGE_LEN - 1]), Err(Error::Corrupt));
    }

    #[test]
    fn test_stale_format_is_rejected() {
        let mut values = defaults();
        values[0] = PARAM_FORMAT_CURRENT - 1;
        assert_eq!(
            decode(&encode(&values)),
            Err(Error::FormatMismatch {
                found: PARAM_FORMAT_CURRENT - 1,
                expected: PARAM_FORMAT_CURRENT,
            })
        );
    }

    #[test]
    fn test_short_legacy_record_decodes() {
        let values = defaults();
        let image = framed(&values[..MIN_RECORD_PARAMS]);
        let record = decode(&image).unwrap();
        assert_eq!(record.len(), MIN_RECORD_PARAMS);
        assert_eq!(record.as_slice(), &values[..MIN_RECORD_PARAMS]);
    }

    #[test]
    fn test_record_below_minimum_is_corrupt() {
        let values = defaults();
        let image = framed(&values[..MIN_RECORD_PARAMS - 1]);
        assert_eq!(decode(&image), Err(Error::Corrupt));
    }
}
