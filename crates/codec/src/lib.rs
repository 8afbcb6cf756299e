//! # Codec - device value encodings
//!
//! Pure conversions between host values and the integer/byte encodings the
//! news channel firmware expects. Nothing here keeps state.
//!
//! ## Time
//!
//! The device counts time in whole **minutes since 2000-01-01T00:00:00 UTC**
//! stored as a `u32`. [`encode_time`] truncates seconds, so every instant in
//! the same minute encodes to the same value. Instants before the device
//! epoch saturate to `0`.
//!
//! ## Coordinates
//!
//! Latitude and longitude are stored as signed 16-bit fixed-point values with
//! a resolution of `360 / 65536` degrees ([`COORDINATE_SCALE`]). Encoding
//! truncates toward zero and saturates at the `i16` range.
//!
//! ## Text
//!
//! All strings are UTF-16 little-endian. The container adds a two-byte null
//! terminator and zero padding up to a 4-byte boundary; [`encode_utf16`]
//! produces only the code units, and [`padding_for`] computes the pad.
//!
//! ## Example
//!
//! ```rust
//! use codec::{encode_coordinate, encode_utf16, padding_for};
//!
//! assert_eq!(encode_coordinate(0.0054931640625 * 10.0), 10);
//! assert_eq!(encode_utf16("Hi"), vec![b'H', 0, b'i', 0]);
//! assert_eq!(padding_for(6), 2);
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Unix timestamp of the device epoch, 2000-01-01T00:00:00 UTC.
pub const DEVICE_EPOCH_UNIX: i64 = 946_684_800;

/// Degrees per unit of the 16-bit fixed-point coordinate encoding (`360 / 65536`).
pub const COORDINATE_SCALE: f64 = 0.005_493_164_062_5;

/// Byte alignment every variable-length segment is padded to.
pub const ALIGNMENT: usize = 4;

/// Size of the UTF-16 null terminator in bytes.
pub const TERMINATOR_BYTES: usize = 2;

/// Errors produced when decoding device values back into host values.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A UTF-16 payload had an odd number of bytes.
    #[error("utf-16 payload has odd length {0}")]
    OddLength(usize),

    /// A UTF-16 payload contained an unpaired surrogate.
    #[error("invalid utf-16: {0}")]
    InvalidUtf16(#[from] std::string::FromUtf16Error),
}

/// Encodes `t` as whole minutes since the device epoch.
#[must_use]
pub fn encode_time(t: DateTime<Utc>) -> u32 {
    let minutes = (t.timestamp() - DEVICE_EPOCH_UNIX).div_euclid(60);
    if minutes <= 0 {
        return 0;
    }
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Converts an encoded device time back into the instant at the start of
/// that minute.
#[must_use]
pub fn decode_time(value: u32) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(DEVICE_EPOCH_UNIX + i64::from(value) * 60, 0)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Encodes a latitude or longitude in degrees as 16-bit fixed point.
///
/// `as` from `f64` to `i16` truncates toward zero, saturates out-of-range
/// values and maps NaN to `0`, which is the decode behaviour the firmware
/// assumes.
#[must_use]
pub fn encode_coordinate(degrees: f64) -> i16 {
    (degrees / COORDINATE_SCALE) as i16
}

/// Decodes a 16-bit fixed-point coordinate back into degrees.
#[must_use]
pub fn decode_coordinate(value: i16) -> f64 {
    f64::from(value) * COORDINATE_SCALE
}

/// Encodes `text` as UTF-16 little-endian bytes, without a terminator.
#[must_use]
pub fn encode_utf16(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Decodes UTF-16 little-endian bytes (no terminator) into a `String`.
pub fn decode_utf16(bytes: &[u8]) -> Result<String, CodecError> {
    if bytes.len() % 2 != 0 {
        return Err(CodecError::OddLength(bytes.len()));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16(&units)?)
}

/// Number of zero bytes needed to bring `len` up to the next multiple of
/// [`ALIGNMENT`].
#[must_use]
pub fn padding_for(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}
