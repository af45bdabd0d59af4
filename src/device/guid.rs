//! # Device GUID
//!
//! SDL-compatible device identity built from the evdev `input_id`.
//!
//! ## Layout
//!
//! ```text
//! Byte:  0  1  2  3  4  5  6  7  8  9  10 11 12 13 14 15
//!        bus   0  0  vendor 0  0  product 0 0  version 0 0
//! ```
//!
//! Each field is a little-endian `u16` followed by two zero bytes,
//! regardless of host byte order. The string form is the 16 bytes as
//! 32 lowercase hex characters and is the mapping database key.

use bytes::{Buf, BufMut};
use std::fmt;
use std::str::FromStr;

use crate::error::{PadmapError, Result};

/// Size of an encoded GUID in bytes.
pub const GUID_LEN: usize = 16;

/// Length of the hex string form.
pub const GUID_HEX_LEN: usize = GUID_LEN * 2;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Device identity tuple.
///
/// # Examples
///
/// ```
/// use padmap::device::guid::Guid;
///
/// let guid = Guid::new(0x0003, 0x045e, 0x028e, 0x0114);
/// assert_eq!(guid.to_string(), "030000005e0400008e02000014010000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid {
    pub bus_type: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

impl Guid {
    #[must_use]
    pub const fn new(bus_type: u16, vendor: u16, product: u16, version: u16) -> Self {
        Self {
            bus_type,
            vendor,
            product,
            version,
        }
    }

    /// Encodes the identity into its 16 byte form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; GUID_LEN] {
        let mut bytes = [0u8; GUID_LEN];
        let mut buf = &mut bytes[..];
        for field in [self.bus_type, self.vendor, self.product, self.version] {
            buf.put_u16_le(field);
            buf.put_u16_le(0);
        }
        bytes
    }

    /// Decodes the 16 byte form.
    ///
    /// # Errors
    ///
    /// Returns [`PadmapError::InvalidGuid`] if any padding byte is non-zero.
    pub fn from_bytes(bytes: &[u8; GUID_LEN]) -> Result<Self> {
        let mut buf = &bytes[..];
        let mut fields = [0u16; 4];
        for field in &mut fields {
            *field = buf.get_u16_le();
            if buf.get_u16_le() != 0 {
                return Err(PadmapError::InvalidGuid {
                    guid: encode_hex(bytes),
                    reason: "non-zero padding",
                });
            }
        }
        let [bus_type, vendor, product, version] = fields;
        Ok(Self::new(bus_type, vendor, product, version))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex(&self.to_bytes()))
    }
}

impl FromStr for Guid {
    type Err = PadmapError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| PadmapError::InvalidGuid {
            guid: s.to_string(),
            reason,
        };

        if s.len() != GUID_HEX_LEN {
            return Err(invalid("expected 32 hex characters"));
        }

        let mut bytes = [0u8; GUID_LEN];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            let hi = hex_value(pair[0]).ok_or_else(|| invalid("not lowercase hex"))?;
            let lo = hex_value(pair[1]).ok_or_else(|| invalid("not lowercase hex"))?;
            *byte = (hi << 4) | lo;
        }

        Self::from_bytes(&bytes)
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
        out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
    }
    out
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}
