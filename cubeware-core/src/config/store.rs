//! Postcard encoding of the refresh configuration
//!
//! The blob layout is whatever postcard produces for `RefreshConfig`;
//! there is no version header.

use super::types::{ConfigError, RefreshConfig};

/// Upper bound on the encoded size (bool + u8 + two varint u32)
pub const MAX_ENCODED_LEN: usize = 1 + 1 + 5 + 5;

impl RefreshConfig {
    /// Serialize into `buf`, returning the used prefix
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize from a stored blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)
    }
}
