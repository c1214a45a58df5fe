//! The 60-character stored record: settings followed by the checksum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{RECORD_LEN, SETTINGS_LEN, Settings, parse};
use crate::crypto::{CHECKSUM_LEN, Cost, radix64};
use crate::error::{Error, Result};

/// A complete password hash as persisted.
///
/// Records are never modified. Raising the cost means hashing again with a
/// fresh salt and replacing the old record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoredRecord {
    settings: Settings,
    checksum: [u8; CHECKSUM_LEN],
}

impl StoredRecord {
    pub fn new(settings: Settings, checksum: [u8; CHECKSUM_LEN]) -> Self {
        Self { settings, checksum }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cost(&self) -> Cost {
        self.settings.cost()
    }

    pub fn checksum(&self) -> &[u8; CHECKSUM_LEN] {
        &self.checksum
    }
}

impl fmt::Display for StoredRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.settings, radix64::encode(&self.checksum))
    }
}

/// Parses a full record. Settings errors are reported as by
/// [`parse`](super::parse); a missing or undecodable checksum is
/// [`Error::InvalidChecksum`].
impl FromStr for StoredRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let settings = parse(s)?;

        if s.len() != RECORD_LEN {
            return Err(Error::InvalidChecksum);
        }
        let encoded = s.get(SETTINGS_LEN..).ok_or(Error::InvalidChecksum)?;

        let mut checksum = [0u8; CHECKSUM_LEN];
        radix64::decode_into(encoded, &mut checksum).map_err(|_| Error::InvalidChecksum)?;

        Ok(Self::new(settings, checksum))
    }
}

impl TryFrom<String> for StoredRecord {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<StoredRecord> for String {
    fn from(record: StoredRecord) -> Self {
        record.to_string()
    }
}
