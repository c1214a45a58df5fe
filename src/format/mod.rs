//! The bcrypt settings string and stored record formats.
//!
//! ```text
//! $2a$CC$SSSSSSSSSSSSSSSSSSSSSSHHHHHHHHHHHHHHHHHHHHHHHHHHHHHHH
//! ```
//!
//! `CC` is the two-digit cost, `S` the 22-symbol salt and `H` the 31-symbol
//! checksum. The first 29 characters are the settings string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::{Cost, ENCODED_SALT_LEN, SALT_LEN, radix64};
use crate::error::{Error, Radix64Error, Result, SaltError};

pub mod record;

pub use record::StoredRecord;

/// Length of a `$2a$` settings string.
pub const SETTINGS_LEN: usize = 7 + ENCODED_SALT_LEN;
/// Length of a `$2a$` stored record.
pub const RECORD_LEN: usize = SETTINGS_LEN + crate::crypto::ENCODED_CHECKSUM_LEN;

const SEPARATOR: char = '$';

/// Scheme revision tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Version {
    /// `2a`, the revision that fixed repeated-string key expansion.
    #[default]
    TwoA,
}

impl Version {
    pub fn as_str(self) -> &'static str {
        match self {
            Version::TwoA => "2a",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "2a" => Ok(Version::TwoA),
            other => Err(Error::UnsupportedVersion(other.to_string())),
        }
    }
}

/// How a hash was (or will be) produced: version, cost and salt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Settings {
    version: Version,
    cost: Cost,
    salt: [u8; SALT_LEN],
}

impl Settings {
    pub fn new(version: Version, cost: Cost, salt: [u8; SALT_LEN]) -> Self {
        Self {
            version,
            cost,
            salt,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }
}

/// Serializes as `$<version>$<cost>$<salt>`; always 29 characters.
impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SEPARATOR}{}{SEPARATOR}{:02}{SEPARATOR}{}",
            self.version,
            self.cost.log_rounds(),
            radix64::encode(&self.salt)
        )
    }
}

impl FromStr for Settings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl TryFrom<String> for Settings {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        parse(&s)
    }
}

impl From<Settings> for String {
    fn from(settings: Settings) -> Self {
        settings.to_string()
    }
}

/// Parses a settings string or a full stored record.
///
/// Only the settings prefix is read; anything after the 22 salt symbols is
/// ignored.
///
/// # Errors
///
/// - [`Error::MalformedSettings`] if the input does not start with `$` or has
///   fewer than four `$`-delimited fields
/// - [`Error::UnsupportedVersion`] for a tag other than `2a`
/// - [`Error::InvalidCost`] if the cost is not two digits in `04..=31`
/// - [`Error::InvalidSalt`] if the salt is short or leaves the alphabet
pub fn parse(s: &str) -> Result<Settings> {
    let mut fields = s.splitn(4, SEPARATOR);
    let (Some(""), Some(version), Some(cost), Some(rest)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::MalformedSettings);
    };

    let version = version.parse::<Version>()?;
    let cost = parse_cost(cost)?;
    let salt = parse_salt(rest)?;

    Ok(Settings::new(version, cost, salt))
}

fn parse_cost(field: &str) -> Result<Cost> {
    let invalid = || Error::InvalidCost(field.to_string());

    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let log_rounds: u32 = field.parse().map_err(|_| invalid())?;
    Cost::exact(log_rounds).ok_or_else(invalid)
}

fn parse_salt(field: &str) -> Result<[u8; SALT_LEN]> {
    let bytes = field.as_bytes();
    if bytes.len() < ENCODED_SALT_LEN {
        return Err(SaltError::TooShort(bytes.len()).into());
    }

    let encoded = &bytes[..ENCODED_SALT_LEN];
    if let Some(offset) = encoded.iter().position(|&b| !radix64::is_symbol(b)) {
        return Err(Radix64Error::InvalidCharacter {
            offset,
            byte: encoded[offset],
        }
        .into());
    }

    // all ASCII, so the slice falls on a char boundary
    let mut salt = [0u8; SALT_LEN];
    radix64::decode_into(&field[..ENCODED_SALT_LEN], &mut salt)?;
    Ok(salt)
}

/// Anything a hash can be computed against.
pub trait ToSettings {
    fn to_settings(&self) -> Result<Settings>;
}

impl ToSettings for Settings {
    fn to_settings(&self) -> Result<Settings> {
        Ok(self.clone())
    }
}

impl ToSettings for StoredRecord {
    fn to_settings(&self) -> Result<Settings> {
        Ok(self.settings().clone())
    }
}

impl ToSettings for str {
    fn to_settings(&self) -> Result<Settings> {
        parse(self)
    }
}

impl ToSettings for String {
    fn to_settings(&self) -> Result<Settings> {
        parse(self)
    }
}

impl<T: ToSettings + ?Sized> ToSettings for &T {
    fn to_settings(&self) -> Result<Settings> {
        (**self).to_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = "$2a$06$m0CrhHm10qJ3lXRY.5zDGO";
    const RECORD: &str = "$2a$06$m0CrhHm10qJ3lXRY.5zDGO3rS2KdeeWLuGmsfGlMfOxih58VYVfxe";

    #[test]
    fn lengths() {
        assert_eq!(SETTINGS_LEN, 29);
        assert_eq!(RECORD_LEN, 60);
        assert_eq!(SETTINGS.len(), SETTINGS_LEN);
        assert_eq!(RECORD.len(), RECORD_LEN);
    }

    #[test]
    fn format_pads_cost() {
        let settings = Settings::new(Version::TwoA, Cost::new(5).unwrap(), [0u8; SALT_LEN]);
        assert_eq!(settings.to_string(), "$2a$05$......................");

        let settings = Settings::new(Version::TwoA, Cost::new(31).unwrap(), [0u8; SALT_LEN]);
        assert!(settings.to_string().starts_with("$2a$31$"));
    }

    #[test]
    fn parse_settings_roundtrip() {
        let settings: Settings = SETTINGS.parse().unwrap();

        assert_eq!(settings.version(), Version::TwoA);
        assert_eq!(settings.cost().log_rounds(), 6);
        assert_eq!(settings.to_string(), SETTINGS);
    }

    #[test]
    fn parse_record_reads_prefix_only() {
        let from_record = parse(RECORD).unwrap();
        let from_settings = parse(SETTINGS).unwrap();

        assert_eq!(from_record, from_settings);
    }

    #[test]
    fn malformed_inputs_fail() {
        for input in ["", "bad salt", "2a$05$CCCCCCCCCCCCCCCCCCCCC.", "$2a$05", "$2a"] {
            assert!(
                matches!(parse(input), Err(Error::MalformedSettings)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn unknown_version_fails() {
        for version in ["2b", "2y", "2", "", "1"] {
            let input = format!("${version}$05$CCCCCCCCCCCCCCCCCCCCC.");
            match parse(&input) {
                Err(Error::UnsupportedVersion(v)) => assert_eq!(v, version),
                other => panic!("expected UnsupportedVersion, got: {other:?}"),
            }
        }
    }

    #[test]
    fn bad_cost_fails() {
        for cost in ["03", "32", "99", "5", "005", "+5", "a5", ""] {
            let input = format!("$2a${cost}$CCCCCCCCCCCCCCCCCCCCC.");
            match parse(&input) {
                Err(Error::InvalidCost(c)) => assert_eq!(c, cost),
                other => panic!("expected InvalidCost for {cost:?}, got: {other:?}"),
            }
        }
        assert!(parse("$2a$04$CCCCCCCCCCCCCCCCCCCCC.").is_ok());
        assert!(parse("$2a$31$CCCCCCCCCCCCCCCCCCCCC.").is_ok());
    }

    #[test]
    fn short_salt_fails() {
        assert!(matches!(
            parse("$2a$05$CCCCCCCCCCCCCCCCCCCCC"),
            Err(Error::InvalidSalt(SaltError::TooShort(21)))
        ));
        assert!(matches!(
            parse("$2a$05$"),
            Err(Error::InvalidSalt(SaltError::TooShort(0)))
        ));
    }

    #[test]
    fn salt_outside_alphabet_fails() {
        match parse("$2a$05$CCCCCCCCCC+CCCCCCCCCC.") {
            Err(Error::InvalidSalt(SaltError::Encoding(Radix64Error::InvalidCharacter {
                offset,
                byte,
            }))) => {
                assert_eq!(offset, 10);
                assert_eq!(byte, b'+');
            }
            other => panic!("expected InvalidSalt, got: {other:?}"),
        }
        assert!(matches!(
            parse("$2a$05$CCCCCCCCCCCCCCCCCCCCC\u{e9}"),
            Err(Error::InvalidSalt(_))
        ));
    }

    #[test]
    fn settings_serde_as_string() {
        let settings = parse(SETTINGS).unwrap();

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, format!("\"{SETTINGS}\""));

        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);

        assert!(serde_json::from_str::<Settings>("\"$2a$99$CCCCCCCCCCCCCCCCCCCCC.\"").is_err());
    }

    #[test]
    fn to_settings_accepts_strings_and_values() {
        let settings = parse(SETTINGS).unwrap();

        assert_eq!(SETTINGS.to_settings().unwrap(), settings);
        assert_eq!(RECORD.to_string().to_settings().unwrap(), settings);
        assert_eq!(settings.to_settings().unwrap(), settings);
    }
}
