use std::fmt;

/// Errors produced while parsing settings, generating salts or hashing.
///
/// A password that does not match a stored record is not an error; see
/// [`verify`](crate::verify).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not a `$`-delimited settings string.
    #[error("malformed bcrypt settings string")]
    MalformedSettings,

    /// The structure parsed but the version tag is not one we produce.
    #[error("unsupported bcrypt version '{0}'")]
    UnsupportedVersion(String),

    /// The cost field is not two digits, or the cost is above the maximum.
    #[error("invalid bcrypt cost '{0}' (expected 04..=31)")]
    InvalidCost(String),

    #[error("invalid bcrypt salt: {0}")]
    InvalidSalt(#[from] SaltError),

    /// A full record was expected but the checksum is missing or unreadable.
    #[error("invalid bcrypt checksum")]
    InvalidChecksum,

    /// The OS random generator could not supply salt bytes.
    #[error("OS random generator unavailable: {0}")]
    InsufficientEntropy(getrandom::Error),
}

/// Why a salt field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaltError {
    TooShort(usize),
    Encoding(Radix64Error),
}

impl fmt::Display for SaltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaltError::TooShort(n) => write!(f, "expected 22 characters, got {n}"),
            SaltError::Encoding(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SaltError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaltError::TooShort(_) => None,
            SaltError::Encoding(e) => Some(e),
        }
    }
}

impl From<Radix64Error> for Error {
    fn from(e: Radix64Error) -> Self {
        Error::InvalidSalt(SaltError::Encoding(e))
    }
}

/// Decoding failures of the bcrypt radix-64 alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Radix64Error {
    #[error("invalid character {byte:#04x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    #[error("{0} symbols do not encode a whole number of bytes")]
    InvalidLength(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
