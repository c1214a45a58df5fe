//! bcrypt password hashing with a strict `$2a$` settings codec.
//!
//! ```no_run
//! let settings = pwcrypt::gen_salt(12)?;
//! let stored = pwcrypt::hash("hunter2", &settings)?;
//!
//! assert!(pwcrypt::verify("hunter2", &stored)?);
//! assert!(!pwcrypt::verify("hunter3", &stored)?);
//! # Ok::<(), pwcrypt::Error>(())
//! ```
//!
//! Only the first 72 bytes of a password take part in the hash (71 bytes plus
//! a terminating NUL). Longer passwords that share a 72-byte prefix produce
//! the same record.

pub mod crypto;
mod error;
pub mod format;
mod hasher;

pub use crate::crypto::{Cost, DEFAULT_COST, Derive, EksBlowfish, MAX_COST, MIN_COST};
pub use crate::error::{Error, Radix64Error, Result, SaltError};
pub use crate::format::{Settings, StoredRecord, ToSettings, Version};
pub use crate::hasher::Hasher;

/// Generate settings with a fresh random salt.
///
/// Costs below 4 are raised to 4. Costs above 31 fail with
/// [`Error::InvalidCost`]; an unavailable OS random generator fails with
/// [`Error::InsufficientEntropy`].
pub fn generate_salt(cost: u32) -> Result<Settings> {
    crypto::generate_salt(cost)
}

/// Like [`generate_salt`], returning the 29-character settings string.
pub fn gen_salt(cost: u32) -> Result<String> {
    Ok(generate_salt(cost)?.to_string())
}

/// A settings string at [`DEFAULT_COST`].
pub fn gen_salt_default() -> Result<String> {
    gen_salt(DEFAULT_COST)
}

/// Hash `password` with a settings string (or a full stored record, whose
/// checksum is ignored) and return the 60-character record.
///
/// Passwords longer than 72 bytes are cut; see the crate docs.
pub fn hash(password: impl AsRef<[u8]>, settings: &str) -> Result<String> {
    Ok(Hasher::new().hash(password, settings)?.to_string())
}

/// Check `password` against a stored record.
///
/// Returns `Ok(false)` when the password is wrong and `Err` when the record
/// cannot be parsed.
pub fn verify(password: impl AsRef<[u8]>, stored: &str) -> Result<bool> {
    Hasher::new().verify(password, stored)
}
