//! Cryptographic building blocks.
//!
//! Provides the radix-64 codec, salt generation, and the bcrypt derivation
//! primitive.

pub mod eks;
pub mod radix64;
pub mod salt;

pub use eks::{Cost, DEFAULT_COST, Derive, EksBlowfish, MAX_COST, MIN_COST};
pub use salt::{EntropySource, OsEntropy, generate_salt, generate_salt_with};

/// Length of the raw salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the raw checksum (23 bytes).
pub const CHECKSUM_LEN: usize = 23;
/// Bytes of key material the derivation primitive consumes, NUL included.
pub const MAX_PASSWORD_LEN: usize = 72;
/// Length of the encoded salt (22 symbols).
pub const ENCODED_SALT_LEN: usize = radix64::encoded_len(SALT_LEN);
/// Length of the encoded checksum (31 symbols).
pub const ENCODED_CHECKSUM_LEN: usize = radix64::encoded_len(CHECKSUM_LEN);
