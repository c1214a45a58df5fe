use blowfish::Blowfish;
use zeroize::Zeroizing;

use super::{CHECKSUM_LEN, MAX_PASSWORD_LEN, SALT_LEN};
use crate::error::{Error, Result};

/// Lowest accepted cost exponent.
pub const MIN_COST: u32 = 4;
/// Highest accepted cost exponent.
pub const MAX_COST: u32 = 31;
/// Cost used when the caller does not pick one.
pub const DEFAULT_COST: u32 = 10;

/// "OrpheanBeholderScryDoubt" as big-endian words.
const MAGIC_TEXT: [u32; 6] = [
    0x4f72_7068,
    0x6561_6e42,
    0x6568_6f6c,
    0x6465_7253,
    0x6372_7944,
    0x6f75_6274,
];

/// A bcrypt work factor: the base-2 logarithm of the key schedule rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u32);

impl Default for Cost {
    fn default() -> Self {
        Self(DEFAULT_COST)
    }
}

impl Cost {
    /// Builds a cost from a requested exponent.
    ///
    /// Requests below [`MIN_COST`] are raised to it; requests above
    /// [`MAX_COST`] fail with [`Error::InvalidCost`].
    pub fn new(requested: u32) -> Result<Self> {
        if requested > MAX_COST {
            return Err(Error::InvalidCost(requested.to_string()));
        }
        Ok(Self(requested.max(MIN_COST)))
    }

    /// Builds a cost without clamping; `None` outside `MIN_COST..=MAX_COST`.
    pub fn exact(log_rounds: u32) -> Option<Self> {
        (MIN_COST..=MAX_COST)
            .contains(&log_rounds)
            .then_some(Self(log_rounds))
    }

    pub fn log_rounds(self) -> u32 {
        self.0
    }

    /// Number of expensive key schedule iterations, `2^cost`.
    pub fn rounds(self) -> u64 {
        1u64 << self.0
    }
}

/// The expensive one-way function behind a bcrypt checksum.
///
/// Implementations must be deterministic: the same password, salt and cost
/// always produce the same checksum.
pub trait Derive {
    fn derive(&self, password: &[u8], salt: &[u8; SALT_LEN], cost: Cost) -> [u8; CHECKSUM_LEN];
}

/// The standard bcrypt EksBlowfish construction.
///
/// The key is the password followed by a NUL byte, cut at 72 bytes. Passwords
/// longer than 72 bytes therefore hash identically to their 72-byte prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct EksBlowfish;

impl Derive for EksBlowfish {
    fn derive(&self, password: &[u8], salt: &[u8; SALT_LEN], cost: Cost) -> [u8; CHECKSUM_LEN] {
        let mut key = Zeroizing::new(Vec::with_capacity(password.len() + 1));
        key.extend_from_slice(password);
        key.push(0);
        key.truncate(MAX_PASSWORD_LEN);

        let mut state = Blowfish::bc_init_state();
        state.salted_expand_key(salt, &key);
        for _ in 0..cost.rounds() {
            state.bc_expand_key(&key);
            state.bc_expand_key(salt);
        }

        let mut ctext = MAGIC_TEXT;
        for pair in ctext.chunks_exact_mut(2) {
            let mut lr = [pair[0], pair[1]];
            for _ in 0..64 {
                lr = state.bc_encrypt(lr);
            }
            pair.copy_from_slice(&lr);
        }

        let mut raw = [0u8; 4 * MAGIC_TEXT.len()];
        for (chunk, word) in raw.chunks_exact_mut(4).zip(ctext) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&raw[..CHECKSUM_LEN]);
        checksum
    }
}
