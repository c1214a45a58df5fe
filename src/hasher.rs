//! Hashing and verification on top of a derivation primitive.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::crypto::{Derive, EksBlowfish, generate_salt};
use crate::error::Result;
use crate::format::{StoredRecord, ToSettings};

/// Builds and checks stored records using the primitive `D`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hasher<D = EksBlowfish> {
    derive: D,
}

impl Hasher<EksBlowfish> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: Derive> Hasher<D> {
    /// Use a different derivation primitive.
    pub fn with_derive(derive: D) -> Self {
        Self { derive }
    }

    /// Hash `password` against `settings`.
    ///
    /// `settings` may be a [`Settings`](crate::Settings) value, a settings
    /// string, or a full record; string parse errors are returned unchanged.
    /// The output depends only on the password and settings.
    pub fn hash<S>(&self, password: impl AsRef<[u8]>, settings: &S) -> Result<StoredRecord>
    where
        S: ToSettings + ?Sized,
    {
        let settings = settings.to_settings()?;
        debug!(
            version = %settings.version(),
            cost = settings.cost().log_rounds(),
            "hashing password"
        );

        let checksum = self
            .derive
            .derive(password.as_ref(), settings.salt(), settings.cost());
        Ok(StoredRecord::new(settings, checksum))
    }

    /// Hash `password` with a fresh random salt at `cost`.
    pub fn hash_with_cost(&self, password: impl AsRef<[u8]>, cost: u32) -> Result<StoredRecord> {
        let settings = generate_salt(cost)?;
        self.hash(password, &settings)
    }

    /// Check `password` against `stored`.
    ///
    /// The settings prefix of `stored` is parsed first and any error is
    /// returned as such. A recomputed record that differs from `stored` is
    /// `Ok(false)`. The comparison takes the same time wherever the first
    /// difference is.
    pub fn verify(&self, password: impl AsRef<[u8]>, stored: &str) -> Result<bool> {
        let recomputed = self.hash(password, stored)?.to_string();
        let matches: bool = recomputed.as_bytes().ct_eq(stored.as_bytes()).into();
        debug!(matches, "verified password");
        Ok(matches)
    }
}
