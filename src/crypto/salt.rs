use tracing::trace;

use super::{Cost, SALT_LEN};
use crate::error::{Error, Result};
use crate::format::{Settings, Version};

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `buf` completely or fail.
    fn fill(&self, buf: &mut [u8]) -> std::result::Result<(), getrandom::Error>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> std::result::Result<(), getrandom::Error> {
        getrandom::fill(buf)
    }
}

/// Draw fresh salt bytes from `source`.
pub fn random_salt(source: &impl EntropySource) -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    source.fill(&mut salt).map_err(Error::InsufficientEntropy)?;
    Ok(salt)
}

/// Generate settings with a fresh random salt from the OS.
///
/// `cost` below 4 is raised to 4; above 31 fails with
/// [`Error::InvalidCost`].
pub fn generate_salt(cost: u32) -> Result<Settings> {
    generate_salt_with(&OsEntropy, cost)
}

/// Like [`generate_salt`], drawing from the given source.
pub fn generate_salt_with(source: &impl EntropySource, cost: u32) -> Result<Settings> {
    let cost = Cost::new(cost)?;
    let salt = random_salt(source)?;
    trace!(cost = cost.log_rounds(), "generated salt");
    Ok(Settings::new(Version::TwoA, cost, salt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DEFAULT_COST;

    struct Exhausted;

    impl EntropySource for Exhausted {
        fn fill(&self, _buf: &mut [u8]) -> std::result::Result<(), getrandom::Error> {
            Err(getrandom::Error::UNSUPPORTED)
        }
    }

    struct Fixed(u8);

    impl EntropySource for Fixed {
        fn fill(&self, buf: &mut [u8]) -> std::result::Result<(), getrandom::Error> {
            buf.fill(self.0);
            Ok(())
        }
    }

    #[test]
    fn salts_are_unique() {
        let a = generate_salt(DEFAULT_COST).unwrap();
        let b = generate_salt(DEFAULT_COST).unwrap();

        assert_ne!(a.salt(), b.salt());
    }

    #[test]
    fn cost_is_clamped_up() {
        assert_eq!(generate_salt(0).unwrap().cost().log_rounds(), 4);
        assert_eq!(generate_salt(4).unwrap().cost().log_rounds(), 4);
        assert_eq!(generate_salt(12).unwrap().cost().log_rounds(), 12);
    }

    #[test]
    fn cost_above_maximum_fails() {
        assert!(matches!(generate_salt(32), Err(Error::InvalidCost(_))));
    }

    #[test]
    fn entropy_failure_is_reported() {
        assert!(matches!(
            generate_salt_with(&Exhausted, DEFAULT_COST),
            Err(Error::InsufficientEntropy(_))
        ));
    }

    #[test]
    fn salt_bytes_come_from_source() {
        let settings = generate_salt_with(&Fixed(0xab), 5).unwrap();

        assert_eq!(settings.salt(), &[0xab; SALT_LEN]);
        assert_eq!(settings.version(), Version::TwoA);
    }
}
