//! bcrypt's radix-64 encoding.
//!
//! Structurally base64, but with the alphabet
//! `./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789`
//! and no `=` padding. Unused trailing bits are written as zero and ignored
//! when decoding.

use base64::{
    DecodeError, Engine,
    alphabet::BCRYPT,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::error::Radix64Error;

const RADIX64: GeneralPurpose = GeneralPurpose::new(
    &BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Returns `true` if `b` is a symbol of the radix-64 alphabet.
pub fn is_symbol(b: u8) -> bool {
    matches!(b, b'.' | b'/' | b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9')
}

/// Number of symbols produced for `len` input bytes.
pub const fn encoded_len(len: usize) -> usize {
    (len * 8).div_ceil(6)
}

/// Encode bytes, producing exactly `ceil(len * 8 / 6)` symbols.
pub fn encode(bytes: &[u8]) -> String {
    RADIX64.encode(bytes)
}

/// Decode symbols, discarding the final padding bits.
pub fn decode(symbols: &str) -> Result<Vec<u8>, Radix64Error> {
    RADIX64
        .decode(symbols)
        .map_err(|e| map_decode_error(symbols, e))
}

/// Decode into a fixed-width field. Fails with `InvalidLength` if the symbols
/// do not decode to exactly `N` bytes.
pub fn decode_into<const N: usize>(symbols: &str, out: &mut [u8; N]) -> Result<(), Radix64Error> {
    let bytes = decode(symbols)?;
    if bytes.len() != N {
        return Err(Radix64Error::InvalidLength(symbols.len()));
    }
    out.copy_from_slice(&bytes);
    Ok(())
}

fn map_decode_error(symbols: &str, e: DecodeError) -> Radix64Error {
    match e {
        DecodeError::InvalidByte(offset, byte) | DecodeError::InvalidLastSymbol(offset, byte) => {
            Radix64Error::InvalidCharacter { offset, byte }
        }
        DecodeError::InvalidLength(_) => Radix64Error::InvalidLength(symbols.len()),
        // '=' is not part of the alphabet
        DecodeError::InvalidPadding => {
            let offset = symbols.bytes().position(|b| b == b'=').unwrap_or(0);
            Radix64Error::InvalidCharacter {
                offset,
                byte: b'=',
            }
        }
    }
}
