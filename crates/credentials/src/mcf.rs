//! Bcrypt Modular Crypt Format support.
//!
//! Parses and formats `$2a$cost$<22-char salt><31-char hash>` strings using
//! the bcrypt radix-64 alphabet, and wraps the bcrypt cost function for
//! deriving a comparable hash from a candidate password.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::{credential::BcryptPassword, error::CredentialError};

/// Bcrypt's `./A-Za-z0-9` radix-64, unpadded. Canonical crypt strings can
/// carry non-zero trailing bits in the final character, so decoding must
/// tolerate them.
const BCRYPT_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

const SALT_CHARS: usize = 22;
const HASH_CHARS: usize = 31;
pub(crate) const MIN_COST: u32 = 4;
pub(crate) const MAX_COST: u32 = 31;

/// Parse a Modular Crypt bcrypt string (`$2a$`, `$2b$` or `$2y$`).
pub fn parse(crypt: &str) -> Result<BcryptPassword, CredentialError> {
    let body = crypt
        .strip_prefix("$2a$")
        .or_else(|| crypt.strip_prefix("$2b$"))
        .or_else(|| crypt.strip_prefix("$2y$"))
        .ok_or_else(|| {
            CredentialError::Malformed(format!(
                "not a bcrypt crypt string (expected `$2a$`-style prefix): `{}...`",
                crypt.chars().take(4).collect::<String>()
            ))
        })?;

    let (cost_str, encoded) = body.split_once('$').ok_or_else(|| {
        CredentialError::Malformed("bcrypt crypt string is missing the cost separator".into())
    })?;
    let cost = cost_str
        .parse::<u32>()
        .map_err(|e| CredentialError::Malformed(format!("bcrypt cost `{cost_str}`: {e}")))?;
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(CredentialError::Malformed(format!(
            "bcrypt cost {cost} outside {MIN_COST}..={MAX_COST}"
        )));
    }

    if encoded.len() != SALT_CHARS + HASH_CHARS {
        return Err(CredentialError::Malformed(format!(
            "bcrypt crypt string body is {} characters, expected {}",
            encoded.len(),
            SALT_CHARS + HASH_CHARS
        )));
    }
    let (salt_str, hash_str) = encoded.split_at(SALT_CHARS);

    let salt: [u8; 16] = BCRYPT_B64
        .decode(salt_str)?
        .try_into()
        .map_err(|_| CredentialError::Malformed("bcrypt salt is not 16 bytes".into()))?;
    let hash: [u8; 23] = BCRYPT_B64
        .decode(hash_str)?
        .try_into()
        .map_err(|_| CredentialError::Malformed("bcrypt hash is not 23 bytes".into()))?;

    Ok(BcryptPassword { hash, salt, cost })
}

/// Format a bcrypt credential as a `$2a$` Modular Crypt string.
pub fn format(password: &BcryptPassword) -> String {
    format!(
        "$2a${:02}${}{}",
        password.cost,
        BCRYPT_B64.encode(password.salt),
        BCRYPT_B64.encode(password.hash),
    )
}

/// Run the bcrypt cost function over `candidate` with the given salt and
/// cost, returning the raw 23-byte hash.
pub fn derive(candidate: &[u8], salt: &[u8; 16], cost: u32) -> Result<[u8; 23], CredentialError> {
    let parts = bcrypt::hash_with_salt(candidate, cost, *salt)?;
    let formatted = parts.format_for_version(bcrypt::Version::TwoA);
    BCRYPT_B64
        .decode(&formatted[formatted.len() - HASH_CHARS..])?
        .try_into()
        .map_err(|_| CredentialError::Malformed("bcrypt produced a non-23-byte hash".into()))
}
