//! The credential algorithm registry.
//!
//! Every supported encoding is a variant of the closed [`Algorithm`] enum,
//! parsed from its registry name with [`str::parse`]. Adding an algorithm
//! means adding a variant and a registry row here; the mapping and realm
//! layers dispatch on the enum and never change.

use std::{fmt, str::FromStr};

use crate::error::CredentialError;

/// Hash function used by the simple and salted digest families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Name fragment used in registry names ("md5", "sha-1", ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha-1",
            Self::Sha256 => "sha-256",
            Self::Sha384 => "sha-384",
            Self::Sha512 => "sha-512",
        }
    }

    /// Digest output length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Digest the concatenation of `parts` in order.
    pub fn digest_parts(self, parts: &[&[u8]]) -> Vec<u8> {
        fn chain<D: sha2::Digest>(parts: &[&[u8]]) -> Vec<u8> {
            let mut hasher = D::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().to_vec()
        }
        match self {
            Self::Md5 => chain::<md5::Md5>(parts),
            Self::Sha1 => chain::<sha1::Sha1>(parts),
            Self::Sha256 => chain::<sha2::Sha256>(parts),
            Self::Sha384 => chain::<sha2::Sha384>(parts),
            Self::Sha512 => chain::<sha2::Sha512>(parts),
        }
    }
}

/// Concatenation order for the salted digest families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaltOrder {
    /// digest(password ‖ salt)
    PasswordThenSalt,
    /// digest(salt ‖ password)
    SaltThenPassword,
}

/// HMAC family for the iterated (SCRAM-style) digests, derived with
/// PBKDF2-HMAC using the stored salt and iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScramFamily {
    Sha1,
    Sha256,
    Sha512,
}

impl ScramFamily {
    /// Digest output length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// PBKDF2-HMAC over `password` with the given salt and iteration count.
    pub fn derive(self, password: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
        let mut out = vec![0u8; self.output_len()];
        match self {
            Self::Sha1 => pbkdf2::pbkdf2_hmac::<sha1::Sha1>(password, salt, iterations, &mut out),
            Self::Sha256 => {
                pbkdf2::pbkdf2_hmac::<sha2::Sha256>(password, salt, iterations, &mut out);
            }
            Self::Sha512 => {
                pbkdf2::pbkdf2_hmac::<sha2::Sha512>(password, salt, iterations, &mut out);
            }
        }
        out
    }
}

/// A supported credential encoding.
///
/// Each variant knows how many ordered columns it consumes at minimum and
/// whether the stored form can be compared against a candidate password
/// (everything except private keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Plaintext password, one text column.
    Clear,
    /// Bcrypt: one Modular Crypt string column, or hash + salt + cost.
    Bcrypt,
    /// Unsalted digest of the password, one column.
    SimpleDigest(DigestAlgorithm),
    /// Salted digest, two columns (digest, salt).
    SaltedDigest(DigestAlgorithm, SaltOrder),
    /// Iterated salted digest, three columns (digest, salt, iteration count).
    ScramDigest(ScramFamily),
    /// DER-encoded RSA private key, one bytes column. Obtainable, never
    /// verifiable.
    RsaPrivateKey,
}

impl Algorithm {
    /// Registry name, the exact string accepted by [`str::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Bcrypt => "bcrypt",
            Self::SimpleDigest(d) => match d {
                DigestAlgorithm::Md5 => "simple-digest-md5",
                DigestAlgorithm::Sha1 => "simple-digest-sha-1",
                DigestAlgorithm::Sha256 => "simple-digest-sha-256",
                DigestAlgorithm::Sha384 => "simple-digest-sha-384",
                DigestAlgorithm::Sha512 => "simple-digest-sha-512",
            },
            Self::SaltedDigest(d, SaltOrder::PasswordThenSalt) => match d {
                DigestAlgorithm::Md5 => "password-salt-digest-md5",
                DigestAlgorithm::Sha1 => "password-salt-digest-sha-1",
                DigestAlgorithm::Sha256 => "password-salt-digest-sha-256",
                DigestAlgorithm::Sha384 => "password-salt-digest-sha-384",
                DigestAlgorithm::Sha512 => "password-salt-digest-sha-512",
            },
            Self::SaltedDigest(d, SaltOrder::SaltThenPassword) => match d {
                DigestAlgorithm::Md5 => "salt-password-digest-md5",
                DigestAlgorithm::Sha1 => "salt-password-digest-sha-1",
                DigestAlgorithm::Sha256 => "salt-password-digest-sha-256",
                DigestAlgorithm::Sha384 => "salt-password-digest-sha-384",
                DigestAlgorithm::Sha512 => "salt-password-digest-sha-512",
            },
            Self::ScramDigest(ScramFamily::Sha1) => "scram-sha-1",
            Self::ScramDigest(ScramFamily::Sha256) => "scram-sha-256",
            Self::ScramDigest(ScramFamily::Sha512) => "scram-sha-512",
            Self::RsaPrivateKey => "rsa-private-key",
        }
    }

    /// Minimum number of ordered columns the encoding consumes.
    pub fn required_columns(self) -> usize {
        match self {
            Self::Clear | Self::Bcrypt | Self::SimpleDigest(_) | Self::RsaPrivateKey => 1,
            Self::SaltedDigest(..) => 2,
            Self::ScramDigest(_) => 3,
        }
    }

    /// Whether the stored form can be compared against a candidate password.
    pub fn is_verifiable(self) -> bool {
        !matches!(self, Self::RsaPrivateKey)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use {DigestAlgorithm::*, SaltOrder::*};
        Ok(match s {
            "clear" => Self::Clear,
            "bcrypt" => Self::Bcrypt,
            "simple-digest-md5" => Self::SimpleDigest(Md5),
            "simple-digest-sha-1" => Self::SimpleDigest(Sha1),
            "simple-digest-sha-256" => Self::SimpleDigest(Sha256),
            "simple-digest-sha-384" => Self::SimpleDigest(Sha384),
            "simple-digest-sha-512" => Self::SimpleDigest(Sha512),
            "password-salt-digest-md5" => Self::SaltedDigest(Md5, PasswordThenSalt),
            "password-salt-digest-sha-1" => Self::SaltedDigest(Sha1, PasswordThenSalt),
            "password-salt-digest-sha-256" => Self::SaltedDigest(Sha256, PasswordThenSalt),
            "password-salt-digest-sha-384" => Self::SaltedDigest(Sha384, PasswordThenSalt),
            "password-salt-digest-sha-512" => Self::SaltedDigest(Sha512, PasswordThenSalt),
            "salt-password-digest-md5" => Self::SaltedDigest(Md5, SaltThenPassword),
            "salt-password-digest-sha-1" => Self::SaltedDigest(Sha1, SaltThenPassword),
            "salt-password-digest-sha-256" => Self::SaltedDigest(Sha256, SaltThenPassword),
            "salt-password-digest-sha-384" => Self::SaltedDigest(Sha384, SaltThenPassword),
            "salt-password-digest-sha-512" => Self::SaltedDigest(Sha512, SaltThenPassword),
            "scram-sha-1" => Self::ScramDigest(ScramFamily::Sha1),
            "scram-sha-256" => Self::ScramDigest(ScramFamily::Sha256),
            "scram-sha-512" => Self::ScramDigest(ScramFamily::Sha512),
            "rsa-private-key" => Self::RsaPrivateKey,
            _ => return Err(CredentialError::UnknownAlgorithm(s.to_owned())),
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact_names() {
        assert_eq!("clear".parse::<Algorithm>().unwrap(), Algorithm::Clear);
        assert_eq!("bcrypt".parse::<Algorithm>().unwrap(), Algorithm::Bcrypt);
        assert_eq!(
            "scram-sha-256".parse::<Algorithm>().unwrap(),
            Algorithm::ScramDigest(ScramFamily::Sha256)
        );
        assert_eq!(
            "salt-password-digest-sha-1".parse::<Algorithm>().unwrap(),
            Algorithm::SaltedDigest(DigestAlgorithm::Sha1, SaltOrder::SaltThenPassword)
        );
    }

    #[test]
    fn parse_is_case_sensitive_and_exact() {
        assert!("Clear".parse::<Algorithm>().is_err());
        assert!("CLEAR".parse::<Algorithm>().is_err());
        assert!("bcrypt ".parse::<Algorithm>().is_err());
        assert!("simple-digest".parse::<Algorithm>().is_err());
        assert!("".parse::<Algorithm>().is_err());
    }

    #[test]
    fn names_round_trip() {
        for name in [
            "clear",
            "bcrypt",
            "simple-digest-md5",
            "password-salt-digest-sha-384",
            "salt-password-digest-sha-512",
            "scram-sha-1",
            "rsa-private-key",
        ] {
            let alg: Algorithm = name.parse().unwrap();
            assert_eq!(alg.name(), name);
        }
    }

    #[test]
    fn column_arity() {
        assert_eq!(Algorithm::Clear.required_columns(), 1);
        assert_eq!(
            Algorithm::SaltedDigest(DigestAlgorithm::Sha512, SaltOrder::PasswordThenSalt)
                .required_columns(),
            2
        );
        assert_eq!(
            Algorithm::ScramDigest(ScramFamily::Sha256).required_columns(),
            3
        );
    }

    #[test]
    fn only_private_keys_are_unverifiable() {
        assert!(Algorithm::Clear.is_verifiable());
        assert!(Algorithm::Bcrypt.is_verifiable());
        assert!(!Algorithm::RsaPrivateKey.is_verifiable());
    }

    #[test]
    fn digest_output_lengths() {
        for d in [
            DigestAlgorithm::Md5,
            DigestAlgorithm::Sha1,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
        ] {
            assert_eq!(d.digest_parts(&[b"abc"]).len(), d.output_len());
        }
    }

    #[test]
    fn scram_derivation_depends_on_salt_and_iterations() {
        let f = ScramFamily::Sha256;
        let a = f.derive(b"password", b"salt-a", 64);
        let b = f.derive(b"password", b"salt-b", 64);
        let c = f.derive(b"password", b"salt-a", 65);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, f.derive(b"password", b"salt-a", 64));
    }
}
