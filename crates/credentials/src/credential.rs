//! Typed credential values produced by decoding result-set columns.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithm::{DigestAlgorithm, SaltOrder, ScramFamily};

/// A plaintext password. Zeroized on drop; `Debug` never prints the value.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ClearPassword(String);

impl ClearPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearPassword(<redacted>)")
    }
}

/// A bcrypt hash with the parameters needed to re-derive it.
#[derive(Debug, Clone)]
pub struct BcryptPassword {
    /// 23-byte bcrypt output.
    pub hash: [u8; 23],
    /// 16-byte salt.
    pub salt: [u8; 16],
    /// Cost factor (log2 rounds), 4..=31.
    pub cost: u32,
}

/// An unsalted digest of the password.
#[derive(Debug, Clone)]
pub struct SimpleDigest {
    pub algorithm: DigestAlgorithm,
    pub digest: Vec<u8>,
}

/// A salted digest of the password.
#[derive(Debug, Clone)]
pub struct SaltedDigest {
    pub algorithm: DigestAlgorithm,
    pub order: SaltOrder,
    pub digest: Vec<u8>,
    pub salt: Vec<u8>,
}

/// An iterated salted digest (SCRAM-style saved key material).
#[derive(Debug, Clone)]
pub struct ScramDigest {
    pub family: ScramFamily,
    pub digest: Vec<u8>,
    pub salt: Vec<u8>,
    pub iterations: u32,
}

/// A DER-encoded private key. Obtainable, never verifiable by the realm.
#[derive(Clone)]
pub struct PrivateKey {
    /// DER bytes as stored.
    pub der: Vec<u8>,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({} DER bytes)", self.der.len())
    }
}

/// Runtime kind tag for a [`Credential`], used to filter typed retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    Clear,
    Bcrypt,
    SimpleDigest,
    SaltedDigest,
    ScramDigest,
    PrivateKey,
}

/// A decoded credential, owned by the caller once returned.
#[derive(Debug, Clone)]
pub enum Credential {
    Clear(ClearPassword),
    Bcrypt(BcryptPassword),
    SimpleDigest(SimpleDigest),
    SaltedDigest(SaltedDigest),
    ScramDigest(ScramDigest),
    PrivateKey(PrivateKey),
}

impl Credential {
    /// Runtime kind of this credential.
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::Clear(_) => CredentialKind::Clear,
            Self::Bcrypt(_) => CredentialKind::Bcrypt,
            Self::SimpleDigest(_) => CredentialKind::SimpleDigest,
            Self::SaltedDigest(_) => CredentialKind::SaltedDigest,
            Self::ScramDigest(_) => CredentialKind::ScramDigest,
            Self::PrivateKey(_) => CredentialKind::PrivateKey,
        }
    }

    /// Whether this credential can be compared against a candidate password.
    /// Private keys can only be obtained.
    pub fn is_verifiable(&self) -> bool {
        !matches!(self, Self::PrivateKey(_))
    }
}
