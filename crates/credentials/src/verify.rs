//! Candidate verification against stored credentials.
//!
//! A stored credential carries the parameters (salt, iteration count, cost)
//! its hash was produced with; verification re-derives a comparable form
//! from the candidate using those exact parameters and compares in constant
//! time.

use subtle::ConstantTimeEq as _;

use crate::{
    algorithm::SaltOrder,
    credential::Credential,
    error::CredentialError,
    mcf,
};

/// What a caller presents for verification: raw password characters, or an
/// already-typed credential of a compatible kind.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// A raw password guess.
    Password(&'a str),
    /// A typed credential. A clear credential is treated as its character
    /// data; hashed credentials compare structurally against a same-kind
    /// stored form.
    Credential(&'a Credential),
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(password: &'a str) -> Self {
        Self::Password(password)
    }
}

impl<'a> From<&'a Credential> for Candidate<'a> {
    fn from(credential: &'a Credential) -> Self {
        Self::Credential(credential)
    }
}

/// Verify `candidate` against `stored`. Kind mismatches and private keys
/// are `Ok(false)`; only derivation failures (e.g. an unusable bcrypt cost)
/// surface as errors.
pub fn verify(stored: &Credential, candidate: Candidate<'_>) -> Result<bool, CredentialError> {
    match candidate {
        Candidate::Password(p) => verify_chars(stored, p.as_bytes()),
        Candidate::Credential(Credential::Clear(c)) => verify_chars(stored, c.as_bytes()),
        Candidate::Credential(other) => Ok(verify_typed(stored, other)),
    }
}

fn verify_chars(stored: &Credential, guess: &[u8]) -> Result<bool, CredentialError> {
    Ok(match stored {
        Credential::Clear(c) => ct_eq(c.as_bytes(), guess),
        Credential::Bcrypt(b) => {
            let derived = mcf::derive(guess, &b.salt, b.cost)?;
            ct_eq(&derived, &b.hash)
        }
        Credential::SimpleDigest(d) => ct_eq(&d.algorithm.digest_parts(&[guess]), &d.digest),
        Credential::SaltedDigest(s) => {
            let derived = match s.order {
                SaltOrder::PasswordThenSalt => s.algorithm.digest_parts(&[guess, &s.salt]),
                SaltOrder::SaltThenPassword => s.algorithm.digest_parts(&[&s.salt, guess]),
            };
            ct_eq(&derived, &s.digest)
        }
        Credential::ScramDigest(s) => {
            ct_eq(&s.family.derive(guess, &s.salt, s.iterations), &s.digest)
        }
        Credential::PrivateKey(_) => false,
    })
}

/// Structural comparison for a typed, non-clear candidate: same kind, same
/// parameters, equal hashes. Anything else is simply not a match.
fn verify_typed(stored: &Credential, candidate: &Credential) -> bool {
    match (stored, candidate) {
        (Credential::Bcrypt(a), Credential::Bcrypt(b)) => {
            a.salt == b.salt && a.cost == b.cost && ct_eq(&a.hash, &b.hash)
        }
        (Credential::SimpleDigest(a), Credential::SimpleDigest(b)) => {
            a.algorithm == b.algorithm && ct_eq(&a.digest, &b.digest)
        }
        (Credential::SaltedDigest(a), Credential::SaltedDigest(b)) => {
            a.algorithm == b.algorithm
                && a.order == b.order
                && a.salt == b.salt
                && ct_eq(&a.digest, &b.digest)
        }
        (Credential::ScramDigest(a), Credential::ScramDigest(b)) => {
            a.family == b.family
                && a.salt == b.salt
                && a.iterations == b.iterations
                && ct_eq(&a.digest, &b.digest)
        }
        _ => false,
    }
}

/// Constant-time equality with a length gate.
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.ct_eq(b).into()
}
