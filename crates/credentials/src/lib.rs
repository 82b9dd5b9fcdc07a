//! Credential encodings for SQL-backed security realms.
//!
//! This crate owns the algorithm registry (clear, bcrypt, salted and
//! unsalted digests, SCRAM-style iterated digests, private keys), the typed
//! credential values they decode into, and the derive-and-compare logic
//! used for verification. It knows nothing about SQL — the realm crate
//! hands it positional [`ColumnValue`]s and gets typed [`Credential`]s
//! back.

pub mod algorithm;
pub mod column;
pub mod credential;
pub mod decode;
pub mod error;
pub mod mcf;
pub mod verify;

pub use {
    algorithm::{Algorithm, DigestAlgorithm, SaltOrder, ScramFamily},
    column::ColumnValue,
    credential::{
        BcryptPassword, ClearPassword, Credential, CredentialKind, PrivateKey, SaltedDigest,
        ScramDigest, SimpleDigest,
    },
    decode::decode,
    error::CredentialError,
    verify::{Candidate, verify},
};
