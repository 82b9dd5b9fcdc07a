//! Identity-scoped credential resolution.

use std::{collections::HashMap, sync::Arc};

use quarry_credentials::{Candidate, Credential, CredentialKind, verify};
use tracing::{debug, warn};

use crate::{error::RealmError, query::PrincipalQuery, support::CredentialSupport};

/// One principal's view of the realm, scoped to a single authentication
/// attempt.
///
/// Every operation executes all principal queries afresh; nothing is
/// memoized, so a row inserted between two calls on the same identity is
/// visible to the second call. The cost is deliberate: one identity serves
/// one authentication attempt and is then discarded. An identity is not
/// meant to be shared by concurrent callers.
#[derive(Debug, Clone)]
pub struct RealmIdentity {
    principal: String,
    queries: Arc<[PrincipalQuery]>,
}

impl RealmIdentity {
    pub(crate) fn new(principal: String, queries: Arc<[PrincipalQuery]>) -> Self {
        Self { principal, queries }
    }

    /// The principal name this identity is bound to.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Execute every principal query in declaration order and aggregate the
    /// decoded credentials by name. Later declarations overwrite earlier
    /// ones, so the winner for a contested name is deterministic.
    async fn resolve(&self) -> Result<HashMap<String, Credential>, RealmError> {
        let mut credentials = HashMap::new();
        for query in self.queries.iter() {
            let rows = query.execute(&self.principal).await?;
            debug!(
                principal = %self.principal,
                rows = rows.len(),
                "principal query executed"
            );
            query.collect_into(&rows, &mut credentials);
        }
        Ok(credentials)
    }

    /// Identity-scope support for a credential name.
    ///
    /// `FullySupported` when a verifiable credential was decoded for the
    /// name, `ObtainableOnly` when only an asymmetric form was,
    /// `Unsupported` when no row yielded the name, including "no such
    /// principal". Database failures propagate; they are never folded into
    /// `Unsupported`.
    pub async fn credential_support(
        &self,
        credential_name: &str,
    ) -> Result<CredentialSupport, RealmError> {
        Ok(match self.resolve().await?.get(credential_name) {
            Some(credential) if credential.is_verifiable() => CredentialSupport::FullySupported,
            Some(_) => CredentialSupport::ObtainableOnly,
            None => CredentialSupport::Unsupported,
        })
    }

    /// Verify a candidate against the stored credential for
    /// `credential_name`.
    ///
    /// Absence, an unconfigured name, a kind-mismatched candidate, and a
    /// candidate that fails to derive are all `Ok(false)`, deliberately
    /// indistinguishable, so a caller probing names learns nothing about
    /// which ones exist. Only data-source failures are errors.
    pub async fn verify_credential<'a>(
        &self,
        credential_name: &str,
        candidate: impl Into<Candidate<'a>>,
    ) -> Result<bool, RealmError> {
        let Some(stored) = self.resolve().await?.remove(credential_name) else {
            return Ok(false);
        };
        match verify(&stored, candidate.into()) {
            Ok(matched) => Ok(matched),
            Err(e) => {
                warn!(
                    credential = %credential_name,
                    error = %e,
                    "could not derive comparable form from candidate"
                );
                Ok(false)
            }
        }
    }

    /// Obtain the stored credential for `credential_name` when its runtime
    /// kind matches `kind`. Absence and kind mismatch are both `Ok(None)`:
    /// "this identity does not expose that credential as that type" is not
    /// an error.
    pub async fn credential(
        &self,
        credential_name: &str,
        kind: CredentialKind,
    ) -> Result<Option<Credential>, RealmError> {
        Ok(self
            .resolve()
            .await?
            .remove(credential_name)
            .filter(|credential| credential.kind() == kind))
    }
}
