use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use sha2::{Digest, Sha256};

use crate::types::{CredentialId, CREDENTIAL_ID_LEN};

/// Resolves the credential-type hash carried in a metadata attribute.
///
/// The registry of credential types lives outside this crate; callers hand
/// one in wherever a type must be resolved.
pub trait CredentialTypeRegistry {
    type CredentialType;

    /// Look up the credential type whose identifier hashes to `id`.
    fn lookup(&self, id: &CredentialId) -> Option<Self::CredentialType>;
}

impl<T: Clone, S: BuildHasher> CredentialTypeRegistry for HashMap<CredentialId, T, S> {
    type CredentialType = T;

    fn lookup(&self, id: &CredentialId) -> Option<T> {
        self.get(id).cloned()
    }
}

impl<T: Clone> CredentialTypeRegistry for BTreeMap<CredentialId, T> {
    type CredentialType = T;

    fn lookup(&self, id: &CredentialId) -> Option<T> {
        self.get(id).cloned()
    }
}

impl<R: CredentialTypeRegistry + ?Sized> CredentialTypeRegistry for &R {
    type CredentialType = R::CredentialType;

    fn lookup(&self, id: &CredentialId) -> Option<Self::CredentialType> {
        (**self).lookup(id)
    }
}

impl CredentialId {
    /// `SHA256(identifier)[..16]`.
    ///
    /// Only half the digest is kept, so collision resistance is that of a
    /// 128-bit hash.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        let digest = Sha256::digest(identifier.as_bytes());
        let mut out = [0u8; CREDENTIAL_ID_LEN];
        out.copy_from_slice(&digest[..CREDENTIAL_ID_LEN]);
        Self(out)
    }
}
