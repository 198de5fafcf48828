pub const EXPIRY_FACTOR: u64 = 60 * 60 * 24 * 7;  // one week, in seconds
pub const VALIDITY_DEFAULT: u16 = 52 / 2;          // half a year, in weeks
pub const METADATA_VERSION: u8 = 0x02;
pub const METADATA_LENGTH: usize = 1 + 3 + 2 + 2 + 16; // 24 bytes
pub const CREDENTIAL_ID_LEN: usize = 16;           // truncated SHA-256
pub const NUM_BASES: usize = 6;                    // fixed by the key document

/// Truncated hash naming a credential type, as stored in the metadata attribute.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialId(pub [u8; CREDENTIAL_ID_LEN]);

// Exact-sized decode helpers
macro_rules! impl_tryfrom_slice {
    ($t:ty, $len:expr) => {
        impl TryFrom<&[u8]> for $t {
            type Error = $crate::errors::MetadataError;
            fn try_from(b: &[u8]) -> Result<Self, Self::Error> {
                if b.len() != $len {
                    return Err($crate::errors::MetadataError::InvalidLength { expected: $len, got: b.len() });
                }
                let mut arr = [0u8; $len];
                arr.copy_from_slice(b);
                Ok(Self(arr))
            }
        }
    }
}
pub(crate) use impl_tryfrom_slice;

impl_tryfrom_slice!(CredentialId, CREDENTIAL_ID_LEN);

impl AsRef<[u8]> for CredentialId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
