//! Packed credential metadata.
//!
//! Five values share one 24-byte big-endian buffer so the whole record can be
//! signed as a single numeric attribute:
//!
//! ```text
//! offset  size  field
//! 0       1     version
//! 1       3     signing epoch (weeks since 1970; only the low 2 bytes are used)
//! 4       2     validity duration (weeks)
//! 6       2     key counter
//! 8       16    credential-type id
//! ```
//!
//! [`MetadataBuilder`] is the only way to write fields. It produces a
//! [`MetadataAttribute`], which is read-only.

use core::ops::Range;

use num_bigint::BigUint;

use crate::{
    errors::MetadataError,
    registry::CredentialTypeRegistry,
    time::now_unix,
    types::{
        impl_tryfrom_slice, CredentialId, CREDENTIAL_ID_LEN, EXPIRY_FACTOR, METADATA_LENGTH,
        METADATA_VERSION, VALIDITY_DEFAULT,
    },
};

/// Byte range of one value inside the metadata buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataField {
    length: usize,
    offset: usize,
}

impl MetadataField {
    const fn new(length: usize, offset: usize) -> Self {
        Self { length, offset }
    }

    #[must_use]
    pub const fn length(self) -> usize {
        self.length
    }

    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

pub const VERSION_FIELD: MetadataField = MetadataField::new(1, 0);
pub const SIGNING_DATE_FIELD: MetadataField = MetadataField::new(3, 1);
pub const VALIDITY_FIELD: MetadataField = MetadataField::new(2, 4);
pub const KEY_COUNTER_FIELD: MetadataField = MetadataField::new(2, 6);
pub const CREDENTIAL_ID_FIELD: MetadataField = MetadataField::new(CREDENTIAL_ID_LEN, 8);

/// All fields, in wire order.
pub const METADATA_FIELDS: [MetadataField; 5] = [
    VERSION_FIELD,
    SIGNING_DATE_FIELD,
    VALIDITY_FIELD,
    KEY_COUNTER_FIELD,
    CREDENTIAL_ID_FIELD,
];

#[inline]
const fn u16_be(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

/// A sealed metadata attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetadataAttribute([u8; METADATA_LENGTH]);

impl_tryfrom_slice!(MetadataAttribute, METADATA_LENGTH);

impl MetadataAttribute {
    /// Wrap an attribute value read back from a credential.
    ///
    /// The value is placed right-aligned in the 24-byte buffer, so leading
    /// zero bytes (including a zero version byte) keep every field in place.
    /// Nothing checks that the value was produced by this codec.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::InvalidLength` if the value needs more than 24 bytes.
    pub fn from_int(value: &BigUint) -> Result<Self, MetadataError> {
        let be = value.to_bytes_be();
        // BigUint renders zero as a single 0x00 byte.
        let be: &[u8] = if be == [0] { &[] } else { &be };
        if be.len() > METADATA_LENGTH {
            return Err(MetadataError::InvalidLength { expected: METADATA_LENGTH, got: be.len() });
        }
        let mut bytes = [0u8; METADATA_LENGTH];
        bytes[METADATA_LENGTH - be.len()..].copy_from_slice(be);
        Ok(Self(bytes))
    }

    /// The attribute value to be signed.
    #[must_use]
    pub fn to_int(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    #[must_use]
    pub const fn bytes(&self) -> &[u8; METADATA_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn field(&self, field: MetadataField) -> &[u8] {
        &self.0[field.range()]
    }

    #[must_use]
    pub const fn version(&self) -> u8 {
        self.0[VERSION_FIELD.offset]
    }

    /// Signing date in weeks since the Unix epoch.
    #[must_use]
    pub fn signing_epoch(&self) -> u16 {
        // The field is one byte wider than the value it carries.
        u16_be(&self.field(SIGNING_DATE_FIELD)[1..])
    }

    /// Signing date as Unix seconds, a multiple of [`EXPIRY_FACTOR`].
    #[must_use]
    pub fn signing_date(&self) -> u64 {
        u64::from(self.signing_epoch()) * EXPIRY_FACTOR
    }

    #[must_use]
    pub fn key_counter(&self) -> u16 {
        u16_be(self.field(KEY_COUNTER_FIELD))
    }

    /// Validity in weeks, counted from the signing date.
    #[must_use]
    pub fn validity_duration(&self) -> u16 {
        u16_be(self.field(VALIDITY_FIELD))
    }

    #[must_use]
    pub fn credential_id(&self) -> CredentialId {
        let mut id = [0u8; CREDENTIAL_ID_LEN];
        id.copy_from_slice(self.field(CREDENTIAL_ID_FIELD));
        CredentialId(id)
    }

    /// Resolve the credential type through `registry`.
    #[must_use]
    pub fn credential_type<R: CredentialTypeRegistry>(&self, registry: &R) -> Option<R::CredentialType> {
        let id = self.credential_id();
        let found = registry.lookup(&id);
        if found.is_none() {
            tracing::debug!(credential_id = ?id.0, "credential type not found in registry");
        }
        found
    }

    /// Expiry as Unix seconds.
    #[must_use]
    pub fn expiry(&self) -> u64 {
        self.signing_date() + u64::from(self.validity_duration()) * EXPIRY_FACTOR
    }

    #[must_use]
    pub fn is_valid_on(&self, t: u64) -> bool {
        self.expiry() > t
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_on(now_unix())
    }
}

impl From<MetadataAttribute> for BigUint {
    fn from(attr: MetadataAttribute) -> Self {
        attr.to_int()
    }
}

impl TryFrom<&BigUint> for MetadataAttribute {
    type Error = MetadataError;

    fn try_from(value: &BigUint) -> Result<Self, Self::Error> {
        Self::from_int(value)
    }
}

/// Writes metadata fields while a credential is being issued.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    bytes: [u8; METADATA_LENGTH],
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataBuilder {
    /// Defaults, signed now: version `0x02`, key counter 0, validity
    /// [`VALIDITY_DEFAULT`] weeks, zero credential id.
    #[must_use]
    pub fn new() -> Self {
        Self::new_at(now_unix())
    }

    /// Defaults, signed at `unix_time`.
    #[must_use]
    pub fn new_at(unix_time: u64) -> Self {
        let mut b = Self { bytes: [0u8; METADATA_LENGTH] };
        b.put(VERSION_FIELD, &[METADATA_VERSION]);
        b.signing_date(unix_time)
            .key_counter(0)
            .validity_duration(VALIDITY_DEFAULT);
        b
    }

    /// Write `value` right-aligned into `field`, zeroing the bytes in front of it.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::FieldOverflow` if `value` is wider than the field.
    pub fn set_field(&mut self, field: MetadataField, value: &[u8]) -> Result<&mut Self, MetadataError> {
        if value.len() > field.length {
            return Err(MetadataError::FieldOverflow { capacity: field.length, got: value.len() });
        }
        self.put(field, value);
        Ok(self)
    }

    // Caller guarantees value.len() <= field.length.
    fn put(&mut self, field: MetadataField, value: &[u8]) {
        let dst = &mut self.bytes[field.range()];
        let start = field.length - value.len();
        dst[..start].fill(0);
        dst[start..].copy_from_slice(value);
    }

    /// Store `unix_time` quantized down to whole weeks.
    ///
    /// Only the low 16 bits of the week count fit the wire field.
    pub fn signing_date(&mut self, unix_time: u64) -> &mut Self {
        let epoch = (unix_time / EXPIRY_FACTOR).to_be_bytes();
        self.put(SIGNING_DATE_FIELD, &epoch[6..]);
        self
    }

    pub fn key_counter(&mut self, counter: u16) -> &mut Self {
        self.put(KEY_COUNTER_FIELD, &counter.to_be_bytes());
        self
    }

    pub fn validity_duration(&mut self, weeks: u16) -> &mut Self {
        self.put(VALIDITY_FIELD, &weeks.to_be_bytes());
        self
    }

    /// Store the truncated hash of a credential-type identifier.
    pub fn credential_identifier(&mut self, identifier: &str) -> &mut Self {
        self.put(CREDENTIAL_ID_FIELD, &CredentialId::from_identifier(identifier).0);
        self
    }

    /// Seal the fields written so far.
    #[must_use]
    pub const fn build(&self) -> MetadataAttribute {
        MetadataAttribute(self.bytes)
    }
}
