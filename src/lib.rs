#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Parameter and metadata layer for CL-signature anonymous credentials.
//!
//! This crate fixes the data that issuance, disclosure and non-revocation
//! proofs must read bit-exactly:
//!
//! - the base and derived bit-length parameters of the proof system,
//! - issuer key material over a safe-RSA modulus and its XML key documents,
//! - the 24-byte packed metadata attribute (version, signing epoch, validity,
//!   key counter, credential-type hash) signed into every credential.
//!
// Fixed choices:
// - Epoch: one week (604800 s), for both signing date and validity
// - Credential-type hash: SHA-256 truncated to 16 bytes
// - Key documents: idemix XML namespace, exactly six bases
//
// The proof protocols and the credential-type registry live elsewhere; the
// registry is reached through `CredentialTypeRegistry`.

pub mod types;
pub mod errors;
pub mod params;
pub mod keys;
pub mod metadata;
pub mod registry;
pub mod ser;
pub mod time;

// Re-export commonly used types and functions
pub use types::*;
pub use errors::{DocumentError, KeyError, MetadataError};
pub use params::{
    derive, param_size, BaseParameters, DerivedParameters, SystemParameters,
    DEFAULT_BASE_PARAMETERS, DEFAULT_SYSTEM_PARAMETERS,
};
pub use keys::{bases_from_vec, Bases, PublicKey, SecretKey};
pub use metadata::{
    MetadataAttribute, MetadataBuilder, MetadataField, CREDENTIAL_ID_FIELD, KEY_COUNTER_FIELD,
    METADATA_FIELDS, SIGNING_DATE_FIELD, VALIDITY_FIELD, VERSION_FIELD,
};
pub use registry::CredentialTypeRegistry;
pub use ser::{
    decode_public_key, decode_secret_key, encode_public_key, encode_secret_key, IDEMIX_NAMESPACE,
    XML_HEADER,
};

// Version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
