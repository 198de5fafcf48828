use core::fmt;

use num_bigint::BigUint;

use crate::{errors::KeyError, params::SystemParameters, types::NUM_BASES};

/// Issuer secret key: two safe primes and their Sophie Germain companions.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    pub p: BigUint,
    pub q: BigUint,
    pub p_prime: BigUint,
    pub q_prime: BigUint,
}

impl SecretKey {
    /// Build a key from safe primes `p` and `q`, storing `(p-1)/2` and `(q-1)/2`.
    ///
    /// Primality is not checked here.
    #[must_use]
    pub fn new(p: BigUint, q: BigUint) -> Self {
        let p_prime = companion(&p);
        let q_prime = companion(&q);
        Self { p, q, p_prime, q_prime }
    }
}

/// `(x - 1) >> 1`, with zero mapping to zero.
fn companion(x: &BigUint) -> BigUint {
    if x.bits() == 0 {
        return BigUint::default();
    }
    (x - 1u32) >> 1u32
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("p", &"<redacted>")
            .field("q", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// One generator per attribute slot.
pub type Bases = [BigUint; NUM_BASES];

/// Issuer public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Modulus, `p * q` for the matching secret key.
    pub n: BigUint,
    pub z: BigUint,
    pub s: BigUint,
    pub r: Bases,
    /// Non-revocation epoch length, in deployment-defined units.
    pub epoch_length: u64,
    params: SystemParameters,
}

impl PublicKey {
    /// Public key under the default system parameters.
    #[must_use]
    pub fn new(n: BigUint, z: BigUint, s: BigUint, r: Bases) -> Self {
        Self { n, z, s, r, epoch_length: 0, params: SystemParameters::default() }
    }

    /// Public key under caller-chosen system parameters.
    #[must_use]
    pub fn with_params(n: BigUint, z: BigUint, s: BigUint, r: Bases, params: SystemParameters) -> Self {
        if params != SystemParameters::default() {
            tracing::debug!(ln = params.base().ln, "public key built with non-default system parameters");
        }
        Self { n, z, s, r, epoch_length: 0, params }
    }

    #[must_use]
    pub fn with_epoch_length(mut self, epoch_length: u64) -> Self {
        self.epoch_length = epoch_length;
        self
    }

    #[must_use]
    pub const fn params(&self) -> &SystemParameters {
        &self.params
    }
}

/// Collect a base list into the fixed six slots.
///
/// # Errors
///
/// Returns `KeyError::WrongBaseCount` unless exactly six bases are given.
pub fn bases_from_vec(bases: Vec<BigUint>) -> Result<Bases, KeyError> {
    let got = bases.len();
    bases
        .try_into()
        .map_err(|_| KeyError::WrongBaseCount { expected: NUM_BASES, got })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_primes() {
        let sk = SecretKey::new(BigUint::from(1_000_003u32), BigUint::from(23u32));
        let shown = format!("{sk:?}");
        assert!(!shown.contains("1000003"));
        assert!(shown.contains("redacted"));
    }

    #[test]
    fn companions_subtract_before_shifting() {
        let sk = SecretKey::new(BigUint::from(4u32), BigUint::from(10u32));
        assert_eq!(sk.p_prime, BigUint::from(1u32));
        assert_eq!(sk.q_prime, BigUint::from(4u32));

        let sk = SecretKey::new(BigUint::default(), BigUint::from(1u32));
        assert_eq!(sk.p_prime, BigUint::default());
        assert_eq!(sk.q_prime, BigUint::default());
    }

    #[test]
    fn bases_from_vec_requires_six() {
        let five: Vec<BigUint> = (1u32..=5).map(BigUint::from).collect();
        assert_eq!(
            bases_from_vec(five),
            Err(KeyError::WrongBaseCount { expected: NUM_BASES, got: 5 })
        );
        let six: Vec<BigUint> = (1u32..=6).map(BigUint::from).collect();
        let bases = bases_from_vec(six).unwrap();
        assert_eq!(bases[5], BigUint::from(6u32));
    }
}
