//! Bit-length parameters shared by every proof, signature and commitment.
//!
//! Issuer, holder and verifier must agree on these bit for bit. Only the
//! seven base lengths are free; the rest are derived from them and cannot be
//! set independently.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The seven base security parameters, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct BaseParameters {
    pub le: u32,
    pub le_prime: u32,
    pub lh: u32,
    pub lm: u32,
    pub ln: u32,
    pub lstatzk: u32,
    pub lv: u32,
}

pub const DEFAULT_BASE_PARAMETERS: BaseParameters = BaseParameters {
    le: 597,
    le_prime: 120,
    lh: 256,
    lm: 256,
    ln: 1024,
    lstatzk: 80,
    lv: 1700,
};

/// Lengths computed from [`BaseParameters`] by [`derive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct DerivedParameters {
    pub le_commit: u32,
    pub lm_commit: u32,
    #[cfg_attr(feature = "serde", serde(rename = "LRA"))]
    pub lra: u32,
    pub ls_commit: u32,
    pub lv_commit: u32,
    pub lv_prime: u32,
    pub lv_prime_commit: u32,
}

/// Compute the derived lengths. Total for any input; choosing sound base
/// values is the caller's job.
#[must_use]
pub const fn derive(base: BaseParameters) -> DerivedParameters {
    DerivedParameters {
        le_commit: base.le_prime + base.lstatzk + base.lh,
        lm_commit: base.lm + base.lstatzk + base.lh,
        lra: base.ln + base.lstatzk,
        ls_commit: base.lm + base.lstatzk + base.lh + 1,
        lv_commit: base.lv + base.lstatzk + base.lh,
        lv_prime: base.ln + base.lstatzk,
        lv_prime_commit: base.ln + 2 * base.lstatzk + base.lh,
    }
}

/// A base parameter set together with its derivation.
///
/// The fields are private so the pair can only be built through
/// [`SystemParameters::new`]. With the `serde` feature the type is written
/// as its base parameters alone and re-derived when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "BaseParameters", into = "BaseParameters"))]
pub struct SystemParameters {
    base: BaseParameters,
    derived: DerivedParameters,
}

pub const DEFAULT_SYSTEM_PARAMETERS: SystemParameters = SystemParameters::new(DEFAULT_BASE_PARAMETERS);

impl SystemParameters {
    #[must_use]
    pub const fn new(base: BaseParameters) -> Self {
        Self { base, derived: derive(base) }
    }

    #[must_use]
    pub const fn base(&self) -> &BaseParameters {
        &self.base
    }

    #[must_use]
    pub const fn derived(&self) -> &DerivedParameters {
        &self.derived
    }
}

impl Default for SystemParameters {
    fn default() -> Self {
        DEFAULT_SYSTEM_PARAMETERS
    }
}

impl From<BaseParameters> for SystemParameters {
    fn from(base: BaseParameters) -> Self {
        Self::new(base)
    }
}

impl From<SystemParameters> for BaseParameters {
    fn from(params: SystemParameters) -> Self {
        params.base
    }
}

/// Bytes needed to hold a value of `bits` bits.
#[inline]
#[must_use]
pub const fn param_size(bits: u32) -> u32 {
    bits.div_ceil(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_size_rounds_up() {
        assert_eq!(param_size(0), 0);
        assert_eq!(param_size(1), 1);
        assert_eq!(param_size(8), 1);
        assert_eq!(param_size(9), 2);
        assert_eq!(param_size(DEFAULT_BASE_PARAMETERS.ln), 128);
        assert_eq!(param_size(DEFAULT_BASE_PARAMETERS.le), 75);
    }

    #[test]
    fn default_instance_matches_its_base() {
        let params = SystemParameters::default();
        assert_eq!(params.base(), &DEFAULT_BASE_PARAMETERS);
        assert_eq!(params.derived(), &derive(DEFAULT_BASE_PARAMETERS));
    }
}
