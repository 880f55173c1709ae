use crate::upgrade::Upgrade;
use thiserror::Error;

/// A write through the [`crate::Configurator`] interface was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// The schema has no slot for this parameter at all.
    #[error("parameter {0} is not representable in this schema")]
    Unsupported(&'static str),
    /// The schema only encodes this parameter implicitly, as a protocol
    /// constant, and the supplied value differs from that constant.
    #[error("parameter {param} is fixed at {expected} in this schema, got {value}")]
    FixedValue {
        param: &'static str,
        expected: u128,
        value: u128,
    },
    /// The parameter is derived from another one that has not been set yet.
    #[error("parameter {param} requires {requires} to be set first")]
    Dependent {
        param: &'static str,
        requires: &'static str,
    },
    /// A derived parameter computation left the block-height range.
    #[error("parameter {param} overflows the block height range")]
    Overflow { param: &'static str },
}

/// Translation between two representations failed; nothing was dropped
/// silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error(transparent)]
    Param(#[from] ParamError),
    /// The target read back a different activation than the source holds,
    /// typically because a bundled physical field would falsely activate an
    /// upgrade the source left unset.
    #[error("target schema misreports {upgrade}: source has {expected:?}, target reads {found:?}")]
    Mismatch {
        upgrade: Upgrade,
        expected: Option<u64>,
        found: Option<u64>,
    },
}

/// The fork schedule of a representation is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("{later} at {later_height} activates before {prior} at {prior_height}")]
    OutOfOrder {
        prior: Upgrade,
        prior_height: u64,
        later: Upgrade,
        later_height: u64,
    },
    #[error("{a} at {a_height} and {b} at {b_height} must activate together")]
    PairDisagrees {
        a: Upgrade,
        a_height: u64,
        b: Upgrade,
        b_height: u64,
    },
    #[error("eip155 is active at head {head} but no chain id is set")]
    MissingChainId { head: u64 },
}
