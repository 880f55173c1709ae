//! Format-agnostic chain-specification engine.
//!
//! Every concrete chainspec schema implements the [`Configurator`] capability
//! trait; the conversion, enumeration and validation operations in this crate
//! work exclusively through it and never inspect a concrete schema.

use std::collections::BTreeMap;

mod convert;
mod error;
mod genesis;
mod schedule;
pub mod serde_utils;
mod upgrade;

pub use convert::convert;
pub use error::{ConvertError, ParamError, ValidateError};
pub use genesis::{GenesisAccount, GenesisHeader};
pub use schedule::{forks, is_valid, transitions};
pub use upgrade::Upgrade;

/// Ethash protocol constants. Schemas that do not encode the engine
/// parameters explicitly answer for these values and reject any other.
pub mod params {
    pub const MINIMUM_DIFFICULTY: u128 = 131_072;
    pub const DIFFICULTY_BOUND_DIVISOR: u128 = 2_048;
    pub const DURATION_LIMIT: u64 = 13;

    pub const FRONTIER_BLOCK_REWARD: u128 = 5_000_000_000_000_000_000;
    pub const BYZANTIUM_BLOCK_REWARD: u128 = 3_000_000_000_000_000_000;
    pub const CONSTANTINOPLE_BLOCK_REWARD: u128 = 2_000_000_000_000_000_000;

    /// Difficulty-bomb delays introduced by eip649 and eip1234, in blocks.
    pub const BYZANTIUM_BOMB_DELAY: u64 = 3_000_000;
    pub const CONSTANTINOPLE_BOMB_DELAY: u64 = 2_000_000;
}

/// The capability superset every concrete chain-specification representation
/// supports.
///
/// Readers never fail: a field the schema cannot carry, or simply does not
/// have set, reads as `None`. `Some(0)` always means "active from genesis",
/// which is a different fact than `None` ("never activates"). Writers fail
/// only when the supplied value falls outside the representable domain for
/// the field, see [`ParamError`].
pub trait Configurator {
    fn chain_id(&self) -> Option<u64>;
    fn set_chain_id(&mut self, id: u64) -> Result<(), ParamError>;

    fn network_id(&self) -> Option<u64>;
    fn set_network_id(&mut self, id: u64) -> Result<(), ParamError>;

    fn genesis_header(&self) -> GenesisHeader;
    fn set_genesis_header(&mut self, header: &GenesisHeader) -> Result<(), ParamError>;

    fn genesis_accounts(&self) -> BTreeMap<String, GenesisAccount>;
    fn set_genesis_accounts(
        &mut self,
        accounts: &BTreeMap<String, GenesisAccount>,
    ) -> Result<(), ParamError>;

    /// Activation height of `upgrade`, or `None` when it never activates.
    fn activation(&self, upgrade: Upgrade) -> Option<u64>;

    /// Record that `upgrade` activates at `height`.
    ///
    /// A schema that bundles several upgrades behind one physical field keeps
    /// the minimum of all heights written to that field; [`convert`] verifies
    /// afterwards that the bundle still reads back exactly what the source
    /// holds.
    fn set_activation(&mut self, upgrade: Upgrade, height: u64) -> Result<(), ParamError>;

    fn minimum_difficulty(&self) -> Option<u128>;
    fn set_minimum_difficulty(&mut self, value: u128) -> Result<(), ParamError>;

    fn difficulty_bound_divisor(&self) -> Option<u128>;
    fn set_difficulty_bound_divisor(&mut self, value: u128) -> Result<(), ParamError>;

    fn duration_limit(&self) -> Option<u64>;
    fn set_duration_limit(&mut self, value: u64) -> Result<(), ParamError>;

    /// Base (pre-eip649) block reward in wei.
    fn block_reward(&self) -> Option<u128>;
    fn set_block_reward(&mut self, value: u128) -> Result<(), ParamError>;

    /// Length in blocks of the ecip1010 difficulty-bomb pause.
    fn ecip1010_length(&self) -> Option<u64>;
    fn set_ecip1010_length(&mut self, value: u64) -> Result<(), ParamError>;

    /// Era length in blocks of the ecip1017 reward-reduction schedule.
    fn ecip1017_era_rounds(&self) -> Option<u64>;
    fn set_ecip1017_era_rounds(&mut self, value: u64) -> Result<(), ParamError>;
}

/// Checks a fixed-value engine parameter write against its protocol
/// constant, for schemas that only encode engine parameters implicitly.
pub fn expect_fixed(
    param: &'static str,
    expected: u128,
    value: u128,
) -> Result<(), ParamError> {
    if value == expected {
        Ok(())
    } else {
        Err(ParamError::FixedValue {
            param,
            expected,
            value,
        })
    }
}
