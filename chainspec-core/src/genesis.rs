use crate::serde_utils;
use serde::{Deserialize, Serialize};

/// Schema-neutral view of the genesis block header parameters.
///
/// Every concrete schema assembles this from its own encoding; absent fields
/// stay `None` so a translator can tell "not present in the source" from an
/// explicit zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenesisHeader {
    pub nonce: Option<u64>,
    pub timestamp: Option<u64>,
    pub extra_data: Vec<u8>,
    pub gas_limit: Option<u64>,
    pub difficulty: Option<u128>,
    pub mix_hash: Vec<u8>,
    pub coinbase: Option<String>,
}

/// A genesis allocation entry. The same JSON shape is used by every schema,
/// only the key of the surrounding map differs (`alloc` vs `accounts`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    #[serde(
        default,
        with = "serde_utils::u128_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance: Option<u128>,
    #[serde(
        default,
        with = "serde_utils::u64_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub nonce: Option<u64>,
    #[serde(
        default,
        with = "serde_utils::bytes_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<Vec<u8>>,
}
