use chainspec_core::serde_utils::{bytes_hex, u128_opt_hex, u64_opt_hex};
use chainspec_core::{GenesisAccount, GenesisHeader};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The outer envelope shared by the geth and multigeth schemas: genesis
/// header fields, the allocation map and a `config` object whose concrete
/// shape is the only thing telling the two schemas apart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    deserialize = "C: serde::de::DeserializeOwned + Default",
    serialize = "C: Serialize"
))]
pub struct Genesis<C> {
    #[serde(default)]
    pub config: C,
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(
        default,
        rename = "extraData",
        with = "bytes_hex",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub extra_data: Vec<u8>,
    #[serde(
        default,
        rename = "gasLimit",
        with = "u64_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_limit: Option<u64>,
    #[serde(default, with = "u128_opt_hex", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u128>,
    // geth emits "mixHash"; older tooling wrote "mixhash". Accept both.
    #[serde(
        default,
        rename = "mixhash",
        alias = "mixHash",
        with = "bytes_hex",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub mix_hash: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alloc: BTreeMap<String, GenesisAccount>,
}

impl<C> Genesis<C> {
    /// Rebuilds the envelope around a config decoded in a second, hint-driven
    /// pass.
    pub fn with_config<T>(self, config: T) -> Genesis<T> {
        Genesis {
            config,
            nonce: self.nonce,
            timestamp: self.timestamp,
            extra_data: self.extra_data,
            gas_limit: self.gas_limit,
            difficulty: self.difficulty,
            mix_hash: self.mix_hash,
            coinbase: self.coinbase,
            alloc: self.alloc,
        }
    }

    pub fn header(&self) -> GenesisHeader {
        GenesisHeader {
            nonce: self.nonce,
            timestamp: self.timestamp,
            extra_data: self.extra_data.clone(),
            gas_limit: self.gas_limit,
            difficulty: self.difficulty,
            mix_hash: self.mix_hash.clone(),
            coinbase: self.coinbase.clone(),
        }
    }

    pub fn set_header(&mut self, header: &GenesisHeader) {
        self.nonce = header.nonce;
        self.timestamp = header.timestamp;
        self.extra_data = header.extra_data.clone();
        self.gas_limit = header.gas_limit;
        self.difficulty = header.difficulty;
        self.mix_hash = header.mix_hash.clone();
        self.coinbase = header.coinbase.clone();
    }
}

/// Merges a height into a physical slot that bundles several upgrades: the
/// slot keeps the minimum of everything written to it.
pub(crate) fn merge_min(slot: &mut Option<u64>, height: u64) {
    *slot = Some(slot.map_or(height, |h| h.min(height)));
}
