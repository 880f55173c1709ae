//! Built-in well-known network specifications.
//!
//! Presets are plain static data behind an explicitly constructed registry;
//! nothing here is process-global. Components that need preset lookup take a
//! `Registry` by reference.

use crate::geth::{GethConfig, GethGenesis};
use crate::multigeth::{MultigethConfig, MultigethGenesis};
use crate::{ChainSpec, Genesis};
use std::collections::BTreeMap;

type Builder = fn() -> ChainSpec;

/// Maps well-known network names to their chain specifications.
#[derive(Clone)]
pub struct Registry {
    presets: BTreeMap<&'static str, Builder>,
}

impl Registry {
    /// The standard table: `foundation`, `classic` and `mordor`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut presets: BTreeMap<&'static str, Builder> = BTreeMap::new();
        presets.insert("foundation", foundation);
        presets.insert("classic", classic);
        presets.insert("mordor", mordor);
        Self { presets }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ChainSpec> {
        self.presets.get(name).map(|build| build())
    }

    /// Preset names in stable sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.presets.keys().copied().collect()
    }
}

fn mainnet_header<C>(genesis: &mut Genesis<C>) {
    genesis.nonce = Some(0x42);
    genesis.timestamp = Some(0);
    genesis.extra_data =
        const_hex_decode("11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa");
    genesis.gas_limit = Some(0x1388);
    genesis.difficulty = Some(0x4_0000_0000);
    genesis.mix_hash = vec![0; 32];
    genesis.coinbase = Some("0x0000000000000000000000000000000000000000".to_owned());
}

// Preset extra-data values are compile-time constants; a decode failure here
// is a bug in the table itself.
fn const_hex_decode(s: &str) -> Vec<u8> {
    const_hex::decode(s).unwrap_or_default()
}

/// Ethereum mainnet in its home schema.
fn foundation() -> ChainSpec {
    let mut genesis = GethGenesis {
        config: GethConfig {
            chain_id: Some(1),
            network_id: Some(1),
            homestead_block: Some(1_150_000),
            eip150_block: Some(2_463_000),
            eip155_block: Some(2_675_000),
            eip158_block: Some(2_675_000),
            byzantium_block: Some(4_370_000),
            constantinople_block: Some(7_280_000),
        },
        ..GethGenesis::default()
    };
    mainnet_header(&mut genesis);
    ChainSpec::Geth(genesis)
}

/// Ethereum Classic; shares the mainnet genesis block but needs the granular
/// multigeth schema for its ECIP schedule.
fn classic() -> ChainSpec {
    let mut genesis = MultigethGenesis {
        config: MultigethConfig {
            chain_id: Some(61),
            network_id: Some(1),
            eip2_block: Some(1_150_000),
            eip7_block: Some(1_150_000),
            eip150_block: Some(2_500_000),
            eip155_block: Some(3_000_000),
            eip160_block: Some(3_000_000),
            ecip1010_pause_block: Some(3_000_000),
            ecip1010_length: Some(2_000_000),
            ecip1017_block: Some(5_000_000),
            ecip1017_era_rounds: Some(5_000_000),
            eip100_block: Some(8_772_000),
            eip140_block: Some(8_772_000),
            eip161_block: Some(8_772_000),
            eip170_block: Some(8_772_000),
            eip198_block: Some(8_772_000),
            eip211_block: Some(8_772_000),
            eip212_block: Some(8_772_000),
            eip213_block: Some(8_772_000),
            eip214_block: Some(8_772_000),
            eip658_block: Some(8_772_000),
            eip145_block: Some(9_573_000),
            eip1014_block: Some(9_573_000),
            eip1052_block: Some(9_573_000),
            ..MultigethConfig::default()
        },
        ..MultigethGenesis::default()
    };
    mainnet_header(&mut genesis);
    ChainSpec::Multigeth(genesis)
}

/// The Mordor test network: Atlantis rules from genesis, Agharta scheduled.
fn mordor() -> ChainSpec {
    let genesis = MultigethGenesis {
        config: MultigethConfig {
            chain_id: Some(63),
            network_id: Some(7),
            eip2_block: Some(0),
            eip7_block: Some(0),
            eip150_block: Some(0),
            eip155_block: Some(0),
            eip160_block: Some(0),
            eip161_block: Some(0),
            eip170_block: Some(0),
            eip100_block: Some(0),
            eip140_block: Some(0),
            eip198_block: Some(0),
            eip211_block: Some(0),
            eip212_block: Some(0),
            eip213_block: Some(0),
            eip214_block: Some(0),
            eip658_block: Some(0),
            ecip1017_block: Some(0),
            ecip1017_era_rounds: Some(2_000_000),
            eip145_block: Some(301_243),
            eip1014_block: Some(301_243),
            eip1052_block: Some(301_243),
            ..MultigethConfig::default()
        },
        nonce: Some(0),
        timestamp: Some(1_559_325_532),
        extra_data: b"mordor".to_vec(),
        gas_limit: Some(0x2f_efd8),
        difficulty: Some(0x2_0000),
        mix_hash: vec![0; 32],
        coinbase: Some("0x0000000000000000000000000000000000000000".to_owned()),
        alloc: BTreeMap::new(),
    };
    ChainSpec::Multigeth(genesis)
}
