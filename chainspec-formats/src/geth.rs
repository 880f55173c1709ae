//! Schema H: the legacy geth genesis format. The config object is keyed by
//! canonical fork name, so most fields bundle several upgrades behind one
//! height.

use crate::envelope::{merge_min, Genesis};
use chainspec_core::serde_utils::u64_opt;
use chainspec_core::{
    expect_fixed, params, Configurator, GenesisAccount, GenesisHeader, ParamError, Upgrade,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type GethGenesis = Genesis<GethConfig>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GethConfig {
    #[serde(default, with = "u64_opt", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, with = "u64_opt", skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
    /// Bundles eip2 and eip7.
    #[serde(default, with = "u64_opt", skip_serializing_if = "Option::is_none")]
    pub homestead_block: Option<u64>,
    #[serde(
        default,
        rename = "eip150Block",
        with = "u64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip150_block: Option<u64>,
    #[serde(
        default,
        rename = "eip155Block",
        with = "u64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip155_block: Option<u64>,
    /// Bundles eip160, eip161abc, eip161d and eip170.
    #[serde(
        default,
        rename = "eip158Block",
        with = "u64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip158_block: Option<u64>,
    /// Bundles eip100, eip140, eip198, eip211-214, eip649 and eip658.
    #[serde(default, with = "u64_opt", skip_serializing_if = "Option::is_none")]
    pub byzantium_block: Option<u64>,
    /// Bundles eip145, eip1014, eip1052, eip1234 and eip1283.
    #[serde(default, with = "u64_opt", skip_serializing_if = "Option::is_none")]
    pub constantinople_block: Option<u64>,
}

impl GethConfig {
    fn slot_mut(&mut self, upgrade: Upgrade) -> Option<&mut Option<u64>> {
        Some(match upgrade {
            Upgrade::Eip2 | Upgrade::Eip7 => &mut self.homestead_block,
            Upgrade::Eip150 => &mut self.eip150_block,
            Upgrade::Eip155 => &mut self.eip155_block,
            Upgrade::Eip160 | Upgrade::Eip161abc | Upgrade::Eip161d | Upgrade::Eip170 => {
                &mut self.eip158_block
            }
            Upgrade::Eip100
            | Upgrade::Eip140
            | Upgrade::Eip198
            | Upgrade::Eip211
            | Upgrade::Eip212
            | Upgrade::Eip213
            | Upgrade::Eip214
            | Upgrade::Eip649
            | Upgrade::Eip658 => &mut self.byzantium_block,
            Upgrade::Eip145
            | Upgrade::Eip1014
            | Upgrade::Eip1052
            | Upgrade::Eip1234
            | Upgrade::Eip1283 => &mut self.constantinople_block,
            Upgrade::Ecip1010Pause | Upgrade::Ecip1017 => return None,
        })
    }

    fn slot(&self, upgrade: Upgrade) -> Option<u64> {
        match upgrade {
            Upgrade::Eip2 | Upgrade::Eip7 => self.homestead_block,
            Upgrade::Eip150 => self.eip150_block,
            Upgrade::Eip155 => self.eip155_block,
            Upgrade::Eip160 | Upgrade::Eip161abc | Upgrade::Eip161d | Upgrade::Eip170 => {
                self.eip158_block
            }
            Upgrade::Eip100
            | Upgrade::Eip140
            | Upgrade::Eip198
            | Upgrade::Eip211
            | Upgrade::Eip212
            | Upgrade::Eip213
            | Upgrade::Eip214
            | Upgrade::Eip649
            | Upgrade::Eip658 => self.byzantium_block,
            Upgrade::Eip145
            | Upgrade::Eip1014
            | Upgrade::Eip1052
            | Upgrade::Eip1234
            | Upgrade::Eip1283 => self.constantinople_block,
            Upgrade::Ecip1010Pause | Upgrade::Ecip1017 => None,
        }
    }
}

impl Configurator for GethGenesis {
    fn chain_id(&self) -> Option<u64> {
        self.config.chain_id
    }

    fn set_chain_id(&mut self, id: u64) -> Result<(), ParamError> {
        self.config.chain_id = Some(id);
        Ok(())
    }

    fn network_id(&self) -> Option<u64> {
        self.config.network_id
    }

    fn set_network_id(&mut self, id: u64) -> Result<(), ParamError> {
        self.config.network_id = Some(id);
        Ok(())
    }

    fn genesis_header(&self) -> GenesisHeader {
        self.header()
    }

    fn set_genesis_header(&mut self, header: &GenesisHeader) -> Result<(), ParamError> {
        self.set_header(header);
        Ok(())
    }

    fn genesis_accounts(&self) -> BTreeMap<String, GenesisAccount> {
        self.alloc.clone()
    }

    fn set_genesis_accounts(
        &mut self,
        accounts: &BTreeMap<String, GenesisAccount>,
    ) -> Result<(), ParamError> {
        self.alloc = accounts.clone();
        Ok(())
    }

    fn activation(&self, upgrade: Upgrade) -> Option<u64> {
        self.config.slot(upgrade)
    }

    fn set_activation(&mut self, upgrade: Upgrade, height: u64) -> Result<(), ParamError> {
        match self.config.slot_mut(upgrade) {
            Some(slot) => {
                match upgrade {
                    // Dedicated fields take the latest write; fork-name
                    // bundles keep the earliest height written to them.
                    Upgrade::Eip150 | Upgrade::Eip155 => *slot = Some(height),
                    _ => merge_min(slot, height),
                }
                Ok(())
            }
            None => Err(ParamError::Unsupported(upgrade.name())),
        }
    }

    fn minimum_difficulty(&self) -> Option<u128> {
        Some(params::MINIMUM_DIFFICULTY)
    }

    fn set_minimum_difficulty(&mut self, value: u128) -> Result<(), ParamError> {
        expect_fixed("minimumDifficulty", params::MINIMUM_DIFFICULTY, value)
    }

    fn difficulty_bound_divisor(&self) -> Option<u128> {
        Some(params::DIFFICULTY_BOUND_DIVISOR)
    }

    fn set_difficulty_bound_divisor(&mut self, value: u128) -> Result<(), ParamError> {
        expect_fixed(
            "difficultyBoundDivisor",
            params::DIFFICULTY_BOUND_DIVISOR,
            value,
        )
    }

    fn duration_limit(&self) -> Option<u64> {
        Some(params::DURATION_LIMIT)
    }

    fn set_duration_limit(&mut self, value: u64) -> Result<(), ParamError> {
        expect_fixed(
            "durationLimit",
            u128::from(params::DURATION_LIMIT),
            u128::from(value),
        )
    }

    fn block_reward(&self) -> Option<u128> {
        Some(params::FRONTIER_BLOCK_REWARD)
    }

    fn set_block_reward(&mut self, value: u128) -> Result<(), ParamError> {
        expect_fixed("blockReward", params::FRONTIER_BLOCK_REWARD, value)
    }

    fn ecip1010_length(&self) -> Option<u64> {
        None
    }

    fn set_ecip1010_length(&mut self, _value: u64) -> Result<(), ParamError> {
        Err(ParamError::Unsupported("ecip1010Length"))
    }

    fn ecip1017_era_rounds(&self) -> Option<u64> {
        None
    }

    fn set_ecip1017_era_rounds(&mut self, _value: u64) -> Result<(), ParamError> {
        Err(ParamError::Unsupported("ecip1017EraRounds"))
    }
}
