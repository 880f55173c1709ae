//! Schema N: the multigeth genesis format. The config object carries one
//! field per improvement proposal, except eip161, whose two halves share a
//! single block field.

use crate::envelope::{merge_min, Genesis};
use chainspec_core::serde_utils::u64_opt;
use chainspec_core::{
    expect_fixed, params, Configurator, GenesisAccount, GenesisHeader, ParamError, Upgrade,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type MultigethGenesis = Genesis<MultigethConfig>;

macro_rules! height_fields {
    ($($(#[$doc:meta])* $name:ident => $key:literal),+ $(,)?) => {
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct MultigethConfig {
            $(
                $(#[$doc])*
                #[serde(
                    default,
                    rename = $key,
                    with = "u64_opt",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $name: Option<u64>,
            )+
        }
    };
}

height_fields! {
    chain_id => "chainId",
    network_id => "networkId",
    eip2_block => "eip2FBlock",
    eip7_block => "eip7FBlock",
    eip150_block => "eip150Block",
    eip155_block => "eip155Block",
    eip160_block => "eip160FBlock",
    /// Union field: activates both eip161abc and eip161d.
    eip161_block => "eip161FBlock",
    eip170_block => "eip170FBlock",
    eip100_block => "eip100FBlock",
    eip140_block => "eip140FBlock",
    eip198_block => "eip198FBlock",
    eip211_block => "eip211FBlock",
    eip212_block => "eip212FBlock",
    eip213_block => "eip213FBlock",
    eip214_block => "eip214FBlock",
    eip649_block => "eip649FBlock",
    eip658_block => "eip658FBlock",
    eip145_block => "eip145FBlock",
    eip1014_block => "eip1014FBlock",
    eip1052_block => "eip1052FBlock",
    eip1234_block => "eip1234FBlock",
    eip1283_block => "eip1283FBlock",
    ecip1010_pause_block => "ecip1010PauseBlock",
    ecip1010_length => "ecip1010Length",
    ecip1017_block => "ecip1017FBlock",
    ecip1017_era_rounds => "ecip1017EraRounds",
}

impl MultigethConfig {
    fn slot_mut(&mut self, upgrade: Upgrade) -> &mut Option<u64> {
        match upgrade {
            Upgrade::Eip2 => &mut self.eip2_block,
            Upgrade::Eip7 => &mut self.eip7_block,
            Upgrade::Eip150 => &mut self.eip150_block,
            Upgrade::Eip155 => &mut self.eip155_block,
            Upgrade::Eip160 => &mut self.eip160_block,
            Upgrade::Ecip1010Pause => &mut self.ecip1010_pause_block,
            Upgrade::Ecip1017 => &mut self.ecip1017_block,
            Upgrade::Eip161abc | Upgrade::Eip161d => &mut self.eip161_block,
            Upgrade::Eip170 => &mut self.eip170_block,
            Upgrade::Eip100 => &mut self.eip100_block,
            Upgrade::Eip140 => &mut self.eip140_block,
            Upgrade::Eip198 => &mut self.eip198_block,
            Upgrade::Eip211 => &mut self.eip211_block,
            Upgrade::Eip212 => &mut self.eip212_block,
            Upgrade::Eip213 => &mut self.eip213_block,
            Upgrade::Eip214 => &mut self.eip214_block,
            Upgrade::Eip649 => &mut self.eip649_block,
            Upgrade::Eip658 => &mut self.eip658_block,
            Upgrade::Eip145 => &mut self.eip145_block,
            Upgrade::Eip1014 => &mut self.eip1014_block,
            Upgrade::Eip1052 => &mut self.eip1052_block,
            Upgrade::Eip1234 => &mut self.eip1234_block,
            Upgrade::Eip1283 => &mut self.eip1283_block,
        }
    }

    fn slot(&self, upgrade: Upgrade) -> Option<u64> {
        match upgrade {
            Upgrade::Eip2 => self.eip2_block,
            Upgrade::Eip7 => self.eip7_block,
            Upgrade::Eip150 => self.eip150_block,
            Upgrade::Eip155 => self.eip155_block,
            Upgrade::Eip160 => self.eip160_block,
            Upgrade::Ecip1010Pause => self.ecip1010_pause_block,
            Upgrade::Ecip1017 => self.ecip1017_block,
            Upgrade::Eip161abc | Upgrade::Eip161d => self.eip161_block,
            Upgrade::Eip170 => self.eip170_block,
            Upgrade::Eip100 => self.eip100_block,
            Upgrade::Eip140 => self.eip140_block,
            Upgrade::Eip198 => self.eip198_block,
            Upgrade::Eip211 => self.eip211_block,
            Upgrade::Eip212 => self.eip212_block,
            Upgrade::Eip213 => self.eip213_block,
            Upgrade::Eip214 => self.eip214_block,
            Upgrade::Eip649 => self.eip649_block,
            Upgrade::Eip658 => self.eip658_block,
            Upgrade::Eip145 => self.eip145_block,
            Upgrade::Eip1014 => self.eip1014_block,
            Upgrade::Eip1052 => self.eip1052_block,
            Upgrade::Eip1234 => self.eip1234_block,
            Upgrade::Eip1283 => self.eip1283_block,
        }
    }
}

impl Configurator for MultigethGenesis {
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
        let slot = self.config.slot_mut(upgrade);
        match upgrade {
            // Both eip161 halves share one physical field.
            Upgrade::Eip161abc | Upgrade::Eip161d => merge_min(slot, height),
            _ => *slot = Some(height),
        }
        Ok(())
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
        self.config.ecip1010_length
    }

    fn set_ecip1010_length(&mut self, value: u64) -> Result<(), ParamError> {
        self.config.ecip1010_length = Some(value);
        Ok(())
    }

    fn ecip1017_era_rounds(&self) -> Option<u64> {
        self.config.ecip1017_era_rounds
    }

    fn set_ecip1017_era_rounds(&mut self, value: u64) -> Result<(), ParamError> {
        self.config.ecip1017_era_rounds = Some(value);
        Ok(())
    }
}
