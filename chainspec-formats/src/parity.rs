//! Schema P: a flat parity-style spec. Engine parameters live under
//! `engine`, per-proposal activations under `rules` (block number or boolean
//! flag), and the genesis seal uses the nested parity shape.
//!
//! eip649 and eip1234 have no rule of their own: they are encoded as entries
//! in the height-keyed difficulty-bomb-delay and block-reward maps and are
//! reverse-engineered from the delay amounts on read.

use chainspec_core::serde_utils::{bytes_hex, u128_map_hex, u128_opt_hex, u64_map_hex, u64_opt_hex};
use chainspec_core::{params, Configurator, GenesisAccount, GenesisHeader, ParamError, Upgrade};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParitySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub params: ParityParams,
    #[serde(default)]
    pub engine: ParityEngine,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleValue>,
    #[serde(default)]
    pub genesis: ParityGenesis,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub accounts: BTreeMap<String, GenesisAccount>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityParams {
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityEngine {
    #[serde(default, with = "u128_opt_hex", skip_serializing_if = "Option::is_none")]
    pub minimum_difficulty: Option<u128>,
    #[serde(default, with = "u128_opt_hex", skip_serializing_if = "Option::is_none")]
    pub difficulty_bound_divisor: Option<u128>,
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub duration_limit: Option<u64>,
    /// Base block reward in wei; height-keyed overrides live in
    /// `blockRewardSchedule`.
    #[serde(default, with = "u128_opt_hex", skip_serializing_if = "Option::is_none")]
    pub block_reward: Option<u128>,
    /// Height-keyed bomb delays, in blocks.
    #[serde(
        default,
        with = "u64_map_hex",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub difficulty_bomb_delays: BTreeMap<u64, u64>,
    #[serde(
        default,
        with = "u128_map_hex",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub block_reward_schedule: BTreeMap<u64, u128>,
    /// Bundles eip2 and eip7.
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub homestead_transition: Option<u64>,
    #[serde(
        default,
        rename = "eip100bTransition",
        with = "u64_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip100b_transition: Option<u64>,
    #[serde(
        default,
        rename = "ecip1010PauseTransition",
        with = "u64_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecip1010_pause_transition: Option<u64>,
    #[serde(
        default,
        rename = "ecip1010ContinueTransition",
        with = "u64_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecip1010_continue_transition: Option<u64>,
    #[serde(
        default,
        rename = "ecip1017Transition",
        with = "u64_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecip1017_transition: Option<u64>,
    #[serde(
        default,
        rename = "ecip1017EraRounds",
        with = "u64_opt_hex",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecip1017_era_rounds: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityGenesis {
    #[serde(default, skip_serializing_if = "ParitySeal::is_empty")]
    pub seal: ParitySeal,
    #[serde(default, with = "u128_opt_hex", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    #[serde(default, with = "bytes_hex", skip_serializing_if = "Vec::is_empty")]
    pub extra_data: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParitySeal {
    #[serde(default)]
    pub ethereum: ParityEthereumSeal,
}

impl ParitySeal {
    fn is_empty(&self) -> bool {
        self.ethereum.nonce.is_none() && self.ethereum.mix_hash.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityEthereumSeal {
    #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(default, with = "bytes_hex", skip_serializing_if = "Vec::is_empty")]
    pub mix_hash: Vec<u8>,
}

/// A named rule: a block number in any accepted encoding, or a boolean flag
/// where `true` means "active from genesis" and `false` means "never".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleValue {
    Flag(bool),
    Height(u64),
}

impl RuleValue {
    #[must_use]
    pub fn height(self) -> Option<u64> {
        match self {
            Self::Flag(true) => Some(0),
            Self::Flag(false) => None,
            Self::Height(h) => Some(h),
        }
    }
}

impl Serialize for RuleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(b) => serializer.serialize_bool(*b),
            Self::Height(h) => serializer.serialize_str(&format!("{h:#x}")),
        }
    }
}

impl<'de> Deserialize<'de> for RuleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleVisitor;

        impl Visitor<'_> for RuleVisitor {
            type Value = RuleValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean, a block number or a numeric string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<RuleValue, E> {
                Ok(RuleValue::Flag(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RuleValue, E> {
                Ok(RuleValue::Height(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RuleValue, E> {
                u64::try_from(v)
                    .map(RuleValue::Height)
                    .map_err(|_| E::custom("rule heights cannot be negative"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RuleValue, E> {
                chainspec_core::serde_utils::parse_u64(v)
                    .map(RuleValue::Height)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_any(RuleVisitor)
    }
}

impl ParitySpec {
    fn rule(&self, upgrade: Upgrade) -> Option<u64> {
        self.rules.get(upgrade.name()).and_then(|r| r.height())
    }

    fn set_rule(&mut self, upgrade: Upgrade, height: u64) {
        self.rules
            .insert(upgrade.name().to_owned(), RuleValue::Height(height));
    }

    /// Reverse-engineers a delay-map entry back into the proposal that
    /// introduced that exact delay amount.
    fn bomb_delay_transition(&self, delay: u64) -> Option<u64> {
        self.engine
            .difficulty_bomb_delays
            .iter()
            .find(|(_, d)| **d == delay)
            .map(|(height, _)| *height)
    }
}

impl Configurator for ParitySpec {
    fn chain_id(&self) -> Option<u64> {
        self.params.chain_id
    }

    fn set_chain_id(&mut self, id: u64) -> Result<(), ParamError> {
        self.params.chain_id = Some(id);
        Ok(())
    }

    fn network_id(&self) -> Option<u64> {
        self.params.network_id
    }

    fn set_network_id(&mut self, id: u64) -> Result<(), ParamError> {
        self.params.network_id = Some(id);
        Ok(())
    }

    fn genesis_header(&self) -> GenesisHeader {
        GenesisHeader {
            nonce: self.genesis.seal.ethereum.nonce,
            timestamp: self.genesis.timestamp,
            extra_data: self.genesis.extra_data.clone(),
            gas_limit: self.genesis.gas_limit,
            difficulty: self.genesis.difficulty,
            mix_hash: self.genesis.seal.ethereum.mix_hash.clone(),
            coinbase: self.genesis.author.clone(),
        }
    }

    fn set_genesis_header(&mut self, header: &GenesisHeader) -> Result<(), ParamError> {
        self.genesis.seal.ethereum.nonce = header.nonce;
        self.genesis.seal.ethereum.mix_hash = header.mix_hash.clone();
        self.genesis.timestamp = header.timestamp;
        self.genesis.extra_data = header.extra_data.clone();
        self.genesis.gas_limit = header.gas_limit;
        self.genesis.difficulty = header.difficulty;
        self.genesis.author = header.coinbase.clone();
        Ok(())
    }

    fn genesis_accounts(&self) -> BTreeMap<String, GenesisAccount> {
        self.accounts.clone()
    }

    fn set_genesis_accounts(
        &mut self,
        accounts: &BTreeMap<String, GenesisAccount>,
    ) -> Result<(), ParamError> {
        self.accounts = accounts.clone();
        Ok(())
    }

    fn activation(&self, upgrade: Upgrade) -> Option<u64> {
        match upgrade {
            Upgrade::Eip2 | Upgrade::Eip7 => self.engine.homestead_transition,
            Upgrade::Eip100 => self.engine.eip100b_transition,
            Upgrade::Eip649 => self.bomb_delay_transition(params::BYZANTIUM_BOMB_DELAY),
            Upgrade::Eip1234 => self.bomb_delay_transition(params::CONSTANTINOPLE_BOMB_DELAY),
            Upgrade::Ecip1010Pause => self.engine.ecip1010_pause_transition,
            Upgrade::Ecip1017 => self.engine.ecip1017_transition,
            other => self.rule(other),
        }
    }

    fn set_activation(&mut self, upgrade: Upgrade, height: u64) -> Result<(), ParamError> {
        match upgrade {
            Upgrade::Eip2 | Upgrade::Eip7 => {
                let slot = &mut self.engine.homestead_transition;
                *slot = Some(slot.map_or(height, |h| h.min(height)));
            }
            Upgrade::Eip100 => self.engine.eip100b_transition = Some(height),
            Upgrade::Eip649 => {
                self.engine
                    .difficulty_bomb_delays
                    .insert(height, params::BYZANTIUM_BOMB_DELAY);
                self.engine
                    .block_reward_schedule
                    .insert(height, params::BYZANTIUM_BLOCK_REWARD);
            }
            Upgrade::Eip1234 => {
                self.engine
                    .difficulty_bomb_delays
                    .insert(height, params::CONSTANTINOPLE_BOMB_DELAY);
                self.engine
                    .block_reward_schedule
                    .insert(height, params::CONSTANTINOPLE_BLOCK_REWARD);
            }
            Upgrade::Ecip1010Pause => self.engine.ecip1010_pause_transition = Some(height),
            Upgrade::Ecip1017 => self.engine.ecip1017_transition = Some(height),
            other => self.set_rule(other, height),
        }
        Ok(())
    }

    fn minimum_difficulty(&self) -> Option<u128> {
        self.engine.minimum_difficulty
    }

    fn set_minimum_difficulty(&mut self, value: u128) -> Result<(), ParamError> {
        self.engine.minimum_difficulty = Some(value);
        Ok(())
    }

    fn difficulty_bound_divisor(&self) -> Option<u128> {
        self.engine.difficulty_bound_divisor
    }

    fn set_difficulty_bound_divisor(&mut self, value: u128) -> Result<(), ParamError> {
        self.engine.difficulty_bound_divisor = Some(value);
        Ok(())
    }

    fn duration_limit(&self) -> Option<u64> {
        self.engine.duration_limit
    }

    fn set_duration_limit(&mut self, value: u64) -> Result<(), ParamError> {
        self.engine.duration_limit = Some(value);
        Ok(())
    }

    fn block_reward(&self) -> Option<u128> {
        self.engine.block_reward
    }

    fn set_block_reward(&mut self, value: u128) -> Result<(), ParamError> {
        self.engine.block_reward = Some(value);
        Ok(())
    }

    fn ecip1010_length(&self) -> Option<u64> {
        let pause = self.engine.ecip1010_pause_transition?;
        let cont = self.engine.ecip1010_continue_transition?;
        cont.checked_sub(pause)
    }

    fn set_ecip1010_length(&mut self, value: u64) -> Result<(), ParamError> {
        let Some(pause) = self.engine.ecip1010_pause_transition else {
            return Err(ParamError::Dependent {
                param: "ecip1010Length",
                requires: "ecip1010PauseTransition",
            });
        };
        let Some(cont) = pause.checked_add(value) else {
            return Err(ParamError::Overflow {
                param: "ecip1010Length",
            });
        };
        self.engine.ecip1010_continue_transition = Some(cont);
        Ok(())
    }

    fn ecip1017_era_rounds(&self) -> Option<u64> {
        self.engine.ecip1017_era_rounds
    }

    fn set_ecip1017_era_rounds(&mut self, value: u64) -> Result<(), ParamError> {
        self.engine.ecip1017_era_rounds = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_rules_payload_decodes() {
        let spec: ParitySpec = serde_json::from_str(r#"{"rules": {"eip150": 2000000}}"#).unwrap();
        assert_eq!(spec.activation(Upgrade::Eip150), Some(2_000_000));
        assert_eq!(spec.activation(Upgrade::Eip155), None);
        assert_eq!(spec.chain_id(), None);
    }

    #[test]
    fn boolean_rules_mean_genesis_or_never() {
        let spec: ParitySpec =
            serde_json::from_str(r#"{"rules": {"eip150": true, "eip155": false}}"#).unwrap();
        assert_eq!(spec.activation(Upgrade::Eip150), Some(0));
        assert_eq!(spec.activation(Upgrade::Eip155), None);
    }

    #[test]
    fn bomb_delay_maps_encode_eip649_and_eip1234() {
        let mut spec = ParitySpec::default();
        spec.set_activation(Upgrade::Eip649, 4_370_000).unwrap();
        spec.set_activation(Upgrade::Eip1234, 7_280_000).unwrap();
        assert_eq!(spec.activation(Upgrade::Eip649), Some(4_370_000));
        assert_eq!(spec.activation(Upgrade::Eip1234), Some(7_280_000));
        assert_eq!(
            spec.engine.block_reward_schedule.get(&7_280_000),
            Some(&params::CONSTANTINOPLE_BLOCK_REWARD)
        );
    }

    #[test]
    fn bomb_delays_parse_from_json_maps() {
        // Decimal and hex key/value encodings are both in the wild.
        for raw in [
            r#"{"engine": {"difficultyBombDelays": {"4370000": 3000000, "7280000": 2000000}}}"#,
            r#"{"engine": {"difficultyBombDelays": {"0x42ae50": "0x2dc6c0", "0x6f1580": "0x1e8480"}}}"#,
        ] {
            let spec: ParitySpec = serde_json::from_str(raw).unwrap();
            assert_eq!(spec.activation(Upgrade::Eip649), Some(4_370_000), "{raw}");
            assert_eq!(spec.activation(Upgrade::Eip1234), Some(7_280_000), "{raw}");
        }
    }

    #[test]
    fn bomb_delay_map_serializes_as_hex() {
        let mut spec = ParitySpec::default();
        spec.set_activation(Upgrade::Eip649, 4_370_000).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["engine"]["difficultyBombDelays"]["0x42ae50"], "0x2dc6c0");
        let back: ParitySpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn ecip1010_length_is_derived_from_continue_transition() {
        let mut spec = ParitySpec::default();
        assert_eq!(
            spec.set_ecip1010_length(2_000_000),
            Err(ParamError::Dependent {
                param: "ecip1010Length",
                requires: "ecip1010PauseTransition",
            })
        );
        spec.set_activation(Upgrade::Ecip1010Pause, 3_000_000).unwrap();
        spec.set_ecip1010_length(2_000_000).unwrap();
        assert_eq!(spec.engine.ecip1010_continue_transition, Some(5_000_000));
        assert_eq!(spec.ecip1010_length(), Some(2_000_000));
    }

    #[test]
    fn ecip1010_length_overflow_is_rejected() {
        let mut spec = ParitySpec::default();
        spec.set_activation(Upgrade::Ecip1010Pause, u64::MAX - 10)
            .unwrap();
        assert_eq!(
            spec.set_ecip1010_length(100),
            Err(ParamError::Overflow {
                param: "ecip1010Length",
            })
        );
        assert_eq!(spec.engine.ecip1010_continue_transition, None);
    }

    #[test]
    fn genesis_seal_maps_to_header() {
        let raw = r#"{
            "genesis": {
                "seal": {"ethereum": {"nonce": "0x42", "mixHash": "0x00"}},
                "difficulty": "0x400000000",
                "author": "0x0000000000000000000000000000000000000000",
                "gasLimit": "0x1388"
            }
        }"#;
        let spec: ParitySpec = serde_json::from_str(raw).unwrap();
        let header = spec.genesis_header();
        assert_eq!(header.nonce, Some(0x42));
        assert_eq!(header.difficulty, Some(0x4_0000_0000));
        assert_eq!(header.gas_limit, Some(0x1388));
        assert_eq!(header.mix_hash, vec![0]);
    }
}
