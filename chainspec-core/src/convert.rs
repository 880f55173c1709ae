use crate::{Configurator, ConvertError, ParamError, Upgrade};

/// Copies every semantic fact `src` holds into `dst`, using `dst`'s native
/// encoding. `dst` is mutated in place; `src` is never written.
///
/// After the copy pass every canonical upgrade is read back from `dst` and
/// compared against `src`. A bundled target field that would falsely activate
/// an upgrade the source left unset, or shift an activation height, fails the
/// conversion instead of approximating.
///
/// # Errors
///
/// [`ConvertError::Param`] when `dst`'s schema has no faithful slot for a
/// fact `src` holds, [`ConvertError::Mismatch`] when the read-back
/// verification diverges.
pub fn convert(src: &dyn Configurator, dst: &mut dyn Configurator) -> Result<(), ConvertError> {
    if let Some(id) = src.chain_id() {
        dst.set_chain_id(id)?;
    }
    if let Some(id) = src.network_id() {
        dst.set_network_id(id)?;
    }

    dst.set_genesis_header(&src.genesis_header())?;
    dst.set_genesis_accounts(&src.genesis_accounts())?;

    if let Some(v) = src.minimum_difficulty() {
        dst.set_minimum_difficulty(v)?;
    }
    if let Some(v) = src.difficulty_bound_divisor() {
        dst.set_difficulty_bound_divisor(v)?;
    }
    if let Some(v) = src.duration_limit() {
        dst.set_duration_limit(v)?;
    }
    if let Some(v) = src.block_reward() {
        dst.set_block_reward(v)?;
    }

    // Activations before the auxiliary values: ecip1010Length is derived
    // from the pause transition in some schemas.
    for upgrade in Upgrade::ALL {
        if let Some(height) = src.activation(upgrade) {
            dst.set_activation(upgrade, height)?;
        }
    }
    if let Some(v) = src.ecip1010_length() {
        dst.set_ecip1010_length(v)?;
    }
    if let Some(v) = src.ecip1017_era_rounds() {
        dst.set_ecip1017_era_rounds(v)?;
    }

    verify(src, dst)
}

/// Read-back pass: the target must report exactly the activations the source
/// holds for every canonical upgrade.
fn verify(src: &dyn Configurator, dst: &dyn Configurator) -> Result<(), ConvertError> {
    for upgrade in Upgrade::ALL {
        let expected = src.activation(upgrade);
        let found = dst.activation(upgrade);
        if expected != found {
            return Err(ConvertError::Mismatch {
                upgrade,
                expected,
                found,
            });
        }
    }
    if src.ecip1010_length().is_some() && src.ecip1010_length() != dst.ecip1010_length() {
        return Err(ConvertError::Param(ParamError::Unsupported("ecip1010Length")));
    }
    if src.ecip1017_era_rounds().is_some()
        && src.ecip1017_era_rounds() != dst.ecip1017_era_rounds()
    {
        return Err(ConvertError::Param(ParamError::Unsupported("ecip1017EraRounds")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Granular;
    use crate::GenesisHeader;

    #[test]
    fn granular_to_granular_copies_everything() {
        let mut src = Granular::default();
        src.chain_id = Some(61);
        src.network_id = Some(1);
        src.header = GenesisHeader {
            nonce: Some(0x42),
            difficulty: Some(17_179_869_184),
            ..GenesisHeader::default()
        };
        src.activations.insert(Upgrade::Eip150, 2_500_000);
        src.activations.insert(Upgrade::Eip155, 3_000_000);
        src.ecip1010_length = Some(2_000_000);

        let mut dst = Granular::default();
        convert(&src, &mut dst).unwrap();

        assert_eq!(dst.chain_id, Some(61));
        assert_eq!(dst.network_id, Some(1));
        assert_eq!(dst.header.nonce, Some(0x42));
        assert_eq!(dst.activations, src.activations);
        assert_eq!(dst.ecip1010_length, Some(2_000_000));
    }

    #[test]
    fn source_is_not_mutated_and_absent_stays_absent() {
        let src = Granular::default();
        let mut dst = Granular::default();
        dst.chain_id = Some(99);
        convert(&src, &mut dst).unwrap();
        // Nothing in the source, so the target keeps its prior state instead
        // of being fabricated over.
        assert_eq!(dst.chain_id, Some(99));
        assert!(dst.activations.is_empty());
    }

    /// A target whose only physical slot bundles eip150 and eip155 together.
    struct Bundled {
        inner: Granular,
        slot: Option<u64>,
    }

    impl Configurator for Bundled {
        fn chain_id(&self) -> Option<u64> {
            self.inner.chain_id()
        }
        fn set_chain_id(&mut self, id: u64) -> Result<(), ParamError> {
            self.inner.set_chain_id(id)
        }
        fn network_id(&self) -> Option<u64> {
            self.inner.network_id()
        }
        fn set_network_id(&mut self, id: u64) -> Result<(), ParamError> {
            self.inner.set_network_id(id)
        }
        fn genesis_header(&self) -> GenesisHeader {
            self.inner.genesis_header()
        }
        fn set_genesis_header(&mut self, h: &GenesisHeader) -> Result<(), ParamError> {
            self.inner.set_genesis_header(h)
        }
        fn genesis_accounts(&self) -> std::collections::BTreeMap<String, crate::GenesisAccount> {
            self.inner.genesis_accounts()
        }
        fn set_genesis_accounts(
            &mut self,
            a: &std::collections::BTreeMap<String, crate::GenesisAccount>,
        ) -> Result<(), ParamError> {
            self.inner.set_genesis_accounts(a)
        }
        fn activation(&self, upgrade: Upgrade) -> Option<u64> {
            match upgrade {
                Upgrade::Eip150 | Upgrade::Eip155 => self.slot,
                _ => None,
            }
        }
        fn set_activation(&mut self, upgrade: Upgrade, height: u64) -> Result<(), ParamError> {
            match upgrade {
                Upgrade::Eip150 | Upgrade::Eip155 => {
                    self.slot = Some(self.slot.map_or(height, |h| h.min(height)));
                    Ok(())
                }
                other => Err(ParamError::Unsupported(other.name())),
            }
        }
        fn minimum_difficulty(&self) -> Option<u128> {
            self.inner.minimum_difficulty()
        }
        fn set_minimum_difficulty(&mut self, v: u128) -> Result<(), ParamError> {
            self.inner.set_minimum_difficulty(v)
        }
        fn difficulty_bound_divisor(&self) -> Option<u128> {
            self.inner.difficulty_bound_divisor()
        }
        fn set_difficulty_bound_divisor(&mut self, v: u128) -> Result<(), ParamError> {
            self.inner.set_difficulty_bound_divisor(v)
        }
        fn duration_limit(&self) -> Option<u64> {
            self.inner.duration_limit()
        }
        fn set_duration_limit(&mut self, v: u64) -> Result<(), ParamError> {
            self.inner.set_duration_limit(v)
        }
        fn block_reward(&self) -> Option<u128> {
            self.inner.block_reward()
        }
        fn set_block_reward(&mut self, v: u128) -> Result<(), ParamError> {
            self.inner.set_block_reward(v)
        }
        fn ecip1010_length(&self) -> Option<u64> {
            None
        }
        fn set_ecip1010_length(&mut self, _: u64) -> Result<(), ParamError> {
            Err(ParamError::Unsupported("ecip1010Length"))
        }
        fn ecip1017_era_rounds(&self) -> Option<u64> {
            None
        }
        fn set_ecip1017_era_rounds(&mut self, _: u64) -> Result<(), ParamError> {
            Err(ParamError::Unsupported("ecip1017EraRounds"))
        }
    }

    #[test]
    fn bundle_matching_both_heights_converts() {
        let mut src = Granular::default();
        src.activations.insert(Upgrade::Eip150, 2_000_000);
        src.activations.insert(Upgrade::Eip155, 2_000_000);
        let mut dst = Bundled {
            inner: Granular::default(),
            slot: None,
        };
        convert(&src, &mut dst).unwrap();
        assert_eq!(dst.slot, Some(2_000_000));
    }

    #[test]
    fn bundle_would_falsely_activate_second_member() {
        let mut src = Granular::default();
        src.activations.insert(Upgrade::Eip150, 2_000_000);
        // eip155 unset in the source; the bundle cannot express that.
        let mut dst = Bundled {
            inner: Granular::default(),
            slot: None,
        };
        let err = convert(&src, &mut dst).unwrap_err();
        assert_eq!(
            err,
            ConvertError::Mismatch {
                upgrade: Upgrade::Eip155,
                expected: None,
                found: Some(2_000_000),
            }
        );
    }

    #[test]
    fn bundle_with_diverging_heights_is_rejected() {
        let mut src = Granular::default();
        src.activations.insert(Upgrade::Eip150, 2_000_000);
        src.activations.insert(Upgrade::Eip155, 2_650_000);
        let mut dst = Bundled {
            inner: Granular::default(),
            slot: None,
        };
        let err = convert(&src, &mut dst).unwrap_err();
        // The bundle collapses to the minimum height, which misreports eip155.
        assert_eq!(
            err,
            ConvertError::Mismatch {
                upgrade: Upgrade::Eip155,
                expected: Some(2_650_000),
                found: Some(2_000_000),
            }
        );
    }

    #[test]
    fn unsupported_slot_fails_with_named_parameter() {
        let mut src = Granular::default();
        src.activations.insert(Upgrade::Ecip1017, 5_000_000);
        let mut dst = Bundled {
            inner: Granular::default(),
            slot: None,
        };
        let err = convert(&src, &mut dst).unwrap_err();
        assert_eq!(err, ConvertError::Param(ParamError::Unsupported("ecip1017")));
    }
}
