use crate::{Configurator, Upgrade, ValidateError};

/// Unique, non-zero fork-activation heights in ascending order.
///
/// Genesis activations carry no transition, so height 0 is dropped along
/// with absent entries. The sequence is recomputed on every call.
pub fn forks(conf: &dyn Configurator) -> Vec<u64> {
    let mut heights: Vec<u64> = Upgrade::ALL
        .iter()
        .filter_map(|u| conf.activation(*u))
        .filter(|h| *h != 0)
        .collect();
    heights.sort_unstable();
    heights.dedup();
    heights
}

/// One entry per canonical upgrade, in canonical order, whether set or not.
pub fn transitions(conf: &dyn Configurator) -> Vec<(Upgrade, Option<u64>)> {
    Upgrade::ALL
        .iter()
        .map(|u| (*u, conf.activation(*u)))
        .collect()
}

/// Checks the internal consistency of the fork schedule, stopping at the
/// first violation.
///
/// Without a head this verifies ordering and the always-together upgrade
/// pairs. With a head it additionally requires a chain id once eip155 replay
/// protection is active at that head; the schedule partition at the head is
/// consistent by construction once ordering holds.
///
/// # Errors
///
/// The first [`ValidateError`] encountered, naming the offending upgrades.
pub fn is_valid(conf: &dyn Configurator, head: Option<u64>) -> Result<(), ValidateError> {
    let mut prior: Option<(Upgrade, u64)> = None;
    for upgrade in Upgrade::ALL {
        let Some(height) = conf.activation(upgrade) else {
            continue;
        };
        if let Some((prior_upgrade, prior_height)) = prior {
            if height < prior_height {
                return Err(ValidateError::OutOfOrder {
                    prior: prior_upgrade,
                    prior_height,
                    later: upgrade,
                    later_height: height,
                });
            }
        }
        prior = Some((upgrade, height));
    }

    for (a, b) in Upgrade::PAIRED {
        if let (Some(a_height), Some(b_height)) = (conf.activation(a), conf.activation(b)) {
            if a_height != b_height {
                return Err(ValidateError::PairDisagrees {
                    a,
                    a_height,
                    b,
                    b_height,
                });
            }
        }
    }

    if let Some(head) = head {
        let eip155_active = conf
            .activation(Upgrade::Eip155)
            .is_some_and(|h| h <= head);
        if eip155_active && conf.chain_id().is_none() {
            return Err(ValidateError::MissingChainId { head });
        }
    }

    Ok(())
}
