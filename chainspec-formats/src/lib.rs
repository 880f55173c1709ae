//! Concrete chain-specification schemas and the format-hint parser.
//!
//! The geth and multigeth schemas share an outer envelope and their config
//! objects parse as lenient supersets of each other, so the bytes alone can
//! never tell them apart. [`parse`] therefore decodes in two passes: the
//! envelope first, with the config captured verbatim, then the config a
//! second time into the concrete type named by the caller's format hint.
//! The hint is the sole source of truth; data shape is never inferred.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use chainspec_core::Configurator;

mod envelope;
pub mod geth;
pub mod multigeth;
pub mod parity;
mod presets;

pub use envelope::Genesis;
pub use geth::{GethConfig, GethGenesis};
pub use multigeth::{MultigethConfig, MultigethGenesis};
pub use parity::{ParitySpec, RuleValue};
pub use presets::Registry;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown chainspec format {0:?}")]
    UnknownFormat(String),
    #[error("malformed chainspec json: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three recognized schema names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    Parity,
    Geth,
    Multigeth,
}

impl Format {
    pub const ALL: [Self; 3] = [Self::Parity, Self::Geth, Self::Multigeth];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parity => "parity",
            Self::Geth => "geth",
            Self::Multigeth => "multigeth",
        }
    }

    /// An all-absent representation of this schema, ready to be the target
    /// of a conversion.
    #[must_use]
    pub fn empty(self) -> ChainSpec {
        match self {
            Self::Parity => ChainSpec::Parity(ParitySpec::default()),
            Self::Geth => ChainSpec::Geth(GethGenesis::default()),
            Self::Multigeth => ChainSpec::Multigeth(MultigethGenesis::default()),
        }
    }
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "parity" => Ok(Self::Parity),
            "geth" => Ok(Self::Geth),
            "multigeth" => Ok(Self::Multigeth),
            other => Err(ParseError::UnknownFormat(other.to_owned())),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded chain specification in one of the three concrete schemas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChainSpec {
    Parity(ParitySpec),
    Geth(GethGenesis),
    Multigeth(MultigethGenesis),
}

impl ChainSpec {
    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::Parity(_) => Format::Parity,
            Self::Geth(_) => Format::Geth,
            Self::Multigeth(_) => Format::Multigeth,
        }
    }

    #[must_use]
    pub fn as_configurator(&self) -> &dyn Configurator {
        match self {
            Self::Parity(s) => s,
            Self::Geth(s) => s,
            Self::Multigeth(s) => s,
        }
    }

    pub fn as_configurator_mut(&mut self) -> &mut dyn Configurator {
        match self {
            Self::Parity(s) => s,
            Self::Geth(s) => s,
            Self::Multigeth(s) => s,
        }
    }
}

/// Decodes `bytes` into the schema named by `format`.
///
/// # Errors
///
/// [`ParseError::Json`] when the bytes are not well-formed JSON or a field
/// value is malformed. A recognized field that is simply missing decodes as
/// absent, never as an error.
pub fn parse(format: Format, bytes: &[u8]) -> Result<ChainSpec, ParseError> {
    match format {
        Format::Parity => Ok(ChainSpec::Parity(serde_json::from_slice(bytes)?)),
        Format::Geth => Ok(ChainSpec::Geth(parse_envelope(bytes)?)),
        Format::Multigeth => Ok(ChainSpec::Multigeth(parse_envelope(bytes)?)),
    }
}

/// Two-pass decode for the geth/multigeth envelope: the generic first pass
/// keeps the ambiguous config as raw JSON, the second pass re-decodes it
/// into the concrete sub-type the format hint selected.
fn parse_envelope<C>(bytes: &[u8]) -> Result<Genesis<C>, ParseError>
where
    C: Default + DeserializeOwned,
{
    let mut envelope: Genesis<serde_json::Value> = serde_json::from_slice(bytes)?;
    let raw = std::mem::take(&mut envelope.config);
    let config = if raw.is_null() {
        C::default()
    } else {
        serde_json::from_value(raw)?
    };
    Ok(envelope.with_config(config))
}

/// Pretty-prints a spec with 4-space indentation, matching the layout the
/// tool has always emitted.
///
/// # Errors
///
/// Returns any underlying serializer error.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| serde::ser::Error::custom(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainspec_core::{convert, forks, is_valid, transitions, ConvertError, Upgrade};

    // A payload that is syntactically valid under both the geth and the
    // multigeth config shape; only the hint decides what it means.
    const AMBIGUOUS: &str = r#"{
        "config": {
            "chainId": 1,
            "homesteadBlock": 1150000,
            "eip150Block": 2463000
        },
        "nonce": "0x42",
        "gasLimit": "0x1388"
    }"#;

    #[test]
    fn hint_selects_concrete_schema_despite_overlap() {
        let as_geth = parse(Format::Geth, AMBIGUOUS.as_bytes()).unwrap();
        let as_multigeth = parse(Format::Multigeth, AMBIGUOUS.as_bytes()).unwrap();

        assert_eq!(as_geth.format(), Format::Geth);
        assert_eq!(as_multigeth.format(), Format::Multigeth);

        // Under geth the homestead field bundles eip2; multigeth has no such
        // key, so the same bytes mean "homestead never scheduled".
        assert_eq!(
            as_geth.as_configurator().activation(Upgrade::Eip2),
            Some(1_150_000)
        );
        assert_eq!(as_multigeth.as_configurator().activation(Upgrade::Eip2), None);

        // Fields both schemas spell identically agree.
        for spec in [&as_geth, &as_multigeth] {
            assert_eq!(
                spec.as_configurator().activation(Upgrade::Eip150),
                Some(2_463_000)
            );
            assert_eq!(spec.as_configurator().chain_id(), Some(1));
            assert_eq!(spec.as_configurator().genesis_header().nonce, Some(0x42));
        }
    }

    #[test]
    fn unknown_format_fails_before_decoding() {
        assert!(matches!(
            "besu".parse::<Format>(),
            Err(ParseError::UnknownFormat(name)) if name == "besu"
        ));
    }

    #[test]
    fn malformed_json_is_a_syntax_error() {
        assert!(matches!(
            parse(Format::Geth, b"{not json"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn missing_config_decodes_as_all_absent() {
        let spec = parse(Format::Multigeth, b"{\"nonce\": \"0x0\"}").unwrap();
        assert!(forks(spec.as_configurator()).is_empty());
    }

    #[test]
    fn parity_rule_converts_to_multigeth_scenario() {
        let spec = parse(Format::Parity, br#"{"rules": {"eip150": 2000000}}"#).unwrap();
        let mut target = Format::Multigeth.empty();
        convert(spec.as_configurator(), target.as_configurator_mut()).unwrap();

        assert_eq!(
            target.as_configurator().activation(Upgrade::Eip150),
            Some(2_000_000)
        );
        assert_eq!(forks(target.as_configurator()), vec![2_000_000]);
    }

    #[test]
    fn geth_multigeth_geth_round_trip_is_lossless() {
        let source = parse(Format::Geth, AMBIGUOUS.as_bytes()).unwrap();
        let mut mid = Format::Multigeth.empty();
        convert(source.as_configurator(), mid.as_configurator_mut()).unwrap();
        let mut back = Format::Geth.empty();
        convert(mid.as_configurator(), back.as_configurator_mut()).unwrap();

        assert_eq!(
            transitions(source.as_configurator()),
            transitions(back.as_configurator())
        );
        assert_eq!(
            source.as_configurator().genesis_header(),
            back.as_configurator().genesis_header()
        );
        assert_eq!(source.as_configurator().chain_id(), back.as_configurator().chain_id());
    }

    #[test]
    fn parity_byzantium_converts_to_geth_bundle() {
        let mut spec = Format::Parity.empty();
        {
            let conf = spec.as_configurator_mut();
            for upgrade in [
                Upgrade::Eip100,
                Upgrade::Eip140,
                Upgrade::Eip198,
                Upgrade::Eip211,
                Upgrade::Eip212,
                Upgrade::Eip213,
                Upgrade::Eip214,
                Upgrade::Eip649,
                Upgrade::Eip658,
            ] {
                conf.set_activation(upgrade, 4_370_000).unwrap();
            }
        }
        let mut target = Format::Geth.empty();
        convert(spec.as_configurator(), target.as_configurator_mut()).unwrap();
        let ChainSpec::Geth(geth) = &target else {
            panic!("expected geth spec");
        };
        assert_eq!(geth.config.byzantium_block, Some(4_370_000));
    }

    #[test]
    fn partial_byzantium_cannot_become_geth() {
        let mut spec = Format::Parity.empty();
        spec.as_configurator_mut()
            .set_activation(Upgrade::Eip100, 4_370_000)
            .unwrap();
        let mut target = Format::Geth.empty();
        let err = convert(spec.as_configurator(), target.as_configurator_mut()).unwrap_err();
        assert!(matches!(err, ConvertError::Mismatch { .. }));
    }

    #[test]
    fn validation_boundary_heads() {
        let mut spec = Format::Multigeth.empty();
        {
            let conf = spec.as_configurator_mut();
            conf.set_chain_id(1).unwrap();
            conf.set_activation(Upgrade::Eip150, 100).unwrap();
            conf.set_activation(Upgrade::Eip155, 200).unwrap();
            conf.set_activation(Upgrade::Eip160, 300).unwrap();
        }
        let conf = spec.as_configurator();
        is_valid(conf, Some(150)).unwrap();
        let schedule = forks(conf);
        assert_eq!(schedule, vec![100, 200, 300]);
        assert_eq!(schedule.iter().filter(|h| **h <= 150).count(), 1);
        assert_eq!(schedule.iter().filter(|h| **h > 150).count(), 2);
    }

    #[test]
    fn pretty_output_uses_four_space_indent() {
        let spec = parse(Format::Parity, br#"{"rules": {"eip150": 2000000}}"#).unwrap();
        let out = to_json_pretty(&spec).unwrap();
        assert!(out.starts_with("{\n    \""), "got: {out}");
        let reparsed = parse(Format::Parity, out.as_bytes()).unwrap();
        assert_eq!(reparsed, spec);
    }
}
