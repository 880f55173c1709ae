use anyhow::{bail, Context, Result};
use chainspec_core::{convert, forks, is_valid, serde_utils::parse_u64, transitions};
use chainspec_formats::{parse, to_json_pretty, ChainSpec, Format, Registry};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[clap(
    name = "chainspec",
    about = "Convert, validate and inspect chain specification files"
)]
struct Opts {
    /// Input schema name [parity|geth|multigeth]
    #[clap(long, short = 'f')]
    format: Option<String>,
    /// Read the specification from this file instead of stdin
    #[clap(long)]
    file: Option<PathBuf>,
    /// Use a built-in network preset instead of reading input
    #[clap(long = "default", conflicts_with_all = ["format", "file"])]
    preset: Option<String>,
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Convert the specification to another schema and print it
    Convert(ConvertOpts),
    /// Check fork-schedule consistency; exits 1 when invalid
    Validate(ValidateOpts),
    /// List unique non-zero fork activation heights, ascending
    Forks,
    /// List improvement-proposal activation points
    Ips,
    /// List supported schema names
    LsFormats,
    /// List built-in preset names
    LsDefaults,
}

#[derive(Parser)]
struct ConvertOpts {
    /// Output schema name [parity|geth|multigeth]
    #[clap(long)]
    to: String,
}

#[derive(Parser)]
struct ValidateOpts {
    /// Current head block number, decimal or 0x-hex
    head: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let registry = Registry::builtin();

    match opts.cmd {
        Command::LsFormats => {
            for format in Format::ALL {
                println!("{format}");
            }
        }
        Command::LsDefaults => {
            for name in registry.names() {
                println!("{name}");
            }
        }
        Command::Convert(ref convert_opts) => {
            let to: Format = convert_opts.to.parse()?;
            let spec = load_spec(&opts, &registry)?;
            let mut target = to.empty();
            convert(spec.as_configurator(), target.as_configurator_mut())?;
            println!("{}", to_json_pretty(&target)?);
        }
        Command::Validate(ref validate_opts) => {
            let head = validate_opts
                .head
                .as_deref()
                .map(parse_u64)
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let spec = load_spec(&opts, &registry)?;
            if let Err(e) = is_valid(spec.as_configurator(), head) {
                eprintln!("invalid chainspec: {e}");
                std::process::exit(1);
            }
            eprintln!("valid chainspec");
        }
        Command::Forks => {
            let spec = load_spec(&opts, &registry)?;
            for height in forks(spec.as_configurator()) {
                println!("{height}");
            }
        }
        Command::Ips => {
            let spec = load_spec(&opts, &registry)?;
            for (upgrade, height) in transitions(spec.as_configurator()) {
                match height {
                    Some(h) => println!("{upgrade} {h}"),
                    None => println!("{upgrade} -"),
                }
            }
        }
    }
    Ok(())
}

fn load_spec(opts: &Opts, registry: &Registry) -> Result<ChainSpec> {
    if let Some(name) = opts.preset.as_deref() {
        return registry
            .get(name)
            .with_context(|| format!("unknown preset {name:?}"));
    }
    let Some(format) = opts.format.as_deref() else {
        bail!("--format is required unless --default names a preset");
    };
    let format: Format = format.parse()?;
    let bytes = read_input(opts.file.as_deref())?;
    log::debug!("decoding {} bytes as {format}", bytes.len());
    Ok(parse(format, &bytes)?)
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            if buf.is_empty() {
                bail!("empty chainspec input");
            }
            Ok(buf)
        }
    }
}
