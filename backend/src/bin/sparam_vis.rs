//! S-parameter chart generator
//!
//! Renders one chart per requested parameter per network, as described by an
//! `analysis.toml` run file, and offers two small lookups.
//!
//! # Usage
//!
//! ```bash
//! # Render the charts of a run file (default: analysis.toml search path)
//! sparam-vis run path/to/analysis.toml
//!
//! # Print an LTE band definition, or every band without an id
//! sparam-vis band 20
//!
//! # Microstrip width for Z0, er, dielectric and copper thickness (mils)
//! sparam-vis microstrip 50 3.4 4.25 1
//! ```
//!
//! # Environment Variables
//!
//! - `SPARAM_CONFIG`: run file used when `run` gets no path
//! - `SPARAM_OUTPUT_DIR`, `SPARAM_FREQ_UNIT`, `SPARAM_DPI`, `SPARAM_STRICT_BANDS`:
//!   analyser overrides
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use sparam_vis::calculators::{calculate_width, calculate_width_alt, mils_to_mm, MicrostripInput};
use sparam_vis::models::lte_bands;
use sparam_vis::{Analyser, Network, RunConfig};

const USAGE: &str = "usage: sparam-vis [run [CONFIG]] | band [ID] | microstrip <Z0> <ER> <H> <T>";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => run(None),
        Some("run") => run(args.get(1).map(PathBuf::from)),
        Some("band") => band(&args[1..]),
        Some("microstrip") => microstrip(&args[1..]),
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) if other.ends_with(".toml") => run(Some(PathBuf::from(other))),
        Some(other) => bail!("unknown command '{}'\n{}", other, USAGE),
    }
}

fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path.or_else(|| env::var("SPARAM_CONFIG").ok().map(PathBuf::from)) {
        Some(path) => RunConfig::from_file(&path)
            .with_context(|| format!("loading run file {}", path.display()))?,
        None => RunConfig::from_default_location()?,
    };
    let analyser_config = config.analyser.clone().with_env_overrides()?;
    let options = config.run.generate_options()?;

    let networks = config
        .run
        .networks
        .iter()
        .map(|path| {
            Network::from_json_file(path)
                .with_context(|| format!("loading network {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!("Loaded {} network(s)", networks.len());

    let mut analyser = Analyser::new(networks, analyser_config)?;
    let report = analyser.generate(config.run.parameters.as_slice(), &options)?;

    info!("Rendered {} image(s)", report.rendered.len());
    for failure in &report.failures {
        warn!(
            "{} {} not rendered: {}",
            failure.network, failure.parameter, failure.error
        );
    }
    if !report.is_success() {
        bail!("{} chart(s) failed", report.failures.len());
    }
    Ok(())
}

fn band(args: &[String]) -> anyhow::Result<()> {
    match args.first() {
        Some(id) => println!("{}", lte_bands::lookup_str(id)?),
        None => {
            for id in lte_bands::band_ids() {
                println!("{}", lte_bands::lookup(id)?);
            }
        }
    }
    Ok(())
}

fn microstrip(args: &[String]) -> anyhow::Result<()> {
    let values = args
        .iter()
        .map(|a| a.parse::<f64>().with_context(|| format!("'{}' is not a number", a)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let &[z0, er, h, t] = values.as_slice() else {
        bail!(USAGE);
    };

    let input = MicrostripInput::new(z0, er, h, t);
    let width = calculate_width(&input)?;
    let width_alt = calculate_width_alt(&input)?;
    println!("width:     {:.4} mils ({:.4} mm)", width, mils_to_mm(width));
    println!("width alt: {:.4} mils ({:.4} mm)", width_alt, mils_to_mm(width_alt));
    Ok(())
}
