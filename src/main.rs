//! Liver Simulator X - Entry point
//!
//! Simulates drug-induced liver injury for one or more compounds and prints
//! a risk assessment per compound.
//!
//! CLI Usage:
//!   cargo run -- "CC(=O)NC1=CC=C(C=C1)O"              # Paracetamol, defaults
//!   cargo run -- --dose 2.0 --duration 72 "ClC1=CC=CC=C1"
//!   cargo run -- --variant genotoxic --csv --json "CCO" "BrCCBr"
//!   cargo run -- --no-idiosyncratic "ClC1=CC=CC=C1"
//!   cargo run -- --list-variants

use anyhow::{bail, Context, Result};
use clap::Parser;

use liver_simulator_x::{
    config::Parameters,
    export::{export_assessment_json, export_trajectory_csv},
    simulate_batch, CompoundDescriptor, Simulator, SubstringFlagClassifier, VariantConfig,
    VariantRegistry,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "liver-simulator-x")]
#[command(version = VERSION)]
#[command(about = "Drug-induced liver injury simulation and risk scoring", long_about = None)]
struct Args {
    /// Compound descriptors (SMILES), one per argument
    compounds: Vec<String>,

    /// JSON parameter file (CLI flags override its values)
    #[arg(short, long)]
    params: Option<String>,

    /// Dose level (typical 0.1-3.0)
    #[arg(short, long)]
    dose: Option<f64>,

    /// Simulation time in hours (typical 12-96)
    #[arg(short = 't', long)]
    duration: Option<u32>,

    /// Number of output samples across the duration
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Model variant: bioactivation, oxidative, genotoxic
    #[arg(short, long)]
    variant: Option<String>,

    /// Disable idiosyncratic risk (on by default for variants that model it)
    #[arg(long)]
    no_idiosyncratic: bool,

    /// Force the antioxidant modifier on every compound
    #[arg(short, long)]
    antioxidant: bool,

    /// Export each trajectory to CSV under exports/
    #[arg(long)]
    csv: bool,

    /// Export a JSON report under exports/
    #[arg(long)]
    json: bool,

    /// List available model variants and exit
    #[arg(long)]
    list_variants: bool,
}

fn list_variants() {
    println!("Available model variants:");
    println!();
    for name in VariantRegistry::list_models() {
        if let Some(help) = VariantRegistry::help(name) {
            println!("[{}]", name);
            println!("{}", help);
            println!();
        }
    }
}

/// Idiosyncratic mode is on unless disabled, and only where the variant
/// models it
fn idiosyncratic_enabled(args: &Args, variant: &VariantConfig) -> bool {
    !args.no_idiosyncratic && variant.features.idiosyncratic
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.list_variants {
        list_variants();
        return Ok(());
    }

    if args.compounds.is_empty() {
        bail!("no compounds given (pass one or more SMILES strings)");
    }

    let mut params = match &args.params {
        Some(path) => Parameters::load_from_file(path)
            .with_context(|| format!("failed to load parameters from {}", path))?,
        None => Parameters::default(),
    };
    if let Some(dose) = args.dose {
        params.simulation.dose = dose;
    }
    if let Some(duration) = args.duration {
        params.simulation.duration_hours = duration;
    }
    if let Some(samples) = args.samples {
        params.simulation.sample_count = samples;
    }
    if let Some(variant) = &args.variant {
        params.variant = variant.clone();
    }

    let variant = params.variant_config()?;
    let simulator = Simulator::new(variant, params.simulation)?;

    let idiosyncratic = idiosyncratic_enabled(&args, simulator.variant());
    let classifier = SubstringFlagClassifier::default();
    let mut compounds = Vec::with_capacity(args.compounds.len());
    for smiles in &args.compounds {
        match CompoundDescriptor::from_structure(smiles, &classifier, idiosyncratic) {
            Ok(compound) => {
                let compound = if args.antioxidant && !compound.modifiers().antioxidant {
                    let mut modifiers = compound.modifiers();
                    modifiers.antioxidant = true;
                    let (id, amplifier) = (compound.compound_id(), compound.amplifier());
                    CompoundDescriptor::new(id, amplifier, modifiers)?
                } else {
                    compound
                };
                compounds.push(compound);
            }
            Err(e) => log::error!("Skipping compound: {}", e),
        }
    }

    if compounds.is_empty() {
        bail!("no valid compounds to simulate");
    }

    println!("=== Liver Simulator X ===");
    println!(
        "Variant: {} | Dose: {} | Time: {} h | Samples: {}",
        simulator.variant().variant,
        params.simulation.dose,
        params.simulation.duration_hours,
        params.simulation.sample_count
    );
    println!();

    let mut assessments = Vec::with_capacity(compounds.len());
    for (idx, result) in simulate_batch(&simulator, &compounds).into_iter().enumerate() {
        match result {
            Ok(assessment) => {
                assessment.print_summary();
                if args.csv {
                    export_trajectory_csv(&assessment.result, &simulator.variant().layout, idx)?;
                }
                assessments.push(assessment);
            }
            Err(e) => {
                let id = compounds[idx].compound_id();
                log::error!("Compound {} ({}) failed: {}", idx + 1, id, e);
            }
        }
    }

    if args.json && !assessments.is_empty() {
        let path = export_assessment_json(&simulator, &assessments)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
