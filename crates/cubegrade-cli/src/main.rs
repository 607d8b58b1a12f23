//! cubegrade - 3D LUT generator for color grades
//!
//! Bakes grading parameters, presets, reference images or generated text
//! into `.cube` files.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cubegrade_color::OutputProfile;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "cubegrade")]
#[command(author, version, about = "Generate .cube 3D LUTs from color grades")]
#[command(long_about = "
Generate .cube 3D LUTs from grading parameters, named presets,
reference images or free-form text.

Examples:
  cubegrade generate --preset teal-orange -o teal.cube
  cubegrade generate --set contrast=0.3 --set lift=0.05,0,-0.05 -o look.cube
  cubegrade generate --from-image ref.jpg --profile legal-range -o ref.cube
  cubegrade analyze ref.jpg --map              # statistics + derived parameters
  cubegrade extract reply.txt                  # parameters from generated text
  cubegrade apply still.png -o graded.png --lut look.cube
  cubegrade presets
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON config file (defaults to $CUBEGRADE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a LUT from parameters, a preset, an image or text
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Print statistics of a reference image as JSON
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Extract grading parameters from free-form text
    #[command(visible_alias = "x")]
    Extract(ExtractArgs),

    /// Grade an image with a .cube file or preset
    Apply(ApplyArgs),

    /// List built-in presets
    Presets(PresetsArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Start from a named preset
    #[arg(short, long)]
    preset: Option<String>,

    /// JSON parameter file (partial sets allowed)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Derive parameters from a reference image (replaces a preset)
    #[arg(long, conflicts_with = "preset")]
    from_image: Option<PathBuf>,

    /// Parse parameters from a text file ("-" for stdin)
    #[arg(long)]
    from_text: Option<PathBuf>,

    /// Override a field: name=value or name=r,g,b (repeatable)
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Grid points per axis (2-256)
    #[arg(short = 'n', long)]
    grid_size: Option<usize>,

    /// Output profile: standard, legal-range
    #[arg(long)]
    profile: Option<OutputProfile>,

    /// TITLE line of the LUT
    #[arg(short, long)]
    title: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Reference image
    input: PathBuf,

    /// Also print the derived grading parameters
    #[arg(short, long)]
    map: bool,

    /// Longest edge before analysis
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ExtractArgs {
    /// Text file ("-" for stdin)
    input: PathBuf,

    /// Skip embedded JSON and use pattern matching only
    #[arg(long)]
    regex_only: bool,

    /// Print the full parameter set merged onto neutral
    #[arg(long)]
    full: bool,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// .cube file to apply
    #[arg(short, long, conflicts_with = "preset", required_unless_present = "preset")]
    lut: Option<PathBuf>,

    /// Grade directly with a named preset
    #[arg(short, long)]
    preset: Option<String>,
}

#[derive(Args)]
struct PresetsArgs {
    /// Print parameters as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, &config),
        Commands::Analyze(args) => commands::analyze::run(args, &config),
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
