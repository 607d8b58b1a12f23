//! LUT generation command

use crate::config::CliConfig;
use crate::GenerateArgs;
use anyhow::{anyhow, bail, Context, Result};
use cubegrade_analysis::{analyze, map_analysis, parse_generated_text};
use cubegrade_color::CubeLut;
use cubegrade_core::{
    find_preset, GradingParameters, ParameterPatch, Rgb, ScalarControl, ToneTriple,
};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub fn run(args: GenerateArgs, config: &CliConfig) -> Result<()> {
    let params = resolve_params(&args, config)?;

    let size = args.grid_size.unwrap_or(config.grid_size);
    let profile = args.profile.unwrap_or(config.profile);
    let title = args.title.clone().unwrap_or_else(|| config.title.clone());

    let lut = CubeLut::generate(&params, title, size, profile)?
        .with_comment(format!("Created by cubegrade {}", env!("CARGO_PKG_VERSION")))
        .with_comment(format!("Profile: {}", profile.name()));

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            lut.write_cube(BufWriter::new(file))
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            info!(path = %path.display(), size, profile = profile.name(), "wrote LUT");
        }
        None => lut.write_cube(std::io::stdout().lock())?,
    }
    Ok(())
}

/// Layer the parameter sources: preset or reference image, parameter file,
/// generated text, then `--set` overrides. Image analysis sets every field,
/// so it stands in for a preset rather than stacking on one.
fn resolve_params(args: &GenerateArgs, config: &CliConfig) -> Result<GradingParameters> {
    let mut params = match &args.preset {
        Some(name) => find_preset(name)
            .map(|p| p.params)
            .ok_or_else(|| anyhow!("unknown preset '{name}' (see `cubegrade presets`)"))?,
        None => GradingParameters::NEUTRAL,
    };

    if let Some(path) = &args.from_image {
        let image = super::load_image(path, Some(config.analysis_max_dimension))?;
        params = params.merged(&map_analysis(&analyze(&image)).into());
    }

    if let Some(path) = &args.params {
        let text = super::read_text(path)?;
        let patch: ParameterPatch = serde_json::from_str(&text)
            .with_context(|| format!("Invalid parameter file: {}", path.display()))?;
        params = params.merged(&patch);
    }

    if let Some(path) = &args.from_text {
        let patch = parse_generated_text(&super::read_text(path)?);
        if patch.is_empty() {
            info!("no parameters recognized in text");
        }
        params = params.merged(&patch);
    }

    for assignment in &args.set {
        params = params.merged(&parse_assignment(assignment)?);
    }

    Ok(params)
}

/// Parse `name=value` or `name=r,g,b` into a single-field patch.
fn parse_assignment(s: &str) -> Result<ParameterPatch> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{s}'"))?;
    let name = name.trim();
    let mut patch = ParameterPatch::default();

    if let Some(control) = ScalarControl::from_name(name) {
        patch.set_scalar(control, parse_number(value)?);
    } else if let Some(triple) = ToneTriple::from_name(name) {
        let parts = value
            .split(',')
            .map(parse_number)
            .collect::<Result<Vec<_>>>()?;
        let rgb = match parts.as_slice() {
            [v] => Rgb::splat(*v),
            [r, g, b] => Rgb::new(*r, *g, *b),
            _ => bail!("{name} takes one value or r,g,b"),
        };
        patch.set_triple(triple, rgb);
    } else {
        bail!("unknown parameter '{name}'");
    }
    Ok(patch)
}

fn parse_number(s: &str) -> Result<f64> {
    let v: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("not a number: '{s}'"))?;
    if !v.is_finite() {
        bail!("not a finite number: '{s}'");
    }
    Ok(v)
}
