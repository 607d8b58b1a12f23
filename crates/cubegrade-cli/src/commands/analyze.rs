//! Reference image analysis command

use crate::config::CliConfig;
use crate::AnalyzeArgs;
use anyhow::Result;
use cubegrade_analysis::{analyze, map_analysis, ImageAnalysis};
use cubegrade_core::GradingParameters;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct Report {
    analysis: ImageAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<GradingParameters>,
}

pub fn run(args: AnalyzeArgs, config: &CliConfig) -> Result<()> {
    let max = args.max_dimension.unwrap_or(config.analysis_max_dimension);
    let image = super::load_image(&args.input, Some(max))?;
    debug!(width = image.width(), height = image.height(), "analyzing");

    let analysis = analyze(&image);
    let parameters = args.map.then(|| map_analysis(&analysis));
    let report = Report {
        analysis,
        parameters,
    };

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    super::write_output(args.output.as_deref(), &json)
}
