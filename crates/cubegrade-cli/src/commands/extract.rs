//! Free-text parameter extraction command

use crate::ExtractArgs;
use anyhow::Result;
use cubegrade_analysis::{extract_parameters, parse_generated_text};
use cubegrade_core::{GradingParameters, ParameterPatch};
use tracing::warn;

pub fn run(args: ExtractArgs) -> Result<()> {
    let text = super::read_text(&args.input)?;
    let patch = extract(&text, args.regex_only);
    if patch.is_empty() {
        warn!("no grading parameters found in text");
    }

    let mut json = if args.full {
        serde_json::to_string_pretty(&GradingParameters::from_patch(&patch))?
    } else {
        serde_json::to_string_pretty(&patch)?
    };
    json.push('\n');
    super::write_output(None, &json)
}

fn extract(text: &str, regex_only: bool) -> ParameterPatch {
    if regex_only {
        extract_parameters(text)
    } else {
        parse_generated_text(text)
    }
}
