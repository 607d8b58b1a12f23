//! Preset listing command

use crate::PresetsArgs;
use anyhow::Result;
use cubegrade_core::{GradingParameters, PRESETS};
use serde::Serialize;

#[derive(Serialize)]
struct PresetEntry<'a> {
    name: &'a str,
    description: &'a str,
    params: GradingParameters,
}

pub fn run(args: PresetsArgs) -> Result<()> {
    let out = if args.json {
        let entries: Vec<_> = PRESETS
            .iter()
            .map(|p| PresetEntry {
                name: p.name,
                description: p.description,
                params: p.params,
            })
            .collect();
        let mut json = serde_json::to_string_pretty(&entries)?;
        json.push('\n');
        json
    } else {
        table()
    };
    super::write_output(None, &out)
}

fn table() -> String {
    let width = PRESETS.iter().map(|p| p.name.len()).max().unwrap_or(0);
    PRESETS
        .iter()
        .map(|p| format!("{:<width$}  {}\n", p.name, p.description))
        .collect()
}
