//! Apply a LUT or preset to an image

use crate::ApplyArgs;
use anyhow::{anyhow, bail, Result};
use cubegrade_color::{CubeLut, GradePipeline};
use cubegrade_core::find_preset;
use tracing::info;

pub fn run(args: ApplyArgs) -> Result<()> {
    let mut image = super::load_image(&args.input, None)?;

    match (&args.lut, &args.preset) {
        (Some(path), _) => {
            let lut = CubeLut::from_cube(&super::read_text(path)?)?;
            info!(lut = %path.display(), size = lut.size(), "applying LUT");
            image.map_rgb(|rgb| lut.apply(rgb));
        }
        (None, Some(name)) => {
            let preset = find_preset(name).ok_or_else(|| anyhow!("unknown preset '{name}'"))?;
            info!(preset = preset.name, "applying preset");
            GradePipeline::new(preset.params).process_image(&mut image);
        }
        (None, None) => bail!("either --lut or --preset is required"),
    }

    super::save_image(&args.output, image)
}
