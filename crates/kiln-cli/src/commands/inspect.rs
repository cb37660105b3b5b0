//! `kiln inspect`: compose the configuration and print it.

use std::fs::File;
use std::io::{BufWriter, Write};

use kiln_config::{BuildConfig, Composer, EnvironmentFlags};

use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use crate::ui;

pub fn execute(args: InspectArgs) -> Result<()> {
    let mut flags = EnvironmentFlags::from_env()?;
    if args.production {
        flags.is_production = true;
    }
    tracing::debug!(mode = flags.mode_name(), root = %args.root.display(), "inspecting");

    let config = compose(&args, flags)?;

    match &args.out {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &config)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            ui::success(&format!("Wrote configuration to {}", path.display()));
        }
        None => println!("{}", config.to_json_pretty()?),
    }

    Ok(())
}

fn compose(args: &InspectArgs, flags: EnvironmentFlags) -> Result<BuildConfig> {
    let composer = Composer::load(&args.root, flags)?;

    if !composer.flags().is_production {
        return Ok(composer.compose());
    }

    let outcome = composer.compose_production();
    for warning in &outcome.warnings {
        ui::warning(&warning.to_string());
    }
    Ok(outcome.config)
}
