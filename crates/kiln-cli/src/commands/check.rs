//! `kiln check`: validate a project without handing anything to the bundler.

use kiln_config::{
    Composer, ConfigValidator, EnvironmentFlags, FsValidator, ProductionOverlay, SchemaValidator,
};

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::ui;

pub fn execute(args: CheckArgs) -> Result<()> {
    let flags = EnvironmentFlags::from_env()?;
    let composer = Composer::load(&args.root, flags)?;

    let common = composer.compose();
    FsValidator.validate(&common)?;
    ui::info(&format!(
        "{} aliases, entry {}",
        composer.aliases().len(),
        common.entry.display()
    ));

    // Production variant must pass the same schema checks.
    let production_flags = EnvironmentFlags {
        is_production: true,
        ..composer.flags().clone()
    };
    let production = ProductionOverlay::new(&production_flags).apply(&common);
    SchemaValidator.validate(&production.config)?;

    ui::success("Configuration is valid");
    Ok(())
}
