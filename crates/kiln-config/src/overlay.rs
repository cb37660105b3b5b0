//! Production overlay over the common configuration.

use crate::build::{BuildConfig, Devtool, MinifierOptions, Mode, Optimization, PluginDescriptor};
use crate::env::EnvironmentFlags;
use crate::error::EnvironmentWarning;

/// Result of applying the production overlay.
#[derive(Debug, Clone)]
pub struct OverlayOutcome {
    pub config: BuildConfig,
    /// Non-fatal signals raised while deriving `config`
    pub warnings: Vec<EnvironmentWarning>,
}

/// Derives a production configuration from the common one.
///
/// Overrides `mode`, `devtool` and the minimizer list; every other field is
/// carried over from the input. The input is left untouched.
#[derive(Debug, Clone, Copy)]
pub struct ProductionOverlay<'a> {
    flags: &'a EnvironmentFlags,
}

impl<'a> ProductionOverlay<'a> {
    pub fn new(flags: &'a EnvironmentFlags) -> Self {
        Self { flags }
    }

    pub fn apply(&self, common: &BuildConfig) -> OverlayOutcome {
        let mut warnings = Vec::new();
        if !self.flags.is_production {
            let warning = EnvironmentWarning::ProductionOverlayOutsideProduction;
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }

        let config = BuildConfig {
            mode: Mode::Production,
            devtool: if self.flags.is_debug {
                Devtool::SourceMap
            } else {
                Devtool::Disabled
            },
            optimization: Optimization {
                minimizer: vec![PluginDescriptor::Minifier(MinifierOptions::aggressive())],
            },
            ..common.clone()
        };

        OverlayOutcome { config, warnings }
    }
}
