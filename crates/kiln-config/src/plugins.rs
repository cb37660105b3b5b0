//! In-process plugins built from configuration descriptors.

use std::sync::Arc;

use crate::build::{BuildConfig, PluginDescriptor};
use crate::lifecycle::Hooks;
use crate::logging::{LoggingAdapter, ReporterFactory};

/// Plugin executed inside this process, registering lifecycle hooks.
pub trait BuildPlugin: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, hooks: &mut Hooks);
}

/// Instantiate the descriptors of `config` that run in-process.
///
/// Only the logging adapter has in-process behavior; the other descriptors
/// are carried by the serialized config to the external bundler. Fresh
/// instances are created on every call, so every build run gets its own
/// one-shot state.
pub fn instantiate(
    config: &BuildConfig,
    factory: Arc<dyn ReporterFactory>,
) -> Vec<Box<dyn BuildPlugin>> {
    config
        .plugins
        .iter()
        .filter_map(|descriptor| match descriptor {
            PluginDescriptor::LoggingAdapter(options) => Some(Box::new(LoggingAdapter::new(
                options.clone(),
                Arc::clone(&factory),
            )) as Box<dyn BuildPlugin>),
            _ => None,
        })
        .collect()
}

/// Instantiate the in-process plugins of `config` and apply them to `hooks`.
pub fn apply_plugins(
    config: &BuildConfig,
    factory: Arc<dyn ReporterFactory>,
    hooks: &mut Hooks,
) -> Vec<Box<dyn BuildPlugin>> {
    let plugins = instantiate(config, factory);
    for plugin in &plugins {
        tracing::debug!("Applying plugin {}", plugin.name());
        plugin.apply(hooks);
    }
    plugins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TerminalReporters;
    use crate::{AliasMap, Composer, EnvironmentFlags, ProjectRoot, ProjectSettings};

    #[test]
    fn only_logging_adapter_runs_in_process() {
        let root = ProjectRoot::new("/proj").unwrap();
        let flags = EnvironmentFlags {
            is_analyze: true,
            ..EnvironmentFlags::default()
        };
        let config =
            Composer::new(root, AliasMap::new(), flags, ProjectSettings::default()).compose();

        let plugins = instantiate(&config, Arc::new(TerminalReporters::new(false)));
        let names: Vec<_> = plugins.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["logging"]);
    }
}
