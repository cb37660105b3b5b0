//! Console integration of the build lifecycle.
//!
//! [`LoggingAdapter`] is the in-process side of the `logging` plugin
//! descriptor. Applied to a [`Hooks`] registry it:
//!
//! 1. swallows infrastructure log lines from the dev server, so its startup
//!    banner never reaches the terminal;
//! 2. on the first `watch_run` or `before_run`, whichever fires first,
//!    attaches a progress reporter that goes quiet once the build is done;
//! 3. in watch mode only, also attaches a summary reporter that prints the
//!    proxy and dev-server URLs before each error or success summary.
//!
//! Later `watch_run`/`before_run` events are no-ops.

mod reporter;
mod terminal;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use reporter::{attach_reporter, DoneGate, Reporter, ReporterFactory, ServerBanner};
pub use terminal::{TerminalProgress, TerminalReporters, TerminalSummary};

use crate::build::LoggingOptions;
use crate::lifecycle::Hooks;
use crate::plugins::BuildPlugin;

pub const PLUGIN_NAME: &str = "logging";

pub struct LoggingAdapter {
    options: Arc<LoggingOptions>,
    factory: Arc<dyn ReporterFactory>,
    attached: Arc<AtomicBool>,
}

impl LoggingAdapter {
    pub fn new(options: LoggingOptions, factory: Arc<dyn ReporterFactory>) -> Self {
        Self {
            options: Arc::new(options),
            factory,
            attached: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the reporters have been attached during this build run.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn attacher(&self) -> Attacher {
        Attacher {
            options: Arc::clone(&self.options),
            factory: Arc::clone(&self.factory),
            attached: Arc::clone(&self.attached),
        }
    }
}

impl BuildPlugin for LoggingAdapter {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn apply(&self, hooks: &mut Hooks) {
        let source = self.options.suppressed_log_source.clone();
        hooks.tap_infrastructure_log(PLUGIN_NAME, move |name, _, _| name == source);

        let watch = self.attacher();
        hooks.tap_watch_run(PLUGIN_NAME, move |hooks| watch.attach(hooks, true));

        let run = self.attacher();
        hooks.tap_before_run(PLUGIN_NAME, move |hooks| run.attach(hooks, false));
    }
}

struct Attacher {
    options: Arc<LoggingOptions>,
    factory: Arc<dyn ReporterFactory>,
    attached: Arc<AtomicBool>,
}

impl Attacher {
    fn attach(&self, hooks: &mut Hooks, watching: bool) {
        if self.attached.swap(true, Ordering::SeqCst) {
            return;
        }

        // Gate state exists before any hook can fire.
        let progress = DoneGate::new(self.factory.progress_reporter());
        attach_reporter(hooks, "logging:progress", Box::new(progress));

        if watching {
            let summary = ServerBanner::new(self.factory.summary_reporter(), &self.options);
            attach_reporter(hooks, "logging:summary", Box::new(summary));
        }

        tracing::debug!(watching, "Attached build reporters");
    }
}
