//! Reporter capability and the decorators the logging adapter wraps around it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::build::LoggingOptions;
use crate::lifecycle::{BuildStats, Hooks, Progress};

/// Console integration driven by build lifecycle events.
///
/// All methods default to no-ops so implementors pick what they display.
pub trait Reporter: Send {
    /// A compilation started.
    fn on_start(&mut self) {}

    fn on_progress(&mut self, _progress: &Progress) {}

    fn on_success(&mut self, _stats: &BuildStats) {}

    fn on_error(&mut self, _stats: &BuildStats) {}

    /// Free-form informational line.
    fn info(&mut self, _message: &str) {}
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn on_start(&mut self) {
        (**self).on_start()
    }

    fn on_progress(&mut self, progress: &Progress) {
        (**self).on_progress(progress)
    }

    fn on_success(&mut self, stats: &BuildStats) {
        (**self).on_success(stats)
    }

    fn on_error(&mut self, stats: &BuildStats) {
        (**self).on_error(stats)
    }

    fn info(&mut self, message: &str) {
        (**self).info(message)
    }
}

/// Creates the reporters the logging adapter attaches.
pub trait ReporterFactory: Send + Sync {
    /// Progress display, attached for every build.
    fn progress_reporter(&self) -> Box<dyn Reporter>;

    /// Error/success summary, attached in watch mode only.
    fn summary_reporter(&self) -> Box<dyn Reporter>;
}

/// Drops progress updates once the build is done.
///
/// The gate re-opens when the next compilation starts.
pub struct DoneGate<R> {
    inner: R,
    done: bool,
}

impl<R: Reporter> DoneGate<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, done: false }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<R: Reporter> Reporter for DoneGate<R> {
    fn on_start(&mut self) {
        self.done = false;
        self.inner.on_start();
    }

    fn on_progress(&mut self, progress: &Progress) {
        if !self.done {
            self.inner.on_progress(progress);
        }
    }

    fn on_success(&mut self, stats: &BuildStats) {
        self.done = true;
        self.inner.on_success(stats);
    }

    fn on_error(&mut self, stats: &BuildStats) {
        self.done = true;
        self.inner.on_error(stats);
    }

    fn info(&mut self, message: &str) {
        self.inner.info(message);
    }
}

/// Prints where the servers listen before every summary.
pub struct ServerBanner<R> {
    inner: R,
    lines: [String; 2],
}

impl<R: Reporter> ServerBanner<R> {
    pub fn new(inner: R, options: &LoggingOptions) -> Self {
        Self {
            inner,
            lines: [
                format!(
                    "Live reload proxy running at: {} and ui: {}",
                    options.proxy_url, options.ui_url
                ),
                format!("Main app running at: {}", options.dev_server_url),
            ],
        }
    }

    fn announce(&mut self) {
        for line in &self.lines {
            self.inner.info(line);
        }
    }
}

impl<R: Reporter> Reporter for ServerBanner<R> {
    fn on_start(&mut self) {
        self.inner.on_start();
    }

    fn on_progress(&mut self, progress: &Progress) {
        self.inner.on_progress(progress);
    }

    fn on_success(&mut self, stats: &BuildStats) {
        self.announce();
        self.inner.on_success(stats);
    }

    fn on_error(&mut self, stats: &BuildStats) {
        self.announce();
        self.inner.on_error(stats);
    }

    fn info(&mut self, message: &str) {
        self.inner.info(message);
    }
}

/// Wire `reporter` to the compile, progress and done hooks under `name`.
pub fn attach_reporter(hooks: &mut Hooks, name: &str, reporter: Box<dyn Reporter>) {
    let reporter = Arc::new(Mutex::new(reporter));

    let r = Arc::clone(&reporter);
    hooks.tap_compile(name, move || r.lock().on_start());

    let r = Arc::clone(&reporter);
    hooks.tap_progress(name, move |progress| r.lock().on_progress(progress));

    hooks.tap_done(name, move |stats| {
        let mut reporter = reporter.lock();
        if stats.has_errors() {
            reporter.on_error(stats);
        } else {
            reporter.on_success(stats);
        }
    });
}
