//! Lifecycle hook registry driven by the bundler runtime.
//!
//! Plugins register callbacks with the `tap_*` methods; the runtime fires the
//! matching `call_*` method at each lifecycle point. Callbacks run
//! synchronously, in registration order.
//!
//! `before_run` and `watch_run` callbacks receive the registry itself so they
//! can attach further integrations lazily. Taps added while a hook is being
//! called start firing from the next call of that hook.

use std::fmt;
use std::time::Duration;

/// Hook identifiers, used for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    BeforeRun,
    WatchRun,
    Compile,
    Progress,
    Done,
    InfrastructureLog,
}

/// Severity of an infrastructure log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Error,
    Warn,
    Info,
    Log,
    Debug,
}

/// Periodic progress update
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// 0.0 ..= 1.0
    pub percentage: f32,
    pub message: String,
}

impl Progress {
    pub fn new(percentage: f32, message: impl Into<String>) -> Self {
        Self {
            percentage: percentage.clamp(0.0, 1.0),
            message: message.into(),
        }
    }
}

/// Outcome of one compilation.
///
/// Error and warning messages come from the external tools verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildStats {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub duration: Duration,
}

impl BuildStats {
    pub fn success(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn failure(errors: Vec<String>, duration: Duration) -> Self {
        Self {
            errors,
            warnings: Vec::new(),
            duration,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

type RunFn = dyn FnMut(&mut Hooks) + Send;
type CompileFn = dyn FnMut() + Send;
type ProgressFn = dyn FnMut(&Progress) + Send;
type DoneFn = dyn FnMut(&BuildStats) + Send;
type LogFn = dyn FnMut(&str, LogType, &[String]) -> bool + Send;

struct Tap<F: ?Sized> {
    name: String,
    callback: Box<F>,
}

impl<F: ?Sized> Tap<F> {
    fn new(name: &str, callback: Box<F>) -> Self {
        Self {
            name: name.to_string(),
            callback,
        }
    }
}

#[derive(Default)]
pub struct Hooks {
    before_run: Vec<Tap<RunFn>>,
    watch_run: Vec<Tap<RunFn>>,
    compile: Vec<Tap<CompileFn>>,
    progress: Vec<Tap<ProgressFn>>,
    done: Vec<Tap<DoneFn>>,
    infrastructure_log: Vec<Tap<LogFn>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired before a one-off build starts.
    pub fn tap_before_run(&mut self, name: &str, f: impl FnMut(&mut Hooks) + Send + 'static) {
        self.before_run.push(Tap::new(name, Box::new(f)));
    }

    /// Fired before every compilation in watch mode.
    pub fn tap_watch_run(&mut self, name: &str, f: impl FnMut(&mut Hooks) + Send + 'static) {
        self.watch_run.push(Tap::new(name, Box::new(f)));
    }

    /// Fired when a compilation starts.
    pub fn tap_compile(&mut self, name: &str, f: impl FnMut() + Send + 'static) {
        self.compile.push(Tap::new(name, Box::new(f)));
    }

    pub fn tap_progress(&mut self, name: &str, f: impl FnMut(&Progress) + Send + 'static) {
        self.progress.push(Tap::new(name, Box::new(f)));
    }

    pub fn tap_done(&mut self, name: &str, f: impl FnMut(&BuildStats) + Send + 'static) {
        self.done.push(Tap::new(name, Box::new(f)));
    }

    /// Intercept infrastructure log lines.
    ///
    /// Returning `true` marks the line as handled: later taps are skipped and
    /// the runtime does not print it.
    pub fn tap_infrastructure_log(
        &mut self,
        name: &str,
        f: impl FnMut(&str, LogType, &[String]) -> bool + Send + 'static,
    ) {
        self.infrastructure_log.push(Tap::new(name, Box::new(f)));
    }

    pub fn call_before_run(&mut self) {
        self.call_run_hook(before_run_taps);
    }

    pub fn call_watch_run(&mut self) {
        self.call_run_hook(watch_run_taps);
    }

    pub fn call_compile(&mut self) {
        for tap in &mut self.compile {
            (tap.callback)();
        }
    }

    pub fn call_progress(&mut self, progress: &Progress) {
        for tap in &mut self.progress {
            (tap.callback)(progress);
        }
    }

    pub fn call_done(&mut self, stats: &BuildStats) {
        for tap in &mut self.done {
            (tap.callback)(stats);
        }
    }

    /// Returns `true` when a tap handled (swallowed) the line.
    pub fn call_infrastructure_log(&mut self, source: &str, ty: LogType, args: &[String]) -> bool {
        self.infrastructure_log
            .iter_mut()
            .any(|tap| (tap.callback)(source, ty, args))
    }

    /// Names of the taps registered on `hook`, in firing order.
    pub fn taps(&self, hook: Hook) -> Vec<&str> {
        fn names<F: ?Sized>(taps: &[Tap<F>]) -> Vec<&str> {
            taps.iter().map(|t| t.name.as_str()).collect()
        }

        match hook {
            Hook::BeforeRun => names(&self.before_run),
            Hook::WatchRun => names(&self.watch_run),
            Hook::Compile => names(&self.compile),
            Hook::Progress => names(&self.progress),
            Hook::Done => names(&self.done),
            Hook::InfrastructureLog => names(&self.infrastructure_log),
        }
    }

    fn call_run_hook(&mut self, field: fn(&mut Hooks) -> &mut Vec<Tap<RunFn>>) {
        let mut taps = std::mem::take(field(self));
        for tap in &mut taps {
            (tap.callback)(self);
        }
        let added = std::mem::replace(field(self), taps);
        field(self).extend(added);
    }
}

fn before_run_taps(hooks: &mut Hooks) -> &mut Vec<Tap<RunFn>> {
    &mut hooks.before_run
}

fn watch_run_taps(hooks: &mut Hooks) -> &mut Vec<Tap<RunFn>> {
    &mut hooks.watch_run
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_run", &self.taps(Hook::BeforeRun))
            .field("watch_run", &self.taps(Hook::WatchRun))
            .field("compile", &self.taps(Hook::Compile))
            .field("progress", &self.taps(Hook::Progress))
            .field("done", &self.taps(Hook::Done))
            .field("infrastructure_log", &self.taps(Hook::InfrastructureLog))
            .finish()
    }
}
