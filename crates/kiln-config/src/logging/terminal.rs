//! Terminal implementations of the reporters.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use super::reporter::{Reporter, ReporterFactory};
use crate::lifecycle::{BuildStats, Progress};

/// Progress bar on stderr.
///
/// The bar is created up front; when output is not attended it is hidden
/// and every update is a no-op.
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(100)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        Self { bar }
    }
}

impl Reporter for TerminalProgress {
    fn on_start(&mut self) {
        self.bar.reset();
        self.bar.set_message("compiling".dimmed().to_string());
    }

    fn on_progress(&mut self, progress: &Progress) {
        self.bar.set_position((progress.percentage * 100.0).round() as u64);
        self.bar.set_message(progress.message.dimmed().to_string());
    }

    fn on_success(&mut self, stats: &BuildStats) {
        self.bar.set_position(100);
        self.bar.finish_with_message(format!(
            "{} Compiled in {}",
            "✓".green(),
            format_duration(stats.duration)
        ));
    }

    fn on_error(&mut self, _stats: &BuildStats) {
        self.bar
            .abandon_with_message(format!("{} Compiled with errors", "✗".red()));
    }

    fn info(&mut self, message: &str) {
        self.bar.println(format!("{} {}", "ℹ".blue().bold(), message));
    }
}

/// Error/success summary on stderr.
#[derive(Debug, Default)]
pub struct TerminalSummary;

impl Reporter for TerminalSummary {
    fn on_success(&mut self, stats: &BuildStats) {
        eprintln!(
            "{} Compiled successfully in {}",
            " DONE ".black().on_green(),
            format_duration(stats.duration)
        );
        for warning in &stats.warnings {
            eprintln!("{} {}", "⚠".yellow().bold(), warning.yellow());
        }
    }

    fn on_error(&mut self, stats: &BuildStats) {
        eprintln!(
            "{} Failed to compile with {} error{}",
            " ERROR ".white().on_red(),
            stats.errors.len(),
            if stats.errors.len() == 1 { "" } else { "s" }
        );
        for error in &stats.errors {
            eprintln!("{} {}", "✗".red().bold(), error);
        }
    }

    fn info(&mut self, message: &str) {
        eprintln!("{} {}", " I ".black().on_cyan(), message);
    }
}

/// Factory wiring the terminal reporters.
#[derive(Debug, Clone, Copy)]
pub struct TerminalReporters {
    show_progress: bool,
}

impl TerminalReporters {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }

    /// Show progress only for an attended terminal outside CI.
    pub fn detect() -> Self {
        Self::new(console::user_attended_stderr() && !is_ci())
    }
}

impl ReporterFactory for TerminalReporters {
    fn progress_reporter(&self) -> Box<dyn Reporter> {
        Box::new(TerminalProgress::new(self.show_progress))
    }

    fn summary_reporter(&self) -> Box<dyn Reporter> {
        Box::new(TerminalSummary)
    }
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_switches_units() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn detect_hides_progress_in_ci() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CI", "true");
            assert!(is_ci());
            assert!(!TerminalReporters::detect().show_progress);
            Ok(())
        });
    }

    #[test]
    fn hidden_progress_accepts_updates() {
        let mut progress = TerminalProgress::new(false);
        progress.on_start();
        progress.on_progress(&Progress::new(0.4, "modules"));
        progress.on_success(&BuildStats::success(Duration::from_millis(12)));
        progress.info("hello");
    }
}
