use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{MIN_SNAPSHOTS_FOR_BAR, TICK_INTERVAL};
use crate::utils::string::pluralize;

const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {per_sec}";

/// Status reporting for interactive terminals
///
/// Shared across rayon workers, so every update takes `&self`.
pub struct ProgressReporter {
    term: Term,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            current_bar: None,
        }
    }

    /// A reporter when stderr is a terminal, `None` otherwise
    pub fn for_stderr() -> Option<Self> {
        if Term::stderr().is_term() {
            Some(Self::new())
        } else {
            None
        }
    }

    fn create_progress_bar(&self, len: u64, message: &str) -> Option<ProgressBar> {
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .ok()?
            .progress_chars("█▉▊▋▌▍▎▏ ");
        let pb = ProgressBar::new(len);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        Some(pb)
    }

    pub fn start_loading(&mut self, total: usize) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Analyzing {} {}...",
            style("🔍").cyan(),
            style(total).bold(),
            pluralize("snapshot", total)
        );
        if total >= MIN_SNAPSHOTS_FOR_BAR {
            self.current_bar = self.create_progress_bar(total as u64, "Detecting deadlocks");
        }
    }

    pub fn snapshot_analyzed(&self, name: &str) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Analyzed: {name}"));
            pb.inc(1);
        }
    }

    /// Remove the bar without a summary line
    pub fn clear(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    pub fn finish_loading(&mut self, deadlocked: usize, total: usize) {
        self.clear();
        if deadlocked == 0 {
            eprintln!(
                "{} No deadlocks in {} {}",
                style("✓").green().bold(),
                style(total).yellow().bold(),
                pluralize("snapshot", total)
            );
        } else {
            eprintln!(
                "{} Deadlock found in {} of {} {}",
                style("⚠").yellow().bold(),
                style(deadlocked).red().bold(),
                style(total).yellow().bold(),
                pluralize("snapshot", total)
            );
        }
    }
}
