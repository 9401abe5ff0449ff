//! Progress bar for multi-archive diagnose runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;

/// Progress bar counting diagnosed archives.
///
/// Only meaningful when stdout is a TTY. The bar is cleared on drop so the
/// report output that follows is not interleaved with it.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Creates a new progress bar for `total` archives.
    #[must_use]
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);

        // Template: "Diagnosing [████████░░░░] 3/8 archives (addon.zip)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("Diagnosing [{bar:40.cyan/blue}] {pos}/{len} archives ({msg})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    /// Marks one archive as diagnosed.
    pub fn archive_done(&self, path: &Path) {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.bar.set_message(name);
        self.bar.inc(1);
    }
}

impl Drop for BatchProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts_archives() {
        let progress = BatchProgress::new(2);
        progress.archive_done(Path::new("dist/a.zip"));
        progress.archive_done(Path::new("b.zip"));
        assert_eq!(progress.bar.position(), 2);
    }
}
