//! Progress display module
//!
//! Styled status messages, the chunk progress bar and run statistics.
//! Everything here writes to stderr; stdout is reserved for the wordlist.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Kind of a status line, picks its marker and color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
    Item,
}

impl Status {
    fn marker(self) -> ColoredString {
        match self {
            Self::Info => "ℹ".cyan(),
            Self::Success => "✔".green(),
            Self::Warning => "⚠".yellow(),
            Self::Error => "✖".red(),
            Self::Item => "•".green(),
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::Success => text.green(),
            Self::Warning => text.yellow(),
            Self::Error => text.red(),
            Self::Info | Self::Item => text.normal(),
        }
    }
}

/// Print one status line to stderr
pub fn print_status(status: Status, text: &str) {
    eprintln!("  {} {}", status.marker(), status.paint(text));
}

/// Print a section title to stderr
pub fn print_section(title: &str) {
    eprintln!("\n{} {}", "▶".green(), title.green().bold());
}

/// Create a progress bar counting finished chunks
pub fn create_chunk_progress_bar(total_chunks: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total_chunks), ProgressDrawTarget::stderr());

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} chunks {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Run statistics
///
/// Workers update these once per finished chunk. Totals reported to the
/// caller come from the merged chunk outcomes, not from here.
#[derive(Debug)]
pub struct RunStats {
    pub input_bytes: AtomicU64,
    pub total_entries: AtomicU64,
    pub kept_entries: AtomicU64,
    pub rejected_entries: AtomicU64,
    pub total_chunks: AtomicU64,
    pub finished_chunks: AtomicU64,
    pub start_time: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            input_bytes: AtomicU64::new(0),
            total_entries: AtomicU64::new(0),
            kept_entries: AtomicU64::new(0),
            rejected_entries: AtomicU64::new(0),
            total_chunks: AtomicU64::new(0),
            finished_chunks: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn add_input(&self, entries: u64, bytes: u64) {
        self.total_entries.fetch_add(entries, Ordering::Relaxed);
        self.input_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn add_chunks(&self, count: u64) {
        self.total_chunks.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a finished chunk
    pub fn record_chunk(&self, kept: u64, rejected: u64) {
        self.kept_entries.fetch_add(kept, Ordering::Relaxed);
        self.rejected_entries.fetch_add(rejected, Ordering::Relaxed);
        self.finished_chunks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_input_bytes(&self) -> u64 {
        self.input_bytes.load(Ordering::Relaxed)
    }

    pub fn get_total_entries(&self) -> u64 {
        self.total_entries.load(Ordering::Relaxed)
    }

    pub fn get_kept_entries(&self) -> u64 {
        self.kept_entries.load(Ordering::Relaxed)
    }

    pub fn get_rejected_entries(&self) -> u64 {
        self.rejected_entries.load(Ordering::Relaxed)
    }

    pub fn get_total_chunks(&self) -> u64 {
        self.total_chunks.load(Ordering::Relaxed)
    }

    pub fn get_finished_chunks(&self) -> u64 {
        self.finished_chunks.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn entries_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_total_entries() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        let total = self.get_total_entries();
        let kept = self.get_kept_entries();
        let rejected = self.get_rejected_entries();

        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
        eprintln!("{}", "                      FILTERING COMPLETE".green().bold());
        eprintln!("{}", "═".repeat(60).green());
        eprintln!();

        eprintln!("  {} {}", "Input size:     ".green(), ByteSize(self.get_input_bytes()));
        eprintln!(
            "  {} {}/{}",
            "Chunks:         ".green(),
            self.get_finished_chunks(),
            self.get_total_chunks()
        );
        eprintln!();

        eprintln!("  {} {}", "Total entries:  ".green(), group_thousands(total));
        eprintln!("  {} {}", "Rejected:       ".yellow(), group_thousands(rejected));
        eprintln!(
            "  {} {}",
            "Kept:           ".green().bold(),
            group_thousands(kept).green().bold()
        );

        eprintln!();
        eprintln!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        eprintln!(
            "  {} {:.2} entries/sec",
            "Throughput:     ".green(),
            self.entries_per_second()
        );
        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Group digits by thousands, `1234567` -> `1,234,567`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let groups: Vec<&str> = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .filter_map(|group| std::str::from_utf8(group).ok())
        .collect();
    groups.join(",")
}

/// Short run duration, milliseconds below one second
pub fn format_duration(duration: Duration) -> String {
    match duration.as_secs() {
        0 => format!("{}ms", duration.as_millis()),
        secs @ 1..=59 => format!("{}.{}s", secs, duration.subsec_millis() / 100),
        secs @ 60..=3599 => format!("{}m {}s", secs / 60, secs % 60),
        secs => format!("{}h {}m", secs / 3600, (secs % 3600) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345678), "12,345,678");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(2350)), "2.3s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_stats() {
        let stats = RunStats::new();

        stats.add_input(10, 80);
        stats.add_chunks(2);
        stats.record_chunk(3, 2);
        stats.record_chunk(4, 1);

        assert_eq!(stats.get_total_entries(), 10);
        assert_eq!(stats.get_input_bytes(), 80);
        assert_eq!(stats.get_kept_entries(), 7);
        assert_eq!(stats.get_rejected_entries(), 3);
        assert_eq!(stats.get_finished_chunks(), stats.get_total_chunks());
    }
}
