//! Terminal rendering: migration progress and the final failure lists.

use calmove_core::{Event, MigrationReport};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

pub fn create_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{pos}/{len} ({percent}%) {bar:40}")
            .unwrap(),
    );
    bar
}

pub fn print_summary(report: &MigrationReport, total: usize) {
    println!("\nMigrated {} of {} events.", report.migrated, total);

    if !report.copy_failed.is_empty() {
        println!(
            "{}",
            format!("{} events failed to copy:", report.copy_failed.len()).red()
        );
        print_event_lines(&report.copy_failed);
    }

    if !report.delete_failed.is_empty() {
        println!(
            "{}",
            format!("{} events failed to delete:", report.delete_failed.len()).red()
        );
        print_event_lines(&report.delete_failed);
    }
}

/// One line per event: start timestamp and start date, tab-separated,
/// whichever applies filled in.
fn print_event_lines(events: &[Event]) {
    for event in events {
        let (date_time, date) = event.start_parts();
        println!("{date_time}\t{date}");
    }
}
