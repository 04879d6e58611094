//! CLI output formatting for build and check runs.
//!
//! Output is a catalog inventory: each system leads with its name, followed
//! by its page and its entries, with the generated URL as context.
//!
//! ```text
//! NES (nes)
//!     Page → /systems/nes/
//!     001 FCEUX - Emulator (2002) → /systems/nes/fceux.html
//!         no Info.txt
//!     002 Super Mario Bros (1985) ⭐ 5 → /systems/nes/super-mario-bros.html
//!         2 screenshots
//! Sega Genesis (genesis)
//!     001 Sonic the Hedgehog (1991) → /systems/sega-genesis/sonic-the-hedgehog.html
//!
//! Skipped
//!     Sega Genesis system page: no Info/Info.txt
//!
//! Generated 1 system page, 2 entry pages, sitemap with 4 URLs
//! ```
//!
//! Each `format_*` function returns lines for testability; `print_*` writes
//! them to stdout.

use crate::pipeline::{BuildReport, EntryReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn entry_lines(index: usize, entry: &EntryReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{}{} {} → {}",
        indent(1),
        format_index(index),
        entry.title,
        entry.url
    )];
    if entry.screenshots > 0 {
        lines.push(format!("{}{}", indent(2), plural(entry.screenshots, "screenshot")));
    }
    if !entry.has_description {
        lines.push(format!("{}no Info.txt", indent(2)));
    }
    lines
}

/// Format the per-system inventory, skipped items, and totals.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    for system in &report.systems {
        lines.push(format!("{} ({})", system.name, system.dir));
        if let Some(url) = &system.page {
            lines.push(format!("{}Page → {}", indent(1), url));
        }
        for (i, entry) in system.entries.iter().enumerate() {
            lines.extend(entry_lines(i + 1, entry));
        }
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &report.skipped {
            lines.push(format!("{}{}: {}", indent(1), skipped.what, skipped.reason));
        }
    }

    lines.push(String::new());
    lines.push(format_summary(report));
    lines
}

/// One-line totals.
pub fn format_summary(report: &BuildReport) -> String {
    let mut summary = format!(
        "Generated {}, {}, sitemap with {}",
        plural(report.system_pages(), "system page"),
        plural(report.entry_pages(), "entry page"),
        plural(report.sitemap_entries, "URL"),
    );
    if report.static_files > 0 {
        summary.push_str(&format!(", {}", plural(report.static_files, "static file")));
    }
    summary
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
