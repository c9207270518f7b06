//! Console output for a run: search banner, progress, result preview and
//! boxed error messages.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{IsTerminal, Write};
use std::path::Path;

use crate::error::HashError;
use crate::manifest::ManifestPreview;
use crate::mask::FileMask;
use crate::runner::{percent_complete, Reporter, RunSummary};
use crate::scan::FileEntry;

const SEPARATOR: &str =
    "------------------------------------------------------------------------------";

pub fn search_message(mask: &FileMask, recurse: bool) -> String {
    let mut msg = format!("Looking for files matching {}", mask.pattern);
    if mask.is_current_dir() {
        msg.push_str(" in the current directory");
    } else {
        msg.push_str(&format!(" in folder {}", mask.dir.display()));
    }
    if recurse {
        msg.push_str(" and its subdirectories");
    }
    msg
}

pub fn progress_line(done: usize, total: usize, name: &str) -> String {
    format!("{:.1}%: {}", percent_complete(done, total), name)
}

pub fn remaining_line(remaining: usize) -> String {
    format!("...plus {remaining} others")
}

/// Writes `message` boxed between separator lines.
pub fn write_error<W: Write>(out: &mut W, message: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "{message}")?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)
}

/// Prints an error between separator lines on stdout and echoes it to stderr.
pub fn show_error(message: &str) -> std::io::Result<()> {
    write_error(&mut std::io::stdout().lock(), message)?;
    writeln!(std::io::stderr(), "{message}")
}

/// Reporter that draws an indicatif bar on a terminal and plain percentage
/// lines otherwise.
pub struct ConsoleReporter {
    bar: Option<ProgressBar>,
    interactive: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        ConsoleReporter {
            bar: None,
            interactive: std::io::stdout().is_terminal(),
        }
    }

    fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn searching(&mut self, mask: &FileMask, recurse: bool) {
        println!("{}", search_message(mask, recurse));
    }

    fn matched(&mut self, entry: &FileEntry) {
        println!("{}", entry.path.display());
    }

    fn started(&mut self, total: usize, output: &Path) {
        println!("Writing checksums to {}", output.display());
        if !self.interactive {
            return;
        }
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
        if let Ok(style) = ProgressStyle::with_template("[{bar:40}] {pos}/{len} {wide_msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        self.bar = Some(bar);
    }

    fn progress(&mut self, done: usize, total: usize, entry: &FileEntry) {
        let line = progress_line(done, total, &entry.name);
        match &self.bar {
            Some(bar) => {
                bar.set_position(done as u64);
                bar.set_message(line);
            }
            None => println!("{line}"),
        }
    }

    fn skipped(&mut self, entry: &FileEntry, err: &HashError) {
        self.println(&format!("Skipped {}: {err}", entry.path.display()));
    }

    fn finished(&mut self, summary: &RunSummary, preview: &ManifestPreview) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        println!();
        println!(
            "Wrote {} rows to {}",
            summary.rows,
            summary.output.display()
        );
        println!();
        for line in &preview.lines {
            println!("{line}");
        }
        if preview.remaining > 0 {
            println!("{}", remaining_line(preview.remaining));
        }
    }
}
