use std::path::{Path, PathBuf};

use crate::error::{Error, HashError, Result};
use crate::hash::hash_file;
use crate::manifest::{
    preview_manifest, ManifestPreview, ManifestRow, ManifestWriter, PREVIEW_LINES,
};
use crate::mask::FileMask;
use crate::scan::{absolute, find_files, FileEntry};

/// Options for one run, fixed before anything is scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mask: String,
    pub recurse: bool,
    pub output: PathBuf,
    pub full_paths: bool,
    pub preview: bool,
}

/// Receives progress from [`run`]. The runner never prints on its own.
pub trait Reporter {
    fn searching(&mut self, mask: &FileMask, recurse: bool);

    /// Preview mode: one call per matching file, nothing is hashed.
    fn matched(&mut self, entry: &FileEntry);

    fn started(&mut self, total: usize, output: &Path);

    /// Called once per matched file after it has been handled.
    fn progress(&mut self, done: usize, total: usize, entry: &FileEntry);

    /// The file disappeared between enumeration and hashing; no row was written.
    fn skipped(&mut self, entry: &FileEntry, err: &HashError);

    fn finished(&mut self, summary: &RunSummary, preview: &ManifestPreview);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub skipped: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Previewed { files: usize },
    Hashed(RunSummary),
}

pub fn percent_complete(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    done as f64 / total as f64 * 100.0
}

pub fn run(config: &Config, reporter: &mut dyn Reporter) -> Result<Outcome> {
    let span = tracing::info_span!("run", mask = %config.mask, recurse = config.recurse);
    let _guard = span.enter();

    let mask = FileMask::parse(&config.mask);
    if mask.trailing_separator {
        tracing::info!(
            dir = %mask.dir.display(),
            "mask ended in a separator; processing all files"
        );
    }
    reporter.searching(&mask, config.recurse);

    let files = find_files(&mask, config.recurse)?;
    if files.is_empty() {
        return Err(Error::NoFilesFound {
            mask: mask.pattern.clone(),
            dir: absolute(&mask.dir)?,
            recurse: config.recurse,
        });
    }

    if config.preview {
        for entry in &files {
            reporter.matched(entry);
        }
        return Ok(Outcome::Previewed { files: files.len() });
    }

    let mut writer = ManifestWriter::create(&config.output)?;
    let output = std::fs::canonicalize(&config.output)
        .map_err(|e| Error::file_access(&config.output, e))?;

    let total = files.len();
    reporter.started(total, &config.output);

    let mut summary = RunSummary {
        output: config.output.clone(),
        rows: 0,
        skipped: 0,
        bytes: 0,
    };
    for (i, entry) in files.iter().enumerate() {
        if is_output_file(entry, &output) {
            tracing::debug!(path = %entry.path.display(), "skipping the manifest itself");
            summary.skipped += 1;
            reporter.progress(i + 1, total, entry);
            continue;
        }
        match hash_file(&entry.path) {
            Ok(digests) => {
                tracing::debug!(path = %entry.path.display(), md5 = %digests.md5, "hashed");
                writer.write_row(&ManifestRow::new(entry, digests, config.full_paths))?;
                summary.bytes += entry.len;
            }
            Err(err @ HashError::FileNotFound { .. }) => {
                tracing::warn!(
                    path = %entry.path.display(),
                    "file vanished before it could be hashed"
                );
                reporter.skipped(entry, &err);
                summary.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
        reporter.progress(i + 1, total, entry);
    }
    summary.rows = writer.rows();
    drop(writer);

    tracing::info!(
        rows = summary.rows,
        skipped = summary.skipped,
        bytes = summary.bytes,
        "manifest written"
    );
    let preview = preview_manifest(&config.output, PREVIEW_LINES)?;
    reporter.finished(&summary, &preview);
    Ok(Outcome::Hashed(summary))
}

fn is_output_file(entry: &FileEntry, output: &Path) -> bool {
    if output.file_name() != entry.path.file_name() {
        return false;
    }
    std::fs::canonicalize(&entry.path).is_ok_and(|p| p == output)
}
