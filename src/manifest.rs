//! The tab-separated manifest: header, one row per hashed file, and the short
//! preview echoed after a run.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::hash::Digests;
use crate::scan::FileEntry;

pub const HEADER: &str = "MD5\tSHA1\tBytes\tFilename";

/// Lines echoed by the post-run preview, header included.
pub const PREVIEW_LINES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub md5: String,
    pub sha1: String,
    pub len: u64,
    pub display_name: String,
}

impl ManifestRow {
    pub fn new(entry: &FileEntry, digests: Digests, full_paths: bool) -> Self {
        let display_name = if full_paths {
            entry.path.display().to_string()
        } else {
            entry.name.clone()
        };
        ManifestRow {
            md5: digests.md5,
            sha1: digests.sha1,
            len: entry.len,
            display_name,
        }
    }
}

impl std::fmt::Display for ManifestRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.md5, self.sha1, self.len, self.display_name
        )
    }
}

/// Creates (truncating) the manifest and writes the header. Every row is
/// flushed as it is written so a failed run leaves the completed rows behind.
pub struct ManifestWriter {
    path: PathBuf,
    out: BufWriter<File>,
    rows: usize,
}

impl ManifestWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::file_access(path, e))?;
        let mut writer = ManifestWriter {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            rows: 0,
        };
        writer.write_line(HEADER)?;
        Ok(writer)
    }

    pub fn write_row(&mut self, row: &ManifestRow) -> Result<()> {
        self.write_line(&row.to_string())?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}")
            .and_then(|_| self.out.flush())
            .map_err(|e| Error::file_access(&self.path, e))
    }
}

/// The first lines of a written manifest and how many lines follow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPreview {
    pub lines: Vec<String>,
    pub remaining: usize,
}

pub fn preview_manifest(path: &Path, max_lines: usize) -> Result<ManifestPreview> {
    let file = File::open(path).map_err(|e| Error::file_access(path, e))?;
    let mut preview = ManifestPreview {
        lines: Vec::with_capacity(max_lines),
        remaining: 0,
    };
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::file_access(path, e))?;
        if preview.lines.len() < max_lines {
            preview.lines.push(line);
        } else {
            preview.remaining += 1;
        }
    }
    Ok(preview)
}
