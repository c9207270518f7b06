use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::mask::FileMask;

/// A matched file, captured at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path.
    pub path: PathBuf,
    pub name: String,
    pub len: u64,
}

/// Lists the regular files under `mask.dir` whose names match `mask.pattern`,
/// sorted by name within each directory. Symlinks are followed; a dangling
/// link or a directory loop is logged and left out.
pub fn find_files(mask: &FileMask, recurse: bool) -> Result<Vec<FileEntry>> {
    let matcher = mask.matcher()?;
    let root = absolute(&mask.dir)?;
    if !root.is_dir() {
        return Err(Error::file_access(
            &root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
        ));
    }

    let mut walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if !recurse {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_dangling_or_loop(&e) => {
                tracing::warn!(error = %e, "skipping unreachable link");
                continue;
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                return Err(Error::file_access(path, e.into()));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !matcher.matches(&name) {
            continue;
        }
        let len = entry
            .metadata()
            .map_err(|e| Error::file_access(entry.path(), e.into()))?
            .len();
        files.push(FileEntry {
            path: entry.into_path(),
            name,
            len,
        });
    }
    tracing::debug!(dir = %root.display(), count = files.len(), "enumerated files");
    Ok(files)
}

fn is_dangling_or_loop(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::file_access(path, e))
}
