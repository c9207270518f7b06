use std::path::PathBuf;

/// Errors produced while hashing a single file.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end a checksum run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Argument(String),

    #[error(
        "did not find any files matching {mask} in {}{}",
        .dir.display(),
        subfolder_suffix(.recurse)
    )]
    NoFilesFound {
        mask: String,
        dir: PathBuf,
        recurse: bool,
    },

    #[error("error accessing {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Argument(_) | Error::Unexpected(_) => -1,
            Error::NoFilesFound { .. } | Error::FileAccess { .. } => -2,
        }
    }
}

impl From<HashError> for Error {
    fn from(err: HashError) -> Self {
        match err {
            HashError::FileNotFound { path } => Error::file_access(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            ),
            HashError::Io { path, source } => Error::FileAccess { path, source },
        }
    }
}

fn subfolder_suffix(recurse: &bool) -> &'static str {
    if *recurse {
        " or its subfolders"
    } else {
        ""
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(Error::Argument("bad".into()).exit_code(), -1);
        assert_eq!(Error::Unexpected("boom".into()).exit_code(), -1);
        let none = Error::NoFilesFound {
            mask: "*.xyz".into(),
            dir: PathBuf::from("/tmp"),
            recurse: false,
        };
        assert_eq!(none.exit_code(), -2);
        let access = Error::file_access("/tmp/x", std::io::Error::other("denied"));
        assert_eq!(access.exit_code(), -2);
    }

    #[test]
    fn no_files_message_mentions_subfolders_when_recursing() {
        let err = Error::NoFilesFound {
            mask: "*.raw".into(),
            dir: PathBuf::from("data"),
            recurse: true,
        };
        assert_eq!(
            err.to_string(),
            "did not find any files matching *.raw in data or its subfolders"
        );
    }
}
