//! Splitting a user-supplied mask such as `data/*.raw` into the directory to
//! search and the file-name pattern to match there.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const MATCH_ALL: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMask {
    /// Directory searched for matches, `.` when the mask had no directory part.
    pub dir: PathBuf,
    /// File-name pattern, `*` and `?` are the only wildcards.
    pub pattern: String,
    /// The mask ended in a separator, so every file in `dir` is selected.
    pub trailing_separator: bool,
}

fn is_separator(c: char) -> bool {
    c == '\\' || std::path::is_separator(c)
}

pub fn has_wildcards(s: &str) -> bool {
    s.contains(['*', '?'])
}

impl FileMask {
    pub fn parse(mask: &str) -> FileMask {
        let (dir, pattern, trailing_separator) = match mask.rfind(is_separator) {
            Some(idx) => {
                let dir = if idx == 0 { &mask[..1] } else { &mask[..idx] };
                let rest = &mask[idx + 1..];
                if rest.is_empty() {
                    (PathBuf::from(dir), MATCH_ALL.to_string(), true)
                } else {
                    (PathBuf::from(dir), rest.to_string(), false)
                }
            }
            None => (PathBuf::from("."), mask.to_string(), false),
        };

        if !has_wildcards(&pattern) {
            let candidate = dir.join(&pattern);
            if candidate.is_dir() {
                return FileMask {
                    dir: candidate,
                    pattern: MATCH_ALL.to_string(),
                    trailing_separator,
                };
            }
        }

        FileMask {
            dir,
            pattern,
            trailing_separator,
        }
    }

    pub fn is_current_dir(&self) -> bool {
        self.dir == Path::new(".")
    }

    /// Compiles the pattern. Brackets are literal and a run of `*` acts as a
    /// single `*`, as in a shell-style mask.
    pub fn matcher(&self) -> Result<NameMatcher> {
        let mut escaped = String::with_capacity(self.pattern.len());
        for c in self.pattern.chars() {
            match c {
                '[' => escaped.push_str("[[]"),
                ']' => escaped.push_str("[]]"),
                '*' if escaped.ends_with('*') => {}
                _ => escaped.push(c),
            }
        }
        let pattern = Pattern::new(&escaped)
            .map_err(|e| Error::Argument(format!("invalid file mask {}: {e}", self.pattern)))?;
        Ok(NameMatcher { pattern })
    }
}

/// Matches bare file names against a compiled mask.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    pattern: Pattern,
}

impl NameMatcher {
    pub fn matches(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: !cfg!(windows),
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.pattern.matches_with(name, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_pattern_searches_current_dir() {
        let m = FileMask::parse("*.txt");
        assert_eq!(m.dir, PathBuf::from("."));
        assert_eq!(m.pattern, "*.txt");
        assert!(m.is_current_dir());
    }

    #[test]
    fn splits_on_last_separator_of_either_kind() {
        let m = FileMask::parse("data/raw/*.raw");
        assert_eq!(m.dir, PathBuf::from("data/raw"));
        assert_eq!(m.pattern, "*.raw");

        let m = FileMask::parse(r"data\run?.dat");
        assert_eq!(m.dir, PathBuf::from("data"));
        assert_eq!(m.pattern, "run?.dat");
    }

    #[test]
    fn trailing_separator_selects_everything() {
        let m = FileMask::parse("some/dir/");
        assert_eq!(m.dir, PathBuf::from("some/dir"));
        assert_eq!(m.pattern, "*");
        assert!(m.trailing_separator);
    }

    #[test]
    fn root_directory_is_kept() {
        let m = FileMask::parse("/*.log");
        assert_eq!(m.dir, PathBuf::from("/"));
        assert_eq!(m.pattern, "*.log");
    }

    #[test]
    fn existing_directory_without_wildcards_becomes_the_search_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        let mask = format!("{}/sub", tmp.path().display());

        let m = FileMask::parse(&mask);
        assert_eq!(m.dir, tmp.path().join("sub"));
        assert_eq!(m.pattern, "*");
    }

    #[test]
    fn plain_file_name_stays_a_pattern() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), b"x").unwrap();
        let mask = format!("{}/a.txt", tmp.path().display());

        let m = FileMask::parse(&mask);
        assert_eq!(m.dir, tmp.path());
        assert_eq!(m.pattern, "a.txt");
    }

    #[test]
    fn matcher_handles_wildcards_and_literal_brackets() {
        let m = FileMask::parse("run?[1].dat").matcher().unwrap();
        assert!(m.matches("runA[1].dat"));
        assert!(!m.matches("runA1.dat"));

        let m = FileMask::parse("*.txt").matcher().unwrap();
        assert!(m.matches("a.txt"));
        assert!(m.matches(".hidden.txt"));
        assert!(!m.matches("c.bin"));
    }

    #[test]
    fn repeated_stars_act_as_one() {
        let m = FileMask::parse("a**.txt").matcher().unwrap();
        assert!(m.matches("abc.txt"));
        assert!(m.matches("a.txt"));
        assert!(!m.matches("b.txt"));

        let m = FileMask::parse("*.**").matcher().unwrap();
        assert!(m.matches("c.bin"));
        assert!(!m.matches("noext"));
    }
}
