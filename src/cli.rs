use chrono::NaiveDate;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::runner::Config;

const AFTER_HELP: &str = "\
The mask may include a folder path, e.g. data/*.raw. A mask naming an existing
folder selects every file in it.

Windows-style switches are also accepted:
  checksum_generator FileMask [/S] [/O:OutputFile] [/F] [/Preview]
  checksum_generator /I:FileMask [/S] [/O:OutputFile] [/F] [/Preview]";

#[derive(Debug, clap::Parser)]
#[command(
    version,
    about = "Computes MD5 and SHA-1 checksums for the specified files",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Files to compute checksums for, e.g. *.raw
    #[arg(value_name = "MASK")]
    pub mask: Option<String>,

    /// File mask, takes precedence over the positional MASK
    #[arg(short = 'i', long = "input", value_name = "MASK")]
    pub input: Option<String>,

    /// Process files in all subfolders
    #[arg(short = 's', long)]
    pub recurse: bool,

    /// Output file path [default: CheckSumFile_<yyyy-MM-dd>.txt]
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<String>,

    /// Write full file paths to the output file
    #[arg(short = 'f', long)]
    pub full_paths: bool,

    /// List the files that would be processed, without hashing them
    #[arg(long)]
    pub preview: bool,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the run configuration, defaulting the output path to `today`.
    pub fn into_config(self, today: NaiveDate) -> Result<Config> {
        let mask = match (self.input, self.mask) {
            (Some(input), _) => non_blank(input, "/I does not have a filemask specification")?,
            (None, Some(mask)) => non_blank(mask, "no file mask given")?,
            (None, None) => return Err(Error::Argument(String::new())),
        };
        let output = match self.output {
            Some(path) => PathBuf::from(non_blank(path, "/O does not have an output file path")?),
            None => default_output_path(today),
        };
        Ok(Config {
            mask,
            recurse: self.recurse,
            output,
            full_paths: self.full_paths,
            preview: self.preview,
        })
    }
}

fn non_blank(value: String, message: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::Argument(message.to_string()));
    }
    Ok(value)
}

pub fn default_output_path(today: NaiveDate) -> PathBuf {
    PathBuf::from(format!("CheckSumFile_{}.txt", today.format("%Y-%m-%d")))
}

/// Rewrites `/S`, `/F`, `/Preview`, `/I:<mask>` and `/O:<path>` into their
/// long-option forms. Arguments that name an existing path, or that contain
/// a further separator, are left alone so absolute masks still work.
pub fn translate_legacy_args<I>(args: I) -> Result<Vec<OsString>>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut invalid = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        let switch = arg
            .to_str()
            .filter(|_| i > 0)
            .and_then(legacy_switch)
            .map(|(name, value)| (name.to_string(), value.map(str::to_string)));
        let Some((name, value)) = switch else {
            out.push(arg);
            continue;
        };
        let translated = match name.to_ascii_lowercase().as_str() {
            "i" => format!("--input={}", value.unwrap_or_default()),
            "o" => format!("--output={}", value.unwrap_or_default()),
            "s" => "--recurse".to_string(),
            "f" => "--full-paths".to_string(),
            "preview" => "--preview".to_string(),
            "?" | "h" | "help" => "--help".to_string(),
            _ => {
                invalid.push(format!("/{name}"));
                continue;
            }
        };
        out.push(OsString::from(translated));
    }
    if !invalid.is_empty() {
        return Err(Error::Argument(format!(
            "invalid command line parameters: {}",
            invalid.join(" ")
        )));
    }
    Ok(out)
}

fn legacy_switch(arg: &str) -> Option<(&str, Option<&str>)> {
    let body = arg.strip_prefix('/')?;
    let (name, value) = match body.find([':', '=']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };
    let is_name = name == "?"
        || (!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()));
    if !is_name || Path::new(arg).exists() {
        return None;
    }
    Some((name, value))
}

pub fn parse_from<I>(args: I) -> std::result::Result<Args, clap::Error>
where
    I: IntoIterator<Item = OsString>,
{
    Args::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 12, 9).unwrap()
    }

    #[test]
    fn legacy_switches_become_long_options() {
        let args = translate_legacy_args(os(&[
            "prog",
            "/I:*.raw",
            "/s",
            "/O:sums.txt",
            "/F",
            "/Preview",
        ]))
        .unwrap();
        assert_eq!(
            args,
            os(&[
                "prog",
                "--input=*.raw",
                "--recurse",
                "--output=sums.txt",
                "--full-paths",
                "--preview",
            ])
        );
    }

    #[test]
    fn absolute_masks_pass_through() {
        let args = translate_legacy_args(os(&["prog", "/tmp/*.txt", "/S"])).unwrap();
        assert_eq!(args, os(&["prog", "/tmp/*.txt", "--recurse"]));
    }

    #[test]
    fn unknown_switches_are_rejected() {
        let err = translate_legacy_args(os(&["prog", "*.raw", "/Q", "/Bogus"])).unwrap_err();
        assert_eq!(err.to_string(), "invalid command line parameters: /Q /Bogus");
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn positional_mask_and_default_output() {
        let config = parse_from(os(&["prog", "*.raw", "-s"]))
            .unwrap()
            .into_config(today())
            .unwrap();
        assert_eq!(config.mask, "*.raw");
        assert!(config.recurse);
        assert!(!config.full_paths);
        assert!(!config.preview);
        assert_eq!(config.output, PathBuf::from("CheckSumFile_2013-12-09.txt"));
    }

    #[test]
    fn input_switch_overrides_positional_mask() {
        let argv = translate_legacy_args(os(&["prog", "*.bin", "/I:*.raw", "/O:out.tsv"])).unwrap();
        let config = parse_from(argv).unwrap().into_config(today()).unwrap();
        assert_eq!(config.mask, "*.raw");
        assert_eq!(config.output, PathBuf::from("out.tsv"));
    }

    #[test]
    fn empty_values_and_missing_mask_are_argument_errors() {
        let argv = translate_legacy_args(os(&["prog", "/I:"])).unwrap();
        let err = parse_from(argv).unwrap().into_config(today()).unwrap_err();
        assert!(matches!(err, Error::Argument(ref m) if m.contains("/I")));

        let argv = translate_legacy_args(os(&["prog", "*.raw", "/O:"])).unwrap();
        let err = parse_from(argv).unwrap().into_config(today()).unwrap_err();
        assert!(matches!(err, Error::Argument(ref m) if m.contains("/O")));

        let err = parse_from(os(&["prog"])).unwrap().into_config(today()).unwrap_err();
        assert_eq!(err.exit_code(), -1);
    }
}
