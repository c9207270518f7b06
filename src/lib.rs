//! Computes MD5 and SHA-1 checksums for the files matching a mask and writes
//! them to a tab-separated manifest.

pub mod cli;
pub mod error;
pub mod hash;
pub mod logging;
pub mod manifest;
pub mod mask;
pub mod report;
pub mod runner;
pub mod scan;

pub use error::{Error, HashError};
pub use hash::{hash_file, Digests};
pub use runner::{run, Config, Outcome, Reporter, RunSummary};
