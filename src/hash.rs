use data_encoding::HEXLOWER;
use digest::Digest;
use md5::Md5;
use sha1::Sha1;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::HashError;

const BUFFER_SIZE: usize = 1024 * 20;

/// MD5 and SHA-1 of one file, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digests {
    pub md5: String,
    pub sha1: String,
}

/// Streams `path` once, feeding both digests from the same buffer.
pub fn hash_file(path: &Path) -> Result<Digests, HashError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => HashError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => HashError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    hash_reader(BufReader::new(file)).map_err(|source| HashError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn hash_reader<R: Read>(mut reader: R) -> std::io::Result<Digests> {
    let mut md5 = Md5::new();
    let mut sha1 = Sha1::new();

    let mut buffer = [0; BUFFER_SIZE];
    loop {
        let count = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        md5.update(&buffer[..count]);
        sha1.update(&buffer[..count]);
    }
    Ok(Digests {
        md5: HEXLOWER.encode(md5.finalize().as_ref()),
        sha1: HEXLOWER.encode(sha1.finalize().as_ref()),
    })
}
