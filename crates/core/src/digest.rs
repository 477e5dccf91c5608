//! Content digest service (MD5 / SHA-1)

use crate::error::{Result, SivError};
use md5::{Digest, Md5};
use sha1::Sha1;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Hash algorithm selected for a snapshot
///
/// The identifier is fixed for the lifetime of a verification file: every
/// digest in the file was computed with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
}

impl HashAlgorithm {
    /// Identifier as it appears in the verification file header
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
        }
    }

    /// Length of the hex-encoded digest (32 for MD5, 40 for SHA-1)
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = SivError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            other => Err(SivError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest a byte slice, returning lowercase hex with no separators
pub fn digest_bytes(algorithm: HashAlgorithm, data: &[u8]) -> String {
    match algorithm {
        HashAlgorithm::Md5 => hex::encode(Md5::digest(data)),
        HashAlgorithm::Sha1 => hex::encode(Sha1::digest(data)),
    }
}

/// Digest a file's content (streaming for large files)
pub fn digest_file(algorithm: HashAlgorithm, path: &Path) -> Result<String> {
    match algorithm {
        HashAlgorithm::Md5 => stream_digest::<Md5>(path),
        HashAlgorithm::Sha1 => stream_digest::<Sha1>(path),
    }
}

fn stream_digest<D: Digest>(path: &Path) -> Result<String> {
    use std::fs::File;
    use std::io::{BufReader, Read};

    let file = File::open(path)
        .map_err(|e| SivError::io(format!("failed to open {}", path.display()), e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = D::new();

    let mut buffer = [0u8; 8192]; // 8KB buffer
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| SivError::io(format!("failed to read {}", path.display()), e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
