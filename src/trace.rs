use std::{
    fs,
    io::{self, Read},
    path::Path,
    str::FromStr,
};

use xz2::read::XzDecoder;

use crate::error::{Result, SimError};

/// Parses whitespace-separated access tokens, e.g. `"1 2 3 1"`.
pub fn parse_accesses<K: FromStr>(input: &str) -> Result<Vec<K>> {
    input
        .split_whitespace()
        .enumerate()
        .map(|(idx, token)| {
            token.parse().map_err(|_| SimError::MalformedAccess {
                position: idx + 1,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Reads an access trace from disk. Files ending in `.xz` are decompressed.
pub fn read_trace<K: FromStr>(path: &Path) -> Result<Vec<K>> {
    let stream = fs::File::open(path)?;
    let text = if path.extension().is_some_and(|ext| ext == "xz") {
        read_to_string(XzDecoder::new(stream))?
    } else {
        read_to_string(stream)?
    };
    let accesses = parse_accesses(&text)?;
    log::debug!("read {} accesses from {}", accesses.len(), path.display());
    Ok(accesses)
}

fn read_to_string(mut reader: impl Read) -> io::Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}
