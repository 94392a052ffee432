//! File helpers: the token-file loader and atomic writes for persisted state.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::lib::errors::TokenFileError;

/// Read the whole token file and return its contents verbatim.
///
/// No trimming is applied: a trailing newline in the file is part of the token.
/// Any I/O failure (missing file, permission denied, directory, non UTF-8
/// contents) is reported as a [`TokenFileError`]. The handle is closed before
/// this function returns on every path.
pub fn read_token_file(path: &Path) -> Result<String, TokenFileError> {
    fs::read_to_string(path).map_err(|source| TokenFileError {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `destination` with `contents` via a sibling temporary file.
///
/// Parent directories are created when missing. Readers never observe a
/// partially written file.
pub fn write_atomically(destination: &Path, contents: &[u8]) -> Result<(), io::Error> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut staged = NamedTempFile::new_in(&parent)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged
        .persist(destination)
        .map_err(|err| err.error)?;
    Ok(())
}

/// Read a file that may legitimately be absent.
///
/// Returns `Ok(None)` when the file does not exist. The raw bytes are returned
/// so callers decide how to report contents that are not UTF-8.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, io::Error> {
    match fs::read(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
