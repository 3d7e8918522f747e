//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure, and the
//! text decoding used when history files come from different editors.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::GestionError;

/// Character encodings tried when reading a history file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    /// Decode raw bytes; `None` when the bytes are not valid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).ok()
            }
            // Every byte maps to the code point with the same value
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Read a whole file, returning `None` if it doesn't exist
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>, GestionError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read(path)
        .map(Some)
        .map_err(|e| GestionError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all. Concurrent
/// writers still race: whichever rename lands last wins.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), GestionError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GestionError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| GestionError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| GestionError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| GestionError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| GestionError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GestionError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write one line per item atomically
pub fn write_lines_atomic<P, I, S>(path: P, lines: I) -> Result<(), GestionError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }
    write_atomic(path, contents.as_bytes())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
