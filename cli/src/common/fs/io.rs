//! # sdkport Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the path to every error, plus the
//! ancestor search used to find a project's solution file.
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) unless it exists; fails if the path is a file.
//! - **`read_file_to_string`** / **`write_string_to_file`**: whole-file text I/O with context.
//! - **`read_xml_text`**: reads an XML file saved as UTF-8 or as UTF-16 with a byte-order mark.
//! - **`find_in_ancestors`**: walks from a directory towards the filesystem root looking for a file with a given extension.
//!
use crate::core::error::{Result, SdkPortError};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating parents as needed.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating it fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(SdkPortError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Reads an XML file as text. A UTF-16 byte-order mark selects UTF-16 decoding;
/// anything else must be UTF-8. A UTF-8 byte-order mark is kept.
pub fn read_xml_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file {:?}", path))?;
    let text = match bytes.get(..2) {
        Some([0xFF, 0xFE]) => decode_utf16(&bytes[2..], u16::from_le_bytes),
        Some([0xFE, 0xFF]) => decode_utf16(&bytes[2..], u16::from_be_bytes),
        _ => String::from_utf8(bytes).map_err(anyhow::Error::new),
    };
    text.with_context(|| format!("Failed to decode file {:?}", path))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        anyhow::bail!("UTF-16 text has an odd number of bytes");
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16(&units)?)
}

/// Writes string content to a file, overwriting it and creating its parent directory.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Finds the first file with `extension` (case-insensitive) in `start` or one
/// of its ancestors. Within a directory the first match in name order wins.
pub fn find_in_ancestors(start: &Path, extension: &str) -> Result<Option<PathBuf>> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.is_dir() {
            let mut matches = Vec::new();
            for entry in fs::read_dir(dir)
                .with_context(|| format!("Failed to list directory {:?}", dir))?
            {
                let path = entry?.path();
                let is_match = path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
                if is_match {
                    matches.push(path);
                }
            }
            matches.sort();
            if let Some(found) = matches.into_iter().next() {
                debug!("Found .{} file {:?}", extension, found);
                return Ok(Some(found));
            }
        }
        current = dir.parent();
    }
    Ok(None)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn utf16_bytes(text: &str, bom: [u8; 2], unit: fn(u16) -> [u8; 2]) -> Vec<u8> {
        let mut bytes = bom.to_vec();
        bytes.extend(text.encode_utf16().flat_map(unit));
        bytes
    }

    #[test]
    fn test_read_xml_text_decodes_utf16_with_bom() -> Result<()> {
        let dir = tempdir()?;
        let xml = "<?xml version=\"1.0\" encoding=\"utf-16\"?><a b=\"é\"/>";

        let le = dir.path().join("le.xml");
        fs::write(&le, utf16_bytes(xml, [0xFF, 0xFE], u16::to_le_bytes))?;
        assert_eq!(read_xml_text(&le)?, xml);

        let be = dir.path().join("be.xml");
        fs::write(&be, utf16_bytes(xml, [0xFE, 0xFF], u16::to_be_bytes))?;
        assert_eq!(read_xml_text(&be)?, xml);
        Ok(())
    }

    #[test]
    fn test_read_xml_text_rejects_truncated_utf16() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("odd.xml");
        fs::write(&path, [0xFF, 0xFE, b'<'])?;
        assert!(read_xml_text(&path).is_err());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the directory needs to be created, including parents.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the target path exists but is a file.
    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/App.csproj");
        write_string_to_file(&file_path, "<Project />")?;
        assert_eq!(read_file_to_string(&file_path)?, "<Project />");
        Ok(())
    }

    #[test]
    fn test_find_in_ancestors_walks_up() -> Result<()> {
        let base_dir = tempdir()?;
        let project_dir = base_dir.path().join("src/App");
        fs::create_dir_all(&project_dir)?;
        fs::write(base_dir.path().join("B.sln"), "")?;
        fs::write(base_dir.path().join("A.SLN"), "")?;

        let found = find_in_ancestors(&project_dir, "sln")?;
        assert_eq!(found, Some(base_dir.path().join("A.SLN")));
        Ok(())
    }

    #[test]
    fn test_find_in_ancestors_ignores_directories_with_extension() -> Result<()> {
        let base_dir = tempdir()?;
        fs::create_dir_all(base_dir.path().join("fake.sln"))?;
        let found = find_in_ancestors(base_dir.path(), "sln")?;
        // A real .sln above the temp dir would be found, but never the directory itself.
        assert_ne!(found, Some(base_dir.path().join("fake.sln")));
        Ok(())
    }
}
