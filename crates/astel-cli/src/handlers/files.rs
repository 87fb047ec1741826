//! Local file handling for the import and export commands.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Read a spreadsheet to upload, returning its file name and contents.
pub async fn read_upload(path: &Path) -> Result<(String, Vec<u8>)> {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        bail!("'{}' does not name a file", path.display());
    };
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok((name.to_string(), contents))
}

/// Write downloaded export bytes to `path`.
pub async fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    println!("Saved {} byte(s) to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_upload_returns_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cadastro.xlsx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let (name, contents) = read_upload(&path).await.unwrap();
        assert_eq!(name, "cadastro.xlsx");
        assert_eq!(contents, b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_read_upload_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_upload(&dir.path().join("nope.csv")).await.is_err());
    }

    #[tokio::test]
    async fn test_write_export_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("dados.csv");

        write_export(&path, b"a;b\n").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a;b\n");
    }
}
