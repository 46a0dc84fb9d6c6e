use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `data` to `path` through a tempfile persisted over it.
///
/// `fill` writes into folders the operator edits by hand; an interrupted run
/// must leave either the old file or the complete template, never a truncated
/// description that the dashboard would then read as real content.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create `path` only when nothing is there yet, so a description the
/// operator already wrote is never replaced. Returns whether it wrote.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Read a file as UTF-8, mapping "does not exist" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site/.portfoliodb/description.md");
        atomic_write(&path, b"---\nwip: true\n---\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "---\nwip: true\n---\n"
        );
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("description.md");
        std::fs::write(&path, b"original").unwrap();
        let written = write_if_missing(&path, b"new").unwrap();
        assert!(!written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn read_optional_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_optional(&dir.path().join("nope.md")).unwrap().is_none());
    }
}
