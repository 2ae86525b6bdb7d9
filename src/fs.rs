use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context as _;

/// Write a generated artifact, creating missing parent directories.
///
/// Any existing file at `path` is truncated and fully replaced.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be written.
pub fn write_artifact(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn write_artifact_creates_file_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        write_artifact(&path, "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn write_artifact_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("chart.svg");
        write_artifact(&path, "x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_artifact_truncates_longer_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        fs::write(&path, "0123456789").unwrap();
        write_artifact(&path, "ab").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ab");
    }

    #[test]
    fn write_artifact_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("assets");
        fs::write(&blocker, "not a dir").unwrap();
        let err = write_artifact(&blocker.join("chart.svg"), "x").unwrap_err();
        assert!(format!("{err:#}").contains("assets"), "{err:#}");
    }
}
