use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use sieve_core::SieveError;

/// First free path among `name.ext`, `name_2.ext`, `name_3.ext`, ...
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (2..)
        .map(|n| path.with_file_name(format!("{stem}_{n}{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> SieveError + '_ {
    move |source| SieveError::OutputWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `contents` to a new file under `dir`, never replacing an existing one
pub fn write_new(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, SieveError> {
    fs::create_dir_all(dir).map_err(write_error(dir))?;
    let path = unique_path(&dir.join(name));
    fs::write(&path, contents).map_err(write_error(&path))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(path)
}

pub fn append(path: &Path, contents: &str) -> Result<(), SieveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error(parent))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error(path))?;
    file.write_all(contents.as_bytes())
        .map_err(write_error(path))?;
    tracing::debug!(path = %path.display(), "appended to file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn postfix_counts_up_from_two() {
        let dir = tempfile::tempdir().unwrap();

        let first = write_new(dir.path(), "story_weblio_笊.md", "a").unwrap();
        let second = write_new(dir.path(), "story_weblio_笊.md", "b").unwrap();
        let third = write_new(dir.path(), "story_weblio_笊.md", "c").unwrap();

        assert_eq!(first, dir.path().join("story_weblio_笊.md"));
        assert_eq!(second, dir.path().join("story_weblio_笊_2.md"));
        assert_eq!(third, dir.path().join("story_weblio_笊_3.md"));
        assert_eq!(fs::read_to_string(first).unwrap(), "a");
    }

    #[test]
    fn write_new_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("kanji sieve output");
        let path = write_new(&nested, "orphans.csv", "犬").unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orphans.md");
        append(&path, "one\n").unwrap();
        append(&path, "two\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn write_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "").unwrap();

        let err = write_new(&blocker, "report.md", "x").unwrap_err();
        assert!(matches!(err, SieveError::OutputWrite { .. }));
    }
}
