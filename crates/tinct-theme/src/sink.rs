//! Where generated CSS ends up.
//!
//! The theme core never touches a document or a filesystem directly. A
//! [`StyleSink`] is handed in, and mounting is a `retract` followed by a
//! `publish` under one style id, so a re-mount replaces the old text
//! instead of stacking a second copy.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ThemeError};

/// Destination for named style text.
pub trait StyleSink {
    /// Store `css` under `id`, replacing anything already there.
    ///
    /// # Errors
    ///
    /// Implementation-specific, e.g. [`ThemeError::Io`] for files.
    fn publish(&mut self, id: &str, css: &str) -> Result<()>;

    /// Remove whatever is stored under `id`. Absent ids are not an error.
    ///
    /// # Errors
    ///
    /// Implementation-specific, e.g. [`ThemeError::Io`] for files.
    fn retract(&mut self, id: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemorySink
// ---------------------------------------------------------------------------

/// Keeps published styles in a map.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    styles: BTreeMap<String, String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl StyleSink for MemorySink {
    fn publish(&mut self, id: &str, css: &str) -> Result<()> {
        self.styles.insert(id.to_owned(), css.to_owned());
        Ok(())
    }

    fn retract(&mut self, id: &str) -> Result<()> {
        self.styles.remove(id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileSink
// ---------------------------------------------------------------------------

/// Writes each style to `{dir}/{id}.css`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `id`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Io`] (`InvalidInput`) when `id` is empty or is not a
    /// plain file name.
    pub fn path(&self, id: &str) -> Result<PathBuf> {
        let plain = !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != "..";
        let path = self.dir.join(format!("{id}.css"));
        if plain {
            Ok(path)
        } else {
            Err(ThemeError::io(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "style id must be a plain file name"),
            ))
        }
    }
}

impl StyleSink for FileSink {
    fn publish(&mut self, id: &str, css: &str) -> Result<()> {
        let path = self.path(id)?;
        fs::create_dir_all(&self.dir).map_err(|e| ThemeError::io(&self.dir, e))?;
        fs::write(&path, css).map_err(|e| ThemeError::io(&path, e))?;
        debug!(path = %path.display(), bytes = css.len(), "published style");
        Ok(())
    }

    fn retract(&mut self, id: &str) -> Result<()> {
        let path = self.path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "retracted style");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ThemeError::io(path, e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_sink_replaces_and_retracts() {
        let mut sink = MemorySink::new();
        sink.publish("a", "one").unwrap();
        sink.publish("a", "two").unwrap();
        assert_eq!(sink.get("a"), Some("two"));
        assert_eq!(sink.len(), 1);

        sink.retract("a").unwrap();
        sink.retract("never-there").unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn file_sink_writes_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("styles"));

        sink.publish("THEME_STYLES", ":root {\n}").unwrap();
        let path = dir.path().join("styles").join("THEME_STYLES.css");
        assert_eq!(fs::read_to_string(&path).unwrap(), ":root {\n}");

        sink.retract("THEME_STYLES").unwrap();
        assert!(!path.exists());
        sink.retract("THEME_STYLES").unwrap();
    }

    #[test]
    fn file_sink_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());
        for id in ["", "../escape", "a/b", ".."] {
            let err = sink.publish(id, "x").unwrap_err();
            assert!(matches!(err, ThemeError::Io { ref source, .. } if source.kind() == io::ErrorKind::InvalidInput), "{id}");
        }
    }
}
