//! File-backed `DocumentStore`: one pretty-printed `<collection>.json` per
//! collection inside the data directory.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use uuid::Uuid;

use cafe_core::{DocumentStore, DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`. The directory must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    pub fn exists(&self, collection: &str) -> bool {
        self.path_for(collection).is_file()
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self, collection: &str) -> DomainResult<Option<JsonValue>> {
        let path = self.path_for(collection);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::persistence(format!(
                    "read {}: {e}",
                    path.display()
                )));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| DomainError::persistence(format!("parse {}: {e}", path.display())))
    }

    /// Write to a sibling temp file, then rename over the target, so readers
    /// and crashes only ever see the old or the new document.
    fn save(&self, collection: &str, document: &JsonValue) -> DomainResult<()> {
        let path = self.path_for(collection);
        let tmp = self
            .dir
            .join(format!(".{collection}.{}.tmp", Uuid::now_v7()));

        let bytes = serde_json::to_vec_pretty(document)?;
        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(&bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &path));

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            tracing::error!(collection, path = %path.display(), error = %e, "document write failed");
            return Err(DomainError::persistence(format!(
                "write {}: {e}",
                path.display()
            )));
        }
        Ok(())
    }
}
