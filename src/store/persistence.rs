//! Directory-backed context storage
//!
//! Records live at `{root}/contexts/{name}.json`. Every write goes to a unique
//! hidden temp file in the same directory first and is then published:
//! new records with a hard link, which fails if the name is already taken,
//! and replacements with a rename. Readers only open published files.

use crate::context::{validate_name, Context};
use crate::error::ContextError;
use crate::store::ContextStorage;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const RECORD_EXTENSION: &str = "json";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// File-per-context storage rooted at a directory
#[derive(Debug, Clone)]
pub struct FileContextStorage {
    root: PathBuf,
}

impl FileContextStorage {
    /// Create storage at `root` without touching the filesystem.
    /// The contexts directory is created on first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create storage at `root`, creating the contexts directory now
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, ContextError> {
        let storage = Self::new(root);
        storage.ensure_dir()?;
        Ok(storage)
    }

    pub fn contexts_dir(&self) -> PathBuf {
        self.root.join("contexts")
    }

    /// Path of the published record for `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.contexts_dir()
            .join(format!("{}.{}", name, RECORD_EXTENSION))
    }

    fn ensure_dir(&self) -> Result<PathBuf, ContextError> {
        let dir = self.contexts_dir();
        fs::create_dir_all(&dir).map_err(|e| ContextError::persistence(&dir, e))?;
        Ok(dir)
    }

    fn temp_path(&self, dir: &Path, name: &str) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        dir.join(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
    }

    /// Serialize `context` into a fresh temp file and flush it to disk
    fn write_temp(&self, context: &Context) -> Result<PathBuf, ContextError> {
        let dir = self.ensure_dir()?;
        let temp_path = self.temp_path(&dir, &context.name);

        let serialized = serde_json::to_vec_pretty(context).map_err(|e| {
            ContextError::persistence(&temp_path, io::Error::new(io::ErrorKind::InvalidData, e))
        })?;

        let result = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .and_then(|mut file| {
                file.write_all(&serialized)?;
                file.sync_all()
            });

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(ContextError::persistence(&temp_path, e));
        }
        Ok(temp_path)
    }
}

impl ContextStorage for FileContextStorage {
    fn names(&self) -> Result<Vec<String>, ContextError> {
        let dir = self.contexts_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ContextError::persistence(&dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        dir.display(),
                        e
                    );
                    continue;
                }
            };

            let path = entry.path();
            if path.extension() != Some(OsStr::new(RECORD_EXTENSION)) {
                continue;
            }

            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    tracing::warn!("Invalid context filename (non-UTF8): {:?}", path);
                    continue;
                }
            };

            if validate_name(&name).is_err() {
                tracing::warn!("Ignoring unexpected file in context store: {}", path.display());
                continue;
            }
            names.push(name);
        }
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<Option<Context>, ContextError> {
        let path = self.path_for(name);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ContextError::persistence(&path, e)),
        };

        let context: Context = serde_json::from_str(&content).map_err(|e| {
            ContextError::persistence(&path, io::Error::new(io::ErrorKind::InvalidData, e))
        })?;

        if context.name != name {
            return Err(ContextError::persistence(
                &path,
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "record name mismatch: filename={}, record={}",
                        name, context.name
                    ),
                ),
            ));
        }
        Ok(Some(context))
    }

    fn insert(&self, context: &Context) -> Result<(), ContextError> {
        let target = self.path_for(&context.name);
        let temp_path = self.write_temp(context)?;

        // A hard link never replaces an existing file, so of two racing
        // writers exactly one publishes.
        let linked = fs::hard_link(&temp_path, &target);
        let _ = fs::remove_file(&temp_path);

        match linked {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(ContextError::AlreadyExists(context.name.clone()))
            }
            Err(e) => Err(ContextError::persistence(&target, e)),
        }
    }

    fn replace(&self, context: &Context) -> Result<(), ContextError> {
        let target = self.path_for(&context.name);
        // Last writer wins: a remove between this check and the rename is undone.
        if !target.exists() {
            return Err(ContextError::NotFound(context.name.clone()));
        }

        let temp_path = self.write_temp(context)?;
        fs::rename(&temp_path, &target).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ContextError::persistence(&target, e)
        })
    }

    fn delete(&self, name: &str) -> Result<(), ContextError> {
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ContextError::NotFound(name.to_string()))
            }
            Err(e) => Err(ContextError::persistence(&path, e)),
        }
    }

    fn location(&self) -> String {
        self.contexts_dir().display().to_string()
    }
}
