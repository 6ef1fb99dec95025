//! Manifest Writer
//!
//! Encodes workflows as pretty-printed JSON and persists them under a name.
//! Each document is written independently; a run that fails part way may
//! leave some documents updated and others from a previous run.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::workflow::Workflow;

/// Somewhere named documents can be stored.
///
/// Storing a document under an existing name replaces it.
pub trait DocumentStore {
    fn persist(&mut self, name: &str, contents: &str) -> io::Result<()>;
}

/// Stores documents as files in a directory.
///
/// Each file is written to a temporary file in the same directory and then
/// renamed over the target, so readers never observe a half-written manifest.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| Error::Write {
            name: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path a document with the given name is stored at.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl DocumentStore for FsStore {
    fn persist(&mut self, name: &str, contents: &str) -> io::Result<()> {
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        file.persist(self.path_for(name)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Keeps documents in memory, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn persist(&mut self, name: &str, contents: &str) -> io::Result<()> {
        self.documents.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

/// Encodes a workflow as a manifest document.
///
/// Output uses 2-space indentation and keeps keys in field-declaration order,
/// so the same workflow always encodes to the same bytes.
pub fn encode(workflow: &Workflow) -> Result<String> {
    Ok(serde_json::to_string_pretty(workflow)?)
}

/// Writes manifests into a [`DocumentStore`].
#[derive(Debug)]
pub struct ManifestWriter<S> {
    store: S,
}

impl<S: DocumentStore> ManifestWriter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Encodes `workflow` and stores it under `name`, replacing any previous
    /// document of that name.
    pub fn write(&mut self, name: &str, workflow: &Workflow) -> Result<()> {
        let document = encode(workflow)?;
        debug!("Encoded '{}' ({} bytes)", name, document.len());

        self.store
            .persist(name, &document)
            .map_err(|source| Error::Write {
                name: name.to_string(),
                source,
            })?;

        info!(
            "Manifest written: {} ({} steps, {} tasks)",
            name,
            workflow.len(),
            workflow.task_count()
        );
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
