// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Where saved documents live.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{SerializedDocument, StoreError};

/// Key-value persistence for the serialized document.
pub trait PersistenceStore {
    /// The stored document, or `None` when nothing has been saved.
    fn load(&self) -> Result<Option<SerializedDocument>, StoreError>;

    fn save(&mut self, document: &SerializedDocument) -> Result<(), StoreError>;
}

/// Keeps the saved document in memory. Used by tests and embedders that
/// handle persistence themselves.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Option<SerializedDocument>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: SerializedDocument) -> Self {
        Self {
            saved: Some(document),
            saves: 0,
        }
    }

    pub fn saved(&self) -> Option<&SerializedDocument> {
        self.saved.as_ref()
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceStore for MemoryStore {
    fn load(&self) -> Result<Option<SerializedDocument>, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, document: &SerializedDocument) -> Result<(), StoreError> {
        self.saved = Some(document.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Stores the document as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the stored file. Returns whether there was one.
    pub fn remove(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl PersistenceStore for JsonFileStore {
    fn load(&self) -> Result<Option<SerializedDocument>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(SerializedDocument::from_json(&json)?))
    }

    fn save(&mut self, document: &SerializedDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = document.to_json_pretty().map_err(io::Error::from)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "document written");
        Ok(())
    }
}
